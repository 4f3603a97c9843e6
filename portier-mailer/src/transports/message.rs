use crate::{Email, MailerError};
use lettre::Message;
use lettre::message::{MultiPart, SinglePart};

/// Convert a rendered [`Email`] into a lettre [`Message`].
///
/// When both bodies are present the message is sent as `multipart/alternative`.
pub(crate) fn build_message(email: Email) -> Result<Message, MailerError> {
    email.validate()?;

    let mut message_builder = Message::builder()
        .from(email.from.parse()?)
        .subject(email.subject);

    for to in email.to {
        message_builder = message_builder.to(to.parse()?);
    }

    let message = match (email.html_body, email.text_body) {
        (Some(html), Some(text)) => message_builder.multipart(
            MultiPart::alternative()
                .singlepart(SinglePart::plain(text))
                .singlepart(SinglePart::html(html)),
        )?,
        (Some(html), None) => message_builder.singlepart(SinglePart::html(html))?,
        (None, Some(text)) => message_builder.singlepart(SinglePart::plain(text))?,
        (None, None) => return Err(MailerError::Builder("No email body provided".to_string())),
    };

    Ok(message)
}
