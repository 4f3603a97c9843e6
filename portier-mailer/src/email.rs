use crate::MailerError;
use serde::{Deserialize, Serialize};

/// A rendered email ready to be handed to a transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Email {
    pub to: Vec<String>,
    pub from: String,
    pub subject: String,
    pub html_body: Option<String>,
    pub text_body: Option<String>,
}

impl Email {
    pub fn new(from: impl Into<String>, to: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            to: vec![to.into()],
            from: from.into(),
            subject: subject.into(),
            html_body: None,
            text_body: None,
        }
    }

    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.html_body = Some(html.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text_body = Some(text.into());
        self
    }

    /// Check the email can be turned into a deliverable message.
    pub fn validate(&self) -> Result<(), MailerError> {
        let problem = if self.to.iter().all(|to| to.trim().is_empty()) {
            "At least one recipient is required"
        } else if self.from.trim().is_empty() {
            "From address is required"
        } else if self.subject.trim().is_empty() {
            "Subject is required"
        } else if self.html_body.is_none() && self.text_body.is_none() {
            "Either HTML or text body is required"
        } else {
            return Ok(());
        };

        Err(MailerError::Builder(problem.to_string()))
    }
}
