use crate::{Email, MailerError, templates::TemplateContext};
use askama::Template;

#[derive(Template)]
#[template(
    source = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Verify your email - {{ app_name }}</title>
    <style>
        body { font-family: Arial, sans-serif; line-height: 1.6; color: #333; margin: 0; padding: 20px; background-color: #f4f4f4; }
        .container { max-width: 600px; margin: 0 auto; background: white; padding: 30px; border-radius: 8px; }
        .code { font-size: 32px; letter-spacing: 8px; font-family: monospace; text-align: center; background: #f8f9fa; padding: 16px; border-radius: 4px; }
        .footer { margin-top: 30px; padding-top: 20px; border-top: 1px solid #eee; font-size: 12px; color: #666; }
    </style>
</head>
<body>
    <div class="container">
        <h1>{{ app_name }}</h1>
        <p>{% if let Some(name) = user_name %}Hello {{ name }},{% else %}Hello,{% endif %}</p>
        <p>Use the code below to confirm your email address. It expires in {{ expires_in_minutes }} minutes.</p>
        <p class="code">{{ code }}</p>
        <p>If you did not create an account, you can ignore this email.</p>
        <div class="footer">
            <p>This email was sent by <a href="{{ app_url }}">{{ app_name }}</a>.</p>
        </div>
    </div>
</body>
</html>
"#,
    ext = "html"
)]
pub struct VerificationHtmlTemplate {
    pub app_name: String,
    pub app_url: String,
    pub user_name: Option<String>,
    pub code: String,
    pub expires_in_minutes: i64,
}

#[derive(Template)]
#[template(
    source = r#"{% if let Some(name) = user_name %}Hello {{ name }},{% else %}Hello,{% endif %}

Use the code below to confirm your email address on {{ app_name }}:

    {{ code }}

The code expires in {{ expires_in_minutes }} minutes.
If you did not create an account, you can ignore this email.
"#,
    ext = "txt"
)]
pub struct VerificationTextTemplate {
    pub app_name: String,
    pub user_name: Option<String>,
    pub code: String,
    pub expires_in_minutes: i64,
}

/// The email carrying a one-time email verification code.
pub struct VerificationEmail;

impl VerificationEmail {
    pub fn build(
        from: &str,
        to: &str,
        code: &str,
        expires_in_minutes: i64,
        context: TemplateContext,
    ) -> Result<Email, MailerError> {
        let html_body = VerificationHtmlTemplate {
            app_name: context.app_name.clone(),
            app_url: context.app_url.clone(),
            user_name: context.user_name.clone(),
            code: code.to_string(),
            expires_in_minutes,
        }
        .render()?;

        let text_body = VerificationTextTemplate {
            app_name: context.app_name.clone(),
            user_name: context.user_name,
            code: code.to_string(),
            expires_in_minutes,
        }
        .render()?;

        let email = Email::new(from, to, format!("Verify your email for {}", context.app_name))
            .with_html(html_body)
            .with_text(text_body);
        email.validate()?;

        Ok(email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(user_name: Option<&str>) -> TemplateContext {
        TemplateContext {
            app_name: "Portier".to_string(),
            app_url: "https://portier.example".to_string(),
            user_email: Some("jean@example.com".to_string()),
            user_name: user_name.map(str::to_string),
        }
    }

    #[test]
    fn test_verification_email_contains_code() {
        let email = VerificationEmail::build(
            "noreply@example.com",
            "jean@example.com",
            "482913",
            15,
            context(Some("Jean")),
        )
        .unwrap();

        assert_eq!(email.to, vec!["jean@example.com"]);
        assert_eq!(email.subject, "Verify your email for Portier");

        let html = email.html_body.unwrap();
        assert!(html.contains("482913"));
        assert!(html.contains("Hello Jean,"));
        assert!(html.contains("15 minutes"));

        let text = email.text_body.unwrap();
        assert!(text.contains("482913"));
        assert!(text.starts_with("Hello Jean,"));
    }

    #[test]
    fn test_verification_email_without_name() {
        let email = VerificationEmail::build(
            "noreply@example.com",
            "jean@example.com",
            "000001",
            15,
            context(None),
        )
        .unwrap();

        assert!(email.text_body.unwrap().starts_with("Hello,"));
    }

    #[test]
    fn test_html_escapes_user_name() {
        let email = VerificationEmail::build(
            "noreply@example.com",
            "jean@example.com",
            "123456",
            15,
            context(Some("<script>")),
        )
        .unwrap();

        assert!(!email.html_body.unwrap().contains("<script>"));
    }
}
