use crate::error::ValidationError;
use regex::Regex;
use std::sync::LazyLock;

/// Validation rules shared by the account operations.
///
/// `local@domain.tld`, where the top-level label is 2 to 4 characters long.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_.\-]+@([A-Za-z0-9_\-]+\.)+[A-Za-z0-9_\-]{2,4}$")
        .expect("Invalid email regex pattern")
});

static NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z]+$").expect("Invalid name regex pattern"));

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Returns `true` when the value has the `local@domain.tld` shape.
///
/// ```rust
/// use portier_core::validation::is_valid_email;
///
/// assert!(is_valid_email("jean.dupont@example.fr"));
/// assert!(!is_valid_email("jean.dupont@example"));
/// ```
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Validates an email address
///
/// ```rust
/// use portier_core::validation::validate_email;
///
/// assert!(validate_email("user@example.com").is_ok());
/// assert!(validate_email("invalid-email").is_err());
/// ```
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::MissingField(
            "Email is required".to_string(),
        ));
    }

    if is_valid_email(email) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail(email.to_string()))
    }
}

/// Validates password strength
///
/// # Password Requirements
///
/// - At least 8 characters
/// - At least one uppercase letter, one lowercase letter and one digit
///
/// ```rust
/// use portier_core::validation::validate_password;
///
/// assert!(validate_password("Passw0rd").is_ok());
/// assert!(validate_password("password").is_err());
/// ```
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::MissingField(
            "Password is required".to_string(),
        ));
    }

    let long_enough = password.chars().count() >= MIN_PASSWORD_LENGTH;
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    if long_enough && has_upper && has_lower && has_digit {
        Ok(())
    } else {
        Err(ValidationError::WeakPassword)
    }
}

/// Validates a first or last name: ASCII letters only, at least one.
pub fn validate_name(field: &str, name: &str) -> Result<(), ValidationError> {
    if NAME_REGEX.is_match(name) {
        Ok(())
    } else {
        Err(ValidationError::InvalidName(format!(
            "{field} must contain letters only"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email_valid() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("jean.dupont@mail.example.fr").is_ok());
        assert!(validate_email("user_123-x@test-domain.info").is_ok());
    }

    #[test]
    fn test_validate_email_invalid() {
        assert!(matches!(
            validate_email(""),
            Err(ValidationError::MissingField(_))
        ));
        assert!(validate_email("invalid-email").is_err());
        assert!(validate_email("@domain.com").is_err());
        assert!(validate_email("user@").is_err());
        assert!(validate_email("user@domain").is_err());
        assert!(validate_email("user@domain.c").is_err());
        assert!(validate_email("user@domain.museum").is_err());
        assert!(validate_email("user+tag@example.com").is_err());
        assert!(validate_email("jean dupont@example.com").is_err());
    }

    #[test]
    fn test_validate_password_accepts_strong() {
        assert!(validate_password("Passw0rd").is_ok());
        assert!(validate_password("A_very_long_passphrase_9").is_ok());
    }

    #[test]
    fn test_validate_password_rejects_weak() {
        // no digit, no uppercase
        assert!(matches!(
            validate_password("password"),
            Err(ValidationError::WeakPassword)
        ));
        // no lowercase, too short
        assert!(validate_password("PASS123").is_err());
        // too short
        assert!(validate_password("short1A").is_err());
        assert!(validate_password("NOLOWER123").is_err());
        assert!(validate_password("noupper123").is_err());
        assert!(matches!(
            validate_password(""),
            Err(ValidationError::MissingField(_))
        ));
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("First name", "Jean").is_ok());
        assert!(validate_name("Last name", "Dupont").is_ok());

        assert!(validate_name("First name", "Jean2").is_err());
        assert!(validate_name("First name", "Jean-Pierre").is_err());
        assert!(validate_name("First name", "Élodie").is_err());
        assert!(validate_name("First name", "").is_err());
    }
}
