use crate::{
    Error,
    error::{StorageError, ValidationError},
};

/// Extension trait for Result types to simplify database error mapping
///
/// # Example
///
/// ```rust,ignore
/// use portier_core::error::utilities::DatabaseResultExt;
///
/// query.execute(&pool).await.map_db_err()?;
/// ```
pub trait DatabaseResultExt<T> {
    /// Convert a database error to a storage error
    fn map_db_err(self) -> Result<T, Error>;

    /// Convert a database error to a storage error with additional context
    fn map_db_err_with_context(self, context: &str) -> Result<T, Error>;
}

impl<T, E: std::fmt::Display> DatabaseResultExt<T> for Result<T, E> {
    fn map_db_err(self) -> Result<T, Error> {
        self.map_err(|e| Error::Storage(StorageError::Database(e.to_string())))
    }

    fn map_db_err_with_context(self, context: &str) -> Result<T, Error> {
        self.map_err(|e| Error::Storage(StorageError::Database(format!("{context}: {e}"))))
    }
}

/// Extension trait turning absent values into [`ValidationError::MissingField`].
///
/// Empty strings count as absent, the way form submissions usually arrive.
///
/// ```rust
/// use portier_core::error::utilities::RequiredFieldExt;
///
/// let email = Some("jean@example.com".to_string()).require_field("Email").unwrap();
/// assert_eq!(email, "jean@example.com");
/// assert!(Some(String::new()).require_field("Email").is_err());
/// ```
pub trait RequiredFieldExt<T> {
    fn require_field(self, field_name: &str) -> Result<T, ValidationError>;
}

impl RequiredFieldExt<String> for Option<String> {
    fn require_field(self, field_name: &str) -> Result<String, ValidationError> {
        self.filter(|value| !value.trim().is_empty())
            .ok_or_else(|| ValidationError::MissingField(format!("{field_name} is required")))
    }
}

impl<'a> RequiredFieldExt<&'a str> for Option<&'a str> {
    fn require_field(self, field_name: &str) -> Result<&'a str, ValidationError> {
        self.filter(|value| !value.trim().is_empty())
            .ok_or_else(|| ValidationError::MissingField(format!("{field_name} is required")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_result_ext() {
        let error_result: Result<i32, &str> = Err("database connection failed");

        match error_result.map_db_err().unwrap_err() {
            Error::Storage(StorageError::Database(msg)) => {
                assert_eq!(msg, "database connection failed");
            }
            _ => panic!("Expected storage database error"),
        }
    }

    #[test]
    fn test_database_result_ext_with_context() {
        let error_result: Result<i32, &str> = Err("timeout");

        match error_result
            .map_db_err_with_context("Failed to save user")
            .unwrap_err()
        {
            Error::Storage(StorageError::Database(msg)) => {
                assert_eq!(msg, "Failed to save user: timeout");
            }
            _ => panic!("Expected storage database error"),
        }
    }

    #[test]
    fn test_required_field_some() {
        let value = Some("jean@example.com".to_string());
        assert_eq!(value.require_field("Email").unwrap(), "jean@example.com");
    }

    #[test]
    fn test_required_field_none_and_blank() {
        let none: Option<&str> = None;
        match none.require_field("Email").unwrap_err() {
            ValidationError::MissingField(msg) => assert_eq!(msg, "Email is required"),
            _ => panic!("Expected missing field validation error"),
        }

        assert!(Some("   ").require_field("Civility").is_err());
    }
}
