use portier::{ProfileChanges, Registration};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    #[serde(rename = "userPhone")]
    pub user_phone: Option<String>,
    pub civility: Option<String>,
    pub newsletter: Option<bool>,
}

impl From<RegisterRequest> for Registration {
    fn from(request: RegisterRequest) -> Self {
        Registration {
            first_name: request.firstname,
            last_name: request.lastname,
            email: request.email,
            password: request.password,
            phone_number: request.user_phone,
            civility: request.civility,
            newsletter: request.newsletter,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerifyEmailRequest {
    pub email: Option<String>,
    #[serde(rename = "emailVerificationToken")]
    pub email_verification_token: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// A user id as sent by clients: either a JSON number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserIdParam {
    Number(i64),
    Text(String),
}

impl std::fmt::Display for UserIdParam {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserIdParam::Number(id) => write!(f, "{id}"),
            UserIdParam::Text(id) => f.write_str(id),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub id: Option<UserIdParam>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
}

impl UpdateProfileRequest {
    pub(crate) fn into_parts(self) -> (Option<String>, ProfileChanges) {
        let changes = ProfileChanges {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone_number: self.phone_number,
        };
        (self.id.map(|id| id.to_string()), changes)
    }
}

/// Body of every response except health.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub error: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

impl MessageResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            error: false,
            message: message.into(),
            access_token: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            error: true,
            message: message.into(),
            access_token: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_field_names() {
        let request: RegisterRequest = serde_json::from_value(serde_json::json!({
            "firstname": "Jean",
            "lastname": "Dupont",
            "email": "jean@example.com",
            "password": "Secret123",
            "userPhone": "0612345678",
            "civility": "M"
        }))
        .unwrap();

        let registration = Registration::from(request);
        assert_eq!(registration.first_name.as_deref(), Some("Jean"));
        assert_eq!(registration.phone_number.as_deref(), Some("0612345678"));
        assert_eq!(registration.newsletter, None);
    }

    #[test]
    fn test_update_id_number_or_string() {
        let numeric: UpdateProfileRequest =
            serde_json::from_value(serde_json::json!({ "id": 42, "firstName": "Jean" })).unwrap();
        let textual: UpdateProfileRequest =
            serde_json::from_value(serde_json::json!({ "id": "42" })).unwrap();

        let (id, changes) = numeric.into_parts();
        assert_eq!(id.as_deref(), Some("42"));
        assert_eq!(changes.first_name.as_deref(), Some("Jean"));

        let (id, _) = textual.into_parts();
        assert_eq!(id.as_deref(), Some("42"));
    }

    #[test]
    fn test_access_token_omitted_when_absent() {
        let body = serde_json::to_value(MessageResponse::success("ok")).unwrap();
        assert_eq!(body, serde_json::json!({ "error": false, "message": "ok" }));
    }
}
