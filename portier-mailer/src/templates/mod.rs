mod verification;

pub use verification::{
    VerificationEmail, VerificationHtmlTemplate, VerificationTextTemplate,
};

use serde::{Deserialize, Serialize};

/// Values shared by every template: who is sending and who is receiving.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateContext {
    pub app_name: String,
    pub app_url: String,
    pub user_email: Option<String>,
    pub user_name: Option<String>,
}

impl Default for TemplateContext {
    fn default() -> Self {
        Self {
            app_name: "Portier".to_string(),
            app_url: "http://localhost:3030".to_string(),
            user_email: None,
            user_name: None,
        }
    }
}
