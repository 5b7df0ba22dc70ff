use std::fmt;

use serde::Deserialize;

pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

/// The fields of a Google service-account key file that the relay uses.
#[derive(Clone, Deserialize)]
pub struct ServiceAccount {
    pub project_id: String,
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

impl ServiceAccount {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

impl fmt::Debug for ServiceAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccount")
            .field("project_id", &self.project_id)
            .field("client_email", &self.client_email)
            .field("private_key_id", &self.private_key_id)
            .field("private_key", &"<redacted>")
            .field("token_uri", &self.token_uri)
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub const PRIVATE_KEY: &str = include_str!("../../../tests/fixtures/service_account_key.pem");
    pub const PUBLIC_KEY: &str = include_str!("../../../tests/fixtures/service_account_pub.pem");

    pub fn test_account(token_uri: &str) -> ServiceAccount {
        ServiceAccount {
            project_id: "demo-project".into(),
            client_email: "relay@demo-project.iam.gserviceaccount.com".into(),
            private_key: PRIVATE_KEY.into(),
            private_key_id: Some("key-1".into()),
            token_uri: token_uri.into(),
        }
    }

    #[test]
    fn debug_output_hides_private_key() {
        let rendered = format!("{:?}", test_account(DEFAULT_TOKEN_URI));
        assert!(rendered.contains("demo-project"));
        assert!(!rendered.contains("BEGIN PRIVATE KEY"));
    }

    #[test]
    fn missing_required_fields_are_rejected() {
        assert!(ServiceAccount::from_json(r#"{"project_id": "p"}"#).is_err());
    }
}
