use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Fields stay loosely typed; coercion happens in the handler.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRequest {
    pub channel_name: Option<Value>,
    pub uid: Option<Value>,
    pub ttl: Option<Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub token: String,
    pub expires_at: u64,
}
