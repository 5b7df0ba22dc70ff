use std::collections::BTreeMap;

use serde::Serialize;

/// FCM HTTP v1 message addressed to a single registration token.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PushMessage {
    pub token: String,
    pub data: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub android: Option<AndroidConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AndroidConfig {
    pub priority: String,
}

impl PushMessage {
    pub fn data(token: impl Into<String>, data: BTreeMap<String, String>) -> Self {
        Self {
            token: token.into(),
            data,
            android: None,
        }
    }

    pub fn with_high_priority(mut self) -> Self {
        self.android = Some(AndroidConfig {
            priority: "high".to_string(),
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn serializes_to_fcm_shape() {
        let data = BTreeMap::from([("type".to_string(), "INCOMING_CALL".to_string())]);
        let message = PushMessage::data("device-token", data).with_high_priority();

        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({
                "token": "device-token",
                "data": { "type": "INCOMING_CALL" },
                "android": { "priority": "high" }
            })
        );
    }

    #[test]
    fn android_block_is_omitted_by_default() {
        let message = PushMessage::data("device-token", BTreeMap::new());
        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({ "token": "device-token", "data": {} })
        );
    }
}
