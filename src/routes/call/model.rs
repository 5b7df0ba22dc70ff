use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const FCM_TOKEN_FIELD: &str = "fcmToken";
pub const INCOMING_CALL: &str = "INCOMING_CALL";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallRequest {
    pub caller_name: Option<Value>,
    pub caller_area: Option<Value>,
    pub caller_city: Option<Value>,
    pub caller_phone: Option<Value>,
    pub callee_id: Option<Value>,
    pub channel_name: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct CallResponse {
    pub success: bool,
}

/// Data payload delivered to the callee's device.
#[derive(Debug, Clone, PartialEq)]
pub struct IncomingCall {
    pub channel_name: String,
    pub caller_name: Option<String>,
    pub caller_area: Option<String>,
    pub caller_city: Option<String>,
    pub caller_phone: Option<String>,
}

impl IncomingCall {
    /// Push data values must be strings; absent caller details are left out.
    pub fn into_data(self) -> BTreeMap<String, String> {
        let mut data = BTreeMap::from([
            ("type".to_string(), INCOMING_CALL.to_string()),
            ("channelName".to_string(), self.channel_name),
        ]);
        let optional = [
            ("callerName", self.caller_name),
            ("callerArea", self.caller_area),
            ("callerCity", self.caller_city),
            ("callerPhone", self.caller_phone),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                data.insert(key.to_string(), value);
            }
        }
        data
    }
}
