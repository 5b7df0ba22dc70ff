use std::collections::BTreeMap;

use rand::Rng;

use super::access_token::{AccessToken, Packer};
use crate::error::SigningError;
use crate::infrastructure::TokenSigner;
use crate::utils::unix_now;

pub const SERVICE_TYPE_RTC: u16 = 1;

pub const PRIVILEGE_JOIN_CHANNEL: u16 = 1;
pub const PRIVILEGE_PUBLISH_AUDIO_STREAM: u16 = 2;
pub const PRIVILEGE_PUBLISH_VIDEO_STREAM: u16 = 3;
pub const PRIVILEGE_PUBLISH_DATA_STREAM: u16 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RtcRole {
    Publisher,
    Subscriber,
}

impl RtcRole {
    fn privileges(self) -> &'static [u16] {
        match self {
            RtcRole::Publisher => &[
                PRIVILEGE_JOIN_CHANNEL,
                PRIVILEGE_PUBLISH_AUDIO_STREAM,
                PRIVILEGE_PUBLISH_VIDEO_STREAM,
                PRIVILEGE_PUBLISH_DATA_STREAM,
            ],
            RtcRole::Subscriber => &[PRIVILEGE_JOIN_CHANNEL],
        }
    }
}

pub struct RtcService {
    channel_name: String,
    uid: String,
    privileges: BTreeMap<u16, u32>,
}

impl RtcService {
    /// uid 0 is encoded as an empty string, which lets any user join.
    pub fn new(channel_name: &str, uid: u32) -> Self {
        Self {
            channel_name: channel_name.to_owned(),
            uid: if uid == 0 { String::new() } else { uid.to_string() },
            privileges: BTreeMap::new(),
        }
    }

    pub fn add_privilege(&mut self, privilege: u16, expire: u32) {
        self.privileges.insert(privilege, expire);
    }

    pub(crate) fn pack(&self, packer: Packer) -> Packer {
        packer
            .put_u16(SERVICE_TYPE_RTC)
            .put_u32_map(self.privileges.iter())
            .put_string(&self.channel_name)
            .put_string(&self.uid)
    }
}

pub struct RtcTokenSigner {
    app_id: String,
    app_cert: String,
}

impl RtcTokenSigner {
    pub fn new(app_id: impl Into<String>, app_cert: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            app_cert: app_cert.into(),
        }
    }

    pub(crate) fn build_at(
        &self,
        channel_name: &str,
        uid: u32,
        role: RtcRole,
        issue_ts: u64,
        expire_at: u64,
        salt: u32,
    ) -> Result<String, SigningError> {
        if channel_name.len() > u16::MAX as usize {
            return Err(SigningError::ChannelNameTooLong(channel_name.len()));
        }
        let issue_ts =
            u32::try_from(issue_ts).map_err(|_| SigningError::ExpiryOutOfRange(expire_at))?;
        let validity = u32::try_from(expire_at.saturating_sub(issue_ts as u64))
            .map_err(|_| SigningError::ExpiryOutOfRange(expire_at))?;

        let mut service = RtcService::new(channel_name, uid);
        for privilege in role.privileges() {
            service.add_privilege(*privilege, validity);
        }

        let mut token = AccessToken::new(&self.app_id, &self.app_cert, issue_ts, validity, salt);
        token.add_service(service);
        token.build()
    }
}

impl TokenSigner for RtcTokenSigner {
    fn build_token_with_uid(
        &self,
        channel_name: &str,
        uid: u32,
        role: RtcRole,
        expire_at: u64,
    ) -> Result<String, SigningError> {
        let salt = rand::thread_rng().gen_range(1..=99_999_999);
        self.build_at(channel_name, uid, role, unix_now(), expire_at, salt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::agora::access_token::tests::{APP_CERT, APP_ID, decode};

    #[test]
    fn publisher_token_grants_join_and_publish() {
        let signer = RtcTokenSigner::new(APP_ID, APP_CERT);
        let token = signer
            .build_at("room42", 7, RtcRole::Publisher, 1_700_000_000, 1_700_000_120, 99)
            .unwrap();

        let decoded = decode(&token);
        assert_eq!(decoded.issue_ts, 1_700_000_000);
        assert_eq!(decoded.expire, 120);
        assert_eq!(decoded.salt, 99);
        assert_eq!(decoded.channel_name, "room42");
        assert_eq!(decoded.uid, "7");
        assert_eq!(decoded.privileges, vec![(1, 120), (2, 120), (3, 120), (4, 120)]);
    }

    #[test]
    fn subscriber_token_only_joins() {
        let signer = RtcTokenSigner::new(APP_ID, APP_CERT);
        let token = signer
            .build_at("room42", 0, RtcRole::Subscriber, 1_700_000_000, 1_700_003_600, 5)
            .unwrap();

        let decoded = decode(&token);
        assert_eq!(decoded.uid, "");
        assert_eq!(decoded.privileges, vec![(PRIVILEGE_JOIN_CHANNEL, 3600)]);
    }

    #[test]
    fn live_signer_uses_current_time_and_random_salt() {
        let signer = RtcTokenSigner::new(APP_ID, APP_CERT);
        let before = unix_now();
        let token = signer
            .build_token_with_uid("room42", 1, RtcRole::Publisher, before + 60)
            .unwrap();

        let decoded = decode(&token);
        assert!(decoded.issue_ts as u64 >= before);
        assert!((1..=99_999_999).contains(&decoded.salt));
        assert!(decoded.expire <= 60 && decoded.expire >= 59);
    }

    #[test]
    fn missing_credentials_fail_at_call_time() {
        let signer = RtcTokenSigner::new("", "");
        let result = signer.build_token_with_uid("room42", 0, RtcRole::Publisher, unix_now() + 60);
        assert!(matches!(result, Err(SigningError::InvalidCredentials)));
    }

    #[test]
    fn oversized_expiry_is_rejected() {
        let signer = RtcTokenSigner::new(APP_ID, APP_CERT);
        let result = signer.build_at("room42", 0, RtcRole::Publisher, 10, u64::MAX, 1);
        assert!(matches!(result, Err(SigningError::ExpiryOutOfRange(_))));
    }
}
