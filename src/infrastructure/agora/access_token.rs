use std::io::Write;

use base64::{Engine, engine::general_purpose::STANDARD};
use flate2::{Compression, write::ZlibEncoder};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use super::rtc::RtcService;
use crate::error::SigningError;

type HmacSha256 = Hmac<Sha256>;

pub const VERSION: &str = "007";

/// Little-endian packer for the token's binary layout. Strings and byte
/// blobs are prefixed with their u16 length.
#[derive(Default)]
pub struct Packer {
    buf: Vec<u8>,
}

impl Packer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_u16(mut self, value: u16) -> Self {
        self.buf.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn put_u32(mut self, value: u32) -> Self {
        self.buf.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn put_bytes(self, bytes: &[u8]) -> Self {
        let mut packer = self.put_u16(bytes.len() as u16);
        packer.buf.extend_from_slice(bytes);
        packer
    }

    pub fn put_string(self, value: &str) -> Self {
        self.put_bytes(value.as_bytes())
    }

    pub fn put_u32_map<'a, I>(self, entries: I) -> Self
    where
        I: ExactSizeIterator<Item = (&'a u16, &'a u32)>,
    {
        let mut packer = self.put_u16(entries.len() as u16);
        for (key, value) in entries {
            packer = packer.put_u16(*key).put_u32(*value);
        }
        packer
    }

    pub fn append(mut self, bytes: &[u8]) -> Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

fn hmac_sha256(key: &[u8], message: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts keys of any length");
    mac.update(message);
    mac.finalize().into_bytes().to_vec()
}

/// Agora identifiers are 32 hexadecimal characters.
pub fn is_valid_identifier(value: &str) -> bool {
    value.len() == 32 && value.chars().all(|c| c.is_ascii_hexdigit())
}

/// Version "007" access token. `expire` and the privilege expiries of its
/// services are relative to `issue_ts`, in seconds.
pub struct AccessToken {
    app_id: String,
    app_cert: String,
    issue_ts: u32,
    expire: u32,
    salt: u32,
    services: Vec<RtcService>,
}

impl AccessToken {
    pub fn new(app_id: &str, app_cert: &str, issue_ts: u32, expire: u32, salt: u32) -> Self {
        Self {
            app_id: app_id.to_owned(),
            app_cert: app_cert.to_owned(),
            issue_ts,
            expire,
            salt,
            services: Vec::new(),
        }
    }

    pub fn add_service(&mut self, service: RtcService) {
        self.services.push(service);
    }

    fn signing_key(&self) -> Vec<u8> {
        let signing = hmac_sha256(
            &self.issue_ts.to_le_bytes(),
            self.app_cert.as_bytes(),
        );
        hmac_sha256(&self.salt.to_le_bytes(), &signing)
    }

    pub fn build(&self) -> Result<String, SigningError> {
        if !is_valid_identifier(&self.app_id) || !is_valid_identifier(&self.app_cert) {
            return Err(SigningError::InvalidCredentials);
        }

        let mut signing_info = Packer::new()
            .put_string(&self.app_id)
            .put_u32(self.issue_ts)
            .put_u32(self.expire)
            .put_u32(self.salt)
            .put_u16(self.services.len() as u16);
        for service in &self.services {
            signing_info = service.pack(signing_info);
        }
        let signing_info = signing_info.into_bytes();

        let signature = hmac_sha256(&self.signing_key(), &signing_info);
        let content = Packer::new()
            .put_bytes(&signature)
            .append(&signing_info)
            .into_bytes();

        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&content)?;
        let compressed = encoder.finish()?;

        Ok(format!("{}{}", VERSION, STANDARD.encode(compressed)))
    }
}
