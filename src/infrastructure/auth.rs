use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::ensure_success;
use super::firebase::ServiceAccount;
use crate::error::BackendError;

pub const FIREBASE_SCOPES: &str =
    "https://www.googleapis.com/auth/datastore https://www.googleapis.com/auth/firebase.messaging";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
const REFRESH_MARGIN_SECS: i64 = 60;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

/// Self-signed RS256 assertion exchanged for an OAuth2 access token.
pub fn generate_assertion(
    account: &ServiceAccount,
    issued_at: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims {
        iss: account.client_email.clone(),
        scope: FIREBASE_SCOPES.to_string(),
        aud: account.token_uri.clone(),
        iat: issued_at,
        exp: issued_at + ASSERTION_LIFETIME_SECS,
    };

    let mut header = Header::new(Algorithm::RS256);
    header.kid = account.private_key_id.clone();

    encode(
        &header,
        &claims,
        &EncodingKey::from_rsa_pem(account.private_key.as_bytes())?,
    )
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

struct CachedToken {
    access_token: String,
    expires_at: i64,
}

/// Hands out OAuth2 access tokens for a service account, refreshing them
/// shortly before they expire.
pub struct GoogleTokenProvider {
    account: ServiceAccount,
    http: reqwest::Client,
    cached: Mutex<Option<CachedToken>>,
}

impl GoogleTokenProvider {
    pub fn new(account: ServiceAccount, http: reqwest::Client) -> Self {
        Self {
            account,
            http,
            cached: Mutex::new(None),
        }
    }

    pub fn account(&self) -> &ServiceAccount {
        &self.account
    }

    pub async fn access_token(&self) -> Result<String, BackendError> {
        // held across the exchange so concurrent callers share one refresh
        let mut cached = self.cached.lock().await;
        let now = Utc::now().timestamp();

        if let Some(token) = cached
            .as_ref()
            .filter(|t| t.expires_at - REFRESH_MARGIN_SECS > now)
        {
            return Ok(token.access_token.clone());
        }

        tracing::debug!("Requesting access token for {}", self.account.client_email);
        let assertion = generate_assertion(&self.account, now)?;
        let response = self
            .http
            .post(&self.account.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;
        let body: TokenResponse = ensure_success("oauth2", response)
            .await?
            .json()
            .await
            .map_err(|_| BackendError::Decode("oauth2"))?;

        let access_token = body.access_token.clone();
        *cached = Some(CachedToken {
            access_token: body.access_token,
            expires_at: now + body.expires_in,
        });
        Ok(access_token)
    }
}
