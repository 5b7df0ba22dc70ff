use std::time::Duration;

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Document, PushMessage};
use crate::config::Config;
use crate::error::BackendError;
use crate::infrastructure::auth::GoogleTokenProvider;
use crate::infrastructure::{PushBackend, ensure_success};

#[derive(Serialize)]
struct SendRequest<'a> {
    message: &'a PushMessage,
}

#[derive(Deserialize)]
struct SendResponse {
    name: String,
}

/// Firestore + FCM client for the project named in the service account.
/// Without credentials every call fails with `BackendError::NotConfigured`.
pub struct FirebaseClient {
    http: reqwest::Client,
    auth: Option<GoogleTokenProvider>,
    firestore_base_url: String,
    fcm_base_url: String,
}

impl FirebaseClient {
    pub fn new(config: &Config) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to build HTTP client with timeout: {}", e);
                reqwest::Client::new()
            });
        let auth = config
            .firebase_service_account
            .clone()
            .map(|account| GoogleTokenProvider::new(account, http.clone()));

        Self {
            http,
            auth,
            firestore_base_url: config.firestore_base_url.clone(),
            fcm_base_url: config.fcm_base_url.clone(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.auth.is_some()
    }

    fn auth(&self) -> Result<&GoogleTokenProvider, BackendError> {
        self.auth.as_ref().ok_or(BackendError::NotConfigured)
    }

    /// Firestore ids are never `.` or `..` and never contain `/`. URL path
    /// normalisation would otherwise turn such ids into a collection listing.
    fn is_document_id(id: &str) -> bool {
        !id.is_empty() && id != "." && id != ".." && !id.contains('/')
    }

    /// Appends percent-encoded path segments to a REST root.
    fn endpoint(base: &str, segments: &[&str]) -> Result<Url, BackendError> {
        let mut url = Url::parse(base).map_err(|e| BackendError::Url(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| BackendError::Url(base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[async_trait]
impl PushBackend for FirebaseClient {
    async fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Document>, BackendError> {
        let auth = self.auth()?;
        if !Self::is_document_id(id) {
            tracing::debug!("Rejecting unaddressable document id {:?}", id);
            return Ok(None);
        }
        let url = Self::endpoint(
            &self.firestore_base_url,
            &[
                "projects",
                auth.account().project_id.as_str(),
                "databases",
                "(default)",
                "documents",
                collection,
                id,
            ],
        )?;
        let access_token = auth.access_token().await?;

        let response = self.http.get(url).bearer_auth(access_token).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body: Value = ensure_success("firestore", response)
            .await?
            .json()
            .await
            .map_err(|_| BackendError::Decode("firestore"))?;
        Ok(Some(Document::from_firestore(&body)))
    }

    async fn send_push(&self, message: &PushMessage) -> Result<String, BackendError> {
        let auth = self.auth()?;
        let url = Self::endpoint(
            &self.fcm_base_url,
            &["projects", auth.account().project_id.as_str(), "messages:send"],
        )?;
        let access_token = auth.access_token().await?;

        let response = self
            .http
            .post(url)
            .bearer_auth(access_token)
            .json(&SendRequest { message })
            .send()
            .await?;

        let body: SendResponse = ensure_success("fcm", response)
            .await?
            .json()
            .await
            .map_err(|_| BackendError::Decode("fcm"))?;
        Ok(body.name)
    }
}
