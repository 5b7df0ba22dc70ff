use async_trait::async_trait;

use crate::error::{BackendError, SigningError};

pub mod agora;
pub mod auth;
pub mod firebase;

pub use agora::{RtcRole, RtcTokenSigner};
pub use firebase::{Document, FirebaseClient, PushMessage};

/// Mints signed channel tokens. Signing is local and synchronous.
pub trait TokenSigner: Send + Sync {
    /// `expire_at` is an absolute unix timestamp in seconds.
    fn build_token_with_uid(
        &self,
        channel_name: &str,
        uid: u32,
        role: RtcRole,
        expire_at: u64,
    ) -> Result<String, SigningError>;
}

/// Read access to the document store plus fire-and-forget push delivery.
#[async_trait]
pub trait PushBackend: Send + Sync {
    async fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Document>, BackendError>;

    /// Hands the message to the messaging service and returns its delivery handle.
    async fn send_push(&self, message: &PushMessage) -> Result<String, BackendError>;
}

/// Passes successful responses through and turns everything else into
/// `BackendError::Status`, keeping the response body for the logs.
pub(crate) async fn ensure_success(
    service: &'static str,
    response: reqwest::Response,
) -> Result<reqwest::Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(BackendError::Status {
        service,
        status: status.as_u16(),
        body,
    })
}
