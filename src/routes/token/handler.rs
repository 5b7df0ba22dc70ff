use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

use super::model::{TokenRequest, TokenResponse};
use crate::{
    AppState,
    error::{AppError, codes},
    infrastructure::RtcRole,
    routes::body_or_default,
    utils::{required_text, ttl_or_default, uid_or_zero, unix_now},
};

#[axum::debug_handler]
pub async fn issue_token(
    State(state): State<AppState>,
    payload: Result<Json<TokenRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, AppError> {
    let req = body_or_default(payload);

    let channel_name = required_text(req.channel_name.as_ref())
        .ok_or(AppError::BadRequest(codes::CHANNEL_NAME_REQUIRED))?;
    let uid = uid_or_zero(req.uid.as_ref());
    let expires_at = unix_now() + ttl_or_default(req.ttl.as_ref());

    let token = state
        .signer
        .build_token_with_uid(&channel_name, uid, RtcRole::Publisher, expires_at)
        .map_err(|e| AppError::internal(codes::TOKEN_GENERATION_FAILED, e))?;

    tracing::debug!(channel = %channel_name, uid, expires_at, "Issued publisher token");
    Ok(Json(TokenResponse { token, expires_at }))
}
