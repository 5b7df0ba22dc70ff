use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

use super::model::{CallRequest, CallResponse, FCM_TOKEN_FIELD, IncomingCall};
use crate::{
    AppState,
    error::{AppError, codes},
    infrastructure::PushMessage,
    routes::body_or_default,
    utils::{optional_text, required_text},
};

#[axum::debug_handler]
pub async fn place_call(
    State(state): State<AppState>,
    payload: Result<Json<CallRequest>, JsonRejection>,
) -> Result<Json<CallResponse>, AppError> {
    let req = body_or_default(payload);

    let (Some(callee_id), Some(channel_name)) = (
        required_text(req.callee_id.as_ref()),
        required_text(req.channel_name.as_ref()),
    ) else {
        return Err(AppError::BadRequest(codes::MISSING_CALL_FIELDS));
    };

    let callee = state
        .push
        .get_document(&state.config.callee_collection, &callee_id)
        .await
        .map_err(|e| AppError::internal(codes::CALL_FAILED, e))?
        .ok_or(AppError::NotFound(codes::CALLEE_NOT_FOUND))?;

    let fcm_token = callee
        .get_str(FCM_TOKEN_FIELD)
        .filter(|token| !token.is_empty())
        .ok_or(AppError::BadRequest(codes::CALLEE_PUSH_TOKEN_MISSING))?;

    let call = IncomingCall {
        channel_name,
        caller_name: optional_text(req.caller_name.as_ref()),
        caller_area: optional_text(req.caller_area.as_ref()),
        caller_city: optional_text(req.caller_city.as_ref()),
        caller_phone: optional_text(req.caller_phone.as_ref()),
    };
    let message = PushMessage::data(fcm_token, call.into_data()).with_high_priority();

    let delivery = state
        .push
        .send_push(&message)
        .await
        .map_err(|e| AppError::internal(codes::CALL_FAILED, e))?;

    tracing::info!(callee = %callee_id, %delivery, "Relayed incoming call");
    Ok(Json(CallResponse { success: true }))
}
