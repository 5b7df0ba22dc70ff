use axum::{Json, extract::rejection::JsonRejection};

pub mod call;
pub mod health;
pub mod token;

/// Bodies that are missing, not JSON, or the wrong shape read as an empty
/// request so that field validation produces the error response.
pub(crate) fn body_or_default<T: Default>(payload: Result<Json<T>, JsonRejection>) -> T {
    match payload {
        Ok(Json(body)) => body,
        Err(rejection) => {
            tracing::warn!(
                status = rejection.status().as_u16(),
                "Treating unreadable request body as empty: {}",
                rejection
            );
            T::default()
        }
    }
}
