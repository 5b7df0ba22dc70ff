mod handler;
mod model;

pub use handler::place_call;
pub use model::{CallRequest, CallResponse, FCM_TOKEN_FIELD, INCOMING_CALL, IncomingCall};
