//! Agora RTC channel tokens (version "007").

mod access_token;
mod rtc;

pub use access_token::{AccessToken, VERSION};
pub use rtc::{RtcRole, RtcService, RtcTokenSigner};
