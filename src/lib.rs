use std::sync::Arc;

use crate::config::Config;
use crate::infrastructure::{FirebaseClient, PushBackend, RtcTokenSigner, TokenSigner};

pub mod config;
pub mod error;
pub mod infrastructure;
pub mod middleware;
pub mod router;
pub mod routes;
pub mod utils;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub signer: Arc<dyn TokenSigner>,
    pub push: Arc<dyn PushBackend>,
}

impl AppState {
    /// Wires the Agora signer and the Firebase client from configuration.
    pub fn from_config(config: Config) -> Self {
        let signer = RtcTokenSigner::new(&config.agora_app_id, &config.agora_app_cert);
        let push = FirebaseClient::new(&config);

        Self {
            config: Arc::new(config),
            signer: Arc::new(signer),
            push: Arc::new(push),
        }
    }
}
