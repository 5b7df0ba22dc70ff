//! Cloud Firestore reads and Cloud Messaging sends over the REST APIs.

mod client;
pub(crate) mod credentials;
mod document;
mod messaging;

pub use client::FirebaseClient;
pub use credentials::ServiceAccount;
pub use document::Document;
pub use messaging::{AndroidConfig, PushMessage};
