mod auth;
mod firebase_url;
mod firestore;
mod value;

pub use auth::*;
pub use firebase_url::*;
pub use firestore::*;
pub use value::*;

use serde::Deserialize;

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Extract `error.message` from a Google API error body.
pub(crate) fn upstream_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .map(|envelope| envelope.error.message)
}
