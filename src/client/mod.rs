//! Client HTTP verso il backend
//!
//! Tutte le chiamate JSON passano da `ApiClient::dispatch`; gli upload di
//! foto passano da `ApiClient::upload_raw`.

mod dispatch;
mod envelope;
mod guard;
mod upload;

pub use dispatch::{
    compose_headers, error_message, ApiClient, RequestOptions, NETWORK_ERROR_FALLBACK,
    SERVER_ERROR_FALLBACK,
};
pub use envelope::Envelope;
pub use guard::SessionGuard;
pub use upload::{UploadFile, FILE_FIELD};
