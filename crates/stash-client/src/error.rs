use thiserror::Error;

use crate::transport::TransportError;
use stash_core::CoreError;

#[derive(Debug, Error)]
pub enum StashError {
    /// Validation, decode, or crypto failure from the core formats.
    /// Always local, never worth retrying. Raised before any network call
    /// for bad input, and after the response for bad server data.
    #[error("{0}")]
    Core(#[from] CoreError),

    /// Connectivity failure. The only category a caller might retry, at
    /// its own risk for destash/unstash.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Non-2xx response outside the semantic 404/410 cases, surfaced
    /// verbatim.
    #[error("API error: status {status}: {body}")]
    Api { status: u16, body: String },

    /// The stash does not exist (it may have already been read or expired).
    #[error("Stash not found (it may have already been read or expired)")]
    NotFound,

    /// The stash expired before it was read.
    #[error("Stash expired")]
    Expired,

    /// The stash was already consumed by a previous read.
    #[error("Stash already consumed")]
    AlreadyConsumed,

    /// The unstash input is neither a stash id nor a token.
    #[error("Input is not a stash id or token")]
    InvalidUuid,

    /// A 2xx response whose body does not honor the wire contract.
    #[error("Invalid server response: {0}")]
    InvalidServerResponse(String),
}
