//! Caller-provided network layer.
//!
//! Implementations handle actual HTTP (browser `fetch`, reqwest, a test
//! double) plus their own timeout and cancellation policy. The protocol
//! layer only needs the status code and body back; it maps semantic
//! statuses (404, 410) itself.

use async_trait::async_trait;

/// User-implemented transport for the three Stash API exchanges.
///
/// `path` is relative to the API base (e.g. `/destash/{id}`); the
/// implementation owns the base URL. Every call is a single stateless
/// HTTP+JSON exchange with no auth headers and no cookies.
#[async_trait]
pub trait ApiTransport: Send + Sync {
    /// POST a JSON body. Used by enstash.
    async fn post(&self, path: &str, json_body: String) -> Result<ApiResponse, TransportError>;

    /// GET. Used by destash; the server burns the stash on first success.
    async fn get(&self, path: &str) -> Result<ApiResponse, TransportError>;

    /// DELETE. Used by unstash.
    async fn delete(&self, path: &str) -> Result<ApiResponse, TransportError>;
}

/// An HTTP response as far as the protocol cares: status and body text.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Connectivity-level error (wraps arbitrary error strings from the
/// transport implementation).
///
/// This is the only error category a caller might reasonably retry, and
/// even then: a timed-out destash or unstash may have already transitioned
/// the server-side stash, so retrying is the caller's explicit choice.
#[derive(Debug, Clone)]
pub struct TransportError {
    pub message: String,
    pub kind: TransportErrorKind,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: TransportErrorKind::Network,
        }
    }

    pub fn with_kind(message: impl Into<String>, kind: TransportErrorKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for TransportError {}

/// Classification of transport failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// Connection-level failure (DNS, refused, reset).
    Network,
    /// The transport's own per-operation deadline elapsed.
    Timeout,
    /// Cancelled by the caller before completion.
    Cancelled,
}
