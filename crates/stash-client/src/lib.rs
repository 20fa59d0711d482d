//! Client for the Stash secret-sharing API.
//!
//! Exposes the three protocol verbs over a caller-supplied transport:
//!
//! * `enstash` - encrypt a secret locally, store the ciphertext, return an
//!   `id:key` token
//! * `destash` - redeem a token: fetch the payload (the server burns it on
//!   first read) and decrypt it locally
//! * `unstash` - delete a stash without reading it
//!
//! The key half of a token never travels to the server; the three REST
//! exchanges carry only `{iv, tag, ciphertext}` payloads and stash ids.
//! HTTP itself is behind the [`ApiTransport`] trait, so this crate pulls in
//! no HTTP stack and no executor.

pub mod client;
pub mod error;
pub mod transport;

pub use client::StashClient;
pub use error::StashError;
pub use transport::{ApiResponse, ApiTransport, TransportError, TransportErrorKind};

pub use stash_core::{CipherEngine, CoreError, Limits, Payload, StashToken};
