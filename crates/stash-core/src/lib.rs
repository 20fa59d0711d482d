//! Core formats and cipher engine for the Stash protocol.
//!
//! A stash is one stored, encrypted secret. The user-facing handle is a
//! token string `"<uuid-v4>:<base64url key>"`; the wire structure exchanged
//! with the storage API is a JSON payload `{iv, tag, ciphertext}`. The key
//! lives only in the token and is never part of the payload.
//!
//! Network orchestration (the enstash/destash/unstash verbs) lives in
//! `stash-client`; this crate is pure data and crypto.

pub mod engine;
pub mod error;
pub mod payload;
pub mod token;

pub use engine::{CipherEngine, Encrypted};
pub use error::CoreError;
pub use payload::Payload;
pub use token::{format_token, is_uuid_v4, StashToken};

pub use stash_crypto::{
    CryptoError, Limits, AES_GCM_IV_LENGTH, AES_GCM_TAG_LENGTH, AES_KEY_LENGTH,
};
