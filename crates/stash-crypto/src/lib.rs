//! Cryptographic primitives for the Stash protocol.
//!
//! Provides the base64url codec used wherever bytes cross a text boundary,
//! AES-256-GCM encrypt/decrypt with separated ciphertext and tag, random
//! key/IV generation, and the protocol constants and size limits.
//!
//! This crate has no serde types and no I/O; wire formats and network
//! orchestration live in `stash-core` and `stash-client`.

pub mod aes_gcm;
pub mod base64url;
pub mod error;
pub mod types;

pub use aes_gcm::{aes_gcm_decrypt, aes_gcm_encrypt, generate_iv, generate_key};
pub use base64url::{
    base64url_decode, base64url_decode_exact, base64url_encode, base64url_encoded_len,
};
pub use error::CryptoError;
pub use types::{Limits, AES_GCM_IV_LENGTH, AES_GCM_TAG_LENGTH, AES_KEY_LENGTH};
