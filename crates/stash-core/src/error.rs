use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    // Token format
    #[error("Empty token")]
    EmptyToken,

    #[error("Token has no ':' separator")]
    MissingSeparator,

    #[error("Token id is empty")]
    EmptyId,

    #[error("Token key is empty")]
    EmptyKey,

    #[error("Token id is not a UUID v4: {0:?}")]
    MalformedUuid(String),

    #[error("Token key is not a valid 256-bit base64url key: {0}")]
    InvalidKeyEncoding(String),

    // Payload format
    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid payload: missing or non-string field {field:?}")]
    InvalidPayloadShape { field: &'static str },

    #[error("Ciphertext is empty")]
    EmptyCiphertext,

    #[error("Ciphertext too large: {got} bytes exceeds maximum of {max}")]
    CiphertextTooLarge { max: usize, got: usize },

    // Secret validation
    #[error("Secret is empty")]
    EmptySecret,

    #[error("Secret too long: {got} bytes exceeds maximum of {max}")]
    SecretTooLong { max: usize, got: usize },

    #[error("Crypto error: {0}")]
    Crypto(#[from] stash_crypto::CryptoError),
}
