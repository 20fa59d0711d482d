/// AES-256 key length in bytes.
pub const AES_KEY_LENGTH: usize = 32;

/// AES-GCM IV (nonce) length in bytes. Must be unique per key.
pub const AES_GCM_IV_LENGTH: usize = 12;

/// AES-GCM authentication tag length in bytes (128-bit tag).
pub const AES_GCM_TAG_LENGTH: usize = 16;

/// Size limits for secrets and ciphertexts.
///
/// Injected into the cipher engine and payload parsing rather than read
/// from module-level globals, so tests can exercise boundary values.
/// `max_ciphertext_bytes` mirrors a server-enforced cap for fast client-side
/// failure; the server remains the source of truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum secret length in UTF-8 bytes (not characters).
    pub max_secret_bytes: usize,
    /// Maximum decoded ciphertext length in bytes.
    pub max_ciphertext_bytes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_secret_bytes: 4096,
            max_ciphertext_bytes: 16384,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limits() {
        let limits = Limits::default();
        assert_eq!(limits.max_secret_bytes, 4096);
        assert_eq!(limits.max_ciphertext_bytes, 16384);
    }
}
