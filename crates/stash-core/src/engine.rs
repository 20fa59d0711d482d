//! The cipher engine: secret in, key + payload out, and back.
//!
//! Each call is independent and stateless; concurrent calls share nothing
//! but the copied [`Limits`] value and need no locking. The engine never
//! sees the network and never logs; it receives strings and byte buffers
//! and hands back value types.

use zeroize::Zeroize;

use crate::error::CoreError;
use crate::payload::Payload;
use stash_crypto::{
    aes_gcm_decrypt, aes_gcm_encrypt, base64url_decode, base64url_decode_exact, generate_iv,
    generate_key, CryptoError, Limits, AES_GCM_IV_LENGTH, AES_GCM_TAG_LENGTH, AES_KEY_LENGTH,
};

/// Result of one encryption: the raw key for the caller's token, and the
/// payload for the wire. The key must never be transmitted to the API.
#[derive(Debug)]
pub struct Encrypted {
    pub key: [u8; AES_KEY_LENGTH],
    pub payload: Payload,
}

impl Drop for Encrypted {
    fn drop(&mut self) {
        self.key.zeroize();
    }
}

/// Stateless AES-256-GCM engine with injected size limits.
#[derive(Debug, Clone, Copy)]
pub struct CipherEngine {
    limits: Limits,
}

impl CipherEngine {
    pub fn new(limits: Limits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Encrypt a secret under a fresh random key and IV.
    ///
    /// The secret is validated first: `EmptySecret` if it trims to empty,
    /// `SecretTooLong` past `limits.max_secret_bytes` (UTF-8 bytes, not
    /// characters). The untrimmed string is what gets encrypted.
    pub fn encrypt(&self, secret: &str) -> Result<Encrypted, CoreError> {
        if secret.trim().is_empty() {
            return Err(CoreError::EmptySecret);
        }
        if secret.len() > self.limits.max_secret_bytes {
            return Err(CoreError::SecretTooLong {
                max: self.limits.max_secret_bytes,
                got: secret.len(),
            });
        }

        let key = generate_key()?;
        let mut iv = generate_iv()?;
        let (mut ciphertext, mut tag) = aes_gcm_encrypt(&key, &iv, secret.as_bytes())?;
        let payload = Payload::from_parts(&iv, &tag, &ciphertext);

        iv.zeroize();
        tag.zeroize();
        ciphertext.zeroize();

        Ok(Encrypted { key, payload })
    }

    /// Decrypt a payload with the token's key.
    ///
    /// Field lengths are re-validated from the payload regardless of
    /// whether [`Payload::parse`] already ran. Tag mismatch and invalid
    /// UTF-8 plaintext both surface as `AuthenticationFailed`; a wrong
    /// (but well-formed) token key is a legitimate cause, not only attack.
    pub fn decrypt(&self, payload: &Payload, key: &[u8]) -> Result<String, CoreError> {
        if key.len() != AES_KEY_LENGTH {
            return Err(CoreError::Crypto(CryptoError::InvalidKeyLength {
                expected: AES_KEY_LENGTH,
                got: key.len(),
            }));
        }
        let iv = base64url_decode_exact(&payload.iv, AES_GCM_IV_LENGTH, "iv")?;
        let tag = base64url_decode_exact(&payload.tag, AES_GCM_TAG_LENGTH, "tag")?;
        let mut ciphertext = base64url_decode(&payload.ciphertext)?;
        if ciphertext.is_empty() {
            return Err(CoreError::EmptyCiphertext);
        }
        if ciphertext.len() > self.limits.max_ciphertext_bytes {
            return Err(CoreError::CiphertextTooLarge {
                max: self.limits.max_ciphertext_bytes,
                got: ciphertext.len(),
            });
        }

        let plaintext = aes_gcm_decrypt(key, &iv, &tag, &ciphertext);
        ciphertext.zeroize();

        match String::from_utf8(plaintext?) {
            Ok(secret) => Ok(secret),
            Err(e) => {
                let mut bytes = e.into_bytes();
                bytes.zeroize();
                Err(CoreError::Crypto(CryptoError::AuthenticationFailed))
            }
        }
    }
}

impl Default for CipherEngine {
    fn default() -> Self {
        Self::new(Limits::default())
    }
}
