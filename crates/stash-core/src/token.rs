//! The `id:key` token format.
//!
//! Textual contract (copy-pasted by humans):
//! `"<uuid-v4>:<base64url-256-bit-key>"` — 36 id chars, one colon, 43 key
//! chars. The token is the only bearer credential for a stash; the key
//! half never travels to the server.

use zeroize::Zeroize;

use crate::error::CoreError;
use stash_crypto::{base64url_decode_exact, base64url_encode, AES_KEY_LENGTH};

/// Strict UUID-v4 check: lowercase hyphenated form, version nibble `4`,
/// RFC 4122 variant. Braced, simple, URN, and uppercase forms are rejected.
pub fn is_uuid_v4(s: &str) -> bool {
    // 36 chars excludes simple/braced/urn forms before uuid's lenient parser
    // gets a say; the byte scan excludes uppercase hex.
    if s.len() != 36 || s.bytes().any(|b| b.is_ascii_uppercase()) {
        return false;
    }
    match uuid::Uuid::try_parse(s) {
        Ok(u) => {
            u.get_version_num() == 4 && matches!(u.get_variant(), uuid::Variant::RFC4122)
        }
        Err(_) => false,
    }
}

/// Format a token from a stash id and a raw 32-byte key.
pub fn format_token(id: &str, key: &[u8]) -> Result<String, CoreError> {
    if key.len() != AES_KEY_LENGTH {
        return Err(CoreError::Crypto(
            stash_crypto::CryptoError::InvalidKeyLength {
                expected: AES_KEY_LENGTH,
                got: key.len(),
            },
        ));
    }
    Ok(format!("{id}:{}", base64url_encode(key)))
}

/// A parsed, validated stash token.
///
/// The key is private and zeroized on drop; `Debug` redacts it.
pub struct StashToken {
    pub id: String,
    key: [u8; AES_KEY_LENGTH],
}

impl StashToken {
    /// Parse and validate a token string.
    ///
    /// Splits on the *first* colon; both sides are trimmed. See the error
    /// variants for each rejection.
    pub fn parse(token: &str) -> Result<Self, CoreError> {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(CoreError::EmptyToken);
        }
        let (id_part, key_part) = trimmed.split_once(':').ok_or(CoreError::MissingSeparator)?;
        let id = id_part.trim();
        let key_text = key_part.trim();
        if id.is_empty() {
            return Err(CoreError::EmptyId);
        }
        if key_text.is_empty() {
            return Err(CoreError::EmptyKey);
        }
        if !is_uuid_v4(id) {
            return Err(CoreError::MalformedUuid(id.to_string()));
        }
        let mut decoded = base64url_decode_exact(key_text, AES_KEY_LENGTH, "key")
            .map_err(|e| CoreError::InvalidKeyEncoding(e.to_string()))?;
        let mut key = [0u8; AES_KEY_LENGTH];
        key.copy_from_slice(&decoded);
        decoded.zeroize();
        Ok(Self {
            id: id.to_string(),
            key,
        })
    }

    /// Non-throwing variant of [`StashToken::parse`] for best-effort
    /// validation contexts.
    pub fn try_parse(token: &str) -> Option<Self> {
        Self::parse(token).ok()
    }

    /// Extract a stash id from either a bare UUID or a full token.
    ///
    /// Returns `None` on any malformation; the input is user-typed, so this
    /// never errors.
    pub fn parse_id_only(input: &str) -> Option<String> {
        let trimmed = input.trim();
        let id = match trimmed.split_once(':') {
            Some((id_part, _)) => id_part.trim(),
            None => trimmed,
        };
        is_uuid_v4(id).then(|| id.to_string())
    }

    /// The raw 256-bit key.
    pub fn key(&self) -> &[u8; AES_KEY_LENGTH] {
        &self.key
    }

    /// Re-serialize to the `id:key` string form.
    pub fn format(&self) -> String {
        format!("{}:{}", self.id, base64url_encode(&self.key))
    }
}

impl std::fmt::Debug for StashToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StashToken")
            .field("id", &self.id)
            .field("key", &"[redacted]")
            .finish()
    }
}

impl Drop for StashToken {
    fn drop(&mut self) {
        self.key.zeroize();
    }
}
