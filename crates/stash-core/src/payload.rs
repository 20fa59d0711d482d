//! The `{iv, tag, ciphertext}` wire structure exchanged with the API.
//!
//! All three fields are unpadded base64url. Inbound JSON is never trusted
//! by shape alone: [`Payload::parse`] distinguishes malformed JSON, wrong
//! shape, wrong field lengths, and oversized ciphertext, in that order.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use stash_crypto::{
    base64url_decode, base64url_decode_exact, base64url_encode, base64url_encoded_len, Limits,
    AES_GCM_IV_LENGTH, AES_GCM_TAG_LENGTH,
};

/// A validated stash payload. Never contains the key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Payload {
    pub iv: String,
    pub tag: String,
    pub ciphertext: String,
}

impl Payload {
    /// Encode raw iv/tag/ciphertext buffers into a payload.
    pub fn from_parts(iv: &[u8], tag: &[u8], ciphertext: &[u8]) -> Self {
        Self {
            iv: base64url_encode(iv),
            tag: base64url_encode(tag),
            ciphertext: base64url_encode(ciphertext),
        }
    }

    /// Parse and validate a payload from JSON text.
    ///
    /// # Errors
    /// * `Json` - the text is not valid JSON
    /// * `InvalidPayloadShape` - not an object, or a field is missing or
    ///   not a string
    /// * `Crypto(InvalidFieldLength)` - iv or tag decode to the wrong size
    /// * `EmptyCiphertext` / `CiphertextTooLarge` - ciphertext out of
    ///   bounds; the upper bound is checked on the encoded length before
    ///   any decode allocation
    pub fn parse(json: &str, limits: &Limits) -> Result<Self, CoreError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let obj = value
            .as_object()
            .ok_or(CoreError::InvalidPayloadShape { field: "payload" })?;

        let iv = get_string_field(obj, "iv")?;
        let tag = get_string_field(obj, "tag")?;
        let ciphertext = get_string_field(obj, "ciphertext")?;

        base64url_decode_exact(iv, AES_GCM_IV_LENGTH, "iv")?;
        base64url_decode_exact(tag, AES_GCM_TAG_LENGTH, "tag")?;

        if ciphertext.len() > base64url_encoded_len(limits.max_ciphertext_bytes) {
            return Err(CoreError::CiphertextTooLarge {
                max: limits.max_ciphertext_bytes,
                got: ciphertext.len() * 3 / 4,
            });
        }
        let decoded = base64url_decode(ciphertext)?;
        if decoded.is_empty() {
            return Err(CoreError::EmptyCiphertext);
        }
        if decoded.len() > limits.max_ciphertext_bytes {
            return Err(CoreError::CiphertextTooLarge {
                max: limits.max_ciphertext_bytes,
                got: decoded.len(),
            });
        }

        Ok(Self {
            iv: iv.to_string(),
            tag: tag.to_string(),
            ciphertext: ciphertext.to_string(),
        })
    }

    /// Non-throwing variant of [`Payload::parse`].
    pub fn try_parse(json: &str, limits: &Limits) -> Option<Self> {
        Self::parse(json, limits).ok()
    }
}

fn get_string_field<'a>(
    obj: &'a serde_json::Map<String, serde_json::Value>,
    field: &'static str,
) -> Result<&'a str, CoreError> {
    obj.get(field)
        .and_then(|v| v.as_str())
        .ok_or(CoreError::InvalidPayloadShape { field })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_payload_json() -> String {
        let payload = Payload::from_parts(&[1u8; 12], &[2u8; 16], &[3u8; 48]);
        serde_json::to_string(&payload).unwrap()
    }

    #[test]
    fn parse_round_trip() {
        let payload = Payload::from_parts(&[1u8; 12], &[2u8; 16], &[3u8; 48]);
        let json = serde_json::to_string(&payload).unwrap();
        let parsed = Payload::parse(&json, &Limits::default()).unwrap();
        assert_eq!(parsed, payload);
    }

    #[test]
    fn rejects_malformed_json() {
        let err = Payload::parse("{not json", &Limits::default()).unwrap_err();
        assert!(matches!(err, CoreError::Json(_)));
    }

    #[test]
    fn rejects_non_object() {
        let err = Payload::parse("[1, 2, 3]", &Limits::default()).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InvalidPayloadShape { field: "payload" }
        ));
    }

    #[test]
    fn rejects_missing_field() {
        for field in ["iv", "tag", "ciphertext"] {
            let mut value: serde_json::Value =
                serde_json::from_str(&valid_payload_json()).unwrap();
            value.as_object_mut().unwrap().remove(field);
            let err = Payload::parse(&value.to_string(), &Limits::default()).unwrap_err();
            assert!(
                matches!(err, CoreError::InvalidPayloadShape { field: f } if f == field),
                "expected shape error for missing {field}, got {err:?}"
            );
        }
    }

    #[test]
    fn rejects_non_string_field() {
        let mut value: serde_json::Value = serde_json::from_str(&valid_payload_json()).unwrap();
        value["iv"] = serde_json::json!(42);
        let err = Payload::parse(&value.to_string(), &Limits::default()).unwrap_err();
        assert!(matches!(err, CoreError::InvalidPayloadShape { field: "iv" }));
    }

    #[test]
    fn rejects_wrong_iv_length() {
        let payload = Payload::from_parts(&[1u8; 16], &[2u8; 16], &[3u8; 48]);
        let json = serde_json::to_string(&payload).unwrap();
        let err = Payload::parse(&json, &Limits::default()).unwrap_err();
        assert!(matches!(err, CoreError::Crypto(_)));
    }

    #[test]
    fn rejects_wrong_tag_length() {
        let payload = Payload::from_parts(&[1u8; 12], &[2u8; 12], &[3u8; 48]);
        let json = serde_json::to_string(&payload).unwrap();
        let err = Payload::parse(&json, &Limits::default()).unwrap_err();
        assert!(matches!(err, CoreError::Crypto(_)));
    }

    #[test]
    fn rejects_empty_ciphertext() {
        let payload = Payload::from_parts(&[1u8; 12], &[2u8; 16], &[]);
        let json = serde_json::to_string(&payload).unwrap();
        let err = Payload::parse(&json, &Limits::default()).unwrap_err();
        assert!(matches!(err, CoreError::EmptyCiphertext));
    }

    #[test]
    fn rejects_oversized_ciphertext() {
        let limits = Limits::default();
        let payload = Payload::from_parts(
            &[1u8; 12],
            &[2u8; 16],
            &vec![3u8; limits.max_ciphertext_bytes + 1],
        );
        let json = serde_json::to_string(&payload).unwrap();
        let err = Payload::parse(&json, &limits).unwrap_err();
        assert!(matches!(err, CoreError::CiphertextTooLarge { .. }));
    }

    #[test]
    fn accepts_ciphertext_at_limit() {
        let limits = Limits::default();
        let payload = Payload::from_parts(
            &[1u8; 12],
            &[2u8; 16],
            &vec![3u8; limits.max_ciphertext_bytes],
        );
        let json = serde_json::to_string(&payload).unwrap();
        assert!(Payload::parse(&json, &limits).is_ok());
    }

    #[test]
    fn oversized_ciphertext_fails_on_encoded_length() {
        // Garbage alphabet chars would fail decoding, but the size check
        // fires first on the encoded length alone
        let limits = Limits {
            max_secret_bytes: 4096,
            max_ciphertext_bytes: 64,
        };
        let json = format!(
            r#"{{"iv":"{}","tag":"{}","ciphertext":"{}"}}"#,
            base64url_encode(&[0u8; 12]),
            base64url_encode(&[0u8; 16]),
            "!".repeat(4096)
        );
        let err = Payload::parse(&json, &limits).unwrap_err();
        assert!(matches!(err, CoreError::CiphertextTooLarge { .. }));
    }

    #[test]
    fn honors_injected_limits() {
        let limits = Limits {
            max_secret_bytes: 4096,
            max_ciphertext_bytes: 8,
        };
        let payload = Payload::from_parts(&[1u8; 12], &[2u8; 16], &[3u8; 9]);
        let json = serde_json::to_string(&payload).unwrap();
        assert!(Payload::parse(&json, &limits).is_err());
        assert!(Payload::parse(&json, &Limits::default()).is_ok());
    }

    #[test]
    fn try_parse_never_errors() {
        assert!(Payload::try_parse("garbage", &Limits::default()).is_none());
        assert!(Payload::try_parse(&valid_payload_json(), &Limits::default()).is_some());
    }

    #[test]
    fn serializes_expected_field_names() {
        let json = valid_payload_json();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 3);
        assert!(obj.contains_key("iv"));
        assert!(obj.contains_key("tag"));
        assert!(obj.contains_key("ciphertext"));
    }
}
