//! Base64url (URL-safe, unpadded) encoding for the Stash wire formats.
//!
//! Every byte buffer that crosses a text boundary — token keys, payload
//! iv/tag/ciphertext fields — goes through this codec. Standard base64
//! (`+`, `/`, padding) is rejected on decode.

use base64ct::{Base64UrlUnpadded, Encoding};

use crate::error::CryptoError;

/// Base64url encode bytes without padding.
pub fn base64url_encode(data: &[u8]) -> String {
    Base64UrlUnpadded::encode_string(data)
}

/// Base64url decode a string to bytes.
///
/// Rejects characters outside `[A-Za-z0-9_-]` and malformed lengths.
pub fn base64url_decode(s: &str) -> Result<Vec<u8>, CryptoError> {
    Base64UrlUnpadded::decode_vec(s).map_err(|e| CryptoError::Base64Decode(e.to_string()))
}

/// Exact unpadded base64url length for `n` bytes of input.
pub fn base64url_encoded_len(n: usize) -> usize {
    let full = n.div_ceil(3) * 4;
    let padding = (3 - n % 3) % 3;
    full - padding
}

/// Decode a string that must represent exactly `expected_len` bytes.
///
/// The encoded string length is checked algebraically before decoding, so
/// oversized attacker input fails without allocating a decode buffer. The
/// decoded length is re-checked afterwards.
pub fn base64url_decode_exact(
    s: &str,
    expected_len: usize,
    field: &'static str,
) -> Result<Vec<u8>, CryptoError> {
    if s.len() != base64url_encoded_len(expected_len) {
        return Err(CryptoError::InvalidFieldLength {
            field,
            expected: expected_len,
            // Approximate decoded size from the encoded length
            got: s.len() * 3 / 4,
        });
    }
    let decoded = base64url_decode(s)?;
    if decoded.len() != expected_len {
        return Err(CryptoError::InvalidFieldLength {
            field,
            expected: expected_len,
            got: decoded.len(),
        });
    }
    Ok(decoded)
}
