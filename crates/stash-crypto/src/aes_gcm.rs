//! AES-256-GCM encryption with separated ciphertext and tag.
//!
//! The aead crate appends the 16-byte tag to its ciphertext output; the
//! Stash wire format carries iv, tag, and ciphertext as three independent
//! fields, so encrypt splits the tail off and decrypt recombines it.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use zeroize::Zeroize;

use crate::error::CryptoError;
use crate::types::{AES_GCM_IV_LENGTH, AES_GCM_TAG_LENGTH, AES_KEY_LENGTH};

/// Generate a random 256-bit key.
pub fn generate_key() -> Result<[u8; AES_KEY_LENGTH], CryptoError> {
    let mut key = [0u8; AES_KEY_LENGTH];
    getrandom::getrandom(&mut key).map_err(|e| CryptoError::RngFailed(e.to_string()))?;
    Ok(key)
}

/// Generate a random 96-bit IV.
///
/// IVs must be freshly random per encryption; reuse under the same key
/// breaks GCM confidentiality and integrity. Never derive one from a
/// counter or timestamp.
pub fn generate_iv() -> Result<[u8; AES_GCM_IV_LENGTH], CryptoError> {
    let mut iv = [0u8; AES_GCM_IV_LENGTH];
    getrandom::getrandom(&mut iv).map_err(|e| CryptoError::RngFailed(e.to_string()))?;
    Ok(iv)
}

/// Encrypt with AES-256-GCM, returning ciphertext and tag separately.
///
/// # Arguments
/// * `key` - 32-byte key
/// * `iv` - 12-byte IV, unique per key
/// * `plaintext` - data to encrypt
pub fn aes_gcm_encrypt(
    key: &[u8],
    iv: &[u8],
    plaintext: &[u8],
) -> Result<(Vec<u8>, [u8; AES_GCM_TAG_LENGTH]), CryptoError> {
    if key.len() != AES_KEY_LENGTH {
        return Err(CryptoError::InvalidKeyLength {
            expected: AES_KEY_LENGTH,
            got: key.len(),
        });
    }
    if iv.len() != AES_GCM_IV_LENGTH {
        return Err(CryptoError::InvalidFieldLength {
            field: "iv",
            expected: AES_GCM_IV_LENGTH,
            got: iv.len(),
        });
    }
    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))?;
    let mut combined = cipher
        .encrypt(Nonce::from_slice(iv), plaintext)
        .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))?;
    if combined.len() < AES_GCM_TAG_LENGTH {
        return Err(CryptoError::EncryptionFailed(
            "output shorter than tag".to_string(),
        ));
    }

    let tag_bytes = combined.split_off(combined.len() - AES_GCM_TAG_LENGTH);
    let mut tag = [0u8; AES_GCM_TAG_LENGTH];
    tag.copy_from_slice(&tag_bytes);
    Ok((combined, tag))
}

/// Decrypt with AES-256-GCM from separated ciphertext and tag.
///
/// Lengths are validated here regardless of upstream checks. Tag mismatch
/// yields `AuthenticationFailed` for tampered data and wrong keys alike.
pub fn aes_gcm_decrypt(
    key: &[u8],
    iv: &[u8],
    tag: &[u8],
    ciphertext: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    if key.len() != AES_KEY_LENGTH {
        return Err(CryptoError::InvalidKeyLength {
            expected: AES_KEY_LENGTH,
            got: key.len(),
        });
    }
    if iv.len() != AES_GCM_IV_LENGTH {
        return Err(CryptoError::InvalidFieldLength {
            field: "iv",
            expected: AES_GCM_IV_LENGTH,
            got: iv.len(),
        });
    }
    if tag.len() != AES_GCM_TAG_LENGTH {
        return Err(CryptoError::InvalidFieldLength {
            field: "tag",
            expected: AES_GCM_TAG_LENGTH,
            got: tag.len(),
        });
    }
    let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| CryptoError::InvalidKeyLength {
        expected: AES_KEY_LENGTH,
        got: key.len(),
    })?;

    let mut combined = Vec::with_capacity(ciphertext.len() + AES_GCM_TAG_LENGTH);
    combined.extend_from_slice(ciphertext);
    combined.extend_from_slice(tag);
    let result = cipher
        .decrypt(Nonce::from_slice(iv), combined.as_slice())
        .map_err(|_| CryptoError::AuthenticationFailed);
    combined.zeroize();
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn random_key() -> [u8; AES_KEY_LENGTH] {
        generate_key().unwrap()
    }

    #[test]
    fn encrypt_decrypt_round_trip() {
        let key = random_key();
        let iv = generate_iv().unwrap();
        let (ciphertext, tag) = aes_gcm_encrypt(&key, &iv, b"Hello, World!").unwrap();
        let plaintext = aes_gcm_decrypt(&key, &iv, &tag, &ciphertext).unwrap();
        assert_eq!(plaintext, b"Hello, World!");
    }

    #[test]
    fn ciphertext_same_length_as_plaintext() {
        let key = random_key();
        let iv = generate_iv().unwrap();
        let (ciphertext, _tag) = aes_gcm_encrypt(&key, &iv, b"12345").unwrap();
        assert_eq!(ciphertext.len(), 5);
    }

    #[test]
    fn fresh_iv_each_call() {
        let iv1 = generate_iv().unwrap();
        let iv2 = generate_iv().unwrap();
        assert_ne!(iv1, iv2);
    }

    #[test]
    fn fresh_key_each_call() {
        assert_ne!(generate_key().unwrap(), generate_key().unwrap());
    }

    #[test]
    fn rejects_tampered_ciphertext() {
        let key = random_key();
        let iv = generate_iv().unwrap();
        let (mut ciphertext, tag) = aes_gcm_encrypt(&key, &iv, b"secret").unwrap();
        ciphertext[0] ^= 0xff;
        let err = aes_gcm_decrypt(&key, &iv, &tag, &ciphertext).unwrap_err();
        assert!(matches!(err, CryptoError::AuthenticationFailed));
    }

    #[test]
    fn rejects_tampered_tag() {
        let key = random_key();
        let iv = generate_iv().unwrap();
        let (ciphertext, mut tag) = aes_gcm_encrypt(&key, &iv, b"secret").unwrap();
        tag[0] ^= 0x01;
        let err = aes_gcm_decrypt(&key, &iv, &tag, &ciphertext).unwrap_err();
        assert!(matches!(err, CryptoError::AuthenticationFailed));
    }

    #[test]
    fn wrong_key_fails() {
        let iv = generate_iv().unwrap();
        let (ciphertext, tag) = aes_gcm_encrypt(&random_key(), &iv, b"secret").unwrap();
        let err = aes_gcm_decrypt(&random_key(), &iv, &tag, &ciphertext).unwrap_err();
        assert!(matches!(err, CryptoError::AuthenticationFailed));
    }

    #[test]
    fn rejects_short_key() {
        let iv = generate_iv().unwrap();
        let err = aes_gcm_encrypt(&[0u8; 16], &iv, b"x").unwrap_err();
        assert!(matches!(
            err,
            CryptoError::InvalidKeyLength {
                expected: 32,
                got: 16
            }
        ));
    }

    #[test]
    fn rejects_wrong_iv_length() {
        let key = random_key();
        let err = aes_gcm_encrypt(&key, &[0u8; 16], b"x").unwrap_err();
        assert!(matches!(
            err,
            CryptoError::InvalidFieldLength { field: "iv", .. }
        ));
    }

    #[test]
    fn rejects_wrong_tag_length() {
        let key = random_key();
        let iv = generate_iv().unwrap();
        let (ciphertext, _) = aes_gcm_encrypt(&key, &iv, b"x").unwrap();
        let err = aes_gcm_decrypt(&key, &iv, &[0u8; 12], &ciphertext).unwrap_err();
        assert!(matches!(
            err,
            CryptoError::InvalidFieldLength { field: "tag", .. }
        ));
    }

    #[test]
    fn handles_large_data() {
        let key = random_key();
        let iv = generate_iv().unwrap();
        let mut plaintext = vec![0u8; 100 * 1024];
        getrandom::getrandom(&mut plaintext).unwrap();
        let (ciphertext, tag) = aes_gcm_encrypt(&key, &iv, &plaintext).unwrap();
        let decrypted = aes_gcm_decrypt(&key, &iv, &tag, &ciphertext).unwrap();
        assert_eq!(decrypted, plaintext);
    }
}
