//! AES-256-GCM authenticated encryption.
//!
//! Each call to `encrypt` generates a fresh random 12-byte nonce and
//! prepends it to the ciphertext.  `decrypt` splits the nonce back out
//! before decrypting.
//!
//! Layout of the returned byte buffer:
//!   [ 12-byte nonce | ciphertext + 16-byte auth tag ]

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use rand::TryRngCore;

use super::kdf::KEY_LEN;
use crate::errors::{LockboxError, Result};

/// Size of the AES-256-GCM nonce in bytes.
pub const NONCE_LEN: usize = 12;

/// Size of the GCM authentication tag appended to every ciphertext.
pub const TAG_LEN: usize = 16;

/// Encrypt `plaintext` with a 32-byte `key`.
///
/// Returns the nonce prepended to the ciphertext (nonce || ciphertext).
pub fn encrypt(plaintext: &[u8], key: &[u8]) -> Result<Vec<u8>> {
    let cipher = cipher_for(key)?;

    let mut nonce_bytes = [0u8; NONCE_LEN];
    rand::rngs::OsRng
        .try_fill_bytes(&mut nonce_bytes)
        .map_err(|e| LockboxError::EntropyUnavailable(format!("nonce generation: {e}")))?;
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, plaintext)
        .map_err(|e| LockboxError::EncryptionFailed(format!("encryption error: {e}")))?;

    // Prepend the nonce so the caller only needs to store one blob.
    let mut output = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    output.extend_from_slice(&nonce_bytes);
    output.extend_from_slice(&ciphertext);
    Ok(output)
}

/// Decrypt data that was produced by `encrypt`.
///
/// Any tag mismatch is reported as `AuthenticationFailed`, whether the
/// key is wrong or the bytes were altered.
pub fn decrypt(framed: &[u8], key: &[u8]) -> Result<Vec<u8>> {
    let cipher = cipher_for(key)?;

    if framed.len() < NONCE_LEN {
        return Err(LockboxError::InvalidFraming);
    }

    let (nonce_bytes, ciphertext) = framed.split_at(NONCE_LEN);
    let nonce = Nonce::from_slice(nonce_bytes);

    cipher
        .decrypt(nonce, ciphertext)
        .map_err(|_| LockboxError::AuthenticationFailed)
}

fn cipher_for(key: &[u8]) -> Result<Aes256Gcm> {
    if key.len() != KEY_LEN {
        return Err(LockboxError::InvalidKeyLength {
            expected: KEY_LEN,
            actual: key.len(),
        });
    }
    Aes256Gcm::new_from_slice(key).map_err(|_| LockboxError::InvalidKeyLength {
        expected: KEY_LEN,
        actual: key.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_is_nonce_plus_ciphertext_plus_tag() {
        let key = [0x11u8; KEY_LEN];
        let framed = encrypt(b"hello", &key).unwrap();
        assert_eq!(framed.len(), NONCE_LEN + 5 + TAG_LEN);
    }

    #[test]
    fn short_key_is_rejected() {
        let result = encrypt(b"data", &[0u8; 16]);
        assert!(matches!(
            result,
            Err(LockboxError::InvalidKeyLength {
                expected: 32,
                actual: 16
            })
        ));
    }

    #[test]
    fn decrypt_rejects_wrong_key_length_before_framing() {
        let result = decrypt(&[0u8; 40], &[0u8; 31]);
        assert!(matches!(result, Err(LockboxError::InvalidKeyLength { .. })));
    }

    #[test]
    fn payload_shorter_than_nonce_is_invalid_framing() {
        let key = [0x22u8; KEY_LEN];
        for len in 0..NONCE_LEN {
            let result = decrypt(&vec![0u8; len], &key);
            assert!(matches!(result, Err(LockboxError::InvalidFraming)));
        }
    }

    #[test]
    fn nonce_only_payload_fails_authentication() {
        let key = [0x22u8; KEY_LEN];
        let result = decrypt(&[0u8; NONCE_LEN], &key);
        assert!(matches!(result, Err(LockboxError::AuthenticationFailed)));
    }

    #[test]
    fn every_single_bit_flip_is_detected() {
        let key = [0x33u8; KEY_LEN];
        let framed = encrypt(br#"{"entries":[]}"#, &key).unwrap();

        for byte in 0..framed.len() {
            for bit in 0..8 {
                let mut tampered = framed.clone();
                tampered[byte] ^= 1 << bit;
                assert!(
                    matches!(
                        decrypt(&tampered, &key),
                        Err(LockboxError::AuthenticationFailed)
                    ),
                    "flip of bit {bit} in byte {byte} went undetected"
                );
            }
        }
    }
}
