//! At-rest encryption for stored document artifacts
//!
//! A single 256-bit key is derived once from the process-wide secret via
//! SHA-256 and used for every encrypt/decrypt call for the lifetime of the
//! service. Known limitation, preserved deliberately: there are no
//! per-document keys, and rotating the secret makes previously stored
//! ciphertexts undecryptable.
//!
//! Ciphertexts are self-contained: a random 12-byte nonce is prefixed to
//! the ChaCha20-Poly1305 output, so decryption needs only the ciphertext
//! and the service key.

use chacha20poly1305::{aead::Aead, ChaCha20Poly1305, Key, KeyInit, Nonce};
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::types::{CustodyError, Result};

/// Scheme tag recorded in document-slot metadata.
pub const ENCRYPTION_SCHEME: &str = "chacha20-poly1305";

/// Nonce length prefixed to every ciphertext (12 bytes)
pub const NONCE_LEN: usize = 12;

/// Poly1305 auth tag length (16 bytes)
pub const AUTH_TAG_LEN: usize = 16;

#[derive(Zeroize, ZeroizeOnDrop)]
struct DerivedKey([u8; 32]);

/// Authenticated symmetric encryption with one process-lifetime key.
pub struct EncryptionAtRest {
    key: DerivedKey,
}

impl EncryptionAtRest {
    /// Derive the service key from the process-wide secret.
    ///
    /// Deterministic: the same secret always yields the same key, so
    /// enroll, upload, and view paths can never disagree on key material.
    pub fn new(secret: &str) -> Self {
        let digest = Sha256::digest(secret.as_bytes());
        let mut key = [0u8; 32];
        key.copy_from_slice(&digest);
        Self {
            key: DerivedKey(key),
        }
    }

    /// Encrypt a payload. Output layout: `nonce (12) || ciphertext+tag`.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        let cipher = ChaCha20Poly1305::new(Key::from_slice(&self.key.0));

        let mut nonce = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce);

        let ciphertext = cipher
            .encrypt(Nonce::from_slice(&nonce), plaintext)
            .map_err(|e| CustodyError::Internal(format!("Encryption failed: {e}")))?;

        let mut out = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        out.extend_from_slice(&nonce);
        out.extend_from_slice(&ciphertext);
        Ok(out)
    }

    /// Decrypt a payload produced by [`Self::encrypt`].
    ///
    /// Fails with `DecryptionFailed` for tampered, truncated, or
    /// wrong-key input; never returns unauthenticated bytes.
    pub fn decrypt(&self, data: &[u8]) -> Result<Vec<u8>> {
        if data.len() < NONCE_LEN + AUTH_TAG_LEN {
            return Err(CustodyError::DecryptionFailed);
        }

        let (nonce, ciphertext) = data.split_at(NONCE_LEN);
        let cipher = ChaCha20Poly1305::new(Key::from_slice(&self.key.0));

        cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| CustodyError::DecryptionFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> EncryptionAtRest {
        EncryptionAtRest::new("at-rest-test-secret")
    }

    #[test]
    fn test_roundtrip() {
        let svc = service();
        let plaintext = b"identity document scan bytes";

        let ciphertext = svc.encrypt(plaintext).unwrap();
        assert_ne!(&ciphertext[NONCE_LEN..], plaintext.as_slice());

        let decrypted = svc.decrypt(&ciphertext).unwrap();
        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn test_roundtrip_empty_payload() {
        let svc = service();
        let ciphertext = svc.encrypt(b"").unwrap();
        assert_eq!(ciphertext.len(), NONCE_LEN + AUTH_TAG_LEN);
        assert_eq!(svc.decrypt(&ciphertext).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_roundtrip_large_payload() {
        let svc = service();
        let plaintext: Vec<u8> = (0..1_000_000u32).map(|i| (i % 251) as u8).collect();

        let ciphertext = svc.encrypt(&plaintext).unwrap();
        assert_eq!(svc.decrypt(&ciphertext).unwrap(), plaintext);
    }

    #[test]
    fn test_single_bit_flip_fails() {
        let svc = service();
        let ciphertext = svc.encrypt(b"tamper target").unwrap();

        for index in [0, NONCE_LEN, ciphertext.len() - 1] {
            let mut tampered = ciphertext.clone();
            tampered[index] ^= 0x01;
            assert!(matches!(
                svc.decrypt(&tampered),
                Err(CustodyError::DecryptionFailed)
            ));
        }
    }

    #[test]
    fn test_truncated_input_fails() {
        let svc = service();
        let ciphertext = svc.encrypt(b"truncate me").unwrap();

        assert!(matches!(
            svc.decrypt(&ciphertext[..NONCE_LEN + AUTH_TAG_LEN - 1]),
            Err(CustodyError::DecryptionFailed)
        ));
        assert!(matches!(
            svc.decrypt(b""),
            Err(CustodyError::DecryptionFailed)
        ));
    }

    #[test]
    fn test_wrong_key_fails() {
        let a = EncryptionAtRest::new("secret-a");
        let b = EncryptionAtRest::new("secret-b");

        let ciphertext = a.encrypt(b"cross-key").unwrap();
        assert!(matches!(
            b.decrypt(&ciphertext),
            Err(CustodyError::DecryptionFailed)
        ));
    }

    #[test]
    fn test_key_derivation_is_deterministic() {
        let a = EncryptionAtRest::new("shared-secret");
        let b = EncryptionAtRest::new("shared-secret");

        // Two instances from the same secret must interoperate.
        let ciphertext = a.encrypt(b"shared").unwrap();
        assert_eq!(b.decrypt(&ciphertext).unwrap(), b"shared");
    }

    #[test]
    fn test_nonce_uniqueness() {
        let svc = service();
        let c1 = svc.encrypt(b"same plaintext").unwrap();
        let c2 = svc.encrypt(b"same plaintext").unwrap();
        assert_ne!(c1, c2);
    }
}
