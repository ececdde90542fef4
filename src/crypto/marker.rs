//! Auxiliary integrity-marker bookkeeping
//!
//! These values are stored alongside encrypted artifacts as inert metadata.
//! Neither is a security boundary: the marker is a fingerprint for
//! tamper-evidence bookkeeping and operational diagnosis, and the auxiliary
//! key is a write-only demonstration artifact with no decrypt-time
//! consumer. Confidentiality and integrity enforcement live entirely in
//! [`crate::crypto::at_rest`].

use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha512};

/// Compute the integrity marker for a ciphertext: SHA-512, hex encoded.
///
/// Deterministic over the ciphertext bytes. Auxiliary metadata only.
pub fn integrity_marker(ciphertext: &[u8]) -> String {
    hex::encode(Sha512::digest(ciphertext))
}

/// Generate a high-entropy opaque token stored next to the document for
/// audit/demonstration purposes. Carries no cryptographic function.
pub fn generate_auxiliary_key() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}
