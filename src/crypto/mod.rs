//! Cryptographic services for document custody
//!
//! - At-rest encryption of uploaded artifacts (ChaCha20-Poly1305)
//! - Auxiliary integrity-marker bookkeeping

pub mod at_rest;
pub mod marker;

pub use at_rest::{EncryptionAtRest, ENCRYPTION_SCHEME};
pub use marker::{generate_auxiliary_key, integrity_marker};
