//! Strongroom - identity-document custody core
//!
//! Users enroll identity documents (national-ID, tax-ID, passport scans);
//! Strongroom stores them encrypted at rest, gates access by authenticated
//! identity and role, and lets admins mark documents verified.
//!
//! ## Services
//!
//! - **Token Service**: signed, time-bounded session tokens (HS256)
//! - **Access Control Gate**: bearer-token and role gating for every
//!   protected operation
//! - **Encryption-at-Rest**: ChaCha20-Poly1305 over uploaded artifacts,
//!   one process-lifetime key derived from the configured secret
//! - **Integrity Marker**: auxiliary ciphertext fingerprint bookkeeping
//! - **Custody Engine**: upload / view / verify lifecycle per document slot
//!
//! The HTTP transport, multipart parsing, and persistence engine are
//! external collaborators: embedders parse [`Args`], build an [`AppState`],
//! and mount its gated operations behind their own routing layer.

pub mod accounts;
pub mod auth;
pub mod config;
pub mod crypto;
pub mod custody;
pub mod db;
pub mod logging;
pub mod state;
pub mod types;

pub use config::Args;
pub use state::AppState;
pub use types::{CustodyError, ErrorBody, Result};
