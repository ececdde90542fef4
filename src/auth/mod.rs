//! Authentication and authorization for Strongroom
//!
//! Provides:
//! - Session token issuance and verification (HS256)
//! - Bearer-token and role gating for protected operations
//! - Password hashing with Argon2
//! - The closed role set

pub mod gate;
pub mod jwt;
pub mod password;
pub mod role;

pub use gate::{require_auth, require_role, Identity};
pub use jwt::{extract_token_from_header, Claims, TokenService};
pub use password::{hash_password, verify_password};
pub use role::Role;
