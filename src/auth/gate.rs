//! Access control gate
//!
//! Pure gating functions composed explicitly in front of each protected
//! operation: user-scoped operations sit behind [`require_auth`],
//! admin-scoped operations behind [`require_role`]. Each returns either the
//! decoded caller identity (the continuation value) or a short-circuit
//! rejection; nothing here has side effects.

use crate::auth::jwt::{extract_token_from_header, TokenService};
use crate::auth::role::Role;
use crate::types::{CustodyError, Result};

/// Decoded caller identity, passed to the wrapped operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: String,
    pub role: Role,
}

/// Require a valid bearer token.
///
/// Rejects with `AuthMissing` when the authorization header is absent or
/// malformed, `AuthInvalidOrExpired` when token verification fails.
pub fn require_auth(tokens: &TokenService, authorization: Option<&str>) -> Result<Identity> {
    let token = extract_token_from_header(authorization).ok_or(CustodyError::AuthMissing)?;

    tokens
        .verify(token)
        .ok_or(CustodyError::AuthInvalidOrExpired)
}

/// Require a valid bearer token carrying a specific role.
///
/// Composes [`require_auth`], then rejects with `AccessDenied` on role
/// mismatch.
pub fn require_role(
    tokens: &TokenService,
    authorization: Option<&str>,
    role: Role,
) -> Result<Identity> {
    let identity = require_auth(tokens, authorization)?;

    if identity.role != role {
        return Err(CustodyError::AccessDenied);
    }

    Ok(identity)
}
