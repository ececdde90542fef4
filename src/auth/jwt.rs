//! Session token issuance and verification
//!
//! Tokens are compact three-part HS256 assertions carrying exactly
//! `{sub, role, exp}`. They are stateless: there is no revocation list, and
//! rotating the signing secret invalidates every outstanding token.
//!
//! Expiry is fail-closed: a token is invalid at and after its expiry
//! instant, with zero leeway. The library's own expiry check allows a
//! leeway window, so it is disabled and the boundary is checked explicitly.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::auth::gate::Identity;
use crate::auth::role::Role;
use crate::types::{CustodyError, Result};

/// Claims carried by a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User identifier
    pub sub: String,
    /// Caller role
    pub role: Role,
    /// Absolute expiry, epoch seconds
    pub exp: u64,
}

/// Issues and verifies signed session tokens.
///
/// The same signing secret must be in use at issue and verify time; both
/// keys here are derived from the single process-wide secret.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_seconds: u64,
    validation: Validation,
}

impl TokenService {
    pub fn new(secret: &str, ttl_seconds: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is enforced manually below, fail-closed with no leeway.
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_seconds,
            validation,
        }
    }

    /// Issue a token for `user_id` with the configured TTL.
    pub fn issue(&self, user_id: &str, role: Role) -> Result<String> {
        self.issue_at(user_id, role, now_epoch_seconds())
    }

    /// Verify a token, returning the caller identity.
    ///
    /// Returns `None` for malformed input, signature mismatch, and expired
    /// tokens alike; never panics.
    pub fn verify(&self, token: &str) -> Option<Identity> {
        self.verify_at(token, now_epoch_seconds())
    }

    /// Token lifetime in seconds.
    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }

    fn issue_at(&self, user_id: &str, role: Role, now: u64) -> Result<String> {
        let claims = Claims {
            sub: user_id.to_string(),
            role,
            exp: now + self.ttl_seconds,
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| CustodyError::Internal(format!("Token encoding failed: {e}")))
    }

    fn verify_at(&self, token: &str, now: u64) -> Option<Identity> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation).ok()?;

        if now >= data.claims.exp {
            return None;
        }

        Some(Identity {
            user_id: data.claims.sub,
            role: data.claims.role,
        })
    }
}

/// Extract the bearer token from an `Authorization` header value.
///
/// Returns `None` for a missing header or any scheme other than `Bearer`.
pub fn extract_token_from_header(header: Option<&str>) -> Option<&str> {
    let header = header?;
    let token = header.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

fn now_epoch_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new("test-secret", 60)
    }

    #[test]
    fn test_issue_and_verify() {
        let svc = service();
        let token = svc.issue("user-1", Role::Admin).unwrap();

        let identity = svc.verify(&token).unwrap();
        assert_eq!(identity.user_id, "user-1");
        assert_eq!(identity.role, Role::Admin);
    }

    #[test]
    fn test_expiry_boundary_is_fail_closed() {
        let svc = service();
        let issued = 1_000_000;
        let token = svc.issue_at("user-1", Role::User, issued).unwrap();

        // Valid strictly before expiry
        assert!(svc.verify_at(&token, issued + 59).is_some());
        // Invalid exactly at expiry and after
        assert!(svc.verify_at(&token, issued + 60).is_none());
        assert!(svc.verify_at(&token, issued + 61).is_none());
        assert!(svc.verify_at(&token, issued + 10_000).is_none());
    }

    #[test]
    fn test_wrong_key_never_verifies() {
        let issuer = TokenService::new("key-one", 60);
        let verifier = TokenService::new("key-two", 60);

        let token = issuer.issue("user-1", Role::User).unwrap();
        assert!(issuer.verify(&token).is_some());
        assert!(verifier.verify(&token).is_none());
    }

    #[test]
    fn test_malformed_tokens_return_none() {
        let svc = service();
        assert!(svc.verify("").is_none());
        assert!(svc.verify("not-a-token").is_none());
        assert!(svc.verify("a.b.c").is_none());

        // Tampered payload
        let token = svc.issue("user-1", Role::User).unwrap();
        let mut parts: Vec<&str> = token.split('.').collect();
        let swapped = format!("{}x", parts[1]);
        parts[1] = &swapped;
        assert!(svc.verify(&parts.join(".")).is_none());
    }

    #[test]
    fn test_extract_token_from_header() {
        assert_eq!(
            extract_token_from_header(Some("Bearer abc.def.ghi")),
            Some("abc.def.ghi")
        );
        assert_eq!(extract_token_from_header(None), None);
        assert_eq!(extract_token_from_header(Some("abc.def.ghi")), None);
        assert_eq!(extract_token_from_header(Some("Basic dXNlcg==")), None);
        assert_eq!(extract_token_from_header(Some("Bearer ")), None);
    }
}
