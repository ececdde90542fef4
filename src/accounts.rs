//! Enrollment and login
//!
//! Enrollment creates the user record with every document slot empty; new
//! users always start with the `user` role. Login verifies the stored
//! password hash and issues a session token. Both sit in front of the
//! access-control gate (they are how callers obtain credentials).

use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use crate::auth::jwt::TokenService;
use crate::auth::password::{hash_password, verify_password};
use crate::auth::role::Role;
use crate::db::schemas::{NewUser, UserSummary};
use crate::db::store::UserStore;
use crate::types::{CustodyError, Result};

/// Enrollment input.
#[derive(Debug, Clone)]
pub struct EnrollmentRequest {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub national_id: String,
    pub password: String,
}

/// Successful login: a bearer token and its absolute expiry.
#[derive(Debug, Clone, Serialize)]
pub struct LoginOutcome {
    pub token: String,
    pub expires_in: u64,
}

pub struct AccountService {
    users: Arc<dyn UserStore>,
    tokens: Arc<TokenService>,
}

impl AccountService {
    pub fn new(users: Arc<dyn UserStore>, tokens: Arc<TokenService>) -> Self {
        Self { users, tokens }
    }

    /// Enroll a new user. Rejects duplicate email/national-id pairs and
    /// missing required fields.
    pub async fn enroll(&self, request: EnrollmentRequest) -> Result<UserSummary> {
        let missing: Vec<&str> = [
            ("full_name", &request.full_name),
            ("email", &request.email),
            ("phone", &request.phone),
            ("national_id", &request.national_id),
            ("password", &request.password),
        ]
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();

        if !missing.is_empty() {
            return Err(CustodyError::Validation(missing.join(", ")));
        }

        let password_hash = hash_password(&request.password)?;

        let record = self
            .users
            .insert(NewUser {
                full_name: request.full_name,
                email: request.email,
                phone: request.phone,
                national_id: request.national_id,
                password_hash,
                role: Role::User,
            })
            .await?;

        info!(user = %record.id, "User enrolled");

        Ok(UserSummary::from(&record))
    }

    /// Authenticate by email or national id and issue a session token.
    pub async fn login(&self, identifier: &str, password: &str) -> Result<LoginOutcome> {
        let user = self
            .users
            .find_by_identifier(identifier)
            .await?
            .ok_or_else(|| CustodyError::NotFound("user".to_string()))?;

        if !verify_password(password, &user.password_hash)? {
            return Err(CustodyError::AuthInvalidOrExpired);
        }

        let token = self.tokens.issue(&user.id.to_string(), user.role)?;

        info!(user = %user.id, role = %user.role, "Login succeeded");

        Ok(LoginOutcome {
            token,
            expires_in: self.tokens.ttl_seconds(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::store::MemoryStore;

    fn service() -> (AccountService, Arc<MemoryStore>, Arc<TokenService>) {
        let store = Arc::new(MemoryStore::new());
        let tokens = Arc::new(TokenService::new("accounts-test-secret", 60));
        (
            AccountService::new(store.clone(), tokens.clone()),
            store,
            tokens,
        )
    }

    fn request() -> EnrollmentRequest {
        EnrollmentRequest {
            full_name: "Asha Rao".into(),
            email: "asha@example.com".into(),
            phone: "5550100".into(),
            national_id: "AAA1".into(),
            password: "correct-horse".into(),
        }
    }

    #[tokio::test]
    async fn test_enroll_and_login_by_either_identifier() {
        let (svc, _store, tokens) = service();
        let summary = svc.enroll(request()).await.unwrap();
        assert_eq!(summary.role, Role::User);

        let by_email = svc.login("asha@example.com", "correct-horse").await.unwrap();
        let by_national_id = svc.login("AAA1", "correct-horse").await.unwrap();

        for outcome in [by_email, by_national_id] {
            let identity = tokens.verify(&outcome.token).unwrap();
            assert_eq!(identity.user_id, summary.id.to_string());
            assert_eq!(identity.role, Role::User);
        }
    }

    #[tokio::test]
    async fn test_enroll_missing_fields() {
        let (svc, _store, _tokens) = service();
        let mut bad = request();
        bad.email = "  ".into();

        let err = svc.enroll(bad).await.unwrap_err();
        assert!(matches!(err, CustodyError::Validation(_)));
    }

    #[tokio::test]
    async fn test_enroll_duplicate() {
        let (svc, _store, _tokens) = service();
        svc.enroll(request()).await.unwrap();

        let err = svc.enroll(request()).await.unwrap_err();
        assert!(matches!(err, CustodyError::DuplicateEnrollment));
    }

    #[tokio::test]
    async fn test_login_failures() {
        let (svc, _store, _tokens) = service();
        svc.enroll(request()).await.unwrap();

        let err = svc.login("nobody@example.com", "pw").await.unwrap_err();
        assert!(matches!(err, CustodyError::NotFound(_)));

        let err = svc.login("asha@example.com", "wrong-password").await.unwrap_err();
        assert!(matches!(err, CustodyError::AuthInvalidOrExpired));
    }
}
