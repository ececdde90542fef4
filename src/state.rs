//! Application state and gated operation façade
//!
//! [`AppState::init`] wires every service by explicit dependency injection
//! at process start; nothing here is module-global. The operation methods
//! compose the access-control gate in front of the custody engine, one
//! gate per route: user-scoped operations behind `require_auth`,
//! admin-scoped operations behind `require_role(Admin)`. The external
//! transport layer maps these directly onto its routes.

use std::sync::Arc;

use crate::accounts::{AccountService, EnrollmentRequest, LoginOutcome};
use crate::auth::gate::{require_auth, require_role};
use crate::auth::jwt::TokenService;
use crate::auth::role::Role;
use crate::config::Args;
use crate::crypto::at_rest::EncryptionAtRest;
use crate::custody::artifacts::ArtifactStore;
use crate::custody::engine::{CustodyEngine, DocumentStatus, DocumentView, UploadOutcome};
use crate::db::schemas::UserSummary;
use crate::db::store::{MemoryStore, UserStore};
use crate::types::{CustodyError, Result};

pub struct AppState {
    pub tokens: Arc<TokenService>,
    pub accounts: AccountService,
    pub engine: CustodyEngine,
}

impl AppState {
    /// Build the full service graph from configuration, backed by the
    /// in-memory credential store.
    pub async fn init(args: &Args) -> Result<Self> {
        let store: Arc<dyn UserStore> = Arc::new(MemoryStore::new());
        Self::init_with_store(args, store).await
    }

    /// Build the service graph against an externally provided credential
    /// store implementation.
    pub async fn init_with_store(args: &Args, store: Arc<dyn UserStore>) -> Result<Self> {
        let secret = args
            .secret_key()
            .ok_or_else(|| CustodyError::Internal("SECRET_KEY not configured".to_string()))?;

        let tokens = Arc::new(TokenService::new(&secret, args.token_ttl_seconds));
        let artifacts = ArtifactStore::new(&args.upload_dir).await?;
        let cipher = EncryptionAtRest::new(&secret);

        Ok(Self {
            tokens: tokens.clone(),
            accounts: AccountService::new(store.clone(), tokens),
            engine: CustodyEngine::new(store, artifacts, cipher),
        })
    }

    // =========================================================================
    // Ungated operations (credential entry points)
    // =========================================================================

    pub async fn enroll(&self, request: EnrollmentRequest) -> Result<UserSummary> {
        self.accounts.enroll(request).await
    }

    pub async fn login(&self, identifier: &str, password: &str) -> Result<LoginOutcome> {
        self.accounts.login(identifier, password).await
    }

    // =========================================================================
    // User-scoped operations (require_auth)
    // =========================================================================

    pub async fn upload_document(
        &self,
        authorization: Option<&str>,
        doc_type: &str,
        file_bytes: &[u8],
        file_name: &str,
    ) -> Result<UploadOutcome> {
        let identity = require_auth(&self.tokens, authorization)?;
        self.engine
            .upload(&identity, doc_type, file_bytes, file_name)
            .await
    }

    pub async fn view_document(
        &self,
        authorization: Option<&str>,
        doc_type: &str,
    ) -> Result<DocumentView> {
        let identity = require_auth(&self.tokens, authorization)?;
        self.engine.view(&identity, doc_type).await
    }

    pub async fn document_status(&self, authorization: Option<&str>) -> Result<DocumentStatus> {
        let identity = require_auth(&self.tokens, authorization)?;
        self.engine.document_status(&identity).await
    }

    // =========================================================================
    // Admin-scoped operations (require_role(Admin))
    // =========================================================================

    pub async fn verify_document(
        &self,
        authorization: Option<&str>,
        target_user_id: &str,
        doc_type: &str,
    ) -> Result<()> {
        let _admin = require_role(&self.tokens, authorization, Role::Admin)?;
        self.engine.verify(target_user_id, doc_type).await
    }

    pub async fn list_users(&self, authorization: Option<&str>) -> Result<Vec<UserSummary>> {
        let _admin = require_role(&self.tokens, authorization, Role::Admin)?;
        self.engine.list_users().await
    }
}
