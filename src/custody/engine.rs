//! Document custody engine
//!
//! Orchestrates the document lifecycle: upload (validate, encrypt,
//! persist, mark pending), view (load, decrypt), and verification (the
//! admin-only state transition). Role gating happens in front of these
//! operations (see [`crate::state`]); the engine trusts the identity it is
//! handed.

use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::gate::Identity;
use crate::crypto::at_rest::{EncryptionAtRest, ENCRYPTION_SCHEME};
use crate::crypto::marker::{generate_auxiliary_key, integrity_marker};
use crate::custody::artifacts::{display_name, unique_storage_name, ArtifactStore};
use crate::db::schemas::{DocType, DocumentSlot, UserRecord, UserSummary};
use crate::db::store::UserStore;
use crate::types::{CustodyError, Result};

/// Result of a successful upload.
#[derive(Debug, Clone, Serialize)]
pub struct UploadOutcome {
    pub doc_type: DocType,
    pub status: &'static str,
}

/// Decrypted document plus a display filename.
#[derive(Debug, Clone)]
pub struct DocumentView {
    pub bytes: Vec<u8>,
    pub file_name: String,
}

/// The caller's own document slots.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentStatus {
    pub documents: BTreeMap<DocType, DocumentSlot>,
}

pub struct CustodyEngine {
    users: Arc<dyn UserStore>,
    artifacts: ArtifactStore,
    cipher: EncryptionAtRest,
}

impl CustodyEngine {
    pub fn new(users: Arc<dyn UserStore>, artifacts: ArtifactStore, cipher: EncryptionAtRest) -> Self {
        Self {
            users,
            artifacts,
            cipher,
        }
    }

    /// Upload a document into the caller's slot for `doc_type`.
    ///
    /// Writes in the order ciphertext-then-slot: if the slot update fails,
    /// the orphaned file is never referenced by the stored metadata.
    /// Re-upload overwrites the slot and resets `verified`.
    pub async fn upload(
        &self,
        identity: &Identity,
        doc_type: &str,
        file_bytes: &[u8],
        file_name: &str,
    ) -> Result<UploadOutcome> {
        let doc_type: DocType = doc_type.parse()?;

        let user = self.require_user(identity).await?;

        if file_bytes.is_empty() {
            return Err(CustodyError::FileRequired);
        }

        let storage_name = unique_storage_name(file_name);
        let ciphertext = self.cipher.encrypt(file_bytes)?;
        let path = self.artifacts.store(&storage_name, &ciphertext).await?;

        let slot = DocumentSlot {
            uploaded: true,
            verified: false,
            path: Some(path.to_string_lossy().into_owned()),
            encryption: Some(ENCRYPTION_SCHEME.to_string()),
            pqc_marker: Some(integrity_marker(&ciphertext)),
            quantum_key: Some(generate_auxiliary_key()),
        };

        self.users.update_slot(user.id, doc_type, slot).await?;

        info!(user = %user.id, doc_type = %doc_type, size = file_bytes.len(), "Document uploaded");

        Ok(UploadOutcome {
            doc_type,
            status: "pending_verification",
        })
    }

    /// Decrypt and return the caller's own document for `doc_type`.
    pub async fn view(&self, identity: &Identity, doc_type: &str) -> Result<DocumentView> {
        let doc_type: DocType = doc_type.parse()?;

        let user = self.require_user(identity).await?;

        let slot = user.documents.get(&doc_type);
        let slot = match slot {
            Some(s) if s.uploaded => s,
            _ => return Err(CustodyError::NotUploaded(doc_type)),
        };

        let path = slot
            .path
            .clone()
            .ok_or_else(|| CustodyError::StorageMissing {
                path: String::new(),
            })?;

        let ciphertext = match self.artifacts.load(&path).await? {
            Some(bytes) => bytes,
            None => {
                warn!(user = %user.id, doc_type = %doc_type, path = %path,
                    "Slot metadata references missing artifact");
                return Err(CustodyError::StorageMissing { path });
            }
        };

        let bytes = self.cipher.decrypt(&ciphertext)?;

        Ok(DocumentView {
            bytes,
            file_name: display_name(&path),
        })
    }

    /// Mark a user's document verified. Admin-gated by the caller.
    ///
    /// Idempotent: verifying an already-verified slot succeeds. A slot
    /// with no upload, or an unknown user, fails uniformly with
    /// `VerificationFailed`.
    pub async fn verify(&self, target_user_id: &str, doc_type: &str) -> Result<()> {
        let doc_type: DocType = doc_type.parse()?;

        if target_user_id.trim().is_empty() {
            return Err(CustodyError::UserIdRequired);
        }

        let Ok(user_id) = Uuid::parse_str(target_user_id) else {
            return Err(CustodyError::VerificationFailed);
        };

        if !self.users.mark_verified(user_id, doc_type).await? {
            return Err(CustodyError::VerificationFailed);
        }

        info!(user = %user_id, doc_type = %doc_type, "Document verified");
        Ok(())
    }

    /// All enrolled users, password hash excluded. Admin-gated by the
    /// caller.
    pub async fn list_users(&self) -> Result<Vec<UserSummary>> {
        let users = self.users.list().await?;
        Ok(users.iter().map(UserSummary::from).collect())
    }

    /// The caller's own document slots.
    pub async fn document_status(&self, identity: &Identity) -> Result<DocumentStatus> {
        let user = self.require_user(identity).await?;
        Ok(DocumentStatus {
            documents: user.documents,
        })
    }

    async fn require_user(&self, identity: &Identity) -> Result<UserRecord> {
        let Ok(user_id) = Uuid::parse_str(&identity.user_id) else {
            warn!(user = %identity.user_id, "Authenticated identity is not a valid user id");
            return Err(CustodyError::NotFound(format!("user {}", identity.user_id)));
        };

        match self.users.find_by_id(user_id).await? {
            Some(user) => Ok(user),
            None => {
                // Should not occur for an authenticated identity; treat as
                // an integrity fault worth flagging.
                warn!(user = %user_id, "Authenticated identity has no user record");
                Err(CustodyError::NotFound(format!("user {user_id}")))
            }
        }
    }
}
