//! Credential store seam and in-memory implementation
//!
//! Point lookups and per-slot updates only; no query language. Each
//! operation is atomic with respect to a single user record, but nothing
//! is transactional across records.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::db::schemas::{DocType, DocumentSlot, NewUser, UserRecord};
use crate::types::{CustodyError, Result};

/// Abstract persistent mapping from user id to user record.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user. Fails with `DuplicateEnrollment` if the email or
    /// national id is already taken.
    async fn insert(&self, user: NewUser) -> Result<UserRecord>;

    /// Point lookup by user id.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>>;

    /// Point lookup by login identifier (email or national id).
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<UserRecord>>;

    /// Atomically replace one document slot. Fails with `NotFound` if the
    /// user record does not exist.
    async fn update_slot(&self, id: Uuid, doc_type: DocType, slot: DocumentSlot) -> Result<()>;

    /// Conditionally set `verified = true` on a slot. Returns `true` when
    /// the update matched (user exists and the slot has an upload),
    /// `false` otherwise. Idempotent: an already-verified slot matches.
    async fn mark_verified(&self, id: Uuid, doc_type: DocType) -> Result<bool>;

    /// All user records, ordered by enrollment time.
    async fn list(&self) -> Result<Vec<UserRecord>>;
}

/// In-memory credential store backed by a `RwLock`ed map.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<Uuid, UserRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert(&self, user: NewUser) -> Result<UserRecord> {
        let mut users = self.users.write().await;

        let taken = users
            .values()
            .any(|u| u.email == user.email || u.national_id == user.national_id);
        if taken {
            return Err(CustodyError::DuplicateEnrollment);
        }

        let record = UserRecord::new(user);
        users.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<UserRecord>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == identifier || u.national_id == identifier)
            .cloned())
    }

    async fn update_slot(&self, id: Uuid, doc_type: DocType, slot: DocumentSlot) -> Result<()> {
        let mut users = self.users.write().await;

        let user = users
            .get_mut(&id)
            .ok_or_else(|| CustodyError::NotFound(format!("user {id}")))?;

        user.documents.insert(doc_type, slot);
        Ok(())
    }

    async fn mark_verified(&self, id: Uuid, doc_type: DocType) -> Result<bool> {
        let mut users = self.users.write().await;

        let Some(user) = users.get_mut(&id) else {
            return Ok(false);
        };
        let Some(slot) = user.documents.get_mut(&doc_type) else {
            return Ok(false);
        };

        // verified implies uploaded; an empty slot never matches
        if !slot.uploaded {
            return Ok(false);
        }

        slot.verified = true;
        Ok(true)
    }

    async fn list(&self) -> Result<Vec<UserRecord>> {
        let users = self.users.read().await;
        let mut all: Vec<UserRecord> = users.values().cloned().collect();
        all.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(all)
    }
}
