//! User record and document slot schemas
//!
//! The persisted shape consumed and produced by the custody core. One user
//! record per enrolled identity; one document slot per (user, document
//! type).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::auth::role::Role;
use crate::types::CustodyError;

/// Document types a user may enroll.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum DocType {
    #[serde(rename = "primary-id")]
    PrimaryId,
    #[serde(rename = "tax-id")]
    TaxId,
    #[serde(rename = "passport")]
    Passport,
}

impl DocType {
    pub const ALL: [DocType; 3] = [DocType::PrimaryId, DocType::TaxId, DocType::Passport];

    pub fn as_str(&self) -> &'static str {
        match self {
            DocType::PrimaryId => "primary-id",
            DocType::TaxId => "tax-id",
            DocType::Passport => "passport",
        }
    }
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DocType {
    type Err = CustodyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "primary-id" => Ok(DocType::PrimaryId),
            "tax-id" => Ok(DocType::TaxId),
            "passport" => Ok(DocType::Passport),
            other => Err(CustodyError::InvalidDocType(other.to_string())),
        }
    }
}

/// Per-document-type custody state.
///
/// Lifecycle: initialized empty at enrollment, mutated by upload (sets
/// `uploaded`, clears `verified`) and verify (sets `verified`). Invariant:
/// `verified == true` implies `uploaded == true`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentSlot {
    pub uploaded: bool,
    pub verified: bool,
    /// Opaque storage locator, null until uploaded
    pub path: Option<String>,
    /// At-rest encryption scheme tag
    pub encryption: Option<String>,
    /// Auxiliary ciphertext fingerprint; write-only metadata
    pub pqc_marker: Option<String>,
    /// Auxiliary high-entropy token; write-only metadata
    pub quantum_key: Option<String>,
}

/// Enrollment input for a new user record.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub national_id: String,
    pub password_hash: String,
    pub role: Role,
}

/// Persisted user record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub national_id: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub documents: BTreeMap<DocType, DocumentSlot>,
}

impl UserRecord {
    /// Create a record with every document slot initialized empty.
    pub fn new(input: NewUser) -> Self {
        let documents = DocType::ALL
            .iter()
            .map(|doc_type| (*doc_type, DocumentSlot::default()))
            .collect();

        Self {
            id: Uuid::new_v4(),
            full_name: input.full_name,
            email: input.email,
            phone: input.phone,
            national_id: input.national_id,
            password_hash: input.password_hash,
            role: input.role,
            created_at: Utc::now(),
            documents,
        }
    }
}

/// User projection with the password hash structurally excluded.
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub national_id: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub documents: BTreeMap<DocType, DocumentSlot>,
}

impl From<&UserRecord> for UserSummary {
    fn from(user: &UserRecord) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            national_id: user.national_id.clone(),
            role: user.role,
            created_at: user.created_at,
            documents: user.documents.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user() -> NewUser {
        NewUser {
            full_name: "Asha Rao".into(),
            email: "asha@example.com".into(),
            phone: "5550100".into(),
            national_id: "AAA1".into(),
            password_hash: "$argon2id$fake".into(),
            role: Role::User,
        }
    }

    #[test]
    fn test_doc_type_parse_and_display() {
        assert_eq!("passport".parse::<DocType>().unwrap(), DocType::Passport);
        assert_eq!("primary-id".parse::<DocType>().unwrap(), DocType::PrimaryId);
        assert_eq!(DocType::TaxId.to_string(), "tax-id");

        let err = "voter-card".parse::<DocType>().unwrap_err();
        assert!(matches!(err, CustodyError::InvalidDocType(_)));
    }

    #[test]
    fn test_new_record_has_empty_slots() {
        let user = UserRecord::new(new_user());
        assert_eq!(user.documents.len(), 3);

        for slot in user.documents.values() {
            assert!(!slot.uploaded);
            assert!(!slot.verified);
            assert!(slot.path.is_none());
            assert!(slot.pqc_marker.is_none());
            assert!(slot.quantum_key.is_none());
        }
    }

    #[test]
    fn test_summary_excludes_password_hash() {
        let user = UserRecord::new(new_user());
        let summary = UserSummary::from(&user);

        let json = serde_json::to_value(&summary).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["national_id"], "AAA1");
        // Doc types serialize as the wire names
        assert!(json["documents"].get("primary-id").is_some());
        assert!(json["documents"].get("tax-id").is_some());
        assert!(json["documents"].get("passport").is_some());
    }
}
