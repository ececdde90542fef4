//! Role set for access control
//!
//! A closed enum rather than free-form strings: invalid roles are
//! unrepresentable, both in tokens and in stored user records.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Normal enrolled user: may upload and view their own documents.
    #[default]
    User,
    /// May verify documents and list users in addition to user operations.
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Admin => write!(f, "admin"),
        }
    }
}
