//! Credential store for Strongroom
//!
//! An abstract document store with point lookups and per-slot field
//! updates. The [`store::UserStore`] trait is the persistence seam;
//! [`store::MemoryStore`] is the in-process implementation used for tests
//! and development. A backing database driver plugs in behind the same
//! trait.

pub mod schemas;
pub mod store;

pub use schemas::{DocType, DocumentSlot, NewUser, UserRecord, UserSummary};
pub use store::{MemoryStore, UserStore};
