//! Document custody: artifact storage and the lifecycle engine
//!
//! State machine per document slot:
//! `EMPTY -> PENDING (upload) -> VERIFIED (admin verify)`, with re-upload
//! returning a verified slot to pending.

pub mod artifacts;
pub mod engine;

pub use artifacts::ArtifactStore;
pub use engine::{CustodyEngine, DocumentStatus, DocumentView, UploadOutcome};
