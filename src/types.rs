//! Error types for Strongroom
//!
//! Every failure surfaced to the transport layer carries a stable wire code
//! (the `code` field of [`ErrorBody`]); the message wording is not
//! contractual. Server faults (storage inconsistency, unexpected IO) are
//! distinguished from client-caused errors so monitoring can alert on the
//! former.

use serde::Serialize;
use thiserror::Error;

use crate::db::schemas::DocType;

pub type Result<T> = std::result::Result<T, CustodyError>;

#[derive(Error, Debug)]
pub enum CustodyError {
    /// No bearer credential in the request, or a malformed authorization
    /// header.
    #[error("Token missing")]
    AuthMissing,

    /// Signature mismatch, malformed token, expired token, or bad login
    /// credentials.
    #[error("Invalid or expired token")]
    AuthInvalidOrExpired,

    /// Valid token, wrong role.
    #[error("Access denied")]
    AccessDenied,

    #[error("Invalid document type: {0}")]
    InvalidDocType(String),

    #[error("File required")]
    FileRequired,

    #[error("User ID required")]
    UserIdRequired,

    #[error("Missing required fields: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// The slot exists but nothing has been uploaded to it. Distinct from
    /// [`CustodyError::NotFound`] by design.
    #[error("Document not uploaded: {0}")]
    NotUploaded(DocType),

    /// Slot metadata references a storage path with no bytes behind it.
    #[error("Stored artifact missing at {path}")]
    StorageMissing { path: String },

    /// Ciphertext did not authenticate under the service key: corruption,
    /// truncation, or key mismatch. Never masked as `NotFound`.
    #[error("Decryption failed")]
    DecryptionFailed,

    #[error("User already enrolled")]
    DuplicateEnrollment,

    /// Verify matched zero records: unknown user, or a slot that was never
    /// uploaded.
    #[error("Verification failed")]
    VerificationFailed,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CustodyError {
    /// Stable wire code for the transport layer. Contractual, unlike the
    /// display message.
    pub fn code(&self) -> &'static str {
        match self {
            CustodyError::AuthMissing => "AUTH_MISSING",
            CustodyError::AuthInvalidOrExpired => "AUTH_INVALID",
            CustodyError::AccessDenied => "ACCESS_DENIED",
            CustodyError::InvalidDocType(_) => "INVALID_DOC_TYPE",
            CustodyError::FileRequired => "FILE_REQUIRED",
            CustodyError::UserIdRequired => "USER_ID_REQUIRED",
            CustodyError::Validation(_) => "VALIDATION_ERROR",
            CustodyError::NotFound(_) => "NOT_FOUND",
            CustodyError::NotUploaded(_) => "NOT_UPLOADED",
            CustodyError::StorageMissing { .. } => "STORAGE_MISSING",
            CustodyError::DecryptionFailed => "DECRYPTION_FAILED",
            CustodyError::DuplicateEnrollment => "DUPLICATE_ENROLLMENT",
            CustodyError::VerificationFailed => "VERIFICATION_FAILED",
            CustodyError::Io(_) => "INTERNAL_FAULT",
            CustodyError::Internal(_) => "INTERNAL_FAULT",
        }
    }

    /// True for conditions that indicate a fault on our side (5xx
    /// equivalent) rather than a client mistake.
    pub fn is_server_fault(&self) -> bool {
        matches!(
            self,
            CustodyError::StorageMissing { .. }
                | CustodyError::Io(_)
                | CustodyError::Internal(_)
        )
    }

    /// Wire shape consumed by the transport layer.
    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            message: self.to_string(),
            code: self.code().to_string(),
        }
    }
}

/// `{message, code}` pair returned to the (external) transport layer.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub message: String,
    pub code: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(CustodyError::AuthMissing.code(), "AUTH_MISSING");
        assert_eq!(CustodyError::DecryptionFailed.code(), "DECRYPTION_FAILED");
        assert_eq!(
            CustodyError::NotUploaded(DocType::Passport).code(),
            "NOT_UPLOADED"
        );
        assert_eq!(
            CustodyError::InvalidDocType("voter-card".into()).code(),
            "INVALID_DOC_TYPE"
        );
    }

    #[test]
    fn test_server_fault_classification() {
        assert!(CustodyError::StorageMissing { path: "x".into() }.is_server_fault());
        assert!(CustodyError::Internal("boom".into()).is_server_fault());
        assert!(!CustodyError::DecryptionFailed.is_server_fault());
        assert!(!CustodyError::AccessDenied.is_server_fault());
        assert!(!CustodyError::NotFound("user".into()).is_server_fault());
    }

    #[test]
    fn test_error_body_shape() {
        let body = CustodyError::FileRequired.to_body();
        assert_eq!(body.code, "FILE_REQUIRED");
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("message").is_some());
        assert!(json.get("code").is_some());
    }
}
