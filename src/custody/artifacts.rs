//! Encrypted artifact storage
//!
//! Stores ciphertext blobs in a local directory. Storage names carry a
//! random UUID prefix ahead of the sanitized original filename, which
//! prevents both path traversal and overwrite collisions between users.

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};
use uuid::Uuid;

use crate::types::Result;

/// On-disk store for encrypted document artifacts.
pub struct ArtifactStore {
    root_dir: PathBuf,
}

impl ArtifactStore {
    /// Create a store rooted at `root_dir`, creating the directory if
    /// needed.
    pub async fn new<P: AsRef<Path>>(root_dir: P) -> Result<Self> {
        let root_dir = root_dir.as_ref().to_path_buf();
        fs::create_dir_all(&root_dir).await?;

        info!(path = %root_dir.display(), "Initialized artifact store");

        Ok(Self { root_dir })
    }

    /// Write ciphertext under `storage_name`, returning the full path.
    /// Overwrites any existing artifact at the same name.
    pub async fn store(&self, storage_name: &str, ciphertext: &[u8]) -> Result<PathBuf> {
        let path = self.root_dir.join(storage_name);
        fs::write(&path, ciphertext).await?;

        debug!(path = %path.display(), size = ciphertext.len(), "Stored artifact");

        Ok(path)
    }

    /// Read an artifact back. Returns `None` when no bytes exist at the
    /// path, so callers can surface metadata/storage inconsistency
    /// distinctly from IO faults.
    pub async fn load(&self, path: &str) -> Result<Option<Vec<u8>>> {
        match fs::read(path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Build a collision-resistant storage name: `<uuid>_<sanitized original>`.
pub fn unique_storage_name(original: &str) -> String {
    format!("{}_{}", Uuid::new_v4(), sanitize_file_name(original))
}

/// Reduce a client-supplied filename to a safe single path component.
///
/// Keeps ASCII alphanumerics, `.`, `_`, and `-`; everything else becomes
/// `_`. Directory components and leading dots are stripped.
pub fn sanitize_file_name(name: &str) -> String {
    let base = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();

    let cleaned = cleaned.trim_start_matches('.').to_string();
    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned
    }
}

/// Recover a display filename from a stored path, stripping the UUID
/// disambiguation prefix. Display only; the stored name is unchanged.
pub fn display_name(path: &str) -> String {
    let file_name = Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "file".to_string());

    match file_name.split_once('_') {
        Some((prefix, rest)) if Uuid::parse_str(prefix).is_ok() && !rest.is_empty() => {
            rest.to_string()
        }
        _ => file_name,
    }
}
