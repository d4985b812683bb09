//! Content-addressed photo storage.
//!
//! The core treats photos as opaque references. [`AttachmentStore::put`]
//! copies a file into the store under the SHA-256 of its contents, so the
//! same photo always resolves to the same blob and re-attaching is
//! harmless.

use std::path::{Path, PathBuf};
use std::{fs, io};

use sha2::{Digest, Sha256};

use crate::model::PhotoRef;

#[derive(Debug, thiserror::Error)]
pub enum AttachmentError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Blob store under `<root>/attachments/`.
pub struct AttachmentStore {
    dir: PathBuf,
}

impl AttachmentStore {
    /// Opens the store under the given storage root, creating the
    /// directory if needed.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, AttachmentError> {
        let dir = root.into().join("attachments");
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Store a file's contents, returning its content-addressed reference.
    pub fn put(&self, path: &Path) -> Result<PhotoRef, AttachmentError> {
        let bytes = fs::read(path)?;
        let digest = hex::encode(Sha256::digest(&bytes));
        let dest = self.dir.join(&digest);
        if !dest.exists() {
            fs::write(&dest, &bytes)?;
        }
        Ok(PhotoRef(digest))
    }

    /// The on-disk path for a stored reference.
    #[must_use]
    pub fn path_of(&self, photo: &PhotoRef) -> PathBuf {
        self.dir.join(&photo.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    #[test]
    fn same_content_yields_the_same_reference() {
        let dir = TempDir::new().unwrap();
        let store = AttachmentStore::new(dir.path()).unwrap();

        let a = dir.path().join("a.jpg");
        let b = dir.path().join("b.jpg");
        fs::write(&a, b"pixels").unwrap();
        fs::write(&b, b"pixels").unwrap();

        assert_eq!(store.put(&a).unwrap(), store.put(&b).unwrap());
    }

    #[test]
    fn stored_blob_is_readable_via_its_reference() {
        let dir = TempDir::new().unwrap();
        let store = AttachmentStore::new(dir.path()).unwrap();

        let photo = dir.path().join("prop-damage.jpg");
        fs::write(&photo, b"bent blade").unwrap();

        let reference = store.put(&photo).unwrap();
        let blob = store.path_of(&reference);
        assert_eq!(fs::read(blob).unwrap(), b"bent blade");
    }

    #[test]
    fn different_content_gets_a_different_reference() {
        let dir = TempDir::new().unwrap();
        let store = AttachmentStore::new(dir.path()).unwrap();

        let a = dir.path().join("a.jpg");
        let b = dir.path().join("b.jpg");
        fs::write(&a, b"one").unwrap();
        fs::write(&b, b"two").unwrap();

        assert_ne!(store.put(&a).unwrap(), store.put(&b).unwrap());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let store = AttachmentStore::new(dir.path()).unwrap();
        let err = store.put(&dir.path().join("nope.jpg")).unwrap_err();
        assert!(matches!(err, AttachmentError::Io(_)));
    }
}
