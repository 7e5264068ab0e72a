//! Durable bytes-on-disk for file drops.
//!
//! Each file drop's sealed payload is written to `{root}/{id}.sealed`,
//! where the name is the compact hex form of the drop id. The bytes on
//! disk are the `nonce || tag || ciphertext` framing and are unreadable
//! without the key, which is never written anywhere near them.

use std::io::Write;
use std::path::{Path, PathBuf};

use ember_types::DropId;

use crate::error::{StoreError, StoreResult};

/// Storage for sealed file payloads, keyed by drop id.
pub trait BlobSink: Send + Sync {
    /// Persist sealed bytes for `id`. Must not leave a partially-written
    /// blob visible under the final name.
    fn write(&self, id: &DropId, data: &[u8]) -> StoreResult<()>;

    /// Read the sealed bytes for `id`.
    fn read(&self, id: &DropId) -> StoreResult<Vec<u8>>;

    /// Best-effort removal. A missing file or an I/O failure is logged
    /// and swallowed; the in-memory record removal is the authoritative
    /// state.
    fn remove(&self, id: &DropId);
}

/// Filesystem-backed blob sink rooted at a data directory.
pub struct FsBlobSink {
    root: PathBuf,
}

impl FsBlobSink {
    /// Open (and create if needed) a sink rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// The on-disk path for a drop's sealed payload.
    pub fn blob_path(&self, id: &DropId) -> PathBuf {
        self.root.join(format!("{}.sealed", id.to_simple()))
    }

    /// The sink's root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl BlobSink for FsBlobSink {
    fn write(&self, id: &DropId, data: &[u8]) -> StoreResult<()> {
        // Write to a temp file in the same directory, then rename into
        // place so readers never observe a partial blob.
        let mut tmp = tempfile::NamedTempFile::new_in(&self.root)?;
        tmp.write_all(data)?;
        tmp.persist(self.blob_path(id))
            .map_err(|e| StoreError::Io(e.error))?;
        tracing::debug!(id = %id.short(), bytes = data.len(), "wrote sealed blob");
        Ok(())
    }

    fn read(&self, id: &DropId) -> StoreResult<Vec<u8>> {
        Ok(std::fs::read(self.blob_path(id))?)
    }

    fn remove(&self, id: &DropId) {
        let path = self.blob_path(id);
        match std::fs::remove_file(&path) {
            Ok(()) => tracing::debug!(id = %id.short(), "removed sealed blob"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(id = %id.short(), error = %e, "failed to remove sealed blob");
            }
        }
    }
}
