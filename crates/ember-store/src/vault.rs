//! The vault: everything a caller can do with a drop.
//!
//! Create, inspect, retrieve, and the sweep all live here. The vault owns
//! the ordering rules the store itself cannot express: validation before
//! crypto, key stretching outside any store access, open before burn, and
//! blob cleanup in the same logical operation as record removal.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use ember_crypto::{derive_key, generate_salt, open, seal, KeyMaterial, SealedPayload, SecretKey};
use ember_types::{DropId, DropKind, DropMeta};

use crate::blob::BlobSink;
use crate::error::VaultError;
use crate::record::{DropRecord, Payload};
use crate::retention;
use crate::traits::DropStore;

/// Content for a new drop.
#[derive(Clone, Debug)]
pub enum CreateContent {
    Text {
        body: String,
        markdown: bool,
    },
    File {
        filename: String,
        mime: String,
        bytes: Vec<u8>,
    },
}

/// Everything needed to create a drop.
#[derive(Clone, Debug)]
pub struct CreateRequest {
    pub content: CreateContent,
    /// Minutes until expiry; zero or negative means the drop never
    /// expires by time.
    pub ttl_minutes: i64,
    pub burn_after_read: bool,
    /// An empty password is treated as no password.
    pub password: Option<String>,
}

/// Pre-retrieval metadata. No plaintext, no key material.
#[derive(Clone, Debug)]
pub struct DropPreview {
    pub kind: DropKind,
    pub has_password: bool,
    pub burn_after_read: bool,
    pub meta: DropMeta,
}

/// A successfully retrieved drop.
#[derive(Clone, Debug)]
pub enum RetrievedDrop {
    Text {
        body: String,
        markdown: bool,
    },
    File {
        bytes: Vec<u8>,
        filename: String,
        mime: String,
    },
}

/// Encrypted ephemeral drop storage with expiry and burn-after-read.
pub struct DropVault {
    store: Arc<dyn DropStore>,
    sink: Arc<dyn BlobSink>,
}

impl DropVault {
    pub fn new(store: Arc<dyn DropStore>, sink: Arc<dyn BlobSink>) -> Self {
        Self { store, sink }
    }

    /// Seal and store a new drop, returning its id.
    ///
    /// Input validation happens before any cryptographic work or store
    /// mutation. Key stretching for password-protected drops runs here,
    /// with no store lock held.
    pub fn create(&self, req: CreateRequest) -> Result<DropId, VaultError> {
        match &req.content {
            CreateContent::Text { body, .. } if body.is_empty() => {
                return Err(VaultError::InvalidInput("content is required".into()));
            }
            CreateContent::File { bytes, .. } if bytes.is_empty() => {
                return Err(VaultError::InvalidInput("file is required".into()));
            }
            CreateContent::File { filename, .. } if filename.is_empty() => {
                return Err(VaultError::InvalidInput("filename is required".into()));
            }
            _ => {}
        }

        let now = Utc::now();
        let expires_at = retention::compute_expiry(now, req.ttl_minutes);

        let (key, material) = match req.password.as_deref().filter(|p| !p.is_empty()) {
            Some(password) => {
                let salt = generate_salt();
                let key = derive_key(password.as_bytes(), &salt)?;
                (key, KeyMaterial::Derived { salt })
            }
            None => {
                let key = SecretKey::generate();
                (key.clone(), KeyMaterial::Embedded(key))
            }
        };

        match req.content {
            CreateContent::Text { body, markdown } => {
                let sealed = seal(&key, body.as_bytes())?;
                let record = DropRecord::text(
                    sealed,
                    material,
                    markdown,
                    req.burn_after_read,
                    now,
                    expires_at,
                );
                let id = self.store.insert(record);
                tracing::debug!(id = %id.short(), "stored text drop");
                Ok(id)
            }
            CreateContent::File {
                filename,
                mime,
                bytes,
            } => {
                let size = bytes.len() as u64;
                let sealed = seal(&key, &bytes)?;
                let record = DropRecord::file(
                    sealed.encrypted_len(),
                    material,
                    filename,
                    mime,
                    size,
                    req.burn_after_read,
                    now,
                    expires_at,
                );
                let id = self.store.insert(record);
                if let Err(e) = self.sink.write(&id, &sealed.to_bytes()) {
                    tracing::error!(id = %id.short(), error = %e, "blob write failed, removing record");
                    self.store.delete(&id);
                    return Err(e.into());
                }
                tracing::debug!(id = %id.short(), size, "stored file drop");
                Ok(id)
            }
        }
    }

    /// Metadata for the preview screen. Never decrypts anything.
    pub fn inspect(&self, id: &DropId) -> Result<DropPreview, VaultError> {
        let record = self.lookup_live(id)?;
        Ok(DropPreview {
            kind: record.kind(),
            has_password: record.has_password(),
            burn_after_read: record.burn_after_read,
            meta: record.meta,
        })
    }

    /// Retrieve and decrypt a drop.
    ///
    /// For burn-after-read drops the record is claimed with an atomic
    /// `consume` only after a successful open, so a wrong password never
    /// burns the drop, and of N concurrent correct retrievals exactly one
    /// returns plaintext while the rest observe `NotFound`.
    pub fn retrieve(
        &self,
        id: &DropId,
        password: Option<&str>,
    ) -> Result<RetrievedDrop, VaultError> {
        let record = self.lookup_live(id)?;

        // Key stretching runs on a clone of the record, outside any lock.
        let key = match &record.key {
            KeyMaterial::Embedded(key) => key.clone(),
            KeyMaterial::Derived { salt } => {
                let password = password
                    .filter(|p| !p.is_empty())
                    .ok_or(VaultError::PasswordRequired)?;
                derive_key(password.as_bytes(), salt)?
            }
        };

        let sealed = match &record.payload {
            Payload::Inline(sealed) => sealed.clone(),
            Payload::Blob { .. } => {
                let bytes = match self.sink.read(id) {
                    Ok(bytes) => bytes,
                    Err(e) => {
                        // A concurrent eviction may have won the race
                        // between our lookup and this read.
                        if self.store.lookup(id).is_none() {
                            return Err(VaultError::NotFound);
                        }
                        tracing::error!(id = %id.short(), error = %e, "failed to read sealed blob");
                        return Err(e.into());
                    }
                };
                SealedPayload::from_bytes(&bytes)?
            }
        };

        let plaintext = open(&key, &sealed)?;

        if record.burn_after_read {
            if self.store.consume(id).is_none() {
                // Another retrieval claimed the drop first.
                return Err(VaultError::NotFound);
            }
            if record.payload.is_blob() {
                self.sink.remove(id);
            }
            tracing::info!(id = %id.short(), "drop burned after read");
        }

        match record.meta {
            DropMeta::Text { markdown } => {
                let body = String::from_utf8(plaintext)
                    .map_err(|e| VaultError::Internal(e.to_string()))?;
                Ok(RetrievedDrop::Text { body, markdown })
            }
            DropMeta::File { filename, mime, .. } => Ok(RetrievedDrop::File {
                bytes: plaintext,
                filename,
                mime,
            }),
        }
    }

    /// Evict every drop expired at `now`, deleting backing blobs.
    /// Returns the number of drops evicted.
    pub fn sweep(&self, now: DateTime<Utc>) -> usize {
        let evicted = self.store.evict_expired(now);
        for (id, record) in &evicted {
            if record.payload.is_blob() {
                self.sink.remove(id);
            }
            tracing::debug!(id = %id.short(), "evicted expired drop");
        }
        evicted.len()
    }

    /// Look up a record and apply expiry. Expired records are removed
    /// (record and blob) on access, so expiry does not wait for the next
    /// sweep and an expired drop is indistinguishable from an unknown id.
    fn lookup_live(&self, id: &DropId) -> Result<DropRecord, VaultError> {
        let record = self.store.lookup(id).ok_or(VaultError::NotFound)?;
        if !retention::is_live(record.expires_at, Utc::now()) {
            if self.store.delete(id) && record.payload.is_blob() {
                self.sink.remove(id);
            }
            tracing::debug!(id = %id.short(), "removed expired drop on access");
            return Err(VaultError::NotFound);
        }
        Ok(record)
    }
}
