use chrono::{DateTime, Utc};

use ember_crypto::{KeyMaterial, SealedPayload};
use ember_types::{DropKind, DropMeta};

/// Where a record's ciphertext lives.
///
/// Text drops carry their sealed bytes inline; file drops keep only the
/// encrypted length here, with the sealed bytes on disk at a path derived
/// from the drop id. The enum guarantees a record never has both.
#[derive(Clone, Debug)]
pub enum Payload {
    /// Sealed bytes held in the record itself.
    Inline(SealedPayload),
    /// Sealed bytes held by the blob sink; `encrypted_len` is the size of
    /// the on-disk framing.
    Blob { encrypted_len: u64 },
}

impl Payload {
    /// Whether this payload is backed by a blob file.
    pub fn is_blob(&self) -> bool {
        matches!(self, Self::Blob { .. })
    }
}

/// One stored drop. Owned exclusively by the store once inserted; never
/// updated in place, only removed.
#[derive(Clone, Debug)]
pub struct DropRecord {
    pub payload: Payload,
    pub key: KeyMaterial,
    pub burn_after_read: bool,
    pub created_at: DateTime<Utc>,
    /// `None` means the drop never expires by time.
    pub expires_at: Option<DateTime<Utc>>,
    pub meta: DropMeta,
}

impl DropRecord {
    /// Build a text record with inline sealed content.
    pub fn text(
        sealed: SealedPayload,
        key: KeyMaterial,
        markdown: bool,
        burn_after_read: bool,
        created_at: DateTime<Utc>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            payload: Payload::Inline(sealed),
            key,
            burn_after_read,
            created_at,
            expires_at,
            meta: DropMeta::Text { markdown },
        }
    }

    /// Build a file record whose sealed content lives in the blob sink.
    #[allow(clippy::too_many_arguments)]
    pub fn file(
        encrypted_len: u64,
        key: KeyMaterial,
        filename: String,
        mime: String,
        size: u64,
        burn_after_read: bool,
        created_at: DateTime<Utc>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            payload: Payload::Blob { encrypted_len },
            key,
            burn_after_read,
            created_at,
            expires_at,
            meta: DropMeta::File {
                filename,
                mime,
                size,
            },
        }
    }

    /// The kind tag of this record.
    pub fn kind(&self) -> DropKind {
        self.meta.kind()
    }

    /// Whether retrieval requires a caller-supplied password.
    pub fn has_password(&self) -> bool {
        self.key.has_password()
    }
}
