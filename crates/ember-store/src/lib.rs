//! Encrypted ephemeral object storage for the Ember content drop.
//!
//! This crate is the core of the service: a concurrent map from random
//! [`DropId`]s to sealed [`DropRecord`]s, wrapped by a [`DropVault`] that
//! enforces expiry, password gating, and burn-after-read semantics.
//!
//! # Design Rules
//!
//! 1. Records are immutable once inserted; the only mutations are removals
//!    (consume, lazy expiry, sweep).
//! 2. `consume` is a single atomic check-and-remove: of N concurrent
//!    retrievals racing on one burn-after-read drop, exactly one wins.
//! 3. Expired or consumed ciphertext is deleted, not unlisted. Removing a
//!    file-kind record always removes its backing blob in the same logical
//!    operation.
//! 4. The in-memory map is authoritative; blob deletion failures are
//!    logged and swallowed, never allowed to abort a store-level delete.
//! 5. No store lock is ever held across key stretching or blob I/O.
//! 6. Expired drops are indistinguishable from drops that never existed.
//!
//! [`DropId`]: ember_types::DropId

pub mod blob;
pub mod error;
pub mod memory;
pub mod record;
pub mod retention;
pub mod sweep;
pub mod traits;
pub mod vault;

// Re-export primary types at crate root for ergonomic imports.
pub use blob::{BlobSink, FsBlobSink};
pub use error::{StoreError, StoreResult, VaultError};
pub use memory::MemoryDropStore;
pub use record::{DropRecord, Payload};
pub use sweep::spawn_sweeper;
pub use traits::DropStore;
pub use vault::{CreateContent, CreateRequest, DropPreview, DropVault, RetrievedDrop};
