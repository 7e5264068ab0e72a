//! Shared types for the Ember content drop.
//!
//! Everything a drop is addressed and described by lives here: the random
//! [`DropId`] handed back to uploaders, the [`DropKind`] tag, and the
//! kind-specific [`DropMeta`] that retrieval previews expose. Payload and
//! key material types live in `ember-crypto` and `ember-store`; this crate
//! stays dependency-light so every other crate can use it.

pub mod error;
pub mod id;
pub mod meta;

pub use error::TypeError;
pub use id::DropId;
pub use meta::{DropKind, DropMeta};
