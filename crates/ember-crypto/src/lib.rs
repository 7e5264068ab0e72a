//! Cryptographic primitives for the Ember content drop.
//!
//! Provides AES-256-GCM seal/open with a detached authentication tag,
//! Argon2id password key stretching with per-drop salts, and zeroized
//! secret key handling.
//!
//! All crypto operations wrap established libraries; no custom
//! cryptography.

pub mod error;
pub mod key;
pub mod sealed;

pub use error::CryptoError;
pub use key::{derive_key, generate_salt, KeyMaterial, SecretKey, KEY_LEN, SALT_LEN};
pub use sealed::{open, seal, SealedPayload, NONCE_LEN, TAG_LEN};
