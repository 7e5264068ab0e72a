use thiserror::Error;

/// Errors from cryptographic operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// AEAD encryption failed.
    #[error("encryption failed")]
    Encrypt,

    /// The authentication tag did not verify. One message for both the
    /// wrong-key and tampered-ciphertext cases so callers cannot tell
    /// them apart.
    #[error("authentication failed: invalid key or corrupted data")]
    Authentication,

    /// Argon2id key stretching failed.
    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    /// Sealed bytes are structurally invalid (too short to hold the
    /// nonce and tag). Distinct from an authentication failure.
    #[error("malformed sealed payload: {0}")]
    Malformed(String),
}
