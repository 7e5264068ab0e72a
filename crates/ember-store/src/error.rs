use thiserror::Error;

use ember_crypto::CryptoError;

/// Errors from the blob sink.
#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O error from the underlying blob storage.
    #[error("blob I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for blob sink operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by vault operations.
///
/// This is the whole failure vocabulary of the boundary contract. Expired,
/// consumed, and never-existing drops all collapse into `NotFound`, and a
/// wrong password is not distinguishable from tampered ciphertext.
#[derive(Debug, Error)]
pub enum VaultError {
    /// Unknown id, expired drop, or already-consumed drop.
    #[error("not found")]
    NotFound,

    /// The drop is password-protected and no password was supplied.
    /// Recoverable by retrying with a password.
    #[error("password required")]
    PasswordRequired,

    /// Decryption integrity check failed: wrong password, wrong key, or
    /// corrupted ciphertext. Never retried automatically.
    #[error("invalid password or corrupted data")]
    Authentication,

    /// Blob storage failure. Details stay in the logs; callers get this
    /// generic form without filesystem paths.
    #[error("blob storage failure: {0}")]
    Blob(#[from] StoreError),

    /// Request rejected before any cryptographic work or store mutation.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Unexpected internal failure.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<CryptoError> for VaultError {
    fn from(err: CryptoError) -> Self {
        match err {
            // A truncated blob file is corrupted data, same as a failed tag.
            CryptoError::Authentication | CryptoError::Malformed(_) => Self::Authentication,
            CryptoError::Encrypt => Self::Internal("encryption failed".to_string()),
            CryptoError::KeyDerivation(e) => Self::Internal(e),
        }
    }
}
