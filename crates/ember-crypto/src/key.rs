//! Secret keys and how drops get them.
//!
//! A drop is sealed with one of two key sources: a random per-drop key
//! that the store keeps embedded in the record, or a key stretched from a
//! caller-supplied password with Argon2id. Stretched keys are never
//! stored; only the random per-drop salt is, and the key is re-derived at
//! retrieval time.

use argon2::{Argon2, Params, Version};
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::ZeroizeOnDrop;

use crate::error::CryptoError;

/// AES-256 key length in bytes.
pub const KEY_LEN: usize = 32;

/// Per-drop Argon2id salt length in bytes.
pub const SALT_LEN: usize = 16;

/// A 256-bit symmetric key. Zeroized on drop.
#[derive(Clone, ZeroizeOnDrop)]
pub struct SecretKey([u8; KEY_LEN]);

impl SecretKey {
    /// Generate a fresh random key from OS randomness.
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_LEN];
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Wrap existing key bytes.
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// The raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key bytes.
        write!(f, "SecretKey(..)")
    }
}

/// Argon2id parameters, tuned for interactive use: a retrieval with a
/// password costs a few hundred milliseconds, which is the point.
fn argon2_params() -> Params {
    Params::new(
        64 * 1024, // m_cost in KiB: 64 MiB
        3,         // t_cost
        1,         // p_cost
        Some(KEY_LEN),
    )
    .expect("static Argon2 params are always valid")
}

/// Stretch a password into a 256-bit key with Argon2id.
///
/// Deterministic for a given (password, salt) pair. The salt must be
/// random per drop; identical passwords on different drops must not
/// derive identical keys.
pub fn derive_key(password: &[u8], salt: &[u8; SALT_LEN]) -> Result<SecretKey, CryptoError> {
    let argon2 = Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, argon2_params());
    let mut output = [0u8; KEY_LEN];
    argon2
        .hash_password_into(password, salt, &mut output)
        .map_err(|e| CryptoError::KeyDerivation(e.to_string()))?;
    Ok(SecretKey(output))
}

/// Generate a fresh random salt for one drop.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    salt
}

/// Where the key for a sealed drop comes from.
///
/// The variants make the storage invariant structural: an embedded key is
/// present exactly when no password protects the drop, and a
/// password-derived key is never present at all, only its salt.
#[derive(Clone, Debug)]
pub enum KeyMaterial {
    /// Random per-drop key, kept with the record.
    Embedded(SecretKey),
    /// Password-derived key; re-derived from the caller's password and
    /// this salt at retrieval time.
    Derived { salt: [u8; SALT_LEN] },
}

impl KeyMaterial {
    /// Whether retrieval requires a caller-supplied password.
    pub fn has_password(&self) -> bool {
        matches!(self, Self::Derived { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_keys_differ() {
        let a = SecretKey::generate();
        let b = SecretKey::generate();
        assert_ne!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn derive_is_deterministic() {
        let salt = [7u8; SALT_LEN];
        let k1 = derive_key(b"hunter2", &salt).unwrap();
        let k2 = derive_key(b"hunter2", &salt).unwrap();
        assert_eq!(k1.as_bytes(), k2.as_bytes());
    }

    #[test]
    fn different_salts_derive_different_keys() {
        let k1 = derive_key(b"same password", &[1u8; SALT_LEN]).unwrap();
        let k2 = derive_key(b"same password", &[2u8; SALT_LEN]).unwrap();
        assert_ne!(k1.as_bytes(), k2.as_bytes());
    }

    #[test]
    fn different_passwords_derive_different_keys() {
        let salt = [9u8; SALT_LEN];
        let k1 = derive_key(b"pw1", &salt).unwrap();
        let k2 = derive_key(b"pw2", &salt).unwrap();
        assert_ne!(k1.as_bytes(), k2.as_bytes());
    }

    #[test]
    fn generated_salts_differ() {
        assert_ne!(generate_salt(), generate_salt());
    }

    #[test]
    fn has_password_tracks_variant() {
        let embedded = KeyMaterial::Embedded(SecretKey::generate());
        let derived = KeyMaterial::Derived {
            salt: generate_salt(),
        };
        assert!(!embedded.has_password());
        assert!(derived.has_password());
    }

    #[test]
    fn debug_never_prints_key_bytes() {
        let key = SecretKey::from_bytes([0xAB; KEY_LEN]);
        let debug = format!("{key:?}");
        assert_eq!(debug, "SecretKey(..)");
        assert!(!debug.contains("AB"));
    }
}
