//! AES-256-GCM seal/open with a detached authentication tag.
//!
//! Key size: 32 bytes. Nonce: 12 bytes (random per seal, never reused for
//! a key). Tag: 16 bytes, stored separately from the ciphertext.
//!
//! On-disk framing for blob files:
//!   [ nonce (12 bytes) | tag (16 bytes) | ciphertext ]

use aes_gcm::aead::Aead;
use aes_gcm::{Aes256Gcm, Key, KeyInit, Nonce};
use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::CryptoError;
use crate::key::SecretKey;

/// GCM nonce length in bytes.
pub const NONCE_LEN: usize = 12;

/// GCM authentication tag length in bytes.
pub const TAG_LEN: usize = 16;

/// One sealed payload: ciphertext plus the nonce and tag needed to open it.
///
/// The tag is detached so a record can hold the three parts as distinct
/// fields; [`SealedPayload::to_bytes`] joins them back into the single
/// framing used for blob files.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SealedPayload {
    pub nonce: [u8; NONCE_LEN],
    pub tag: [u8; TAG_LEN],
    pub ciphertext: Vec<u8>,
}

impl SealedPayload {
    /// Serialize as `nonce || tag || ciphertext`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(NONCE_LEN + TAG_LEN + self.ciphertext.len());
        out.extend_from_slice(&self.nonce);
        out.extend_from_slice(&self.tag);
        out.extend_from_slice(&self.ciphertext);
        out
    }

    /// Parse the `nonce || tag || ciphertext` framing.
    pub fn from_bytes(data: &[u8]) -> Result<Self, CryptoError> {
        if data.len() < NONCE_LEN + TAG_LEN {
            return Err(CryptoError::Malformed(format!(
                "{} bytes is shorter than nonce + tag",
                data.len()
            )));
        }
        let mut nonce = [0u8; NONCE_LEN];
        nonce.copy_from_slice(&data[..NONCE_LEN]);
        let mut tag = [0u8; TAG_LEN];
        tag.copy_from_slice(&data[NONCE_LEN..NONCE_LEN + TAG_LEN]);
        Ok(Self {
            nonce,
            tag,
            ciphertext: data[NONCE_LEN + TAG_LEN..].to_vec(),
        })
    }

    /// Total serialized length in bytes.
    pub fn encrypted_len(&self) -> u64 {
        (NONCE_LEN + TAG_LEN + self.ciphertext.len()) as u64
    }
}

/// Seal plaintext under a key with a fresh random nonce.
pub fn seal(key: &SecretKey, plaintext: &[u8]) -> Result<SealedPayload, CryptoError> {
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()));
    let mut nonce = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce);

    // aes-gcm appends the 16-byte tag; split it off to store detached.
    let mut combined = cipher
        .encrypt(Nonce::from_slice(&nonce), plaintext)
        .map_err(|_| CryptoError::Encrypt)?;
    let tag_start = combined.len() - TAG_LEN;
    let tag_bytes = combined.split_off(tag_start);
    let mut tag = [0u8; TAG_LEN];
    tag.copy_from_slice(&tag_bytes);

    Ok(SealedPayload {
        nonce,
        tag,
        ciphertext: combined,
    })
}

/// Open a sealed payload.
///
/// Fails with [`CryptoError::Authentication`] when the tag does not
/// verify, which covers both a wrong key and any bit of tampering in the
/// ciphertext, nonce, or tag. No partial plaintext is ever returned.
pub fn open(key: &SecretKey, sealed: &SealedPayload) -> Result<Vec<u8>, CryptoError> {
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()));
    let mut combined = Vec::with_capacity(sealed.ciphertext.len() + TAG_LEN);
    combined.extend_from_slice(&sealed.ciphertext);
    combined.extend_from_slice(&sealed.tag);
    cipher
        .decrypt(Nonce::from_slice(&sealed.nonce), combined.as_slice())
        .map_err(|_| CryptoError::Authentication)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::{derive_key, SecretKey, SALT_LEN};

    fn key() -> SecretKey {
        SecretKey::from_bytes([0x42; 32])
    }

    // -----------------------------------------------------------------------
    // Round-trip
    // -----------------------------------------------------------------------

    #[test]
    fn seal_open_roundtrip() {
        let sealed = seal(&key(), b"hello ember").unwrap();
        let plaintext = open(&key(), &sealed).unwrap();
        assert_eq!(plaintext, b"hello ember");
    }

    #[test]
    fn seal_open_roundtrip_empty_plaintext() {
        let sealed = seal(&key(), b"").unwrap();
        assert!(sealed.ciphertext.is_empty());
        let plaintext = open(&key(), &sealed).unwrap();
        assert!(plaintext.is_empty());
    }

    #[test]
    fn roundtrip_with_derived_key() {
        let salt = [3u8; SALT_LEN];
        let k = derive_key(b"correct horse", &salt).unwrap();
        let sealed = seal(&k, b"staple battery").unwrap();
        let k2 = derive_key(b"correct horse", &salt).unwrap();
        assert_eq!(open(&k2, &sealed).unwrap(), b"staple battery");
    }

    #[test]
    fn nonce_is_fresh_per_seal() {
        let a = seal(&key(), b"same input").unwrap();
        let b = seal(&key(), b"same input").unwrap();
        assert_ne!(a.nonce, b.nonce);
        assert_ne!(a.ciphertext, b.ciphertext);
    }

    // -----------------------------------------------------------------------
    // Authentication failures
    // -----------------------------------------------------------------------

    #[test]
    fn wrong_key_fails() {
        let sealed = seal(&key(), b"secret").unwrap();
        let wrong = SecretKey::from_bytes([0x43; 32]);
        assert_eq!(open(&wrong, &sealed).unwrap_err(), CryptoError::Authentication);
    }

    #[test]
    fn wrong_password_fails() {
        let salt = [5u8; SALT_LEN];
        let sealed = seal(&derive_key(b"pw1", &salt).unwrap(), b"secret").unwrap();
        let wrong = derive_key(b"pw2", &salt).unwrap();
        assert_eq!(open(&wrong, &sealed).unwrap_err(), CryptoError::Authentication);
    }

    #[test]
    fn flipped_ciphertext_bit_fails() {
        let mut sealed = seal(&key(), b"integrity matters").unwrap();
        sealed.ciphertext[0] ^= 0x01;
        assert_eq!(open(&key(), &sealed).unwrap_err(), CryptoError::Authentication);
    }

    #[test]
    fn flipped_nonce_bit_fails() {
        let mut sealed = seal(&key(), b"integrity matters").unwrap();
        sealed.nonce[0] ^= 0x01;
        assert_eq!(open(&key(), &sealed).unwrap_err(), CryptoError::Authentication);
    }

    #[test]
    fn flipped_tag_bit_fails() {
        let mut sealed = seal(&key(), b"integrity matters").unwrap();
        sealed.tag[0] ^= 0x01;
        assert_eq!(open(&key(), &sealed).unwrap_err(), CryptoError::Authentication);
    }

    // -----------------------------------------------------------------------
    // Framing
    // -----------------------------------------------------------------------

    #[test]
    fn framing_roundtrip() {
        let sealed = seal(&key(), b"frame me").unwrap();
        let bytes = sealed.to_bytes();
        assert_eq!(bytes.len() as u64, sealed.encrypted_len());
        let parsed = SealedPayload::from_bytes(&bytes).unwrap();
        assert_eq!(parsed, sealed);
        assert_eq!(open(&key(), &parsed).unwrap(), b"frame me");
    }

    #[test]
    fn from_bytes_rejects_short_input() {
        let err = SealedPayload::from_bytes(&[0u8; NONCE_LEN + TAG_LEN - 1]).unwrap_err();
        assert!(matches!(err, CryptoError::Malformed(_)));
    }

    #[test]
    fn minimal_framing_is_nonce_plus_tag() {
        let parsed = SealedPayload::from_bytes(&[0u8; NONCE_LEN + TAG_LEN]).unwrap();
        assert!(parsed.ciphertext.is_empty());
    }

    // -----------------------------------------------------------------------
    // Properties
    // -----------------------------------------------------------------------

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn roundtrip_any_payload(payload in proptest::collection::vec(any::<u8>(), 0..2048)) {
                let sealed = seal(&key(), &payload).unwrap();
                prop_assert_eq!(open(&key(), &sealed).unwrap(), payload);
            }

            #[test]
            fn any_bit_flip_fails(
                payload in proptest::collection::vec(any::<u8>(), 1..512),
                byte_index: prop::sample::Index,
                bit in 0u8..8,
            ) {
                let sealed = seal(&key(), &payload).unwrap();
                let mut bytes = sealed.to_bytes();
                let i = byte_index.index(bytes.len());
                bytes[i] ^= 1 << bit;
                let tampered = SealedPayload::from_bytes(&bytes).unwrap();
                prop_assert_eq!(open(&key(), &tampered).unwrap_err(), CryptoError::Authentication);
            }
        }
    }
}
