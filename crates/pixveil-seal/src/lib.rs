//! # Payload sealing
//! Authenticated encryption of the secret payload with AES-128 in EAX mode.
//!
//! Every call to [`encrypt`] draws a fresh key and nonce. Both travel with the
//! ciphertext and the detached tag inside a [`CipherPayload`], there is no key
//! derivation and no key management.

use std::fmt::{self, Debug, Formatter};

use aes::Aes128;
use eax::aead::generic_array::GenericArray;
use eax::aead::{AeadInPlace, KeyInit};
use eax::Eax;
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroize;

pub mod error;

pub use crate::error::SealError;

pub const KEY_LEN: usize = 16;
pub const NONCE_LEN: usize = 16;
pub const TAG_LEN: usize = 16;

pub type Result<T> = std::result::Result<T, SealError>;
pub type Key = [u8; KEY_LEN];
pub type Nonce = [u8; NONCE_LEN];
pub type Tag = [u8; TAG_LEN];

type Aes128Eax = Eax<Aes128>;

/// ciphertext plus everything needed to verify and decrypt it
#[derive(Clone, PartialEq, Eq)]
pub struct CipherPayload {
    pub ciphertext: Vec<u8>,
    pub key: Key,
    pub nonce: Nonce,
    pub tag: Tag,
}

impl CipherPayload {
    pub fn new(ciphertext: Vec<u8>, key: Key, nonce: Nonce, tag: Tag) -> Self {
        Self {
            ciphertext,
            key,
            nonce,
            tag,
        }
    }
}

impl Debug for CipherPayload {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("CipherPayload")
            .field("ciphertext_len", &self.ciphertext.len())
            .field("key", &"*".repeat(KEY_LEN))
            .field("nonce", &self.nonce)
            .field("tag", &self.tag)
            .finish()
    }
}

impl Zeroize for CipherPayload {
    fn zeroize(&mut self) {
        self.ciphertext.zeroize();
        self.key.zeroize();
        self.nonce.zeroize();
        self.tag.zeroize();
    }
}

/// encrypt data with a fresh random key and nonce, using AES-128-EAX without associated data
pub fn encrypt(plaintext: &[u8]) -> Result<CipherPayload> {
    let mut key = [0u8; KEY_LEN];
    OsRng.fill_bytes(&mut key);
    let mut nonce = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce);

    let payload = encrypt_with(&key, &nonce, plaintext);

    key.zeroize();
    nonce.zeroize();

    payload
}

/// encrypt data with the given key and nonce.
/// Never reuse a nonce with the same key.
pub fn encrypt_with(key: &Key, nonce: &Nonce, plaintext: &[u8]) -> Result<CipherPayload> {
    let encryptor = Aes128Eax::new(GenericArray::from_slice(key));
    let mut ciphertext = plaintext.to_vec();
    let tag = encryptor
        .encrypt_in_place_detached(GenericArray::from_slice(nonce), &[], &mut ciphertext)
        .map_err(SealError::EncryptionError)?;

    let mut detached_tag = [0u8; TAG_LEN];
    detached_tag.copy_from_slice(tag.as_slice());

    Ok(CipherPayload::new(ciphertext, *key, *nonce, detached_tag))
}

/// verify the tag and decrypt, no plaintext is returned unless the tag matches
pub fn decrypt(payload: &CipherPayload) -> Result<Vec<u8>> {
    let decryptor = Aes128Eax::new(GenericArray::from_slice(&payload.key));
    let mut buffer = payload.ciphertext.clone();

    let verified = decryptor.decrypt_in_place_detached(
        GenericArray::from_slice(&payload.nonce),
        &[],
        &mut buffer,
        GenericArray::from_slice(&payload.tag),
    );
    if verified.is_err() {
        buffer.zeroize();
        return Err(SealError::IntegrityError);
    }

    Ok(buffer)
}
