//! Encrypt then embed, extract then decrypt.

use log::debug;
use zeroize::Zeroize;

use crate::bit_iterator::bits_to_bytes;
use crate::capacity::prepare;
use crate::error::VeilError;
use crate::key_bundle::KeyBundle;
use crate::media::image::LsbCodec;
use crate::media::{PixelGrid, Shape};
use crate::result::Result;

/// A stego image together with the bundle needed to read it.
#[derive(Debug, Clone)]
pub struct Concealed {
    pub stego: PixelGrid,
    pub key_bundle: KeyBundle,
}

/// Encrypts `secret` and hides the ciphertext in a copy of `cover`.
pub fn hide(secret: &[u8], cover: &PixelGrid) -> Result<Concealed> {
    let prepared = prepare(secret, cover)?;
    let stego = LsbCodec::embed(cover, &prepared.bits)?;
    let key_bundle = KeyBundle::for_payload(&prepared.payload, cover.dimensions());
    debug!(
        "concealed {} bytes, {:.1}% of the carrier in use",
        secret.len(),
        prepared.capacity.utilization() * 100.0
    );

    Ok(Concealed { stego, key_bundle })
}

/// Reads the ciphertext described by `key_bundle` out of `stego` and decrypts it.
pub fn unveil(stego: &PixelGrid, key_bundle: &KeyBundle) -> Result<Vec<u8>> {
    let (height, width) = key_bundle.shape;
    if stego.dimensions() != (height, width) {
        return Err(VeilError::ShapeMismatchError {
            left: Shape::new(height, width, stego.channels()),
            right: stego.shape(),
        });
    }

    let bits = LsbCodec::extract(stego, key_bundle.bit_length)?;
    let mut payload = key_bundle.cipher_payload(bits_to_bytes(&bits));
    let plaintext = pixveil_seal::decrypt(&payload);
    payload.zeroize();

    Ok(plaintext?)
}
