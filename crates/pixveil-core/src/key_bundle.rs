//! The side channel that travels next to a stego image.
//!
//! Binary layout, all integers big endian:
//!
//! ```text
//! | "PVKB" | version u8 | key [16] | nonce [16] | tag [16] | height u32 | width u32 | bit length u64 |
//! ```

use std::fmt::{self, Debug, Formatter};
use std::io::{self, Read, Write};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use pixveil_seal::{CipherPayload, Key, Nonce, Tag, KEY_LEN, NONCE_LEN, TAG_LEN};

use crate::error::VeilError;
use crate::result::Result;

const MAGIC: &[u8; 4] = b"PVKB";
const VERSION: u8 = 1;

/// size of a serialized key bundle in bytes
pub const KEY_BUNDLE_LEN: usize = MAGIC.len() + 1 + KEY_LEN + NONCE_LEN + TAG_LEN + 4 + 4 + 8;

/// Everything needed to get a secret back out of a stego image.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyBundle {
    pub key: Key,
    pub nonce: Nonce,
    pub tag: Tag,
    /// (height, width) of the carrier the bits were hidden in
    pub shape: (usize, usize),
    /// number of LSB slots in use, always a multiple of 8
    pub bit_length: usize,
}

impl KeyBundle {
    pub fn pack(
        key: Key,
        nonce: Nonce,
        tag: Tag,
        shape: (usize, usize),
        bit_length: usize,
    ) -> Self {
        Self {
            key,
            nonce,
            tag,
            shape,
            bit_length,
        }
    }

    pub fn unpack(&self) -> (Key, Nonce, Tag, (usize, usize), usize) {
        (self.key, self.nonce, self.tag, self.shape, self.bit_length)
    }

    /// bundle for a payload hidden in a carrier of the given (height, width)
    pub fn for_payload(payload: &CipherPayload, shape: (usize, usize)) -> Self {
        Self::pack(
            payload.key,
            payload.nonce,
            payload.tag,
            shape,
            payload.ciphertext.len() * 8,
        )
    }

    /// joins the bundle with the ciphertext recovered from the carrier
    pub fn cipher_payload(&self, ciphertext: Vec<u8>) -> CipherPayload {
        CipherPayload::new(ciphertext, self.key, self.nonce, self.tag)
    }

    pub fn write_to<W: Write>(&self, w: &mut W) -> Result<()> {
        let (height, width) = self.shape;
        let height = u32::try_from(height)
            .map_err(|_| VeilError::InvalidKeyBundle("carrier height exceeds 32 bits"))?;
        let width = u32::try_from(width)
            .map_err(|_| VeilError::InvalidKeyBundle("carrier width exceeds 32 bits"))?;

        w.write_all(MAGIC)?;
        w.write_u8(VERSION)?;
        w.write_all(&self.key)?;
        w.write_all(&self.nonce)?;
        w.write_all(&self.tag)?;
        w.write_u32::<BigEndian>(height)?;
        w.write_u32::<BigEndian>(width)?;
        w.write_u64::<BigEndian>(self.bit_length as u64)?;

        Ok(())
    }

    pub fn read_from<R: Read>(r: &mut R) -> Result<Self> {
        let mut magic = [0u8; 4];
        r.read_exact(&mut magic).map_err(truncated)?;
        if &magic != MAGIC {
            return Err(VeilError::InvalidKeyBundle("not a key bundle"));
        }
        let version = r.read_u8().map_err(truncated)?;
        if version != VERSION {
            return Err(VeilError::UnsupportedKeyBundleVersion(version));
        }

        let mut bundle = Self::pack([0; KEY_LEN], [0; NONCE_LEN], [0; TAG_LEN], (0, 0), 0);
        r.read_exact(&mut bundle.key).map_err(truncated)?;
        r.read_exact(&mut bundle.nonce).map_err(truncated)?;
        r.read_exact(&mut bundle.tag).map_err(truncated)?;
        let height = r.read_u32::<BigEndian>().map_err(truncated)?;
        let width = r.read_u32::<BigEndian>().map_err(truncated)?;
        bundle.shape = (height as usize, width as usize);

        let bit_length = r.read_u64::<BigEndian>().map_err(truncated)?;
        if bit_length % 8 != 0 {
            return Err(VeilError::InvalidKeyBundle(
                "bit length is not a whole number of bytes",
            ));
        }
        bundle.bit_length = usize::try_from(bit_length)
            .map_err(|_| VeilError::InvalidKeyBundle("bit length exceeds the address space"))?;

        Ok(bundle)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(KEY_BUNDLE_LEN);
        self.write_to(&mut buf)?;

        Ok(buf)
    }

    /// parses a complete bundle, trailing bytes are rejected
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut r = data;
        let bundle = Self::read_from(&mut r)?;
        if !r.is_empty() {
            return Err(VeilError::InvalidKeyBundle("unexpected trailing data"));
        }

        Ok(bundle)
    }
}

fn truncated(e: io::Error) -> VeilError {
    match e.kind() {
        io::ErrorKind::UnexpectedEof => VeilError::InvalidKeyBundle("truncated"),
        _ => VeilError::IoError(e),
    }
}

impl Debug for KeyBundle {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyBundle")
            .field("key", &"*".repeat(KEY_LEN))
            .field("nonce", &self.nonce)
            .field("tag", &self.tag)
            .field("shape", &self.shape)
            .field("bit_length", &self.bit_length)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_bundle() -> KeyBundle {
        KeyBundle::pack([1; KEY_LEN], [2; NONCE_LEN], [3; TAG_LEN], (12, 10), 400)
    }

    #[test]
    fn pack_and_unpack_are_plain_structure() {
        let (key, nonce, tag, shape, bit_length) = sample_bundle().unpack();

        assert_eq!(key, [1; KEY_LEN]);
        assert_eq!(nonce, [2; NONCE_LEN]);
        assert_eq!(tag, [3; TAG_LEN]);
        assert_eq!(shape, (12, 10));
        assert_eq!(bit_length, 400);
    }

    #[test]
    fn should_serialize_with_the_documented_layout() {
        let bytes = sample_bundle().to_bytes().unwrap();

        assert_eq!(bytes.len(), KEY_BUNDLE_LEN);
        assert_eq!(&bytes[..4], b"PVKB");
        assert_eq!(bytes[4], 1, "version");
        assert_eq!(&bytes[5..21], &[1; 16]);
        assert_eq!(&bytes[21..37], &[2; 16]);
        assert_eq!(&bytes[37..53], &[3; 16]);
        assert_eq!(&bytes[53..57], &[0, 0, 0, 12]);
        assert_eq!(&bytes[57..61], &[0, 0, 0, 10]);
        assert_eq!(&bytes[61..69], &[0, 0, 0, 0, 0, 0, 0x01, 0x90]);
    }

    #[test]
    fn should_read_back_exactly_what_was_written() {
        let bundle = KeyBundle::pack(
            *b"0123456789abcdef",
            [0xFF; NONCE_LEN],
            [0x00; TAG_LEN],
            (u32::MAX as usize, 1),
            8 * 1024 * 1024,
        );

        assert_eq!(
            KeyBundle::from_bytes(&bundle.to_bytes().unwrap()).unwrap(),
            bundle
        );
    }

    #[test]
    fn should_reject_foreign_data() {
        let mut bytes = sample_bundle().to_bytes().unwrap();
        bytes[0] = b'X';

        assert!(matches!(
            KeyBundle::from_bytes(&bytes),
            Err(VeilError::InvalidKeyBundle(_))
        ));
    }

    #[test]
    fn should_reject_unknown_versions() {
        let mut bytes = sample_bundle().to_bytes().unwrap();
        bytes[4] = 7;

        assert!(matches!(
            KeyBundle::from_bytes(&bytes),
            Err(VeilError::UnsupportedKeyBundleVersion(7))
        ));
    }

    #[test]
    fn should_reject_truncated_and_oversized_data() {
        let bytes = sample_bundle().to_bytes().unwrap();
        for len in [0, 3, 5, 40, KEY_BUNDLE_LEN - 1] {
            assert!(
                matches!(
                    KeyBundle::from_bytes(&bytes[..len]),
                    Err(VeilError::InvalidKeyBundle("truncated"))
                ),
                "length {len} was accepted"
            );
        }

        let mut longer = bytes.clone();
        longer.push(0);
        assert!(KeyBundle::from_bytes(&longer).is_err());
    }

    #[test]
    fn should_reject_partial_bytes() {
        let mut bundle = sample_bundle();
        bundle.bit_length = 401;
        let bytes = bundle.to_bytes().unwrap();

        assert!(matches!(
            KeyBundle::from_bytes(&bytes),
            Err(VeilError::InvalidKeyBundle(_))
        ));
    }

    #[test]
    fn should_refuse_carriers_beyond_32_bits() {
        let mut bundle = sample_bundle();
        bundle.shape = (u32::MAX as usize + 1, 1);

        assert!(bundle.to_bytes().is_err());
    }

    #[test]
    fn should_convert_from_and_into_cipher_payloads() {
        let payload = pixveil_seal::encrypt(b"ten bytes!").unwrap();
        let bundle = KeyBundle::for_payload(&payload, (4, 4));

        assert_eq!(bundle.bit_length, 80);
        assert_eq!(bundle.cipher_payload(payload.ciphertext.clone()), payload);
    }

    #[test]
    fn debug_should_mask_the_key() {
        let debug = format!("{:?}", sample_bundle());

        assert!(debug.contains("key: \"****************\""), "{debug}");
    }
}
