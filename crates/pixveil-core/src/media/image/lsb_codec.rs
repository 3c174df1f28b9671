use log::debug;

use super::iterators::{ColorIter, ColorIterMut};
use crate::capacity::{capacity, check_capacity};
use crate::error::VeilError;
use crate::media::{HideBit, PixelGrid, UnveilBit};
use crate::result::Result;

/// Sequential least significant bit codec.
///
/// Bits go into the R, G and B channels of each pixel, pixels are visited
/// row by row. Everything after the last hidden bit stays untouched.
pub struct LsbCodec;

impl LsbCodec {
    /// Hides `bits` in a copy of `cover`.
    ///
    /// The capacity is checked before anything is written, a cover that is too
    /// small results in [`VeilError::CapacityError`] and no grid at all.
    pub fn embed(cover: &PixelGrid, bits: &[bool]) -> Result<PixelGrid> {
        check_capacity(cover, bits.len())?;

        let mut stego = cover.clone();
        ColorIterMut::new(&mut stego)
            .zip(bits.iter())
            .for_each(|(color, &bit)| color.hide_bit(bit));
        debug!(
            "embedded {} bits into a {} carrier",
            bits.len(),
            cover.shape()
        );

        Ok(stego)
    }

    /// Reads exactly `bit_length` bits in the same order [`LsbCodec::embed`] wrote them.
    pub fn extract(stego: &PixelGrid, bit_length: usize) -> Result<Vec<bool>> {
        let available = capacity(stego);
        if bit_length > available {
            return Err(VeilError::TruncatedStegoError {
                requested: bit_length,
                available,
            });
        }

        let bits: Vec<bool> = ColorIter::new(stego)
            .take(bit_length)
            .map(UnveilBit::unveil_bit)
            .collect();
        debug!("extracted {} bits from a {} image", bits.len(), stego.shape());

        Ok(bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bit_iterator::bytes_to_bits;
    use rand::{Rng, RngCore};

    fn random_grid(height: usize, width: usize, channels: usize) -> PixelGrid {
        let mut rng = rand::thread_rng();
        PixelGrid::from_fn(height, width, channels, |_, _, _| rng.gen()).unwrap()
    }

    #[test]
    fn should_encode() {
        let cover = PixelGrid::filled(2, 2, 3, 0b1010_1010).unwrap();
        let bits = bytes_to_bits(&[0b1100_0000]);
        let stego = LsbCodec::embed(&cover, &bits).unwrap();

        assert_eq!(
            stego.samples(),
            &[
                0b1010_1011,
                0b1010_1011,
                0b1010_1010,
                0b1010_1010,
                0b1010_1010,
                0b1010_1010,
                0b1010_1010,
                0b1010_1010,
                0b1010_1010,
                0b1010_1010,
                0b1010_1010,
                0b1010_1010,
            ]
        );
    }

    #[test]
    fn should_decode() {
        let stego = PixelGrid::new(1, 3, 3, vec![1, 0, 3, 4, 5, 7, 9, 200, 255]).unwrap();

        assert_eq!(
            LsbCodec::extract(&stego, 5).unwrap(),
            [true, false, true, false, true]
        );
        assert_eq!(LsbCodec::extract(&stego, 9).unwrap().len(), 9);
        assert!(LsbCodec::extract(&stego, 0).unwrap().is_empty());
    }

    #[test]
    fn should_round_trip_random_bits_in_random_covers() {
        let mut rng = rand::thread_rng();
        for _ in 0..20 {
            let height = rng.gen_range(1..16);
            let width = rng.gen_range(1..16);
            let channels = rng.gen_range(3..5);
            let cover = random_grid(height, width, channels);

            let mut data = vec![0u8; height * width * 3 / 8];
            rng.fill_bytes(&mut data);
            let bits = bytes_to_bits(&data);

            let stego = LsbCodec::embed(&cover, &bits).unwrap();
            assert_eq!(LsbCodec::extract(&stego, bits.len()).unwrap(), bits);
        }
    }

    #[test]
    fn should_not_touch_samples_beyond_the_payload_nor_alpha() {
        let cover = random_grid(5, 5, 4);
        let bits = bytes_to_bits(b"hidden");
        let stego = LsbCodec::embed(&cover, &bits).unwrap();

        let mut slot = 0;
        for (i, (given, original)) in stego.samples().iter().zip(cover.samples()).enumerate() {
            if i % 4 == 3 {
                assert_eq!(given, original, "alpha at sample {i} changed");
                continue;
            }
            if slot < bits.len() {
                assert_eq!(given & 0xFE, original & 0xFE, "upper bits at {i} changed");
                assert_eq!(given & 1 == 1, bits[slot]);
            } else {
                assert_eq!(given, original, "sample {i} after the payload changed");
            }
            slot += 1;
        }
    }

    #[test]
    fn should_leave_the_cover_untouched() {
        let cover = random_grid(3, 3, 3);
        let copy = cover.clone();
        let _ = LsbCodec::embed(&cover, &[true; 27]).unwrap();

        assert_eq!(cover, copy);
    }

    #[test]
    fn should_use_the_full_capacity() {
        let cover = random_grid(2, 3, 3);
        let bits = vec![true; 18];
        let stego = LsbCodec::embed(&cover, &bits).unwrap();

        assert!(stego.samples().iter().all(|s| s & 1 == 1));
    }

    #[test]
    fn should_refuse_to_embed_more_bits_than_slots() {
        let cover = PixelGrid::filled(2, 3, 4, 0).unwrap();

        match LsbCodec::embed(&cover, &[false; 19]) {
            Err(VeilError::CapacityError {
                required,
                available,
            }) => {
                assert_eq!(required, 19);
                assert_eq!(available, 18);
            }
            other => panic!("expected a capacity error, got {other:?}"),
        }
    }

    #[test]
    fn should_refuse_to_extract_more_bits_than_slots() {
        let stego = PixelGrid::filled(2, 2, 3, 0).unwrap();

        match LsbCodec::extract(&stego, 13) {
            Err(VeilError::TruncatedStegoError {
                requested,
                available,
            }) => {
                assert_eq!(requested, 13);
                assert_eq!(available, 12);
            }
            other => panic!("expected a truncated stego error, got {other:?}"),
        }
    }
}
