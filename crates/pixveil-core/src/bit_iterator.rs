use std::iter::FusedIterator;
use std::slice;

/// Walks the bits of a byte slice, most significant bit of each byte first.
///
/// ```rust
/// use pixveil_core::BitIterator;
///
/// let bits: Vec<bool> = BitIterator::new(&[0b1000_0001]).collect();
/// assert_eq!(bits, [true, false, false, false, false, false, false, true]);
/// ```
#[derive(Debug, Clone)]
pub struct BitIterator<'a> {
    bytes: slice::Iter<'a, u8>,
    byte: u8,
    remaining: u8,
}

impl<'a> BitIterator<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes: bytes.iter(),
            byte: 0,
            remaining: 0,
        }
    }
}

impl Iterator for BitIterator<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            self.byte = *self.bytes.next()?;
            self.remaining = 8;
        }
        self.remaining -= 1;

        Some((self.byte >> self.remaining) & 1 == 1)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.bytes.len() * 8 + self.remaining as usize;
        (len, Some(len))
    }
}

impl ExactSizeIterator for BitIterator<'_> {}

impl FusedIterator for BitIterator<'_> {}

/// all bits of `data`, big-endian within each byte, 8 bits per byte
pub fn bytes_to_bits(data: &[u8]) -> Vec<bool> {
    BitIterator::new(data).collect()
}

/// Packs bits into bytes, the first bit becomes the most significant bit.
/// A trailing group of less than 8 bits is padded with zeros on the right.
pub fn bits_to_bytes(bits: &[bool]) -> Vec<u8> {
    bits.chunks(8)
        .map(|group| {
            group
                .iter()
                .enumerate()
                .fold(0u8, |byte, (i, &bit)| byte | (u8::from(bit) << (7 - i)))
        })
        .collect()
}
