use std::iter::Take;
use std::slice::{ChunksExact, ChunksExactMut, Iter, IterMut};

use crate::media::{PixelGrid, RGB_CHANNELS};

/// Mutable access to the RGB channels of a grid, pixel by pixel in row-major order.
/// Any channel after the third (e.g. alpha) is skipped.
pub(crate) struct ColorIterMut<'a> {
    pixels: ChunksExactMut<'a, u8>,
    colors: Take<IterMut<'a, u8>>,
}

impl<'a> ColorIterMut<'a> {
    pub fn new(grid: &'a mut PixelGrid) -> Self {
        let mut pixels = grid.pixels_mut();
        let colors = pixels
            .next()
            .unwrap_or_default()
            .iter_mut()
            .take(RGB_CHANNELS);

        Self { pixels, colors }
    }
}

impl<'a> Iterator for ColorIterMut<'a> {
    type Item = &'a mut u8;

    fn next(&mut self) -> Option<Self::Item> {
        self.colors.next().or_else(|| {
            if let Some(pixel) = self.pixels.next() {
                self.colors = pixel.iter_mut().take(RGB_CHANNELS);
            }
            self.colors.next()
        })
    }
}

/// Readonly counterpart of [`ColorIterMut`], same scan order.
pub(crate) struct ColorIter<'a> {
    pixels: ChunksExact<'a, u8>,
    colors: Take<Iter<'a, u8>>,
}

impl<'a> ColorIter<'a> {
    pub fn new(grid: &'a PixelGrid) -> Self {
        let mut pixels = grid.pixels();
        let colors = pixels
            .next()
            .unwrap_or_default()
            .iter()
            .take(RGB_CHANNELS);

        Self { pixels, colors }
    }
}

impl<'a> Iterator for ColorIter<'a> {
    type Item = &'a u8;

    fn next(&mut self) -> Option<Self::Item> {
        self.colors.next().or_else(|| {
            if let Some(pixel) = self.pixels.next() {
                self.colors = pixel.iter().take(RGB_CHANNELS);
            }
            self.colors.next()
        })
    }
}
