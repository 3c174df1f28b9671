use std::fmt::{self, Display, Formatter};
use std::slice::{ChunksExact, ChunksExactMut};

use crate::error::VeilError;
use crate::result::Result;

/// only the first 3 channels (RGB) of a pixel carry hidden bits
pub const RGB_CHANNELS: usize = 3;

/// height, width and channel count of a [`PixelGrid`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    pub height: usize,
    pub width: usize,
    pub channels: usize,
}

impl Shape {
    pub fn new(height: usize, width: usize, channels: usize) -> Self {
        Self {
            height,
            width,
            channels,
        }
    }

    /// number of samples, `None` if it does not fit into `usize`
    pub fn sample_count(&self) -> Option<usize> {
        self.height
            .checked_mul(self.width)?
            .checked_mul(self.channels)
    }
}

impl Display for Shape {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.height, self.width, self.channels)
    }
}

fn checked_sample_count(shape: Shape) -> Result<usize> {
    shape.sample_count().ok_or_else(|| {
        VeilError::InvalidPixelGrid(format!("a {shape} grid does not fit into memory"))
    })
}

/// A decoded image as a row-major grid of interleaved 8 bit samples.
///
/// ```text
/// samples: [ (0,0,R) (0,0,G) (0,0,B) [(0,0,A)] (0,1,R) ... (1,0,R) ... ]
/// ```
///
/// The grid owns its samples and is never changed in place by the codec,
/// embedding always produces a new grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelGrid {
    shape: Shape,
    samples: Vec<u8>,
}

impl PixelGrid {
    pub fn new(height: usize, width: usize, channels: usize, samples: Vec<u8>) -> Result<Self> {
        if channels < RGB_CHANNELS {
            return Err(VeilError::InvalidPixelGrid(format!(
                "at least {RGB_CHANNELS} channels are required, got {channels}"
            )));
        }
        let shape = Shape::new(height, width, channels);
        if samples.len() != checked_sample_count(shape)? {
            return Err(VeilError::InvalidPixelGrid(format!(
                "{} samples do not form a {shape} grid",
                samples.len()
            )));
        }

        Ok(Self { shape, samples })
    }

    /// a grid with every sample set to `value`
    pub fn filled(height: usize, width: usize, channels: usize, value: u8) -> Result<Self> {
        let count = checked_sample_count(Shape::new(height, width, channels))?;
        Self::new(height, width, channels, vec![value; count])
    }

    /// builds a grid by calling `f(row, column, channel)` for every sample
    pub fn from_fn<F>(height: usize, width: usize, channels: usize, mut f: F) -> Result<Self>
    where
        F: FnMut(usize, usize, usize) -> u8,
    {
        let count = checked_sample_count(Shape::new(height, width, channels))?;
        let samples = (0..count)
            .map(|i| {
                let pixel = i / channels;
                f(pixel / width, pixel % width, i % channels)
            })
            .collect();

        Self::new(height, width, channels, samples)
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn height(&self) -> usize {
        self.shape.height
    }

    pub fn width(&self) -> usize {
        self.shape.width
    }

    pub fn channels(&self) -> usize {
        self.shape.channels
    }

    /// (height, width)
    pub fn dimensions(&self) -> (usize, usize) {
        (self.shape.height, self.shape.width)
    }

    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<u8> {
        self.samples
    }

    pub fn get(&self, row: usize, column: usize, channel: usize) -> Option<u8> {
        self.pixel(row, column)
            .and_then(|pixel| pixel.get(channel))
            .copied()
    }

    pub fn pixel(&self, row: usize, column: usize) -> Option<&[u8]> {
        if row >= self.shape.height || column >= self.shape.width {
            return None;
        }
        let start = (row * self.shape.width + column) * self.shape.channels;

        Some(&self.samples[start..start + self.shape.channels])
    }

    /// all pixels in row-major order
    pub fn pixels(&self) -> ChunksExact<'_, u8> {
        self.samples.chunks_exact(self.shape.channels)
    }

    pub(crate) fn pixels_mut(&mut self) -> ChunksExactMut<'_, u8> {
        self.samples.chunks_exact_mut(self.shape.channels)
    }

    /// grayscale view of the RGB channels, any further channel is ignored
    pub fn to_gray(&self) -> GrayGrid {
        let samples = self
            .pixels()
            .map(|p| luma(p[0], p[1], p[2]))
            .collect::<Vec<_>>();

        GrayGrid {
            height: self.shape.height,
            width: self.shape.width,
            samples,
        }
    }
}

/// ITU-R 601-2 luma in 16 bit fixed point, rounded
#[inline]
fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((r as u32 * 19595 + g as u32 * 38470 + b as u32 * 7471 + 0x8000) >> 16) as u8
}

/// single channel 8 bit image
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayGrid {
    height: usize,
    width: usize,
    samples: Vec<u8>,
}

impl GrayGrid {
    pub fn new(height: usize, width: usize, samples: Vec<u8>) -> Result<Self> {
        if height.checked_mul(width) != Some(samples.len()) {
            return Err(VeilError::InvalidPixelGrid(format!(
                "{} samples do not form a {height}x{width} grayscale grid",
                samples.len()
            )));
        }

        Ok(Self {
            height,
            width,
            samples,
        })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// occurrences of every sample value
    pub fn histogram(&self) -> [usize; 256] {
        let mut histogram = [0usize; 256];
        for &v in self.samples.iter() {
            histogram[v as usize] += 1;
        }
        histogram
    }
}
