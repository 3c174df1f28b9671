//! Capacity checks and the cover fitting policy.
//!
//! Every pixel offers one slot per RGB channel, so a `height x width` cover
//! holds `height * width * 3` bits no matter how many channels it has.

use std::io::Cursor;

use image::imageops::FilterType;
use image::DynamicImage;
use log::{debug, error};
use pixveil_seal::CipherPayload;

use crate::bit_iterator::bytes_to_bits;
use crate::error::VeilError;
use crate::media::{PixelGrid, RGB_CHANNELS};
use crate::result::Result;

/// number of bits `grid` can carry
pub fn capacity(grid: &PixelGrid) -> usize {
    grid.height() * grid.width() * RGB_CHANNELS
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityReport {
    pub required: usize,
    pub available: usize,
}

impl CapacityReport {
    pub fn of(grid: &PixelGrid, required: usize) -> Self {
        Self {
            required,
            available: capacity(grid),
        }
    }

    pub fn fits(&self) -> bool {
        self.required <= self.available
    }

    /// slots left after hiding
    pub fn spare(&self) -> usize {
        self.available.saturating_sub(self.required)
    }

    /// share of the slots in use, 0.0 for a grid without slots
    pub fn utilization(&self) -> f64 {
        if self.available == 0 {
            return 0.0;
        }
        self.required as f64 / self.available as f64
    }
}

/// fails with [`VeilError::CapacityError`] when `required_bits` do not fit into `grid`
pub fn check_capacity(grid: &PixelGrid, required_bits: usize) -> Result<CapacityReport> {
    let report = CapacityReport::of(grid, required_bits);
    debug!(
        "capacity of {} carrier: {} slots, {} required",
        grid.shape(),
        report.available,
        report.required
    );
    if !report.fits() {
        return Err(VeilError::CapacityError {
            required: report.required,
            available: report.available,
        });
    }

    Ok(report)
}

/// Smallest (height, width) with about the aspect ratio of `grid` that can carry `required_bits`.
pub fn suggest_dimensions(grid: &PixelGrid, required_bits: usize) -> (usize, usize) {
    let needed_pixels = required_bits.div_ceil(RGB_CHANNELS);
    let (height, width) = grid.dimensions();
    if height == 0 || width == 0 {
        let side = (needed_pixels as f64).sqrt().ceil() as usize;
        return (side.max(1), side.max(1));
    }

    let scale = (needed_pixels as f64 / (height * width) as f64).sqrt();
    let mut h = ((height as f64 * scale).ceil() as usize).max(1);
    let mut w = ((width as f64 * scale).ceil() as usize).max(1);
    while h * w < needed_pixels {
        if h * width <= w * height {
            h += 1;
        } else {
            w += 1;
        }
    }

    (h, w)
}

/// How the cover is sized before hiding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizePolicy {
    /// use the cover as it is
    #[default]
    KeepCover,
    /// scale the cover to the pixel dimensions of the secret, which then has to be an image
    MatchSecret,
}

impl ResizePolicy {
    pub fn apply(&self, cover: &PixelGrid, secret: &[u8]) -> Result<PixelGrid> {
        match self {
            Self::KeepCover => Ok(cover.clone()),
            Self::MatchSecret => {
                let (height, width) = secret_image_dimensions(secret)?;
                resize(cover, height, width)
            }
        }
    }
}

/// (height, width) of an encoded image without decoding its pixels
pub fn secret_image_dimensions(secret: &[u8]) -> Result<(usize, usize)> {
    let (width, height) = image::io::Reader::new(Cursor::new(secret))
        .with_guessed_format()?
        .into_dimensions()
        .map_err(|e| {
            error!("Error reading the secret image dimensions: {e}");
            VeilError::InvalidImageMedia
        })?;

    Ok((height as usize, width as usize))
}

/// bicubic resampling to the given size, the channel count is kept
pub fn resize(grid: &PixelGrid, height: usize, width: usize) -> Result<PixelGrid> {
    if height == 0 || width == 0 {
        return Err(VeilError::InvalidPixelGrid(format!(
            "cannot resize to {height}x{width}"
        )));
    }
    if grid.dimensions() == (height, width) {
        return Ok(grid.clone());
    }

    debug!("resizing {} cover to {height}x{width}", grid.shape());
    DynamicImage::try_from(grid)?
        .resize_exact(width as u32, height as u32, FilterType::CatmullRom)
        .try_into()
}

/// encrypted secret, its bits and the capacity they need
#[derive(Debug)]
pub struct Prepared {
    pub bits: Vec<bool>,
    pub payload: CipherPayload,
    pub capacity: CapacityReport,
}

/// Encrypts `secret` and makes sure its bits fit into `cover`.
pub fn prepare(secret: &[u8], cover: &PixelGrid) -> Result<Prepared> {
    let payload = pixveil_seal::encrypt(secret)?;
    let bits = bytes_to_bits(&payload.ciphertext);
    let capacity = check_capacity(cover, bits.len())?;

    Ok(Prepared {
        bits,
        payload,
        capacity,
    })
}
