//! Image quality metrics used to judge how visible the hidden data is.

use std::fmt::{self, Display, Formatter};

use crate::error::VeilError;
use crate::media::{GrayGrid, PixelGrid};
use crate::result::Result;

/// highest sample value of an 8 bit channel
pub const PEAK_U8: f64 = 255.0;

/// Mean squared error over every sample of two equally shaped grids.
pub fn mse(a: &PixelGrid, b: &PixelGrid) -> Result<f64> {
    if a.shape() != b.shape() {
        return Err(VeilError::ShapeMismatchError {
            left: a.shape(),
            right: b.shape(),
        });
    }
    let count = a.samples().len();
    if count == 0 {
        return Ok(0.0);
    }

    let sum = a
        .samples()
        .iter()
        .zip(b.samples())
        .map(|(&x, &y)| {
            let d = x as f64 - y as f64;
            d * d
        })
        .sum::<f64>();

    Ok(sum / count as f64)
}

/// Peak signal to noise ratio in dB, infinite for identical images.
pub fn psnr(mse: f64, peak: f64) -> f64 {
    if mse == 0.0 {
        return f64::INFINITY;
    }
    10.0 * (peak * peak / mse).log10()
}

/// Shannon entropy of the sample distribution in bits, within 0..=8.
pub fn entropy(gray: &GrayGrid) -> f64 {
    let total = gray.samples().len();
    if total == 0 {
        return 0.0;
    }

    let total = total as f64;
    gray.histogram()
        .iter()
        .filter(|&&n| n > 0)
        .map(|&n| {
            // p * log2(1 / p), never below zero
            let n = n as f64;
            n / total * (total / n).log2()
        })
        .sum()
}

/// Quality report of a stego image compared to its cover.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub mse: f64,
    pub psnr: f64,
    /// entropy of the stego image's grayscale view
    pub entropy: f64,
}

impl Metrics {
    pub fn evaluate(cover: &PixelGrid, stego: &PixelGrid) -> Result<Self> {
        let mse = mse(cover, stego)?;

        Ok(Self {
            mse,
            psnr: psnr(mse, PEAK_U8),
            entropy: entropy(&stego.to_gray()),
        })
    }
}

impl Display for Metrics {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MSE: {:.2} / PSNR: {:.2} dB / Entropy: {:.4}",
            self.mse, self.psnr, self.entropy
        )
    }
}
