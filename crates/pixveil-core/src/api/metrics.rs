use std::path::{Path, PathBuf};

use crate::media::load_pixel_grid;
use crate::{Metrics, VeilError};

pub fn prepare() -> MetricsApi {
    MetricsApi::default()
}

#[derive(Default, Debug)]
pub struct MetricsApi {
    cover: Option<PathBuf>,
    stego: Option<PathBuf>,
}

impl MetricsApi {
    /// The carrier the data was hidden in
    pub fn with_cover(mut self, cover: impl AsRef<Path>) -> Self {
        self.cover = Some(cover.as_ref().to_path_buf());
        self
    }

    pub fn with_stego_image(mut self, stego: impl AsRef<Path>) -> Self {
        self.stego = Some(stego.as_ref().to_path_buf());
        self
    }

    pub fn execute(self) -> Result<Metrics, VeilError> {
        let Some(cover) = self.cover else {
            return Err(VeilError::CarrierNotSet);
        };
        let Some(stego) = self.stego else {
            return Err(VeilError::MetricsUnavailable);
        };

        Metrics::evaluate(&load_pixel_grid(&cover)?, &load_pixel_grid(&stego)?)
    }
}
