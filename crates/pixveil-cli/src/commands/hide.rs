use std::path::PathBuf;

use clap::Args;
use log::warn;
use pixveil_core::capacity::suggest_dimensions;
use pixveil_core::media::{load_pixel_grid, PixelGrid};
use pixveil_core::{HideOptions, ResizePolicy, VeilError};

use crate::CliResult;

/// Encrypts a file and hides it in an image
#[derive(Args, Debug)]
pub struct HideArgs {
    /// File to hide, typically an image
    #[arg(short, long, value_name = "secret file")]
    pub secret: PathBuf,

    /// Cover image (PNG, JPEG or BMP), used readonly
    #[arg(short, long, value_name = "cover image")]
    pub cover: PathBuf,

    /// Stego image, has to be PNG or BMP
    #[arg(short = 'o', long = "out", value_name = "output image file")]
    pub write_to_file: PathBuf,

    /// Key bundle file, defaults to key_data.pvk next to the output image
    #[arg(short, long, value_name = "key bundle file")]
    pub key_bundle: Option<PathBuf>,

    /// Resize the cover to the pixel dimensions of the secret image
    #[arg(long)]
    pub match_secret_size: bool,
}

impl HideArgs {
    pub fn run(self) -> CliResult<()> {
        let resize = if self.match_secret_size {
            ResizePolicy::MatchSecret
        } else {
            ResizePolicy::KeepCover
        };

        let result = pixveil_core::commands::hide(
            &self.secret,
            &self.cover,
            &self.write_to_file,
            self.key_bundle.as_deref(),
            HideOptions::default().with_resize(resize),
        );

        match result {
            Ok(bundle) => {
                println!(
                    "Secret hidden in {}, {} bits used",
                    self.write_to_file.display(),
                    bundle.bit_length
                );
                Ok(())
            }
            Err(VeilError::CapacityError {
                required,
                available,
            }) if !self.match_secret_size => {
                if let Ok(cover) = load_pixel_grid(&self.cover) {
                    let hint = capacity_hint(&cover, required);
                    warn!("cover too small, {hint}");
                    eprintln!("Hint: {hint}");
                }
                Err(VeilError::CapacityError {
                    required,
                    available,
                })
            }
            Err(e) => Err(e),
        }
    }
}

/// dimensions are given as width x height, like image viewers do
fn capacity_hint(cover: &PixelGrid, required_bits: usize) -> String {
    let (height, width) = suggest_dimensions(cover, required_bits);
    format!("a cover of at least {width}x{height} pixels would fit the secret")
}
