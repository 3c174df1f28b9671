use std::fs::{self, File};
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

use image::{DynamicImage, GenericImageView, ImageFormat, RgbImage, RgbaImage};
use log::{error, info};

use crate::error::VeilError;
use crate::media::PixelGrid;
use crate::result::Result;

/// image formats a cover or secret image may come in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Png,
    Jpeg,
    Bmp,
}

impl MediaKind {
    pub fn from_path(f: &Path) -> Result<Self> {
        let ext = f
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .ok_or(VeilError::UnsupportedMedia)?;

        match ext.as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "bmp" => Ok(Self::Bmp),
            _ => Err(VeilError::UnsupportedMedia),
        }
    }

    /// true if every sample survives a save and load cycle
    pub fn is_lossless(&self) -> bool {
        !matches!(self, Self::Jpeg)
    }

    fn image_format(&self) -> ImageFormat {
        match self {
            Self::Png => ImageFormat::Png,
            Self::Jpeg => ImageFormat::Jpeg,
            Self::Bmp => ImageFormat::Bmp,
        }
    }
}

impl TryFrom<DynamicImage> for PixelGrid {
    type Error = VeilError;

    /// images with alpha keep 4 channels, everything else is turned into RGB
    fn try_from(img: DynamicImage) -> Result<Self> {
        let (width, height) = img.dimensions();
        let (channels, samples) = if img.color().has_alpha() {
            (4, img.to_rgba8().into_raw())
        } else {
            (3, img.to_rgb8().into_raw())
        };

        Self::new(height as usize, width as usize, channels, samples)
    }
}

impl TryFrom<&PixelGrid> for DynamicImage {
    type Error = VeilError;

    fn try_from(grid: &PixelGrid) -> Result<Self> {
        let (height, width) = grid.dimensions();
        let (width, height) = (width as u32, height as u32);
        let samples = grid.samples().to_vec();

        let img = match grid.channels() {
            3 => RgbImage::from_raw(width, height, samples).map(DynamicImage::ImageRgb8),
            4 => RgbaImage::from_raw(width, height, samples).map(DynamicImage::ImageRgba8),
            _ => None,
        };

        img.ok_or_else(|| {
            VeilError::InvalidPixelGrid(format!(
                "a {} grid cannot be stored as an image",
                grid.shape()
            ))
        })
    }
}

/// decodes a PNG, JPEG or BMP file into a pixel grid
pub fn load_pixel_grid(f: &Path) -> Result<PixelGrid> {
    MediaKind::from_path(f)?;
    let img = image::open(f).map_err(|e| {
        error!("Error decoding image {f:?}: {e}");
        VeilError::InvalidImageMedia
    })?;

    img.try_into()
}

/// decodes an in-memory image, the format is guessed from the content
pub fn decode_pixel_grid(data: &[u8]) -> Result<PixelGrid> {
    let img = image::load_from_memory(data).map_err(|e| {
        error!("Error decoding image from memory: {e}");
        VeilError::InvalidImageMedia
    })?;

    img.try_into()
}

/// Saves the grid in a lossless format chosen by the file extension.
/// JPEG is refused because recompression would destroy the hidden bits.
pub fn save_pixel_grid(grid: &PixelGrid, f: &Path) -> Result<()> {
    let kind = MediaKind::from_path(f)?;
    if !kind.is_lossless() {
        let ext = f
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_owned();
        return Err(VeilError::LossyTargetFormat(ext));
    }

    let file = File::create(f).map_err(|e| {
        error!("Error creating file {f:?}: {e}");
        VeilError::WriteError { source: e }
    })?;
    write_pixel_grid(grid, BufWriter::new(file), kind)?;
    info!("saved {} image to {f:?}", grid.shape());

    Ok(())
}

pub fn write_pixel_grid<W: Write + Seek>(
    grid: &PixelGrid,
    mut writer: W,
    kind: MediaKind,
) -> Result<()> {
    let img = DynamicImage::try_from(grid)?;
    img.write_to(&mut writer, kind.image_format())
        .map_err(|e| {
            error!("Error saving image: {e}");
            VeilError::ImageEncodingError
        })?;
    writer
        .flush()
        .map_err(|source| VeilError::WriteError { source })
}

pub fn load_bytes(f: &Path) -> Result<Vec<u8>> {
    fs::read(f).map_err(|e| {
        error!("Error reading file {f:?}: {e}");
        VeilError::ReadError { source: e }
    })
}

pub fn save_bytes(data: &[u8], f: &Path) -> Result<()> {
    fs::write(f, data).map_err(|e| {
        error!("Error writing file {f:?}: {e}");
        VeilError::WriteError { source: e }
    })?;
    info!("wrote {} bytes to {f:?}", data.len());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn gradient(channels: usize) -> PixelGrid {
        PixelGrid::from_fn(7, 5, channels, |r, c, ch| (r * 31 + c * 7 + ch * 3) as u8).unwrap()
    }

    #[test]
    fn should_recognize_media_by_extension() {
        assert_eq!(MediaKind::from_path("a.PNG".as_ref()).unwrap(), MediaKind::Png);
        assert_eq!(MediaKind::from_path("a.jpeg".as_ref()).unwrap(), MediaKind::Jpeg);
        assert_eq!(MediaKind::from_path("a.bmp".as_ref()).unwrap(), MediaKind::Bmp);
        assert!(matches!(
            MediaKind::from_path("Cargo.toml".as_ref()),
            Err(VeilError::UnsupportedMedia)
        ));
        assert!(matches!(
            MediaKind::from_path("no_extension".as_ref()),
            Err(VeilError::UnsupportedMedia)
        ));
    }

    #[test]
    fn should_round_trip_rgb_and_rgba_through_png() -> Result<()> {
        let out_dir = TempDir::new()?;
        for channels in [3, 4] {
            let grid = gradient(channels);
            let target = out_dir.path().join(format!("grid-{channels}.png"));

            save_pixel_grid(&grid, &target)?;
            assert_eq!(load_pixel_grid(&target)?, grid);
        }

        Ok(())
    }

    #[test]
    fn should_round_trip_through_bmp() -> Result<()> {
        let out_dir = TempDir::new()?;
        let grid = gradient(3);
        let target = out_dir.path().join("grid.bmp");

        save_pixel_grid(&grid, &target)?;
        assert_eq!(load_pixel_grid(&target)?, grid);

        Ok(())
    }

    #[test]
    fn should_refuse_lossy_targets() {
        let out_dir = TempDir::new().unwrap();
        let target = out_dir.path().join("stego.jpg");

        match save_pixel_grid(&gradient(3), &target) {
            Err(VeilError::LossyTargetFormat(ext)) => assert_eq!(ext, "jpg"),
            other => panic!("unexpected {other:?}"),
        }
        assert!(!target.exists(), "nothing must be written");
    }

    #[test]
    fn should_decode_from_memory() -> Result<()> {
        let grid = gradient(4);
        let mut png = Cursor::new(Vec::new());
        write_pixel_grid(&grid, &mut png, MediaKind::Png)?;

        assert_eq!(decode_pixel_grid(png.get_ref())?, grid);
        assert!(matches!(
            decode_pixel_grid(b"definitely not an image"),
            Err(VeilError::InvalidImageMedia)
        ));

        Ok(())
    }

    #[test]
    fn should_report_broken_images() {
        let out_dir = TempDir::new().unwrap();
        let broken = out_dir.path().join("broken.png");
        fs::write(&broken, b"no png at all").unwrap();

        assert!(matches!(
            load_pixel_grid(&broken),
            Err(VeilError::InvalidImageMedia)
        ));
        assert!(matches!(
            load_pixel_grid("some_random_file.png".as_ref()),
            Err(VeilError::InvalidImageMedia)
        ));
    }

    #[test]
    fn should_read_and_write_bytes() -> Result<()> {
        let out_dir = TempDir::new()?;
        let target = out_dir.path().join("blob.bin");

        save_bytes(&[1, 2, 3], &target)?;
        assert_eq!(load_bytes(&target)?, [1, 2, 3]);
        assert!(matches!(
            load_bytes(&out_dir.path().join("missing.bin")),
            Err(VeilError::ReadError { .. })
        ));

        Ok(())
    }
}
