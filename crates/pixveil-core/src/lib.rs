//! # Pixveil Core API
//!
//! Hides a secret file in the least significant bits of a cover image. The
//! secret is encrypted with AES-128-EAX first, the key, nonce and tag travel
//! next to the stego image in a [`KeyBundle`].
//!
//! The building blocks work on in-memory values only:
//! - [`hide`] and [`unveil`] for the whole round trip
//! - [`LsbCodec`] for embedding and extracting raw bits
//! - [`Metrics`] for judging the stego image against its cover
//!
//! File based workflows go through [`Session`] or the builders in [`api`].
//!
//! # Usage Examples
//!
//! ## Hide a file inside an image
//!
//! ```rust
//! use pixveil_core::media::{save_pixel_grid, PixelGrid};
//! use tempfile::tempdir;
//!
//! let temp_dir = tempdir().expect("Failed to create temporary directory");
//! let cover = temp_dir.path().join("cover.png");
//! save_pixel_grid(&PixelGrid::filled(100, 100, 3, 42).unwrap(), &cover).unwrap();
//!
//! pixveil_core::api::hide::prepare()
//!     .with_secret("Cargo.toml")
//!     .with_cover(&cover)
//!     .with_output(temp_dir.path().join("image-with-a-file-inside.png"))
//!     .with_key_bundle(temp_dir.path().join("image-with-a-file-inside.pvk"))
//!     .execute()
//!     .expect("Failed to hide file in image");
//! ```
//!
//! ## Round trip in memory
//!
//! ```rust
//! use pixveil_core::{hide, unveil, PixelGrid};
//!
//! let cover = PixelGrid::filled(12, 12, 3, 0).unwrap();
//! let concealed = hide(&[0xAB; 50], &cover).unwrap();
//!
//! assert_eq!(concealed.key_bundle.bit_length, 400);
//! assert_eq!(unveil(&concealed.stego, &concealed.key_bundle).unwrap(), [0xAB; 50]);
//! ```

#![warn(clippy::redundant_else)]

pub mod bit_iterator;
pub use bit_iterator::{bits_to_bytes, bytes_to_bits, BitIterator};

pub mod api;
pub mod capacity;
pub mod commands;
pub mod error;
pub mod key_bundle;
pub mod media;
pub mod metrics;
pub mod package;
pub mod result;
pub mod session;
pub mod veil;

pub use crate::capacity::{capacity, check_capacity, CapacityReport, ResizePolicy};
pub use crate::error::VeilError;
pub use crate::key_bundle::KeyBundle;
pub use crate::media::image::LsbCodec;
pub use crate::media::{GrayGrid, HideOptions, PixelGrid, Shape};
pub use crate::metrics::{entropy, mse, psnr, Metrics, PEAK_U8};
pub use crate::result::Result;
pub use crate::session::Session;
pub use crate::veil::{hide, unveil, Concealed};
