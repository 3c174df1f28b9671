//! Paths and state that carry over from one step of the workflow to the next.

use std::fs;
use std::path::{Path, PathBuf};

use log::{error, info};

use crate::error::VeilError;
use crate::key_bundle::KeyBundle;
use crate::media::{
    load_bytes, load_pixel_grid, save_bytes, save_pixel_grid, HideOptions, PixelGrid,
};
use crate::metrics::Metrics;
use crate::package::pack_archive;
use crate::result::Result;
use crate::veil::{hide, unveil};

pub const DEFAULT_STEGO_IMAGE: &str = "embedded.png";
pub const DEFAULT_KEY_BUNDLE: &str = "key_data.pvk";
pub const DEFAULT_PACKAGE: &str = "secure_package.zip";
pub const DEFAULT_RECOVERED_SECRET: &str = "recovered_secret.png";

/// A hide and unveil workflow.
///
/// The secret and the cover have to be chosen before embedding, every output
/// falls back to its default file name.
#[derive(Debug, Clone)]
pub struct Session {
    secret: Option<PathBuf>,
    cover: Option<PathBuf>,
    key_bundle: Option<PathBuf>,
    stego: PathBuf,
    package: PathBuf,
    recovered: PathBuf,
    options: HideOptions,
    carrier: Option<PixelGrid>,
}

impl Default for Session {
    fn default() -> Self {
        Self::in_dir("")
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// a session whose default outputs land in `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            secret: None,
            cover: None,
            key_bundle: None,
            stego: dir.join(DEFAULT_STEGO_IMAGE),
            package: dir.join(DEFAULT_PACKAGE),
            recovered: dir.join(DEFAULT_RECOVERED_SECRET),
            options: HideOptions::default(),
            carrier: None,
        }
    }

    pub fn with_options(&mut self, options: HideOptions) -> &mut Self {
        self.options = options;
        self
    }

    pub fn use_secret(&mut self, secret: impl AsRef<Path>) -> &mut Self {
        self.secret = Some(secret.as_ref().to_path_buf());
        self
    }

    pub fn use_cover(&mut self, cover: impl AsRef<Path>) -> &mut Self {
        self.cover = Some(cover.as_ref().to_path_buf());
        self
    }

    /// stego image written by embedding and read by extraction
    pub fn use_stego_image(&mut self, stego: impl AsRef<Path>) -> &mut Self {
        self.stego = stego.as_ref().to_path_buf();
        self
    }

    pub fn use_key_bundle(&mut self, key_bundle: impl AsRef<Path>) -> &mut Self {
        self.key_bundle = Some(key_bundle.as_ref().to_path_buf());
        self
    }

    pub fn save_package_as(&mut self, package: impl AsRef<Path>) -> &mut Self {
        self.package = package.as_ref().to_path_buf();
        self
    }

    pub fn save_recovered_as(&mut self, recovered: impl AsRef<Path>) -> &mut Self {
        self.recovered = recovered.as_ref().to_path_buf();
        self
    }

    pub fn stego_image(&self) -> &Path {
        &self.stego
    }

    pub fn key_bundle(&self) -> Option<&Path> {
        self.key_bundle.as_deref()
    }

    /// the chosen key bundle path, else `key_data.pvk` next to the stego image
    pub fn key_bundle_path(&self) -> PathBuf {
        match &self.key_bundle {
            Some(f) => f.clone(),
            None => self
                .stego
                .parent()
                .unwrap_or_else(|| Path::new(""))
                .join(DEFAULT_KEY_BUNDLE),
        }
    }

    /// Key bundle to read from, the default one only if it is on disk.
    fn existing_key_bundle(&self) -> Result<PathBuf> {
        let key_bundle = self.key_bundle_path();
        if self.key_bundle.is_none() && !key_bundle.is_file() {
            return Err(VeilError::KeyBundleNotSet);
        }

        Ok(key_bundle)
    }

    pub fn package(&self) -> &Path {
        &self.package
    }

    pub fn recovered(&self) -> &Path {
        &self.recovered
    }

    /// Hides the secret in the cover and writes the stego image and the key bundle.
    ///
    /// Without a chosen key bundle path it goes next to the stego image as
    /// `key_data.pvk`. The carrier is kept for [`Session::view_metrics`].
    pub fn embed_and_encrypt(&mut self) -> Result<KeyBundle> {
        let secret = self.secret.as_deref().ok_or(VeilError::SecretNotSet)?;
        let cover = self.cover.as_deref().ok_or(VeilError::CarrierNotSet)?;

        let secret = load_bytes(secret)?;
        let carrier = self.options.resize.apply(&load_pixel_grid(cover)?, &secret)?;
        let concealed = hide(&secret, &carrier)?;

        let key_bundle = self.key_bundle_path();
        let bundle_bytes = concealed.key_bundle.to_bytes()?;
        save_pixel_grid(&concealed.stego, &self.stego)?;
        if let Err(e) = save_bytes(&bundle_bytes, &key_bundle) {
            // a stego image without its bundle cannot be read back
            if let Err(rm) = fs::remove_file(&self.stego) {
                error!("Error removing {:?}: {rm}", self.stego);
            }
            return Err(e);
        }
        info!("secret hidden in {:?}", self.stego);

        self.key_bundle = Some(key_bundle);
        self.carrier = Some(carrier);

        Ok(concealed.key_bundle)
    }

    /// Reads the secret back out of the stego image and writes it to the recovered path.
    ///
    /// Without a chosen key bundle the default one next to the stego image is used.
    pub fn extract_and_decrypt(&self) -> Result<&Path> {
        let key_bundle = self.existing_key_bundle()?;

        let key_bundle = KeyBundle::from_bytes(&load_bytes(&key_bundle)?)?;
        let stego = load_pixel_grid(&self.stego)?;
        let secret = unveil(&stego, &key_bundle)?;
        save_bytes(&secret, &self.recovered)?;
        info!("secret recovered to {:?}", self.recovered);

        Ok(self.recovered.as_path())
    }

    /// Bundles the stego image and the key bundle into the package archive.
    pub fn export_package(&self) -> Result<&Path> {
        let key_bundle = self.existing_key_bundle()?;
        pack_archive(&self.stego, &key_bundle, &self.package)?;

        Ok(self.package.as_path())
    }

    /// Compares the written stego image with the carrier of the last embedding.
    pub fn view_metrics(&self) -> Result<Metrics> {
        let carrier = self.carrier.as_ref().ok_or(VeilError::MetricsUnavailable)?;
        let stego = load_pixel_grid(&self.stego)?;

        Metrics::evaluate(carrier, &stego)
    }
}
