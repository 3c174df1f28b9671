use std::path::{Path, PathBuf};

use crate::package::{pack_archive, unpack_archive, Unpacked};
use crate::VeilError;

pub fn prepare() -> PackageApi {
    PackageApi::default()
}

/// Packs a stego image and its key bundle, or unpacks such an archive
/// when only [`PackageApi::from_archive`] and an output are given.
#[derive(Default, Debug)]
pub struct PackageApi {
    stego: Option<PathBuf>,
    key_bundle: Option<PathBuf>,
    archive: Option<PathBuf>,
}

impl PackageApi {
    pub fn with_stego_image(mut self, stego: impl AsRef<Path>) -> Self {
        self.stego = Some(stego.as_ref().to_path_buf());
        self
    }

    pub fn with_key_bundle(mut self, key_bundle: impl AsRef<Path>) -> Self {
        self.key_bundle = Some(key_bundle.as_ref().to_path_buf());
        self
    }

    /// The archive to write
    pub fn into_archive(mut self, archive: impl AsRef<Path>) -> Self {
        self.archive = Some(archive.as_ref().to_path_buf());
        self
    }

    /// The archive to read, see [`PackageApi::unpack_into`]
    pub fn from_archive(self, archive: impl AsRef<Path>) -> Self {
        self.into_archive(archive)
    }

    pub fn execute(self) -> Result<PathBuf, VeilError> {
        let Some(stego) = self.stego else {
            return Err(VeilError::CarrierNotSet);
        };
        let Some(key_bundle) = self.key_bundle else {
            return Err(VeilError::KeyBundleNotSet);
        };
        let Some(archive) = self.archive else {
            return Err(VeilError::TargetNotSet);
        };

        pack_archive(&stego, &key_bundle, &archive)?;

        Ok(archive)
    }

    /// Extracts stego image and key bundle into `folder`
    pub fn unpack_into(self, folder: impl AsRef<Path>) -> Result<Unpacked, VeilError> {
        let Some(archive) = self.archive else {
            return Err(VeilError::TargetNotSet);
        };

        unpack_archive(&archive, folder.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn illustrate_api_usage() {
        let temp_dir = tempdir().expect("Failed to create temporary directory");
        let stego = temp_dir.path().join("embedded.png");
        let key_bundle = temp_dir.path().join("key_data.pvk");
        fs::write(&stego, b"stego").unwrap();
        fs::write(&key_bundle, b"bundle").unwrap();

        let archive = crate::api::package::prepare()
            .with_stego_image(&stego)
            .with_key_bundle(&key_bundle)
            .into_archive(temp_dir.path().join("secure_package.zip"))
            .execute()
            .expect("Failed to create the package");

        let out = temp_dir.path().join("received");
        fs::create_dir(&out).unwrap();
        let unpacked = crate::api::package::prepare()
            .from_archive(&archive)
            .unpack_into(&out)
            .expect("Failed to unpack the package");

        assert_eq!(fs::read(unpacked.stego).unwrap(), b"stego");
        assert_eq!(fs::read(unpacked.key_bundle).unwrap(), b"bundle");
    }

    #[test]
    fn should_require_the_artifacts() {
        assert!(matches!(
            prepare().with_stego_image("a.png").into_archive("p.zip").execute(),
            Err(VeilError::KeyBundleNotSet)
        ));
        assert!(matches!(
            prepare().unpack_into("."),
            Err(VeilError::TargetNotSet)
        ));
    }
}
