//! One plain function per workflow step, used by the command line front end.

use std::path::{Path, PathBuf};

use crate::media::HideOptions;
use crate::package::Unpacked;
use crate::{KeyBundle, Metrics, VeilError};

pub fn hide(
    secret: &Path,
    cover: &Path,
    write_to_file: &Path,
    key_bundle: Option<&Path>,
    options: HideOptions,
) -> Result<KeyBundle, VeilError> {
    crate::api::hide::prepare()
        .with_options(options)
        .with_secret(secret)
        .with_cover(cover)
        .with_output(write_to_file)
        .use_key_bundle(key_bundle)
        .execute()
}

pub fn unveil(stego: &Path, key_bundle: &Path, destination: &Path) -> Result<PathBuf, VeilError> {
    crate::api::unveil::prepare()
        .from_stego_image(stego)
        .with_key_bundle(key_bundle)
        .into_output_file(destination)
        .execute()
}

pub fn metrics(cover: &Path, stego: &Path) -> Result<Metrics, VeilError> {
    crate::api::metrics::prepare()
        .with_cover(cover)
        .with_stego_image(stego)
        .execute()
}

pub fn package(stego: &Path, key_bundle: &Path, archive: &Path) -> Result<PathBuf, VeilError> {
    crate::api::package::prepare()
        .with_stego_image(stego)
        .with_key_bundle(key_bundle)
        .into_archive(archive)
        .execute()
}

pub fn unpackage(archive: &Path, folder: &Path) -> Result<Unpacked, VeilError> {
    crate::api::package::prepare()
        .from_archive(archive)
        .unpack_into(folder)
}
