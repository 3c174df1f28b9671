//! One ZIP archive holding a stego image and its key bundle.

use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Read, Seek, Write};
use std::path::{Path, PathBuf};

use log::{error, info};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::VeilError;
use crate::media::{load_bytes, save_bytes, MediaKind};
use crate::result::Result;

/// extension of key bundle files
pub const KEY_BUNDLE_EXTENSION: &str = "pvk";

/// (entry name, content)
pub type Entry = (String, Vec<u8>);

pub fn write_archive<W: Write + Seek>(w: W, entries: &[Entry]) -> Result<()> {
    let mut zip = ZipWriter::new(w);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for (name, data) in entries {
        zip.start_file(name.as_str(), options)?;
        std::io::copy(&mut Cursor::new(data), &mut zip)?;
    }
    zip.finish()?;

    Ok(())
}

/// All entries of an archive, names reduced to their file name.
pub fn read_archive<R: Read + Seek>(r: R) -> Result<Vec<Entry>> {
    let mut zip = ZipArchive::new(r)?;
    let mut entries = Vec::with_capacity(zip.len());

    for i in 0..zip.len() {
        let mut file = zip.by_index(i)?;
        if file.is_dir() {
            continue;
        }
        let Some(name) = file
            .mangled_name()
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_owned)
        else {
            continue;
        };
        let mut data = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut data)?;
        entries.push((name, data));
    }

    Ok(entries)
}

/// Where [`unpack_archive`] put the two artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unpacked {
    pub stego: PathBuf,
    pub key_bundle: PathBuf,
}

/// Writes `stego` and `key_bundle` into a new archive named by their file names.
pub fn pack_archive(stego: &Path, key_bundle: &Path, archive: &Path) -> Result<()> {
    let entries = [stego, key_bundle]
        .into_iter()
        .map(|f| Ok((entry_name(f)?, load_bytes(f)?)))
        .collect::<Result<Vec<_>>>()?;

    let file = File::create(archive).map_err(|e| {
        error!("Error creating archive {archive:?}: {e}");
        VeilError::WriteError { source: e }
    })?;
    write_archive(BufWriter::new(file), &entries)?;
    info!("packaged {} entries into {archive:?}", entries.len());

    Ok(())
}

/// Extracts the stego image and the key bundle of `archive` into `folder`.
///
/// Nothing is written unless both artifacts are present.
pub fn unpack_archive(archive: &Path, folder: &Path) -> Result<Unpacked> {
    let file = File::open(archive).map_err(|e| {
        error!("Error opening archive {archive:?}: {e}");
        VeilError::ReadError { source: e }
    })?;
    let entries = read_archive(BufReader::new(file))?;

    let stego = entries
        .iter()
        .find(|(name, _)| is_stego_image(name))
        .ok_or_else(|| VeilError::MissingArchiveEntry("stego image".to_owned()))?;
    let key_bundle = entries
        .iter()
        .find(|(name, _)| has_extension(name, KEY_BUNDLE_EXTENSION))
        .ok_or_else(|| VeilError::MissingArchiveEntry("key bundle".to_owned()))?;

    let unpacked = Unpacked {
        stego: folder.join(&stego.0),
        key_bundle: folder.join(&key_bundle.0),
    };
    save_bytes(&stego.1, &unpacked.stego)?;
    save_bytes(&key_bundle.1, &unpacked.key_bundle)?;

    Ok(unpacked)
}

fn entry_name(f: &Path) -> Result<String> {
    f.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_owned)
        .ok_or_else(|| {
            error!("Cannot derive an archive entry name from {f:?}");
            VeilError::ReadError {
                source: std::io::ErrorKind::InvalidInput.into(),
            }
        })
}

fn is_stego_image(name: &str) -> bool {
    MediaKind::from_path(Path::new(name)).is_ok_and(|kind| kind.is_lossless())
}

fn has_extension(name: &str, ext: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}
