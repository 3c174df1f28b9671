use thiserror::Error;
use zip::result::ZipError;

pub use pixveil_seal::SealError;

use crate::media::Shape;

#[derive(Error, Debug)]
pub enum VeilError {
    /// Represents a failed tag verification, the key bundle does not belong to the data or one of them was tampered with
    #[error("Integrity error: the hidden data failed authentication, it was altered or the key bundle does not match")]
    IntegrityError,

    /// Represents a bit sequence that does not fit into the carrier
    #[error(
        "Capacity error: {required} bits have to be hidden but the carrier offers only {available} slots"
    )]
    CapacityError { required: usize, available: usize },

    /// Represents an extraction that asks for more bits than the image can hold
    #[error(
        "Truncated stego image: {requested} bits were requested but the image holds only {available}"
    )]
    TruncatedStegoError { requested: usize, available: usize },

    /// Represents two grids that cannot be compared or a stego image that does not fit its key bundle
    #[error("Shape mismatch: {left} vs. {right}")]
    ShapeMismatchError { left: Shape, right: Shape },

    /// Represents a pixel buffer that does not describe a grid with at least 3 channels
    #[error("Invalid pixel grid: {0}")]
    InvalidPixelGrid(String),

    /// Represents an unsupported media. For example, a WAV file is not supported
    #[error("Media format is not supported")]
    UnsupportedMedia,

    /// Represents an invalid image media. For example, a broken PNG file
    #[error("Image media is invalid")]
    InvalidImageMedia,

    /// Represents a stego target format that would destroy the hidden bits
    #[error("Lossy image formats cannot carry hidden data, use PNG instead of '{0}'")]
    LossyTargetFormat(String),

    /// Represents a key bundle that could not be parsed
    #[error("Key bundle is invalid: {0}")]
    InvalidKeyBundle(&'static str),

    /// Represents a key bundle written by an unknown format version
    #[error("Unsupported key bundle format version: {0}")]
    UnsupportedKeyBundleVersion(u8),

    /// Represents a failure to read from input.
    #[error("Read error")]
    ReadError { source: std::io::Error },

    /// Represents a failure to write target file.
    #[error("Write error")]
    WriteError { source: std::io::Error },

    /// Represents a failure when encoding an image file.
    #[error("Image encoding error")]
    ImageEncodingError,

    /// Represents all other cases of `std::io::Error`.
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    /// Represents an error when creating or reading the package archive
    #[error("Error during packaging")]
    PackagingError(#[from] ZipError),

    /// Represents an archive that lacks one of the expected artifacts
    #[error("The package does not contain '{0}'")]
    MissingArchiveEntry(String),

    /// Represents an error when encrypting the data
    #[error("Encryption error")]
    EncryptionError(SealError),

    #[error("No carrier image set")]
    CarrierNotSet,

    #[error("No secret set")]
    SecretNotSet,

    #[error("No key bundle set")]
    KeyBundleNotSet,

    #[error("No target file set")]
    TargetNotSet,

    #[error("Metrics unavailable: hide something first, the original cover is not known")]
    MetricsUnavailable,
}

impl From<SealError> for VeilError {
    fn from(e: SealError) -> Self {
        match e {
            SealError::IntegrityError => VeilError::IntegrityError,
            other => VeilError::EncryptionError(other),
        }
    }
}
