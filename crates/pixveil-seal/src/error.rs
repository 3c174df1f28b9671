pub use eax::Error as EaxError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SealError {
    /// The tag did not verify the ciphertext under the given key and nonce
    #[error("Integrity error: authentication tag does not match the data")]
    IntegrityError,

    #[error("Encryption error")]
    EncryptionError(EaxError),
}
