use std::path::{Path, PathBuf};

use crate::{Session, VeilError};

pub fn prepare() -> UnveilApi {
    UnveilApi::default()
}

#[derive(Default, Debug)]
pub struct UnveilApi {
    stego: Option<PathBuf>,
    key_bundle: Option<PathBuf>,
    output: Option<PathBuf>,
}

impl UnveilApi {
    /// This is the stego image that contains the data to be unveiled
    pub fn from_stego_image(mut self, stego: impl AsRef<Path>) -> Self {
        self.stego = Some(stego.as_ref().to_path_buf());
        self
    }

    /// The key bundle written when the data was hidden
    pub fn with_key_bundle(mut self, key_bundle: impl AsRef<Path>) -> Self {
        self.key_bundle = Some(key_bundle.as_ref().to_path_buf());
        self
    }

    /// This is the file the recovered secret will be saved to
    pub fn into_output_file(mut self, output: impl AsRef<Path>) -> Self {
        self.output = Some(output.as_ref().to_path_buf());
        self
    }

    /// Execute the unveil process and blocks until it is finished
    pub fn execute(self) -> Result<PathBuf, VeilError> {
        let Some(stego) = self.stego else {
            return Err(VeilError::CarrierNotSet);
        };
        let Some(key_bundle) = self.key_bundle else {
            return Err(VeilError::KeyBundleNotSet);
        };
        let Some(output) = self.output else {
            return Err(VeilError::TargetNotSet);
        };

        let mut session = Session::new();
        session
            .use_stego_image(stego)
            .use_key_bundle(key_bundle)
            .save_recovered_as(output);

        session.extract_and_decrypt().map(Path::to_path_buf)
    }
}
