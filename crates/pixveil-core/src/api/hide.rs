use std::path::{Path, PathBuf};

use crate::media::HideOptions;
use crate::{KeyBundle, Session, VeilError};

pub fn prepare() -> HideApi {
    HideApi::default()
}

#[derive(Default, Debug)]
pub struct HideApi {
    secret: Option<PathBuf>,
    cover: Option<PathBuf>,
    output: Option<PathBuf>,
    key_bundle: Option<PathBuf>,
    options: HideOptions,
}

impl HideApi {
    pub fn with_options(mut self, options: HideOptions) -> Self {
        self.options = options;
        self
    }

    /// The file to hide, any file works unless the cover is resized to it
    pub fn with_secret<A: AsRef<Path>>(mut self, secret: A) -> Self {
        self.secret = Some(secret.as_ref().to_path_buf());
        self
    }

    pub fn with_cover<A: AsRef<Path>>(mut self, cover: A) -> Self {
        self.cover = Some(cover.as_ref().to_path_buf());
        self
    }

    /// The stego image, has to be a lossless format
    pub fn with_output<A: AsRef<Path>>(mut self, output: A) -> Self {
        self.output = Some(output.as_ref().to_path_buf());
        self
    }

    /// Where the key bundle goes, defaults to `key_data.pvk` next to the output
    pub fn with_key_bundle<A: AsRef<Path>>(mut self, key_bundle: A) -> Self {
        self.key_bundle = Some(key_bundle.as_ref().to_path_buf());
        self
    }

    pub fn use_key_bundle<A: AsRef<Path>>(mut self, key_bundle: Option<A>) -> Self {
        self.key_bundle = key_bundle.map(|k| k.as_ref().to_path_buf());
        self
    }

    pub fn execute(self) -> Result<KeyBundle, VeilError> {
        let Some(secret) = self.secret else {
            return Err(VeilError::SecretNotSet);
        };
        let Some(cover) = self.cover else {
            return Err(VeilError::CarrierNotSet);
        };
        let Some(output) = self.output else {
            return Err(VeilError::TargetNotSet);
        };

        let mut session = Session::new();
        session
            .with_options(self.options)
            .use_secret(secret)
            .use_cover(cover)
            .use_stego_image(output);
        if let Some(key_bundle) = self.key_bundle {
            session.use_key_bundle(key_bundle);
        }

        session.embed_and_encrypt()
    }
}
