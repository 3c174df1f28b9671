use std::path::PathBuf;

use clap::Args;

use crate::CliResult;

/// Unveils and decrypts a file hidden in an image
#[derive(Args, Debug)]
pub struct UnveilArgs {
    /// Stego image that contains the secret
    #[arg(short = 'i', long = "in", value_name = "stego image")]
    pub stego: PathBuf,

    /// Key bundle written when the secret was hidden
    #[arg(short, long, value_name = "key bundle file")]
    pub key_bundle: PathBuf,

    /// The recovered secret will be stored as this file
    #[arg(short = 'o', long = "out", value_name = "output file")]
    pub output_file: PathBuf,
}

impl UnveilArgs {
    pub fn run(self) -> CliResult<()> {
        let recovered =
            pixveil_core::commands::unveil(&self.stego, &self.key_bundle, &self.output_file)?;
        println!("Secret recovered to {}", recovered.display());

        Ok(())
    }
}
