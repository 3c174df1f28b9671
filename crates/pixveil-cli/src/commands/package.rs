use std::path::PathBuf;

use clap::Args;

use crate::CliResult;

/// Bundles a stego image and its key bundle into one ZIP archive
#[derive(Args, Debug)]
pub struct PackageArgs {
    /// Stego image
    #[arg(short = 'i', long = "in", value_name = "stego image")]
    pub stego: PathBuf,

    /// Key bundle of the stego image
    #[arg(short, long, value_name = "key bundle file")]
    pub key_bundle: PathBuf,

    /// Archive to create
    #[arg(
        short = 'o',
        long = "out",
        value_name = "archive",
        default_value = "secure_package.zip"
    )]
    pub archive: PathBuf,
}

impl PackageArgs {
    pub fn run(self) -> CliResult<()> {
        let archive = pixveil_core::commands::package(&self.stego, &self.key_bundle, &self.archive)?;
        println!("Package written to {}", archive.display());

        Ok(())
    }
}
