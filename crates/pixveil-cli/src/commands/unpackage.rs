use std::path::PathBuf;

use clap::Args;

use crate::CliResult;

/// Extracts the stego image and the key bundle from an archive
#[derive(Args, Debug)]
pub struct UnpackageArgs {
    /// Archive created by the package command
    #[arg(short, long, value_name = "archive")]
    pub archive: PathBuf,

    /// Both files will be stored in that folder
    #[arg(short = 'o', long = "out", value_name = "output folder")]
    pub output_folder: PathBuf,
}

impl UnpackageArgs {
    pub fn run(self) -> CliResult<()> {
        let unpacked = pixveil_core::commands::unpackage(&self.archive, &self.output_folder)?;
        println!(
            "Unpacked {} and {}",
            unpacked.stego.display(),
            unpacked.key_bundle.display()
        );

        Ok(())
    }
}
