use std::path::PathBuf;

use clap::Args;

use crate::CliResult;

/// Compares a stego image with its cover
#[derive(Args, Debug)]
pub struct MetricsArgs {
    /// Cover image the secret was hidden in
    #[arg(short, long, value_name = "cover image")]
    pub cover: PathBuf,

    /// Stego image
    #[arg(short = 'i', long = "in", value_name = "stego image")]
    pub stego: PathBuf,
}

impl MetricsArgs {
    pub fn run(self) -> CliResult<()> {
        println!("{}", pixveil_core::commands::metrics(&self.cover, &self.stego)?);

        Ok(())
    }
}
