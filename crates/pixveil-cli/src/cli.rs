use clap::{Parser, Subcommand};

use crate::commands::*;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Hide(hide::HideArgs),
    Unveil(unveil::UnveilArgs),
    Metrics(metrics::MetricsArgs),
    Package(package::PackageArgs),
    Unpackage(unpackage::UnpackageArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::path::Path;

    #[test]
    fn verify_cli() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn should_parse_hide_with_the_resize_flag() {
        let args = CliArgs::parse_from([
            "pixveil",
            "hide",
            "-s",
            "secret.png",
            "-c",
            "cover.jpg",
            "-o",
            "embedded.png",
            "--match-secret-size",
        ]);

        match args.command {
            Commands::Hide(hide) => {
                assert_eq!(hide.secret, Path::new("secret.png"));
                assert_eq!(hide.key_bundle, None);
                assert!(hide.match_secret_size);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn should_require_a_key_bundle_for_unveil() {
        let parsed =
            CliArgs::try_parse_from(["pixveil", "unveil", "-i", "embedded.png", "-o", "out.png"]);

        assert!(parsed.is_err());
    }
}
