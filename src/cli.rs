//! Command-line interface definitions for Awful Digest.
//!
//! The interface takes exactly one positional argument, the article URL.
//! Options can be provided via flags or environment variables.

use clap::error::ErrorKind;
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

/// Command-line arguments for the Awful Digest application.
///
/// # Examples
///
/// ```sh
/// awful_digest https://example.com/2025/01/09/cats-explained
///
/// # With a custom configuration and model directory
/// awful_digest --config ./digest.yaml --models-dir /opt/models https://example.com/article
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// URL of the article to digest
    #[arg(value_name = "URL")]
    pub urls: Vec<String>,

    /// Optional path to a YAML configuration file
    #[arg(short, long, env = "AWFUL_DIGEST_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding the local models (overrides the configuration file)
    #[arg(long, env = "AWFUL_DIGEST_MODELS_DIR")]
    pub models_dir: Option<PathBuf>,
}

/// Outcome of command-line parsing.
#[derive(Debug)]
pub enum Invocation {
    /// Exactly one URL was given.
    Run { url: String, cli: Cli },
    /// Wrong number of URLs or an unparseable command line.
    Usage,
    /// `--help` or `--version`; clap renders these itself.
    Informational(clap::Error),
}

impl Invocation {
    pub fn from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        match Cli::try_parse_from(args) {
            Ok(mut cli) if cli.urls.len() == 1 => {
                let url = cli.urls.remove(0);
                Self::Run { url, cli }
            }
            Ok(_) => Self::Usage,
            Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                Self::Informational(e)
            }
            Err(_) => Self::Usage,
        }
    }
}

/// Message reported when the invocation is malformed.
pub fn usage_message() -> String {
    format!("Usage: {} <URL>", env!("CARGO_PKG_NAME"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_url() {
        match Invocation::from_args(["awful_digest", "https://example.com/a"]) {
            Invocation::Run { url, cli } => {
                assert_eq!(url, "https://example.com/a");
                assert!(cli.urls.is_empty());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_options_with_url() {
        match Invocation::from_args([
            "awful_digest",
            "--config",
            "/etc/digest.yaml",
            "--models-dir",
            "/opt/models",
            "https://example.com/a",
        ]) {
            Invocation::Run { cli, .. } => {
                assert_eq!(cli.config, Some(PathBuf::from("/etc/digest.yaml")));
                assert_eq!(cli.models_dir, Some(PathBuf::from("/opt/models")));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_wrong_arity_is_usage() {
        assert!(matches!(Invocation::from_args(["awful_digest"]), Invocation::Usage));
        assert!(matches!(
            Invocation::from_args(["awful_digest", "https://a.example", "https://b.example"]),
            Invocation::Usage
        ));
        assert!(matches!(
            Invocation::from_args(["awful_digest", "--bogus", "https://a.example"]),
            Invocation::Usage
        ));
    }

    #[test]
    fn test_help_is_informational() {
        assert!(matches!(
            Invocation::from_args(["awful_digest", "--help"]),
            Invocation::Informational(_)
        ));
    }

    #[test]
    fn test_usage_message() {
        assert_eq!(usage_message(), "Usage: awful_digest <URL>");
    }
}
