//! Command-line arguments

use clap::Parser;
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "omnihash")]
#[command(
    author,
    about = "Hash files, strings, input streams and network resources in various common algorithms",
    long_about = "If HASHME is a URL, hash the content it serves. Elif it names an existing file, \
                  hash that file. Otherwise hash HASHME itself as a string. With no HASHME, \
                  standard input is hashed.",
    disable_version_flag = true
)]
pub struct Cli {
    /// URLs, files or strings to hash
    #[arg(value_name = "HASHME")]
    pub hashmes: Vec<String>,

    /// Hash input as string, even if there is a file with that name
    #[arg(short = 's', long = "string")]
    pub string: bool,

    /// Show version and quit
    #[arg(short = 'v', short_alias = 'V', long = "version")]
    pub version: bool,

    /// Calculate CRCs as well
    #[arg(short = 'c', long = "crc")]
    pub crc: bool,

    /// Select one or more families of algorithms: include only algos having TEXT in their names
    #[arg(short = 'f', long = "family", value_name = "TEXT")]
    pub families: Vec<String>,

    /// Exclude algorithms having TEXT in their names; wins over --family
    #[arg(short = 'x', long = "exclude", value_name = "TEXT")]
    pub excludes: Vec<String>,

    /// Only show digests containing TEXT (case insensitive)
    #[arg(short = 'm', long = "match", value_name = "TEXT")]
    pub match_digest: Option<String>,

    /// Output results in JSON format
    #[arg(short = 'j', long = "json")]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Disable the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Read configuration from PATH instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// List the algorithms the current filters select, then quit
    #[arg(long)]
    pub list_algorithms: bool,

    /// Print a shell completion script, then quit
    #[arg(long, value_name = "SHELL")]
    pub completions: Option<Shell>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_repeatable_filters() {
        let cli = Cli::parse_from(["omnihash", "Hi", "-f", "sha2", "-f", "SHA5", "-x", "512"]);
        assert_eq!(cli.hashmes, ["Hi"]);
        assert_eq!(cli.families, ["sha2", "SHA5"]);
        assert_eq!(cli.excludes, ["512"]);
        assert!(!cli.crc);
    }

    #[test]
    fn test_both_version_spellings() {
        assert!(Cli::parse_from(["omnihash", "-v"]).version);
        assert!(Cli::parse_from(["omnihash", "-V"]).version);
        assert!(Cli::parse_from(["omnihash", "--version"]).version);
    }

    #[test]
    fn test_flags_after_hashmes() {
        let cli = Cli::parse_from(["omnihash", "a", "b", "-s", "-c", "-j", "-m", "9cc2"]);
        assert_eq!(cli.hashmes, ["a", "b"]);
        assert!(cli.string && cli.crc && cli.json);
        assert_eq!(cli.match_digest.as_deref(), Some("9cc2"));
    }

    #[test]
    fn test_completions_shell() {
        let cli = Cli::parse_from(["omnihash", "--completions", "bash"]);
        assert_eq!(cli.completions, Some(Shell::Bash));
    }
}
