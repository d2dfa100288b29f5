//! Command-line argument parsing.

use std::path::PathBuf;

/// Flags that override environment configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    pub host_url: Option<String>,
    pub data_dir: Option<PathBuf>,
}

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Run the TUI application (default)
    RunTui(CliOverrides),
    /// Unknown flag or a flag missing its value
    Invalid(String),
}

/// Parse command-line arguments, skipping the program name.
///
/// ```
/// use cue::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["cue".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    let mut overrides = CliOverrides::default();
    let mut args = args.skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => return CliCommand::Version,
            "--help" | "-h" => return CliCommand::Help,
            "--host" => match args.next() {
                Some(url) => overrides.host_url = Some(url),
                None => return CliCommand::Invalid("--host needs a URL".to_string()),
            },
            "--data-dir" => match args.next() {
                Some(dir) => overrides.data_dir = Some(PathBuf::from(dir)),
                None => return CliCommand::Invalid("--data-dir needs a path".to_string()),
            },
            other => {
                if let Some(url) = other.strip_prefix("--host=") {
                    overrides.host_url = Some(url.to_string());
                } else if let Some(dir) = other.strip_prefix("--data-dir=") {
                    overrides.data_dir = Some(PathBuf::from(dir));
                } else {
                    return CliCommand::Invalid(format!("unknown argument '{}'", other));
                }
            }
        }
    }
    CliCommand::RunTui(overrides)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliCommand {
        let mut all = vec!["cue".to_string()];
        all.extend(args.iter().map(|a| a.to_string()));
        parse_args(all.into_iter())
    }

    #[test]
    fn test_parse_version_flags() {
        assert_eq!(parse(&["--version"]), CliCommand::Version);
        assert_eq!(parse(&["-V"]), CliCommand::Version);
    }

    #[test]
    fn test_parse_help_flags() {
        assert_eq!(parse(&["--help"]), CliCommand::Help);
        assert_eq!(parse(&["-h"]), CliCommand::Help);
    }

    #[test]
    fn test_parse_no_args() {
        assert_eq!(parse(&[]), CliCommand::RunTui(CliOverrides::default()));
    }

    #[test]
    fn test_parse_overrides() {
        let expected = CliOverrides {
            host_url: Some("ws://host:1/bridge".to_string()),
            data_dir: Some(PathBuf::from("/tmp/cue")),
        };
        assert_eq!(
            parse(&["--host", "ws://host:1/bridge", "--data-dir", "/tmp/cue"]),
            CliCommand::RunTui(expected.clone())
        );
        assert_eq!(
            parse(&["--host=ws://host:1/bridge", "--data-dir=/tmp/cue"]),
            CliCommand::RunTui(expected)
        );
    }

    #[test]
    fn test_missing_value_is_invalid() {
        assert!(matches!(parse(&["--host"]), CliCommand::Invalid(_)));
    }

    #[test]
    fn test_parse_unknown_flag() {
        assert_eq!(
            parse(&["--unknown"]),
            CliCommand::Invalid("unknown argument '--unknown'".to_string())
        );
    }
}
