//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// How the run is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Stream every turn as it is produced, then the summary
    Live,
    /// Print the full transcript once the run ends
    Transcript,
    /// Print the run summary (including the transcript) as JSON
    Json,
}

/// CLI arguments for sentinel
#[derive(Parser, Debug)]
#[command(name = "sentinel")]
#[command(author, version, about = "Autonomous multi-agent AIOps engine")]
#[command(long_about = r#"
Sentinel feeds an infrastructure telemetry alert to a team of four agents
that take turns on a shared transcript:

1. Observer:     extracts the signals into an Observation Report
2. Diagnostic:   step-by-step root-cause analysis
3. Remediation:  risk-ordered remediation plan
4. Reporter:     incident summary for stakeholders

The run ends when the message ceiling is reached, a stop token is written,
or you press Ctrl-C.

Configuration files are loaded from (in priority order):
1. --config <path>                    Explicit config file
2. ./sentinel.toml                    Project-level config
3. ~/.config/sentinel/config.toml     Global config

Credentials come from OPENAI_API_KEY, or AZURE_OPENAI_API_KEY with
AZURE_OPENAI_ENDPOINT.

Example:
  sentinel
  sentinel --errors 5 --max-rounds 8
  sentinel --output json > run.json
"#)]
pub struct Cli {
    /// Number of mock error lines to generate
    #[arg(long, value_name = "N")]
    pub errors: Option<usize>,

    /// Maximum number of messages in the transcript (seed included)
    #[arg(long, value_name = "N")]
    pub max_rounds: Option<usize>,

    /// Stop token that ends the run (can be specified multiple times)
    #[arg(long, value_name = "TOKEN")]
    pub stop_token: Vec<String>,

    /// Per-turn timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub turn_timeout: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "live")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Explicit log level (overrides -v and the config file)
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration sources and the merged configuration, then exit
    #[arg(long)]
    pub show_config: bool,

    /// Write every run event to this JSONL file
    #[arg(long, value_name = "PATH")]
    pub event_log: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["sentinel"]);
        assert_eq!(cli.output, OutputFormat::Live);
        assert!(cli.errors.is_none());
        assert!(cli.stop_token.is_empty());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::parse_from([
            "sentinel",
            "--errors",
            "5",
            "--max-rounds",
            "8",
            "--stop-token",
            "DONE",
            "--stop-token",
            "TERMINATE",
            "-o",
            "json",
            "-vv",
        ]);
        assert_eq!(cli.errors, Some(5));
        assert_eq!(cli.max_rounds, Some(8));
        assert_eq!(cli.stop_token, vec!["DONE", "TERMINATE"]);
        assert_eq!(cli.output, OutputFormat::Json);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
