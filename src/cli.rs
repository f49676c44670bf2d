//! Command-line interface for beats2bars
//!
//! Provides argument parsing using clap derive macros.

use crate::config::Config;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Turn beat times (one per line, or Audacity labels) into numbered bar
/// labels for an Audacity label track, written to stdout.
#[derive(Parser, Debug)]
#[command(name = "beats2bars", version, about, args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// First beat to count (1-based); earlier beats are skipped [config: 0]
    #[arg(value_name = "START_BEAT")]
    pub start_beat: Option<usize>,

    /// Beats per bar, aka time signature [config: 4]
    #[arg(value_name = "BEATS_PER_BAR")]
    pub beats_per_bar: Option<u32>,

    /// Number of the first bar label [config: 1]
    #[arg(value_name = "START", allow_negative_numbers = true)]
    pub start: Option<i64>,

    /// Beat file; `-` reads stdin
    #[arg(value_name = "INPUT", default_value = "-")]
    pub input: PathBuf,

    /// Text placed before the bar number (may be empty)
    #[arg(long, value_name = "TEXT")]
    pub prefix: Option<String>,

    /// Leave the bar number out of the label text
    #[arg(long)]
    pub no_numbers: bool,

    /// Disable tempo drift warnings
    #[arg(long)]
    pub no_drift: bool,

    /// Interval growth in seconds that triggers a drift warning
    #[arg(long, value_name = "SECONDS")]
    pub drift_threshold: Option<f64>,

    /// Relative +/- range around the guessed BPM in drift suggestions
    #[arg(long, value_name = "FRACTION")]
    pub bpm_tolerance: Option<f64>,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Suppress banner, summary and log output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose logging (-v: info, -vv: debug, -vvv: trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Overlay explicitly given arguments on top of the loaded config.
    pub fn apply_overrides(&self, mut config: Config) -> Config {
        if let Some(start_beat) = self.start_beat {
            config.labels.start_beat = start_beat;
        }
        if let Some(beats_per_bar) = self.beats_per_bar {
            config.labels.beats_per_bar = beats_per_bar;
        }
        if let Some(start) = self.start {
            config.labels.start = start;
        }
        if let Some(prefix) = &self.prefix {
            config.labels.prefix = prefix.clone();
        }
        if self.no_numbers {
            config.labels.numbers = false;
        }
        if self.no_drift {
            config.drift.enabled = false;
        }
        if let Some(threshold) = self.drift_threshold {
            config.drift.threshold_secs = threshold;
        }
        if let Some(tolerance) = self.bpm_tolerance {
            config.drift.bpm_tolerance = tolerance;
        }
        config
    }

    /// Log filter directive for the verbosity flags.
    pub fn log_filter(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// View and modify configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Configuration management actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Get a configuration value by key (e.g., labels.prefix)
    Get {
        /// Dotted key path (e.g., labels.beats_per_bar, drift.threshold_secs)
        key: String,
    },
    /// Set a configuration value by key
    Set {
        /// Dotted key path (e.g., labels.beats_per_bar, drift.threshold_secs)
        key: String,
        /// Value to set
        value: String,
    },
    /// Dump a commented configuration template
    Dump,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_default_command() {
        let cli = Cli::try_parse_from(["beats2bars"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.start_beat.is_none());
        assert!(cli.beats_per_bar.is_none());
        assert!(cli.start.is_none());
        assert_eq!(cli.input, PathBuf::from("-"));
        assert!(cli.prefix.is_none());
        assert!(!cli.no_numbers);
        assert!(!cli.no_drift);
        assert!(!cli.quiet);
        assert_eq!(cli.verbose, 0);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_parse_positionals() {
        let cli = Cli::try_parse_from(["beats2bars", "3", "3", "1", "beats.txt"]).unwrap();
        assert_eq!(cli.start_beat, Some(3));
        assert_eq!(cli.beats_per_bar, Some(3));
        assert_eq!(cli.start, Some(1));
        assert_eq!(cli.input, PathBuf::from("beats.txt"));
    }

    #[test]
    fn test_parse_negative_start() {
        let cli = Cli::try_parse_from(["beats2bars", "0", "4", "-2"]).unwrap();
        assert_eq!(cli.start, Some(-2));
    }

    #[test]
    fn test_parse_label_options() {
        let cli =
            Cli::try_parse_from(["beats2bars", "--prefix", "", "--no-numbers", "--no-drift"])
                .unwrap();
        assert_eq!(cli.prefix.as_deref(), Some(""));
        assert!(cli.no_numbers);
        assert!(cli.no_drift);
    }

    #[test]
    fn test_rejects_non_numeric_bar_length() {
        assert!(Cli::try_parse_from(["beats2bars", "0", "four"]).is_err());
    }

    #[test]
    fn test_parse_verbose_double() {
        let cli = Cli::try_parse_from(["beats2bars", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.log_filter(), "debug");
    }

    #[test]
    fn test_quiet_wins_over_verbose() {
        let cli = Cli::try_parse_from(["beats2bars", "-q", "-vvv"]).unwrap();
        assert_eq!(cli.log_filter(), "error");
    }

    #[test]
    fn test_parse_config_get() {
        let cli = Cli::try_parse_from(["beats2bars", "config", "get", "labels.prefix"]).unwrap();
        match cli.command {
            Some(Commands::Config {
                action: ConfigAction::Get { key },
            }) => assert_eq!(key, "labels.prefix"),
            other => panic!("Expected config get, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_global_config_path() {
        let cli = Cli::try_parse_from(["beats2bars", "--config", "/path/to/config.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/path/to/config.toml")));
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_parse_completions() {
        let cli = Cli::try_parse_from(["beats2bars", "completions", "bash"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Completions { shell: Shell::Bash })
        ));
    }

    #[test]
    fn test_overrides_only_touch_given_values() {
        let cli = Cli::try_parse_from(["beats2bars", "5", "--drift-threshold", "0.2"]).unwrap();
        let config = cli.apply_overrides(Config::default());

        assert_eq!(config.labels.start_beat, 5);
        assert_eq!(config.labels.beats_per_bar, 4);
        assert_eq!(config.labels.start, 1);
        assert_eq!(config.labels.prefix, "T ");
        assert!(config.labels.numbers);
        assert_eq!(config.drift.threshold_secs, 0.2);
        assert!(config.drift.enabled);
    }

    #[test]
    fn test_overrides_disable_numbers_and_drift() {
        let cli = Cli::try_parse_from(["beats2bars", "--no-numbers", "--no-drift"]).unwrap();
        let config = cli.apply_overrides(Config::default());
        assert!(!config.labels.numbers);
        assert!(!config.drift.enabled);
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
