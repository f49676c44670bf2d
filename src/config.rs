//! Configuration file handling.
//!
//! Values are resolved in this order: built-in defaults, the TOML file,
//! `BEATS2BARS_*` environment variables, then command-line arguments.

use crate::defaults;
use crate::error::{BarsError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::num::NonZeroU32;
use std::path::Path;
#[cfg(feature = "cli")]
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub labels: LabelConfig,
    pub drift: DriftConfig,
}

/// How beats are grouped into bars and how labels read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LabelConfig {
    /// First beat (1-based) that is counted.
    pub start_beat: usize,
    pub beats_per_bar: u32,
    /// Number of the first bar label.
    pub start: i64,
    pub prefix: String,
    /// Append the running bar number to the prefix.
    pub numbers: bool,
}

/// Tempo drift detection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DriftConfig {
    pub enabled: bool,
    pub threshold_secs: f64,
    pub bpm_tolerance: f64,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            start_beat: defaults::START_BEAT,
            beats_per_bar: defaults::BEATS_PER_BAR,
            start: defaults::START_LABEL,
            prefix: defaults::LABEL_PREFIX.to_string(),
            numbers: defaults::LABEL_NUMBERS,
        }
    }
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            threshold_secs: defaults::DRIFT_THRESHOLD_SECS,
            bpm_tolerance: defaults::BPM_TOLERANCE,
        }
    }
}

impl LabelConfig {
    /// Bar length as a non-zero count, or an error for `beats_per_bar = 0`.
    pub fn bar_length(&self) -> Result<NonZeroU32> {
        NonZeroU32::new(self.beats_per_bar).ok_or_else(|| BarsError::ConfigInvalidValue {
            key: "labels.beats_per_bar".to_string(),
            message: "must be a positive number of beats".to_string(),
        })
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Missing fields use default values.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                BarsError::ConfigFileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                BarsError::Io(e)
            }
        })?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults only when the file is missing.
    ///
    /// Invalid TOML is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match Self::load(path) {
            Err(BarsError::ConfigFileNotFound { .. }) => {
                tracing::debug!("no config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - BEATS2BARS_PREFIX → labels.prefix
    /// - BEATS2BARS_BEATS_PER_BAR → labels.beats_per_bar
    /// - BEATS2BARS_START → labels.start
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(prefix) = std::env::var("BEATS2BARS_PREFIX")
            && !prefix.is_empty()
        {
            self.labels.prefix = prefix;
        }

        if let Some(beats) = env_number("BEATS2BARS_BEATS_PER_BAR") {
            self.labels.beats_per_bar = beats;
        }

        if let Some(start) = env_number("BEATS2BARS_START") {
            self.labels.start = start;
        }

        self
    }

    /// Check values that serde accepts but the labeler cannot work with.
    pub fn validate(&self) -> Result<()> {
        self.labels.bar_length()?;

        let threshold = self.drift.threshold_secs;
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(BarsError::ConfigInvalidValue {
                key: "drift.threshold_secs".to_string(),
                message: format!("must be a non-negative number of seconds, got {threshold}"),
            });
        }

        let tolerance = self.drift.bpm_tolerance;
        if !(0.0..1.0).contains(&tolerance) {
            return Err(BarsError::ConfigInvalidValue {
                key: "drift.bpm_tolerance".to_string(),
                message: format!("must be in [0, 1), got {tolerance}"),
            });
        }

        Ok(())
    }

    /// Get the default configuration file path
    ///
    /// Returns ~/.config/beats2bars/config.toml on Linux, `None` when the
    /// platform has no config directory.
    #[cfg(feature = "cli")]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("beats2bars").join("config.toml"))
    }

    /// Look up a value by dotted key (e.g. `labels.prefix`).
    pub fn get_value_by_path(&self, key: &str) -> Result<String> {
        let root = toml::Value::try_from(self).map_err(|e| BarsError::ConfigParse {
            message: e.to_string(),
        })?;

        let mut current = &root;
        for part in key.split('.') {
            current = current.get(part).ok_or_else(|| unknown_key(key))?;
        }

        Ok(match current {
            toml::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    /// Set a single dotted key in the config file at `path`, creating it if needed.
    ///
    /// The raw value is parsed to the type of the existing setting. The file is
    /// only written when the result still loads and validates.
    pub fn set_value_by_path(path: &Path, key: &str, raw: &str) -> Result<()> {
        let mut table: toml::Table = match fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => toml::Table::new(),
            Err(e) => return Err(e.into()),
        };

        let (section, field) = key.split_once('.').ok_or_else(|| unknown_key(key))?;
        let template = toml::Value::try_from(Config::default()).map_err(|e| {
            BarsError::ConfigParse {
                message: e.to_string(),
            }
        })?;
        let existing = template
            .get(section)
            .and_then(|s| s.get(field))
            .ok_or_else(|| unknown_key(key))?;
        let value = parse_like(existing, key, raw)?;

        let section_value = table
            .entry(section)
            .or_insert(toml::Value::Table(toml::Table::new()));
        let Some(section_table) = section_value.as_table_mut() else {
            return Err(BarsError::ConfigInvalidValue {
                key: section.to_string(),
                message: "expected a table".to_string(),
            });
        };
        section_table.insert(field.to_string(), value);

        let rendered = toml::to_string_pretty(&table).map_err(|e| BarsError::ConfigParse {
            message: e.to_string(),
        })?;
        let updated: Config = toml::from_str(&rendered)?;
        updated.validate()?;

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, rendered)?;
        Ok(())
    }

    /// A commented configuration file listing every setting at its default.
    pub fn dump_template() -> String {
        format!(
            r#"# beats2bars configuration

[labels]
# First beat (1-based) that is counted; earlier beats are skipped.
start_beat = {start_beat}
# Beats per bar. A label is placed on every Nth counted beat.
beats_per_bar = {beats_per_bar}
# Number of the first bar label.
start = {start}
# Text placed before the bar number.
prefix = "{prefix}"
# Include the running bar number in the label text.
numbers = {numbers}

[drift]
# Warn when a beat interval grows abruptly.
enabled = true
# Largest allowed growth between consecutive intervals, in seconds.
threshold_secs = {threshold:?}
# Relative +/- range around the guessed BPM in the suggested re-run.
bpm_tolerance = {tolerance:?}
"#,
            start_beat = defaults::START_BEAT,
            beats_per_bar = defaults::BEATS_PER_BAR,
            start = defaults::START_LABEL,
            prefix = defaults::LABEL_PREFIX,
            numbers = defaults::LABEL_NUMBERS,
            threshold = defaults::DRIFT_THRESHOLD_SECS,
            tolerance = defaults::BPM_TOLERANCE,
        )
    }
}

fn env_number<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok().filter(|v| !v.is_empty())?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("ignoring {name}={raw:?}: not a valid number");
            None
        }
    }
}

fn unknown_key(key: &str) -> BarsError {
    BarsError::ConfigInvalidValue {
        key: key.to_string(),
        message: "unknown configuration key".to_string(),
    }
}

fn parse_like(existing: &toml::Value, key: &str, raw: &str) -> Result<toml::Value> {
    let invalid = |expected: &str| BarsError::ConfigInvalidValue {
        key: key.to_string(),
        message: format!("expected {expected}, got '{raw}'"),
    };

    match existing {
        toml::Value::Boolean(_) => raw
            .parse::<bool>()
            .map(toml::Value::Boolean)
            .map_err(|_| invalid("true or false")),
        toml::Value::Integer(_) => raw
            .parse::<i64>()
            .map(toml::Value::Integer)
            .map_err(|_| invalid("an integer")),
        toml::Value::Float(_) => raw
            .parse::<f64>()
            .map(toml::Value::Float)
            .map_err(|_| invalid("a number")),
        _ => Ok(toml::Value::String(raw.to_string())),
    }
}
