//! beats2bars - Bar labels from beat timestamps
//!
//! Reads beat times produced by a beat tracker and marks every bar boundary
//! as a numbered label for an Audacity label track, warning about abrupt
//! tempo drift along the way.
//!
//! ```
//! use beats2bars::{CollectorSink, Config, beats_to_bars};
//!
//! let mut config = Config::default();
//! config.labels.beats_per_bar = 2;
//!
//! let lines = ["1.0", "2.0", "3.0", "4.0"];
//! let mut warnings = CollectorSink::new();
//! let (labels, stats) = beats_to_bars(lines, &config, &mut warnings)?
//!     .collect_all()?;
//!
//! assert_eq!(labels[1].to_string(), "3.0\t3.0\tT 2");
//! assert_eq!(stats.average_bpm, 60.0);
//! # Ok::<(), beats2bars::BarsError>(())
//! ```

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

pub mod app;
pub mod bars;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod defaults;
pub mod error;
#[cfg(feature = "cli")]
pub mod output;

// Core transform (lines → labels + stats)
pub use bars::{
    BarLabel, BarStats, BarTransform, CollectorSink, DiagnosticSink, DriftWarning, NullSink,
    StderrSink, WriterSink, beats_to_bars,
};

// Error handling
pub use error::{BarsError, Result};

// Config
pub use config::{Config, DriftConfig, LabelConfig};

/// Build version string with optional git commit hash.
///
/// Returns `"0.1.0+abc1234"` when git hash is available, `"0.1.0"` otherwise.
pub fn version_string() -> String {
    let version = env!("CARGO_PKG_VERSION");
    match option_env!("GIT_HASH") {
        Some(hash) if !hash.is_empty() => format!("{}+{}", version, hash),
        _ => version.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_string_starts_with_cargo_version() {
        let ver = version_string();
        assert!(
            ver.starts_with(env!("CARGO_PKG_VERSION")),
            "version_string should start with CARGO_PKG_VERSION, got: {}",
            ver
        );
    }

    #[test]
    fn version_string_contains_plus_when_git_hash_present() {
        let ver = version_string();
        if option_env!("GIT_HASH").is_some_and(|h| !h.is_empty()) {
            let hash_part = ver.split('+').nth(1).unwrap_or("");
            assert_eq!(hash_part.len(), 7, "Git hash should be 7 chars, got: {}", ver);
        } else {
            assert_eq!(ver, env!("CARGO_PKG_VERSION"));
        }
    }
}
