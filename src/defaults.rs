//! Default configuration constants for beats2bars.
//!
//! Shared by the config layer, the CLI and the core transform so that every
//! entry point starts from the same values.

/// First beat (1-based) that is counted. 0 and 1 both count from the first line.
pub const START_BEAT: usize = 0;

/// Beats per bar, aka the time signature numerator.
pub const BEATS_PER_BAR: u32 = 4;

/// Number given to the first emitted bar label.
pub const START_LABEL: i64 = 1;

/// Text placed before the label number.
pub const LABEL_PREFIX: &str = "T ";

/// Whether label text carries the running bar number.
pub const LABEL_NUMBERS: bool = true;

/// Largest growth in seconds between consecutive beat intervals before a drift
/// warning is raised.
pub const DRIFT_THRESHOLD_SECS: f64 = 0.1;

/// Relative +/- allowance around the guessed BPM when suggesting a re-run range.
pub const BPM_TOLERANCE: f64 = 0.03;

/// Seconds per minute, for interval to BPM conversion.
pub const SECS_PER_MINUTE: f64 = 60.0;

/// Input path meaning "read standard input".
pub const STDIN_PATH: &str = "-";
