//! Tempo drift detection.
//!
//! Flags a beat whose interval is longer than the previous interval by more
//! than a threshold, which usually means the beat tracker skipped a beat or
//! locked onto the wrong tempo. Shrinking intervals are not reported.

use crate::bars::parser::BeatTime;
use crate::config::DriftConfig;
use crate::defaults;
use std::fmt;

/// An abrupt lengthening of the beat interval.
#[derive(Debug, Clone, PartialEq)]
pub struct DriftWarning {
    pub time: BeatTime,
    /// Bar the offending beat belongs to.
    pub bar: i64,
    pub previous_delta: f64,
    pub delta: f64,
    pub tolerance: f64,
}

impl DriftWarning {
    pub fn delta_of_deltas(&self) -> f64 {
        self.delta - self.previous_delta
    }

    /// Tempo implied by the interval before the jump.
    pub fn guessed_bpm(&self) -> f64 {
        defaults::SECS_PER_MINUTE / self.previous_delta
    }

    /// Suggested `(min, max)` BPM search range for re-running the beat tracker.
    pub fn bpm_range(&self) -> (f64, f64) {
        let bpm = self.guessed_bpm();
        ((1.0 - self.tolerance) * bpm, (1.0 + self.tolerance) * bpm)
    }
}

impl fmt::Display for DriftWarning {
    /// Two `#`-prefixed lines so the output can sit next to label data.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (min_bpm, max_bpm) = self.bpm_range();
        writeln!(
            f,
            "# diff = {:?} @ {:?} bar {} pd = {:?} d = {:?}",
            self.delta_of_deltas(),
            self.time,
            self.bar,
            self.previous_delta,
            self.delta
        )?;
        write!(
            f,
            "# (guessed bpm: {:?}) rerun DBNBeatTracker with --min_bpm {:?} --max_bpm {:?}",
            self.guessed_bpm(),
            min_bpm,
            max_bpm
        )
    }
}

#[derive(Debug, Clone)]
pub struct DriftDetector {
    threshold: f64,
    tolerance: f64,
    previous_delta: Option<f64>,
}

impl DriftDetector {
    pub fn new(threshold: f64, tolerance: f64) -> Self {
        Self {
            threshold,
            tolerance,
            previous_delta: None,
        }
    }

    /// Build a detector from config, or `None` when drift detection is off.
    pub fn from_config(config: &DriftConfig) -> Option<Self> {
        config
            .enabled
            .then(|| Self::new(config.threshold_secs, config.bpm_tolerance))
    }

    /// Feed the interval ending at `time`.
    ///
    /// The first interval only primes the detector. The interval is always
    /// remembered for the next comparison, whether or not it warned.
    pub fn observe(&mut self, time: BeatTime, bar: i64, delta: f64) -> Option<DriftWarning> {
        let warning = match self.previous_delta {
            Some(previous_delta) if delta - previous_delta > self.threshold => {
                Some(DriftWarning {
                    time,
                    bar,
                    previous_delta,
                    delta,
                    tolerance: self.tolerance,
                })
            }
            _ => None,
        };
        self.previous_delta = Some(delta);
        warning
    }

    pub fn previous_delta(&self) -> Option<f64> {
        self.previous_delta
    }
}
