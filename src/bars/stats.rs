//! End-of-stream tempo statistics.

use crate::defaults;

/// Aggregate result of a completed run.
///
/// Both averages are 0 when fewer than two beats were counted.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BarStats {
    /// Mean interval between consecutive counted beats, in seconds.
    pub average_duration: f64,
    pub average_bpm: f64,
    /// Number of intervals the averages are based on.
    pub intervals: usize,
    pub bars_labeled: usize,
}

impl BarStats {
    /// `(average_duration, average_bpm)`.
    pub fn averages(&self) -> (f64, f64) {
        (self.average_duration, self.average_bpm)
    }
}

/// Collects beat intervals; only [`StatsAccumulator::finish`] reads them.
#[derive(Debug, Clone, Default)]
pub struct StatsAccumulator {
    durations: Vec<f64>,
}

impl StatsAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, duration: f64) {
        self.durations.push(duration);
    }

    pub fn finish(self, bars_labeled: usize) -> BarStats {
        if self.durations.is_empty() {
            return BarStats {
                bars_labeled,
                ..BarStats::default()
            };
        }

        let average_duration = self.durations.iter().sum::<f64>() / self.durations.len() as f64;
        BarStats {
            average_duration,
            average_bpm: defaults::SECS_PER_MINUTE / average_duration,
            intervals: self.durations.len(),
            bars_labeled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_log_gives_zeroes() {
        let stats = StatsAccumulator::new().finish(0);
        assert_eq!(stats.averages(), (0.0, 0.0));
        assert_eq!(stats.intervals, 0);
    }

    #[test]
    fn single_beat_labels_a_bar_but_has_no_interval() {
        let stats = StatsAccumulator::new().finish(1);
        assert_eq!(stats.averages(), (0.0, 0.0));
        assert_eq!(stats.bars_labeled, 1);
    }

    #[test]
    fn mean_of_mixed_intervals() {
        let mut acc = StatsAccumulator::new();
        for d in [0.5, 1.0, 1.5, 1.0] {
            acc.record(d);
        }
        let stats = acc.finish(3);
        assert!((stats.average_duration - 1.0).abs() < 1e-12);
        assert!((stats.average_bpm - 60.0).abs() < 1e-9);
        assert_eq!(stats.intervals, 4);
        assert_eq!(stats.bars_labeled, 3);
    }

    #[test]
    fn constant_interval_gives_exact_bpm() {
        let mut acc = StatsAccumulator::new();
        for _ in 0..16 {
            acc.record(0.4);
        }
        let stats = acc.finish(4);
        assert!((stats.average_bpm - 150.0).abs() < 1e-9);
    }
}
