//! Human-readable stderr messages for the CLI.
//!
//! Label data owns stdout, so everything here is meant for stderr.

use crate::bars::BarStats;
use crate::config::LabelConfig;
use owo_colors::OwoColorize;

/// Show `value` in inverse video when `color` is set.
fn inverse(value: impl std::fmt::Display, color: bool) -> String {
    if color {
        value.reversed().to_string()
    } else {
        value.to_string()
    }
}

/// Startup banner echoing how the positional arguments were understood.
///
/// A shell redirect glued to the last argument (`... 1>out.txt`) silently
/// changes the meaning of the arguments, so the values are shown up front.
pub fn render_banner(program: &str, labels: &LabelConfig, color: bool) -> String {
    format!(
        "{program}: start beat {}, {} beats per bar, first bar {}\n\
         Not what you meant? Leave a blank between the arguments and any redirect (>).",
        inverse(labels.start_beat, color),
        inverse(labels.beats_per_bar, color),
        inverse(labels.start, color),
    )
}

/// One-line run summary.
pub fn render_summary(stats: &BarStats, color: bool) -> String {
    if stats.intervals == 0 {
        return format!(
            "Labeled {} bars; not enough counted beats for a tempo estimate",
            stats.bars_labeled
        );
    }

    let bpm = format!("{:.2} BPM", stats.average_bpm);
    let bpm = if color {
        bpm.green().to_string()
    } else {
        bpm
    };
    format!(
        "Labeled {} bars over {} beat intervals: average interval {:.4}s, {}",
        stats.bars_labeled, stats.intervals, stats.average_duration, bpm
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_plain_lists_values() {
        let labels = LabelConfig {
            start_beat: 3,
            beats_per_bar: 6,
            start: 2,
            ..LabelConfig::default()
        };
        let banner = render_banner("beats2bars", &labels, false);
        let first = banner.lines().next().unwrap();
        assert_eq!(
            first,
            "beats2bars: start beat 3, 6 beats per bar, first bar 2"
        );
        assert_eq!(banner.lines().count(), 2);
    }

    #[test]
    fn banner_colored_uses_inverse_video() {
        let banner = render_banner("beats2bars", &LabelConfig::default(), true);
        assert!(banner.contains("\x1b[7m"));
    }

    #[test]
    fn summary_with_tempo() {
        let stats = BarStats {
            average_duration: 0.5,
            average_bpm: 120.0,
            intervals: 7,
            bars_labeled: 2,
        };
        assert_eq!(
            render_summary(&stats, false),
            "Labeled 2 bars over 7 beat intervals: average interval 0.5000s, 120.00 BPM"
        );
    }

    #[test]
    fn summary_without_intervals() {
        let stats = BarStats {
            bars_labeled: 1,
            ..BarStats::default()
        };
        assert!(render_summary(&stats, false).contains("not enough counted beats"));
    }
}
