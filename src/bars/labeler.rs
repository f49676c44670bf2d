//! Bar labeling: decides which counted beats open a bar and what the label says.

use crate::bars::parser::BeatTime;
use crate::config::LabelConfig;
use crate::error::Result;
use std::fmt;
use std::num::NonZeroU32;

/// Label text settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelStyle {
    prefix: String,
    numbers: bool,
}

impl LabelStyle {
    pub fn new(prefix: impl Into<String>, numbers: bool) -> Self {
        Self {
            prefix: prefix.into(),
            numbers,
        }
    }

    /// Text for bar `number`: the prefix, followed by the number when enabled.
    pub fn text(&self, number: i64) -> String {
        if self.numbers {
            format!("{}{}", self.prefix, number)
        } else {
            self.prefix.clone()
        }
    }
}

/// One bar boundary, ready for an Audacity label track.
#[derive(Debug, Clone, PartialEq)]
pub struct BarLabel {
    pub time: BeatTime,
    pub number: i64,
    pub text: String,
}

impl fmt::Display for BarLabel {
    /// `start\tend\ttext`, with start and end both set to the beat time.
    ///
    /// Times use the shortest representation that parses back to the same
    /// float and always carry a fractional part (`3.0`, not `3`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}\t{:?}\t{}", self.time, self.time, self.text)
    }
}

/// Result of feeding one counted beat to the labeler.
#[derive(Debug, Clone, PartialEq)]
pub struct CountedBeat {
    /// Number of the bar this beat belongs to.
    pub bar: i64,
    /// Set when this beat opens a new bar.
    pub label: Option<BarLabel>,
}

/// Counts beats and places a label on the first beat of every bar.
///
/// Beats before `start_beat` are skipped. The first counted beat always opens
/// a bar, then every `beats_per_bar`-th counted beat after it.
#[derive(Debug, Clone)]
pub struct BarLabeler {
    start_beat: usize,
    beats_per_bar: NonZeroU32,
    style: LabelStyle,
    counted: u64,
    next_number: i64,
    current_bar: Option<i64>,
    bars_labeled: usize,
}

impl BarLabeler {
    pub fn new(config: &LabelConfig) -> Result<Self> {
        Ok(Self::with_style(
            config.start_beat,
            config.bar_length()?,
            config.start,
            LabelStyle::new(config.prefix.clone(), config.numbers),
        ))
    }

    pub fn with_style(
        start_beat: usize,
        beats_per_bar: NonZeroU32,
        start: i64,
        style: LabelStyle,
    ) -> Self {
        Self {
            start_beat,
            beats_per_bar,
            style,
            counted: 0,
            next_number: start,
            current_bar: None,
            bars_labeled: 0,
        }
    }

    /// Whether the beat at 1-based `beat_index` is counted.
    pub fn counts(&self, beat_index: usize) -> bool {
        beat_index >= self.start_beat
    }

    /// Feed the next counted beat.
    pub fn observe(&mut self, time: BeatTime) -> CountedBeat {
        let label = if self.counted % u64::from(self.beats_per_bar.get()) == 0 {
            let number = self.next_number;
            self.next_number = number.saturating_add(1);
            self.current_bar = Some(number);
            self.bars_labeled += 1;
            Some(BarLabel {
                time,
                number,
                text: self.style.text(number),
            })
        } else {
            None
        };
        self.counted += 1;

        CountedBeat {
            // The first counted beat always opens a bar.
            bar: self.current_bar.unwrap_or(self.next_number),
            label,
        }
    }

    /// Number of counted beats seen so far.
    pub fn beats_counted(&self) -> u64 {
        self.counted
    }

    pub fn bars_labeled(&self) -> usize {
        self.bars_labeled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labeler(start_beat: usize, beats_per_bar: u32, start: i64) -> BarLabeler {
        BarLabeler::with_style(
            start_beat,
            NonZeroU32::new(beats_per_bar).unwrap(),
            start,
            LabelStyle::new("T ", true),
        )
    }

    #[test]
    fn label_text_variants() {
        assert_eq!(LabelStyle::new("T ", true).text(3), "T 3");
        assert_eq!(LabelStyle::new("T ", false).text(3), "T ");
        assert_eq!(LabelStyle::new("", true).text(3), "3");
        assert_eq!(LabelStyle::new("", false).text(3), "");
    }

    #[test]
    fn label_line_format() {
        let label = BarLabel {
            time: 3.0,
            number: 1,
            text: "T 1".to_string(),
        };
        assert_eq!(label.to_string(), "3.0\t3.0\tT 1");

        let label = BarLabel {
            time: 0.1 + 0.2,
            number: 2,
            text: String::new(),
        };
        assert_eq!(
            label.to_string(),
            "0.30000000000000004\t0.30000000000000004\t"
        );
    }

    #[test]
    fn every_nth_counted_beat_is_labeled() {
        let mut labeler = labeler(1, 3, 1);
        let numbers: Vec<Option<i64>> = (0..7)
            .map(|i| labeler.observe(i as f64).label.map(|l| l.number))
            .collect();
        assert_eq!(
            numbers,
            vec![Some(1), None, None, Some(2), None, None, Some(3)]
        );
        assert_eq!(labeler.bars_labeled(), 3);
        assert_eq!(labeler.beats_counted(), 7);
    }

    #[test]
    fn beats_report_their_bar() {
        let mut labeler = labeler(1, 2, 5);
        let bars: Vec<i64> = (0..5).map(|i| labeler.observe(i as f64).bar).collect();
        assert_eq!(bars, vec![5, 5, 6, 6, 7]);
    }

    #[test]
    fn start_beat_gates_counting() {
        let labeler = labeler(3, 4, 1);
        assert!(!labeler.counts(1));
        assert!(!labeler.counts(2));
        assert!(labeler.counts(3));
        assert!(labeler.counts(100));

        let from_zero = BarLabeler::with_style(
            0,
            NonZeroU32::new(4).unwrap(),
            1,
            LabelStyle::new("", true),
        );
        assert!(from_zero.counts(1));
    }

    #[test]
    fn one_beat_per_bar_labels_every_beat() {
        let mut labeler = labeler(1, 1, -1);
        let numbers: Vec<i64> = (0..3)
            .filter_map(|i| labeler.observe(i as f64).label.map(|l| l.number))
            .collect();
        assert_eq!(numbers, vec![-1, 0, 1]);
    }

    #[test]
    fn new_rejects_zero_bar_length() {
        let config = LabelConfig {
            beats_per_bar: 0,
            ..LabelConfig::default()
        };
        assert!(BarLabeler::new(&config).is_err());
    }
}
