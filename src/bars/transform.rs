//! The streaming beats-to-bars transform.
//!
//! Labels come out of an [`Iterator`]; the tempo statistics only exist once
//! that iterator has reported the end of input, and are taken with
//! [`BarTransform::finish`].

use crate::bars::drift::DriftDetector;
use crate::bars::labeler::{BarLabel, BarLabeler};
use crate::bars::parser::{BeatTime, parse_beat};
use crate::bars::sink::DiagnosticSink;
use crate::bars::stats::{BarStats, StatsAccumulator};
use crate::config::Config;
use crate::error::{BarsError, Result};
use std::iter::FusedIterator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Running,
    Exhausted,
    Failed,
}

/// Build a transform over `lines` with a validated copy of `config`.
pub fn beats_to_bars<L, S>(lines: L, config: &Config, sink: S) -> Result<BarTransform<L::IntoIter, S>>
where
    L: IntoIterator,
    L::Item: AsRef<str>,
    S: DiagnosticSink,
{
    BarTransform::new(lines.into_iter(), config, sink)
}

/// Converts beat lines into bar labels, one pull at a time.
///
/// Each call to `next` reads input until a label is ready or input runs out.
/// A line that does not start with a number yields one `Err` and ends the
/// stream; labels yielded before it stay valid.
pub struct BarTransform<I, S> {
    lines: I,
    sink: S,
    labeler: BarLabeler,
    drift: Option<DriftDetector>,
    stats: StatsAccumulator,
    /// Physical line number, blank lines included.
    line_number: usize,
    /// 1-based index of the next beat.
    beat_index: usize,
    previous_time: Option<BeatTime>,
    state: State,
}

impl<I, S> BarTransform<I, S>
where
    I: Iterator,
    I::Item: AsRef<str>,
    S: DiagnosticSink,
{
    pub fn new(lines: I, config: &Config, sink: S) -> Result<Self> {
        config.validate()?;
        tracing::debug!(
            start_beat = config.labels.start_beat,
            beats_per_bar = config.labels.beats_per_bar,
            start = config.labels.start,
            drift = config.drift.enabled,
            sink = sink.name(),
            "starting bar transform"
        );

        Ok(Self {
            lines,
            sink,
            labeler: BarLabeler::new(&config.labels)?,
            drift: DriftDetector::from_config(&config.drift),
            stats: StatsAccumulator::new(),
            line_number: 0,
            beat_index: 1,
            previous_time: None,
            state: State::Running,
        })
    }

    /// True once the input has been read to the end without error.
    pub fn is_exhausted(&self) -> bool {
        self.state == State::Exhausted
    }

    /// Take the statistics of a fully consumed stream.
    ///
    /// Fails if the iterator has not yet returned `None`, or stopped on a
    /// parse error.
    pub fn finish(self) -> Result<BarStats> {
        match self.state {
            State::Exhausted => Ok(self.stats.finish(self.labeler.bars_labeled())),
            State::Running => Err(BarsError::StatsUnavailable {
                reason: "label stream not fully consumed".to_string(),
            }),
            State::Failed => Err(BarsError::StatsUnavailable {
                reason: format!("input failed to parse at line {}", self.line_number),
            }),
        }
    }

    /// Consume every label, then finish. Stops at the first parse error.
    pub fn collect_all(mut self) -> Result<(Vec<BarLabel>, BarStats)> {
        let labels = self.by_ref().collect::<Result<Vec<_>>>()?;
        let stats = self.finish()?;
        Ok((labels, stats))
    }

    fn process_beat(&mut self, time: BeatTime) -> Option<BarLabel> {
        let index = self.beat_index;
        self.beat_index += 1;
        if !self.labeler.counts(index) {
            return None;
        }

        let beat = self.labeler.observe(time);
        if let Some(previous) = self.previous_time {
            let delta = time - previous;
            self.stats.record(delta);
            if let Some(detector) = self.drift.as_mut()
                && let Some(warning) = detector.observe(time, beat.bar, delta)
            {
                self.sink.warn(&warning);
            }
        }
        self.previous_time = Some(time);

        if let Some(label) = &beat.label {
            tracing::trace!(beat = index, time, bar = label.number, "bar label");
        }
        beat.label
    }
}

impl<I, S> Iterator for BarTransform<I, S>
where
    I: Iterator,
    I::Item: AsRef<str>,
    S: DiagnosticSink,
{
    type Item = Result<BarLabel>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.state != State::Running {
            return None;
        }

        while let Some(line) = self.lines.next() {
            self.line_number += 1;
            match parse_beat(line.as_ref(), self.line_number) {
                Ok(None) => {}
                Ok(Some(time)) => {
                    if let Some(label) = self.process_beat(time) {
                        return Some(Ok(label));
                    }
                }
                Err(e) => {
                    tracing::debug!("stopping at line {}: {}", self.line_number, e);
                    self.state = State::Failed;
                    return Some(Err(e));
                }
            }
        }

        self.state = State::Exhausted;
        None
    }
}

impl<I, S> FusedIterator for BarTransform<I, S>
where
    I: Iterator,
    I::Item: AsRef<str>,
    S: DiagnosticSink,
{
}
