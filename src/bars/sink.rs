use crate::bars::drift::DriftWarning;
use std::io::{self, Write};

/// Pluggable destination for drift warnings.
///
/// Warnings are advisory: a sink cannot fail the run, so `warn` has no
/// error channel.
pub trait DiagnosticSink {
    /// Handle one drift warning. Called as soon as the drifting beat is read.
    fn warn(&mut self, warning: &DriftWarning);

    /// Name for logging/debugging.
    fn name(&self) -> &'static str {
        "sink"
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn warn(&mut self, warning: &DriftWarning) {
        (**self).warn(warning);
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for Box<S> {
    fn warn(&mut self, warning: &DriftWarning) {
        (**self).warn(warning);
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Writes each warning as text lines to any writer.
pub struct WriterSink<W: Write> {
    writer: W,
}

/// The CLI sink: warnings go to stderr next to the label stream on stdout.
pub type StderrSink = WriterSink<io::Stderr>;

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl WriterSink<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write> DiagnosticSink for WriterSink<W> {
    fn warn(&mut self, warning: &DriftWarning) {
        if let Err(e) = writeln!(self.writer, "{}", warning) {
            tracing::debug!("dropping drift warning at {}: {}", warning.time, e);
        }
    }

    fn name(&self) -> &'static str {
        "writer"
    }
}

/// Keeps warnings in memory for library use and tests.
#[derive(Debug, Default)]
pub struct CollectorSink {
    collected: Vec<DriftWarning>,
}

impl CollectorSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warnings(&self) -> &[DriftWarning] {
        &self.collected
    }

    pub fn into_warnings(self) -> Vec<DriftWarning> {
        self.collected
    }
}

impl DiagnosticSink for CollectorSink {
    fn warn(&mut self, warning: &DriftWarning) {
        self.collected.push(warning.clone());
    }

    fn name(&self) -> &'static str {
        "collector"
    }
}

/// Discards every warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn warn(&mut self, _warning: &DriftWarning) {}

    fn name(&self) -> &'static str {
        "null"
    }
}
