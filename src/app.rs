//! Input/output glue around the bar transform.

use crate::bars::{BarStats, DiagnosticSink, StderrSink, beats_to_bars};
use crate::config::Config;
use crate::defaults;
use crate::error::Result;
use anyhow::Context;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Line iterator that stops at the first read error and keeps it for later.
struct IoLines<R> {
    lines: io::Lines<R>,
    error: Option<io::Error>,
}

impl<R: BufRead> IoLines<R> {
    fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            error: None,
        }
    }

    fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }
}

impl<R: BufRead> Iterator for IoLines<R> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.error.is_some() {
            return None;
        }
        match self.lines.next()? {
            Ok(line) => Some(line),
            Err(e) => {
                self.error = Some(e);
                None
            }
        }
    }
}

/// Read beats from `reader`, write one label line per bar to `out`.
///
/// Labels written before a parse error stay in `out`; the error is returned
/// afterwards. Read errors are reported in place of the statistics.
pub fn label_stream<R, W, S>(reader: R, out: &mut W, config: &Config, sink: S) -> Result<BarStats>
where
    R: BufRead,
    W: Write,
    S: DiagnosticSink,
{
    let mut lines = IoLines::new(reader);
    let mut transform = beats_to_bars(lines.by_ref(), config, sink)?;
    for label in transform.by_ref() {
        writeln!(out, "{}", label?)?;
    }
    let stats = transform.finish();

    if let Some(e) = lines.take_error() {
        return Err(e.into());
    }
    stats
}

/// Label `input` (a file path, or `-` for stdin) to stdout, with drift
/// warnings on stderr.
pub fn run_label_command(config: &Config, input: &Path) -> anyhow::Result<BarStats> {
    let reader: Box<dyn BufRead> = if input.as_os_str() == defaults::STDIN_PATH {
        tracing::info!("reading beats from stdin");
        Box::new(io::stdin().lock())
    } else {
        tracing::info!("reading beats from {}", input.display());
        let file = File::open(input)
            .with_context(|| format!("Failed to open beat file {}", input.display()))?;
        Box::new(BufReader::new(file))
    };

    let mut out = BufWriter::new(io::stdout().lock());
    let result = label_stream(reader, &mut out, config, StderrSink::stderr());
    // Keep the labels produced before a parse error.
    let flushed = out.flush();

    let stats = result.with_context(|| format!("Labeling {} failed", input.display()))?;
    flushed.context("Failed to write labels")?;
    Ok(stats)
}
