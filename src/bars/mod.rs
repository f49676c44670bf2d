//! Beat timestamps in, bar labels out.
//!
//! Single-pass transform, pulled by the consumer:
//! ```text
//!                ┌────────┐    ┌──────────────┐    ┌─────────┐
//!  text lines ──▶│ Parser │───▶│ start-beat   │───▶│ Labeler │───▶ label lines
//!                └────────┘    │ filter       │    └─────────┘
//!                              └──────────────┘
//!                                     │            ┌─────────┐
//!                                     ├───────────▶│  Drift  │───▶ DiagnosticSink
//!                                     │            └─────────┘
//!                                     │            ┌─────────┐
//!                                     └───────────▶│  Stats  │───▶ BarStats (on finish)
//!                                                  └─────────┘
//! ```

pub mod drift;
pub mod labeler;
pub mod parser;
pub mod sink;
pub mod stats;
pub mod transform;

pub use drift::{DriftDetector, DriftWarning};
pub use labeler::{BarLabel, BarLabeler, CountedBeat, LabelStyle};
pub use parser::{BeatTime, parse_beat};
pub use sink::{CollectorSink, DiagnosticSink, NullSink, StderrSink, WriterSink};
pub use stats::{BarStats, StatsAccumulator};
pub use transform::{BarTransform, beats_to_bars};
