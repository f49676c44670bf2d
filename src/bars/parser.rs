//! Beat line parsing.
//!
//! Accepts a single column of times as well as Audacity label lines
//! (`start`, `end`, optional text); only the first column is read.

use crate::error::{BarsError, Result};

/// A beat timestamp in seconds.
pub type BeatTime = f64;

/// Parse the beat time from one input line.
///
/// Returns `Ok(None)` for blank lines. `line_number` is only used to locate
/// the error when the first token is not a number.
pub fn parse_beat(line: &str, line_number: usize) -> Result<Option<BeatTime>> {
    let Some(token) = line.split_whitespace().next() else {
        return Ok(None);
    };

    token
        .parse::<BeatTime>()
        .map(Some)
        .map_err(|source| BarsError::Parse {
            line: line_number,
            token: token.to_string(),
            source,
        })
}
