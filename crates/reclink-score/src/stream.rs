//! JSON-lines scoring loop

use std::io::{BufRead, Write};

use reclink_core::ScoringSession;
use serde_json::Value;
use tracing::debug;

use crate::error::{HostError, Result};

/// Score every non-blank line of `input`, one result line per document.
///
/// Returns the number of documents scored.
pub fn run<R, W>(session: &ScoringSession, explain: bool, input: R, mut output: W) -> Result<usize>
where
    R: BufRead,
    W: Write,
{
    let mut scored = 0;
    for (index, line) in input.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let doc: Value = serde_json::from_str(&line).map_err(|source| HostError::Document {
            line: index + 1,
            source,
        })?;

        if explain {
            serde_json::to_writer(&mut output, &session.explain(&doc))?;
            writeln!(output)?;
        } else {
            writeln!(output, "{}", session.score(&doc))?;
        }
        scored += 1;
    }
    output.flush()?;

    debug!(documents = scored, "input exhausted");
    Ok(scored)
}
