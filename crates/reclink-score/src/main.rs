//! Record linkage scoring host
//!
//! Compiles one scoring session and scores a stream of documents with it.
//! Documents are read from stdin as JSON lines (one object per line);
//! each produces one line on stdout.
//!
//! ## Usage
//!
//! ```bash
//! RECLINK_SESSION=session.json reclink-score < documents.jsonl
//! ```
//!
//! ## Configuration
//!
//! Environment variables:
//! - `RECLINK_SESSION`: path to the session payload (required)
//! - `RECLINK_EXPLAIN`: emit a per-field JSON breakdown instead of the score
//! - `RUST_LOG`: stderr log filter (default: [`logging::DEFAULT_FILTER`])

use std::fs;
use std::io::{self, BufWriter};

use reclink_core::ScoringSession;
use tracing::info;

mod config;
mod error;
mod logging;
mod stream;

use config::HostConfig;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init()?;

    let config = HostConfig::from_env()?;
    let payload = fs::read_to_string(&config.session_path).map_err(error::HostError::from)?;
    let session = ScoringSession::from_json(&payload).map_err(error::HostError::from)?;

    info!(
        session = %config.session_path.display(),
        mode = %session.mode().score_mode(),
        fields = session.len(),
        explain = config.explain,
        "Scoring documents from stdin"
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let scored = stream::run(
        &session,
        config.explain,
        stdin.lock(),
        BufWriter::new(stdout.lock()),
    )?;

    info!(documents = scored, "Done");
    Ok(())
}
