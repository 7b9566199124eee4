use thiserror::Error;

use reclink_core::ConfigError;

/// Faults outside the scoring core: environment, files, malformed input
#[derive(Debug, Error)]
pub enum HostError {
    #[error("environment variable {0} is not set")]
    MissingEnv(&'static str),

    #[error("invalid session: {0}")]
    Session(#[from] ConfigError),

    #[error("document on line {line} is not valid JSON: {source}")]
    Document {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write output: {0}")]
    Output(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, HostError>;
