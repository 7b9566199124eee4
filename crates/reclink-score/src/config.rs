//! Host configuration from the environment

use std::path::PathBuf;

use crate::error::{HostError, Result};

pub const SESSION_VAR: &str = "RECLINK_SESSION";
pub const EXPLAIN_VAR: &str = "RECLINK_EXPLAIN";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    /// Path to the session payload (JSON)
    pub session_path: PathBuf,
    /// Emit a per-field breakdown instead of the bare score
    pub explain: bool,
}

impl HostConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let session_path = lookup(SESSION_VAR)
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from)
            .ok_or(HostError::MissingEnv(SESSION_VAR))?;

        let explain = lookup(EXPLAIN_VAR)
            .map(|v| is_truthy(&v))
            .unwrap_or(false);

        Ok(Self {
            session_path,
            explain,
        })
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
