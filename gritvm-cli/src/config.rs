//! Run configuration file.
//!
//! A TOML file with any of these keys:
//!
//! ```toml
//! memory = [3, 1, 4]
//! max_steps = 100000
//! dump_data = true
//! dump_instructions = false
//! ```
//!
//! Command-line flags take precedence over file values.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Settings for a single `gvm run`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Initial data memory.
    pub memory: Vec<i64>,
    /// Step limit for the run. Absent means unbounded.
    pub max_steps: Option<u64>,
    /// Include data memory in the dump.
    pub dump_data: bool,
    /// Include instruction memory in the dump.
    pub dump_instructions: bool,
}

/// Errors reading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl RunConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
