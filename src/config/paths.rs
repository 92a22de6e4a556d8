//! Where the splitter keeps its two files: `config.json` in the base
//! directory and the SQLite ledger at `data/finance.db` below it.
//!
//! The base directory is `$SPLITTER_DATA_DIR` when set, otherwise
//! `income-splitter` under the platform config directory.

use std::path::{Path, PathBuf};

use crate::error::SplitterError;

pub const DATA_DIR_ENV: &str = "SPLITTER_DATA_DIR";

#[derive(Debug, Clone)]
pub struct SplitterPaths {
    base_dir: PathBuf,
}

impl SplitterPaths {
    /// Resolve the base directory from the environment
    pub fn new() -> Result<Self, SplitterError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) => PathBuf::from(custom),
            Err(_) => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// `config.json`
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// `data/finance.db`
    pub fn database_file(&self) -> PathBuf {
        self.data_dir().join("finance.db")
    }

    /// Create the base and `data/` directories if missing
    pub fn ensure_directories(&self) -> Result<(), SplitterError> {
        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| SplitterError::Io(format!("Failed to create data directory: {}", e)))
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, SplitterError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => {
            let home = std::env::var("HOME").map_err(|_| {
                SplitterError::Config("HOME environment variable not set".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("income-splitter"))
}

#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, SplitterError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| SplitterError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("income-splitter"))
}
