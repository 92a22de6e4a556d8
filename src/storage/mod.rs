//! Storage layer for the income splitter
//!
//! Provides the SQLite-backed income ledger and automatic directory creation.

pub mod ledger;

pub use ledger::LedgerRepository;

use crate::config::paths::SplitterPaths;
use crate::error::SplitterError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: Option<SplitterPaths>,
    pub ledger: LedgerRepository,
}

impl Storage {
    /// Open the on-disk ledger and make sure its schema exists
    pub fn new(paths: SplitterPaths) -> Result<Self, SplitterError> {
        paths.ensure_directories()?;

        let ledger = LedgerRepository::open(&paths.database_file())?;
        ledger.initialize()?;

        Ok(Self {
            paths: Some(paths),
            ledger,
        })
    }

    /// Storage backed by a private in-memory database
    pub fn open_in_memory() -> Result<Self, SplitterError> {
        let ledger = LedgerRepository::open_in_memory()?;
        ledger.initialize()?;

        Ok(Self {
            paths: None,
            ledger,
        })
    }

    /// Get the paths configuration, if this storage lives on disk
    pub fn paths(&self) -> Option<&SplitterPaths> {
        self.paths.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SplitterPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").join("finance.db").exists());
        assert!(storage.paths().is_some());
        assert_eq!(storage.ledger.count().unwrap(), 0);
    }

    #[test]
    fn test_in_memory_storage() {
        let storage = Storage::open_in_memory().unwrap();
        assert!(storage.paths().is_none());
        assert!(storage.ledger.recent(5).unwrap().is_empty());
    }
}
