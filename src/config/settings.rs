//! User settings for the income splitter
//!
//! Holds the bot credential, the category fractions and the pending-entry
//! retention policy. Loaded once at startup; there is no runtime
//! reconfiguration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::paths::SplitterPaths;
use crate::error::SplitterError;
use crate::models::Allocation;

/// User settings for the income splitter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Credential for the chat transport
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot_token: Option<String>,

    /// Fraction of each income assigned to every category
    #[serde(default)]
    pub allocation: Allocation,

    /// Seconds an unconfirmed entry survives; `null` keeps it until restart
    #[serde(default = "default_pending_ttl_secs")]
    pub pending_ttl_secs: Option<u64>,

    /// Number of recent records shown by the report
    #[serde(default = "default_report_limit")]
    pub report_limit: usize,
}

fn default_schema_version() -> u32 {
    1
}

fn default_pending_ttl_secs() -> Option<u64> {
    Some(3600)
}

fn default_report_limit() -> usize {
    5
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            bot_token: None,
            allocation: Allocation::default(),
            pending_ttl_secs: default_pending_ttl_secs(),
            report_limit: default_report_limit(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &SplitterPaths) -> Result<Self, SplitterError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                SplitterError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                SplitterError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &SplitterPaths) -> Result<(), SplitterError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            SplitterError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(&settings_path, contents).map_err(|e| {
            SplitterError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }

    /// Check the loaded values before they are used
    pub fn validate(&self) -> Result<(), SplitterError> {
        self.allocation
            .validate()
            .map_err(|e| SplitterError::Validation(e.to_string()))?;

        if self.report_limit == 0 {
            return Err(SplitterError::Validation(
                "report_limit must be at least 1".into(),
            ));
        }

        if !self.allocation.is_balanced() {
            tracing::warn!(
                total = self.allocation.total(),
                "category fractions do not sum to 1.0"
            );
        }

        Ok(())
    }

    /// Retention for pending entries, if any
    pub fn pending_ttl(&self) -> Option<Duration> {
        self.pending_ttl_secs.map(Duration::from_secs)
    }

    /// Token with the trailing characters masked, for display
    pub fn masked_token(&self) -> Option<String> {
        self.bot_token.as_deref().map(|token| {
            let visible: String = token.chars().take(4).collect();
            format!("{}****", visible)
        })
    }
}
