//! Configuration module for the income splitter
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - Settings persistence (bot token, category fractions, session TTL)

pub mod paths;
pub mod settings;

pub use paths::SplitterPaths;
pub use settings::Settings;
