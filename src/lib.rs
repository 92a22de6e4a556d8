//! Income splitter - chat-style income ledger
//!
//! Records incomes typed as `<amount> <source>`, splits each one into four
//! budget buckets (daily expenses, investments, cushion, dream) and keeps the
//! confirmed entries in a local SQLite ledger.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Income drafts, records and the category allocation
//! - `storage`: SQLite ledger
//! - `services`: Entry workflow and pending-entry store
//! - `display`: Reply and report rendering
//! - `chat`: Line-oriented chat session on top of the workflow
//! - `logging`: Tracing subscriber setup
//!
//! # Example
//!
//! ```rust,ignore
//! use splitter::config::{SplitterPaths, Settings};
//! use splitter::services::{EntryWorkflow, InboundEvent};
//! use splitter::storage::Storage;
//!
//! let paths = SplitterPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::new(paths)?;
//! let mut workflow = EntryWorkflow::new(&storage, &settings);
//! let reply = workflow.handle(1.into(), InboundEvent::TextMessage("10000 Salary".into()));
//! ```

pub mod chat;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{SplitterError, SplitterResult};
