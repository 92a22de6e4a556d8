//! Display formatting for terminal output
//!
//! Provides utilities for formatting replies, income breakdowns and ledger
//! reports for the chat session.

pub mod reply;
pub mod report;

pub use reply::{render_error, render_reply, USAGE};
pub use report::{format_amount, format_proposal, format_summary};
