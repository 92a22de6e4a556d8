//! Core data models for the income splitter
//!
//! This module contains the data structures of the income ledger: the
//! category split, drafts awaiting confirmation and stored records.

pub mod ids;
pub mod income;

pub use ids::{RecordId, UserId};
pub use income::{
    Allocation, AllocationValidationError, Category, IncomeDraft, IncomeRecord, LedgerTotals,
};
