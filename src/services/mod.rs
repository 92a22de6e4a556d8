//! Service layer for the income splitter
//!
//! The service layer provides business logic on top of the storage layer:
//! parsing entries, computing splits and holding them until confirmation.

pub mod sessions;
pub mod workflow;

pub use sessions::PendingStore;
pub use workflow::{
    parse_entry, EntryWorkflow, InboundEvent, LedgerReport, Reply, WorkflowState,
    DEFAULT_REPORT_LIMIT,
};
