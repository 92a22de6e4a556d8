//! Reply rendering
//!
//! Turns a workflow [`Reply`] into the text shown to the user. Errors become
//! short re-prompts; the details go to the log.

use crate::error::{AmountProblem, SplitterError};
use crate::services::{LedgerReport, Reply};

use super::report::{format_proposal, format_summary};

/// Static usage text for the start/help command
pub const USAGE: &str = "\
Hi! I keep track of your incomes and split each one into four buckets.

Send a message in the form:
  AMOUNT SOURCE
For example: 10000 Salary

Then type 'confirm' to save it or 'cancel' to drop it.
Type /report to see your latest entries and totals.";

pub const FORMAT_HINT: &str =
    "Oops! Send the amount and the source in one message.\nFor example: 10000 Salary";

pub const NOT_A_NUMBER: &str = "The amount must be a number!\nFor example: 10000 Salary";

pub const NOT_POSITIVE: &str = "The amount must be greater than zero.\nFor example: 10000 Salary";

pub const SAVED: &str = "Done! The income is saved.";

pub const CANCELLED: &str = "OK, the entry was discarded.";

pub const NOTHING_TO_SAVE: &str = "There is nothing to save. Start over with a new entry.";

pub const LEDGER_EMPTY: &str =
    "No entries yet.\nSend something like: 10000 Sold the old sofa";

pub const STORAGE_FAILURE: &str =
    "Sorry, the ledger could not be updated. Please enter the amount again.";

pub const LEDGER_UNAVAILABLE: &str =
    "Sorry, the ledger could not be read right now. Please try /report again later.";

/// Render a reply as user-facing text
pub fn render_reply(reply: &Reply) -> String {
    match reply {
        Reply::Usage => USAGE.to_string(),
        Reply::Proposal(draft) => format_proposal(draft),
        Reply::Saved(_) => SAVED.to_string(),
        Reply::Cancelled => CANCELLED.to_string(),
        Reply::Report(LedgerReport::Empty) => LEDGER_EMPTY.to_string(),
        Reply::Report(LedgerReport::Summary { recent, totals }) => {
            format_summary(recent, totals)
        }
        Reply::ReportFailed(_) => LEDGER_UNAVAILABLE.to_string(),
        Reply::Failed(err) => render_error(err).to_string(),
    }
}

/// Message shown for a failed interaction
pub fn render_error(err: &SplitterError) -> &'static str {
    match err {
        SplitterError::InputFormat(_) => FORMAT_HINT,
        SplitterError::InputValue { problem, .. } => match problem {
            AmountProblem::NotANumber => NOT_A_NUMBER,
            AmountProblem::NotPositive => NOT_POSITIVE,
        },
        SplitterError::NoPendingEntry(_) => NOTHING_TO_SAVE,
        _ => STORAGE_FAILURE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Allocation, IncomeDraft, LedgerTotals, RecordId};

    #[test]
    fn test_render_errors() {
        assert_eq!(
            render_reply(&Reply::Failed(SplitterError::InputFormat("x".into()))),
            FORMAT_HINT
        );
        assert_eq!(
            render_reply(&Reply::Failed(SplitterError::not_a_number("abc"))),
            NOT_A_NUMBER
        );
        assert_eq!(
            render_reply(&Reply::Failed(SplitterError::not_positive("-1"))),
            NOT_POSITIVE
        );
        assert_eq!(
            render_reply(&Reply::Failed(SplitterError::NoPendingEntry(1))),
            NOTHING_TO_SAVE
        );
        assert_eq!(
            render_reply(&Reply::Failed(SplitterError::Storage("disk full".into()))),
            STORAGE_FAILURE
        );
    }

    #[test]
    fn test_render_empty_report_has_no_totals() {
        let text = render_reply(&Reply::Report(LedgerReport::Empty));
        assert_eq!(text, LEDGER_EMPTY);
        assert!(!text.contains("All incomes"));
    }

    #[test]
    fn test_render_summary() {
        let text = render_reply(&Reply::Report(LedgerReport::Summary {
            recent: Vec::new(),
            totals: LedgerTotals::default(),
        }));
        assert!(text.contains("All incomes:"));
    }

    #[test]
    fn test_render_report_failure() {
        let text = render_reply(&Reply::ReportFailed(SplitterError::Storage(
            "no such table: incomes".into(),
        )));
        assert_eq!(text, LEDGER_UNAVAILABLE);
        assert!(!text.contains("enter the amount"));
    }

    #[test]
    fn test_render_proposal_and_outcomes() {
        let draft = IncomeDraft::new("Salary", 100.0, &Allocation::default());
        assert!(render_reply(&Reply::Proposal(draft)).contains("Source: Salary"));
        assert_eq!(render_reply(&Reply::Saved(RecordId::new(1))), SAVED);
        assert_eq!(render_reply(&Reply::Cancelled), CANCELLED);
        assert!(render_reply(&Reply::Usage).contains("/report"));
    }
}
