//! Entry workflow
//!
//! Turns free text into a proposed income split, holds it per user until the
//! user confirms or cancels, and answers report requests. Every inbound event
//! yields exactly one [`Reply`]; nothing here retries.
//!
//! Per user the state machine is `Idle -> AwaitingConfirmation -> Idle`.

use crate::config::Settings;
use crate::error::{SplitterError, SplitterResult};
use crate::models::{Allocation, IncomeDraft, IncomeRecord, LedgerTotals, RecordId, UserId};
use crate::storage::Storage;

use super::sessions::PendingStore;

/// Number of records shown by a report unless configured otherwise
pub const DEFAULT_REPORT_LIMIT: usize = 5;

/// Everything the workflow can be asked to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    /// Free text, expected to look like `<amount> <source>`
    TextMessage(String),
    /// Persist the pending entry
    ConfirmSignal,
    /// Discard the pending entry
    CancelSignal,
    /// Show recent records and totals
    ReportRequest,
    /// Show usage
    StartRequest,
}

/// Per-user workflow state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    Idle,
    AwaitingConfirmation,
}

/// Result of a report request
#[derive(Debug, Clone, PartialEq)]
pub enum LedgerReport {
    /// No income has been recorded yet
    Empty,
    /// Most recent records (newest first) and totals over the whole ledger
    Summary {
        recent: Vec<IncomeRecord>,
        totals: LedgerTotals,
    },
}

/// Outcome of handling one event, ready to be rendered for the user
#[derive(Debug)]
pub enum Reply {
    Usage,
    /// A draft was staged and awaits `confirm` or `cancel`
    Proposal(IncomeDraft),
    Saved(RecordId),
    Cancelled,
    Report(LedgerReport),
    /// The ledger could not be read; nothing was written
    ReportFailed(SplitterError),
    /// The interaction ended with an error; state is back to idle
    Failed(SplitterError),
}

impl Reply {
    /// Whether this reply reports an error
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_) | Self::ReportFailed(_))
    }
}

/// Split `<amount> <source>` into its parts
///
/// The amount is the first whitespace-separated token; the remainder, with
/// leading whitespace removed, is the source label. Underscores are allowed
/// between digits as thousands separators (`1_000`).
pub fn parse_entry(text: &str) -> SplitterResult<(f64, String)> {
    let text = text.trim();
    let (token, source) = text
        .split_once(char::is_whitespace)
        .map(|(token, rest)| (token, rest.trim_start()))
        .filter(|(_, rest)| !rest.is_empty())
        .ok_or_else(|| {
            SplitterError::InputFormat("expected an amount followed by a source".into())
        })?;

    let amount = parse_amount(token).ok_or_else(|| SplitterError::not_a_number(token))?;
    if amount <= 0.0 {
        return Err(SplitterError::not_positive(token));
    }

    Ok((amount, source.to_string()))
}

fn parse_amount(token: &str) -> Option<f64> {
    let bytes = token.as_bytes();
    let separators_ok = bytes.iter().enumerate().all(|(i, b)| {
        *b != b'_'
            || (i > 0
                && bytes[i - 1].is_ascii_digit()
                && bytes.get(i + 1).is_some_and(u8::is_ascii_digit))
    });
    if !separators_ok {
        return None;
    }

    let amount: f64 = token.replace('_', "").parse().ok()?;
    amount.is_finite().then_some(amount)
}

/// Two-phase income entry workflow over the ledger
pub struct EntryWorkflow<'a> {
    storage: &'a Storage,
    allocation: Allocation,
    report_limit: usize,
    pending: PendingStore,
}

impl<'a> EntryWorkflow<'a> {
    /// Create a workflow configured from settings
    pub fn new(storage: &'a Storage, settings: &Settings) -> Self {
        Self {
            storage,
            allocation: settings.allocation,
            report_limit: settings.report_limit,
            pending: PendingStore::new(settings.pending_ttl()),
        }
    }

    /// Create a workflow with an explicit allocation and no pending TTL
    pub fn with_allocation(storage: &'a Storage, allocation: Allocation) -> Self {
        Self {
            storage,
            allocation,
            report_limit: DEFAULT_REPORT_LIMIT,
            pending: PendingStore::new(None),
        }
    }

    /// Replace the pending store (e.g. to change its TTL)
    pub fn with_pending_store(mut self, pending: PendingStore) -> Self {
        self.pending = pending;
        self
    }

    /// Handle one event for one user
    pub fn handle(&mut self, user: UserId, event: InboundEvent) -> Reply {
        let evicted = self.pending.evict_expired();
        if evicted > 0 {
            tracing::debug!(evicted, "dropped expired pending entries");
        }

        match event {
            InboundEvent::StartRequest => Reply::Usage,
            InboundEvent::TextMessage(text) => match self.propose(user, &text) {
                Ok(draft) => Reply::Proposal(draft),
                Err(e) => Reply::Failed(e),
            },
            InboundEvent::ConfirmSignal => match self.confirm(user) {
                Ok(id) => Reply::Saved(id),
                Err(e) => Reply::Failed(e),
            },
            InboundEvent::CancelSignal => match self.cancel(user) {
                Ok(_) => Reply::Cancelled,
                Err(e) => Reply::Failed(e),
            },
            InboundEvent::ReportRequest => match self.report() {
                Ok(report) => Reply::Report(report),
                Err(e) => {
                    tracing::warn!(error = %e, "failed to read ledger");
                    Reply::ReportFailed(e)
                }
            },
        }
    }

    /// Parse text, compute the split and stage it for `user`
    pub fn propose(&mut self, user: UserId, text: &str) -> SplitterResult<IncomeDraft> {
        let (amount, source) = parse_entry(text)?;
        let draft = IncomeDraft::new(source, amount, &self.allocation);

        if let Some(previous) = self.pending.stage(user, draft.clone()) {
            tracing::debug!(
                %user,
                superseded = %previous.source,
                "replaced unconfirmed entry"
            );
        }
        tracing::debug!(%user, amount, source = %draft.source, "staged entry");

        Ok(draft)
    }

    /// Persist the pending entry of `user`
    ///
    /// The entry is removed before writing, so a storage failure loses it and
    /// the user has to enter the amount again.
    pub fn confirm(&mut self, user: UserId) -> SplitterResult<RecordId> {
        let draft = self
            .pending
            .take(user)
            .ok_or(SplitterError::NoPendingEntry(user.get()))?;

        match self.storage.ledger.append(&draft) {
            Ok(id) => {
                tracing::info!(
                    %user,
                    record = %id,
                    amount = draft.total_amount,
                    source = %draft.source,
                    "income recorded"
                );
                Ok(id)
            }
            Err(e) => {
                tracing::warn!(%user, error = %e, "failed to record income");
                Err(e)
            }
        }
    }

    /// Discard the pending entry of `user`
    pub fn cancel(&mut self, user: UserId) -> SplitterResult<IncomeDraft> {
        let draft = self
            .pending
            .take(user)
            .ok_or(SplitterError::NoPendingEntry(user.get()))?;
        tracing::debug!(%user, source = %draft.source, "entry cancelled");
        Ok(draft)
    }

    /// Recent records and ledger totals
    pub fn report(&self) -> SplitterResult<LedgerReport> {
        let recent = self.storage.ledger.recent(self.report_limit)?;
        if recent.is_empty() {
            return Ok(LedgerReport::Empty);
        }

        let totals = self.storage.ledger.aggregate()?;
        Ok(LedgerReport::Summary { recent, totals })
    }

    /// Current state for `user`
    pub fn state(&self, user: UserId) -> WorkflowState {
        if self.pending.peek(user).is_some() {
            WorkflowState::AwaitingConfirmation
        } else {
            WorkflowState::Idle
        }
    }

    /// The draft awaiting confirmation for `user`, if any
    pub fn pending(&self, user: UserId) -> Option<&IncomeDraft> {
        self.pending.peek(user)
    }
}
