//! Report formatting utilities for terminal output
//!
//! Renders the income breakdown, the recent-record list and the ledger totals.

use crate::models::{Category, IncomeDraft, IncomeRecord, LedgerTotals};
use crate::storage::ledger::TIMESTAMP_FORMAT;

const LABEL_WIDTH: usize = 16;

/// Format an amount with two decimals
pub fn format_amount(amount: f64) -> String {
    format!("{:.2}", amount)
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Left-align text in a field of given width
pub fn left_align(s: &str, width: usize) -> String {
    format!("{:<width$}", s, width = width)
}

fn category_line(category: Category, amount: f64) -> String {
    format!(
        "  • {} {:>12}",
        left_align(&format!("{}:", category.label()), LABEL_WIDTH),
        format_amount(amount)
    )
}

/// Breakdown of a proposed income, followed by the two choices
pub fn format_proposal(draft: &IncomeDraft) -> String {
    let mut output = String::new();
    output.push_str(&format!("Amount: {}\n", format_amount(draft.total_amount)));
    output.push_str(&format!("Source: {}\n\n", draft.source));

    for category in Category::ALL {
        output.push_str(&category_line(category, draft.amount(category)));
        output.push('\n');
    }

    output.push_str("\nSave this entry? Type 'confirm' or 'cancel'.");
    output
}

/// One record as shown in the report
pub fn format_record(record: &IncomeRecord) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "{}  {}\n",
        record.created_at.format(TIMESTAMP_FORMAT),
        record.source
    ));
    output.push_str(&format!(
        "  Total: {}\n",
        format_amount(record.total_amount)
    ));
    for category in Category::ALL {
        output.push_str(&category_line(category, record.amount(category)));
        output.push('\n');
    }
    output
}

/// Totals block over the whole ledger
pub fn format_totals(totals: &LedgerTotals) -> String {
    let mut output = String::new();
    output.push_str("All incomes:\n");
    output.push_str(&format!(
        "  {} {:>14}\n",
        left_align("Total:", LABEL_WIDTH + 2),
        format_amount(totals.total_amount)
    ));
    for category in Category::ALL {
        output.push_str(&category_line(category, totals.amount(category)));
        output.push('\n');
    }
    output
}

/// Recent records followed by the totals
pub fn format_summary(recent: &[IncomeRecord], totals: &LedgerTotals) -> String {
    let mut output = String::new();
    output.push_str(&format!("Last {} entries:\n", recent.len()));
    output.push_str(&separator(40));
    output.push('\n');

    for record in recent {
        output.push_str(&format_record(record));
        output.push('\n');
    }

    output.push_str(&separator(40));
    output.push('\n');
    output.push_str(&format_totals(totals));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Allocation, RecordId};
    use chrono::NaiveDate;

    fn record() -> IncomeRecord {
        IncomeRecord {
            id: RecordId::new(1),
            created_at: NaiveDate::from_ymd_opt(2025, 3, 1)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
            source: "Salary".into(),
            total_amount: 10000.0,
            daily_expenses: 5000.0,
            investments: 2000.0,
            cushion: 2000.0,
            dream: 1000.0,
        }
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(1000.0), "1000.00");
        assert_eq!(format_amount(1234.5), "1234.50");
        assert_eq!(format_amount(2.0 / 3.0), "0.67");
    }

    #[test]
    fn test_format_proposal() {
        let draft = IncomeDraft::new("Salary", 10000.0, &Allocation::default());
        let text = format_proposal(&draft);

        assert!(text.contains("Amount: 10000.00"));
        assert!(text.contains("Source: Salary"));
        assert!(text.contains("Daily expenses:"));
        assert!(text.contains("5000.00"));
        assert!(text.contains("1000.00"));
        assert!(text.contains("'confirm' or 'cancel'"));
    }

    #[test]
    fn test_format_record() {
        let text = format_record(&record());
        assert!(text.starts_with("2025-03-01 09:30:00  Salary"));
        assert!(text.contains("Total: 10000.00"));
    }

    #[test]
    fn test_format_summary() {
        let totals = LedgerTotals {
            total_amount: 10000.0,
            daily_expenses: 5000.0,
            investments: 2000.0,
            cushion: 2000.0,
            dream: 1000.0,
        };
        let text = format_summary(&[record()], &totals);

        assert!(text.starts_with("Last 1 entries:"));
        assert!(text.contains("All incomes:"));
        assert_eq!(text.matches("Dream:").count(), 2);
    }

    #[test]
    fn test_left_align() {
        assert_eq!(left_align("abc", 5), "abc  ");
        assert_eq!(left_align("abcdef", 3), "abcdef");
    }
}
