//! Income records and the budget split
//!
//! An income is divided into four buckets by configured fractions. A draft
//! holds the computed split until the user confirms it; a record is the
//! immutable row that lands in the ledger.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::ids::RecordId;

/// Tolerance used when comparing sums of floating-point amounts
pub const AMOUNT_EPSILON: f64 = 1e-9;

/// One of the four budget buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    DailyExpenses,
    Investments,
    Cushion,
    Dream,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 4] = [
        Category::DailyExpenses,
        Category::Investments,
        Category::Cushion,
        Category::Dream,
    ];

    /// Stable key, matching the settings file and the ledger column
    pub fn key(&self) -> &'static str {
        match self {
            Self::DailyExpenses => "daily_expenses",
            Self::Investments => "investments",
            Self::Cushion => "cushion",
            Self::Dream => "dream",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::DailyExpenses => "Daily expenses",
            Self::Investments => "Investments",
            Self::Cushion => "Cushion",
            Self::Dream => "Dream",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Validation errors for an allocation
#[derive(Debug, Clone, PartialEq)]
pub enum AllocationValidationError {
    NotFinite(Category),
    OutOfRange(Category, f64),
}

impl std::fmt::Display for AllocationValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFinite(category) => {
                write!(f, "Fraction for {} must be a finite number", category.key())
            }
            Self::OutOfRange(category, value) => write!(
                f,
                "Fraction for {} must be between 0 and 1, got {}",
                category.key(),
                value
            ),
        }
    }
}

impl std::error::Error for AllocationValidationError {}

/// Fraction of every income assigned to each category
///
/// The fractions are not forced to sum to 1.0; the default set does.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Allocation {
    pub daily_expenses: f64,
    pub investments: f64,
    pub cushion: f64,
    pub dream: f64,
}

impl Default for Allocation {
    fn default() -> Self {
        Self {
            daily_expenses: 0.50,
            investments: 0.20,
            cushion: 0.20,
            dream: 0.10,
        }
    }
}

impl Allocation {
    /// Get the fraction configured for a category
    pub fn fraction(&self, category: Category) -> f64 {
        match category {
            Category::DailyExpenses => self.daily_expenses,
            Category::Investments => self.investments,
            Category::Cushion => self.cushion,
            Category::Dream => self.dream,
        }
    }

    /// Sum of all fractions
    pub fn total(&self) -> f64 {
        Category::ALL.iter().map(|c| self.fraction(*c)).sum()
    }

    /// Whether the fractions distribute exactly the whole amount
    pub fn is_balanced(&self) -> bool {
        (self.total() - 1.0).abs() < AMOUNT_EPSILON
    }

    /// Validate every fraction
    pub fn validate(&self) -> Result<(), AllocationValidationError> {
        for category in Category::ALL {
            let value = self.fraction(category);
            if !value.is_finite() {
                return Err(AllocationValidationError::NotFinite(category));
            }
            if !(0.0..=1.0).contains(&value) {
                return Err(AllocationValidationError::OutOfRange(category, value));
            }
        }
        Ok(())
    }
}

/// An income split awaiting confirmation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeDraft {
    pub source: String,
    pub total_amount: f64,
    pub daily_expenses: f64,
    pub investments: f64,
    pub cushion: f64,
    pub dream: f64,
}

impl IncomeDraft {
    /// Split an amount according to the allocation
    pub fn new(source: impl Into<String>, total_amount: f64, allocation: &Allocation) -> Self {
        Self {
            source: source.into(),
            total_amount,
            daily_expenses: total_amount * allocation.daily_expenses,
            investments: total_amount * allocation.investments,
            cushion: total_amount * allocation.cushion,
            dream: total_amount * allocation.dream,
        }
    }

    /// Amount assigned to a category
    pub fn amount(&self, category: Category) -> f64 {
        match category {
            Category::DailyExpenses => self.daily_expenses,
            Category::Investments => self.investments,
            Category::Cushion => self.cushion,
            Category::Dream => self.dream,
        }
    }

    /// Sum of the four category amounts
    pub fn allocated_sum(&self) -> f64 {
        Category::ALL.iter().map(|c| self.amount(*c)).sum()
    }
}

/// A confirmed income stored in the ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeRecord {
    pub id: RecordId,
    pub created_at: NaiveDateTime,
    pub source: String,
    pub total_amount: f64,
    pub daily_expenses: f64,
    pub investments: f64,
    pub cushion: f64,
    pub dream: f64,
}

impl IncomeRecord {
    /// Amount assigned to a category
    pub fn amount(&self, category: Category) -> f64 {
        match category {
            Category::DailyExpenses => self.daily_expenses,
            Category::Investments => self.investments,
            Category::Cushion => self.cushion,
            Category::Dream => self.dream,
        }
    }
}

/// Column sums across the whole ledger
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerTotals {
    pub total_amount: f64,
    pub daily_expenses: f64,
    pub investments: f64,
    pub cushion: f64,
    pub dream: f64,
}

impl LedgerTotals {
    /// Summed amount for a category
    pub fn amount(&self, category: Category) -> f64 {
        match category {
            Category::DailyExpenses => self.daily_expenses,
            Category::Investments => self.investments,
            Category::Cushion => self.cushion,
            Category::Dream => self.dream,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_default_split() {
        let draft = IncomeDraft::new("Salary", 10000.0, &Allocation::default());

        assert_eq!(draft.source, "Salary");
        assert!(close(draft.daily_expenses, 5000.0));
        assert!(close(draft.investments, 2000.0));
        assert!(close(draft.cushion, 2000.0));
        assert!(close(draft.dream, 1000.0));
    }

    #[test]
    fn test_split_sums_to_total() {
        let allocation = Allocation::default();
        for amount in [0.01, 1.0, 33.33, 1234.56, 99_999.99, 1e9] {
            let draft = IncomeDraft::new("x", amount, &allocation);
            let tolerance = amount.abs() * 1e-12 + AMOUNT_EPSILON;
            assert!(
                (draft.allocated_sum() - amount).abs() <= tolerance,
                "split of {} summed to {}",
                amount,
                draft.allocated_sum()
            );
        }
    }

    #[test]
    fn test_unbalanced_allocation_is_allowed() {
        let allocation = Allocation {
            daily_expenses: 0.5,
            investments: 0.5,
            cushion: 0.5,
            dream: 0.0,
        };
        assert!(allocation.validate().is_ok());
        assert!(!allocation.is_balanced());

        let draft = IncomeDraft::new("Bonus", 100.0, &allocation);
        assert!(close(draft.allocated_sum(), 150.0));
    }

    #[test]
    fn test_validation_out_of_range() {
        let allocation = Allocation {
            dream: 1.5,
            ..Allocation::default()
        };
        assert_eq!(
            allocation.validate(),
            Err(AllocationValidationError::OutOfRange(Category::Dream, 1.5))
        );
    }

    #[test]
    fn test_validation_not_finite() {
        let allocation = Allocation {
            cushion: f64::NAN,
            ..Allocation::default()
        };
        assert!(matches!(
            allocation.validate(),
            Err(AllocationValidationError::NotFinite(Category::Cushion))
        ));
    }

    #[test]
    fn test_default_is_balanced() {
        assert!(Allocation::default().is_balanced());
    }

    #[test]
    fn test_category_keys() {
        let keys: Vec<_> = Category::ALL.iter().map(|c| c.key()).collect();
        assert_eq!(keys, ["daily_expenses", "investments", "cushion", "dream"]);
        assert_eq!(
            serde_json::to_string(&Category::DailyExpenses).unwrap(),
            "\"daily_expenses\""
        );
    }

    #[test]
    fn test_totals_default_to_zero() {
        let totals = LedgerTotals::default();
        assert_eq!(totals.total_amount, 0.0);
        for category in Category::ALL {
            assert_eq!(totals.amount(category), 0.0);
        }
    }
}
