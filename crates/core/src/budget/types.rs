//! Budget data types.

use mandap_shared::types::BudgetCategoryId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Snapshot of one budget category as stored by the couple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetCategory {
    /// Category ID.
    pub id: BudgetCategoryId,
    /// Display name (e.g. "Catering").
    #[serde(default)]
    pub name: String,
    /// Amount allocated to this category.
    pub allocated_amount: Decimal,
    /// Amount spent so far; `None` when nothing has been recorded.
    #[serde(default)]
    pub spent_amount: Option<Decimal>,
}

impl BudgetCategory {
    /// Spent amount, treating a missing value as zero.
    #[must_use]
    pub fn spent(&self) -> Decimal {
        self.spent_amount.unwrap_or(Decimal::ZERO)
    }
}

/// Budget health classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BudgetHealth {
    /// Usage at or below 90%.
    Normal,
    /// Usage above 90% and at most 100%.
    ApproachingLimit,
    /// Usage above 100%.
    OverBudget {
        /// Spent minus budget.
        overage: Decimal,
    },
}

impl BudgetHealth {
    /// Human-readable advisory label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::ApproachingLimit => "approaching limit",
            Self::OverBudget { .. } => "over budget",
        }
    }
}

/// Totals across all categories against the overall budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetSummary {
    /// Sum of spent amounts.
    pub total_spent: Decimal,
    /// Sum of allocated amounts.
    pub total_allocated: Decimal,
    /// Overall budget minus total spent (negative when over).
    pub remaining: Decimal,
    /// Total spent as a percentage of the overall budget (0 when the budget is 0).
    pub usage_percent: Decimal,
    /// Health classification.
    pub status: BudgetHealth,
}

/// Usage of one category against its own allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryUsage {
    /// Category ID.
    pub id: BudgetCategoryId,
    /// Display name.
    pub name: String,
    /// Allocated amount.
    pub allocated: Decimal,
    /// Spent amount (missing treated as zero).
    pub spent: Decimal,
    /// Allocated minus spent.
    pub remaining: Decimal,
    /// Spent as a percentage of allocated (0 when nothing is allocated).
    pub usage_percent: Decimal,
    /// Health classification against the allocation.
    pub status: BudgetHealth,
}

/// How an overall budget compares with an estimated cost range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "coverage", rename_all = "snake_case")]
pub enum EstimateCoverage {
    /// Budget covers even the high estimate.
    Covered,
    /// Budget covers the low estimate but not the high one.
    Partial {
        /// Additional amount needed to reach the high estimate.
        shortfall_to_high: Decimal,
    },
    /// Budget is below the low estimate.
    Insufficient {
        /// Additional amount needed to reach the low estimate.
        shortfall_to_low: Decimal,
    },
}
