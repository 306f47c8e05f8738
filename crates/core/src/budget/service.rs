//! Budget service for spending totals and health classification.

use rust_decimal::Decimal;

use super::types::{BudgetCategory, BudgetHealth, BudgetSummary, CategoryUsage, EstimateCoverage};
use crate::pricing::CatalogEstimate;

/// Usage percentage above which a budget is approaching its limit.
pub const APPROACHING_LIMIT_PERCENT: Decimal = Decimal::from_parts(90, 0, 0, false, 0);

/// Budget service for business logic.
pub struct BudgetService;

impl BudgetService {
    /// Aggregates category snapshots against the overall budget.
    ///
    /// Missing spent amounts count as zero. A zero (or negative) budget
    /// reports 0% usage instead of dividing by zero. Sums and differences
    /// saturate at the `Decimal` bounds.
    #[must_use]
    pub fn aggregate(categories: &[BudgetCategory], total_budget: Decimal) -> BudgetSummary {
        let total_spent = categories
            .iter()
            .map(BudgetCategory::spent)
            .fold(Decimal::ZERO, Decimal::saturating_add);
        let total_allocated = categories
            .iter()
            .map(|c| c.allocated_amount)
            .fold(Decimal::ZERO, Decimal::saturating_add);
        let usage_percent = Self::usage_percent(total_spent, total_budget);

        BudgetSummary {
            total_spent,
            total_allocated,
            remaining: total_budget.saturating_sub(total_spent),
            usage_percent,
            status: Self::health_for(usage_percent, total_spent, total_budget),
        }
    }

    /// Per-category usage against each category's own allocation.
    #[must_use]
    pub fn category_breakdown(categories: &[BudgetCategory]) -> Vec<CategoryUsage> {
        categories
            .iter()
            .map(|category| {
                let spent = category.spent();
                let allocated = category.allocated_amount;
                let usage_percent = Self::usage_percent(spent, allocated);

                CategoryUsage {
                    id: category.id,
                    name: category.name.clone(),
                    allocated,
                    spent,
                    remaining: allocated.saturating_sub(spent),
                    usage_percent,
                    status: Self::health_for(usage_percent, spent, allocated),
                }
            })
            .collect()
    }

    /// Compares an overall budget with a catalog estimate.
    #[must_use]
    pub fn coverage(total_budget: Decimal, estimate: &CatalogEstimate) -> EstimateCoverage {
        if total_budget >= estimate.total_high {
            EstimateCoverage::Covered
        } else if total_budget >= estimate.total_low {
            EstimateCoverage::Partial {
                shortfall_to_high: estimate.total_high.saturating_sub(total_budget),
            }
        } else {
            EstimateCoverage::Insufficient {
                shortfall_to_low: estimate.total_low.saturating_sub(total_budget),
            }
        }
    }

    /// `spent / budget × 100`, or 0 when the budget is not positive.
    ///
    /// A ratio too large to represent saturates at `Decimal::MAX` (or `MIN`
    /// for negative spending).
    #[must_use]
    pub fn usage_percent(spent: Decimal, budget: Decimal) -> Decimal {
        if budget <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        spent.checked_div(budget).map_or_else(
            || {
                if spent.is_sign_negative() {
                    Decimal::MIN
                } else {
                    Decimal::MAX
                }
            },
            |ratio| ratio.saturating_mul(Decimal::ONE_HUNDRED),
        )
    }

    /// Threshold rule: over 100% is over budget, over 90% is approaching.
    #[must_use]
    pub fn health_for(usage_percent: Decimal, spent: Decimal, budget: Decimal) -> BudgetHealth {
        if usage_percent > Decimal::ONE_HUNDRED {
            BudgetHealth::OverBudget {
                overage: spent.saturating_sub(budget),
            }
        } else if usage_percent > APPROACHING_LIMIT_PERCENT {
            BudgetHealth::ApproachingLimit
        } else {
            BudgetHealth::Normal
        }
    }
}
