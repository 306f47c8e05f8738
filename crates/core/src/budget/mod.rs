//! Budget tracking and health classification.

pub mod service;
pub mod types;


pub use service::{APPROACHING_LIMIT_PERCENT, BudgetService};
pub use types::{BudgetCategory, BudgetHealth, BudgetSummary, CategoryUsage, EstimateCoverage};
