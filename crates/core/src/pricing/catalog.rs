//! Built-in line item catalog used by the budget estimator.

use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::types::LineItemCost;

/// Read-only set of estimator rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItemCatalog {
    items: Vec<LineItemCost>,
}

impl LineItemCatalog {
    /// Wraps an explicit list of rules.
    #[must_use]
    pub const fn new(items: Vec<LineItemCost>) -> Self {
        Self { items }
    }

    /// Standard rules, base prices in whole currency units before multipliers.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(vec![
            LineItemCost::fixed("venue", dec!(5000), dec!(15000)),
            LineItemCost::per_person("catering", dec!(35), dec!(75)),
            LineItemCost::per_person("bar_service", dec!(15), dec!(30)),
            LineItemCost::per_hour("photography", dec!(200), dec!(350), Some(dec!(6)), Some(dec!(10))),
            LineItemCost::per_hour("videography", dec!(180), dec!(300), Some(dec!(6)), Some(dec!(10))),
            LineItemCost::per_hour("dj", dec!(150), dec!(300), None, None),
            LineItemCost::per_hour("dhol_player", dec!(100), dec!(200), Some(dec!(1)), Some(dec!(2))),
            LineItemCost::per_hour("mehndi_artist", dec!(80), dec!(150), Some(dec!(3)), Some(dec!(5))),
            LineItemCost::fixed("decor", dec!(3000), dec!(12000)),
            LineItemCost::fixed("florals", dec!(1000), dec!(5000)),
            LineItemCost::fixed("makeup_hair", dec!(500), dec!(2000)),
            LineItemCost::fixed("attire", dec!(2000), dec!(8000)),
            LineItemCost::per_person("invitations", dec!(3), dec!(8)),
            LineItemCost::per_person("wedding_cake", dec!(4), dec!(10)),
            LineItemCost::fixed("transportation", dec!(800), dec!(2500)),
        ])
    }

    /// All rules in catalog order.
    #[must_use]
    pub fn items(&self) -> &[LineItemCost] {
        &self.items
    }

    /// Looks up the rule for a category (exact match).
    #[must_use]
    pub fn find(&self, category: &str) -> Option<&LineItemCost> {
        self.items.iter().find(|item| item.category == category)
    }

    /// Returns a catalog limited to the given categories, in catalog order.
    /// Unknown categories are ignored.
    #[must_use]
    pub fn select(&self, categories: &[impl AsRef<str>]) -> Self {
        Self::new(
            self.items
                .iter()
                .filter(|item| categories.iter().any(|c| c.as_ref() == item.category))
                .cloned()
                .collect(),
        )
    }
}

impl Default for LineItemCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
