//! Pricing service: multiplier composition, range refinement, and line item estimates.

use rust_decimal::{Decimal, RoundingStrategy};

use super::rates::RateTables;
use super::types::{CatalogEstimate, CostRange, CostUnit, LineItemCost, LineItemEstimate, PricingContext};

/// Decimal places kept on a composed multiplier.
pub const MULTIPLIER_DECIMAL_PLACES: u32 = 3;

/// Hours assumed for the low end of an hourly item without a duration.
pub const DEFAULT_HOURS_LOW: Decimal = Decimal::from_parts(3, 0, 0, false, 0);

/// Hours assumed for the high end of an hourly item without a duration.
pub const DEFAULT_HOURS_HIGH: Decimal = Decimal::from_parts(4, 0, 0, false, 0);

/// Pricing service for business logic.
pub struct PricingService;

impl PricingService {
    /// Combines the venue, tier, guest bracket, and city factors into one multiplier.
    ///
    /// The product is rounded half-up to [`MULTIPLIER_DECIMAL_PLACES`] before it
    /// is applied, so community hall, standard vendors, and 150 guests give
    /// `0.85 × 0.85 × 0.95 = 0.686375 → 0.686`. The result is therefore not the
    /// exact factor product: home, budget, 50 guests in Toronto is
    /// `0.351 × 1.15 = 0.40365`, returned as `0.404`. The product saturates at
    /// `Decimal::MAX` instead of overflowing.
    #[must_use]
    pub fn compose_multiplier(rates: &RateTables, context: &PricingContext) -> Decimal {
        let bracket = context.guest_bracket();
        let multiplier = rates
            .venue
            .factor(context.venue_class)
            .saturating_mul(rates.tier.factor(context.vendor_tier))
            .saturating_mul(rates.bracket.factor(bracket))
            .saturating_mul(rates.city_factor(context.city.as_deref()));
        let multiplier = multiplier
            .round_dp_with_strategy(MULTIPLIER_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);

        tracing::debug!(
            venue = %context.venue_class,
            tier = %context.vendor_tier,
            %bracket,
            city = context.city.as_deref().unwrap_or_default(),
            %multiplier,
            "composed pricing multiplier"
        );

        multiplier
    }

    /// Scales a base cost range by the context multiplier.
    ///
    /// `low` and `high` are rounded to whole units first; `single` is the
    /// rounded midpoint of those rounded values.
    #[must_use]
    pub fn refine(
        rates: &RateTables,
        base_low: Decimal,
        base_high: Decimal,
        context: &PricingContext,
    ) -> CostRange {
        let multiplier = Self::compose_multiplier(rates, context);
        let low = round_whole(base_low.saturating_mul(multiplier));
        let high = round_whole(base_high.saturating_mul(multiplier));

        CostRange {
            low,
            high,
            single: midpoint(low, high),
        }
    }

    /// Estimates one line item.
    ///
    /// `guest_count` drives per-person items; the multiplier comes from
    /// `context`, which carries its own guest count for the bracket.
    #[must_use]
    pub fn estimate_line_item(
        rates: &RateTables,
        item: &LineItemCost,
        guest_count: u32,
        context: &PricingContext,
    ) -> LineItemEstimate {
        let multiplier = Self::compose_multiplier(rates, context);
        Self::estimate_with_multiplier(item, guest_count, multiplier)
    }

    /// Estimates every item in a catalog with a single multiplier and totals them.
    #[must_use]
    pub fn estimate_catalog(
        rates: &RateTables,
        items: &[LineItemCost],
        guest_count: u32,
        context: &PricingContext,
    ) -> CatalogEstimate {
        let multiplier = Self::compose_multiplier(rates, context);
        let items: Vec<LineItemEstimate> = items
            .iter()
            .map(|item| Self::estimate_with_multiplier(item, guest_count, multiplier))
            .collect();

        let total_low = items
            .iter()
            .map(|e| e.low)
            .fold(Decimal::ZERO, Decimal::saturating_add);
        let total_high = items
            .iter()
            .map(|e| e.high)
            .fold(Decimal::ZERO, Decimal::saturating_add);

        CatalogEstimate {
            multiplier,
            total_single: midpoint(total_low, total_high),
            items,
            total_low,
            total_high,
        }
    }

    fn estimate_with_multiplier(
        item: &LineItemCost,
        guest_count: u32,
        multiplier: Decimal,
    ) -> LineItemEstimate {
        let (low, high) = match item.unit {
            CostUnit::PerPerson => {
                let guests = Decimal::from(guest_count);
                (
                    scaled(item.low_cost, guests, multiplier),
                    scaled(item.high_cost, guests, multiplier),
                )
            }
            CostUnit::PerHour => {
                let hours_low = item.hours_low.unwrap_or(DEFAULT_HOURS_LOW);
                let hours_high = item.hours_high.unwrap_or(DEFAULT_HOURS_HIGH);
                (
                    scaled(item.low_cost, hours_low, multiplier),
                    scaled(item.high_cost, hours_high, multiplier),
                )
            }
            CostUnit::Fixed => (
                round_whole(item.low_cost.saturating_mul(multiplier)),
                round_whole(item.high_cost.saturating_mul(multiplier)),
            ),
        };

        LineItemEstimate {
            category: item.category.clone(),
            unit: item.unit,
            low,
            high,
        }
    }
}

/// Rounds to whole currency units, halves up.
fn round_whole(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// `cost × quantity × multiplier`, saturating, rounded to whole units.
fn scaled(cost: Decimal, quantity: Decimal, multiplier: Decimal) -> Decimal {
    round_whole(cost.saturating_mul(quantity).saturating_mul(multiplier))
}

fn midpoint(low: Decimal, high: Decimal) -> Decimal {
    round_whole(low.saturating_add(high.saturating_sub(low) / Decimal::TWO))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::types::{VendorTier, VenueClass};
    use rust_decimal_macros::dec;

    fn rates() -> RateTables {
        RateTables::standard()
    }

    #[test]
    fn test_compose_home_budget_small_wedding() {
        let context = PricingContext::new(VenueClass::Home, VendorTier::Budget, 50);
        assert_eq!(PricingService::compose_multiplier(&rates(), &context), dec!(0.351));
    }

    #[test]
    fn test_compose_default_context() {
        let context = PricingContext::default();
        assert_eq!(PricingService::compose_multiplier(&rates(), &context), dec!(0.686));
    }

    #[test]
    fn test_compose_with_city() {
        let context =
            PricingContext::new(VenueClass::HotelBallroom, VendorTier::Premium, 250).with_city("vancouver");
        assert_eq!(PricingService::compose_multiplier(&rates(), &context), dec!(1.2));
    }

    #[test]
    fn test_refine_hotel_premium() {
        let context = PricingContext::new(VenueClass::HotelBallroom, VendorTier::Premium, 150);
        let range = PricingService::refine(&rates(), dec!(1000), dec!(2000), &context);

        assert_eq!(range.low, dec!(950));
        assert_eq!(range.high, dec!(1900));
        assert_eq!(range.single, dec!(1425));
    }

    #[test]
    fn test_refine_degenerate_range() {
        let context = PricingContext::default();
        let range = PricingService::refine(&rates(), dec!(1500), dec!(1500), &context);

        assert_eq!(range.low, range.high);
        assert_eq!(range.single, range.low);
    }

    #[test]
    fn test_refine_single_rounds_half_up() {
        // m = 1.0: low 1, high 2, midpoint 1.5 -> 2
        let context = PricingContext::new(VenueClass::HotelBallroom, VendorTier::Premium, 250);
        let range = PricingService::refine(&rates(), dec!(1), dec!(2), &context);

        assert_eq!(range.single, dec!(2));
    }

    #[test]
    fn test_estimate_per_person_default_context() {
        let item = LineItemCost::per_person("catering", dec!(10), dec!(20));
        let estimate =
            PricingService::estimate_line_item(&rates(), &item, 100, &PricingContext::default());

        assert_eq!(estimate.low, dec!(686));
        assert_eq!(estimate.high, dec!(1372));
        assert_eq!(estimate.unit, CostUnit::PerPerson);
    }

    #[test]
    fn test_estimate_per_hour_default_hours() {
        // m = 1.0, hours default to 3 and 4
        let context = PricingContext::new(VenueClass::HotelBallroom, VendorTier::Premium, 250);
        let item = LineItemCost::per_hour("dj", dec!(100), dec!(200), None, None);
        let estimate = PricingService::estimate_line_item(&rates(), &item, 250, &context);

        assert_eq!(estimate.low, dec!(300));
        assert_eq!(estimate.high, dec!(800));
    }

    #[test]
    fn test_estimate_per_hour_explicit_hours() {
        let context = PricingContext::new(VenueClass::HotelBallroom, VendorTier::Premium, 250);
        let item = LineItemCost::per_hour("photography", dec!(200), dec!(300), Some(dec!(6)), Some(dec!(10)));
        let estimate = PricingService::estimate_line_item(&rates(), &item, 250, &context);

        assert_eq!(estimate.low, dec!(1200));
        assert_eq!(estimate.high, dec!(3000));
    }

    #[test]
    fn test_estimate_fixed() {
        let item = LineItemCost::fixed("decor", dec!(1000), dec!(2000));
        let estimate =
            PricingService::estimate_line_item(&rates(), &item, 100, &PricingContext::default());

        assert_eq!(estimate.low, dec!(686));
        assert_eq!(estimate.high, dec!(1372));
        assert_eq!(estimate.unit, CostUnit::Fixed);
    }

    #[test]
    fn test_estimate_per_person_zero_guests() {
        let item = LineItemCost::per_person("catering", dec!(50), dec!(80));
        let estimate =
            PricingService::estimate_line_item(&rates(), &item, 0, &PricingContext::default());

        assert_eq!(estimate.low, Decimal::ZERO);
        assert_eq!(estimate.high, Decimal::ZERO);
    }

    #[test]
    fn test_estimate_catalog_totals() {
        let context = PricingContext::new(VenueClass::HotelBallroom, VendorTier::Premium, 250);
        let items = vec![
            LineItemCost::fixed("venue", dec!(5000), dec!(9000)),
            LineItemCost::per_person("catering", dec!(40), dec!(60)),
            LineItemCost::per_hour("dj", dec!(150), dec!(250), None, None),
        ];

        let estimate = PricingService::estimate_catalog(&rates(), &items, 250, &context);

        assert_eq!(estimate.multiplier, dec!(1.0));
        assert_eq!(estimate.items.len(), 3);
        assert_eq!(estimate.items[1].low, dec!(10000));
        assert_eq!(estimate.total_low, dec!(5000) + dec!(10000) + dec!(450));
        assert_eq!(estimate.total_high, dec!(9000) + dec!(15000) + dec!(1000));
        assert_eq!(estimate.total_single, dec!(20225));
    }

    #[test]
    fn test_compose_rounds_city_product() {
        let context =
            PricingContext::new(VenueClass::Home, VendorTier::Budget, 50).with_city("toronto");
        assert_eq!(PricingService::compose_multiplier(&rates(), &context), dec!(0.404));
    }

    #[test]
    fn test_refine_saturates_instead_of_overflowing() {
        // m = 1.0 × 1.0 × 1.1 × 1.2 = 1.32
        let context =
            PricingContext::new(VenueClass::HotelBallroom, VendorTier::Premium, 300).with_city("vancouver");
        let range = PricingService::refine(&rates(), Decimal::MAX, Decimal::MAX, &context);

        assert_eq!(range.low, Decimal::MAX);
        assert_eq!(range.high, Decimal::MAX);
        assert_eq!(range.single, Decimal::MAX);
    }

    #[test]
    fn test_estimate_saturates_per_person_and_totals() {
        let context = PricingContext::new(VenueClass::HotelBallroom, VendorTier::Premium, 250);
        let items = vec![
            LineItemCost::per_person("catering", Decimal::MAX, Decimal::MAX),
            LineItemCost::per_hour("dj", Decimal::MAX, Decimal::MAX, None, None),
            LineItemCost::fixed("venue", dec!(5000), dec!(9000)),
        ];

        let estimate = PricingService::estimate_catalog(&rates(), &items, 250, &context);

        assert_eq!(estimate.items[0].high, Decimal::MAX);
        assert_eq!(estimate.items[1].low, Decimal::MAX);
        assert_eq!(estimate.total_low, Decimal::MAX);
        assert_eq!(estimate.total_high, Decimal::MAX);
        assert_eq!(estimate.total_single, Decimal::MAX);
    }

    #[test]
    fn test_estimate_catalog_empty() {
        let estimate =
            PricingService::estimate_catalog(&rates(), &[], 150, &PricingContext::default());

        assert!(estimate.items.is_empty());
        assert_eq!(estimate.total_low, Decimal::ZERO);
        assert_eq!(estimate.total_high, Decimal::ZERO);
        assert_eq!(estimate.total_single, Decimal::ZERO);
    }
}
