//! Pricing data types.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::PricingError;

/// Venue class, ordered from least to most expensive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VenueClass {
    /// Private residence or backyard.
    Home,
    /// Gurdwara hall, banquet hall, or community centre.
    CommunityHall,
    /// Hotel ballroom.
    HotelBallroom,
}

impl VenueClass {
    /// All venue classes in ascending cost order.
    pub const ALL: [Self; 3] = [Self::Home, Self::CommunityHall, Self::HotelBallroom];

    /// Returns the slug used in tables and input.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::CommunityHall => "community_hall",
            Self::HotelBallroom => "hotel_ballroom",
        }
    }
}

impl fmt::Display for VenueClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VenueClass {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| PricingError::UnknownVenueClass(s.to_string()))
    }
}

/// Vendor tier, ordered from least to most expensive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VendorTier {
    /// Budget vendors.
    Budget,
    /// Standard vendors.
    Standard,
    /// Premium vendors.
    Premium,
}

impl VendorTier {
    /// All vendor tiers in ascending cost order.
    pub const ALL: [Self; 3] = [Self::Budget, Self::Standard, Self::Premium];

    /// Returns the slug used in tables and input.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Budget => "budget",
            Self::Standard => "standard",
            Self::Premium => "premium",
        }
    }
}

impl fmt::Display for VendorTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VendorTier {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| PricingError::UnknownVendorTier(s.to_string()))
    }
}

/// Guest count bracket.
///
/// Brackets are contiguous and cover every integer: each starts where the
/// previous one ends, and the threshold value belongs to the upper bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GuestBracket {
    /// Fewer than 100 guests (including negative counts).
    #[serde(rename = "under_100")]
    Under100,
    /// 100 to 199 guests.
    #[serde(rename = "100_200")]
    From100To200,
    /// 200 to 299 guests.
    #[serde(rename = "200_300")]
    From200To300,
    /// 300 guests or more.
    #[serde(rename = "over_300")]
    Over300,
}

impl GuestBracket {
    /// All brackets in ascending order.
    pub const ALL: [Self; 4] = [
        Self::Under100,
        Self::From100To200,
        Self::From200To300,
        Self::Over300,
    ];

    /// Maps a raw guest count to its bracket.
    ///
    /// Counts are not validated; anything below 100 is `Under100`.
    #[must_use]
    pub const fn classify(guest_count: i64) -> Self {
        if guest_count < 100 {
            Self::Under100
        } else if guest_count < 200 {
            Self::From100To200
        } else if guest_count < 300 {
            Self::From200To300
        } else {
            Self::Over300
        }
    }

    /// Returns the slug used in tables and input.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Under100 => "under_100",
            Self::From100To200 => "100_200",
            Self::From200To300 => "200_300",
            Self::Over300 => "over_300",
        }
    }
}

impl fmt::Display for GuestBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GuestBracket {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|b| b.as_str() == s)
            .ok_or_else(|| PricingError::UnknownGuestBracket(s.to_string()))
    }
}

/// Situational parameters that drive every pricing computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingContext {
    /// Venue class.
    pub venue_class: VenueClass,
    /// Vendor tier.
    pub vendor_tier: VendorTier,
    /// Expected guest count.
    pub guest_count: u32,
    /// City, matched exactly against the city table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

impl PricingContext {
    /// Creates a context without a city.
    #[must_use]
    pub const fn new(venue_class: VenueClass, vendor_tier: VendorTier, guest_count: u32) -> Self {
        Self {
            venue_class,
            vendor_tier,
            guest_count,
            city: None,
        }
    }

    /// Sets the city.
    #[must_use]
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    /// Returns the guest bracket for this context.
    #[must_use]
    pub fn guest_bracket(&self) -> GuestBracket {
        GuestBracket::classify(i64::from(self.guest_count))
    }
}

impl Default for PricingContext {
    /// Community hall, standard vendors, 150 guests, no city.
    fn default() -> Self {
        Self::new(VenueClass::CommunityHall, VendorTier::Standard, 150)
    }
}

/// How a line item's cost scales.
///
/// Any unit string other than `per_person` or `per_hour`, and a missing unit,
/// deserialize to `Fixed`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "Option<String>")]
pub enum CostUnit {
    /// One flat price.
    #[default]
    Fixed,
    /// Price per guest.
    PerPerson,
    /// Price per hour of service.
    PerHour,
}

impl CostUnit {
    /// Maps a unit slug to a unit, defaulting to `Fixed`.
    #[must_use]
    pub fn from_slug(slug: &str) -> Self {
        match slug {
            "per_person" => Self::PerPerson,
            "per_hour" => Self::PerHour,
            _ => Self::Fixed,
        }
    }
}

impl From<Option<String>> for CostUnit {
    fn from(slug: Option<String>) -> Self {
        slug.as_deref().map_or(Self::Fixed, Self::from_slug)
    }
}

/// One budget estimator rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItemCost {
    /// Budget category this rule prices (e.g. "catering").
    pub category: String,
    /// Low end of the base price, per unit.
    pub low_cost: Decimal,
    /// High end of the base price, per unit.
    pub high_cost: Decimal,
    /// Cost unit.
    #[serde(default)]
    pub unit: CostUnit,
    /// Low duration assumption for hourly items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours_low: Option<Decimal>,
    /// High duration assumption for hourly items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours_high: Option<Decimal>,
}

impl LineItemCost {
    /// Creates a flat-priced item.
    #[must_use]
    pub fn fixed(category: impl Into<String>, low_cost: Decimal, high_cost: Decimal) -> Self {
        Self {
            category: category.into(),
            low_cost,
            high_cost,
            unit: CostUnit::Fixed,
            hours_low: None,
            hours_high: None,
        }
    }

    /// Creates a per-guest item.
    #[must_use]
    pub fn per_person(category: impl Into<String>, low_cost: Decimal, high_cost: Decimal) -> Self {
        Self {
            unit: CostUnit::PerPerson,
            ..Self::fixed(category, low_cost, high_cost)
        }
    }

    /// Creates an hourly item. `None` durations fall back to the estimator defaults.
    #[must_use]
    pub fn per_hour(
        category: impl Into<String>,
        low_cost: Decimal,
        high_cost: Decimal,
        hours_low: Option<Decimal>,
        hours_high: Option<Decimal>,
    ) -> Self {
        Self {
            unit: CostUnit::PerHour,
            hours_low,
            hours_high,
            ..Self::fixed(category, low_cost, high_cost)
        }
    }
}

/// Refined cost range in whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostRange {
    /// Low estimate.
    pub low: Decimal,
    /// High estimate.
    pub high: Decimal,
    /// Single-figure estimate (rounded midpoint of `low` and `high`).
    pub single: Decimal,
}

/// Estimate for one line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItemEstimate {
    /// Budget category.
    pub category: String,
    /// Cost unit the estimate was computed with.
    pub unit: CostUnit,
    /// Low estimate.
    pub low: Decimal,
    /// High estimate.
    pub high: Decimal,
}

/// Estimate for a whole catalog of line items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEstimate {
    /// Multiplier applied to every item.
    pub multiplier: Decimal,
    /// Per-item estimates, in catalog order.
    pub items: Vec<LineItemEstimate>,
    /// Sum of item lows.
    pub total_low: Decimal,
    /// Sum of item highs.
    pub total_high: Decimal,
    /// Rounded midpoint of the totals.
    pub total_single: Decimal,
}
