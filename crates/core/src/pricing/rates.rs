//! Multiplier tables for the four pricing axes.
//!
//! A `RateTables` value is built once (standard values, optionally overlaid
//! with configuration) and then only read. Venue, tier, and bracket factors
//! are struct fields, so every enumerated key always has a factor. Cities are
//! open-ended and fall back to 1.0.

use std::collections::HashMap;

use mandap_shared::PricingConfig;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::error::PricingError;
use super::types::{GuestBracket, VendorTier, VenueClass};

/// City key used when a context names no city.
pub const UNSPECIFIED_CITY: &str = "unspecified";

/// Venue class factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueFactors {
    /// Factor for `home`.
    pub home: Decimal,
    /// Factor for `community_hall`.
    pub community_hall: Decimal,
    /// Factor for `hotel_ballroom`.
    pub hotel_ballroom: Decimal,
}

impl VenueFactors {
    /// Returns the factor for a venue class.
    #[must_use]
    pub const fn factor(&self, venue_class: VenueClass) -> Decimal {
        match venue_class {
            VenueClass::Home => self.home,
            VenueClass::CommunityHall => self.community_hall,
            VenueClass::HotelBallroom => self.hotel_ballroom,
        }
    }

    fn factor_mut(&mut self, venue_class: VenueClass) -> &mut Decimal {
        match venue_class {
            VenueClass::Home => &mut self.home,
            VenueClass::CommunityHall => &mut self.community_hall,
            VenueClass::HotelBallroom => &mut self.hotel_ballroom,
        }
    }
}

/// Vendor tier factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierFactors {
    /// Factor for `budget`.
    pub budget: Decimal,
    /// Factor for `standard`.
    pub standard: Decimal,
    /// Factor for `premium`.
    pub premium: Decimal,
}

impl TierFactors {
    /// Returns the factor for a vendor tier.
    #[must_use]
    pub const fn factor(&self, vendor_tier: VendorTier) -> Decimal {
        match vendor_tier {
            VendorTier::Budget => self.budget,
            VendorTier::Standard => self.standard,
            VendorTier::Premium => self.premium,
        }
    }

    fn factor_mut(&mut self, vendor_tier: VendorTier) -> &mut Decimal {
        match vendor_tier {
            VendorTier::Budget => &mut self.budget,
            VendorTier::Standard => &mut self.standard,
            VendorTier::Premium => &mut self.premium,
        }
    }
}

/// Guest bracket factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketFactors {
    /// Factor for `under_100`.
    pub under_100: Decimal,
    /// Factor for `100_200`.
    pub from_100_to_200: Decimal,
    /// Factor for `200_300`.
    pub from_200_to_300: Decimal,
    /// Factor for `over_300`.
    pub over_300: Decimal,
}

impl BracketFactors {
    /// Returns the factor for a guest bracket.
    #[must_use]
    pub const fn factor(&self, bracket: GuestBracket) -> Decimal {
        match bracket {
            GuestBracket::Under100 => self.under_100,
            GuestBracket::From100To200 => self.from_100_to_200,
            GuestBracket::From200To300 => self.from_200_to_300,
            GuestBracket::Over300 => self.over_300,
        }
    }

    fn factor_mut(&mut self, bracket: GuestBracket) -> &mut Decimal {
        match bracket {
            GuestBracket::Under100 => &mut self.under_100,
            GuestBracket::From100To200 => &mut self.from_100_to_200,
            GuestBracket::From200To300 => &mut self.from_200_to_300,
            GuestBracket::Over300 => &mut self.over_300,
        }
    }
}

/// All multiplier tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTables {
    /// Venue class factors.
    pub venue: VenueFactors,
    /// Vendor tier factors.
    pub tier: TierFactors,
    /// Guest bracket factors.
    pub bracket: BracketFactors,
    /// City factors, matched exactly (case-sensitive).
    pub cities: HashMap<String, Decimal>,
}

impl RateTables {
    /// Returns the built-in tables.
    #[must_use]
    pub fn standard() -> Self {
        let cities = [
            ("toronto", dec!(1.15)),
            ("vancouver", dec!(1.20)),
            ("brampton", dec!(1.00)),
            ("mississauga", dec!(1.05)),
            ("surrey", dec!(1.00)),
            ("calgary", dec!(0.95)),
            (UNSPECIFIED_CITY, dec!(1.00)),
        ]
        .into_iter()
        .map(|(city, factor)| (city.to_string(), factor))
        .collect();

        Self {
            venue: VenueFactors {
                home: dec!(0.60),
                community_hall: dec!(0.85),
                hotel_ballroom: dec!(1.00),
            },
            tier: TierFactors {
                budget: dec!(0.65),
                standard: dec!(0.85),
                premium: dec!(1.00),
            },
            bracket: BracketFactors {
                under_100: dec!(0.90),
                from_100_to_200: dec!(0.95),
                from_200_to_300: dec!(1.00),
                over_300: dec!(1.10),
            },
            cities,
        }
    }

    /// Builds tables from the standard values overlaid with configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if an override names an unknown slug, or if the
    /// resulting tables fail [`RateTables::validate`].
    pub fn from_config(config: &PricingConfig) -> Result<Self, PricingError> {
        let mut tables = Self::standard();

        for (slug, factor) in &config.venue_factors {
            *tables.venue.factor_mut(slug.parse()?) = *factor;
        }
        for (slug, factor) in &config.tier_factors {
            *tables.tier.factor_mut(slug.parse()?) = *factor;
        }
        for (slug, factor) in &config.bracket_factors {
            *tables.bracket.factor_mut(slug.parse()?) = *factor;
        }
        tables.cities.extend(
            config
                .city_factors
                .iter()
                .map(|(city, factor)| (city.clone(), *factor)),
        );

        tables.validate()?;
        Ok(tables)
    }

    /// Checks that every factor is positive and that venue, tier, and bracket
    /// factors never decrease along their declared ordering.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), PricingError> {
        let venue: Vec<_> = VenueClass::ALL
            .iter()
            .map(|v| (v.as_str(), self.venue.factor(*v)))
            .collect();
        let tier: Vec<_> = VendorTier::ALL
            .iter()
            .map(|t| (t.as_str(), self.tier.factor(*t)))
            .collect();
        let bracket: Vec<_> = GuestBracket::ALL
            .iter()
            .map(|b| (b.as_str(), self.bracket.factor(*b)))
            .collect();

        check_ordered("venue", &venue)?;
        check_ordered("tier", &tier)?;
        check_ordered("bracket", &bracket)?;

        for (city, factor) in &self.cities {
            check_positive("city", city, *factor)?;
        }

        Ok(())
    }

    /// Returns the factor for a city, or 1.0 when the city is not in the table.
    ///
    /// A missing city is looked up as [`UNSPECIFIED_CITY`].
    #[must_use]
    pub fn city_factor(&self, city: Option<&str>) -> Decimal {
        let key = city.unwrap_or(UNSPECIFIED_CITY);
        if let Some(factor) = self.cities.get(key) {
            return *factor;
        }
        if city.is_some() {
            tracing::warn!(city = key, "city not in rate table, using factor 1.0");
        }
        Decimal::ONE
    }
}

impl Default for RateTables {
    fn default() -> Self {
        Self::standard()
    }
}

fn check_positive(table: &'static str, key: &str, value: Decimal) -> Result<(), PricingError> {
    if value <= Decimal::ZERO {
        return Err(PricingError::NonPositiveFactor {
            table,
            key: key.to_string(),
            value,
        });
    }
    Ok(())
}

fn check_ordered(table: &'static str, entries: &[(&str, Decimal)]) -> Result<(), PricingError> {
    for (key, value) in entries {
        check_positive(table, key, *value)?;
    }
    for pair in entries.windows(2) {
        let (lower, lower_value) = pair[0];
        let (higher, higher_value) = pair[1];
        if higher_value < lower_value {
            return Err(PricingError::OrderingViolation {
                table,
                lower: lower.to_string(),
                higher: higher.to_string(),
            });
        }
    }
    Ok(())
}
