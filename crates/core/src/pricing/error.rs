//! Pricing error types.

use mandap_shared::AppError;
use rust_decimal::Decimal;
use thiserror::Error;

/// Pricing-related errors.
///
/// These are raised while building or parsing inputs. Once a `RateTables`
/// value exists, every pricing computation is total.
#[derive(Debug, Error)]
pub enum PricingError {
    /// Venue class slug is not one of the known classes.
    #[error("Unknown venue class: {0}")]
    UnknownVenueClass(String),

    /// Vendor tier slug is not one of the known tiers.
    #[error("Unknown vendor tier: {0}")]
    UnknownVendorTier(String),

    /// Guest bracket slug is not one of the known brackets.
    #[error("Unknown guest bracket: {0}")]
    UnknownGuestBracket(String),

    /// A factor is zero or negative.
    #[error("Factor for {table}.{key} must be positive, got {value}")]
    NonPositiveFactor {
        /// Table name.
        table: &'static str,
        /// Key within the table.
        key: String,
        /// Offending value.
        value: Decimal,
    },

    /// Factors decrease along the table's declared ordering.
    #[error("Factors in the {table} table must not decrease from {lower} to {higher}")]
    OrderingViolation {
        /// Table name.
        table: &'static str,
        /// Lower-ranked key.
        lower: String,
        /// Higher-ranked key.
        higher: String,
    },
}

impl From<PricingError> for AppError {
    fn from(err: PricingError) -> Self {
        match err {
            PricingError::UnknownVenueClass(_)
            | PricingError::UnknownVendorTier(_)
            | PricingError::UnknownGuestBracket(_) => Self::Validation(err.to_string()),
            PricingError::NonPositiveFactor { .. } | PricingError::OrderingViolation { .. } => {
                Self::Config(err.to_string())
            }
        }
    }
}
