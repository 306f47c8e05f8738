//! Cost multipliers, refined cost ranges, and line item estimates.

pub mod catalog;
pub mod error;
pub mod rates;
pub mod service;
pub mod types;


pub use catalog::LineItemCatalog;
pub use error::PricingError;
pub use rates::{BracketFactors, RateTables, TierFactors, UNSPECIFIED_CITY, VenueFactors};
pub use service::PricingService;
pub use types::{
    CatalogEstimate, CostRange, CostUnit, GuestBracket, LineItemCost, LineItemEstimate,
    PricingContext, VendorTier, VenueClass,
};
