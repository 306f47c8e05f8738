//! Ceremony dates derived from the wedding date.

pub mod calendar;
pub mod error;
pub mod scheduler;
pub mod tradition;
pub mod types;


pub use calendar::{CeremonyCalendar, DEFAULT_OFFSET_DAYS};
pub use error::CeremonyError;
pub use scheduler::CeremonyScheduler;
pub use tradition::TraditionCatalog;
pub use types::{ScheduledCeremony, Timing, TimingGroups};
