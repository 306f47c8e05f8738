//! Ceremony error types.

use mandap_shared::AppError;
use thiserror::Error;

/// Ceremony-related errors.
///
/// Scheduling itself never fails; these cover table construction and
/// tradition lookups made on behalf of callers.
#[derive(Debug, Error)]
pub enum CeremonyError {
    /// A configured ceremony id is empty.
    #[error("Ceremony id must not be empty")]
    EmptyCeremonyId,

    /// A configured tradition slug is empty or lists no ceremonies.
    #[error("Tradition {0:?} must have a slug and at least one ceremony")]
    InvalidTradition(String),

    /// Tradition slug is not in the catalog.
    #[error("Unknown tradition: {0}")]
    UnknownTradition(String),
}

impl From<CeremonyError> for AppError {
    fn from(err: CeremonyError) -> Self {
        match err {
            CeremonyError::UnknownTradition(_) => Self::NotFound(err.to_string()),
            CeremonyError::EmptyCeremonyId | CeremonyError::InvalidTradition(_) => {
                Self::Config(err.to_string())
            }
        }
    }
}
