//! Application configuration management.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::types::Currency;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Logging configuration.
    #[serde(default)]
    pub log: LogConfig,
    /// Pricing overrides layered on top of the standard rate tables.
    #[serde(default)]
    pub pricing: PricingConfig,
    /// Ceremony calendar overrides layered on top of the standard tables.
    #[serde(default)]
    pub ceremonies: CeremonyConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Fallback `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit JSON log lines instead of the human-readable format.
    #[serde(default)]
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

fn default_log_filter() -> String {
    "mandap=info,mandap_core=info".to_string()
}

/// Pricing configuration.
///
/// Factor maps are keyed by the same slugs the engine uses
/// (`home`, `premium`, `100_200`, ...). Entries replace the standard factor
/// for that key; city entries may also introduce new cities.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PricingConfig {
    /// Currency used when reporting amounts.
    #[serde(default)]
    pub currency: Currency,
    /// Venue class factor overrides.
    #[serde(default)]
    pub venue_factors: HashMap<String, Decimal>,
    /// Vendor tier factor overrides.
    #[serde(default)]
    pub tier_factors: HashMap<String, Decimal>,
    /// Guest bracket factor overrides.
    #[serde(default)]
    pub bracket_factors: HashMap<String, Decimal>,
    /// City factor overrides and additions.
    #[serde(default)]
    pub city_factors: HashMap<String, Decimal>,
    /// City assumed when a request does not name one.
    #[serde(default)]
    pub default_city: Option<String>,
}

/// Ceremony calendar configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CeremonyConfig {
    /// Day offsets to add or replace (positive = days before the wedding).
    #[serde(default)]
    pub offsets: HashMap<String, i64>,
    /// Additional ceremony ids that always fall on the wedding date.
    #[serde(default)]
    pub main_ceremonies: Vec<String>,
    /// Additional or replacement tradition ceremony lists.
    #[serde(default)]
    pub traditions: HashMap<String, Vec<String>>,
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(None)
    }

    /// Loads configuration, optionally layering an explicit file after the
    /// `config/` directory sources and before the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit file is missing or any source is malformed.
    pub fn load_from(path: Option<&str>) -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false));

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(true));
        }

        let config = builder
            .add_source(config::Environment::with_prefix("MANDAP").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
