//! Ceremony lists per tradition.

use std::collections::BTreeMap;

use mandap_shared::CeremonyConfig;
use serde::{Deserialize, Serialize};

use super::error::CeremonyError;

/// Tradition slug to the ordered ceremony ids it celebrates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraditionCatalog {
    traditions: BTreeMap<String, Vec<String>>,
}

impl TraditionCatalog {
    /// Returns the built-in traditions.
    #[must_use]
    pub fn standard() -> Self {
        let traditions = [
            (
                "sikh",
                &[
                    "sikh_roka",
                    "sikh_chunni",
                    "sikh_akhand_path",
                    "sikh_mehndi",
                    "sikh_maiyan",
                    "sikh_jaggo",
                    "sikh_chooda",
                    "anand_karaj",
                    "sikh_doli",
                    "sikh_reception",
                    "sikh_pag_phera",
                ][..],
            ),
            (
                "hindu",
                &[
                    "hindu_roka",
                    "hindu_sagai",
                    "hindu_tilak",
                    "hindu_haldi",
                    "hindu_mehndi",
                    "hindu_sangeet",
                    "hindu_baraat",
                    "hindu_pheras",
                    "hindu_vidaai",
                    "hindu_reception",
                    "hindu_griha_pravesh",
                ][..],
            ),
            (
                "muslim",
                &[
                    "muslim_mangni",
                    "muslim_dholki",
                    "muslim_manjha",
                    "muslim_mehndi",
                    "muslim_baraat",
                    "nikah",
                    "muslim_rukhsati",
                    "walima",
                ][..],
            ),
            (
                "christian",
                &[
                    "christian_engagement",
                    "christian_bridal_shower",
                    "christian_rehearsal_dinner",
                    "christian_ceremony",
                    "christian_reception",
                    "christian_farewell_brunch",
                ][..],
            ),
            ("civil", &["civil_ceremony"][..]),
        ]
        .into_iter()
        .map(|(slug, ids)| {
            (
                slug.to_string(),
                ids.iter().map(|id| (*id).to_string()).collect(),
            )
        })
        .collect();

        Self { traditions }
    }

    /// Builds the standard catalog with configured traditions added or replaced.
    ///
    /// # Errors
    ///
    /// Returns `CeremonyError::InvalidTradition` for an empty slug or ceremony list.
    pub fn from_config(config: &CeremonyConfig) -> Result<Self, CeremonyError> {
        let mut catalog = Self::standard();
        for (slug, ceremonies) in &config.traditions {
            if slug.is_empty() || ceremonies.is_empty() || ceremonies.iter().any(String::is_empty) {
                return Err(CeremonyError::InvalidTradition(slug.clone()));
            }
            catalog.traditions.insert(slug.clone(), ceremonies.clone());
        }
        Ok(catalog)
    }

    /// Ceremony ids for a tradition (exact slug match).
    #[must_use]
    pub fn ceremonies(&self, slug: &str) -> Option<&[String]> {
        self.traditions.get(slug).map(Vec::as_slice)
    }

    /// Known tradition slugs in sorted order.
    pub fn slugs(&self) -> impl Iterator<Item = &str> {
        self.traditions.keys().map(String::as_str)
    }
}

impl Default for TraditionCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
