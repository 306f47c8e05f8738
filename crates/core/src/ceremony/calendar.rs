//! Ceremony offset table and main-ceremony set.

use std::collections::{HashMap, HashSet};

use mandap_shared::CeremonyConfig;
use serde::{Deserialize, Serialize};

use super::error::CeremonyError;

/// Offset applied to ceremony ids missing from the table: one day before.
pub const DEFAULT_OFFSET_DAYS: i64 = 1;

/// Day offsets per ceremony id plus the set of ids pinned to the wedding date.
///
/// Positive offsets are days before the wedding, negative offsets days after.
/// Ids are opaque, tradition-namespaced, and matched case-sensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CeremonyCalendar {
    offsets: HashMap<String, i64>,
    main_ceremonies: HashSet<String>,
}

impl CeremonyCalendar {
    /// Creates a calendar from explicit tables.
    #[must_use]
    pub const fn new(offsets: HashMap<String, i64>, main_ceremonies: HashSet<String>) -> Self {
        Self {
            offsets,
            main_ceremonies,
        }
    }

    /// Returns the built-in tables.
    #[must_use]
    pub fn standard() -> Self {
        let offsets = [
            // Sikh
            ("sikh_roka", 90),
            ("sikh_chunni", 30),
            ("sikh_akhand_path", 3),
            ("sikh_mehndi", 2),
            ("sikh_maiyan", 2),
            ("sikh_jaggo", 1),
            ("sikh_chooda", 0),
            ("anand_karaj", 0),
            ("sikh_doli", 0),
            ("sikh_reception", 0),
            ("sikh_pag_phera", -2),
            // Hindu
            ("hindu_roka", 90),
            ("hindu_sagai", 60),
            ("hindu_tilak", 7),
            ("hindu_haldi", 2),
            ("hindu_mehndi", 2),
            ("hindu_sangeet", 1),
            ("hindu_baraat", 0),
            ("hindu_vidaai", 0),
            ("hindu_reception", -1),
            ("hindu_griha_pravesh", -2),
            // Muslim
            ("muslim_mangni", 60),
            ("muslim_dholki", 7),
            ("muslim_manjha", 3),
            ("muslim_mehndi", 1),
            ("muslim_baraat", 0),
            ("muslim_rukhsati", 0),
            ("walima", -1),
            // Christian
            ("christian_engagement", 180),
            ("christian_bridal_shower", 30),
            ("christian_rehearsal_dinner", 1),
            ("christian_reception", 0),
            ("christian_farewell_brunch", -1),
        ]
        .into_iter()
        .map(|(id, offset)| (id.to_string(), offset))
        .collect();

        let main_ceremonies = [
            "anand_karaj",
            "hindu_pheras",
            "nikah",
            "christian_ceremony",
            "civil_ceremony",
        ]
        .into_iter()
        .map(str::to_string)
        .collect();

        Self::new(offsets, main_ceremonies)
    }

    /// Builds the standard calendar overlaid with configuration.
    ///
    /// # Errors
    ///
    /// Returns `CeremonyError::EmptyCeremonyId` if configuration names an empty id.
    pub fn from_config(config: &CeremonyConfig) -> Result<Self, CeremonyError> {
        let mut calendar = Self::standard();

        for (id, offset) in &config.offsets {
            if id.is_empty() {
                return Err(CeremonyError::EmptyCeremonyId);
            }
            calendar.offsets.insert(id.clone(), *offset);
        }
        for id in &config.main_ceremonies {
            if id.is_empty() {
                return Err(CeremonyError::EmptyCeremonyId);
            }
            calendar.main_ceremonies.insert(id.clone());
        }

        Ok(calendar)
    }

    /// Returns true if the ceremony always falls on the wedding date.
    #[must_use]
    pub fn is_main_ceremony(&self, ceremony_id: &str) -> bool {
        self.main_ceremonies.contains(ceremony_id)
    }

    /// Returns the raw table offset, ignoring the main-ceremony set.
    #[must_use]
    pub fn table_offset(&self, ceremony_id: &str) -> Option<i64> {
        self.offsets.get(ceremony_id).copied()
    }
}

impl Default for CeremonyCalendar {
    fn default() -> Self {
        Self::standard()
    }
}
