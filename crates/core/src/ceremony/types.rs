//! Ceremony scheduling data types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Timing group of a ceremony, decided by its offset value.
///
/// Note the convention: offsets below -1 are `PreWedding` and offsets above 1
/// are `PostWedding`, even though a positive offset schedules a ceremony
/// *before* the wedding date. Consumers rely on this grouping as is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Timing {
    /// Offset < -1.
    PreWedding,
    /// -1 <= offset <= 1.
    WeddingDay,
    /// Offset > 1.
    PostWedding,
}

impl Timing {
    /// Classifies an offset.
    #[must_use]
    pub const fn from_offset(offset: i64) -> Self {
        if offset < -1 {
            Self::PreWedding
        } else if offset > 1 {
            Self::PostWedding
        } else {
            Self::WeddingDay
        }
    }
}

/// A ceremony with its effective offset and computed date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledCeremony {
    /// Ceremony id.
    pub ceremony_id: String,
    /// Effective offset in days (0 for main ceremonies).
    pub offset: i64,
    /// Calendar date of the ceremony.
    pub date: NaiveDate,
}

/// Ceremonies partitioned by [`Timing`], each group sorted by descending offset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingGroups {
    /// Ceremonies with offset < -1.
    pub pre_wedding: Vec<ScheduledCeremony>,
    /// Ceremonies with -1 <= offset <= 1.
    pub wedding_day: Vec<ScheduledCeremony>,
    /// Ceremonies with offset > 1.
    pub post_wedding: Vec<ScheduledCeremony>,
}

impl TimingGroups {
    /// Returns the group for a timing.
    #[must_use]
    pub fn group(&self, timing: Timing) -> &[ScheduledCeremony] {
        match timing {
            Timing::PreWedding => &self.pre_wedding,
            Timing::WeddingDay => &self.wedding_day,
            Timing::PostWedding => &self.post_wedding,
        }
    }

    /// Total number of ceremonies across all groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pre_wedding.len() + self.wedding_day.len() + self.post_wedding.len()
    }

    /// Returns true if no ceremonies were grouped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
