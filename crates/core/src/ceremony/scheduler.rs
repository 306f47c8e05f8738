//! Ceremony date scheduling.

use chrono::{Days, NaiveDate};

use super::calendar::{CeremonyCalendar, DEFAULT_OFFSET_DAYS};
use super::error::CeremonyError;
use super::tradition::TraditionCatalog;
use super::types::{ScheduledCeremony, Timing, TimingGroups};

/// Derives ceremony dates from a wedding date and a [`CeremonyCalendar`].
#[derive(Debug, Clone, Copy)]
pub struct CeremonyScheduler<'a> {
    calendar: &'a CeremonyCalendar,
}

impl<'a> CeremonyScheduler<'a> {
    /// Creates a scheduler over a calendar.
    #[must_use]
    pub const fn new(calendar: &'a CeremonyCalendar) -> Self {
        Self { calendar }
    }

    /// Effective offset for a ceremony.
    ///
    /// Main ceremonies are 0 regardless of any table entry; unmapped ids
    /// default to [`DEFAULT_OFFSET_DAYS`].
    #[must_use]
    pub fn offset_for(&self, ceremony_id: &str) -> i64 {
        if self.calendar.is_main_ceremony(ceremony_id) {
            return 0;
        }
        self.calendar.table_offset(ceremony_id).unwrap_or_else(|| {
            tracing::warn!(
                ceremony_id,
                offset = DEFAULT_OFFSET_DAYS,
                "ceremony not in offset table, using default offset"
            );
            DEFAULT_OFFSET_DAYS
        })
    }

    /// Calendar date of a ceremony.
    ///
    /// The offset is subtracted from the wedding date, so positive offsets land
    /// earlier and negative ones later. Dates saturate at the calendar bounds.
    #[must_use]
    pub fn schedule_date(&self, wedding_date: NaiveDate, ceremony_id: &str) -> NaiveDate {
        if self.calendar.is_main_ceremony(ceremony_id) {
            return wedding_date;
        }
        shift_days(wedding_date, self.offset_for(ceremony_id))
    }

    /// Schedules one ceremony, keeping its effective offset.
    ///
    /// The offset is resolved once, so an unmapped id logs a single warning.
    #[must_use]
    pub fn schedule(&self, wedding_date: NaiveDate, ceremony_id: &str) -> ScheduledCeremony {
        let offset = self.offset_for(ceremony_id);
        ScheduledCeremony {
            ceremony_id: ceremony_id.to_string(),
            offset,
            date: shift_days(wedding_date, offset),
        }
    }

    /// Partitions ceremonies by the timing of their offset value.
    ///
    /// Each group is sorted by descending offset; ties keep input order.
    #[must_use]
    pub fn group_by_timing(
        &self,
        wedding_date: NaiveDate,
        ceremony_ids: &[impl AsRef<str>],
    ) -> TimingGroups {
        let mut groups = TimingGroups::default();

        for id in ceremony_ids {
            let scheduled = self.schedule(wedding_date, id.as_ref());
            match Timing::from_offset(scheduled.offset) {
                Timing::PreWedding => groups.pre_wedding.push(scheduled),
                Timing::WeddingDay => groups.wedding_day.push(scheduled),
                Timing::PostWedding => groups.post_wedding.push(scheduled),
            }
        }

        for group in [
            &mut groups.pre_wedding,
            &mut groups.wedding_day,
            &mut groups.post_wedding,
        ] {
            group.sort_by(|a, b| b.offset.cmp(&a.offset));
        }

        groups
    }

    /// Schedules ceremonies in date order; same-day ceremonies keep input order.
    #[must_use]
    pub fn itinerary(
        &self,
        wedding_date: NaiveDate,
        ceremony_ids: &[impl AsRef<str>],
    ) -> Vec<ScheduledCeremony> {
        let mut itinerary: Vec<ScheduledCeremony> = ceremony_ids
            .iter()
            .map(|id| self.schedule(wedding_date, id.as_ref()))
            .collect();
        itinerary.sort_by_key(|c| c.date);
        itinerary
    }

    /// Date-ordered itinerary for every ceremony of a tradition.
    ///
    /// # Errors
    ///
    /// Returns `CeremonyError::UnknownTradition` if the slug is not in the catalog.
    pub fn itinerary_for_tradition(
        &self,
        traditions: &TraditionCatalog,
        tradition: &str,
        wedding_date: NaiveDate,
    ) -> Result<Vec<ScheduledCeremony>, CeremonyError> {
        let ceremonies = traditions
            .ceremonies(tradition)
            .ok_or_else(|| CeremonyError::UnknownTradition(tradition.to_string()))?;
        Ok(self.itinerary(wedding_date, ceremonies))
    }
}

/// Moves `date` back by `offset` days (forward when negative), saturating.
fn shift_days(date: NaiveDate, offset: i64) -> NaiveDate {
    let days = Days::new(offset.unsigned_abs());
    if offset >= 0 {
        date.checked_sub_days(days).unwrap_or(NaiveDate::MIN)
    } else {
        date.checked_add_days(days).unwrap_or(NaiveDate::MAX)
    }
}
