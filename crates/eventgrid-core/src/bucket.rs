//! Conversion from timestamped calendar events into layout intervals.
//!
//! Day and week views lay events out in seconds since midnight, one bucket
//! per day. Month grids use whole-day offsets from an origin date.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::LayoutError;
use crate::interval::IntervalModel;

pub const SECONDS_PER_DAY: i64 = 86_400;

/// Calendar event as delivered by a calendar source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl CalendarEvent {
    /// Create a new calendar event
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            start_time,
            end_time,
        }
    }

    fn validate(&self) -> Result<(), LayoutError> {
        if self.end_time < self.start_time {
            return Err(LayoutError::InvalidInterval {
                start: self.start_time.timestamp(),
                end: self.end_time.timestamp(),
            });
        }
        Ok(())
    }
}

/// Splits events into per-day buckets of seconds-of-day intervals
#[derive(Debug, Clone, Copy)]
pub struct DayBucketer {
    /// Events shorter than this are widened before layout (seconds)
    min_span_seconds: i64,
}

impl DayBucketer {
    /// Create a new bucketer with default settings (15 min minimum span)
    pub fn new() -> Self {
        Self {
            min_span_seconds: 15 * 60,
        }
    }

    /// Set the minimum visual span in minutes
    pub fn with_min_span_minutes(mut self, minutes: u32) -> Self {
        self.min_span_seconds = i64::from(minutes) * 60;
        self
    }

    /// Bucket events by the UTC date they start on.
    ///
    /// An event running past midnight is clamped to the end of its start day.
    /// Each bucket comes back sorted by start.
    ///
    /// # Errors
    /// Returns [`LayoutError::InvalidInterval`] if an event ends before it starts.
    pub fn bucket(
        &self,
        events: &[CalendarEvent],
    ) -> Result<BTreeMap<NaiveDate, Vec<IntervalModel<String>>>, LayoutError> {
        let mut days: BTreeMap<NaiveDate, Vec<IntervalModel<String>>> = BTreeMap::new();

        for event in events {
            event.validate()?;
            let day = event.start_time.date_naive();
            let midnight = day.and_time(NaiveTime::MIN).and_utc();

            let start = (event.start_time - midnight).num_seconds();
            let end = (event.end_time - midnight).num_seconds().min(SECONDS_PER_DAY);
            let end = if end - start < self.min_span_seconds {
                (start + self.min_span_seconds).min(SECONDS_PER_DAY)
            } else {
                end
            };

            days.entry(day)
                .or_default()
                .push(IntervalModel::new(start, end, event.id.clone()));
        }

        for bucket in days.values_mut() {
            bucket.sort_by_key(|e| e.start);
        }

        tracing::debug!(events = events.len(), days = days.len(), "bucketed events by day");
        Ok(days)
    }
}

impl Default for DayBucketer {
    fn default() -> Self {
        Self::new()
    }
}

/// Express events as half-open whole-day ranges relative to `origin`.
///
/// An event on `origin` alone maps to `[0, 1)`; one spanning three dates
/// maps to `[k, k + 3)`.
///
/// # Errors
/// Returns [`LayoutError::InvalidInterval`] if an event ends before it starts.
pub fn day_offset_intervals(
    events: &[CalendarEvent],
    origin: NaiveDate,
) -> Result<Vec<IntervalModel<String>>, LayoutError> {
    events
        .iter()
        .map(|event| {
            event.validate()?;
            let start = (event.start_time.date_naive() - origin).num_days();
            let end = (event.end_time.date_naive() - origin).num_days() + 1;
            Ok(IntervalModel::new(start, end, event.id.clone()))
        })
        .collect()
}
