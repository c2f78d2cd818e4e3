//! Event and schedule-change-request records.
//!
//! These are the inbound data contracts supplied by the persistence layer.
//! The engine never mutates them; every derived value is a fresh allocation.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category of a calendar event, driving the icon and color shown in day
/// cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    Holiday,
    Activity,
    Medical,
    School,
    #[default]
    Other,
}

impl EventCategory {
    /// Icon token rendered in the day cell.
    pub fn icon(self) -> &'static str {
        match self {
            EventCategory::Holiday => "sun",
            EventCategory::Activity => "ball",
            EventCategory::Medical => "stethoscope",
            EventCategory::School => "backpack",
            EventCategory::Other => "calendar",
        }
    }

    /// Color token rendered in the day cell.
    pub fn color(self) -> &'static str {
        match self {
            EventCategory::Holiday => "amber",
            EventCategory::Activity => "green",
            EventCategory::Medical => "red",
            EventCategory::School => "blue",
            EventCategory::Other => "gray",
        }
    }
}

/// Confirmation status of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    #[default]
    Confirmed,
    Tentative,
    Cancelled,
}

/// A calendar event shared between the two households.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub family_id: String,
    pub title: String,
    pub category: EventCategory,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub all_day: bool,
    pub location: Option<String>,
    /// Parent id of the creator.
    pub created_by: String,
    pub status: EventStatus,
}

impl CalendarEvent {
    /// Create a confirmed, timed event with a fresh id. An `end` earlier
    /// than `start` is normalized to `start`.
    pub fn new(
        family_id: &str,
        created_by: &str,
        title: &str,
        category: EventCategory,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        CalendarEvent {
            id: Uuid::new_v4().to_string(),
            family_id: family_id.to_string(),
            title: title.to_string(),
            category,
            start,
            end: end.max(start),
            all_day: false,
            location: None,
            created_by: created_by.to_string(),
            status: EventStatus::Confirmed,
        }
    }

    pub fn with_all_day(mut self, all_day: bool) -> Self {
        self.all_day = all_day;
        self
    }

    pub fn with_location(mut self, location: &str) -> Self {
        self.location = Some(location.to_string());
        self
    }

    pub fn with_status(mut self, status: EventStatus) -> Self {
        self.status = status;
        self
    }

    /// Half-open `[start, end)` interval this event occupies.
    ///
    /// All-day events cover the full UTC day(s) they span; timed events use
    /// their literal instants with `end` clamped to `start`.
    pub fn interval(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        if self.all_day {
            let start_day = self.start.date_naive();
            let end_day = self.end.date_naive().max(start_day);
            (
                start_day.and_hms_opt(0, 0, 0).unwrap().and_utc(),
                (end_day + Duration::days(1))
                    .and_hms_opt(0, 0, 0)
                    .unwrap()
                    .and_utc(),
            )
        } else {
            (self.start, self.end.max(self.start))
        }
    }
}

/// Status of a schedule-change request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    #[default]
    Pending,
    Accepted,
    Declined,
}

/// A proposed exception to the rotation: one parent offers to give up a
/// date range in exchange for a replacement range.
///
/// Only pending requests influence calendar rendering; acceptance and
/// decline workflows live outside this engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleChangeRequest {
    pub id: String,
    pub family_id: String,
    /// Parent id of the requester.
    pub requested_by: String,
    pub giving_up_start: NaiveDate,
    pub giving_up_end: NaiveDate,
    pub proposed_start: NaiveDate,
    pub proposed_end: NaiveDate,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
}

impl ScheduleChangeRequest {
    /// Create a pending request with a fresh id.
    pub fn new(
        family_id: &str,
        requested_by: &str,
        giving_up: (NaiveDate, NaiveDate),
        proposed: (NaiveDate, NaiveDate),
        created_at: DateTime<Utc>,
    ) -> Self {
        ScheduleChangeRequest {
            id: Uuid::new_v4().to_string(),
            family_id: family_id.to_string(),
            requested_by: requested_by.to_string(),
            giving_up_start: giving_up.0,
            giving_up_end: giving_up.1.max(giving_up.0),
            proposed_start: proposed.0,
            proposed_end: proposed.1.max(proposed.0),
            status: RequestStatus::Pending,
            created_at,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }

    /// The days being given up (inclusive range walk).
    pub fn giving_up_days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.giving_up_start
            .iter_days()
            .take_while(move |day| *day <= self.giving_up_end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    #[test]
    fn test_new_event_clamps_end_before_start() {
        let start = Utc.with_ymd_and_hms(2024, 3, 20, 15, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 3, 20, 14, 0, 0).unwrap();
        let event = CalendarEvent::new("fam-1", "parent-1", "Dentist", EventCategory::Medical, start, end);
        assert_eq!(event.end, start);
        assert_eq!(event.status, EventStatus::Confirmed);

        let tentative = event.clone().with_status(EventStatus::Tentative).with_location("Clinic");
        assert_eq!(tentative.status, EventStatus::Tentative);
        assert_eq!(tentative.location.as_deref(), Some("Clinic"));
    }

    #[test]
    fn test_all_day_interval_spans_full_days() {
        let start = Utc.with_ymd_and_hms(2024, 3, 20, 9, 30, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 3, 21, 11, 0, 0).unwrap();
        let event = CalendarEvent::new("fam-1", "parent-1", "Spring break", EventCategory::Holiday, start, end)
            .with_all_day(true);

        let (istart, iend) = event.interval();
        assert_eq!(istart, Utc.with_ymd_and_hms(2024, 3, 20, 0, 0, 0).unwrap());
        assert_eq!(iend, Utc.with_ymd_and_hms(2024, 3, 22, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_timed_interval_is_literal() {
        let start = Utc.with_ymd_and_hms(2024, 3, 20, 14, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 3, 20, 15, 0, 0).unwrap();
        let event = CalendarEvent::new("fam-1", "parent-1", "Soccer", EventCategory::Activity, start, end);
        assert_eq!(event.interval(), (start, end));
    }

    #[test]
    fn test_giving_up_days_walks_inclusive_range() {
        let request = ScheduleChangeRequest::new(
            "fam-1",
            "parent-2",
            (
                NaiveDate::from_ymd_opt(2024, 12, 30).unwrap(),
                NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
            ),
            (
                NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
                NaiveDate::from_ymd_opt(2025, 1, 13).unwrap(),
            ),
            Utc.with_ymd_and_hms(2024, 12, 1, 8, 0, 0).unwrap(),
        );

        let days: Vec<NaiveDate> = request.giving_up_days().collect();
        assert_eq!(days.len(), 4);
        assert_eq!(days[0], NaiveDate::from_ymd_opt(2024, 12, 30).unwrap());
        assert_eq!(days[3], NaiveDate::from_ymd_opt(2025, 1, 2).unwrap());
        assert!(request.is_pending());
    }

    #[test]
    fn test_category_tokens() {
        assert_eq!(EventCategory::Medical.icon(), "stethoscope");
        assert_eq!(EventCategory::School.color(), "blue");
    }
}
