//! Month-grid orchestration.
//!
//! `CalendarMonthEngine` merges the custody rotation, ad-hoc events, and
//! pending schedule-change requests into an immutable view-model ready for
//! rendering.

mod grid;
mod upcoming;

pub use grid::{CalendarCell, CalendarDayState, CustodyColor, DayEvent, DayEventKind};
pub use upcoming::UpcomingTransition;

use std::collections::HashMap;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::conflict::{self, CalendarConflict};
use crate::error::CalendarResult;
use crate::event::{CalendarEvent, ScheduleChangeRequest};
use crate::family::{Family, Parent, ParentSlot};
use crate::rotation::{CustodyRotationResolver, ScheduleTransition};

/// Render-ready month view: grid cells, sidebar transitions, and the two
/// parents for legend display. Plain data with no behavior, safe to
/// serialize across the server/client boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarMonthData {
    pub year: i32,
    /// 1-12.
    pub month: u32,
    /// Leading placeholders for grid alignment, then one cell per day.
    pub cells: Vec<CalendarCell>,
    pub upcoming_transitions: Vec<UpcomingTransition>,
    pub current_parent: Parent,
    pub other_parent: Parent,
}

/// Builds month views for one family.
///
/// Holds only immutable configuration across calls. `month_data` is a pure
/// function of its arguments; `now` is injected rather than read from the
/// system clock, so renders are deterministic.
pub struct CalendarMonthEngine {
    family: Family,
    resolver: CustodyRotationResolver,
}

impl CalendarMonthEngine {
    /// Validates the family's schedule up front: a bad rotation fails here
    /// instead of producing a silently wrong grid later.
    pub fn new(family: Family) -> CalendarResult<Self> {
        let resolver = CustodyRotationResolver::new(family.anchor_date, &family.schedule)?;
        Ok(CalendarMonthEngine { family, resolver })
    }

    pub fn family(&self) -> &Family {
        &self.family
    }

    pub fn resolver(&self) -> &CustodyRotationResolver {
        &self.resolver
    }

    /// Assemble the view-model for one month.
    ///
    /// `year`/`month` must name a real calendar month (`month` 1-12). This
    /// is an internal orchestration surface, not an input boundary, so the
    /// precondition is the caller's to uphold.
    pub fn month_data(
        &self,
        year: i32,
        month: u32,
        events: &[CalendarEvent],
        requests: &[ScheduleChangeRequest],
        now: DateTime<Utc>,
    ) -> CalendarMonthData {
        debug!(family = %self.family.id, "building month grid for {year}-{month:02}");

        let first = NaiveDate::from_ymd_opt(year, month, 1).expect("month must be 1-12");
        let day_count = days_in_month(year, month);
        let month_start = first.and_hms_opt(0, 0, 0).unwrap().and_utc();
        let month_end = month_start + chrono::Duration::days(i64::from(day_count));

        let pending = pending_by_day(requests);
        let transitions = self.resolver.transitions_in_range(month_start, month_end);
        let transition_days = transitions_by_day(&transitions);

        // Sunday-first grid: pad the partial first week.
        let leading = first.weekday().num_days_from_sunday() as usize;
        let mut cells = Vec::with_capacity(leading + day_count as usize);
        for _ in 0..leading {
            cells.push(CalendarCell::Placeholder);
        }
        for day in 1..=day_count {
            let date = NaiveDate::from_ymd_opt(year, month, day).expect("day is in month");
            cells.push(CalendarCell::Day(grid::build_day_state(
                date,
                &self.resolver,
                transition_days.get(&date).copied(),
                events,
                pending.get(&date),
            )));
        }

        CalendarMonthData {
            year,
            month,
            cells,
            upcoming_transitions: upcoming::build_upcoming(&self.resolver, now),
            current_parent: self.family.parent(ParentSlot::Primary).clone(),
            other_parent: self.family.parent(ParentSlot::Secondary).clone(),
        }
    }

    /// Conflict detection, exposed here so the calendar page talks to a
    /// single engine surface.
    pub fn detect_conflicts(
        &self,
        events: &[CalendarEvent],
        window_minutes: i64,
    ) -> Vec<CalendarConflict> {
        conflict::detect_conflicts(events, window_minutes)
    }
}

/// Days in a proleptic-Gregorian month.
fn days_in_month(year: i32, month: u32) -> u32 {
    let first = NaiveDate::from_ymd_opt(year, month, 1).expect("month must be 1-12");
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .expect("first of month is always valid");
    (next - first).num_days() as u32
}

/// Expand pending requests into per-day markers. The earliest-created
/// pending request wins a contested day.
fn pending_by_day(requests: &[ScheduleChangeRequest]) -> HashMap<NaiveDate, String> {
    let mut pending: Vec<&ScheduleChangeRequest> =
        requests.iter().filter(|r| r.is_pending()).collect();
    pending.sort_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)));

    let mut map = HashMap::new();
    for request in pending {
        for day in request.giving_up_days() {
            map.entry(day).or_insert_with(|| request.id.clone());
        }
    }
    map
}

/// At most one handover lands per day (blocks are at least one day long),
/// so a per-day lookup is lossless.
fn transitions_by_day(
    transitions: &[ScheduleTransition],
) -> HashMap<NaiveDate, &ScheduleTransition> {
    let mut map = HashMap::new();
    for transition in transitions {
        map.entry(transition.at.date_naive()).or_insert(transition);
    }
    map
}
