//! Day-cell view types and per-day assembly.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::constants::MAX_DAY_EVENTS;
use crate::event::{CalendarEvent, EventCategory};
use crate::family::ParentSlot;
use crate::rotation::{CustodyRotationResolver, ScheduleTransition};

/// Custody coloring for a day cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustodyColor {
    Primary,
    Secondary,
    /// A handover lands on this day, so it is divided between both parents.
    Split,
}

/// What a merged display entry represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayEventKind {
    /// Synthesized handover marker.
    Exchange,
    /// An actual calendar event.
    Event(EventCategory),
}

/// One display entry in a day cell, capped at `MAX_DAY_EVENTS` per day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayEvent {
    /// Source event id; `None` for the synthesized exchange marker.
    pub id: Option<String>,
    pub title: String,
    pub kind: DayEventKind,
    pub icon: String,
    pub color: String,
    /// Start-time label for timed entries, e.g. "2:30 PM".
    pub time: Option<String>,
    pub location: Option<String>,
}

/// One rendered day. Constructed fresh on every `month_data` call, never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarDayState {
    pub date: NaiveDate,
    pub day: u32,
    pub custody: CustodyColor,
    /// Noon-sampled holding parent (the incoming parent on split days).
    pub holder: ParentSlot,
    pub events: Vec<DayEvent>,
    /// Id of the pending change request covering this day, if any.
    pub pending_request: Option<String>,
}

/// A month-grid cell: a blank leading pad from the previous month, or a
/// real day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CalendarCell {
    Placeholder,
    Day(CalendarDayState),
}

/// Assemble the state for one rendered day.
pub(super) fn build_day_state(
    date: NaiveDate,
    resolver: &CustodyRotationResolver,
    transition: Option<&ScheduleTransition>,
    events: &[CalendarEvent],
    pending_request: Option<&String>,
) -> CalendarDayState {
    let holder = resolver.owner_on(date);
    let custody = match (transition, holder) {
        (Some(_), _) => CustodyColor::Split,
        (None, ParentSlot::Primary) => CustodyColor::Primary,
        (None, ParentSlot::Secondary) => CustodyColor::Secondary,
    };

    // Transitions rank first, then the day's events by start time.
    let mut merged = Vec::new();
    if let Some(transition) = transition {
        merged.push(exchange_entry(transition));
    }
    let mut day_events: Vec<&CalendarEvent> =
        events.iter().filter(|e| covers_day(e, date)).collect();
    day_events.sort_by(|a, b| (a.start, &a.id).cmp(&(b.start, &b.id)));
    merged.extend(day_events.into_iter().map(event_entry));
    merged.truncate(MAX_DAY_EVENTS);

    CalendarDayState {
        date,
        day: date.day(),
        custody,
        holder,
        events: merged,
        pending_request: pending_request.cloned(),
    }
}

/// Whether an event's normalized span touches a UTC day.
fn covers_day(event: &CalendarEvent, date: NaiveDate) -> bool {
    let day_start = date.and_hms_opt(0, 0, 0).unwrap().and_utc();
    let day_end = day_start + Duration::days(1);
    let (start, end) = event.interval();
    // Zero-length events still show on their start day.
    (start < day_end && end > day_start) || (start == end && start >= day_start && start < day_end)
}

fn exchange_entry(transition: &ScheduleTransition) -> DayEvent {
    let time = transition.at.format("%-I:%M %p").to_string();
    DayEvent {
        id: None,
        title: format!("Exchange {time}"),
        kind: DayEventKind::Exchange,
        icon: "swap".to_string(),
        color: "violet".to_string(),
        time: Some(time),
        location: transition.location.clone(),
    }
}

fn event_entry(event: &CalendarEvent) -> DayEvent {
    DayEvent {
        id: Some(event.id.clone()),
        title: event.title.clone(),
        kind: DayEventKind::Event(event.category),
        icon: event.category.icon().to_string(),
        color: event.category.color().to_string(),
        time: (!event.all_day).then(|| event.start.format("%-I:%M %p").to_string()),
        location: event.location.clone(),
    }
}
