//! Sidebar list of upcoming handovers.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::UPCOMING_WINDOW_DAYS;
use crate::family::ParentSlot;
use crate::rotation::{CustodyRotationResolver, ScheduleTransition};

/// A handover in the sidebar lookahead, with render-ready labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpcomingTransition {
    pub at: DateTime<Utc>,
    pub from: ParentSlot,
    pub to: ParentSlot,
    /// "Today", "Tomorrow", or the weekday name.
    pub day_label: String,
    /// 12-hour clock label, e.g. "5:00 PM".
    pub time_label: String,
    pub location: Option<String>,
}

/// Transitions within the lookahead window of `now`, labeled by
/// calendar-day difference rather than elapsed hours.
pub(super) fn build_upcoming(
    resolver: &CustodyRotationResolver,
    now: DateTime<Utc>,
) -> Vec<UpcomingTransition> {
    let horizon = now + Duration::days(UPCOMING_WINDOW_DAYS);
    resolver
        .transitions_in_range(now, horizon)
        .into_iter()
        .map(|transition| label(transition, now))
        .collect()
}

fn label(transition: ScheduleTransition, now: DateTime<Utc>) -> UpcomingTransition {
    let day_diff = (transition.at.date_naive() - now.date_naive()).num_days();
    let day_label = match day_diff {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ => transition.at.format("%A").to_string(),
    };
    UpcomingTransition {
        at: transition.at,
        from: transition.from,
        to: transition.to,
        day_label,
        time_label: transition.at.format("%-I:%M %p").to_string(),
        location: transition.location,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::family::Schedule;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn resolver() -> CustodyRotationResolver {
        // Alternating weeks anchored on a Monday, 5 PM handovers.
        CustodyRotationResolver::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            &Schedule::alternating_weeks(17),
        )
        .unwrap()
    }

    #[test]
    fn test_labels_today_tomorrow_and_weekday() {
        // Handovers fall on Mondays. Late on Sunday Jan 7 the Monday Jan 8
        // handover is "Tomorrow"; on Monday morning it is "Today".
        let sunday_night = Utc.with_ymd_and_hms(2024, 1, 7, 22, 0, 0).unwrap();
        let upcoming = build_upcoming(&resolver(), sunday_night);
        assert_eq!(upcoming[0].day_label, "Tomorrow");

        let monday_morning = Utc.with_ymd_and_hms(2024, 1, 8, 8, 0, 0).unwrap();
        let upcoming = build_upcoming(&resolver(), monday_morning);
        assert_eq!(upcoming[0].day_label, "Today");
        assert_eq!(upcoming[0].time_label, "5:00 PM");
        // The following handover, a week out, gets the weekday name.
        assert_eq!(upcoming[1].day_label, "Monday");
    }

    #[test]
    fn test_day_label_uses_calendar_days_not_elapsed_hours() {
        // 11 PM to 5 PM next day is under 24 hours but still "Tomorrow".
        let now = Utc.with_ymd_and_hms(2024, 1, 7, 23, 0, 0).unwrap();
        let upcoming = build_upcoming(&resolver(), now);
        assert_eq!(upcoming[0].at, Utc.with_ymd_and_hms(2024, 1, 8, 17, 0, 0).unwrap());
        assert_eq!(upcoming[0].day_label, "Tomorrow");
    }

    #[test]
    fn test_window_bounds_the_lookahead() {
        // Weekly handovers: a 14-day window from mid-week catches two.
        let now = Utc.with_ymd_and_hms(2024, 1, 3, 9, 0, 0).unwrap();
        let upcoming = build_upcoming(&resolver(), now);
        assert_eq!(upcoming.len(), 2);
        assert_eq!(upcoming[0].from, ParentSlot::Primary);
        assert_eq!(upcoming[0].to, ParentSlot::Secondary);
        assert_eq!(upcoming[1].from, ParentSlot::Secondary);
        assert_eq!(upcoming[1].to, ParentSlot::Primary);
    }
}
