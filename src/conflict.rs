//! Pairwise event conflict detection.
//!
//! Events are normalized to half-open millisecond intervals and every
//! unordered pair is tested with a buffered overlap predicate. The O(n²)
//! scan is deliberate: the input is one month of family events. An
//! interval-tree sweep only becomes worth it with unbounded horizons.

use serde::{Deserialize, Serialize};

use crate::event::CalendarEvent;

const MS_PER_MINUTE: i64 = 60_000;

/// How a pair of events collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    /// The intervals themselves intersect.
    Overlap,
    /// No direct intersection, but the gap is inside the buffer window.
    BufferWindow,
}

/// Two events that overlap or sit too close together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarConflict {
    pub first: CalendarEvent,
    pub second: CalendarEvent,
    /// Gap between the two intervals in whole minutes; 0 when they overlap.
    pub minutes_apart: i64,
    pub kind: ConflictKind,
}

/// An event reduced to a half-open `[start, end)` millisecond interval.
#[derive(Clone, Copy)]
struct Interval {
    start: i64,
    end: i64,
}

fn normalize(event: &CalendarEvent) -> Interval {
    let (start, end) = event.interval();
    Interval {
        start: start.timestamp_millis(),
        end: end.timestamp_millis(),
    }
}

/// Find every pair of events that overlap or fall within `window_minutes`
/// of each other, ascending by how close they are.
///
/// Negative windows clamp to zero. The output does not depend on the order
/// of the input slice: events are scanned on a deterministic key and ties
/// break on event ids.
pub fn detect_conflicts(events: &[CalendarEvent], window_minutes: i64) -> Vec<CalendarConflict> {
    let window_ms = window_minutes.max(0) * MS_PER_MINUTE;

    let mut ordered: Vec<(Interval, &CalendarEvent)> =
        events.iter().map(|e| (normalize(e), e)).collect();
    ordered.sort_by(|(_, a), (_, b)| (a.start, &a.id).cmp(&(b.start, &b.id)));

    let mut conflicts = Vec::new();
    for i in 0..ordered.len() {
        for j in (i + 1)..ordered.len() {
            let (a, first) = ordered[i];
            let (b, second) = ordered[j];

            // Buffered overlap: Minkowski-sum interval intersection.
            if a.start >= b.end + window_ms || b.start >= a.end + window_ms {
                continue;
            }

            let direct = a.start < b.end && b.start < a.end;
            let gap_ms = if direct {
                0
            } else {
                (a.start - b.end).max(b.start - a.end).max(0)
            };

            conflicts.push(CalendarConflict {
                first: first.clone(),
                second: second.clone(),
                minutes_apart: gap_ms / MS_PER_MINUTE,
                kind: if direct {
                    ConflictKind::Overlap
                } else {
                    ConflictKind::BufferWindow
                },
            });
        }
    }

    conflicts.sort_by(|x, y| {
        (x.minutes_apart, x.first.start, &x.first.id, &x.second.id).cmp(&(
            y.minutes_apart,
            y.first.start,
            &y.first.id,
            &y.second.id,
        ))
    });
    conflicts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventCategory;
    use chrono::{TimeZone, Utc};

    fn timed(title: &str, h1: u32, m1: u32, h2: u32, m2: u32) -> CalendarEvent {
        CalendarEvent::new(
            "fam-1",
            "parent-1",
            title,
            EventCategory::Activity,
            Utc.with_ymd_and_hms(2024, 3, 20, h1, m1, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 20, h2, m2, 0).unwrap(),
        )
    }

    #[test]
    fn test_direct_overlap_with_zero_window() {
        // 2:00-3:00 PM against 2:50-3:30 PM.
        let events = vec![timed("Soccer", 14, 0, 15, 0), timed("Dentist", 14, 50, 15, 30)];
        let conflicts = detect_conflicts(&events, 0);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].kind, ConflictKind::Overlap);
        assert_eq!(conflicts[0].minutes_apart, 0);
    }

    #[test]
    fn test_buffer_window_classification() {
        // 2:00-3:00 PM against 3:10-3:40 PM: disjoint, 10 minutes apart.
        let events = vec![timed("Soccer", 14, 0, 15, 0), timed("Dentist", 15, 10, 15, 40)];
        assert!(detect_conflicts(&events, 0).is_empty());

        let conflicts = detect_conflicts(&events, 30);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].kind, ConflictKind::BufferWindow);
        assert_eq!(conflicts[0].minutes_apart, 10);
    }

    #[test]
    fn test_gap_equal_to_window_is_not_flagged() {
        let events = vec![timed("Soccer", 14, 0, 15, 0), timed("Dentist", 15, 30, 16, 0)];
        assert!(detect_conflicts(&events, 30).is_empty());
        assert_eq!(detect_conflicts(&events, 31).len(), 1);
    }

    #[test]
    fn test_back_to_back_events_do_not_overlap() {
        // Half-open intervals: end == next start is clean.
        let events = vec![timed("Soccer", 14, 0, 15, 0), timed("Piano", 15, 0, 16, 0)];
        assert!(detect_conflicts(&events, 0).is_empty());
    }

    #[test]
    fn test_negative_window_clamps_to_zero() {
        let events = vec![timed("Soccer", 14, 0, 15, 0), timed("Dentist", 15, 10, 15, 40)];
        assert!(detect_conflicts(&events, -30).is_empty());

        let overlapping = vec![timed("Soccer", 14, 0, 15, 0), timed("Dentist", 14, 50, 15, 30)];
        assert_eq!(detect_conflicts(&overlapping, -30).len(), 1);
    }

    #[test]
    fn test_output_independent_of_input_order() {
        let a = timed("Soccer", 14, 0, 15, 0);
        let b = timed("Dentist", 14, 50, 15, 30);
        let c = timed("Piano", 15, 40, 16, 10);

        let forward = detect_conflicts(&[a.clone(), b.clone(), c.clone()], 30);
        let reversed = detect_conflicts(&[c, b, a], 30);
        assert_eq!(forward, reversed);
    }

    #[test]
    fn test_conflicts_sorted_by_closeness() {
        let events = vec![
            timed("Soccer", 14, 0, 15, 0),
            timed("Dentist", 15, 20, 15, 50),
            timed("Piano", 15, 5, 15, 15),
        ];
        let conflicts = detect_conflicts(&events, 30);
        assert!(conflicts.len() >= 2);
        for pair in conflicts.windows(2) {
            assert!(pair[0].minutes_apart <= pair[1].minutes_apart);
        }
        assert_eq!(conflicts[0].minutes_apart, 5);
    }

    #[test]
    fn test_all_day_event_conflicts_with_timed_event_same_day() {
        let all_day = CalendarEvent::new(
            "fam-1",
            "parent-1",
            "Teacher in-service day",
            EventCategory::School,
            Utc.with_ymd_and_hms(2024, 3, 20, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 20, 0, 0, 0).unwrap(),
        )
        .with_all_day(true);
        let events = vec![all_day, timed("Dentist", 14, 0, 15, 0)];

        let conflicts = detect_conflicts(&events, 0);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].kind, ConflictKind::Overlap);
    }

    #[test]
    fn test_every_pair_satisfies_the_buffered_predicate() {
        let events = vec![
            timed("Soccer", 9, 0, 10, 0),
            timed("Dentist", 10, 15, 11, 0),
            timed("Piano", 13, 0, 14, 0),
            timed("Playdate", 13, 30, 15, 0),
        ];
        let window = 20i64;
        for conflict in detect_conflicts(&events, window) {
            let (a_start, a_end) = conflict.first.interval();
            let (b_start, b_end) = conflict.second.interval();
            let w = chrono::Duration::minutes(window);
            assert!(a_start < b_end + w && b_start < a_end + w);
            match conflict.kind {
                ConflictKind::Overlap => assert!(a_start < b_end && b_start < a_end),
                ConflictKind::BufferWindow => {
                    assert!(conflict.minutes_apart > 0 && conflict.minutes_apart < window)
                }
            }
        }
    }
}
