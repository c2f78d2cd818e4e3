//! Custody rotation resolution.
//!
//! The rotation is stored declaratively (ordered block list plus anchor
//! date) and resolved on demand with modular day arithmetic. There is no
//! per-day cache to invalidate when the schedule definition changes.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::NOON_HOUR;
use crate::error::CalendarResult;
use crate::family::{CustodyBlock, ParentSlot, Schedule};

/// Which parent holds custody at a sampled instant, and in which block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustodyStatus {
    pub owner: ParentSlot,
    pub block_label: String,
}

/// A custody handover. Computed from the schedule on demand, never stored,
/// so it cannot drift from the rotation definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleTransition {
    pub at: DateTime<Utc>,
    pub from: ParentSlot,
    pub to: ParentSlot,
    pub location: Option<String>,
}

/// Resolves the repeating custody rotation against concrete dates.
///
/// Holds only immutable, validated configuration; every query is a pure
/// function of its arguments.
#[derive(Debug, Clone)]
pub struct CustodyRotationResolver {
    anchor: NaiveDate,
    blocks: Vec<CustodyBlock>,
    cycle_days: i64,
    transition_hour: u32,
    exchange_location: Option<String>,
}

impl CustodyRotationResolver {
    /// Build a resolver, failing fast on a schedule that would otherwise
    /// produce silently wrong per-day results.
    pub fn new(anchor: NaiveDate, schedule: &Schedule) -> CalendarResult<Self> {
        schedule.validate()?;
        Ok(CustodyRotationResolver {
            anchor,
            blocks: schedule.blocks.clone(),
            cycle_days: schedule.cycle_days(),
            transition_hour: schedule.transition_hour,
            exchange_location: schedule.exchange_location.clone(),
        })
    }

    /// Day offset into the cycle for a date. `rem_euclid` keeps dates
    /// before the anchor (and anchors in the future) on the same
    /// well-defined cycle.
    fn cycle_position(&self, date: NaiveDate) -> i64 {
        (date - self.anchor).num_days().rem_euclid(self.cycle_days)
    }

    /// Index of the block containing a cycle position.
    fn block_index(&self, position: i64) -> usize {
        let mut start = 0i64;
        let last = self.blocks.len() - 1;
        for (i, block) in self.blocks.iter().enumerate() {
            let end = start + i64::from(block.days);
            if position < end || i == last {
                return i;
            }
            start = end;
        }
        last
    }

    /// Which parent holds custody on the calendar day containing `at`.
    ///
    /// Day-granular and inclusive-at-start: a block-boundary day belongs to
    /// the incoming block. Callers sample at noon (`owner_on`) to stay
    /// clear of the handover hour.
    pub fn status_at(&self, at: DateTime<Utc>) -> CustodyStatus {
        let block = &self.blocks[self.block_index(self.cycle_position(at.date_naive()))];
        CustodyStatus {
            owner: block.owner,
            block_label: block.label.clone(),
        }
    }

    /// Noon-sampled owner for a calendar day.
    pub fn owner_on(&self, date: NaiveDate) -> ParentSlot {
        let noon = date.and_hms_opt(NOON_HOUR, 0, 0).unwrap().and_utc();
        self.status_at(noon).owner
    }

    /// Whether the rotation ever hands custody over at all.
    fn has_handover(&self) -> bool {
        self.blocks.iter().any(|b| b.owner != self.blocks[0].owner)
    }

    /// Transition instant on a boundary day.
    fn transition_at(&self, boundary: NaiveDate) -> DateTime<Utc> {
        boundary
            .and_hms_opt(self.transition_hour, 0, 0)
            .unwrap()
            .and_utc()
    }

    /// Handovers for one repetition of the cycle, in block order.
    /// Boundaries between consecutive same-owner blocks emit nothing.
    fn cycle_transitions(&self, cycle: i64) -> Vec<ScheduleTransition> {
        let cycle_start = self.anchor + Duration::days(cycle * self.cycle_days);
        let mut out = Vec::new();
        let mut day = 0i64;
        for (i, block) in self.blocks.iter().enumerate() {
            let prev = if i == 0 { self.blocks.len() - 1 } else { i - 1 };
            let from = self.blocks[prev].owner;
            if from != block.owner {
                out.push(ScheduleTransition {
                    at: self.transition_at(cycle_start + Duration::days(day)),
                    from,
                    to: block.owner,
                    location: self.exchange_location.clone(),
                });
            }
            day += i64::from(block.days);
        }
        out
    }

    /// Index of the cycle to start walking from for a given date: one full
    /// cycle early, so boundaries earlier on the same day are not missed.
    fn first_cycle_for(&self, date: NaiveDate) -> i64 {
        (date - self.anchor).num_days().div_euclid(self.cycle_days) - 1
    }

    /// All handovers whose transition instant falls in `[start, end)`,
    /// strictly ascending.
    pub fn transitions_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Vec<ScheduleTransition> {
        let mut out = Vec::new();
        if start >= end || !self.has_handover() {
            return out;
        }

        let mut cycle = self.first_cycle_for(start.date_naive());
        loop {
            let cycle_start = self.anchor + Duration::days(cycle * self.cycle_days);
            // Earliest possible transition in this cycle is on its first day.
            if self.transition_at(cycle_start) >= end {
                break;
            }
            for transition in self.cycle_transitions(cycle) {
                if transition.at >= start && transition.at < end {
                    out.push(transition);
                }
            }
            cycle += 1;
        }
        out
    }

    /// The next `limit` handovers at or after `now`.
    ///
    /// Scans forward cycle-by-cycle, so cost is bounded by the cycle length
    /// plus `limit`, not by how long ago the rotation was anchored.
    pub fn upcoming_transitions(
        &self,
        now: DateTime<Utc>,
        limit: usize,
    ) -> Vec<ScheduleTransition> {
        let mut out = Vec::new();
        if limit == 0 || !self.has_handover() {
            return out;
        }

        let mut cycle = self.first_cycle_for(now.date_naive());
        while out.len() < limit {
            for transition in self.cycle_transitions(cycle) {
                if transition.at >= now {
                    out.push(transition);
                    if out.len() == limit {
                        break;
                    }
                }
            }
            cycle += 1;
        }
        out
    }
}
