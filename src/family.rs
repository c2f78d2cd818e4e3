//! Family aggregate: parents, children, and the custody rotation definition.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{CalendarError, CalendarResult};

/// One of the two co-parents in a family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parent {
    pub id: String,
    pub name: String,
}

impl Parent {
    pub fn new(id: &str, name: &str) -> Self {
        Parent {
            id: id.to_string(),
            name: name.to_string(),
        }
    }
}

/// A child in the family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Child {
    pub id: String,
    pub name: String,
}

/// Which of the two parents a value refers to.
///
/// `Primary` is always `family.parents[0]`, the parent the calendar colors
/// as "current".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParentSlot {
    Primary,
    Secondary,
}

impl ParentSlot {
    /// Index into `family.parents`.
    pub fn index(self) -> usize {
        match self {
            ParentSlot::Primary => 0,
            ParentSlot::Secondary => 1,
        }
    }

    /// The other parent.
    pub fn other(self) -> ParentSlot {
        match self {
            ParentSlot::Primary => ParentSlot::Secondary,
            ParentSlot::Secondary => ParentSlot::Primary,
        }
    }
}

/// A contiguous run of days assigned to one parent within the rotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustodyBlock {
    pub owner: ParentSlot,
    pub days: u32,
    pub label: String,
}

impl CustodyBlock {
    pub fn new(owner: ParentSlot, days: u32, label: &str) -> Self {
        CustodyBlock {
            owner,
            days,
            label: label.to_string(),
        }
    }
}

/// The repeating custody rotation: an ordered, cyclic list of blocks.
///
/// The cycle repeats indefinitely from the family's anchor date, in both
/// directions. Handovers occur at `transition_hour` (UTC) on block-boundary
/// days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub blocks: Vec<CustodyBlock>,
    /// Hour-of-day (0-23) at which handovers occur.
    pub transition_hour: u32,
    /// Where exchanges take place, shown on transition markers.
    pub exchange_location: Option<String>,
}

impl Schedule {
    /// Week-on/week-off rotation (14-day cycle).
    pub fn alternating_weeks(transition_hour: u32) -> Self {
        Schedule {
            blocks: vec![
                CustodyBlock::new(ParentSlot::Primary, 7, "Week stay"),
                CustodyBlock::new(ParentSlot::Secondary, 7, "Week stay"),
            ],
            transition_hour,
            exchange_location: None,
        }
    }

    /// The common 2-2-3 rotation (14-day cycle).
    pub fn two_two_three(transition_hour: u32) -> Self {
        Schedule {
            blocks: vec![
                CustodyBlock::new(ParentSlot::Primary, 2, "2-day stay"),
                CustodyBlock::new(ParentSlot::Secondary, 2, "2-day stay"),
                CustodyBlock::new(ParentSlot::Primary, 3, "Weekend stay"),
                CustodyBlock::new(ParentSlot::Secondary, 2, "2-day stay"),
                CustodyBlock::new(ParentSlot::Primary, 2, "2-day stay"),
                CustodyBlock::new(ParentSlot::Secondary, 3, "Weekend stay"),
            ],
            transition_hour,
            exchange_location: None,
        }
    }

    pub fn with_exchange_location(mut self, location: &str) -> Self {
        self.exchange_location = Some(location.to_string());
        self
    }

    /// Total cycle length in days.
    pub fn cycle_days(&self) -> i64 {
        self.blocks.iter().map(|b| i64::from(b.days)).sum()
    }

    /// Check the invariants the rotation resolver relies on.
    pub fn validate(&self) -> CalendarResult<()> {
        if self.blocks.is_empty() {
            return Err(CalendarError::InvalidSchedule(
                "schedule has no custody blocks".to_string(),
            ));
        }
        if let Some(block) = self.blocks.iter().find(|b| b.days == 0) {
            return Err(CalendarError::InvalidSchedule(format!(
                "custody block '{}' has zero days",
                block.label
            )));
        }
        if self.transition_hour > 23 {
            return Err(CalendarError::InvalidSchedule(format!(
                "transition hour {} is out of range 0-23",
                self.transition_hour
            )));
        }
        Ok(())
    }
}

/// Aggregate root: the co-parenting family and its custody arrangement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Family {
    pub id: String,
    /// Ordered pair; `parents[0]` is the primary parent for coloring.
    pub parents: [Parent; 2],
    pub children: Vec<Child>,
    /// Date the rotation cycle is measured from (UTC, date-only).
    pub anchor_date: NaiveDate,
    pub schedule: Schedule,
}

impl Family {
    pub fn parent(&self, slot: ParentSlot) -> &Parent {
        &self.parents[slot.index()]
    }
}
