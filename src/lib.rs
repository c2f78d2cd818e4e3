//! Custody calendar engine for the twonest co-parenting app.
//!
//! This crate turns a family's recurring custody rotation plus ad-hoc
//! events and pending schedule-change requests into render-ready month
//! data:
//! - [`CustodyRotationResolver`] resolves which parent holds custody at any
//!   instant and enumerates handover transitions
//! - [`detect_conflicts`] flags event pairs that overlap or land within a
//!   buffer window
//! - [`CalendarMonthEngine`] assembles the day-by-day month grid and the
//!   upcoming-transitions sidebar
//!
//! The engine performs no I/O and reads no ambient clock: `now` is always
//! an explicit parameter, and every derived value is a fresh allocation.

pub mod conflict;
pub mod constants;
pub mod error;
pub mod event;
pub mod family;
pub mod month;
pub mod rotation;

// Re-export the public surface at crate root for convenience
pub use conflict::{CalendarConflict, ConflictKind, detect_conflicts};
pub use error::{CalendarError, CalendarResult};
pub use event::{
    CalendarEvent, EventCategory, EventStatus, RequestStatus, ScheduleChangeRequest,
};
pub use family::{Child, CustodyBlock, Family, Parent, ParentSlot, Schedule};
pub use month::{
    CalendarCell, CalendarDayState, CalendarMonthData, CalendarMonthEngine, CustodyColor,
    DayEvent, DayEventKind, UpcomingTransition,
};
pub use rotation::{CustodyRotationResolver, CustodyStatus, ScheduleTransition};
