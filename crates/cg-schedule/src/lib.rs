//! `cg-schedule`: travel-schedule templates and the per-agent cursor.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`template`]  | `Stop`, `ScheduleTemplate`, `ScheduleLibrary`             |
//! | [`cursor`]    | `ScheduleCursor`, `CursorTick`                            |
//! | [`error`]     | `ScheduleError`, `ScheduleResult<T>`                      |
//!
//! # Cycle model (summary)
//!
//! A template is an immutable cyclic list of `(slot, hours)` stops shared by
//! every agent on that schedule.  Agents hold only a `ScheduleCursor`: the
//! index of the stop they are at and the hours left there.
//!
//! ```text
//! timer -= step_hours
//! while timer <= 0:
//!     position = (position + 1) % len
//!     timer   += hours[position]
//!     move to slot[position]
//! ```
//!
//! Overshoot carries into the next stop, so a step longer than a stay
//! advances more than once.

pub mod cursor;
pub mod error;
pub mod template;

#[cfg(test)]
mod tests;

pub use cursor::{CursorTick, ScheduleCursor};
pub use error::{ScheduleError, ScheduleResult};
pub use template::{ScheduleLibrary, ScheduleTemplate, Stop};
