//! Schedule templates and the library that shares them.
//!
//! # Built-in templates
//!
//! | Kind            | Stops (slot hours)                           | Start |
//! |-----------------|----------------------------------------------|-------|
//! | `stationary`    | home 24                                      | 0     |
//! | `mobile`        | vehicle 1, work 8, vehicle 1, home 14        | 2     |
//! | `remote_travel` | vehicle 8, home 136                          | 1     |
//! | `return_trip`   | vehicle 8, home 2                            | 1     |
//!
//! An agent placed on a template enters at the stop *after* `start`; for
//! `mobile` that is 14 hours at home, after which the daily commute begins.

use cg_core::{PlaceSlot, ScheduleKind};

use crate::{ScheduleError, ScheduleResult};

// ── Stop ──────────────────────────────────────────────────────────────────────

/// One `(destination slot, duration)` entry of a template.
#[derive(Copy, Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Stop {
    pub slot:  PlaceSlot,
    pub hours: f64,
}

impl Stop {
    pub const fn new(slot: PlaceSlot, hours: f64) -> Self {
        Stop { slot, hours }
    }
}

// ── ScheduleTemplate ──────────────────────────────────────────────────────────

/// A shared, read-only cyclic sequence of stops.
///
/// An empty template is the degenerate "stay home" schedule: its destination
/// is always `Home`, its duration is zero and a cursor on it never advances.
#[derive(Clone, Debug, PartialEq)]
pub struct ScheduleTemplate {
    kind:  ScheduleKind,
    stops: Vec<Stop>,
    start: usize,
}

impl ScheduleTemplate {
    /// Build a template, checking the start index and stop durations.
    pub fn new(kind: ScheduleKind, stops: Vec<Stop>, start: usize) -> ScheduleResult<Self> {
        if stops.is_empty() {
            return Ok(Self::empty(kind));
        }
        if start >= stops.len() {
            return Err(ScheduleError::StartOutOfRange { kind, start, len: stops.len() });
        }
        for (index, stop) in stops.iter().enumerate() {
            if !stop.hours.is_finite() || stop.hours < 0.0 {
                return Err(ScheduleError::BadDuration { kind, index, hours: stop.hours });
            }
        }
        // A positive cycle guarantees the cursor's advance loop terminates.
        if stops.iter().map(|s| s.hours).sum::<f64>() <= 0.0 {
            return Err(ScheduleError::ZeroCycle { kind });
        }
        Ok(ScheduleTemplate { kind, stops, start })
    }

    pub fn empty(kind: ScheduleKind) -> Self {
        ScheduleTemplate { kind, stops: Vec::new(), start: 0 }
    }

    /// The built-in template for `kind`.
    pub fn builtin(kind: ScheduleKind) -> Self {
        use PlaceSlot::{Home, Vehicle, Work};
        let (stops, start) = match kind {
            ScheduleKind::Stationary => (vec![Stop::new(Home, 24.0)], 0),
            ScheduleKind::Mobile => (
                vec![
                    Stop::new(Vehicle, 1.0),
                    Stop::new(Work, 8.0),
                    Stop::new(Vehicle, 1.0),
                    Stop::new(Home, 14.0),
                ],
                2,
            ),
            ScheduleKind::RemoteTravel => (vec![Stop::new(Vehicle, 8.0), Stop::new(Home, 136.0)], 1),
            ScheduleKind::ReturnTrip => (vec![Stop::new(Vehicle, 8.0), Stop::new(Home, 2.0)], 1),
        };
        ScheduleTemplate { kind, stops, start }
    }

    #[inline]
    pub fn kind(&self) -> ScheduleKind {
        self.kind
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Position a freshly (re)started cursor occupies.
    #[inline]
    pub fn entry_position(&self) -> usize {
        self.next_position(self.start)
    }

    /// `(position + 1) % len`, or 0 for the empty template.
    #[inline]
    pub fn next_position(&self, position: usize) -> usize {
        if self.stops.is_empty() { 0 } else { (position + 1) % self.stops.len() }
    }

    /// Destination slot at `position`; `Home` for the empty template.
    #[inline]
    pub fn slot_at(&self, position: usize) -> PlaceSlot {
        self.stops.get(position).map_or(PlaceSlot::Home, |s| s.slot)
    }

    /// Stay duration in hours at `position`; zero for the empty template.
    #[inline]
    pub fn hours_at(&self, position: usize) -> f64 {
        self.stops.get(position).map_or(0.0, |s| s.hours)
    }

    /// Sum of all stop durations.
    pub fn cycle_hours(&self) -> f64 {
        self.stops.iter().map(|s| s.hours).sum()
    }
}

// ── ScheduleLibrary ───────────────────────────────────────────────────────────

/// One template per `ScheduleKind`, shared read-only by every agent.
#[derive(Clone, Debug)]
pub struct ScheduleLibrary {
    templates: Vec<ScheduleTemplate>,
}

impl ScheduleLibrary {
    /// Library holding the four built-in templates.
    pub fn builtin() -> Self {
        ScheduleLibrary { templates: ScheduleKind::ALL.into_iter().map(ScheduleTemplate::builtin).collect() }
    }

    #[inline]
    pub fn get(&self, kind: ScheduleKind) -> &ScheduleTemplate {
        &self.templates[kind.index()]
    }

    /// Replace the template for its kind.
    pub fn with_template(mut self, template: ScheduleTemplate) -> Self {
        let i = template.kind().index();
        self.templates[i] = template;
        self
    }
}

impl Default for ScheduleLibrary {
    fn default() -> Self {
        Self::builtin()
    }
}
