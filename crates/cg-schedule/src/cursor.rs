//! Per-agent position within a shared template.

use cg_core::{PlaceSlot, ScheduleKind};

use crate::ScheduleTemplate;

/// Result of advancing a cursor by one step.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct CursorTick {
    /// Slot of the last stop entered this step, if any.
    pub arrived:          Option<PlaceSlot>,
    /// Number of stops entered this step.
    pub advances:         u32,
    /// Times the cursor re-entered its entry position, i.e. finished a cycle.
    pub cycles_completed: u32,
}

impl CursorTick {
    #[inline]
    pub fn moved(&self) -> bool {
        self.advances > 0
    }
}

/// Which template an agent follows, where it is in it and how long it stays.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScheduleCursor {
    pub kind:     ScheduleKind,
    pub position: usize,
    /// Simulated hours left at the current stop.
    pub timer:    f64,
}

impl ScheduleCursor {
    /// A cursor at `template`'s entry position with a full countdown.
    pub fn start(template: &ScheduleTemplate) -> Self {
        let position = template.entry_position();
        ScheduleCursor { kind: template.kind(), position, timer: template.hours_at(position) }
    }

    /// Hard switch to another template; the previous countdown is discarded.
    /// Returns the slot the agent now occupies.
    pub fn reset(&mut self, template: &ScheduleTemplate) -> PlaceSlot {
        *self = Self::start(template);
        template.slot_at(self.position)
    }

    /// Slot of the current stop.
    #[inline]
    pub fn slot(&self, template: &ScheduleTemplate) -> PlaceSlot {
        template.slot_at(self.position)
    }

    /// Count down `hours` and enter every stop whose turn has come.
    ///
    /// Overshoot carries into the next stop: its duration is added to the
    /// remaining timer rather than replacing it, so a step longer than
    /// several stops walks through all of them.
    ///
    /// `template` must be the template this cursor was started on.
    pub fn tick(&mut self, hours: f64, template: &ScheduleTemplate) -> CursorTick {
        debug_assert_eq!(self.kind, template.kind());
        let mut out = CursorTick::default();
        if template.is_empty() {
            return out;
        }
        let entry = template.entry_position();
        self.timer -= hours;
        while self.timer <= 0.0 {
            self.position = template.next_position(self.position);
            self.timer += template.hours_at(self.position);
            out.arrived = Some(template.slot_at(self.position));
            out.advances += 1;
            if self.position == entry {
                out.cycles_completed += 1;
            }
        }
        out
    }
}
