//! `StepContext`: read-only inputs shared by every agent update in a step.

use cg_place::DestinationRegistry;
use cg_schedule::ScheduleLibrary;

/// Everything an agent may consult while advancing its schedule.
///
/// Built once per step by the pipeline and passed by shared reference into
/// every `Agent::update` call, so agents never reach for global state.
#[derive(Copy, Clone)]
pub struct StepContext<'a> {
    /// Index of the step being simulated.
    pub step: u64,

    /// Simulated hours covered by this step.
    pub step_hours: f64,

    /// The shared schedule templates.
    pub schedules: &'a ScheduleLibrary,

    /// Travel destinations known to this domain.
    pub destinations: &'a DestinationRegistry,
}

impl<'a> StepContext<'a> {
    #[inline]
    pub fn new(
        step:         u64,
        step_hours:   f64,
        schedules:    &'a ScheduleLibrary,
        destinations: &'a DestinationRegistry,
    ) -> Self {
        Self { step, step_hours, schedules, destinations }
    }
}
