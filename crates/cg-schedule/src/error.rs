use cg_core::ScheduleKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("{kind} template: start index {start} out of range for {len} stops")]
    StartOutOfRange { kind: ScheduleKind, start: usize, len: usize },

    #[error("{kind} template: stop {index} has invalid duration {hours}")]
    BadDuration { kind: ScheduleKind, index: usize, hours: f64 },

    #[error("{kind} template: cycle has zero total duration")]
    ZeroCycle { kind: ScheduleKind },
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
