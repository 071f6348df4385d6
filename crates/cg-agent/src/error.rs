use cg_core::{AgentId, CoreError, PlaceSlot};
use cg_place::PlaceError;
use cg_schedule::ScheduleError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PopulationError {
    /// The population initializer never assigned this slot.
    #[error("agent {agent} has no {slot} place assigned")]
    UnsetPlace { agent: AgentId, slot: PlaceSlot },

    #[error("too many agents for the id space: {0}")]
    Capacity(usize),

    #[error(transparent)]
    Place(#[from] PlaceError),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type PopulationResult<T> = Result<T, PopulationError>;
