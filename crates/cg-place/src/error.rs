use cg_core::{DestinationId, PlaceId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlaceError {
    #[error("place {0} not found")]
    PlaceNotFound(PlaceId),

    #[error("destination {0} not found")]
    DestinationNotFound(DestinationId),

    #[error("no travel destination named {0:?}")]
    UnknownDestination(String),

    #[error("too many {0} for the id space")]
    Capacity(&'static str),
}

pub type PlaceResult<T> = Result<T, PlaceError>;
