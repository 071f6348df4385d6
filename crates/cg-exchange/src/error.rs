use cg_core::AgentId;
use cg_place::PlaceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExchangeError {
    /// A returning agent has no dormant local copy: the domains have diverged.
    #[error("exchange desynchronised: returning agent {identity} has no dormant local copy")]
    Desync { identity: AgentId },

    #[error("protocol fault: {0}")]
    Protocol(String),

    #[error("agent {0} is flagged to leave but is not on a remote trip")]
    Unroutable(AgentId),

    #[error("domain {0:?} hosts no travel destination for visitors")]
    NoHostedDestination(String),

    #[error("unknown domain {0:?}")]
    UnknownDomain(String),

    #[error("channel disconnected while waiting for step {0}")]
    Disconnected(u64),

    #[error("timed out waiting for step {0}")]
    Timeout(u64),

    #[error(transparent)]
    Place(#[from] PlaceError),
}

pub type ExchangeResult<T> = Result<T, ExchangeError>;
