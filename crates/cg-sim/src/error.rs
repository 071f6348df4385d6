use cg_agent::PopulationError;
use cg_core::CoreError;
use cg_exchange::ExchangeError;
use rayon::ThreadPoolBuildError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("population error: {0}")]
    Population(#[from] PopulationError),

    #[error("exchange error: {0}")]
    Exchange(#[from] ExchangeError),

    #[error("could not start worker pool: {0}")]
    ThreadPool(#[from] ThreadPoolBuildError),
}

pub type SimResult<T> = Result<T, SimError>;
