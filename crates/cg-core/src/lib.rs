//! `cg-core`: foundational types for the `rust_contagion` simulation kernel.
//!
//! This crate is a dependency of every other `cg-*` crate.  It intentionally
//! has no `cg-*` dependencies.
//!
//! # What lives here
//!
//! | Module          | Contents                                               |
//! |-----------------|--------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `PlaceId`, `DestinationId`                  |
//! | [`kinds`]       | `PlaceSlot`, `ScheduleKind`, `PopulationKind`          |
//! | [`time`]        | `TimeUnit`, `HazardClock`                              |
//! | [`rng`]         | `WorkerRng` (per worker stream), `SimRng` (setup)      |
//! | [`config`]      | `SimConfig` and its TOML sections                      |
//! | [`error`]       | `CoreError`, `CoreResult`                              |

pub mod config;
pub mod error;
pub mod ids;
pub mod kinds;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{
    DestinationConfig, DiseaseConfig, DomainConfig, ExperimentConfig, ModelConfig, PlacesConfig,
    RunConfig, ScheduleConfig, SimConfig, TimeStepConfig, TravelConfig,
};
pub use error::{CoreError, CoreResult};
pub use ids::{AgentId, DestinationId, PlaceId};
pub use kinds::{PlaceSlot, PopulationKind, ScheduleKind};
pub use rng::{SimRng, WorkerRng};
pub use time::{HazardClock, TimeUnit};
