//! `cg-agent`: agents and the populations they form.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`agent`]       | `Agent`, `Journey`, `TripPlan`                            |
//! | [`context`]     | `StepContext` (read-only per-step inputs)                 |
//! | [`store`]       | `AgentStore` (locals + traveller placeholders), `Census`  |
//! | [`population`]  | `Population`, `build_population` initializers             |
//! | [`error`]       | `PopulationError`, `PopulationResult<T>`                  |
//!
//! Agents never point at places or at each other.  An agent maps each
//! `PlaceSlot` to a `PlaceId` and its current slot selects one of them; the
//! disease and place updates resolve that handle against the `PlaceStore`.

pub mod agent;
pub mod context;
pub mod error;
pub mod population;
pub mod store;

#[cfg(test)]
mod tests;

pub use agent::{Agent, Journey, TripPlan};
pub use context::StepContext;
pub use error::{PopulationError, PopulationResult};
pub use population::{Population, build_population};
pub use store::{AgentStore, Census};
