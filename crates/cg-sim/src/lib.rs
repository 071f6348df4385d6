//! `cg-sim`: the step loop of one domain.
//!
//! # Five-phase step
//!
//! ```text
//! for step in 0..run.n_steps:
//!   ① Places   : decay (or reset) every place's contamination.
//!   ② Shed     : every diseased active agent adds to its current place.
//!   ③ Disease  : death, recovery and infection draws; chunk k of each
//!                collection uses worker stream k.
//!   ④ Count    : parallel reduction into a `Census` of active agents.
//!   ⑤ Update   : schedules advance, journeys progress, leavers are flagged.
//!   ⑥ Exchange : distributed runs only: leavers out, arrivals in.
//!   observer.on_step_end(step summary)
//! ```
//!
//! Every phase is a full barrier: a phase starts only once the previous
//! one has finished on every chunk.  Agents never touch each other; all
//! coupling goes through place contamination written in an earlier phase.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use cg_core::SimConfig;
//! use cg_sim::{NoopObserver, SimBuilder};
//!
//! let config = SimConfig::load(path, &overrides)?;
//! let mut sim = SimBuilder::new(config).build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver, StepSummary};
pub use sim::Sim;
