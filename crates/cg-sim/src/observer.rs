//! Simulation observer trait for progress reporting and data collection.

use cg_agent::Census;
use cg_exchange::ExchangeReport;

/// The per-step output tuple.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct StepSummary {
    pub step:       u64,
    /// Simulated hours elapsed before this step ran.
    pub time_hours: f64,
    pub census:     Census,
    /// `None` for single-domain runs.
    pub exchange:   Option<ExchangeReport>,
}

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// step loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_step_end(&mut self, summary: &StepSummary) {
///         if summary.step % self.interval == 0 {
///             println!("step {}: {} infected", summary.step, summary.census.infected);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each step, before any processing.
    fn on_step_start(&mut self, _step: u64) {}

    /// Called once the step, exchange included, has completed.
    fn on_step_end(&mut self, _summary: &StepSummary) {}

    /// Called once after the final step completes.
    fn on_sim_end(&mut self, _final_step: u64) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
