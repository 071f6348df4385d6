//! `SummaryObserver<W>`: bridges `SimObserver` to a `SummaryWriter`.

use cg_sim::{SimObserver, StepSummary};

use crate::writer::SummaryWriter;
use crate::{OutputError, OutputResult, SummaryRow};

/// A [`SimObserver`] that writes one summary row per step.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SummaryObserver<W: SummaryWriter> {
    writer:     W,
    rows:       u64,
    last_error: Option<OutputError>,
}

impl<W: SummaryWriter> SummaryObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, rows: 0, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Rows handed to the writer so far.
    pub fn rows(&self) -> u64 {
        self.rows
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: SummaryWriter> SimObserver for SummaryObserver<W> {
    fn on_step_end(&mut self, summary: &StepSummary) {
        let result = self.writer.write_row(&SummaryRow::from(summary));
        if result.is_ok() {
            self.rows += 1;
        }
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _final_step: u64) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
