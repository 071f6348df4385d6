//! The `SummaryWriter` trait implemented by summary backends.

use crate::{OutputResult, SummaryRow};

/// A sink for per-step summary rows.
pub trait SummaryWriter {
    /// Append one row.
    fn write_row(&mut self, row: &SummaryRow) -> OutputResult<()>;

    /// Flush buffered rows.  Called once after the final step; calling it
    /// again is a no-op.
    fn finish(&mut self) -> OutputResult<()>;
}
