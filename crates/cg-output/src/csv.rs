//! CSV summary backend.

use std::fs::File;
use std::path::{Path, PathBuf};

use csv::Writer;

use crate::writer::SummaryWriter;
use crate::{OutputResult, SUMMARY_HEADER, SummaryRow};

/// Writes one summary row per step to `<dir>/<output_file>.csv`.
pub struct CsvSummaryWriter {
    path:     PathBuf,
    rows:     Writer<File>,
    finished: bool,
}

impl CsvSummaryWriter {
    /// Create (or truncate) the summary file and write the header row.
    pub fn create(dir: &Path, output_file: &str) -> OutputResult<Self> {
        let path = dir.join(format!("{output_file}.csv"));
        let mut rows = Writer::from_path(&path)?;
        rows.write_record(SUMMARY_HEADER)?;
        Ok(Self { path, rows, finished: false })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SummaryWriter for CsvSummaryWriter {
    fn write_row(&mut self, row: &SummaryRow) -> OutputResult<()> {
        self.rows.write_record(row.fields())?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.rows.flush()?;
        Ok(())
    }
}
