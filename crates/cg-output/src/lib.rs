//! `cg-output`: simulation output for the rust_contagion framework.
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`run_dir`]     | `RunDirectory`: `<output>/<experiment>/run_<NNNN>` naming  |
//! | [`row`]         | `SummaryRow`, the CSV header                               |
//! | [`writer`]      | `SummaryWriter` trait                                      |
//! | [`csv`]         | `CsvSummaryWriter` (`<output_file>.csv`)                   |
//! | [`observer`]    | `SummaryObserver`, bridging `SimObserver` to a writer      |
//! | [`error`]       | `OutputError`, `OutputResult<T>`                           |
//!
//! # Usage
//!
//! ```rust,ignore
//! use cg_output::{CsvSummaryWriter, RunDirectory, SummaryObserver};
//!
//! let run = RunDirectory::create(&config.experiment)?;
//! run.save_parameters(&config)?;
//! let writer = CsvSummaryWriter::create(run.path(), &config.experiment.output_file)?;
//! let mut obs = SummaryObserver::new(writer);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() { return Err(e.into()); }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod run_dir;
pub mod writer;


pub use csv::CsvSummaryWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SummaryObserver;
pub use row::{SUMMARY_HEADER, SummaryRow};
pub use run_dir::{PARAMETERS_FILE, RunDirectory};
pub use writer::SummaryWriter;
