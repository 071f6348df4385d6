//! `cg-disease`: health flags and the simplistic disease model.
//!
//! | Module      | Contents                                 |
//! |-------------|------------------------------------------|
//! | [`health`]  | `Health` flags and their transitions     |
//! | [`model`]   | `DiseaseModel`, `Transition`             |
//!
//! The model holds only per-hour rates; every call is handed the step length
//! and a random stream by the caller, so one `DiseaseModel` is shared
//! read-only by every worker.

pub mod health;
pub mod model;


pub use health::Health;
pub use model::{DiseaseModel, Transition};
