//! The per-step summary row.

use cg_sim::StepSummary;

/// Column names of the summary file, in order.
pub const SUMMARY_HEADER: [&str; 6] = ["step", "time(hours)", "susceptible", "infected", "recovered", "dead"];

/// One line of the summary file.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SummaryRow {
    pub step:        u64,
    pub time_hours:  f64,
    pub susceptible: u64,
    pub infected:    u64,
    pub recovered:   u64,
    pub dead:        u64,
}

impl SummaryRow {
    pub(crate) fn fields(&self) -> [String; 6] {
        [
            self.step.to_string(),
            self.time_hours.to_string(),
            self.susceptible.to_string(),
            self.infected.to_string(),
            self.recovered.to_string(),
            self.dead.to_string(),
        ]
    }
}

impl From<&StepSummary> for SummaryRow {
    fn from(s: &StepSummary) -> Self {
        SummaryRow {
            step:        s.step,
            time_hours:  s.time_hours,
            susceptible: s.census.susceptible,
            infected:    s.census.infected,
            recovered:   s.census.recovered,
            dead:        s.census.dead,
        }
    }
}
