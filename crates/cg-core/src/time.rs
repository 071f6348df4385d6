//! Simulated time and hazard rescaling.
//!
//! All disease hazards are configured **per simulated hour**.  The
//! `HazardClock` knows how many hours one step covers and multiplies rates by
//! that figure at the point of use:
//!
//!   p_step = rate_per_hour * step_hours
//!
//! | Unit      | Hours     |
//! |-----------|-----------|
//! | `seconds` | 1 / 3600  |
//! | `minutes` | 1 / 60    |
//! | `hours`   | 1         |
//! | `days`    | 24        |
//! | `months`  | 720       |
//! | `years`   | 8760      |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult};

// ── TimeUnit ──────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeUnit {
    Seconds,
    Minutes,
    #[default]
    Hours,
    Days,
    Months,
    Years,
}

impl TimeUnit {
    pub const ALL: [TimeUnit; 6] = [
        TimeUnit::Seconds,
        TimeUnit::Minutes,
        TimeUnit::Hours,
        TimeUnit::Days,
        TimeUnit::Months,
        TimeUnit::Years,
    ];

    /// Length of one unit in hours.
    pub fn hours(self) -> f64 {
        match self {
            TimeUnit::Seconds => 1.0 / 3600.0,
            TimeUnit::Minutes => 1.0 / 60.0,
            TimeUnit::Hours   => 1.0,
            TimeUnit::Days    => 24.0,
            TimeUnit::Months  => 720.0,
            TimeUnit::Years   => 8760.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimeUnit::Seconds => "seconds",
            TimeUnit::Minutes => "minutes",
            TimeUnit::Hours   => "hours",
            TimeUnit::Days    => "days",
            TimeUnit::Months  => "months",
            TimeUnit::Years   => "years",
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeUnit {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeUnit::ALL
            .into_iter()
            .find(|u| u.as_str() == s.trim())
            .ok_or_else(|| CoreError::Config(format!("unknown time unit {s:?}")))
    }
}

// ── HazardClock ───────────────────────────────────────────────────────────────

/// Step counter plus the conversion from one step to simulated hours.
///
/// Cheap to copy; the pipeline passes it by value into every phase.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HazardClock {
    step_hours: f64,
    step:       u64,
}

impl HazardClock {
    /// A clock whose steps are `dt` units long.
    ///
    /// Fails when `dt` is non-finite or not strictly positive.
    pub fn new(dt: f64, unit: TimeUnit) -> CoreResult<Self> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(CoreError::Config(format!(
                "time step must be a positive finite number, got {dt}"
            )));
        }
        Ok(HazardClock { step_hours: dt * unit.hours(), step: 0 })
    }

    /// Elapsed simulated hours per step.
    #[inline]
    pub fn step_hours(&self) -> f64 {
        self.step_hours
    }

    /// Hours in one `unit`.
    #[inline]
    pub fn hours(&self, unit: TimeUnit) -> f64 {
        unit.hours()
    }

    /// Per-step probability for a per-hour hazard.
    #[inline]
    pub fn per_step(&self, rate_per_hour: f64) -> f64 {
        rate_per_hour * self.step_hours
    }

    #[inline]
    pub fn current_step(&self) -> u64 {
        self.step
    }

    /// Simulated hours since step 0.
    #[inline]
    pub fn elapsed_hours(&self) -> f64 {
        self.step as f64 * self.step_hours
    }

    #[inline]
    pub fn advance(&mut self) {
        self.step += 1;
    }
}

impl fmt::Display for HazardClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "step {} ({}h)", self.step, self.elapsed_hours())
    }
}
