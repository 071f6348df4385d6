//! Small closed enumerations shared by the schedule, agent and config layers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

// ── PlaceSlot ─────────────────────────────────────────────────────────────────

/// The kind of place an agent can occupy.
///
/// Each agent maps every slot to its own concrete place, so `Home` for one
/// agent is usually a different place from `Home` for another.  Vehicles are
/// places too, albeit moveable ones.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceSlot {
    #[default]
    Home,
    Work,
    Vehicle,
}

impl PlaceSlot {
    /// Number of slots; the length of every per-agent slot array.
    pub const COUNT: usize = 3;

    pub const ALL: [PlaceSlot; Self::COUNT] = [PlaceSlot::Home, PlaceSlot::Work, PlaceSlot::Vehicle];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PlaceSlot::Home    => "home",
            PlaceSlot::Work    => "work",
            PlaceSlot::Vehicle => "vehicle",
        }
    }
}

impl fmt::Display for PlaceSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── ScheduleKind ──────────────────────────────────────────────────────────────

/// Selects one of the shared travel schedule templates.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleKind {
    /// Stay at home around the clock.
    Stationary,
    /// Commute: vehicle → work → vehicle → home.
    #[default]
    Mobile,
    /// Outbound trip to a travel destination, then a long stay there.
    RemoteTravel,
    /// Flight back followed by a short stay at home.
    ReturnTrip,
}

impl ScheduleKind {
    pub const COUNT: usize = 4;

    pub const ALL: [ScheduleKind; Self::COUNT] = [
        ScheduleKind::Stationary,
        ScheduleKind::Mobile,
        ScheduleKind::RemoteTravel,
        ScheduleKind::ReturnTrip,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ScheduleKind::Stationary   => "stationary",
            ScheduleKind::Mobile       => "mobile",
            ScheduleKind::RemoteTravel => "remote_travel",
            ScheduleKind::ReturnTrip   => "return_trip",
        }
    }
}

impl fmt::Display for ScheduleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScheduleKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScheduleKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s.trim())
            .ok_or_else(|| CoreError::Config(format!("unknown schedule kind {s:?}")))
    }
}

// ── PopulationKind ────────────────────────────────────────────────────────────

/// Construction strategy for the initial agents and places of a domain.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PopulationKind {
    /// A single shared place serving as everyone's home, work and vehicle.
    SimpleOnePlace,
    /// Households of 3, workplaces of 10, vehicles of 30.
    #[default]
    SimpleMobile,
}

impl PopulationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PopulationKind::SimpleOnePlace => "simple_one_place",
            PopulationKind::SimpleMobile   => "simple_mobile",
        }
    }
}

impl fmt::Display for PopulationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
