//! A single contamination accumulator.

use std::sync::atomic::{AtomicU64, Ordering};

use cg_core::{PlaceId, PlacesConfig};

// ── PlaceCategory ─────────────────────────────────────────────────────────────

/// What kind of location a place is.  Informational only; the disease model
/// treats every category the same.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum PlaceCategory {
    #[default]
    Unspecified,
    Home,
    Work,
    Vehicle,
    /// Shared stand-in for every slot in a one-place population.
    Shared,
    /// Where travellers stay at a destination.
    Lodging,
}

// ── PlaceSettings ─────────────────────────────────────────────────────────────

/// Decay policy applied to newly created places.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlaceSettings {
    /// Exponential decay rate per hour.
    pub fractional_decrement: f64,
    pub clean_every_step:     bool,
}

impl Default for PlaceSettings {
    fn default() -> Self {
        PlaceSettings { fractional_decrement: 0.1, clean_every_step: false }
    }
}

impl From<&PlacesConfig> for PlaceSettings {
    fn from(cfg: &PlacesConfig) -> Self {
        PlaceSettings {
            fractional_decrement: cfg.fractional_decrement,
            clean_every_step:     cfg.clean_every_step,
        }
    }
}

// ── Place ─────────────────────────────────────────────────────────────────────

/// A location that accumulates contamination shed by its occupants.
///
/// The level is an `f64` stored as raw bits in an `AtomicU64`; it is never
/// negative.
#[derive(Debug)]
pub struct Place {
    pub id:       PlaceId,
    pub category: PlaceCategory,
    level:        AtomicU64,
    settings:     PlaceSettings,
}

impl Place {
    /// A clean place.
    pub fn new(id: PlaceId, category: PlaceCategory, settings: PlaceSettings) -> Self {
        Place { id, category, level: AtomicU64::new(0f64.to_bits()), settings }
    }

    #[inline]
    pub fn settings(&self) -> PlaceSettings {
        self.settings
    }

    pub fn set_clean_every_step(&mut self, clean: bool) {
        self.settings.clean_every_step = clean;
    }

    /// Current contamination level.
    #[inline]
    pub fn contamination(&self) -> f64 {
        f64::from_bits(self.level.load(Ordering::Relaxed))
    }

    /// Start-of-step update: zero the level for clean-every-step places,
    /// otherwise decay it by `exp(-decrement * step_hours)`.
    pub fn update(&mut self, step_hours: f64) {
        let level = self.level.get_mut();
        let next = if self.settings.clean_every_step {
            0.0
        } else {
            f64::from_bits(*level) * (-self.settings.fractional_decrement * step_hours).exp()
        };
        *level = next.max(0.0).to_bits();
    }

    /// Add `amount` (possibly negative) to the level, clamping at zero.
    ///
    /// Safe to call from many threads at once.
    pub fn add_contamination(&self, amount: f64) {
        let mut current = self.level.load(Ordering::Relaxed);
        loop {
            let next = (f64::from_bits(current) + amount).max(0.0).to_bits();
            match self.level.compare_exchange_weak(current, next, Ordering::AcqRel, Ordering::Relaxed) {
                Ok(_) => return,
                Err(seen) => current = seen,
            }
        }
    }

    /// Reset the level to zero.
    pub fn clean(&mut self) {
        *self.level.get_mut() = 0f64.to_bits();
    }
}
