//! Per-agent disease state.

/// Alive/diseased/immune/recovered flags.
///
/// Invariants kept by every transition here:
/// - `diseased && immune` is never true;
/// - a dead agent is neither diseased nor immune.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Health {
    pub alive:     bool,
    pub diseased:  bool,
    pub immune:    bool,
    pub recovered: bool,
}

impl Default for Health {
    fn default() -> Self {
        Self::SUSCEPTIBLE
    }
}

impl Health {
    pub const SUSCEPTIBLE: Health = Health { alive: true, diseased: false, immune: false, recovered: false };

    /// Living, not diseased and not immune.
    #[inline]
    pub fn is_susceptible(&self) -> bool {
        self.alive && !self.diseased && !self.immune
    }

    #[inline]
    pub fn is_infected(&self) -> bool {
        self.alive && self.diseased
    }

    #[inline]
    pub fn is_recovered(&self) -> bool {
        self.alive && self.recovered
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        !self.alive
    }

    /// Seed an infection; ignored for the dead and the immune.
    pub fn infect(&mut self) {
        if self.alive && !self.immune {
            self.diseased = true;
        }
    }

    pub fn recover(&mut self) {
        self.diseased = false;
        self.immune = true;
        self.recovered = true;
    }

    pub fn die(&mut self) {
        self.alive = false;
        self.diseased = false;
        self.immune = false;
        self.recovered = false;
    }

    /// `true` when the flag invariants hold.
    pub fn is_consistent(&self) -> bool {
        !(self.diseased && self.immune) && (self.alive || (!self.diseased && !self.immune))
    }
}
