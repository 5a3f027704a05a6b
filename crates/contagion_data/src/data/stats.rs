use serde::{Deserialize, Serialize};

/// Aggregate counters owned by a population.
///
/// `total_people`, `total_infected` and `total_immune` track the current
/// population; the remaining fields are cumulative and never decrease.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PopulationStats {
    pub total_people: usize,
    pub total_infected: usize,
    pub total_immune: usize,
    pub total_recovered: u64,
    pub births: u64,
    pub deaths: u64,
}

impl PopulationStats {
    /// Agents that are neither infected nor immune.
    pub fn susceptible(&self) -> usize {
        self.total_people
            .saturating_sub(self.total_infected + self.total_immune)
    }

    /// Fraction of the current population that is infected.
    pub fn prevalence(&self) -> f64 {
        if self.total_people == 0 {
            0.0
        } else {
            self.total_infected as f64 / self.total_people as f64
        }
    }
}

/// What happened during a single tick.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub transmissions: usize,
    pub reinfections: usize,
    pub recoveries: usize,
    pub births: usize,
    pub deaths: usize,
}

impl TickReport {
    pub fn new_infections(&self) -> usize {
        self.transmissions + self.reinfections
    }

    /// Accumulates another report into this one.
    pub fn absorb(&mut self, other: &TickReport) {
        self.transmissions += other.transmissions;
        self.reinfections += other.reinfections;
        self.recoveries += other.recoveries;
        self.births += other.births;
        self.deaths += other.deaths;
    }
}
