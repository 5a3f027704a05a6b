use contagion_data::{Agent, HealthState};

/// Ticks an infected agent needs to recover, by age bracket and
/// vulnerability.
///
/// | age     | not vulnerable | vulnerable |
/// |---------|----------------|------------|
/// | < 18    | 80             | 90         |
/// | 18..=35 | 100            | 110        |
/// | 36..=55 | 120            | 130        |
/// | >= 56   | 140            | 160        |
pub fn recovery_ticks(age: i32, vulnerable: bool) -> u32 {
    match (age, vulnerable) {
        (i32::MIN..=17, false) => 80,
        (i32::MIN..=17, true) => 90,
        (18..=35, false) => 100,
        (18..=35, true) => 110,
        (36..=55, false) => 120,
        (36..=55, true) => 130,
        (_, false) => 140,
        (_, true) => 160,
    }
}

/// State transitions of a single agent.
///
/// Every transition resets the infection timer, and only the three allowed
/// transitions exist: susceptible to infected, infected to immune, immune to
/// infected.
pub trait AgentLogic {
    fn recovery_ticks(&self) -> u32;
    /// Moves by the given offsets without any bounds.
    fn walk(&mut self, dx: i64, dy: i64);
    /// Susceptible to infected. Returns false if the agent was not susceptible.
    fn infect(&mut self) -> bool;
    /// Immune to infected. Returns false if the agent was not immune.
    fn reinfect(&mut self) -> bool;
    /// Advances an ongoing infection by one tick and recovers the agent once
    /// its recovery duration is reached. Returns true on recovery.
    fn progress_infection(&mut self) -> bool;
}

impl AgentLogic for Agent {
    fn recovery_ticks(&self) -> u32 {
        recovery_ticks(self.age, self.vulnerable)
    }

    fn walk(&mut self, dx: i64, dy: i64) {
        self.position.x += dx;
        self.position.y += dy;
    }

    fn infect(&mut self) -> bool {
        if !self.is_susceptible() {
            return false;
        }
        self.health = HealthState::Infected;
        self.infection_timer = 0;
        true
    }

    fn reinfect(&mut self) -> bool {
        if !self.is_immune() {
            return false;
        }
        self.health = HealthState::Infected;
        self.infection_timer = 0;
        true
    }

    fn progress_infection(&mut self) -> bool {
        if !self.is_infected() {
            return false;
        }
        self.infection_timer += 1;
        if self.infection_timer >= self.recovery_ticks() {
            self.health = HealthState::Immune;
            self.infection_timer = 0;
            return true;
        }
        false
    }
}
