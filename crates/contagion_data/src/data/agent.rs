use serde::{Deserialize, Serialize};

/// Integer grid cell occupied by an agent.
///
/// The grid is unbounded: positions are never clamped or wrapped, so agents
/// can drift arbitrarily far from where they were placed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Position {
    pub x: i64,
    pub y: i64,
}

impl Position {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Health of an agent. Exactly one state holds at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthState {
    #[default]
    Susceptible,
    Infected,
    Immune,
}

impl HealthState {
    pub fn is_susceptible(self) -> bool {
        self == Self::Susceptible
    }

    pub fn is_infected(self) -> bool {
        self == Self::Infected
    }

    pub fn is_immune(self) -> bool {
        self == Self::Immune
    }
}

/// One simulated individual.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub position: Position,
    pub health: HealthState,
    /// Fixed at creation; lengthens recovery.
    pub vulnerable: bool,
    /// Fixed at creation; newborns are 0.
    pub age: i32,
    /// Ticks since the current infection began. Only meaningful while
    /// infected, and reset to 0 on every transition into or out of
    /// [`HealthState::Infected`].
    pub infection_timer: u32,
}

impl Agent {
    pub fn new(x: i64, y: i64, infected: bool, vulnerable: bool, age: i32) -> Self {
        Self {
            position: Position::new(x, y),
            health: if infected {
                HealthState::Infected
            } else {
                HealthState::Susceptible
            },
            vulnerable,
            age,
            infection_timer: 0,
        }
    }

    /// A susceptible, non-vulnerable agent of age 0.
    pub fn newborn(x: i64, y: i64) -> Self {
        Self::new(x, y, false, false, 0)
    }

    pub fn is_susceptible(&self) -> bool {
        self.health.is_susceptible()
    }

    pub fn is_infected(&self) -> bool {
        self.health.is_infected()
    }

    pub fn is_immune(&self) -> bool {
        self.health.is_immune()
    }

    pub fn shares_cell_with(&self, other: &Agent) -> bool {
        self.position == other.position
    }
}
