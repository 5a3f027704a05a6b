use crate::snapshot::{AgentSnapshot, PopulationSnapshot};
use contagion_data::{Agent, HealthState, PopulationStats};

/// Ordered collection of agents plus the counters describing them.
///
/// The population is the only owner of its agents. Membership changes only
/// inside the demographic step of a tick, and the order of agents is stable
/// so that a seeded run can be reproduced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Population {
    pub(crate) agents: Vec<Agent>,
    pub(crate) stats: PopulationStats,
}

impl Population {
    /// Wraps an initial agent list. Current counters are computed from the
    /// agents; cumulative counters start at zero.
    pub fn new(agents: Vec<Agent>) -> Self {
        let mut population = Self {
            agents,
            stats: PopulationStats::default(),
        };
        population.recount();
        population
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn stats(&self) -> &PopulationStats {
        &self.stats
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn count(&self, health: HealthState) -> usize {
        self.agents.iter().filter(|a| a.health == health).count()
    }

    /// Recomputes the current counts from the agents themselves.
    pub(crate) fn recount(&mut self) {
        let mut infected = 0;
        let mut immune = 0;
        for agent in &self.agents {
            match agent.health {
                HealthState::Infected => infected += 1,
                HealthState::Immune => immune += 1,
                HealthState::Susceptible => {}
            }
        }
        self.stats.total_people = self.agents.len();
        self.stats.total_infected = infected;
        self.stats.total_immune = immune;
    }

    pub fn snapshot(&self, tick: u64) -> PopulationSnapshot {
        PopulationSnapshot {
            tick,
            stats: self.stats,
            agents: self
                .agents
                .iter()
                .map(|a| AgentSnapshot {
                    x: a.position.x,
                    y: a.position.y,
                    health: a.health,
                })
                .collect(),
        }
    }
}
