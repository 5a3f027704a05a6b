pub mod macros;

use contagion_lib::model::config::AppConfig;
use contagion_lib::model::population::Population;
use contagion_lib::model::state::{Agent, HealthState};
use contagion_lib::model::world::World;
use contagion_lib::model::RandomSource;
use std::collections::VecDeque;

/// A random source with a script. `step`, `unit`, `below` and `between` hand
/// out scripted values first and then a fixed fallback (no movement for
/// `step`). Every draw is counted.
#[allow(dead_code)]
pub struct ScriptedSource {
    pub steps: VecDeque<i64>,
    pub units: VecDeque<f64>,
    pub unit_fallback: f64,
    pub indices: VecDeque<usize>,
    pub draws: usize,
}

#[allow(dead_code)]
impl ScriptedSource {
    /// Never moves anyone and answers every probability check with `unit`.
    pub fn still(unit: f64) -> Self {
        Self {
            steps: VecDeque::new(),
            units: VecDeque::new(),
            unit_fallback: unit,
            indices: VecDeque::new(),
            draws: 0,
        }
    }

    pub fn with_steps(mut self, steps: &[i64]) -> Self {
        self.steps.extend(steps);
        self
    }

    pub fn with_units(mut self, units: &[f64]) -> Self {
        self.units.extend(units);
        self
    }

    pub fn with_indices(mut self, indices: &[usize]) -> Self {
        self.indices.extend(indices);
        self
    }
}

impl RandomSource for ScriptedSource {
    fn step(&mut self) -> i64 {
        self.draws += 1;
        self.steps.pop_front().unwrap_or(0)
    }

    fn unit(&mut self) -> f64 {
        self.draws += 1;
        self.units.pop_front().unwrap_or(self.unit_fallback)
    }

    fn below(&mut self, bound: usize) -> usize {
        self.draws += 1;
        self.indices.pop_front().unwrap_or(0).min(bound - 1)
    }

    fn between(&mut self, low: i32, _high: i32) -> i32 {
        self.draws += 1;
        low
    }
}

#[allow(dead_code)]
pub struct AgentBuilder {
    x: i64,
    y: i64,
    health: HealthState,
    vulnerable: bool,
    age: i32,
    timer: u32,
}

#[allow(dead_code)]
impl AgentBuilder {
    pub fn new() -> Self {
        Self {
            x: 0,
            y: 0,
            health: HealthState::Susceptible,
            vulnerable: false,
            age: 30,
            timer: 0,
        }
    }

    pub fn at(mut self, x: i64, y: i64) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn infected(mut self) -> Self {
        self.health = HealthState::Infected;
        self
    }

    pub fn immune(mut self) -> Self {
        self.health = HealthState::Immune;
        self
    }

    pub fn vulnerable(mut self) -> Self {
        self.vulnerable = true;
        self
    }

    pub fn age(mut self, age: i32) -> Self {
        self.age = age;
        self
    }

    pub fn infected_for(mut self, ticks: u32) -> Self {
        self.health = HealthState::Infected;
        self.timer = ticks;
        self
    }

    pub fn build(self) -> Agent {
        let mut agent = Agent::new(self.x, self.y, false, self.vulnerable, self.age);
        agent.health = self.health;
        agent.infection_timer = self.timer;
        agent
    }
}

/// Population plus config for driving the engine directly.
#[allow(dead_code)]
pub struct PopulationBuilder {
    config: AppConfig,
    agents: Vec<Agent>,
}

#[allow(dead_code)]
impl PopulationBuilder {
    /// No births, no deaths, default disease parameters.
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.demographics.birth_rate = 0.0;
        config.demographics.death_rate = 0.0;
        Self {
            config,
            agents: Vec::new(),
        }
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        modifier(&mut self.config);
        self
    }

    pub fn with_agent(mut self, agent: Agent) -> Self {
        self.agents.push(agent);
        self
    }

    pub fn with_agents(mut self, agent: Agent, count: usize) -> Self {
        self.agents
            .extend(std::iter::repeat(agent).take(count));
        self
    }

    pub fn build(self) -> (Population, AppConfig) {
        (Population::new(self.agents), self.config)
    }

    pub fn build_world(self, seed: u64) -> World {
        World::from_population(Population::new(self.agents), self.config, seed)
    }
}

/// Small seeded world through the regular setup path.
#[allow(dead_code)]
pub fn seeded_world(seed: u64, population: usize, infected: usize) -> World {
    let mut config = AppConfig::default();
    config.world.seed = Some(seed);
    config.setup.population = population;
    config.setup.initial_infected = infected;
    World::new(config).expect("valid test config")
}
