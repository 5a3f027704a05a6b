//! Configuration management for simulation parameters.
//!
//! This module provides strongly-typed configuration structures that map to
//! the `config.toml` file. Every section has hardcoded defaults, so a file
//! only needs to name the values it changes.
//!
//! ## Example `config.toml`
//!
//! ```toml
//! [world]
//! seed = 42
//!
//! [setup]
//! population = 300
//! initial_infected = 5
//!
//! [disease]
//! base_infection_rate = 0.4
//! reinfection_rate = 0.1
//!
//! [demographics]
//! birth_rate = 0.003
//! death_rate = 0.001
//! max_population = 1000
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

/// World-level settings: seeding and placement extent.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    /// Seed for the random stream; entropy when absent.
    pub seed: Option<u64>,
    /// New agents are placed uniformly in `[0, spawn_extent)` on both axes.
    pub spawn_extent: i64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: None,
            spawn_extent: 100,
        }
    }
}

/// Parameters of the initial population.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SetupConfig {
    pub population: usize,
    /// The first `initial_infected` agents start infected.
    pub initial_infected: usize,
    /// Chance, in percent, that an agent is vulnerable.
    pub vulnerable_percent: u32,
    pub min_age: i32,
    pub max_age: i32,
}

impl Default for SetupConfig {
    fn default() -> Self {
        Self {
            population: 300,
            initial_infected: 5,
            vulnerable_percent: 20,
            min_age: 0,
            max_age: 90,
        }
    }
}

/// Transmission and recovery parameters.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DiseaseConfig {
    /// Chance that a contact between an infected and a susceptible agent
    /// transmits.
    pub base_infection_rate: f64,
    /// Baseline recovery time in ticks. The age/vulnerability brackets in
    /// [`crate::lifecycle::recovery_ticks`] take precedence for every age.
    pub recovery_mean: u32,
    /// Chance that an immune agent in contact becomes infected again.
    pub reinfection_rate: f64,
}

impl Default for DiseaseConfig {
    fn default() -> Self {
        Self {
            base_infection_rate: 0.40,
            recovery_mean: 400,
            reinfection_rate: 0.10,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DemographicsConfig {
    /// Births per tick as a fraction of the population.
    pub birth_rate: f64,
    /// Deaths per tick as a fraction of the population.
    pub death_rate: f64,
    /// No births once the population reaches this size.
    pub max_population: usize,
}

impl Default for DemographicsConfig {
    fn default() -> Self {
        Self {
            birth_rate: 0.003,
            death_rate: 0.001,
            max_population: 1000,
        }
    }
}

/// How co-located pairs are found. Both strategies visit the same pairs in
/// the same order and consume the same random draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ContactStrategy {
    /// Group agents by cell once per tick and only compare cell-mates.
    #[default]
    CellIndex,
    /// Compare every agent against every other agent.
    AllPairs,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct EngineConfig {
    pub contact_strategy: ContactStrategy,
}

/// Settings for the loop that drives the engine.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DriverConfig {
    /// Delay between ticks. 0 runs headless simulations as fast as possible.
    pub tick_interval_ms: u64,
    /// Stop after this many ticks; 0 runs until interrupted.
    pub max_ticks: u64,
    /// Ticks between summary log lines and history records.
    pub report_interval: u64,
    pub log_dir: String,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 100,
            max_ticks: 0,
            report_interval: 50,
            log_dir: "logs".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct AppConfig {
    pub world: WorldConfig,
    pub setup: SetupConfig,
    pub disease: DiseaseConfig,
    pub demographics: DemographicsConfig,
    pub engine: EngineConfig,
    pub driver: DriverConfig,
}

fn is_probability(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}

impl AppConfig {
    /// Validates all configuration parameters.
    ///
    /// Returns `Ok(())` if all parameters are valid, or `Err` with a description
    /// of the first validation failure.
    ///
    /// # Validation Rules
    /// - Rates must lie in `[0.0, 1.0]`
    /// - The vulnerability percentage must be at most 100
    /// - The age range must not be empty
    /// - No more agents may start infected than exist
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.world.spawn_extent > 0,
            "Spawn extent must be positive"
        );

        anyhow::ensure!(
            self.setup.initial_infected <= self.setup.population,
            "Initially infected ({}) exceeds population ({})",
            self.setup.initial_infected,
            self.setup.population
        );
        anyhow::ensure!(
            self.setup.vulnerable_percent <= 100,
            "Vulnerable percentage must be in [0, 100]"
        );
        anyhow::ensure!(
            self.setup.min_age <= self.setup.max_age,
            "Minimum age ({}) exceeds maximum age ({})",
            self.setup.min_age,
            self.setup.max_age
        );

        anyhow::ensure!(
            is_probability(self.disease.base_infection_rate),
            "Base infection rate must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            is_probability(self.disease.reinfection_rate),
            "Reinfection rate must be in [0.0, 1.0]"
        );

        anyhow::ensure!(
            is_probability(self.demographics.birth_rate),
            "Birth rate must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            is_probability(self.demographics.death_rate),
            "Death rate must be in [0.0, 1.0]"
        );

        anyhow::ensure!(
            self.driver.report_interval > 0,
            "Report interval must be positive"
        );

        Ok(())
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path`, falling back to defaults when the file does not exist.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!(path = %path.display(), "No config file, using defaults");
            let config = Self::default();
            config.validate()?;
            return Ok(config);
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
            .map_err(|e| e.context(format!("invalid config file {}", path.display())))
    }

    /// Hash of every parameter that changes simulation outcomes.
    ///
    /// Driver settings are left out: two runs with the same fingerprint and
    /// seed produce the same populations regardless of cadence.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.world).as_bytes());
        hasher.update(format!("{:?}", self.setup).as_bytes());
        hasher.update(format!("{:?}", self.disease).as_bytes());
        hasher.update(format!("{:?}", self.demographics).as_bytes());
        hasher.update(format!("{:?}", self.engine).as_bytes());
        hex::encode(hasher.finalize())
    }
}
