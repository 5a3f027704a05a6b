//! # Contagion Core
//!
//! The simulation engine for Contagion: an epidemic spreading through agents
//! that random-walk on an unbounded integer grid.
//!
//! This crate contains the deterministic update logic:
//! - Movement and recovery of every agent
//! - Contact detection and transmission between co-located agents
//! - Reinfection of immune agents
//! - Births and deaths
//! - Seeding the initial population
//!
//! ## Architecture
//!
//! A [`population::Population`] owns its agents and counters. One call to
//! [`engine::tick`] runs the systems in a fixed order and consumes the
//! [`random::RandomSource`] in a fixed order, so a seeded source reproduces a
//! run exactly.
//!
//! ## Example
//!
//! ```
//! use contagion_core::config::AppConfig;
//! use contagion_core::engine;
//! use contagion_core::population::Population;
//! use contagion_data::Agent;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let config = AppConfig::default();
//! let mut population = Population::new(vec![
//!     Agent::new(5, 5, true, false, 20),
//!     Agent::new(5, 5, false, false, 20),
//! ]);
//!
//! let report = engine::tick(&mut population, &mut rng, &config);
//! assert_eq!(report.births, 0);
//! assert_eq!(population.stats().total_people, 2);
//! ```

/// Configuration management for simulation parameters
pub mod config;
/// Tick orchestration and contact strategies
pub mod engine;
/// Agent state transitions and recovery durations
pub mod lifecycle;
/// Tick timing and structured logging
pub mod metrics;
/// The owned agent collection and its counters
pub mod population;
/// The random stream consumed by every stochastic decision
pub mod random;
/// Initial population construction
pub mod setup;
/// Read-only views for presentation
pub mod snapshot;
/// Per-tick grouping of agents by grid cell
pub mod spatial_hash;
/// Movement, contact and demographic systems
pub mod systems;

pub use engine::{tick, tick_with_index};
pub use lifecycle::{recovery_ticks, AgentLogic};
pub use metrics::{init_file_logging, init_logging, Metrics};
pub use population::Population;
pub use random::RandomSource;
