//! Plain data types shared by every Contagion crate.
//!
//! Nothing in here draws random numbers or advances time; the update rules
//! live in `contagion_core`.

pub mod data;

pub use data::agent::{Agent, HealthState, Position};
pub use data::stats::{PopulationStats, TickReport};
