//! Core data structures for the Contagion simulation.

pub mod agent;
pub mod stats;
