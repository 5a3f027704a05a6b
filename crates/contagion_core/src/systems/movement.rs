//! Movement and recovery - every agent takes one random step, then infected
//! agents advance towards recovery.

use crate::lifecycle::AgentLogic;
use crate::random::RandomSource;
use contagion_data::{Agent, PopulationStats, TickReport};

/// Steps every agent and progresses every infection, in population order.
///
/// Consumes exactly two draws per agent (x then y); recovery draws nothing.
pub fn movement_system<R: RandomSource + ?Sized>(
    agents: &mut [Agent],
    stats: &mut PopulationStats,
    report: &mut TickReport,
    rng: &mut R,
) {
    for agent in agents.iter_mut() {
        let dx = rng.step();
        let dy = rng.step();
        agent.walk(dx, dy);

        if agent.progress_infection() {
            stats.total_recovered += 1;
            stats.total_immune += 1;
            report.recoveries += 1;
        }
    }
}
