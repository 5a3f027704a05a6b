//! One simulation tick.
//!
//! Systems run in a fixed order and the random stream is consumed in that
//! order: movement (x then y per agent), contact draws in sweep order, birth
//! placement, death selection. Recovery draws nothing.

use crate::config::{AppConfig, ContactStrategy};
use crate::population::Population;
use crate::random::RandomSource;
use crate::spatial_hash::CellIndex;
use crate::systems::contact::{self, ContactContext};
use crate::systems::demographics::demographics_system;
use crate::systems::movement::movement_system;
use contagion_data::TickReport;

/// Advances `population` by one tick.
///
/// Builds a throwaway [`CellIndex`]; long-running callers should hold one and
/// use [`tick_with_index`].
pub fn tick<R: RandomSource + ?Sized>(
    population: &mut Population,
    rng: &mut R,
    config: &AppConfig,
) -> TickReport {
    let mut index = CellIndex::new();
    tick_with_index(population, rng, config, &mut index)
}

/// Advances `population` by one tick, reusing `index` between calls.
pub fn tick_with_index<R: RandomSource + ?Sized>(
    population: &mut Population,
    rng: &mut R,
    config: &AppConfig,
    index: &mut CellIndex,
) -> TickReport {
    let mut report = TickReport::default();
    if population.agents.is_empty() {
        population.recount();
        return report;
    }

    let Population { agents, stats } = population;

    // 1. Movement & recovery
    movement_system(agents, stats, &mut report, rng);

    // 2. Contact
    {
        let mut ctx = ContactContext {
            disease: &config.disease,
            stats: &mut *stats,
            report: &mut report,
        };
        match config.engine.contact_strategy {
            ContactStrategy::CellIndex => {
                index.build(agents);
                contact::sweep_indexed(agents, index, &mut ctx, rng);
            }
            ContactStrategy::AllPairs => contact::sweep_all_pairs(agents, &mut ctx, rng),
        }
    }

    // 3. Births & deaths
    demographics_system(
        agents,
        &config.demographics,
        config.world.spawn_extent,
        stats,
        &mut report,
        rng,
    );

    population.recount();

    tracing::debug!(
        people = population.stats.total_people,
        infected = population.stats.total_infected,
        immune = population.stats.total_immune,
        transmissions = report.transmissions,
        reinfections = report.reinfections,
        recoveries = report.recoveries,
        births = report.births,
        deaths = report.deaths,
        "Tick complete"
    );

    report
}
