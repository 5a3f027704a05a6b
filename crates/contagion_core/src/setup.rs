use crate::config::SetupConfig;
use crate::population::Population;
use crate::random::RandomSource;
use contagion_data::Agent;

/// Builds the initial population.
///
/// Agents are created in order, each consuming four draws: vulnerability
/// (`below(100) < vulnerable_percent`), age in `[min_age, max_age]`, then x and
/// y in `[0, spawn_extent)`. The first `initial_infected` agents start infected.
///
/// `min_age <= max_age` and `spawn_extent > 0` are the caller's contract;
/// [`crate::config::AppConfig::validate`] checks both.
pub fn seed_population<R: RandomSource + ?Sized>(
    setup: &SetupConfig,
    spawn_extent: i64,
    rng: &mut R,
) -> Population {
    let extent = spawn_extent.max(1) as usize;
    let agents = (0..setup.population)
        .map(|i| {
            let vulnerable = (rng.below(100) as u32) < setup.vulnerable_percent;
            let age = rng.between(setup.min_age, setup.max_age);
            let x = rng.below(extent) as i64;
            let y = rng.below(extent) as i64;
            Agent::new(x, y, i < setup.initial_infected, vulnerable, age)
        })
        .collect();

    let population = Population::new(agents);
    tracing::info!(
        people = population.stats().total_people,
        infected = population.stats().total_infected,
        "Seeded initial population"
    );
    population
}
