//! Births and deaths.

use crate::config::DemographicsConfig;
use crate::random::RandomSource;
use contagion_data::{Agent, PopulationStats, TickReport};

/// `floor(rate * n)`, never negative.
fn share(rate: f64, n: usize) -> usize {
    (rate * n as f64).floor().max(0.0) as usize
}

/// Adds newborns and removes the dead.
///
/// Both amounts are computed from `stats.total_people` as it stood before this
/// step. Newborns are placed uniformly in `[0, spawn_extent)` (x then y) and
/// appended at the end; the dead are picked one at a time by uniform index and
/// removed without disturbing the order of the others.
pub fn demographics_system<R: RandomSource + ?Sized>(
    agents: &mut Vec<Agent>,
    config: &DemographicsConfig,
    spawn_extent: i64,
    stats: &mut PopulationStats,
    report: &mut TickReport,
    rng: &mut R,
) {
    let n = stats.total_people;
    let extent = spawn_extent.max(1) as usize;

    if n < config.max_population {
        let born = share(config.birth_rate, n);
        agents.reserve(born);
        for _ in 0..born {
            let x = rng.below(extent) as i64;
            let y = rng.below(extent) as i64;
            agents.push(Agent::newborn(x, y));
        }
        stats.births += born as u64;
        report.births += born;
    }

    let mut removed = 0;
    for _ in 0..share(config.death_rate, n) {
        if agents.is_empty() {
            break;
        }
        let victim = rng.below(agents.len());
        agents.remove(victim);
        removed += 1;
    }
    stats.deaths += removed as u64;
    report.deaths += removed;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn crowd(n: usize) -> Vec<Agent> {
        (0..n).map(|i| Agent::newborn(i as i64, 0)).collect()
    }

    fn stats_for(agents: &[Agent]) -> PopulationStats {
        PopulationStats {
            total_people: agents.len(),
            ..Default::default()
        }
    }

    #[test]
    fn test_births_placed_inside_extent() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut agents = crowd(100);
        let mut stats = stats_for(&agents);
        let mut report = TickReport::default();
        let config = DemographicsConfig {
            birth_rate: 0.1,
            death_rate: 0.0,
            max_population: 1000,
        };

        demographics_system(&mut agents, &config, 100, &mut stats, &mut report, &mut rng);

        assert_eq!(agents.len(), 110);
        assert_eq!(stats.births, 10);
        assert_eq!(report.births, 10);
        for baby in &agents[100..] {
            assert!(baby.is_susceptible());
            assert!(!baby.vulnerable);
            assert_eq!(baby.age, 0);
            assert!((0..100).contains(&baby.position.x));
            assert!((0..100).contains(&baby.position.y));
        }
    }

    #[test]
    fn test_no_births_at_cap() {
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let mut agents = crowd(10);
        let mut stats = stats_for(&agents);
        let mut report = TickReport::default();
        let config = DemographicsConfig {
            birth_rate: 0.5,
            death_rate: 0.0,
            max_population: 10,
        };

        demographics_system(&mut agents, &config, 100, &mut stats, &mut report, &mut rng);

        assert_eq!(agents.len(), 10);
        assert_eq!(stats.births, 0);
    }

    #[test]
    fn test_one_death_per_hundred_at_one_percent() {
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        let mut agents = crowd(100);
        let before = agents.clone();
        let mut stats = stats_for(&agents);
        let mut report = TickReport::default();
        let config = DemographicsConfig {
            birth_rate: 0.0,
            death_rate: 0.01,
            max_population: 1000,
        };

        demographics_system(&mut agents, &config, 100, &mut stats, &mut report, &mut rng);

        assert_eq!(agents.len(), 99);
        assert_eq!(stats.deaths, 1);
        assert_eq!(report.deaths, 1);
        // Survivors keep their relative order.
        let mut survivors = before.iter().filter(|a| agents.contains(a));
        for agent in &agents {
            assert_eq!(Some(agent), survivors.next());
        }
    }

    #[test]
    fn test_rates_below_one_agent_round_down() {
        let mut rng = ChaCha8Rng::seed_from_u64(14);
        let mut agents = crowd(300);
        let mut stats = stats_for(&agents);
        let mut report = TickReport::default();
        let config = DemographicsConfig {
            birth_rate: 0.003,
            death_rate: 0.001,
            max_population: 1000,
        };

        demographics_system(&mut agents, &config, 100, &mut stats, &mut report, &mut rng);

        // floor(0.9) births, floor(0.3) deaths
        assert_eq!(agents.len(), 300);
        assert_eq!(report, TickReport::default());
    }

    #[test]
    fn test_deaths_stop_when_empty() {
        let mut rng = ChaCha8Rng::seed_from_u64(15);
        let mut agents = crowd(3);
        // Counter claims more agents than exist.
        let mut stats = PopulationStats {
            total_people: 10,
            ..Default::default()
        };
        let mut report = TickReport::default();
        let config = DemographicsConfig {
            birth_rate: 0.0,
            death_rate: 1.0,
            max_population: 5,
        };

        demographics_system(&mut agents, &config, 100, &mut stats, &mut report, &mut rng);

        assert!(agents.is_empty());
        assert_eq!(stats.deaths, 3);
        assert_eq!(report.deaths, 3);
    }

    #[test]
    fn test_births_use_pre_step_count_for_deaths() {
        let mut rng = ChaCha8Rng::seed_from_u64(16);
        let mut agents = crowd(10);
        let mut stats = stats_for(&agents);
        let mut report = TickReport::default();
        let config = DemographicsConfig {
            birth_rate: 0.5,
            death_rate: 0.2,
            max_population: 1000,
        };

        demographics_system(&mut agents, &config, 100, &mut stats, &mut report, &mut rng);

        assert_eq!(report.births, 5);
        assert_eq!(report.deaths, 2);
        assert_eq!(agents.len(), 13);
    }
}
