//! Contact system - transmission and reinfection between co-located agents.
//!
//! The sweep visits ordered pairs: for each agent `a` in population order,
//! every other agent `b` sharing its cell, in population order. A meeting of
//! `(a, b)` evaluates, in this order:
//! 1. `a` infecting `b`
//! 2. `b` infecting `a`
//! 3. reinfection of `a`
//! 4. reinfection of `b`
//!
//! Each unordered pair is therefore met twice per tick, once from each side.
//! A draw is consumed only when its guard holds, and states change in place,
//! so an agent infected early in the sweep can transmit later in the same
//! sweep.

use crate::config::DiseaseConfig;
use crate::lifecycle::AgentLogic;
use crate::random::RandomSource;
use crate::spatial_hash::CellIndex;
use contagion_data::{Agent, PopulationStats, TickReport};

pub struct ContactContext<'a> {
    pub disease: &'a DiseaseConfig,
    pub stats: &'a mut PopulationStats,
    pub report: &'a mut TickReport,
}

/// Mutable access to two distinct agents.
fn pair_mut(agents: &mut [Agent], a: usize, b: usize) -> (&mut Agent, &mut Agent) {
    debug_assert_ne!(a, b);
    if a < b {
        let (left, right) = agents.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = agents.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}

fn transmit<R: RandomSource + ?Sized>(
    source: &Agent,
    target: &mut Agent,
    ctx: &mut ContactContext<'_>,
    rng: &mut R,
) {
    if source.is_infected()
        && target.is_susceptible()
        && rng.chance(ctx.disease.base_infection_rate)
    {
        target.infect();
        ctx.report.transmissions += 1;
    }
}

fn try_reinfect<R: RandomSource + ?Sized>(
    agent: &mut Agent,
    ctx: &mut ContactContext<'_>,
    rng: &mut R,
) {
    if agent.is_immune() && rng.chance(ctx.disease.reinfection_rate) {
        agent.reinfect();
        ctx.stats.total_immune = ctx.stats.total_immune.saturating_sub(1);
        ctx.report.reinfections += 1;
    }
}

/// Evaluates one meeting of `a` with `b`.
pub fn meet<R: RandomSource + ?Sized>(
    agents: &mut [Agent],
    a: usize,
    b: usize,
    ctx: &mut ContactContext<'_>,
    rng: &mut R,
) {
    let (first, second) = pair_mut(agents, a, b);
    transmit(first, second, ctx, rng);
    transmit(second, first, ctx, rng);
    try_reinfect(first, ctx, rng);
    try_reinfect(second, ctx, rng);
}

/// Compares every agent with every other agent.
pub fn sweep_all_pairs<R: RandomSource + ?Sized>(
    agents: &mut [Agent],
    ctx: &mut ContactContext<'_>,
    rng: &mut R,
) {
    let n = agents.len();
    for a in 0..n {
        for b in 0..n {
            if a != b && agents[a].shares_cell_with(&agents[b]) {
                meet(agents, a, b, ctx, rng);
            }
        }
    }
}

/// Same sweep as [`sweep_all_pairs`], restricted to cell-mates.
///
/// `index` must have been built from the current positions of `agents`.
/// Positions do not change during the sweep, so the index stays valid.
pub fn sweep_indexed<R: RandomSource + ?Sized>(
    agents: &mut [Agent],
    index: &CellIndex,
    ctx: &mut ContactContext<'_>,
    rng: &mut R,
) {
    for a in 0..agents.len() {
        let mates = index.cell_mates(a);
        if mates.len() < 2 {
            continue;
        }
        for &b in mates {
            if b != a {
                meet(agents, a, b, ctx, rng);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contagion_data::HealthState;

    /// Returns the same value for every draw and counts the draws.
    struct ConstantSource {
        value: f64,
        draws: usize,
    }

    impl ConstantSource {
        fn new(value: f64) -> Self {
            Self { value, draws: 0 }
        }
    }

    impl RandomSource for ConstantSource {
        fn step(&mut self) -> i64 {
            self.draws += 1;
            0
        }
        fn unit(&mut self) -> f64 {
            self.draws += 1;
            self.value
        }
        fn below(&mut self, _bound: usize) -> usize {
            self.draws += 1;
            0
        }
        fn between(&mut self, low: i32, _high: i32) -> i32 {
            self.draws += 1;
            low
        }
    }

    fn immune(x: i64, y: i64) -> Agent {
        let mut a = Agent::newborn(x, y);
        a.health = HealthState::Immune;
        a
    }

    fn run_all_pairs(agents: &mut [Agent], disease: &DiseaseConfig, rng: &mut ConstantSource) -> TickReport {
        let mut stats = PopulationStats::default();
        let mut report = TickReport::default();
        let mut ctx = ContactContext {
            disease,
            stats: &mut stats,
            report: &mut report,
        };
        sweep_all_pairs(agents, &mut ctx, rng);
        report
    }

    #[test]
    fn test_certain_transmission_in_shared_cell() {
        let disease = DiseaseConfig {
            base_infection_rate: 1.0,
            reinfection_rate: 0.0,
            ..Default::default()
        };
        let mut agents = vec![Agent::new(5, 5, true, false, 20), Agent::newborn(5, 5)];
        let mut rng = ConstantSource::new(0.5);
        let report = run_all_pairs(&mut agents, &disease, &mut rng);

        assert!(agents[1].is_infected());
        assert_eq!(agents[1].infection_timer, 0);
        assert_eq!(report.transmissions, 1);
        // Only the first meeting has an eligible pair.
        assert_eq!(rng.draws, 1);
    }

    #[test]
    fn test_no_transmission_between_neighbouring_cells() {
        let disease = DiseaseConfig {
            base_infection_rate: 1.0,
            ..Default::default()
        };
        let mut agents = vec![Agent::new(5, 5, true, false, 20), Agent::newborn(5, 6)];
        let mut rng = ConstantSource::new(0.0);
        let report = run_all_pairs(&mut agents, &disease, &mut rng);

        assert!(agents[1].is_susceptible());
        assert_eq!(report, TickReport::default());
        assert_eq!(rng.draws, 0);
    }

    #[test]
    fn test_draw_must_fall_below_rate() {
        let disease = DiseaseConfig {
            base_infection_rate: 0.4,
            reinfection_rate: 0.0,
            ..Default::default()
        };
        let mut agents = vec![Agent::new(0, 0, true, false, 20), Agent::newborn(0, 0)];
        let mut rng = ConstantSource::new(0.4);
        run_all_pairs(&mut agents, &disease, &mut rng);

        assert!(agents[1].is_susceptible());
        // One failed draw per side of the pair.
        assert_eq!(rng.draws, 2);
    }

    #[test]
    fn test_immune_agents_are_not_infected_by_contact() {
        let disease = DiseaseConfig {
            base_infection_rate: 1.0,
            reinfection_rate: 0.0,
            ..Default::default()
        };
        let mut agents = vec![Agent::new(0, 0, true, false, 20), immune(0, 0)];
        let mut rng = ConstantSource::new(0.0);
        run_all_pairs(&mut agents, &disease, &mut rng);

        assert!(agents[1].is_immune());
    }

    #[test]
    fn test_reinfection_draws_per_immune_agent_per_meeting() {
        let disease = DiseaseConfig {
            base_infection_rate: 0.0,
            reinfection_rate: 0.1,
            ..Default::default()
        };
        let mut agents = vec![immune(2, 2), immune(2, 2)];
        let mut rng = ConstantSource::new(0.5);
        let report = run_all_pairs(&mut agents, &disease, &mut rng);

        assert!(agents.iter().all(Agent::is_immune));
        assert_eq!(report.reinfections, 0);
        // Two meetings, two immune agents each.
        assert_eq!(rng.draws, 4);
    }

    #[test]
    fn test_reinfection_decrements_immune_counter() {
        let disease = DiseaseConfig {
            base_infection_rate: 0.0,
            reinfection_rate: 1.0,
            ..Default::default()
        };
        let mut agents = vec![immune(2, 2), Agent::newborn(2, 2)];
        let mut stats = PopulationStats {
            total_people: 2,
            total_immune: 1,
            ..Default::default()
        };
        let mut report = TickReport::default();
        let mut ctx = ContactContext {
            disease: &disease,
            stats: &mut stats,
            report: &mut report,
        };
        sweep_all_pairs(&mut agents, &mut ctx, &mut ConstantSource::new(0.0));

        assert!(agents[0].is_infected());
        assert_eq!(agents[0].infection_timer, 0);
        assert_eq!(stats.total_immune, 0);
        assert_eq!(report.reinfections, 1);
    }

    #[test]
    fn test_newly_infected_agent_transmits_in_same_sweep() {
        let disease = DiseaseConfig {
            base_infection_rate: 1.0,
            reinfection_rate: 0.0,
            ..Default::default()
        };
        let mut agents = vec![
            Agent::new(1, 1, true, false, 20),
            Agent::newborn(1, 1),
            Agent::newborn(1, 1),
        ];
        let report = run_all_pairs(&mut agents, &disease, &mut ConstantSource::new(0.0));
        assert!(agents.iter().all(Agent::is_infected));
        assert_eq!(report.transmissions, 2);
    }

    #[test]
    fn test_indexed_sweep_matches_all_pairs() {
        let disease = DiseaseConfig {
            base_infection_rate: 1.0,
            reinfection_rate: 1.0,
            ..Default::default()
        };
        let agents = vec![
            Agent::new(1, 1, true, false, 20),
            immune(4, 4),
            Agent::newborn(1, 1),
            Agent::new(4, 4, true, true, 70),
            Agent::newborn(9, 9),
            immune(1, 1),
        ];

        let mut brute = agents.clone();
        let mut brute_rng = ConstantSource::new(0.0);
        let brute_report = run_all_pairs(&mut brute, &disease, &mut brute_rng);

        let mut indexed = agents;
        let mut index = CellIndex::new();
        index.build(&indexed);
        let mut stats = PopulationStats::default();
        let mut report = TickReport::default();
        let mut ctx = ContactContext {
            disease: &disease,
            stats: &mut stats,
            report: &mut report,
        };
        let mut indexed_rng = ConstantSource::new(0.0);
        sweep_indexed(&mut indexed, &index, &mut ctx, &mut indexed_rng);

        assert_eq!(brute, indexed);
        assert_eq!(brute_report, report);
        assert_eq!(brute_rng.draws, indexed_rng.draws);
    }
}
