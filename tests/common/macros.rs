/// Asserts the number of agents and the `total_people` counter.
#[macro_export]
macro_rules! assert_population {
    ($population:expr, $count:expr) => {
        assert_eq!($population.len(), $count, "Population size mismatch");
        assert_eq!(
            $population.stats().total_people,
            $count,
            "total_people counter mismatch"
        );
    };
}

/// Asserts that the current counters agree with the agents.
#[macro_export]
macro_rules! assert_counters_consistent {
    ($population:expr) => {
        let stats = $population.stats();
        assert_eq!(stats.total_people, $population.len());
        assert_eq!(
            stats.total_infected,
            $population.count(contagion_lib::model::state::HealthState::Infected),
            "total_infected out of sync"
        );
        assert_eq!(
            stats.total_immune,
            $population.count(contagion_lib::model::state::HealthState::Immune),
            "total_immune out of sync"
        );
        assert_eq!(
            stats.total_infected + stats.total_immune + stats.susceptible(),
            stats.total_people
        );
    };
}

/// Asserts the health of the agent at `index`.
#[macro_export]
macro_rules! assert_health {
    ($population:expr, $index:expr, $health:expr) => {
        assert_eq!(
            $population.agents()[$index].health,
            $health,
            "Agent {} has the wrong health",
            $index
        );
    };
}
