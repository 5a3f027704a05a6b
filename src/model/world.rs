use crate::model::config::AppConfig;
use crate::model::history::{HistoryLogger, RunHeader};
use crate::model::population::Population;
use crate::model::setup::seed_population;
use crate::model::snapshot::PopulationSnapshot;
use crate::model::spatial_hash::CellIndex;
use crate::model::state::{PopulationStats, TickReport};
use anyhow::Context;
use chrono::Utc;
use contagion_core::engine::tick_with_index;
use contagion_core::Metrics;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::Path;
use std::time::Instant;

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    MaxTicks,
    /// Every agent has died.
    Extinct,
    Interrupted,
    UserQuit,
    /// The run was cut short by an error.
    Failed,
}

impl StopReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MaxTicks => "max_ticks",
            Self::Extinct => "extinct",
            Self::Interrupted => "interrupted",
            Self::UserQuit => "user_quit",
            Self::Failed => "failed",
        }
    }
}

/// A population together with everything needed to advance and record it.
pub struct World {
    pub population: Population,
    pub tick: u64,
    pub config: AppConfig,
    pub seed: u64,
    pub logger: HistoryLogger,
    pub metrics: Metrics,
    rng: ChaCha8Rng,
    index: CellIndex,
    /// Events since the last history record.
    pending: TickReport,
    last_recorded: u64,
}

impl World {
    /// Validates `config` and seeds the initial population from it.
    ///
    /// Without a configured seed one is drawn from entropy and kept in
    /// [`World::seed`] so the run can be repeated.
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let seed = config.world.seed.unwrap_or_else(rand::random);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let population = seed_population(&config.setup, config.world.spawn_extent, &mut rng);
        Ok(Self::assemble(population, config, seed, rng))
    }

    /// Wraps an existing population. The random stream starts fresh from
    /// `seed`.
    pub fn from_population(population: Population, config: AppConfig, seed: u64) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(seed);
        Self::assemble(population, config, seed, rng)
    }

    fn assemble(population: Population, config: AppConfig, seed: u64, rng: ChaCha8Rng) -> Self {
        let metrics = Metrics::new(config.driver.report_interval);
        Self {
            population,
            tick: 0,
            config,
            seed,
            logger: HistoryLogger::new_dummy(),
            metrics,
            rng,
            index: CellIndex::new(),
            pending: TickReport::default(),
            last_recorded: 0,
        }
    }

    /// Starts recording history to `dir` and writes the run header.
    pub fn with_history(mut self, dir: impl AsRef<Path>) -> anyhow::Result<Self> {
        let dir = dir.as_ref();
        let mut logger = HistoryLogger::new_at(dir)
            .with_context(|| format!("opening history in {}", dir.display()))?;
        logger.write_header(RunHeader {
            seed: self.seed,
            fingerprint: self.config.fingerprint(),
            started_at: Utc::now(),
            initial: *self.population.stats(),
            contact_strategy: format!("{:?}", self.config.engine.contact_strategy),
        })?;
        tracing::info!(path = %logger.path().display(), "Recording history");
        self.logger = logger;
        Ok(self)
    }

    pub fn stats(&self) -> &PopulationStats {
        self.population.stats()
    }

    /// Advances one tick and records it.
    pub fn update(&mut self) -> anyhow::Result<TickReport> {
        let infected_before = self.population.stats().total_infected;
        let started = Instant::now();

        let report = tick_with_index(
            &mut self.population,
            &mut self.rng,
            &self.config,
            &mut self.index,
        );
        self.tick += 1;
        self.pending.absorb(&report);

        let stats = *self.population.stats();
        if infected_before > 0 && stats.total_infected == 0 {
            self.metrics
                .log_event("infection_extinct", &format!("tick {}", self.tick));
        }

        if self.metrics.record_tick(started.elapsed(), &stats, &report) {
            self.record()?;
        }
        Ok(report)
    }

    fn record(&mut self) -> anyhow::Result<()> {
        let stats = *self.population.stats();
        self.logger
            .log_stats(self.tick, stats, std::mem::take(&mut self.pending))?;
        self.last_recorded = self.tick;
        Ok(())
    }

    /// Marks the end of the run in the history.
    pub fn finish(&mut self, reason: StopReason) -> anyhow::Result<()> {
        if self.tick != self.last_recorded {
            self.record()?;
        }
        self.logger.log_finish(self.tick, reason.as_str())?;
        let totals = self.metrics.totals();
        tracing::info!(
            tick = self.tick,
            reason = reason.as_str(),
            elapsed_ms = self.metrics.elapsed().as_millis() as u64,
            transmissions = totals.transmissions,
            reinfections = totals.reinfections,
            recoveries = totals.recoveries,
            births = totals.births,
            deaths = totals.deaths,
            "Run finished"
        );
        Ok(())
    }

    pub fn snapshot(&self) -> PopulationSnapshot {
        self.population.snapshot(self.tick)
    }
}
