//! Performance metrics collection for the simulation.
//!
//! Provides structured logging and tick timing for monitoring a run.

use contagion_data::{PopulationStats, TickReport};
use std::fs::File;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

/// Tick timing plus running event totals.
pub struct Metrics {
    tick_count: AtomicU64,
    last_tick_micros: AtomicU64,
    report_interval: u64,
    totals: Mutex<TickReport>,
    start_time: Instant,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new(50)
    }
}

impl Metrics {
    /// Creates a collector that logs a summary every `report_interval` ticks.
    #[must_use]
    pub fn new(report_interval: u64) -> Self {
        Self {
            tick_count: AtomicU64::new(0),
            last_tick_micros: AtomicU64::new(0),
            report_interval: report_interval.max(1),
            totals: Mutex::new(TickReport::default()),
            start_time: Instant::now(),
        }
    }

    /// Records a completed tick with its duration. Returns true when this tick
    /// falls on the report interval.
    pub fn record_tick(
        &self,
        duration: Duration,
        stats: &PopulationStats,
        report: &TickReport,
    ) -> bool {
        let tick = self.tick_count.fetch_add(1, Ordering::Relaxed) + 1;
        self.last_tick_micros
            .store(duration.as_micros() as u64, Ordering::Relaxed);
        {
            let mut totals = self.totals.lock().unwrap_or_else(|e| e.into_inner());
            totals.absorb(report);
        }

        let due = tick % self.report_interval == 0;
        if due {
            tracing::info!(
                tick = tick,
                people = stats.total_people,
                infected = stats.total_infected,
                immune = stats.total_immune,
                recovered = stats.total_recovered,
                births = stats.births,
                deaths = stats.deaths,
                duration_us = duration.as_micros() as u64,
                "Simulation tick"
            );
        }
        due
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn last_tick_duration(&self) -> Duration {
        Duration::from_micros(self.last_tick_micros.load(Ordering::Relaxed))
    }

    /// Event counts summed over every recorded tick.
    #[must_use]
    pub fn totals(&self) -> TickReport {
        *self.totals.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Gets elapsed time since metrics creation.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Logs a simulation event.
    pub fn log_event(&self, event_type: &str, details: &str) {
        tracing::info!(
            event_type = event_type,
            details = details,
            "Simulation event"
        );
    }
}

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Initialize tracing subscriber for logging to stderr.
///
/// Honours `RUST_LOG`, falling back to `default_level`.
pub fn init_logging(default_level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_level))
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}

/// Same as [`init_logging`] but writes to `file`, so log lines do not tear a
/// terminal UI.
pub fn init_file_logging(default_level: &str, file: File) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_level))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .ok();
}
