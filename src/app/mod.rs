pub mod input;
pub mod prompt;
pub mod render;
pub mod state;

pub use state::App;

use crate::model::state::PopulationStats;
use crate::model::world::StopReason;
use anyhow::Result;
use contagion_tui::Tui;
use crossterm::event::{self, Event, KeyEventKind};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::{Interval, MissedTickBehavior};

/// One line describing the population at `tick`.
pub fn summary_line(tick: u64, stats: &PopulationStats) -> String {
    format!(
        "tick {tick:>6} | people {:>5} | infected {:>5} | immune {:>5} | susceptible {:>5} | recovered {:>6} | births {:>5} | deaths {:>5}",
        stats.total_people,
        stats.total_infected,
        stats.total_immune,
        stats.susceptible(),
        stats.total_recovered,
        stats.births,
        stats.deaths,
    )
}

async fn next_tick(interval: &mut Option<Interval>) {
    match interval {
        Some(interval) => {
            interval.tick().await;
        }
        None => tokio::task::yield_now().await,
    }
}

impl App {
    /// Runs without a terminal UI, printing a summary every report interval.
    ///
    /// A zero tick interval runs as fast as possible.
    pub async fn run_headless(&mut self) -> Result<StopReason> {
        let outcome = self.headless_loop().await;
        self.conclude(outcome)
    }

    async fn headless_loop(&mut self) -> Result<StopReason> {
        let report_interval = self.world.config.driver.report_interval.max(1);
        let mut interval = if self.tick_interval.is_zero() {
            None
        } else {
            let mut interval = tokio::time::interval(self.tick_interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            Some(interval)
        };

        println!("{}", summary_line(self.world.tick, self.world.stats()));

        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        let reason = loop {
            if let Some(reason) = self.natural_stop() {
                break reason;
            }
            tokio::select! {
                _ = &mut ctrl_c => {
                    tracing::info!("Ctrl+C received, stopping");
                    break StopReason::Interrupted;
                }
                _ = next_tick(&mut interval) => {}
            }

            self.step()?;
            if self.world.tick % report_interval == 0 {
                println!("{}", summary_line(self.world.tick, self.world.stats()));
            }
        };

        if self.world.tick % report_interval != 0 {
            println!("{}", summary_line(self.world.tick, self.world.stats()));
        }
        Ok(reason)
    }

    /// Runs the terminal UI until the user quits or the run is interrupted.
    ///
    /// Reaching the tick limit or extinction pauses the simulation but keeps
    /// the final state on screen.
    pub async fn run(&mut self, tui: &mut Tui) -> Result<StopReason> {
        let outcome = self.tui_loop(tui).await;
        self.conclude(outcome)
    }

    async fn tui_loop(&mut self, tui: &mut Tui) -> Result<StopReason> {
        let mut last_tick = Instant::now();
        if self.tick_interval.is_zero() {
            self.tick_interval = state::MIN_TICK_INTERVAL;
        }

        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();
        tokio::spawn(async move {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("Ctrl+C received, initiating graceful shutdown...");
            shutdown_clone.store(true, Ordering::SeqCst);
        });

        let mut ended: Option<StopReason> = None;
        let reason = loop {
            if shutdown.load(Ordering::SeqCst) {
                break StopReason::Interrupted;
            }

            tui.terminal.draw(|f| {
                self.draw(f);
            })?;

            let mut requested = None;
            while event::poll(Duration::from_millis(1))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        requested = requested.or(self.handle_key(key));
                    }
                }
            }
            if let Some(reason) = requested {
                break ended.unwrap_or(reason);
            }

            if ended.is_none() && last_tick.elapsed() >= self.tick_interval {
                if !self.paused {
                    self.step()?;
                }
                if let Some(reason) = self.natural_stop() {
                    tracing::info!(reason = reason.as_str(), "Simulation ended");
                    self.paused = true;
                    ended = Some(reason);
                }
                last_tick = Instant::now();
            }

            tokio::time::sleep(Duration::from_millis(2)).await;
        };

        Ok(reason)
    }

    /// Records how the run ended. A failed run is still marked finished in
    /// the history before its error is returned.
    fn conclude(&mut self, outcome: Result<StopReason>) -> Result<StopReason> {
        match outcome {
            Ok(reason) => {
                self.stop(reason)?;
                Ok(reason)
            }
            Err(err) => {
                tracing::error!(error = %err, "Run failed");
                if let Err(finish_err) = self.stop(StopReason::Failed) {
                    tracing::warn!(error = %finish_err, "Could not record the failed run");
                }
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::tests::test_app;

    #[test]
    fn test_summary_line_contains_counters() {
        let stats = PopulationStats {
            total_people: 12,
            total_infected: 3,
            total_immune: 4,
            total_recovered: 6,
            births: 2,
            deaths: 1,
        };
        let line = summary_line(50, &stats);
        assert!(line.starts_with("tick     50"));
        assert!(line.contains("infected     3"));
        assert!(line.contains("susceptible     5"));
        assert!(line.contains("deaths     1"));
    }

    #[test]
    fn test_failed_run_is_marked_finished() {
        use crate::model::config::AppConfig;
        use crate::model::history::{read_history, HistoryEntry, HISTORY_FILE};
        use crate::model::world::World;

        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.world.seed = Some(3);
        config.setup.population = 10;
        config.setup.initial_infected = 1;
        let world = World::new(config).unwrap().with_history(dir.path()).unwrap();
        let mut app = App::new(world);
        app.step().unwrap();

        let outcome = app.conclude(Err(anyhow::anyhow!("terminal went away")));

        assert!(outcome.is_err());
        assert_eq!(app.stop_reason, Some(StopReason::Failed));
        let entries = read_history(dir.path().join(HISTORY_FILE)).unwrap();
        assert!(matches!(
            entries.last(),
            Some(HistoryEntry::Finished { tick: 1, reason, .. }) if reason == "failed"
        ));
    }

    #[tokio::test]
    async fn test_headless_stops_at_max_ticks() {
        let mut app = test_app(40, 25);
        app.tick_interval = Duration::ZERO;
        let reason = app.run_headless().await.unwrap();
        assert_eq!(reason, StopReason::MaxTicks);
        assert_eq!(app.world.tick, 25);
        assert!(!app.running);
    }

    #[tokio::test]
    async fn test_headless_stops_on_extinction() {
        let mut app = test_app(0, 0);
        app.tick_interval = Duration::ZERO;
        let reason = app.run_headless().await.unwrap();
        assert_eq!(reason, StopReason::Extinct);
        assert_eq!(app.world.tick, 0);
    }

    #[tokio::test]
    async fn test_headless_honours_interval() {
        let mut app = test_app(10, 3);
        app.tick_interval = Duration::from_millis(100);
        let reason = app.run_headless().await.unwrap();
        assert_eq!(reason, StopReason::MaxTicks);
        assert_eq!(app.world.tick, 3);
    }
}
