use crate::model::snapshot::PopulationSnapshot;
use crate::model::state::TickReport;
use crate::model::world::{StopReason, World};
use anyhow::Result;
use std::collections::VecDeque;
use std::time::Duration;

/// Samples kept for the sparklines.
pub const HISTORY_LEN: usize = 200;
pub const MIN_TICK_INTERVAL: Duration = Duration::from_millis(5);
pub const MAX_TICK_INTERVAL: Duration = Duration::from_millis(2000);

pub struct App {
    pub running: bool,
    pub paused: bool,
    pub world: World,
    pub tick_interval: Duration,
    /// Grid cell drawn at the top-left corner of the world view.
    pub origin: (i64, i64),
    pub max_ticks: u64,
    pub infected_history: VecDeque<u64>,
    pub immune_history: VecDeque<u64>,
    pub latest_snapshot: Option<PopulationSnapshot>,
    pub stop_reason: Option<StopReason>,
}

impl App {
    pub fn new(world: World) -> Self {
        let tick_interval = Duration::from_millis(world.config.driver.tick_interval_ms);
        let max_ticks = world.config.driver.max_ticks;
        let mut app = Self {
            running: true,
            paused: false,
            world,
            tick_interval,
            origin: (0, 0),
            max_ticks,
            infected_history: VecDeque::with_capacity(HISTORY_LEN),
            immune_history: VecDeque::with_capacity(HISTORY_LEN),
            latest_snapshot: None,
            stop_reason: None,
        };
        app.refresh();
        app
    }

    /// Advances the world by one tick and refreshes the views.
    pub fn step(&mut self) -> Result<TickReport> {
        let report = self.world.update()?;
        self.refresh();
        Ok(report)
    }

    fn refresh(&mut self) {
        let stats = *self.world.stats();
        push_capped(&mut self.infected_history, stats.total_infected as u64);
        push_capped(&mut self.immune_history, stats.total_immune as u64);
        self.latest_snapshot = Some(self.world.snapshot());
    }

    /// Whether the run has reached a natural end.
    pub fn natural_stop(&self) -> Option<StopReason> {
        if self.max_ticks > 0 && self.world.tick >= self.max_ticks {
            Some(StopReason::MaxTicks)
        } else if self.world.population.is_empty() {
            Some(StopReason::Extinct)
        } else {
            None
        }
    }

    pub fn faster(&mut self) {
        self.tick_interval = (self.tick_interval / 2).max(MIN_TICK_INTERVAL);
    }

    pub fn slower(&mut self) {
        self.tick_interval = (self.tick_interval * 2)
            .max(MIN_TICK_INTERVAL)
            .min(MAX_TICK_INTERVAL);
    }

    /// Ends the run and records why. Only the first reason counts.
    pub fn stop(&mut self, reason: StopReason) -> Result<()> {
        self.running = false;
        if self.stop_reason.is_none() {
            self.stop_reason = Some(reason);
            self.world.finish(reason)?;
        }
        Ok(())
    }
}

fn push_capped(history: &mut VecDeque<u64>, value: u64) {
    if history.len() == HISTORY_LEN {
        history.pop_front();
    }
    history.push_back(value);
}
