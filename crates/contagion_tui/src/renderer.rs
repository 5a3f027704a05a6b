use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::widgets::{Block, Borders, Widget};

use contagion_core::snapshot::PopulationSnapshot;
use contagion_data::HealthState;

/// Draws the agents that fall inside a window of the grid.
///
/// One grid cell maps to one terminal cell, with the window's top-left corner
/// at `origin`. Agents that have drifted outside the window are not drawn.
pub struct WorldWidget<'a> {
    snapshot: &'a PopulationSnapshot,
    origin: (i64, i64),
}

impl<'a> WorldWidget<'a> {
    pub fn new(snapshot: &'a PopulationSnapshot, origin: (i64, i64)) -> Self {
        Self { snapshot, origin }
    }

    pub fn get_inner_area(area: Rect) -> Rect {
        Block::default().borders(Borders::ALL).inner(area)
    }

    pub fn color_for_health(health: HealthState) -> Color {
        match health {
            HealthState::Infected => Color::Red,
            HealthState::Immune => Color::Green,
            HealthState::Susceptible => Color::Blue,
        }
    }

    /// Which state shows when several agents share a cell.
    fn precedence(health: HealthState) -> u8 {
        match health {
            HealthState::Infected => 2,
            HealthState::Immune => 1,
            HealthState::Susceptible => 0,
        }
    }

    pub fn symbol_for_crowd(count: usize) -> char {
        match count {
            0 => ' ',
            1 => '●',
            2..=9 => char::from_digit(count as u32, 10).unwrap_or('#'),
            _ => '#',
        }
    }

    pub fn world_to_screen(
        world_x: i64,
        world_y: i64,
        inner: Rect,
        origin: (i64, i64),
    ) -> Option<(u16, u16)> {
        let dx = world_x.checked_sub(origin.0)?;
        let dy = world_y.checked_sub(origin.1)?;
        if dx < 0 || dy < 0 || dx >= i64::from(inner.width) || dy >= i64::from(inner.height) {
            return None;
        }
        Some((inner.x + dx as u16, inner.y + dy as u16))
    }
}

impl<'a> Widget for WorldWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .title(format!(
                " World ({}, {}) | Tick: {} ",
                self.origin.0, self.origin.1, self.snapshot.tick
            ))
            .borders(Borders::ALL)
            .render(area, buf);

        let inner = Self::get_inner_area(area);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let width = inner.width as usize;
        let mut cells: Vec<Option<(HealthState, usize)>> =
            vec![None; width * inner.height as usize];

        for agent in self.snapshot.visible(
            self.origin.0,
            self.origin.1,
            i64::from(inner.width),
            i64::from(inner.height),
        ) {
            if let Some((x, y)) = Self::world_to_screen(agent.x, agent.y, inner, self.origin) {
                let slot = &mut cells[(y - inner.y) as usize * width + (x - inner.x) as usize];
                *slot = match *slot {
                    None => Some((agent.health, 1)),
                    Some((shown, count)) => {
                        let health = if Self::precedence(agent.health) > Self::precedence(shown) {
                            agent.health
                        } else {
                            shown
                        };
                        Some((health, count + 1))
                    }
                };
            }
        }

        for (i, slot) in cells.into_iter().enumerate() {
            if let Some((health, count)) = slot {
                let x = inner.x + (i % width) as u16;
                let y = inner.y + (i / width) as u16;
                let cell = &mut buf[(x, y)];
                cell.set_symbol(&Self::symbol_for_crowd(count).to_string());
                cell.set_fg(Self::color_for_health(health));
            }
        }
    }
}
