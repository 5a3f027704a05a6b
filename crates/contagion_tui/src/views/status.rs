use contagion_core::snapshot::PopulationSnapshot;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph, Widget};
use std::time::Duration;

pub struct StatusWidget<'a> {
    pub snapshot: &'a PopulationSnapshot,
    pub paused: bool,
    pub tick_interval_ms: u64,
    /// Time the engine spent on the latest tick.
    pub tick_cost: Duration,
    /// Agents outside the drawn window.
    pub offscreen: usize,
}

impl<'a> StatusWidget<'a> {
    fn counter(label: &str, value: impl ToString, color: Color) -> Line<'static> {
        Line::from(vec![
            Span::raw(format!("{label:<12}")),
            Span::styled(
                value.to_string(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
        ])
    }
}

impl<'a> Widget for StatusWidget<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let block = Block::default().title(" Status ").borders(Borders::ALL);
        let inner = block.inner(area);
        block.render(area, buf);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(10), Constraint::Length(1)])
            .split(inner);

        let stats = &self.snapshot.stats;
        let state = if self.paused { "PAUSED" } else { "running" };
        let lines = vec![
            Self::counter("Tick", self.snapshot.tick, Color::White),
            Self::counter("People", stats.total_people, Color::White),
            Self::counter("Infected", stats.total_infected, Color::Red),
            Self::counter("Immune", stats.total_immune, Color::Green),
            Self::counter("Susceptible", stats.susceptible(), Color::Blue),
            Self::counter("Recovered", stats.total_recovered, Color::Green),
            Self::counter("Births", stats.births, Color::Cyan),
            Self::counter("Deaths", stats.deaths, Color::Gray),
            Self::counter("Off-screen", self.offscreen, Color::DarkGray),
            Line::from(format!("{state} @ {} ms/tick", self.tick_interval_ms)),
            Line::from(format!("last tick took {} us", self.tick_cost.as_micros())),
        ];
        Paragraph::new(lines).render(rows[0], buf);

        let prevalence = stats.prevalence().clamp(0.0, 1.0);
        Gauge::default()
            .gauge_style(Style::default().fg(Color::Red))
            .ratio(prevalence)
            .label(format!("{:.1}% infected", prevalence * 100.0))
            .render(rows[1], buf);
    }
}
