use crate::app::state::App;
use contagion_tui::renderer::WorldWidget;
use contagion_tui::views::sparklines::SparklinesWidget;
use contagion_tui::views::status::StatusWidget;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Style};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

const SIDEBAR_WIDTH: u16 = 32;

impl App {
    pub fn draw(&mut self, f: &mut Frame) {
        let snapshot = match &self.latest_snapshot {
            Some(s) => s,
            None => return,
        };

        let main_layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(SIDEBAR_WIDTH)])
            .split(f.area());

        let left_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(main_layout[0]);

        let world_area = left_layout[0];
        let inner = WorldWidget::get_inner_area(world_area);
        let shown = snapshot
            .visible(
                self.origin.0,
                self.origin.1,
                i64::from(inner.width),
                i64::from(inner.height),
            )
            .count();

        f.render_widget(WorldWidget::new(snapshot, self.origin), world_area);

        f.render_widget(
            Paragraph::new(" [q] quit  [space] pause  [+/-] speed  [arrows] pan  [0] recenter")
                .style(Style::default().fg(Color::DarkGray)),
            left_layout[1],
        );

        let sidebar = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(15), Constraint::Min(0)])
            .split(main_layout[1]);

        f.render_widget(
            StatusWidget {
                snapshot,
                paused: self.paused,
                tick_interval_ms: self.tick_interval.as_millis() as u64,
                tick_cost: self.world.metrics.last_tick_duration(),
                offscreen: snapshot.agents.len() - shown,
            },
            sidebar[0],
        );

        let infected: Vec<u64> = self.infected_history.iter().copied().collect();
        let immune: Vec<u64> = self.immune_history.iter().copied().collect();
        f.render_widget(
            SparklinesWidget {
                infected: &infected,
                immune: &immune,
            },
            sidebar[1],
        );
    }
}

#[cfg(test)]
mod tests {
    use crate::app::state::tests::test_app;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn test_draw_shows_status() {
        let mut app = test_app(30, 0);
        app.step().unwrap();
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| app.draw(f)).unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Status"));
        assert!(text.contains("World"));
        assert!(text.contains("People"));
        assert!(text.contains("last tick took"));
    }
}
