use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Sparkline, Widget};

/// Recent history of the infected and immune counts, newest on the right.
pub struct SparklinesWidget<'a> {
    pub infected: &'a [u64],
    pub immune: &'a [u64],
}

fn trend(title: &str, series: &[u64], color: Color, area: Rect, buf: &mut Buffer) {
    let latest = series.last().copied().unwrap_or(0);
    let peak = series.iter().copied().max().unwrap_or(0);
    Sparkline::default()
        .block(
            Block::default()
                .borders(Borders::TOP)
                .title(format!(" {title} {latest} (max {peak}) ")),
        )
        .data(series)
        .max(peak.max(1))
        .style(Style::default().fg(color))
        .render(area, buf);
}

impl<'a> Widget for SparklinesWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
            .split(area);

        trend("Infected", self.infected, Color::Red, rows[0], buf);
        trend("Immune", self.immune, Color::Green, rows[1], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_titles_show_latest_and_peak() {
        let area = Rect::new(0, 0, 40, 8);
        let mut buf = Buffer::empty(area);
        SparklinesWidget {
            infected: &[1, 9, 4],
            immune: &[],
        }
        .render(area, &mut buf);

        let top: String = (0..area.width).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        assert!(top.contains("Infected 4 (max 9)"));
        let middle: String = (0..area.width).map(|x| buf[(x, 4)].symbol().to_string()).collect();
        assert!(middle.contains("Immune 0 (max 0)"));
    }
}
