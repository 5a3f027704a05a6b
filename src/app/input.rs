use crate::app::state::App;
use crate::model::world::StopReason;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Cells moved per arrow key press.
pub const PAN_STEP: i64 = 5;

impl App {
    /// Applies a key press. Returns a stop reason when the key ends the run.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<StopReason> {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Some(StopReason::Interrupted);
            }
            KeyCode::Char('q') | KeyCode::Esc => return Some(StopReason::UserQuit),
            KeyCode::Char(' ') => self.paused = !self.paused,
            KeyCode::Char('+') | KeyCode::Char('=') => self.faster(),
            KeyCode::Char('-') | KeyCode::Char('_') => self.slower(),
            KeyCode::Left => self.origin.0 -= PAN_STEP,
            KeyCode::Right => self.origin.0 += PAN_STEP,
            KeyCode::Up => self.origin.1 -= PAN_STEP,
            KeyCode::Down => self.origin.1 += PAN_STEP,
            KeyCode::Char('0') => self.origin = (0, 0),
            _ => {}
        }
        None
    }
}
