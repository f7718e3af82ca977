use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::snake::Direction::{self, *};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    Quit,
    None,
}

impl Command {
    pub fn from_key_event(ev: &KeyEvent) -> Command {
        if ev.kind == KeyEventKind::Release {
            return Command::None;
        }
        if is_ctrl_c(ev) {
            return Command::Quit;
        }

        match ev.code {
            KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => Command::Turn(Up),
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => Command::Turn(Left),
            KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => Command::Turn(Down),
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => Command::Turn(Right),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Command::Quit,
            _ => Command::None,
        }
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}
