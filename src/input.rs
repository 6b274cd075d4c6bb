//! Terminal key bindings.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::grid::Dir;
use crate::search::Algorithm;
use crate::session::{Command, Difficulty, State};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    Play(Command),
    Quit,
    Nothing,
}

pub fn translate(code: KeyCode) -> Input {
    let command = match code {
        KeyCode::Up | KeyCode::Char('k') => Command::Move(Dir::Up),
        KeyCode::Right | KeyCode::Char('l') => Command::Move(Dir::Right),
        KeyCode::Down | KeyCode::Char('j') => Command::Move(Dir::Down),
        KeyCode::Left | KeyCode::Char('h') => Command::Move(Dir::Left),
        KeyCode::Char('b') => Command::Select(Algorithm::Bfs),
        KeyCode::Char('d') => Command::Select(Algorithm::Dfs),
        KeyCode::Char('p') => Command::TogglePath,
        KeyCode::Char('e') | KeyCode::Char('1') => Command::SetDifficulty(Difficulty::Easy),
        KeyCode::Char('m') | KeyCode::Char('2') => Command::SetDifficulty(Difficulty::Medium),
        KeyCode::Char('H') | KeyCode::Char('3') => Command::SetDifficulty(Difficulty::Hard),
        KeyCode::Char('r') | KeyCode::Char('R') => Command::Reset,
        KeyCode::Char('q') | KeyCode::Esc => return Input::Quit,
        _ => return Input::Nothing,
    };
    Input::Play(command)
}

/// Tracks the quit confirmation prompt between frames.
#[derive(Debug, Default)]
pub struct Keyboard {
    confirming: bool,
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn confirming(&self) -> bool {
        self.confirming
    }

    /// Quitting a running game needs a `y`; a finished one quits straight away.
    pub fn handle(&mut self, key: KeyEvent, state: State) -> Input {
        if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
            return Input::Nothing;
        }

        if self.confirming {
            return match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => Input::Quit,
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.confirming = false;
                    Input::Nothing
                }
                _ => Input::Nothing,
            };
        }

        match translate(key.code) {
            Input::Quit if !state.is_over() => {
                self.confirming = true;
                Input::Nothing
            }
            other => other,
        }
    }
}
