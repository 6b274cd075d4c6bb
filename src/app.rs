use std::io::Write;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::config::Settings;
use crate::error::GameError;
use crate::input::{Input, Keyboard};
use crate::render;
use crate::session::{Command, Session, State, TICKS_PER_SECOND};
use crate::terminal::Screen;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub commands: Vec<Command>,
    pub quit: bool,
    pub resized: bool,
}

/// Folds one frame's worth of terminal events into session commands.
pub fn collect_input<I>(events: I, keyboard: &mut Keyboard, state: State) -> FrameInput
where
    I: IntoIterator<Item = Event>,
{
    let mut frame = FrameInput::default();
    for event in events {
        match event {
            Event::Key(key) => match keyboard.handle(key, state) {
                Input::Play(command) => frame.commands.push(command),
                Input::Quit => {
                    frame.quit = true;
                    break;
                }
                Input::Nothing => {}
            },
            Event::Resize(..) => frame.resized = true,
            _ => {}
        }
    }
    frame
}

fn poll_events() -> Result<Vec<Event>, GameError> {
    let mut events = Vec::new();
    while event::poll(Duration::from_millis(0))? {
        events.push(event::read()?);
    }
    Ok(events)
}

pub fn run<W: Write>(out: W, settings: &Settings) -> Result<(), GameError> {
    let mut rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut session = Session::new(settings.session_config());
    let mut screen = Screen::new(out, session.maze().width(), session.maze().height());
    let mut keyboard = Keyboard::new();
    let frame_time = Duration::from_micros(1_000_000 / u64::from(TICKS_PER_SECOND));

    loop {
        let frame_start = Instant::now();

        let frame = collect_input(poll_events()?, &mut keyboard, session.state());
        if frame.quit {
            info!(state = ?session.state(), score = session.score(), "player quit");
            return Ok(());
        }
        if frame.resized {
            screen.invalidate();
        }

        session.update(&frame.commands, &mut rng);
        render::draw_frame(&session, keyboard.confirming(), &mut screen)?;
        screen.present()?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Dir;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn frame_keeps_command_order() {
        let mut keyboard = Keyboard::new();
        let frame = collect_input(
            vec![key(KeyCode::Right), key(KeyCode::Char('d')), key(KeyCode::Down)],
            &mut keyboard,
            State::Playing,
        );
        assert_eq!(
            frame.commands,
            vec![
                Command::Move(Dir::Right),
                Command::Select(crate::search::Algorithm::Dfs),
                Command::Move(Dir::Down),
            ]
        );
        assert!(!frame.quit);
    }

    #[test]
    fn confirmed_quit_stops_collecting() {
        let mut keyboard = Keyboard::new();
        let frame = collect_input(
            vec![key(KeyCode::Char('q')), key(KeyCode::Char('y')), key(KeyCode::Up)],
            &mut keyboard,
            State::Playing,
        );
        assert!(frame.quit);
        assert!(frame.commands.is_empty());
    }

    #[test]
    fn resize_is_reported() {
        let mut keyboard = Keyboard::new();
        let frame = collect_input(vec![Event::Resize(80, 24)], &mut keyboard, State::Won);
        assert!(frame.resized);
        assert!(frame.commands.is_empty());
    }
}
