//! Frame-driven game session: timers, shuffles, re-planning and the win/timeout rules.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use tracing::{debug, info, trace};

use crate::error::ConfigError;
use crate::grid::{Dir, Maze, Pos};
use crate::mutate;
use crate::search::{Algorithm, Pathfinder};

pub const BOARD_WIDTH: usize = 15;
pub const BOARD_HEIGHT: usize = 15;
pub const TICKS_PER_SECOND: u32 = 60;
pub const TIME_LIMIT: u32 = 90;

/// Shuffle speed. The only way to configure how often the maze mutates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Frames between two shuffles.
    pub fn shuffle_interval(self) -> u32 {
        match self {
            Difficulty::Easy => 300,
            Difficulty::Medium => 180,
            Difficulty::Hard => 60,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ConfigError::UnknownDifficulty(s.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    Playing,
    Won,
    Lost,
}

impl State {
    pub fn is_over(self) -> bool {
        self != State::Playing
    }
}

/// One input event for a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Move(Dir),
    Select(Algorithm),
    TogglePath,
    SetDifficulty(Difficulty),
    Reset,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    pub difficulty: Difficulty,
    pub algorithm: Algorithm,
    pub show_path: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Medium,
            algorithm: Algorithm::Bfs,
            show_path: true,
        }
    }
}

pub struct Session {
    maze: Maze,
    pathfinder: Pathfinder,
    algorithm: Algorithm,
    show_path: bool,
    difficulty: Difficulty,
    state: State,
    time_left: u32,
    frame_counter: u32,
    shuffle_timer: u32,
    bumps: u32,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        let mut session = Self {
            maze: Maze::new(BOARD_WIDTH, BOARD_HEIGHT),
            pathfinder: Pathfinder::new(),
            algorithm: config.algorithm,
            show_path: config.show_path,
            difficulty: config.difficulty,
            state: State::Playing,
            time_left: TIME_LIMIT,
            frame_counter: 0,
            shuffle_timer: 0,
            bumps: 0,
        };
        if session.show_path {
            session.replan();
        }
        info!(
            difficulty = %session.difficulty,
            algorithm = %session.algorithm,
            show_path = session.show_path,
            "session started"
        );
        session
    }

    /// Advances one frame: input first, then win check, countdown and shuffle.
    pub fn update(&mut self, commands: &[Command], rng: &mut impl Rng) {
        for command in commands {
            self.apply(*command);
        }
        if self.state.is_over() {
            return;
        }

        if self.maze.player() == self.maze.exit() {
            self.finish(State::Won);
            return;
        }

        self.frame_counter += 1;
        if self.frame_counter >= TICKS_PER_SECOND {
            self.frame_counter = 0;
            self.time_left = self.time_left.saturating_sub(1);
            if self.time_left == 0 {
                self.finish(State::Lost);
                return;
            }
        }

        self.shuffle_timer += 1;
        if self.shuffle_timer >= self.difficulty.shuffle_interval() {
            self.shuffle_timer = 0;
            let flipped = mutate::shuffle_walls(&mut self.maze, rng);
            if self.show_path {
                self.replan();
            }
            debug!(
                flipped,
                route = self.pathfinder.current_path().len(),
                "maze shuffled"
            );
        }
    }

    fn apply(&mut self, command: Command) {
        match command {
            Command::Move(dir) => {
                if self.maze.step_player(dir) {
                    if self.show_path {
                        self.replan();
                    }
                } else {
                    self.bumps += 1;
                    trace!(?dir, bumps = self.bumps, "bumped into a wall");
                }
            }
            Command::Select(algorithm) => {
                self.algorithm = algorithm;
                self.show_path = true;
                self.replan();
            }
            Command::TogglePath => {
                self.show_path = !self.show_path;
                if self.show_path {
                    self.replan();
                } else {
                    self.pathfinder.clear_path();
                }
            }
            Command::SetDifficulty(difficulty) => {
                if difficulty != self.difficulty {
                    info!(from = %self.difficulty, to = %difficulty, "difficulty changed");
                }
                self.difficulty = difficulty;
            }
            Command::Reset => self.reset(),
        }
    }

    /// Fresh maze, timers and counters. Algorithm, visibility and difficulty carry over.
    pub fn reset(&mut self) {
        self.maze.generate();
        self.pathfinder.clear_path();
        self.state = State::Playing;
        self.time_left = TIME_LIMIT;
        self.frame_counter = 0;
        self.shuffle_timer = 0;
        self.bumps = 0;
        if self.show_path {
            self.replan();
        }
        info!("session reset");
    }

    fn replan(&mut self) {
        let start = self.maze.player();
        let goal = self.maze.exit();
        self.pathfinder.find(self.algorithm, &self.maze, start, goal);
    }

    fn finish(&mut self, state: State) {
        self.state = state;
        info!(
            ?state,
            time_left = self.time_left,
            bumps = self.bumps,
            score = self.score(),
            "session finished"
        );
    }

    pub fn score(&self) -> i64 {
        i64::from(self.time_left) * 10 - i64::from(self.bumps) * 2
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn route(&self) -> &[Pos] {
        self.pathfinder.current_path()
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn bumps(&self) -> u32 {
        self.bumps
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn show_path(&self) -> bool {
        self.show_path
    }

    pub fn frames_until_shuffle(&self) -> u32 {
        self.difficulty
            .shuffle_interval()
            .saturating_sub(self.shuffle_timer)
    }
}
