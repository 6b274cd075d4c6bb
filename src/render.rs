//! Turns a session into draw calls against a [`Presenter`].
//!
//! The core never touches the terminal directly. Anything that can paint a grid
//! cell, a highlighted run of cells and a line of text can show the game.

use std::io;

use crossterm::style::Color;
use unicode_width::UnicodeWidthStr;

use crate::grid::{Cell, Dir, Pos};
use crate::search::Algorithm;
use crate::session::{Session, State, TIME_LIMIT};

/// Rows of HUD text drawn under the board.
pub const HUD_ROWS: usize = 8;
/// Widest HUD line, in terminal columns.
pub const HUD_COLUMNS: usize = 76;

const TIME_BAR_WIDTH: usize = 30;
const HELP_MOVE: &str = "Arrows / hjkl: move";
const HELP_KEYS: &str = "B: BFS | D: DFS | P: Toggle Path | R: Reset | E/M/H: Difficulty | Q: Quit";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextSize {
    Small,
    Normal,
    Large,
}

/// Text position in columns and rows, relative to the board's top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextPos {
    pub col: u16,
    pub row: u16,
}

impl TextPos {
    pub fn new(col: usize, row: usize) -> Self {
        Self {
            col: col as u16,
            row: row as u16,
        }
    }
}

pub trait Presenter {
    /// Text columns covered by one grid cell.
    fn cell_columns(&self) -> usize;
    fn draw_cell(&mut self, pos: Pos, color: Color) -> io::Result<()>;
    fn draw_highlighted_sequence(&mut self, route: &[Pos], color: Color) -> io::Result<()>;
    fn draw_overlay_text(
        &mut self,
        text: &str,
        at: TextPos,
        size: TextSize,
        color: Color,
    ) -> io::Result<()>;
}

pub fn wall_color() -> Color {
    Color::Blue
}

pub fn floor_color() -> Color {
    Color::Black
}

pub fn path_color() -> Color {
    Color::Yellow
}

pub fn time_bar_color(time_left: u32) -> Color {
    if time_left > 30 {
        Color::Green
    } else if time_left > 10 {
        Color::DarkYellow
    } else {
        Color::Red
    }
}

pub fn time_bar(time_left: u32) -> String {
    let filled = (TIME_BAR_WIDTH * time_left.min(TIME_LIMIT) as usize) / TIME_LIMIT as usize;
    format!(
        "[{}{}]",
        "#".repeat(filled),
        "-".repeat(TIME_BAR_WIDTH - filled)
    )
}

/// Draws one complete frame: board, guidance route, markers, HUD and banners.
pub fn draw_frame<P: Presenter>(
    session: &Session,
    confirm_quit: bool,
    out: &mut P,
) -> io::Result<()> {
    let maze = session.maze();
    for (y, row) in maze.cells().iter().enumerate() {
        for (x, cell) in row.iter().enumerate() {
            let color = match cell {
                Cell::Wall => wall_color(),
                Cell::Open => floor_color(),
            };
            out.draw_cell(Pos::new(x, y), color)?;
        }
    }

    let route = session.route();
    if session.show_path() && !route.is_empty() {
        out.draw_highlighted_sequence(route, path_color())?;
    }
    out.draw_cell(maze.exit(), Color::Red)?;
    out.draw_cell(maze.player(), Color::Green)?;

    draw_hud(session, maze.height() + 1, out)?;

    let board_cols = maze.width() * out.cell_columns();
    match session.state() {
        State::Won => {
            let lines = [
                ("ESCAPE SUCCESSFUL!".to_string(), TextSize::Large, Color::Green),
                ("You hacked the digital prison!".to_string(), TextSize::Normal, Color::White),
                ("Press R to play again".to_string(), TextSize::Normal, Color::Yellow),
                (format!("Score: {}", session.score()), TextSize::Normal, Color::Grey),
            ];
            draw_banner(&lines, board_cols, maze.height(), out)?;
        }
        State::Lost => {
            let lines = [
                ("TIME'S UP!".to_string(), TextSize::Large, Color::Red),
                ("You failed to escape...".to_string(), TextSize::Normal, Color::White),
                ("Press R to try again".to_string(), TextSize::Normal, Color::Yellow),
            ];
            draw_banner(&lines, board_cols, maze.height(), out)?;
        }
        State::Playing if confirm_quit => {
            let lines = [(
                "Quit? (y/n)".to_string(),
                TextSize::Large,
                Color::Yellow,
            )];
            draw_banner(&lines, board_cols, maze.height(), out)?;
        }
        State::Playing => {}
    }
    Ok(())
}

fn draw_hud<P: Presenter>(session: &Session, top: usize, out: &mut P) -> io::Result<()> {
    out.draw_overlay_text(
        "DIGITAL PRISON ESCAPE",
        TextPos::new(0, top),
        TextSize::Large,
        Color::White,
    )?;
    out.draw_overlay_text(HELP_MOVE, TextPos::new(0, top + 1), TextSize::Small, Color::White)?;
    out.draw_overlay_text(HELP_KEYS, TextPos::new(0, top + 2), TextSize::Small, Color::White)?;

    let algorithm = session.algorithm();
    let algorithm_color = match algorithm {
        Algorithm::Bfs => Color::Green,
        Algorithm::Dfs => Color::DarkYellow,
    };
    out.draw_overlay_text(
        &format!("Algorithm: {}", algorithm.label()),
        TextPos::new(0, top + 3),
        TextSize::Normal,
        algorithm_color,
    )?;
    out.draw_overlay_text(
        &guidance(session),
        TextPos::new(36, top + 3),
        TextSize::Normal,
        Color::Yellow,
    )?;
    out.draw_overlay_text(
        &format!("Time Left: {}", session.time_left()),
        TextPos::new(0, top + 4),
        TextSize::Normal,
        Color::Yellow,
    )?;
    out.draw_overlay_text(
        &format!("Firewall Bumps: {}", session.bumps()),
        TextPos::new(18, top + 4),
        TextSize::Normal,
        Color::Red,
    )?;
    out.draw_overlay_text(
        &format!("Difficulty: {}", session.difficulty()),
        TextPos::new(0, top + 5),
        TextSize::Normal,
        Color::Grey,
    )?;
    out.draw_overlay_text(
        &format!("{} Time Remaining", time_bar(session.time_left())),
        TextPos::new(0, top + 6),
        TextSize::Normal,
        time_bar_color(session.time_left()),
    )?;
    Ok(())
}

fn guidance(session: &Session) -> String {
    if !session.show_path() {
        return "Path: hidden".to_string();
    }
    match session.route() {
        [] => "Path: no path".to_string(),
        [_] => "Path: at exit".to_string(),
        [from, to, ..] => match Dir::towards(*from, *to) {
            Some(dir) => format!("Path: go {}", dir.label()),
            None => "Path: no path".to_string(),
        },
    }
}

fn draw_banner<P: Presenter>(
    lines: &[(String, TextSize, Color)],
    board_cols: usize,
    board_rows: usize,
    out: &mut P,
) -> io::Result<()> {
    let top = board_rows.saturating_sub(lines.len()) / 2;
    for (i, (text, size, color)) in lines.iter().enumerate() {
        let col = board_cols.saturating_sub(UnicodeWidthStr::width(text.as_str())) / 2;
        out.draw_overlay_text(text, TextPos::new(col, top + i), *size, *color)?;
    }
    Ok(())
}
