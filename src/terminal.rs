//! `crossterm` presenter: a double-buffered board plus HUD text, redrawn by diff.

use std::io::{self, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{ExecutableCommand, QueueableCommand};
use unicode_width::UnicodeWidthStr;

use crate::grid::Pos;
use crate::render::{Presenter, TextPos, TextSize, HUD_COLUMNS, HUD_ROWS};

pub const CELL_W: usize = 2;

/// Raw mode, alternate screen and hidden cursor for as long as the guard lives.
pub struct TerminalGuard<W: Write> {
    out: W,
}

impl<W: Write> TerminalGuard<W> {
    pub fn enter(out: W) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        // From here on, dropping the guard undoes whatever succeeded.
        let mut guard = Self { out };
        guard.out.execute(EnterAlternateScreen)?;
        guard.out.execute(Hide)?;
        Ok(guard)
    }

    fn restore(&mut self) -> io::Result<()> {
        self.out.execute(Show)?;
        self.out.execute(LeaveAlternateScreen)?;
        terminal::disable_raw_mode()
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Glyph {
    Block,
    Trail,
}

#[derive(Clone, Copy, PartialEq)]
struct Tile {
    glyph: Glyph,
    color: Color,
}

impl Tile {
    const BLANK: Tile = Tile {
        glyph: Glyph::Block,
        color: Color::Reset,
    };
}

#[derive(Clone, PartialEq)]
struct Span {
    text: String,
    at: TextPos,
    size: TextSize,
    color: Color,
}

pub struct Screen<W: Write> {
    out: W,
    width: usize,
    height: usize,
    front: Vec<Tile>,
    back: Vec<Tile>,
    spans: Vec<Span>,
    last_spans: Vec<Span>,
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
}

impl<W: Write> Screen<W> {
    pub fn new(out: W, width: usize, height: usize) -> Self {
        Self {
            out,
            width,
            height,
            front: vec![Tile::BLANK; width * height],
            back: vec![Tile::BLANK; width * height],
            spans: Vec::new(),
            last_spans: Vec::new(),
            needs_full: true,
            origin_x: 0,
            origin_y: 0,
        }
    }

    /// Forces the next present to repaint everything, e.g. after a resize.
    pub fn invalidate(&mut self) {
        self.needs_full = true;
    }

    pub fn present(&mut self) -> io::Result<()> {
        let (term_w, term_h) = terminal::size()?;
        self.present_sized(term_w, term_h)
    }

    fn needed(&self) -> (u16, u16) {
        let w = (self.width * CELL_W).max(HUD_COLUMNS);
        let h = self.height + HUD_ROWS;
        (w as u16, h as u16)
    }

    pub fn present_sized(&mut self, term_w: u16, term_h: u16) -> io::Result<()> {
        let (needed_w, needed_h) = self.needed();
        self.out.queue(MoveTo(0, 0))?;

        if term_w < needed_w || term_h < needed_h {
            self.out.queue(Clear(ClearType::All))?;
            let msg = format!(
                "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
                needed_w, needed_h, term_w, term_h
            );
            self.out.queue(Print(msg))?;
            self.out.flush()?;
            self.spans.clear();
            self.needs_full = true;
            return Ok(());
        }

        let origin_x = (term_w - needed_w) / 2;
        let origin_y = (term_h - needed_h) / 2;
        if origin_x != self.origin_x || origin_y != self.origin_y {
            self.origin_x = origin_x;
            self.origin_y = origin_y;
            self.needs_full = true;
        }

        // Text that used to sit on the board may have hidden tiles that must come back.
        let board_rows = self.height as u16;
        if self
            .last_spans
            .iter()
            .any(|s| s.at.row < board_rows && !self.spans.contains(s))
        {
            self.needs_full = true;
        }
        if self.needs_full {
            self.out.queue(Clear(ClearType::All))?;
        }

        let mut tiles_drawn = false;
        for idx in 0..self.back.len() {
            let tile = self.back[idx];
            if self.needs_full || tile != self.front[idx] {
                self.front[idx] = tile;
                self.draw_tile(idx % self.width, idx / self.width, tile)?;
                tiles_drawn = true;
            }
        }

        let spans = std::mem::take(&mut self.spans);
        let mut rows: Vec<u16> = spans
            .iter()
            .chain(self.last_spans.iter())
            .map(|s| s.at.row)
            .collect();
        rows.sort_unstable();
        rows.dedup();
        for row in rows {
            let now: Vec<&Span> = spans.iter().filter(|s| s.at.row == row).collect();
            let before: Vec<&Span> = self.last_spans.iter().filter(|s| s.at.row == row).collect();
            let on_board = row < board_rows;
            let stale = now != before;
            if !(self.needs_full || stale || (on_board && tiles_drawn)) {
                continue;
            }
            if !on_board {
                self.out
                    .queue(MoveTo(self.origin_x, self.origin_y + row))?
                    .queue(Clear(ClearType::UntilNewLine))?;
            }
            for span in now {
                self.draw_span(span)?;
            }
        }
        self.last_spans = spans;
        self.needs_full = false;

        self.out.flush()?;
        Ok(())
    }

    fn draw_tile(&mut self, x: usize, y: usize, tile: Tile) -> io::Result<()> {
        let text = match tile.glyph {
            Glyph::Block => "██",
            Glyph::Trail => "▒▒",
        };
        let x_pos = self.origin_x + (x * CELL_W) as u16;
        let y_pos = self.origin_y + y as u16;
        self.out.queue(MoveTo(x_pos, y_pos))?;
        self.out.queue(SetForegroundColor(tile.color))?;
        self.out.queue(Print(text))?;
        let w = UnicodeWidthStr::width(text);
        if w < CELL_W {
            for _ in 0..(CELL_W - w) {
                self.out.queue(Print(' '))?;
            }
        }
        self.out.queue(ResetColor)?;
        Ok(())
    }

    fn draw_span(&mut self, span: &Span) -> io::Result<()> {
        self.out
            .queue(MoveTo(self.origin_x + span.at.col, self.origin_y + span.at.row))?;
        match span.size {
            TextSize::Large => {
                self.out.queue(SetAttribute(Attribute::Bold))?;
            }
            TextSize::Small => {
                self.out.queue(SetAttribute(Attribute::Dim))?;
            }
            TextSize::Normal => {}
        }
        self.out.queue(SetForegroundColor(span.color))?;
        self.out.queue(Print(&span.text))?;
        self.out.queue(SetAttribute(Attribute::Reset))?;
        self.out.queue(ResetColor)?;
        Ok(())
    }

    fn index(&self, pos: Pos) -> Option<usize> {
        (pos.x < self.width && pos.y < self.height).then(|| pos.y * self.width + pos.x)
    }
}

impl<W: Write> Presenter for Screen<W> {
    fn cell_columns(&self) -> usize {
        CELL_W
    }

    fn draw_cell(&mut self, pos: Pos, color: Color) -> io::Result<()> {
        if let Some(idx) = self.index(pos) {
            self.back[idx] = Tile {
                glyph: Glyph::Block,
                color,
            };
        }
        Ok(())
    }

    fn draw_highlighted_sequence(&mut self, route: &[Pos], color: Color) -> io::Result<()> {
        for pos in route {
            if let Some(idx) = self.index(*pos) {
                self.back[idx] = Tile {
                    glyph: Glyph::Trail,
                    color,
                };
            }
        }
        Ok(())
    }

    fn draw_overlay_text(
        &mut self,
        text: &str,
        at: TextPos,
        size: TextSize,
        color: Color,
    ) -> io::Result<()> {
        self.spans.push(Span {
            text: text.to_string(),
            at,
            size,
            color,
        });
        Ok(())
    }
}
