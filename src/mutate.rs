//! Runtime wall shuffling.
//!
//! Every interior cell gets an independent coin flip each shuffle. Walls open more
//! readily than corridors close, so repeated shuffles do not drift toward a solid board.

use rand::Rng;
use tracing::debug;

use crate::grid::{Cell, Maze, Pos};

/// Wall -> open with probability 1 / `WALL_OPEN_ODDS`.
pub const WALL_OPEN_ODDS: u32 = 10;
/// Open -> wall with probability 1 / `OPEN_CLOSE_ODDS`.
pub const OPEN_CLOSE_ODDS: u32 = 15;

/// Perturbs the interior of `maze` in place and returns the number of flipped cells.
///
/// The border ring, start and exit are never touched. The player's cell is not
/// special: it may close under the player, who can still step out of it.
pub fn shuffle_walls(maze: &mut Maze, rng: &mut impl Rng) -> usize {
    let protected = [maze.start(), maze.exit()];
    let mut flipped = 0;
    for y in 1..maze.height() - 1 {
        for x in 1..maze.width() - 1 {
            let pos = Pos::new(x, y);
            if protected.contains(&pos) {
                continue;
            }
            let next = match maze.cell(pos) {
                Some(Cell::Wall) if rng.gen_ratio(1, WALL_OPEN_ODDS) => Cell::Open,
                Some(Cell::Open) if rng.gen_ratio(1, OPEN_CLOSE_ODDS) => Cell::Wall,
                _ => continue,
            };
            maze.set_cell(pos, next);
            flipped += 1;
        }
    }
    debug!(flipped, open = maze.open_count(), "shuffled walls");
    flipped
}
