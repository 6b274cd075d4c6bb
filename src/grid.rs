//! Maze grid: cell matrix, start/exit/player positions and move validation.

use thiserror::Error;

pub const MIN_DIMENSION: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Wall,
    Open,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pos {
    pub x: usize,
    pub y: usize,
}

impl Pos {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Cell reached by a unit step, or `None` when it would leave the first quadrant.
    pub fn offset(self, dx: isize, dy: isize) -> Option<Pos> {
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        Some(Pos { x, y })
    }

    pub fn is_adjacent(self, other: Pos) -> bool {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y) == 1
    }
}

/// Neighbour order is part of the search contract: ties always break up, right, down, left.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dir {
    Up,
    Right,
    Down,
    Left,
}

impl Dir {
    pub const ALL: [Dir; 4] = [Dir::Up, Dir::Right, Dir::Down, Dir::Left];

    pub fn delta(self) -> (isize, isize) {
        match self {
            Dir::Up => (0, -1),
            Dir::Right => (1, 0),
            Dir::Down => (0, 1),
            Dir::Left => (-1, 0),
        }
    }

    /// Direction of a single step from `from` to `to`, if they are 4-adjacent.
    pub fn towards(from: Pos, to: Pos) -> Option<Dir> {
        Dir::ALL.into_iter().find(|dir| {
            let (dx, dy) = dir.delta();
            from.offset(dx, dy) == Some(to)
        })
    }

    pub fn label(self) -> &'static str {
        match self {
            Dir::Up => "up",
            Dir::Right => "right",
            Dir::Down => "down",
            Dir::Left => "left",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("layout is smaller than {MIN_DIMENSION}x{MIN_DIMENSION}")]
    TooSmall,
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown glyph {glyph:?} at ({x}, {y})")]
    UnknownGlyph { glyph: char, x: usize, y: usize },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    width: usize,
    height: usize,
    grid: Vec<Vec<Cell>>,
    player: Pos,
    exit: Pos,
}

impl Maze {
    /// Builds a `width` x `height` maze and carves the lattice pattern into it.
    pub fn new(width: usize, height: usize) -> Self {
        let width = width.max(MIN_DIMENSION);
        let height = height.max(MIN_DIMENSION);
        let mut maze = Self {
            width,
            height,
            grid: vec![vec![Cell::Wall; width]; height],
            player: Pos::new(1, 1),
            exit: Pos::new(width - 2, height - 2),
        };
        maze.generate();
        maze
    }

    /// Parses rows of `#` (wall) and `.` or space (open). Start and exit are forced open.
    pub fn from_layout(rows: &[&str]) -> Result<Self, LayoutError> {
        let height = rows.len();
        let width = rows.first().map(|r| r.chars().count()).unwrap_or(0);
        if width < MIN_DIMENSION || height < MIN_DIMENSION {
            return Err(LayoutError::TooSmall);
        }

        let mut grid = Vec::with_capacity(height);
        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(LayoutError::Ragged {
                    row: y,
                    expected: width,
                    found,
                });
            }
            let mut cells = Vec::with_capacity(width);
            for (x, glyph) in row.chars().enumerate() {
                let cell = match glyph {
                    '#' => Cell::Wall,
                    '.' | ' ' => Cell::Open,
                    _ => return Err(LayoutError::UnknownGlyph { glyph, x, y }),
                };
                cells.push(cell);
            }
            grid.push(cells);
        }

        let mut maze = Self {
            width,
            height,
            grid,
            player: Pos::new(1, 1),
            exit: Pos::new(width - 2, height - 2),
        };
        maze.open_endpoints();
        Ok(maze)
    }

    /// Resets every cell to wall, then opens odd lattice cells with corridors right and down.
    pub fn generate(&mut self) {
        for row in self.grid.iter_mut() {
            row.fill(Cell::Wall);
        }
        for y in (1..self.height - 1).step_by(2) {
            for x in (1..self.width - 1).step_by(2) {
                self.grid[y][x] = Cell::Open;
                if x + 2 < self.width - 1 {
                    self.grid[y][x + 1] = Cell::Open;
                }
                if y + 2 < self.height - 1 {
                    self.grid[y + 1][x] = Cell::Open;
                }
            }
        }
        self.open_endpoints();
        self.player = self.start();
        self.exit = Pos::new(self.width - 2, self.height - 2);
    }

    fn open_endpoints(&mut self) {
        let start = self.start();
        let exit = Pos::new(self.width - 2, self.height - 2);
        self.grid[start.y][start.x] = Cell::Open;
        self.grid[exit.y][exit.x] = Cell::Open;
    }

    pub fn is_valid_move(&self, x: isize, y: isize) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        self.is_open(Pos::new(x as usize, y as usize))
    }

    pub fn is_open(&self, pos: Pos) -> bool {
        self.cell(pos) == Some(Cell::Open)
    }

    /// Moves the player one step. Returns `false` and leaves the player in place when blocked.
    pub fn move_player(&mut self, dx: isize, dy: isize) -> bool {
        let nx = self.player.x as isize + dx;
        let ny = self.player.y as isize + dy;
        if !self.is_valid_move(nx, ny) {
            return false;
        }
        self.player = Pos::new(nx as usize, ny as usize);
        true
    }

    pub fn step_player(&mut self, dir: Dir) -> bool {
        let (dx, dy) = dir.delta();
        self.move_player(dx, dy)
    }

    /// Open 4-neighbours of `pos`, computed on demand.
    pub fn neighbors(&self, pos: Pos) -> impl Iterator<Item = Pos> + '_ {
        Dir::ALL.into_iter().filter_map(move |dir| {
            let (dx, dy) = dir.delta();
            pos.offset(dx, dy).filter(|next| self.is_open(*next))
        })
    }

    pub fn cell(&self, pos: Pos) -> Option<Cell> {
        self.grid.get(pos.y).and_then(|row| row.get(pos.x)).copied()
    }

    pub(crate) fn set_cell(&mut self, pos: Pos, cell: Cell) {
        self.grid[pos.y][pos.x] = cell;
    }

    pub fn cells(&self) -> &[Vec<Cell>] {
        &self.grid
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn start(&self) -> Pos {
        Pos::new(1, 1)
    }

    pub fn player(&self) -> Pos {
        self.player
    }

    pub fn exit(&self) -> Pos {
        self.exit
    }

    #[cfg(test)]
    pub(crate) fn place_player(&mut self, pos: Pos) {
        self.player = pos;
    }

    pub fn key(&self, pos: Pos) -> usize {
        pos.y * self.width + pos.x
    }

    pub fn pos_of(&self, key: usize) -> Pos {
        Pos::new(key % self.width, key / self.width)
    }

    pub fn open_count(&self) -> usize {
        self.grid
            .iter()
            .flatten()
            .filter(|c| **c == Cell::Open)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_maze_keeps_start_and_exit_open() {
        let maze = Maze::new(15, 15);
        assert_eq!(maze.start(), Pos::new(1, 1));
        assert_eq!(maze.exit(), Pos::new(13, 13));
        assert_eq!(maze.player(), maze.start());
        assert!(maze.is_open(maze.start()));
        assert!(maze.is_open(maze.exit()));
    }

    #[test]
    fn border_is_solid_after_generation() {
        let maze = Maze::new(15, 15);
        for x in 0..15 {
            assert_eq!(maze.cell(Pos::new(x, 0)), Some(Cell::Wall));
            assert_eq!(maze.cell(Pos::new(x, 14)), Some(Cell::Wall));
        }
        for y in 0..15 {
            assert_eq!(maze.cell(Pos::new(0, y)), Some(Cell::Wall));
            assert_eq!(maze.cell(Pos::new(14, y)), Some(Cell::Wall));
        }
    }

    #[test]
    fn every_lattice_cell_has_a_corridor() {
        let maze = Maze::new(15, 15);
        for y in (1..14).step_by(2) {
            for x in (1..14).step_by(2) {
                let pos = Pos::new(x, y);
                assert!(maze.is_open(pos), "lattice cell {:?} closed", pos);
                assert!(
                    maze.neighbors(pos).next().is_some(),
                    "lattice cell {:?} isolated",
                    pos
                );
            }
        }
        // Even/even cells are never carved.
        assert!(!maze.is_open(Pos::new(2, 2)));
    }

    #[test]
    fn generate_resets_mutations_and_player() {
        let mut maze = Maze::new(15, 15);
        let pristine = maze.clone();
        assert!(maze.move_player(1, 0));
        maze.set_cell(Pos::new(2, 2), Cell::Open);
        maze.set_cell(Pos::new(3, 1), Cell::Wall);
        maze.generate();
        assert_eq!(maze, pristine);
    }

    #[test]
    fn tiny_requests_are_clamped() {
        let maze = Maze::new(1, 0);
        assert_eq!((maze.width(), maze.height()), (3, 3));
        assert_eq!(maze.start(), maze.exit());
        assert!(maze.is_open(maze.start()));
    }

    #[test]
    fn valid_move_checks_bounds_and_walls() {
        let maze = Maze::new(15, 15);
        assert!(maze.is_valid_move(1, 1));
        assert!(!maze.is_valid_move(0, 1));
        assert!(!maze.is_valid_move(-1, 1));
        assert!(!maze.is_valid_move(1, -1));
        assert!(!maze.is_valid_move(15, 1));
        assert!(!maze.is_valid_move(1, 15));
        assert!(!maze.is_valid_move(2, 2));
    }

    #[test]
    fn bump_off_left_edge_leaves_player_in_place() {
        let mut maze = Maze::new(15, 15);
        assert!(!maze.move_player(-1, 0));
        assert_eq!(maze.player(), Pos::new(1, 1));
        assert!(maze.move_player(1, 0));
        assert_eq!(maze.player(), Pos::new(2, 1));
    }

    #[test]
    fn neighbors_follow_up_right_down_left() {
        let maze = Maze::from_layout(&["#####", "#...#", "#...#", "#...#", "#####"]).unwrap();
        let around: Vec<Pos> = maze.neighbors(Pos::new(2, 2)).collect();
        assert_eq!(
            around,
            vec![
                Pos::new(2, 1),
                Pos::new(3, 2),
                Pos::new(2, 3),
                Pos::new(1, 2)
            ]
        );
        let corner: Vec<Pos> = maze.neighbors(Pos::new(1, 1)).collect();
        assert_eq!(corner, vec![Pos::new(2, 1), Pos::new(1, 2)]);
    }

    #[test]
    fn layout_errors_are_reported() {
        assert_eq!(Maze::from_layout(&["###"]), Err(LayoutError::TooSmall));
        assert_eq!(
            Maze::from_layout(&["###", "#.", "###"]),
            Err(LayoutError::Ragged {
                row: 1,
                expected: 3,
                found: 2
            })
        );
        assert_eq!(
            Maze::from_layout(&["###", "#x#", "###"]),
            Err(LayoutError::UnknownGlyph { glyph: 'x', x: 1, y: 1 })
        );
    }

    #[test]
    fn layout_forces_endpoints_open() {
        let maze = Maze::from_layout(&["#####", "#####", "#####", "#####", "#####"]).unwrap();
        assert!(maze.is_open(Pos::new(1, 1)));
        assert!(maze.is_open(Pos::new(3, 3)));
        assert_eq!(maze.open_count(), 2);
    }

    #[test]
    fn towards_names_unit_steps_only() {
        let from = Pos::new(3, 3);
        assert_eq!(Dir::towards(from, Pos::new(3, 2)), Some(Dir::Up));
        assert_eq!(Dir::towards(from, Pos::new(2, 3)), Some(Dir::Left));
        assert_eq!(Dir::towards(from, Pos::new(4, 4)), None);
        assert_eq!(Dir::towards(from, from), None);
        assert_eq!(Dir::towards(Pos::new(0, 0), Pos::new(0, 1)), Some(Dir::Down));
    }

    #[test]
    fn keys_round_trip_through_positions() {
        let maze = Maze::new(15, 9);
        let pos = Pos::new(7, 4);
        assert_eq!(maze.key(pos), 4 * 15 + 7);
        assert_eq!(maze.pos_of(maze.key(pos)), pos);
    }
}
