//! Breadth-first and depth-first route search over the maze's implicit grid graph.
//!
//! Both strategies run the same loop and differ only in which end of the frontier
//! they take from. Cells are marked visited when discovered, and each discovery
//! records its parent in a key table that doubles as the visited set.

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::error::ConfigError;
use crate::grid::{Maze, Pos};

/// Start-to-goal cells, inclusive. Empty when the goal is unreachable.
pub type Route = Vec<Pos>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Bfs,
    Dfs,
}

impl Algorithm {
    pub fn label(self) -> &'static str {
        match self {
            Algorithm::Bfs => "BFS (Shortest Path)",
            Algorithm::Dfs => "DFS (Exploration)",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Bfs => f.write_str("bfs"),
            Algorithm::Dfs => f.write_str("dfs"),
        }
    }
}

impl FromStr for Algorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bfs" => Ok(Algorithm::Bfs),
            "dfs" => Ok(Algorithm::Dfs),
            _ => Err(ConfigError::UnknownAlgorithm(s.to_string())),
        }
    }
}

trait Frontier: Default {
    fn put(&mut self, key: usize);
    fn take(&mut self) -> Option<usize>;
}

/// First in, first out.
#[derive(Default)]
struct Queue(VecDeque<usize>);

impl Frontier for Queue {
    fn put(&mut self, key: usize) {
        self.0.push_back(key);
    }

    fn take(&mut self) -> Option<usize> {
        self.0.pop_front()
    }
}

/// Last in, first out.
#[derive(Default)]
struct Stack(Vec<usize>);

impl Frontier for Stack {
    fn put(&mut self, key: usize) {
        self.0.push(key);
    }

    fn take(&mut self) -> Option<usize> {
        self.0.pop()
    }
}

fn search<F: Frontier>(maze: &Maze, start: Pos, goal: Pos) -> (Route, usize) {
    // A walled start still expands into its open neighbours.
    if maze.cell(start).is_none() || !maze.is_open(goal) {
        return (Route::new(), 0);
    }

    let start_key = maze.key(start);
    let goal_key = maze.key(goal);
    let mut parents: FxHashMap<usize, usize> = FxHashMap::default();
    let mut frontier = F::default();
    parents.insert(start_key, start_key);
    frontier.put(start_key);

    let mut found = false;
    while let Some(key) = frontier.take() {
        if key == goal_key {
            found = true;
            break;
        }
        for next in maze.neighbors(maze.pos_of(key)) {
            let next_key = maze.key(next);
            if parents.contains_key(&next_key) {
                continue;
            }
            parents.insert(next_key, key);
            frontier.put(next_key);
        }
    }

    let visited = parents.len();
    if !found {
        return (Route::new(), visited);
    }

    let mut route = Route::new();
    let mut key = goal_key;
    loop {
        route.push(maze.pos_of(key));
        if key == start_key {
            break;
        }
        key = parents[&key];
    }
    route.reverse();
    (route, visited)
}

pub fn find_path_bfs(maze: &Maze, start: Pos, goal: Pos) -> Route {
    run(Algorithm::Bfs, maze, start, goal)
}

pub fn find_path_dfs(maze: &Maze, start: Pos, goal: Pos) -> Route {
    run(Algorithm::Dfs, maze, start, goal)
}

fn run(algorithm: Algorithm, maze: &Maze, start: Pos, goal: Pos) -> Route {
    let (route, visited) = match algorithm {
        Algorithm::Bfs => search::<Queue>(maze, start, goal),
        Algorithm::Dfs => search::<Stack>(maze, start, goal),
    };
    debug!(
        %algorithm,
        from = ?start,
        to = ?goal,
        len = route.len(),
        visited,
        "route search finished"
    );
    route
}

/// Owns the guidance route shown to the player.
#[derive(Debug, Default, Clone)]
pub struct Pathfinder {
    current: Route,
}

impl Pathfinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the cached route with a fresh search, even when the result is empty.
    pub fn find(&mut self, algorithm: Algorithm, maze: &Maze, start: Pos, goal: Pos) -> &[Pos] {
        self.current = run(algorithm, maze, start, goal);
        &self.current
    }

    pub fn find_path_bfs(&mut self, maze: &Maze, start: Pos, goal: Pos) -> &[Pos] {
        self.find(Algorithm::Bfs, maze, start, goal)
    }

    pub fn find_path_dfs(&mut self, maze: &Maze, start: Pos, goal: Pos) -> &[Pos] {
        self.find(Algorithm::Dfs, maze, start, goal)
    }

    pub fn clear_path(&mut self) {
        self.current.clear();
    }

    pub fn current_path(&self) -> &[Pos] {
        &self.current
    }
}
