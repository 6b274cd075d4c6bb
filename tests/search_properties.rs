use prison_escape::grid::{Maze, Pos};
use prison_escape::search::{find_path_bfs, find_path_dfs, Algorithm, Pathfinder};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_layout(rng: &mut StdRng, width: usize, height: usize, wall_ratio: f64) -> Vec<String> {
    (0..height)
        .map(|y| {
            (0..width)
                .map(|x| {
                    let border = x == 0 || y == 0 || x == width - 1 || y == height - 1;
                    if border || rng.gen_bool(wall_ratio) {
                        '#'
                    } else {
                        '.'
                    }
                })
                .collect()
        })
        .collect()
}

fn random_maze(seed: u64) -> Maze {
    let mut rng = StdRng::seed_from_u64(seed);
    let width = rng.gen_range(5..12);
    let height = rng.gen_range(5..12);
    let rows = random_layout(&mut rng, width, height, 0.35);
    let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
    Maze::from_layout(&rows).unwrap()
}

/// Step counts by repeated relaxation, independent of any queue order.
fn relaxed_distance(maze: &Maze, start: Pos, goal: Pos) -> Option<usize> {
    let mut dist = vec![vec![usize::MAX; maze.width()]; maze.height()];
    dist[start.y][start.x] = 0;
    let mut changed = true;
    while changed {
        changed = false;
        for y in 0..maze.height() {
            for x in 0..maze.width() {
                let here = Pos::new(x, y);
                if !maze.is_open(here) || dist[y][x] == usize::MAX {
                    continue;
                }
                for next in maze.neighbors(here) {
                    if dist[y][x] + 1 < dist[next.y][next.x] {
                        dist[next.y][next.x] = dist[y][x] + 1;
                        changed = true;
                    }
                }
            }
        }
    }
    let d = dist[goal.y][goal.x];
    (d != usize::MAX).then_some(d)
}

fn assert_walkable(maze: &Maze, route: &[Pos], start: Pos, goal: Pos) {
    assert_eq!(route.first(), Some(&start));
    assert_eq!(route.last(), Some(&goal));
    for pair in route.windows(2) {
        assert!(pair[0].is_adjacent(pair[1]), "{:?} -> {:?}", pair[0], pair[1]);
    }
    for pos in route {
        assert!(maze.is_open(*pos));
    }
    let mut seen = route.to_vec();
    seen.sort_by_key(|p| (p.y, p.x));
    seen.dedup();
    assert_eq!(seen.len(), route.len(), "route revisits a cell");
}

#[test]
fn bfs_matches_relaxed_distance() {
    for seed in 0..200 {
        let maze = random_maze(seed);
        let (start, goal) = (maze.start(), maze.exit());
        let route = find_path_bfs(&maze, start, goal);
        match relaxed_distance(&maze, start, goal) {
            Some(steps) => {
                assert_eq!(route.len(), steps + 1, "seed {}", seed);
                assert_walkable(&maze, &route, start, goal);
            }
            None => assert!(route.is_empty(), "seed {}", seed),
        }
    }
}

#[test]
fn dfs_finds_a_route_whenever_bfs_does_and_never_a_shorter_one() {
    for seed in 0..200 {
        let maze = random_maze(seed);
        let (start, goal) = (maze.start(), maze.exit());
        let bfs = find_path_bfs(&maze, start, goal);
        let dfs = find_path_dfs(&maze, start, goal);
        assert_eq!(bfs.is_empty(), dfs.is_empty(), "seed {}", seed);
        if !dfs.is_empty() {
            assert!(bfs.len() <= dfs.len(), "seed {}", seed);
            assert_walkable(&maze, &dfs, start, goal);
        }
    }
}

#[test]
fn searching_twice_gives_the_same_route() {
    for seed in 0..50 {
        let maze = random_maze(seed);
        let (start, goal) = (maze.start(), maze.exit());
        assert_eq!(find_path_bfs(&maze, start, goal), find_path_bfs(&maze, start, goal));
        assert_eq!(find_path_dfs(&maze, start, goal), find_path_dfs(&maze, start, goal));
    }
}

#[test]
fn sealed_exit_has_no_route() {
    let maze = Maze::from_layout(&[
        "#######", //
        "#.....#",
        "#...###",
        "#...#.#",
        "#######",
    ])
    .unwrap();
    assert!(find_path_bfs(&maze, maze.start(), maze.exit()).is_empty());
    assert!(find_path_dfs(&maze, maze.start(), maze.exit()).is_empty());
}

#[test]
fn fresh_board_routes_corner_to_corner() {
    let maze = Maze::new(15, 15);
    let mut finder = Pathfinder::new();

    let route = finder.find(Algorithm::Bfs, &maze, maze.start(), maze.exit()).to_vec();
    assert_eq!(route.len(), 12 + 12 + 1);
    assert_walkable(&maze, &route, Pos::new(1, 1), Pos::new(13, 13));

    let route = finder.find(Algorithm::Dfs, &maze, maze.start(), maze.exit()).to_vec();
    assert!(route.len() >= 25);
    assert_walkable(&maze, &route, Pos::new(1, 1), Pos::new(13, 13));
    assert_eq!(finder.current_path(), &route[..]);
}
