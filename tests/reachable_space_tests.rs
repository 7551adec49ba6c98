//! Reachable-space estimator tests, checked against a brute-force component labelling

mod common;

use common::{board, c, snake};
use contour_snake::grid::Grid;
use contour_snake::space;
use contour_snake::types::{Battlesnake, Coord, Direction};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Component sizes by repeated min-label propagation, independent of any search order
fn brute_force_area(grid: &Grid, origin: Coord) -> usize {
    let (w, h) = (grid.width(), grid.height());
    let idx = |p: Coord| (p.y * w + p.x) as usize;
    let mut label: Vec<Option<usize>> = (0..w * h)
        .map(|i| {
            let p = Coord { x: i % w, y: i / w };
            if grid.is_passable(p) {
                Some(i as usize)
            } else {
                None
            }
        })
        .collect();

    let mut changed = true;
    while changed {
        changed = false;
        for y in 0..h {
            for x in 0..w {
                let p = c(x, y);
                let mine = match label[idx(p)] {
                    Some(l) => l,
                    None => continue,
                };
                for dir in Direction::all().iter() {
                    let n = dir.apply(&p);
                    if n.x < 0 || n.y < 0 || n.x >= w || n.y >= h {
                        continue;
                    }
                    if let Some(theirs) = label[idx(n)] {
                        if theirs < mine {
                            label[idx(p)] = Some(theirs);
                            changed = true;
                        }
                    }
                }
            }
        }
    }

    let target = label[idx(origin)];
    label.iter().filter(|l| **l == target).count()
}

fn random_rival(rng: &mut StdRng, width: i32, height: i32, segments: usize) -> Battlesnake {
    let mut body: Vec<(i32, i32)> = Vec::new();
    while body.len() < segments {
        let cell = (rng.random_range(0..width), rng.random_range(0..height));
        if !body.contains(&cell) && cell != (0, 0) {
            body.push(cell);
        }
    }
    snake("rival", &body, 90)
}

#[test]
fn test_area_matches_brute_force_components() {
    for seed in 0..25u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let me = snake("me", &[(0, 0), (0, 0), (0, 0)], 90);
        let rival = random_rival(&mut rng, 7, 7, 14);
        let food = [(rng.random_range(0..7), rng.random_range(0..7))];
        let b = board(7, 7, &food, &me, &[rival]);
        let grid = Grid::build(&b, &me);

        for y in 0..7 {
            for x in 0..7 {
                let origin = c(x, y);
                if !grid.is_passable(origin) {
                    continue;
                }
                let area = space::area(&grid, origin);
                assert!(area >= 1);
                assert_eq!(
                    area,
                    brute_force_area(&grid, origin),
                    "seed {} origin ({}, {})",
                    seed,
                    x,
                    y
                );
            }
        }
    }
}

#[test]
fn test_enclosed_pocket() {
    // Own body walls off the left column
    let me = snake("me", &[(1, 2), (1, 3), (1, 4), (2, 4), (3, 4)], 90);
    let rival = snake("rival", &[(1, 1), (1, 0), (2, 0)], 90);
    let b = board(5, 5, &[], &me, &[rival]);
    let grid = Grid::build(&b, &me);

    assert_eq!(space::area(&grid, c(0, 2)), 5);
    assert_eq!(space::area(&grid, c(2, 2)), 14);
}

#[test]
fn test_off_board_origin_has_no_area() {
    let me = snake("me", &[(0, 0), (0, 0), (0, 0)], 90);
    let grid = Grid::build(&board(3, 3, &[], &me, &[]), &me);

    assert_eq!(space::area(&grid, c(-1, 0)), 0);
    assert_eq!(space::area(&grid, c(0, 3)), 0);
    assert_eq!(space::area(&grid, c(1, 1)), 8);
}
