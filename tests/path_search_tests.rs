//! Bounded-depth weighted path search tests

mod common;

use common::{board, c, snake};
use contour_snake::config::Config;
use contour_snake::grid::Grid;
use contour_snake::path_search::search;
use contour_snake::types::{Battlesnake, Board, Direction};
use contour_snake::weights::WeightField;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

fn field_for(b: &Board, me: &Battlesnake) -> WeightField {
    let grid = Grid::build(b, me);
    WeightField::compute(&grid, me, &Config::default_hardcoded().weights)
}

#[test]
fn test_hungry_snake_paths_toward_food() {
    let me = snake("me", &[(5, 5), (5, 5), (5, 5)], 10);
    let b = board(11, 11, &[(8, 5)], &me, &[]);
    let field = field_for(&b, &me);

    let outcome = search(&field, me.head, 3).expect("open board has moves");
    assert_eq!(outcome.direction, Direction::Right);
    let cells: Vec<_> = outcome.path.iter().map(|s| s.coord).collect();
    assert_eq!(cells, vec![c(6, 5), c(7, 5), c(8, 5)]);

    let summed: f64 = outcome.path.iter().map(|s| s.weight).sum();
    assert!((summed - outcome.total_weight).abs() < 1e-9);
}

#[test]
fn test_symmetric_board_breaks_ties_by_direction_order() {
    let me = snake("me", &[(5, 5), (5, 5), (5, 5)], 100);
    let b = board(11, 11, &[], &me, &[]);
    let field = field_for(&b, &me);

    let outcome = search(&field, me.head, 6).unwrap();
    assert_eq!(outcome.direction, Direction::Up);
    assert_eq!(outcome.total_weight, 0.0);
}

#[test]
fn test_depth_one_picks_cheapest_neighbor() {
    // Down sits on the outer ring, the sides touch the corner table, up is one ring in
    let me = snake("me", &[(3, 1), (3, 1), (3, 1)], 100);
    let b = board(7, 7, &[], &me, &[]);
    let field = field_for(&b, &me);

    let outcome = search(&field, me.head, 1).unwrap();
    assert_eq!(outcome.path.len(), 1);
    assert_eq!(outcome.total_weight, field.get(outcome.path[0].coord).unwrap());
    for dir in Direction::all().iter() {
        if let Some(w) = field.get(dir.apply(&me.head)) {
            assert!(outcome.total_weight <= w);
        }
    }
}

#[test]
fn test_boxed_in_head_has_no_outcome() {
    let me = snake("me", &[(0, 0), (0, 1), (1, 1), (1, 0), (2, 0)], 100);
    let b = board(4, 4, &[], &me, &[]);
    let field = field_for(&b, &me);

    assert!(search(&field, me.head, 6).is_none());
}

#[test]
fn test_never_enters_lethal_cells_and_paths_are_simple() {
    for seed in 0..20u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut body = Vec::new();
        while body.len() < 10 {
            let cell = (rng.random_range(0..8), rng.random_range(0..8));
            if !body.contains(&cell) && cell != (4, 4) {
                body.push(cell);
            }
        }
        let rival = snake("rival", &body, 90);
        let me = snake("me", &[(4, 4), (4, 4), (4, 4)], rng.random_range(1..100));
        let b = board(8, 8, &[(0, 7), (7, 0)], &me, &[rival]);
        let field = field_for(&b, &me);

        let any_safe = Direction::all()
            .iter()
            .any(|d| !field.is_lethal(d.apply(&me.head)));

        match search(&field, me.head, 5) {
            Some(outcome) => {
                assert!(any_safe);
                assert_eq!(outcome.path[0].coord, outcome.direction.apply(&me.head));
                assert!(outcome.path.len() <= 5);

                let mut seen = HashSet::new();
                seen.insert(me.head);
                for step in &outcome.path {
                    assert!(!field.is_lethal(step.coord), "seed {} entered lethal cell", seed);
                    assert!(seen.insert(step.coord), "seed {} revisited a cell", seed);
                }
            }
            None => assert!(!any_safe, "seed {} had a safe move but no outcome", seed),
        }
    }
}

#[test]
fn test_depth_one_lands_on_inner_ring() {
    let me = snake("me", &[(3, 1), (3, 1), (3, 1)], 100);
    let b = board(7, 7, &[], &me, &[]);
    let field = field_for(&b, &me);

    let outcome = search(&field, me.head, 1).unwrap();
    assert_eq!(outcome.direction, Direction::Up);
    assert_eq!(outcome.total_weight, 1.0);
}

#[test]
fn test_equal_totals_go_to_cheaper_first_step() {
    // Up enters the top edge (3.0) and dead-ends between our body and the rival
    // head. Right enters the inner ring (2.0) and continues inward for 1.0.
    let me = snake(
        "me",
        &[(5, 9), (5, 8), (4, 8), (4, 9), (4, 10), (3, 10)],
        100,
    );
    let rival = snake("rival", &[(6, 10), (7, 10), (7, 10)], 100);
    let b = board(11, 11, &[], &me, &[rival]);
    let field = field_for(&b, &me);

    assert_eq!(field.get(c(5, 10)), Some(3.0));
    assert_eq!(field.get(c(6, 9)), Some(2.0));
    assert_eq!(field.get(c(6, 8)), Some(1.0));
    assert!(field.is_lethal(c(5, 8)) && field.is_lethal(c(4, 9)));

    let outcome = search(&field, me.head, 2).unwrap();
    assert_eq!(outcome.total_weight, 3.0);
    assert_eq!(outcome.direction, Direction::Right);
    assert_eq!(outcome.path[0].weight, 2.0);
    assert_eq!(outcome.path[1].coord, c(6, 8));
}
