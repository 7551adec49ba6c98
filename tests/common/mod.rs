// Board builders shared by the integration tests
#![allow(dead_code)]

use std::collections::HashMap;

use contour_snake::types::{Battlesnake, Board, Coord, Game};

pub fn c(x: i32, y: i32) -> Coord {
    Coord { x, y }
}

/// Snake whose head is the first listed segment
pub fn snake(id: &str, body: &[(i32, i32)], health: i32) -> Battlesnake {
    let body: Vec<Coord> = body.iter().map(|&(x, y)| c(x, y)).collect();
    Battlesnake {
        id: id.to_string(),
        name: id.to_string(),
        health,
        head: body[0],
        length: body.len() as i32,
        body,
        latency: "0".to_string(),
        shout: None,
    }
}

/// Board of `width` x `height`; `you` is always listed among the snakes
pub fn board(width: i32, height: i32, food: &[(i32, i32)], you: &Battlesnake, rivals: &[Battlesnake]) -> Board {
    let mut snakes = vec![you.clone()];
    snakes.extend(rivals.iter().cloned());
    Board {
        height,
        width,
        food: food.iter().map(|&(x, y)| c(x, y)).collect(),
        snakes,
        hazards: vec![],
    }
}

pub fn game() -> Game {
    Game {
        id: "test-game".to_string(),
        ruleset: HashMap::new(),
        timeout: 500,
    }
}
