// Breadth-first distance field from our head
//
// Besides the hop count, every reached cell remembers which of the head's four
// neighbors started its shortest path (the "first move"). Obstacles are recorded
// when discovered but never expanded, so a food cell sitting behind a wall of
// bodies still reports which first move would have led toward it.

use std::collections::VecDeque;

use crate::grid::{Bounds, Grid};
use crate::types::{Coord, Direction};

/// Default neighbor examination order
pub const DEFAULT_PRIORITY: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

/// Per-cell BFS distance and first-move labels for one turn
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceField {
    bounds: Bounds,
    distance: Vec<Option<u32>>,
    first_move: Vec<Option<Direction>>,
    food: Vec<Coord>,
}

impl DistanceField {
    /// Flood fills `grid` from `origin`.
    ///
    /// # Arguments
    /// * `grid` - Occupancy grid for the current turn
    /// * `origin` - Our head; the only cell at distance 0
    /// * `priority` - Neighbor examination order. On equal distance the first
    ///   move listed earlier wins the label.
    pub fn compute(grid: &Grid, origin: Coord, priority: &[Direction; 4]) -> Self {
        let bounds = grid.bounds();
        let mut field = DistanceField {
            bounds,
            distance: vec![None; bounds.cell_count()],
            first_move: vec![None; bounds.cell_count()],
            food: grid.food().to_vec(),
        };

        if !bounds.contains(origin) {
            return field;
        }
        field.distance[bounds.index(origin)] = Some(0);

        let mut queue = VecDeque::new();

        // Neighbors of the head are labelled even when they are obstacles
        for (dir, next) in bounds.neighbors(origin, priority) {
            let idx = bounds.index(next);
            field.distance[idx] = Some(1);
            field.first_move[idx] = Some(dir);
            if grid.is_passable(next) {
                queue.push_back(next);
            }
        }

        while let Some(cell) = queue.pop_front() {
            let idx = bounds.index(cell);
            let (dist, label) = match (field.distance[idx], field.first_move[idx]) {
                (Some(d), Some(l)) => (d, l),
                _ => continue,
            };

            for (_, next) in bounds.neighbors(cell, priority) {
                let next_idx = bounds.index(next);
                if field.distance[next_idx].is_some() {
                    continue;
                }
                field.distance[next_idx] = Some(dist + 1);
                field.first_move[next_idx] = Some(label);
                if grid.is_passable(next) {
                    queue.push_back(next);
                }
            }
        }

        field
    }

    /// Hop count from the origin, None when unreachable or off the board
    pub fn distance(&self, coord: Coord) -> Option<u32> {
        if self.bounds.contains(coord) {
            self.distance[self.bounds.index(coord)]
        } else {
            None
        }
    }

    pub fn first_move(&self, coord: Coord) -> Option<Direction> {
        if self.bounds.contains(coord) {
            self.first_move[self.bounds.index(coord)]
        } else {
            None
        }
    }

    /// Food cells at the minimum distance among those whose first move is in
    /// `allowed`. All ties are returned; the caller picks among them.
    pub fn closest_food(&self, allowed: &[Direction]) -> Vec<Coord> {
        let reachable: Vec<(Coord, u32)> = self
            .food
            .iter()
            .filter_map(|&food| {
                let dist = self.distance(food)?;
                let label = self.first_move(food)?;
                if allowed.contains(&label) {
                    Some((food, dist))
                } else {
                    None
                }
            })
            .collect();

        let best = match reachable.iter().map(|&(_, d)| d).min() {
            Some(d) => d,
            None => return Vec::new(),
        };

        reachable
            .into_iter()
            .filter(|&(_, d)| d == best)
            .map(|(food, _)| food)
            .collect()
    }
}

/// Direction order that examines `preferred` first (in default order), then the rest
pub fn priority_favoring(preferred: &[Direction]) -> [Direction; 4] {
    let mut order = DEFAULT_PRIORITY;
    let mut slot = 0;
    for dir in DEFAULT_PRIORITY.iter().filter(|d| preferred.contains(d)) {
        order[slot] = *dir;
        slot += 1;
    }
    for dir in DEFAULT_PRIORITY.iter().filter(|d| !preferred.contains(d)) {
        order[slot] = *dir;
        slot += 1;
    }
    order
}
