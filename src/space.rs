// Reachable-space estimate: how many free cells are connected to a candidate cell

use crate::grid::Grid;
use crate::types::{Coord, Direction};

/// Counts the Empty/Food cells connected to `origin`, including `origin` itself.
///
/// The origin is always counted when it is on the board, whatever its class, so
/// a move into a danger cell still reports the room behind it. Returns 0 for an
/// off-board origin.
pub fn area(grid: &Grid, origin: Coord) -> usize {
    let bounds = grid.bounds();
    if !bounds.contains(origin) {
        return 0;
    }

    let mut visited = vec![false; bounds.cell_count()];
    visited[bounds.index(origin)] = true;
    let mut stack = vec![origin];
    let mut count = 0;
    let directions = Direction::all();

    while let Some(cell) = stack.pop() {
        count += 1;
        for (_, next) in bounds.neighbors(cell, &directions) {
            let idx = bounds.index(next);
            if !visited[idx] && grid.is_passable(next) {
                visited[idx] = true;
                stack.push(next);
            }
        }
    }

    count
}
