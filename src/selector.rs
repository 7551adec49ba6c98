// Move selection: legal-move filtering, then one of two scoring strategies
//
// ScoringMode::Space keeps the moves with the largest reachable area and breaks
// ties toward the closest food. ScoringMode::WeightedPath returns the first move
// of the cheapest bounded path over the heuristic weight field.

use log::debug;
use rand::seq::IndexedRandom;
use rand::Rng;

use crate::config::{Config, ScoringMode};
use crate::distance::{priority_favoring, DistanceField};
use crate::grid::{Grid, Occupancy};
use crate::path_search;
use crate::space;
use crate::types::{Battlesnake, Board, Coord, Direction};
use crate::weights::WeightField;

/// Moves from `head` that stay on the board and avoid bodies and rival heads.
/// With `avoid_danger`, cells a longer rival could reach next turn are refused too.
pub fn legal_moves(grid: &Grid, head: Coord, avoid_danger: bool) -> Vec<Direction> {
    grid.bounds()
        .neighbors(head, &Direction::all())
        .filter(|&(_, next)| match grid.get(next) {
            Some(Occupancy::Body) | Some(Occupancy::RivalHead) | Some(Occupancy::OwnHead) => false,
            Some(Occupancy::DangerZone) => !avoid_danger,
            Some(_) => true,
            None => false,
        })
        .map(|(dir, _)| dir)
        .collect()
}

/// Safe moves if any exist, otherwise the moves that only risk a danger cell
pub fn candidate_moves(grid: &Grid, head: Coord) -> Vec<Direction> {
    let strict = legal_moves(grid, head, true);
    if !strict.is_empty() {
        return strict;
    }
    legal_moves(grid, head, false)
}

/// Move to play when nothing is legal: the first direction that stays on the
/// board, or Up on a board with no room at all
pub fn last_resort(grid: &Grid, head: Coord) -> Direction {
    grid.bounds()
        .neighbors(head, &Direction::all())
        .map(|(dir, _)| dir)
        .next()
        .unwrap_or(Direction::Up)
}

/// Cheapest acceptable answer for the turn, available before any scoring runs
pub fn fallback_move(grid: &Grid, head: Coord) -> Direction {
    candidate_moves(grid, head)
        .first()
        .copied()
        .unwrap_or_else(|| last_resort(grid, head))
}

/// Turns a snapshot into one direction under a fixed configuration
pub struct MoveSelector<'a> {
    config: &'a Config,
}

impl<'a> MoveSelector<'a> {
    pub fn new(config: &'a Config) -> Self {
        MoveSelector { config }
    }

    /// Picks the move for `you` on `board`. Random tie-breaks draw from `rng`.
    pub fn decide<R: Rng + ?Sized>(&self, board: &Board, you: &Battlesnake, rng: &mut R) -> Direction {
        let grid = Grid::build(board, you);
        let head = you.head;

        let candidates = candidate_moves(&grid, head);
        if candidates.is_empty() {
            let forced = last_resort(&grid, head);
            debug!("No legal moves, forced to {}", forced.as_str());
            return forced;
        }
        if candidates.len() == 1 {
            return candidates[0];
        }

        match self.config.strategy.mode {
            ScoringMode::Space => Self::choose_by_space(&grid, head, &candidates, rng),
            ScoringMode::WeightedPath => self.choose_by_weighted_path(&grid, you, &candidates),
        }
    }

    fn choose_by_space<R: Rng + ?Sized>(
        grid: &Grid,
        head: Coord,
        candidates: &[Direction],
        rng: &mut R,
    ) -> Direction {
        let areas: Vec<(Direction, usize)> = candidates
            .iter()
            .filter_map(|&dir| grid.bounds().step(head, dir).map(|cell| (dir, space::area(grid, cell))))
            .collect();
        let widest = areas.iter().map(|&(_, a)| a).max().unwrap_or(0);
        let tied: Vec<Direction> = areas
            .iter()
            .filter(|&&(_, a)| a == widest)
            .map(|&(dir, _)| dir)
            .collect();

        debug!(
            "Areas: {:?}, widest {} shared by {:?}",
            areas
                .iter()
                .map(|(d, a)| format!("{}={}", d.as_str(), a))
                .collect::<Vec<_>>(),
            widest,
            tied.iter().map(|d| d.as_str()).collect::<Vec<_>>()
        );

        let field = DistanceField::compute(grid, head, &priority_favoring(&tied));
        let targets = field.closest_food(&tied);
        if let Some(target) = targets.choose(&mut *rng) {
            if let Some(dir) = field.first_move(*target) {
                debug!("Heading for food at ({}, {}) via {}", target.x, target.y, dir.as_str());
                return dir;
            }
        }

        tied.choose(&mut *rng)
            .copied()
            .unwrap_or(candidates[0])
    }

    fn choose_by_weighted_path(&self, grid: &Grid, you: &Battlesnake, candidates: &[Direction]) -> Direction {
        let field = WeightField::compute(grid, you, &self.config.weights);
        match path_search::search(&field, you.head, self.config.strategy.path_search_depth) {
            Some(outcome) if candidates.contains(&outcome.direction) => {
                debug!(
                    "Weighted path via {} costs {:.2} over {} steps",
                    outcome.direction.as_str(),
                    outcome.total_weight,
                    outcome.path.len()
                );
                outcome.direction
            }
            _ => candidates[0],
        }
    }
}
