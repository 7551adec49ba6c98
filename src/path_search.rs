// Bounded-depth minimum-weight path search over the weight field
//
// Visited cells are tracked per explored path, not globally: two competing
// branches may both pass through the same cell. The path so far is an immutable
// parent-linked trail living on the call stack, so extending it never disturbs a
// sibling branch.

use rayon::prelude::*;

use crate::types::{Coord, Direction};
use crate::weights::WeightField;

/// One visited cell and the weight paid to enter it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathStep {
    pub weight: f64,
    pub coord: Coord,
}

/// Best first move found by the search
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub direction: Direction,
    /// First step weight plus the best continuation below it
    pub total_weight: f64,
    /// Cells entered, starting with the first move's cell
    pub path: Vec<PathStep>,
}

impl SearchOutcome {
    fn first_weight(&self) -> f64 {
        self.path.first().map_or(0.0, |s| s.weight)
    }

    fn beats(&self, other: &SearchOutcome) -> bool {
        self.total_weight < other.total_weight
            || (self.total_weight == other.total_weight && self.first_weight() < other.first_weight())
    }
}

struct Trail<'a> {
    coord: Coord,
    parent: Option<&'a Trail<'a>>,
}

impl<'a> Trail<'a> {
    fn contains(&self, coord: Coord) -> bool {
        let mut node = Some(self);
        while let Some(current) = node {
            if current.coord == coord {
                return true;
            }
            node = current.parent;
        }
        false
    }
}

/// Searches every non-lethal first move from `origin`, exploring at most
/// `max_depth` steps in total (the first move included).
///
/// Returns None when every neighbor of `origin` is lethal or off the board.
/// Ties on total weight go to the cheaper first step, then to direction order.
pub fn search(field: &WeightField, origin: Coord, max_depth: usize) -> Option<SearchOutcome> {
    let root = Trail {
        coord: origin,
        parent: None,
    };
    let remaining = max_depth.saturating_sub(1);
    let directions = Direction::all();

    let branches: Vec<Option<SearchOutcome>> = directions[..]
        .par_iter()
        .map(|&dir| {
            let first = field.bounds().step(origin, dir)?;
            let weight = field.get(first)?;
            if weight >= field.lethal_weight() {
                return None;
            }
            let trail = Trail {
                coord: first,
                parent: Some(&root),
            };
            let (rest, continuation) = explore(field, &trail, remaining);

            let mut path = Vec::with_capacity(continuation.len() + 1);
            path.push(PathStep {
                weight,
                coord: first,
            });
            path.extend(continuation);

            Some(SearchOutcome {
                direction: dir,
                total_weight: weight + rest,
                path,
            })
        })
        .collect();

    let mut best: Option<SearchOutcome> = None;
    for outcome in branches.into_iter().flatten() {
        let better = match &best {
            Some(current) => outcome.beats(current),
            None => true,
        };
        if better {
            best = Some(outcome);
        }
    }
    best
}

/// Cheapest continuation below `trail`. A branch that runs out of depth or of
/// legal cells contributes no further cost.
fn explore(field: &WeightField, trail: &Trail<'_>, remaining: usize) -> (f64, Vec<PathStep>) {
    if remaining == 0 {
        return (0.0, Vec::new());
    }

    let mut best: Option<(f64, Vec<PathStep>)> = None;
    for dir in Direction::all().iter() {
        let next = match field.bounds().step(trail.coord, *dir) {
            Some(next) => next,
            None => continue,
        };
        if trail.contains(next) || field.is_lethal(next) {
            continue;
        }
        let weight = match field.get(next) {
            Some(w) => w,
            None => continue,
        };

        let child = Trail {
            coord: next,
            parent: Some(trail),
        };
        let (rest, continuation) = explore(field, &child, remaining - 1);
        let total = weight + rest;

        if best.as_ref().map_or(true, |(b, _)| total < *b) {
            let mut path = Vec::with_capacity(continuation.len() + 1);
            path.push(PathStep {
                weight,
                coord: next,
            });
            path.extend(continuation);
            best = Some((total, path));
        }
    }

    best.unwrap_or((0.0, Vec::new()))
}
