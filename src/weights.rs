// Heuristic weight field
//
// A dense per-cell cost assembled in three passes over a lethal floor:
//   1. wall/corner rings (raise)
//   2. decaying danger around rival bodies and threatening heads (raise)
//   3. decaying attraction toward uncontested food (lower)
// A cell sitting at the lethal weight is never touched by any pass.

use std::collections::{HashSet, VecDeque};

use log::debug;

use crate::config::{WeightConfig, CORNER_DEPTH};
use crate::grid::{Bounds, Grid};
use crate::types::{Battlesnake, Coord, Direction};

/// Sweep directions for the danger pass. A body is assumed to sweep forward,
/// so one sweep only walks up/left and the other only down/right.
const SWEEP_UP_LEFT: [Direction; 2] = [Direction::Up, Direction::Left];
const SWEEP_DOWN_RIGHT: [Direction; 2] = [Direction::Down, Direction::Right];

#[derive(Debug, Clone, PartialEq)]
pub struct WeightField {
    bounds: Bounds,
    weights: Vec<f64>,
    lethal: f64,
}

impl WeightField {
    /// Builds the full field for `you` on `grid`
    pub fn compute(grid: &Grid, you: &Battlesnake, config: &WeightConfig) -> Self {
        let mut field = Self::lethal_floor(grid, config);
        field.apply_corner_pass(config);
        field.apply_snake_danger_pass(grid, config);
        field.apply_food_pass(grid, you, config);
        field
    }

    /// Zero everywhere except occupied and danger cells, which start lethal
    fn lethal_floor(grid: &Grid, config: &WeightConfig) -> Self {
        let bounds = grid.bounds();
        let mut weights = vec![0.0; bounds.cell_count()];
        for y in 0..bounds.height {
            for x in 0..bounds.width {
                let coord = Coord::new(x, y);
                if let Some(class) = grid.get(coord) {
                    if !class.is_passable() {
                        weights[bounds.index(coord)] = config.lethal_weight;
                    }
                }
            }
        }
        WeightField {
            bounds,
            weights,
            lethal: config.lethal_weight,
        }
    }

    fn apply_corner_pass(&mut self, config: &WeightConfig) {
        let Bounds { width, height } = self.bounds;
        for y in 0..height {
            for x in 0..width {
                let idx = self.bounds.index(Coord::new(x, y));
                if self.weights[idx] >= self.lethal {
                    continue;
                }
                let from_row_edge = y.min(height - 1 - y) as usize;
                let from_col_edge = x.min(width - 1 - x) as usize;
                let ring = from_row_edge.min(from_col_edge);

                let mut value: f64 = 0.0;
                if ring < CORNER_DEPTH {
                    value = config.edge_ring_weights[ring];
                }
                if from_row_edge < CORNER_DEPTH && from_col_edge < CORNER_DEPTH {
                    value = value.max(config.corner_table[from_row_edge][from_col_edge]);
                }
                self.weights[idx] = self.weights[idx].max(value);
            }
        }
    }

    fn apply_snake_danger_pass(&mut self, grid: &Grid, config: &WeightConfig) {
        for &segment in grid.rival_segments() {
            self.spread_danger(grid, segment, &config.body_danger);
        }
        for &head in grid.threatening_heads() {
            self.spread_danger(grid, head, &config.head_danger);
        }
    }

    fn spread_danger(&mut self, grid: &Grid, source: Coord, decay: &[f64]) {
        self.sweep_danger(grid, source, decay, &SWEEP_UP_LEFT);
        self.sweep_danger(grid, source, decay, &SWEEP_DOWN_RIGHT);
    }

    /// Bounded BFS from `source` through `directions` only, adding `decay[hop]`
    /// to each cell reached. Occupied cells stop the sweep; danger cells let it
    /// through but keep their lethal weight.
    fn sweep_danger(&mut self, grid: &Grid, source: Coord, decay: &[f64], directions: &[Direction]) {
        if decay.is_empty() {
            return;
        }
        let mut seen = HashSet::new();
        seen.insert(source);
        let mut queue = VecDeque::new();
        queue.push_back((source, 0usize));

        while let Some((cell, hop)) = queue.pop_front() {
            self.raise(cell, decay[hop]);
            if hop + 1 >= decay.len() {
                continue;
            }
            for (_, next) in self.bounds.neighbors(cell, directions) {
                // DangerZone cells sit at the lethal weight but must not stop the
                // sweep, or head danger would never get past its own danger ring
                let blocked = grid.get(next).map_or(true, |c| c.is_obstacle());
                if !blocked && seen.insert(next) {
                    queue.push_back((next, hop + 1));
                }
            }
        }
    }

    fn raise(&mut self, coord: Coord, amount: f64) {
        let idx = self.bounds.index(coord);
        let current = self.weights[idx];
        if current >= self.lethal {
            return;
        }
        // Accumulated danger must never turn a free cell lethal
        self.weights[idx] = (current + amount).min(self.lethal - 1.0);
    }

    fn apply_food_pass(&mut self, grid: &Grid, you: &Battlesnake, config: &WeightConfig) {
        let desperate = you.health <= config.low_health_threshold;
        let attraction = config.food_attraction(you.health);
        let depth = config.food_search_depth;
        let mut food_layer = vec![0.0f64; self.bounds.cell_count()];

        for &food in grid.food() {
            let contested = grid.rival_heads().iter().any(|h| h.manhattan(&food) <= 1);
            if contested && !desperate {
                debug!("Skipping contested food at ({}, {})", food.x, food.y);
                continue;
            }

            let mut seen = HashSet::new();
            seen.insert(food);
            let mut queue = VecDeque::new();
            queue.push_back((food, 0usize));

            while let Some((cell, hop)) = queue.pop_front() {
                let falloff = 1.0 - hop as f64 / (depth + 1) as f64;
                let value = -attraction * falloff;
                let idx = self.bounds.index(cell);
                if value < food_layer[idx] {
                    food_layer[idx] = value;
                }
                if hop >= depth {
                    continue;
                }
                for (_, next) in self.bounds.neighbors(cell, &Direction::all()) {
                    if !self.is_lethal(next) && seen.insert(next) {
                        queue.push_back((next, hop + 1));
                    }
                }
            }
        }

        for (weight, pull) in self.weights.iter_mut().zip(food_layer) {
            if *weight < self.lethal {
                *weight += pull;
            }
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn lethal_weight(&self) -> f64 {
        self.lethal
    }

    /// Weight of `coord`, None when off the board
    pub fn get(&self, coord: Coord) -> Option<f64> {
        if self.bounds.contains(coord) {
            Some(self.weights[self.bounds.index(coord)])
        } else {
            None
        }
    }

    /// Off-board cells count as lethal
    pub fn is_lethal(&self, coord: Coord) -> bool {
        self.get(coord).map_or(true, |w| w >= self.lethal)
    }

    /// Weight table dump, top row first
    pub fn render(&self) -> String {
        let mut out = String::new();
        for y in (0..self.bounds.height).rev() {
            for x in 0..self.bounds.width {
                let w = self.weights[self.bounds.index(Coord::new(x, y))];
                out.push_str(&format!("{:>8.2}", w));
            }
            out.push('\n');
        }
        out
    }
}
