// Occupancy grid built fresh from each turn snapshot
//
// Every cell carries exactly one classification. Later markings win over earlier
// ones in the order food < body < head, and danger cells are only painted over
// cells that are currently free.

use crate::types::{Battlesnake, Board, Coord, Direction};

/// Classification of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Occupancy {
    Empty,
    Body,
    RivalHead,
    OwnHead,
    Food,
    /// Free cell next to the head of a rival at least as long as us
    DangerZone,
}

impl Occupancy {
    /// Cells that movement and flood fills may pass through
    pub fn is_passable(self) -> bool {
        matches!(self, Occupancy::Empty | Occupancy::Food)
    }

    /// Cells physically occupied by a snake this turn
    pub fn is_obstacle(self) -> bool {
        matches!(
            self,
            Occupancy::Body | Occupancy::RivalHead | Occupancy::OwnHead
        )
    }

    /// Numeric map encoding used in diagnostics dumps
    pub fn code(self) -> u8 {
        match self {
            Occupancy::Empty => 0,
            Occupancy::Body => 1,
            Occupancy::RivalHead => 2,
            Occupancy::OwnHead => 3,
            Occupancy::Food => 4,
            Occupancy::DangerZone => 5,
        }
    }
}

/// Board dimensions plus the coordinate arithmetic every per-cell field shares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    pub fn new(width: i32, height: i32) -> Self {
        Bounds { width, height }
    }

    pub fn contains(&self, coord: Coord) -> bool {
        coord.x >= 0 && coord.y >= 0 && coord.x < self.width && coord.y < self.height
    }

    pub fn cell_count(&self) -> usize {
        (self.width.max(0) * self.height.max(0)) as usize
    }

    /// Row-major index; callers must check `contains` first
    pub fn index(&self, coord: Coord) -> usize {
        (coord.y * self.width + coord.x) as usize
    }

    /// Neighbor in `dir`, or None when it falls off the board
    pub fn step(&self, coord: Coord, dir: Direction) -> Option<Coord> {
        let next = dir.apply(&coord);
        if self.contains(next) {
            Some(next)
        } else {
            None
        }
    }

    /// All in-bounds orthogonal neighbors, in the given direction order
    pub fn neighbors<'a>(
        &'a self,
        coord: Coord,
        order: &'a [Direction],
    ) -> impl Iterator<Item = (Direction, Coord)> + 'a {
        order
            .iter()
            .filter_map(move |&dir| self.step(coord, dir).map(|next| (dir, next)))
    }
}

/// Classified occupancy grid for one turn
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    bounds: Bounds,
    cells: Vec<Occupancy>,
    food: Vec<Coord>,
    rival_heads: Vec<Coord>,
    threatening_heads: Vec<Coord>,
    rival_segments: Vec<Coord>,
}

impl Grid {
    /// Builds the occupancy grid for `you` from the turn snapshot.
    ///
    /// Rivals are every live snake whose id differs from `you.id`. The last body
    /// segment of every snake is left unmarked because it vacates next turn.
    /// A rival at least as long as `you` also paints its free neighbors as
    /// DangerZone.
    pub fn build(board: &Board, you: &Battlesnake) -> Self {
        let bounds = Bounds::new(board.width, board.height);
        let mut grid = Grid {
            bounds,
            cells: vec![Occupancy::Empty; bounds.cell_count()],
            food: Vec::new(),
            rival_heads: Vec::new(),
            threatening_heads: Vec::new(),
            rival_segments: Vec::new(),
        };

        for &food in &board.food {
            grid.mark(food, Occupancy::Food);
        }

        let rivals: Vec<&Battlesnake> = board
            .snakes
            .iter()
            .filter(|s| s.id != you.id && s.is_alive())
            .collect();

        for rival in &rivals {
            for &segment in rival.blocking_segments() {
                grid.mark(segment, Occupancy::Body);
                if segment != rival.head {
                    grid.rival_segments.push(segment);
                }
            }
        }
        for &segment in you.blocking_segments() {
            grid.mark(segment, Occupancy::Body);
        }

        for rival in &rivals {
            grid.mark(rival.head, Occupancy::RivalHead);
            grid.rival_heads.push(rival.head);
            if rival.length >= you.length {
                grid.threatening_heads.push(rival.head);
            }
        }
        grid.mark(you.head, Occupancy::OwnHead);

        for head in grid.threatening_heads.clone() {
            for dir in Direction::all().iter() {
                if let Some(next) = bounds.step(head, *dir) {
                    if grid.cells[bounds.index(next)].is_passable() {
                        grid.mark(next, Occupancy::DangerZone);
                    }
                }
            }
        }

        let visible_food: Vec<Coord> = board
            .food
            .iter()
            .copied()
            .filter(|&f| grid.get(f) == Some(Occupancy::Food))
            .collect();
        grid.food = visible_food;

        grid
    }

    fn mark(&mut self, coord: Coord, class: Occupancy) {
        if self.bounds.contains(coord) {
            let idx = self.bounds.index(coord);
            self.cells[idx] = class;
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn width(&self) -> i32 {
        self.bounds.width
    }

    pub fn height(&self) -> i32 {
        self.bounds.height
    }

    /// Classification of `coord`, None when off the board
    pub fn get(&self, coord: Coord) -> Option<Occupancy> {
        if self.bounds.contains(coord) {
            Some(self.cells[self.bounds.index(coord)])
        } else {
            None
        }
    }

    pub fn is_passable(&self, coord: Coord) -> bool {
        self.get(coord).map_or(false, Occupancy::is_passable)
    }

    /// Food cells that kept the Food classification
    pub fn food(&self) -> &[Coord] {
        &self.food
    }

    pub fn rival_heads(&self) -> &[Coord] {
        &self.rival_heads
    }

    /// Heads of rivals at least as long as us
    pub fn threatening_heads(&self) -> &[Coord] {
        &self.threatening_heads
    }

    /// Rival body segments excluding heads and vacating tails
    pub fn rival_segments(&self) -> &[Coord] {
        &self.rival_segments
    }

    /// Text dump of the map codes, top row first
    pub fn render(&self) -> String {
        let mut out = String::new();
        for y in (0..self.height()).rev() {
            let row: Vec<String> = (0..self.width())
                .map(|x| self.cells[self.bounds.index(Coord::new(x, y))].code().to_string())
                .collect();
            out.push_str(&row.join(" "));
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snake(id: &str, body: Vec<Coord>, health: i32) -> Battlesnake {
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

    #[test]
    fn test_bounds_step_rejects_off_board() {
        let bounds = Bounds::new(3, 3);
        assert_eq!(bounds.step(Coord::new(0, 0), Direction::Left), None);
        assert_eq!(bounds.step(Coord::new(0, 0), Direction::Down), None);
        assert_eq!(
            bounds.step(Coord::new(0, 0), Direction::Up),
            Some(Coord::new(0, 1))
        );
        assert_eq!(bounds.step(Coord::new(2, 2), Direction::Right), None);
    }

    #[test]
    fn test_render_prints_top_row_first() {
        let you = snake("me", vec![Coord::new(0, 0), Coord::new(1, 0)], 90);
        let board = Board {
            height: 2,
            width: 2,
            food: vec![Coord::new(1, 1)],
            snakes: vec![you.clone()],
            hazards: vec![],
        };
        let grid = Grid::build(&board, &you);
        assert_eq!(grid.render(), "0 4\n3 0\n");
    }

    #[test]
    fn test_dead_rivals_are_ignored() {
        let you = snake("me", vec![Coord::new(0, 0), Coord::new(0, 1)], 90);
        let ghost = snake(
            "ghost",
            vec![Coord::new(3, 3), Coord::new(3, 2), Coord::new(3, 1)],
            0,
        );
        let board = Board {
            height: 5,
            width: 5,
            food: vec![],
            snakes: vec![you.clone(), ghost],
            hazards: vec![],
        };
        let grid = Grid::build(&board, &you);
        assert_eq!(grid.get(Coord::new(3, 3)), Some(Occupancy::Empty));
        assert!(grid.rival_heads().is_empty());
    }
}
