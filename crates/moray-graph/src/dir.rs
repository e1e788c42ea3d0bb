//! Compass directions on the grid.
//!
//! `Dir` doubles as the graph-level `flow` attribute (the primary reading direction) and as the
//! unit step used by the router. Grid coordinates grow east (+x) and south (+y).

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Default)]
pub enum Dir {
    North,
    South,
    #[default]
    East,
    West,
}

impl Dir {
    pub const ALL: [Dir; 4] = [Dir::North, Dir::South, Dir::East, Dir::West];

    pub fn opposite(self) -> Self {
        match self {
            Dir::North => Dir::South,
            Dir::South => Dir::North,
            Dir::East => Dir::West,
            Dir::West => Dir::East,
        }
    }

    pub fn delta(self) -> (i32, i32) {
        match self {
            Dir::North => (0, -1),
            Dir::South => (0, 1),
            Dir::East => (1, 0),
            Dir::West => (-1, 0),
        }
    }

    pub fn step(self, pos: (i32, i32)) -> (i32, i32) {
        let (dx, dy) = self.delta();
        (pos.0 + dx, pos.1 + dy)
    }

    pub fn from_delta(dx: i32, dy: i32) -> Option<Self> {
        match (dx.signum(), dy.signum()) {
            (0, -1) => Some(Dir::North),
            (0, 1) => Some(Dir::South),
            (1, 0) => Some(Dir::East),
            (-1, 0) => Some(Dir::West),
            _ => None,
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Dir::East | Dir::West)
    }

    /// Parses the `flow` attribute. Compass names and reading-direction synonyms are accepted.
    pub fn from_attr(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "east" | "right" => Some(Dir::East),
            "south" | "down" => Some(Dir::South),
            "west" | "left" => Some(Dir::West),
            "north" | "up" => Some(Dir::North),
            _ => None,
        }
    }
}
