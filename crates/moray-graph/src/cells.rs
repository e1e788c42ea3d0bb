//! The sparse cell map and the edge-cell type encoding.
//!
//! A cell is either a node cell or an edge cell, never both. Edge cells carry an
//! [`EdgeCellType`]: a bit-encoded value whose low nibble selects a shape class and whose upper
//! bits are orthogonal flags (start/end attachment side, label, hole). The encoding is the
//! contract between the router (which produces types) and the renderer (which consumes them).

use crate::dir::Dir;
use crate::graph::{EdgeId, NodeId};
use rustc_hash::FxHashMap;
use serde::Serialize;

/// Shape classes for edge cells.
///
/// Corners are named by the two sides of the cell that carry line arms; joints by their three
/// arms. The `Loop*` classes close a self-loop bump onto its node and are named by the node
/// side the bump sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EdgeShape {
    Hor,
    Ver,
    Cross,
    CornerNE,
    CornerNW,
    CornerSE,
    CornerSW,
    JointNEW,
    JointNWS,
    JointENS,
    JointSEW,
    LoopNorth,
    LoopSouth,
    LoopEast,
    LoopWest,
}

impl EdgeShape {
    fn bits(self) -> u16 {
        match self {
            EdgeShape::Hor => 0,
            EdgeShape::Ver => 1,
            EdgeShape::Cross => 2,
            EdgeShape::CornerNE => 3,
            EdgeShape::CornerNW => 4,
            EdgeShape::CornerSE => 5,
            EdgeShape::CornerSW => 6,
            EdgeShape::JointNEW => 7,
            EdgeShape::JointNWS => 8,
            EdgeShape::JointENS => 9,
            EdgeShape::JointSEW => 10,
            EdgeShape::LoopNorth => 11,
            EdgeShape::LoopSouth => 12,
            EdgeShape::LoopEast => 13,
            EdgeShape::LoopWest => 14,
        }
    }

    fn from_bits(bits: u16) -> Self {
        match bits {
            0 => EdgeShape::Hor,
            1 => EdgeShape::Ver,
            2 => EdgeShape::Cross,
            3 => EdgeShape::CornerNE,
            4 => EdgeShape::CornerNW,
            5 => EdgeShape::CornerSE,
            6 => EdgeShape::CornerSW,
            7 => EdgeShape::JointNEW,
            8 => EdgeShape::JointNWS,
            9 => EdgeShape::JointENS,
            10 => EdgeShape::JointSEW,
            11 => EdgeShape::LoopNorth,
            12 => EdgeShape::LoopSouth,
            13 => EdgeShape::LoopEast,
            14 => EdgeShape::LoopWest,
            _ => EdgeShape::Hor,
        }
    }

    /// The shape whose arms are exactly the given sides, if one exists. This is how terminal
    /// port-sharing works: two edges meeting in one cell union their arms, and a corner plus a
    /// straight segment becomes a three-way joint.
    pub fn from_arms(n: bool, e: bool, s: bool, w: bool) -> Option<Self> {
        match (n, e, s, w) {
            (false, true, false, true) => Some(EdgeShape::Hor),
            (true, false, true, false) => Some(EdgeShape::Ver),
            (true, true, true, true) => Some(EdgeShape::Cross),
            (true, true, false, false) => Some(EdgeShape::CornerNE),
            (true, false, false, true) => Some(EdgeShape::CornerNW),
            (false, true, true, false) => Some(EdgeShape::CornerSE),
            (false, false, true, true) => Some(EdgeShape::CornerSW),
            (true, true, false, true) => Some(EdgeShape::JointNEW),
            (true, false, true, true) => Some(EdgeShape::JointNWS),
            (true, true, true, false) => Some(EdgeShape::JointENS),
            (false, true, true, true) => Some(EdgeShape::JointSEW),
            _ => None,
        }
    }

    /// Which sides of the cell carry a line arm, as `(north, east, south, west)`.
    pub fn arms(self) -> (bool, bool, bool, bool) {
        match self {
            EdgeShape::Hor => (false, true, false, true),
            EdgeShape::Ver => (true, false, true, false),
            EdgeShape::Cross => (true, true, true, true),
            EdgeShape::CornerNE => (true, true, false, false),
            EdgeShape::CornerNW => (true, false, false, true),
            EdgeShape::CornerSE => (false, true, true, false),
            EdgeShape::CornerSW => (false, false, true, true),
            EdgeShape::JointNEW => (true, true, false, true),
            EdgeShape::JointNWS => (true, false, true, true),
            EdgeShape::JointENS => (true, true, true, false),
            EdgeShape::JointSEW => (false, true, true, true),
            // Loop closers are the four rotations of a bump's closing corner; the closing arm
            // points at the node side each one names.
            EdgeShape::LoopNorth => (false, true, true, false),
            EdgeShape::LoopSouth => (true, false, false, true),
            EdgeShape::LoopEast => (false, false, true, true),
            EdgeShape::LoopWest => (true, true, false, false),
        }
    }
}

/// Bit-encoded edge cell type: shape class in the low nibble, orthogonal flags above it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct EdgeCellType(u16);

impl EdgeCellType {
    pub const SHAPE_MASK: u16 = 0x000f;

    pub const START_N: u16 = 0x0010;
    pub const START_S: u16 = 0x0020;
    pub const START_E: u16 = 0x0040;
    pub const START_W: u16 = 0x0080;
    pub const END_N: u16 = 0x0100;
    pub const END_S: u16 = 0x0200;
    pub const END_E: u16 = 0x0400;
    pub const END_W: u16 = 0x0800;
    pub const LABEL: u16 = 0x1000;
    pub const HOLE: u16 = 0x2000;

    pub fn new(shape: EdgeShape) -> Self {
        Self(shape.bits())
    }

    pub fn bits(self) -> u16 {
        self.0
    }

    pub fn shape(self) -> EdgeShape {
        EdgeShape::from_bits(self.0 & Self::SHAPE_MASK)
    }

    pub fn with_shape(self, shape: EdgeShape) -> Self {
        Self((self.0 & !Self::SHAPE_MASK) | shape.bits())
    }

    pub fn with_flags(self, flags: u16) -> Self {
        Self(self.0 | (flags & !Self::SHAPE_MASK))
    }

    pub fn has_flags(self, flags: u16) -> bool {
        self.0 & flags == flags
    }

    /// The flag marking which side of the cell attaches to the source node.
    pub fn start_flag(dir: Dir) -> u16 {
        match dir {
            Dir::North => Self::START_N,
            Dir::South => Self::START_S,
            Dir::East => Self::START_E,
            Dir::West => Self::START_W,
        }
    }

    /// The flag marking which side of the cell attaches to the target node.
    pub fn end_flag(dir: Dir) -> u16 {
        match dir {
            Dir::North => Self::END_N,
            Dir::South => Self::END_S,
            Dir::East => Self::END_E,
            Dir::West => Self::END_W,
        }
    }

    pub fn start_dir(self) -> Option<Dir> {
        Dir::ALL
            .into_iter()
            .find(|d| self.has_flags(Self::start_flag(*d)))
    }

    pub fn end_dir(self) -> Option<Dir> {
        Dir::ALL
            .into_iter()
            .find(|d| self.has_flags(Self::end_flag(*d)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CellKind {
    Node(NodeId),
    Edge(EdgeId, EdgeCellType),
}

impl CellKind {
    pub fn is_node(self) -> bool {
        matches!(self, CellKind::Node(_))
    }

    pub fn is_edge(self) -> bool {
        matches!(self, CellKind::Edge(..))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
    pub kind: CellKind,
    pub label: Option<String>,
}

impl Cell {
    pub fn node(x: i32, y: i32, owner: NodeId) -> Self {
        Self {
            x,
            y,
            kind: CellKind::Node(owner),
            label: None,
        }
    }

    pub fn edge(x: i32, y: i32, owner: EdgeId, ty: EdgeCellType) -> Self {
        Self {
            x,
            y,
            kind: CellKind::Edge(owner, ty),
            label: None,
        }
    }
}

/// Sparse mapping from grid coordinates to cells. Empty cells are not stored; at most one cell
/// exists per coordinate.
#[derive(Debug, Clone, Default)]
pub struct CellMap {
    cells: FxHashMap<(i32, i32), Cell>,
}

impl CellMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, x: i32, y: i32) -> Option<&Cell> {
        self.cells.get(&(x, y))
    }

    pub fn get_mut(&mut self, x: i32, y: i32) -> Option<&mut Cell> {
        self.cells.get_mut(&(x, y))
    }

    /// Inserts a cell at its coordinates, replacing any previous cell there. Ownership checks
    /// belong to the caller (the executor refuses conflicting writes before getting here).
    pub fn insert(&mut self, cell: Cell) {
        self.cells.insert((cell.x, cell.y), cell);
    }

    pub fn remove(&mut self, x: i32, y: i32) -> Option<Cell> {
        self.cells.remove(&(x, y))
    }

    pub fn is_free(&self, x: i32, y: i32) -> bool {
        !self.cells.contains_key(&(x, y))
    }

    /// True when the whole rectangle `[x, x+cx) x [y, y+cy)` is unoccupied.
    pub fn is_free_rect(&self, x: i32, y: i32, cx: u16, cy: u16) -> bool {
        for yy in y..y + cy as i32 {
            for xx in x..x + cx as i32 {
                if !self.is_free(xx, yy) {
                    return false;
                }
            }
        }
        true
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Unordered iteration; use [`CellMap::sorted`] where output order matters.
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.values()
    }

    /// Cells in row-major order, for deterministic rendering and dumps.
    pub fn sorted(&self) -> Vec<&Cell> {
        let mut cells: Vec<&Cell> = self.cells.values().collect();
        cells.sort_by_key(|c| (c.y, c.x));
        cells
    }

    /// Bounding box of the populated cells as `(min_x, min_y, max_x, max_y)`, inclusive.
    pub fn bounds(&self) -> Option<(i32, i32, i32, i32)> {
        let mut it = self.cells.values();
        let first = it.next()?;
        let mut bounds = (first.x, first.y, first.x, first.y);
        for c in it {
            bounds.0 = bounds.0.min(c.x);
            bounds.1 = bounds.1.min(c.y);
            bounds.2 = bounds.2.max(c.x);
            bounds.3 = bounds.3.max(c.y);
        }
        Some(bounds)
    }
}

impl PartialEq for CellMap {
    fn eq(&self, other: &Self) -> bool {
        self.cells == other.cells
    }
}
