//! Graph and sparse grid containers used by `moray`.
//!
//! This crate owns the data model the layout engine mutates: an arena graph (nodes and edges
//! addressed by stable integer handles), typed attribute structs with an overflow map for
//! unrecognized keys, and the sparse cell map the router writes into. Entities are never
//! deleted during layout; positions and routes can be cleared and re-derived.

mod cells;
mod dir;
mod graph;

pub use cells::{Cell, CellKind, CellMap, EdgeCellType, EdgeShape};
pub use dir::Dir;
pub use graph::{
    ArrowStyle, Edge, EdgeAttrs, EdgeId, EdgeKind, EdgeStyle, Graph, GraphAttrs, Group, Node,
    NodeAttrs, NodeId, RankSpec,
};
