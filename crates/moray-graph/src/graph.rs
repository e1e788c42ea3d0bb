//! The arena graph container.
//!
//! Nodes and edges live in arenas and are addressed by stable integer handles; back-references
//! (adjacency, chain membership) are handles too, which keeps the model cycle-free without weak
//! references. Iteration order is arena order, i.e. insertion order, everywhere.

mod attrs;
mod core;
mod edge;
mod node;

pub use attrs::{EdgeAttrs, GraphAttrs, NodeAttrs, RankSpec};
pub use core::{Graph, Group};
pub use edge::{ArrowStyle, Edge, EdgeId, EdgeKind, EdgeStyle};
pub use node::{Node, NodeId};
