use crate::graph::attrs::EdgeAttrs;
use crate::graph::node::NodeId;
use serde::Serialize;

/// Stable handle into the edge arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EdgeId(pub(crate) u32);

impl EdgeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Stroke style. Opaque to layout; the renderer picks glyphs from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum EdgeStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    Wave,
    Double,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ArrowStyle {
    #[default]
    Forward,
    Back,
    Both,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum EdgeKind {
    #[default]
    Directed,
    Undirected,
    Bidirectional,
}

#[derive(Debug, Clone)]
pub struct Edge {
    pub(crate) id: EdgeId,
    pub(crate) from: NodeId,
    pub(crate) to: NodeId,
    pub label: Option<String>,
    pub style: EdgeStyle,
    pub arrow: ArrowStyle,
    pub kind: EdgeKind,
    pub attrs: EdgeAttrs,

    // Populated during layout.
    /// Perpendicular separation within a parallel bundle; 0 for the single-edge case.
    pub offset: i32,
    /// The routed path in order, exit cell first. Empty until routed.
    pub cells: Vec<(i32, i32)>,
}

impl Edge {
    pub(crate) fn new(id: EdgeId, from: NodeId, to: NodeId) -> Self {
        Self {
            id,
            from,
            to,
            label: None,
            style: EdgeStyle::default(),
            arrow: ArrowStyle::default(),
            kind: EdgeKind::default(),
            attrs: EdgeAttrs::default(),
            offset: 0,
            cells: Vec::new(),
        }
    }

    pub fn id(&self) -> EdgeId {
        self.id
    }

    pub fn from(&self) -> NodeId {
        self.from
    }

    pub fn to(&self) -> NodeId {
        self.to
    }

    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }

    /// Grid distance the edge should keep between its endpoints.
    pub fn minlen(&self) -> u16 {
        self.attrs.minlen.unwrap_or(2)
    }

    pub fn is_routed(&self) -> bool {
        !self.cells.is_empty()
    }

    /// The unordered endpoint pair, for parallel-bundle grouping.
    pub fn bundle_key(&self) -> (NodeId, NodeId) {
        if self.from <= self.to {
            (self.from, self.to)
        } else {
            (self.to, self.from)
        }
    }
}
