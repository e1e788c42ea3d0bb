use crate::cells::CellMap;
use crate::graph::attrs::GraphAttrs;
use crate::graph::edge::{Edge, EdgeId};
use crate::graph::node::{Node, NodeId};
use indexmap::IndexMap;

/// A named group of nodes. Carried through layout untouched; renderers may use it.
#[derive(Debug, Clone, Default)]
pub struct Group {
    pub members: Vec<NodeId>,
}

/// The mutable graph value shared by parser, layout engine, and renderer.
///
/// Nodes are keyed by unique name; edges are an ordered list. Iteration over either is arena
/// (insertion) order, which makes every downstream pass deterministic.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    names: IndexMap<String, NodeId>,
    groups: IndexMap<String, Group>,
    pub attrs: GraphAttrs,
    pub cells: CellMap,
    anon: u32,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the node named `name`, creating it if absent.
    pub fn add_node(&mut self, name: impl Into<String>) -> NodeId {
        let name = name.into();
        if let Some(&id) = self.names.get(&name) {
            return id;
        }
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new(id, name.clone(), name.clone()));
        self.names.insert(name, id);
        id
    }

    /// Creates an anonymous node: synthetic name, blank label, otherwise ordinary.
    pub fn add_anon_node(&mut self) -> NodeId {
        self.anon += 1;
        let name = format!("#{}", self.anon);
        let id = self.add_node(name);
        self.nodes[id.index()].label = String::new();
        id
    }

    pub fn add_edge(&mut self, from: NodeId, to: NodeId) -> EdgeId {
        let id = EdgeId(self.edges.len() as u32);
        self.edges.push(Edge::new(id, from, to));
        self.nodes[from.index()].out.push(id);
        self.nodes[to.index()].inn.push(id);
        id
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.index()]
    }

    pub fn edge_mut(&mut self, id: EdgeId) -> &mut Edge {
        &mut self.edges[id.index()]
    }

    pub fn node_by_name(&self, name: &str) -> Option<NodeId> {
        self.names.get(name).copied()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Node handles in stable insertion order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len() as u32).map(NodeId)
    }

    /// Edge handles in stable insertion order.
    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + '_ {
        (0..self.edges.len() as u32).map(EdgeId)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    pub fn group_mut(&mut self, name: impl Into<String>) -> &mut Group {
        self.groups.entry(name.into()).or_default()
    }

    pub fn groups(&self) -> impl Iterator<Item = (&str, &Group)> {
        self.groups.iter().map(|(name, g)| (name.as_str(), g))
    }

    /// Successor node ids of `id` over outgoing edges, in edge insertion order. Self-loops are
    /// skipped; duplicates are kept (callers dedupe where it matters).
    pub fn successors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes[id.index()]
            .out
            .iter()
            .map(|&e| self.edges[e.index()].to())
            .filter(move |&w| w != id)
    }

    /// Predecessor node ids of `id` over incoming edges, in edge insertion order.
    pub fn predecessors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes[id.index()]
            .inn
            .iter()
            .map(|&e| self.edges[e.index()].from())
            .filter(move |&v| v != id)
    }

    /// Count of incoming non-self-loop edges.
    pub fn in_degree(&self, id: NodeId) -> usize {
        self.predecessors(id).count()
    }

    /// Clears everything layout derives (ranks, positions, chain membership, edge offsets and
    /// routes, the cell map) so a second `layout` run starts from the same state as the first.
    pub fn reset_layout(&mut self) {
        for n in &mut self.nodes {
            n.rank = None;
            n.pos = None;
            n.cx = 1;
            n.cy = 1;
            n.chain = None;
        }
        for e in &mut self.edges {
            e.offset = 0;
            e.cells.clear();
        }
        self.cells.clear();
    }
}
