//! Action planning: the ordered to-do list the executor drives.
//!
//! Chain edges form the spine and are handled first — they succeed on the straight tier of the
//! router and cost near-zero, and fixing the spine early keeps chaotic routes from stealing its
//! cells. Within a chain, the remaining internal edges (jumps and backlinks) go shortest span
//! first; self-loops follow; cross-chain edges and stragglers come last.

use crate::chain::Chain;
use moray_graph::{EdgeId, Graph, NodeId};
use rustc_hash::{FxHashMap, FxHashSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Place a node without a parent constraint.
    PlaceNode { node: NodeId, tries: u32 },
    /// Place `node` near its placed chain parent, then immediately route the chain edge.
    PlaceChained {
        node: NodeId,
        parent: NodeId,
        edge: EdgeId,
        distance: u16,
        tries: u32,
    },
    /// Route a previously un-routed edge.
    RouteEdge { edge: EdgeId },
}

pub fn plan(g: &Graph, chains: &[Chain]) -> Vec<Action> {
    let mut actions = Vec::new();
    let mut scheduled: FxHashSet<EdgeId> = FxHashSet::default();

    for chain in chains {
        let mut index: FxHashMap<NodeId, usize> = FxHashMap::default();
        for (ix, &id) in chain.nodes.iter().enumerate() {
            index.insert(id, ix);
        }

        // The spine: first node free-standing, the rest at minlen distance from their parent.
        if let Some(&head) = chain.nodes.first() {
            actions.push(Action::PlaceNode {
                node: head,
                tries: 0,
            });
        }
        for pair in chain.nodes.windows(2) {
            let (parent, node) = (pair[0], pair[1]);
            match link_edge(g, parent, node, &scheduled) {
                Some(edge) => {
                    scheduled.insert(edge);
                    actions.push(Action::PlaceChained {
                        node,
                        parent,
                        edge,
                        distance: g.edge(edge).minlen(),
                        tries: 0,
                    });
                }
                None => actions.push(Action::PlaceNode {
                    node,
                    tries: 0,
                }),
            }
        }

        // Internal non-chain edges, shortest chain span first; stable on ties.
        let mut internal: Vec<(usize, EdgeId)> = Vec::new();
        for e in g.edges() {
            if scheduled.contains(&e.id()) || e.is_self_loop() {
                continue;
            }
            if let (Some(&fi), Some(&ti)) = (index.get(&e.from()), index.get(&e.to())) {
                internal.push((fi.abs_diff(ti), e.id()));
            }
        }
        internal.sort_by_key(|&(span, _)| span);
        for (_, edge) in internal {
            scheduled.insert(edge);
            actions.push(Action::RouteEdge { edge });
        }

        // Self-loops on chain nodes.
        for &id in &chain.nodes {
            for &e in g.node(id).out_edges() {
                if g.edge(e).is_self_loop() && scheduled.insert(e) {
                    actions.push(Action::RouteEdge { edge: e });
                }
            }
        }
    }

    // Stragglers: nodes outside every chain, then whatever edges are left (cross-chain).
    for id in g.node_ids() {
        if g.node(id).chain.is_none() {
            actions.push(Action::PlaceNode {
                node: id,
                tries: 0,
            });
        }
    }
    for e in g.edge_ids() {
        if scheduled.insert(e) {
            actions.push(Action::RouteEdge { edge: e });
        }
    }

    actions
}

/// The first unscheduled edge from `parent` to `node`, in insertion order.
fn link_edge(
    g: &Graph,
    parent: NodeId,
    node: NodeId,
    scheduled: &FxHashSet<EdgeId>,
) -> Option<EdgeId> {
    g.node(parent)
        .out_edges()
        .iter()
        .copied()
        .find(|&e| g.edge(e).to() == node && !scheduled.contains(&e))
}
