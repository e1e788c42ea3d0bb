//! Rank assignment (topological layering with user overrides).
//!
//! Ranks are signed: auto-derived layers are negative (the root sits at -1 and successors walk
//! away from zero), user-declared layers are positive after a +1 shift, and 0 is reserved for
//! the "same" constraint. `|rank|` gives the single ordering the rest of the engine uses.
//!
//! There is no failure mode here. Cycles simply stop producing unranked successors and the
//! fallback seeding step picks up whatever is left, one island at a time.

use moray_graph::{Graph, NodeId};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// The node ranking starts from: the explicit graph-level `root` attribute if it names a node,
/// else the first node marked `root`, else the first node with no incoming non-self-loop edge,
/// else the first node.
pub fn find_root(g: &Graph) -> Option<NodeId> {
    if let Some(name) = g.attrs.root.as_deref() {
        if let Some(id) = g.node_by_name(name) {
            return Some(id);
        }
    }
    g.node_ids()
        .find(|&id| g.node(id).attrs.root)
        .or_else(|| g.node_ids().find(|&id| g.in_degree(id) == 0))
        .or_else(|| g.node_ids().next())
}

/// Assigns every node a finite rank. After this returns, `rank` is `Some` on all nodes, and for
/// every non-self-loop edge `u -> v` whose endpoints are not mutually reachable,
/// `|rank(v)| > |rank(u)|`.
pub fn assign_ranks(g: &mut Graph) {
    let Some(root) = find_root(g) else {
        return;
    };

    // User-declared layers first: they pre-rank their nodes and the priority queue services
    // them before the deeper auto layers because |rank| is small near zero.
    for id in g.node_ids().collect::<Vec<_>>() {
        if let Some(spec) = g.node(id).attrs.rank {
            g.node_mut(id).rank = Some(spec.to_rank());
        }
    }

    // The root and every other source node seed the auto layers at -1.
    for id in g.node_ids().collect::<Vec<_>>() {
        if g.node(id).rank.is_none() && (id == root || g.in_degree(id) == 0) {
            g.node_mut(id).rank = Some(-1);
        }
    }

    let mut heap: BinaryHeap<Reverse<(i32, u32, NodeId)>> = BinaryHeap::new();
    let mut seq: u32 = 0;
    for id in g.node_ids() {
        if let Some(r) = g.node(id).rank {
            heap.push(Reverse((r.abs(), seq, id)));
            seq += 1;
        }
    }

    drain(g, &mut heap, &mut seq);

    // Disconnected islands (including pure cycles with no source) get seeded at -1 one at a
    // time until everything is ranked.
    while let Some(seed) = g.node_ids().collect::<Vec<_>>().into_iter().find(|&id| g.node(id).rank.is_none()) {
        g.node_mut(seed).rank = Some(-1);
        heap.push(Reverse((1, seq, seed)));
        seq += 1;
        drain(g, &mut heap, &mut seq);
    }
}

fn drain(g: &mut Graph, heap: &mut BinaryHeap<Reverse<(i32, u32, NodeId)>>, seq: &mut u32) {
    while let Some(Reverse((_, _, id))) = heap.pop() {
        let r = g.node(id).rank.unwrap_or(-1);
        // Step away from zero so |rank| strictly grows along edges in both the auto
        // (negative) and user (positive) regimes.
        let next = if r < 0 { r - 1 } else { r + 1 };
        let succs: Vec<NodeId> = g.successors(id).collect();
        for w in succs {
            if g.node(w).rank.is_none() {
                g.node_mut(w).rank = Some(next);
                heap.push(Reverse((next.abs(), *seq, w)));
                *seq += 1;
            }
        }
    }
}
