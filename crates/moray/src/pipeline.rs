//! The layout pipeline entry point.
//!
//! This module hosts the public `layout` call and keeps `lib.rs` focused on crate-level
//! exports. A run is: reset derived state, assign parallel-bundle offsets, rank, detect
//! chains, plan actions, execute. Synchronous, no I/O, deterministic for a given graph.

use crate::executor::{self, LayoutReport};
use crate::{chain, plan, rank};
use moray_graph::{Graph, NodeId};
use rustc_hash::FxHashMap;
use tracing::debug;

/// Lays the graph out on the grid. The graph's nodes gain ranks, positions, and footprints;
/// edges gain offsets and routed paths; the cell map fills in. Never fails for input-data
/// reasons: unplaceable nodes and unroutable edges are reported and skipped.
pub fn layout(g: &mut Graph) -> LayoutReport {
    g.reset_layout();
    if g.node_count() == 0 {
        return LayoutReport::default();
    }

    assign_offsets(g);
    rank::assign_ranks(g);
    let chains = chain::detect_chains(g);
    debug!(
        nodes = g.node_count(),
        edges = g.edge_count(),
        chains = chains.len(),
        "layout starting"
    );
    let actions = plan::plan(g, &chains);
    executor::run(g, actions)
}

/// Spreads the members of each parallel bundle across offsets `0, +1, -1, +2, -2, ...` in edge
/// insertion order. Self-loops keep offset 0.
fn assign_offsets(g: &mut Graph) {
    let mut counts: FxHashMap<(NodeId, NodeId), u32> = FxHashMap::default();
    for e in g.edge_ids().collect::<Vec<_>>() {
        if g.edge(e).is_self_loop() {
            continue;
        }
        let key = g.edge(e).bundle_key();
        let ix = counts.entry(key).or_insert(0);
        g.edge_mut(e).offset = spread(*ix);
        *ix += 1;
    }
}

fn spread(ix: u32) -> i32 {
    if ix == 0 {
        0
    } else if ix % 2 == 1 {
        (ix as i32 + 1) / 2
    } else {
        -(ix as i32 / 2)
    }
}
