//! Chain detection: maximal linear runs of nodes, merged greedily at forks.
//!
//! Chains give the placer a spine to lay down in geometric succession, which keeps the common
//! pipeline-shaped subgraph on the cheap straight-path tier of the router. Every node ends up
//! in exactly one chain (possibly alone), and the chain list is globally ordered: the chain
//! holding the root first, then longer before shorter, then alphabetical by start node.

use crate::rank;
use moray_graph::{Graph, NodeId};
use rustc_hash::FxHashSet;

#[derive(Debug, Clone, Default)]
pub struct Chain {
    pub nodes: Vec<NodeId>,
}

impl Chain {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn start(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }
}

/// Covers every node with chains and returns them sorted. Also stamps `chain` on each node
/// with its index into the returned list.
pub fn detect_chains(g: &mut Graph) -> Vec<Chain> {
    let mut slots: Vec<Option<Chain>> = Vec::new();
    for id in g.node_ids().collect::<Vec<_>>() {
        if g.node(id).chain.is_none() {
            build_chain(g, id, &mut slots);
        }
    }

    let mut chains: Vec<Chain> = slots.into_iter().flatten().collect();

    let root = rank::find_root(g);
    chains.sort_by(|a, b| {
        let a_root = root.is_some_and(|r| a.nodes.contains(&r));
        let b_root = root.is_some_and(|r| b.nodes.contains(&r));
        b_root
            .cmp(&a_root)
            .then(b.len().cmp(&a.len()))
            .then_with(|| {
                let an = a.start().map(|id| g.node(id).name()).unwrap_or("");
                let bn = b.start().map(|id| g.node(id).name()).unwrap_or("");
                an.cmp(bn)
            })
    });

    for (ix, chain) in chains.iter().enumerate() {
        for &id in &chain.nodes {
            g.node_mut(id).chain = Some(ix as u32);
        }
    }
    chains
}

/// Builds the chain starting at `start`, registering it (and any side chains produced while
/// resolving forks) in `slots`. Returns the slot index of the built chain.
fn build_chain(g: &mut Graph, start: NodeId, slots: &mut Vec<Option<Chain>>) -> usize {
    let cid = slots.len();
    slots.push(Some(Chain::default()));
    append(g, slots, cid, start);

    let mut cur = start;
    loop {
        let candidates = unique_successors(g, cur);
        match candidates.len() {
            0 => break,
            1 => {
                let next = candidates[0];
                append(g, slots, cid, next);
                cur = next;
            }
            _ => {
                // Fork: grow a chain out of each branch, keep the longest as our own tail.
                // Earlier branches may swallow later candidates, hence the re-check.
                let mut best: Option<usize> = None;
                for cand in candidates {
                    if g.node(cand).chain.is_some() {
                        continue;
                    }
                    let sub = build_chain(g, cand, slots);
                    let sub_len = slots[sub].as_ref().map(|c| c.len()).unwrap_or(0);
                    let best_len = best
                        .and_then(|b| slots[b].as_ref())
                        .map(|c| c.len())
                        .unwrap_or(0);
                    if best.is_none() || sub_len > best_len {
                        best = Some(sub);
                    }
                }
                if let Some(winner) = best {
                    splice(g, slots, cid, winner);
                }
                break;
            }
        }
    }
    cid
}

/// Unique successors of `cur` eligible to extend the current chain: targets of outgoing edges,
/// minus self-loops, duplicates, and anything already chained (this chain included).
fn unique_successors(g: &Graph, cur: NodeId) -> Vec<NodeId> {
    let mut seen: FxHashSet<NodeId> = FxHashSet::default();
    let mut out = Vec::new();
    for w in g.successors(cur) {
        if !seen.insert(w) {
            continue;
        }
        if g.node(w).chain.is_some() {
            continue;
        }
        out.push(w);
    }
    out
}

fn append(g: &mut Graph, slots: &mut [Option<Chain>], cid: usize, node: NodeId) {
    g.node_mut(node).chain = Some(cid as u32);
    if let Some(chain) = slots[cid].as_mut() {
        chain.nodes.push(node);
    }
}

/// Moves the nodes of chain `sub` onto the tail of chain `cid` and retires `sub`'s slot.
fn splice(g: &mut Graph, slots: &mut [Option<Chain>], cid: usize, sub: usize) {
    let Some(sub_chain) = slots[sub].take() else {
        return;
    };
    for &id in &sub_chain.nodes {
        g.node_mut(id).chain = Some(cid as u32);
    }
    if let Some(chain) = slots[cid].as_mut() {
        chain.nodes.extend(sub_chain.nodes);
    }
}
