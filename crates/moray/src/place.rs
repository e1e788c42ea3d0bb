//! Node placement: prioritized candidate strategies with all-or-nothing grid commits.
//!
//! Placement never leaves partial state behind: the full candidate rectangle is verified free
//! before any cell is written, and `remove_node` undoes a commit completely so the executor can
//! backtrack. `tries` skips the first k candidates, which is how the executor explores
//! alternatives after a downstream routing failure.

use crate::util::{flow_order, midline};
use moray_graph::{Cell, Dir, Graph, NodeId};
use rustc_hash::FxHashSet;
use tracing::trace;

/// Character columns one grid cell maps to in the rasterizer; fixes the label-length to
/// grid-footprint mapping.
const CELL_TEXT_WIDTH: usize = 5;

/// Safety limit for the column-scan fallback.
const SCAN_LIMIT: i32 = 100;

/// Tries to place `node`, skipping the first `tries` candidate positions. On success the node
/// has a position and owns its cells; on failure nothing changed.
pub fn place_node(
    g: &mut Graph,
    node: NodeId,
    tries: u32,
    parent: Option<(NodeId, u16)>,
) -> bool {
    size_node(g, node);
    let (cx, cy) = (g.node(node).cx, g.node(node).cy);
    let flow = g.attrs.flow;

    let mut candidates: Vec<(i32, i32)> = Vec::new();
    let mut seen: FxHashSet<(i32, i32)> = FxHashSet::default();
    let mut push = |cands: &mut Vec<(i32, i32)>, pos: (i32, i32)| {
        if seen.insert(pos) {
            cands.push(pos);
        }
    };

    // Strategy 1: chained placement around the placed parent, flow side first.
    if let Some((parent_id, distance)) = parent {
        if let Some(rect) = g.node(parent_id).rect() {
            for pos in face_ring(rect, distance as i32 + 1, (cx, cy), flow) {
                push(&mut candidates, pos);
            }
        }
    }

    // Strategy 2: the origin, for the very first attempt at an unconstrained node.
    if parent.is_none() && tries == 0 {
        push(&mut candidates, (0, 0));
    }

    // Strategy 3: relative to already-placed predecessors.
    let preds: Vec<NodeId> = {
        let mut seen_ids = FxHashSet::default();
        g.predecessors(node)
            .filter(|&p| seen_ids.insert(p) && g.node(p).is_placed())
            .collect()
    };
    if preds.len() >= 2 {
        for i in 0..preds.len() {
            for j in i + 1..preds.len() {
                let a = g.node(preds[i]).pos.unwrap_or_default();
                let b = g.node(preds[j]).pos.unwrap_or_default();
                if a.0 != b.0 && a.1 != b.1 {
                    push(&mut candidates, (a.0, b.1));
                    push(&mut candidates, (b.0, a.1));
                } else {
                    push(&mut candidates, ((a.0 + b.0) / 2, (a.1 + b.1) / 2));
                }
            }
        }
    }
    for &p in &preds {
        if let Some(rect) = g.node(p).rect() {
            for d in [2, 4] {
                for pos in face_ring(rect, d, (cx, cy), flow) {
                    push(&mut candidates, pos);
                }
            }
        }
    }

    // Strategy 4: relative to already-placed successors.
    let succs: Vec<NodeId> = {
        let mut seen_ids = FxHashSet::default();
        g.successors(node)
            .filter(|&s| seen_ids.insert(s) && g.node(s).is_placed())
            .collect()
    };
    for &s in &succs {
        if let Some(rect) = g.node(s).rect() {
            for d in [2, 4] {
                for pos in face_ring(rect, d, (cx, cy), flow) {
                    push(&mut candidates, pos);
                }
            }
        }
    }

    // Strategy 5: column scan below the first placed predecessor (or the origin column).
    let (scan_x, scan_y) = preds
        .first()
        .and_then(|&p| g.node(p).pos)
        .unwrap_or((0, 0));
    for step in 0..SCAN_LIMIT {
        push(&mut candidates, (scan_x, scan_y + 2 * step));
    }

    for pos in candidates.into_iter().skip(tries as usize) {
        if g.cells.is_free_rect(pos.0, pos.1, cx, cy) {
            occupy(g, node, pos);
            return true;
        }
    }
    trace!(node = node.index(), tries, "no free candidate position");
    false
}

/// Clears every grid cell the node owns and unsets its position.
pub fn remove_node(g: &mut Graph, node: NodeId) {
    let Some((x, y, cx, cy)) = g.node(node).rect() else {
        return;
    };
    for yy in y..y + cy as i32 {
        for xx in x..x + cx as i32 {
            g.cells.remove(xx, yy);
        }
    }
    g.node_mut(node).pos = None;
}

/// Derives the node's grid footprint from its label, honoring the min size overrides.
fn size_node(g: &mut Graph, node: NodeId) {
    let n = g.node(node);
    let label_len = n.label.chars().count();
    let mut cx = ((label_len + 2).div_ceil(CELL_TEXT_WIDTH)).max(1) as u16;
    let mut cy: u16 = 1;
    if let Some(minwidth) = n.attrs.minwidth {
        cx = cx.max(minwidth.max(1));
    }
    if let Some(minheight) = n.attrs.minheight {
        cy = cy.max(minheight.max(1));
    }
    let n = g.node_mut(node);
    n.cx = cx;
    n.cy = cy;
}

fn occupy(g: &mut Graph, node: NodeId, pos: (i32, i32)) {
    let (cx, cy) = (g.node(node).cx, g.node(node).cy);
    g.node_mut(node).pos = Some(pos);
    for yy in pos.1..pos.1 + cy as i32 {
        for xx in pos.0..pos.0 + cx as i32 {
            g.cells.insert(Cell::node(xx, yy, node));
        }
    }
}

/// Candidate origins for a `(cx, cy)`-sized node at grid distance `d` around the anchor
/// rectangle, one run per face, faces in flow order. For a single-cell anchor this degenerates
/// to the four compass positions at distance `d`.
fn face_ring(
    anchor: (i32, i32, u16, u16),
    d: i32,
    size: (u16, u16),
    flow: Dir,
) -> Vec<(i32, i32)> {
    let (ax, ay, acx, acy) = anchor;
    let (cx, cy) = (size.0 as i32, size.1 as i32);
    let mut out = Vec::new();
    for face in flow_order(flow) {
        match face {
            Dir::East => {
                let x = ax + acx as i32 - 1 + d;
                for yy in face_run(ay, acy, midline(anchor, Dir::East)) {
                    out.push((x, yy));
                }
            }
            Dir::South => {
                let y = ay + acy as i32 - 1 + d;
                for xx in face_run(ax, acx, midline(anchor, Dir::South)) {
                    out.push((xx, y));
                }
            }
            Dir::West => {
                let x = ax - d - (cx - 1);
                for yy in face_run(ay, acy, midline(anchor, Dir::West)) {
                    out.push((x, yy));
                }
            }
            Dir::North => {
                let y = ay - d - (cy - 1);
                for xx in face_run(ax, acx, midline(anchor, Dir::North)) {
                    out.push((xx, y));
                }
            }
        }
    }
    out
}

/// The coordinates along one face, midline first, then outward in reading order.
fn face_run(start: i32, span: u16, mid: i32) -> Vec<i32> {
    let mut run: Vec<i32> = (start..start + span as i32).collect();
    run.sort_by_key(|&v| ((v - mid).abs(), v));
    run
}
