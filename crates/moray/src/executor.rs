//! The executor: drives the action list with bounded backtracking.
//!
//! Failed placements undo their grid writes, bump the action's try counter, and go back to the
//! front of the queue, paying one unit of the global budget. Failed routes are final. When the
//! budget runs out the remaining actions are abandoned and whatever has been placed and routed
//! so far stands — a degraded but bounded result is part of the contract.

use crate::place;
use crate::plan::Action;
use crate::scout::{self, PathCell};
use moray_graph::{Cell, CellKind, EdgeCellType, EdgeId, EdgeShape, Graph, NodeId};
use serde::Serialize;
use std::collections::VecDeque;
use tracing::debug;

/// Global placement retry budget per layout run.
const TRY_BUDGET: u32 = 16;

/// What a layout run produced, beyond the mutated graph itself. The score is diagnostic
/// output: routed path length plus 3 per crossing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LayoutReport {
    pub score: u32,
    pub unplaced: Vec<NodeId>,
    pub unrouted: Vec<EdgeId>,
    pub budget_spent: u32,
}

pub fn run(g: &mut Graph, actions: Vec<Action>) -> LayoutReport {
    let mut queue: VecDeque<Action> = actions.into();
    let mut budget = TRY_BUDGET;
    let mut score: u32 = 0;

    while let Some(action) = queue.pop_front() {
        match action {
            Action::PlaceNode { node, tries } => {
                if g.node(node).is_placed() {
                    continue;
                }
                if place::place_node(g, node, tries, None) {
                    continue;
                }
                debug!(node = g.node(node).name(), tries, "placement failed");
                budget -= 1;
                if budget == 0 {
                    break;
                }
                queue.push_front(Action::PlaceNode {
                    node,
                    tries: tries + 1,
                });
            }
            Action::PlaceChained {
                node,
                parent,
                edge,
                distance,
                tries,
            } => {
                let constraint = g
                    .node(parent)
                    .is_placed()
                    .then_some((parent, distance));
                let placed =
                    g.node(node).is_placed() || place::place_node(g, node, tries, constraint);

                let routed = placed && {
                    let path = scout::find_path(g, g.edge(edge));
                    !path.is_empty() && commit_path(g, edge, path, &mut score)
                };
                if routed {
                    continue;
                }
                if placed {
                    place::remove_node(g, node);
                }
                debug!(
                    node = g.node(node).name(),
                    tries, "chained placement failed"
                );
                budget -= 1;
                if budget == 0 {
                    break;
                }
                queue.push_front(Action::PlaceChained {
                    node,
                    parent,
                    edge,
                    distance,
                    tries: tries + 1,
                });
            }
            Action::RouteEdge { edge } => {
                if g.edge(edge).is_routed() {
                    continue;
                }
                let path = scout::find_path(g, g.edge(edge));
                if path.is_empty() || !commit_path(g, edge, path, &mut score) {
                    // No retry for routes: the edge stays unrouted.
                    debug!(edge = edge.index(), "route failed");
                }
            }
        }
    }

    let unplaced: Vec<NodeId> = g
        .node_ids()
        .filter(|&id| !g.node(id).is_placed())
        .collect();
    let unrouted: Vec<EdgeId> = g
        .edge_ids()
        .filter(|&id| !g.edge(id).is_routed())
        .collect();
    let budget_spent = TRY_BUDGET - budget;
    if !unplaced.is_empty() || !unrouted.is_empty() {
        debug!(
            unplaced = unplaced.len(),
            unrouted = unrouted.len(),
            budget_spent,
            "layout finished degraded"
        );
    }

    LayoutReport {
        score,
        unplaced,
        unrouted,
        budget_spent,
    }
}

/// Writes a routed path to the grid, all or nothing.
///
/// Every position must be free or a crossable perpendicular edge cell; a node cell anywhere in
/// the path refuses the whole write (that would break cell ownership). Crossings rewrite the
/// existing cell's shape to `Cross` and keep its owner; the new edge still records the position
/// in its own path.
fn commit_path(g: &mut Graph, edge: EdgeId, path: Vec<PathCell>, score: &mut u32) -> bool {
    let last = path.len() - 1;

    // Verify first: interior conflicts must be clean perpendicular crossings, terminal
    // conflicts must union into a valid shared-port joint.
    for (ix, cell) in path.iter().enumerate() {
        match g.cells.get(cell.x, cell.y).map(|c| c.kind) {
            None => {}
            Some(CellKind::Edge(_, ty)) => {
                let ok = if ix == 0 || ix == last {
                    join_shape(ty, cell.ty).is_some()
                } else {
                    crossable(ty.shape(), cell.ty.shape())
                };
                if !ok {
                    debug!(
                        edge = edge.index(),
                        x = cell.x,
                        y = cell.y,
                        "refusing conflicting path write"
                    );
                    return false;
                }
            }
            Some(CellKind::Node(_)) => {
                debug!(
                    edge = edge.index(),
                    x = cell.x,
                    y = cell.y,
                    "refusing to overwrite a node cell"
                );
                return false;
            }
        }
    }

    let mut crossings: u32 = 0;
    let label = g.edge(edge).label.clone();
    for (ix, cell) in path.iter().enumerate() {
        match g.cells.get_mut(cell.x, cell.y) {
            Some(existing) => {
                let CellKind::Edge(owner, ty) = existing.kind else {
                    continue;
                };
                if ix == 0 || ix == last {
                    if let Some(joined) = join_shape(ty, cell.ty) {
                        let flags = cell.ty.bits() & !EdgeCellType::SHAPE_MASK;
                        existing.kind = CellKind::Edge(owner, ty.with_shape(joined).with_flags(flags));
                        if existing.label.is_none() && cell.ty.has_flags(EdgeCellType::LABEL) {
                            existing.label = label.clone();
                        }
                    }
                } else {
                    existing.kind = CellKind::Edge(owner, ty.with_shape(EdgeShape::Cross));
                    crossings += 1;
                }
            }
            None => {
                let mut new_cell = Cell::edge(cell.x, cell.y, edge, cell.ty);
                if cell.ty.has_flags(EdgeCellType::LABEL) {
                    new_cell.label = label.clone();
                }
                g.cells.insert(new_cell);
            }
        }
    }

    let positions: Vec<(i32, i32)> = path.iter().map(|c| (c.x, c.y)).collect();
    *score += positions.len() as u32 + 3 * crossings;
    g.edge_mut(edge).cells = positions;
    true
}

/// A crossing is only valid straight through: one horizontal and one vertical segment.
fn crossable(existing: EdgeShape, incoming: EdgeShape) -> bool {
    matches!(
        (existing, incoming),
        (EdgeShape::Hor, EdgeShape::Ver) | (EdgeShape::Ver, EdgeShape::Hor)
    )
}

/// The joint shape produced by two edges sharing a terminal cell, if the union of their arms
/// is drawable and actually adds an arm (a full overlap is a conflict, not a join).
fn join_shape(existing: EdgeCellType, incoming: EdgeCellType) -> Option<EdgeShape> {
    let (en, ee, es, ew) = existing.shape().arms();
    let (inn, ine, ins, inw) = incoming.shape().arms();
    let union = (en || inn, ee || ine, es || ins, ew || inw);
    if union == (en, ee, es, ew) {
        return None;
    }
    EdgeShape::from_arms(union.0, union.1, union.2, union.3)
}
