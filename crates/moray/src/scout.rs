//! The edge router ("scout"): straight corridor, then L-bend, then penalty-weighted A*.
//!
//! `find_path` computes a route as an ordered run of typed cells from the source's exit cell to
//! the target's entry cell, without writing anything: the executor commits paths only after the
//! whole route is known. An empty result signals failure.
//!
//! A* is hard-bounded (visited count and open-list size) so routing time stays bounded under
//! pathological graphs; exceeding a bound is an ordinary routing failure.

use crate::typer;
use crate::util::{manhattan, port};
use moray_graph::{CellKind, Dir, Edge, EdgeCellType, EdgeShape, Graph, Node};
use rustc_hash::FxHashMap;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use tracing::trace;

/// Cost of stepping across an existing (perpendicular) edge cell.
const CROSS_COST: i32 = 30;
/// Cost of changing direction relative to the previous move.
const TURN_COST: i32 = 6;
/// A* gives up after popping this many states.
const VISIT_LIMIT: usize = 500;
/// A* gives up when the open list outgrows this.
const OPEN_LIMIT: usize = 1000;

/// One routed cell: position plus the bit-encoded type the renderer consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathCell {
    pub x: i32,
    pub y: i32,
    pub ty: EdgeCellType,
}

/// Routes `edge`. Returns the path exit-cell-first, or an empty vector when all tiers fail.
pub fn find_path(g: &Graph, edge: &Edge) -> Vec<PathCell> {
    if edge.is_self_loop() {
        return loop_path(g, edge);
    }
    let src = g.node(edge.from());
    let dst = g.node(edge.to());
    if !src.is_placed() || !dst.is_placed() {
        return Vec::new();
    }

    if let Some(path) = straight(g, edge, src, dst) {
        return path;
    }
    if let Some(path) = l_bend(g, edge, src, dst) {
        return path;
    }
    astar(g, edge, src, dst).unwrap_or_default()
}

/// Stamps the label flag (and text association downstream) onto the first cell.
fn finish(mut cells: Vec<PathCell>, start_side: Dir, end_side: Dir) -> Vec<PathCell> {
    if let Some(first) = cells.first_mut() {
        first.ty = first
            .ty
            .with_flags(EdgeCellType::start_flag(start_side) | EdgeCellType::LABEL);
    }
    if let Some(last) = cells.last_mut() {
        last.ty = last.ty.with_flags(EdgeCellType::end_flag(end_side));
    }
    cells
}

/// True when another edge out of the same source already starts in this cell: the port is
/// shared and the two runs merge into a joint cell.
fn start_joinable(g: &Graph, edge: &Edge, pos: (i32, i32)) -> bool {
    match g.cells.get(pos.0, pos.1).map(|c| c.kind) {
        Some(CellKind::Edge(other, ty)) => {
            let o = g.edge(other);
            o.bundle_key() != edge.bundle_key()
                && o.from() == edge.from()
                && ty.start_dir().is_some()
        }
        _ => false,
    }
}

/// True when another edge into the same target already ends in this cell.
fn end_joinable(g: &Graph, edge: &Edge, pos: (i32, i32)) -> bool {
    match g.cells.get(pos.0, pos.1).map(|c| c.kind) {
        Some(CellKind::Edge(other, ty)) => {
            let o = g.edge(other);
            o.bundle_key() != edge.bundle_key()
                && o.to() == edge.to()
                && ty.end_dir().is_some()
        }
        _ => false,
    }
}

/// Tier 1: a free straight corridor between facing node borders, shifted by the parallel
/// offset on the perpendicular axis. A one-cell corridor is the "short edge" case: a single
/// cell carrying both attachment flags.
fn straight(g: &Graph, edge: &Edge, src: &Node, dst: &Node) -> Option<Vec<PathCell>> {
    let (sx, sy, scx, scy) = src.rect()?;
    let (dx, dy, dcx, dcy) = dst.rect()?;

    // Horizontal corridor: midline rows agree, boxes are horizontally disjoint.
    let smy = sy + (scy as i32 - 1) / 2;
    let dmy = dy + (dcy as i32 - 1) / 2;
    if smy == dmy && (dx >= sx + scx as i32 || sx >= dx + dcx as i32) {
        let row = smy + edge.offset;
        let (travel, from, to) = if dx >= sx + scx as i32 {
            (Dir::East, sx + scx as i32, dx - 1)
        } else {
            (Dir::West, sx - 1, dx + dcx as i32)
        };
        return corridor(g, edge, travel, row, from, to, true);
    }

    // Vertical corridor: midline columns agree, boxes are vertically disjoint.
    let smx = sx + (scx as i32 - 1) / 2;
    let dmx = dx + (dcx as i32 - 1) / 2;
    if smx == dmx && (dy >= sy + scy as i32 || sy >= dy + dcy as i32) {
        let col = smx + edge.offset;
        let (travel, from, to) = if dy >= sy + scy as i32 {
            (Dir::South, sy + scy as i32, dy - 1)
        } else {
            (Dir::North, sy - 1, dy + dcy as i32)
        };
        return corridor(g, edge, travel, col, from, to, false);
    }

    None
}

/// Builds the straight run from `from` to `to` along `fixed` (a row when `horizontal`).
/// Interior cells must be free; the terminal cells may merge into a shared port. The one-cell
/// short edge stays strict: it needs its cell to itself.
fn corridor(
    g: &Graph,
    edge: &Edge,
    travel: Dir,
    fixed: i32,
    from: i32,
    to: i32,
    horizontal: bool,
) -> Option<Vec<PathCell>> {
    let len = (to - from).abs() + 1;
    if (travel == Dir::East || travel == Dir::South) && to < from {
        return None;
    }
    if (travel == Dir::West || travel == Dir::North) && to > from {
        return None;
    }

    let step = match travel {
        Dir::East | Dir::South => 1,
        Dir::West | Dir::North => -1,
    };
    let shape = if horizontal {
        EdgeShape::Hor
    } else {
        EdgeShape::Ver
    };

    let mut cells = Vec::with_capacity(len as usize);
    let mut v = from;
    loop {
        let (x, y) = if horizontal { (v, fixed) } else { (fixed, v) };
        let ok = if len == 1 {
            g.cells.is_free(x, y)
        } else if v == from {
            g.cells.is_free(x, y) || start_joinable(g, edge, (x, y))
        } else if v == to {
            g.cells.is_free(x, y) || end_joinable(g, edge, (x, y))
        } else {
            g.cells.is_free(x, y)
        };
        if !ok {
            return None;
        }
        cells.push(PathCell {
            x,
            y,
            ty: EdgeCellType::new(shape),
        });
        if v == to {
            break;
        }
        v += step;
    }

    Some(finish(cells, travel.opposite(), travel))
}

/// Tier 2: one bend. Variant A runs along the flow axis first and turns at the corner next to
/// the target; variant B turns at the exit cell and approaches the target along the flow axis.
fn l_bend(g: &Graph, edge: &Edge, src: &Node, dst: &Node) -> Option<Vec<PathCell>> {
    let flow = g.attrs.flow;
    let exit = port(src, flow, edge.offset)?;
    let entry = port(dst, flow.opposite(), edge.offset)?;
    if exit.0 == entry.0 || exit.1 == entry.1 {
        return None;
    }

    let corner_a = (entry.0, exit.1);
    let corner_b = (exit.0, entry.1);
    let (first, second) = if flow.is_horizontal() {
        (corner_a, corner_b)
    } else {
        (corner_b, corner_a)
    };

    bend_path(g, edge, exit, first, entry, flow)
        .or_else(|| bend_path(g, edge, exit, second, entry, flow))
}

/// The two-segment path exit -> corner -> entry, if every interior cell is free.
fn bend_path(
    g: &Graph,
    edge: &Edge,
    exit: (i32, i32),
    corner: (i32, i32),
    entry: (i32, i32),
    flow: Dir,
) -> Option<Vec<PathCell>> {
    let mut positions = segment(exit, corner)?;
    let tail = segment(corner, entry)?;
    positions.extend(tail.into_iter().skip(1));

    let last = positions.len() - 1;
    for (ix, &(x, y)) in positions.iter().enumerate() {
        let ok = if ix == 0 {
            g.cells.is_free(x, y) || start_joinable(g, edge, (x, y))
        } else if ix == last {
            g.cells.is_free(x, y) || end_joinable(g, edge, (x, y))
        } else {
            g.cells.is_free(x, y)
        };
        if !ok {
            return None;
        }
    }

    let types = typer::types_for_path(&positions, flow, flow);
    let cells = positions
        .into_iter()
        .zip(types)
        .map(|((x, y), ty)| PathCell { x, y, ty })
        .collect();
    Some(finish(cells, flow.opposite(), flow))
}

/// Inclusive axis-aligned run of positions from `a` to `b`.
fn segment(a: (i32, i32), b: (i32, i32)) -> Option<Vec<(i32, i32)>> {
    if a.0 == b.0 {
        let step = if b.1 >= a.1 { 1 } else { -1 };
        let mut out = Vec::new();
        let mut y = a.1;
        loop {
            out.push((a.0, y));
            if y == b.1 {
                break;
            }
            y += step;
        }
        Some(out)
    } else if a.1 == b.1 {
        let step = if b.0 >= a.0 { 1 } else { -1 };
        let mut out = Vec::new();
        let mut x = a.0;
        loop {
            out.push((x, a.1));
            if x == b.0 {
                break;
            }
            x += step;
        }
        Some(out)
    } else {
        None
    }
}

/// Tier 3: grid A* over 4-connected neighbors, biased toward straight non-crossing paths.
fn astar(g: &Graph, edge: &Edge, src: &Node, dst: &Node) -> Option<Vec<PathCell>> {
    let flow = g.attrs.flow;
    let start = port(src, flow, edge.offset)?;
    let goal = port(dst, flow.opposite(), edge.offset)?;
    if !g.cells.is_free(start.0, start.1) && !start_joinable(g, edge, start) {
        return None;
    }
    let goal_open = g.cells.is_free(goal.0, goal.1) || end_joinable(g, edge, goal);
    if !goal_open {
        return None;
    }

    type State = ((i32, i32), Dir);
    let mut best: FxHashMap<State, i32> = FxHashMap::default();
    let mut came_from: FxHashMap<State, State> = FxHashMap::default();
    let mut open: BinaryHeap<Reverse<(i32, u32, (i32, i32), Dir)>> = BinaryHeap::new();
    let mut seq: u32 = 0;

    // The virtual parent sits inside the source, so the first move's direction is the flow
    // direction the exit port faces.
    let start_state: State = (start, flow);
    best.insert(start_state, 0);
    open.push(Reverse((heuristic(start, goal), seq, start, flow)));

    let mut visited = 0usize;
    let mut goal_state: Option<State> = None;

    while let Some(Reverse((_, _, pos, dir))) = open.pop() {
        visited += 1;
        if visited > VISIT_LIMIT {
            trace!(edge = edge.id().index(), "a* visited limit reached");
            return None;
        }
        if pos == goal {
            goal_state = Some((pos, dir));
            break;
        }
        let Some(&cost) = best.get(&(pos, dir)) else {
            continue;
        };

        // On a crossed (occupied) cell the route must continue straight through. A shared
        // start port is exempt: merging into a joint there is the point.
        let on_occupied = pos != start && !g.cells.is_free(pos.0, pos.1);

        for d in [Dir::East, Dir::South, Dir::West, Dir::North] {
            if d == dir.opposite() {
                continue;
            }
            if on_occupied && d != dir {
                continue;
            }
            let next = d.step(pos);
            let crossing = match g.cells.get(next.0, next.1) {
                None => false,
                Some(cell) => match cell.kind {
                    CellKind::Node(_) => continue,
                    CellKind::Edge(other, ty) => {
                        if next == goal && end_joinable(g, edge, next) {
                            false
                        } else {
                            if g.edge(other).bundle_key() == edge.bundle_key() {
                                continue;
                            }
                            let perpendicular = match ty.shape() {
                                EdgeShape::Hor => !d.is_horizontal(),
                                EdgeShape::Ver => d.is_horizontal(),
                                _ => false,
                            };
                            if !perpendicular {
                                continue;
                            }
                            true
                        }
                    }
                },
            };

            let mut next_cost = cost + 1;
            if crossing {
                next_cost += CROSS_COST;
            }
            if d != dir {
                next_cost += TURN_COST;
            }

            let state = (next, d);
            if best.get(&state).is_none_or(|&c| next_cost < c) {
                best.insert(state, next_cost);
                came_from.insert(state, (pos, dir));
                seq += 1;
                open.push(Reverse((next_cost + heuristic(next, goal), seq, next, d)));
                if open.len() > OPEN_LIMIT {
                    trace!(edge = edge.id().index(), "a* open list limit reached");
                    return None;
                }
            }
        }
    }

    let mut state = goal_state?;
    let mut positions = vec![state.0];
    while state != start_state {
        let Some(&prev) = came_from.get(&state) else {
            break;
        };
        positions.push(prev.0);
        state = prev;
    }
    positions.reverse();

    let types = typer::types_for_path(&positions, flow, flow);
    let cells = positions
        .into_iter()
        .zip(types)
        .map(|((x, y), ty)| PathCell { x, y, ty })
        .collect();
    Some(finish(cells, flow.opposite(), flow))
}

fn heuristic(pos: (i32, i32), goal: (i32, i32)) -> i32 {
    let mut h = manhattan(pos, goal);
    if pos.0 != goal.0 && pos.1 != goal.1 {
        h += 1;
    }
    h
}

/// Self-loops route as a fixed five-cell bump over the node's north side, regardless of flow.
/// The closing cell uses the north loop marker and points back down into the node.
fn loop_path(g: &Graph, edge: &Edge) -> Vec<PathCell> {
    let node = g.node(edge.from());
    let Some((x, y, cx, _)) = node.rect() else {
        return Vec::new();
    };
    let ex = x + cx as i32;

    let cells: [(i32, i32, EdgeShape); 5] = [
        (ex, y, EdgeShape::Hor),
        (ex + 1, y, EdgeShape::CornerNW),
        (ex + 1, y - 1, EdgeShape::CornerSW),
        (ex, y - 1, EdgeShape::Hor),
        (ex - 1, y - 1, EdgeShape::LoopNorth),
    ];

    if cells.iter().any(|&(cx_, cy_, _)| !g.cells.is_free(cx_, cy_)) {
        return Vec::new();
    }

    finish(
        cells
            .into_iter()
            .map(|(cx_, cy_, shape)| PathCell {
                x: cx_,
                y: cy_,
                ty: EdgeCellType::new(shape),
            })
            .collect(),
        Dir::West,
        Dir::South,
    )
}
