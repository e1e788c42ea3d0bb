//! Cell type determination from direction context.
//!
//! Once a route's positions are known, each cell's shape is reconstructed from the directions
//! of the moves entering and leaving it. Corners are named by the two cell sides that carry
//! line arms; a missing boundary direction falls back to the available one, which turns the
//! terminal cells of a straight run into plain horizontal/vertical segments.

use moray_graph::{Dir, EdgeCellType, EdgeShape};

/// The shape of a cell entered moving `inc` and left moving `out`.
pub fn shape_for(inc: Dir, out: Dir) -> EdgeShape {
    use Dir::*;
    match (inc, out) {
        (South, West) | (East, North) => EdgeShape::CornerNW,
        (South, East) | (West, North) => EdgeShape::CornerNE,
        (North, West) | (East, South) => EdgeShape::CornerSW,
        (North, East) | (West, South) => EdgeShape::CornerSE,
        _ if inc.is_horizontal() => EdgeShape::Hor,
        _ => EdgeShape::Ver,
    }
}

/// Computes the cell types of a routed path.
///
/// `first_in` is the direction of the virtual move out of the source node into the first cell;
/// `last_out` is the direction from the last cell into the target node. The returned types
/// carry no flags; the router stamps attachment, label, and short-edge flags.
pub fn types_for_path(path: &[(i32, i32)], first_in: Dir, last_out: Dir) -> Vec<EdgeCellType> {
    let mut types = Vec::with_capacity(path.len());
    for i in 0..path.len() {
        let inc = if i == 0 {
            first_in
        } else {
            step_dir(path[i - 1], path[i]).unwrap_or(first_in)
        };
        let out = if i + 1 == path.len() {
            last_out
        } else {
            step_dir(path[i], path[i + 1]).unwrap_or(last_out)
        };
        types.push(EdgeCellType::new(shape_for(inc, out)));
    }
    types
}

fn step_dir(from: (i32, i32), to: (i32, i32)) -> Option<Dir> {
    Dir::from_delta(to.0 - from.0, to.1 - from.1)
}
