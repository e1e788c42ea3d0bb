//! Small geometry helpers shared by the placer and the router.

use moray_graph::{Dir, Node};

pub fn manhattan(a: (i32, i32), b: (i32, i32)) -> i32 {
    (a.0 - b.0).abs() + (a.1 - b.1).abs()
}

/// The four directions rotated so the flow direction comes first. Candidate rings and port
/// preferences follow this order, which is what makes east-flow layouts read left to right.
pub fn flow_order(flow: Dir) -> [Dir; 4] {
    match flow {
        Dir::East => [Dir::East, Dir::South, Dir::West, Dir::North],
        Dir::South => [Dir::South, Dir::West, Dir::North, Dir::East],
        Dir::West => [Dir::West, Dir::North, Dir::East, Dir::South],
        Dir::North => [Dir::North, Dir::East, Dir::South, Dir::West],
    }
}

/// The midline cell of the face perpendicular to `face`, i.e. the row (for east/west faces) or
/// column (for north/south faces) an edge prefers to attach at.
pub fn midline(rect: (i32, i32, u16, u16), face: Dir) -> i32 {
    let (x, y, cx, cy) = rect;
    if face.is_horizontal() {
        y + (cy as i32 - 1) / 2
    } else {
        x + (cx as i32 - 1) / 2
    }
}

/// The cell just beyond `face` of the node at its midline, shifted by `offset` along the
/// perpendicular axis. This is where an edge leaves or enters the node.
pub fn port(node: &Node, face: Dir, offset: i32) -> Option<(i32, i32)> {
    let rect = node.rect()?;
    let (x, y, cx, cy) = rect;
    let mid = midline(rect, face) + offset;
    Some(match face {
        Dir::East => (x + cx as i32, mid),
        Dir::West => (x - 1, mid),
        Dir::South => (mid, y + cy as i32),
        Dir::North => (mid, y - 1),
    })
}
