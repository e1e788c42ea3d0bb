use moray::graph::{Cell, Dir, EdgeCellType, EdgeShape, Graph, NodeId};
use moray::scout;

fn put(g: &mut Graph, id: NodeId, x: i32, y: i32) {
    g.node_mut(id).pos = Some((x, y));
    g.cells.insert(Cell::node(x, y, id));
}

fn shapes(path: &[scout::PathCell]) -> Vec<EdgeShape> {
    path.iter().map(|c| c.ty.shape()).collect()
}

fn positions(path: &[scout::PathCell]) -> Vec<(i32, i32)> {
    path.iter().map(|c| (c.x, c.y)).collect()
}

fn assert_connected(path: &[scout::PathCell]) {
    for pair in path.windows(2) {
        let dx = (pair[1].x - pair[0].x).abs();
        let dy = (pair[1].y - pair[0].y).abs();
        assert_eq!(dx + dy, 1, "consecutive path cells must be unit steps");
    }
}

#[test]
fn a_free_corridor_routes_straight() {
    let mut g = Graph::new();
    let a = g.add_node("a");
    let b = g.add_node("b");
    let e = g.add_edge(a, b);
    put(&mut g, a, 0, 0);
    put(&mut g, b, 4, 0);

    let path = scout::find_path(&g, g.edge(e));
    assert_eq!(positions(&path), [(1, 0), (2, 0), (3, 0)]);
    assert_eq!(shapes(&path), [EdgeShape::Hor, EdgeShape::Hor, EdgeShape::Hor]);
    assert_eq!(path[0].ty.start_dir(), Some(Dir::West));
    assert!(path[0].ty.has_flags(EdgeCellType::LABEL));
    assert_eq!(path[2].ty.end_dir(), Some(Dir::East));
}

#[test]
fn a_two_cell_gap_is_a_short_edge() {
    let mut g = Graph::new();
    let a = g.add_node("a");
    let b = g.add_node("b");
    let e = g.add_edge(a, b);
    put(&mut g, a, 0, 0);
    put(&mut g, b, 2, 0);

    let path = scout::find_path(&g, g.edge(e));
    assert_eq!(positions(&path), [(1, 0)]);
    assert_eq!(path[0].ty.shape(), EdgeShape::Hor);
    assert_eq!(path[0].ty.start_dir(), Some(Dir::West));
    assert_eq!(path[0].ty.end_dir(), Some(Dir::East));
    assert!(path[0].ty.has_flags(EdgeCellType::LABEL));
}

#[test]
fn vertical_corridors_work_in_both_directions() {
    let mut g = Graph::new();
    let a = g.add_node("a");
    let b = g.add_node("b");
    let down = g.add_edge(a, b);
    let up = g.add_edge(b, a);
    put(&mut g, a, 0, 0);
    put(&mut g, b, 0, 3);

    let path = scout::find_path(&g, g.edge(down));
    assert_eq!(positions(&path), [(0, 1), (0, 2)]);
    assert_eq!(path[0].ty.start_dir(), Some(Dir::North));
    assert_eq!(path[1].ty.end_dir(), Some(Dir::South));

    // The reverse edge has offset 0 too here, so its corridor collides with the first edge's
    // cells only once those are committed; uncommitted routing sees a free corridor.
    let path = scout::find_path(&g, g.edge(up));
    assert_eq!(positions(&path), [(0, 2), (0, 1)]);
    assert_eq!(path[0].ty.start_dir(), Some(Dir::South));
}

#[test]
fn misaligned_targets_take_one_bend() {
    let mut g = Graph::new();
    let a = g.add_node("a");
    let b = g.add_node("b");
    let e = g.add_edge(a, b);
    put(&mut g, a, 0, 0);
    put(&mut g, b, 4, 2);

    let path = scout::find_path(&g, g.edge(e));
    assert_eq!(
        positions(&path),
        [(1, 0), (2, 0), (3, 0), (3, 1), (3, 2)]
    );
    assert_eq!(
        shapes(&path),
        [
            EdgeShape::Hor,
            EdgeShape::Hor,
            EdgeShape::CornerSW,
            EdgeShape::Ver,
            EdgeShape::CornerNE,
        ]
    );
    assert_eq!(path[0].ty.start_dir(), Some(Dir::West));
    assert_eq!(path[4].ty.end_dir(), Some(Dir::East));
}

#[test]
fn the_second_bend_variant_covers_a_blocked_first_leg() {
    let mut g = Graph::new();
    let a = g.add_node("a");
    let b = g.add_node("b");
    let wall = g.add_node("w");
    let e = g.add_edge(a, b);
    put(&mut g, a, 0, 0);
    put(&mut g, b, 4, 2);
    // Block the horizontal-first leg right before its corner.
    put(&mut g, wall, 3, 0);

    let path = scout::find_path(&g, g.edge(e));
    assert_eq!(
        positions(&path),
        [(1, 0), (1, 1), (1, 2), (2, 2), (3, 2)]
    );
    assert_eq!(path[0].ty.shape(), EdgeShape::CornerSW);
    assert_eq!(path[4].ty.shape(), EdgeShape::Hor);
    assert_eq!(path[4].ty.end_dir(), Some(Dir::East));
}

#[test]
fn a_star_detours_around_a_blocking_node() {
    let mut g = Graph::new();
    let a = g.add_node("a");
    let b = g.add_node("b");
    let wall = g.add_node("w");
    let e = g.add_edge(a, b);
    put(&mut g, a, 0, 0);
    put(&mut g, b, 4, 0);
    put(&mut g, wall, 2, 0);

    let path = scout::find_path(&g, g.edge(e));
    assert!(!path.is_empty());
    assert_connected(&path);
    let pos = positions(&path);
    assert_eq!(pos.first(), Some(&(1, 0)), "begins at the exit cell");
    assert_eq!(pos.last(), Some(&(3, 0)), "ends at the entry cell");
    assert!(!pos.contains(&(2, 0)), "never enters the blocking node");
}

#[test]
fn a_star_crosses_a_long_perpendicular_edge_rather_than_detouring() {
    let mut g = Graph::new();
    let a = g.add_node("a");
    let b = g.add_node("b");
    let c = g.add_node("c");
    let d = g.add_node("d");
    let cd = g.add_edge(c, d);
    let e = g.add_edge(a, b);
    put(&mut g, a, 0, 0);
    put(&mut g, b, 4, 0);
    put(&mut g, c, 2, 5);
    put(&mut g, d, 2, -5);
    for y in -4..=4 {
        g.cells
            .insert(Cell::edge(2, y, cd, EdgeCellType::new(EdgeShape::Ver)));
    }

    let path = scout::find_path(&g, g.edge(e));
    assert!(!path.is_empty());
    assert_connected(&path);
    let pos = positions(&path);
    assert_eq!(pos, [(1, 0), (2, 0), (3, 0)], "straight through the wall");
}

#[test]
fn self_loops_bump_over_the_node() {
    let mut g = Graph::new();
    let a = g.add_node("a");
    let e = g.add_edge(a, a);
    put(&mut g, a, 0, 0);

    let path = scout::find_path(&g, g.edge(e));
    assert_eq!(
        positions(&path),
        [(1, 0), (2, 0), (2, -1), (1, -1), (0, -1)]
    );
    assert_eq!(
        shapes(&path),
        [
            EdgeShape::Hor,
            EdgeShape::CornerNW,
            EdgeShape::CornerSW,
            EdgeShape::Hor,
            EdgeShape::LoopNorth,
        ]
    );
    assert_eq!(path[0].ty.start_dir(), Some(Dir::West));
    assert_eq!(path[4].ty.end_dir(), Some(Dir::South));
}

#[test]
fn self_loop_geometry_ignores_the_flow_direction() {
    let mut g = Graph::new();
    g.attrs.flow = Dir::South;
    let a = g.add_node("a");
    let e = g.add_edge(a, a);
    put(&mut g, a, 0, 0);

    // The bump is fixed: same north-side cells as under the default east flow.
    let path = scout::find_path(&g, g.edge(e));
    assert_eq!(
        positions(&path),
        [(1, 0), (2, 0), (2, -1), (1, -1), (0, -1)]
    );
    assert_eq!(path[4].ty.shape(), EdgeShape::LoopNorth);
    assert_eq!(path[0].ty.start_dir(), Some(Dir::West));
    assert_eq!(path[4].ty.end_dir(), Some(Dir::South));
}

#[test]
fn unplaced_endpoints_cannot_be_routed() {
    let mut g = Graph::new();
    let a = g.add_node("a");
    let b = g.add_node("b");
    let e = g.add_edge(a, b);
    put(&mut g, a, 0, 0);
    assert!(scout::find_path(&g, g.edge(e)).is_empty());
}

#[test]
fn parallel_offsets_shift_the_corridor_sideways() {
    let mut g = Graph::new();
    let a = g.add_node("a");
    let b = g.add_node("b");
    let e = g.add_edge(a, b);
    g.edge_mut(e).offset = 1;
    put(&mut g, a, 0, 0);
    put(&mut g, b, 4, 0);

    let path = scout::find_path(&g, g.edge(e));
    assert_eq!(positions(&path), [(1, 1), (2, 1), (3, 1)]);
}
