use moray_graph::{Cell, CellMap, Dir, EdgeCellType, EdgeShape, Graph};

#[test]
fn at_most_one_cell_per_coordinate() {
    let mut g = Graph::new();
    let a = g.add_node("a");
    let b = g.add_node("b");
    let mut cells = CellMap::new();
    cells.insert(Cell::node(2, 3, a));
    cells.insert(Cell::node(2, 3, b));
    assert_eq!(cells.len(), 1);
    assert_eq!(cells.get(2, 3).map(|c| c.kind), Some(moray_graph::CellKind::Node(b)));
}

#[test]
fn free_rect_spots_any_occupied_cell() {
    let mut g = Graph::new();
    let a = g.add_node("a");
    let mut cells = CellMap::new();
    cells.insert(Cell::node(1, 1, a));
    assert!(cells.is_free_rect(2, 2, 2, 1));
    assert!(!cells.is_free_rect(0, 0, 2, 2));
}

#[test]
fn sorted_is_row_major() {
    let mut g = Graph::new();
    let a = g.add_node("a");
    let mut cells = CellMap::new();
    for (x, y) in [(3, 1), (0, 0), (1, 1), (2, 0)] {
        cells.insert(Cell::node(x, y, a));
    }
    let order: Vec<(i32, i32)> = cells.sorted().iter().map(|c| (c.x, c.y)).collect();
    assert_eq!(order, [(0, 0), (2, 0), (1, 1), (3, 1)]);
}

#[test]
fn bounds_cover_all_cells() {
    let mut g = Graph::new();
    let a = g.add_node("a");
    let mut cells = CellMap::new();
    assert_eq!(cells.bounds(), None);
    cells.insert(Cell::node(-2, 4, a));
    cells.insert(Cell::node(5, -1, a));
    assert_eq!(cells.bounds(), Some((-2, -1, 5, 4)));
}

#[test]
fn type_encoding_keeps_shape_and_flags_orthogonal() {
    let ty = EdgeCellType::new(EdgeShape::Hor)
        .with_flags(EdgeCellType::start_flag(Dir::West))
        .with_flags(EdgeCellType::LABEL);
    assert_eq!(ty.shape(), EdgeShape::Hor);
    assert_eq!(ty.start_dir(), Some(Dir::West));
    assert_eq!(ty.end_dir(), None);
    assert!(ty.has_flags(EdgeCellType::LABEL));
    assert!(!ty.has_flags(EdgeCellType::HOLE));

    let crossed = ty.with_shape(EdgeShape::Cross);
    assert_eq!(crossed.shape(), EdgeShape::Cross);
    assert_eq!(crossed.start_dir(), Some(Dir::West), "flags survive a shape rewrite");
    assert!(crossed.has_flags(EdgeCellType::LABEL));
}

#[test]
fn a_short_edge_cell_carries_both_attachment_flags() {
    let ty = EdgeCellType::new(EdgeShape::Hor)
        .with_flags(EdgeCellType::start_flag(Dir::West) | EdgeCellType::end_flag(Dir::East));
    assert_eq!(ty.start_dir(), Some(Dir::West));
    assert_eq!(ty.end_dir(), Some(Dir::East));
}

#[test]
fn corner_arms_match_their_names() {
    assert_eq!(EdgeShape::CornerNE.arms(), (true, true, false, false));
    assert_eq!(EdgeShape::CornerSW.arms(), (false, false, true, true));
    assert_eq!(EdgeShape::JointSEW.arms(), (false, true, true, true));
    assert_eq!(EdgeShape::Cross.arms(), (true, true, true, true));
}

#[test]
fn loop_closers_are_distinct_and_close_toward_their_node_side() {
    // A north bump sits above its node and closes downward, and so on around the compass:
    // the closing arm of each marker points at the node side it names.
    let closers = [
        (EdgeShape::LoopNorth, Dir::South),
        (EdgeShape::LoopSouth, Dir::North),
        (EdgeShape::LoopEast, Dir::West),
        (EdgeShape::LoopWest, Dir::East),
    ];
    for (shape, closing) in closers {
        let (n, e, s, w) = shape.arms();
        let has_closing_arm = match closing {
            Dir::North => n,
            Dir::East => e,
            Dir::South => s,
            Dir::West => w,
        };
        assert!(has_closing_arm, "{shape:?} lacks its {closing:?} closing arm");
    }

    let mut arms: Vec<_> = closers.iter().map(|(shape, _)| shape.arms()).collect();
    arms.sort();
    arms.dedup();
    assert_eq!(arms.len(), 4, "the four loop markers must stay distinct");
}
