use moray_graph::{Graph, RankSpec};

#[test]
fn add_node_is_get_or_insert_by_name() {
    let mut g = Graph::new();
    let a = g.add_node("a");
    let b = g.add_node("b");
    assert_ne!(a, b);
    assert_eq!(g.add_node("a"), a);
    assert_eq!(g.node_count(), 2);
}

#[test]
fn nodes_iterate_in_insertion_order() {
    let mut g = Graph::new();
    for name in ["z", "m", "a"] {
        g.add_node(name);
    }
    let names: Vec<&str> = g.nodes().map(|n| n.name()).collect();
    assert_eq!(names, ["z", "m", "a"]);
}

#[test]
fn adjacency_tracks_edge_insertion_order() {
    let mut g = Graph::new();
    let a = g.add_node("a");
    let b = g.add_node("b");
    let c = g.add_node("c");
    let ab = g.add_edge(a, b);
    let ac = g.add_edge(a, c);
    assert_eq!(g.node(a).out_edges(), &[ab, ac]);
    assert_eq!(g.node(b).in_edges(), &[ab]);
    let succ: Vec<_> = g.successors(a).collect();
    assert_eq!(succ, [b, c]);
}

#[test]
fn successors_skip_self_loops() {
    let mut g = Graph::new();
    let a = g.add_node("a");
    let b = g.add_node("b");
    g.add_edge(a, a);
    g.add_edge(a, b);
    let succ: Vec<_> = g.successors(a).collect();
    assert_eq!(succ, [b]);
    assert_eq!(g.in_degree(a), 0);
}

#[test]
fn anonymous_nodes_get_synthetic_names_and_blank_labels() {
    let mut g = Graph::new();
    let a = g.add_anon_node();
    let b = g.add_anon_node();
    assert_ne!(g.node(a).name(), g.node(b).name());
    assert!(g.node(a).label.is_empty());
}

#[test]
fn bundle_key_is_unordered() {
    let mut g = Graph::new();
    let a = g.add_node("a");
    let b = g.add_node("b");
    let ab = g.add_edge(a, b);
    let ba = g.add_edge(b, a);
    assert_eq!(g.edge(ab).bundle_key(), g.edge(ba).bundle_key());
}

#[test]
fn rank_spec_maps_user_layers_past_zero() {
    assert_eq!(RankSpec::Same.to_rank(), 0);
    assert_eq!(RankSpec::Level(0).to_rank(), 1);
    assert_eq!(RankSpec::Level(4).to_rank(), 5);
}

#[test]
fn reset_layout_clears_derived_state_only() {
    let mut g = Graph::new();
    let a = g.add_node("a");
    let b = g.add_node("b");
    let e = g.add_edge(a, b);
    g.node_mut(a).rank = Some(-1);
    g.node_mut(a).pos = Some((0, 0));
    g.node_mut(a).cx = 3;
    g.edge_mut(e).offset = 1;
    g.edge_mut(e).cells.push((1, 0));
    g.cells
        .insert(moray_graph::Cell::node(0, 0, a));

    g.reset_layout();

    assert_eq!(g.node(a).rank, None);
    assert_eq!(g.node(a).pos, None);
    assert_eq!(g.node(a).cx, 1);
    assert_eq!(g.edge(e).offset, 0);
    assert!(g.edge(e).cells.is_empty());
    assert!(g.cells.is_empty());
    assert_eq!(g.node_count(), 2);
}
