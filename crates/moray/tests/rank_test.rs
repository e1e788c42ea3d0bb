use moray::graph::{Graph, NodeId, RankSpec};
use moray::rank;

fn path_graph(names: &[&str]) -> (Graph, Vec<NodeId>) {
    let mut g = Graph::new();
    let ids: Vec<NodeId> = names.iter().map(|n| g.add_node(*n)).collect();
    for pair in ids.windows(2) {
        g.add_edge(pair[0], pair[1]);
    }
    (g, ids)
}

fn assert_abs_rank_monotone(g: &Graph) {
    for e in g.edges() {
        if e.is_self_loop() {
            continue;
        }
        let u = g.node(e.from()).rank.unwrap();
        let v = g.node(e.to()).rank.unwrap();
        if u.signum() == v.signum() {
            assert!(
                v.abs() >= u.abs(),
                "edge {} -> {} shrinks |rank|: {} vs {}",
                g.node(e.from()).name(),
                g.node(e.to()).name(),
                u,
                v
            );
        }
    }
}

#[test]
fn linear_chain_ranks_walk_away_from_minus_one() {
    let (mut g, ids) = path_graph(&["a", "b", "c"]);
    rank::assign_ranks(&mut g);
    assert_eq!(g.node(ids[0]).rank, Some(-1));
    assert_eq!(g.node(ids[1]).rank, Some(-2));
    assert_eq!(g.node(ids[2]).rank, Some(-3));
}

#[test]
fn every_source_node_seeds_at_minus_one() {
    let mut g = Graph::new();
    let a = g.add_node("a");
    let b = g.add_node("b");
    let c = g.add_node("c");
    let d = g.add_node("d");
    g.add_edge(a, b);
    g.add_edge(c, d);
    rank::assign_ranks(&mut g);
    assert_eq!(g.node(a).rank, Some(-1));
    assert_eq!(g.node(c).rank, Some(-1));
    assert_eq!(g.node(b).rank, Some(-2));
    assert_eq!(g.node(d).rank, Some(-2));
}

#[test]
fn user_ranks_shift_by_one_and_same_maps_to_zero() {
    let mut g = Graph::new();
    let a = g.add_node("a");
    let b = g.add_node("b");
    g.node_mut(a).attrs.rank = Some(RankSpec::Level(3));
    g.node_mut(b).attrs.rank = Some(RankSpec::Same);
    rank::assign_ranks(&mut g);
    assert_eq!(g.node(a).rank, Some(4));
    assert_eq!(g.node(b).rank, Some(0));
}

#[test]
fn user_ranked_successors_keep_growing_in_magnitude() {
    let mut g = Graph::new();
    let a = g.add_node("a");
    let b = g.add_node("b");
    let c = g.add_node("c");
    g.node_mut(a).attrs.rank = Some(RankSpec::Level(1));
    g.add_edge(a, b);
    g.add_edge(b, c);
    rank::assign_ranks(&mut g);
    assert_eq!(g.node(a).rank, Some(2));
    assert_eq!(g.node(b).rank, Some(3));
    assert_eq!(g.node(c).rank, Some(4));
    assert_abs_rank_monotone(&g);
}

#[test]
fn cycle_ranks_from_the_first_node() {
    let mut g = Graph::new();
    let a = g.add_node("a");
    let b = g.add_node("b");
    let c = g.add_node("c");
    g.add_edge(a, b);
    g.add_edge(b, c);
    g.add_edge(c, a);
    rank::assign_ranks(&mut g);
    assert_eq!(g.node(a).rank, Some(-1));
    assert_eq!(g.node(b).rank, Some(-2));
    assert_eq!(g.node(c).rank, Some(-3));
}

#[test]
fn disconnected_islands_all_get_ranked() {
    let mut g = Graph::new();
    let a = g.add_node("a");
    let b = g.add_node("b");
    let c = g.add_node("c");
    g.add_edge(a, a);
    let _ = (b, c);
    rank::assign_ranks(&mut g);
    for id in g.node_ids() {
        assert_eq!(g.node(id).rank, Some(-1));
    }
}

#[test]
fn graph_root_attribute_wins_root_selection() {
    let mut g = Graph::new();
    let a = g.add_node("a");
    let b = g.add_node("b");
    g.add_edge(a, b);
    g.attrs.root = Some("b".to_string());
    assert_eq!(rank::find_root(&g), Some(b));
}

#[test]
fn node_root_attribute_beats_in_degree() {
    let mut g = Graph::new();
    let a = g.add_node("a");
    let b = g.add_node("b");
    g.add_edge(a, b);
    g.node_mut(b).attrs.root = true;
    assert_eq!(rank::find_root(&g), Some(b));
}

#[test]
fn ranks_grow_in_magnitude_along_every_edge_of_a_dag() {
    let mut g = Graph::new();
    let ids: Vec<NodeId> = ["a", "b", "c", "d", "e", "f", "g", "h"]
        .iter()
        .map(|n| g.add_node(*n))
        .collect();
    for (u, v) in [(0, 1), (1, 2), (2, 3), (3, 7), (0, 4), (4, 6), (6, 7), (0, 5), (5, 6)] {
        g.add_edge(ids[u], ids[v]);
    }
    rank::assign_ranks(&mut g);
    assert_abs_rank_monotone(&g);
}
