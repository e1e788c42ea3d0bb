use boxfish_core::detect::{Syntax, detect};
use boxfish_core::dot::parse_dot;
use moray_graph::{ArrowStyle, Dir, EdgeKind, EdgeStyle};

#[test]
fn detection_separates_the_two_syntaxes() {
    assert_eq!(detect("digraph { a -> b }"), Syntax::Dot);
    assert_eq!(detect("strict graph G { a -- b }"), Syntax::Dot);
    assert_eq!(detect("# comment\ndigraph {\n}"), Syntax::Dot);
    assert_eq!(detect("[ A ] -> [ B ]"), Syntax::Easy);
    assert_eq!(detect("graph { flow: south; }\n[A]"), Syntax::Easy);
}

#[test]
fn an_edge_chain_builds_nodes_in_order() {
    let g = parse_dot("digraph { a -> b -> c; }").unwrap();
    assert_eq!(g.node_count(), 3);
    assert_eq!(g.edge_count(), 2);
    let names: Vec<&str> = g.nodes().map(|n| n.name()).collect();
    assert_eq!(names, ["a", "b", "c"]);
}

#[test]
fn quoted_identifiers_keep_their_spaces() {
    let g = parse_dot(r#"digraph { "New York" -> boston; }"#).unwrap();
    assert!(g.node_by_name("New York").is_some());
}

#[test]
fn rankdir_maps_onto_flow() {
    let g = parse_dot("digraph { rankdir = LR; a -> b }").unwrap();
    assert_eq!(g.attrs.flow, Dir::East);
    let g = parse_dot("digraph { graph [rankdir=TB]; a -> b }").unwrap();
    assert_eq!(g.attrs.flow, Dir::South);
}

#[test]
fn edge_attribute_lists_apply_to_every_edge_of_the_chain() {
    let g = parse_dot(r#"digraph { a -> b -> c [label="hop", style=dashed, minlen=3]; }"#).unwrap();
    for e in g.edges() {
        assert_eq!(e.label.as_deref(), Some("hop"));
        assert_eq!(e.style, EdgeStyle::Dashed);
        assert_eq!(e.attrs.minlen, Some(3));
    }
}

#[test]
fn node_attribute_lists_bind_to_the_node() {
    let g = parse_dot(r#"digraph { hub [label="Main Hub", root=true]; hub -> leaf; }"#).unwrap();
    let hub = g.node(g.node_by_name("hub").unwrap());
    assert_eq!(hub.label, "Main Hub");
    assert!(hub.attrs.root);
}

#[test]
fn undirected_graphs_use_the_double_dash() {
    let g = parse_dot("graph { a -- b; }").unwrap();
    let e = g.edges().next().unwrap();
    assert_eq!(e.kind, EdgeKind::Undirected);
    assert_eq!(e.arrow, ArrowStyle::None);

    assert!(parse_dot("graph { a -> b; }").is_err());
    assert!(parse_dot("digraph { a -- b; }").is_err());
}

#[test]
fn dir_attribute_controls_arrowheads() {
    let g = parse_dot("digraph { a -> b [dir=both]; }").unwrap();
    let e = g.edges().next().unwrap();
    assert_eq!(e.arrow, ArrowStyle::Both);
    assert_eq!(e.kind, EdgeKind::Bidirectional);
}

#[test]
fn comments_of_all_three_kinds_are_skipped() {
    let src = "// head\ndigraph { /* block\nspanning */ a -> b; # tail\n}";
    let g = parse_dot(src).unwrap();
    assert_eq!(g.edge_count(), 1);
}

#[test]
fn subgraphs_are_reported_as_unsupported() {
    let err = parse_dot("digraph { subgraph cluster_a { a -> b } }").unwrap_err();
    assert!(err.to_string().contains("subgraph"));
}

#[test]
fn missing_header_is_an_error() {
    assert!(parse_dot("a -> b").is_err());
}
