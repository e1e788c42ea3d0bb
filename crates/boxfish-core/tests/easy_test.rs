use boxfish_core::easy::parse_easy;
use moray_graph::{ArrowStyle, Dir, EdgeKind, EdgeStyle, RankSpec};

#[test]
fn a_single_edge_creates_both_nodes() {
    let g = parse_easy("[ Bonn ] -> [ Berlin ]").unwrap();
    assert_eq!(g.node_count(), 2);
    assert_eq!(g.edge_count(), 1);
    let e = g.edges().next().unwrap();
    assert_eq!(g.node(e.from()).name(), "Bonn");
    assert_eq!(g.node(e.to()).name(), "Berlin");
    assert_eq!(e.style, EdgeStyle::Solid);
    assert_eq!(e.arrow, ArrowStyle::Forward);
}

#[test]
fn chained_statements_reuse_nodes() {
    let g = parse_easy("[A] -> [B] -> [C]\n[A] -> [C]").unwrap();
    assert_eq!(g.node_count(), 3);
    assert_eq!(g.edge_count(), 3);
}

#[test]
fn node_lists_connect_cartesian() {
    let g = parse_easy("[A], [B] -> [C]").unwrap();
    assert_eq!(g.edge_count(), 2);
    let targets: Vec<&str> = g.edges().map(|e| g.node(e.to()).name()).collect();
    assert_eq!(targets, ["C", "C"]);
}

#[test]
fn edge_operators_select_style_and_arrows() {
    let cases = [
        ("->", EdgeStyle::Solid, ArrowStyle::Forward, EdgeKind::Directed),
        ("- - >", EdgeStyle::Dashed, ArrowStyle::Forward, EdgeKind::Directed),
        ("..>", EdgeStyle::Dotted, ArrowStyle::Forward, EdgeKind::Directed),
        ("~~>", EdgeStyle::Wave, ArrowStyle::Forward, EdgeKind::Directed),
        ("==>", EdgeStyle::Double, ArrowStyle::Forward, EdgeKind::Directed),
        ("--", EdgeStyle::Solid, ArrowStyle::None, EdgeKind::Undirected),
        ("<->", EdgeStyle::Solid, ArrowStyle::Both, EdgeKind::Bidirectional),
        ("<-", EdgeStyle::Solid, ArrowStyle::Back, EdgeKind::Directed),
    ];
    for (op, style, arrow, kind) in cases {
        let g = parse_easy(&format!("[A] {op} [B]")).unwrap();
        let e = g.edges().next().unwrap();
        assert_eq!(e.style, style, "operator {op}");
        assert_eq!(e.arrow, arrow, "operator {op}");
        assert_eq!(e.kind, kind, "operator {op}");
    }
}

#[test]
fn an_edge_label_rides_inside_the_operator() {
    let g = parse_easy("[ Bonn ] -- car --> [ Berlin ]").unwrap();
    let e = g.edges().next().unwrap();
    assert_eq!(e.label.as_deref(), Some("car"));
    assert_eq!(e.style, EdgeStyle::Solid);
    assert_eq!(e.arrow, ArrowStyle::Forward);
}

#[test]
fn attribute_blocks_bind_to_nodes_or_edges() {
    let g = parse_easy("[A] { minwidth: 3; rank: 2; }\n[A] -> [B] { style: dotted; minlen: 5; }")
        .unwrap();
    let a = g.node(g.node_by_name("A").unwrap());
    assert_eq!(a.attrs.minwidth, Some(3));
    assert_eq!(a.attrs.rank, Some(RankSpec::Level(2)));
    let e = g.edges().next().unwrap();
    assert_eq!(e.style, EdgeStyle::Dotted);
    assert_eq!(e.attrs.minlen, Some(5));
}

#[test]
fn graph_attributes_set_flow_and_root() {
    let g = parse_easy("graph { flow: south; root: B; }\n[A] -> [B]").unwrap();
    assert_eq!(g.attrs.flow, Dir::South);
    assert_eq!(g.attrs.root.as_deref(), Some("B"));
}

#[test]
fn unknown_attributes_land_in_the_overflow_map() {
    let g = parse_easy("[A] { color: red; }").unwrap();
    let a = g.node(g.node_by_name("A").unwrap());
    assert_eq!(a.attrs.overflow.get("color").map(String::as_str), Some("red"));
}

#[test]
fn groups_collect_their_members() {
    let g = parse_easy("( Cities: [ Bonn ] -> [ Berlin ] )\n[ Bonn ] -> [ Hamburg ]").unwrap();
    let (name, group) = g.groups().next().unwrap();
    assert_eq!(name, "Cities");
    let members: Vec<&str> = group.members.iter().map(|&id| g.node(id).name()).collect();
    assert_eq!(members, ["Bonn", "Berlin"]);
}

#[test]
fn anonymous_nodes_stay_distinct() {
    let g = parse_easy("[ ] -> [ ]").unwrap();
    assert_eq!(g.node_count(), 2);
    assert!(g.nodes().all(|n| n.label.is_empty()));
}

#[test]
fn comments_are_ignored() {
    let g = parse_easy("# header\n[A] -> [B] # trailing\n").unwrap();
    assert_eq!(g.edge_count(), 1);
}

#[test]
fn label_attribute_overrides_the_name() {
    let g = parse_easy("[A] { label: Alpha Station; }").unwrap();
    let a = g.node(g.node_by_name("A").unwrap());
    assert_eq!(a.label, "Alpha Station");
    assert_eq!(a.name(), "A");
}

#[test]
fn malformed_input_reports_a_line() {
    let err = parse_easy("[A] ->\n").unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("line"), "got: {msg}");
}

#[test]
fn invalid_attribute_values_are_rejected() {
    assert!(parse_easy("[A] { minwidth: big; }").is_err());
    assert!(parse_easy("graph { flow: diagonal; }").is_err());
    assert!(parse_easy("[A] -> [B] { style: glitter; }").is_err());
}
