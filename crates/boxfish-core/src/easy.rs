//! The bracketed node/edge notation.
//!
//! Statements are free-form: `[ A ] -> [ B ] -> [ C ]`, node lists (`[A], [B] -> [C]` connects
//! both to C), attribute blocks `{ key: value; }` binding to the nodes or edges created before
//! them, `graph { ... }` for graph attributes, and named groups `( Name: [A] -> [B] )`.
//! `#` starts a comment running to the end of the line.
//!
//! Edge operators select stroke style and arrows: `->` solid, `- - >` dashed, `.>` dotted,
//! `~>` wave, `=>` double, with `<` prefixing back arrows and no `>` meaning undirected. A
//! label rides inside the operator: `-- label -->`.

use crate::attr;
use crate::error::{Error, Result};
use moray_graph::{ArrowStyle, EdgeId, EdgeKind, EdgeStyle, Graph, NodeId};

pub fn parse_easy(text: &str) -> Result<Graph> {
    let mut g = Graph::new();
    let mut p = Parser::new(text);
    p.parse_statements(&mut g, None)?;
    p.skip_ws();
    if let Some(c) = p.peek() {
        return Err(Error::parse(p.line(), format!("unexpected `{c}`")));
    }
    Ok(g)
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

#[derive(Debug)]
struct EdgeOp {
    style: EdgeStyle,
    arrow: ArrowStyle,
    kind: EdgeKind,
    label: Option<String>,
}

impl Parser {
    fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
        }
    }

    fn line(&self) -> usize {
        1 + self.chars[..self.pos.min(self.chars.len())]
            .iter()
            .filter(|&&c| c == '\n')
            .count()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn skip_ws(&mut self) {
        while let Some(c) = self.peek() {
            if c == '#' {
                while let Some(c) = self.bump() {
                    if c == '\n' {
                        break;
                    }
                }
            } else if c.is_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    /// Collects characters until one of `stops` (not consumed). Comments still end at newline.
    fn take_until(&mut self, stops: &[char]) -> String {
        let mut out = String::new();
        while let Some(c) = self.peek() {
            if stops.contains(&c) {
                break;
            }
            if c == '#' {
                while let Some(c) = self.peek() {
                    self.pos += 1;
                    if c == '\n' {
                        break;
                    }
                }
                out.push(' ');
                continue;
            }
            out.push(c);
            self.pos += 1;
        }
        out
    }

    fn parse_statements(&mut self, g: &mut Graph, group: Option<&str>) -> Result<()> {
        loop {
            self.skip_ws();
            match self.peek() {
                None => break,
                Some(')') if group.is_some() => break,
                Some('(') => self.parse_group(g)?,
                Some('[') => self.parse_statement(g, group)?,
                Some(c) if c.is_alphabetic() => {
                    let word = self.take_word();
                    if word == "graph" {
                        self.parse_graph_attrs(g)?;
                    } else {
                        return Err(Error::parse(
                            self.line(),
                            format!("unexpected keyword `{word}` (expected `graph`, `[`, or `(`)"),
                        ));
                    }
                }
                Some(c) => {
                    return Err(Error::parse(self.line(), format!("unexpected `{c}`")));
                }
            }
        }
        Ok(())
    }

    fn take_word(&mut self) -> String {
        let mut out = String::new();
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                out.push(c);
                self.pos += 1;
            } else {
                break;
            }
        }
        out
    }

    fn parse_graph_attrs(&mut self, g: &mut Graph) -> Result<()> {
        self.skip_ws();
        if self.peek() != Some('{') {
            return Err(Error::parse(self.line(), "expected `{` after `graph`"));
        }
        for (name, value) in self.parse_attr_block()? {
            attr::set_graph_attr(&mut g.attrs, &name, &value)?;
        }
        Ok(())
    }

    fn parse_group(&mut self, g: &mut Graph) -> Result<()> {
        self.bump(); // (
        let name = self.take_until(&[':', ')', '[']);
        if self.peek() != Some(':') {
            return Err(Error::parse(self.line(), "expected `name:` after `(`"));
        }
        self.bump(); // :
        let name = name.trim().to_string();
        let before = g.node_count();

        self.parse_statements(g, Some(name.as_str()))?;
        if self.peek() != Some(')') {
            return Err(Error::parse(self.line(), "unclosed group"));
        }
        self.bump(); // )

        let members: Vec<NodeId> = g
            .node_ids()
            .skip(before)
            .collect();
        let group = g.group_mut(name);
        for id in members {
            if !group.members.contains(&id) {
                group.members.push(id);
            }
        }
        Ok(())
    }

    fn parse_statement(&mut self, g: &mut Graph, group: Option<&str>) -> Result<()> {
        let mut prev = self.parse_node_list(g, group)?;
        let mut stmt_edges: Vec<EdgeId> = Vec::new();

        loop {
            self.skip_ws();
            match self.peek() {
                Some(c) if matches!(c, '<' | '-' | '=' | '.' | '~') => {
                    let op = self.parse_edge_op()?;
                    let next = self.parse_node_list(g, group)?;
                    for &u in &prev {
                        for &v in &next {
                            let e = g.add_edge(u, v);
                            let edge = g.edge_mut(e);
                            edge.style = op.style;
                            edge.arrow = op.arrow;
                            edge.kind = op.kind;
                            edge.label = op.label.clone();
                            stmt_edges.push(e);
                        }
                    }
                    prev = next;
                }
                Some('{') => {
                    let attrs = self.parse_attr_block()?;
                    if stmt_edges.is_empty() {
                        for &id in &prev {
                            for (name, value) in &attrs {
                                attr::set_node_attr(g, id, name, value)?;
                            }
                        }
                    } else {
                        for &e in &stmt_edges {
                            for (name, value) in &attrs {
                                attr::set_edge_attr(g.edge_mut(e), name, value)?;
                            }
                        }
                    }
                }
                _ => break,
            }
        }
        Ok(())
    }

    fn parse_node_list(&mut self, g: &mut Graph, group: Option<&str>) -> Result<Vec<NodeId>> {
        let mut out = vec![self.parse_node(g, group)?];
        loop {
            self.skip_ws();
            if self.peek() == Some(',') {
                self.bump();
                self.skip_ws();
                out.push(self.parse_node(g, group)?);
            } else {
                break;
            }
        }
        Ok(out)
    }

    fn parse_node(&mut self, g: &mut Graph, group: Option<&str>) -> Result<NodeId> {
        self.skip_ws();
        if self.peek() != Some('[') {
            return Err(Error::parse(self.line(), "expected `[`"));
        }
        self.bump();
        let label = self.take_until(&[']']);
        if self.peek() != Some(']') {
            return Err(Error::parse(self.line(), "unclosed `[`"));
        }
        self.bump();

        let name = label.split_whitespace().collect::<Vec<_>>().join(" ");
        let id = if name.is_empty() {
            g.add_anon_node()
        } else {
            g.add_node(name)
        };
        if let Some(group) = group {
            let group = g.group_mut(group);
            if !group.members.contains(&id) {
                group.members.push(id);
            }
        }
        Ok(id)
    }

    fn parse_edge_op(&mut self) -> Result<EdgeOp> {
        let line = self.line();
        let text = self.take_until(&['[', '{', '(', ')']);
        analyze_op(text.trim(), line)
    }

    fn parse_attr_block(&mut self) -> Result<Vec<(String, String)>> {
        self.bump(); // {
        let mut out = Vec::new();
        loop {
            self.skip_ws();
            match self.peek() {
                None => return Err(Error::parse(self.line(), "unclosed `{`")),
                Some('}') => {
                    self.bump();
                    break;
                }
                Some(_) => {
                    let name = self.take_until(&[':', '}', ';']);
                    if self.peek() != Some(':') {
                        return Err(Error::parse(self.line(), "expected `key: value`"));
                    }
                    self.bump();
                    let value = self.take_until(&[';', '}']);
                    if self.peek() == Some(';') {
                        self.bump();
                    }
                    out.push((
                        name.trim().to_string(),
                        value.trim().trim_matches('"').to_string(),
                    ));
                }
            }
        }
        Ok(out)
    }
}

fn analyze_op(text: &str, line: usize) -> Result<EdgeOp> {
    let back = text.starts_with('<');
    let fwd = text.ends_with('>');
    let mut core = text;
    if back {
        core = &core[1..];
    }
    if fwd {
        core = &core[..core.len() - 1];
    }
    let core = core.trim();

    let is_stroke = |c: char| matches!(c, '-' | '=' | '.' | '~' | ' ');
    if core.is_empty() || !core.chars().next().is_some_and(is_stroke) {
        return Err(Error::parse(line, format!("malformed edge operator `{text}`")));
    }

    let lead_len = core.chars().take_while(|&c| is_stroke(c)).count();
    let lead: String = core.chars().take(lead_len).collect();
    let rest: String = core.chars().skip(lead_len).collect();
    let label = {
        let trail_len = rest.chars().rev().take_while(|&c| is_stroke(c)).count();
        let l: String = rest.chars().take(rest.chars().count() - trail_len).collect();
        let l = l.trim().to_string();
        (!l.is_empty()).then_some(l)
    };

    let style = match lead.trim_start().chars().next() {
        Some('=') => EdgeStyle::Double,
        Some('.') => EdgeStyle::Dotted,
        Some('~') => EdgeStyle::Wave,
        _ if lead.contains(" -") => EdgeStyle::Dashed,
        _ => EdgeStyle::Solid,
    };

    let (arrow, kind) = match (back, fwd) {
        (true, true) => (ArrowStyle::Both, EdgeKind::Bidirectional),
        (true, false) => (ArrowStyle::Back, EdgeKind::Directed),
        (false, true) => (ArrowStyle::Forward, EdgeKind::Directed),
        (false, false) => (ArrowStyle::None, EdgeKind::Undirected),
    };

    Ok(EdgeOp {
        style,
        arrow,
        kind,
        label,
    })
}
