//! The directed-graph (DOT subset) notation.
//!
//! Supported: `[strict] (di)graph [name] { ... }` with node statements, edge chains
//! (`a -> b -> c`), `[key=value, ...]` attribute lists, `key = value` graph assignments, and
//! quoted identifiers. `rankdir` maps onto the `flow` attribute (`LR` reads east, `TB` south).
//! Comments: `//`, `/* ... */`, and `#` lines. Subgraphs are not supported.

use crate::attr;
use crate::error::{Error, Result};
use moray_graph::{ArrowStyle, EdgeKind, Graph, NodeId};
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

pub fn parse_dot(text: &str) -> Result<Graph> {
    let tokens = tokenize(text)?;
    let mut p = TokenStream { tokens, pos: 0 };
    let mut g = Graph::new();

    // Header: [strict] (di)graph [name] {
    if p.eat_ident("strict") {
        // accepted and ignored; edge multiplicity is the caller's business
    }
    let directed = if p.eat_ident("digraph") {
        true
    } else if p.eat_ident("graph") {
        false
    } else {
        return Err(Error::parse(p.line(), "expected `digraph` or `graph`"));
    };
    if let Some(Token::Ident(_, _) | Token::Quoted(_, _)) = p.peek() {
        p.bump();
    }
    p.expect_sym('{')?;

    parse_statements(&mut p, &mut g, directed)?;
    p.expect_sym('}')?;
    if let Some(t) = p.peek() {
        return Err(Error::parse(t.line(), "trailing input after closing `}`"));
    }
    Ok(g)
}

fn parse_statements(p: &mut TokenStream, g: &mut Graph, directed: bool) -> Result<()> {
    loop {
        match p.peek() {
            None => break,
            Some(Token::Sym('}', _)) => break,
            Some(Token::Sym(';', _)) => {
                p.bump();
            }
            Some(Token::Ident(word, line)) if word == "subgraph" => {
                return Err(Error::parse(*line, "subgraphs are not supported"));
            }
            Some(Token::Ident(..) | Token::Quoted(..)) => parse_node_or_edge(p, g, directed)?,
            Some(t) => {
                return Err(Error::parse(t.line(), "expected a statement"));
            }
        }
    }
    Ok(())
}

fn parse_node_or_edge(p: &mut TokenStream, g: &mut Graph, directed: bool) -> Result<()> {
    let (first, _) = p.take_id()?;

    // graph / node / edge attribute statements and `key = value` assignments.
    if matches!(p.peek(), Some(Token::Sym('[', _)))
        && matches!(first.as_str(), "graph" | "node" | "edge")
    {
        let attrs = parse_attr_list(p)?;
        match first.as_str() {
            "graph" => {
                for (name, value) in &attrs {
                    set_dot_graph_attr(g, name, value)?;
                }
            }
            other => {
                // Default styling for later nodes/edges is out of scope; keep going.
                debug!(kind = other, count = attrs.len(), "ignoring default attributes");
            }
        }
        return Ok(());
    }
    if p.eat_sym('=') {
        let (value, _) = p.take_id()?;
        return set_dot_graph_attr(g, &first, &value);
    }

    let mut prev = vec![intern_node(g, &first)];
    let mut edges = Vec::new();
    loop {
        match p.peek() {
            Some(Token::Arrow(arrow_directed, aline)) => {
                if *arrow_directed != directed {
                    let op = if *arrow_directed { "->" } else { "--" };
                    return Err(Error::parse(*aline, format!("`{op}` does not match the graph type")));
                }
                p.bump();
                let (id, _) = p.take_id()?;
                let node = intern_node(g, &id);
                for &u in &prev {
                    let e = g.add_edge(u, node);
                    if !directed {
                        let edge = g.edge_mut(e);
                        edge.kind = EdgeKind::Undirected;
                        edge.arrow = ArrowStyle::None;
                    }
                    edges.push(e);
                }
                prev = vec![node];
            }
            Some(Token::Sym('[', _)) => {
                let attrs = parse_attr_list(p)?;
                if edges.is_empty() {
                    for &id in &prev {
                        for (name, value) in &attrs {
                            attr::set_node_attr(g, id, name, value)?;
                        }
                    }
                } else {
                    for &e in &edges {
                        for (name, value) in &attrs {
                            set_dot_edge_attr(g, e, name, value)?;
                        }
                    }
                }
                break;
            }
            _ => break,
        }
    }
    Ok(())
}

fn intern_node(g: &mut Graph, id: &str) -> NodeId {
    g.add_node(id)
}

fn parse_attr_list(p: &mut TokenStream) -> Result<Vec<(String, String)>> {
    p.expect_sym('[')?;
    let mut out = Vec::new();
    loop {
        match p.peek() {
            Some(Token::Sym(']', _)) => {
                p.bump();
                break;
            }
            Some(Token::Sym(',', _)) | Some(Token::Sym(';', _)) => {
                p.bump();
            }
            Some(Token::Ident(..) | Token::Quoted(..)) => {
                let (name, _) = p.take_id()?;
                p.expect_sym('=')?;
                let (value, _) = p.take_id()?;
                out.push((name, value));
            }
            Some(t) => return Err(Error::parse(t.line(), "expected `key=value` or `]`")),
            None => return Err(Error::parse(0, "unclosed `[`")),
        }
    }
    Ok(out)
}

fn set_dot_graph_attr(g: &mut Graph, name: &str, value: &str) -> Result<()> {
    if name == "rankdir" {
        let flow = match value.trim() {
            "LR" => "east",
            "TB" => "south",
            "RL" => "west",
            "BT" => "north",
            other => {
                return Err(Error::Attribute {
                    name: name.to_string(),
                    value: other.to_string(),
                    expected: "LR, TB, RL, or BT",
                });
            }
        };
        return attr::set_graph_attr(&mut g.attrs, "flow", flow);
    }
    attr::set_graph_attr(&mut g.attrs, name, value)
}

fn set_dot_edge_attr(g: &mut Graph, e: moray_graph::EdgeId, name: &str, value: &str) -> Result<()> {
    let edge = g.edge_mut(e);
    match name {
        "dir" => {
            edge.arrow = match value.trim() {
                "forward" => ArrowStyle::Forward,
                "back" => ArrowStyle::Back,
                "both" => ArrowStyle::Both,
                "none" => ArrowStyle::None,
                other => {
                    return Err(Error::Attribute {
                        name: name.to_string(),
                        value: other.to_string(),
                        expected: "forward, back, both, or none",
                    });
                }
            };
            if edge.arrow == ArrowStyle::Both {
                edge.kind = EdgeKind::Bidirectional;
            }
            Ok(())
        }
        _ => attr::set_edge_attr(edge, name, value),
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Ident(String, usize),
    Quoted(String, usize),
    Sym(char, usize),
    /// `->` when true, `--` when false.
    Arrow(bool, usize),
}

impl Token {
    fn line(&self) -> usize {
        match self {
            Token::Ident(_, l) | Token::Quoted(_, l) | Token::Sym(_, l) | Token::Arrow(_, l) => *l,
        }
    }
}

struct TokenStream {
    tokens: Vec<Token>,
    pos: usize,
}

impl TokenStream {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn bump(&mut self) -> Option<&Token> {
        let t = self.tokens.get(self.pos);
        if t.is_some() {
            self.pos += 1;
        }
        t
    }

    fn line(&self) -> usize {
        self.peek().map(|t| t.line()).unwrap_or(0)
    }

    fn eat_ident(&mut self, word: &str) -> bool {
        if let Some(Token::Ident(w, _)) = self.peek() {
            if w == word {
                self.pos += 1;
                return true;
            }
        }
        false
    }

    fn eat_sym(&mut self, sym: char) -> bool {
        if let Some(Token::Sym(c, _)) = self.peek() {
            if *c == sym {
                self.pos += 1;
                return true;
            }
        }
        false
    }

    fn expect_sym(&mut self, sym: char) -> Result<()> {
        if self.eat_sym(sym) {
            Ok(())
        } else {
            Err(Error::parse(self.line(), format!("expected `{sym}`")))
        }
    }

    fn take_id(&mut self) -> Result<(String, usize)> {
        match self.bump() {
            Some(Token::Ident(w, l)) => Ok((w.clone(), *l)),
            Some(Token::Quoted(w, l)) => Ok((w.clone(), *l)),
            Some(t) => Err(Error::parse(t.line(), "expected an identifier")),
            None => Err(Error::parse(0, "unexpected end of input")),
        }
    }
}

fn ident_char() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_.]+").expect("static regex"))
}

fn tokenize(text: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut line = 1usize;
    let mut rest = text;

    while !rest.is_empty() {
        let c = rest.chars().next().expect("non-empty");
        if c == '\n' {
            line += 1;
            rest = &rest[1..];
        } else if c.is_whitespace() {
            rest = &rest[c.len_utf8()..];
        } else if c == '#' || rest.starts_with("//") {
            let end = rest.find('\n').unwrap_or(rest.len());
            rest = &rest[end..];
        } else if let Some(body) = rest.strip_prefix("/*") {
            let Some(end) = body.find("*/") else {
                return Err(Error::parse(line, "unclosed block comment"));
            };
            line += body[..end].matches('\n').count();
            rest = &body[end + 2..];
        } else if let Some(r) = rest.strip_prefix("->") {
            tokens.push(Token::Arrow(true, line));
            rest = r;
        } else if let Some(r) = rest.strip_prefix("--") {
            tokens.push(Token::Arrow(false, line));
            rest = r;
        } else if c == '"' {
            let body = &rest[1..];
            let Some(end) = body.find('"') else {
                return Err(Error::parse(line, "unclosed string"));
            };
            line += body[..end].matches('\n').count();
            tokens.push(Token::Quoted(body[..end].to_string(), line));
            rest = &body[end + 1..];
        } else if let Some(m) = ident_char().find(rest) {
            tokens.push(Token::Ident(m.as_str().to_string(), line));
            rest = &rest[m.end()..];
        } else if matches!(c, '{' | '}' | '[' | ']' | '=' | ';' | ',') {
            tokens.push(Token::Sym(c, line));
            rest = &rest[1..];
        } else {
            return Err(Error::parse(line, format!("unexpected character `{c}`")));
        }
    }
    Ok(tokens)
}
