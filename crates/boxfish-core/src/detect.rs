//! Input syntax detection.

use regex::Regex;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Syntax {
    /// The bracketed node/edge notation.
    Easy,
    /// The directed-graph (DOT subset) notation.
    Dot,
}

fn dot_header() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"^\s*(strict\s+)?(di)?graph(\s+("[^"]*"|[A-Za-z0-9_]+))?\s*\{"#)
            .expect("static regex")
    })
}

/// Picks the syntax by inspection.
///
/// Bracket nodes decide immediately: no DOT statement starts a line with `[`. A `digraph` (or
/// `strict graph`) header decides for DOT. A bare `graph {` is ambiguous with the bracketed
/// notation's attribute block, so the body breaks the tie: `key: value` reads as the bracketed
/// notation, anything else as DOT.
pub fn detect(text: &str) -> Syntax {
    let meaningful: String = text
        .lines()
        .map(|l| match l.find('#') {
            Some(ix) => &l[..ix],
            None => l,
        })
        .filter(|l| !l.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    if meaningful
        .lines()
        .any(|l| matches!(l.trim_start().chars().next(), Some('[' | '(')))
    {
        return Syntax::Easy;
    }

    let Some(caps) = dot_header().captures(&meaningful) else {
        return Syntax::Easy;
    };
    if caps.get(1).is_some() || caps.get(2).is_some() {
        return Syntax::Dot;
    }

    let body = &meaningful[caps.get(0).map(|m| m.end()).unwrap_or(0)..];
    match (body.find(':'), body.find('=')) {
        (Some(colon), Some(eq)) if colon < eq => Syntax::Easy,
        (Some(_), None) => Syntax::Easy,
        _ => Syntax::Dot,
    }
}
