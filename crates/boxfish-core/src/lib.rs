#![forbid(unsafe_code)]

//! Graph description parsers + semantic model (headless).
//!
//! Two surface syntaxes produce the same graph value:
//! - the bracketed notation: `[ A ] -> [ B ] { style: dotted; }`, with chained statements,
//!   node lists, attribute blocks, and named groups;
//! - a directed-graph (DOT subset) notation: `digraph { a -> b [label="x"]; }` with
//!   `rankdir` mapped onto the `flow` attribute.
//!
//! [`parse`] detects the syntax from the input text; [`parse_with`] pins it.

pub mod attr;
pub mod detect;
pub mod dot;
pub mod easy;
pub mod error;

pub use detect::Syntax;
pub use error::{Error, Result};
use moray_graph::Graph;
use tracing::debug;

/// Parses a graph description, picking the syntax by inspection.
pub fn parse(text: &str) -> Result<Graph> {
    let syntax = detect::detect(text);
    debug!(?syntax, "detected input syntax");
    parse_with(text, syntax)
}

pub fn parse_with(text: &str, syntax: Syntax) -> Result<Graph> {
    match syntax {
        Syntax::Easy => easy::parse_easy(text),
        Syntax::Dot => dot::parse_dot(text),
    }
}
