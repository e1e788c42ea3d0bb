#![forbid(unsafe_code)]

//! Render graph descriptions as ASCII or box-drawing diagrams.
//!
//! The pipeline is parse -> layout -> rasterize, each stage living in its own crate
//! (`boxfish-core`, `moray`, `boxfish-render`). This facade wires them together for the
//! common one-call case:
//!
//! ```
//! let art = boxfish::ascii("[ A ] -> [ B ]").unwrap();
//! assert!(art.contains("| A |"));
//! ```

pub use boxfish_core::{Error, Result, Syntax, parse, parse_with};
pub use boxfish_render::{Charset, RenderOptions, render};
pub use moray::graph;
pub use moray::{LayoutReport, layout};

use moray::graph::{Dir, Graph};

#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    pub charset: Charset,
    /// Overrides the graph's `flow` attribute when set.
    pub flow: Option<Dir>,
}

/// Parses and lays out a description, returning the mutated graph and the layout report.
pub fn lay_out(text: &str, options: &Options) -> Result<(Graph, LayoutReport)> {
    let mut g = parse(text)?;
    if let Some(flow) = options.flow {
        g.attrs.flow = flow;
    }
    let report = layout(&mut g);
    Ok((g, report))
}

/// One-call rendering with explicit options.
pub fn render_text(text: &str, options: &Options) -> Result<String> {
    let (g, _) = lay_out(text, options)?;
    Ok(render(
        &g,
        &RenderOptions {
            charset: options.charset,
        },
    ))
}

/// One-call rendering to plain ASCII.
pub fn ascii(text: &str) -> Result<String> {
    render_text(text, &Options::default())
}

/// One-call rendering to Unicode box art.
pub fn boxart(text: &str) -> Result<String> {
    render_text(
        text,
        &Options {
            charset: Charset::BoxArt,
            ..Default::default()
        },
    )
}
