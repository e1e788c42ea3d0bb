//! Rasterization from the populated cell map.

use crate::frame::Frame;
use crate::glyph::Charset;
use moray_graph::{ArrowStyle, CellKind, Dir, EdgeCellType, EdgeShape, Graph};

/// Character columns per grid cell.
const CELL_W: i64 = 5;
/// Character rows per grid cell.
const CELL_H: i64 = 3;

#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    pub charset: Charset,
}

/// Renders the laid-out graph. Unplaced nodes and unrouted edges are simply absent, matching
/// the engine's degraded-but-bounded failure mode.
pub fn render(g: &Graph, options: &RenderOptions) -> String {
    let Some((min_x, min_y, max_x, max_y)) = g.cells.bounds() else {
        return String::new();
    };
    let width = ((max_x - min_x + 1) as i64 * CELL_W) as usize;
    let height = ((max_y - min_y + 1) as i64 * CELL_H) as usize;
    let mut frame = Frame::new(width, height);
    let charset = options.charset;

    // Node boxes first; edge cells never overlap them, so order only matters for labels.
    for node in g.nodes() {
        let Some((x, y, cx, cy)) = node.rect() else {
            continue;
        };
        let x0 = (x - min_x) as i64 * CELL_W;
        let y0 = (y - min_y) as i64 * CELL_H;
        let w = cx as i64 * CELL_W;
        let h = cy as i64 * CELL_H;
        let b = charset.node_box();

        for col in x0..x0 + w {
            frame.set(col, y0, b.horizontal);
            frame.set(col, y0 + h - 1, b.horizontal);
        }
        for row in y0..y0 + h {
            frame.set(x0, row, b.vertical);
            frame.set(x0 + w - 1, row, b.vertical);
        }
        frame.set(x0, y0, b.top_left);
        frame.set(x0 + w - 1, y0, b.top_right);
        frame.set(x0, y0 + h - 1, b.bottom_left);
        frame.set(x0 + w - 1, y0 + h - 1, b.bottom_right);

        frame.put_centered(x0 + 1, y0 + h / 2, (w - 2) as usize, &node.label);
    }

    for cell in g.cells.sorted() {
        let CellKind::Edge(owner, ty) = cell.kind else {
            continue;
        };
        let edge = g.edge(owner);
        let x0 = (cell.x - min_x) as i64 * CELL_W;
        let y0 = (cell.y - min_y) as i64 * CELL_H;
        let (cx, cy) = (x0 + CELL_W / 2, y0 + CELL_H / 2);

        let shape = ty.shape();
        let arms = shape.arms();
        let (n, e, s, w) = arms;

        if n {
            for row in y0..cy {
                frame.set(cx, row, charset.stroke(edge.style, false, row));
            }
        }
        if s {
            for row in cy + 1..y0 + CELL_H {
                frame.set(cx, row, charset.stroke(edge.style, false, row));
            }
        }
        if w {
            for col in x0..cx {
                frame.set(col, cy, charset.stroke(edge.style, true, col));
            }
        }
        if e {
            for col in cx + 1..x0 + CELL_W {
                frame.set(col, cy, charset.stroke(edge.style, true, col));
            }
        }

        let center = match shape {
            EdgeShape::Hor => charset.stroke(edge.style, true, cx),
            EdgeShape::Ver => charset.stroke(edge.style, false, cy),
            _ => charset.junction(arms),
        };
        frame.set(cx, cy, center);

        // Arrowheads: forward arrows sit at the target attachment, back arrows at the source.
        let draw_end = matches!(edge.arrow, ArrowStyle::Forward | ArrowStyle::Both);
        let draw_start = matches!(edge.arrow, ArrowStyle::Back | ArrowStyle::Both);
        if draw_end {
            if let Some(side) = ty.end_dir() {
                let (ax, ay) = arm_tip(x0, y0, cx, cy, side);
                frame.set(ax, ay, charset.arrow(side));
            }
        }
        if draw_start {
            if let Some(side) = ty.start_dir() {
                let (ax, ay) = arm_tip(x0, y0, cx, cy, side);
                frame.set(ax, ay, charset.arrow(side));
            }
        }

        if ty.has_flags(EdgeCellType::LABEL) {
            if let Some(label) = cell.label.as_deref() {
                frame.put_centered(x0, y0, CELL_W as usize, label);
            }
        }
    }

    frame.into_string()
}

fn arm_tip(x0: i64, y0: i64, cx: i64, cy: i64, side: Dir) -> (i64, i64) {
    match side {
        Dir::North => (cx, y0),
        Dir::South => (cx, y0 + CELL_H - 1),
        Dir::East => (x0 + CELL_W - 1, cy),
        Dir::West => (x0, cy),
    }
}
