//! Glyph selection: charset + stroke style + arm geometry -> characters.

use moray_graph::{Dir, EdgeStyle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Charset {
    /// `+ - | > v` and friends; safe everywhere.
    #[default]
    Ascii,
    /// Unicode box drawing with solid arrowheads.
    BoxArt,
}

pub struct BoxGlyphs {
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
    pub horizontal: char,
    pub vertical: char,
}

impl Charset {
    pub fn node_box(self) -> BoxGlyphs {
        match self {
            Charset::Ascii => BoxGlyphs {
                top_left: '+',
                top_right: '+',
                bottom_left: '+',
                bottom_right: '+',
                horizontal: '-',
                vertical: '|',
            },
            Charset::BoxArt => BoxGlyphs {
                top_left: '┌',
                top_right: '┐',
                bottom_left: '└',
                bottom_right: '┘',
                horizontal: '─',
                vertical: '│',
            },
        }
    }

    /// The stroke character for a line segment. `parity` is the absolute frame coordinate
    /// along the stroke, which keeps dash patterns continuous across cells.
    pub fn stroke(self, style: EdgeStyle, horizontal: bool, parity: i64) -> char {
        let solid = match (self, horizontal) {
            (Charset::Ascii, true) => '-',
            (Charset::Ascii, false) => '|',
            (Charset::BoxArt, true) => '─',
            (Charset::BoxArt, false) => '│',
        };
        match style {
            EdgeStyle::Solid => solid,
            EdgeStyle::Dashed => {
                if parity.rem_euclid(2) == 1 {
                    solid
                } else {
                    ' '
                }
            }
            EdgeStyle::Dotted => {
                if self == Charset::BoxArt {
                    if horizontal { '┄' } else { '┊' }
                } else {
                    '.'
                }
            }
            EdgeStyle::Wave => '~',
            EdgeStyle::Double => match (self, horizontal) {
                (Charset::Ascii, true) => '=',
                (Charset::Ascii, false) => '#',
                (Charset::BoxArt, true) => '═',
                (Charset::BoxArt, false) => '║',
            },
            EdgeStyle::Bold => match (self, horizontal) {
                (Charset::Ascii, _) => '#',
                (Charset::BoxArt, true) => '━',
                (Charset::BoxArt, false) => '┃',
            },
        }
    }

    /// The junction character for a cell whose arms are `(north, east, south, west)`. Straight
    /// runs fall back to the stroke character at the call site.
    pub fn junction(self, arms: (bool, bool, bool, bool)) -> char {
        if self == Charset::Ascii {
            return '+';
        }
        match arms {
            (true, true, true, true) => '┼',
            (true, true, false, true) => '┴',
            (true, false, true, true) => '┤',
            (true, true, true, false) => '├',
            (false, true, true, true) => '┬',
            (true, true, false, false) => '└',
            (true, false, false, true) => '┘',
            (false, true, true, false) => '┌',
            (false, false, true, true) => '┐',
            (false, true, false, true) => '─',
            (true, false, true, false) => '│',
            _ => '+',
        }
    }

    /// An arrowhead pointing out of the cell toward `side`.
    pub fn arrow(self, side: Dir) -> char {
        match (self, side) {
            (Charset::Ascii, Dir::North) => '^',
            (Charset::Ascii, Dir::South) => 'v',
            (Charset::Ascii, Dir::East) => '>',
            (Charset::Ascii, Dir::West) => '<',
            (Charset::BoxArt, Dir::North) => '▲',
            (Charset::BoxArt, Dir::South) => '▼',
            (Charset::BoxArt, Dir::East) => '▶',
            (Charset::BoxArt, Dir::West) => '◀',
        }
    }
}
