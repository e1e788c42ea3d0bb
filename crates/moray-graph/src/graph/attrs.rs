//! Typed attribute structs.
//!
//! Recognized keys become fields; anything else lands in the overflow map and is passed through
//! untouched. Validation happens in the setters so a parsed attribute is either well-typed or
//! rejected at parse time.

use crate::dir::Dir;
use std::collections::BTreeMap;

/// A user rank constraint: an explicit layer, or "same" (layer 0, reserved).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankSpec {
    Same,
    Level(i32),
}

impl RankSpec {
    /// The signed rank this constraint maps to. User layers are 1-based after a +1 shift so
    /// they never collide with the auto-derived negative ranks.
    pub fn to_rank(self) -> i32 {
        match self {
            RankSpec::Same => 0,
            RankSpec::Level(n) => n + 1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphAttrs {
    /// Primary reading direction; rotates ring ordering and exit/entry conventions.
    pub flow: Dir,
    /// Name of the explicit root node, if any.
    pub root: Option<String>,
    pub overflow: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeAttrs {
    pub rank: Option<RankSpec>,
    /// Truthy marks this node as the ranking root.
    pub root: bool,
    /// Grid-cell overrides for the computed footprint.
    pub minwidth: Option<u16>,
    pub minheight: Option<u16>,
    pub overflow: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeAttrs {
    /// Minimum grid distance between the endpoints; `None` means the default of 2.
    pub minlen: Option<u16>,
    pub overflow: BTreeMap<String, String>,
}
