//! Grid layout engine and orthogonal edge router.
//!
//! The engine assigns integer grid coordinates to nodes and routes edges as connected runs of
//! grid cells with right-angle corners only. It is a pipeline over a shared mutable graph:
//! ranking, chain detection, action planning, then an executor loop that drives the node placer
//! and the edge router ("scout") with a bounded backtracking budget.
//!
//! The engine is single-threaded, performs no I/O, and never fails for input-data reasons:
//! placement or routing exhaustion leaves the affected node/edge out of the cell map and the
//! run carries on. Output is a pure function of the input graph's insertion order and
//! attributes, so layouts are bit-identical across runs.

pub use moray_graph as graph;

pub mod chain;
pub mod executor;
pub mod pipeline;
pub mod place;
pub mod plan;
pub mod rank;
pub mod scout;
pub mod typer;
pub mod util;

pub use chain::Chain;
pub use executor::LayoutReport;
pub use pipeline::layout;
