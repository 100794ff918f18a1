//! Deterministic reactor evaluation.
//!
//! [`Reactor`] owns a [`Grid`](fission_grid::Grid) plus the per-evaluation
//! caches. Mutation goes through [`Reactor::set_cell`], which marks the
//! state dirty; any metric accessor triggers exactly one evaluation pass.
//! The pass is a strictly ordered pipeline:
//!
//! 1. revert caches, rescan per-kind position lists
//! 2. conductor flood fill, casing-reachable groups become active
//! 3. flux broadcast from primed cells (work queue, visited-before-enqueue)
//! 4. moderator activation along completed lines
//! 5. adjacency filtering (drop edges to cells that missed criticality)
//! 6. reflector activation
//! 7. cluster flood fill (pulls sink activation through the memo)
//! 8. per-cluster aggregation
//! 9. global totals
//!
//! The order is load-bearing: flux adjacency is recorded before the far
//! endpoint is validated, so filtering must run after the whole broadcast.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod aggregate;
mod flood;
mod flux;
mod mutate;
mod reactor;
mod sinks;
mod state;
mod suggest;
mod summary;
mod tri;

pub use reactor::Reactor;
pub use suggest::SuggestMode;
pub use summary::{ClusterStats, Summary};

pub use fission_core::{
    default_fuel, fuel, fuel_by_name, fuels, Block, BlockKind, CoolerKind, Fuel, FuelId,
    ModeratorKind, NeutronSource, ReflectorKind, Ruleset,
};
pub use fission_grid::{Axis, Dims, Grid, Pos};
