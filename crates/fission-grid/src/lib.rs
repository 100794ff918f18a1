//! Bounded 3D block storage and adjacency primitives.
//!
//! The [`Grid`] is a flat row-major array of [`Block`]s with sentinel
//! semantics at the boundary: kind reads outside the box return `Casing`,
//! variant reads return their `Air` sentinel. Adjacency helpers (six-offset
//! enumeration, axis walks, axial pairs, mirroring) live in [`adjacency`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod adjacency;
pub mod grid;

pub use adjacency::{Axis, AXES, OFFSETS};
pub use grid::{Dims, Grid, Pos};

pub use fission_core::Block;
