//! Guided stochastic search over reactor layouts.
//!
//! A Metropolis-style sampler: each step generates a batch of candidate
//! grids (principled oracle edits after a warm-up threshold, vocabulary
//! templates before it, symmetry-mirrored early on), scores them on a
//! worker pool, and draws one proportionally to score. Tabu memory keeps
//! the walk out of its own footprints; a separate keep metric decides
//! which grid is remembered as best.
//!
//! Candidate edits are drawn serially from a seeded ChaCha8 stream and
//! only evaluation fans out, so a run is reproducible for a fixed seed
//! regardless of worker count.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod config;
mod driver;
mod objective;
mod pool;
mod tabu;
mod vocab;

pub use config::{ConfigError, SearchConfig};
pub use driver::{Search, StepReport};
pub use objective::{keep, ObjectiveKind};
