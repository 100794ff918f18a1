//! Block vocabulary, fuel tables, and the ruleset for the fission optimizer.
//!
//! This is the leaf crate with no internal dependencies. It defines the
//! block alphabet placed on the grid, the closed fuel enumeration, and the
//! [`Ruleset`] bundle of numeric coefficients and heat-sink placement rules
//! that the simulator evaluates against.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod block;
pub mod fuel;
pub mod ruleset;

// Re-export core types at crate root for convenience.
pub use block::{Block, BlockKind, CoolerKind, ModeratorKind, NeutronSource, ReflectorKind};
pub use fuel::{default_fuel, fuel, fuel_by_name, fuels, Fuel, FuelId, GENERIC_FUEL};
pub use ruleset::{Need, Ruleset, SinkRule, NEUTRON_REACH};
