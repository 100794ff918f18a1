//! Save-file export/import and the append-only run log.
//!
//! The on-disk shape is the versioned JSON layout planners exchange:
//! name-keyed coordinate groups with 1-based coordinates, fuel cells
//! keyed `"<FuelName>;<True|False>;<SourceName>"`, and the interior
//! dimensions. Empty groups are omitted.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod error;
mod format;
mod log_file;
mod reader;
mod writer;

pub use error::SaveError;
pub use format::{SaveCoord, SaveDims, SaveFile, SaveVersion};
pub use log_file::append_log;
pub use reader::{read_save, LoadedSave};
pub use writer::{save_file_name, to_save, write_save};
