//! Error type for save-file IO.

use std::error::Error;
use std::fmt;

/// Errors from writing or reading a save file.
#[derive(Debug)]
pub enum SaveError {
    /// Underlying filesystem failure.
    Io(std::io::Error),
    /// The file is not the JSON shape we understand.
    Json(serde_json::Error),
    /// A group key names a block this ruleset does not know.
    UnknownBlock {
        /// The unrecognized name.
        name: String,
    },
    /// A fuel-cell key does not have the `name;primed;source` shape.
    MalformedFuelKey {
        /// The offending key.
        key: String,
    },
    /// Interior dimensions are missing or non-positive.
    BadDimensions,
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Json(e) => write!(f, "malformed save json: {e}"),
            Self::UnknownBlock { name } => write!(f, "unknown block name '{name}'"),
            Self::MalformedFuelKey { key } => write!(f, "malformed fuel-cell key '{key}'"),
            Self::BadDimensions => write!(f, "missing or non-positive interior dimensions"),
        }
    }
}

impl Error for SaveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SaveError {
    fn from(e: std::io::Error) -> SaveError {
        SaveError::Io(e)
    }
}

impl From<serde_json::Error> for SaveError {
    fn from(e: serde_json::Error) -> SaveError {
        SaveError::Json(e)
    }
}
