//! serde shapes of the save file.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Save format version. We write 2.0.0.0.0.0, the first layout with
/// reflector groups and sourced fuel-cell keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SaveVersion {
    /// Major version.
    pub major: i32,
    /// Minor version.
    pub minor: i32,
    /// Build number.
    pub build: i32,
    /// Revision number.
    pub revision: i32,
    /// Major revision number.
    pub major_revision: i32,
    /// Minor revision number.
    pub minor_revision: i32,
}

impl SaveVersion {
    /// The version this crate writes.
    pub const CURRENT: SaveVersion = SaveVersion {
        major: 2,
        minor: 0,
        build: 0,
        revision: 0,
        major_revision: 0,
        minor_revision: 0,
    };
}

/// A 1-based block coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveCoord {
    /// 1-based x.
    #[serde(rename = "X")]
    pub x: i32,
    /// 1-based y.
    #[serde(rename = "Y")]
    pub y: i32,
    /// 1-based z.
    #[serde(rename = "Z")]
    pub z: i32,
}

/// Interior dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveDims {
    /// Extent along x.
    #[serde(rename = "X")]
    pub x: i32,
    /// Extent along y.
    #[serde(rename = "Y")]
    pub y: i32,
    /// Extent along z.
    #[serde(rename = "Z")]
    pub z: i32,
}

/// The whole save file. Group maps keep insertion order so output is
/// stable run to run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SaveFile {
    /// Format version stamp.
    #[serde(rename = "SaveVersion")]
    pub version: SaveVersion,
    /// Heat sinks by display name.
    #[serde(rename = "HeatSinks", default, skip_serializing_if = "IndexMap::is_empty")]
    pub heat_sinks: IndexMap<String, Vec<SaveCoord>>,
    /// Moderators by display name.
    #[serde(rename = "Moderators", default, skip_serializing_if = "IndexMap::is_empty")]
    pub moderators: IndexMap<String, Vec<SaveCoord>>,
    /// Conductor positions.
    #[serde(rename = "Conductors", default, skip_serializing_if = "Vec::is_empty")]
    pub conductors: Vec<SaveCoord>,
    /// Reflectors by display name.
    #[serde(rename = "Reflectors", default, skip_serializing_if = "IndexMap::is_empty")]
    pub reflectors: IndexMap<String, Vec<SaveCoord>>,
    /// Fuel cells keyed `"<FuelName>;<True|False>;<SourceName>"`.
    #[serde(rename = "FuelCells", default, skip_serializing_if = "IndexMap::is_empty")]
    pub fuel_cells: IndexMap<String, Vec<SaveCoord>>,
    /// Interior dimensions.
    #[serde(rename = "InteriorDimensions")]
    pub dims: SaveDims,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_round_trips_with_pascal_case_keys() {
        let json = serde_json::to_string(&SaveVersion::CURRENT).unwrap();
        assert!(json.contains("\"Major\":2"));
        assert!(json.contains("\"MinorRevision\":0"));
        let back: SaveVersion = serde_json::from_str(&json).unwrap();
        assert_eq!(back, SaveVersion::CURRENT);
    }

    #[test]
    fn empty_groups_are_omitted_from_json() {
        let file = SaveFile {
            version: SaveVersion::CURRENT,
            heat_sinks: IndexMap::new(),
            moderators: IndexMap::new(),
            conductors: Vec::new(),
            reflectors: IndexMap::new(),
            fuel_cells: IndexMap::new(),
            dims: SaveDims { x: 3, y: 3, z: 3 },
        };
        let json = serde_json::to_string(&file).unwrap();
        assert!(!json.contains("HeatSinks"));
        assert!(!json.contains("Conductors"));
        assert!(json.contains("InteriorDimensions"));
    }
}
