//! Building and writing save files.

use crate::error::SaveError;
use crate::format::{SaveCoord, SaveDims, SaveFile, SaveVersion};
use fission_core::{BlockKind, Fuel, NeutronSource};
use fission_grid::{Dims, Grid, Pos};
use indexmap::IndexMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

fn coord(p: Pos) -> SaveCoord {
    SaveCoord {
        x: p.x + 1,
        y: p.y + 1,
        z: p.z + 1,
    }
}

/// The output file name: `out_<unix>_<X>_<Y>_<Z>_<effectivePower>.json`.
pub fn save_file_name(dims: Dims, effective_power: f64, unix_seconds: u64) -> String {
    format!(
        "out_{}_{}_{}_{}_{:.0}.json",
        unix_seconds, dims.x, dims.y, dims.z, effective_power
    )
}

/// Group a grid into the save shape. The whole grid was optimized for
/// one fuel, so every cell shares `fuel`'s name in its key.
pub fn to_save(grid: &Grid, fuel: &Fuel) -> SaveFile {
    let mut heat_sinks: IndexMap<String, Vec<SaveCoord>> = IndexMap::new();
    let mut moderators: IndexMap<String, Vec<SaveCoord>> = IndexMap::new();
    let mut conductors: Vec<SaveCoord> = Vec::new();
    let mut reflectors: IndexMap<String, Vec<SaveCoord>> = IndexMap::new();
    let mut fuel_cells: IndexMap<String, Vec<SaveCoord>> = IndexMap::new();

    for p in grid.positions() {
        let b = grid.block_at(p);
        match b.kind {
            BlockKind::Cooler => heat_sinks
                .entry(b.cooler.name().to_string())
                .or_default()
                .push(coord(p)),
            BlockKind::Moderator => moderators
                .entry(b.moderator.name().to_string())
                .or_default()
                .push(coord(p)),
            BlockKind::Conductor => conductors.push(coord(p)),
            BlockKind::Reflector => reflectors
                .entry(b.reflector.name().to_string())
                .or_default()
                .push(coord(p)),
            BlockKind::FuelCell => {
                let primed = b.source != NeutronSource::Unprimed;
                let key = format!(
                    "{};{};{}",
                    fuel.name,
                    if primed { "True" } else { "False" },
                    b.source.name()
                );
                fuel_cells.entry(key).or_default().push(coord(p));
            }
            BlockKind::Air | BlockKind::Casing => {}
        }
    }

    let dims = grid.dims();
    SaveFile {
        version: SaveVersion::CURRENT,
        heat_sinks,
        moderators,
        conductors,
        reflectors,
        fuel_cells,
        dims: SaveDims {
            x: dims.x,
            y: dims.y,
            z: dims.z,
        },
    }
}

/// Serialize a grid to `path`.
pub fn write_save(path: &Path, grid: &Grid, fuel: &Fuel) -> Result<(), SaveError> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &to_save(grid, fuel))?;
    Ok(())
}
