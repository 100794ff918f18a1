//! Reading a save file back into a grid.

use crate::error::SaveError;
use crate::format::{SaveCoord, SaveFile};
use fission_core::{
    fuel_by_name, Block, CoolerKind, FuelId, ModeratorKind, NeutronSource, ReflectorKind,
};
use fission_grid::{Dims, Grid, Pos};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// A parsed save: the grid plus the fuel named by the cell keys, when
/// the current table knows it.
#[derive(Clone, Debug)]
pub struct LoadedSave {
    /// The rebuilt grid.
    pub grid: Grid,
    /// Fuel from the first fuel-cell key, if the name is in the table.
    pub fuel: Option<FuelId>,
}

fn pos(c: SaveCoord) -> Pos {
    Pos::new(c.x - 1, c.y - 1, c.z - 1)
}

/// Parse `path` into a grid.
pub fn read_save(path: &Path) -> Result<LoadedSave, SaveError> {
    let file = File::open(path)?;
    let save: SaveFile = serde_json::from_reader(BufReader::new(file))?;
    from_save(&save)
}

/// Rebuild a grid from an already-parsed save.
pub fn from_save(save: &SaveFile) -> Result<LoadedSave, SaveError> {
    if save.dims.x <= 0 || save.dims.y <= 0 || save.dims.z <= 0 {
        return Err(SaveError::BadDimensions);
    }
    let mut grid = Grid::new(Dims::new(save.dims.x, save.dims.y, save.dims.z));

    for (name, coords) in &save.heat_sinks {
        let kind = CoolerKind::from_name(name).ok_or_else(|| SaveError::UnknownBlock {
            name: name.clone(),
        })?;
        for &c in coords {
            grid.set(pos(c), Block::cooler(kind));
        }
    }
    for (name, coords) in &save.moderators {
        let kind = ModeratorKind::from_name(name).ok_or_else(|| SaveError::UnknownBlock {
            name: name.clone(),
        })?;
        for &c in coords {
            grid.set(pos(c), Block::moderator(kind));
        }
    }
    for &c in &save.conductors {
        grid.set(pos(c), Block::conductor());
    }
    for (name, coords) in &save.reflectors {
        let kind = ReflectorKind::from_name(name).ok_or_else(|| SaveError::UnknownBlock {
            name: name.clone(),
        })?;
        for &c in coords {
            grid.set(pos(c), Block::reflector(kind));
        }
    }

    let mut loaded_fuel = None;
    for (key, coords) in &save.fuel_cells {
        let mut parts = key.split(';');
        let (Some(fuel_name), Some(_primed), Some(source_name)) =
            (parts.next(), parts.next(), parts.next())
        else {
            return Err(SaveError::MalformedFuelKey { key: key.clone() });
        };
        let source =
            NeutronSource::from_name(source_name).ok_or_else(|| SaveError::UnknownBlock {
                name: source_name.to_string(),
            })?;
        if loaded_fuel.is_none() {
            loaded_fuel = fuel_by_name(fuel_name);
        }
        for &c in coords {
            grid.set(pos(c), Block::fuel_cell(source));
        }
    }

    Ok(LoadedSave {
        grid,
        fuel: loaded_fuel,
    })
}
