//! Save round-trip: write a grid, read it back, compare.

use fission_core::{
    default_fuel, fuel, Block, CoolerKind, ModeratorKind, NeutronSource, ReflectorKind,
};
use fission_grid::{Dims, Grid, Pos};
use fission_save::{read_save, write_save};

fn busy_grid() -> Grid {
    let mut g = Grid::new(Dims::new(4, 3, 5));
    g.set(Pos::new(0, 0, 0), Block::fuel_cell(NeutronSource::RaBe));
    g.set(Pos::new(1, 0, 0), Block::moderator(ModeratorKind::Graphite));
    g.set(Pos::new(2, 0, 0), Block::fuel_cell(NeutronSource::Unprimed));
    g.set(Pos::new(3, 0, 0), Block::reflector(ReflectorKind::LeadSteel));
    g.set(Pos::new(0, 1, 0), Block::cooler(CoolerKind::Water));
    g.set(Pos::new(0, 2, 0), Block::cooler(CoolerKind::Diamond));
    g.set(Pos::new(1, 1, 1), Block::conductor());
    g.set(Pos::new(3, 2, 4), Block::moderator(ModeratorKind::HeavyWater));
    g
}

#[test]
fn write_then_read_reproduces_the_grid() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roundtrip.json");
    let original = busy_grid();

    write_save(&path, &original, fuel(default_fuel()).unwrap()).unwrap();
    let loaded = read_save(&path).unwrap();

    assert_eq!(loaded.grid, original);
    assert_eq!(loaded.fuel, Some(default_fuel()));
}

#[test]
fn empty_grid_round_trips_too() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.json");
    let original = Grid::new(Dims::new(2, 2, 2));
    write_save(&path, &original, fuel(default_fuel()).unwrap()).unwrap();
    let loaded = read_save(&path).unwrap();
    assert_eq!(loaded.grid, original);
    assert_eq!(loaded.fuel, None);
}
