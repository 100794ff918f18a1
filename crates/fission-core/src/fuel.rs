//! The closed fuel enumeration.
//!
//! Fuels come in isotope families, each in metal / oxide / nitride form
//! (the two MOX blends are single-form). Entry 0 is `generic`, a
//! normalized testing fuel with unit heat and criticality 1.

use std::fmt;
use std::sync::OnceLock;

/// Index into the fuel table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FuelId(pub u32);

impl fmt::Display for FuelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fuel#{}", self.0)
    }
}

/// One fuel entry: scalar coefficients consumed by the simulator.
#[derive(Clone, Debug, PartialEq)]
pub struct Fuel {
    /// Display name, as used by the save format's fuel-cell keys.
    pub name: String,
    /// Base efficiency multiplier on per-cell output.
    pub base_efficiency: f64,
    /// Base heat per cell-adjacency unit.
    pub base_heat: f64,
    /// Flux threshold above which a cell becomes active.
    pub criticality: f64,
}

/// The normalized testing fuel (criticality 1).
pub const GENERIC_FUEL: FuelId = FuelId(0);

/// One isotope family: name, metal heat, oxide heat (None = single-form
/// blend), efficiency, criticality. Oxide adds 0.05 efficiency, nitride
/// 0.10; nitride heat is metal heat times 1.5.
struct Family {
    name: &'static str,
    metal_heat: f64,
    oxide_heat: Option<f64>,
    efficiency: f64,
    criticality: f64,
}

const FAMILIES: [Family; 27] = [
    Family { name: "TBU", metal_heat: 18.0, oxide_heat: Some(22.5), efficiency: 1.25, criticality: 234.0 },
    Family { name: "LEU-233", metal_heat: 60.0, oxide_heat: Some(75.0), efficiency: 1.10, criticality: 156.0 },
    Family { name: "HEU-233", metal_heat: 360.0, oxide_heat: Some(450.0), efficiency: 1.15, criticality: 78.0 },
    Family { name: "LEU-235", metal_heat: 50.0, oxide_heat: Some(62.5), efficiency: 1.00, criticality: 128.0 },
    Family { name: "HEU-235", metal_heat: 300.0, oxide_heat: Some(375.0), efficiency: 1.05, criticality: 64.0 },
    Family { name: "LEN-236", metal_heat: 36.0, oxide_heat: Some(45.0), efficiency: 1.10, criticality: 180.0 },
    Family { name: "HEN-236", metal_heat: 216.0, oxide_heat: Some(270.0), efficiency: 1.15, criticality: 90.0 },
    Family { name: "LEP-239", metal_heat: 40.0, oxide_heat: Some(50.0), efficiency: 1.20, criticality: 210.0 },
    Family { name: "HEP-239", metal_heat: 240.0, oxide_heat: Some(300.0), efficiency: 1.25, criticality: 105.0 },
    Family { name: "LEP-241", metal_heat: 70.0, oxide_heat: Some(87.5), efficiency: 1.25, criticality: 160.0 },
    Family { name: "HEP-241", metal_heat: 420.0, oxide_heat: Some(525.0), efficiency: 1.30, criticality: 80.0 },
    Family { name: "MOX-239", metal_heat: 57.5, oxide_heat: None, efficiency: 1.05, criticality: 200.0 },
    Family { name: "MOX-241", metal_heat: 97.5, oxide_heat: None, efficiency: 1.15, criticality: 150.0 },
    Family { name: "LEA-242", metal_heat: 94.0, oxide_heat: Some(117.5), efficiency: 1.35, criticality: 130.0 },
    Family { name: "HEA-242", metal_heat: 564.0, oxide_heat: Some(705.0), efficiency: 1.40, criticality: 65.0 },
    Family { name: "LECm-243", metal_heat: 112.0, oxide_heat: Some(140.0), efficiency: 1.45, criticality: 110.0 },
    Family { name: "HECm-243", metal_heat: 672.0, oxide_heat: Some(840.0), efficiency: 1.50, criticality: 55.0 },
    Family { name: "LECm-245", metal_heat: 68.0, oxide_heat: Some(85.0), efficiency: 1.50, criticality: 170.0 },
    Family { name: "HECm-245", metal_heat: 408.0, oxide_heat: Some(510.0), efficiency: 1.55, criticality: 85.0 },
    Family { name: "LECm-247", metal_heat: 54.0, oxide_heat: Some(67.5), efficiency: 1.55, criticality: 250.0 },
    Family { name: "HECm-247", metal_heat: 324.0, oxide_heat: Some(405.0), efficiency: 1.60, criticality: 125.0 },
    Family { name: "LEB-248", metal_heat: 52.0, oxide_heat: Some(65.0), efficiency: 1.65, criticality: 140.0 },
    Family { name: "HEB-248", metal_heat: 312.0, oxide_heat: Some(390.0), efficiency: 1.70, criticality: 70.0 },
    Family { name: "LECf-249", metal_heat: 116.0, oxide_heat: Some(145.0), efficiency: 1.70, criticality: 100.0 },
    Family { name: "HECf-249", metal_heat: 696.0, oxide_heat: Some(870.0), efficiency: 1.75, criticality: 50.0 },
    Family { name: "LECf-251", metal_heat: 120.0, oxide_heat: Some(150.0), efficiency: 1.75, criticality: 90.0 },
    Family { name: "HECf-251", metal_heat: 720.0, oxide_heat: Some(900.0), efficiency: 1.80, criticality: 45.0 },
];

fn build_table() -> Vec<Fuel> {
    let mut out = Vec::with_capacity(1 + FAMILIES.len() * 3);
    out.push(Fuel {
        name: "generic".to_string(),
        base_efficiency: 1.0,
        base_heat: 1.0,
        criticality: 1.0,
    });
    for fam in &FAMILIES {
        out.push(Fuel {
            name: fam.name.to_string(),
            base_efficiency: fam.efficiency,
            base_heat: fam.metal_heat,
            criticality: fam.criticality,
        });
        if let Some(oxide_heat) = fam.oxide_heat {
            out.push(Fuel {
                name: format!("{} Oxide", fam.name),
                base_efficiency: fam.efficiency + 0.05,
                base_heat: oxide_heat,
                criticality: fam.criticality,
            });
            out.push(Fuel {
                name: format!("{} Nitride", fam.name),
                base_efficiency: fam.efficiency + 0.10,
                base_heat: fam.metal_heat * 1.5,
                criticality: fam.criticality,
            });
        }
    }
    out
}

/// The full fuel table. Built once, immutable afterwards.
pub fn fuels() -> &'static [Fuel] {
    static TABLE: OnceLock<Vec<Fuel>> = OnceLock::new();
    TABLE.get_or_init(build_table)
}

/// Look a fuel up by id. `None` when the index is out of range.
pub fn fuel(id: FuelId) -> Option<&'static Fuel> {
    fuels().get(id.0 as usize)
}

/// Look a fuel up by display name.
pub fn fuel_by_name(name: &str) -> Option<FuelId> {
    fuels()
        .iter()
        .position(|f| f.name == name)
        .map(|i| FuelId(i as u32))
}

/// The fuel optimized for when none is requested: LEU-235 Oxide.
pub fn default_fuel() -> FuelId {
    fuel_by_name("LEU-235 Oxide").expect("LEU-235 Oxide is in the table")
}
