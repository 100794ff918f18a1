//! The block alphabet: kinds, per-kind variants, and the per-cell [`Block`]
//! tuple stored on the grid.
//!
//! Variant fields are only meaningful for their own kind. [`Block`]
//! constructors and [`Block::normalized`] force off-kind variants back to
//! their sentinel so two blocks with the same placement compare equal.

/// What occupies a grid cell.
///
/// `Casing` is the implicit boundary surrounding the grid. It is returned by
/// out-of-bounds reads and is never stored in a cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// Empty cell.
    #[default]
    Air,
    /// A fuel cell, optionally carrying a neutron source.
    FuelCell,
    /// A neutron moderator.
    Moderator,
    /// A heat sink.
    Cooler,
    /// A heat conductor.
    Conductor,
    /// A neutron reflector.
    Reflector,
    /// The wall around the grid. Sentinel only.
    Casing,
}

impl BlockKind {
    /// True for kinds that block a fuel cell's neighborhood (used by the
    /// trapped-cell count): cell, moderator, reflector, casing.
    pub fn is_solid(self) -> bool {
        matches!(
            self,
            BlockKind::FuelCell | BlockKind::Moderator | BlockKind::Reflector | BlockKind::Casing
        )
    }

    /// Single-character code used by the grid renderer.
    pub fn code(self) -> char {
        match self {
            BlockKind::Air => '_',
            BlockKind::FuelCell => 'F',
            BlockKind::Moderator => 'M',
            BlockKind::Cooler => 'S',
            BlockKind::Conductor => 'C',
            BlockKind::Reflector => 'R',
            BlockKind::Casing => '#',
        }
    }
}

/// Heat-sink variants of the post-overhaul generation.
///
/// `Air` is the sentinel for non-cooler blocks. Each named variant has a
/// cooling strength and a placement rule in the [`Ruleset`](crate::Ruleset).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum CoolerKind {
    #[default]
    Air,
    Water,
    Iron,
    Redstone,
    Quartz,
    Obsidian,
    NetherBrick,
    Glowstone,
    Lapis,
    Gold,
    Prismarine,
    Slime,
    EndStone,
    Purpur,
    Diamond,
    Emerald,
    Copper,
    Tin,
    Lead,
    Boron,
    Lithium,
    Magnesium,
    Manganese,
    Aluminum,
    Silver,
    Fluorite,
    Villiaumite,
    Carobbiite,
    Arsenic,
    Nitrogen,
    Helium,
    Enderium,
    Cryotheum,
}

impl CoolerKind {
    /// Number of variants including the `Air` sentinel.
    pub const COUNT: usize = 33;

    /// Every named variant, in table order.
    pub const ALL: [CoolerKind; 32] = [
        CoolerKind::Water,
        CoolerKind::Iron,
        CoolerKind::Redstone,
        CoolerKind::Quartz,
        CoolerKind::Obsidian,
        CoolerKind::NetherBrick,
        CoolerKind::Glowstone,
        CoolerKind::Lapis,
        CoolerKind::Gold,
        CoolerKind::Prismarine,
        CoolerKind::Slime,
        CoolerKind::EndStone,
        CoolerKind::Purpur,
        CoolerKind::Diamond,
        CoolerKind::Emerald,
        CoolerKind::Copper,
        CoolerKind::Tin,
        CoolerKind::Lead,
        CoolerKind::Boron,
        CoolerKind::Lithium,
        CoolerKind::Magnesium,
        CoolerKind::Manganese,
        CoolerKind::Aluminum,
        CoolerKind::Silver,
        CoolerKind::Fluorite,
        CoolerKind::Villiaumite,
        CoolerKind::Carobbiite,
        CoolerKind::Arsenic,
        CoolerKind::Nitrogen,
        CoolerKind::Helium,
        CoolerKind::Enderium,
        CoolerKind::Cryotheum,
    ];

    /// Display name, as used by the save format's `HeatSinks` map.
    pub fn name(self) -> &'static str {
        match self {
            CoolerKind::Air => "Air",
            CoolerKind::Water => "Water",
            CoolerKind::Iron => "Iron",
            CoolerKind::Redstone => "Redstone",
            CoolerKind::Quartz => "Quartz",
            CoolerKind::Obsidian => "Obsidian",
            CoolerKind::NetherBrick => "NetherBrick",
            CoolerKind::Glowstone => "Glowstone",
            CoolerKind::Lapis => "Lapis",
            CoolerKind::Gold => "Gold",
            CoolerKind::Prismarine => "Prismarine",
            CoolerKind::Slime => "Slime",
            CoolerKind::EndStone => "EndStone",
            CoolerKind::Purpur => "Purpur",
            CoolerKind::Diamond => "Diamond",
            CoolerKind::Emerald => "Emerald",
            CoolerKind::Copper => "Copper",
            CoolerKind::Tin => "Tin",
            CoolerKind::Lead => "Lead",
            CoolerKind::Boron => "Boron",
            CoolerKind::Lithium => "Lithium",
            CoolerKind::Magnesium => "Magnesium",
            CoolerKind::Manganese => "Manganese",
            CoolerKind::Aluminum => "Aluminum",
            CoolerKind::Silver => "Silver",
            CoolerKind::Fluorite => "Fluorite",
            CoolerKind::Villiaumite => "Villiaumite",
            CoolerKind::Carobbiite => "Carobbiite",
            CoolerKind::Arsenic => "Arsenic",
            CoolerKind::Nitrogen => "Nitrogen",
            CoolerKind::Helium => "Helium",
            CoolerKind::Enderium => "Enderium",
            CoolerKind::Cryotheum => "Cryotheum",
        }
    }

    /// Look a variant up by its display name.
    pub fn from_name(name: &str) -> Option<CoolerKind> {
        CoolerKind::ALL.iter().copied().find(|c| c.name() == name)
    }

    /// Two-character code used by the grid renderer.
    pub fn code(self) -> &'static str {
        match self {
            CoolerKind::Air => "  ",
            CoolerKind::Water => "Wt",
            CoolerKind::Iron => "Fe",
            CoolerKind::Redstone => "Rs",
            CoolerKind::Quartz => "Qz",
            CoolerKind::Obsidian => "Ob",
            CoolerKind::NetherBrick => "Nb",
            CoolerKind::Glowstone => "Gs",
            CoolerKind::Lapis => "Lp",
            CoolerKind::Gold => "Au",
            CoolerKind::Prismarine => "Pm",
            CoolerKind::Slime => "Sl",
            CoolerKind::EndStone => "Es",
            CoolerKind::Purpur => "Pp",
            CoolerKind::Diamond => "Di",
            CoolerKind::Emerald => "Em",
            CoolerKind::Copper => "Cu",
            CoolerKind::Tin => "Sn",
            CoolerKind::Lead => "Pb",
            CoolerKind::Boron => "Bo",
            CoolerKind::Lithium => "Li",
            CoolerKind::Magnesium => "Mg",
            CoolerKind::Manganese => "Mn",
            CoolerKind::Aluminum => "Al",
            CoolerKind::Silver => "Ag",
            CoolerKind::Fluorite => "Fl",
            CoolerKind::Villiaumite => "Vi",
            CoolerKind::Carobbiite => "Cb",
            CoolerKind::Arsenic => "As",
            CoolerKind::Nitrogen => "Ni",
            CoolerKind::Helium => "He",
            CoolerKind::Enderium => "En",
            CoolerKind::Cryotheum => "Cr",
        }
    }
}

/// Moderator variants.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum ModeratorKind {
    #[default]
    Air,
    Graphite,
    Beryllium,
    HeavyWater,
}

impl ModeratorKind {
    /// Number of variants including the `Air` sentinel.
    pub const COUNT: usize = 4;

    /// Every named variant.
    pub const ALL: [ModeratorKind; 3] = [
        ModeratorKind::Graphite,
        ModeratorKind::Beryllium,
        ModeratorKind::HeavyWater,
    ];

    /// Display name, as used by the save format's `Moderators` map.
    pub fn name(self) -> &'static str {
        match self {
            ModeratorKind::Air => "Air",
            ModeratorKind::Graphite => "Graphite",
            ModeratorKind::Beryllium => "Beryllium",
            ModeratorKind::HeavyWater => "HeavyWater",
        }
    }

    /// Look a variant up by its display name.
    pub fn from_name(name: &str) -> Option<ModeratorKind> {
        ModeratorKind::ALL.iter().copied().find(|m| m.name() == name)
    }

    /// Two-character code used by the grid renderer.
    pub fn code(self) -> &'static str {
        match self {
            ModeratorKind::Air => "  ",
            ModeratorKind::Graphite => "Gr",
            ModeratorKind::Beryllium => "Be",
            ModeratorKind::HeavyWater => "HW",
        }
    }
}

/// Reflector variants.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum ReflectorKind {
    #[default]
    Air,
    BerylliumCarbon,
    LeadSteel,
}

impl ReflectorKind {
    /// Number of variants including the `Air` sentinel.
    pub const COUNT: usize = 3;

    /// Every named variant.
    pub const ALL: [ReflectorKind; 2] = [ReflectorKind::BerylliumCarbon, ReflectorKind::LeadSteel];

    /// Display name, as used by the save format's `Reflectors` map.
    pub fn name(self) -> &'static str {
        match self {
            ReflectorKind::Air => "Air",
            ReflectorKind::BerylliumCarbon => "Beryllium-Carbon",
            ReflectorKind::LeadSteel => "Lead-Steel",
        }
    }

    /// Look a variant up by its display name.
    pub fn from_name(name: &str) -> Option<ReflectorKind> {
        ReflectorKind::ALL.iter().copied().find(|r| r.name() == name)
    }

    /// Two-character code used by the grid renderer.
    pub fn code(self) -> &'static str {
        match self {
            ReflectorKind::Air => "  ",
            ReflectorKind::BerylliumCarbon => "BC",
            ReflectorKind::LeadSteel => "LS",
        }
    }
}

/// Neutron source variants attached to fuel cells.
///
/// A fuel cell carrying a non-`Unprimed` source is *primed*: it seeds flux
/// propagation when it also has line of sight to the casing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum NeutronSource {
    #[default]
    Unprimed,
    RaBe,
    PoBe,
    Cf252,
}

impl NeutronSource {
    /// Number of variants including `Unprimed`.
    pub const COUNT: usize = 4;

    /// Every priming variant.
    pub const ALL: [NeutronSource; 3] =
        [NeutronSource::RaBe, NeutronSource::PoBe, NeutronSource::Cf252];

    /// Display name, as used by the save format's fuel-cell keys.
    pub fn name(self) -> &'static str {
        match self {
            NeutronSource::Unprimed => "None",
            NeutronSource::RaBe => "Ra-Be",
            NeutronSource::PoBe => "Po-Be",
            NeutronSource::Cf252 => "Cf-252",
        }
    }

    /// Look a variant up by its display name.
    pub fn from_name(name: &str) -> Option<NeutronSource> {
        if name == NeutronSource::Unprimed.name() {
            return Some(NeutronSource::Unprimed);
        }
        NeutronSource::ALL.iter().copied().find(|s| s.name() == name)
    }

    /// Two-character code used by the grid renderer.
    pub fn code(self) -> &'static str {
        match self {
            NeutronSource::Unprimed => "--",
            NeutronSource::RaBe => "Ra",
            NeutronSource::PoBe => "Po",
            NeutronSource::Cf252 => "Cf",
        }
    }
}

/// The full contents of one grid cell.
///
/// Invariant: `cooler` is non-`Air` iff `kind == Cooler`, `moderator` iff
/// `Moderator`, `reflector` iff `Reflector`; `source` may be non-`Unprimed`
/// only when `kind == FuelCell`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Block {
    /// What the cell holds.
    pub kind: BlockKind,
    /// Heat-sink variant (cooler cells only).
    pub cooler: CoolerKind,
    /// Moderator variant (moderator cells only).
    pub moderator: ModeratorKind,
    /// Neutron source (fuel cells only).
    pub source: NeutronSource,
    /// Reflector variant (reflector cells only).
    pub reflector: ReflectorKind,
}

impl Block {
    /// An empty cell.
    pub const AIR: Block = Block {
        kind: BlockKind::Air,
        cooler: CoolerKind::Air,
        moderator: ModeratorKind::Air,
        source: NeutronSource::Unprimed,
        reflector: ReflectorKind::Air,
    };

    /// A fuel cell, optionally primed.
    pub fn fuel_cell(source: NeutronSource) -> Block {
        Block {
            kind: BlockKind::FuelCell,
            source,
            ..Block::AIR
        }
    }

    /// A moderator.
    pub fn moderator(moderator: ModeratorKind) -> Block {
        Block {
            kind: BlockKind::Moderator,
            moderator,
            ..Block::AIR
        }
    }

    /// A heat sink.
    pub fn cooler(cooler: CoolerKind) -> Block {
        Block {
            kind: BlockKind::Cooler,
            cooler,
            ..Block::AIR
        }
    }

    /// A conductor.
    pub fn conductor() -> Block {
        Block {
            kind: BlockKind::Conductor,
            ..Block::AIR
        }
    }

    /// A reflector.
    pub fn reflector(reflector: ReflectorKind) -> Block {
        Block {
            kind: BlockKind::Reflector,
            reflector,
            ..Block::AIR
        }
    }

    /// Copy with all off-kind variants forced back to their sentinel.
    pub fn normalized(self) -> Block {
        Block {
            kind: self.kind,
            cooler: if self.kind == BlockKind::Cooler {
                self.cooler
            } else {
                CoolerKind::Air
            },
            moderator: if self.kind == BlockKind::Moderator {
                self.moderator
            } else {
                ModeratorKind::Air
            },
            source: if self.kind == BlockKind::FuelCell {
                self.source
            } else {
                NeutronSource::Unprimed
            },
            reflector: if self.kind == BlockKind::Reflector {
                self.reflector
            } else {
                ReflectorKind::Air
            },
        }
    }

    /// True when the cell is empty.
    pub fn is_air(self) -> bool {
        self.kind == BlockKind::Air
    }

    /// True for a fuel cell with a non-`Unprimed` source.
    pub fn is_primed(self) -> bool {
        self.kind == BlockKind::FuelCell && self.source != NeutronSource::Unprimed
    }

    /// Stable byte fingerprint input: the five fields as discriminant bytes.
    ///
    /// Used for tabu fingerprints and grid equality hashing. The encoding is
    /// positional, so two normalized blocks agree iff their bytes agree.
    pub fn to_bytes(self) -> [u8; 5] {
        [
            self.kind as u8,
            self.cooler as u8,
            self.moderator as u8,
            self.source as u8,
            self.reflector as u8,
        ]
    }
}
