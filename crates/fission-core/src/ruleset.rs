//! The immutable ruleset: numeric coefficients and heat-sink placement
//! rules, fixed to the post-overhaul generation.
//!
//! All tables are read-only after startup. The simulator never hardcodes a
//! numeric row; it asks the [`Ruleset`] handed to it at construction, so a
//! historical generation could be swapped in without touching the pipeline.

use crate::block::{CoolerKind, ModeratorKind, NeutronSource, ReflectorKind};
use std::sync::OnceLock;

/// Maximum number of moderators between two cells on one flux line.
pub const NEUTRON_REACH: usize = 4;

/// What a heat-sink placement rule counts in the six-neighborhood.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Need {
    /// Active fuel cells.
    Cell,
    /// Valid moderators.
    Moderator,
    /// Casing faces (out-of-bounds neighbors).
    Casing,
    /// Active heat sinks of one specific variant.
    Sink(CoolerKind),
    /// Active reflectors of any variant.
    Reflector,
}

/// A heat-sink placement rule, evaluated against the cached flags of the
/// current evaluation pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SinkRule {
    /// At least `n` neighbors satisfy the need.
    AtLeast(u8, Need),
    /// Exactly `n` neighbors satisfy the need.
    Exactly(u8, Need),
    /// Some axis has the need satisfied on both of its two neighbors.
    AxialPair(Need),
    /// Every sub-rule holds.
    All(&'static [SinkRule]),
}

use Need::{Casing, Cell, Moderator, Reflector, Sink};
use SinkRule::{All, AtLeast, AxialPair, Exactly};

fn placement_rule(kind: CoolerKind) -> Option<&'static SinkRule> {
    Some(match kind {
        CoolerKind::Air => return None,
        CoolerKind::Water => &AtLeast(1, Cell),
        CoolerKind::Iron => &AtLeast(1, Moderator),
        CoolerKind::Redstone => &All(&[AtLeast(1, Cell), AtLeast(1, Moderator)]),
        CoolerKind::Quartz => &AtLeast(1, Sink(CoolerKind::Redstone)),
        CoolerKind::Obsidian => &AxialPair(Sink(CoolerKind::Glowstone)),
        CoolerKind::NetherBrick => &AtLeast(1, Sink(CoolerKind::Obsidian)),
        CoolerKind::Glowstone => &AtLeast(2, Moderator),
        CoolerKind::Lapis => &All(&[AtLeast(1, Cell), AtLeast(1, Casing)]),
        CoolerKind::Gold => &AtLeast(2, Sink(CoolerKind::Iron)),
        CoolerKind::Prismarine => &AtLeast(1, Sink(CoolerKind::Water)),
        CoolerKind::Slime => &All(&[
            Exactly(1, Sink(CoolerKind::Water)),
            AtLeast(2, Sink(CoolerKind::Lead)),
        ]),
        CoolerKind::EndStone => &AtLeast(1, Reflector),
        CoolerKind::Purpur => &All(&[
            Exactly(1, Sink(CoolerKind::Iron)),
            AtLeast(1, Sink(CoolerKind::EndStone)),
        ]),
        CoolerKind::Diamond => &All(&[AtLeast(1, Cell), AtLeast(1, Sink(CoolerKind::Gold))]),
        CoolerKind::Emerald => &All(&[
            AtLeast(1, Moderator),
            AtLeast(1, Sink(CoolerKind::Prismarine)),
        ]),
        CoolerKind::Copper => &AtLeast(1, Sink(CoolerKind::Glowstone)),
        CoolerKind::Tin => &AxialPair(Sink(CoolerKind::Lapis)),
        CoolerKind::Lead => &AtLeast(1, Sink(CoolerKind::Iron)),
        CoolerKind::Boron => &All(&[Exactly(1, Sink(CoolerKind::Quartz)), AtLeast(1, Casing)]),
        CoolerKind::Lithium => &All(&[AxialPair(Sink(CoolerKind::Lead)), AtLeast(1, Casing)]),
        CoolerKind::Magnesium => &All(&[Exactly(1, Moderator), AtLeast(1, Casing)]),
        CoolerKind::Manganese => &AtLeast(2, Cell),
        CoolerKind::Aluminum => &All(&[
            AtLeast(1, Sink(CoolerKind::Quartz)),
            AtLeast(1, Sink(CoolerKind::Tin)),
        ]),
        CoolerKind::Silver => &All(&[
            AtLeast(2, Sink(CoolerKind::Glowstone)),
            AtLeast(1, Sink(CoolerKind::Tin)),
        ]),
        CoolerKind::Fluorite => &All(&[
            AtLeast(1, Sink(CoolerKind::Gold)),
            AtLeast(1, Sink(CoolerKind::Prismarine)),
        ]),
        CoolerKind::Villiaumite => &All(&[AtLeast(1, Sink(CoolerKind::Redstone)), AtLeast(1, Reflector)]),
        CoolerKind::Carobbiite => &All(&[
            AtLeast(1, Sink(CoolerKind::EndStone)),
            AtLeast(1, Sink(CoolerKind::Copper)),
        ]),
        CoolerKind::Arsenic => &AxialPair(Reflector),
        CoolerKind::Nitrogen => &All(&[
            AtLeast(2, Sink(CoolerKind::Copper)),
            AtLeast(1, Sink(CoolerKind::Purpur)),
        ]),
        CoolerKind::Helium => &All(&[Exactly(2, Sink(CoolerKind::Redstone)), AtLeast(1, Casing)]),
        CoolerKind::Enderium => &AtLeast(3, Moderator),
        CoolerKind::Cryotheum => &AtLeast(3, Cell),
    })
}

fn cooling_strength(kind: CoolerKind) -> f64 {
    match kind {
        CoolerKind::Air => 0.0,
        CoolerKind::Water => 55.0,
        CoolerKind::Iron => 50.0,
        CoolerKind::Redstone => 85.0,
        CoolerKind::Quartz => 80.0,
        CoolerKind::Obsidian => 70.0,
        CoolerKind::NetherBrick => 105.0,
        CoolerKind::Glowstone => 90.0,
        CoolerKind::Lapis => 100.0,
        CoolerKind::Gold => 110.0,
        CoolerKind::Prismarine => 115.0,
        CoolerKind::Slime => 145.0,
        CoolerKind::EndStone => 65.0,
        CoolerKind::Purpur => 95.0,
        CoolerKind::Diamond => 200.0,
        CoolerKind::Emerald => 195.0,
        CoolerKind::Copper => 75.0,
        CoolerKind::Tin => 120.0,
        CoolerKind::Lead => 60.0,
        CoolerKind::Boron => 160.0,
        CoolerKind::Lithium => 130.0,
        CoolerKind::Magnesium => 125.0,
        CoolerKind::Manganese => 150.0,
        CoolerKind::Aluminum => 175.0,
        CoolerKind::Silver => 170.0,
        CoolerKind::Fluorite => 165.0,
        CoolerKind::Villiaumite => 180.0,
        CoolerKind::Carobbiite => 140.0,
        CoolerKind::Arsenic => 135.0,
        CoolerKind::Nitrogen => 185.0,
        CoolerKind::Helium => 190.0,
        CoolerKind::Enderium => 155.0,
        CoolerKind::Cryotheum => 205.0,
    }
}

/// The immutable coefficient bundle handed to every simulator instance.
#[derive(Debug)]
pub struct Ruleset {
    /// Maximum moderators between two cells on one flux line.
    pub neutron_reach: usize,
    /// Maximum moderators between a cell and a usable reflector.
    pub reflector_reach: usize,
    /// Additive slack on a cluster's cooling budget before the duty
    /// cycle throttles it.
    pub cooling_leniency: f64,
    cooler_strength: [f64; CoolerKind::COUNT],
    moderator_flux: [f64; ModeratorKind::COUNT],
    moderator_efficiency: [f64; ModeratorKind::COUNT],
    reflector_reflectivity: [f64; ReflectorKind::COUNT],
    reflector_efficiency: [f64; ReflectorKind::COUNT],
    source_efficiency: [f64; NeutronSource::COUNT],
}

impl Ruleset {
    fn new_overhaul() -> Ruleset {
        let mut cooler_strength = [0.0; CoolerKind::COUNT];
        for kind in CoolerKind::ALL {
            cooler_strength[kind as usize] = cooling_strength(kind);
        }

        let mut moderator_flux = [0.0; ModeratorKind::COUNT];
        let mut moderator_efficiency = [0.0; ModeratorKind::COUNT];
        moderator_flux[ModeratorKind::Graphite as usize] = 10.0;
        moderator_efficiency[ModeratorKind::Graphite as usize] = 1.10;
        moderator_flux[ModeratorKind::Beryllium as usize] = 22.0;
        moderator_efficiency[ModeratorKind::Beryllium as usize] = 1.05;
        moderator_flux[ModeratorKind::HeavyWater as usize] = 36.0;
        moderator_efficiency[ModeratorKind::HeavyWater as usize] = 1.00;

        let mut reflector_reflectivity = [0.0; ReflectorKind::COUNT];
        let mut reflector_efficiency = [0.0; ReflectorKind::COUNT];
        reflector_reflectivity[ReflectorKind::BerylliumCarbon as usize] = 1.0;
        reflector_efficiency[ReflectorKind::BerylliumCarbon as usize] = 0.50;
        reflector_reflectivity[ReflectorKind::LeadSteel as usize] = 0.5;
        reflector_efficiency[ReflectorKind::LeadSteel as usize] = 0.25;

        let mut source_efficiency = [1.0; NeutronSource::COUNT];
        source_efficiency[NeutronSource::RaBe as usize] = 0.90;
        source_efficiency[NeutronSource::PoBe as usize] = 0.95;
        source_efficiency[NeutronSource::Cf252 as usize] = 1.00;

        Ruleset {
            neutron_reach: NEUTRON_REACH,
            reflector_reach: NEUTRON_REACH / 2,
            cooling_leniency: 0.0,
            cooler_strength,
            moderator_flux,
            moderator_efficiency,
            reflector_reflectivity,
            reflector_efficiency,
            source_efficiency,
        }
    }

    /// The process-wide post-overhaul ruleset.
    pub fn overhaul() -> &'static Ruleset {
        static RULESET: OnceLock<Ruleset> = OnceLock::new();
        RULESET.get_or_init(Ruleset::new_overhaul)
    }

    /// Heat removed per tick by an active sink of this variant.
    pub fn cooler_strength(&self, kind: CoolerKind) -> f64 {
        self.cooler_strength[kind as usize]
    }

    /// Placement rule for a sink variant. `None` for the `Air` sentinel.
    pub fn sink_rule(&self, kind: CoolerKind) -> Option<&'static SinkRule> {
        placement_rule(kind)
    }

    /// Flux contributed by one moderator of this variant on a line.
    pub fn moderator_flux(&self, kind: ModeratorKind) -> f64 {
        self.moderator_flux[kind as usize]
    }

    /// Efficiency contributed by one moderator of this variant on a line.
    pub fn moderator_efficiency(&self, kind: ModeratorKind) -> f64 {
        self.moderator_efficiency[kind as usize]
    }

    /// Fraction of line flux a reflector returns (doubled on the way back).
    pub fn reflector_reflectivity(&self, kind: ReflectorKind) -> f64 {
        self.reflector_reflectivity[kind as usize]
    }

    /// Efficiency scale applied to a reflected line's contribution.
    pub fn reflector_efficiency(&self, kind: ReflectorKind) -> f64 {
        self.reflector_efficiency[kind as usize]
    }

    /// Efficiency multiplier for a primed cell's output.
    pub fn source_efficiency(&self, source: NeutronSource) -> f64 {
        self.source_efficiency[source as usize]
    }
}
