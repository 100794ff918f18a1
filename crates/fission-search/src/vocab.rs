//! The random-edit vocabulary: block templates with stage-dependent
//! sampling weights.

use fission_core::{Block, CoolerKind, ModeratorKind, NeutronSource, ReflectorKind};

/// Templates for blind edits. Stage 1 leans on structure (cells,
/// moderators, conductors, reflectors); stage 2 leans on sinks.
pub(crate) fn vocabulary(stage2: bool) -> Vec<(Block, f64)> {
    if !stage2 {
        return vec![
            (Block::AIR, 1.0),
            (Block::fuel_cell(NeutronSource::Unprimed), 1.0),
            (Block::fuel_cell(NeutronSource::RaBe), 0.4),
            (Block::moderator(ModeratorKind::Graphite), 1.5),
            (Block::moderator(ModeratorKind::Beryllium), 0.4),
            (Block::moderator(ModeratorKind::HeavyWater), 0.4),
            (Block::conductor(), 1.5),
            (Block::reflector(ReflectorKind::BerylliumCarbon), 1.0),
            (Block::reflector(ReflectorKind::LeadSteel), 0.2),
        ];
    }
    let mut v = vec![
        (Block::AIR, 0.5),
        (Block::conductor(), 0.5),
        (Block::fuel_cell(NeutronSource::Unprimed), 0.2),
        (Block::moderator(ModeratorKind::Graphite), 0.2),
    ];
    for kind in CoolerKind::ALL {
        v.push((Block::cooler(kind), 1.0));
    }
    v
}
