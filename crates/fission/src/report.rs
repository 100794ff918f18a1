//! The final stdout report.

use fission_search::{keep, ObjectiveKind};
use fission_sim::Reactor;

/// Print one report block for a grid: headline metrics, the rendered
/// layout, and the per-cluster table.
pub fn print_block(r: &mut Reactor, objective: ObjectiveKind) {
    let s = r.summary();
    println!("-------------------------");
    println!("cells            {}", s.total_cells);
    println!("valid clusters   {}/{}", s.valid_clusters, s.cluster_count);
    println!("objective        {:.4}", keep(objective, &s));
    println!("inactive blocks  {}", s.inactive_blocks);
    println!("self-sustaining  {}", if s.self_sustaining { "yes" } else { "no" });
    println!(
        "{}: power {:.2}, effective {:.2}, duty {:.3}, heat {:.1} vs cooling {:.1}",
        r.fuel().name,
        s.power,
        s.effective_power,
        s.duty_cycle,
        s.total_heating,
        s.total_cooling,
    );
    println!();
    println!("{}", r.describe());

    let clusters = r.clusters().to_vec();
    if !clusters.is_empty() {
        println!("cluster  cells  heating  cooling    output  valid");
        for (id, c) in clusters.iter().enumerate() {
            println!(
                "{:>7}  {:>5}  {:>7.1}  {:>7.1}  {:>8.2}  {}",
                id,
                c.cell_count,
                c.heating,
                c.cooling,
                c.output,
                if c.valid { "yes" } else { "no" },
            );
        }
    }
}
