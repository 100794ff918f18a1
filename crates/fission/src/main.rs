//! Offline optimizer for voxel fission reactor layouts.
//!
//! `fission [X Y Z [fuelIndex [objective [save.json]]]]` searches the box
//! for a high-scoring layout, streaming progress to stderr and printing
//! the final report to stdout. The best grid is exported as a save file
//! and one CSV row is appended to `log.csv`.

mod args;
mod progress;
mod report;

use fission_save::{append_log, read_save, save_file_name, write_save};
use fission_search::{Search, SearchConfig};
use fission_sim::Reactor;
use std::path::Path;
use std::process::ExitCode;
use std::sync::atomic::Ordering;
use std::time::{SystemTime, UNIX_EPOCH};

fn main() -> ExitCode {
    env_logger::init();

    let raw: Vec<String> = std::env::args().skip(1).collect();
    let cli = match args::parse(&raw) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("fission: {e}");
            return ExitCode::from(2);
        }
    };

    let unix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let mut config = SearchConfig::new(cli.dims, cli.fuel);
    config.objective = cli.objective;
    config.seed = unix;

    let start_grid = match &cli.seed_save {
        Some(path) => match read_save(path) {
            Ok(loaded) if loaded.grid.dims() == cli.dims => {
                log::info!("seeding search from {}", path.display());
                loaded.grid
            }
            Ok(loaded) => {
                log::warn!(
                    "seed save is {} but the search box is {}; starting empty",
                    loaded.grid.dims(),
                    cli.dims
                );
                fission_grid::Grid::new(cli.dims)
            }
            Err(e) => {
                log::warn!("could not read seed save {}: {e}; starting empty", path.display());
                fission_grid::Grid::new(cli.dims)
            }
        },
        None => fission_grid::Grid::new(cli.dims),
    };

    let mut search = match Search::from_grid(config, start_grid) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("fission: {e}");
            return ExitCode::from(2);
        }
    };

    let stop = search.stop_flag();
    if let Err(e) = ctrlc::set_handler(move || stop.store(true, Ordering::Relaxed)) {
        log::warn!("no SIGINT handler, run will only stop at the budget: {e}");
    }

    let mut line = progress::ProgressLine::default();
    let best = search.run(|report| line.update(report));
    line.finish();

    // Two report blocks: the best as kept, then the same grid with the
    // dead weight pruned away.
    let mut kept = best.clone();
    report::print_block(&mut kept, cli.objective);

    let mut pruned = best.clone();
    pruned.prune_inactives(false);
    report::print_block(&mut pruned, cli.objective);

    export(&mut pruned, unix);
    ExitCode::SUCCESS
}

/// Write the save file and the log row. Failures are reported and
/// swallowed; a finished search is worth printing even if the disk is
/// not writable.
fn export(best: &mut Reactor, unix: u64) {
    let s = best.summary();
    let name = save_file_name(s.dims, s.effective_power, unix);
    if let Err(e) = write_save(Path::new(&name), best.grid(), best.fuel()) {
        log::warn!("skipping save file {name}: {e}");
        return;
    }
    if let Err(e) = append_log(
        Path::new("log.csv"),
        &name,
        s.effective_power,
        s.total_heating,
        s.total_cooling,
    ) {
        log::warn!("could not append to log.csv: {e}");
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn ruleset_is_available_at_startup() {
        // The binary leans on the process-wide ruleset existing before
        // any search is built.
        let rs = fission_sim::Ruleset::overhaul();
        assert!(rs.neutron_reach > 0);
    }
}
