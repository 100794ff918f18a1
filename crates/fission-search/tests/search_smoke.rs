//! Whole-driver smoke runs on small boxes.

use fission_search::{ObjectiveKind, Search, SearchConfig};
use fission_sim::{fuel_by_name, Dims};

#[test]
fn short_run_finds_some_structure() {
    // Generic fuel activates easily, so even a short exploratory run
    // should keep a grid with cells on it.
    let mut config = SearchConfig::new(Dims::new(4, 4, 4), fuel_by_name("generic").unwrap());
    config.iterations = 250;
    config.workers = Some(2);
    config.seed = 7;

    let mut search = Search::new(config).unwrap();
    let mut reports = 0;
    let mut best = search.run(|_| reports += 1);
    assert_eq!(reports, 250);

    let summary = best.summary();
    assert!(summary.total_cells > 0, "best kept no cells: {summary:?}");
}

#[test]
fn keep_flavors_all_run() {
    for objective in [
        ObjectiveKind::Output,
        ObjectiveKind::Efficiency,
        ObjectiveKind::Cells,
    ] {
        let mut config = SearchConfig::new(Dims::new(3, 3, 3), fuel_by_name("generic").unwrap());
        config.iterations = 40;
        config.workers = Some(1);
        config.objective = objective;
        let mut search = Search::new(config).unwrap();
        search.run(|_| {});
        // The empty start always scores at least the constant term.
        assert!(search.best_summary().duty_cycle >= 0.0);
    }
}
