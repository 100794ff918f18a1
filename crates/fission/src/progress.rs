//! The stderr progress line.

use fission_search::StepReport;
use std::io::Write;

/// Print the carriage-return-refreshed progress line every `REFRESH`
/// steps and break it with a newline every `SCROLL` steps so piped logs
/// still scroll.
pub struct ProgressLine {
    refresh: u32,
    scroll: u32,
}

impl Default for ProgressLine {
    fn default() -> Self {
        ProgressLine {
            refresh: 50,
            scroll: 2000,
        }
    }
}

impl ProgressLine {
    /// Handle one step report.
    pub fn update(&mut self, report: &StepReport) {
        if report.step % self.refresh != 0 {
            return;
        }
        let b = &report.best;
        let mut err = std::io::stderr();
        let _ = write!(
            err,
            "\rstep {:>6}  obj {:>12.3}  cells {:>3}  power {:>10.2}  p/cell {:>8.2}  duty {:>5.3}  balance {:>9.1}  empty {:>4}    ",
            report.step,
            report.objective,
            b.total_cells,
            b.effective_power,
            b.power_per_cell(),
            b.duty_cycle,
            b.heat_balance,
            b.empty_blocks,
        );
        if report.step % self.scroll == 0 && report.step > 0 {
            let _ = writeln!(err);
        }
        let _ = err.flush();
    }

    /// Terminate the refresh line before the final report.
    pub fn finish(&mut self) {
        let _ = writeln!(std::io::stderr());
    }
}
