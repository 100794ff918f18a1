//! The append-only run log.

use crate::error::SaveError;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Append one CSV row to the run log:
/// `"<outfile>",<effectivePower>,<totalHeating>,<totalCooling>`.
pub fn append_log(
    path: &Path,
    outfile: &str,
    effective_power: f64,
    total_heating: f64,
    total_cooling: f64,
) -> Result<(), SaveError> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(
        file,
        "\"{outfile}\",{effective_power},{total_heating},{total_cooling}"
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_accumulate() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.csv");
        append_log(&path, "out_1_5_5_5_10.json", 10.0, 3.0, 55.0).unwrap();
        append_log(&path, "out_2_5_5_5_20.json", 20.5, 4.0, 110.0).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "\"out_1_5_5_5_10.json\",10,3,55");
        assert_eq!(lines[1], "\"out_2_5_5_5_20.json\",20.5,4,110");
    }
}
