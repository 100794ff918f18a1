//! Positional argument parsing: `fission [X Y Z [fuelIndex [objective [save]]]]`.
//!
//! Dimensions and the fuel index are validated strictly; the trailing
//! objective selector and seed save path are permissive and fall back to
//! defaults when absent or unparsable.

use fission_core::{default_fuel, fuel, FuelId};
use fission_grid::Dims;
use fission_search::ObjectiveKind;
use std::error::Error;
use std::fmt;
use std::path::PathBuf;

/// Parsed command line.
#[derive(Clone, Debug)]
pub struct CliArgs {
    /// Interior dimensions (default 5×5×5).
    pub dims: Dims,
    /// Fuel to optimize (default LEU-235 Oxide).
    pub fuel: FuelId,
    /// Keep-metric flavor (default output).
    pub objective: ObjectiveKind,
    /// Optional save file to seed the search from.
    pub seed_save: Option<PathBuf>,
}

/// Rejected command lines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArgsError {
    /// A dimension was not an integer.
    BadDimension {
        /// The offending argument text.
        value: String,
    },
    /// A dimension was zero or negative.
    NonPositiveDimension {
        /// The parsed value.
        value: i32,
    },
    /// The fuel index was not an integer or not in the table.
    FuelOutOfRange {
        /// The offending argument text.
        value: String,
    },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadDimension { value } => write!(f, "dimension '{value}' is not an integer"),
            Self::NonPositiveDimension { value } => {
                write!(f, "dimension {value} must be positive")
            }
            Self::FuelOutOfRange { value } => write!(f, "fuel index '{value}' is out of range"),
        }
    }
}

impl Error for ArgsError {}

fn parse_dim(text: &str) -> Result<i32, ArgsError> {
    let value: i32 = text.parse().map_err(|_| ArgsError::BadDimension {
        value: text.to_string(),
    })?;
    if value <= 0 {
        return Err(ArgsError::NonPositiveDimension { value });
    }
    Ok(value)
}

/// Parse the positional arguments (program name already stripped).
pub fn parse(args: &[String]) -> Result<CliArgs, ArgsError> {
    let mut out = CliArgs {
        dims: Dims::new(5, 5, 5),
        fuel: default_fuel(),
        objective: ObjectiveKind::Output,
        seed_save: None,
    };

    if args.len() >= 3 {
        out.dims = Dims::new(
            parse_dim(&args[0])?,
            parse_dim(&args[1])?,
            parse_dim(&args[2])?,
        );
    }

    if let Some(text) = args.get(3) {
        let index: u32 = text.parse().map_err(|_| ArgsError::FuelOutOfRange {
            value: text.clone(),
        })?;
        if fuel(FuelId(index)).is_none() {
            return Err(ArgsError::FuelOutOfRange {
                value: text.clone(),
            });
        }
        out.fuel = FuelId(index);
    }

    // Trailing arguments are permissive: unknown selectors keep defaults.
    if let Some(selector) = args.get(4).and_then(|t| t.parse::<u32>().ok()) {
        if let Some(kind) = ObjectiveKind::from_selector(selector) {
            out.objective = kind;
        }
    }
    if let Some(path) = args.get(5) {
        out.seed_save = Some(PathBuf::from(path));
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strs(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_command_line_uses_defaults() {
        let args = parse(&[]).unwrap();
        assert_eq!(args.dims, Dims::new(5, 5, 5));
        assert_eq!(args.fuel, default_fuel());
        assert_eq!(args.objective, ObjectiveKind::Output);
        assert!(args.seed_save.is_none());
    }

    #[test]
    fn fewer_than_three_dimensions_keeps_defaults() {
        let args = parse(&strs(&["7", "7"])).unwrap();
        assert_eq!(args.dims, Dims::new(5, 5, 5));
    }

    #[test]
    fn dimensions_parse_and_validate() {
        let args = parse(&strs(&["7", "3", "9"])).unwrap();
        assert_eq!(args.dims, Dims::new(7, 3, 9));
        assert!(matches!(
            parse(&strs(&["7", "x", "9"])),
            Err(ArgsError::BadDimension { .. })
        ));
        assert!(matches!(
            parse(&strs(&["7", "0", "9"])),
            Err(ArgsError::NonPositiveDimension { value: 0 })
        ));
    }

    #[test]
    fn fuel_index_is_range_checked() {
        let ok = parse(&strs(&["5", "5", "5", "1"])).unwrap();
        assert_eq!(ok.fuel, FuelId(1));
        assert!(matches!(
            parse(&strs(&["5", "5", "5", "100000"])),
            Err(ArgsError::FuelOutOfRange { .. })
        ));
        assert!(matches!(
            parse(&strs(&["5", "5", "5", "soup"])),
            Err(ArgsError::FuelOutOfRange { .. })
        ));
    }

    #[test]
    fn trailing_selectors_are_permissive() {
        let args = parse(&strs(&["5", "5", "5", "1", "2", "seed.json"])).unwrap();
        assert_eq!(args.objective, ObjectiveKind::Cells);
        assert_eq!(args.seed_save, Some(PathBuf::from("seed.json")));
        // Unknown selector: default objective, no error.
        let fallback = parse(&strs(&["5", "5", "5", "1", "99"])).unwrap();
        assert_eq!(fallback.objective, ObjectiveKind::Output);
    }
}
