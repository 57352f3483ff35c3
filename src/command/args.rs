//! Argument parsing for the mode and guided commands

use gcs_shared::{CommandError, GeoPoint, ModeMapping, GUIDED_LOITER_USAGE, GUIDED_USAGE};
use std::str::FromStr;

/// Parsed argument of the `mode` command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModeArg {
    /// Raw custom-mode number, sent without consulting the table
    Number(u32),
    /// Upper-cased mode name
    Name(String),
}

impl ModeArg {
    pub fn parse(token: &str) -> Self {
        if !token.is_empty() && token.chars().all(|c| c.is_ascii_digit()) {
            if let Ok(number) = token.parse() {
                return ModeArg::Number(number);
            }
        }
        ModeArg::Name(token.to_uppercase())
    }

    /// Resolve to a custom-mode number
    pub fn resolve(&self, mapping: &ModeMapping) -> Result<u32, CommandError> {
        match self {
            ModeArg::Number(number) => Ok(*number),
            ModeArg::Name(name) => mapping
                .lookup(name)
                .ok_or_else(|| CommandError::UnknownMode(name.clone())),
        }
    }
}

/// Parsed arguments of the `guided` command
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GuidedArgs {
    /// `guided ALTITUDE`, position taken from the map click
    Altitude { altitude_m: f32 },
    /// `guided LAT LON ALTITUDE`
    Position { position: GeoPoint, altitude_m: f32 },
    /// `guided LAT LON ALTITUDE RADIUS`
    Loiter {
        position: GeoPoint,
        altitude_m: f32,
        radius_m: f32,
    },
}

impl GuidedArgs {
    pub fn parse(args: &[&str]) -> Result<Self, CommandError> {
        match args {
            [alt] => Ok(GuidedArgs::Altitude {
                altitude_m: finite(alt, GUIDED_USAGE)?,
            }),
            [lat, lon, alt] => Ok(GuidedArgs::Position {
                position: position(lat, lon, GUIDED_USAGE)?,
                altitude_m: finite(alt, GUIDED_USAGE)?,
            }),
            [lat, lon, alt, radius] => Ok(GuidedArgs::Loiter {
                position: position(lat, lon, GUIDED_USAGE)?,
                altitude_m: finite(alt, GUIDED_USAGE)?,
                radius_m: finite(radius, GUIDED_USAGE)?,
            }),
            _ => Err(CommandError::Usage(GUIDED_USAGE)),
        }
    }
}

/// Parse the single RADIUS argument of `guided_loiter`
pub fn parse_loiter_radius(args: &[&str]) -> Result<f32, CommandError> {
    match args {
        [radius] => finite(radius, GUIDED_LOITER_USAGE),
        _ => Err(CommandError::Usage(GUIDED_LOITER_USAGE)),
    }
}

/// Parse a number, refusing `nan` and `inf` which `str::parse` accepts
fn finite<T>(token: &str, usage: &'static str) -> Result<T, CommandError>
where
    T: FromStr + Into<f64> + Copy,
{
    let value: T = token.parse().map_err(|_| CommandError::Usage(usage))?;
    if value.into().is_finite() {
        Ok(value)
    } else {
        Err(CommandError::Usage(usage))
    }
}

fn position(lat: &str, lon: &str, usage: &'static str) -> Result<GeoPoint, CommandError> {
    let point = GeoPoint::new(finite(lat, usage)?, finite(lon, usage)?);
    if point.is_valid() {
        Ok(point)
    } else {
        Err(CommandError::Usage(usage))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gcs_shared::VehicleClass;

    #[test]
    fn test_mode_arg_digits_are_numbers() {
        assert_eq!(ModeArg::parse("4"), ModeArg::Number(4));
        assert_eq!(ModeArg::parse("guided"), ModeArg::Name("GUIDED".into()));
        assert_eq!(ModeArg::parse("-1"), ModeArg::Name("-1".into()));
        assert_eq!(ModeArg::parse("4.0"), ModeArg::Name("4.0".into()));
    }

    #[test]
    fn test_mode_arg_overflowing_digits_are_unknown() {
        let copter = ModeMapping::for_vehicle(VehicleClass::Copter);
        let arg = ModeArg::parse("99999999999");
        assert_eq!(arg, ModeArg::Name("99999999999".into()));
        assert_eq!(
            arg.resolve(&copter),
            Err(CommandError::UnknownMode("99999999999".into()))
        );
    }

    #[test]
    fn test_mode_arg_resolve() {
        let copter = ModeMapping::for_vehicle(VehicleClass::Copter);
        assert_eq!(ModeArg::parse("loiter").resolve(&copter), Ok(5));
        // numbers bypass the table
        assert_eq!(ModeArg::parse("99").resolve(&copter), Ok(99));
        assert_eq!(
            ModeArg::parse("fbwa").resolve(&copter),
            Err(CommandError::UnknownMode("FBWA".into()))
        );
    }

    #[test]
    fn test_guided_args_by_count() {
        assert_eq!(
            GuidedArgs::parse(&["30"]),
            Ok(GuidedArgs::Altitude { altitude_m: 30.0 })
        );
        assert_eq!(
            GuidedArgs::parse(&["-35.36", "149.16", "30"]),
            Ok(GuidedArgs::Position {
                position: GeoPoint::new(-35.36, 149.16),
                altitude_m: 30.0
            })
        );
        assert_eq!(
            GuidedArgs::parse(&["-35.36", "149.16", "30", "50"]),
            Ok(GuidedArgs::Loiter {
                position: GeoPoint::new(-35.36, 149.16),
                altitude_m: 30.0,
                radius_m: 50.0
            })
        );
    }

    #[test]
    fn test_guided_args_rejects_bad_counts_and_numbers() {
        let usage = Err(CommandError::Usage(GUIDED_USAGE));
        assert_eq!(GuidedArgs::parse(&[]), usage);
        assert_eq!(GuidedArgs::parse(&["1", "2"]), usage);
        assert_eq!(GuidedArgs::parse(&["1", "2", "3", "4", "5"]), usage);
        assert_eq!(GuidedArgs::parse(&["high"]), usage);
        assert_eq!(GuidedArgs::parse(&["-35.36", "east", "30"]), usage);
    }

    #[test]
    fn test_guided_args_rejects_non_finite_and_out_of_range() {
        let usage = Err(CommandError::Usage(GUIDED_USAGE));
        assert_eq!(GuidedArgs::parse(&["nan"]), usage);
        assert_eq!(GuidedArgs::parse(&["nan", "nan", "30"]), usage);
        assert_eq!(GuidedArgs::parse(&["inf", "0", "10"]), usage);
        assert_eq!(GuidedArgs::parse(&["1", "2", "-inf"]), usage);
        assert_eq!(GuidedArgs::parse(&["1", "2", "30", "NaN"]), usage);
        assert_eq!(GuidedArgs::parse(&["1e12", "0", "10"]), usage);
        assert_eq!(GuidedArgs::parse(&["91", "0", "10"]), usage);
        assert_eq!(GuidedArgs::parse(&["0", "-181", "10"]), usage);
        assert!(GuidedArgs::parse(&["-90", "180", "10"]).is_ok());
    }

    #[test]
    fn test_loiter_radius() {
        assert_eq!(parse_loiter_radius(&["80"]), Ok(80.0));
        let usage = Err(CommandError::Usage(GUIDED_LOITER_USAGE));
        assert_eq!(parse_loiter_radius(&[]), usage);
        assert_eq!(parse_loiter_radius(&["80", "10"]), usage);
        assert_eq!(parse_loiter_radius(&["wide"]), usage);
        assert_eq!(parse_loiter_radius(&["nan"]), usage);
        assert_eq!(parse_loiter_radius(&["inf"]), usage);
    }
}
