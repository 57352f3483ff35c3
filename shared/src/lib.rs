//! GCS Shared Command Types
//!
//! This crate provides the types shared between the console front-end and the
//! vehicle link: guided targets, altitude frames, validation errors and the
//! ArduPilot flight-mode tables.

pub mod modes;

use std::fmt;
use thiserror::Error;

pub use modes::{ModeMapping, VehicleClass};

/// Usage text for the `guided` command
pub const GUIDED_USAGE: &str =
    "Usage: guided ALTITUDE | guided LAT LON ALTITUDE | guided LAT LON ALTITUDE RADIUS";

/// Usage text for the `guided_loiter` command
pub const GUIDED_LOITER_USAGE: &str = "Usage: guided_loiter RADIUS";

/// A geographic coordinate in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// True when both coordinates are finite and inside the WGS84 ranges
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude.abs() <= 90.0
            && self.longitude.abs() <= 180.0
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?}, {:?})", self.latitude, self.longitude)
    }
}

/// A single real-time redirect sent to a vehicle in GUIDED mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GuidedTarget {
    /// Fly to a point and hold there
    Waypoint { position: GeoPoint, altitude_m: f32 },
    /// Fly to a point and circle it at the given radius
    Loiter {
        position: GeoPoint,
        altitude_m: f32,
        radius_m: f32,
    },
}

impl GuidedTarget {
    pub fn position(&self) -> GeoPoint {
        match self {
            GuidedTarget::Waypoint { position, .. } | GuidedTarget::Loiter { position, .. } => {
                *position
            }
        }
    }

    pub fn altitude_m(&self) -> f32 {
        match self {
            GuidedTarget::Waypoint { altitude_m, .. } | GuidedTarget::Loiter { altitude_m, .. } => {
                *altitude_m
            }
        }
    }
}

impl fmt::Display for GuidedTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuidedTarget::Waypoint {
                position,
                altitude_m,
            } => write!(f, "Guided {} {:?}", position, altitude_m),
            GuidedTarget::Loiter {
                position,
                altitude_m,
                radius_m,
            } => write!(
                f,
                "Guided loitering {} {:?} radius {:?}",
                position, altitude_m, radius_m
            ),
        }
    }
}

/// Altitude reference used for guided targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AltitudeFrame {
    /// Altitude above the home position
    #[default]
    Relative,
    /// Altitude above terrain
    Terrain,
}

/// Errors raised while validating a console command
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    #[error("No mode mapping available")]
    NoModeMapping,

    #[error("Available modes: [{0}]")]
    ModeUsage(String),

    #[error("Unknown mode {0}")]
    UnknownMode(String),

    #[error("{0}")]
    Usage(&'static str),

    #[error("No map available")]
    NoMap,

    #[error("No map click position available")]
    NoClickPosition,
}

impl CommandError {
    /// Build the "available modes" rejection from a mapping
    pub fn mode_usage(mapping: &ModeMapping) -> Self {
        CommandError::ModeUsage(mapping.names().collect::<Vec<_>>().join(", "))
    }
}
