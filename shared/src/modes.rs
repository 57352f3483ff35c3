//! ArduPilot flight-mode tables
//!
//! Maps human-readable mode names onto the `custom_mode` numbers each
//! ArduPilot vehicle firmware reports in its HEARTBEAT.

/// ArduPilot firmware family, selected from the HEARTBEAT `MAV_TYPE`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleClass {
    Copter,
    Plane,
    Rover,
    Sub,
    Tracker,
}

impl VehicleClass {
    /// Classify a raw `MAV_TYPE` value
    pub fn from_mav_type(mav_type: u8) -> Option<Self> {
        match mav_type {
            1 | 19..=25 => Some(Self::Plane),
            2 | 3 | 4 | 13 | 14 | 15 | 29 | 35 => Some(Self::Copter),
            5 => Some(Self::Tracker),
            10 | 11 => Some(Self::Rover),
            12 => Some(Self::Sub),
            _ => None,
        }
    }
}

const COPTER_MODES: &[(&str, u32)] = &[
    ("STABILIZE", 0),
    ("ACRO", 1),
    ("ALT_HOLD", 2),
    ("AUTO", 3),
    ("GUIDED", 4),
    ("LOITER", 5),
    ("RTL", 6),
    ("CIRCLE", 7),
    ("POSITION", 8),
    ("LAND", 9),
    ("OF_LOITER", 10),
    ("DRIFT", 11),
    ("SPORT", 13),
    ("FLIP", 14),
    ("AUTOTUNE", 15),
    ("POSHOLD", 16),
    ("BRAKE", 17),
    ("THROW", 18),
    ("AVOID_ADSB", 19),
    ("GUIDED_NOGPS", 20),
    ("SMART_RTL", 21),
    ("FLOWHOLD", 22),
    ("FOLLOW", 23),
    ("ZIGZAG", 24),
    ("SYSTEMID", 25),
    ("AUTOROTATE", 26),
    ("AUTO_RTL", 27),
];

const PLANE_MODES: &[(&str, u32)] = &[
    ("MANUAL", 0),
    ("CIRCLE", 1),
    ("STABILIZE", 2),
    ("TRAINING", 3),
    ("ACRO", 4),
    ("FBWA", 5),
    ("FBWB", 6),
    ("CRUISE", 7),
    ("AUTOTUNE", 8),
    ("AUTO", 10),
    ("RTL", 11),
    ("LOITER", 12),
    ("TAKEOFF", 13),
    ("AVOID_ADSB", 14),
    ("GUIDED", 15),
    ("INITIALISING", 16),
    ("QSTABILIZE", 17),
    ("QHOVER", 18),
    ("QLOITER", 19),
    ("QLAND", 20),
    ("QRTL", 21),
    ("QAUTOTUNE", 22),
    ("QACRO", 23),
    ("THERMAL", 24),
];

const ROVER_MODES: &[(&str, u32)] = &[
    ("MANUAL", 0),
    ("ACRO", 1),
    ("LEARNING", 2),
    ("STEERING", 3),
    ("HOLD", 4),
    ("LOITER", 5),
    ("FOLLOW", 6),
    ("SIMPLE", 7),
    ("AUTO", 10),
    ("RTL", 11),
    ("SMART_RTL", 12),
    ("GUIDED", 15),
    ("INITIALISING", 16),
];

const SUB_MODES: &[(&str, u32)] = &[
    ("STABILIZE", 0),
    ("ACRO", 1),
    ("ALT_HOLD", 2),
    ("AUTO", 3),
    ("GUIDED", 4),
    ("CIRCLE", 7),
    ("SURFACE", 9),
    ("POSHOLD", 16),
    ("MANUAL", 19),
];

const TRACKER_MODES: &[(&str, u32)] = &[
    ("MANUAL", 0),
    ("STOP", 1),
    ("SCAN", 2),
    ("SERVO_TEST", 3),
    ("AUTO", 10),
    ("INITIALISING", 16),
];

/// Name-to-number table for one vehicle class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeMapping {
    class: VehicleClass,
    table: &'static [(&'static str, u32)],
}

impl ModeMapping {
    /// Get the mode table for a vehicle class
    pub fn for_vehicle(class: VehicleClass) -> Self {
        let table = match class {
            VehicleClass::Copter => COPTER_MODES,
            VehicleClass::Plane => PLANE_MODES,
            VehicleClass::Rover => ROVER_MODES,
            VehicleClass::Sub => SUB_MODES,
            VehicleClass::Tracker => TRACKER_MODES,
        };
        Self { class, table }
    }

    pub fn class(&self) -> VehicleClass {
        self.class
    }

    /// Look up a mode number by its upper-case name
    pub fn lookup(&self, name: &str) -> Option<u32> {
        self.table
            .iter()
            .find(|(mode, _)| *mode == name)
            .map(|(_, number)| *number)
    }

    /// Reverse lookup of a mode number
    pub fn name_of(&self, number: u32) -> Option<&'static str> {
        self.table
            .iter()
            .find(|(_, n)| *n == number)
            .map(|(mode, _)| *mode)
    }

    /// Display name for a mode number, including unknown ones
    pub fn display_name(&self, number: u32) -> String {
        match self.name_of(number) {
            Some(name) => name.to_string(),
            None => format!("Mode({})", number),
        }
    }

    /// Mode names in firmware order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.table.iter().map(|(mode, _)| *mode)
    }
}
