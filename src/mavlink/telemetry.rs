//! Vehicle telemetry store
//!
//! Tracks the HEARTBEAT and GLOBAL_POSITION_INT fields the console commands
//! consult: vehicle type (for the mode table), current mode, armed flag and
//! altitude.

use gcs_shared::{ModeMapping, VehicleClass};
use mavlink::ardupilotmega::{MavAutopilot, MavMessage, MavModeFlag, MavType};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Fields from the vehicle's last HEARTBEAT
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeartbeatInfo {
    pub mav_type: u8,
    pub ardupilot: bool,
    pub custom_mode: u32,
    pub armed: bool,
}

/// Latest vehicle telemetry needed by the console
pub struct VehicleState {
    heartbeat: Arc<RwLock<Option<HeartbeatInfo>>>,
    /// Altitude above home in millimetres
    relative_alt_mm: Arc<RwLock<Option<i32>>>,
}

impl VehicleState {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            heartbeat: Arc::new(RwLock::new(None)),
            relative_alt_mm: Arc::new(RwLock::new(None)),
        }
    }

    /// Process a MAVLink message
    ///
    /// Returns the new mode name when the vehicle reports a mode change.
    pub async fn process_message(&self, msg: &MavMessage) -> Option<String> {
        match msg {
            MavMessage::HEARTBEAT(hb) => {
                // Other ground stations on the link also send heartbeats
                if hb.mavtype == MavType::MAV_TYPE_GCS
                    || hb.autopilot == MavAutopilot::MAV_AUTOPILOT_INVALID
                {
                    return None;
                }

                let info = HeartbeatInfo {
                    mav_type: hb.mavtype as u8,
                    ardupilot: hb.autopilot == MavAutopilot::MAV_AUTOPILOT_ARDUPILOTMEGA,
                    custom_mode: hb.custom_mode,
                    armed: hb.base_mode.contains(MavModeFlag::MAV_MODE_FLAG_SAFETY_ARMED),
                };

                let previous = self.heartbeat.write().await.replace(info);
                let mode_changed = previous.map_or(true, |p| {
                    p.custom_mode != info.custom_mode || p.mav_type != info.mav_type
                });

                if mode_changed {
                    self.current_mode().await
                } else {
                    None
                }
            }

            MavMessage::GLOBAL_POSITION_INT(pos) => {
                *self.relative_alt_mm.write().await = Some(pos.relative_alt);
                None
            }

            _ => None,
        }
    }

    /// Last heartbeat, if any
    pub async fn heartbeat(&self) -> Option<HeartbeatInfo> {
        *self.heartbeat.read().await
    }

    /// Mode table for the vehicle type in the last heartbeat
    pub async fn mode_mapping(&self) -> Option<ModeMapping> {
        let hb = self.heartbeat().await?;
        if !hb.ardupilot {
            return None;
        }
        VehicleClass::from_mav_type(hb.mav_type).map(ModeMapping::for_vehicle)
    }

    /// Display name of the current mode
    pub async fn current_mode(&self) -> Option<String> {
        let hb = self.heartbeat().await?;
        Some(match self.mode_mapping().await {
            Some(mapping) => mapping.display_name(hb.custom_mode),
            None => format!("Mode({})", hb.custom_mode),
        })
    }

    /// Altitude above home in metres, 0 until the first GLOBAL_POSITION_INT
    pub async fn relative_altitude_m(&self) -> f32 {
        self.relative_alt_mm.read().await.unwrap_or(0) as f32 / 1000.0
    }
}

impl Default for VehicleState {
    fn default() -> Self {
        Self::new()
    }
}
