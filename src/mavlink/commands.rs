//! MAVLink Command Translation
//!
//! Builds the flight-mode and guided-target messages sent to the vehicle.

use anyhow::Result;
use gcs_shared::{AltitudeFrame, GuidedTarget};
use mavlink::ardupilotmega::{
    MavCmd, MavFrame, MavMessage, MavModeFlag, COMMAND_LONG_DATA, MISSION_ITEM_INT_DATA,
};

use super::connection::FlightController;

/// `current` value marking a mission item as a guided-mode target
const GUIDED_CURRENT: u8 = 2;

/// Sends commands to the vehicle via MAVLink
#[derive(Clone)]
pub struct MavCommandSender {
    fc: FlightController,
    target_system: u8,
    target_component: u8,
    frame: AltitudeFrame,
}

impl MavCommandSender {
    /// Create a new command sender
    pub fn new(
        fc: FlightController,
        target_system: u8,
        target_component: u8,
        frame: AltitudeFrame,
    ) -> Self {
        Self {
            fc,
            target_system,
            target_component,
            frame,
        }
    }

    /// Set flight mode by ArduPilot custom-mode number
    pub async fn set_mode(&self, custom_mode: u32) -> Result<()> {
        self.fc
            .send(set_mode_message(
                self.target_system,
                self.target_component,
                custom_mode,
            ))
            .await
    }

    /// Send a guided waypoint or loiter target
    pub async fn guided_target(&self, target: &GuidedTarget) -> Result<()> {
        self.fc
            .send(guided_target_message(
                self.target_system,
                self.target_component,
                self.frame,
                target,
            ))
            .await
    }
}

/// Default waypoint frame for an altitude reference
pub fn mission_frame(frame: AltitudeFrame) -> MavFrame {
    match frame {
        AltitudeFrame::Relative => MavFrame::MAV_FRAME_GLOBAL_RELATIVE_ALT_INT,
        AltitudeFrame::Terrain => MavFrame::MAV_FRAME_GLOBAL_TERRAIN_ALT_INT,
    }
}

/// `COMMAND_LONG(MAV_CMD_DO_SET_MODE)` with a custom mode
pub fn set_mode_message(target_system: u8, target_component: u8, custom_mode: u32) -> MavMessage {
    MavMessage::COMMAND_LONG(COMMAND_LONG_DATA {
        target_system,
        target_component,
        command: MavCmd::MAV_CMD_DO_SET_MODE,
        confirmation: 0,
        param1: MavModeFlag::MAV_MODE_FLAG_CUSTOM_MODE_ENABLED.bits() as f32,
        param2: custom_mode as f32,
        param3: 0.0,
        param4: 0.0,
        param5: 0.0,
        param6: 0.0,
        param7: 0.0,
    })
}

/// Guided-mode `MISSION_ITEM_INT` for a waypoint or loiter target
pub fn guided_target_message(
    target_system: u8,
    target_component: u8,
    frame: AltitudeFrame,
    target: &GuidedTarget,
) -> MavMessage {
    let (command, radius) = match target {
        GuidedTarget::Waypoint { .. } => (MavCmd::MAV_CMD_NAV_WAYPOINT, 0.0),
        GuidedTarget::Loiter { radius_m, .. } => (MavCmd::MAV_CMD_NAV_LOITER_TURNS, *radius_m),
    };
    let position = target.position();

    MavMessage::MISSION_ITEM_INT(MISSION_ITEM_INT_DATA {
        target_system,
        target_component,
        seq: 0,
        frame: mission_frame(frame),
        command,
        current: GUIDED_CURRENT,
        autocontinue: 0,
        param1: 0.0,
        param2: 0.0,
        param3: radius, // Loiter radius
        param4: 0.0,
        x: (position.latitude * 1e7).round() as i32,
        y: (position.longitude * 1e7).round() as i32,
        z: target.altitude_m(),
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gcs_shared::GeoPoint;

    #[test]
    fn test_set_mode_message() {
        match set_mode_message(1, 1, 4) {
            MavMessage::COMMAND_LONG(cmd) => {
                assert_eq!(cmd.command, MavCmd::MAV_CMD_DO_SET_MODE);
                assert_eq!(cmd.target_system, 1);
                assert_eq!(cmd.param1, 1.0);
                assert_eq!(cmd.param2, 4.0);
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn test_guided_waypoint_message() {
        let target = GuidedTarget::Waypoint {
            position: GeoPoint::new(-35.3632621, 149.1652374),
            altitude_m: 30.0,
        };

        match guided_target_message(1, 1, AltitudeFrame::Relative, &target) {
            MavMessage::MISSION_ITEM_INT(item) => {
                assert_eq!(item.command, MavCmd::MAV_CMD_NAV_WAYPOINT);
                assert_eq!(item.frame, MavFrame::MAV_FRAME_GLOBAL_RELATIVE_ALT_INT);
                assert_eq!(item.seq, 0);
                assert_eq!(item.current, 2);
                assert_eq!(item.autocontinue, 0);
                assert_eq!(item.param3, 0.0);
                assert_eq!(item.x, -353632621);
                assert_eq!(item.y, 1491652374);
                assert_eq!(item.z, 30.0);
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn test_guided_loiter_message() {
        let target = GuidedTarget::Loiter {
            position: GeoPoint::new(-35.25, 149.5),
            altitude_m: 50.0,
            radius_m: 75.0,
        };

        match guided_target_message(7, 1, AltitudeFrame::Terrain, &target) {
            MavMessage::MISSION_ITEM_INT(item) => {
                assert_eq!(item.command, MavCmd::MAV_CMD_NAV_LOITER_TURNS);
                assert_eq!(item.frame, MavFrame::MAV_FRAME_GLOBAL_TERRAIN_ALT_INT);
                assert_eq!(item.target_system, 7);
                assert_eq!(item.param1, 0.0);
                assert_eq!(item.param3, 75.0);
                assert_eq!(item.z, 50.0);
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }
}
