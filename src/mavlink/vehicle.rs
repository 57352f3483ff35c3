//! MAVLink-backed implementation of the console's vehicle seam

use super::{MavCommandSender, VehicleState};
use crate::command::VehicleLink;
use anyhow::Result;
use async_trait::async_trait;
use gcs_shared::{GuidedTarget, ModeMapping};
use std::sync::Arc;

/// Telemetry store plus command sender for one vehicle
pub struct MavlinkVehicle {
    state: Arc<VehicleState>,
    sender: MavCommandSender,
}

impl MavlinkVehicle {
    pub fn new(state: Arc<VehicleState>, sender: MavCommandSender) -> Self {
        Self { state, sender }
    }
}

#[async_trait]
impl VehicleLink for MavlinkVehicle {
    async fn mode_mapping(&self) -> Option<ModeMapping> {
        self.state.mode_mapping().await
    }

    async fn current_mode(&self) -> Option<String> {
        self.state.current_mode().await
    }

    async fn armed(&self) -> Option<bool> {
        self.state.heartbeat().await.map(|hb| hb.armed)
    }

    async fn relative_altitude_m(&self) -> f32 {
        self.state.relative_altitude_m().await
    }

    async fn set_mode(&self, custom_mode: u32) -> Result<()> {
        self.sender.set_mode(custom_mode).await
    }

    async fn send_guided_target(&self, target: &GuidedTarget) -> Result<()> {
        self.sender.guided_target(target).await
    }
}
