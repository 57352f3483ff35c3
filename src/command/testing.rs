//! Recording fakes for the command seams

use super::{ClickSource, VehicleLink};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use gcs_shared::{GeoPoint, GuidedTarget, ModeMapping, VehicleClass};
use std::sync::Mutex;

pub struct RecordingVehicle {
    pub mapping: Option<ModeMapping>,
    pub relative_alt_m: f32,
    pub armed: Mutex<Option<bool>>,
    pub fail_sends: bool,
    pub modes: Mutex<Vec<u32>>,
    pub targets: Mutex<Vec<GuidedTarget>>,
}

impl RecordingVehicle {
    pub fn copter() -> Self {
        Self::with_mapping(Some(ModeMapping::for_vehicle(VehicleClass::Copter)))
    }

    pub fn with_mapping(mapping: Option<ModeMapping>) -> Self {
        Self {
            mapping,
            relative_alt_m: 0.0,
            armed: Mutex::new(None),
            fail_sends: false,
            modes: Mutex::new(Vec::new()),
            targets: Mutex::new(Vec::new()),
        }
    }

    pub fn set_armed(&self, armed: bool) {
        *self.armed.lock().unwrap() = Some(armed);
    }

    pub fn sent_modes(&self) -> Vec<u32> {
        self.modes.lock().unwrap().clone()
    }

    pub fn sent_targets(&self) -> Vec<GuidedTarget> {
        self.targets.lock().unwrap().clone()
    }
}

#[async_trait]
impl VehicleLink for RecordingVehicle {
    async fn mode_mapping(&self) -> Option<ModeMapping> {
        self.mapping
    }

    async fn current_mode(&self) -> Option<String> {
        let last = *self.modes.lock().unwrap().last()?;
        self.mapping.map(|m| m.display_name(last))
    }

    async fn armed(&self) -> Option<bool> {
        *self.armed.lock().unwrap()
    }

    async fn relative_altitude_m(&self) -> f32 {
        self.relative_alt_m
    }

    async fn set_mode(&self, custom_mode: u32) -> Result<()> {
        if self.fail_sends {
            return Err(anyhow!("FC connection closed"));
        }
        self.modes.lock().unwrap().push(custom_mode);
        Ok(())
    }

    async fn send_guided_target(&self, target: &GuidedTarget) -> Result<()> {
        if self.fail_sends {
            return Err(anyhow!("FC connection closed"));
        }
        self.targets.lock().unwrap().push(*target);
        Ok(())
    }
}

pub struct FixedClick(pub Option<GeoPoint>);

#[async_trait]
impl ClickSource for FixedClick {
    async fn click_position(&self) -> Option<GeoPoint> {
        self.0
    }
}
