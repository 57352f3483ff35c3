//! Seams to the collaborators the console commands drive

use anyhow::Result;
use async_trait::async_trait;
use gcs_shared::{GeoPoint, GuidedTarget, ModeMapping};

/// The vehicle side: mode table, telemetry fields and outgoing commands
#[async_trait]
pub trait VehicleLink: Send + Sync {
    /// Mode table for the connected vehicle, if its type is known yet
    async fn mode_mapping(&self) -> Option<ModeMapping>;

    /// Name of the mode last reported by the vehicle
    async fn current_mode(&self) -> Option<String>;

    /// Armed flag from the last HEARTBEAT, `None` before the first one
    async fn armed(&self) -> Option<bool>;

    /// Altitude above home from GLOBAL_POSITION_INT, 0 before the first report
    async fn relative_altitude_m(&self) -> f32;

    /// Request a custom flight mode
    async fn set_mode(&self, custom_mode: u32) -> Result<()>;

    /// Send a single guided waypoint or loiter target
    async fn send_guided_target(&self, target: &GuidedTarget) -> Result<()>;
}

/// The map side: last coordinate the operator clicked
#[async_trait]
pub trait ClickSource: Send + Sync {
    async fn click_position(&self) -> Option<GeoPoint>;
}
