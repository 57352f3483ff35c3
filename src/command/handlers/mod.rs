//! Command handlers for the mode and guided commands

mod guided;
mod mode;

pub use guided::{handle_guided, handle_guided_loiter};
pub use mode::{available_modes, handle_mode, handle_mode_name};

use super::{ClickSource, CommandResult, VehicleLink};
use gcs_shared::{CommandError, GeoPoint};

/// Context passed to command handlers
#[derive(Clone, Copy)]
pub struct HandlerContext<'a> {
    pub vehicle: &'a dyn VehicleLink,
    /// `None` when the console runs without a map
    pub map: Option<&'a dyn ClickSource>,
}

impl HandlerContext<'_> {
    /// Last clicked map position
    pub async fn click_position(&self) -> Result<GeoPoint, CommandError> {
        let map = self.map.ok_or(CommandError::NoMap)?;
        map.click_position()
            .await
            .ok_or(CommandError::NoClickPosition)
    }
}

impl From<CommandError> for CommandResult {
    fn from(err: CommandError) -> Self {
        CommandResult::Rejected {
            message: err.to_string(),
        }
    }
}
