//! Flight-mode command handlers

use super::HandlerContext;
use crate::command::{CommandResult, ModeArg};
use gcs_shared::{CommandError, ModeMapping};
use tracing::{debug, info};

/// Handle `mode NAME|NUMBER`
pub async fn handle_mode(ctx: &HandlerContext<'_>, args: &[&str]) -> CommandResult {
    let mapping = match ctx.vehicle.mode_mapping().await {
        Some(m) => m,
        None => return CommandError::NoModeMapping.into(),
    };

    let token = match args {
        [token] => *token,
        _ => return CommandError::mode_usage(&mapping).into(),
    };

    let custom_mode = match ModeArg::parse(token).resolve(&mapping) {
        Ok(n) => n,
        Err(e) => return e.into(),
    };

    switch_mode(ctx, &mapping, custom_mode).await
}

/// Handle a bare mode name typed as a command, e.g. `loiter`
///
/// Returns `None` when the word is not a mode of the connected vehicle.
pub async fn handle_mode_name(ctx: &HandlerContext<'_>, word: &str) -> Option<CommandResult> {
    let mapping = ctx.vehicle.mode_mapping().await?;
    let custom_mode = mapping.lookup(&word.to_uppercase())?;
    debug!("[MODE] '{}' matched mode {}", word, custom_mode);
    Some(switch_mode(ctx, &mapping, custom_mode).await)
}

/// Mode names accepted by the `mode` command
pub async fn available_modes(ctx: &HandlerContext<'_>) -> Vec<String> {
    match ctx.vehicle.mode_mapping().await {
        Some(mapping) => mapping.names().map(str::to_string).collect(),
        None => Vec::new(),
    }
}

async fn switch_mode(
    ctx: &HandlerContext<'_>,
    mapping: &ModeMapping,
    custom_mode: u32,
) -> CommandResult {
    let name = mapping.display_name(custom_mode);
    info!("[MODE] Requesting {} ({})", name, custom_mode);

    match ctx.vehicle.set_mode(custom_mode).await {
        Ok(_) => CommandResult::Completed {
            message: format!("Mode change to {} requested", name),
        },
        Err(e) => CommandResult::Failed {
            message: format!("Failed to set mode: {}", e),
        },
    }
}
