//! Guided target command handlers (guided, guided_loiter)

use super::HandlerContext;
use crate::command::args::parse_loiter_radius;
use crate::command::{CommandResult, GuidedArgs};
use gcs_shared::{CommandError, GuidedTarget};
use tracing::info;

/// Handle `guided ALTITUDE | LAT LON ALTITUDE | LAT LON ALTITUDE RADIUS`
pub async fn handle_guided(ctx: &HandlerContext<'_>, args: &[&str]) -> CommandResult {
    match guided_target(ctx, args).await {
        Ok(target) => send_target(ctx, target).await,
        Err(e) => e.into(),
    }
}

/// Handle `guided_loiter RADIUS`
///
/// Loiters around the last map click at the vehicle's current relative altitude.
pub async fn handle_guided_loiter(ctx: &HandlerContext<'_>, args: &[&str]) -> CommandResult {
    match loiter_target(ctx, args).await {
        Ok(target) => send_target(ctx, target).await,
        Err(e) => e.into(),
    }
}

async fn guided_target(
    ctx: &HandlerContext<'_>,
    args: &[&str],
) -> Result<GuidedTarget, CommandError> {
    let target = match GuidedArgs::parse(args)? {
        GuidedArgs::Altitude { altitude_m } => GuidedTarget::Waypoint {
            position: ctx.click_position().await?,
            altitude_m,
        },
        GuidedArgs::Position {
            position,
            altitude_m,
        } => GuidedTarget::Waypoint {
            position,
            altitude_m,
        },
        GuidedArgs::Loiter {
            position,
            altitude_m,
            radius_m,
        } => GuidedTarget::Loiter {
            position,
            altitude_m,
            radius_m,
        },
    };
    Ok(target)
}

async fn loiter_target(
    ctx: &HandlerContext<'_>,
    args: &[&str],
) -> Result<GuidedTarget, CommandError> {
    let radius_m = parse_loiter_radius(args)?;
    let position = ctx.click_position().await?;
    let altitude_m = ctx.vehicle.relative_altitude_m().await;

    Ok(GuidedTarget::Loiter {
        position,
        altitude_m,
        radius_m,
    })
}

async fn send_target(ctx: &HandlerContext<'_>, target: GuidedTarget) -> CommandResult {
    info!("[GUIDED] {}", target);

    match ctx.vehicle.send_guided_target(&target).await {
        Ok(_) => CommandResult::Completed {
            message: target.to_string(),
        },
        Err(e) => CommandResult::Failed {
            message: format!("Failed to send guided target: {}", e),
        },
    }
}
