//! Command executor - routes console command words to their handlers

use super::handlers::{self, HandlerContext};
use super::{ClickSource, VehicleLink};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Result of command execution
#[derive(Debug, Clone, PartialEq)]
pub enum CommandResult {
    /// Command validated and the request was handed to the vehicle link
    Completed { message: String },
    /// Command validated but the vehicle link refused the request
    Failed { message: String },
    /// Command rejected before anything was sent
    Rejected { message: String },
}

impl CommandResult {
    pub fn message(&self) -> &str {
        match self {
            CommandResult::Completed { message }
            | CommandResult::Failed { message }
            | CommandResult::Rejected { message } => message,
        }
    }
}

/// A console command registered by this module
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    pub name: &'static str,
    pub help: &'static str,
}

const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "mode",
        help: "mode change",
    },
    CommandSpec {
        name: "guided",
        help: "fly to a clicked location on map",
    },
    CommandSpec {
        name: "guided_loiter",
        help: "fly to a clicked location and loiter",
    },
];

/// Executes the flight-mode and guided-target console commands
pub struct ModeCommands {
    vehicle: Arc<dyn VehicleLink>,
    map: Option<Arc<dyn ClickSource>>,
}

impl ModeCommands {
    /// Create a new executor; pass `None` for `map` when no map is running
    pub fn new(vehicle: Arc<dyn VehicleLink>, map: Option<Arc<dyn ClickSource>>) -> Self {
        Self { vehicle, map }
    }

    /// Commands handled by [`ModeCommands::execute`]
    pub fn commands(&self) -> &'static [CommandSpec] {
        COMMANDS
    }

    fn context(&self) -> HandlerContext<'_> {
        HandlerContext {
            vehicle: self.vehicle.as_ref(),
            map: self.map.as_deref(),
        }
    }

    /// Mode names offered as completions for `mode`
    pub async fn available_modes(&self) -> Vec<String> {
        handlers::available_modes(&self.context()).await
    }

    /// Execute a registered command
    ///
    /// Returns `None` when `name` is not one of [`ModeCommands::commands`].
    pub async fn execute(&self, name: &str, args: &[&str]) -> Option<CommandResult> {
        let ctx = self.context();

        debug!("Executing command: {} {:?}", name, args);

        let result = match name {
            "mode" => handlers::handle_mode(&ctx, args).await,
            "guided" => handlers::handle_guided(&ctx, args).await,
            "guided_loiter" => handlers::handle_guided_loiter(&ctx, args).await,
            _ => return None,
        };

        log_result(name, &result);
        Some(result)
    }

    /// Treat an unrecognised command word as a mode name
    ///
    /// Returns `None` when the word is not a mode of the connected vehicle.
    pub async fn unknown_command(&self, word: &str) -> Option<CommandResult> {
        let result = handlers::handle_mode_name(&self.context(), word).await?;
        log_result(word, &result);
        Some(result)
    }
}

fn log_result(name: &str, result: &CommandResult) {
    match result {
        CommandResult::Completed { message } => info!("  {} completed: {}", name, message),
        CommandResult::Failed { message } => warn!("  {} failed: {}", name, message),
        CommandResult::Rejected { message } => debug!("  {} rejected: {}", name, message),
    }
}
