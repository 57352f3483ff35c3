//! Console command dispatch for flight modes and guided targets
//!
//! This module handles:
//! - Parsing and validating the `mode`, `guided` and `guided_loiter` arguments
//! - Resolving mode names against the vehicle's mode table
//! - Dispatching the resulting MAVLink request through the vehicle link

mod args;
mod executor;
pub mod handlers;
mod traits;

pub use args::{GuidedArgs, ModeArg};
pub use executor::{CommandResult, CommandSpec, ModeCommands};
pub use traits::{ClickSource, VehicleLink};

#[cfg(test)]
pub(crate) mod testing;
