//! MAVLink Bridge Module
//!
//! Vehicle-side collaborators of the console: the link to the autopilot, the
//! telemetry store that supplies the mode table, and the message builders.
//! Supports serial, UDP and TCP connections.

mod commands;
mod connection;
mod telemetry;
mod vehicle;

pub use commands::MavCommandSender;
pub use connection::{FcConfig, FcConnectionType, FcEvent, FcEventReceiver, FlightController};
pub use telemetry::VehicleState;
pub use vehicle::MavlinkVehicle;
