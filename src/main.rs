mod cli;
mod command;
mod console;
mod map;
mod mavlink;

use clap::Parser;
use cli::Cli;
use console::Console;
use map::MapClicks;
use crate::mavlink::{
    FcEvent, FcEventReceiver, FlightController, MavCommandSender, MavlinkVehicle, VehicleState,
};
use std::sync::Arc;

use tracing::{debug, error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let cli = Cli::parse();
    let fc_config = cli.fc_config();

    info!("GCS console starting");
    info!("  Vehicle link: {}", fc_config.connection);
    info!(
        "  Target: system {} component {}",
        fc_config.target_system, fc_config.target_component
    );

    let (flight_controller, fc_receiver) = FlightController::new(fc_config.clone());
    let sender = MavCommandSender::new(
        flight_controller.clone(),
        fc_config.target_system,
        fc_config.target_component,
        cli.altitude_frame(),
    );

    let state = Arc::new(VehicleState::new());
    let vehicle = Arc::new(MavlinkVehicle::new(state.clone(), sender));

    // Spawn vehicle event handler
    tokio::spawn(async move {
        handle_fc_events(fc_receiver, state).await;
    });

    let map = if cli.no_map {
        info!("  Map disabled");
        None
    } else {
        Some(Arc::new(MapClicks::new()))
    };

    let console = Console::new(vehicle, map);
    if let Err(e) = console.run().await {
        error!("Console error: {:#}", e);
    }

    info!(
        "GCS console exiting ({} was {})",
        flight_controller.config().connection,
        if flight_controller.is_connected() { "up" } else { "down" }
    );
}

/// Handle events from the vehicle link
async fn handle_fc_events(mut fc_receiver: FcEventReceiver, state: Arc<VehicleState>) {
    loop {
        match fc_receiver.recv().await {
            Some(FcEvent::Connected) => {
                info!("[FC] Link up");
            }
            Some(FcEvent::Disconnected { reason }) => {
                warn!("[FC] Disconnected: {}", reason);
            }
            Some(FcEvent::Message(msg)) => {
                if let Some(mode) = state.process_message(&msg).await {
                    info!("[FC] Mode {}", mode);
                }
            }
            None => {
                debug!("[FC] Vehicle event channel closed");
                break;
            }
        }
    }
}
