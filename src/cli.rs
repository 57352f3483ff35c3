use crate::mavlink::{FcConfig, FcConnectionType};
use clap::Parser;
use gcs_shared::AltitudeFrame;

#[derive(Parser, Debug)]
#[command(name = "gcs-console")]
#[command(about = "Ground station console for flight-mode and guided-target commands", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Vehicle connection (udpin:ADDR, tcpout:ADDR or serial:PORT:BAUD)
    #[arg(long, env = "GCS_MASTER", default_value = "udpin:0.0.0.0:14550")]
    pub master: FcConnectionType,

    /// MAVLink system ID of this ground station
    #[arg(long, default_value_t = 255)]
    pub source_system: u8,

    /// MAVLink component ID of this ground station
    #[arg(long, default_value_t = 190)]
    pub source_component: u8,

    /// System ID of the vehicle to command
    #[arg(long, default_value_t = 1)]
    pub target_system: u8,

    /// Component ID of the autopilot to command
    #[arg(long, default_value_t = 1)]
    pub target_component: u8,

    /// Send guided altitudes relative to terrain instead of home
    #[arg(long = "terrain-alt")]
    pub terrain_alt: bool,

    /// Run without a map; guided commands then need an explicit position
    #[arg(long = "no-map")]
    pub no_map: bool,
}

impl Cli {
    pub fn fc_config(&self) -> FcConfig {
        FcConfig {
            connection: self.master.clone(),
            system_id: self.source_system,
            component_id: self.source_component,
            target_system: self.target_system,
            target_component: self.target_component,
        }
    }

    pub fn altitude_frame(&self) -> AltitudeFrame {
        if self.terrain_alt {
            AltitudeFrame::Terrain
        } else {
            AltitudeFrame::Relative
        }
    }
}
