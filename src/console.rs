//! Interactive console
//!
//! Reads operator commands from stdin, runs the console builtins itself and
//! hands everything else to the mode commands.

use crate::command::{ClickSource, CommandResult, ModeCommands, VehicleLink};
use crate::map::MapClicks;
use anyhow::Result;
use gcs_shared::GeoPoint;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::debug;

const PROMPT: &str = "GCS> ";

/// What the console should do after a line
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Print this text
    Output(String),
    /// Nothing to print
    Silent,
    /// Leave the console
    Quit,
}

pub struct Console {
    commands: ModeCommands,
    vehicle: Arc<dyn VehicleLink>,
    map: Option<Arc<MapClicks>>,
}

impl Console {
    pub fn new(vehicle: Arc<dyn VehicleLink>, map: Option<Arc<MapClicks>>) -> Self {
        let clicks = map.clone().map(|m| m as Arc<dyn ClickSource>);
        Self {
            commands: ModeCommands::new(vehicle.clone(), clicks),
            vehicle,
            map,
        }
    }

    /// Run until stdin closes or the operator quits
    pub async fn run(&self) -> Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdout = tokio::io::stdout();

        loop {
            stdout.write_all(PROMPT.as_bytes()).await?;
            stdout.flush().await?;

            let line = match lines.next_line().await? {
                Some(line) => line,
                None => break,
            };

            match self.handle_line(&line).await {
                Reply::Output(text) => {
                    stdout.write_all(text.as_bytes()).await?;
                    stdout.write_all(b"\n").await?;
                }
                Reply::Silent => {}
                Reply::Quit => break,
            }
        }

        Ok(())
    }

    /// Handle one input line
    pub async fn handle_line(&self, line: &str) -> Reply {
        let mut words = line.split_whitespace();
        let name = match words.next() {
            Some(name) => name,
            None => return Reply::Silent,
        };
        let args: Vec<&str> = words.collect();

        debug!("Console input: {} {:?}", name, args);

        match name {
            "help" => Reply::Output(self.help().await),
            "click" => Reply::Output(self.click(&args).await),
            "status" => Reply::Output(self.status().await),
            "quit" | "exit" => Reply::Quit,
            _ => {
                if let Some(result) = self.commands.execute(name, &args).await {
                    return Reply::Output(render(&result));
                }
                match self.commands.unknown_command(name).await {
                    Some(result) => Reply::Output(render(&result)),
                    None => Reply::Output(format!("Unknown command '{}'", name)),
                }
            }
        }
    }

    async fn help(&self) -> String {
        let mut lines = vec![
            "help          : show this help".to_string(),
            "click LAT LON : set the map click position".to_string(),
            "status        : show vehicle mode, armed state and altitude".to_string(),
            "quit          : leave the console".to_string(),
        ];

        for spec in self.commands.commands() {
            lines.push(format!("{:<14}: {}", spec.name, spec.help));
        }

        let modes = self.commands.available_modes().await;
        if !modes.is_empty() {
            lines.push(format!("modes         : {}", modes.join(" ")));
        }

        lines.join("\n")
    }

    async fn click(&self, args: &[&str]) -> String {
        let map = match &self.map {
            Some(map) => map,
            None => return "No map available".into(),
        };

        let point = match args {
            [lat, lon] => match (lat.parse(), lon.parse()) {
                (Ok(lat), Ok(lon)) => GeoPoint::new(lat, lon),
                _ => return "Usage: click LAT LON".into(),
            },
            _ => return "Usage: click LAT LON".into(),
        };
        if !point.is_valid() {
            return "Usage: click LAT LON".into();
        }

        map.click(point).await;
        format!("Click position {}", point)
    }

    async fn status(&self) -> String {
        let mode = self
            .vehicle
            .current_mode()
            .await
            .unwrap_or_else(|| "UNKNOWN".into());
        let armed = match self.vehicle.armed().await {
            Some(true) => "ARMED",
            Some(false) => "DISARMED",
            None => "UNKNOWN",
        };
        format!(
            "Mode {} {} relative altitude {}m",
            mode,
            armed,
            self.vehicle.relative_altitude_m().await
        )
    }
}

fn render(result: &CommandResult) -> String {
    match result {
        CommandResult::Failed { message } => format!("Error: {}", message),
        _ => result.message().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::testing::RecordingVehicle;
    use gcs_shared::GuidedTarget;

    fn console(vehicle: Arc<RecordingVehicle>, with_map: bool) -> Console {
        let map = with_map.then(|| Arc::new(MapClicks::new()));
        Console::new(vehicle, map)
    }

    #[tokio::test]
    async fn test_blank_line_is_silent() {
        let console = console(Arc::new(RecordingVehicle::copter()), true);
        assert_eq!(console.handle_line("   ").await, Reply::Silent);
    }

    #[tokio::test]
    async fn test_quit() {
        let console = console(Arc::new(RecordingVehicle::copter()), true);
        assert_eq!(console.handle_line("quit").await, Reply::Quit);
        assert_eq!(console.handle_line("exit").await, Reply::Quit);
    }

    #[tokio::test]
    async fn test_click_then_guided() {
        let vehicle = Arc::new(RecordingVehicle::copter());
        let console = console(vehicle.clone(), true);

        assert_eq!(
            console.handle_line("guided 20").await,
            Reply::Output("No map click position available".into())
        );
        assert_eq!(
            console.handle_line("click -35.5 149.25").await,
            Reply::Output("Click position (-35.5, 149.25)".into())
        );
        assert_eq!(
            console.handle_line("guided 20").await,
            Reply::Output("Guided (-35.5, 149.25) 20.0".into())
        );
        assert_eq!(
            vehicle.sent_targets(),
            vec![GuidedTarget::Waypoint {
                position: GeoPoint::new(-35.5, 149.25),
                altitude_m: 20.0,
            }]
        );
    }

    #[tokio::test]
    async fn test_click_without_map() {
        let console = console(Arc::new(RecordingVehicle::copter()), false);
        assert_eq!(
            console.handle_line("click 1 2").await,
            Reply::Output("No map available".into())
        );
        assert_eq!(
            console.handle_line("guided_loiter 50").await,
            Reply::Output("No map available".into())
        );
    }

    #[tokio::test]
    async fn test_click_usage() {
        let console = console(Arc::new(RecordingVehicle::copter()), true);
        assert_eq!(
            console.handle_line("click 1").await,
            Reply::Output("Usage: click LAT LON".into())
        );
        assert_eq!(
            console.handle_line("click north east").await,
            Reply::Output("Usage: click LAT LON".into())
        );
        assert_eq!(
            console.handle_line("click nan 149").await,
            Reply::Output("Usage: click LAT LON".into())
        );
        assert_eq!(
            console.handle_line("click -35 200").await,
            Reply::Output("Usage: click LAT LON".into())
        );
        assert_eq!(
            console.handle_line("guided 20").await,
            Reply::Output("No map click position available".into())
        );
    }

    #[tokio::test]
    async fn test_mode_name_as_command() {
        let vehicle = Arc::new(RecordingVehicle::copter());
        let console = console(vehicle.clone(), true);

        assert_eq!(
            console.handle_line("brake").await,
            Reply::Output("Mode change to BRAKE requested".into())
        );
        assert_eq!(
            console.handle_line("takeoff 10").await,
            Reply::Output("Unknown command 'takeoff'".into())
        );
        assert_eq!(vehicle.sent_modes(), vec![17]);
    }

    #[tokio::test]
    async fn test_failed_commands_are_marked() {
        let mut vehicle = RecordingVehicle::copter();
        vehicle.fail_sends = true;
        let console = console(Arc::new(vehicle), true);

        assert_eq!(
            console.handle_line("mode rtl").await,
            Reply::Output("Error: Failed to set mode: FC connection closed".into())
        );
    }

    #[tokio::test]
    async fn test_help_lists_commands_and_modes() {
        let console = console(Arc::new(RecordingVehicle::copter()), true);
        match console.handle_line("help").await {
            Reply::Output(text) => {
                assert!(text.contains("guided_loiter : fly to a clicked location and loiter"));
                assert!(text.contains("mode          : mode change"));
                assert!(text.contains("modes         : STABILIZE ACRO ALT_HOLD"));
            }
            other => panic!("unexpected reply: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_status() {
        let mut vehicle = RecordingVehicle::copter();
        vehicle.relative_alt_m = 12.5;
        let vehicle = Arc::new(vehicle);
        let console = console(vehicle.clone(), true);

        assert_eq!(
            console.handle_line("status").await,
            Reply::Output("Mode UNKNOWN UNKNOWN relative altitude 12.5m".into())
        );
        vehicle.set_armed(true);
        console.handle_line("mode guided").await;
        assert_eq!(
            console.handle_line("status").await,
            Reply::Output("Mode GUIDED ARMED relative altitude 12.5m".into())
        );
        vehicle.set_armed(false);
        assert_eq!(
            console.handle_line("status").await,
            Reply::Output("Mode GUIDED DISARMED relative altitude 12.5m".into())
        );
    }
}
