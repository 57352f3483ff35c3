//! Flight Controller Connection
//!
//! Opens a single MAVLink link to the vehicle via serial, UDP or TCP. Inbound
//! messages are forwarded as [`FcEvent`]s; outbound messages are queued on a
//! channel and written by a dedicated blocking thread.

use anyhow::{anyhow, bail, Context, Result};
use mavlink::ardupilotmega::MavMessage;
use mavlink::error::MessageReadError;
use mavlink::{MavConnection, MavHeader};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

type SharedConnection = Arc<dyn MavConnection<MavMessage> + Send + Sync>;

/// Connection type for the vehicle link
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FcConnectionType {
    /// Serial port connection (e.g., "/dev/ttyACM0" at 115200)
    Serial { port: String, baud: u32 },
    /// Listen for UDP packets (e.g., "0.0.0.0:14550")
    Udp { address: String },
    /// Connect to a TCP endpoint (e.g., "127.0.0.1:5760")
    Tcp { address: String },
}

impl Default for FcConnectionType {
    fn default() -> Self {
        // SITL and most telemetry radios forward to the GCS on 14550
        Self::Udp {
            address: "0.0.0.0:14550".into(),
        }
    }
}

impl fmt::Display for FcConnectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FcConnectionType::Serial { port, baud } => write!(f, "serial:{}:{}", port, baud),
            FcConnectionType::Udp { address } => write!(f, "udpin:{}", address),
            FcConnectionType::Tcp { address } => write!(f, "tcpout:{}", address),
        }
    }
}

impl FromStr for FcConnectionType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (scheme, rest) = s
            .split_once(':')
            .ok_or_else(|| anyhow!("missing connection scheme in '{}'", s))?;

        match scheme {
            "udpin" | "udp" => Ok(Self::Udp {
                address: rest.into(),
            }),
            "tcpout" | "tcp" => Ok(Self::Tcp {
                address: rest.into(),
            }),
            "serial" => {
                let (port, baud) = rest
                    .rsplit_once(':')
                    .ok_or_else(|| anyhow!("serial connection needs PORT:BAUD, got '{}'", rest))?;
                let baud = baud
                    .parse()
                    .with_context(|| format!("invalid baud rate '{}'", baud))?;
                Ok(Self::Serial {
                    port: port.into(),
                    baud,
                })
            }
            other => bail!("unsupported connection scheme '{}'", other),
        }
    }
}

/// Configuration for the vehicle connection
#[derive(Debug, Clone)]
pub struct FcConfig {
    /// Connection type and parameters
    pub connection: FcConnectionType,
    /// System ID for this ground station
    pub system_id: u8,
    /// Component ID for this ground station
    pub component_id: u8,
    /// Target system ID (vehicle)
    pub target_system: u8,
    /// Target component ID (autopilot)
    pub target_component: u8,
}

impl Default for FcConfig {
    fn default() -> Self {
        Self {
            connection: FcConnectionType::default(),
            system_id: 255,      // Ground station
            component_id: 190,   // MAV_COMP_ID_MISSIONPLANNER
            target_system: 1,    // Autopilot
            target_component: 1, // MAV_COMP_ID_AUTOPILOT1
        }
    }
}

/// Events from the vehicle link
#[derive(Debug, Clone)]
pub enum FcEvent {
    /// Connection established
    Connected,
    /// Connection lost or could not be opened
    Disconnected { reason: String },
    /// Received a MAVLink message
    Message(MavMessage),
}

pub type FcEventReceiver = mpsc::Receiver<FcEvent>;

/// Handle to the vehicle link
#[derive(Clone)]
pub struct FlightController {
    config: FcConfig,
    /// Channel for outgoing messages
    outbound_tx: mpsc::Sender<MavMessage>,
    connected: Arc<AtomicBool>,
}

impl FlightController {
    /// Open the vehicle link in the background
    pub fn new(config: FcConfig) -> (Self, FcEventReceiver) {
        let (outbound_tx, outbound_rx) = mpsc::channel::<MavMessage>(100);
        let (event_tx, event_rx) = mpsc::channel::<FcEvent>(100);
        let connected = Arc::new(AtomicBool::new(false));

        let fc = Self {
            config: config.clone(),
            outbound_tx,
            connected: connected.clone(),
        };

        tokio::spawn(async move {
            if let Err(e) = run_connection(config, outbound_rx, event_tx.clone(), connected).await
            {
                error!("[MAVLink] {:#}", e);
                let _ = event_tx
                    .send(FcEvent::Disconnected {
                        reason: e.to_string(),
                    })
                    .await;
            }
        });

        (fc, event_rx)
    }

    /// Check if the link is up
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    /// Queue a MAVLink message for the vehicle
    pub async fn send(&self, msg: MavMessage) -> Result<()> {
        if !self.is_connected() {
            bail!("FC link not connected");
        }
        self.outbound_tx
            .send(msg)
            .await
            .map_err(|_| anyhow!("FC connection closed"))
    }

    /// Get the configuration
    pub fn config(&self) -> &FcConfig {
        &self.config
    }
}

async fn run_connection(
    config: FcConfig,
    outbound_rx: mpsc::Receiver<MavMessage>,
    event_tx: mpsc::Sender<FcEvent>,
    connected: Arc<AtomicBool>,
) -> Result<()> {
    let address = config.connection.to_string();
    info!("[MAVLink] Connecting to {}", address);

    let conn: SharedConnection = {
        let addr = address.clone();
        tokio::task::spawn_blocking(move || mavlink::connect::<MavMessage>(&addr))
            .await?
            .with_context(|| format!("failed to open {}", address))?
            .into()
    };

    info!("[MAVLink] Link open on {}", address);
    connected.store(true, Ordering::SeqCst);
    let _ = event_tx.send(FcEvent::Connected).await;

    let reader = {
        let conn = conn.clone();
        let event_tx = event_tx.clone();
        let connected = connected.clone();
        tokio::task::spawn_blocking(move || read_loop(conn, event_tx, connected))
    };

    let writer = {
        let conn = conn.clone();
        let headers = FrameHeaders::new(config.system_id, config.component_id);
        tokio::task::spawn_blocking(move || write_loop(conn, outbound_rx, headers))
    };

    tokio::select! {
        res = reader => res?,
        res = writer => res?,
    }
    Ok(())
}

/// Outgoing frame headers with a wrapping sequence number
struct FrameHeaders {
    system_id: u8,
    component_id: u8,
    sequence: u8,
}

impl FrameHeaders {
    fn new(system_id: u8, component_id: u8) -> Self {
        Self {
            system_id,
            component_id,
            sequence: 0,
        }
    }

    fn next(&mut self) -> MavHeader {
        let header = MavHeader {
            system_id: self.system_id,
            component_id: self.component_id,
            sequence: self.sequence,
        };
        self.sequence = self.sequence.wrapping_add(1);
        header
    }
}

/// Blocking send loop, ends when every [`FlightController`] handle is dropped
fn write_loop(
    conn: SharedConnection,
    mut outbound_rx: mpsc::Receiver<MavMessage>,
    mut headers: FrameHeaders,
) {
    while let Some(msg) = outbound_rx.blocking_recv() {
        if let Err(e) = conn.send(&headers.next(), &msg) {
            warn!("[MAVLink] Send failed: {}", e);
        }
    }
}

/// Blocking receive loop, ends when the link fails or the event receiver is dropped
fn read_loop(conn: SharedConnection, event_tx: mpsc::Sender<FcEvent>, connected: Arc<AtomicBool>) {
    loop {
        match conn.recv() {
            Ok((_header, msg)) => {
                if event_tx.blocking_send(FcEvent::Message(msg)).is_err() {
                    break;
                }
            }
            Err(MessageReadError::Io(ref e)) if e.kind() == std::io::ErrorKind::WouldBlock => {
                std::thread::sleep(std::time::Duration::from_millis(10));
            }
            Err(MessageReadError::Io(e)) => {
                error!("[MAVLink] Read error: {}", e);
                let _ = event_tx.blocking_send(FcEvent::Disconnected {
                    reason: e.to_string(),
                });
                break;
            }
            Err(e) => {
                debug!("[MAVLink] Dropping unparsable frame: {}", e);
            }
        }
    }

    connected.store(false, Ordering::SeqCst);
}
