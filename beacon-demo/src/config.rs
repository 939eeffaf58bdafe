use beaconkit::{BeaconRegion, Uuid};
use clap::{Parser, Subcommand};

/// Proximity UUID shared by the broadcasting and the monitoring side of the demo.
pub const DEFAULT_PROXIMITY_UUID: &str = "F34A1A1F-500F-48FB-AFAA-9584D641D7B1";
const DEFAULT_UUID: Uuid = Uuid::from_u128(0xF34A1A1F_500F_48FB_AFAA_9584D641D7B1);
pub const DEFAULT_MAJOR: u16 = 100;
pub const DEFAULT_MINOR: u16 = 50;
/// Calibrated signal strength at one meter, in dBm.
pub const DEFAULT_MEASURED_POWER: i8 = -58;
pub const DEFAULT_MONITOR_IDENTIFIER: &str = "com.2cloz.AXT45";
pub const DEFAULT_BROADCAST_IDENTIFIER: &str = "com.2cloz.Elon";

/// Which toggle the button drives.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Mode {
    /// Monitor the beacon region and range the beacons inside it
    #[default]
    Monitor,
    /// Advertise this device as a beacon
    Broadcast,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DemoConfig {
    pub mode: Mode,
    pub uuid: Uuid,
    pub major: u16,
    pub minor: u16,
    pub measured_power: i8,
    pub monitor_identifier: String,
    pub broadcast_identifier: String,
    pub allow_background_updates: bool,
    /// Press the button once as soon as the app has loaded.
    pub start_immediately: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            uuid: DEFAULT_UUID,
            major: DEFAULT_MAJOR,
            minor: DEFAULT_MINOR,
            measured_power: DEFAULT_MEASURED_POWER,
            monitor_identifier: DEFAULT_MONITOR_IDENTIFIER.to_string(),
            broadcast_identifier: DEFAULT_BROADCAST_IDENTIFIER.to_string(),
            allow_background_updates: true,
            start_immediately: false,
        }
    }
}

impl DemoConfig {
    /// The region watched in monitor mode. It matches every beacon with the configured UUID.
    pub fn monitor_region(&self) -> BeaconRegion {
        let mut region = BeaconRegion::new(self.uuid, self.monitor_identifier.as_str());
        region.notify_on_entry = true;
        region.notify_on_exit = true;
        region.notify_entry_state_on_display = true;
        region
    }

    /// The identity advertised in broadcast mode.
    pub fn broadcast_region(&self) -> BeaconRegion {
        BeaconRegion::with_major_minor(
            self.uuid,
            self.major,
            self.minor,
            self.broadcast_identifier.as_str(),
        )
    }
}

/// Broadcast this device as an iBeacon, or monitor and range nearby beacons.
///
/// Press Enter to press the Start/Stop button.
#[derive(Debug, Parser)]
#[command(name = "beacon-demo", version)]
pub struct Cli {
    #[command(subcommand)]
    pub mode: Mode,

    /// Proximity UUID to advertise and monitor
    #[arg(long, default_value = DEFAULT_PROXIMITY_UUID)]
    pub uuid: Uuid,

    /// Major value to advertise
    #[arg(long, default_value_t = DEFAULT_MAJOR)]
    pub major: u16,

    /// Minor value to advertise
    #[arg(long, default_value_t = DEFAULT_MINOR)]
    pub minor: u16,

    /// Received signal strength at one meter, in dBm
    #[arg(long, default_value_t = DEFAULT_MEASURED_POWER, allow_negative_numbers = true)]
    pub measured_power: i8,

    /// Identifier of the monitored region
    #[arg(long = "region-id", default_value = DEFAULT_MONITOR_IDENTIFIER)]
    pub monitor_identifier: String,

    /// Identifier of the advertised region
    #[arg(long = "broadcast-id", default_value = DEFAULT_BROADCAST_IDENTIFIER)]
    pub broadcast_identifier: String,

    /// Do not keep receiving location updates in the background
    #[arg(long)]
    pub no_background: bool,

    /// Press the button once right after start-up
    #[arg(long)]
    pub start: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn config(&self) -> DemoConfig {
        DemoConfig {
            mode: self.mode,
            uuid: self.uuid,
            major: self.major,
            minor: self.minor,
            measured_power: self.measured_power,
            monitor_identifier: self.monitor_identifier.clone(),
            broadcast_identifier: self.broadcast_identifier.clone(),
            allow_background_updates: !self.no_background,
            start_immediately: self.start,
        }
    }
}
