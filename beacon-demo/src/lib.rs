//! An iBeacon demo: advertise this device as a beacon, or monitor a beacon region and range the
//! beacons inside it.
//!
//! The app state lives in [`BeaconController`], which talks to the frameworks through
//! [`BeaconPlatform`] and receives their callbacks as [`BeaconEvent`]s. Everything except the
//! Apple backend builds and tests on any target.

mod button;
mod config;
mod controller;
mod event;
mod platform;

#[cfg(target_vendor = "apple")]
pub mod apple;

pub use button::{Button, ButtonColor};
pub use config::*;
pub use controller::{BeaconController, bluetooth_status_message};
pub use event::{BeaconEvent, EventHandler, EventSink};
pub use platform::BeaconPlatform;
