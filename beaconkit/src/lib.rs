//! A safe wrapper for iBeacon monitoring and advertising on Apple's
//! [CoreLocation](https://developer.apple.com/documentation/corelocation) and
//! [CoreBluetooth](https://developer.apple.com/documentation/corebluetooth) frameworks.
//!
//! The beacon, region and state types are plain Rust values and are available on every target.
//! [`LocationManager`] (region monitoring and beacon ranging) and [`PeripheralManager`]
//! (advertising the device as a beacon) wrap the framework objects and are only built for Apple
//! targets. Both report back through a boxed delegate trait whose methods are called on the
//! dispatch queue the manager was created on.
//!
//! Encoding the advertisement payload and estimating beacon distance are left to the frameworks.

mod beacon;
pub mod error;
// CoreLocation deprecates the CLBeaconRegion based monitoring, ranging and advertising API.
#[allow(deprecated)]
mod region;
mod state;

#[cfg(target_vendor = "apple")]
#[allow(deprecated)]
mod location_manager;
#[cfg(target_vendor = "apple")]
mod peripheral_manager;

pub use beacon::*;
pub use error::{BluetoothError, Error, ErrorKind, LocationError, Result};
pub use region::*;
pub use state::*;

#[cfg(target_vendor = "apple")]
pub use location_manager::*;
#[cfg(target_vendor = "apple")]
pub use peripheral_manager::*;

pub use uuid::Uuid;
