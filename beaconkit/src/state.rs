use std::fmt::Display;

#[cfg(target_vendor = "apple")]
use objc2_core_bluetooth::CBManagerState;
#[cfg(target_vendor = "apple")]
use objc2_core_location::{CLAuthorizationStatus, CLRegionState};

/// Whether the device is inside a monitored region.
///
/// See [`CLRegionState`](https://developer.apple.com/documentation/corelocation/clregionstate).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionState {
    #[default]
    Unknown,
    Inside,
    Outside,
}

#[cfg(target_vendor = "apple")]
impl From<CLRegionState> for RegionState {
    fn from(state: CLRegionState) -> Self {
        match state {
            CLRegionState::Inside => RegionState::Inside,
            CLRegionState::Outside => RegionState::Outside,
            _ => RegionState::Unknown,
        }
    }
}

impl Display for RegionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegionState::Unknown => f.write_str("unknown"),
            RegionState::Inside => f.write_str("inside"),
            RegionState::Outside => f.write_str("outside"),
        }
    }
}

/// The state of a Bluetooth manager.
///
/// See [`CBManagerState`](https://developer.apple.com/documentation/corebluetooth/cbmanagerstate).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManagerState {
    #[default]
    Unknown,
    Resetting,
    Unsupported,
    Unauthorized,
    PoweredOff,
    PoweredOn,
}

impl ManagerState {
    pub fn from_raw(raw: isize) -> Self {
        match raw {
            1 => ManagerState::Resetting,
            2 => ManagerState::Unsupported,
            3 => ManagerState::Unauthorized,
            4 => ManagerState::PoweredOff,
            5 => ManagerState::PoweredOn,
            _ => ManagerState::Unknown,
        }
    }
}

#[cfg(target_vendor = "apple")]
impl From<CBManagerState> for ManagerState {
    fn from(state: CBManagerState) -> Self {
        ManagerState::from_raw(state.0)
    }
}

impl Display for ManagerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ManagerState::Unknown => f.write_str("unknown"),
            ManagerState::Resetting => f.write_str("resetting"),
            ManagerState::Unsupported => f.write_str("unsupported"),
            ManagerState::Unauthorized => f.write_str("unauthorized"),
            ManagerState::PoweredOff => f.write_str("powered off"),
            ManagerState::PoweredOn => f.write_str("powered on"),
        }
    }
}

/// The app's authorization to use location services.
///
/// See [`CLAuthorizationStatus`](https://developer.apple.com/documentation/corelocation/clauthorizationstatus).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthorizationStatus {
    #[default]
    NotDetermined,
    Restricted,
    Denied,
    AuthorizedAlways,
    AuthorizedWhenInUse,
}

impl AuthorizationStatus {
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            1 => AuthorizationStatus::Restricted,
            2 => AuthorizationStatus::Denied,
            3 => AuthorizationStatus::AuthorizedAlways,
            4 => AuthorizationStatus::AuthorizedWhenInUse,
            _ => AuthorizationStatus::NotDetermined,
        }
    }

    /// Whether region monitoring can run in the background with this status.
    pub fn allows_monitoring(self) -> bool {
        self == AuthorizationStatus::AuthorizedAlways
    }
}

#[cfg(target_vendor = "apple")]
impl From<CLAuthorizationStatus> for AuthorizationStatus {
    fn from(status: CLAuthorizationStatus) -> Self {
        AuthorizationStatus::from_raw(status.0)
    }
}

impl Display for AuthorizationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthorizationStatus::NotDetermined => f.write_str("not determined"),
            AuthorizationStatus::Restricted => f.write_str("restricted"),
            AuthorizationStatus::Denied => f.write_str("denied"),
            AuthorizationStatus::AuthorizedAlways => f.write_str("authorized always"),
            AuthorizationStatus::AuthorizedWhenInUse => f.write_str("authorized when in use"),
        }
    }
}
