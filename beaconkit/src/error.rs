//! Error types for this crate.

use std::fmt::Display;

#[cfg(target_vendor = "apple")]
use objc2::Message;
#[cfg(target_vendor = "apple")]
use objc2::rc::Retained;
#[cfg(target_vendor = "apple")]
use objc2_core_bluetooth::CBErrorDomain;
#[cfg(target_vendor = "apple")]
use objc2_core_location::kCLErrorDomain;
#[cfg(target_vendor = "apple")]
use objc2_foundation::NSError;

/// A convenience type alias for a `Result` with an `Error` type.
pub type Result<T> = std::result::Result<T, Error>;

/// An error reported by CoreLocation, CoreBluetooth, or this crate.
#[derive(Debug, Clone)]
pub struct Error {
    data: ErrorData,
}

/// The kind of error that occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorKind {
    /// A CoreLocation error.
    Location(LocationError),
    /// A CoreBluetooth error.
    Bluetooth(BluetoothError),
    /// Advertising was requested while the peripheral manager was not powered on.
    BluetoothUnavailable,
    /// A framework object was requested off the main thread.
    MainThreadRequired,
    /// An unknown or other error.
    Other,
}

/// A `CLError` code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocationError(pub isize);

#[allow(non_upper_case_globals)]
impl LocationError {
    pub const LocationUnknown: Self = Self(0);
    pub const Denied: Self = Self(1);
    pub const RegionMonitoringDenied: Self = Self(4);
    pub const RegionMonitoringFailure: Self = Self(5);
    pub const RegionMonitoringSetupDelayed: Self = Self(6);
    pub const RegionMonitoringResponseDelayed: Self = Self(7);
    pub const RangingUnavailable: Self = Self(16);
    pub const RangingFailure: Self = Self(17);
    pub const PromptDeclined: Self = Self(18);
}

/// A `CBError` code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BluetoothError(pub isize);

#[allow(non_upper_case_globals)]
impl BluetoothError {
    pub const Unknown: Self = Self(0);
    pub const InvalidParameters: Self = Self(1);
    pub const UUIDNotAllowed: Self = Self(8);
    pub const AlreadyAdvertising: Self = Self(9);
    pub const OperationNotSupported: Self = Self(13);
}

#[derive(Debug, Clone)]
enum ErrorData {
    #[cfg(target_vendor = "apple")]
    Os(Retained<NSError>),
    Simple(ErrorKind),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.data {
            #[cfg(target_vendor = "apple")]
            ErrorData::Os(error) => error.fmt(f),
            ErrorData::Simple(kind) => kind.fmt(f),
        }
    }
}

impl std::error::Error for Error {}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error {
            data: ErrorData::Simple(kind),
        }
    }
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match &self.data {
            #[cfg(target_vendor = "apple")]
            ErrorData::Os(error) => ErrorKind::from(&**error),
            ErrorData::Simple(kind) => *kind,
        }
    }
}

#[cfg(target_vendor = "apple")]
impl Error {
    pub(crate) fn from_nserror(error: &NSError) -> Self {
        Self {
            data: ErrorData::Os(error.retain()),
        }
    }

    pub fn get_ref(&self) -> Option<&NSError> {
        match &self.data {
            ErrorData::Os(error) => Some(error),
            ErrorData::Simple(_) => None,
        }
    }

    pub fn into_inner(self) -> Option<Retained<NSError>> {
        match self.data {
            ErrorData::Os(error) => Some(error),
            ErrorData::Simple(_) => None,
        }
    }
}

#[cfg(target_vendor = "apple")]
impl From<&NSError> for ErrorKind {
    fn from(error: &NSError) -> Self {
        if &*error.domain() == unsafe { kCLErrorDomain } {
            ErrorKind::Location(LocationError(error.code()))
        } else if &*error.domain() == unsafe { CBErrorDomain } {
            ErrorKind::Bluetooth(BluetoothError(error.code()))
        } else {
            ErrorKind::Other
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Location(error) => error.fmt(f),
            ErrorKind::Bluetooth(error) => error.fmt(f),
            ErrorKind::BluetoothUnavailable => f.write_str("bluetooth is not powered on"),
            ErrorKind::MainThreadRequired => f.write_str("must be called on the main thread"),
            ErrorKind::Other => f.write_str("other error"),
        }
    }
}

impl Display for LocationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            LocationError::LocationUnknown => f.write_str("location unknown"),
            LocationError::Denied => f.write_str("location services denied"),
            LocationError::RegionMonitoringDenied => f.write_str("region monitoring denied"),
            LocationError::RegionMonitoringFailure => f.write_str("region monitoring failure"),
            LocationError::RegionMonitoringSetupDelayed => {
                f.write_str("region monitoring setup delayed")
            }
            LocationError::RegionMonitoringResponseDelayed => {
                f.write_str("region monitoring response delayed")
            }
            LocationError::RangingUnavailable => f.write_str("ranging unavailable"),
            LocationError::RangingFailure => f.write_str("ranging failure"),
            LocationError::PromptDeclined => f.write_str("authorization prompt declined"),
            _ => write!(f, "unknown location error ({})", self.0),
        }
    }
}

impl Display for BluetoothError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            BluetoothError::Unknown => f.write_str("unknown"),
            BluetoothError::InvalidParameters => f.write_str("invalid parameters"),
            BluetoothError::UUIDNotAllowed => f.write_str("UUID not allowed"),
            BluetoothError::AlreadyAdvertising => f.write_str("already advertising"),
            BluetoothError::OperationNotSupported => f.write_str("operation not supported"),
            _ => write!(f, "unknown bluetooth error ({})", self.0),
        }
    }
}
