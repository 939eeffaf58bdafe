use std::fmt::Display;
use std::hash::{Hash, Hasher};

#[cfg(target_vendor = "apple")]
use objc2_core_location::{CLBeacon, CLProximity};

/// The relative distance to a ranged beacon, as estimated by the platform.
///
/// See [`CLProximity`](https://developer.apple.com/documentation/corelocation/clproximity).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Proximity {
    /// The proximity of the beacon could not be determined.
    #[default]
    Unknown,
    /// The beacon is in the user's immediate vicinity.
    Immediate,
    /// The beacon is relatively close to the user.
    Near,
    /// The beacon is far away.
    Far,
}

impl Proximity {
    /// Converts a raw `CLProximity` value. Values outside the documented range map to
    /// [`Proximity::Unknown`].
    pub fn from_raw(raw: isize) -> Self {
        match raw {
            1 => Proximity::Immediate,
            2 => Proximity::Near,
            3 => Proximity::Far,
            _ => Proximity::Unknown,
        }
    }

    /// A short human readable description of the distance bucket.
    pub fn description(self) -> &'static str {
        match self {
            Proximity::Immediate => "Very close",
            Proximity::Near => "Near",
            Proximity::Far => "Far",
            Proximity::Unknown => "Where's the beacon?",
        }
    }
}

impl Display for Proximity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}

#[cfg(target_vendor = "apple")]
impl From<CLProximity> for Proximity {
    fn from(proximity: CLProximity) -> Self {
        Proximity::from_raw(proximity.0)
    }
}

/// A beacon reported by a ranging callback.
///
/// Two beacons are equal when their major, minor, accuracy and proximity are all equal. The
/// accuracy is compared by its canonical bit pattern: `-0.0` equals `0.0` and all NaNs are equal
/// to each other, which keeps [`Eq`] reflexive and consistent with [`Hash`].
#[derive(Debug, Clone, Copy)]
pub struct Beacon {
    pub major: u16,
    pub minor: u16,
    /// Accuracy of the proximity estimate in meters. Negative if it could not be determined.
    pub accuracy: f64,
    pub proximity: Proximity,
}

impl Beacon {
    pub fn new(major: u16, minor: u16, accuracy: f64, proximity: Proximity) -> Self {
        Beacon {
            major,
            minor,
            accuracy,
            proximity,
        }
    }

    #[cfg(target_vendor = "apple")]
    pub(crate) fn from_clbeacon(beacon: &CLBeacon) -> Self {
        unsafe {
            Beacon {
                major: beacon.major().unsignedShortValue(),
                minor: beacon.minor().unsignedShortValue(),
                accuracy: beacon.accuracy(),
                proximity: beacon.proximity().into(),
            }
        }
    }

    /// Multi-line summary used when logging ranged beacons.
    pub fn details(&self) -> String {
        format!(
            "Beacon Details:\nMajor = {}\nMinor = {}\nDistance: {}",
            self.major, self.minor, self.proximity
        )
    }

    fn accuracy_bits(&self) -> u64 {
        if self.accuracy.is_nan() {
            f64::NAN.to_bits()
        } else if self.accuracy == 0.0 {
            0
        } else {
            self.accuracy.to_bits()
        }
    }
}

impl PartialEq for Beacon {
    fn eq(&self, other: &Self) -> bool {
        self.major == other.major
            && self.minor == other.minor
            && self.accuracy_bits() == other.accuracy_bits()
            && self.proximity == other.proximity
    }
}

impl Eq for Beacon {}

impl Hash for Beacon {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.major.hash(state);
        self.minor.hash(state);
        self.accuracy_bits().hash(state);
        self.proximity.hash(state);
    }
}
