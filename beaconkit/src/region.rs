use uuid::Uuid;

#[cfg(target_vendor = "apple")]
use objc2::AnyThread;
#[cfg(target_vendor = "apple")]
use objc2::rc::Retained;
#[cfg(target_vendor = "apple")]
use objc2_core_location::{CLBeaconRegion, CLRegion};
#[cfg(target_vendor = "apple")]
use objc2_foundation::{NSString, NSUUID};

/// A region defined by the identity of the beacons inside it.
///
/// A region always matches a proximity UUID and optionally narrows the match to a major value, or
/// to a major/minor pair.
///
/// See [`CLBeaconRegion`](https://developer.apple.com/documentation/corelocation/clbeaconregion).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BeaconRegion {
    uuid: Uuid,
    major: Option<u16>,
    minor: Option<u16>,
    identifier: String,
    /// Deliver a notification when the device enters the region. Defaults to `true`.
    pub notify_on_entry: bool,
    /// Deliver a notification when the device leaves the region. Defaults to `true`.
    pub notify_on_exit: bool,
    /// Report the region state whenever the display turns on. Defaults to `false`.
    pub notify_entry_state_on_display: bool,
}

impl BeaconRegion {
    /// A region matching every beacon with the given proximity UUID.
    pub fn new(uuid: Uuid, identifier: impl Into<String>) -> Self {
        BeaconRegion {
            uuid,
            major: None,
            minor: None,
            identifier: identifier.into(),
            notify_on_entry: true,
            notify_on_exit: true,
            notify_entry_state_on_display: false,
        }
    }

    /// A region matching beacons with the given proximity UUID and major value.
    pub fn with_major(uuid: Uuid, major: u16, identifier: impl Into<String>) -> Self {
        BeaconRegion {
            major: Some(major),
            ..Self::new(uuid, identifier)
        }
    }

    /// A region matching exactly one beacon identity.
    pub fn with_major_minor(
        uuid: Uuid,
        major: u16,
        minor: u16,
        identifier: impl Into<String>,
    ) -> Self {
        BeaconRegion {
            major: Some(major),
            minor: Some(minor),
            ..Self::new(uuid, identifier)
        }
    }

    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    pub fn major(&self) -> Option<u16> {
        self.major
    }

    /// The minor value. Only ever `Some` when [`major`][Self::major] is too.
    pub fn minor(&self) -> Option<u16> {
        self.minor
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    #[cfg(target_vendor = "apple")]
    pub(crate) fn to_clbeaconregion(&self) -> Retained<CLBeaconRegion> {
        let uuid = NSUUID::from_bytes(self.uuid.into_bytes());
        let identifier = NSString::from_str(&self.identifier);

        let region = CLBeaconRegion::alloc();
        let region = unsafe {
            match (self.major, self.minor) {
                (Some(major), Some(minor)) => CLBeaconRegion::initWithUUID_major_minor_identifier(
                    region,
                    &uuid,
                    major,
                    minor,
                    &identifier,
                ),
                (Some(major), None) => {
                    CLBeaconRegion::initWithUUID_major_identifier(region, &uuid, major, &identifier)
                }
                _ => CLBeaconRegion::initWithUUID_identifier(region, &uuid, &identifier),
            }
        };

        unsafe {
            region.setNotifyOnEntry(self.notify_on_entry);
            region.setNotifyOnExit(self.notify_on_exit);
            region.setNotifyEntryStateOnDisplay(self.notify_entry_state_on_display);
        }

        region
    }

    #[cfg(target_vendor = "apple")]
    pub(crate) fn from_clbeaconregion(region: &CLBeaconRegion) -> Self {
        unsafe {
            let major = region.major().map(|major| major.unsignedShortValue());
            BeaconRegion {
                uuid: Uuid::from_bytes(region.UUID().as_bytes()),
                major,
                minor: major
                    .and(region.minor())
                    .map(|minor| minor.unsignedShortValue()),
                identifier: region.identifier().to_string(),
                notify_on_entry: region.notifyOnEntry(),
                notify_on_exit: region.notifyOnExit(),
                notify_entry_state_on_display: region.notifyEntryStateOnDisplay(),
            }
        }
    }
}

/// A region reported by a location manager callback.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Region {
    Beacon(BeaconRegion),
    /// A region of another kind, such as a geographic region registered by another part of the
    /// app.
    Other { identifier: String },
}

impl Region {
    pub fn identifier(&self) -> &str {
        match self {
            Region::Beacon(region) => region.identifier(),
            Region::Other { identifier } => identifier,
        }
    }

    pub fn as_beacon(&self) -> Option<&BeaconRegion> {
        match self {
            Region::Beacon(region) => Some(region),
            Region::Other { .. } => None,
        }
    }

    #[cfg(target_vendor = "apple")]
    pub(crate) fn from_clregion(region: &CLRegion) -> Self {
        match region.downcast_ref::<CLBeaconRegion>() {
            Some(region) => Region::Beacon(BeaconRegion::from_clbeaconregion(region)),
            None => Region::Other {
                identifier: unsafe { region.identifier() }.to_string(),
            },
        }
    }
}

impl From<BeaconRegion> for Region {
    fn from(region: BeaconRegion) -> Self {
        Region::Beacon(region)
    }
}
