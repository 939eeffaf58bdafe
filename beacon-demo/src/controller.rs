use std::collections::HashSet;

use beaconkit::{
    AuthorizationStatus, Beacon, BeaconRegion, Error, ErrorKind, ManagerState, Region,
    RegionState, Result,
};
use tracing::{debug, error, info, warn};

use crate::button::Button;
use crate::config::{DemoConfig, Mode};
use crate::event::{BeaconEvent, EventHandler};
use crate::platform::BeaconPlatform;

/// The console line logged for each advertiser power state.
pub fn bluetooth_status_message(state: ManagerState) -> &'static str {
    match state {
        ManagerState::PoweredOn => "Bluetooth Status: Turned On",
        ManagerState::PoweredOff => "Bluetooth Status: Turned Off",
        ManagerState::Resetting => "Bluetooth Status: Resetting",
        ManagerState::Unauthorized => "Bluetooth Status: Not Authorized",
        ManagerState::Unsupported => "Bluetooth Status: Not Supported",
        ManagerState::Unknown => "Bluetooth Status: Unknown",
    }
}

/// Application state behind the Start/Stop button.
///
/// The controller issues framework calls through a [`BeaconPlatform`] and reacts to the
/// callbacks it receives as [`BeaconEvent`]s. Nothing here retries or recovers: failures
/// reported by the frameworks are logged.
pub struct BeaconController<P> {
    config: DemoConfig,
    platform: P,
    button: Button,
    monitor_region: BeaconRegion,
    is_searching: bool,
    is_broadcasting: bool,
    found_beacons: HashSet<Beacon>,
    start_pending: bool,
}

impl<P: BeaconPlatform> BeaconController<P> {
    pub fn new(config: DemoConfig, platform: P) -> Self {
        let monitor_region = config.monitor_region();
        Self {
            config,
            platform,
            button: Button::idle(),
            monitor_region,
            is_searching: false,
            is_broadcasting: false,
            found_beacons: HashSet::new(),
            start_pending: false,
        }
    }

    /// Prepares the location manager and, in broadcast mode, the advertiser.
    ///
    /// With [`DemoConfig::start_immediately`] set, monitoring starts right away while
    /// broadcasting starts once the advertiser first reports that it is powered on.
    pub fn load(&mut self) {
        self.platform
            .set_allows_background_location_updates(self.config.allow_background_updates);
        self.platform.request_always_authorization();

        debug!(
            mode = ?self.config.mode,
            region = self.monitor_region.identifier(),
            uuid = %self.config.uuid,
            "loaded"
        );

        match self.config.mode {
            Mode::Monitor => {
                if self.config.start_immediately && !self.is_searching {
                    self.toggle_monitoring();
                }
            }
            Mode::Broadcast => {
                self.start_pending = self.config.start_immediately;
                self.platform.init_advertiser();
            }
        }
    }

    /// Presses the button, toggling monitoring or broadcasting depending on the mode.
    pub fn press_button(&mut self) -> Result<()> {
        match self.config.mode {
            Mode::Monitor => {
                self.toggle_monitoring();
                Ok(())
            }
            Mode::Broadcast => self.toggle_broadcasting(),
        }
    }

    pub fn toggle_monitoring(&mut self) {
        if !self.is_searching {
            self.set_button(true);

            self.platform.start_monitoring(&self.monitor_region);
            self.platform.start_updating_location();
            info!("monitoring beacons.....");
        } else {
            self.platform.stop_monitoring(&self.monitor_region);
            self.platform.stop_ranging(&self.monitor_region);
            self.platform.stop_updating_location();

            self.set_button(false);
            self.found_beacons.clear();
            info!("not monitoring beacons");
        }

        self.is_searching = !self.is_searching;
    }

    /// Starts or stops advertising the configured beacon identity.
    ///
    /// Starting fails with [`ErrorKind::BluetoothUnavailable`] unless the advertiser is powered
    /// on. A refused press leaves the button showing "Start".
    pub fn toggle_broadcasting(&mut self) -> Result<()> {
        if !self.is_broadcasting {
            let state = self.platform.advertiser_state();
            if state != ManagerState::PoweredOn {
                warn!(%state, "cannot broadcast until bluetooth is powered on");
                return Err(ErrorKind::BluetoothUnavailable.into());
            }

            let region = self.config.broadcast_region();
            self.platform
                .start_advertising(&region, self.config.measured_power);

            self.set_button(true);
            self.is_broadcasting = true;
            info!("Broadcasting...");
        } else {
            self.stop_broadcasting();
        }

        Ok(())
    }

    fn stop_broadcasting(&mut self) {
        self.set_button(false);

        self.platform.stop_advertising();
        self.is_broadcasting = false;
        info!("Broadcasting stopped");
    }

    pub fn button(&self) -> Button {
        self.button
    }

    pub fn is_searching(&self) -> bool {
        self.is_searching
    }

    pub fn is_broadcasting(&self) -> bool {
        self.is_broadcasting
    }

    pub fn monitor_region(&self) -> &BeaconRegion {
        &self.monitor_region
    }

    /// Every distinct beacon ranged since monitoring last started.
    pub fn found_beacons(&self) -> &HashSet<Beacon> {
        &self.found_beacons
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    fn set_button(&mut self, active: bool) {
        self.button.set_active(active);
        debug!(button = %self.button, "button updated");
    }

    fn advertiser_state_changed(&mut self, state: ManagerState) {
        if state == ManagerState::PoweredOff && self.is_broadcasting {
            self.stop_broadcasting();
        }

        info!("{}", bluetooth_status_message(state));

        if state == ManagerState::PoweredOn && self.start_pending {
            self.start_pending = false;
            if let Err(error) = self.toggle_broadcasting() {
                error!("failed to start broadcasting: {error}");
            }
        }
    }

    fn region_state_determined(&mut self, state: RegionState, region: &Region) {
        debug!(region = region.identifier(), %state, "determined region state");

        if state == RegionState::Inside {
            self.platform.start_ranging(&self.monitor_region);
        } else {
            self.platform.stop_ranging(&self.monitor_region);
        }
    }

    fn beacons_ranged(&mut self, beacons: Vec<Beacon>, region: &BeaconRegion) {
        if beacons.is_empty() {
            return;
        }

        info!("{}", region.identifier());
        for beacon in beacons {
            info!("{}", beacon.details());
            if self.found_beacons.insert(beacon) {
                debug!(
                    major = beacon.major,
                    minor = beacon.minor,
                    found = self.found_beacons.len(),
                    "new beacon"
                );
            }
        }
    }

    fn failed(&self, what: &str, region: Option<&str>, error: &Error) {
        match region {
            Some(region) => error!(region, kind = ?error.kind(), "{what} failed: {error}"),
            None => error!(kind = ?error.kind(), "{what} failed: {error}"),
        }
    }
}

impl<P: BeaconPlatform> EventHandler for BeaconController<P> {
    fn handle(&mut self, event: BeaconEvent) {
        match event {
            BeaconEvent::AdvertiserStateChanged(state) => self.advertiser_state_changed(state),
            BeaconEvent::AdvertisingStarted(None) => debug!("advertising started"),
            BeaconEvent::AdvertisingStarted(Some(error)) => {
                self.failed("advertising", None, &error)
            }
            BeaconEvent::AuthorizationChanged(status) => {
                info!(%status, "location authorization changed");
                if status != AuthorizationStatus::NotDetermined && !status.allows_monitoring() {
                    warn!("region monitoring needs location access at all times");
                }
            }
            BeaconEvent::LocationFailed(error) => self.failed("location updates", None, &error),
            BeaconEvent::MonitoringStarted(region) => match region.as_beacon() {
                Some(region) => self.platform.request_state(region),
                None => debug!(region = region.identifier(), "ignoring non-beacon region"),
            },
            BeaconEvent::RegionStateDetermined { state, region } => {
                self.region_state_determined(state, &region)
            }
            BeaconEvent::RegionEntered(region) => {
                if let Some(region) = region.as_beacon() {
                    info!("{}", region.identifier());
                }
                info!("Beacon in range");
            }
            BeaconEvent::RegionExited(_) => info!("No beacons in range"),
            BeaconEvent::MonitoringFailed { region, error } => self.failed(
                "monitoring",
                region.as_ref().map(Region::identifier),
                &error,
            ),
            BeaconEvent::BeaconsRanged { beacons, region } => {
                self.beacons_ranged(beacons, &region)
            }
            BeaconEvent::RangingFailed { region, error } => {
                self.failed("ranging", Some(region.identifier()), &error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    use beaconkit::{LocationError, Proximity};
    use tracing::metadata::LevelFilter;
    use tracing_subscriber::fmt::MakeWriter;
    use tracing_subscriber::util::SubscriberInitExt;

    use super::*;
    use crate::button::ButtonColor;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Captured {
        type Writer = Captured;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    /// Runs `f` and returns the console lines it logged at `info` and above.
    fn console<R>(f: impl FnOnce() -> R) -> (R, Vec<String>) {
        let captured = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(captured.clone())
            .with_max_level(LevelFilter::INFO)
            .with_ansi(false)
            .without_time()
            .with_level(false)
            .with_target(false)
            .finish();

        let result = {
            let _guard = subscriber.set_default();
            f()
        };

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        let lines = output.lines().map(|line| line.trim().to_string()).collect();
        (result, lines)
    }

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        AllowBackground(bool),
        RequestAlways,
        StartMonitoring(String),
        StopMonitoring(String),
        RequestState(String),
        StartRanging(String),
        StopRanging(String),
        StartUpdating,
        StopUpdating,
        InitAdvertiser,
        StartAdvertising(BeaconRegion, i8),
        StopAdvertising,
    }

    #[derive(Default)]
    struct FakePlatform {
        calls: Vec<Call>,
        advertiser: ManagerState,
    }

    impl BeaconPlatform for FakePlatform {
        fn set_allows_background_location_updates(&mut self, allow: bool) {
            self.calls.push(Call::AllowBackground(allow));
        }

        fn request_always_authorization(&mut self) {
            self.calls.push(Call::RequestAlways);
        }

        fn start_monitoring(&mut self, region: &BeaconRegion) {
            self.calls
                .push(Call::StartMonitoring(region.identifier().to_string()));
        }

        fn stop_monitoring(&mut self, region: &BeaconRegion) {
            self.calls
                .push(Call::StopMonitoring(region.identifier().to_string()));
        }

        fn request_state(&mut self, region: &BeaconRegion) {
            self.calls
                .push(Call::RequestState(region.identifier().to_string()));
        }

        fn start_ranging(&mut self, region: &BeaconRegion) {
            self.calls
                .push(Call::StartRanging(region.identifier().to_string()));
        }

        fn stop_ranging(&mut self, region: &BeaconRegion) {
            self.calls
                .push(Call::StopRanging(region.identifier().to_string()));
        }

        fn start_updating_location(&mut self) {
            self.calls.push(Call::StartUpdating);
        }

        fn stop_updating_location(&mut self) {
            self.calls.push(Call::StopUpdating);
        }

        fn init_advertiser(&mut self) {
            self.calls.push(Call::InitAdvertiser);
        }

        fn advertiser_state(&self) -> ManagerState {
            self.advertiser
        }

        fn start_advertising(&mut self, region: &BeaconRegion, measured_power: i8) {
            self.calls
                .push(Call::StartAdvertising(region.clone(), measured_power));
        }

        fn stop_advertising(&mut self) {
            self.calls.push(Call::StopAdvertising);
        }
    }

    const MONITOR: &str = "com.2cloz.AXT45";

    fn controller(mode: Mode) -> BeaconController<FakePlatform> {
        let config = DemoConfig {
            mode,
            ..Default::default()
        };
        BeaconController::new(config, FakePlatform::default())
    }

    fn broadcasting() -> BeaconController<FakePlatform> {
        let mut controller = controller(Mode::Broadcast);
        controller.platform.advertiser = ManagerState::PoweredOn;
        controller.toggle_broadcasting().unwrap();
        controller.platform.calls.clear();
        controller
    }

    fn monitor_region() -> Region {
        DemoConfig::default().monitor_region().into()
    }

    #[test]
    fn load_requests_authorization() {
        let mut controller = controller(Mode::Monitor);
        controller.load();
        assert_eq!(
            controller.platform().calls,
            [Call::AllowBackground(true), Call::RequestAlways]
        );
    }

    #[test]
    fn load_creates_the_advertiser_in_broadcast_mode() {
        let mut controller = controller(Mode::Broadcast);
        controller.load();
        assert_eq!(controller.platform().calls.last(), Some(&Call::InitAdvertiser));
    }

    #[test]
    fn load_can_start_monitoring() {
        let config = DemoConfig {
            start_immediately: true,
            ..Default::default()
        };
        let mut controller = BeaconController::new(config, FakePlatform::default());
        controller.load();

        assert!(controller.is_searching());
        assert_eq!(
            &controller.platform().calls[2..],
            [Call::StartMonitoring(MONITOR.into()), Call::StartUpdating]
        );
    }

    #[test]
    fn startup_broadcast_waits_for_power() {
        let config = DemoConfig {
            mode: Mode::Broadcast,
            start_immediately: true,
            ..Default::default()
        };
        let mut controller = BeaconController::new(config, FakePlatform::default());
        controller.load();
        assert!(!controller.is_broadcasting());

        controller.handle(BeaconEvent::AdvertiserStateChanged(ManagerState::PoweredOff));
        assert!(!controller.is_broadcasting());

        controller.platform.advertiser = ManagerState::PoweredOn;
        controller.handle(BeaconEvent::AdvertiserStateChanged(ManagerState::PoweredOn));
        assert!(controller.is_broadcasting());

        // Only the first power-on starts the broadcast.
        controller.press_button().unwrap();
        controller.handle(BeaconEvent::AdvertiserStateChanged(ManagerState::PoweredOn));
        assert!(!controller.is_broadcasting());
    }

    #[test]
    fn monitoring_toggle_round_trip() {
        let mut controller = controller(Mode::Monitor);

        controller.press_button().unwrap();
        assert!(controller.is_searching());
        assert_eq!(controller.button().title(), "Stop");
        assert_eq!(controller.button().color(), ButtonColor::DarkGray);
        assert_eq!(
            controller.platform().calls,
            [Call::StartMonitoring(MONITOR.into()), Call::StartUpdating]
        );

        controller.platform.calls.clear();
        controller.press_button().unwrap();
        assert!(!controller.is_searching());
        assert_eq!(controller.button().title(), "Start");
        assert_eq!(controller.button().color(), ButtonColor::Blue);
        assert_eq!(
            controller.platform().calls,
            [
                Call::StopMonitoring(MONITOR.into()),
                Call::StopRanging(MONITOR.into()),
                Call::StopUpdating
            ]
        );
    }

    #[test]
    fn broadcasting_is_refused_until_powered_on() {
        let mut controller = controller(Mode::Broadcast);
        controller.platform.advertiser = ManagerState::PoweredOff;

        let error = controller.press_button().unwrap_err();
        assert_eq!(error.kind(), ErrorKind::BluetoothUnavailable);
        assert!(!controller.is_broadcasting());
        assert_eq!(controller.button(), Button::idle());
        assert!(controller.platform().calls.is_empty());
    }

    #[test]
    fn broadcasting_advertises_the_configured_identity() {
        let mut controller = controller(Mode::Broadcast);
        controller.platform.advertiser = ManagerState::PoweredOn;

        controller.press_button().unwrap();
        assert!(controller.is_broadcasting());
        assert_eq!(controller.button(), Button::active());

        let [Call::StartAdvertising(region, power)] = &controller.platform().calls[..] else {
            panic!("unexpected calls: {:?}", controller.platform().calls);
        };
        assert_eq!(region.major(), Some(100));
        assert_eq!(region.minor(), Some(50));
        assert_eq!(region.identifier(), "com.2cloz.Elon");
        assert_eq!(region.uuid(), DemoConfig::default().uuid);
        assert_eq!(*power, -58);

        controller.platform.calls.clear();
        controller.press_button().unwrap();
        assert!(!controller.is_broadcasting());
        assert_eq!(controller.button(), Button::idle());
        assert_eq!(controller.platform().calls, [Call::StopAdvertising]);
    }

    #[test]
    fn powering_off_stops_the_broadcast() {
        let mut controller = broadcasting();

        controller.handle(BeaconEvent::AdvertiserStateChanged(ManagerState::PoweredOff));
        assert!(!controller.is_broadcasting());
        assert_eq!(controller.button(), Button::idle());
        assert_eq!(controller.platform().calls, [Call::StopAdvertising]);
    }

    #[test]
    fn other_state_changes_leave_the_broadcast_alone() {
        let mut controller = broadcasting();

        for state in [
            ManagerState::PoweredOn,
            ManagerState::Resetting,
            ManagerState::Unauthorized,
        ] {
            controller.handle(BeaconEvent::AdvertiserStateChanged(state));
        }
        assert!(controller.is_broadcasting());
        assert!(controller.platform().calls.is_empty());
    }

    #[test]
    fn powering_off_while_idle_changes_nothing() {
        let mut controller = controller(Mode::Broadcast);
        controller.handle(BeaconEvent::AdvertiserStateChanged(ManagerState::PoweredOff));
        assert!(controller.platform().calls.is_empty());
    }

    #[test]
    fn monitoring_start_requests_the_region_state() {
        let mut controller = controller(Mode::Monitor);

        controller.handle(BeaconEvent::MonitoringStarted(monitor_region()));
        controller.handle(BeaconEvent::MonitoringStarted(Region::Other {
            identifier: "geofence".into(),
        }));

        assert_eq!(
            controller.platform().calls,
            [Call::RequestState(MONITOR.into())]
        );
    }

    #[test]
    fn region_state_drives_ranging() {
        let mut controller = controller(Mode::Monitor);

        for state in [RegionState::Inside, RegionState::Outside, RegionState::Unknown] {
            controller.handle(BeaconEvent::RegionStateDetermined {
                state,
                region: monitor_region(),
            });
        }

        assert_eq!(
            controller.platform().calls,
            [
                Call::StartRanging(MONITOR.into()),
                Call::StopRanging(MONITOR.into()),
                Call::StopRanging(MONITOR.into())
            ]
        );
    }

    #[test]
    fn ranged_beacons_are_deduplicated() {
        let mut controller = controller(Mode::Monitor);
        let region = DemoConfig::default().monitor_region();
        let near = Beacon::new(100, 50, 0.7, Proximity::Near);
        let far = Beacon::new(100, 51, 4.2, Proximity::Far);

        controller.handle(BeaconEvent::BeaconsRanged {
            beacons: vec![near, far],
            region: region.clone(),
        });
        controller.handle(BeaconEvent::BeaconsRanged {
            beacons: vec![near],
            region: region.clone(),
        });
        controller.handle(BeaconEvent::BeaconsRanged {
            beacons: Vec::new(),
            region,
        });

        assert_eq!(controller.found_beacons().len(), 2);
        assert!(controller.found_beacons().contains(&near));
        assert!(controller.found_beacons().contains(&far));
    }

    #[test]
    fn failures_and_region_transitions_issue_no_calls() {
        let mut controller = controller(Mode::Monitor);
        let error = Error::from(ErrorKind::Location(LocationError::RangingUnavailable));

        controller.handle(BeaconEvent::RegionEntered(monitor_region()));
        controller.handle(BeaconEvent::RegionExited(monitor_region()));
        controller.handle(BeaconEvent::LocationFailed(error.clone()));
        controller.handle(BeaconEvent::MonitoringFailed {
            region: None,
            error: error.clone(),
        });
        controller.handle(BeaconEvent::RangingFailed {
            region: DemoConfig::default().monitor_region(),
            error: error.clone(),
        });
        controller.handle(BeaconEvent::AdvertisingStarted(Some(error)));
        controller.handle(BeaconEvent::AuthorizationChanged(AuthorizationStatus::Denied));

        assert!(controller.platform().calls.is_empty());
        assert!(!controller.is_searching());
    }

    #[test]
    fn status_messages() {
        assert_eq!(
            bluetooth_status_message(ManagerState::PoweredOn),
            "Bluetooth Status: Turned On"
        );
        assert_eq!(
            bluetooth_status_message(ManagerState::PoweredOff),
            "Bluetooth Status: Turned Off"
        );
        assert_eq!(
            bluetooth_status_message(ManagerState::Unauthorized),
            "Bluetooth Status: Not Authorized"
        );
        assert_eq!(
            bluetooth_status_message(ManagerState::Unsupported),
            "Bluetooth Status: Not Supported"
        );
        assert_eq!(
            bluetooth_status_message(ManagerState::Resetting),
            "Bluetooth Status: Resetting"
        );
        assert_eq!(
            bluetooth_status_message(ManagerState::Unknown),
            "Bluetooth Status: Unknown"
        );
    }

    #[test]
    fn stopping_monitoring_forgets_found_beacons() {
        let mut controller = controller(Mode::Monitor);
        controller.press_button().unwrap();
        controller.handle(BeaconEvent::BeaconsRanged {
            beacons: vec![Beacon::new(100, 50, 1.3, Proximity::Near)],
            region: DemoConfig::default().monitor_region(),
        });
        assert_eq!(controller.found_beacons().len(), 1);

        controller.press_button().unwrap();
        assert!(controller.found_beacons().is_empty());
    }

    #[test]
    fn region_transitions_are_logged() {
        let mut controller = controller(Mode::Monitor);

        let ((), entered) = console(|| {
            controller.handle(BeaconEvent::RegionEntered(monitor_region()))
        });
        assert_eq!(entered, [MONITOR, "Beacon in range"]);

        let ((), exited) = console(|| {
            controller.handle(BeaconEvent::RegionExited(monitor_region()))
        });
        assert_eq!(exited, ["No beacons in range"]);
    }

    #[test]
    fn ranged_beacons_are_logged_with_their_details() {
        let mut controller = controller(Mode::Monitor);
        let region = DemoConfig::default().monitor_region();

        let ((), lines) = console(|| {
            controller.handle(BeaconEvent::BeaconsRanged {
                beacons: vec![
                    Beacon::new(100, 50, 0.2, Proximity::Immediate),
                    Beacon::new(7, 9, -1.0, Proximity::Unknown),
                ],
                region: region.clone(),
            })
        });
        assert_eq!(
            lines,
            [
                MONITOR,
                "Beacon Details:",
                "Major = 100",
                "Minor = 50",
                "Distance: Very close",
                "Beacon Details:",
                "Major = 7",
                "Minor = 9",
                "Distance: Where's the beacon?",
            ]
        );

        let ((), empty) = console(|| {
            controller.handle(BeaconEvent::BeaconsRanged {
                beacons: Vec::new(),
                region,
            })
        });
        assert!(empty.is_empty(), "unexpected lines: {empty:?}");
    }

    #[test]
    fn monitoring_toggle_is_logged() {
        let mut controller = controller(Mode::Monitor);

        let (result, lines) = console(|| {
            controller.press_button()?;
            controller.press_button()
        });
        result.unwrap();
        assert_eq!(lines, ["monitoring beacons.....", "not monitoring beacons"]);
    }

    #[test]
    fn broadcasting_toggle_is_logged() {
        let mut controller = controller(Mode::Broadcast);
        controller.platform.advertiser = ManagerState::PoweredOn;

        let (result, lines) = console(|| {
            controller.press_button()?;
            controller.press_button()
        });
        result.unwrap();
        assert_eq!(lines, ["Broadcasting...", "Broadcasting stopped"]);
    }

    #[test]
    fn advertiser_states_are_logged() {
        let mut controller = controller(Mode::Broadcast);
        let states = [
            ManagerState::PoweredOn,
            ManagerState::Resetting,
            ManagerState::Unauthorized,
            ManagerState::Unsupported,
            ManagerState::Unknown,
            ManagerState::PoweredOff,
        ];

        let ((), lines) = console(|| {
            for state in states {
                controller.handle(BeaconEvent::AdvertiserStateChanged(state));
            }
        });
        assert_eq!(
            lines,
            [
                "Bluetooth Status: Turned On",
                "Bluetooth Status: Resetting",
                "Bluetooth Status: Not Authorized",
                "Bluetooth Status: Not Supported",
                "Bluetooth Status: Unknown",
                "Bluetooth Status: Turned Off",
            ]
        );
    }

    #[test]
    fn powering_off_logs_the_stop_before_the_status() {
        let mut controller = broadcasting();

        let ((), lines) = console(|| {
            controller.handle(BeaconEvent::AdvertiserStateChanged(ManagerState::PoweredOff))
        });
        assert_eq!(lines, ["Broadcasting stopped", "Bluetooth Status: Turned Off"]);
    }
}
