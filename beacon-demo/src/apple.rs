//! Runs the demo on top of CoreLocation and CoreBluetooth.

use std::cell::RefCell;
use std::error::Error;
use std::io::BufRead;
use std::rc::Rc;

use beaconkit::{
    Beacon, BeaconRegion, ErrorKind, LocationManager, LocationManagerDelegate, ManagerState,
    PeripheralManager, PeripheralManagerDelegate, Region, RegionState,
};
use dispatch2::DispatchQueue;
use objc2::MainThreadMarker;
use objc2_foundation::NSRunLoop;
use tracing::{debug, error, info, warn};

use crate::config::DemoConfig;
use crate::controller::BeaconController;
use crate::event::{BeaconEvent, EventHandler, EventSink};
use crate::platform::BeaconPlatform;

/// Forwards framework calls to a [`LocationManager`] and a lazily created [`PeripheralManager`].
pub struct AppleBackend {
    location: LocationManager,
    advertiser: Option<PeripheralManager>,
    sink: Rc<EventSink>,
    mtm: MainThreadMarker,
}

impl AppleBackend {
    pub fn main_thread(sink: Rc<EventSink>, mtm: MainThreadMarker) -> Self {
        let location = LocationManager::main_thread(Box::new(LocationEvents(sink.clone())), mtm);

        AppleBackend {
            location,
            advertiser: None,
            sink,
            mtm,
        }
    }
}

impl BeaconPlatform for AppleBackend {
    fn set_allows_background_location_updates(&mut self, allow: bool) {
        self.location.set_allows_background_location_updates(allow);
    }

    fn request_always_authorization(&mut self) {
        let status = self.location.authorization_status();
        debug!(%status, "requesting location authorization");
        self.location.request_always_authorization();
    }

    fn start_monitoring(&mut self, region: &BeaconRegion) {
        self.location.start_monitoring(region);
    }

    fn stop_monitoring(&mut self, region: &BeaconRegion) {
        self.location.stop_monitoring(region);
    }

    fn request_state(&mut self, region: &BeaconRegion) {
        self.location.request_state(region);
    }

    fn start_ranging(&mut self, region: &BeaconRegion) {
        self.location.start_ranging(region);
    }

    fn stop_ranging(&mut self, region: &BeaconRegion) {
        self.location.stop_ranging(region);
    }

    fn start_updating_location(&mut self) {
        self.location.start_updating_location();
    }

    fn stop_updating_location(&mut self) {
        self.location.stop_updating_location();
    }

    fn init_advertiser(&mut self) {
        if self.advertiser.is_some() {
            return;
        }

        let authorization = PeripheralManager::authorization();
        debug!(?authorization, "creating peripheral manager");
        let delegate = Box::new(AdvertiserEvents(self.sink.clone()));
        self.advertiser = Some(PeripheralManager::main_thread(delegate, true, self.mtm));
    }

    fn advertiser_state(&self) -> ManagerState {
        self.advertiser
            .as_ref()
            .map_or(ManagerState::Unknown, PeripheralManager::state)
    }

    fn start_advertising(&mut self, region: &BeaconRegion, measured_power: i8) {
        match &self.advertiser {
            Some(advertiser) => advertiser.start_advertising_beacon(region, Some(measured_power)),
            None => warn!("no peripheral manager to advertise with"),
        }
    }

    fn stop_advertising(&mut self) {
        if let Some(advertiser) = &self.advertiser {
            advertiser.stop_advertising();
        }
    }
}

struct LocationEvents(Rc<EventSink>);

impl LocationManagerDelegate for LocationEvents {
    fn did_change_authorization(&self, manager: LocationManager) {
        self.0
            .dispatch(BeaconEvent::AuthorizationChanged(manager.authorization_status()));
    }

    fn did_fail(&self, _manager: LocationManager, error: beaconkit::Error) {
        self.0.dispatch(BeaconEvent::LocationFailed(error));
    }

    fn did_start_monitoring(&self, _manager: LocationManager, region: Region) {
        self.0.dispatch(BeaconEvent::MonitoringStarted(region));
    }

    fn did_determine_state(&self, _manager: LocationManager, state: RegionState, region: Region) {
        self.0
            .dispatch(BeaconEvent::RegionStateDetermined { state, region });
    }

    fn did_enter_region(&self, _manager: LocationManager, region: Region) {
        self.0.dispatch(BeaconEvent::RegionEntered(region));
    }

    fn did_exit_region(&self, _manager: LocationManager, region: Region) {
        self.0.dispatch(BeaconEvent::RegionExited(region));
    }

    fn monitoring_did_fail(
        &self,
        _manager: LocationManager,
        region: Option<Region>,
        error: beaconkit::Error,
    ) {
        self.0
            .dispatch(BeaconEvent::MonitoringFailed { region, error });
    }

    fn did_range_beacons(
        &self,
        _manager: LocationManager,
        beacons: Vec<Beacon>,
        region: BeaconRegion,
    ) {
        self.0
            .dispatch(BeaconEvent::BeaconsRanged { beacons, region });
    }

    fn ranging_did_fail(
        &self,
        _manager: LocationManager,
        region: BeaconRegion,
        error: beaconkit::Error,
    ) {
        self.0.dispatch(BeaconEvent::RangingFailed { region, error });
    }
}

struct AdvertiserEvents(Rc<EventSink>);

impl PeripheralManagerDelegate for AdvertiserEvents {
    fn did_update_state(&self, manager: PeripheralManager) {
        self.0
            .dispatch(BeaconEvent::AdvertiserStateChanged(manager.state()));
    }

    fn did_start_advertising(&self, _manager: PeripheralManager, error: Option<beaconkit::Error>) {
        self.0.dispatch(BeaconEvent::AdvertisingStarted(error));
    }
}

struct App {
    controller: Rc<RefCell<BeaconController<AppleBackend>>>,
    sink: Rc<EventSink>,
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

fn press_button() {
    APP.with_borrow(|app| {
        let Some(app) = app else {
            return;
        };

        let result = app.controller.borrow_mut().press_button();
        app.sink.drain();

        if let Err(error) = result {
            error!("{error}");
        }
    });
}

/// Loads the demo and runs the main run loop. Each line read from stdin presses the button.
pub fn run(config: DemoConfig) -> Result<(), Box<dyn Error>> {
    let run_loop = unsafe { NSRunLoop::currentRunLoop() };
    let mtm = MainThreadMarker::new()
        .ok_or(beaconkit::Error::from(ErrorKind::MainThreadRequired))?;

    if !LocationManager::location_services_enabled() {
        warn!("location services are disabled");
    }
    if !LocationManager::is_monitoring_available() {
        warn!("beacon region monitoring is not available on this device");
    }
    if !LocationManager::is_ranging_available() {
        warn!("beacon ranging is not available on this device");
    }

    let sink = EventSink::new();
    let backend = AppleBackend::main_thread(sink.clone(), mtm);
    let controller = Rc::new(RefCell::new(BeaconController::new(config, backend)));
    let handler: Rc<RefCell<dyn EventHandler>> = controller.clone();
    sink.attach(&handler);

    controller.borrow_mut().load();
    sink.drain();

    info!(button = %controller.borrow().button(), "press Enter to toggle");
    APP.set(Some(App { controller, sink }));

    std::thread::spawn(|| {
        for line in std::io::stdin().lock().lines() {
            if let Err(error) = line {
                warn!("failed to read stdin: {error}");
                break;
            }
            DispatchQueue::main().exec_async(press_button);
        }
        debug!("stdin closed");
    });

    unsafe { run_loop.run() };

    Ok(())
}
