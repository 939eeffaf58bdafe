//! The location manager, which monitors and ranges beacon regions.

use std::any::Any;

use objc2::rc::Retained;
use objc2::runtime::ProtocolObject;
use objc2::{AnyThread, ClassType, DefinedClass, MainThreadMarker, Message, define_class, msg_send};
use objc2_core_location::{
    CLBeacon, CLBeaconRegion, CLLocationManager, CLLocationManagerDelegate, CLRegion,
    CLRegionState,
};
use objc2_foundation::{NSArray, NSError, NSObject, NSObjectProtocol};

use crate::beacon::Beacon;
use crate::error::Error;
use crate::region::{BeaconRegion, Region};
use crate::state::{AuthorizationStatus, RegionState};

/// An object that monitors beacon regions and ranges the beacons inside them.
///
/// All methods that take a [`BeaconRegion`] build a fresh `CLBeaconRegion` from it. CoreLocation
/// identifies monitored regions by their identifier and ranged regions by their identity, so the
/// same `BeaconRegion` value always refers to the same registration.
#[derive(Clone)]
pub struct LocationManager {
    manager: Retained<CLLocationManager>,
    delegate: Retained<LocationManagerDelegateBridge>,
}

impl std::fmt::Debug for LocationManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocationManager")
            .field("manager", &self.manager)
            .finish()
    }
}

impl PartialEq for LocationManager {
    fn eq(&self, other: &Self) -> bool {
        self.manager == other.manager
    }
}

impl Eq for LocationManager {}

#[allow(deprecated)]
impl LocationManager {
    /// Whether location services are enabled on the device.
    pub fn location_services_enabled() -> bool {
        unsafe { CLLocationManager::locationServicesEnabled_class() }
    }

    /// Whether the device supports monitoring beacon regions.
    pub fn is_monitoring_available() -> bool {
        unsafe { CLLocationManager::isMonitoringAvailableForClass(CLBeaconRegion::class()) }
    }

    /// Whether the device supports ranging beacons.
    pub fn is_ranging_available() -> bool {
        unsafe { CLLocationManager::isRangingAvailable() }
    }

    /// Creates a new location manager whose delegate is called on the main thread.
    ///
    /// CoreLocation delivers delegate callbacks on the run loop of the thread that created the
    /// manager.
    pub fn main_thread(delegate: Box<dyn LocationManagerDelegate>, _mtm: MainThreadMarker) -> Self {
        let delegate = LocationManagerDelegateBridge::new(delegate);
        let manager = unsafe { CLLocationManager::new() };
        unsafe { manager.setDelegate(Some(ProtocolObject::from_ref(&*delegate))) };

        LocationManager { manager, delegate }
    }

    pub(crate) fn new(manager: Retained<CLLocationManager>) -> Self {
        let delegate = unsafe { manager.delegate() }
            .and_then(|delegate| delegate.downcast().ok())
            .unwrap();

        LocationManager { manager, delegate }
    }

    /// Returns a reference to the delegate.
    pub fn delegate(&self) -> &dyn LocationManagerDelegate {
        &*self.delegate.ivars().delegate
    }

    /// The app's current authorization to use location services.
    pub fn authorization_status(&self) -> AuthorizationStatus {
        unsafe { self.manager.authorizationStatus() }.into()
    }

    /// Asks the user for permission to use location services at any time.
    ///
    /// See [`-[CLLocationManager requestAlwaysAuthorization]`](https://developer.apple.com/documentation/corelocation/cllocationmanager/requestalwaysauthorization()).
    pub fn request_always_authorization(&self) {
        unsafe { self.manager.requestAlwaysAuthorization() };
    }

    /// Whether the app keeps receiving location updates while suspended.
    pub fn set_allows_background_location_updates(&self, allow: bool) {
        unsafe { self.manager.setAllowsBackgroundLocationUpdates(allow) };
    }

    pub fn start_updating_location(&self) {
        unsafe { self.manager.startUpdatingLocation() };
    }

    pub fn stop_updating_location(&self) {
        unsafe { self.manager.stopUpdatingLocation() };
    }

    /// Starts monitoring entry into and exit from `region`.
    ///
    /// See [`-[CLLocationManager startMonitoringForRegion:]`](https://developer.apple.com/documentation/corelocation/cllocationmanager/startmonitoring(for:)).
    pub fn start_monitoring(&self, region: &BeaconRegion) {
        let region = region.to_clbeaconregion();
        unsafe { self.manager.startMonitoringForRegion(&region) };
    }

    /// Stops monitoring `region`.
    pub fn stop_monitoring(&self, region: &BeaconRegion) {
        let region = region.to_clbeaconregion();
        unsafe { self.manager.stopMonitoringForRegion(&region) };
    }

    /// Asks for the current state of `region`. The answer arrives through
    /// [`LocationManagerDelegate::did_determine_state`].
    pub fn request_state(&self, region: &BeaconRegion) {
        let region = region.to_clbeaconregion();
        unsafe { self.manager.requestStateForRegion(&region) };
    }

    /// Starts delivering ranging updates for the beacons in `region`.
    ///
    /// See [`-[CLLocationManager startRangingBeaconsInRegion:]`](https://developer.apple.com/documentation/corelocation/cllocationmanager/startrangingbeacons(in:)).
    pub fn start_ranging(&self, region: &BeaconRegion) {
        let region = region.to_clbeaconregion();
        unsafe { self.manager.startRangingBeaconsInRegion(&region) };
    }

    /// Stops ranging the beacons in `region`.
    pub fn stop_ranging(&self, region: &BeaconRegion) {
        let region = region.to_clbeaconregion();
        unsafe { self.manager.stopRangingBeaconsInRegion(&region) };
    }
}

/// A protocol that receives region monitoring and beacon ranging events from a
/// [`LocationManager`].
#[allow(unused_variables)]
pub trait LocationManagerDelegate: Any {
    /// See [`-[CLLocationManagerDelegate locationManagerDidChangeAuthorization:]`](https://developer.apple.com/documentation/corelocation/cllocationmanagerdelegate/locationmanagerdidchangeauthorization(_:)).
    fn did_change_authorization(&self, manager: LocationManager) {}

    /// See [`-[CLLocationManagerDelegate locationManager:didFailWithError:]`](https://developer.apple.com/documentation/corelocation/cllocationmanagerdelegate/locationmanager(_:didfailwitherror:)).
    fn did_fail(&self, manager: LocationManager, error: Error) {}

    /// See [`-[CLLocationManagerDelegate locationManager:didStartMonitoringForRegion:]`](https://developer.apple.com/documentation/corelocation/cllocationmanagerdelegate/locationmanager(_:didstartmonitoringfor:)).
    fn did_start_monitoring(&self, manager: LocationManager, region: Region) {}

    /// See [`-[CLLocationManagerDelegate locationManager:didDetermineState:forRegion:]`](https://developer.apple.com/documentation/corelocation/cllocationmanagerdelegate/locationmanager(_:diddeterminestate:for:)).
    fn did_determine_state(&self, manager: LocationManager, state: RegionState, region: Region) {}

    /// See [`-[CLLocationManagerDelegate locationManager:didEnterRegion:]`](https://developer.apple.com/documentation/corelocation/cllocationmanagerdelegate/locationmanager(_:didenterregion:)).
    fn did_enter_region(&self, manager: LocationManager, region: Region) {}

    /// See [`-[CLLocationManagerDelegate locationManager:didExitRegion:]`](https://developer.apple.com/documentation/corelocation/cllocationmanagerdelegate/locationmanager(_:didexitregion:)).
    fn did_exit_region(&self, manager: LocationManager, region: Region) {}

    /// `region` is `None` when CoreLocation could not attribute the failure to a region.
    ///
    /// See [`-[CLLocationManagerDelegate locationManager:monitoringDidFailForRegion:withError:]`](https://developer.apple.com/documentation/corelocation/cllocationmanagerdelegate/locationmanager(_:monitoringdidfailfor:witherror:)).
    fn monitoring_did_fail(
        &self,
        manager: LocationManager,
        region: Option<Region>,
        error: Error,
    ) {
    }

    /// See [`-[CLLocationManagerDelegate locationManager:didRangeBeacons:inRegion:]`](https://developer.apple.com/documentation/corelocation/cllocationmanagerdelegate/locationmanager(_:didrangebeacons:in:)).
    fn did_range_beacons(
        &self,
        manager: LocationManager,
        beacons: Vec<Beacon>,
        region: BeaconRegion,
    ) {
    }

    /// See [`-[CLLocationManagerDelegate locationManager:rangingBeaconsDidFailForRegion:withError:]`](https://developer.apple.com/documentation/corelocation/cllocationmanagerdelegate/locationmanager(_:rangingbeaconsdidfailfor:witherror:)).
    fn ranging_did_fail(&self, manager: LocationManager, region: BeaconRegion, error: Error) {}
}

struct LocationManagerDelegateIvars {
    delegate: Box<dyn LocationManagerDelegate>,
}

define_class!(
    #[unsafe(super(NSObject))]
    #[ivars = LocationManagerDelegateIvars]
    struct LocationManagerDelegateBridge;

    unsafe impl NSObjectProtocol for LocationManagerDelegateBridge {}

    #[allow(non_snake_case)]
    unsafe impl CLLocationManagerDelegate for LocationManagerDelegateBridge {
        #[unsafe(method(locationManagerDidChangeAuthorization:))]
        fn locationManagerDidChangeAuthorization(&self, manager: &CLLocationManager) {
            self.ivars()
                .delegate
                .did_change_authorization(LocationManager::new(manager.retain()));
        }

        #[unsafe(method(locationManager:didFailWithError:))]
        fn locationManager_didFailWithError(&self, manager: &CLLocationManager, error: &NSError) {
            self.ivars().delegate.did_fail(
                LocationManager::new(manager.retain()),
                Error::from_nserror(error),
            );
        }

        #[unsafe(method(locationManager:didStartMonitoringForRegion:))]
        fn locationManager_didStartMonitoringForRegion(
            &self,
            manager: &CLLocationManager,
            region: &CLRegion,
        ) {
            self.ivars().delegate.did_start_monitoring(
                LocationManager::new(manager.retain()),
                Region::from_clregion(region),
            );
        }

        #[unsafe(method(locationManager:didDetermineState:forRegion:))]
        fn locationManager_didDetermineState_forRegion(
            &self,
            manager: &CLLocationManager,
            state: CLRegionState,
            region: &CLRegion,
        ) {
            self.ivars().delegate.did_determine_state(
                LocationManager::new(manager.retain()),
                state.into(),
                Region::from_clregion(region),
            );
        }

        #[unsafe(method(locationManager:didEnterRegion:))]
        fn locationManager_didEnterRegion(&self, manager: &CLLocationManager, region: &CLRegion) {
            self.ivars().delegate.did_enter_region(
                LocationManager::new(manager.retain()),
                Region::from_clregion(region),
            );
        }

        #[unsafe(method(locationManager:didExitRegion:))]
        fn locationManager_didExitRegion(&self, manager: &CLLocationManager, region: &CLRegion) {
            self.ivars().delegate.did_exit_region(
                LocationManager::new(manager.retain()),
                Region::from_clregion(region),
            );
        }

        #[unsafe(method(locationManager:monitoringDidFailForRegion:withError:))]
        fn locationManager_monitoringDidFailForRegion_withError(
            &self,
            manager: &CLLocationManager,
            region: Option<&CLRegion>,
            error: &NSError,
        ) {
            self.ivars().delegate.monitoring_did_fail(
                LocationManager::new(manager.retain()),
                region.map(Region::from_clregion),
                Error::from_nserror(error),
            );
        }

        #[unsafe(method(locationManager:didRangeBeacons:inRegion:))]
        fn locationManager_didRangeBeacons_inRegion(
            &self,
            manager: &CLLocationManager,
            beacons: &NSArray<CLBeacon>,
            region: &CLBeaconRegion,
        ) {
            let beacons = beacons
                .iter()
                .map(|beacon| Beacon::from_clbeacon(&beacon))
                .collect();

            self.ivars().delegate.did_range_beacons(
                LocationManager::new(manager.retain()),
                beacons,
                BeaconRegion::from_clbeaconregion(region),
            );
        }

        #[unsafe(method(locationManager:rangingBeaconsDidFailForRegion:withError:))]
        fn locationManager_rangingBeaconsDidFailForRegion_withError(
            &self,
            manager: &CLLocationManager,
            region: &CLBeaconRegion,
            error: &NSError,
        ) {
            self.ivars().delegate.ranging_did_fail(
                LocationManager::new(manager.retain()),
                BeaconRegion::from_clbeaconregion(region),
                Error::from_nserror(error),
            );
        }
    }
);

impl LocationManagerDelegateBridge {
    pub fn new(delegate: Box<dyn LocationManagerDelegate>) -> Retained<Self> {
        let ivars = LocationManagerDelegateIvars { delegate };
        let this = LocationManagerDelegateBridge::alloc().set_ivars(ivars);
        unsafe { msg_send![super(this), init] }
    }
}
