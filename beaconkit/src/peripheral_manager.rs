//! The peripheral manager, used here to advertise the device as a beacon.

use std::any::Any;

use dispatch2::DispatchQueue;
use objc2::rc::Retained;
use objc2::runtime::{AnyObject, ProtocolObject};
use objc2::{AnyThread, DefinedClass, MainThreadMarker, Message, define_class, msg_send};
use objc2_core_bluetooth::{
    CBManager, CBManagerAuthorization, CBPeripheralManager, CBPeripheralManagerDelegate,
    CBPeripheralManagerOptionShowPowerAlertKey,
};
use objc2_foundation::{
    NSError, NSMutableDictionary, NSNumber, NSObject, NSObjectProtocol, NSString,
};
use tracing::debug;

use crate::error::Error;
use crate::region::BeaconRegion;
use crate::state::ManagerState;

/// An object that advertises the device over Bluetooth LE.
///
/// See [`CBPeripheralManager`](https://developer.apple.com/documentation/corebluetooth/cbperipheralmanager).
#[derive(Clone)]
pub struct PeripheralManager {
    manager: Retained<CBPeripheralManager>,
    delegate: Retained<PeripheralManagerDelegateBridge>,
}

impl std::fmt::Debug for PeripheralManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PeripheralManager")
            .field("manager", &self.manager)
            .finish()
    }
}

impl PartialEq for PeripheralManager {
    fn eq(&self, other: &Self) -> bool {
        self.manager == other.manager
    }
}

impl Eq for PeripheralManager {}

impl std::hash::Hash for PeripheralManager {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.manager.hash(state);
    }
}

impl PeripheralManager {
    /// Returns the app's authorization to use Bluetooth.
    ///
    /// See [`[CBManager authorization]`](https://developer.apple.com/documentation/corebluetooth/cbmanager/authorization-swift.type.property).
    pub fn authorization() -> CBManagerAuthorization {
        unsafe { CBManager::authorization_class() }
    }

    /// Creates a new peripheral manager whose delegate is called on the main thread.
    pub fn main_thread(
        delegate: Box<dyn PeripheralManagerDelegate>,
        show_power_alert: bool,
        _mtm: MainThreadMarker,
    ) -> Self {
        let queue = DispatchQueue::main();
        Self::init(queue, delegate, show_power_alert)
    }

    pub(crate) fn new(manager: Retained<CBPeripheralManager>) -> Self {
        let delegate = unsafe { manager.delegate() }
            .and_then(|delegate| delegate.downcast().ok())
            .unwrap();

        PeripheralManager { manager, delegate }
    }

    fn init(
        queue: &DispatchQueue,
        delegate: Box<dyn PeripheralManagerDelegate>,
        show_power_alert: bool,
    ) -> Self {
        let delegate = PeripheralManagerDelegateBridge::new(delegate);

        let options: Retained<NSMutableDictionary<NSString, AnyObject>> =
            NSMutableDictionary::from_retained_objects(
                &[unsafe { CBPeripheralManagerOptionShowPowerAlertKey }],
                &[NSNumber::new_bool(show_power_alert).into()],
            );

        let manager = CBPeripheralManager::alloc();
        let manager = unsafe {
            CBPeripheralManager::initWithDelegate_queue_options(
                manager,
                Some(ProtocolObject::from_ref(&*delegate)),
                Some(queue),
                Some(&options),
            )
        };

        Self { manager, delegate }
    }

    /// Returns a reference to the delegate.
    pub fn delegate(&self) -> &dyn PeripheralManagerDelegate {
        &*self.delegate.ivars().delegate
    }

    /// The current state of the peripheral manager.
    ///
    /// See [`-[CBManager state]`](https://developer.apple.com/documentation/corebluetooth/cbmanager/state).
    pub fn state(&self) -> ManagerState {
        unsafe { self.manager.state() }.into()
    }

    /// Whether the peripheral manager is currently advertising.
    pub fn is_advertising(&self) -> bool {
        unsafe { self.manager.isAdvertising() }
    }

    /// Starts advertising `region` as an iBeacon.
    ///
    /// The advertisement payload is built by CoreLocation from the region and `measured_power`,
    /// the received signal strength in dBm at one meter. `None` uses the device's default
    /// calibration.
    ///
    /// See [`-[CLBeaconRegion peripheralDataWithMeasuredPower:]`](https://developer.apple.com/documentation/corelocation/clbeaconregion/peripheraldata(withmeasuredpower:))
    /// and [`-[CBPeripheralManager startAdvertising:]`](https://developer.apple.com/documentation/corebluetooth/cbperipheralmanager/startadvertising(_:)).
    #[allow(deprecated)]
    pub fn start_advertising_beacon(&self, region: &BeaconRegion, measured_power: Option<i8>) {
        debug!(
            region = region.identifier(),
            ?measured_power,
            "starting beacon advertisement"
        );

        let measured_power = measured_power.map(NSNumber::new_i8);
        let region = region.to_clbeaconregion();
        let data = unsafe { region.peripheralDataWithMeasuredPower(measured_power.as_deref()) };

        unsafe { self.manager.startAdvertising(Some(&data)) };
    }

    /// Stops advertising.
    ///
    /// See [`-[CBPeripheralManager stopAdvertising]`](https://developer.apple.com/documentation/corebluetooth/cbperipheralmanager/stopadvertising()).
    pub fn stop_advertising(&self) {
        unsafe { self.manager.stopAdvertising() };
    }
}

/// A protocol that provides updates for the state of a [`PeripheralManager`].
#[allow(unused_variables)]
pub trait PeripheralManagerDelegate: Any {
    /// This method is called when the peripheral manager's state is updated.
    ///
    /// See [`-[CBPeripheralManagerDelegate peripheralManagerDidUpdateState:]`](https://developer.apple.com/documentation/corebluetooth/cbperipheralmanagerdelegate/peripheralmanagerdidupdatestate(_:)).
    fn did_update_state(&self, manager: PeripheralManager);

    /// This method is called when advertising starts, or fails to start.
    ///
    /// See [`-[CBPeripheralManagerDelegate peripheralManagerDidStartAdvertising:error:]`](https://developer.apple.com/documentation/corebluetooth/cbperipheralmanagerdelegate/peripheralmanagerdidstartadvertising(_:error:)).
    fn did_start_advertising(&self, manager: PeripheralManager, error: Option<Error>) {}
}

struct PeripheralManagerDelegateIvars {
    delegate: Box<dyn PeripheralManagerDelegate>,
}

define_class!(
    #[unsafe(super(NSObject))]
    #[ivars = PeripheralManagerDelegateIvars]
    struct PeripheralManagerDelegateBridge;

    unsafe impl NSObjectProtocol for PeripheralManagerDelegateBridge {}

    #[allow(non_snake_case)]
    unsafe impl CBPeripheralManagerDelegate for PeripheralManagerDelegateBridge {
        #[unsafe(method(peripheralManagerDidUpdateState:))]
        fn peripheralManagerDidUpdateState(&self, peripheral: &CBPeripheralManager) {
            self.ivars()
                .delegate
                .did_update_state(PeripheralManager::new(peripheral.retain()));
        }

        #[unsafe(method(peripheralManagerDidStartAdvertising:error:))]
        fn peripheralManagerDidStartAdvertising_error(
            &self,
            peripheral: &CBPeripheralManager,
            error: Option<&NSError>,
        ) {
            self.ivars().delegate.did_start_advertising(
                PeripheralManager::new(peripheral.retain()),
                error.map(Error::from_nserror),
            );
        }
    }
);

impl PeripheralManagerDelegateBridge {
    pub fn new(delegate: Box<dyn PeripheralManagerDelegate>) -> Retained<Self> {
        let ivars = PeripheralManagerDelegateIvars { delegate };
        let this = PeripheralManagerDelegateBridge::alloc().set_ivars(ivars);
        unsafe { msg_send![super(this), init] }
    }
}
