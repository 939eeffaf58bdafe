use beaconkit::{BeaconRegion, ManagerState};

/// The framework calls the controller makes.
///
/// The Apple implementation forwards each call to CoreLocation or CoreBluetooth. Results come
/// back asynchronously as [`BeaconEvent`][crate::BeaconEvent]s.
pub trait BeaconPlatform {
    fn set_allows_background_location_updates(&mut self, allow: bool);

    fn request_always_authorization(&mut self);

    fn start_monitoring(&mut self, region: &BeaconRegion);

    fn stop_monitoring(&mut self, region: &BeaconRegion);

    fn request_state(&mut self, region: &BeaconRegion);

    fn start_ranging(&mut self, region: &BeaconRegion);

    fn stop_ranging(&mut self, region: &BeaconRegion);

    fn start_updating_location(&mut self);

    fn stop_updating_location(&mut self);

    /// Creates the peripheral manager used for advertising, if it does not exist yet. Its power
    /// state is reported through [`BeaconEvent::AdvertiserStateChanged`][crate::BeaconEvent].
    fn init_advertiser(&mut self);

    /// The power state of the advertiser, or [`ManagerState::Unknown`] before
    /// [`init_advertiser`][Self::init_advertiser] is called.
    fn advertiser_state(&self) -> ManagerState;

    fn start_advertising(&mut self, region: &BeaconRegion, measured_power: i8);

    fn stop_advertising(&mut self);
}
