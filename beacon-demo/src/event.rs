use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use beaconkit::{
    AuthorizationStatus, Beacon, BeaconRegion, Error, ManagerState, Region, RegionState,
};
use tracing::{debug, trace};

/// A framework callback, translated into a value the controller can handle.
#[derive(Debug, Clone)]
pub enum BeaconEvent {
    AdvertiserStateChanged(ManagerState),
    AdvertisingStarted(Option<Error>),
    AuthorizationChanged(AuthorizationStatus),
    LocationFailed(Error),
    MonitoringStarted(Region),
    RegionStateDetermined {
        state: RegionState,
        region: Region,
    },
    RegionEntered(Region),
    RegionExited(Region),
    MonitoringFailed {
        region: Option<Region>,
        error: Error,
    },
    BeaconsRanged {
        beacons: Vec<Beacon>,
        region: BeaconRegion,
    },
    RangingFailed {
        region: BeaconRegion,
        error: Error,
    },
}

pub trait EventHandler {
    fn handle(&mut self, event: BeaconEvent);
}

/// Delivers events to a handler that may be busy when they arrive.
///
/// Framework callbacks can fire while the handler is in the middle of a call, for example when
/// creating a manager synchronously reports its state. Events that cannot be delivered right away
/// are queued and delivered in order as soon as the handler is free: by the loop that is already
/// draining, or by the next call to [`drain`][Self::drain].
#[derive(Default)]
pub struct EventSink {
    target: RefCell<Option<Weak<RefCell<dyn EventHandler>>>>,
    pending: RefCell<VecDeque<BeaconEvent>>,
}

impl EventSink {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn attach(&self, handler: &Rc<RefCell<dyn EventHandler>>) {
        *self.target.borrow_mut() = Some(Rc::downgrade(handler));
        self.drain();
    }

    pub fn dispatch(&self, event: BeaconEvent) {
        trace!(?event, "dispatching event");
        self.pending.borrow_mut().push_back(event);
        self.drain();
    }

    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Delivers queued events until the queue is empty or the handler is busy.
    pub fn drain(&self) {
        let Some(target) = self.target.borrow().as_ref().and_then(Weak::upgrade) else {
            return;
        };

        let Ok(mut handler) = target.try_borrow_mut() else {
            debug!(pending = self.pending(), "handler busy, deferring events");
            return;
        };

        loop {
            let event = self.pending.borrow_mut().pop_front();
            match event {
                Some(event) => handler.handle(event),
                None => break,
            }
        }
    }
}
