//! # System Topology
//!
//! Owner of the chip pin registry, the board header registry and the host
//! collaborators. Drivers receive `&mut SystemTopology` while loading; once
//! loading is done it can be shared read-only across threads.

use crate::chip::{ChipFamily, ChipVariant};
use crate::config::HostConfig;
use crate::error::PinmuxError;
use crate::hal::{DeviceTree, IdentitySource, PinAccess, SysfsGpio};
use crate::header::{Binding, BoardPin, Connector, HeaderPosition, HeaderRegistry, Signal};
use crate::pin::Pin;
use crate::pin_registry::{PinRegistry, PopulateReport};

/// A header position resolved against the pin registry
#[derive(Debug, Clone, Copy)]
pub enum HeaderTarget<'a> {
    Gpio(&'a Pin),
    Signal(Signal),
}

pub struct SystemTopology {
    pins: PinRegistry,
    headers: HeaderRegistry,
    identity: Box<dyn IdentitySource>,
    access: Box<dyn PinAccess>,
}

impl SystemTopology {
    pub fn new(
        family: ChipFamily,
        identity: Box<dyn IdentitySource>,
        access: Box<dyn PinAccess>,
    ) -> Self {
        Self {
            pins: PinRegistry::new(family),
            headers: HeaderRegistry::new(),
            identity,
            access,
        }
    }

    /// Allwinner topology backed by the device tree and sysfs paths of `config`.
    pub fn from_config(config: &HostConfig) -> Self {
        Self::new(
            ChipFamily::Allwinner,
            Box::new(DeviceTree::new(&config.device_tree_root)),
            Box::new(SysfsGpio::new(&config.sysfs_gpio_root)),
        )
    }

    pub fn pins(&self) -> &PinRegistry {
        &self.pins
    }

    pub fn headers(&self) -> &HeaderRegistry {
        &self.headers
    }

    pub fn identity(&self) -> &dyn IdentitySource {
        self.identity.as_ref()
    }

    /// Populate the pin registry for `variant` using this topology's pin access.
    pub fn populate(&mut self, variant: &ChipVariant) -> Result<PopulateReport, PinmuxError> {
        self.pins.populate(variant, self.access.as_ref())
    }

    /// Register a connector against the populated pins.
    pub fn register_header<R: AsRef<[BoardPin]>>(
        &mut self,
        connector: &str,
        rows: &[R],
    ) -> Result<(), PinmuxError> {
        self.headers.register(connector, rows, &self.pins)
    }

    /// Validate a connector layout without registering it.
    pub(crate) fn build_header<R: AsRef<[BoardPin]>>(
        &self,
        connector: &str,
        rows: &[R],
    ) -> Result<Connector, PinmuxError> {
        self.headers.build(connector, rows, &self.pins)
    }

    /// Register every connector of a board, or none.
    pub(crate) fn commit_headers(&mut self, batch: Vec<Connector>) -> Result<(), PinmuxError> {
        self.headers.commit(batch)
    }

    pub fn pin(&self, name: &str) -> Option<&Pin> {
        self.pins.by_name(name)
    }

    pub fn pin_by_number(&self, number: u16) -> Option<&Pin> {
        self.pins.by_number(number)
    }

    pub fn header_pin(&self, connector: &str, position: usize) -> Option<HeaderTarget<'_>> {
        let slot = self.headers.slot(connector, position)?;
        match &slot.binding {
            Binding::Gpio(identity) => self
                .pins
                .by_number(identity.number())
                .map(HeaderTarget::Gpio),
            Binding::Signal(signal) => Some(HeaderTarget::Signal(*signal)),
        }
    }

    /// Header positions wired to the pin called `name`
    pub fn positions_of(&self, name: &str) -> &[HeaderPosition] {
        match self.pins.by_name(name) {
            Some(pin) => self.headers.positions_of(pin.identity()),
            None => &[],
        }
    }
}

impl std::fmt::Debug for SystemTopology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemTopology")
            .field("family", &self.pins.family())
            .field("variant", &self.pins.variant())
            .field("connectors", &self.headers.connectors().count())
            .finish()
    }
}
