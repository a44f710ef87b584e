//! # Pins
//!
//! A [`Pin`] is created once per family pool entry and populated at most once
//! per chip variant; consumers only ever read it. Capabilities are derived from
//! the populated function slots and cannot be set directly.

use std::fmt;
use std::sync::Arc;

use bitflags::bitflags;
use serde::Serialize;

use crate::chip::ChipVariant;
use crate::error::PinmuxError;
use crate::function_table::{FunctionLabel, FunctionSlot, FunctionSlots};
use crate::hal::{Direction, Edge, Level, PinHandle};

bitflags! {
    /// What a pin or fixed signal can be used for
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PinCapabilities: u8 {
        const DIGITAL_IO = 1 << 0;
        const ANALOG = 1 << 1;
        const EDGE_INTERRUPT = 1 << 2;
        const ALTERNATE_FUNCTIONS = 1 << 3;
    }
}

/// Chip-relative number and name of a pin, unique within a chip
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PinIdentity {
    number: u16,
    name: String,
}

impl PinIdentity {
    pub fn new(number: u16, name: impl Into<String>) -> Self {
        Self {
            number,
            name: name.into(),
        }
    }

    pub fn number(&self) -> u16 {
        self.number
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for PinIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.number)
    }
}

/// Anything that can sit at a header position
pub trait PinLike {
    fn name(&self) -> &str;

    fn capabilities(&self) -> PinCapabilities;

    fn is_gpio(&self) -> bool {
        self.capabilities().contains(PinCapabilities::DIGITAL_IO)
    }
}

/// State written by chip detection
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PopulatedState {
    pub variant: ChipVariant,
    pub slots: FunctionSlots,
    pub supports_edge: bool,
}

/// A chip GPIO pin
#[derive(Debug)]
pub struct Pin {
    identity: PinIdentity,
    state: Option<PopulatedState>,
    handle: Option<Arc<dyn PinHandle>>,
}

impl Pin {
    pub(crate) fn new(identity: PinIdentity) -> Self {
        Self {
            identity,
            state: None,
            handle: None,
        }
    }

    pub(crate) fn apply(&mut self, state: PopulatedState, handle: Option<Arc<dyn PinHandle>>) {
        self.state = Some(state);
        self.handle = handle;
    }

    /// Variant this pin was populated for
    pub fn variant(&self) -> Option<&ChipVariant> {
        self.state.as_ref().map(|s| &s.variant)
    }

    pub fn identity(&self) -> &PinIdentity {
        &self.identity
    }

    pub fn number(&self) -> u16 {
        self.identity.number
    }

    /// True only once the detected variant's function table listed this pin
    pub fn available(&self) -> bool {
        self.state.is_some()
    }

    pub fn function_slots(&self) -> Option<&FunctionSlots> {
        self.state.as_ref().map(|s| &s.slots)
    }

    pub fn function(&self, slot: FunctionSlot) -> Option<FunctionLabel> {
        self.function_slots().map(|slots| slots.get(slot))
    }

    pub fn supports_edge_interrupt(&self) -> bool {
        self.state.as_ref().is_some_and(|s| s.supports_edge)
    }

    pub fn has_handle(&self) -> bool {
        self.handle.is_some()
    }

    fn io_handle(&self) -> Result<&Arc<dyn PinHandle>, PinmuxError> {
        if !self.available() {
            return Err(PinmuxError::PinUnavailable(self.identity.name.clone()));
        }
        self.handle
            .as_ref()
            .ok_or_else(|| PinmuxError::NoHandle(self.identity.name.clone()))
    }

    /// Switch the pin between input and output without touching its level.
    pub fn set_direction(&self, direction: Direction) -> Result<(), PinmuxError> {
        self.io_handle()?.set_direction(direction)
    }

    /// Read the level in whatever direction the pin is configured.
    ///
    /// An output reads back the level it drives. Call
    /// `set_direction(Direction::In)` first to sample an external signal.
    pub fn read(&self) -> Result<Level, PinmuxError> {
        self.io_handle()?.read()
    }

    /// Configure as output and drive `level`.
    pub fn write(&self, level: Level) -> Result<(), PinmuxError> {
        let handle = self.io_handle()?;
        handle.set_direction(Direction::Out)?;
        handle.write(level)
    }

    /// Enable edge detection; `Edge::None` disables it on any available pin.
    pub fn set_edge(&self, edge: Edge) -> Result<(), PinmuxError> {
        let handle = self.io_handle()?;
        if edge != Edge::None && !self.supports_edge_interrupt() {
            return Err(PinmuxError::EdgeUnsupported(self.identity.name.clone()));
        }
        handle.set_direction(Direction::In)?;
        handle.set_edge(edge)
    }
}

impl PinLike for Pin {
    fn name(&self) -> &str {
        &self.identity.name
    }

    fn capabilities(&self) -> PinCapabilities {
        let Some(state) = &self.state else {
            return PinCapabilities::empty();
        };
        let mut caps = PinCapabilities::DIGITAL_IO;
        if state.supports_edge {
            caps |= PinCapabilities::EDGE_INTERRUPT;
        }
        if state.slots.has_alternate_functions() {
            caps |= PinCapabilities::ALTERNATE_FUNCTIONS;
        }
        caps
    }
}

impl fmt::Display for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.identity, f)
    }
}
