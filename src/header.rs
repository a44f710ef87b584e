//! # Board Header Registry
//!
//! Binds the positions of a named physical connector to chip pins or fixed
//! signals. Registration is all-or-nothing per connector: every row is
//! validated before anything is recorded, so a rejected connector leaves no
//! trace. Boards with several connectors build each one first and commit them
//! as one batch.
//!
//! Positions are 1-based and row-major, matching the silkscreen numbering of
//! dual-row headers (`row * width + column + 1`).

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::Serialize;

use crate::error::PinmuxError;
use crate::logging;
use crate::pin::{PinCapabilities, PinIdentity, PinLike};
use crate::pin_registry::PinRegistry;

/// Non-GPIO signal wired to a header position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Signal {
    V3_3,
    V5,
    /// Unregulated input rail
    DcIn,
    Ground,
    /// No connect, or a function this crate does not model (USB, TV out)
    Invalid,
    /// Analog pad of the SoC, e.g. `HP_LEFT`
    Analog(&'static str),
}

impl Signal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::V3_3 => "3.3V",
            Signal::V5 => "5V",
            Signal::DcIn => "DC_IN",
            Signal::Ground => "GROUND",
            Signal::Invalid => "INVALID",
            Signal::Analog(name) => *name,
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PinLike for Signal {
    fn name(&self) -> &str {
        self.as_str()
    }

    fn capabilities(&self) -> PinCapabilities {
        match self {
            Signal::Analog(_) => PinCapabilities::ANALOG,
            _ => PinCapabilities::empty(),
        }
    }
}

/// One element of a header row in a board description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardPin {
    /// Chip pin by name, e.g. `PI8`
    Gpio(&'static str),
    Signal(Signal),
}

/// What a registered position is bound to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Binding {
    Gpio(PinIdentity),
    Signal(Signal),
}

/// Connector name and 1-based position
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct HeaderPosition {
    pub connector: String,
    pub position: usize,
}

impl fmt::Display for HeaderPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.connector, self.position)
    }
}

/// One position of a connector and what is wired to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderSlot {
    pub connector: String,
    pub position: usize,
    pub binding: Binding,
}

impl HeaderSlot {
    pub fn gpio(&self) -> Option<&PinIdentity> {
        match &self.binding {
            Binding::Gpio(identity) => Some(identity),
            Binding::Signal(_) => None,
        }
    }
}

/// A registered connector
#[derive(Debug, Clone, Serialize)]
pub struct Connector {
    name: String,
    width: usize,
    slots: Vec<HeaderSlot>,
}

impl Connector {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pins per row
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slot(&self, position: usize) -> Option<&HeaderSlot> {
        position.checked_sub(1).and_then(|i| self.slots.get(i))
    }

    pub fn slots(&self) -> &[HeaderSlot] {
        &self.slots
    }

    pub fn rows(&self) -> impl Iterator<Item = &[HeaderSlot]> {
        self.slots.chunks(self.width)
    }
}

#[derive(Debug, Default)]
pub struct HeaderRegistry {
    connectors: Vec<Connector>,
    index: HashMap<String, usize>,
    reverse: HashMap<u16, Vec<HeaderPosition>>,
}

impl HeaderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `connector` from its physical rows.
    ///
    /// Every GPIO reference must be available in `pins` and appear at most
    /// once; the connector name must be new.
    pub fn register<R: AsRef<[BoardPin]>>(
        &mut self,
        connector: &str,
        rows: &[R],
        pins: &PinRegistry,
    ) -> Result<(), PinmuxError> {
        let built = self.build(connector, rows, pins)?;
        self.commit(vec![built])
    }

    /// Validate a layout into a connector without registering it.
    pub(crate) fn build<R: AsRef<[BoardPin]>>(
        &self,
        connector: &str,
        rows: &[R],
        pins: &PinRegistry,
    ) -> Result<Connector, PinmuxError> {
        let layout_err = |reason: String| PinmuxError::InvalidLayout {
            connector: connector.to_string(),
            reason,
        };
        if connector.is_empty() {
            return Err(layout_err("empty connector name".to_string()));
        }
        let width = rows.first().map_or(0, |row| row.as_ref().len());
        if width == 0 {
            return Err(layout_err("no pins".to_string()));
        }
        if let Some((i, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.as_ref().len() != width)
        {
            return Err(layout_err(format!(
                "row {} has {} pins, expected {width}",
                i + 1,
                row.as_ref().len()
            )));
        }
        if self.index.contains_key(connector) {
            return Err(PinmuxError::ConnectorAlreadyRegistered(connector.to_string()));
        }

        let mut slots = Vec::with_capacity(rows.len() * width);
        let mut seen: HashMap<u16, usize> = HashMap::new();
        for (position, board_pin) in rows
            .iter()
            .flat_map(|row| row.as_ref().iter())
            .enumerate()
            .map(|(i, p)| (i + 1, p))
        {
            let binding = match *board_pin {
                BoardPin::Signal(signal) => Binding::Signal(signal),
                BoardPin::Gpio(name) => {
                    let pin = pins.by_name(name).filter(|p| p.available()).ok_or_else(|| {
                        PinmuxError::UnknownPin {
                            connector: connector.to_string(),
                            position,
                            pin: name.to_string(),
                        }
                    })?;
                    if let Some(first) = seen.insert(pin.number(), position) {
                        return Err(PinmuxError::DuplicateBinding {
                            connector: connector.to_string(),
                            pin: name.to_string(),
                            first,
                            second: position,
                        });
                    }
                    Binding::Gpio(pin.identity().clone())
                }
            };
            slots.push(HeaderSlot {
                connector: connector.to_string(),
                position,
                binding,
            });
        }

        Ok(Connector {
            name: connector.to_string(),
            width,
            slots,
        })
    }

    /// Register built connectors together, or none of them.
    ///
    /// Names are checked again here, against the registry and within the
    /// batch, because connectors built separately may collide.
    pub(crate) fn commit(&mut self, batch: Vec<Connector>) -> Result<(), PinmuxError> {
        let mut names = HashSet::new();
        for connector in &batch {
            if self.index.contains_key(&connector.name) || !names.insert(connector.name.as_str()) {
                return Err(PinmuxError::ConnectorAlreadyRegistered(connector.name.clone()));
            }
        }

        for connector in batch {
            let mut gpio = 0;
            for slot in &connector.slots {
                if let Some(identity) = slot.gpio() {
                    gpio += 1;
                    self.reverse
                        .entry(identity.number())
                        .or_default()
                        .push(HeaderPosition {
                            connector: connector.name.clone(),
                            position: slot.position,
                        });
                }
            }
            logging::log_debug(&format!(
                "header {}: {} positions, {gpio} gpio",
                connector.name,
                connector.slots.len()
            ));
            self.index.insert(connector.name.clone(), self.connectors.len());
            self.connectors.push(connector);
        }
        Ok(())
    }

    pub fn connector(&self, name: &str) -> Option<&Connector> {
        self.index.get(name).map(|&i| &self.connectors[i])
    }

    /// Connectors in registration order
    pub fn connectors(&self) -> impl Iterator<Item = &Connector> {
        self.connectors.iter()
    }

    pub fn slot(&self, connector: &str, position: usize) -> Option<&HeaderSlot> {
        self.connector(connector)?.slot(position)
    }

    /// Every header position `pin` is wired to
    pub fn positions_of(&self, pin: &PinIdentity) -> &[HeaderPosition] {
        self.reverse
            .get(&pin.number())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.connectors.is_empty()
    }
}
