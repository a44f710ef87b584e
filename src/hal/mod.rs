//! # Host Collaborators
//!
//! Traits for what the pin multiplexer needs from the operating system, with
//! one host implementation each:
//!
//! - [`PinAccess`] / [`PinHandle`]: per-number pin handles ([`SysfsGpio`])
//! - [`IdentitySource`]: board model and SoC compatible strings ([`DeviceTree`])
//!
//! [`mock`] provides in-memory implementations for tests and dry runs.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::error::PinmuxError;

pub mod device_tree;
pub mod mock;
pub mod sysfs;

pub use device_tree::DeviceTree;
pub use mock::{MemoryPin, MemoryPins, StaticIdentity};
pub use sysfs::{SysfsGpio, SysfsPin};

/// Logic level of a digital pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Level {
    Low,
    High,
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

/// Pin direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Direction {
    In,
    Out,
}

/// Edge detection mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Edge {
    None,
    Rising,
    Falling,
    Both,
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Edge::None => "none",
            Edge::Rising => "rising",
            Edge::Falling => "falling",
            Edge::Both => "both",
        })
    }
}

/// Lower-level OS object driving one pin
pub trait PinHandle: fmt::Debug + Send + Sync {
    /// Chip-relative number the handle was opened for
    fn number(&self) -> u16;

    fn read(&self) -> Result<Level, PinmuxError>;

    fn write(&self, level: Level) -> Result<(), PinmuxError>;

    fn set_direction(&self, direction: Direction) -> Result<(), PinmuxError>;

    fn set_edge(&self, edge: Edge) -> Result<(), PinmuxError>;
}

/// Lookup of OS pin handles by chip-relative number
pub trait PinAccess: Send + Sync {
    /// `None` when the OS does not expose the pin.
    fn handle(&self, number: u16) -> Option<Arc<dyn PinHandle>>;
}

/// Board and SoC identity as published by firmware
pub trait IdentitySource: Send + Sync {
    /// Board model string, `None` when it cannot be read
    fn model(&self) -> Option<String>;

    /// Compatible strings, most specific first
    fn compatible(&self) -> Vec<String>;
}
