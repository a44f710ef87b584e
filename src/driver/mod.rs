//! # Driver Interface
//!
//! Chip and board detection modules implement [`Driver`] and are registered
//! with a [`DriverLoader`], which orders them by their declared dependencies
//! and runs each `init` once.
//!
//! - `prerequisites`: hard dependencies. They must be registered and must load
//!   successfully, otherwise this driver is skipped.
//! - `runs_after`: ordering only. Listed drivers that are registered are
//!   attempted first; their absence or failure does not affect this driver.

pub mod loader;

pub use loader::{DriverFailure, DriverLoader, DriverSkip, LoadReport, LoadState};

use crate::error::PinmuxError;
use crate::topology::SystemTopology;

/// Result of a driver's presence check and initialization
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    /// Hardware detected and registered
    Loaded,
    /// This driver does not apply to the running hardware; not an error
    NotPresent(String),
}

pub trait Driver {
    /// Unique name other drivers refer to
    fn name(&self) -> &str;

    fn prerequisites(&self) -> &[&str] {
        &[]
    }

    fn runs_after(&self) -> &[&str] {
        &[]
    }

    /// Detect the hardware and register what it provides.
    ///
    /// Return `NotPresent` when detection fails and `Err` only when the
    /// hardware was detected but could not be set up.
    fn init(&self, topology: &mut SystemTopology) -> Result<InitOutcome, PinmuxError>;
}
