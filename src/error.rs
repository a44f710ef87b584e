//! # Pin Multiplexer Error Handling
//!
//! This module defines the PinmuxError enum, which represents the different error
//! types that can occur while populating chip pins, registering board headers and
//! loading drivers.

use thiserror::Error;

/// Represents the different error types that can occur in the pinmux crate.
#[derive(Debug, Error)]
pub enum PinmuxError {
    /// No function table exists for the requested chip variant.
    #[error("Chip not supported: {0}")]
    ChipNotSupported(String),

    /// The pin exists but was not populated for the detected chip variant.
    #[error("Pin {0} is not available on this chip variant")]
    PinUnavailable(String),

    /// A header references a pin that is unknown or unavailable.
    #[error("Unknown pin {pin} at {connector}-{position}")]
    UnknownPin {
        connector: String,
        position: usize,
        pin: String,
    },

    /// The same chip pin appears at two positions of one connector.
    #[error("Pin {pin} bound twice on {connector}: positions {first} and {second}")]
    DuplicateBinding {
        connector: String,
        pin: String,
        first: usize,
        second: usize,
    },

    /// The connector name was already registered.
    #[error("Connector {0} already registered")]
    ConnectorAlreadyRegistered(String),

    /// Header rows are empty or of uneven width.
    #[error("Invalid layout for connector {connector}: {reason}")]
    InvalidLayout { connector: String, reason: String },

    /// The board was detected but its identity string could not be read.
    #[error("{driver}: failed to obtain board identity")]
    IdentityUnavailable { driver: String },

    /// The driver dependency graph contains a cycle.
    #[error("Dependency cycle between drivers: {}", .drivers.join(", "))]
    DependencyCycle { drivers: Vec<String> },

    /// A driver lists a prerequisite that was never registered.
    #[error("Driver {driver} requires unregistered driver {dependency}")]
    MissingDependency { driver: String, dependency: String },

    /// Two drivers were registered under the same name.
    #[error("Driver {0} already registered")]
    DuplicateDriver(String),

    /// Populating a registry that already holds another variant.
    #[error("Pin registry already populated for {current}, refusing {requested}")]
    UnsupportedTransition { current: String, requested: String },

    /// Edge detection requested on a pin without an interrupt function.
    #[error("Pin {0} does not support edge interrupts")]
    EdgeUnsupported(String),

    /// The OS did not provide a handle for an available pin.
    #[error("No OS handle for pin {0}")]
    NoHandle(String),

    /// Malformed host configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Indicates an error from the underlying OS pin or identity access.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
