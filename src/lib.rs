//! # pinmux-rs - GPIO Pin Multiplexing for Single-Board Computers
//!
//! The pinmux-rs crate models the GPIO pins of system-on-chip families and the
//! physical headers boards expose them on. Chip drivers detect the SoC and mark
//! which pins the variant bonds out, together with their alternate functions;
//! board drivers then bind header positions to those pins.
//!
//! ## Features
//!
//! - Static function tables for Allwinner H616/H618 and H3/H2+
//! - Chip-level pin registry with capability flags (edge interrupts, alternate functions)
//! - Board header registry with forward (position to pin) and reverse lookup
//! - Dependency-ordered driver loading with per-driver reporting
//! - Device-tree identity and sysfs GPIO access on Linux hosts, in-memory doubles for tests
//!
//! ## Usage
//!
//! ```toml
//! [dependencies]
//! pinmux-rs = "0.1.0"
//! ```
//!
//! ```rust,no_run
//! use pinmux_rs::{init_logger, load_host, HostConfig};
//!
//! init_logger();
//! let (topology, report) = load_host(&HostConfig::default())?;
//! for driver in &report.loaded {
//!     println!("loaded {driver}");
//! }
//! if let Some(pin) = topology.pin("PG15") {
//!     println!("{pin}: edge={}", pin.supports_edge_interrupt());
//! }
//! # Ok::<(), pinmux_rs::PinmuxError>(())
//! ```

pub mod chip;
pub mod config;
pub mod constants;
pub mod driver;
pub mod drivers;
pub mod error;
pub mod function_table;
pub mod hal;
pub mod header;
pub mod logging;
pub mod pin;
pub mod pin_registry;
pub mod topology;

pub use crate::error::PinmuxError;
pub use crate::logging::{init_logger, log_info};

// Chip model
pub use chip::{ChipFamily, ChipVariant};
pub use function_table::{FunctionLabel, FunctionSlot, FunctionSlots, FunctionTable};
pub use pin::{Pin, PinCapabilities, PinIdentity, PinLike};
pub use pin_registry::{PinRegistry, PopulateReport};

// Board model
pub use header::{Binding, BoardPin, Connector, HeaderPosition, HeaderRegistry, HeaderSlot, Signal};
pub use topology::{HeaderTarget, SystemTopology};

// Drivers
pub use driver::{Driver, DriverLoader, InitOutcome, LoadReport, LoadState};
pub use drivers::{default_loader, AllwinnerGpio, OrangePi, OrangePiBoard};

pub use config::{HostConfig, HostConfigBuilder};
pub use hal::{Direction, Edge, Level};

/// Build the host topology for `config` and run the built-in drivers.
///
/// # Returns
/// * `Ok((SystemTopology, LoadReport))` - Populated topology and per-driver results
/// * `Err(PinmuxError)` - Invalid chip override, or the drivers could not be ordered
pub fn load_host(config: &HostConfig) -> Result<(SystemTopology, LoadReport), PinmuxError> {
    let loader = default_loader(config)?;
    let mut topology = SystemTopology::from_config(config);
    let report = loader.load(&mut topology)?;
    Ok((topology, report))
}
