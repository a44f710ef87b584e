//! Chip and board drivers shipped with the crate.

pub mod allwinner;
pub mod orangepi;

pub use allwinner::AllwinnerGpio;
pub use orangepi::{OrangePi, OrangePiBoard};

use crate::config::HostConfig;
use crate::driver::DriverLoader;
use crate::error::PinmuxError;

/// Loader with every built-in driver registered.
///
/// A chip override in `config` replaces device-tree SoC detection.
pub fn default_loader(config: &HostConfig) -> Result<DriverLoader, PinmuxError> {
    let chip = match config.chip_override()? {
        Some(variant) => AllwinnerGpio::with_chip(variant),
        None => AllwinnerGpio::new(),
    };
    let mut loader = DriverLoader::new();
    loader.register(Box::new(chip))?;
    loader.register(Box::new(OrangePi::new()))?;
    Ok(loader)
}
