//! Allwinner chip-level GPIO driver.
//!
//! Detects the SoC from the device-tree `compatible` list and populates the
//! pin registry with its function table. Board drivers that bind headers to
//! Allwinner pins list this driver in `runs_after`.

use crate::chip::{ChipFamily, ChipVariant};
use crate::constants::ALLWINNER_GPIO_DRIVER;
use crate::driver::{Driver, InitOutcome};
use crate::error::PinmuxError;
use crate::logging;
use crate::topology::SystemTopology;

#[derive(Debug, Default)]
pub struct AllwinnerGpio {
    chip_override: Option<ChipVariant>,
}

impl AllwinnerGpio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `variant` instead of reading the device tree.
    pub fn with_chip(variant: ChipVariant) -> Self {
        Self {
            chip_override: Some(variant),
        }
    }

    fn detect(&self, topology: &SystemTopology) -> Result<Option<ChipVariant>, PinmuxError> {
        if let Some(variant) = &self.chip_override {
            return Ok(Some(variant.clone()));
        }
        let socs: Vec<String> = topology
            .identity()
            .compatible()
            .into_iter()
            .filter(|entry| entry.starts_with("allwinner,"))
            .collect();
        if socs.is_empty() {
            return Ok(None);
        }
        socs.iter()
            .find_map(|entry| ChipVariant::from_compatible(entry))
            .map(Some)
            .ok_or_else(|| PinmuxError::ChipNotSupported(socs.join(", ")))
    }
}

impl Driver for AllwinnerGpio {
    fn name(&self) -> &str {
        ALLWINNER_GPIO_DRIVER
    }

    fn init(&self, topology: &mut SystemTopology) -> Result<InitOutcome, PinmuxError> {
        if topology.pins().family() != ChipFamily::Allwinner {
            return Ok(InitOutcome::NotPresent(
                "pin registry is not an Allwinner pool".to_string(),
            ));
        }
        let Some(variant) = self.detect(topology)? else {
            return Ok(InitOutcome::NotPresent(
                "no allwinner SoC in device-tree compatible".to_string(),
            ));
        };
        logging::log_info(&format!("{ALLWINNER_GPIO_DRIVER}: detected {variant}"));
        topology.populate(&variant)?;
        Ok(InitOutcome::Loaded)
    }
}
