//! # Host Configuration
//!
//! Where the host collaborators find the device tree and the GPIO class, and
//! an optional chip override for hosts whose device tree lacks a usable
//! `compatible` entry.
//!
//! ```rust,no_run
//! use pinmux_rs::config::HostConfig;
//!
//! let config = HostConfig::builder()
//!     .device_tree_root("/tmp/dt")
//!     .chip("H616")
//!     .build();
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::chip::ChipVariant;
use crate::constants::{DEFAULT_DEVICE_TREE_ROOT, DEFAULT_SYSFS_GPIO_ROOT};
use crate::error::PinmuxError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    pub device_tree_root: PathBuf,
    pub sysfs_gpio_root: PathBuf,
    /// Skip SoC detection and populate this variant, e.g. `"H616"`
    pub chip: Option<String>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            device_tree_root: PathBuf::from(DEFAULT_DEVICE_TREE_ROOT),
            sysfs_gpio_root: PathBuf::from(DEFAULT_SYSFS_GPIO_ROOT),
            chip: None,
        }
    }
}

impl HostConfig {
    pub fn builder() -> HostConfigBuilder {
        HostConfigBuilder::new()
    }

    /// Load from a JSON file; absent keys keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, PinmuxError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        serde_json::from_str(&text)
            .map_err(|e| PinmuxError::Config(format!("{}: {e}", path.display())))
    }

    /// Parsed chip override
    pub fn chip_override(&self) -> Result<Option<ChipVariant>, PinmuxError> {
        self.chip.as_deref().map(str::parse::<ChipVariant>).transpose()
    }
}

/// Builder for [`HostConfig`]
#[derive(Debug, Default)]
pub struct HostConfigBuilder {
    config: HostConfig,
}

impl HostConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn device_tree_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.config.device_tree_root = root.into();
        self
    }

    pub fn sysfs_gpio_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.config.sysfs_gpio_root = root.into();
        self
    }

    pub fn chip(mut self, chip: impl Into<String>) -> Self {
        self.config.chip = Some(chip.into());
        self
    }

    pub fn build(self) -> HostConfig {
        self.config
    }
}
