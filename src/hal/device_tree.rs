//! Device-tree identity reader.
//!
//! The kernel exposes the flattened device tree under `/proc/device-tree`.
//! String properties are NUL terminated and string lists are NUL separated.

use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_DEVICE_TREE_ROOT, UNKNOWN_MODEL};
use crate::hal::IdentitySource;
use crate::logging;

#[derive(Debug, Clone)]
pub struct DeviceTree {
    root: PathBuf,
}

impl DeviceTree {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn read_property(&self, name: &str) -> Option<Vec<u8>> {
        let path = self.root.join(name);
        match fs::read(&path) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                logging::log_debug(&format!("device tree: cannot read {}: {e}", path.display()));
                None
            }
        }
    }
}

impl Default for DeviceTree {
    fn default() -> Self {
        Self::new(DEFAULT_DEVICE_TREE_ROOT)
    }
}

impl IdentitySource for DeviceTree {
    fn model(&self) -> Option<String> {
        let raw = self.read_property("model")?;
        let model = String::from_utf8_lossy(&raw)
            .trim_end_matches('\0')
            .trim()
            .to_string();
        if model.is_empty() || model == UNKNOWN_MODEL {
            None
        } else {
            Some(model)
        }
    }

    fn compatible(&self) -> Vec<String> {
        self.read_property("compatible")
            .map(|raw| {
                raw.split(|&b| b == 0)
                    .filter(|entry| !entry.is_empty())
                    .map(|entry| String::from_utf8_lossy(entry).trim().to_string())
                    .collect()
            })
            .unwrap_or_default()
    }
}
