//! Sysfs GPIO handles (`/sys/class/gpio`).
//!
//! A pin is exported on first use by writing its number to `export`; the
//! kernel then creates `gpioN/` with `direction`, `value` and `edge` files.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::constants::DEFAULT_SYSFS_GPIO_ROOT;
use crate::error::PinmuxError;
use crate::hal::{Direction, Edge, Level, PinAccess, PinHandle};

/// Pin access through the sysfs GPIO class
#[derive(Debug, Clone)]
pub struct SysfsGpio {
    root: PathBuf,
}

impl SysfsGpio {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Default for SysfsGpio {
    fn default() -> Self {
        Self::new(DEFAULT_SYSFS_GPIO_ROOT)
    }
}

impl PinAccess for SysfsGpio {
    fn handle(&self, number: u16) -> Option<Arc<dyn PinHandle>> {
        if !self.root.is_dir() {
            return None;
        }
        Some(Arc::new(SysfsPin {
            root: self.root.clone(),
            number,
        }))
    }
}

/// One sysfs GPIO
#[derive(Debug)]
pub struct SysfsPin {
    root: PathBuf,
    number: u16,
}

impl SysfsPin {
    fn pin_dir(&self) -> PathBuf {
        self.root.join(format!("gpio{}", self.number))
    }

    fn ensure_exported(&self) -> Result<PathBuf, PinmuxError> {
        let dir = self.pin_dir();
        if !dir.is_dir() {
            fs::write(self.root.join("export"), self.number.to_string())?;
            if !dir.is_dir() {
                return Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("export of gpio{} did not create {}", self.number, dir.display()),
                )
                .into());
            }
        }
        Ok(dir)
    }

    fn write_attr(&self, attr: &str, value: &str) -> Result<(), PinmuxError> {
        let dir = self.ensure_exported()?;
        fs::write(dir.join(attr), value)?;
        Ok(())
    }
}

impl PinHandle for SysfsPin {
    fn number(&self) -> u16 {
        self.number
    }

    fn read(&self) -> Result<Level, PinmuxError> {
        let dir = self.ensure_exported()?;
        let raw = fs::read_to_string(dir.join("value"))?;
        match raw.trim() {
            "0" => Ok(Level::Low),
            "1" => Ok(Level::High),
            other => Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("gpio{}: unexpected value {other:?}", self.number),
            )
            .into()),
        }
    }

    fn write(&self, level: Level) -> Result<(), PinmuxError> {
        let value = match level {
            Level::Low => "0",
            Level::High => "1",
        };
        self.write_attr("value", value)
    }

    fn set_direction(&self, direction: Direction) -> Result<(), PinmuxError> {
        let value = match direction {
            Direction::In => "in",
            Direction::Out => "out",
        };
        self.write_attr("direction", value)
    }

    fn set_edge(&self, edge: Edge) -> Result<(), PinmuxError> {
        self.write_attr("edge", &edge.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exported(number: u16) -> (tempfile::TempDir, Arc<dyn PinHandle>) {
        let dir = tempfile::tempdir().unwrap();
        let pin_dir = dir.path().join(format!("gpio{number}"));
        fs::create_dir(&pin_dir).unwrap();
        fs::write(pin_dir.join("value"), "0\n").unwrap();
        let handle = SysfsGpio::new(dir.path()).handle(number).unwrap();
        (dir, handle)
    }

    #[test]
    fn test_write_then_read() {
        let (dir, handle) = exported(207);
        handle.set_direction(Direction::Out).unwrap();
        handle.write(Level::High).unwrap();
        assert_eq!(handle.read().unwrap(), Level::High);
        let direction = fs::read_to_string(dir.path().join("gpio207/direction")).unwrap();
        assert_eq!(direction, "out");
    }

    #[test]
    fn test_edge_attr() {
        let (dir, handle) = exported(12);
        handle.set_edge(Edge::Both).unwrap();
        let edge = fs::read_to_string(dir.path().join("gpio12/edge")).unwrap();
        assert_eq!(edge, "both");
    }

    #[test]
    fn test_garbage_value() {
        let (dir, handle) = exported(3);
        fs::write(dir.path().join("gpio3/value"), "x").unwrap();
        assert!(matches!(handle.read(), Err(PinmuxError::Io(_))));
    }

    #[test]
    fn test_export_without_kernel() {
        let dir = tempfile::tempdir().unwrap();
        let handle = SysfsGpio::new(dir.path()).handle(5).unwrap();
        // Nothing creates gpio5/ in a plain directory.
        assert!(handle.read().is_err());
        assert_eq!(fs::read_to_string(dir.path().join("export")).unwrap(), "5");
    }

    #[test]
    fn test_no_sysfs_root() {
        let dir = tempfile::tempdir().unwrap();
        assert!(SysfsGpio::new(dir.path().join("missing")).handle(1).is_none());
    }
}
