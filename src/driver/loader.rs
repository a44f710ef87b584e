//! Dependency-ordered driver loading.
//!
//! Drivers are grouped into stages with Kahn's algorithm: a stage holds every
//! driver whose dependencies all sit in earlier stages, in registration order.
//! Loading is single-threaded; each driver runs to completion before the next.

use std::collections::HashMap;

use serde::Serialize;

use crate::driver::{Driver, InitOutcome};
use crate::error::PinmuxError;
use crate::logging;
use crate::topology::SystemTopology;

/// Final state of one driver after loading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LoadState {
    Loaded,
    Skipped,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DriverSkip {
    pub driver: String,
    pub reason: String,
}

#[derive(Debug)]
pub struct DriverFailure {
    pub driver: String,
    pub error: PinmuxError,
}

/// Per-driver results of [`DriverLoader::load`]
#[derive(Debug, Default)]
pub struct LoadReport {
    pub loaded: Vec<String>,
    pub skipped: Vec<DriverSkip>,
    pub failed: Vec<DriverFailure>,
}

impl LoadReport {
    pub fn state(&self, driver: &str) -> Option<LoadState> {
        if self.loaded.iter().any(|d| d == driver) {
            Some(LoadState::Loaded)
        } else if self.skipped.iter().any(|s| s.driver == driver) {
            Some(LoadState::Skipped)
        } else if self.failed.iter().any(|f| f.driver == driver) {
            Some(LoadState::Failed)
        } else {
            None
        }
    }

    pub fn is_loaded(&self, driver: &str) -> bool {
        self.state(driver) == Some(LoadState::Loaded)
    }
}

#[derive(Default)]
pub struct DriverLoader {
    drivers: Vec<Box<dyn Driver>>,
}

impl DriverLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a driver; names must be unique.
    pub fn register(&mut self, driver: Box<dyn Driver>) -> Result<(), PinmuxError> {
        if self.drivers.iter().any(|d| d.name() == driver.name()) {
            return Err(PinmuxError::DuplicateDriver(driver.name().to_string()));
        }
        self.drivers.push(driver);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.drivers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drivers.is_empty()
    }

    /// Driver names grouped into load stages.
    ///
    /// Fails with `MissingDependency` for an unregistered prerequisite and
    /// with `DependencyCycle` when no order exists.
    pub fn plan(&self) -> Result<Vec<Vec<&str>>, PinmuxError> {
        Ok(self
            .stages()?
            .into_iter()
            .map(|stage| stage.into_iter().map(|i| self.drivers[i].name()).collect())
            .collect())
    }

    fn stages(&self) -> Result<Vec<Vec<usize>>, PinmuxError> {
        let index: HashMap<&str, usize> = self
            .drivers
            .iter()
            .enumerate()
            .map(|(i, d)| (d.name(), i))
            .collect();

        // dependents[a] lists drivers that must wait for a.
        let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); self.drivers.len()];
        let mut pending: Vec<usize> = vec![0; self.drivers.len()];
        for (i, driver) in self.drivers.iter().enumerate() {
            for &dep in driver.prerequisites() {
                let &d = index.get(dep).ok_or_else(|| PinmuxError::MissingDependency {
                    driver: driver.name().to_string(),
                    dependency: dep.to_string(),
                })?;
                dependents[d].push(i);
                pending[i] += 1;
            }
            for &dep in driver.runs_after() {
                match index.get(dep) {
                    Some(&d) => {
                        dependents[d].push(i);
                        pending[i] += 1;
                    }
                    None => logging::log_debug(&format!(
                        "{}: runs after unregistered driver {dep}, ignoring",
                        driver.name()
                    )),
                }
            }
        }

        let mut placed = vec![false; self.drivers.len()];
        let mut stages = Vec::new();
        let mut remaining = self.drivers.len();
        while remaining > 0 {
            let stage: Vec<usize> = (0..self.drivers.len())
                .filter(|&i| !placed[i] && pending[i] == 0)
                .collect();
            if stage.is_empty() {
                let drivers = (0..self.drivers.len())
                    .filter(|&i| !placed[i])
                    .map(|i| self.drivers[i].name().to_string())
                    .collect();
                return Err(PinmuxError::DependencyCycle { drivers });
            }
            for &i in &stage {
                placed[i] = true;
                for &dependent in &dependents[i] {
                    pending[dependent] -= 1;
                }
            }
            remaining -= stage.len();
            stages.push(stage);
        }
        Ok(stages)
    }

    /// Run every driver in dependency order.
    ///
    /// Ordering errors are returned before any driver runs. A driver that is
    /// not present or fails is recorded in the report and never stops its
    /// siblings; drivers whose prerequisites did not load are skipped.
    pub fn load(&self, topology: &mut SystemTopology) -> Result<LoadReport, PinmuxError> {
        let stages = self.stages()?;
        let mut report = LoadReport::default();

        for (n, stage) in stages.iter().enumerate() {
            logging::log_debug(&format!("driver stage {n}: {} drivers", stage.len()));
            for &i in stage {
                let driver = &self.drivers[i];
                let name = driver.name().to_string();

                if let Some(dep) = driver
                    .prerequisites()
                    .iter()
                    .find(|dep| !report.is_loaded(dep))
                {
                    let reason = format!("prerequisite {dep} not loaded");
                    logging::log_info(&format!("{name}: skipped, {reason}"));
                    report.skipped.push(DriverSkip { driver: name, reason });
                    continue;
                }

                #[cfg(feature = "tracing")]
                let _span = tracing::info_span!("driver_init", driver = %name).entered();

                match driver.init(topology) {
                    Ok(InitOutcome::Loaded) => {
                        logging::log_info(&format!("{name}: loaded"));
                        report.loaded.push(name);
                    }
                    Ok(InitOutcome::NotPresent(reason)) => {
                        logging::log_debug(&format!("{name}: not present, {reason}"));
                        report.skipped.push(DriverSkip { driver: name, reason });
                    }
                    Err(error) => {
                        logging::log_error(&format!("{name}: {error}"));
                        report.failed.push(DriverFailure { driver: name, error });
                    }
                }
            }
        }
        Ok(report)
    }
}
