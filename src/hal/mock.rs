//! In-memory collaborators for tests and dry runs.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::PinmuxError;
use crate::hal::{Direction, Edge, IdentitySource, Level, PinAccess, PinHandle};

/// Pin access backed by memory; every number has a handle unless restricted.
#[derive(Debug, Default)]
pub struct MemoryPins {
    only: Option<HashSet<u16>>,
    pins: Mutex<HashMap<u16, Arc<MemoryPin>>>,
}

impl MemoryPins {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only the listed numbers get a handle.
    pub fn only(numbers: impl IntoIterator<Item = u16>) -> Self {
        Self {
            only: Some(numbers.into_iter().collect()),
            pins: Mutex::default(),
        }
    }

    /// The handle for `number`, if one was ever handed out
    pub fn pin(&self, number: u16) -> Option<Arc<MemoryPin>> {
        self.pins().get(&number).cloned()
    }

    fn pins(&self) -> MutexGuard<'_, HashMap<u16, Arc<MemoryPin>>> {
        self.pins.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn get_or_create(&self, number: u16) -> Arc<MemoryPin> {
        self.pins()
            .entry(number)
            .or_insert_with(|| Arc::new(MemoryPin::new(number)))
            .clone()
    }
}

impl PinAccess for MemoryPins {
    fn handle(&self, number: u16) -> Option<Arc<dyn PinHandle>> {
        if let Some(only) = &self.only {
            if !only.contains(&number) {
                return None;
            }
        }
        Some(self.get_or_create(number))
    }
}

#[derive(Debug)]
struct MemoryPinState {
    input: Level,
    output: Level,
    direction: Direction,
    edge: Edge,
}

/// A pin whose levels, direction and edge live in memory
///
/// The external input level and the driven output level are kept apart, so a
/// read returns whichever one the current direction selects.
#[derive(Debug)]
pub struct MemoryPin {
    number: u16,
    state: Mutex<MemoryPinState>,
}

impl MemoryPin {
    pub fn new(number: u16) -> Self {
        Self {
            number,
            state: Mutex::new(MemoryPinState {
                input: Level::Low,
                output: Level::Low,
                direction: Direction::In,
                edge: Edge::None,
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, MemoryPinState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Drive the input level as an external signal would.
    pub fn set_input_level(&self, level: Level) {
        self.state().input = level;
    }

    pub fn direction(&self) -> Direction {
        self.state().direction
    }

    pub fn edge(&self) -> Edge {
        self.state().edge
    }
}

impl PinHandle for MemoryPin {
    fn number(&self) -> u16 {
        self.number
    }

    fn read(&self) -> Result<Level, PinmuxError> {
        let state = self.state();
        Ok(match state.direction {
            Direction::In => state.input,
            Direction::Out => state.output,
        })
    }

    fn write(&self, level: Level) -> Result<(), PinmuxError> {
        self.state().output = level;
        Ok(())
    }

    fn set_direction(&self, direction: Direction) -> Result<(), PinmuxError> {
        self.state().direction = direction;
        Ok(())
    }

    fn set_edge(&self, edge: Edge) -> Result<(), PinmuxError> {
        self.state().edge = edge;
        Ok(())
    }
}

/// Fixed identity strings
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity {
    pub model: Option<String>,
    pub compatible: Vec<String>,
}

impl StaticIdentity {
    pub fn new(model: Option<&str>, compatible: &[&str]) -> Self {
        Self {
            model: model.map(str::to_string),
            compatible: compatible.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl IdentitySource for StaticIdentity {
    fn model(&self) -> Option<String> {
        self.model.clone()
    }

    fn compatible(&self) -> Vec<String> {
        self.compatible.clone()
    }
}
