//! # Chip-Level Pin Registry
//!
//! Holds every pin a chip family could expose and marks the ones the detected
//! variant actually bonds out. Population happens once during driver loading;
//! afterwards the registry is only read.

use std::collections::HashMap;

use serde::Serialize;

use crate::chip::{ChipFamily, ChipVariant};
use crate::error::PinmuxError;
use crate::function_table::FunctionTable;
use crate::hal::PinAccess;
use crate::logging;
use crate::pin::{Pin, PopulatedState};

/// Summary of one `populate` call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PopulateReport {
    pub variant: ChipVariant,
    pub available: usize,
    pub edge_capable: usize,
    /// Pins the OS exposed no handle for
    pub without_handle: Vec<String>,
}

#[derive(Debug)]
pub struct PinRegistry {
    family: ChipFamily,
    pins: Vec<Pin>,
    by_name: HashMap<String, usize>,
    by_number: HashMap<u16, usize>,
    variant: Option<ChipVariant>,
}

impl PinRegistry {
    /// Pre-allocate the full pin pool of `family`, all unavailable.
    pub fn new(family: ChipFamily) -> Self {
        let pins: Vec<Pin> = family.pin_pool().into_iter().map(Pin::new).collect();
        let by_name = pins
            .iter()
            .enumerate()
            .map(|(i, pin)| (pin.identity().name().to_string(), i))
            .collect();
        let by_number = pins
            .iter()
            .enumerate()
            .map(|(i, pin)| (pin.number(), i))
            .collect();
        Self {
            family,
            pins,
            by_name,
            by_number,
            variant: None,
        }
    }

    pub fn allwinner() -> Self {
        Self::new(ChipFamily::Allwinner)
    }

    pub fn family(&self) -> ChipFamily {
        self.family
    }

    /// Variant the registry was populated for, if any
    pub fn variant(&self) -> Option<&ChipVariant> {
        self.variant.as_ref()
    }

    /// Apply the function table of `variant` and bind OS handles.
    ///
    /// Repeating the call for the same variant re-applies identical state.
    /// Switching to another variant is refused and leaves the registry as is.
    pub fn populate(
        &mut self,
        variant: &ChipVariant,
        access: &dyn PinAccess,
    ) -> Result<PopulateReport, PinmuxError> {
        if variant.family != self.family {
            return Err(PinmuxError::ChipNotSupported(format!(
                "{variant} on a {} pin registry",
                self.family
            )));
        }
        let table = FunctionTable::for_variant(variant)?;
        if let Some(current) = &self.variant {
            if current != variant {
                return Err(PinmuxError::UnsupportedTransition {
                    current: current.to_string(),
                    requested: variant.to_string(),
                });
            }
        }

        // Resolve every index before touching a pin so a bad table cannot
        // leave the registry half populated.
        let mut targets = Vec::with_capacity(table.len());
        for (name, slots) in table.iter() {
            let index = *self.by_name.get(name).ok_or_else(|| {
                PinmuxError::ChipNotSupported(format!(
                    "{variant}: pin {name} is outside the {} pin pool",
                    self.family
                ))
            })?;
            targets.push((index, *slots));
        }

        let tag = self.family.interrupt_tag();
        let mut report = PopulateReport {
            variant: variant.clone(),
            available: 0,
            edge_capable: 0,
            without_handle: Vec::new(),
        };
        for (index, slots) in targets {
            let pin = &mut self.pins[index];
            let supports_edge = slots.supports_edge(tag);
            let handle = access.handle(pin.number());
            if handle.is_none() {
                logging::log_debug(&format!("{pin}: no OS handle"));
                report.without_handle.push(pin.identity().name().to_string());
            }
            pin.apply(
                PopulatedState {
                    variant: variant.clone(),
                    slots,
                    supports_edge,
                },
                handle,
            );
            report.available += 1;
            if supports_edge {
                report.edge_capable += 1;
            }
        }

        self.variant = Some(variant.clone());
        logging::log_info(&format!(
            "{variant}: {} pins available, {} with edge interrupts",
            report.available, report.edge_capable
        ));
        Ok(report)
    }

    pub fn by_name(&self, name: &str) -> Option<&Pin> {
        self.by_name.get(name).map(|&i| &self.pins[i])
    }

    pub fn by_number(&self, number: u16) -> Option<&Pin> {
        self.by_number.get(&number).map(|&i| &self.pins[i])
    }

    /// Pool pins in numbering order
    pub fn iter(&self) -> impl Iterator<Item = &Pin> {
        self.pins.iter()
    }

    /// Pins populated for the detected variant
    pub fn available(&self) -> impl Iterator<Item = &Pin> {
        self.pins.iter().filter(|pin| pin.available())
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function_table::FunctionSlot;
    use crate::hal::MemoryPins;

    #[test]
    fn test_populate_h616() {
        let mut registry = PinRegistry::allwinner();
        let report = registry
            .populate(&ChipVariant::h616(), &MemoryPins::new())
            .unwrap();
        assert_eq!(report.available, 74);
        // Only PL0 and PL1 lack an interrupt function.
        assert_eq!(report.edge_capable, 72);
        assert!(report.without_handle.is_empty());

        let pg15 = registry.by_name("PG15").unwrap();
        assert!(pg15.available());
        assert!(pg15.supports_edge_interrupt());
        assert_eq!(pg15.number(), 207);
        assert_eq!(
            pg15.function(FunctionSlot::Alt5).map(|l| l.as_str()),
            Some("TWI4_SCK")
        );

        assert!(!registry.by_name("PA0").unwrap().available());
        assert!(!registry.by_name("PL0").unwrap().supports_edge_interrupt());
    }

    #[test]
    fn test_lookup_by_number() {
        let registry = PinRegistry::allwinner();
        assert_eq!(registry.by_number(207).unwrap().identity().name(), "PG15");
        assert!(registry.by_number(9999).is_none());
        assert!(registry.by_name("PZ1").is_none());
    }

    #[test]
    fn test_unsupported_variant() {
        let mut registry = PinRegistry::allwinner();
        let err = registry
            .populate(&ChipVariant::new(ChipFamily::Allwinner, "A64"), &MemoryPins::new())
            .unwrap_err();
        assert!(matches!(err, PinmuxError::ChipNotSupported(_)));
        assert!(registry.variant().is_none());
        assert_eq!(registry.available().count(), 0);
    }

    #[test]
    fn test_unsupported_variant_after_populate() {
        let mut registry = PinRegistry::allwinner();
        let access = MemoryPins::new();
        registry.populate(&ChipVariant::h616(), &access).unwrap();
        let err = registry
            .populate(&ChipVariant::new(ChipFamily::Allwinner, "A64"), &access)
            .unwrap_err();
        assert!(matches!(err, PinmuxError::ChipNotSupported(_)));
        assert_eq!(registry.variant(), Some(&ChipVariant::h616()));
        assert!(registry.by_name("PG15").unwrap().available());
    }

    #[test]
    fn test_variant_switch_refused() {
        let mut registry = PinRegistry::allwinner();
        let access = MemoryPins::new();
        registry.populate(&ChipVariant::h616(), &access).unwrap();
        let err = registry.populate(&ChipVariant::h3(), &access).unwrap_err();
        assert!(matches!(err, PinmuxError::UnsupportedTransition { .. }));
        // H3-only pins stay unavailable.
        assert!(!registry.by_name("PA0").unwrap().available());
        assert_eq!(registry.variant(), Some(&ChipVariant::h616()));
    }

    #[test]
    fn test_missing_os_handles() {
        let mut registry = PinRegistry::allwinner();
        let report = registry
            .populate(&ChipVariant::h616(), &MemoryPins::only([207]))
            .unwrap();
        assert_eq!(report.without_handle.len(), 73);
        assert!(registry.by_name("PG15").unwrap().has_handle());
        assert!(!registry.by_name("PG16").unwrap().has_handle());
        assert!(registry.by_name("PG16").unwrap().available());
    }

    #[test]
    fn test_every_table_fits_pool() {
        for variant in FunctionTable::supported_variants() {
            let mut registry = PinRegistry::allwinner();
            assert!(registry.populate(&variant, &MemoryPins::new()).is_ok(), "{variant}");
        }
    }
}
