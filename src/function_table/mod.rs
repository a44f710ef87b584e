//! # Alternate Function Tables
//!
//! Static per-variant mapping from pin name to the alternate hardware functions
//! the pin can be multiplexed to. Input and output are available on every pin
//! and are not listed.
//!
//! Slots are addressed by role ([`FunctionSlot`]) rather than by raw index so a
//! family with a different slot layout cannot be silently misindexed.

mod h3;
mod h616;

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::chip::{ChipFamily, ChipVariant};
use crate::error::PinmuxError;

/// Number of alternate-function slots per pin in the Allwinner family
pub const SLOT_COUNT: usize = 5;

/// Raw table row as written in the per-chip data modules
pub(crate) type RawEntry = (&'static str, [&'static str; SLOT_COUNT]);

/// Role of an alternate-function slot.
///
/// Allwinner pin controllers select a function with a mux value: 0 and 1 are
/// input and output, 2 to 5 peripheral functions, 6 the external interrupt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum FunctionSlot {
    Alt2,
    Alt3,
    Alt4,
    Alt5,
    Interrupt,
}

impl FunctionSlot {
    /// All slots in table order
    pub const ALL: [FunctionSlot; SLOT_COUNT] = [
        FunctionSlot::Alt2,
        FunctionSlot::Alt3,
        FunctionSlot::Alt4,
        FunctionSlot::Alt5,
        FunctionSlot::Interrupt,
    ];

    /// The slot whose label decides edge-interrupt support
    pub const INTERRUPT: FunctionSlot = FunctionSlot::Interrupt;

    /// Position of the slot in a table row
    pub fn index(self) -> usize {
        match self {
            FunctionSlot::Alt2 => 0,
            FunctionSlot::Alt3 => 1,
            FunctionSlot::Alt4 => 2,
            FunctionSlot::Alt5 => 3,
            FunctionSlot::Interrupt => 4,
        }
    }

    /// Value written to the pin controller's config register to select it
    pub fn mux_value(self) -> u8 {
        self.index() as u8 + 2
    }
}

impl fmt::Display for FunctionSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FunctionSlot::Interrupt => f.write_str("eint"),
            other => write!(f, "alt{}", other.mux_value()),
        }
    }
}

/// Function name held by a slot; empty means not wired on this variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct FunctionLabel(&'static str);

impl FunctionLabel {
    pub const UNASSIGNED: FunctionLabel = FunctionLabel("");

    pub const fn new(label: &'static str) -> Self {
        Self(label)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }

    pub fn is_unassigned(&self) -> bool {
        self.0.is_empty()
    }

    /// Some pads carry two signal names joined by `/`, e.g.
    /// `RGMII_RXD1/RMII_RXD1`; this matches either of them.
    pub fn names(&self, function: &str) -> bool {
        !self.is_unassigned() && self.0.split('/').any(|name| name == function)
    }
}

impl fmt::Display for FunctionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// The alternate functions of one pin, addressed by role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FunctionSlots([FunctionLabel; SLOT_COUNT]);

impl FunctionSlots {
    pub const fn new(labels: [FunctionLabel; SLOT_COUNT]) -> Self {
        Self(labels)
    }

    pub(crate) fn from_raw(raw: [&'static str; SLOT_COUNT]) -> Self {
        Self(raw.map(FunctionLabel::new))
    }

    pub fn get(&self, slot: FunctionSlot) -> FunctionLabel {
        self.0[slot.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (FunctionSlot, FunctionLabel)> + '_ {
        FunctionSlot::ALL.iter().map(move |&slot| (slot, self.get(slot)))
    }

    /// Slots holding a function, skipping unassigned ones
    pub fn assigned(&self) -> impl Iterator<Item = (FunctionSlot, FunctionLabel)> + '_ {
        self.iter().filter(|(_, label)| !label.is_unassigned())
    }

    /// Whether any peripheral slot other than the interrupt carries a function
    pub fn has_alternate_functions(&self) -> bool {
        self.assigned().any(|(slot, _)| slot != FunctionSlot::INTERRUPT)
    }

    /// The interrupt-slot label is the only input to this decision.
    pub fn supports_edge(&self, interrupt_tag: &str) -> bool {
        let label = self.get(FunctionSlot::INTERRUPT);
        !label.is_unassigned() && label.as_str().contains(interrupt_tag)
    }

    /// First slot carrying `function`, e.g. `TWI1_SDA`.
    pub fn slot_of(&self, function: &str) -> Option<FunctionSlot> {
        self.iter()
            .find(|(_, label)| label.names(function))
            .map(|(slot, _)| slot)
    }
}

/// Function table of one chip variant (and its pin-compatible aliases)
#[derive(Debug)]
pub struct FunctionTable {
    family: ChipFamily,
    models: &'static [&'static str],
    entries: Vec<(&'static str, FunctionSlots)>,
    index: HashMap<&'static str, usize>,
}

static TABLES: Lazy<Vec<FunctionTable>> = Lazy::new(|| {
    vec![
        // H618 is the H616 die with a larger L2; the pin mux is identical.
        FunctionTable::build(ChipFamily::Allwinner, &["H616", "H618"], h616::MAPPING),
        // H2+ is the H3 without gigabit ethernet and 4K output.
        FunctionTable::build(ChipFamily::Allwinner, &["H3", "H2+"], h3::MAPPING),
    ]
});

impl FunctionTable {
    fn build(
        family: ChipFamily,
        models: &'static [&'static str],
        raw: &'static [RawEntry],
    ) -> Self {
        let entries: Vec<_> = raw
            .iter()
            .map(|&(name, labels)| (name, FunctionSlots::from_raw(labels)))
            .collect();
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, &(name, _))| (name, i))
            .collect();
        Self {
            family,
            models,
            entries,
            index,
        }
    }

    /// Table for `variant`, or `ChipNotSupported` when none is compiled in.
    pub fn for_variant(variant: &ChipVariant) -> Result<&'static FunctionTable, PinmuxError> {
        TABLES
            .iter()
            .find(|table| table.matches(variant))
            .ok_or_else(|| PinmuxError::ChipNotSupported(variant.to_string()))
    }

    /// Every variant with a compiled-in table, aliases included
    pub fn supported_variants() -> Vec<ChipVariant> {
        TABLES
            .iter()
            .flat_map(|table| {
                table
                    .models
                    .iter()
                    .map(move |model| ChipVariant::new(table.family, model))
            })
            .collect()
    }

    fn matches(&self, variant: &ChipVariant) -> bool {
        self.family == variant.family
            && self
                .models
                .iter()
                .any(|model| model.eq_ignore_ascii_case(&variant.model))
    }

    pub fn family(&self) -> ChipFamily {
        self.family
    }

    /// Primary model name of the table
    pub fn model(&self) -> &'static str {
        self.models[0]
    }

    /// Pure lookup; `None` means the pin is not bonded out on this variant.
    pub fn resolve(&self, pin_name: &str) -> Option<&FunctionSlots> {
        self.index.get(pin_name).map(|&i| &self.entries[i].1)
    }

    /// Entries in datasheet order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FunctionSlots)> + '_ {
        self.entries.iter().map(|(name, slots)| (*name, slots))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_h616_pg15() {
        let table = FunctionTable::for_variant(&ChipVariant::h616()).unwrap();
        let slots = table.resolve("PG15").unwrap();
        assert_eq!(slots.get(FunctionSlot::Alt2).as_str(), "UART2_TX");
        assert!(slots.get(FunctionSlot::Alt3).is_unassigned());
        assert_eq!(slots.get(FunctionSlot::Alt5).as_str(), "TWI4_SCK");
        assert_eq!(slots.get(FunctionSlot::Interrupt).as_str(), "PG_EINT15");
        assert!(slots.supports_edge("_EINT"));
    }

    #[test]
    fn test_missing_entry_vs_empty_label() {
        let table = FunctionTable::for_variant(&ChipVariant::h616()).unwrap();
        // PA0 is not bonded out on the H616.
        assert!(table.resolve("PA0").is_none());
        // PL0 exists but has no interrupt function.
        let pl0 = table.resolve("PL0").unwrap();
        assert!(pl0.get(FunctionSlot::Interrupt).is_unassigned());
        assert!(!pl0.supports_edge("_EINT"));
    }

    #[test]
    fn test_unknown_variant() {
        let variant = ChipVariant::new(ChipFamily::Allwinner, "A64");
        match FunctionTable::for_variant(&variant) {
            Err(PinmuxError::ChipNotSupported(name)) => assert!(name.contains("A64")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_aliases_share_table() {
        let h616 = FunctionTable::for_variant(&ChipVariant::h616()).unwrap();
        let h618 =
            FunctionTable::for_variant(&ChipVariant::new(ChipFamily::Allwinner, "H618")).unwrap();
        assert!(std::ptr::eq(h616, h618));
        assert_eq!(h618.model(), "H616");
    }

    #[test]
    fn test_slot_of_split_labels() {
        let table = FunctionTable::for_variant(&ChipVariant::h616()).unwrap();
        let pi2 = table.resolve("PI2").unwrap();
        assert_eq!(pi2.slot_of("RMII_RXD1"), Some(FunctionSlot::Alt2));
        assert_eq!(pi2.slot_of("HDMI_CEC"), Some(FunctionSlot::Alt5));
        assert_eq!(pi2.slot_of("SPI0_CLK"), None);
        assert_eq!(pi2.slot_of(""), None);
    }

    #[test]
    fn test_mux_values() {
        let values: Vec<u8> = FunctionSlot::ALL.iter().map(|s| s.mux_value()).collect();
        assert_eq!(values, vec![2, 3, 4, 5, 6]);
        assert_eq!(FunctionSlot::Alt4.to_string(), "alt4");
        assert_eq!(FunctionSlot::Interrupt.to_string(), "eint");
    }

    #[test]
    fn test_tables_fit_family_pool() {
        for variant in FunctionTable::supported_variants() {
            let table = FunctionTable::for_variant(&variant).unwrap();
            for (name, _) in table.iter() {
                assert!(
                    variant.family.pin_number(name).is_some(),
                    "{name} of {variant} is not a valid pin name"
                );
            }
        }
    }
}
