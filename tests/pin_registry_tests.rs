//! Chip-level pin registry population.

use pinmux_rs::hal::MemoryPins;
use pinmux_rs::{
    ChipFamily, ChipVariant, Edge, FunctionSlot, FunctionSlots, Level, PinCapabilities, PinLike,
    PinRegistry, PinmuxError,
};

#[test]
fn test_pg15_scenario() {
    let mut pins = PinRegistry::allwinner();
    pins.populate(&ChipVariant::h616(), &MemoryPins::new()).unwrap();

    let pg15 = pins.by_name("PG15").unwrap();
    assert_eq!(pg15.number(), 207);
    assert!(pg15.available());
    assert_eq!(pg15.variant(), Some(&ChipVariant::h616()));
    assert!(pg15.supports_edge_interrupt());
    assert_eq!(
        pg15.function(FunctionSlot::Interrupt).unwrap().as_str(),
        "PG_EINT15"
    );
    assert!(pg15.capabilities().contains(
        PinCapabilities::DIGITAL_IO
            | PinCapabilities::EDGE_INTERRUPT
            | PinCapabilities::ALTERNATE_FUNCTIONS
    ));
}

#[test]
fn test_pool_pins_outside_table_stay_unavailable() {
    let mut pins = PinRegistry::allwinner();
    pins.populate(&ChipVariant::h616(), &MemoryPins::new()).unwrap();

    // Port A is not bonded out on the H616.
    let pa0 = pins.by_name("PA0").unwrap();
    assert!(!pa0.available());
    assert!(pa0.function_slots().is_none());
    assert!(pa0.capabilities().is_empty());
    assert!(matches!(pa0.read(), Err(PinmuxError::PinUnavailable(_))));
}

fn snapshot(pins: &PinRegistry) -> Vec<(u16, bool, Option<FunctionSlots>, bool)> {
    pins.iter()
        .map(|p| {
            (
                p.number(),
                p.available(),
                p.function_slots().copied(),
                p.supports_edge_interrupt(),
            )
        })
        .collect()
}

#[test]
fn test_populate_twice_is_idempotent() {
    let mut pins = PinRegistry::allwinner();
    let first = pins.populate(&ChipVariant::h3(), &MemoryPins::new()).unwrap();
    let before = snapshot(&pins);

    let second = pins.populate(&ChipVariant::h3(), &MemoryPins::new()).unwrap();
    assert_eq!(first, second);
    assert_eq!(before, snapshot(&pins));
}

#[test]
fn test_variant_switch_refused() {
    let mut pins = PinRegistry::allwinner();
    pins.populate(&ChipVariant::h616(), &MemoryPins::new()).unwrap();
    let err = pins
        .populate(&ChipVariant::h3(), &MemoryPins::new())
        .unwrap_err();
    assert!(matches!(err, PinmuxError::UnsupportedTransition { .. }));
    assert_eq!(pins.variant().unwrap().model, "H616");
    assert!(!pins.by_name("PA0").unwrap().available());
}

#[test]
fn test_missing_handle_keeps_pin_available() {
    let mut pins = PinRegistry::allwinner();
    let report = pins
        .populate(&ChipVariant::h616(), &MemoryPins::only([207]))
        .unwrap();
    assert_eq!(report.without_handle.len(), report.available - 1);

    let pg15 = pins.by_name("PG15").unwrap();
    pg15.write(Level::High).unwrap();
    assert_eq!(pg15.read().unwrap(), Level::High);

    let pg14 = pins.by_name("PG14").unwrap();
    assert!(pg14.available());
    assert!(!pg14.has_handle());
    assert!(matches!(pg14.read(), Err(PinmuxError::NoHandle(_))));
}

#[test]
fn test_edge_requires_interrupt_slot() {
    let mut pins = PinRegistry::allwinner();
    pins.populate(&ChipVariant::h616(), &MemoryPins::new()).unwrap();

    let pl0 = pins.by_name("PL0").unwrap();
    assert!(matches!(
        pl0.set_edge(Edge::Rising),
        Err(PinmuxError::EdgeUnsupported(_))
    ));
    pl0.set_edge(Edge::None).unwrap();
    pins.by_name("PG15").unwrap().set_edge(Edge::Both).unwrap();
}

#[test]
fn test_lookup_by_number_matches_name() {
    let pins = PinRegistry::new(ChipFamily::Allwinner);
    for pin in pins.iter() {
        assert_eq!(
            pins.by_number(pin.number()).unwrap().name(),
            pin.name()
        );
        assert_eq!(
            ChipFamily::Allwinner.pin_number(pin.name()),
            Some(pin.number())
        );
    }
    assert!(pins.by_name("PZ99").is_none());
}
