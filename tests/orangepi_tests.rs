//! End-to-end board detection against device-tree fixtures.

use std::fs;

use pinmux_rs::hal::{DeviceTree, MemoryPins};
use pinmux_rs::{
    default_loader, ChipFamily, HeaderTarget, HostConfig, LoadReport, LoadState, PinLike,
    PinmuxError, Signal, SystemTopology,
};
use tempfile::TempDir;

fn device_tree(model: Option<&str>, compatible: &[&str]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    if let Some(model) = model {
        fs::write(dir.path().join("model"), format!("{model}\0")).unwrap();
    }
    let mut raw = Vec::new();
    for entry in compatible {
        raw.extend_from_slice(entry.as_bytes());
        raw.push(0);
    }
    fs::write(dir.path().join("compatible"), raw).unwrap();
    dir
}

fn load(dt: &TempDir, config: &HostConfig) -> (SystemTopology, LoadReport) {
    let mut topology = SystemTopology::new(
        ChipFamily::Allwinner,
        Box::new(DeviceTree::new(dt.path())),
        Box::new(MemoryPins::new()),
    );
    let report = default_loader(config).unwrap().load(&mut topology).unwrap();
    (topology, report)
}

#[test]
fn test_zero2w_header() {
    let dt = device_tree(
        Some("OrangePi Zero2 W"),
        &["xunlong,orangepi-zero2w", "allwinner,sun50i-h618"],
    );
    let (topology, report) = load(&dt, &HostConfig::default());
    assert_eq!(report.loaded, vec!["allwinner-gpio", "orangepi"]);

    let p1 = topology.headers().connector("P1").unwrap();
    assert_eq!(p1.len(), 40);
    assert_eq!(p1.width(), 2);

    let Some(HeaderTarget::Gpio(pin)) = topology.header_pin("P1", 3) else {
        panic!("P1-3 should be a gpio");
    };
    assert_eq!(pin.name(), "PI8");
    let Some(HeaderTarget::Gpio(pin)) = topology.header_pin("P1", 16) else {
        panic!("P1-16 should be a gpio");
    };
    assert_eq!(pin.name(), "PI14");
    assert!(matches!(
        topology.header_pin("P1", 1),
        Some(HeaderTarget::Signal(Signal::V3_3))
    ));
    assert!(matches!(
        topology.header_pin("P1", 39),
        Some(HeaderTarget::Signal(Signal::Ground))
    ));
    assert!(topology.header_pin("P1", 41).is_none());
}

#[test]
fn test_zero2w_round_trip() {
    let dt = device_tree(
        Some("OrangePi Zero2 W"),
        &["xunlong,orangepi-zero2w", "allwinner,sun50i-h618"],
    );
    let (topology, _) = load(&dt, &HostConfig::default());

    let p1 = topology.headers().connector("P1").unwrap();
    let mut gpio = 0;
    for slot in p1.slots() {
        let Some(identity) = slot.gpio() else {
            continue;
        };
        gpio += 1;
        let positions = topology.positions_of(identity.name());
        assert_eq!(positions.len(), 1, "{identity}");
        assert_eq!(positions[0].connector, "P1");
        assert_eq!(positions[0].position, slot.position);
    }
    assert_eq!(gpio, 28);
}

#[test]
fn test_zero_headers() {
    let dt = device_tree(
        Some("Xunlong Orange Pi Zero"),
        &["xunlong,orangepi-zero", "allwinner,sun8i-h2-plus"],
    );
    let (topology, report) = load(&dt, &HostConfig::default());
    assert!(report.failed.is_empty(), "{:?}", report.failed);
    assert_eq!(topology.pins().variant().unwrap().model, "H2+");

    assert_eq!(topology.headers().connector("PA").unwrap().len(), 26);
    assert_eq!(topology.headers().connector("FUN").unwrap().len(), 13);

    let Some(HeaderTarget::Gpio(pa0)) = topology.header_pin("PA", 13) else {
        panic!("PA-13 should be a gpio");
    };
    assert_eq!(pa0.name(), "PA0");
    assert!(pa0.supports_edge_interrupt());

    let Some(HeaderTarget::Gpio(ir)) = topology.header_pin("FUN", 13) else {
        panic!("FUN-13 should be a gpio");
    };
    assert_eq!(ir.name(), "PL11");
    assert!(matches!(
        topology.header_pin("FUN", 7),
        Some(HeaderTarget::Signal(Signal::Analog("HP_RIGHT")))
    ));
    assert!(matches!(
        topology.header_pin("PA", 1),
        Some(HeaderTarget::Signal(Signal::DcIn))
    ));
}

#[test]
fn test_other_board_not_present() {
    let dt = device_tree(
        Some("Raspberry Pi 4 Model B Rev 1.4"),
        &["raspberrypi,4-model-b", "brcm,bcm2711"],
    );
    let (topology, report) = load(&dt, &HostConfig::default());
    assert!(report.loaded.is_empty());
    assert!(report.failed.is_empty());
    assert_eq!(report.state("allwinner-gpio"), Some(LoadState::Skipped));
    assert_eq!(report.state("orangepi"), Some(LoadState::Skipped));
    assert!(topology.headers().is_empty());
    assert!(topology.pins().variant().is_none());
}

#[test]
fn test_missing_model_is_identity_error() {
    let dt = device_tree(None, &["xunlong,orangepi-zero2w", "allwinner,sun50i-h616"]);
    let (topology, report) = load(&dt, &HostConfig::default());
    assert!(report.is_loaded("allwinner-gpio"));
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].driver, "orangepi");
    assert!(matches!(
        report.failed[0].error,
        PinmuxError::IdentityUnavailable { .. }
    ));
    assert!(topology.headers().is_empty());
}

#[test]
fn test_unknown_model_placeholder_is_identity_error() {
    let dt = device_tree(
        Some("<unknown>"),
        &["xunlong,orangepi-zero2w", "allwinner,sun50i-h616"],
    );
    let (_, report) = load(&dt, &HostConfig::default());
    assert_eq!(report.state("orangepi"), Some(LoadState::Failed));
}

#[test]
fn test_chip_failure_does_not_abort_board() {
    // Board detected but its SoC has no function table: the board driver still
    // runs and fails on its own because no pin is available.
    let dt = device_tree(
        Some("OrangePi Zero2 W"),
        &["xunlong,orangepi-zero2w", "allwinner,sun50i-a64"],
    );
    let (topology, report) = load(&dt, &HostConfig::default());
    assert_eq!(report.failed.len(), 2);
    assert!(matches!(
        report.failed[0].error,
        PinmuxError::ChipNotSupported(_)
    ));
    assert!(matches!(
        report.failed[1].error,
        PinmuxError::UnknownPin { position: 3, .. }
    ));
    assert!(topology.headers().is_empty());
}

#[test]
fn test_unlisted_orangepi_loads_without_headers() {
    let dt = device_tree(Some("Orange Pi 5"), &["xunlong,orangepi-5", "rockchip,rk3588s"]);
    let (topology, report) = load(&dt, &HostConfig::default());
    assert!(report.is_loaded("orangepi"));
    assert_eq!(report.state("allwinner-gpio"), Some(LoadState::Skipped));
    assert!(topology.headers().is_empty());
}

#[test]
fn test_chip_override() {
    // Vendor kernels sometimes ship without a SoC compatible entry.
    let dt = device_tree(Some("OrangePi Zero2 W"), &["xunlong,orangepi-zero2w"]);
    let config = HostConfig::builder().chip("H618").build();
    let (topology, report) = load(&dt, &config);
    assert_eq!(report.loaded, vec!["allwinner-gpio", "orangepi"]);
    assert_eq!(topology.positions_of("PC12")[0].to_string(), "P1-36");
}
