//! Orange Pi board driver.
//!
//! Binds the expansion headers of Orange Pi boards to Allwinner pins. Runs
//! after [`AllwinnerGpio`](super::allwinner::AllwinnerGpio) so the pins are
//! populated before the headers reference them.

use crate::constants::{ALLWINNER_GPIO_DRIVER, ORANGEPI_DRIVER};
use crate::driver::{Driver, InitOutcome};
use crate::error::PinmuxError;
use crate::header::{BoardPin, Signal};
use crate::logging;
use crate::topology::SystemTopology;

const GND: BoardPin = BoardPin::Signal(Signal::Ground);
const V3_3: BoardPin = BoardPin::Signal(Signal::V3_3);
const V5: BoardPin = BoardPin::Signal(Signal::V5);
// Unregulated 3.3V taken straight from the input, max 30mA.
const DC_IN: BoardPin = BoardPin::Signal(Signal::DcIn);
const NC: BoardPin = BoardPin::Signal(Signal::Invalid);

const fn gpio(name: &'static str) -> BoardPin {
    BoardPin::Gpio(name)
}

const fn analog(name: &'static str) -> BoardPin {
    BoardPin::Signal(Signal::Analog(name))
}

/// Orange Pi Zero 2W, 40-pin header (H618)
const ZERO2W_P1: [[BoardPin; 2]; 20] = [
    [V3_3, V5],
    [gpio("PI8"), V5], // TWI1_SDA
    [gpio("PI7"), GND], // TWI1_SCK
    [gpio("PI13"), gpio("PH0")], // PWM3, UART0_TX
    [GND, gpio("PH1")], // UART0_RX
    [gpio("PH2"), gpio("PI1")], // UART5_TX
    [gpio("PH3"), GND], // UART5_RX
    [gpio("PI5"), gpio("PI14")], // UART2_TX, PWM4
    [V3_3, gpio("PH4")],
    [gpio("PH7"), GND], // SPI1_MOSI
    [gpio("PH8"), gpio("PI6")], // SPI1_MISO
    [gpio("PH6"), gpio("PH5")], // SPI1_CLK, SPI1_CS0
    [GND, gpio("PH9")], // SPI1_CS1
    [gpio("PI10"), gpio("PI9")], // TWI2_SDA, TWI2_SCK
    [gpio("PI0"), GND],
    [gpio("PI15"), gpio("PI11")], // PWM1
    [gpio("PI12"), GND], // PWM2
    [gpio("PI2"), gpio("PC12")],
    [gpio("PI16"), gpio("PI4")],
    [GND, gpio("PI3")],
];

/// Orange Pi Zero / Zero LTS, 26-pin expansion port (H2+ / H3)
const ZERO_PA: [[BoardPin; 2]; 13] = [
    [DC_IN, V5],
    [gpio("PA12"), V5], // TWI0_SDA
    [gpio("PA11"), GND], // TWI0_SCK
    [gpio("PA6"), gpio("PG6")], // PWM1, UART1_TX
    [GND, gpio("PG7")], // UART1_RX
    [gpio("PA1"), gpio("PA7")], // UART2_RX
    [gpio("PA0"), GND], // UART2_TX
    [gpio("PA3"), gpio("PA19")], // UART2_CTS, TWI1_SDA
    [DC_IN, gpio("PA18")], // TWI1_SCK
    [gpio("PA15"), GND], // SPI1_MOSI
    [gpio("PA16"), gpio("PA2")], // SPI1_MISO, UART2_RTS
    [gpio("PA14"), gpio("PA13")], // SPI1_CLK, SPI1_CS
    [GND, gpio("PA10")],
];

/// Orange Pi Zero / Zero LTS, 13-pin function interface
const ZERO_FUN: [[BoardPin; 1]; 13] = [
    [V5],
    [GND],
    [NC], // USB-DM2
    [NC], // USB-DP2
    [NC], // USB-DM3
    [NC], // USB-DP3
    [analog("HP_RIGHT")], // LINEOUTR
    [analog("HP_LEFT")], // LINEOUTL
    [NC], // TVOUT
    [NC], // MBIAS
    [analog("MIC_IN")],
    [analog("MIC_GND")],
    [gpio("PL11")], // IR-RX
];

/// Orange Pi boards with a known header layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrangePiBoard {
    Zero,
    Zero2W,
    /// Detected but without a header description
    Other,
}

impl OrangePiBoard {
    /// Identify the board from its device-tree model string.
    ///
    /// Matching ignores case, spaces, dashes and a leading vendor name, so
    /// `Xunlong Orange Pi Zero` and `OrangePi Zero2 W` both resolve.
    pub fn from_model(model: &str) -> Self {
        let normalized: String = model
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        let rest = normalized.strip_prefix("xunlong").unwrap_or(&normalized);
        let Some(rest) = rest.strip_prefix("orangepi") else {
            return OrangePiBoard::Other;
        };
        match rest {
            "zero2w" => OrangePiBoard::Zero2W,
            "zero" | "zerolts" => OrangePiBoard::Zero,
            _ => OrangePiBoard::Other,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            OrangePiBoard::Zero => "Orange Pi Zero",
            OrangePiBoard::Zero2W => "Orange Pi Zero 2W",
            OrangePiBoard::Other => "Orange Pi",
        }
    }

    /// Register every header of the board, or none of them.
    pub fn register_headers(&self, topology: &mut SystemTopology) -> Result<(), PinmuxError> {
        match self {
            OrangePiBoard::Zero2W => topology.register_header("P1", &ZERO2W_P1),
            OrangePiBoard::Zero => {
                let pa = topology.build_header("PA", &ZERO_PA)?;
                let fun = topology.build_header("FUN", &ZERO_FUN)?;
                topology.commit_headers(vec![pa, fun])
            }
            OrangePiBoard::Other => {
                logging::log_warn("orangepi: no header layout for this board");
                Ok(())
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct OrangePi;

impl OrangePi {
    pub fn new() -> Self {
        Self
    }

    /// Whether the running board is an Orange Pi
    pub fn present(topology: &SystemTopology) -> bool {
        let identity = topology.identity();
        if identity
            .compatible()
            .iter()
            .any(|entry| entry.starts_with("xunlong,orangepi"))
        {
            return true;
        }
        identity
            .model()
            .is_some_and(|model| model.starts_with("OrangePi") || model.starts_with("Orange Pi"))
    }
}

impl Driver for OrangePi {
    fn name(&self) -> &str {
        ORANGEPI_DRIVER
    }

    fn runs_after(&self) -> &[&str] {
        &[ALLWINNER_GPIO_DRIVER]
    }

    fn init(&self, topology: &mut SystemTopology) -> Result<InitOutcome, PinmuxError> {
        if !Self::present(topology) {
            return Ok(InitOutcome::NotPresent("board Orange Pi not detected".to_string()));
        }
        let model = topology
            .identity()
            .model()
            .ok_or_else(|| PinmuxError::IdentityUnavailable {
                driver: ORANGEPI_DRIVER.to_string(),
            })?;
        let board = OrangePiBoard::from_model(&model);
        logging::log_info(&format!("{ORANGEPI_DRIVER}: {model} -> {}", board.name()));
        board.register_headers(topology)?;
        Ok(InitOutcome::Loaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chip::{ChipFamily, ChipVariant};
    use crate::hal::{MemoryPins, StaticIdentity};

    fn h3_topology() -> SystemTopology {
        let mut topology = SystemTopology::new(
            ChipFamily::Allwinner,
            Box::new(StaticIdentity::new(Some("Xunlong Orange Pi Zero"), &[])),
            Box::new(MemoryPins::new()),
        );
        topology.populate(&ChipVariant::h3()).unwrap();
        topology
    }

    #[test]
    fn test_zero_rejected_fun_keeps_pa_out() {
        let mut topology = h3_topology();
        topology.register_header("FUN", &[[GND]]).unwrap();

        let err = OrangePiBoard::Zero.register_headers(&mut topology).unwrap_err();
        assert!(matches!(err, PinmuxError::ConnectorAlreadyRegistered(name) if name == "FUN"));
        assert!(topology.headers().connector("PA").is_none());
        assert!(topology.positions_of("PA12").is_empty());
        assert_eq!(topology.headers().connectors().count(), 1);
    }

    #[test]
    fn test_board_from_model() {
        assert_eq!(OrangePiBoard::from_model("OrangePi Zero2 W"), OrangePiBoard::Zero2W);
        assert_eq!(OrangePiBoard::from_model("Orange Pi Zero 2W"), OrangePiBoard::Zero2W);
        assert_eq!(OrangePiBoard::from_model("Xunlong Orange Pi Zero"), OrangePiBoard::Zero);
        assert_eq!(OrangePiBoard::from_model("OrangePi Zero LTS"), OrangePiBoard::Zero);
        // The Zero2 (no W) has a different 26-pin layout.
        assert_eq!(OrangePiBoard::from_model("OrangePi Zero2"), OrangePiBoard::Other);
        assert_eq!(OrangePiBoard::from_model("Raspberry Pi 4"), OrangePiBoard::Other);
    }

    #[test]
    fn test_layouts_have_no_duplicate_gpio() {
        fn gpio_names<const W: usize>(rows: &[[BoardPin; W]]) -> Vec<&'static str> {
            rows.iter()
                .flatten()
                .filter_map(|p| match p {
                    BoardPin::Gpio(name) => Some(*name),
                    BoardPin::Signal(_) => None,
                })
                .collect()
        }
        for names in [gpio_names(&ZERO2W_P1), gpio_names(&ZERO_PA), gpio_names(&ZERO_FUN)] {
            let mut sorted = names.clone();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted.len(), names.len());
        }
    }
}
