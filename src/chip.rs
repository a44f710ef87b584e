//! # Chip Families and Variants
//!
//! A [`ChipFamily`] owns the pin numbering scheme and the superset of pins any
//! of its members can bond out. A [`ChipVariant`] names one member of the
//! family and selects the function table applied at detection time.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::constants::{ALLWINNER_EINT_TAG, ALLWINNER_PORT_WIDTH};
use crate::error::PinmuxError;
use crate::pin::PinIdentity;

/// Ports of the Allwinner pin controllers and the largest pin count any
/// supported SoC uses on each of them.
///
/// Ports J and K are never bonded out on these SoCs and are skipped.
const ALLWINNER_PORTS: &[(char, u16)] = &[
    ('A', 22),
    ('B', 10),
    ('C', 27),
    ('D', 28),
    ('E', 22),
    ('F', 7),
    ('G', 20),
    ('H', 28),
    ('I', 22),
    ('L', 14),
    ('M', 6),
];

/// SoC vendor family sharing one pin numbering scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[non_exhaustive]
pub enum ChipFamily {
    Allwinner,
}

impl ChipFamily {
    /// Lowercase family name as used in device-tree compatible strings
    pub fn name(&self) -> &'static str {
        match self {
            ChipFamily::Allwinner => "allwinner",
        }
    }

    /// Substring an interrupt-slot label must contain for edge detection
    pub fn interrupt_tag(&self) -> &'static str {
        match self {
            ChipFamily::Allwinner => ALLWINNER_EINT_TAG,
        }
    }

    /// Every pin any member of the family may expose, in numbering order.
    pub fn pin_pool(&self) -> Vec<PinIdentity> {
        match self {
            ChipFamily::Allwinner => ALLWINNER_PORTS
                .iter()
                .flat_map(|&(port, count)| {
                    let base = port_index(port) * ALLWINNER_PORT_WIDTH;
                    (0..count).map(move |offset| {
                        PinIdentity::new(base + offset, format!("P{port}{offset}"))
                    })
                })
                .collect(),
        }
    }

    /// Resolve a pin name such as `PG15` to its family-wide number.
    pub fn pin_number(&self, name: &str) -> Option<u16> {
        match self {
            ChipFamily::Allwinner => {
                let rest = name.strip_prefix('P')?;
                let mut chars = rest.chars();
                let port = chars.next()?;
                if !port.is_ascii_uppercase() {
                    return None;
                }
                let offset: u16 = chars.as_str().parse().ok()?;
                if offset >= ALLWINNER_PORT_WIDTH {
                    return None;
                }
                Some(port_index(port) * ALLWINNER_PORT_WIDTH + offset)
            }
        }
    }
}

impl fmt::Display for ChipFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChipFamily::Allwinner => f.write_str("Allwinner"),
        }
    }
}

impl FromStr for ChipFamily {
    type Err = PinmuxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "allwinner" | "sunxi" => Ok(ChipFamily::Allwinner),
            other => Err(PinmuxError::ChipNotSupported(format!("unknown family {other}"))),
        }
    }
}

fn port_index(port: char) -> u16 {
    (port as u16).saturating_sub('A' as u16)
}

/// A specific SoC of a family, e.g. Allwinner H616
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ChipVariant {
    pub family: ChipFamily,
    pub model: String,
}

impl ChipVariant {
    /// Create a variant; the model is normalized to uppercase.
    pub fn new(family: ChipFamily, model: impl AsRef<str>) -> Self {
        Self {
            family,
            model: model.as_ref().trim().to_ascii_uppercase(),
        }
    }

    pub fn h616() -> Self {
        Self::new(ChipFamily::Allwinner, "H616")
    }

    pub fn h3() -> Self {
        Self::new(ChipFamily::Allwinner, "H3")
    }

    /// Parse one device-tree `compatible` entry of a SoC.
    ///
    /// `allwinner,sun50i-h616` yields H616, `allwinner,sun8i-h2-plus` yields
    /// H2+. Entries of other vendors (board compatibles such as
    /// `xunlong,orangepi-zero2w`) yield `None`.
    pub fn from_compatible(entry: &str) -> Option<Self> {
        let (vendor, soc) = entry.trim().split_once(',')?;
        let family: ChipFamily = vendor.parse().ok()?;
        match family {
            ChipFamily::Allwinner => {
                let (generation, model) = soc.split_once('-')?;
                if !generation.starts_with("sun") || model.is_empty() {
                    return None;
                }
                let model = model.to_ascii_uppercase().replace("-PLUS", "+");
                Some(Self::new(family, model))
            }
        }
    }
}

impl fmt::Display for ChipVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.family, self.model)
    }
}

impl FromStr for ChipVariant {
    type Err = PinmuxError;

    /// Accepts `H616`, `allwinner-h616`, `allwinner:h616` and compatible
    /// strings. A bare model defaults to the Allwinner family.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PinmuxError::ChipNotSupported("empty chip name".to_string()));
        }
        if s.contains(',') {
            return Self::from_compatible(s)
                .ok_or_else(|| PinmuxError::ChipNotSupported(s.to_string()));
        }
        match s.split_once(['-', ':']) {
            Some((family, model)) if family.parse::<ChipFamily>().is_ok() => {
                Ok(Self::new(family.parse()?, model))
            }
            _ => Ok(Self::new(ChipFamily::Allwinner, s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allwinner_numbering() {
        let family = ChipFamily::Allwinner;
        assert_eq!(family.pin_number("PA0"), Some(0));
        assert_eq!(family.pin_number("PC0"), Some(64));
        assert_eq!(family.pin_number("PG15"), Some(207));
        assert_eq!(family.pin_number("PL0"), Some(352));
        assert_eq!(family.pin_number("PX"), None);
        assert_eq!(family.pin_number("GPIO4"), None);
        assert_eq!(family.pin_number("PA32"), None);
    }

    #[test]
    fn test_pool_is_unique_and_consistent() {
        let pool = ChipFamily::Allwinner.pin_pool();
        let mut numbers: Vec<u16> = pool.iter().map(|p| p.number()).collect();
        numbers.sort_unstable();
        numbers.dedup();
        assert_eq!(numbers.len(), pool.len());

        for pin in &pool {
            assert_eq!(ChipFamily::Allwinner.pin_number(pin.name()), Some(pin.number()));
        }
    }

    #[test]
    fn test_variant_parsing() {
        assert_eq!("H616".parse::<ChipVariant>().unwrap(), ChipVariant::h616());
        assert_eq!("h616".parse::<ChipVariant>().unwrap(), ChipVariant::h616());
        assert_eq!("allwinner-h3".parse::<ChipVariant>().unwrap(), ChipVariant::h3());
        assert_eq!(
            "allwinner,sun50i-h616".parse::<ChipVariant>().unwrap(),
            ChipVariant::h616()
        );
        assert!("".parse::<ChipVariant>().is_err());
    }

    #[test]
    fn test_from_compatible() {
        assert_eq!(
            ChipVariant::from_compatible("allwinner,sun8i-h2-plus").unwrap().model,
            "H2+"
        );
        assert_eq!(
            ChipVariant::from_compatible("allwinner,sun50i-h618").unwrap().model,
            "H618"
        );
        assert!(ChipVariant::from_compatible("xunlong,orangepi-zero2w").is_none());
        assert!(ChipVariant::from_compatible("brcm,bcm2711").is_none());
    }
}
