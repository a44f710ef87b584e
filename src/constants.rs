//! Pin Multiplexer Constants
//!
//! Naming conventions and default host paths shared by the chip and board
//! drivers.

/// Substring marking an external interrupt function on Allwinner pins
pub const ALLWINNER_EINT_TAG: &str = "_EINT";

/// Pins per Allwinner port; pin number is `port * 32 + offset`
pub const ALLWINNER_PORT_WIDTH: u16 = 32;

/// Device-tree model value reported when the model cannot be read
pub const UNKNOWN_MODEL: &str = "<unknown>";

/// Default device-tree root exposed by the kernel
pub const DEFAULT_DEVICE_TREE_ROOT: &str = "/proc/device-tree";

/// Default sysfs GPIO class directory
pub const DEFAULT_SYSFS_GPIO_ROOT: &str = "/sys/class/gpio";

/// Driver name of the Allwinner chip-level GPIO driver
pub const ALLWINNER_GPIO_DRIVER: &str = "allwinner-gpio";

/// Driver name of the Orange Pi board driver
pub const ORANGEPI_DRIVER: &str = "orangepi";
