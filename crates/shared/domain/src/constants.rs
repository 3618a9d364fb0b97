//! Names shared between configuration files, the CLI and log output.

pub const MOBILE: &str = "mobile";
pub const TABLET: &str = "tablet";
pub const TOUCH: &str = "touch";
pub const LOW_POWER: &str = "low_power";

pub const BOOL: &str = "bool";
pub const NUMBER: &str = "number";
