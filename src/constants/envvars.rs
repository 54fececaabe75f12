pub const LOG_LEVEL: &str = "LOG_LEVEL";

pub const SCHEMA_FILE: &str = "PLUGC_SCHEMA";
pub const OUT_DIR: &str = "PLUGC_OUT_DIR";
pub const FORMAT: &str = "PLUGC_FORMAT";
