pub const LOG_LEVEL: &str = "info";
pub const OUT_DIR: &str = "generated";
pub const FORMAT: &str = "cpp";
