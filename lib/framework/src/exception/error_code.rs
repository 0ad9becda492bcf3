pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const QUERY_ERROR: &str = "QUERY_ERROR";
pub const DECODE_ERROR: &str = "DECODE_ERROR";
pub const ARCHIVE_ERROR: &str = "ARCHIVE_ERROR";
pub const PURGE_ERROR: &str = "PURGE_ERROR";
