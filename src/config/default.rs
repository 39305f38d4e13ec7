pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";
pub const API_URL_ENV: &str = "CTSRECON_API_URL";
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30000;

pub const USER_DIR_NAME: &str = ".ctsrecon";
pub const LOG_FILE_NAME: &str = "ctsrecon.log";
