use clap::{crate_description, crate_name, crate_version};

use crate::config::ClientConfig;

// APP information
pub const CRATE_BIN_NAME: &str = "ctsrecon";
pub const CRATE_UPDATE_DATE: &str = "2026-10-19";

/// Banner shown before human-readable output.
pub fn show_banner_with_starttime(config: &ClientConfig) {
    println!("{} v{} ({})", crate_name!(), crate_version!(), CRATE_UPDATE_DATE);
    println!("{}", crate_description!());
    println!();
    println!("Service: {}", config.api_url);
    println!("Starting at {}", crate::time::get_sysdate());
    println!();
}
