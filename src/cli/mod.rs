use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum, value_parser};

use crate::config::default::{
    API_URL_ENV, DEFAULT_API_URL, DEFAULT_POLL_INTERVAL_MS, DEFAULT_REQUEST_TIMEOUT_MS,
};
use crate::model::ScanType;

/// ctsrecon - Command-line client for the CTS Recon reconnaissance service
#[derive(Parser, Debug)]
#[command(author, version, about = "ctsrecon - Command-line client for the CTS Recon reconnaissance service", long_about = None)]
pub struct Cli {
    /// Recon service API base URL
    #[arg(long, env = API_URL_ENV, default_value = DEFAULT_API_URL, global = true)]
    pub api_url: String,

    /// Status polling interval in ms while watching a scan
    #[arg(long, default_value_t = DEFAULT_POLL_INTERVAL_MS, value_parser = value_parser!(u64).range(100..=60_000), global = true)]
    pub poll_interval_ms: u64,

    /// Per-request timeout in ms
    #[arg(long, default_value_t = DEFAULT_REQUEST_TIMEOUT_MS, value_parser = value_parser!(u64).range(100..=600_000), global = true)]
    pub request_timeout_ms: u64,

    /// Print results as JSON
    #[arg(long, action = ArgAction::SetTrue, default_value_t = false, global = true)]
    pub json: bool,

    /// Global log level
    #[arg(long, default_value = "info", global = true)]
    pub log_level: LogLevel,

    /// Log to file (in addition to stdout)
    #[arg(long, action = ArgAction::SetTrue, default_value_t = false, global = true)]
    pub log_file: bool,

    /// Log file path (default: ~/.ctsrecon/ctsrecon.log)
    #[arg(long, value_name = "FILE", value_parser = value_parser!(PathBuf), global = true)]
    pub log_file_path: Option<PathBuf>,

    /// Suppress non-error logs
    #[arg(long, action = ArgAction::SetTrue, default_value_t = false, global = true)]
    pub quiet: bool,

    /// Save result to a JSON file
    #[arg(short, long, value_name = "FILE", value_parser = value_parser!(PathBuf), global = true)]
    pub output: Option<PathBuf>,

    /// Suppress stdout output (use with --output)
    #[arg(long, action = ArgAction::SetTrue, default_value_t = false, global = true)]
    pub no_stdout: bool,

    /// Subcommands
    #[command(subcommand)]
    pub command: Command,
}

/// Log level
#[derive(Copy, Clone, Debug, ValueEnum, Eq, PartialEq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Convert to `tracing::Level`
    pub fn to_level_filter(&self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start a scan and follow its live log
    Scan(ScanArgs),

    /// Follow the live log of an existing scan
    Watch(WatchArgs),

    /// Show one status snapshot of a scan
    Status(ScanIdArgs),

    /// Show the log payload of a scan
    Logs(ScanIdArgs),

    /// List stored scan results
    Results,

    /// Show one stored scan result in full
    Report(ReportArgs),

    /// Show scan statistics and recent scans
    Dashboard,

    /// Interactive session (dashboard, new scan, results)
    Console,
}

/// Scan depth. Default: deep
#[derive(Copy, Clone, Debug, ValueEnum, Eq, PartialEq)]
pub enum ScanMode {
    /// Quick overview (faster)
    Lite,
    /// Comprehensive analysis (slower)
    Deep,
}

impl ScanMode {
    /// Convert to the wire scan type.
    pub fn to_scan_type(self) -> ScanType {
        match self {
            ScanMode::Lite => ScanType::Lite,
            ScanMode::Deep => ScanType::Deep,
        }
    }
}

/// Scan arguments
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Target domain or IP address
    #[arg(required = true)]
    pub domain: String,

    /// Scan depth
    #[arg(short = 't', long = "type", value_enum, default_value_t = ScanMode::Deep)]
    pub scan_type: ScanMode,

    /// Return after the scan was accepted instead of following it
    #[arg(long, action = ArgAction::SetTrue)]
    pub detach: bool,

    /// Show the report once the scan completes
    #[arg(long, action = ArgAction::SetTrue)]
    pub open_report: bool,
}

/// Watch arguments
#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Scan ID returned when the scan was started
    #[arg(required = true)]
    pub scan_id: String,

    /// Show the report once the scan completes
    #[arg(long, action = ArgAction::SetTrue)]
    pub open_report: bool,
}

/// Arguments naming one scan
#[derive(Args, Debug)]
pub struct ScanIdArgs {
    /// Scan ID
    #[arg(required = true)]
    pub scan_id: String,
}

/// Report arguments
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Result identifier (file name from `results`)
    #[arg(required = true)]
    pub id: String,

    /// Render the report as a tree instead of raw JSON
    #[arg(long, action = ArgAction::SetTrue)]
    pub tree: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn scan_defaults_to_deep() {
        let cli = Cli::parse_from(["ctsrecon", "scan", "example.com"]);
        match cli.command {
            Command::Scan(args) => {
                assert_eq!(args.domain, "example.com");
                assert_eq!(args.scan_type.to_scan_type(), ScanType::Deep);
                assert!(!args.detach);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["ctsrecon", "scan", "example.com", "--type", "lite", "--json"]);
        assert!(cli.json);
        match cli.command {
            Command::Scan(args) => assert_eq!(args.scan_type, ScanMode::Lite),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
