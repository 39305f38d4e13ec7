pub mod poller;
pub mod state;

pub use poller::{watch_scan, LogSink};
pub use state::{LogUpdate, ScanMetadata, TerminalState};

use serde::Serialize;

/// A scan that finished with status `completed`.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct CompletedScan {
    pub scan_id: String,
    pub result_file: Option<String>,
}

impl CompletedScan {
    /// Identifier to fetch the report with: the stored result file when the
    /// service reported one, otherwise the scan ID.
    pub fn report_id(&self) -> &str {
        self.result_file.as_deref().unwrap_or(&self.scan_id)
    }
}

/// How a watch ended.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum WatchOutcome {
    Completed(CompletedScan),
    Failed { scan_id: String },
}

impl WatchOutcome {
    pub fn scan_id(&self) -> &str {
        match self {
            WatchOutcome::Completed(c) => &c.scan_id,
            WatchOutcome::Failed { scan_id } => scan_id,
        }
    }

    /// The single "access report" action, present only for completed scans.
    pub fn report(&self) -> Option<&CompletedScan> {
        match self {
            WatchOutcome::Completed(c) => Some(c),
            WatchOutcome::Failed { .. } => None,
        }
    }
}
