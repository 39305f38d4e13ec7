use serde::Serialize;

use super::{CompletedScan, WatchOutcome};
use crate::model::{ScanSnapshot, ScanStatus, ScanType};

/// How a freshly fetched log sequence relates to the one held before.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LogUpdate {
    /// Same lines as before.
    Unchanged,
    /// Previous lines are a prefix; new lines start at `from`.
    Appended { from: usize },
    /// The sequence diverged from what was held and must be shown again in full.
    Replaced,
}

/// Metadata reported alongside the status.
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct ScanMetadata {
    pub domain: Option<String>,
    pub scan_type: Option<ScanType>,
    pub start_time: Option<String>,
}

/// Client-side view of a watched scan, rebuilt from status snapshots.
#[derive(Clone, Debug, Serialize)]
pub struct TerminalState {
    scan_id: String,
    status: ScanStatus,
    logs: Vec<String>,
    metadata: Option<ScanMetadata>,
    result_file: Option<String>,
}

impl TerminalState {
    pub fn new(scan_id: impl Into<String>) -> Self {
        Self {
            scan_id: scan_id.into(),
            status: ScanStatus::Initializing,
            logs: Vec::new(),
            metadata: None,
            result_file: None,
        }
    }

    pub fn scan_id(&self) -> &str {
        &self.scan_id
    }

    pub fn status(&self) -> ScanStatus {
        self.status
    }

    pub fn logs(&self) -> &[String] {
        &self.logs
    }

    pub fn metadata(&self) -> Option<&ScanMetadata> {
        self.metadata.as_ref()
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Reconcile with a snapshot. The held log sequence is replaced by the
    /// snapshot's. Snapshots arriving after a terminal status are ignored.
    pub fn apply(&mut self, snapshot: ScanSnapshot) -> LogUpdate {
        if self.is_terminal() {
            return LogUpdate::Unchanged;
        }
        let update = if snapshot.logs == self.logs {
            LogUpdate::Unchanged
        } else if snapshot.logs.starts_with(&self.logs) {
            LogUpdate::Appended {
                from: self.logs.len(),
            }
        } else {
            LogUpdate::Replaced
        };
        self.logs = snapshot.logs;
        self.status = snapshot.status;
        self.metadata = Some(ScanMetadata {
            domain: snapshot.domain,
            scan_type: snapshot.scan_type,
            start_time: snapshot.start_time,
        });
        if snapshot.result_file.is_some() {
            self.result_file = snapshot.result_file;
        }
        update
    }

    /// Outcome once a terminal status has been observed.
    pub fn outcome(&self) -> Option<WatchOutcome> {
        match self.status {
            ScanStatus::Completed => Some(WatchOutcome::Completed(CompletedScan {
                scan_id: self.scan_id.clone(),
                result_file: self.result_file.clone(),
            })),
            ScanStatus::Error => Some(WatchOutcome::Failed {
                scan_id: self.scan_id.clone(),
            }),
            _ => None,
        }
    }
}
