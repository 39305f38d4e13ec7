use std::fmt;

use serde::Serialize;

use crate::api::ScanApi;
use crate::model::{ResultSummary, ScanReport, ScanStatus, ScanType};

/// Views of the recon dashboard.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Tab {
    #[default]
    Dashboard,
    NewScan,
    Terminal,
    Results,
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Tab::Dashboard => "Dashboard",
            Tab::NewScan => "New Scan",
            Tab::Terminal => "Terminal",
            Tab::Results => "Results",
        };
        f.write_str(label)
    }
}

/// Counters shown on the dashboard.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
}

/// Reject targets the service cannot use before any request is made.
pub fn validate_target(domain: &str) -> Result<&str, String> {
    let domain = domain.trim();
    if domain.is_empty() {
        return Err("Target domain is required".to_string());
    }
    if domain.chars().any(char::is_whitespace) {
        return Err(format!("Target '{}' must not contain whitespace", domain));
    }
    Ok(domain)
}

/// Tab, selection and form state of one session.
///
/// Failed requests are logged and leave the state as it was, apart from the
/// status message on scan submission.
#[derive(Debug, Default)]
pub struct ViewState {
    pub active_tab: Tab,
    pub domain: String,
    pub scan_type: ScanType,
    pub recent_scans: Vec<ResultSummary>,
    pub selected_report: Option<(String, ScanReport)>,
    pub current_scan_id: Option<String>,
    pub status_message: Option<String>,
    pub loading: bool,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
    }

    /// Refresh the recent scans list.
    pub async fn load_recent_scans<A: ScanApi>(&mut self, api: &A) {
        match api.list_results().await {
            Ok(scans) => self.recent_scans = scans,
            Err(e) => tracing::error!("Failed to load scans: {}", e),
        }
    }

    /// Submit the scan form. Returns the new scan ID and switches to the
    /// live terminal view on success.
    pub async fn submit_scan<A: ScanApi>(&mut self, api: &A, domain: &str, scan_type: ScanType) -> Option<String> {
        let domain = match validate_target(domain) {
            Ok(d) => d.to_string(),
            Err(msg) => {
                self.status_message = Some(msg);
                return None;
            }
        };
        self.domain = domain.clone();
        self.scan_type = scan_type;
        self.loading = true;
        self.status_message = Some("Starting scan...".to_string());

        let result = api.start_scan(&domain, scan_type).await;
        self.loading = false;
        match result {
            Ok(res) => {
                tracing::info!("Scan started for {} ({}): {}", domain, scan_type, res.scan_id);
                self.current_scan_id = Some(res.scan_id.clone());
                self.active_tab = Tab::Terminal;
                self.status_message = Some(format!("Scan started! ID: {}", res.scan_id));
                Some(res.scan_id)
            }
            Err(e) => {
                tracing::error!("Failed to start scan for {}: {}", domain, e);
                self.status_message = Some("Error starting scan".to_string());
                None
            }
        }
    }

    /// Load one stored result and switch to the results view.
    pub async fn view_result<A: ScanApi>(&mut self, api: &A, id: &str) -> bool {
        match api.result_detail(id).await {
            Ok(report) => {
                self.selected_report = Some((id.to_string(), report));
                self.active_tab = Tab::Results;
                true
            }
            Err(e) => {
                tracing::error!("Failed to load detail for {}: {}", id, e);
                false
            }
        }
    }

    pub fn stats(&self) -> DashboardStats {
        DashboardStats {
            total: self.recent_scans.len(),
            active: self
                .recent_scans
                .iter()
                .filter(|s| s.status == ScanStatus::Running)
                .count(),
            completed: self
                .recent_scans
                .iter()
                .filter(|s| s.status == ScanStatus::Completed)
                .count(),
        }
    }
}
