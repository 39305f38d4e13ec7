use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use reqwest::StatusCode;

use super::{ApiError, ScanApi};
use crate::model::{
    ResultSummary, ScanReport, ScanSnapshot, ScanStatus, ScanType, StartScanResponse,
};

/// In-memory `ScanApi` that replays scripted responses and counts calls.
#[derive(Default)]
pub struct ScriptedApi {
    pub statuses: Mutex<VecDeque<Result<ScanSnapshot, ApiError>>>,
    pub start_result: Option<String>,
    pub results: Option<Vec<ResultSummary>>,
    pub reports: HashMap<String, ScanReport>,
    pub start_calls: AtomicUsize,
    pub status_calls: AtomicUsize,
    pub results_calls: AtomicUsize,
    pub detail_calls: AtomicUsize,
    pub last_start: Mutex<Option<(String, ScanType)>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_statuses(statuses: Vec<Result<ScanSnapshot, ApiError>>) -> Self {
        Self {
            statuses: Mutex::new(statuses.into()),
            ..Self::default()
        }
    }

    pub fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }

    pub fn start_calls(&self) -> usize {
        self.start_calls.load(Ordering::SeqCst)
    }
}

pub fn service_error(status: StatusCode, message: &str) -> ApiError {
    ApiError::Status {
        url: "http://localhost:5000/api".to_string(),
        status,
        message: message.to_string(),
    }
}

pub fn snapshot(status: ScanStatus, logs: &[&str]) -> ScanSnapshot {
    ScanSnapshot {
        status,
        logs: logs.iter().map(|l| l.to_string()).collect(),
        domain: Some("example.com".to_string()),
        scan_type: Some(ScanType::Deep),
        start_time: Some("2025-03-01T10:15:30.123456".to_string()),
        end_time: None,
        result_file: None,
    }
}

pub fn summary(scan_id: &str, status: ScanStatus) -> ResultSummary {
    ResultSummary {
        scan_id: scan_id.to_string(),
        domain: "example.com".to_string(),
        scan_type: Some(ScanType::Lite),
        status,
        created_at: Some("2025-03-01T10:15:30".to_string()),
    }
}

impl ScanApi for ScriptedApi {
    async fn start_scan(&self, domain: &str, scan_type: ScanType) -> Result<StartScanResponse, ApiError> {
        self.start_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_start.lock().unwrap() = Some((domain.to_string(), scan_type));
        match &self.start_result {
            Some(id) => Ok(StartScanResponse {
                scan_id: id.clone(),
                message: Some("Scan started".to_string()),
            }),
            None => Err(service_error(StatusCode::INTERNAL_SERVER_ERROR, "boom")),
        }
    }

    async fn scan_status(&self, _scan_id: &str) -> Result<ScanSnapshot, ApiError> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        match self.statuses.lock().unwrap().pop_front() {
            Some(r) => r,
            None => Err(service_error(StatusCode::NOT_FOUND, "Scan ID not found")),
        }
    }

    async fn scan_logs(&self, _scan_id: &str) -> Result<Vec<String>, ApiError> {
        Ok(Vec::new())
    }

    async fn list_results(&self) -> Result<Vec<ResultSummary>, ApiError> {
        self.results_calls.fetch_add(1, Ordering::SeqCst);
        match &self.results {
            Some(r) => Ok(r.clone()),
            None => Err(service_error(StatusCode::BAD_GATEWAY, "Bad Gateway")),
        }
    }

    async fn result_detail(&self, id: &str) -> Result<ScanReport, ApiError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        self.reports
            .get(id)
            .cloned()
            .ok_or_else(|| service_error(StatusCode::NOT_FOUND, "File not found"))
    }
}
