pub mod client;
pub mod error;
#[cfg(test)]
pub mod testing;

pub use client::ReconClient;
pub use error::ApiError;

use crate::model::{ResultSummary, ScanReport, ScanSnapshot, ScanType, StartScanResponse};

/// Operations the recon service exposes under its `/api` base path.
///
/// Every call is a plain request/response pass-through. Callers decide
/// what to do with failures.
#[allow(async_fn_in_trait)]
pub trait ScanApi {
    /// `POST /scan/start`
    async fn start_scan(&self, domain: &str, scan_type: ScanType) -> Result<StartScanResponse, ApiError>;
    /// `GET /scan/status/{scan_id}`
    async fn scan_status(&self, scan_id: &str) -> Result<ScanSnapshot, ApiError>;
    /// `GET /scan/logs/{scan_id}`
    async fn scan_logs(&self, scan_id: &str) -> Result<Vec<String>, ApiError>;
    /// `GET /results`
    async fn list_results(&self) -> Result<Vec<ResultSummary>, ApiError>;
    /// `GET /results/{id}`
    async fn result_detail(&self, id: &str) -> Result<ScanReport, ApiError>;
}
