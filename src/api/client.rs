use std::time::Duration;

use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;

use super::error::{error_message_from_body, ApiError};
use super::ScanApi;
use crate::config::ClientConfig;
use crate::model::{
    LogPayload, ResultEntry, ResultSummary, ScanReport, ScanSnapshot, ScanType,
    StartScanRequest, StartScanResponse,
};

/// HTTP client for the recon service.
///
/// Holds one pooled `reqwest::Client` and the `/api` base URL. No retries
/// and no caching; each method maps to exactly one request.
#[derive(Clone, Debug)]
pub struct ReconClient {
    client: Client,
    base_url: Url,
}

impl ReconClient {
    /// Create a client for `base_url` with a per-request `timeout`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = parse_base_url(base_url)?;
        let client = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(2)
            .build()
            .map_err(ApiError::Client)?;
        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        Self::new(&config.api_url, config.request_timeout)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Base URL extended by `segments`, each percent-encoded as one path segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        tracing::debug!("GET {}", url);
        let resp = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| ApiError::Request {
                url: url.to_string(),
                source: e,
            })?;
        decode_response(&url, resp).await
    }
}

fn parse_base_url(base_url: &str) -> Result<Url, ApiError> {
    let url = Url::parse(base_url).map_err(|e| ApiError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(ApiError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: "expected an http(s) URL".to_string(),
        });
    }
    Ok(url)
}

async fn decode_response<T: DeserializeOwned>(url: &Url, resp: Response) -> Result<T, ApiError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ApiError::Status {
            url: url.to_string(),
            status,
            message: error_message_from_body(&body),
        });
    }
    resp.json::<T>().await.map_err(|e| ApiError::Decode {
        url: url.to_string(),
        source: e,
    })
}

impl ScanApi for ReconClient {
    async fn start_scan(&self, domain: &str, scan_type: ScanType) -> Result<StartScanResponse, ApiError> {
        let url = self.endpoint(&["scan", "start"]);
        let body = StartScanRequest {
            domain: domain.to_string(),
            scan_type,
        };
        tracing::debug!("POST {}", url);
        let resp = self
            .client
            .post(url.clone())
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::Request {
                url: url.to_string(),
                source: e,
            })?;
        decode_response(&url, resp).await
    }

    async fn scan_status(&self, scan_id: &str) -> Result<ScanSnapshot, ApiError> {
        self.get_json(self.endpoint(&["scan", "status", scan_id])).await
    }

    async fn scan_logs(&self, scan_id: &str) -> Result<Vec<String>, ApiError> {
        let payload: LogPayload = self.get_json(self.endpoint(&["scan", "logs", scan_id])).await?;
        Ok(payload.into_lines())
    }

    async fn list_results(&self) -> Result<Vec<ResultSummary>, ApiError> {
        let entries: Vec<ResultEntry> = self.get_json(self.endpoint(&["results"])).await?;
        Ok(entries.into_iter().map(ResultEntry::into_summary).collect())
    }

    async fn result_detail(&self, id: &str) -> Result<ScanReport, ApiError> {
        self.get_json(self.endpoint(&["results", id])).await
    }
}
