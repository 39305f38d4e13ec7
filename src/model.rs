use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Scan depth mode
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ScanType {
    Lite,
    #[default]
    Deep,
}

impl ScanType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanType::Lite => "lite",
            ScanType::Deep => "deep",
        }
    }

    pub fn from_str(s: &str) -> Option<ScanType> {
        match s.to_ascii_lowercase().as_str() {
            "lite" => Some(ScanType::Lite),
            "deep" => Some(ScanType::Deep),
            _ => None,
        }
    }
}

impl fmt::Display for ScanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scan lifecycle status as reported by the service.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ScanStatus {
    Initializing,
    Running,
    Completed,
    Error,
    #[serde(other)]
    Unknown,
}

impl ScanStatus {
    /// `completed` and `error` end a scan; nothing is polled after them.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ScanStatus::Completed | ScanStatus::Error)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScanStatus::Initializing => "initializing",
            ScanStatus::Running => "running",
            ScanStatus::Completed => "completed",
            ScanStatus::Error => "error",
            ScanStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `POST /scan/start`
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StartScanRequest {
    pub domain: String,
    pub scan_type: ScanType,
}

/// Response of `POST /scan/start`
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StartScanResponse {
    pub scan_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// One status snapshot from `GET /scan/status/{id}`.
///
/// `logs` always carries the full log sequence, not a delta.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ScanSnapshot {
    pub status: ScanStatus,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub logs: Vec<String>,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "lenient_scan_type")]
    pub scan_type: Option<ScanType>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_file: Option<String>,
}

/// A `null` log sequence is read as empty.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Scan modes other than `lite` and `deep` are read as absent.
fn lenient_scan_type<'de, D>(deserializer: D) -> Result<Option<ScanType>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Value::as_str)
        .and_then(ScanType::from_str))
}

/// Summary row of a stored scan result.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ResultSummary {
    pub scan_id: String,
    pub domain: String,
    #[serde(default, rename = "type", deserialize_with = "lenient_scan_type")]
    pub scan_type: Option<ScanType>,
    pub status: ScanStatus,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl ResultSummary {
    /// Derive a summary from a stored result file name (`<domain>_<type>.json`).
    pub fn from_file_name(file_name: &str) -> ResultSummary {
        let stem = file_name.strip_suffix(".json").unwrap_or(file_name);
        let (domain, scan_type) = match stem.rsplit_once('_') {
            Some((domain, suffix)) => match ScanType::from_str(suffix) {
                Some(t) => (domain.to_string(), Some(t)),
                None => (stem.to_string(), None),
            },
            None => (stem.to_string(), None),
        };
        ResultSummary {
            scan_id: file_name.to_string(),
            domain,
            scan_type,
            status: ScanStatus::Completed,
            created_at: None,
        }
    }
}

/// `GET /results` entries are either summary objects or bare file names.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum ResultEntry {
    Summary(ResultSummary),
    FileName(String),
}

impl ResultEntry {
    pub fn into_summary(self) -> ResultSummary {
        match self {
            ResultEntry::Summary(s) => s,
            ResultEntry::FileName(name) => ResultSummary::from_file_name(&name),
        }
    }
}

/// Log payload of `GET /scan/logs/{id}`
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum LogPayload {
    Lines(Vec<String>),
    Wrapped { logs: Vec<String> },
}

impl LogPayload {
    pub fn into_lines(self) -> Vec<String> {
        match self {
            LogPayload::Lines(lines) => lines,
            LogPayload::Wrapped { logs } => logs,
        }
    }
}

const REPORT_META_KEYS: [&str; 4] = ["target", "scan_type", "timestamp", "status"];

/// Full result detail object. The content is scanner-defined.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct ScanReport(pub Value);

impl ScanReport {
    fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|v| v.as_str())
    }

    pub fn target(&self) -> Option<&str> {
        self.str_field("target")
    }

    pub fn scan_type(&self) -> Option<&str> {
        self.str_field("scan_type")
    }

    pub fn timestamp(&self) -> Option<&str> {
        self.str_field("timestamp")
    }

    pub fn status(&self) -> Option<&str> {
        self.str_field("status")
    }

    /// Top-level sections other than the report metadata, in key order.
    pub fn sections(&self) -> Vec<(&String, &Value)> {
        match self.0.as_object() {
            Some(map) => map
                .iter()
                .filter(|(k, _)| !REPORT_META_KEYS.contains(&k.as_str()))
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn as_object(&self) -> Option<&Map<String, Value>> {
        self.0.as_object()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn snapshot_defaults_missing_fields() {
        let snap: ScanSnapshot = serde_json::from_value(json!({
            "status": "running",
            "domain": "example.com",
            "type": "lite",
            "start_time": "2025-03-01T10:15:30.123456"
        }))
        .unwrap();
        assert_eq!(snap.status, ScanStatus::Running);
        assert!(snap.logs.is_empty());
        assert_eq!(snap.scan_type, Some(ScanType::Lite));
        assert_eq!(snap.result_file, None);
    }

    #[test]
    fn null_logs_decode_as_empty() {
        let snap: ScanSnapshot =
            serde_json::from_value(json!({"status": "completed", "logs": null})).unwrap();
        assert_eq!(snap.status, ScanStatus::Completed);
        assert!(snap.logs.is_empty());
    }

    #[test]
    fn unrecognised_status_is_unknown() {
        let snap: ScanSnapshot =
            serde_json::from_value(json!({"status": "queued", "logs": ["a"]})).unwrap();
        assert_eq!(snap.status, ScanStatus::Unknown);
        assert!(!snap.status.is_terminal());
        assert!(ScanStatus::Completed.is_terminal());
        assert!(ScanStatus::Error.is_terminal());
    }

    #[test]
    fn start_request_uses_wire_names() {
        let req = StartScanRequest {
            domain: "example.com".into(),
            scan_type: ScanType::Deep,
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"domain": "example.com", "scan_type": "deep"})
        );
    }

    #[test]
    fn result_entries_accept_both_shapes() {
        let entries: Vec<ResultEntry> = serde_json::from_value(json!([
            "sub_domain.example.com_lite.json",
            {
                "scan_id": "example.org_deep_1700000000",
                "domain": "example.org",
                "type": "deep",
                "status": "running",
                "created_at": "2025-03-01T10:15:30"
            }
        ]))
        .unwrap();
        let summaries: Vec<ResultSummary> =
            entries.into_iter().map(ResultEntry::into_summary).collect();

        assert_eq!(summaries[0].scan_id, "sub_domain.example.com_lite.json");
        assert_eq!(summaries[0].domain, "sub_domain.example.com");
        assert_eq!(summaries[0].scan_type, Some(ScanType::Lite));
        assert_eq!(summaries[0].status, ScanStatus::Completed);

        assert_eq!(summaries[1].domain, "example.org");
        assert_eq!(summaries[1].status, ScanStatus::Running);
    }

    #[test]
    fn summary_with_unknown_mode_keeps_the_list() {
        let entries: Vec<ResultEntry> = serde_json::from_value(json!([
            {
                "scan_id": "a",
                "domain": "a.example",
                "type": "stealth",
                "status": "completed"
            },
            {
                "scan_id": "b",
                "domain": "b.example",
                "type": null,
                "status": "running"
            },
            {
                "scan_id": "c",
                "domain": "c.example",
                "status": "error"
            }
        ]))
        .unwrap();
        let summaries: Vec<ResultSummary> =
            entries.into_iter().map(ResultEntry::into_summary).collect();

        assert_eq!(summaries.len(), 3);
        assert_eq!(summaries[0].scan_id, "a");
        assert!(summaries.iter().all(|s| s.scan_type.is_none()));
        assert_eq!(summaries[2].status, ScanStatus::Error);

        let snap: ScanSnapshot =
            serde_json::from_value(json!({"status": "running", "type": "stealth"})).unwrap();
        assert_eq!(snap.scan_type, None);
    }

    #[test]
    fn file_name_without_mode_keeps_stem() {
        let s = ResultSummary::from_file_name("legacy.json");
        assert_eq!(s.domain, "legacy");
        assert_eq!(s.scan_type, None);
    }

    #[test]
    fn report_sections_skip_metadata() {
        let report = ScanReport(json!({
            "target": "example.com",
            "scan_type": "lite",
            "timestamp": "2025-03-01T10:15:30+00:00",
            "status": "completed",
            "subdomain": ["a.example.com"],
            "whois": {"registrar": "x"}
        }));
        assert_eq!(report.target(), Some("example.com"));
        let keys: Vec<&str> = report.sections().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["subdomain", "whois"]);
    }

    #[test]
    fn log_payload_shapes() {
        let a: LogPayload = serde_json::from_value(json!(["x", "y"])).unwrap();
        let b: LogPayload = serde_json::from_value(json!({"logs": ["z"]})).unwrap();
        assert_eq!(a.into_lines(), vec!["x", "y"]);
        assert_eq!(b.into_lines(), vec!["z"]);
    }
}
