use std::time::Duration;

use tokio::time::{interval_at, Instant, MissedTickBehavior};

use super::state::{LogUpdate, TerminalState};
use super::WatchOutcome;
use crate::api::{ApiError, ScanApi};
use crate::model::ScanStatus;

/// Receives the reconciled state after every successful poll.
pub trait LogSink {
    /// Called once before the first poll.
    fn started(&mut self, _state: &TerminalState) {}
    /// Called after each successful poll.
    fn update(&mut self, state: &TerminalState, update: LogUpdate, status_changed: bool);
    /// Called when a poll fails. The loop carries on regardless.
    fn poll_failed(&mut self, _error: &ApiError) {}
}

/// Poll `GET /scan/status/{scan_id}` every `poll_interval` until the scan
/// reaches a terminal status.
///
/// The first request goes out one interval after the call. Requests never
/// overlap: the next tick is awaited only after the previous response was
/// handled, and missed ticks are delayed rather than bursted. Failed polls
/// are logged and retried on the next tick without limit. Dropping the
/// returned future stops polling.
pub async fn watch_scan<A, S>(
    api: &A,
    scan_id: &str,
    poll_interval: Duration,
    sink: &mut S,
) -> WatchOutcome
where
    A: ScanApi,
    S: LogSink + ?Sized,
{
    let poll_interval = poll_interval.max(Duration::from_millis(1));
    let mut state = TerminalState::new(scan_id);
    sink.started(&state);

    let mut ticker = interval_at(Instant::now() + poll_interval, poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        match api.scan_status(scan_id).await {
            Ok(snapshot) => {
                let previous = state.status();
                let update = state.apply(snapshot);
                sink.update(&state, update, previous != state.status());
                if let Some(outcome) = state.outcome() {
                    tracing::debug!("Scan {} reached status {}", scan_id, state.status());
                    return outcome;
                }
            }
            Err(e) => {
                // The service answers 404 until its worker has registered the scan
                if e.is_not_found() && state.status() == ScanStatus::Initializing {
                    tracing::debug!("Scan {} not registered yet", scan_id);
                } else {
                    tracing::warn!("Polling error for {}: {}", scan_id, e);
                }
                sink.poll_failed(&e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{service_error, snapshot, ScriptedApi};
    use crate::model::ScanSnapshot;
    use reqwest::StatusCode;

    /// Collects the lines a terminal would print.
    #[derive(Default)]
    struct RecordingSink {
        shown: Vec<String>,
        statuses: Vec<ScanStatus>,
        failures: usize,
        started: bool,
    }

    impl LogSink for RecordingSink {
        fn started(&mut self, state: &TerminalState) {
            assert_eq!(state.status(), ScanStatus::Initializing);
            self.started = true;
        }

        fn update(&mut self, state: &TerminalState, update: LogUpdate, status_changed: bool) {
            match update {
                LogUpdate::Unchanged => {}
                LogUpdate::Appended { from } => self.shown.extend_from_slice(&state.logs()[from..]),
                LogUpdate::Replaced => {
                    self.shown.clear();
                    self.shown.extend_from_slice(state.logs());
                }
            }
            if status_changed {
                self.statuses.push(state.status());
            }
        }

        fn poll_failed(&mut self, _error: &ApiError) {
            self.failures += 1;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn stops_after_completed_without_duplicating_lines() {
        let api = ScriptedApi::with_statuses(vec![
            Ok(snapshot(ScanStatus::Running, &["[*] start"])),
            Ok(snapshot(ScanStatus::Running, &["[*] start", "[+] dns"])),
            Ok(snapshot(ScanStatus::Running, &["[*] start", "[+] dns"])),
            Ok(snapshot(ScanStatus::Completed, &["[*] start", "[+] dns", "[*] done"])),
            Ok(snapshot(ScanStatus::Completed, &["never fetched"])),
        ]);
        let mut sink = RecordingSink::default();
        let started_at = Instant::now();

        let outcome = watch_scan(&api, "scan-1", Duration::from_secs(1), &mut sink).await;

        assert!(sink.started);
        assert_eq!(started_at.elapsed(), Duration::from_secs(4));
        assert_eq!(api.status_calls(), 4);
        assert_eq!(sink.shown, vec!["[*] start", "[+] dns", "[*] done"]);
        assert_eq!(sink.statuses, vec![ScanStatus::Running, ScanStatus::Completed]);
        match outcome {
            WatchOutcome::Completed(c) => {
                assert_eq!(c.scan_id, "scan-1");
                assert_eq!(c.report_id(), "scan-1");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }

        tokio::time::advance(Duration::from_secs(10)).await;
        assert_eq!(api.status_calls(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn transient_errors_do_not_stop_polling() {
        let api = ScriptedApi::with_statuses(vec![
            Err(service_error(StatusCode::NOT_FOUND, "Scan ID not found")),
            Ok(snapshot(ScanStatus::Running, &[])),
            Err(service_error(StatusCode::BAD_GATEWAY, "Bad Gateway")),
            Err(service_error(StatusCode::BAD_GATEWAY, "Bad Gateway")),
            Ok(snapshot(ScanStatus::Completed, &["ok"])),
        ]);
        let mut sink = RecordingSink::default();

        let outcome = watch_scan(&api, "scan-2", Duration::from_secs(1), &mut sink).await;

        assert_eq!(api.status_calls(), 5);
        assert_eq!(sink.failures, 3);
        assert!(outcome.report().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn error_status_stops_polling() {
        let mut failed = snapshot(ScanStatus::Error, &["[!] module crashed"]);
        failed.result_file = Some("ignored.json".into());
        let api = ScriptedApi::with_statuses(vec![
            Ok(snapshot(ScanStatus::Running, &[])),
            Ok(failed),
            Ok(snapshot(ScanStatus::Running, &[])),
        ]);
        let mut sink = RecordingSink::default();

        let outcome = watch_scan(&api, "scan-3", Duration::from_secs(1), &mut sink).await;

        assert_eq!(
            outcome,
            WatchOutcome::Failed {
                scan_id: "scan-3".into()
            }
        );
        assert_eq!(api.status_calls(), 2);
        assert_eq!(sink.shown, vec!["[!] module crashed"]);
    }

    #[tokio::test(start_paused = true)]
    async fn terminal_snapshot_without_logs_ends_the_watch() {
        let done: ScanSnapshot =
            serde_json::from_value(serde_json::json!({"status": "completed", "logs": null})).unwrap();
        let api = ScriptedApi::with_statuses(vec![
            Ok(snapshot(ScanStatus::Running, &["[*] start"])),
            Ok(done),
            Ok(snapshot(ScanStatus::Running, &[])),
        ]);
        let mut sink = RecordingSink::default();

        let outcome = watch_scan(&api, "scan-5", Duration::from_secs(1), &mut sink).await;

        assert_eq!(api.status_calls(), 2);
        assert_eq!(sink.failures, 0);
        assert_eq!(sink.statuses, vec![ScanStatus::Running, ScanStatus::Completed]);
        assert_eq!(outcome.report().map(|c| c.report_id()), Some("scan-5"));
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_watch_stops_requests() {
        let api = ScriptedApi::with_statuses(
            (0..100).map(|_| Ok(snapshot(ScanStatus::Running, &[]))).collect(),
        );
        let mut sink = RecordingSink::default();

        let watch = watch_scan(&api, "scan-4", Duration::from_secs(1), &mut sink);
        let res = tokio::time::timeout(Duration::from_millis(3500), watch).await;
        assert!(res.is_err());
        assert_eq!(api.status_calls(), 3);
    }
}
