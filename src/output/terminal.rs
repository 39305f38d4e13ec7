use tracing::Span;
use tracing_indicatif::span_ext::IndicatifSpanExt;

use crate::api::ApiError;
use crate::watch::{CompletedScan, LogSink, LogUpdate, TerminalState};

pub const TERMINAL_TITLE: &str = "CTS_RECON_TERMINAL_v2.0";
pub const AWAITING_OUTPUT: &str = "Initializing scan sequence... awaiting output...";
pub const LOG_RESET_MARKER: &str = "--- log sequence reset by service ---";

/// Prefix a log line with its display time.
pub fn format_log_line(clock: &str, line: &str) -> String {
    format!("[{}] {}", clock, line)
}

/// Banner for a completed scan, carrying its single access-report action.
pub fn completion_banner(completed: &CompletedScan) -> Vec<String> {
    vec![
        String::new(),
        "[+] SCAN SEQUENCE COMPLETE".to_string(),
        "    Results generated and stored successfully.".to_string(),
        format!(
            "    ACCESS REPORT DATA: {} report {}",
            crate::app::CRATE_BIN_NAME,
            completed.report_id()
        ),
    ]
}

/// Banner for a scan that ended with status `error`.
pub fn failure_banner() -> Vec<String> {
    vec![
        String::new(),
        "[!] SYSTEM FAILURE".to_string(),
        "    Critical process termination. Check system logs.".to_string(),
    ]
}

/// Live terminal view of a watched scan.
pub struct TerminalRenderer {
    spinner: Option<Span>,
    header_shown: bool,
    clock: fn() -> String,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            spinner: None,
            header_shown: false,
            clock: crate::time::now_clock,
        }
    }

    /// Show the current status on a spinner attached to `span`.
    pub fn with_spinner(mut self, span: Span) -> Self {
        span.pb_set_style(&crate::output::progress::get_spinner_style());
        span.pb_set_message("status: initializing");
        span.pb_start();
        self.spinner = Some(span);
        self
    }

    /// Lines to print for one reconciled update.
    pub fn render(&mut self, state: &TerminalState, update: LogUpdate, status_changed: bool) -> Vec<String> {
        let mut lines = Vec::new();

        if !self.header_shown {
            if let Some(meta) = state.metadata() {
                lines.push(format!(
                    "target: {} | type: {} | started: {}",
                    meta.domain.as_deref().unwrap_or("-"),
                    meta.scan_type.map(|t| t.as_str()).unwrap_or("-"),
                    crate::time::clock_label(meta.start_time.as_deref()),
                ));
                self.header_shown = true;
            }
        }

        if status_changed {
            lines.push(format!("[status] {}", state.status().as_str().to_uppercase()));
        }

        let clock = (self.clock)();
        match update {
            LogUpdate::Unchanged => {}
            LogUpdate::Appended { from } => {
                for line in &state.logs()[from..] {
                    lines.push(format_log_line(&clock, line));
                }
            }
            LogUpdate::Replaced => {
                lines.push(LOG_RESET_MARKER.to_string());
                for line in state.logs() {
                    lines.push(format_log_line(&clock, line));
                }
            }
        }

        if status_changed {
            if let Some(outcome) = state.outcome() {
                match outcome.report() {
                    Some(completed) => lines.extend(completion_banner(completed)),
                    None => lines.extend(failure_banner()),
                }
            }
        }

        lines
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl LogSink for TerminalRenderer {
    fn started(&mut self, state: &TerminalState) {
        crate::output::emit(&format!("{} :: {}", TERMINAL_TITLE, state.scan_id()));
        crate::output::emit(AWAITING_OUTPUT);
    }

    fn update(&mut self, state: &TerminalState, update: LogUpdate, status_changed: bool) {
        let lines = self.render(state, update, status_changed);
        if let Some(span) = &self.spinner {
            span.pb_set_message(&format!("status: {}", state.status()));
        }
        crate::output::emit_all(lines);
    }

    fn poll_failed(&mut self, error: &ApiError) {
        if let Some(span) = &self.spinner {
            span.pb_set_message(&format!("status: retrying ({})", short_reason(error)));
        }
    }
}

fn short_reason(error: &ApiError) -> String {
    match error.status() {
        Some(status) => status.to_string(),
        None => "unreachable".to_string(),
    }
}

/// Sink that only tracks state, for machine-readable output modes.
#[derive(Default)]
pub struct SilentSink;

impl LogSink for SilentSink {
    fn update(&mut self, _state: &TerminalState, _update: LogUpdate, _status_changed: bool) {}
}
