use anyhow::{Context, Result};

use crate::api::ScanApi;
use crate::cli::WatchArgs;
use crate::cmd::common::OutputOptions;
use crate::config::ClientConfig;
use crate::output::terminal::{SilentSink, TerminalRenderer};
use crate::watch::{watch_scan, WatchOutcome};

/// Follow `scan_id` until it reaches a terminal status.
///
/// Returns `None` when the user detached with Ctrl-C; the scan keeps running
/// on the service.
pub async fn follow<A: ScanApi>(
    api: &A,
    scan_id: &str,
    config: &ClientConfig,
    opts: &OutputOptions,
) -> Option<WatchOutcome> {
    let watch = async {
        if opts.human() {
            let span = tracing::info_span!("watch");
            let mut renderer = TerminalRenderer::new().with_spinner(span);
            watch_scan(api, scan_id, config.poll_interval, &mut renderer).await
        } else {
            watch_scan(api, scan_id, config.poll_interval, &mut SilentSink).await
        }
    };

    tokio::select! {
        outcome = watch => Some(outcome),
        _ = tokio::signal::ctrl_c() => {
            tracing::warn!("Detached from scan {}; it keeps running on the service", scan_id);
            None
        }
    }
}

/// Report a finished watch and, when asked, open the completed scan's report.
pub async fn finish<A: ScanApi>(
    api: &A,
    outcome: Option<WatchOutcome>,
    open_report: bool,
    opts: &OutputOptions,
) -> Result<()> {
    let outcome = match outcome {
        Some(o) => o,
        None => return Ok(()),
    };

    let completed = match outcome.report() {
        Some(c) => c.clone(),
        None => {
            opts.write(&outcome)?;
            anyhow::bail!("scan {} ended with status error", outcome.scan_id());
        }
    };

    if !open_report {
        return opts.write(&outcome);
    }

    let report_id = completed.report_id();
    let report = api
        .result_detail(report_id)
        .await
        .with_context(|| format!("failed to load report {}", report_id))?;
    if opts.human() {
        println!();
        crate::output::report::print_report(report_id, &report, false);
    }
    opts.write(&report)
}

/// Run `watch`
pub async fn run<A: ScanApi>(
    args: WatchArgs,
    api: &A,
    config: &ClientConfig,
    opts: &OutputOptions,
) -> Result<()> {
    let outcome = follow(api, &args.scan_id, config, opts).await;
    finish(api, outcome, args.open_report, opts).await
}
