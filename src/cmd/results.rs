use anyhow::{Context, Result};
use serde_json::json;

use crate::api::ScanApi;
use crate::cli::ReportArgs;
use crate::cmd::common::OutputOptions;
use crate::view::{Tab, ViewState};

/// Run `results`
pub async fn run_list<A: ScanApi>(api: &A, opts: &OutputOptions) -> Result<()> {
    let scans = api.list_results().await.context("failed to list results")?;
    if opts.human() {
        crate::output::dashboard::print_results(&scans);
    }
    opts.write(&scans)
}

/// Run `dashboard`
pub async fn run_dashboard<A: ScanApi>(api: &A, opts: &OutputOptions) -> Result<()> {
    let mut view = ViewState::new();
    view.select_tab(Tab::Dashboard);
    view.recent_scans = api.list_results().await.context("failed to list results")?;
    let stats = view.stats();
    if opts.human() {
        crate::output::dashboard::print_dashboard(&stats, &view.recent_scans);
    }
    opts.write(&json!({
        "stats": stats,
        "recent_scans": view.recent_scans,
    }))
}

/// Run `report`
pub async fn run_report<A: ScanApi>(args: ReportArgs, api: &A, opts: &OutputOptions) -> Result<()> {
    let report = api
        .result_detail(&args.id)
        .await
        .with_context(|| format!("failed to load report {}", args.id))?;
    if opts.human() {
        crate::output::report::print_report(&args.id, &report, args.tree);
    }
    opts.write(&report)
}
