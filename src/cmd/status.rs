use anyhow::{Context, Result};
use termtree::Tree;

use crate::api::ScanApi;
use crate::cli::ScanIdArgs;
use crate::cmd::common::OutputOptions;
use crate::model::ScanSnapshot;

/// Number of trailing log lines shown in the status tree.
const TAIL_LINES: usize = 10;

/// Build the status tree of one snapshot.
pub fn status_tree(scan_id: &str, snap: &ScanSnapshot) -> Tree<String> {
    let mut root = Tree::new(format!("Scan {}", scan_id));
    root.push(Tree::new(format!("status: {}", snap.status.as_str().to_uppercase())));
    if let Some(domain) = &snap.domain {
        root.push(Tree::new(format!("target: {}", domain)));
    }
    if let Some(t) = snap.scan_type {
        root.push(Tree::new(format!("type: {}", t)));
    }
    root.push(Tree::new(format!(
        "started: {}",
        crate::time::clock_label(snap.start_time.as_deref())
    )));
    if snap.end_time.is_some() {
        root.push(Tree::new(format!(
            "ended: {}",
            crate::time::clock_label(snap.end_time.as_deref())
        )));
    }
    if let Some(file) = &snap.result_file {
        root.push(Tree::new(format!("result: {}", file)));
    }
    let mut logs = Tree::new(format!("logs ({})", snap.logs.len()));
    let skip = snap.logs.len().saturating_sub(TAIL_LINES);
    for line in &snap.logs[skip..] {
        logs.push(Tree::new(line.clone()));
    }
    root.push(logs);
    root
}

/// Run `status`
pub async fn run<A: ScanApi>(args: ScanIdArgs, api: &A, opts: &OutputOptions) -> Result<()> {
    let snap = api
        .scan_status(&args.scan_id)
        .await
        .with_context(|| format!("failed to fetch status of {}", args.scan_id))?;
    if opts.human() {
        println!("{}", status_tree(&args.scan_id, &snap));
    }
    opts.write(&snap)
}
