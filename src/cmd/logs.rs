use anyhow::{Context, Result};

use crate::api::ScanApi;
use crate::cli::ScanIdArgs;
use crate::cmd::common::OutputOptions;

/// Run `logs`
pub async fn run<A: ScanApi>(args: ScanIdArgs, api: &A, opts: &OutputOptions) -> Result<()> {
    let lines = api
        .scan_logs(&args.scan_id)
        .await
        .with_context(|| format!("failed to fetch logs of {}", args.scan_id))?;
    if opts.human() {
        if lines.is_empty() {
            println!("{}", crate::output::terminal::AWAITING_OUTPUT);
        }
        for line in &lines {
            println!("{}", line);
        }
    }
    opts.write(&lines)
}
