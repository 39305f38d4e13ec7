use anyhow::Result;
use serde_json::json;

use crate::api::ScanApi;
use crate::cli::ScanArgs;
use crate::cmd::common::OutputOptions;
use crate::config::ClientConfig;
use crate::view::{Tab, ViewState};

/// Run `scan`: submit the target, then follow it unless detached.
pub async fn run<A: ScanApi>(
    args: ScanArgs,
    api: &A,
    config: &ClientConfig,
    opts: &OutputOptions,
) -> Result<()> {
    let mut view = ViewState::new();
    view.select_tab(Tab::NewScan);

    let scan_type = args.scan_type.to_scan_type();
    let scan_id = view.submit_scan(api, &args.domain, scan_type).await;
    let message = view.status_message.clone().unwrap_or_default();
    let scan_id = match scan_id {
        Some(id) => id,
        None => anyhow::bail!("{}", message),
    };

    if opts.human() {
        println!("{}", message);
        println!();
    }

    if args.detach {
        return opts.write(&json!({
            "scan_id": scan_id,
            "domain": view.domain,
            "scan_type": scan_type,
        }));
    }

    let outcome = super::watch::follow(api, &scan_id, config, opts).await;
    super::watch::finish(api, outcome, args.open_report, opts).await
}
