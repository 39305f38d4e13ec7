use std::fmt;

use anyhow::Result;
use inquire::{Confirm, InquireError, Select, Text};

use crate::api::ScanApi;
use crate::cmd::common::OutputOptions;
use crate::config::ClientConfig;
use crate::model::{ResultSummary, ScanType};
use crate::output::{dashboard, report};
use crate::view::{Tab, ViewState};
use crate::watch::WatchOutcome;

/// Map a cancelled prompt (Esc / Ctrl-C) to `None`.
fn prompt_answer<T>(res: Result<T, InquireError>) -> Result<Option<T>> {
    match res {
        Ok(v) => Ok(Some(v)),
        Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum MenuItem {
    Open(Tab),
    Quit,
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuItem::Open(tab) => write!(f, "{}", tab),
            MenuItem::Quit => f.write_str("Quit"),
        }
    }
}

struct ScanTypeOption(ScanType);

impl fmt::Display for ScanTypeOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            ScanType::Deep => f.write_str("Deep Scan - Comprehensive analysis (Slower)"),
            ScanType::Lite => f.write_str("Lite Scan - Quick overview (Faster)"),
        }
    }
}

struct ResultOption(ResultSummary);

impl fmt::Display for ResultOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {} - {}",
            self.0.domain,
            self.0.scan_type.map(|t| t.as_str()).unwrap_or("-").to_uppercase(),
            self.0.status.as_str().to_uppercase(),
            self.0.scan_id
        )
    }
}

/// Run `console`: an interactive session over the dashboard views.
pub async fn run<A: ScanApi>(api: &A, config: &ClientConfig) -> Result<()> {
    let mut view = ViewState::new();
    view.load_recent_scans(api).await;
    dashboard::print_dashboard(&view.stats(), &view.recent_scans);

    let menu = vec![
        MenuItem::Open(Tab::Dashboard),
        MenuItem::Open(Tab::NewScan),
        MenuItem::Open(Tab::Results),
        MenuItem::Quit,
    ];

    loop {
        println!();
        let choice = match prompt_answer(Select::new("CTS Recon", menu.clone()).prompt())? {
            Some(c) => c,
            None => break,
        };
        match choice {
            MenuItem::Open(Tab::Dashboard) => {
                view.select_tab(Tab::Dashboard);
                view.load_recent_scans(api).await;
                dashboard::print_dashboard(&view.stats(), &view.recent_scans);
            }
            MenuItem::Open(Tab::NewScan) => {
                view.select_tab(Tab::NewScan);
                new_scan(api, config, &mut view).await?;
            }
            MenuItem::Open(Tab::Results) | MenuItem::Open(Tab::Terminal) => {
                view.select_tab(Tab::Results);
                browse_results(api, &mut view).await?;
            }
            MenuItem::Quit => break,
        }
    }
    Ok(())
}

async fn new_scan<A: ScanApi>(api: &A, config: &ClientConfig, view: &mut ViewState) -> Result<()> {
    let domain = match prompt_answer(
        Text::new("Target Domain / IP")
            .with_placeholder("example.com")
            .prompt(),
    )? {
        Some(d) => d,
        None => return Ok(()),
    };
    let options = vec![ScanTypeOption(ScanType::Deep), ScanTypeOption(ScanType::Lite)];
    let scan_type = match prompt_answer(Select::new("Scan Type", options).prompt())? {
        Some(o) => o.0,
        None => return Ok(()),
    };

    let scan_id = view.submit_scan(api, &domain, scan_type).await;
    if let Some(message) = &view.status_message {
        println!("{}", message);
    }
    let scan_id = match scan_id {
        Some(id) => id,
        None => return Ok(()),
    };

    println!();
    let outcome = super::watch::follow(api, &scan_id, config, &OutputOptions::default()).await;
    if let Some(WatchOutcome::Completed(completed)) = outcome {
        let open = prompt_answer(
            Confirm::new("ACCESS REPORT DATA?")
                .with_default(true)
                .prompt(),
        )?;
        if open == Some(true) {
            view.load_recent_scans(api).await;
            if view.view_result(api, completed.report_id()).await {
                show_selected(view);
            }
        }
    }
    Ok(())
}

async fn browse_results<A: ScanApi>(api: &A, view: &mut ViewState) -> Result<()> {
    view.load_recent_scans(api).await;
    if view.recent_scans.is_empty() {
        println!("{}", dashboard::render_scan_table(&view.recent_scans));
        show_selected(view);
        return Ok(());
    }
    let options: Vec<ResultOption> = view.recent_scans.iter().cloned().map(ResultOption).collect();
    let chosen = match prompt_answer(Select::new("View Report", options).prompt())? {
        Some(o) => o.0,
        None => {
            show_selected(view);
            return Ok(());
        }
    };
    if view.view_result(api, &chosen.scan_id).await {
        show_selected(view);
    }
    Ok(())
}

fn show_selected(view: &ViewState) {
    match &view.selected_report {
        Some((id, selected)) => report::print_report(id, selected, false),
        None => report::print_no_selection(),
    }
}
