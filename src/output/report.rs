use serde_json::Value;
use termtree::Tree;

use crate::model::ScanReport;

/// Header line naming the target and scan type of a report.
pub fn report_header(id: &str, report: &ScanReport) -> String {
    format!(
        "Scan Results: {} ({}) [{}]",
        report.target().unwrap_or("unknown target"),
        report.scan_type().unwrap_or("-"),
        id
    )
}

/// The report as raw formatted text.
pub fn report_text(report: &ScanReport) -> String {
    serde_json::to_string_pretty(&report.0).unwrap_or_else(|_| report.0.to_string())
}

fn scalar_label(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

/// Build a tree node for `value` under `label`.
fn value_tree(label: String, value: &Value) -> Tree<String> {
    match value {
        Value::Object(map) if !map.is_empty() => {
            let mut node = Tree::new(label);
            for (k, v) in map {
                node.push(value_tree(k.clone(), v));
            }
            node
        }
        Value::Array(items) if !items.is_empty() => {
            let mut node = Tree::new(format!("{} ({})", label, items.len()));
            for (i, item) in items.iter().enumerate() {
                match item {
                    Value::Object(_) | Value::Array(_) => {
                        node.push(value_tree(format!("[{}]", i), item));
                    }
                    scalar => {
                        node.push(Tree::new(scalar_label(scalar)));
                    }
                }
            }
            node
        }
        Value::Object(_) => Tree::new(format!("{}: {{}}", label)),
        Value::Array(_) => Tree::new(format!("{}: []", label)),
        scalar => Tree::new(format!("{}: {}", label, scalar_label(scalar))),
    }
}

/// Report as a tree: metadata first, then one branch per scanner section.
pub fn report_tree(id: &str, report: &ScanReport) -> Tree<String> {
    let mut root = Tree::new(report_header(id, report));
    if let Some(ts) = report.timestamp() {
        root.push(Tree::new(format!("timestamp: {}", crate::time::date_label(Some(ts)))));
    }
    if let Some(status) = report.status() {
        root.push(Tree::new(format!("status: {}", status)));
    }
    if report.as_object().is_none() {
        root.push(value_tree("content".to_string(), &report.0));
        return root;
    }
    for (key, value) in report.sections() {
        root.push(value_tree(key.clone(), value));
    }
    root
}

/// Print a report either as a tree or as pretty JSON.
pub fn print_report(id: &str, report: &ScanReport, as_tree: bool) {
    if as_tree {
        println!("{}", report_tree(id, report));
        return;
    }
    println!("{}", report_header(id, report));
    println!();
    println!("{}", report_text(report));
}

/// Placeholder when no report is selected.
pub fn print_no_selection() {
    println!("Select a scan from the Dashboard to view results here.");
}
