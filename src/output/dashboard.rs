use term_table::row::Row;
use term_table::table_cell::{Alignment, TableCell};
use term_table::{Table, TableStyle};

use crate::model::ResultSummary;
use crate::view::DashboardStats;

pub const EMPTY_STATE: &str = "No scans found.";

const COLUMNS: [&str; 5] = ["Target", "Type", "Status", "Date", "ID"];

fn configure(table: &mut Table) {
    table.max_column_width = 48;
    table.style = TableStyle::thin();
    table.separate_rows = false;
}

/// Total / active / completed counters.
pub fn render_stat_cards(stats: &DashboardStats) -> String {
    let mut table = Table::new();
    configure(&mut table);
    table.add_row(Row::new(vec![
        TableCell::new_with_alignment("Total Scans", 1, Alignment::Center),
        TableCell::new_with_alignment("Active Scans", 1, Alignment::Center),
        TableCell::new_with_alignment("Completed", 1, Alignment::Center),
    ]));
    table.add_row(Row::new(vec![
        TableCell::new_with_alignment(stats.total, 1, Alignment::Center),
        TableCell::new_with_alignment(stats.active, 1, Alignment::Center),
        TableCell::new_with_alignment(stats.completed, 1, Alignment::Center),
    ]));
    table.render()
}

/// Recent scans table. With no scans the body is a single explicit
/// empty-state row.
pub fn render_scan_table(scans: &[ResultSummary]) -> String {
    let mut table = Table::new();
    configure(&mut table);
    table.add_row(Row::new(
        COLUMNS
            .iter()
            .map(|c| TableCell::new_with_alignment(c, 1, Alignment::Left))
            .collect::<Vec<_>>(),
    ));
    if scans.is_empty() {
        table.add_row(Row::new(vec![TableCell::new_with_alignment(
            EMPTY_STATE,
            COLUMNS.len(),
            Alignment::Center,
        )]));
        return table.render();
    }
    for scan in scans {
        table.add_row(Row::new(vec![
            TableCell::new_with_alignment(&scan.domain, 1, Alignment::Left),
            TableCell::new_with_alignment(
                scan.scan_type.map(|t| t.as_str().to_uppercase()).unwrap_or_else(|| "-".to_string()),
                1,
                Alignment::Left,
            ),
            TableCell::new_with_alignment(scan.status.as_str().to_uppercase(), 1, Alignment::Left),
            TableCell::new_with_alignment(
                crate::time::date_label(scan.created_at.as_deref()),
                1,
                Alignment::Left,
            ),
            TableCell::new_with_alignment(&scan.scan_id, 1, Alignment::Left),
        ]));
    }
    table.render()
}

/// Print the dashboard: counters followed by recent scans.
pub fn print_dashboard(stats: &DashboardStats, scans: &[ResultSummary]) {
    println!("[Dashboard]");
    println!("{}", render_stat_cards(stats));
    println!();
    println!("[Recent Scans]");
    println!("{}", render_scan_table(scans));
}

/// Print the results list.
pub fn print_results(scans: &[ResultSummary]) {
    println!("[Scan Results] {} stored", scans.len());
    println!("{}", render_scan_table(scans));
}
