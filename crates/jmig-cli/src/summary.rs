use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use jmig_cli::scan::{ColumnKind, ColumnStats};

use crate::commands::ScanResult;

pub fn print_scan_summary(result: &ScanResult) {
    println!("Input: {}", result.input.display());
    println!("Output: {}", result.output.display());
    println!("Rows: {}", result.report.rows);
    if result.report.columns.is_empty() {
        println!("No compound or date columns found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Kind"),
        header_cell("Cells"),
        header_cell("Resolved"),
        header_cell("Rewritten"),
        header_cell("Repaired"),
        header_cell("Escalated"),
        header_cell("Skipped"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 2..8 {
        align_column(&mut table, index, CellAlignment::Right);
    }

    let mut totals = ColumnStats {
        column: "TOTAL".to_string(),
        kind: ColumnKind::Compound,
        cells: 0,
        resolved: 0,
        rewritten: 0,
        repaired: 0,
        escalated: 0,
        skipped: 0,
    };
    for stats in &result.report.columns {
        totals.cells += stats.cells;
        totals.resolved += stats.resolved;
        totals.rewritten += stats.rewritten;
        totals.repaired += stats.repaired;
        totals.escalated += stats.escalated;
        totals.skipped += stats.skipped;
        table.add_row(vec![
            Cell::new(&stats.column)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            kind_cell(stats.kind),
            Cell::new(stats.cells),
            Cell::new(stats.resolved),
            count_cell(stats.rewritten, Color::Green),
            count_cell(stats.repaired, Color::Yellow),
            count_cell(stats.escalated, Color::Magenta),
            count_cell(stats.skipped, Color::Red),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(totals.cells).add_attribute(Attribute::Bold),
        Cell::new(totals.resolved).add_attribute(Attribute::Bold),
        count_cell(totals.rewritten, Color::Green).add_attribute(Attribute::Bold),
        count_cell(totals.repaired, Color::Yellow).add_attribute(Attribute::Bold),
        count_cell(totals.escalated, Color::Magenta).add_attribute(Attribute::Bold),
        count_cell(totals.skipped, Color::Red).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn kind_cell(kind: ColumnKind) -> Cell {
    match kind {
        ColumnKind::Compound => Cell::new("compound"),
        ColumnKind::Date => Cell::new("date").fg(Color::DarkGrey),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
