use std::io::{self, Write};

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use tcfg_publish::{DispatchStatus, PublishSummary};

pub fn print_upload_summary(summary: &PublishSummary, dry_run: bool) {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(error) = write_upload_summary(summary, dry_run, &mut out) {
        tracing::warn!(%error, "failed to print upload summary");
    }
}

pub fn write_upload_summary<W: Write>(
    summary: &PublishSummary,
    dry_run: bool,
    out: &mut W,
) -> io::Result<()> {
    if !summary.outcomes.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", summary_table(summary))?;
    }
    writeln!(out)?;
    if summary.success() {
        writeln!(out, "Configuration upload completed successfully!")?;
        if dry_run {
            writeln!(out, "Run without --dry-run to actually upload the data.")?;
        }
    } else {
        writeln!(out, "Configuration upload failed!")?;
    }
    Ok(())
}

pub fn summary_table(summary: &PublishSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Dataset"),
        header_cell("Key"),
        header_cell("Records"),
        header_cell("Status"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for outcome in &summary.outcomes {
        table.add_row(vec![
            Cell::new(&outcome.name)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(&outcome.key),
            Cell::new(outcome.records),
            status_cell(&outcome.status),
        ]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn status_cell(status: &DispatchStatus) -> Cell {
    match status {
        DispatchStatus::Uploaded => Cell::new("uploaded")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        DispatchStatus::Previewed => Cell::new("dry run").fg(Color::DarkGrey),
        DispatchStatus::Failed { reason } => Cell::new(format!("failed: {reason}"))
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}
