//! Tables and JSON output

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use serde::Serialize;

use crate::errors::{Result, SkhokhoError};

/// Print a value as pretty JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| SkhokhoError::InvalidJson(e.to_string()))?;
    println!("{}", text);
    Ok(())
}

/// Print rows under a header
pub fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    println!("{}", build_table(headers, rows));
}

fn build_table(headers: &[&str], rows: &[Vec<String>]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(headers.to_vec());
    for row in rows {
        table.add_row(row.clone());
    }
    table
}
