//! Terminal-aware table utilities.

use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

const FALLBACK_WIDTH: u16 = 80;

/// Width of the attached terminal, or 80 columns when not on a TTY.
#[must_use]
pub fn terminal_width() -> usize {
    let width = crossterm::terminal::size().map_or(FALLBACK_WIDTH, |(w, _)| w);
    usize::from(if width == 0 { FALLBACK_WIDTH } else { width })
}

/// Create a table sized to the terminal.
#[must_use]
pub fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_width(u16::try_from(terminal_width()).unwrap_or(FALLBACK_WIDTH));
    table
}

/// Property/Value table for `svn info` rows.
#[must_use]
pub fn info_table(rows: &[(String, String)]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Property", "Value"]);
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label).fg(Color::DarkYellow), Cell::new(value)]);
    }
    table
}
