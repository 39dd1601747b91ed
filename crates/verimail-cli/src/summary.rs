//! Terminal rendering of address lists, verdict tables, and the summary chart.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use verimail_model::{Reachability, ResultSet, StatusTone, VerificationResult};
use verimail_present::{
    ChartBar, Column, ColumnKind, SortDirection, SortState, TableView, VirtualWindow,
};

/// Lines a results table needs besides its rows (borders and header).
pub const TABLE_CHROME_LINES: u16 = 4;

/// Lines printed around the table by [`render_view`] (filter and footer lines).
pub const VIEW_EXTRA_LINES: u16 = 2;

/// Lines taken by one results row.
pub const RESULT_ROW_HEIGHT: usize = 1;

/// Full chart bar length in cells.
const CHART_BAR_WIDTH: u16 = 30;

const DEFAULT_TERMINAL_SIZE: (u16, u16) = (120, 24);

/// When table output may contain ANSI styling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Styling {
    /// Style only when stdout is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

/// Current terminal size as `(columns, rows)`, measured on every call.
pub fn terminal_size() -> (u16, u16) {
    crossterm::terminal::size().unwrap_or(DEFAULT_TERMINAL_SIZE)
}

/// Rows of results that fit the terminal below the chart, if one is shown.
pub fn viewport_rows(terminal_rows: u16, chart_lines: u16) -> usize {
    let reserved = TABLE_CHROME_LINES + VIEW_EXTRA_LINES + chart_lines + 1;
    usize::from(terminal_rows.saturating_sub(reserved).max(1))
}

pub fn apply_table_style(table: &mut Table, styling: Styling) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    if let Ok((columns, _)) = crossterm::terminal::size() {
        table.set_width(columns);
    }
    match styling {
        Styling::Auto => {}
        Styling::Always => {
            table.enforce_styling();
        }
        Styling::Never => {
            table.force_no_tty();
        }
    }
}

fn apply_chart_table_style(table: &mut Table, styling: Styling) {
    apply_table_style(table, styling);
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS);
}

/// Colour used for a status badge or chart bar.
pub fn tone_color(tone: StatusTone) -> Color {
    match tone {
        StatusTone::Positive => Color::Green,
        StatusTone::Caution => Color::Yellow,
        StatusTone::Negative => Color::Red,
        StatusTone::Neutral => Color::Grey,
        StatusTone::Accent => Color::Blue,
    }
}

/// Header text with the sort marker of the active column.
pub fn header_label(column: Column, sort: Option<SortState>) -> String {
    match sort {
        Some(SortState {
            column: sorted,
            direction,
        }) if sorted == column => {
            let arrow = match direction {
                SortDirection::Ascending => "▲",
                SortDirection::Descending => "▼",
            };
            format!("{} {arrow}", column.header())
        }
        _ => column.header().to_string(),
    }
}

/// Table of verdict rows.
pub fn results_table(
    rows: &[&VerificationResult],
    sort: Option<SortState>,
    styling: Styling,
) -> Table {
    let mut table = Table::new();
    table.set_header(
        Column::ALL
            .iter()
            .map(|column| header_cell(&header_label(*column, sort))),
    );
    apply_table_style(&mut table, styling);
    for (index, column) in Column::ALL.iter().enumerate() {
        if column.kind() == ColumnKind::Boolean {
            align_column(&mut table, index, CellAlignment::Center);
        }
    }
    for row in rows {
        table.add_row(Column::ALL.iter().map(|column| result_cell(*column, row)));
    }
    table
}

fn result_cell(column: Column, item: &VerificationResult) -> Cell {
    let text = column.display(item);
    match column {
        Column::Email => Cell::new(text),
        Column::Status => Cell::new(text)
            .fg(tone_color(item.is_reachable.tone()))
            .add_attribute(Attribute::Bold),
        _ if column.flag().and_then(|flag| item.flag(flag)).is_none() => dim_cell(text),
        _ => Cell::new(text),
    }
}

/// Bar glyphs for a chart bar at the given full width.
pub fn bar_text(bar: &ChartBar, width: u16) -> String {
    "█".repeat(usize::from(bar.scaled(width)))
}

/// The summary chart as a table of horizontal bars.
pub fn chart_table(bars: &[ChartBar], styling: Styling) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Status"),
        header_cell(""),
        header_cell("Count"),
        header_cell("Share"),
    ]);
    apply_chart_table_style(&mut table, styling);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for bar in bars {
        let color = tone_color(bar.key.tone());
        table.add_row(vec![
            Cell::new(bar.key.label()).fg(color),
            Cell::new(bar_text(bar, CHART_BAR_WIDTH)).fg(color),
            Cell::new(bar.value),
            dim_cell(bar.percentage_label()),
        ]);
    }
    table
}

/// Lines the chart table occupies.
pub fn chart_lines(bars: &[ChartBar]) -> u16 {
    // Borders, header, header separator, and a separator between rows.
    u16::try_from(bars.len() * 2 + 3).unwrap_or(u16::MAX)
}

/// Numbered address list.
pub fn address_table(addresses: &[String], styling: Styling) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("#"), header_cell("Address")]);
    apply_table_style(&mut table, styling);
    align_column(&mut table, 0, CellAlignment::Right);
    for (index, address) in addresses.iter().enumerate() {
        table.add_row(vec![dim_cell(index + 1), Cell::new(address)]);
    }
    table
}

/// Header listing with the selected email column marked.
pub fn headers_table(headers: &[String], selected: Option<&str>, styling: Styling) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("#"), header_cell("Header"), header_cell("")]);
    apply_table_style(&mut table, styling);
    align_column(&mut table, 0, CellAlignment::Right);
    for (index, header) in headers.iter().enumerate() {
        let marker = if Some(header.as_str()) == selected {
            Cell::new("← email column")
                .fg(Color::Green)
                .add_attribute(Attribute::Bold)
        } else {
            dim_cell("")
        };
        table.add_row(vec![dim_cell(index), Cell::new(header), marker]);
    }
    table
}

/// Describes the active search, status filter with its choices, and sort.
pub fn filter_line(view: &TableView) -> String {
    let search = match view.global_filter() {
        Some(text) => format!("\"{text}\""),
        None => format!("({})", view.search_placeholder()),
    };
    let status = view
        .status_filter()
        .map_or_else(|| "All".to_string(), |status| status.to_string());
    let options: Vec<&str> = view
        .status_options()
        .iter()
        .map(Reachability::as_str)
        .collect();
    let sort = view.sort().map_or_else(
        || "none".to_string(),
        |sort| header_label(sort.column, Some(sort)),
    );
    format!(
        "Search: {search} | Status: {status} [{}] | Sort: {sort}",
        options.join("|")
    )
}

/// Renders the chart (when shown) and one window of the results table.
///
/// Only the rows inside `window` are turned into table rows.
pub fn render_view(
    view: &TableView,
    results: &ResultSet,
    window: VirtualWindow,
    show_chart: bool,
    styling: Styling,
) -> String {
    let mut out = String::new();
    if show_chart {
        let bars = verimail_present::build_summary(&results.stats);
        out.push_str(&chart_table(&bars, styling).to_string());
        out.push('\n');
    }
    out.push_str(&filter_line(view));
    out.push('\n');

    let rows = view.rows();
    let visible = window.slice(&rows);
    out.push_str(&results_table(visible, view.sort(), styling).to_string());
    out.push('\n');

    let footer = if visible.is_empty() {
        format!("No rows match ({} total)", rows.len())
    } else {
        format!(
            "Rows {}-{} of {}",
            window.start + 1,
            window.start + visible.len(),
            rows.len()
        )
    };
    out.push_str(&footer);
    if let Some(checked_at) = results.checked_at {
        out.push_str(&format!(" | checked {checked_at}"));
    }
    out
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

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
