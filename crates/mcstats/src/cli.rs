//! Terminal formatters for the stats, sessions and worlds commands
//!
//! Every formatter returns a `String` so commands stay easy to test.

use chrono::NaiveDate;
use clap::ValueEnum;
use comfy_table::{Cell, CellAlignment, Color, ContentArrangement, Row, Table};
use mcstats_core::charts::{WoodSummary, WOOD_COUNTERS};
use mcstats_core::models::{LoginEvent, StatCategory, StatCounters, WorldMeta};
use mcstats_core::Layout;
use serde_json::json;
use std::collections::BTreeMap;

// ============================================================================
// Argument types
// ============================================================================

/// Which dashboard page(s) to write
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LayoutChoice {
    Sidebar,
    Grid,
    Both,
}

impl LayoutChoice {
    pub fn layouts(self) -> Vec<Layout> {
        match self {
            LayoutChoice::Sidebar => vec![Layout::Sidebar],
            LayoutChoice::Grid => vec![Layout::Grid],
            LayoutChoice::Both => vec![Layout::Sidebar, Layout::Grid],
        }
    }
}

impl From<Layout> for LayoutChoice {
    fn from(layout: Layout) -> Self {
        match layout {
            Layout::Sidebar => LayoutChoice::Sidebar,
            Layout::Grid => LayoutChoice::Grid,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

// ============================================================================
// Formatters
// ============================================================================

/// Wood summary as a wood type × counter table (human) or JSON
pub fn format_wood_table(summary: &WoodSummary, json: bool, no_color: bool) -> String {
    if json {
        return serde_json::to_string_pretty(summary).unwrap_or_else(|_| "{}".to_string());
    }

    if summary.is_empty() {
        return "No wood stats found.".to_string();
    }

    let mut header = vec!["Wood".to_string()];
    header.extend(WOOD_COUNTERS.iter().map(|c| c.label()));

    let mut table = new_table(&header, no_color);
    for wood in summary.groups() {
        let mut row = vec![Cell::new(wood.label())];
        for counter in WOOD_COUNTERS {
            let value = summary.value(wood, counter).unwrap_or(0);
            row.push(Cell::new(format_number(value)).set_alignment(CellAlignment::Right));
        }
        table.add_row(Row::from(row));
    }

    format!("{}\n\n{}", summary.title(), table)
}

/// Summed counters per world (human) or JSON
pub fn format_world_totals(
    totals: &BTreeMap<&str, StatCounters>,
    json: bool,
    no_color: bool,
) -> String {
    if json {
        return serde_json::to_string_pretty(totals).unwrap_or_else(|_| "{}".to_string());
    }

    if totals.is_empty() {
        return "No stat files found.".to_string();
    }

    let mut header = vec!["World".to_string()];
    header.extend(StatCategory::ALL.iter().map(|c| c.label()));
    header.push("Total".to_string());

    let mut table = new_table(&header, no_color);
    for (world, counters) in totals {
        let mut row = vec![Cell::new(*world)];
        for category in StatCategory::ALL {
            row.push(
                Cell::new(format_number(counters.get(category)))
                    .set_alignment(CellAlignment::Right),
            );
        }
        row.push(Cell::new(format_number(counters.total())).set_alignment(CellAlignment::Right));
        table.add_row(Row::from(row));
    }

    table.to_string()
}

/// Login events, one row each, in timestamp order
pub fn format_sessions_table(logins: &[LoginEvent], json: bool, no_color: bool) -> String {
    if json {
        return serde_json::to_string_pretty(logins).unwrap_or_else(|_| "[]".to_string());
    }

    if logins.is_empty() {
        return "No login sessions found.".to_string();
    }

    let header: Vec<String> = ["Date", "Time", "User", "Source", "Log"]
        .iter()
        .map(|h| h.to_string())
        .collect();
    let mut table = new_table(&header, no_color);

    for event in logins {
        let log = event
            .log_file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "-".to_string());
        table.add_row(Row::from(vec![
            event.date().format("%Y-%m-%d").to_string(),
            event.time().format("%H:%M:%S").to_string(),
            event.user_name.clone(),
            event.source.clone(),
            log,
        ]));
    }

    let footer = match session_span(logins) {
        Some((first, last)) if first != last => {
            format!("{} logins from {} to {}", logins.len(), first, last)
        }
        Some((first, _)) => format!("{} logins on {}", logins.len(), first),
        None => String::new(),
    };

    format!("{}\n{}", table, footer)
}

/// Saved worlds with their level.dat metadata
pub fn format_worlds_table(worlds: &[WorldMeta], json: bool, no_color: bool) -> String {
    if json {
        let rows: Vec<_> = worlds
            .iter()
            .map(|w| {
                json!({
                    "world_dir": w.world_dir,
                    "level_name": w.level_name,
                    "hardcore": w.hardcore,
                    "play_time": w.play_time,
                    "play_hours": w.play_hours(),
                })
            })
            .collect();
        return serde_json::to_string_pretty(&rows).unwrap_or_else(|_| "[]".to_string());
    }

    if worlds.is_empty() {
        return "No saved worlds found.".to_string();
    }

    let header: Vec<String> = ["Directory", "Name", "Hardcore", "Hours"]
        .iter()
        .map(|h| h.to_string())
        .collect();
    let mut table = new_table(&header, no_color);

    for world in worlds {
        table.add_row(Row::from(vec![
            Cell::new(&world.world_dir),
            Cell::new(&world.level_name),
            Cell::new(if world.hardcore { "yes" } else { "no" }),
            Cell::new(format!("{:.1}", world.play_hours())).set_alignment(CellAlignment::Right),
        ]));
    }

    table.to_string()
}

// ============================================================================
// Utilities
// ============================================================================

fn new_table(header: &[String], no_color: bool) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    if no_color {
        table.set_header(header.to_vec());
    } else {
        table.set_header(
            header
                .iter()
                .map(|h| Cell::new(h).fg(Color::Cyan))
                .collect::<Vec<_>>(),
        );
    }

    table
}

fn session_span(logins: &[LoginEvent]) -> Option<(NaiveDate, NaiveDate)> {
    let first = logins.iter().map(|e| e.date()).min()?;
    let last = logins.iter().map(|e| e.date()).max()?;
    Some((first, last))
}

/// Thousands separators: 1234567 → "1,234,567"
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// ============================================================================
// Tests
// ============================================================================
