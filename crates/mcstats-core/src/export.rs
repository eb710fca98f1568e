//! Dashboard and table export
//!
//! The dashboard is a single static HTML page with inline SVG charts, so it
//! opens without network access.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::charts::{render_bar_chart, render_scatter_chart, SessionScatter, WoodSummary};
use crate::config::Layout;
use crate::models::{LoginEvent, StatCategory, StatRecord, WorldMeta};
use crate::store::ReportStore;

const DASHBOARD_TITLE: &str = "Minecraft Summary Stats";

const INTRO_HTML: &str = "<p>This dashboard summarizes Minecraft Java Edition stats across saved \
worlds on a local machine. Run <code>mcstats dashboard</code> to rebuild it from your own \
saves.</p>\n<p>Visit the <a href=\"https://github.com/CulleyHarrelson/MinecraftStats\">GitHub \
page</a> to learn more.</p>";

const SESSIONS_HTML: &str =
    "<h4>Session data is sourced from the Minecraft Java Edition log files.</h4>";

const WOOD_HTML: &str = "<p>This plot looks at all stat entries for the various minecraft wood \
types. For example, mining an oak trapdoor is included in the \"mined\" tally.</p>";

/// Everything the dashboard page shows
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub site_name: String,
    pub generated_on: NaiveDate,
    pub wood: WoodSummary,
    pub sessions: SessionScatter,
    pub worlds: Vec<WorldMeta>,
}

impl Dashboard {
    pub fn from_store(store: &ReportStore, generated_on: NaiveDate) -> Self {
        Self {
            site_name: store.config().site_name.clone(),
            generated_on,
            wood: WoodSummary::build(store.stats()),
            sessions: SessionScatter::build(store.logins()),
            worlds: store.worlds().to_vec(),
        }
    }

    /// Page title for a layout
    pub fn title(&self, layout: Layout) -> String {
        match layout {
            Layout::Sidebar => DASHBOARD_TITLE.to_string(),
            Layout::Grid => format!(
                "{} world analysis: {}",
                self.site_name,
                self.generated_on.format("%Y-%m-%d")
            ),
        }
    }
}

/// Render the dashboard page
pub fn render_dashboard(dashboard: &Dashboard, layout: Layout) -> String {
    let title = html_escape(&dashboard.title(layout));
    let sessions_chart = render_scatter_chart(&dashboard.sessions);
    let wood_chart = render_bar_chart(&dashboard.wood);
    let worlds_table = render_worlds_table(&dashboard.worlds);

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("    <meta charset=\"UTF-8\">\n");
    html.push_str(
        "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    html.push_str(&format!("    <title>{}</title>\n", title));
    html.push_str("    <style>\n");
    html.push_str(STYLE);
    html.push_str("    </style>\n</head>\n<body>\n");
    html.push_str(&format!(
        "    <header class=\"title-bar\"><h1>{}</h1></header>\n",
        title
    ));

    match layout {
        Layout::Sidebar => {
            html.push_str("    <div class=\"sidebar-layout\">\n");
            html.push_str(&format!(
                "        <aside class=\"sidebar\">{}</aside>\n",
                INTRO_HTML
            ));
            html.push_str("        <main class=\"main\">\n");
            for block in [
                SESSIONS_HTML,
                sessions_chart.as_str(),
                WOOD_HTML,
                wood_chart.as_str(),
                worlds_table.as_str(),
            ] {
                html.push_str(&format!("            <section class=\"card\">{}</section>\n", block));
            }
            html.push_str("        </main>\n    </div>\n");
        }
        Layout::Grid => {
            html.push_str("    <div class=\"grid-layout\">\n");
            html.push_str(&format!(
                "        <aside class=\"sidebar\">{}</aside>\n",
                INTRO_HTML
            ));
            html.push_str(&format!(
                "        <section class=\"card grid-a\">{}{}</section>\n",
                SESSIONS_HTML, sessions_chart
            ));
            html.push_str(&format!(
                "        <section class=\"card grid-b\">{}{}</section>\n",
                WOOD_HTML, wood_chart
            ));
            html.push_str(&format!(
                "        <section class=\"card grid-c\">{}</section>\n",
                worlds_table
            ));
            html.push_str("    </div>\n");
        }
    }

    html.push_str(&format!(
        "    <footer>Generated {} by mcstats</footer>\n",
        dashboard.generated_on.format("%Y-%m-%d")
    ));
    html.push_str("</body>\n</html>\n");
    html
}

/// Write the dashboard page to `path`, creating parent directories
pub fn export_dashboard_to_html(dashboard: &Dashboard, layout: Layout, path: &Path) -> Result<()> {
    create_parent(path)?;
    std::fs::write(path, render_dashboard(dashboard, layout))
        .with_context(|| format!("Failed to write HTML file: {}", path.display()))
}

fn render_worlds_table(worlds: &[WorldMeta]) -> String {
    if worlds.is_empty() {
        return "<h4>Saved Worlds</h4><p class=\"empty\">No level.dat files found</p>".to_string();
    }

    let mut table = String::from(
        "<h4>Saved Worlds</h4><table><thead><tr><th>World</th><th>Directory</th>\
         <th>Hardcore</th><th>Play time (h)</th></tr></thead><tbody>",
    );
    for world in worlds {
        table.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{:.1}</td></tr>",
            html_escape(&world.level_name),
            html_escape(&world.world_dir),
            if world.hardcore { "yes" } else { "no" },
            world.play_hours()
        ));
    }
    table.push_str("</tbody></table>");
    table
}

const STYLE: &str = "        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; background: #f5f5f5; color: #333; }
        .title-bar { background: #0072b5; color: white; padding: 12px 24px; }
        .title-bar h1 { margin: 0; font-size: 22px; }
        .sidebar-layout { display: flex; gap: 20px; padding: 20px; }
        .sidebar { flex: 0 0 280px; background: white; padding: 16px; border-radius: 8px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); line-height: 1.5; }
        .main { flex: 1; display: flex; flex-direction: column; gap: 16px; max-width: 1040px; }
        .grid-layout { display: grid; grid-template-columns: 280px 1fr; gap: 20px; padding: 20px; }
        .grid-layout .sidebar { grid-row: span 3; }
        .card { background: white; padding: 16px; border-radius: 8px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }
        table { border-collapse: collapse; width: 100%; }
        th, td { text-align: left; padding: 6px 10px; border-bottom: 1px solid #e0e0e0; }
        .empty { color: #888; }
        footer { color: #999; font-size: 12px; padding: 0 20px 20px; }
";

// ============================================================================
// Table Export Functions
// ============================================================================

/// Export stat rows to CSV
///
/// CSV columns: World, Player, Item, Wood Type, then one column per category
pub fn export_stats_to_csv(stats: &[StatRecord], path: &Path) -> Result<()> {
    let mut writer = create_writer(path)?;

    let header: Vec<&str> = ["World", "Player", "Item", "Wood Type"]
        .into_iter()
        .chain(StatCategory::ALL.iter().map(|c| c.as_str()))
        .collect();
    writeln!(writer, "{}", header.join(",")).context("Failed to write CSV header")?;

    for record in stats {
        let counters: Vec<String> = StatCategory::ALL
            .iter()
            .map(|c| record.counters.get(*c).to_string())
            .collect();
        writeln!(
            writer,
            "{},{},{},{},{}",
            csv_field(&record.world_name),
            csv_field(&record.player),
            csv_field(&record.item_key),
            record.wood_type.map(|w| w.as_str()).unwrap_or(""),
            counters.join(",")
        )
        .with_context(|| format!("Failed to write row for {}", record.item_key))?;
    }

    writer.flush().context("Failed to flush CSV writer")?;
    Ok(())
}

/// Export login events to CSV
///
/// CSV columns: Date, Time, User Name, Source, Message
pub fn export_logins_to_csv(logins: &[LoginEvent], path: &Path) -> Result<()> {
    let mut writer = create_writer(path)?;

    writeln!(writer, "Date,Time,User Name,Source,Message").context("Failed to write CSV header")?;

    for event in logins {
        writeln!(
            writer,
            "{},{},{},{},{}",
            event.date().format("%Y-%m-%d"),
            event.time().format("%H:%M:%S"),
            csv_field(&event.user_name),
            csv_field(&event.source),
            csv_field(&event.message)
        )
        .with_context(|| format!("Failed to write login row for {}", event.user_name))?;
    }

    writer.flush().context("Failed to flush CSV writer")?;
    Ok(())
}

/// Export world metadata to CSV
///
/// CSV columns: World, Directory, Hardcore, Play Time (ticks)
pub fn export_worlds_to_csv(worlds: &[WorldMeta], path: &Path) -> Result<()> {
    let mut writer = create_writer(path)?;

    writeln!(writer, "World,Directory,Hardcore,Play Time (ticks)")
        .context("Failed to write CSV header")?;

    for world in worlds {
        writeln!(
            writer,
            "{},{},{},{}",
            csv_field(&world.level_name),
            csv_field(&world.world_dir),
            world.hardcore,
            world.play_time
        )
        .with_context(|| format!("Failed to write row for world {}", world.world_dir))?;
    }

    writer.flush().context("Failed to flush CSV writer")?;
    Ok(())
}

#[derive(Serialize)]
struct ReportJson<'a> {
    stats: &'a [StatRecord],
    logins: &'a [LoginEvent],
    worlds: &'a [WorldMeta],
    wood_summary: WoodSummary,
}

/// Export all three tables plus the wood summary as one pretty-printed JSON document
pub fn export_report_to_json(store: &ReportStore, path: &Path) -> Result<()> {
    create_parent(path)?;

    let report = ReportJson {
        stats: store.stats(),
        logins: store.logins(),
        worlds: store.worlds(),
        wood_summary: WoodSummary::build(store.stats()),
    };
    let json = serde_json::to_string_pretty(&report).context("Failed to serialize report to JSON")?;

    std::fs::write(path, json)
        .with_context(|| format!("Failed to write JSON file: {}", path.display()))?;

    Ok(())
}

fn create_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    Ok(())
}

fn create_writer(path: &Path) -> Result<BufWriter<File>> {
    create_parent(path)?;
    let file = File::create(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
    Ok(BufWriter::new(file))
}

/// Quote a CSV field when it holds a separator, quote or newline
fn csv_field(s: &str) -> String {
    if s.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// HTML escape for safe output
pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
