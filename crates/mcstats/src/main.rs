//! mcstats - Minecraft Java Edition stats and session dashboard

mod cli;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cli::{ExportFormat, LayoutChoice};
use mcstats_core::charts::WoodSummary;
use mcstats_core::{
    export_dashboard_to_html, export_logins_to_csv, export_report_to_json, export_stats_to_csv,
    export_worlds_to_csv, ConfigFile, Dashboard, LoadReport, ReportConfig, ReportStore,
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "mcstats=info,mcstats_core=info";

#[derive(Parser)]
#[command(
    name = "mcstats",
    version,
    about = "Minecraft Java Edition stats and session dashboard",
    long_about = "Reads the per-world stat files, level.dat files and gzip daily logs of a local\n\
                  Minecraft Java Edition install and summarizes them.\n\
                  \n\
                  Examples:\n\
                    mcstats                          # Write MinecraftStats.html (default)\n\
                    mcstats dashboard --layout both  # Write both dashboard layouts\n\
                    mcstats stats                    # Wood summary and per-world totals\n\
                    mcstats sessions --json          # Login events as JSON\n\
                    mcstats worlds                   # Saved worlds from level.dat\n\
                    mcstats export --format csv --output out/\n\
                  \n\
                  Environment Variables:\n\
                    MCSTATS_MINECRAFT_DIR            # Override Minecraft directory\n\
                    MCSTATS_USER                     # Local account (macOS launcher path)\n\
                    MCSTATS_CONFIG                   # TOML config file\n\
                    MCSTATS_NO_COLOR                 # Disable ANSI colors\n\
                    RUST_LOG                         # Log filter (default: mcstats=info)"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Minecraft directory holding saves/ and logs/
    #[arg(long, global = true, env = "MCSTATS_MINECRAFT_DIR")]
    minecraft_dir: Option<PathBuf>,

    /// Local account name; uses /Users/<user>/Library/Application Support/minecraft
    #[arg(long, global = true, env = "MCSTATS_USER")]
    user: Option<String>,

    /// TOML config file
    #[arg(long, global = true, env = "MCSTATS_CONFIG")]
    config: Option<PathBuf>,

    /// Disable ANSI colors in tables
    #[arg(long, global = true, env = "MCSTATS_NO_COLOR")]
    no_color: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Write the HTML dashboard (default)
    Dashboard {
        /// Output file (single layout only; defaults to <output_dir>/<layout file>)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
        /// Page layout
        #[arg(long, value_enum)]
        layout: Option<LayoutChoice>,
    },
    /// Print the wood summary and per-world totals
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print login sessions found in the logs
    Sessions {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print saved worlds from level.dat
    Worlds {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Export the loaded tables
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,
        /// Output directory
        #[arg(long, short = 'o')]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let cli = Cli::parse();

    let file = cli
        .config
        .as_deref()
        .map(ConfigFile::load)
        .transpose()?;
    let config = ReportConfig::resolve(cli.minecraft_dir, cli.user.as_deref(), file)
        .context("Could not determine Minecraft directory (use --minecraft-dir or --user)")?;

    let mut store = ReportStore::new(config);
    let report = store.load();
    print_load_report(&report);

    let no_color = cli.no_color;

    match cli.command.unwrap_or(Command::Dashboard {
        output: None,
        layout: None,
    }) {
        Command::Dashboard { output, layout } => run_dashboard(&store, output, layout)?,
        Command::Stats { json } => run_stats(&store, json, no_color)?,
        Command::Sessions { json } => {
            println!("{}", cli::format_sessions_table(store.logins(), json, no_color));
        }
        Command::Worlds { json } => {
            println!("{}", cli::format_worlds_table(store.worlds(), json, no_color));
        }
        Command::Export { format, output } => run_export(&store, format, output)?,
    }

    Ok(())
}

fn run_dashboard(
    store: &ReportStore,
    output: Option<PathBuf>,
    layout: Option<LayoutChoice>,
) -> Result<()> {
    let choice = layout.unwrap_or_else(|| store.config().layout.into());
    let layouts = choice.layouts();

    if output.is_some() && layouts.len() > 1 {
        anyhow::bail!("--output names a single file; use it with --layout sidebar or grid");
    }

    let dashboard = Dashboard::from_store(store, chrono::Local::now().date_naive());

    for layout in layouts {
        let path = output
            .clone()
            .unwrap_or_else(|| store.config().dashboard_path(layout));
        export_dashboard_to_html(&dashboard, layout, &path)?;
        info!(path = %path.display(), ?layout, "Dashboard written");
        println!("Wrote {}", path.display());
    }

    Ok(())
}

fn run_stats(store: &ReportStore, json: bool, no_color: bool) -> Result<()> {
    let summary = WoodSummary::build(store.stats());
    let totals = store.world_totals();

    if json {
        let value = serde_json::json!({
            "wood_summary": summary,
            "world_totals": totals,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&value).context("Failed to serialize stats")?
        );
        return Ok(());
    }

    println!("mcstats - Minecraft Statistics");
    println!("==============================");
    println!();
    println!("{}", cli::format_wood_table(&summary, false, no_color));
    println!();
    println!("{}", cli::format_world_totals(&totals, false, no_color));
    println!();
    println!(
        "Stat rows:        {}",
        cli::format_number(store.stats().len() as u64)
    );
    println!("Worlds with stats: {}", store.world_count());

    Ok(())
}

fn run_export(store: &ReportStore, format: ExportFormat, output: PathBuf) -> Result<()> {
    match format {
        ExportFormat::Csv => {
            let stats = output.join("stats.csv");
            let logins = output.join("logins.csv");
            let worlds = output.join("worlds.csv");
            export_stats_to_csv(store.stats(), &stats)?;
            export_logins_to_csv(store.logins(), &logins)?;
            export_worlds_to_csv(store.worlds(), &worlds)?;
            for path in [stats, logins, worlds] {
                println!("Wrote {}", path.display());
            }
        }
        ExportFormat::Json => {
            let path = output.join("report.json");
            export_report_to_json(store, &path)?;
            println!("Wrote {}", path.display());
        }
    }

    Ok(())
}

/// Failed files go to stderr; loading itself never aborts the run
fn print_load_report(report: &LoadReport) {
    if !report.has_errors() {
        return;
    }

    let (warnings, errors) = report.error_count();
    eprintln!("Load issues ({} errors, {} warnings):", errors, warnings);
    for error in &report.errors {
        match &error.path {
            Some(path) => eprintln!("  - [{}] {}: {}", error.source, path.display(), error.message),
            None => eprintln!("  - [{}] {}", error.source, error.message),
        }
        if let Some(suggestion) = &error.suggestion {
            eprintln!("    hint: {}", suggestion);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults_to_dashboard() {
        let cli = Cli::try_parse_from(["mcstats"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_parses_dashboard_layout() {
        let cli = Cli::try_parse_from(["mcstats", "dashboard", "--layout", "both"]).unwrap();
        match cli.command {
            Some(Command::Dashboard { layout, output }) => {
                assert_eq!(layout, Some(LayoutChoice::Both));
                assert!(output.is_none());
            }
            _ => panic!("expected dashboard command"),
        }
    }

    #[test]
    fn test_cli_parses_export() {
        let cli = Cli::try_parse_from([
            "mcstats",
            "--minecraft-dir",
            "/tmp/mc",
            "export",
            "--format",
            "json",
            "--output",
            "out",
        ])
        .unwrap();
        assert_eq!(cli.minecraft_dir, Some(PathBuf::from("/tmp/mc")));
        match cli.command {
            Some(Command::Export { format, output }) => {
                assert_eq!(format, ExportFormat::Json);
                assert_eq!(output, PathBuf::from("out"));
            }
            _ => panic!("expected export command"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_layout() {
        assert!(Cli::try_parse_from(["mcstats", "dashboard", "--layout", "wide"]).is_err());
    }
}
