//! Tech6 CLI: print the JAPAN TECH 6 dashboard from the terminal.
//!
//! Commands:
//! - `cards`: sector cards and the Nikkei 225 badge
//! - `sector <KEY>`: constituents of one sector with latest quotes
//! - `history`: history table for a time range, or CSV export
//! - `change <KEY>`: percent change of one series since the reference date
//! - `config init|show|catalog`: configuration scaffolding

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

use tech6_core::change::reference_snapshot;
use tech6_core::data::open_source;
use tech6_core::{
    compute_change, format_change, format_yen, Dashboard, SectorCatalog, Snapshot, Tech6Config,
    TimeRange, NIKKEI_KEY,
};

#[derive(Parser)]
#[command(
    name = "tech6",
    version,
    about = "JAPAN TECH 6: national strategic sectors dashboard"
)]
struct Cli {
    /// Feed URL or local JSON file (overrides the config file).
    #[arg(long, global = true)]
    feed: Option<String>,

    /// Config file. Defaults to <config dir>/tech6/config.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Reference date (YYYY-MM-DD) for "change since" figures.
    #[arg(long, global = true)]
    reference_date: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show sector cards and the Nikkei 225 badge.
    Cards,
    /// List the constituents of a sector.
    Sector {
        /// Sector key (AI_Robot, Quantum, Semi, Bio, Fusion, Space).
        key: String,
    },
    /// Print the normalized history for a time range.
    History {
        /// 1M, 6M, YTD or ALL.
        #[arg(long, default_value = "ALL")]
        range: TimeRange,

        /// Write CSV to this path instead of printing a table.
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Percent change of one series since the reference date.
    Change {
        /// Series key: a sector key or Nikkei225.
        key: String,
    },
    /// Configuration commands.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write a default config file.
    Init {
        /// Destination. Defaults to the --config path.
        #[arg(long)]
        path: Option<PathBuf>,

        /// Overwrite an existing file.
        #[arg(long, default_value_t = false)]
        force: bool,
    },
    /// Print the effective configuration.
    Show,
    /// Print the sector catalog as TOML, or write it to a file.
    Catalog {
        #[arg(long)]
        write: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| Tech6Config::default_path(dirs::config_dir()));
    let config = effective_config(&cli, &config_path)?;
    let catalog = config.load_catalog().context("loading sector catalog")?;

    match &cli.command {
        Commands::Cards => {
            let dash = load_dashboard(&config, &catalog)?;
            print_cards(&dash);
            Ok(())
        }
        Commands::Sector { key } => {
            let dash = load_dashboard(&config, &catalog)?;
            print_sector(&dash, &catalog, key)
        }
        Commands::History { range, csv } => {
            let dash = load_dashboard(&config, &catalog)?;
            let today = chrono::Local::now().date_naive();
            let rows = dash.chart_history(*range, today);
            let keys = series_keys(&catalog);
            match csv {
                Some(path) => {
                    let file = std::fs::File::create(path)
                        .with_context(|| format!("creating {}", path.display()))?;
                    write_csv(file, &keys, &rows)?;
                    println!("Wrote {} rows to {}", rows.len(), path.display());
                }
                None => print_history(&keys, &rows, *range),
            }
            Ok(())
        }
        Commands::Change { key } => {
            let dash = load_dashboard(&config, &catalog)?;
            print_change(&dash, key);
            Ok(())
        }
        Commands::Config { action } => match action {
            ConfigAction::Init { path, force } => {
                run_config_init(path.as_deref().unwrap_or(&config_path), *force)
            }
            ConfigAction::Show => {
                print!("{}", config.to_toml()?);
                Ok(())
            }
            ConfigAction::Catalog { write } => {
                let toml = catalog.to_toml()?;
                match write {
                    Some(path) => {
                        std::fs::write(path, toml)
                            .with_context(|| format!("writing {}", path.display()))?;
                        println!("Catalog written to {}", path.display());
                    }
                    None => print!("{toml}"),
                }
                Ok(())
            }
        },
    }
}

fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Config file values with command-line overrides applied.
fn effective_config(cli: &Cli, path: &Path) -> Result<Tech6Config> {
    let mut config = Tech6Config::load(path)
        .with_context(|| format!("loading config {}", path.display()))?;
    debug!(path = %path.display(), "config loaded");
    if let Some(feed) = &cli.feed {
        config.feed.location = Some(feed.clone());
    }
    if let Some(date) = &cli.reference_date {
        config.set_reference_date(date)?;
    }
    Ok(config)
}

fn load_dashboard(config: &Tech6Config, catalog: &SectorCatalog) -> Result<Dashboard> {
    let source = open_source(&config.feed)?;
    match source.load() {
        Ok(feed) => Ok(Dashboard::build(
            &feed,
            catalog,
            &config.dashboard.reference_date,
        )),
        Err(e) => {
            error!(source = source.name(), error = %e, "failed to load stock data");
            Err(e).with_context(|| format!("loading feed from {}", source.name()))
        }
    }
}

/// Nikkei first, then the catalog sectors.
fn series_keys(catalog: &SectorCatalog) -> Vec<String> {
    std::iter::once(NIKKEI_KEY.to_string())
        .chain(catalog.sectors.iter().map(|s| s.key.clone()))
        .collect()
}

fn print_cards(dash: &Dashboard) {
    println!();
    println!("=== JAPAN TECH 6: National Strategic Sectors ===");
    if let Some(badge) = &dash.nikkei {
        println!(
            "NIKKEI 225  {}  {}",
            format_yen(badge.price),
            format_change(badge.change_since_reference)
        );
    }
    println!("Reference:  {} (税制改正)", dash.reference_date);
    println!();
    println!("{:<10} {:>12} {:>10} {:>6}  {}", "Key", "Since ref", "1D", "Names", "Sector");
    println!("{}", "-".repeat(56));
    for card in &dash.cards {
        println!(
            "{:<10} {:>12} {:>10} {:>6}  {} {}",
            card.key,
            format_change(card.change_since_reference),
            format_change(card.daily_change),
            card.holdings.len(),
            card.icon,
            card.name
        );
    }
    println!();
    let updated = dash.last_updated_display();
    if !updated.is_empty() {
        println!("Last Updated: {updated}");
    }
}

fn print_sector(dash: &Dashboard, catalog: &SectorCatalog, key: &str) -> Result<()> {
    let Some(card) = dash.card(key) else {
        bail!(
            "unknown sector '{key}'. Valid: {}",
            catalog.sector_keys().join(", ")
        );
    };

    println!();
    println!(
        "{} {} - {} since {}",
        card.icon,
        card.name,
        format_change(card.change_since_reference),
        dash.reference_date
    );
    println!();
    if card.holdings.is_empty() {
        println!("No constituents in the feed.");
        return Ok(());
    }

    println!("{:<8} {:>9} {:>14}  {:<22}  {}", "Ticker", "Change", "Price", "Name", "Quote");
    println!("{}", "-".repeat(96));
    for holding in &card.holdings {
        let (change, price) = match (holding.change, holding.price) {
            (change, Some(price)) => (
                change.map(format_change).unwrap_or_else(|| "---".into()),
                format_yen(price),
            ),
            (_, None) => ("---".into(), "---".into()),
        };
        println!(
            "{:<8} {:>9} {:>14}  {:<22}  {}",
            holding.ticker,
            change,
            price,
            catalog.display_name(&holding.ticker),
            SectorCatalog::quote_url(&holding.ticker)
        );
    }
    Ok(())
}

fn print_history(keys: &[String], rows: &[&Snapshot], range: TimeRange) {
    if rows.is_empty() {
        println!("No history in range {range}.");
        return;
    }

    print!("{:<12}", "Date");
    for key in keys {
        print!(" {:>10}", truncate(key, 10));
    }
    println!();
    println!("{}", "-".repeat(12 + keys.len() * 11));

    for row in rows {
        print!("{:<12}", row.date);
        for key in keys {
            match row.value(key) {
                Some(v) => print!(" {v:>10.2}"),
                None => print!(" {:>10}", "-"),
            }
        }
        println!();
    }
    println!();
    println!("{} rows ({range})", rows.len());
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// CSV with one column per series key; missing values are left empty.
fn write_csv<W: Write>(out: W, keys: &[String], rows: &[&Snapshot]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    let mut header = vec!["date".to_string()];
    header.extend(keys.iter().cloned());
    writer.write_record(&header)?;

    for row in rows {
        let mut record = vec![row.date.clone()];
        record.extend(
            keys.iter()
                .map(|k| row.value(k).map(|v| v.to_string()).unwrap_or_default()),
        );
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

fn print_change(dash: &Dashboard, key: &str) {
    let change = compute_change(&dash.history, key, &dash.reference_date);
    let reference = reference_snapshot(&dash.history, &dash.reference_date)
        .or(dash.history.last())
        .map(|s| s.date.as_str())
        .unwrap_or("-");
    let current = dash.history.last().map(|s| s.date.as_str()).unwrap_or("-");
    println!(
        "{key}: {} since {} (reference {reference}, latest {current})",
        format_change(change),
        dash.reference_date
    );
}

fn run_config_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists; pass --force to overwrite",
            path.display()
        );
    }
    Tech6Config::default().save(path)?;
    println!("Config written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "tech6",
            "history",
            "--range",
            "ytd",
            "--feed",
            "public/stock_data.json",
        ])
        .unwrap();
        assert_eq!(cli.feed.as_deref(), Some("public/stock_data.json"));
        match cli.command {
            Commands::History { range, csv } => {
                assert_eq!(range, TimeRange::YearToDate);
                assert!(csv.is_none());
            }
            _ => panic!("expected history"),
        }
    }

    #[test]
    fn about_text_is_plain() {
        use clap::CommandFactory;

        let about = Cli::command().get_about().map(|a| a.to_string()).unwrap();
        assert_eq!(about, "JAPAN TECH 6: national strategic sectors dashboard");
    }

    #[test]
    fn rejects_unknown_range() {
        assert!(Cli::try_parse_from(["tech6", "history", "--range", "2W"]).is_err());
    }

    #[test]
    fn reference_override_is_validated() {
        let cli = Cli::try_parse_from(["tech6", "--reference-date", "2025/11/26", "cards"]).unwrap();
        let dir = tempfile::tempdir().unwrap();
        assert!(effective_config(&cli, &dir.path().join("config.toml")).is_err());
    }

    #[test]
    fn reference_override_is_zero_padded() {
        let cli = Cli::try_parse_from(["tech6", "--reference-date", "2025-1-5", "cards"]).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let config = effective_config(&cli, &dir.path().join("config.toml")).unwrap();
        assert_eq!(config.dashboard.reference_date, "2025-01-05");
    }

    #[test]
    fn config_file_reference_date_is_zero_padded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[dashboard]\nreference_date = \"2025-6-1\"\n").unwrap();
        let cli = Cli::try_parse_from(["tech6", "cards"]).unwrap();
        let config = effective_config(&cli, &path).unwrap();
        assert_eq!(config.dashboard.reference_date, "2025-06-01");
    }

    #[test]
    fn csv_leaves_missing_values_empty() {
        let rows = [
            Snapshot::new("2025-11-26").with("Nikkei225", 25.0).with("Semi", 10.5),
            Snapshot::new("2025-12-01").with("Nikkei225", 27.5),
        ];
        let refs: Vec<&Snapshot> = rows.iter().collect();
        let keys = vec!["Nikkei225".to_string(), "Semi".to_string()];

        let mut buf = Vec::new();
        write_csv(&mut buf, &keys, &refs).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "date,Nikkei225,Semi\n2025-11-26,25,10.5\n2025-12-01,27.5,\n"
        );
    }

    #[test]
    fn series_keys_start_with_nikkei() {
        let keys = series_keys(&SectorCatalog::default_jp());
        assert_eq!(keys.len(), 7);
        assert_eq!(keys[0], "Nikkei225");
        assert_eq!(keys[3], "Semi");
    }

    #[test]
    fn truncate_is_char_safe() {
        assert_eq!(truncate("AI_Robot", 4), "AI_R");
        assert_eq!(truncate("量子技術テスト", 2), "量子");
        assert_eq!(truncate("Bio", 10), "Bio");
    }

    #[test]
    fn config_init_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        run_config_init(&path, false).unwrap();
        assert!(run_config_init(&path, false).is_err());
        run_config_init(&path, true).unwrap();
    }
}
