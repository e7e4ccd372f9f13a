//! Command-line interface for the snapshot pipeline.

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use sqlx::SqlitePool;

use crate::config::IngestConfig;
use crate::db;
use crate::error::Result;
use crate::models::Snapshot;
use crate::orchestrator;
use crate::store;

/// RegScope - Track the size and integrity of US federal regulations.
#[derive(Parser)]
#[command(name = "regscope")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Capture a snapshot of every title in the current eCFR edition.
    Run,

    /// Capture a snapshot of a single title.
    Title {
        /// CFR title number (1-50)
        number: u16,

        /// Edition date in YYYY-MM-DD format (default: the publisher's current edition)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// List every title number with at least one snapshot.
    Titles,

    /// Show the most recent snapshot for a title.
    Latest {
        /// CFR title number (1-50)
        number: u16,
    },

    /// Show the word count history for a title, oldest first.
    History {
        /// CFR title number (1-50)
        number: u16,
    },
}

/// Run the CLI.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = IngestConfig::from_env()?;
    let pool = db::create_pool(&config).await?;
    db::run_migrations(&pool).await?;

    match cli.command {
        Commands::Run => run_command(&pool, &config).await,
        Commands::Title { number, date } => {
            title_command(&pool, &config, number, date.as_deref()).await
        }
        Commands::Titles => titles_command(&pool).await,
        Commands::Latest { number } => latest_command(&pool, number).await,
        Commands::History { number } => history_command(&pool, number).await,
    }
}

/// Execute a full ingestion run and print its report.
async fn run_command(pool: &SqlitePool, config: &IngestConfig) -> Result<()> {
    println!(
        "{} {}",
        style("Ingesting from").bold(),
        style(&config.catalog_url).cyan()
    );
    println!();

    let pb = spinner("Capturing titles...");

    let report = match orchestrator::run_all(pool, config).await {
        Ok(report) => report,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.finish_and_clear();

    println!("  Run id: {}", report.run_id);
    println!("  Captured: {}", style(report.succeeded.len()).green());
    if !report.failed.is_empty() {
        println!("  Failed: {}", style(report.failed.len()).red().bold());
        for failure in &report.failed {
            println!(
                "    title {}: {} ({})",
                failure.title_number,
                style(failure.kind).red(),
                failure.detail
            );
        }
    }
    if report.interrupted {
        println!(
            "  {}",
            style("Run was interrupted before every title was dispatched.").yellow()
        );
    }

    Ok(())
}

/// Capture one title and print the resulting snapshot.
async fn title_command(
    pool: &SqlitePool,
    config: &IngestConfig,
    number: u16,
    date: Option<&str>,
) -> Result<()> {
    let date = date.map(regscope_harvester::validate_date).transpose()?;

    println!(
        "{} title {}",
        style("Capturing").bold(),
        style(number).cyan()
    );
    println!();

    let pb = spinner("Downloading edition...");

    let snapshot = match orchestrator::run_single(pool, config, number, date).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.finish_and_clear();
    print_snapshot(&snapshot);

    Ok(())
}

async fn titles_command(pool: &SqlitePool) -> Result<()> {
    let titles = store::known_titles(pool).await?;
    if titles.is_empty() {
        println!("No snapshots recorded yet.");
        return Ok(());
    }
    for number in titles {
        println!("{number}");
    }
    Ok(())
}

async fn latest_command(pool: &SqlitePool, number: u16) -> Result<()> {
    match store::latest_snapshot(pool, i64::from(number)).await? {
        Some(snapshot) => print_snapshot(&snapshot),
        None => println!("No snapshots for title {number}."),
    }
    Ok(())
}

async fn history_command(pool: &SqlitePool, number: u16) -> Result<()> {
    let points = store::word_count_series(pool, i64::from(number)).await?;
    if points.is_empty() {
        println!("No snapshots for title {number}.");
        return Ok(());
    }
    for point in points {
        println!("{}  {}", point.as_of, point.word_count);
    }
    Ok(())
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message(message);
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn print_snapshot(snapshot: &Snapshot) {
    println!(
        "  Title: {} - {}",
        snapshot.title_number,
        style(&snapshot.title_name).green()
    );
    println!("  Edition: {}", snapshot.as_of);
    println!("  Words: {}", snapshot.word_count);
    println!("  References per 1,000 words: {:.2}", snapshot.ref_density);
    println!("  Defined terms per word: {:.4}", snapshot.def_density);
    println!("  Fingerprint: {}", style(&snapshot.fingerprint).dim());
    if snapshot.degraded {
        println!(
            "  {}",
            style("No recognizable sections: metrics measure the raw document.").yellow()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_run() {
        let cli = Cli::parse_from(["regscope", "run"]);
        assert!(matches!(cli.command, Commands::Run));
    }

    #[test]
    fn test_cli_parse_title_with_date() {
        let cli = Cli::parse_from(["regscope", "title", "29", "--date", "2025-06-01"]);

        let Commands::Title { number, date } = cli.command else {
            panic!("expected title command");
        };
        assert_eq!(number, 29);
        assert_eq!(date, Some("2025-06-01".to_string()));
    }

    #[test]
    fn test_cli_parse_latest() {
        let cli = Cli::parse_from(["regscope", "latest", "7"]);

        let Commands::Latest { number } = cli.command else {
            panic!("expected latest command");
        };
        assert_eq!(number, 7);
    }

    #[test]
    fn test_cli_parse_history() {
        let cli = Cli::parse_from(["regscope", "history", "7"]);

        let Commands::History { number } = cli.command else {
            panic!("expected history command");
        };
        assert_eq!(number, 7);
    }
}
