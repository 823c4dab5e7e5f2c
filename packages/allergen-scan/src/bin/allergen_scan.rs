//! Scan a local allergen guide for items safe to eat.
//!
//! Reads extracted tables (JSON) and/or document text, or a saved web page,
//! and classifies the rest with OpenAI when the tables are not enough.
//!
//! ```bash
//! allergen-scan --allergen dairy --tables tables.json --text guide.txt
//! allergen-scan --allergen peanut --html allergens.html --json
//! ```

use std::path::{Path, PathBuf};
use std::time::Instant;

use allergen_scan::ai::OpenAI;
use allergen_scan::sources::html_to_text;
use allergen_scan::{
    Allergen, AllergenSource, AllergenTable, AnalysisOutcome, PipelineConfig, Scanner,
};
use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "allergen-scan")]
#[command(about = "Find allergen-safe menu items in a restaurant allergen guide")]
struct Cli {
    /// Allergen to avoid (dairy, egg, peanut, tree nut, soy, wheat, fish, shellfish, sesame)
    #[arg(long)]
    allergen: String,

    /// Tables extracted from the guide, as a JSON array of row arrays
    #[arg(long)]
    tables: Option<PathBuf>,

    /// Raw text of the guide document
    #[arg(long)]
    text: Option<PathBuf>,

    /// Saved allergen web page (used instead of --tables/--text)
    #[arg(long, conflicts_with_all = ["tables", "text"])]
    html: Option<PathBuf>,

    /// Print the outcome as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,allergen_scan=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let allergen: Allergen = cli.allergen.parse()?;

    let config = PipelineConfig::from_env().context("Failed to load pipeline configuration")?;
    let ai = OpenAI::from_env().context("Failed to configure OpenAI")?;
    let scanner = Scanner::new(ai, allergen, config)?;
    tracing::debug!(
        chunk_size = scanner.config().chunk_size,
        chunk_overlap = scanner.config().chunk_overlap,
        concurrency = scanner.config().max_concurrent_segments,
        "Scanner configured"
    );

    let source = load_source(&cli)?;

    let started = Instant::now();
    let outcome = scanner.analyze(source.as_ref()).await;
    tracing::info!(elapsed_ms = started.elapsed().as_millis() as u64, "Analysis finished");

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    match outcome.into_result() {
        Some(result) if result.is_empty() => {
            println!("No {}-safe items found in this guide.", allergen.display_name().to_lowercase());
        }
        Some(result) => print!("{}", result.render(allergen)),
        None => println!("Could not find or read allergen data."),
    }

    Ok(())
}

fn load_source(cli: &Cli) -> Result<Option<AllergenSource>> {
    if let Some(path) = &cli.html {
        let html = read(path)?;
        return Ok(Some(AllergenSource::web_page(
            path.display().to_string(),
            html_to_text(&html),
        )));
    }

    if cli.tables.is_none() && cli.text.is_none() {
        return Ok(None);
    }

    let tables = match &cli.tables {
        Some(path) => {
            let raw: Vec<Vec<Vec<Option<String>>>> = serde_json::from_str(&read(path)?)
                .with_context(|| format!("{} is not a JSON array of tables", path.display()))?;
            raw.into_iter().map(AllergenTable::from_raw).collect()
        }
        None => Vec::new(),
    };
    let text = match &cli.text {
        Some(path) => read(path)?,
        None => String::new(),
    };

    Ok(Some(AllergenSource::document(tables, text)))
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
