mod app;

use anyhow::{Context, Result};
use app::{App, Event};
use clap::Parser;
use demographics_core::{AnalysisPayload, DemographicsView, Normalizer, NormalizerConfig};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Replays demographic selection events against a classifier response.
#[derive(Debug, Parser)]
#[command(name = "demographics", version = env!("DEMOGRAPHICS_VERSION"))]
#[command(after_help = "events:
  category:<race|age|sex>        focus a category
  select:<race|age|sex>=<label>  override a category with a ranked label
  reset                          restore the AI defaults
  confirm                        print the confirmed selections")]
struct Args {
    /// TOML file overriding label formats and the fallback label
    #[arg(long)]
    config: Option<PathBuf>,
    /// Write confirmed selections to this CSV file
    #[arg(long)]
    export: Option<PathBuf>,
    /// Classifier response, `{ "data": { race, age, gender } }`
    payload: PathBuf,
    /// Events to replay, in order
    events: Vec<Event>,
}

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(args) {
        eprintln!("demographics stopped with error: {e:#}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => NormalizerConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => NormalizerConfig::default(),
    };
    let result = AnalysisPayload::load(&args.payload)
        .with_context(|| format!("reading payload {}", args.payload.display()))?;
    let view = DemographicsView::open_with(Normalizer::new(config), result);

    let stdout = std::io::stdout();
    let mut app = App::new(view, stdout.lock(), args.export);
    app.run(&args.events)
}
