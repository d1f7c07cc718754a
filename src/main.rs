use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use keyclimb::config::{Config, ScoringWeights};
use keyclimb::error::KfResult;
use keyclimb::model::FrequencyModel;
use keyclimb::scorer::Scorer;
use std::process;
use std::sync::Arc;
use tracing::{error, info, warn, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Frequency model (read by validate/search, written by ingest)
    #[arg(global = true, short, long, default_value = "data/transitions.json")]
    model: String,

    /// JSON weights file; explicit CLI flags still take precedence
    #[arg(global = true, long)]
    weights: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build a frequency model from text files
    Ingest(cmd::ingest::IngestArgs),
    /// Rank the reference layouts against the frequency model
    Validate(cmd::validate::ValidateArgs),
    /// Hill-climb from the best reference layout until interrupted
    Search(cmd::search::SearchArgs),
}

fn main() {
    // 1. Parse Raw Matches (to distinguish user input from defaults)
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();

    if let Err(e) = run(cli, &matches) {
        error!("❌ FATAL: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli, matches: &ArgMatches) -> KfResult<()> {
    let config = match &cli.command {
        Commands::Ingest(args) => return cmd::ingest::run(args, &cli.model),
        Commands::Validate(args) => &args.config,
        Commands::Search(args) => &args.config,
    };
    // Flattened weight flags are recorded on the subcommand's matches.
    let sub_matches = matches.subcommand().map_or(matches, |(_, sub)| sub);

    info!("🚀 Initializing KeyClimb...");
    let weights = resolve_weights(cli.weights.as_deref(), config, sub_matches)?;
    let scorer = Arc::new(Scorer::from_weights(&weights)?);

    // A missing or malformed model is fatal before any scoring starts.
    let model = Arc::new(FrequencyModel::load_from_file(&cli.model)?);

    match cli.command {
        Commands::Validate(args) => cmd::validate::run(&args, scorer, model),
        Commands::Search(args) => cmd::search::run(&args, scorer, model),
        Commands::Ingest(_) => Ok(()),
    }
}

fn resolve_weights(
    path: Option<&str>,
    config: &Config,
    sub_matches: &ArgMatches,
) -> KfResult<ScoringWeights> {
    match path {
        Some(path) => {
            info!("⚖️  Loading Weights from: {}", path);
            let mut file_weights = ScoringWeights::load_from_file(path)?;
            file_weights.merge_from_cli(&config.weights, sub_matches);
            Ok(file_weights)
        }
        None => {
            warn!("⚠️  No external weights loaded. Using command-line values.");
            Ok(config.weights.clone())
        }
    }
}
