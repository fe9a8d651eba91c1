use clap::{Parser, Subcommand};
use roommate_match::config::{LoggingSettings, Settings, SettingsError};
use roommate_match::core::{CompatibilityScorer, Matcher, RankOptions};
use roommate_match::models::{ErrorResponse, RankRequest, RankingResponse, ScorePairRequest, ScoreResponse};
use roommate_match::services::{CacheError, ProfileStore, ProfileStoreError, ScoreCache};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use validator::Validate;

/// Score and rank roommate profiles exported from the content backend
#[derive(Debug, Parser)]
#[command(name = "roommate-match", version, about)]
struct Cli {
    /// Configuration file (defaults to config/default.toml + config/local.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Mutual compatibility of two profiles
    Score {
        /// JSON file with the exported profiles
        #[arg(long)]
        profiles: PathBuf,
        profile_a: String,
        profile_b: String,
        /// Include the per-dimension breakdown of both directions
        #[arg(long)]
        explain: bool,
    },
    /// Rank every other profile for a viewer
    Rank {
        /// JSON file with the exported profiles
        #[arg(long)]
        profiles: PathBuf,
        viewer_id: String,
        #[arg(long)]
        limit: Option<u16>,
        /// Profile ids to leave out (repeatable)
        #[arg(long = "exclude")]
        exclude: Vec<String>,
        /// Drop candidates that cannot be scored instead of listing them last
        #[arg(long)]
        exclude_incomplete: bool,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Store(#[from] ProfileStoreError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Failed to serialize output: {0}")]
    Output(#[from] serde_json::Error),
}

impl CliError {
    fn kind(&self) -> &'static str {
        match self {
            CliError::Settings(_) => "invalid_config",
            CliError::Store(ProfileStoreError::NotFound(_)) => "profile_not_found",
            CliError::Store(_) => "invalid_profiles",
            CliError::Cache(_) => "invalid_cache",
            CliError::Validation(_) => "validation_failed",
            CliError::Output(_) => "output_failed",
        }
    }
}

fn main() -> ExitCode {
    // Load .env file if present
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let settings = load_settings(cli.config.as_deref());
    let logging = settings
        .as_ref()
        .map(|s| s.logging.clone())
        .unwrap_or_default();
    init_logging(&logging);

    let result = settings
        .map_err(CliError::from)
        .and_then(|settings| run(cli.command, &settings));

    match result {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            let response = ErrorResponse {
                error: e.kind().to_string(),
                message: e.to_string(),
            };
            if let Ok(json) = serde_json::to_string_pretty(&response) {
                println!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}

fn load_settings(path: Option<&Path>) -> Result<Settings, SettingsError> {
    match path {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    }
}

/// Logs go to stderr so stdout stays machine-readable
fn init_logging(logging: &LoggingSettings) {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| logging.level.clone());
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr);

    match logging.format.as_str() {
        "json" => subscriber.json().init(),
        "pretty" => subscriber.pretty().init(),
        _ => subscriber.compact().init(),
    }
}

fn run(command: Command, settings: &Settings) -> Result<String, CliError> {
    match command {
        Command::Score {
            profiles,
            profile_a,
            profile_b,
            explain,
        } => {
            let req = ScorePairRequest {
                profile_a,
                profile_b,
                explain,
            };
            req.validate()?;

            let store = ProfileStore::from_path(&profiles)?;
            let response = score_pair(&store, &req, settings)?;
            Ok(serde_json::to_string_pretty(&response)?)
        }
        Command::Rank {
            profiles,
            viewer_id,
            limit,
            exclude,
            exclude_incomplete,
        } => {
            let limit = limit
                .unwrap_or(settings.matching.default_limit)
                .min(settings.matching.max_limit);
            let req = RankRequest {
                viewer_id,
                limit,
                exclude_ids: exclude,
                include_incomplete: settings.matching.include_incomplete && !exclude_incomplete,
            };
            req.validate()?;

            let store = ProfileStore::from_path(&profiles)?;
            let response = rank(&store, &req, settings)?;
            Ok(serde_json::to_string_pretty(&response)?)
        }
    }
}

fn score_pair(
    store: &ProfileStore,
    req: &ScorePairRequest,
    settings: &Settings,
) -> Result<ScoreResponse, CliError> {
    let a = store.get(&req.profile_a)?;
    let b = store.get(&req.profile_b)?;
    let scorer = CompatibilityScorer::new(settings.weights());

    let response = match scorer.explain(a, b) {
        Ok(breakdown) => {
            info!("Compatibility of {} and {}: {}", a.label(), b.label(), breakdown.score);
            let (a_to_b, b_to_a) = if req.explain {
                (Some(breakdown.a_to_b), Some(breakdown.b_to_a))
            } else {
                (None, None)
            };
            ScoreResponse {
                profile_a: req.profile_a.clone(),
                profile_b: req.profile_b.clone(),
                score: Some(breakdown.score),
                a_to_b,
                b_to_a,
                error: None,
            }
        }
        Err(e) => {
            warn!("Compatibility check failed, missing profile data: {}", e);
            ScoreResponse {
                profile_a: req.profile_a.clone(),
                profile_b: req.profile_b.clone(),
                score: None,
                a_to_b: None,
                b_to_a: None,
                error: Some(e.to_string()),
            }
        }
    };

    Ok(response)
}

fn rank(
    store: &ProfileStore,
    req: &RankRequest,
    settings: &Settings,
) -> Result<RankingResponse, CliError> {
    let viewer = store.get(&req.viewer_id)?;

    let mut matcher = Matcher::new(settings.weights());
    if settings.cache.capacity > 0 {
        let cache = ScoreCache::new(settings.cache.capacity)?;
        matcher = matcher.with_cache(Arc::new(cache));
    }

    info!("Ranking {} candidates for {}, limit: {}", store.len(), req.viewer_id, req.limit);

    let result = matcher.rank(viewer, store.profiles(), &RankOptions::from(req));

    Ok(RankingResponse {
        viewer_id: req.viewer_id.clone(),
        matches: result.matches,
        total_candidates: result.total_candidates,
        skipped_incomplete: result.skipped_incomplete,
        generated_at: chrono::Utc::now(),
    })
}
