//! Prints one owner's board as JSON.
//!
//! Usage:
//!
//! ```text
//! board_snapshot <owner-uuid> [platform] [search]
//! ```
//!
//! `platform` is `all` (the default) or one of `YouTube`, `Instagram`,
//! `TikTok`, `Blog`. Configuration comes from the `CONTENTBOARD_*`
//! environment variables; `CONTENTBOARD_DATABASE_URL` is required.

use contentboard::auth::Identity;
use contentboard::board::Board;
use contentboard::board::projection::StageColumns;
use contentboard::config::{BoardConfig, ConfigError};
use contentboard::logging::{LoggingError, init_logging};
use contentboard::preferences::{PreferenceStore, PreferencesError, Theme};
use contentboard::task::adapters::postgres::{PostgresTaskRecords, build_pool};
use contentboard::task::domain::{OwnerId, PlatformFilter, TaskDomainError};
use contentboard::task::ports::TaskRecordError;
use contentboard::task::services::{LoadOutcome, TaskStore};
use mockable::DefaultClock;
use serde::Serialize;
use std::env;
use std::io::{self, Write};
use std::sync::Arc;
use thiserror::Error;
use tokio::runtime::Builder;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
enum SnapshotError {
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Logging(#[from] LoggingError),
    #[error(transparent)]
    Preferences(#[from] PreferencesError),
    #[error(transparent)]
    Filter(#[from] TaskDomainError),
    #[error(transparent)]
    Records(#[from] TaskRecordError),
    #[error("runtime init failed: {0}")]
    RuntimeInit(#[source] io::Error),
    #[error("board load failed: {0:?}")]
    Load(LoadOutcome),
    #[error("failed to write snapshot: {0}")]
    Output(#[source] io::Error),
    #[error("failed to encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug)]
struct SnapshotArgs {
    owner: OwnerId,
    platform: PlatformFilter,
    search: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Snapshot<'a> {
    owner: OwnerId,
    theme: Theme,
    platform: PlatformFilter,
    search: &'a str,
    columns: &'a StageColumns,
}

fn main() -> Result<(), BoxError> {
    run(env::args().skip(1)).map_err(Into::into)
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<SnapshotArgs, SnapshotError> {
    let owner = args
        .next()
        .ok_or_else(|| SnapshotError::InvalidArgs("missing owner id".into()))?;
    let owner = uuid::Uuid::parse_str(owner.trim())
        .map(OwnerId::from_uuid)
        .map_err(|err| SnapshotError::InvalidArgs(format!("owner id '{owner}': {err}")))?;
    let platform = args
        .next()
        .map_or(Ok(PlatformFilter::All), |raw| PlatformFilter::try_from(raw.as_str()))?;
    let search = args.collect::<Vec<_>>().join(" ");
    Ok(SnapshotArgs {
        owner,
        platform,
        search,
    })
}

fn run(args: impl Iterator<Item = String>) -> Result<(), SnapshotError> {
    let args = parse_args(args)?;
    let config = BoardConfig::from_env()?;
    init_logging(config.log_level)?;
    let theme = PreferenceStore::open(&config.preferences_dir)?.theme_or(Theme::Dark)?;

    let pool = build_pool(config.require_database_url()?, config.pool_size)?;
    let clock = Arc::new(DefaultClock);
    let store = TaskStore::new(
        Arc::new(PostgresTaskRecords::new(pool)),
        Arc::clone(&clock),
    );
    let mut board = Board::new(store, clock);
    board.set_platform_filter(args.platform);
    board.set_search_query(&args.search);

    let runtime = Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(SnapshotError::RuntimeInit)?;
    let identity = Identity::new(args.owner);
    let outcome = runtime.block_on(board.set_identity(Some(&identity)));
    if !matches!(outcome, LoadOutcome::Loaded { .. }) {
        return Err(board
            .store()
            .last_error()
            .map_or(SnapshotError::Load(outcome), SnapshotError::Records));
    }

    let columns = board.columns();
    let snapshot = Snapshot {
        owner: args.owner,
        theme,
        platform: args.platform,
        search: &args.search,
        columns: &columns,
    };
    let encoded = serde_json::to_string_pretty(&snapshot)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{encoded}").map_err(SnapshotError::Output)
}
