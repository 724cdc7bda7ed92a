use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, level_filters::LevelFilter, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use recursive_label_server::config::{AppConfig, CliConfig, FileConfig};
use recursive_label_server::label_store::{LabelStore, SqliteLabelStore};
use recursive_label_server::mailer::{run_outbox_dispatcher, HttpMailer, Mailer, NoopMailer};
use recursive_label_server::server::{run_server, RequestsLoggingLevel};
use recursive_label_server::user::TokenAuthority;

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Directory holding the SQLite label database.
    #[clap(long, value_parser = parse_path)]
    pub db_dir: Option<PathBuf>,

    /// The port to listen on.
    #[clap(short, long, default_value_t = 3001)]
    pub port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Shared secret for signing bearer tokens. The JWT_SECRET environment
    /// variable takes precedence over this flag.
    #[clap(long)]
    pub jwt_secret: Option<String>,

    /// Path to a TOML config file. Values there override CLI flags.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .unwrap();

    let file_config = match &cli_args.config {
        Some(path) => Some(FileConfig::load(path)?),
        None => None,
    };
    let config = AppConfig::resolve(
        &CliConfig {
            db_dir: cli_args.db_dir,
            port: cli_args.port,
            logging_level: cli_args.logging_level,
            jwt_secret: cli_args.jwt_secret,
        },
        file_config,
    )?;

    info!(
        "Opening SQLite label database at {:?}...",
        config.label_db_path()
    );
    let label_store: Arc<dyn LabelStore> =
        Arc::new(SqliteLabelStore::new(config.label_db_path())?);

    let mailer: Arc<dyn Mailer> = match &config.mailer {
        Some(settings) => {
            info!("Email provider configured at {}", settings.api_url);
            Arc::new(HttpMailer::new(
                settings.api_url.clone(),
                settings.api_key.clone(),
                settings.from.clone(),
                settings.timeout_sec,
            ))
        }
        None => {
            warn!("No [mailer] config; review notification emails will be dropped");
            Arc::new(NoopMailer)
        }
    };

    info!(
        "Outbox dispatcher running every {}s, {} attempts per email",
        config.outbox.poll_interval_secs, config.outbox.max_attempts
    );
    tokio::spawn(run_outbox_dispatcher(
        label_store.clone(),
        mailer,
        Duration::from_secs(config.outbox.poll_interval_secs),
        config.outbox.max_attempts,
    ));

    let token_authority = TokenAuthority::new(&config.jwt_secret);

    info!("Ready to serve at port {}!", config.port);
    run_server(
        label_store,
        token_authority,
        config.logging_level,
        config.port,
    )
    .await
}
