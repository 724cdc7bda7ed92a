mod file_config;

pub use file_config::{FileConfig, MailerConfig, OutboxConfig};

use crate::server::RequestsLoggingLevel;
use anyhow::{bail, Result};
use clap::ValueEnum;
use std::path::PathBuf;

const DEFAULT_JWT_SECRET: &str = "change-me";

/// CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub db_dir: Option<PathBuf>,
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub jwt_secret: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    // Core settings
    pub db_dir: PathBuf,
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub jwt_secret: String,

    // Feature configs (with defaults)
    pub mailer: Option<MailerSettings>,
    pub outbox: OutboxSettings,
}

#[derive(Debug, Clone)]
pub struct MailerSettings {
    pub api_url: String,
    pub api_key: String,
    pub from: String,
    pub timeout_sec: u64,
}

#[derive(Debug, Clone)]
pub struct OutboxSettings {
    pub poll_interval_secs: u64,
    pub max_attempts: u32,
}

impl Default for OutboxSettings {
    fn default() -> Self {
        Self {
            poll_interval_secs: 30,
            max_attempts: 5,
        }
    }
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present; the JWT_SECRET env var
    /// sits between the two.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let db_dir = file
            .db_dir
            .map(PathBuf::from)
            .or_else(|| cli.db_dir.clone())
            .ok_or_else(|| {
                anyhow::anyhow!("db_dir must be specified via --db-dir or in config file")
            })?;

        if !db_dir.exists() {
            bail!("Database directory does not exist: {:?}", db_dir);
        }
        if !db_dir.is_dir() {
            bail!("db_dir is not a directory: {:?}", db_dir);
        }

        let port = file.port.unwrap_or(cli.port);

        let logging_level = file
            .logging_level
            .and_then(|s| parse_logging_level(&s))
            .unwrap_or_else(|| cli.logging_level.clone());

        let jwt_secret = file
            .jwt_secret
            .or_else(|| std::env::var("JWT_SECRET").ok())
            .or_else(|| cli.jwt_secret.clone())
            .unwrap_or_else(|| DEFAULT_JWT_SECRET.to_string());

        // Mailer is only considered configured when the whole section is usable
        let mailer = match file.mailer {
            Some(m) => match (m.api_url, m.api_key, m.from) {
                (Some(api_url), Some(api_key), Some(from)) => Some(MailerSettings {
                    api_url,
                    api_key,
                    from,
                    timeout_sec: m.timeout_sec.unwrap_or(30),
                }),
                (None, None, None) => None,
                _ => bail!("[mailer] config requires api_url, api_key and from"),
            },
            None => None,
        };

        let outbox_file = file.outbox.unwrap_or_default();
        let outbox = OutboxSettings {
            poll_interval_secs: outbox_file.poll_interval_secs.unwrap_or(30),
            max_attempts: outbox_file.max_attempts.unwrap_or(5),
        };

        Ok(Self {
            db_dir,
            port,
            logging_level,
            jwt_secret,
            mailer,
            outbox,
        })
    }

    pub fn label_db_path(&self) -> PathBuf {
        self.db_dir.join("label.db")
    }
}

/// Parses a logging level string into RequestsLoggingLevel.
/// Uses clap's ValueEnum trait for parsing.
fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}
