use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    // Core settings (can override CLI)
    pub db_dir: Option<String>,
    pub port: Option<u16>,
    pub logging_level: Option<String>,
    pub jwt_secret: Option<String>,

    // Feature configs
    pub mailer: Option<MailerConfig>,
    pub outbox: Option<OutboxConfig>,
}

/// Transactional email provider credentials. When the section is absent the
/// server runs with a no-op transport and review notifications are dropped.
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct MailerConfig {
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub from: Option<String>,
    pub timeout_sec: Option<u64>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct OutboxConfig {
    pub poll_interval_secs: Option<u64>,
    pub max_attempts: Option<u32>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}
