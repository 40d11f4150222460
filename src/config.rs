//! Configuration loading.
//!
//! A single TOML file (`config.toml`) with three sections:
//! - `[server]` — HTTP bind address
//! - `[database]` — SQLite file path and pool size
//! - `[smtp]` — optional; when absent, welcome mails are logged, not sent
//!
//! The SMTP password is never stored in the file — only the name of the
//! environment variable that holds it.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// SQLite settings.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Outbound mail settings. `None` disables real delivery.
    #[serde(default)]
    pub smtp: Option<SmtpConfig>,
}

/// HTTP server settings.
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// SQLite settings.
#[derive(Debug, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the database file.
    #[serde(default = "default_db_path")]
    pub path: PathBuf,

    /// Maximum pool connections.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_max_connections(),
        }
    }
}

/// Outbound SMTP settings.
#[derive(Debug, Clone, Deserialize)]
pub struct SmtpConfig {
    /// SMTP relay hostname.
    pub host: String,

    /// SMTP submission port.
    #[serde(default = "default_smtp_port")]
    pub port: u16,

    /// Sender address for welcome mails (e.g. `"Contactos <hello@example.com>"`).
    pub from: String,

    /// SMTP username.
    pub username: String,

    /// Environment variable holding the SMTP password.
    #[serde(default = "default_password_env")]
    pub password_env: String,
}

// Default value functions for serde

fn default_host() -> String {
    "127.0.0.1".to_owned()
}
fn default_port() -> u16 {
    8080
}
fn default_db_path() -> PathBuf {
    PathBuf::from("contacts.db")
}
fn default_max_connections() -> u32 {
    5
}
fn default_smtp_port() -> u16 {
    587
}
fn default_password_env() -> String {
    "CONTACTOS_SMTP_PASSWORD".to_owned()
}

/// Load configuration from a TOML file.
///
/// A missing file is not an error — defaults apply (and mail delivery is
/// disabled, since `[smtp]` defaults to absent).
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read config at {}: {e}", path.display()))?;
    let config: Config = toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("failed to parse config at {}: {e}", path.display()))?;
    Ok(config)
}

/// Resolve the default config directory (`~/.contactos/`).
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn config_dir() -> anyhow::Result<PathBuf> {
    let home = directories::BaseDirs::new()
        .ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
    Ok(home.home_dir().join(".contactos"))
}
