#![allow(missing_docs)]

//! Contactos — contact-management backend binary.
//!
//! Two subcommands:
//! - `serve` — run the HTTP API (default)
//! - `export` — write the contact book to an XLSX file and exit

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::{info, warn};

use contactos::config::{self, Config};
use contactos::export;
use contactos::http::{router, AppState};
use contactos::logging;
use contactos::notify::{LogMailer, Mailer, SmtpMailer};
use contactos::store::ContactStore;

/// CLI arguments.
#[derive(Debug, Parser)]
#[command(name = "contactos", about = "Contact-management backend", version)]
struct Cli {
    /// Path to config.toml (default: ~/.contactos/config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server (default).
    Serve,

    /// Write the contact book to an XLSX file without starting the server.
    Export {
        /// Output file path.
        #[arg(long, default_value = "contacts.xlsx")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => config::config_dir()?.join("config.toml"),
    };
    let config = config::load_config(&config_path).context("failed to load configuration")?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::Export { out } => {
            logging::init_cli();
            export_to_file(&config, &out).await
        }
    }
}

/// Run the HTTP server until ctrl-c.
async fn serve(config: Config) -> Result<()> {
    let logs_dir = config::config_dir()?.join("logs");
    let _logging_guard = logging::init_server(&logs_dir)?;

    info!("contactos starting");

    let store = ContactStore::new(open_pool(&config).await?);
    store.migrate().await.context("failed to apply schema")?;

    let mailer: Arc<dyn Mailer> = match config.smtp {
        Some(ref smtp) => {
            info!(host = %smtp.host, "smtp mailer configured");
            Arc::new(SmtpMailer::from_config(smtp).context("failed to build smtp mailer")?)
        }
        None => {
            warn!("no [smtp] section in config; welcome mails will be logged only");
            Arc::new(LogMailer)
        }
    };

    let app = router(AppState { store, mailer });

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("invalid server bind address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(%addr, "contactos ready -- serving requests");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("contactos shut down cleanly");
    Ok(())
}

/// One-shot export: open the store, encode, write the file.
async fn export_to_file(config: &Config, out: &std::path::Path) -> Result<()> {
    let store = ContactStore::new(open_pool(config).await?);
    store.migrate().await.context("failed to apply schema")?;

    let contacts = store.list().await.context("failed to list contacts")?;
    let bytes = export::write_workbook(&contacts).context("failed to encode workbook")?;
    std::fs::write(out, bytes)
        .with_context(|| format!("failed to write {}", out.display()))?;

    info!(contacts = contacts.len(), path = %out.display(), "export written");
    Ok(())
}

/// Open the SQLite pool described by the config.
async fn open_pool(config: &Config) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::new()
        .filename(&config.database.path)
        .create_if_missing(true);

    SqlitePoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect_with(options)
        .await
        .with_context(|| {
            format!(
                "failed to open database at {}",
                config.database.path.display()
            )
        })
}

/// Resolve on ctrl-c so axum can drain in-flight requests.
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
    }
    info!("received shutdown signal, draining requests");
}
