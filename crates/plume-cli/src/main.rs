use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// plume — write in your own voice, with a model trained on your articles.
///
/// Maintains a corpus of your writing on the companion server, analyzes
/// its style, and generates new articles that match it.
#[derive(Parser, Debug)]
#[command(name = "plume", version, about)]
struct Cli {
    /// Base URL of the writing-assistant server (overrides the config file).
    #[arg(short, long)]
    server: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging.
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // Log to a file to avoid corrupting the TUI output. If the log file
    // can't be opened, silently discard logs rather than polluting the
    // alternate screen buffer.
    let log_dir = dirs::cache_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("plume");
    let _ = std::fs::create_dir_all(&log_dir);
    let log_path = log_dir.join("plume.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path);

    match log_file {
        Ok(file) => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
                )
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        Err(_) => {
            // Fallback: discard all logs to avoid TUI corruption.
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::new("off"))
                .with_writer(std::io::sink)
                .init();
        }
    }

    // Load config.
    let mut config = plume_core::PlumeConfig::load().unwrap_or_else(|e| {
        eprintln!("Warning: Failed to load config: {}. Using defaults.", e);
        plume_core::PlumeConfig::default()
    });
    if let Some(server) = cli.server {
        config.server.base_url = server;
    }

    tracing::info!("Starting plume v{}", env!("CARGO_PKG_VERSION"));

    let gateway = Arc::new(plume_api::HttpGateway::new(
        config.server.base_url.clone(),
        Duration::from_secs(config.server.timeout_seconds),
    ));

    // Start the TUI.
    let mut app = plume_tui::App::new(gateway, config);
    app.run().await?;

    tracing::info!("plume exited cleanly");
    Ok(())
}
