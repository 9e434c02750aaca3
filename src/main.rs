use std::sync::Arc;

use axum::http::Method;
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use debate_smelter::{
    config::{Config, LogFormat},
    server::{self, handle_debate, AppState},
    DebateRequest,
};

/// Bring-your-own-key debate service
#[derive(Parser, Debug)]
#[command(name = "debate-smelter", version, about)]
struct Cli {
    /// Host to bind (overrides SERVER_HOST)
    #[arg(long, global = true)]
    host: Option<String>,

    /// Port to bind (overrides SERVER_PORT)
    #[arg(long, global = true)]
    port: Option<u16>,

    /// Log filter (overrides LOG_LEVEL)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default)
    Serve,

    /// Run a single debate and print the JSON result
    Ask {
        /// Debate topic
        #[arg(long)]
        topic: String,

        /// API key to use for the three agent calls
        #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
        key: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is read before argument parsing so it can supply OPENAI_API_KEY
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    // Load configuration
    let mut config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }

    // Initialize logging
    init_logging(&config);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Debate Smelter starting..."
    );

    let state = Arc::new(AppState::from_config(config)?);

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            if let Err(e) = server::serve(state).await {
                error!(error = %e, "Server error");
                return Err(e.into());
            }
            info!("Server shutdown complete");
        }
        Command::Ask { topic, key } => {
            let body = serde_json::to_vec(&DebateRequest::new(topic, key))?;
            match handle_debate(&state, &Method::POST, &body).await {
                Ok(response) => println!("{}", serde_json::to_string_pretty(&response)?),
                Err(e) => {
                    eprintln!("{}", e.message());
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}

/// Initialize tracing/logging
fn init_logging(config: &Config) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}
