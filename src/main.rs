use clap::{Parser, Subcommand};
use corsgate::config::{Config, LogFormat};
use corsgate::cors::PolicySummary;
use corsgate::error::AppResult;
use corsgate::server;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// corsgate - CORS edge for the clinic scheduling backend
#[derive(Parser, Debug)]
#[command(name = "corsgate")]
#[command(version)]
#[command(about = "Serves the API behind a static cross-origin policy", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the web server
    Server {
        /// Host to bind to (overrides SERVER_HOST env var)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides SERVER_PORT env var)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print the effective CORS policy as JSON
    Policy,
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(Level::INFO.to_string()));

    match format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::from_env()?;

    init_tracing(config.logging.format);

    match cli.command {
        Commands::Server { host, port } => {
            // Override config with CLI args if provided
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            config.validate()?;

            server::run_server(config).await
        }
        Commands::Policy => {
            let summary = PolicySummary::from(&config.cors);
            println!("{}", serde_json::to_string_pretty(&summary)?);
            Ok(())
        }
    }
}
