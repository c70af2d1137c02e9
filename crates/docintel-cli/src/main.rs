//! DocIntel — upload documents and ask questions about them from the terminal.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use docintel_core::{ClientConfig, DEFAULT_NUM_CHUNKS};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod commands;
mod views;

#[derive(Parser)]
#[command(name = "docintel", version, about = "Upload documents and ask questions about them")]
struct Cli {
    /// Backend base URL (overrides DOCINTEL_API_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Request timeout in milliseconds (overrides DOCINTEL_TIMEOUT_MS)
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List uploaded documents and their processing status
    #[command(alias = "list")]
    Documents {
        /// Bypass caches and send no auth token
        #[arg(long)]
        uncached: bool,
    },
    /// Upload a PDF, DOCX or TXT file
    Upload { path: PathBuf },
    /// Ask a question about a document
    Ask {
        document_id: String,
        question: String,
        /// How many passages the backend should consider
        #[arg(long, default_value_t = DEFAULT_NUM_CHUNKS)]
        chunks: u32,
    },
    /// Show a document's details
    Show { document_id: String },
    /// Store an auth token for later requests
    Login { token: String },
    /// Forget the stored auth token
    Logout,
}

fn build_config(cli: &Cli) -> anyhow::Result<ClientConfig> {
    let mut config = ClientConfig::from_env()?;
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url.as_str())?;
    }
    if let Some(ms) = cli.timeout_ms {
        config = config.with_timeout(Duration::from_millis(ms));
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = build_config(&cli)?;
    debug!("Using backend {}", config.base_url);

    let succeeded = match cli.command {
        Command::Documents { uncached } => commands::documents(&config, uncached).await?,
        Command::Upload { path } => commands::upload(&config, &path).await?,
        Command::Ask {
            document_id,
            question,
            chunks,
        } => commands::ask(&config, &document_id, &question, chunks).await?,
        Command::Show { document_id } => commands::show(&config, &document_id).await?,
        Command::Login { token } => commands::login(&config, &token)?,
        Command::Logout => commands::logout(&config)?,
    };

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
