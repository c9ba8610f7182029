mod doctor_cmd;
mod output;
mod redact_cmd;
mod status_cmd;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use redactor_config::{RedactorConfig, DEFAULT_LANGUAGE};
use redactor_gateway::{start_server, AppState};
use redactor_logging::init_logger;

use redact_cmd::RedactArgs;

#[derive(Parser)]
#[command(name = "redactor")]
#[command(about = "Redactor: extract text from documents and black out PII")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
        /// Address to bind the HTTP server to
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Redact a local file and write the DOCX/PDF bundle
    Redact {
        /// Document to process (.txt, .docx, .pdf or an image)
        input: PathBuf,
        /// Where to write the ZIP; defaults to next to the input
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Tidy the extracted text with Gemini before redacting
        #[arg(long)]
        use_ai: bool,
        /// OCR language code, e.g. `eng` or `eng+deu`
        #[arg(short, long, default_value = DEFAULT_LANGUAGE)]
        language: String,
    },
    /// Query the health endpoint of a running server
    Status {
        /// Port the server listens on
        #[arg(short, long)]
        port: Option<u16>,
        /// Host the server listens on
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },
    /// Check configuration and OCR tooling
    Doctor,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = RedactorConfig::from_env()?;

    init_logger(&config.logging.level, config.logging.dir.as_deref().map(Path::new));

    match cli.command {
        Commands::Serve { port, bind } => {
            let mut config = config;
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(bind) = bind {
                config.server.bind_address = bind;
            }
            run_server(config).await?;
        }
        Commands::Redact {
            input,
            output,
            use_ai,
            language,
        } => {
            let args = RedactArgs {
                input,
                output,
                use_ai,
                language,
            };
            redact_cmd::run(&config, args).await?;
        }
        Commands::Status { port, host } => {
            status_cmd::run(&host, port.unwrap_or(config.server.port)).await?;
        }
        Commands::Doctor => {
            doctor_cmd::run(&config).await?;
        }
    }

    Ok(())
}

async fn run_server(config: RedactorConfig) -> Result<()> {
    redactor_config::check(&config)?;
    info!(config = %config.redacted(), "Starting redactor");

    let state = Arc::new(AppState::from_config(&config)?);
    start_server(&config.server.listen_addr(), state).await
}
