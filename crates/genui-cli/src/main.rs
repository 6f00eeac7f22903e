use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "genui")]
#[command(about = "GenUI CLI - model-generated screens from the terminal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pull the JSON payload out of a model generation
    Extract {
        /// Input file; stdin when omitted
        file: Option<PathBuf>,
    },
    /// Validate a generation and print the canonical screen
    Parse {
        /// Input file; stdin when omitted
        file: Option<PathBuf>,
    },
    /// Print the system prompt sessions start with
    Prompt,
    /// Write default config.toml and a secret.json template
    Init,
    /// Run an interactive session
    Chat {
        /// First instruction; read from stdin when omitted
        #[arg(short, long)]
        instruction: Option<String>,
        /// App context JSON attached to every turn
        #[arg(short, long)]
        context: Option<String>,
        /// Use the offline scripted model regardless of config
        #[arg(long)]
        offline: bool,
    },
}

fn init_tracing() {
    let default_level = "genui=info";
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(default_level))
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Extract { file } => commands::extract::run(file.as_deref())?,
        Commands::Parse { file } => commands::parse::run(file.as_deref())?,
        Commands::Prompt => commands::prompt::run()?,
        Commands::Init => commands::init::run()?,
        Commands::Chat {
            instruction,
            context,
            offline,
        } => commands::chat::run(instruction, context.as_deref(), offline).await?,
    }

    Ok(())
}
