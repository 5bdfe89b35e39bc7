use clap::{Parser, Subcommand};
use eyre::{Context, Result};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use tasklist::{Config, Mode, Overrides, Session};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tasklist")]
#[command(about = "TaskList - a to-do list that lives for one session")]
#[command(version = env!("GIT_DESCRIBE"))]
struct Cli {
    /// Path to a YAML config file (default: <config dir>/tasklist/config.yml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Disable coloured output
    #[arg(long)]
    no_color: bool,

    /// chrono format string for creation dates
    #[arg(long)]
    date_format: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive session on stdin/stdout (default)
    Repl,

    /// Run the commands in a file as one session and print the transcript
    Replay {
        /// File with one command per line
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing; stderr keeps logs out of the rendered list
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = Config::load(&Overrides {
        config_path: cli.config.clone(),
        date_format: cli.date_format.clone(),
        no_color: cli.no_color,
    })?;

    if !config.color {
        colored::control::set_override(false);
    }

    let mut session = Session::new(&config);
    let mut stdout = io::stdout().lock();

    match cli.command.unwrap_or(Commands::Repl) {
        Commands::Repl => {
            session.run(io::stdin().lock(), &mut stdout, Mode::Interactive)?;
        }
        Commands::Replay { path } => {
            let file = File::open(&path).with_context(|| format!("Failed to open script: {}", path.display()))?;
            session.run(BufReader::new(file), &mut stdout, Mode::Replay)?;
        }
    }

    Ok(())
}
