//! resume-parser - extract structured JSON from resume text.
//!
//! Sends resume text to a hosted chat model with a fixed schema prompt and
//! decodes the reply. Paste a resume interactively, or parse a text file.

mod config;
mod extractor;
mod file;
mod interactive;
mod llm;
mod record;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::Command as ProcessCommand;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "resume-parser")]
#[command(author, version, about = "Extract structured JSON from resume text with a hosted LLM")]
#[command(long_about = "Extract structured JSON from resume text with a hosted LLM.\n\nWithout a subcommand, paste a resume and finish with a line containing END.")]
struct Cli {
    /// Override model (ignores config)
    #[arg(short = 'm', long, value_name = "MODEL", global = true)]
    model: Option<String>,

    /// Read configuration from this file instead of the default location
    #[arg(short = 'c', long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse resume text files and print the results as JSON
    Parse {
        /// UTF-8 text files, one resume each
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Open configuration file in $EDITOR
    Config {
        /// Only print the configuration file path
        #[arg(long)]
        path: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    match cli.command {
        Some(Commands::Parse { files }) => {
            handle_parse(&files, cli.config.as_deref(), cli.model.as_deref()).await
        }
        Some(Commands::Config { path }) => handle_config(cli.config, path),
        None => handle_interactive(cli.config.as_deref(), cli.model.as_deref()).await,
    }
}

/// Log to stderr; quiet unless RUST_LOG asks for more.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("resume_parser=warn,reqwest=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .init();
}

fn load_config(path: Option<&Path>) -> Result<config::Config> {
    match path {
        Some(path) => config::Config::load_from(path),
        None => config::Config::load(),
    }
    .context("Failed to load configuration")
}

/// Interactive mode: collect pasted text from stdin and print the record.
async fn handle_interactive(config_path: Option<&Path>, model: Option<&str>) -> Result<()> {
    let config = load_config(config_path)?;
    let client_config = config.client_config(model)?;
    info!(
        "Using backend: {} (model: {})",
        client_config.provider, client_config.model
    );

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    interactive::run_interactive(stdin.lock(), &mut stdout, || {
        llm::create_client(&client_config)
    })
    .await?;

    Ok(())
}

/// Parse one or more files and print the records.
///
/// A single file prints its record; several files print an array of records
/// in argument order, all sent through one client.
async fn handle_parse(
    files: &[PathBuf],
    config_path: Option<&Path>,
    model: Option<&str>,
) -> Result<()> {
    let config = load_config(config_path)?;
    let client_config = config.client_config(model)?;
    info!(
        "Parsing {} file(s) with {} (model: {})",
        files.len(),
        client_config.provider,
        client_config.model
    );

    if let [resume_path] = files {
        let record = file::parse_resume_file(resume_path, &client_config)
            .await
            .with_context(|| format!("Failed to parse resume file {}", resume_path.display()))?;
        warn_on_error_record(resume_path, &record);
        println!("{}", record.to_pretty_json());
        return Ok(());
    }

    let client = llm::create_client(&client_config).context("Failed to create model client")?;
    let mut records = Vec::with_capacity(files.len());
    for resume_path in files {
        let record = file::parse_resume_file_with(resume_path, &client)
            .await
            .with_context(|| format!("Failed to parse resume file {}", resume_path.display()))?;
        warn_on_error_record(resume_path, &record);
        records.push(record);
    }
    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}

fn warn_on_error_record(resume_path: &Path, record: &record::ResumeRecord) {
    if record.is_error() {
        warn!("Model reply for {} could not be decoded", resume_path.display());
    }
}

/// Handle the config command.
fn handle_config(config_path: Option<PathBuf>, print_path: bool) -> Result<()> {
    let config_path = match config_path {
        Some(path) => path,
        None => config::Config::config_path()?,
    };

    if print_path {
        println!("{}", config_path.display());
        return Ok(());
    }

    // Create default config if it doesn't exist
    if !config_path.exists() {
        config::Config::default().save_to(&config_path)?;
        println!("Created default config at {}", config_path.display());
    }

    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());
    let status = ProcessCommand::new(&editor)
        .arg(&config_path)
        .status()
        .context("Failed to open editor")?;

    if !status.success() {
        eprintln!("Editor exited with non-zero status");
    }

    Ok(())
}
