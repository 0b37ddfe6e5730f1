mod config;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;
use indexer_client::IndexerClient;

#[derive(Parser)]
#[command(name = "corkboard", about = "Submit and browse indexed content")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every known input.
    List,
    /// Submit a URL or a plain-text note for indexing.
    Submit { input: String },
    /// Upload a PDF or Word document for indexing.
    Upload { path: PathBuf },
    /// Show the processing status of one submission.
    Status { request_id: String },
    /// Show how many inputs the backend knows about.
    Count,
}

/// The backend only processes PDF and Word uploads; reject anything else
/// before the bytes travel.
fn content_type_for(path: &Path) -> Result<&'static str> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("pdf") => Ok("application/pdf"),
        Some(ext) if ext.eq_ignore_ascii_case("docx") => Ok(
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        ),
        _ => bail!("unsupported file type: {} (expected .pdf or .docx)", path.display()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("corkboard_cli=info".parse()?)
                .add_directive("indexer_client=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();
    let client = IndexerClient::new(&config.indexer_url);

    match cli.command {
        Command::List => {
            let inputs = client.list_inputs().await?;
            if inputs.is_empty() {
                println!("No inputs indexed yet.");
                return Ok(());
            }
            for record in &inputs {
                println!(
                    "{}  [{}]  {}",
                    record.id,
                    record.status.as_deref().unwrap_or("-"),
                    record.title.as_deref().unwrap_or("(untitled)"),
                );
            }
            info!(count = inputs.len(), "Listed inputs");
        }
        Command::Submit { input } => {
            client.submit_text(&input).await?;
            println!("Submitted for indexing.");
        }
        Command::Upload { path } => {
            let content_type = content_type_for(&path)?;
            let file_name = path
                .file_name()
                .and_then(|n| n.to_str())
                .context("path has no file name")?
                .to_string();
            client.submit_file(&file_name, &path, content_type).await?;
            println!("Uploaded {file_name} for indexing.");
        }
        Command::Status { request_id } => {
            let status = client.status(&request_id).await?;
            println!("{status}");
        }
        Command::Count => {
            println!("{}", client.count().await?);
        }
    }

    Ok(())
}
