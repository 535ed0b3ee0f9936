use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use pdfvec_core::config::{Config, DB_FILENAME};
use pdfvec_embed::get_default_embedder;
use pdfvec_ingest::ingest_pdf;
use pdfvec_store::StoreWriter;

/// Extract text from each page of a PDF, embed it and append it to pdf_embeddings.db.
#[derive(Debug, Parser)]
#[command(name = "pdf-embedder", version)]
struct Cli {
    /// PDF file to ingest
    pdf: PathBuf,

    /// Records per transaction; overrides `commit_interval` from configuration
    #[arg(long)]
    commit_interval: Option<usize>,
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_ansi(std::io::stdout().is_terminal())
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if err.use_stderr() => {
            let _ = err.print();
            return Ok(ExitCode::from(1));
        }
        Err(err) => err.exit(),
    };
    if !cli.pdf.exists() {
        error!("PDF file '{}' does not exist.", cli.pdf.display());
        return Ok(ExitCode::from(1));
    }

    let config = Config::load().map_err(|e| { eprintln!("Error loading config: {}", e); e })?;
    let mut settings = config.settings()?;
    if let Some(interval) = cli.commit_interval { settings.commit_interval = interval; }
    settings.validate()?;

    let mut store = StoreWriter::initialize(Path::new(DB_FILENAME), settings.commit_interval)?;

    info!("Loading embedding model (all-MiniLM-L6-v2)...");
    let embedder = get_default_embedder(&settings)?;
    info!("Embedding model loaded.");

    let report = ingest_pdf(&cli.pdf, embedder.as_ref(), &mut store)?;
    store.close()?;

    println!("\n✅ Embeddings saved to {}.", DB_FILENAME);
    println!("📊 {} pages stored from {} ({} of {} pages had no text)", report.records, report.filename, report.skipped.len(), report.page_count);
    Ok(ExitCode::SUCCESS)
}
