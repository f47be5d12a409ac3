use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{HttpSummaryService, SummarySession, UiIntent, ViewSnapshot};
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod terminal;

use config::{load_settings, CliOverrides};
use terminal::{forward_stdin, ViewPrinter, WELCOME};

#[derive(Parser, Debug)]
#[command(about = "Summarize text with a remote summarization service")]
struct Args {
    /// Base URL of the summarization service.
    #[arg(long)]
    service_url: Option<String>,
    /// Path of the summarize endpoint on the service.
    #[arg(long)]
    endpoint_path: Option<String>,
    /// Give up on a request after this many seconds (0 waits forever).
    #[arg(long)]
    request_timeout_secs: Option<u64>,
    /// TOML settings file; `summarizer.toml` is read when present.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Print sanitized HTML instead of plain text.
    #[arg(long)]
    html: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let settings = load_settings(
        args.config.as_deref(),
        &CliOverrides {
            service_url: args.service_url.clone(),
            endpoint_path: args.endpoint_path.clone(),
            request_timeout_secs: args.request_timeout_secs,
        },
    )?;
    let service = HttpSummaryService::new(&settings.endpoint())
        .context("failed to configure the summarization service client")?;
    info!(
        endpoint = %service.endpoint(),
        timeout_secs = ?settings.request_timeout_secs,
        "summarizer ready"
    );

    let (intent_tx, intent_rx) = mpsc::channel::<UiIntent>(64);
    let (view_tx, mut view_rx) = mpsc::channel::<ViewSnapshot>(256);
    let session = tokio::spawn(SummarySession::new(Arc::new(service)).run(intent_rx, view_tx));
    tokio::spawn(forward_stdin(intent_tx));

    println!("{WELCOME}");
    let mut printer = ViewPrinter::new(args.html);
    while let Some(view) = view_rx.recv().await {
        if let Some(output) = printer.render(&view) {
            println!("{output}");
        }
    }

    session.await.context("summary session task failed")?;
    Ok(())
}
