use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod output;

use output::ColorMode;
use veracity_core::{AnalysisError, Config, NormalizedReport, ScoringClient, SelectedDocument};
use veracity_pdf::TextExtractor;
use veracity_pdf_mupdf::MupdfBackend;

/// Resume Authenticity Checker - score a resume and list its red flags
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the resume PDF to analyze
    file_path: PathBuf,

    /// Scoring service endpoint (overrides VERACITY_SCORING_URL)
    #[arg(long)]
    endpoint: Option<String>,

    /// Request timeout in seconds (overrides VERACITY_TIMEOUT_SECS)
    #[arg(long)]
    timeout: Option<u64>,

    /// Print the report as JSON instead of formatted text
    #[arg(long)]
    json: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(endpoint) = &cli.endpoint {
        config = config.with_scoring_url(endpoint.clone());
    }
    if let Some(secs) = cli.timeout {
        config = config.with_timeout(Duration::from_secs(secs));
    }

    let data = std::fs::read(&cli.file_path)
        .with_context(|| format!("failed to read {}", cli.file_path.display()))?;
    let name = cli
        .file_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| cli.file_path.display().to_string());

    match analyze(&config, SelectedDocument { name: name.clone(), data }).await {
        Ok(report) => {
            let stdout = std::io::stdout();
            let mut w = stdout.lock();
            if cli.json {
                let json = serde_json::json!({
                    "riskScore": report.risk_score,
                    "redFlags": report.red_flags,
                    "recommendations": report.recommendations,
                });
                writeln!(w, "{}", serde_json::to_string_pretty(&json)?)?;
            } else {
                output::print_report(&mut w, &name, &report, ColorMode(!cli.no_color))?;
            }
            Ok(())
        }
        Err(error) => {
            eprintln!("error: {}", error.message);
            std::process::exit(1);
        }
    }
}

/// The pipeline, run strictly in sequence: extract, submit, normalize.
/// Each stage's failure is terminal for the attempt; nothing retries.
async fn analyze(
    config: &Config,
    document: SelectedDocument,
) -> Result<NormalizedReport, AnalysisError> {
    let extractor = TextExtractor::new(Arc::new(MupdfBackend::new()));
    let text = extractor.extract(&document)?;

    let client = ScoringClient::new(config)?;
    let raw = client.submit(&text).await?;

    Ok(veracity_core::normalize(&raw)?)
}
