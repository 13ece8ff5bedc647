//! Reference CLI for the URL Shield analyzer.
//!
//! `url-shield analyze <url>` prints the Assessment as JSON to stdout.
//! Pass `-` to read one URL per line from stdin. Exit code 0 on success;
//! clap exits with 2 on malformed arguments.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::io::{self, BufRead, Write};
use url_shield_core::{AnalysisConfig, Assessment, Verdict};
use url_shield_engine::{enrich, PhishingAnalyzer};

#[derive(Parser)]
#[command(name = "url-shield", version, about = "Offline URL phishing analyzer")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze a URL and print the assessment as JSON
    Analyze {
        /// URL to analyze, or "-" to read URLs line by line from stdin
        url: String,

        /// JSON config overlay file (flat camelCase keys)
        #[arg(long)]
        config: Option<std::path::PathBuf>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,

        /// Append the human-readable explanation bundle
        #[arg(long)]
        explain: bool,
    },
}

fn load_config(path: Option<&std::path::Path>) -> Result<AnalysisConfig> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading config file {}", path.display()))?;
            AnalysisConfig::from_json(&json).context("parsing config overlay")
        }
        None => Ok(AnalysisConfig::default()),
    }
}

fn verdict_banner(assessment: &Assessment) -> String {
    let label = assessment.verdict.as_str();
    let colored = match assessment.verdict {
        Verdict::Safe => label.green(),
        Verdict::Suspicious => label.yellow(),
        Verdict::Malicious => label.red().bold(),
        Verdict::Unknown => label.dimmed(),
    };
    format!("{} ({}/100)", colored, assessment.score)
}

fn emit(assessment: &Assessment, pretty: bool, explain: bool) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if pretty {
        eprintln!("{}", verdict_banner(assessment));
        serde_json::to_writer_pretty(&mut out, assessment)?;
    } else {
        serde_json::to_writer(&mut out, assessment)?;
    }
    writeln!(out)?;

    if explain {
        let bundle = enrich(assessment);
        if pretty {
            serde_json::to_writer_pretty(&mut out, &bundle)?;
        } else {
            serde_json::to_writer(&mut out, &bundle)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Analyze {
            url,
            config,
            pretty,
            explain,
        } => {
            let config = load_config(config.as_deref())?;
            let analyzer =
                PhishingAnalyzer::with_config(config).context("invalid configuration")?;

            if url == "-" {
                let stdin = io::stdin();
                for line in stdin.lock().lines() {
                    let line = line.context("reading stdin")?;
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    emit(&analyzer.analyze(line), pretty, explain)?;
                }
            } else {
                emit(&analyzer.analyze(&url), pretty, explain)?;
            }
        }
    }
    Ok(())
}
