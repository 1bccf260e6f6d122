use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use tokio::io::AsyncReadExt;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use launder::buffer::{Buffer, Buffers, NoticeKind};
use launder::config::{CliArgs, Config};
use launder::session::{run_session, SessionPlan};
use launder::TextStats;

#[tokio::main]
async fn main() -> Result<()> {
    // WHY: .env may carry API_KEY and the AI command; a missing file is not an error
    let _ = dotenvy::dotenv();

    // WHY: stdout carries the laundered text, so structured logs go to stderr
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .json()
        .init();

    let args = CliArgs::parse();
    info!(action = ?args.action, input = ?args.input, "Parsed CLI arguments");
    let config = Config::from_args(args)?;

    let input = read_input(&config).await?;
    info!(bytes = input.len(), "Input buffer loaded");

    let mut buffers = Buffers::with_input(input);
    let plan = SessionPlan {
        action: config.action,
        find_replace: config.find_replace.clone(),
    };
    let assistant = config.ai_assistant();
    let report = run_session(&mut buffers, &plan, &assistant).await;

    for notice in buffers.take_notices() {
        let tag = match notice.kind {
            NoticeKind::Success => "ok",
            NoticeKind::Error => "error",
            NoticeKind::Info => "info",
        };
        eprintln!("[{tag}] {}", notice.message);
    }

    if config.stats {
        print_stats("input", &report.input);
        if config.action.is_some() {
            print_stats("output", &report.output);
        }
    }

    if let Some(path) = &config.stats_out {
        let json = serde_json::to_string_pretty(&report)?;
        tokio::fs::write(path, json)
            .await
            .with_context(|| format!("Failed to write stats to {}", path.display()))?;
        info!("Stats written to {}", path.display());
    }

    if report.has_errors() {
        warn!("Run finished with errors, result not written");
        anyhow::bail!("Run finished with errors; result not written");
    }

    // Stats-only runs have nothing to emit
    if config.action.is_none() && config.find_replace.is_none() {
        return Ok(());
    }

    let result = match config.result_buffer() {
        Buffer::Input => buffers.input(),
        Buffer::Output => buffers.output(),
    };
    match &config.output {
        Some(path) => {
            tokio::fs::write(path, result)
                .await
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            info!("Output written to {}", path.display());
        }
        None => {
            // WHY: the result is emitted byte-for-byte, no trailing newline added
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(result.as_bytes()).context("Failed to write output to stdout")?;
            stdout.flush().context("Failed to flush stdout")?;
        }
    }

    Ok(())
}

async fn read_input(config: &Config) -> Result<String> {
    match &config.input {
        Some(path) => {
            // WHY: validate early to fail fast with a clear error
            if !path.is_file() {
                anyhow::bail!("Input file does not exist: {}", path.display());
            }
            tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read input from {}", path.display()))
        }
        None => {
            let mut input = String::new();
            tokio::io::stdin()
                .read_to_string(&mut input)
                .await
                .context("Failed to read input from stdin")?;
            Ok(input)
        }
    }
}

fn print_stats(label: &str, stats: &TextStats) {
    eprintln!(
        "{label}: WORDS: {}  CHARS: {}  PARAGRAPHS: {}",
        stats.words, stats.chars, stats.paragraphs
    );
}
