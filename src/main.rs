use std::{io::Write, net::SocketAddr, path::PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tokio::runtime::Builder;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use rmb_daxie::{Outcome, config::ServiceConfig, constants::OutputFormat, convert, server::serve};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the capital form of each amount
    Convert {
        /// Amounts such as 1024.50 or ¥1,024.50
        #[arg(required = true)]
        amounts: Vec<String>,

        /// Output format: text or json
        #[arg(long, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Run the HTTP conversion service
    Serve {
        /// Path to a JSON service config
        #[arg(long)]
        config: Option<PathBuf>,

        /// Address to bind the HTTP server to (overrides the config file)
        #[arg(long)]
        listen: Option<String>,

        /// Number of conversions kept in history (overrides the config file)
        #[arg(long = "history-capacity")]
        history_capacity: Option<usize>,
    },
}

#[derive(Serialize)]
struct ConvertLine<'a> {
    amount: &'a str,
    outcome: Outcome,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match args.command {
        Command::Convert { amounts, format } => run_convert(&amounts, format),
        Command::Serve {
            config,
            listen,
            history_capacity,
        } => run_serve(config, listen, history_capacity),
    }
}

fn run_convert(amounts: &[String], format: OutputFormat) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let failures = write_conversions(&mut stdout.lock(), amounts, format)?;
    anyhow::ensure!(failures == 0, "{failures} amount(s) could not be converted");
    Ok(())
}

/// Writes one line per amount and returns how many could not be converted.
fn write_conversions(
    out: &mut impl Write,
    amounts: &[String],
    format: OutputFormat,
) -> anyhow::Result<usize> {
    let mut failures = 0usize;
    for amount in amounts {
        let result = convert(amount);
        if let Err(err) = &result {
            warn!("cannot convert {amount:?}: {err}");
            failures += 1;
        }
        match format {
            OutputFormat::Text => {
                let written = match result {
                    Ok(text) => writeln!(out, "{amount}\t{text}"),
                    Err(err) => writeln!(out, "{amount}\terror: {err}"),
                };
                written.context("failed to write result")?;
            }
            OutputFormat::Json => {
                let line = ConvertLine {
                    amount,
                    outcome: Outcome::from(result),
                };
                serde_json::to_writer(&mut *out, &line).context("failed to encode result")?;
                writeln!(out).context("failed to write result")?;
            }
        }
    }
    Ok(failures)
}

fn run_serve(
    config: Option<PathBuf>,
    listen: Option<String>,
    history_capacity: Option<usize>,
) -> anyhow::Result<()> {
    let mut service = match config {
        Some(path) => ServiceConfig::load_from_file(&path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ServiceConfig::default(),
    };
    if let Some(listen) = listen {
        service.listen = listen;
    }
    if let Some(capacity) = history_capacity {
        service.history_capacity = capacity;
    }
    service.validate().context("invalid service config")?;

    let listen: SocketAddr = service.listen.parse().context("invalid listen address")?;
    info!(history_capacity = service.history_capacity, "starting service");

    let runtime = Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build tokio runtime")?;

    runtime
        .block_on(async { serve(listen, service.history_capacity).await })
        .context("server terminated unexpectedly")
}
