use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use omniport::app::AppContext;
use omniport::cli::{commands, Cli};
use omniport::config::Config;
use omniport::domain::RunSummary;

const EXIT_NO_INPUT: u8 = 3;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    if cli.input_files().is_empty() {
        println!("Please provide input files with --input");
        return ExitCode::from(EXIT_NO_INPUT);
    }

    match run(&cli).await {
        Ok(summary) => {
            println!();
            println!("{}", summary);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> anyhow::Result<RunSummary> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "using default configuration");
            Config::default()
        }),
    };
    cli.apply_to(&mut config);

    let mut ctx = AppContext::new(config, !cli.preview)?;
    let summary = commands::migrate(&mut ctx, cli).await?;
    Ok(summary)
}
