//! Voxdeck CLI entry point.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use voxdeck::cli::{commands, Cli, Commands};
use voxdeck::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("voxdeck={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Load configuration
    let settings = match &cli.config {
        Some(path) => Settings::load_from(Some(&std::path::PathBuf::from(path)))?,
        None => Settings::load()?,
    };

    std::fs::create_dir_all(settings.data_dir())?;

    match &cli.command {
        Commands::Init => {
            commands::run_init(&settings)?;
        }

        Commands::Doctor => {
            commands::run_doctor(&settings)?;
        }

        Commands::Config { action } => {
            commands::run_config(action, settings)?;
        }

        Commands::Tiles { action } => {
            commands::run_tiles(action, &settings)?;
        }

        Commands::Voices { action } => {
            commands::run_voices(action, settings).await?;
        }

        Commands::Generate(args) => {
            commands::run_generate(args, settings).await?;
        }

        Commands::Script { file, action } => {
            commands::run_script(file, action)?;
        }

        Commands::Audio { action } => {
            commands::run_audio(action, settings).await?;
        }

        Commands::Assist { result, message } => {
            commands::run_assist(result.as_deref(), message.as_deref(), settings).await?;
        }

        Commands::Studio { file } => {
            commands::run_studio(file, settings).await?;
        }
    }

    Ok(())
}
