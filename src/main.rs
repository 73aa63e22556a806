//! Tekst CLI entry point.

use anyhow::Result;
use clap::Parser;
use tekst::cli::{commands, Cli, Commands};
use tekst::config::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

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
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("tekst={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Load configuration
    let settings = match &cli.config {
        Some(path) => Settings::load_from(Some(&std::path::PathBuf::from(path)))?,
        None => Settings::load()?,
    };

    // Ensure artifact directories exist
    std::fs::create_dir_all(settings.uploads_dir())?;
    std::fs::create_dir_all(settings.audio_dir())?;
    std::fs::create_dir_all(settings.captions_dir())?;

    // Execute command
    match &cli.command {
        Commands::Caption {
            video,
            style,
            burn,
            merge_gap,
            no_split,
        } => {
            commands::run_caption(video, style.clone(), *burn, *merge_gap, *no_split, settings)
                .await?;
        }

        Commands::Burn {
            video,
            phrases,
            style,
        } => {
            commands::run_burn(video, phrases, style, settings).await?;
        }

        Commands::Convert { input } => {
            commands::run_convert(input, settings).await?;
        }

        Commands::Serve { host, port } => {
            commands::run_serve(host.clone(), *port, settings).await?;
        }

        Commands::Doctor => {
            commands::run_doctor(&settings)?;
        }

        Commands::Config { action } => {
            commands::run_config(action, settings)?;
        }
    }

    Ok(())
}
