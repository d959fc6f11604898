//! Audio command - one-shot preview and full renders to WAV.

use super::{connect, read_result};
use crate::cli::{AudioAction, Output};
use crate::config::Settings;
use crate::studio::format_time;
use anyhow::Result;
use std::path::Path;

/// Run an audio subcommand.
pub async fn run_audio(action: &AudioAction, settings: Settings) -> Result<()> {
    let (file, output, full) = match action {
        AudioAction::Preview { file, output } => (file, output, false),
        AudioAction::Render { file, output } => (file, output, true),
    };

    let result = read_result(Path::new(file))?;
    let orchestrator = connect(settings)?;
    let mut studio = orchestrator.studio(result);

    let (label, outcome) = if full {
        let spinner = Output::spinner("Mastering audio...");
        let outcome = studio.render().await;
        spinner.finish_and_clear();
        ("Full episode", outcome)
    } else {
        let spinner = Output::spinner("Synthesizing preview...");
        let outcome = studio.preview().await;
        spinner.finish_and_clear();
        ("Preview", outcome)
    };

    if let Err(e) = outcome {
        Output::error(&e.to_string());
        return Err(e.into());
    }

    let handle = if full {
        studio.full_audio()
    } else {
        studio.preview_audio()
    };
    let Some(handle) = handle else {
        anyhow::bail!("No audio was produced");
    };

    handle.save_to(Path::new(output))?;
    Output::success(&format!(
        "{} ({}) saved to {}",
        label,
        format_time(handle.duration_seconds()),
        output
    ));
    Ok(())
}
