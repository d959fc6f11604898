//! CLI command implementations.

mod assist;
mod audio;
mod config;
mod doctor;
mod generate;
mod init;
mod script;
mod studio;
mod tiles;
mod voices;

pub use assist::run_assist;
pub use audio::run_audio;
pub use config::run_config;
pub use doctor::run_doctor;
pub use generate::run_generate;
pub use init::run_init;
pub use script::run_script;
pub use studio::run_studio;
pub use tiles::run_tiles;
pub use voices::run_voices;

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use crate::podcast::PodcastResult;
use anyhow::Context;
use std::io::{self, Write};
use std::path::Path;

/// Build an orchestrator after checking the API key.
fn connect(settings: Settings) -> anyhow::Result<Orchestrator> {
    if let Err(e) = preflight::check(Operation::Gemini, &settings.gemini) {
        Output::error(&format!("{}", e));
        Output::info("Run 'voxdeck doctor' for detailed diagnostics.");
        return Err(e.into());
    }
    Ok(Orchestrator::new(settings)?)
}

/// Read a result JSON file.
fn read_result(path: &Path) -> anyhow::Result<PodcastResult> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    PodcastResult::from_json(&raw)
        .with_context(|| format!("{} is not a podcast result", path.display()))
}

/// Write a result as pretty JSON.
fn write_result(path: &Path, result: &PodcastResult) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Prompt user for yes/no confirmation.
fn prompt_continue(message: &str) -> io::Result<bool> {
    print!("{} {} ", console::style("?").cyan(), message);
    print!("{} ", console::style("[y/N]").dim());
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    let answer = input.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

/// Convert a 1-based line number from the user.
fn line_index(line: usize) -> anyhow::Result<usize> {
    line.checked_sub(1)
        .ok_or_else(|| anyhow::anyhow!("Line numbers start at 1"))
}
