//! Pre-flight checks before expensive operations.
//!
//! Validates that required configuration is available before starting
//! operations that would otherwise fail midway.

use crate::config::GeminiSettings;
use crate::error::{Result, VoxError};

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Script generation, speech and chat call Gemini.
    Gemini,
    /// Tiles and local script edits need nothing external.
    Local,
}

/// Run pre-flight checks for the given operation.
///
/// Returns Ok(()) if all checks pass, or an error describing what's missing.
pub fn check(operation: Operation, gemini: &GeminiSettings) -> Result<()> {
    match operation {
        Operation::Gemini => check_api_key(gemini)?,
        Operation::Local => {}
    }
    Ok(())
}

/// Check if a Gemini API key is configured.
fn check_api_key(gemini: &GeminiSettings) -> Result<()> {
    if gemini.api_key().is_some() {
        return Ok(());
    }
    Err(VoxError::Config(format!(
        "{} not set. Set it with: export {}='...'",
        gemini.api_key_env, gemini.api_key_env
    )))
}
