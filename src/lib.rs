//! Voxdeck - Tile Launcher and AI Podcast Studio
//!
//! A CLI that keeps a small dashboard of launcher tiles and turns source
//! material into a multi-host podcast script, then voices it with a
//! text-to-speech model and exports the episode as WAV.
//!
//! # Architecture
//!
//! - `config` - Settings and prompt templates
//! - `dashboard` - Tile records and their persistence
//! - `llm` - Generative model client (Gemini REST)
//! - `podcast` - Episode configuration, voices and script generation
//! - `speech` - Speech synthesis requests and pitch guidance
//! - `audio` - PCM decoding and WAV encoding
//! - `studio` - Script editing, preview/render lifecycle and playback
//! - `assistant` - The executive producer chat
//! - `orchestrator` - Wires the pieces together from settings
//!
//! # Example
//!
//! ```rust,no_run
//! use voxdeck::config::Settings;
//! use voxdeck::orchestrator::Orchestrator;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let orchestrator = Orchestrator::new(settings)?;
//!
//!     let config = orchestrator
//!         .podcast_form()
//!         .source_text("Notes on the history of tide clocks")
//!         .build()?;
//!     let result = orchestrator.podcast_generator().generate(&config).await?;
//!
//!     let mut studio = orchestrator.studio(result);
//!     studio.render().await?;
//!     if let Some(audio) = studio.full_audio() {
//!         audio.save_to(std::path::Path::new("episode.wav"))?;
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod assistant;
pub mod audio;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod llm;
pub mod orchestrator;
pub mod podcast;
pub mod speech;
pub mod studio;

pub use error::{Result, VoxError};
