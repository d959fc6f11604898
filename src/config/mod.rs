//! Configuration module for Voxdeck.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{AssistantPrompts, Prompts, ScriptPrompts, SpeechPrompts};
pub use settings::{
    AudioSettings, DashboardSettings, GeminiSettings, GeneralSettings, PodcastDefaults,
    PromptSettings, Settings,
};
