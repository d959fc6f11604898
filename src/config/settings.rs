//! Configuration settings for Voxdeck.

use crate::podcast::{Modality, Tone, VoiceId};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub gemini: GeminiSettings,
    pub audio: AudioSettings,
    pub dashboard: DashboardSettings,
    pub podcast: PodcastDefaults,
    pub prompts: PromptSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Directory for storing application data (tiles, renders).
    pub data_dir: String,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            data_dir: "~/.voxdeck".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Gemini API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiSettings {
    /// Environment variable holding the API key.
    pub api_key_env: String,
    /// Base URL of the generative language API.
    pub base_url: String,
    /// Model used for script generation.
    pub script_model: String,
    /// Model used by the assistant.
    pub chat_model: String,
    /// Model used for speech synthesis.
    pub tts_model: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Sampling temperature for assistant replies.
    pub chat_temperature: f32,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            api_key_env: "GEMINI_API_KEY".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            script_model: "gemini-3-pro-preview".to_string(),
            chat_model: "gemini-3-flash-preview".to_string(),
            tts_model: "gemini-2.5-flash-preview-tts".to_string(),
            timeout_secs: 300,
            chat_temperature: 0.8,
        }
    }
}

impl GeminiSettings {
    /// Read the API key from the configured environment variable.
    ///
    /// Falls back to `API_KEY` when the configured variable is unset.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .or_else(|| std::env::var("API_KEY").ok())
            .filter(|k| !k.trim().is_empty())
    }
}

/// Audio rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Sample rate of the PCM returned by the speech model.
    pub sample_rate: u32,
    /// Number of script lines voiced by a preview.
    pub preview_lines: usize,
}

/// Sample rates accepted in the `[audio]` section.
pub const SAMPLE_RATE_RANGE: std::ops::RangeInclusive<u32> = 8_000..=192_000;

impl AudioSettings {
    /// Reject values that would produce an unplayable or malformed WAV.
    pub fn validate(&self) -> crate::error::Result<()> {
        if !SAMPLE_RATE_RANGE.contains(&self.sample_rate) {
            return Err(crate::error::VoxError::Config(format!(
                "audio.sample_rate must be between {} and {} Hz, got {}",
                SAMPLE_RATE_RANGE.start(),
                SAMPLE_RATE_RANGE.end(),
                self.sample_rate
            )));
        }
        if self.preview_lines == 0 {
            return Err(crate::error::VoxError::Config(
                "audio.preview_lines must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            sample_rate: crate::audio::DEFAULT_SAMPLE_RATE,
            preview_lines: 5,
        }
    }
}

/// Launcher dashboard settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    /// Storage key holding the serialized tile collection.
    pub storage_key: String,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            storage_key: crate::dashboard::STORAGE_KEY.to_string(),
        }
    }
}

/// Defaults used to pre-fill the generation form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PodcastDefaults {
    pub host1_name: String,
    pub host2_name: String,
    pub host1_voice: VoiceId,
    pub host2_voice: VoiceId,
    pub duration_minutes: u32,
    pub modality: Modality,
    pub tone: Tone,
}

impl Default for PodcastDefaults {
    fn default() -> Self {
        Self {
            host1_name: "Alex".to_string(),
            host2_name: "Jordan".to_string(),
            host1_voice: VoiceId::Kore,
            host2_voice: VoiceId::Puck,
            duration_minutes: 15,
            modality: Modality::FriendlyConversation,
            tone: Tone::HighEnergy,
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
    /// Custom variables available in all prompts as {{variable_name}}.
    pub variables: std::collections::HashMap<String, String>,
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            settings.audio.validate()?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to the default configuration file.
    pub fn save(&self) -> crate::error::Result<()> {
        self.save_to(&Self::default_config_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::VoxError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("voxdeck")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded data directory path.
    pub fn data_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.data_dir)
    }
}
