//! Service wiring for Voxdeck.
//!
//! Builds the generator, synthesizer, assistant and stores from [`Settings`]
//! so commands only deal with domain objects.

use crate::assistant::{Assistant, AssistantSession, ProjectContext};
use crate::config::{Prompts, Settings};
use crate::dashboard::{FileKeyValueStore, TileStore};
use crate::error::Result;
use crate::llm::{ContentGenerator, GeminiClient};
use crate::podcast::{PodcastConfigBuilder, PodcastGenerator, PodcastResult};
use crate::speech::SpeechSynthesizer;
use crate::studio::Studio;
use std::sync::Arc;
use tracing::{debug, info};

/// Owns settings, prompts and the model backend shared by all services.
pub struct Orchestrator {
    settings: Settings,
    prompts: Prompts,
    generator: Arc<dyn ContentGenerator>,
}

impl Orchestrator {
    /// Connect to Gemini using the configured API key.
    pub fn new(settings: Settings) -> Result<Self> {
        let client = GeminiClient::from_settings(&settings.gemini)?;
        info!("Using Gemini at {}", settings.gemini.base_url);
        Self::with_generator(settings, Arc::new(client))
    }

    /// Use an arbitrary backend.
    pub fn with_generator(settings: Settings, generator: Arc<dyn ContentGenerator>) -> Result<Self> {
        // Load prompts (with optional custom directory and variables)
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        Ok(Self {
            settings,
            prompts,
            generator,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn prompts(&self) -> &Prompts {
        &self.prompts
    }

    pub fn podcast_generator(&self) -> PodcastGenerator {
        PodcastGenerator::new(Arc::clone(&self.generator), &self.settings.gemini.script_model)
            .with_prompts(self.prompts.clone())
    }

    pub fn synthesizer(&self) -> SpeechSynthesizer {
        SpeechSynthesizer::new(Arc::clone(&self.generator), &self.settings.gemini.tts_model)
            .with_prompts(self.prompts.clone())
    }

    pub fn assistant(&self) -> Assistant {
        Assistant::new(Arc::clone(&self.generator), &self.settings.gemini.chat_model)
            .with_temperature(self.settings.gemini.chat_temperature)
            .with_prompts(self.prompts.clone())
    }

    pub fn assistant_session(&self, context: ProjectContext) -> AssistantSession {
        AssistantSession::new(self.assistant(), context)
    }

    /// A studio session over `result` using the configured audio settings.
    pub fn studio(&self, result: PodcastResult) -> Studio {
        Studio::new(result, Arc::new(self.synthesizer()))
            .with_sample_rate(self.settings.audio.sample_rate)
            .with_preview_lines(self.settings.audio.preview_lines)
    }

    /// A config builder pre-filled with the configured form defaults.
    pub fn podcast_form(&self) -> PodcastConfigBuilder {
        podcast_form(&self.settings)
    }
}

/// A config builder pre-filled with the configured form defaults.
pub fn podcast_form(settings: &Settings) -> PodcastConfigBuilder {
    let defaults = &settings.podcast;
    PodcastConfigBuilder::default()
        .duration_minutes(defaults.duration_minutes)
        .modality(defaults.modality)
        .tone(defaults.tone)
        .host1(&defaults.host1_name, defaults.host1_voice, 0.0)
        .host2(&defaults.host2_name, defaults.host2_voice, 0.0)
}

/// Open the tile collection. Needs no API key.
pub fn open_tile_store(settings: &Settings) -> TileStore {
    let dir = settings.data_dir();
    debug!("Opening tile storage in {}", dir.display());
    TileStore::open(
        Arc::new(FileKeyValueStore::new(dir)),
        &settings.dashboard.storage_key,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::fake::ScriptedGenerator;
    use crate::podcast::{Modality, VoiceId};

    fn settings_in(dir: &std::path::Path) -> Settings {
        let mut settings = Settings::default();
        settings.general.data_dir = dir.to_string_lossy().to_string();
        settings.gemini.script_model = "script-x".to_string();
        settings.podcast.host1_name = "Sam".to_string();
        settings.podcast.modality = Modality::Debate;
        settings
    }

    #[tokio::test]
    async fn test_services_use_configured_models() {
        let dir = tempfile::tempdir().unwrap();
        let fake = Arc::new(ScriptedGenerator::new());
        fake.push_text("{}");
        let orchestrator = Orchestrator::with_generator(settings_in(dir.path()), fake.clone()).unwrap();

        let config = orchestrator.podcast_form().source_text("notes").build().unwrap();
        assert_eq!(config.host_names.host1, "Sam");
        assert_eq!(config.modality, Modality::Debate);
        assert_eq!(config.voices.host1, VoiceId::Kore);

        let _ = orchestrator.podcast_generator().generate(&config).await;
        assert_eq!(fake.last_request().0, "script-x");
    }

    #[test]
    fn test_tile_store_persists_in_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_in(dir.path());

        let mut store = open_tile_store(&settings);
        assert_eq!(store.len(), 8);
        store.remove("media").unwrap();

        assert!(dir.path().join("dashboard_tiles.json").exists());
        assert_eq!(open_tile_store(&settings).len(), 7);
    }
}
