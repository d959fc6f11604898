//! Script generation against the text model.

use super::models::{
    GroundingLink, HostCount, PodcastConfig, PodcastResult, ScriptLine, VoiceId,
};
use super::request::build_script_request;
use crate::config::Prompts;
use crate::error::{Result, VoxError};
use crate::llm::{ContentGenerator, GenerateContentResponse};
use indexmap::IndexMap;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Message carried by [`VoxError::GenerationFormat`].
pub const INVALID_FORMAT_MESSAGE: &str = "Generated script was not in valid format.";

/// Shape the model is asked to return.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedScript {
    title: String,
    description: String,
    youtube_description: String,
    script: Vec<ScriptLine>,
    viral_clips: Vec<String>,
}

/// Produces a [`PodcastResult`] from a [`PodcastConfig`].
pub struct PodcastGenerator {
    generator: Arc<dyn ContentGenerator>,
    model: String,
    prompts: Prompts,
}

impl PodcastGenerator {
    pub fn new(generator: Arc<dyn ContentGenerator>, model: &str) -> Self {
        Self {
            generator,
            model: model.to_string(),
            prompts: Prompts::default(),
        }
    }

    /// Set custom prompts (with user-defined variables).
    pub fn with_prompts(mut self, prompts: Prompts) -> Self {
        self.prompts = prompts;
        self
    }

    /// Generate a script. No retry is attempted on any failure.
    #[instrument(skip(self, config), fields(hosts = %config.host_count, minutes = config.duration_minutes))]
    pub async fn generate(&self, config: &PodcastConfig) -> Result<PodcastResult> {
        let request = build_script_request(&self.prompts, config);
        info!(
            "Requesting script from {} (search grounding: {})",
            self.model,
            config.has_urls()
        );

        let response = self.generator.generate_content(&self.model, &request).await?;
        let result = assemble_result(config, &response)?;

        info!(
            "Generated \"{}\" with {} lines and {} citations",
            result.title,
            result.script.len(),
            result.grounding_links.as_ref().map_or(0, Vec::len)
        );
        Ok(result)
    }
}

/// Turn a raw response into a result, or fail without producing one.
pub fn assemble_result(
    config: &PodcastConfig,
    response: &GenerateContentResponse,
) -> Result<PodcastResult> {
    let text = response.text().unwrap_or_else(|| "{}".to_string());
    let generated: GeneratedScript = serde_json::from_str(&text).map_err(|e| {
        warn!("Failed to parse script JSON: {}", e);
        VoxError::GenerationFormat(INVALID_FORMAT_MESSAGE.to_string())
    })?;

    let mut voice_mapping = IndexMap::new();
    let mut voice_pitch_mapping = IndexMap::new();

    let host1 = &config.host_names.host1;
    voice_mapping.insert(host1.clone(), config.voices.host1);
    voice_pitch_mapping.insert(host1.clone(), config.voice_pitch.host1);

    if config.host_count == HostCount::Two {
        if let Some(host2) = &config.host_names.host2 {
            voice_mapping.insert(host2.clone(), config.voices.host2.unwrap_or(VoiceId::Puck));
            voice_pitch_mapping.insert(host2.clone(), config.voice_pitch.host2);
        }
    }

    Ok(PodcastResult {
        title: generated.title,
        description: generated.description,
        youtube_description: generated.youtube_description,
        script: generated.script,
        viral_clips: generated.viral_clips,
        voice_mapping,
        voice_pitch_mapping,
        grounding_links: Some(extract_grounding_links(response)),
    })
}

/// Collect web citations from the response's grounding metadata.
pub fn extract_grounding_links(response: &GenerateContentResponse) -> Vec<GroundingLink> {
    response
        .grounding_chunks()
        .iter()
        .filter_map(|chunk| chunk.web.as_ref())
        .filter_map(|web| {
            let uri = web.uri.as_ref().filter(|u| !u.is_empty())?;
            let title = web
                .title
                .clone()
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| uri.clone());
            Some(GroundingLink {
                uri: uri.clone(),
                title,
            })
        })
        .collect()
}
