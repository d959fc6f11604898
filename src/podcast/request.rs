//! Script generation prompt and response schema.

use super::models::PodcastConfig;
use crate::config::Prompts;
use crate::llm::{GenerateContentRequest, GenerationConfig, Tool};
use serde_json::{json, Value};
use std::collections::HashMap;

/// Render the script prompt for `config`.
pub fn build_script_prompt(prompts: &Prompts, config: &PodcastConfig) -> String {
    let mut vars = HashMap::new();

    let source_text = if config.source_text.trim().is_empty() {
        String::new()
    } else {
        format!("Source Text: {}", config.source_text)
    };
    let source_urls = if config.has_urls() {
        format!(
            "CRITICAL: You MUST research and use the content from these specific URLs for the podcast topic and title: {}. Do NOT deviate from the specific subject matter of these links.",
            config.source_urls.join(", ")
        )
    } else {
        String::new()
    };
    let host2 = config
        .host_names
        .host2
        .as_ref()
        .map(|name| format!("Use exactly \"{}\" for the second host.", name))
        .unwrap_or_default();

    vars.insert("source_text".to_string(), source_text);
    vars.insert("source_urls".to_string(), source_urls);
    vars.insert("host_count".to_string(), config.host_count.to_string());
    vars.insert("duration_minutes".to_string(), config.duration_minutes.to_string());
    vars.insert("modality".to_string(), config.modality.label().to_string());
    vars.insert("tone".to_string(), config.tone.label().to_string());
    vars.insert("host1".to_string(), config.host_names.host1.clone());
    vars.insert("host2".to_string(), host2);

    prompts.render_with_custom(&prompts.script.user, &vars)
}

/// JSON schema the script response must satisfy.
pub fn script_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING" },
            "description": { "type": "STRING" },
            "youtubeDescription": { "type": "STRING" },
            "script": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "speaker": { "type": "STRING" },
                        "text": { "type": "STRING" },
                        "timestamp": { "type": "STRING" }
                    },
                    "required": ["speaker", "text"]
                }
            },
            "viralClips": {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            }
        },
        "required": ["title", "description", "script", "viralClips", "youtubeDescription"]
    })
}

/// Build the full `generateContent` request for a script.
///
/// Search grounding is enabled only when the config carries source URLs.
pub fn build_script_request(prompts: &Prompts, config: &PodcastConfig) -> GenerateContentRequest {
    let mut request = GenerateContentRequest::from_text(build_script_prompt(prompts, config))
        .with_generation_config(GenerationConfig {
            response_mime_type: Some("application/json".to_string()),
            response_schema: Some(script_schema()),
            ..Default::default()
        });

    if config.has_urls() {
        request = request.with_tool(Tool::google_search());
    }
    request
}
