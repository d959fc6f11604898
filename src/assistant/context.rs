//! Project context handed to the assistant.

use crate::error::Result;
use crate::podcast::{PodcastConfig, PodcastResult};

const SCRIPT_SUGGESTIONS: [&str; 3] = [
    "Make this line more dramatic",
    "Add a cliffhanger to the hook",
    "Suggest a viral TikTok clip",
];

const DRAFT_SUGGESTIONS: [&str; 3] = [
    "Summarize my notes",
    "Suggest a creative title",
    "Identify the core hook",
];

/// What the assistant knows about the current project.
#[derive(Debug, Clone, Default)]
pub enum ProjectContext {
    Result(PodcastResult),
    Config(PodcastConfig),
    #[default]
    Empty,
}

impl ProjectContext {
    /// Prefer the generated result, then the form configuration.
    pub fn from_parts(result: Option<&PodcastResult>, config: Option<&PodcastConfig>) -> Self {
        match (result, config) {
            (Some(result), _) => ProjectContext::Result(result.clone()),
            (None, Some(config)) => ProjectContext::Config(config.clone()),
            (None, None) => ProjectContext::Empty,
        }
    }

    pub fn has_script(&self) -> bool {
        matches!(self, ProjectContext::Result(_))
    }

    /// Compact JSON interpolated into the system instruction.
    pub fn to_json(&self) -> Result<String> {
        let json = match self {
            ProjectContext::Result(result) => serde_json::to_string(result)?,
            ProjectContext::Config(config) => serde_json::to_string(config)?,
            ProjectContext::Empty => "{}".to_string(),
        };
        Ok(json)
    }

    /// Canned prompts offered for this kind of context.
    pub fn suggestions(&self) -> &'static [&'static str] {
        if self.has_script() {
            &SCRIPT_SUGGESTIONS
        } else {
            &DRAFT_SUGGESTIONS
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn result() -> PodcastResult {
        PodcastResult {
            title: "T".to_string(),
            description: "D".to_string(),
            youtube_description: "Y".to_string(),
            script: vec![],
            viral_clips: vec![],
            voice_mapping: IndexMap::new(),
            voice_pitch_mapping: IndexMap::new(),
            grounding_links: None,
        }
    }

    #[test]
    fn test_result_takes_precedence() {
        let config = PodcastConfig::builder().source_text("notes").build().unwrap();

        let ctx = ProjectContext::from_parts(Some(&result()), Some(&config));
        assert!(ctx.has_script());
        assert_eq!(ctx.suggestions()[0], "Make this line more dramatic");
        assert!(ctx.to_json().unwrap().contains("\"youtubeDescription\":\"Y\""));

        let ctx = ProjectContext::from_parts(None, Some(&config));
        assert!(!ctx.has_script());
        assert!(ctx.to_json().unwrap().contains("\"sourceText\":\"notes\""));
    }

    #[test]
    fn test_empty_context() {
        let ctx = ProjectContext::from_parts(None, None);
        assert_eq!(ctx.to_json().unwrap(), "{}");
        assert_eq!(
            ctx.suggestions(),
            &["Summarize my notes", "Suggest a creative title", "Identify the core hook"]
        );
    }
}
