//! Prompt templates for Voxdeck.
//!
//! Prompts can be customized by placing TOML files in the custom prompts directory.

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::OnceLock;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub script: ScriptPrompts,
    pub assistant: AssistantPrompts,
    pub speech: SpeechPrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: std::collections::HashMap<String, String>,
}

/// Prompt for podcast script generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptPrompts {
    pub user: String,
}

impl Default for ScriptPrompts {
    fn default() -> Self {
        Self {
            user: r#"Task: Create a world-class podcast script.

PRIMARY SOURCES (STRICTLY FOLLOW THESE):
{{source_text}}
{{source_urls}}

CONFIG:
- Number of Hosts: {{host_count}}
- Targeted Duration: {{duration_minutes}} minutes
- Style: {{modality}}
- Tone: {{tone}}

MANDATORY STRUCTURE:
1. Hook (10-20s): Stop the scroll based on the primary source's most shocking or interesting point.
2. Context Setup: Why this source material matters.
3. Core Discussion: Natural flow, human-like, stories, analogies derived from the source material.
4. Viral Moments: 2-4 quotable segments.
5. Closing: Strong takeaway + open question.

GIVE HOST NAMES:
Use exactly "{{host1}}" for the first host.
{{host2}}

Format your output as a valid JSON object matching the requested schema."#
                .to_string(),
        }
    }
}

/// Prompts for the producer assistant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantPrompts {
    pub system: String,
    pub greeting: String,
}

impl Default for AssistantPrompts {
    fn default() -> Self {
        Self {
            system: r#"You are the VoxViral Executive Producer, a world-class AI podcast consultant.
Your goal is to help the user create high-retention, viral-ready podcasts.

CONTEXT OF CURRENT PROJECT:
{{context}}

BEHAVIOR:
- Be punchy, professional, and creative.
- If the user asks to rewrite something, provide 2-3 creative options.
- Suggest viral "hooks" and emotional beats.
- Keep responses concise and formatted with markdown."#
                .to_string(),
            greeting: "Hi! I'm your **Executive Producer**. I've analyzed your project and I'm ready to help you optimize this for maximum virality. What's on your mind?".to_string(),
        }
    }
}

/// Prompts wrapped around text sent to the speech model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechPrompts {
    /// Used when two or more speakers are bound to voices.
    pub conversation: String,
    /// Used for a single host.
    pub solo: String,
    /// Used to audition a voice.
    pub voice_preview: String,
}

impl Default for SpeechPrompts {
    fn default() -> Self {
        Self {
            conversation: "TTS the following conversation. {{instructions}}\n\n{{text}}".to_string(),
            solo: "{{instruction}} Say this as a solo podcast host: {{text}}".to_string(),
            voice_preview: "Hi there! I'm {{label}}, your {{persona}} voice. I'm excited to help you host your next viral podcast episode. How do I sound?".to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts from the default location, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&std::collections::HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let script_path = custom_path.join("script.toml");
            if script_path.exists() {
                let content = std::fs::read_to_string(&script_path)?;
                prompts.script = toml::from_str(&content)?;
            }

            let assistant_path = custom_path.join("assistant.toml");
            if assistant_path.exists() {
                let content = std::fs::read_to_string(&assistant_path)?;
                prompts.assistant = toml::from_str(&content)?;
            }

            let speech_path = custom_path.join("speech.toml");
            if speech_path.exists() {
                let content = std::fs::read_to_string(&speech_path)?;
                prompts.speech = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    ///
    /// Placeholders are filled in one left-to-right pass, so substituted
    /// values are never scanned again. Unknown placeholders are kept as is.
    pub fn render(template: &str, vars: &std::collections::HashMap<String, String>) -> String {
        static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
        let re = PLACEHOLDER.get_or_init(|| Regex::new(r"\{\{(\w+)\}\}").expect("Invalid regex"));

        re.replace_all(template, |caps: &Captures| match vars.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
    }

    /// Render a prompt template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(
        &self,
        template: &str,
        vars: &std::collections::HashMap<String, String>,
    ) -> String {
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }
}
