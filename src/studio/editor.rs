//! Line-level editing of a generated script.

use crate::error::{Result, VoxError};
use crate::podcast::{PodcastResult, ScriptLine};
use regex::Regex;
use std::sync::OnceLock;

/// Holds a working copy of a result whose script can be edited.
#[derive(Debug, Clone)]
pub struct ScriptEditor {
    result: PodcastResult,
}

impl ScriptEditor {
    pub fn new(result: PodcastResult) -> Self {
        Self { result }
    }

    pub fn result(&self) -> &PodcastResult {
        &self.result
    }

    pub fn script(&self) -> &[ScriptLine] {
        &self.result.script
    }

    pub fn len(&self) -> usize {
        self.result.script.len()
    }

    pub fn is_empty(&self) -> bool {
        self.result.script.is_empty()
    }

    /// Reassign a line to another speaker. Only speakers with a voice are accepted.
    pub fn update_speaker(&mut self, index: usize, speaker: &str) -> Result<()> {
        if !self.result.voice_mapping.contains_key(speaker) {
            return Err(VoxError::InvalidInput(format!(
                "Unknown speaker '{}'. Available: {}",
                speaker,
                self.result.speakers().join(", ")
            )));
        }
        self.line_mut(index)?.speaker = speaker.to_string();
        Ok(())
    }

    pub fn update_text(&mut self, index: usize, text: &str) -> Result<()> {
        self.line_mut(index)?.text = text.to_string();
        Ok(())
    }

    pub fn remove_line(&mut self, index: usize) -> Result<ScriptLine> {
        self.check_index(index)?;
        Ok(self.result.script.remove(index))
    }

    /// Append an empty line for the first host. Returns its index.
    pub fn append_line(&mut self) -> Result<usize> {
        let speaker = self
            .result
            .voice_mapping
            .keys()
            .next()
            .cloned()
            .ok_or_else(|| VoxError::InvalidInput("No speakers to assign the line to".to_string()))?;

        self.result.script.push(ScriptLine {
            speaker,
            text: String::new(),
            timestamp: Some(String::new()),
        });
        Ok(self.result.script.len() - 1)
    }

    /// The result with the edited script.
    pub fn snapshot(&self) -> PodcastResult {
        self.result.clone()
    }

    pub fn export_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.result)?)
    }

    /// File name offered for the exported script.
    pub fn export_file_name(&self) -> String {
        static WHITESPACE: OnceLock<Regex> = OnceLock::new();
        let re = WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("Invalid regex"));
        format!("{}_script.json", re.replace_all(&self.result.title, "_"))
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.result.script.len() {
            return Err(VoxError::InvalidInput(format!(
                "Line {} does not exist (script has {} lines)",
                index,
                self.result.script.len()
            )));
        }
        Ok(())
    }

    fn line_mut(&mut self, index: usize) -> Result<&mut ScriptLine> {
        self.check_index(index)?;
        Ok(&mut self.result.script[index])
    }
}
