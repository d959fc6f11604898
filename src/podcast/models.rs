//! Podcast generation inputs and results.

use crate::error::{Result, VoxError};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Shortest and longest episode the form accepts, in minutes.
pub const MIN_DURATION_MINUTES: u32 = 1;
pub const MAX_DURATION_MINUTES: u32 = 120;

/// Prebuilt voices offered by the speech model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoiceId {
    Kore,
    Puck,
    Charon,
    Zephyr,
    Fenrir,
    Aoede,
    Autonoe,
    Iapetus,
    Leda,
    Orus,
}

impl VoiceId {
    pub const ALL: [VoiceId; 10] = [
        VoiceId::Kore,
        VoiceId::Puck,
        VoiceId::Charon,
        VoiceId::Zephyr,
        VoiceId::Fenrir,
        VoiceId::Aoede,
        VoiceId::Autonoe,
        VoiceId::Iapetus,
        VoiceId::Leda,
        VoiceId::Orus,
    ];

    /// Voice name as the speech API expects it.
    pub fn name(self) -> &'static str {
        match self {
            VoiceId::Kore => "Kore",
            VoiceId::Puck => "Puck",
            VoiceId::Charon => "Charon",
            VoiceId::Zephyr => "Zephyr",
            VoiceId::Fenrir => "Fenrir",
            VoiceId::Aoede => "Aoede",
            VoiceId::Autonoe => "Autonoe",
            VoiceId::Iapetus => "Iapetus",
            VoiceId::Leda => "Leda",
            VoiceId::Orus => "Orus",
        }
    }
}

impl fmt::Display for VoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for VoiceId {
    type Err = VoxError;

    fn from_str(s: &str) -> Result<Self> {
        VoiceId::ALL
            .iter()
            .copied()
            .find(|v| v.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| VoxError::InvalidInput(format!("Unknown voice: {}", s)))
    }
}

/// Conversational format of the episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Modality {
    #[serde(rename = "Debate / Opposing Views")]
    Debate,
    #[serde(rename = "Friendly Conversation")]
    FriendlyConversation,
    #[serde(rename = "Devil’s Advocate")]
    DevilsAdvocate,
    #[serde(rename = "Expert vs Curious Beginner")]
    ExpertVsBeginner,
    #[serde(rename = "Host vs Skeptic")]
    HostVsSkeptic,
    #[serde(rename = "Fast-paced, high-energy")]
    FastPaced,
    #[serde(rename = "Serious, analytical")]
    Analytical,
    #[serde(rename = "Light humor + banter")]
    Banter,
}

impl Modality {
    pub const ALL: [Modality; 8] = [
        Modality::Debate,
        Modality::FriendlyConversation,
        Modality::DevilsAdvocate,
        Modality::ExpertVsBeginner,
        Modality::HostVsSkeptic,
        Modality::FastPaced,
        Modality::Analytical,
        Modality::Banter,
    ];

    /// Descriptor inserted into the generation prompt.
    pub fn label(self) -> &'static str {
        match self {
            Modality::Debate => "Debate / Opposing Views",
            Modality::FriendlyConversation => "Friendly Conversation",
            Modality::DevilsAdvocate => "Devil’s Advocate",
            Modality::ExpertVsBeginner => "Expert vs Curious Beginner",
            Modality::HostVsSkeptic => "Host vs Skeptic",
            Modality::FastPaced => "Fast-paced, high-energy",
            Modality::Analytical => "Serious, analytical",
            Modality::Banter => "Light humor + banter",
        }
    }

    /// Short command-line name.
    pub fn slug(self) -> &'static str {
        match self {
            Modality::Debate => "debate",
            Modality::FriendlyConversation => "friendly",
            Modality::DevilsAdvocate => "devils-advocate",
            Modality::ExpertVsBeginner => "expert-beginner",
            Modality::HostVsSkeptic => "skeptic",
            Modality::FastPaced => "fast-paced",
            Modality::Analytical => "analytical",
            Modality::Banter => "banter",
        }
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Modality {
    type Err = VoxError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        Modality::ALL
            .iter()
            .copied()
            .find(|m| m.slug().eq_ignore_ascii_case(s) || m.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let known: Vec<&str> = Modality::ALL.iter().map(|m| m.slug()).collect();
                VoxError::InvalidInput(format!(
                    "Unknown modality '{}'. Expected one of: {}",
                    s,
                    known.join(", ")
                ))
            })
    }
}

/// Emotional register of the episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    #[serde(rename = "Calm / Neutral")]
    Calm,
    #[serde(rename = "High-energy / Viral")]
    HighEnergy,
    #[serde(rename = "Thought-provoking")]
    ThoughtProvoking,
    #[serde(rename = "Emotional / Story-driven")]
    Emotional,
    #[serde(rename = "Bold / Controversial")]
    Bold,
}

impl Tone {
    pub const ALL: [Tone; 5] = [
        Tone::Calm,
        Tone::HighEnergy,
        Tone::ThoughtProvoking,
        Tone::Emotional,
        Tone::Bold,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Tone::Calm => "Calm / Neutral",
            Tone::HighEnergy => "High-energy / Viral",
            Tone::ThoughtProvoking => "Thought-provoking",
            Tone::Emotional => "Emotional / Story-driven",
            Tone::Bold => "Bold / Controversial",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Tone::Calm => "calm",
            Tone::HighEnergy => "viral",
            Tone::ThoughtProvoking => "thought-provoking",
            Tone::Emotional => "emotional",
            Tone::Bold => "bold",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Tone {
    type Err = VoxError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        Tone::ALL
            .iter()
            .copied()
            .find(|t| t.slug().eq_ignore_ascii_case(s) || t.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let known: Vec<&str> = Tone::ALL.iter().map(|t| t.slug()).collect();
                VoxError::InvalidInput(format!(
                    "Unknown tone '{}'. Expected one of: {}",
                    s,
                    known.join(", ")
                ))
            })
    }
}

/// Number of hosts, serialized as "1" or "2".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HostCount {
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2")]
    Two,
}

impl HostCount {
    pub fn as_number(self) -> u8 {
        match self {
            HostCount::One => 1,
            HostCount::Two => 2,
        }
    }
}

impl TryFrom<u8> for HostCount {
    type Error = VoxError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(HostCount::One),
            2 => Ok(HostCount::Two),
            n => Err(VoxError::InvalidInput(format!(
                "Host count must be 1 or 2, got {}",
                n
            ))),
        }
    }
}

impl fmt::Display for HostCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_number())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostNames {
    pub host1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host2: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostVoices {
    pub host1: VoiceId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host2: Option<VoiceId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostPitch {
    pub host1: f32,
    pub host2: f32,
}

/// Everything the generation form collects.
///
/// Built through [`PodcastConfigBuilder`], which applies the form's
/// normalization rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodcastConfig {
    pub source_text: String,
    pub source_urls: Vec<String>,
    pub host_count: HostCount,
    pub duration_minutes: u32,
    pub modality: Modality,
    pub tone: Tone,
    pub host_names: HostNames,
    pub voices: HostVoices,
    pub voice_pitch: HostPitch,
}

impl PodcastConfig {
    pub fn builder() -> PodcastConfigBuilder {
        PodcastConfigBuilder::default()
    }

    pub fn has_urls(&self) -> bool {
        !self.source_urls.is_empty()
    }
}

/// Form state before submission.
#[derive(Debug, Clone)]
pub struct PodcastConfigBuilder {
    source_text: String,
    source_urls: Vec<String>,
    host_count: HostCount,
    duration_minutes: u32,
    modality: Modality,
    tone: Tone,
    host1_name: String,
    host2_name: String,
    host1_voice: VoiceId,
    host2_voice: VoiceId,
    host1_pitch: f32,
    host2_pitch: f32,
}

impl Default for PodcastConfigBuilder {
    fn default() -> Self {
        Self {
            source_text: String::new(),
            source_urls: Vec::new(),
            host_count: HostCount::Two,
            duration_minutes: 15,
            modality: Modality::FriendlyConversation,
            tone: Tone::HighEnergy,
            host1_name: "Alex".to_string(),
            host2_name: "Jordan".to_string(),
            host1_voice: VoiceId::Kore,
            host2_voice: VoiceId::Puck,
            host1_pitch: 0.0,
            host2_pitch: 0.0,
        }
    }
}

impl PodcastConfigBuilder {
    pub fn source_text(mut self, text: impl Into<String>) -> Self {
        self.source_text = text.into();
        self
    }

    pub fn source_url(mut self, url: impl Into<String>) -> Self {
        self.source_urls.push(url.into());
        self
    }

    pub fn source_urls<I, S>(mut self, urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.source_urls.extend(urls.into_iter().map(Into::into));
        self
    }

    pub fn host_count(mut self, count: HostCount) -> Self {
        self.host_count = count;
        self
    }

    pub fn duration_minutes(mut self, minutes: u32) -> Self {
        self.duration_minutes = minutes;
        self
    }

    pub fn modality(mut self, modality: Modality) -> Self {
        self.modality = modality;
        self
    }

    pub fn tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }

    pub fn host1(mut self, name: impl Into<String>, voice: VoiceId, pitch: f32) -> Self {
        self.host1_name = name.into();
        self.host1_voice = voice;
        self.host1_pitch = pitch;
        self
    }

    pub fn host2(mut self, name: impl Into<String>, voice: VoiceId, pitch: f32) -> Self {
        self.host2_name = name.into();
        self.host2_voice = voice;
        self.host2_pitch = pitch;
        self
    }

    /// Validate and normalize the form.
    ///
    /// Blank URLs are dropped, blank host names fall back to "Host A"/"Host B",
    /// and pitch biases are clamped to [-1, 1]. At least one source is required.
    pub fn build(self) -> Result<PodcastConfig> {
        let mut source_urls = Vec::new();
        for raw in &self.source_urls {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                continue;
            }
            url::Url::parse(trimmed).map_err(|e| {
                VoxError::InvalidInput(format!("Invalid source URL '{}': {}", trimmed, e))
            })?;
            source_urls.push(trimmed.to_string());
        }

        if self.source_text.trim().is_empty() && source_urls.is_empty() {
            return Err(VoxError::InvalidInput(
                "Provide source text or at least one source URL".to_string(),
            ));
        }

        if !(MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES).contains(&self.duration_minutes) {
            return Err(VoxError::InvalidInput(format!(
                "Duration must be between {} and {} minutes",
                MIN_DURATION_MINUTES, MAX_DURATION_MINUTES
            )));
        }

        let host1 = non_blank_or(&self.host1_name, "Host A");
        let two_hosts = self.host_count == HostCount::Two;

        Ok(PodcastConfig {
            source_text: self.source_text,
            source_urls,
            host_count: self.host_count,
            duration_minutes: self.duration_minutes,
            modality: self.modality,
            tone: self.tone,
            host_names: HostNames {
                host1,
                host2: two_hosts.then(|| non_blank_or(&self.host2_name, "Host B")),
            },
            voices: HostVoices {
                host1: self.host1_voice,
                host2: two_hosts.then_some(self.host2_voice),
            },
            voice_pitch: HostPitch {
                host1: clamp_pitch(self.host1_pitch),
                host2: clamp_pitch(self.host2_pitch),
            },
        })
    }
}

fn non_blank_or(value: &str, fallback: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

fn clamp_pitch(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(-1.0, 1.0)
    }
}

/// Format a duration the way the form labels it ("45m", "1h", "1h 30m").
pub fn format_duration_label(minutes: u32) -> String {
    if minutes < 60 {
        return format!("{}m", minutes);
    }
    let h = minutes / 60;
    let m = minutes % 60;
    if m > 0 {
        format!("{}h {}m", h, m)
    } else {
        format!("{}h", h)
    }
}

/// One spoken line of the script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptLine {
    pub speaker: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl ScriptLine {
    pub fn new(speaker: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            text: text.into(),
            timestamp: None,
        }
    }
}

/// A citation returned by search grounding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundingLink {
    pub uri: String,
    pub title: String,
}

/// A generated episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodcastResult {
    pub title: String,
    pub description: String,
    pub youtube_description: String,
    pub script: Vec<ScriptLine>,
    pub viral_clips: Vec<String>,
    /// Speaker name to voice, in host order.
    pub voice_mapping: IndexMap<String, VoiceId>,
    /// Speaker name to pitch bias.
    #[serde(default)]
    pub voice_pitch_mapping: IndexMap<String, f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grounding_links: Option<Vec<GroundingLink>>,
}

impl PodcastResult {
    /// Speakers bound to a voice, in host order.
    pub fn speakers(&self) -> Vec<&str> {
        self.voice_mapping.keys().map(String::as_str).collect()
    }

    /// Read a result previously exported as JSON.
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults_two_hosts() {
        let config = PodcastConfig::builder().source_text("notes").build().unwrap();

        assert_eq!(config.host_count, HostCount::Two);
        assert_eq!(config.host_names.host1, "Alex");
        assert_eq!(config.host_names.host2.as_deref(), Some("Jordan"));
        assert_eq!(config.voices.host2, Some(VoiceId::Puck));
        assert_eq!(config.duration_minutes, 15);
    }

    #[test]
    fn test_builder_single_host_drops_second() {
        let config = PodcastConfig::builder()
            .source_text("notes")
            .host_count(HostCount::One)
            .host1("  ", VoiceId::Charon, -2.0)
            .build()
            .unwrap();

        assert_eq!(config.host_names.host1, "Host A");
        assert!(config.host_names.host2.is_none());
        assert!(config.voices.host2.is_none());
        assert_eq!(config.voice_pitch.host1, -1.0);
    }

    #[test]
    fn test_builder_blank_second_name() {
        let config = PodcastConfig::builder()
            .source_text("notes")
            .host2("", VoiceId::Orus, 0.3)
            .build()
            .unwrap();
        assert_eq!(config.host_names.host2.as_deref(), Some("Host B"));
    }

    #[test]
    fn test_builder_requires_a_source() {
        let err = PodcastConfig::builder().source_urls(["", "  "]).build().unwrap_err();
        assert!(matches!(err, VoxError::InvalidInput(_)));

        let config = PodcastConfig::builder()
            .source_urls(["", "https://example.com/article"])
            .build()
            .unwrap();
        assert_eq!(config.source_urls, vec!["https://example.com/article"]);
        assert!(config.has_urls());
    }

    #[test]
    fn test_builder_rejects_bad_url_and_duration() {
        assert!(PodcastConfig::builder().source_url("not a url").build().is_err());
        assert!(PodcastConfig::builder()
            .source_text("x")
            .duration_minutes(0)
            .build()
            .is_err());
        assert!(PodcastConfig::builder()
            .source_text("x")
            .duration_minutes(121)
            .build()
            .is_err());
    }

    #[test]
    fn test_config_wire_format() {
        let config = PodcastConfig::builder().source_text("notes").build().unwrap();
        let json = serde_json::to_value(&config).unwrap();

        assert_eq!(json["hostCount"], "2");
        assert_eq!(json["modality"], "Friendly Conversation");
        assert_eq!(json["tone"], "High-energy / Viral");
        assert_eq!(json["hostNames"]["host2"], "Jordan");
        assert_eq!(json["voices"]["host1"], "Kore");
    }

    #[test]
    fn test_enum_parsing() {
        assert_eq!("devils-advocate".parse::<Modality>().unwrap(), Modality::DevilsAdvocate);
        assert_eq!("Serious, analytical".parse::<Modality>().unwrap(), Modality::Analytical);
        assert_eq!("viral".parse::<Tone>().unwrap(), Tone::HighEnergy);
        assert_eq!("iapetus".parse::<VoiceId>().unwrap(), VoiceId::Iapetus);
        assert!("podcast".parse::<Tone>().is_err());
        assert!(HostCount::try_from(3).is_err());
    }

    #[test]
    fn test_format_duration_label() {
        assert_eq!(format_duration_label(15), "15m");
        assert_eq!(format_duration_label(60), "1h");
        assert_eq!(format_duration_label(95), "1h 35m");
    }

    #[test]
    fn test_result_parses_original_export() {
        let raw = r#"{
            "title": "Ep 1",
            "description": "d",
            "youtubeDescription": "yt",
            "script": [{"speaker": "Alex", "text": "Hi", "timestamp": "00:00"}, {"speaker": "Jordan", "text": "Hey"}],
            "viralClips": ["clip"],
            "voiceMapping": {"Alex": "Kore", "Jordan": "Puck"},
            "voicePitchMapping": {"Alex": 0, "Jordan": 0.5},
            "groundingLinks": []
        }"#;
        let result = PodcastResult::from_json(raw).unwrap();

        assert_eq!(result.speakers(), vec!["Alex", "Jordan"]);
        assert_eq!(result.script[0].timestamp.as_deref(), Some("00:00"));
        assert_eq!(result.script[1].timestamp, None);
        assert_eq!(result.voice_pitch_mapping["Jordan"], 0.5);
    }
}
