//! Podcast configuration, script generation and result types.

mod generator;
mod models;
mod request;
mod voices;

pub use generator::{assemble_result, extract_grounding_links, PodcastGenerator, INVALID_FORMAT_MESSAGE};
pub use models::{
    format_duration_label, GroundingLink, HostCount, HostNames, HostPitch, HostVoices, Modality,
    PodcastConfig, PodcastConfigBuilder, PodcastResult, ScriptLine, Tone, VoiceId,
    MAX_DURATION_MINUTES, MIN_DURATION_MINUTES,
};
pub use request::{build_script_prompt, build_script_request, script_schema};
pub use voices::{profile, Gender, VoiceProfile, VOICE_PROFILES};
