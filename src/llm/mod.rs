//! Generative model access.
//!
//! All text, chat and speech calls go through the [`ContentGenerator`] trait so
//! callers can be exercised without a network.

mod gemini;
mod types;

#[cfg(test)]
pub(crate) mod fake;

pub use gemini::{create_http_client, GeminiClient};
pub use types::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    GoogleSearch, GroundingChunk, GroundingMetadata, InlineData, MultiSpeakerVoiceConfig, Part,
    PrebuiltVoiceConfig, SpeakerVoiceConfig, SpeechConfig, Tool, VoiceConfig, WebSource,
};

use crate::error::Result;
use async_trait::async_trait;

/// A backend able to answer `generateContent` requests.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Send one request to `model`.
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse>;
}
