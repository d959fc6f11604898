//! Text-to-speech through the speech model.

use super::pitch::pitch_instruction;
use crate::config::Prompts;
use crate::error::{Result, VoxError};
use crate::llm::{
    ContentGenerator, GenerateContentRequest, GenerationConfig, MultiSpeakerVoiceConfig,
    SpeakerVoiceConfig, SpeechConfig, VoiceConfig,
};
use crate::podcast::{profile, ScriptLine, VoiceId};
use base64::Engine;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// The speech model binds at most this many distinct voices per request.
pub const MAX_BOUND_SPEAKERS: usize = 2;

/// Voice used when a speaker has no binding.
const FALLBACK_VOICE: VoiceId = VoiceId::Kore;

/// Synthesizes raw PCM for scripts and voice auditions.
pub struct SpeechSynthesizer {
    generator: Arc<dyn ContentGenerator>,
    model: String,
    prompts: Prompts,
}

impl SpeechSynthesizer {
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

    /// Build the speech request for `text`.
    ///
    /// Two or more speakers use multi-speaker mode with the first two bound to
    /// voices; further speakers get a style instruction but no voice.
    pub fn build_request(
        &self,
        text: &str,
        voices: &IndexMap<String, VoiceId>,
        pitches: &IndexMap<String, f32>,
    ) -> GenerateContentRequest {
        let speakers: Vec<&String> = voices.keys().collect();
        let bias = |speaker: &str| pitches.get(speaker).copied().unwrap_or(0.0);

        let mut vars = HashMap::new();
        vars.insert("text".to_string(), text.to_string());

        let (prompt, speech_config) = if speakers.len() >= 2 {
            let instructions = speakers
                .iter()
                .map(|s| format!("{}: {}", s, pitch_instruction(bias(s))))
                .collect::<Vec<_>>()
                .join(" ");
            vars.insert("instructions".to_string(), instructions);

            let bindings = speakers
                .iter()
                .take(MAX_BOUND_SPEAKERS)
                .map(|s| SpeakerVoiceConfig {
                    speaker: s.to_string(),
                    voice_config: VoiceConfig::prebuilt(voices[s.as_str()].name()),
                })
                .collect();

            (
                self.prompts
                    .render_with_custom(&self.prompts.speech.conversation, &vars),
                SpeechConfig {
                    voice_config: None,
                    multi_speaker_voice_config: Some(MultiSpeakerVoiceConfig {
                        speaker_voice_configs: bindings,
                    }),
                },
            )
        } else {
            let (instruction, voice) = match speakers.first() {
                Some(s) => (pitch_instruction(bias(s)), voices[s.as_str()]),
                None => ("", FALLBACK_VOICE),
            };
            vars.insert("instruction".to_string(), instruction.to_string());

            (
                self.prompts.render_with_custom(&self.prompts.speech.solo, &vars),
                single_voice(voice),
            )
        };

        audio_request(prompt, speech_config)
    }

    /// Synthesize `text` and return raw 16-bit PCM.
    #[instrument(skip(self, text, voices, pitches), fields(chars = text.len(), speakers = voices.len()))]
    pub async fn synthesize(
        &self,
        text: &str,
        voices: &IndexMap<String, VoiceId>,
        pitches: &IndexMap<String, f32>,
    ) -> Result<Vec<u8>> {
        let request = self.build_request(text, voices, pitches);
        info!("Synthesizing {} characters with {}", text.len(), self.model);
        self.request_audio(&request).await
    }

    /// Synthesize the short introduction used to audition a voice.
    #[instrument(skip(self))]
    pub async fn voice_preview(&self, voice: VoiceId) -> Result<Vec<u8>> {
        let request = self.build_voice_preview_request(voice);
        self.request_audio(&request).await
    }

    pub fn build_voice_preview_request(&self, voice: VoiceId) -> GenerateContentRequest {
        let p = profile(voice);
        let mut vars = HashMap::new();
        vars.insert("label".to_string(), p.label.to_string());
        vars.insert("persona".to_string(), p.persona.to_string());
        let text = self
            .prompts
            .render_with_custom(&self.prompts.speech.voice_preview, &vars);

        audio_request(text, single_voice(voice))
    }

    async fn request_audio(&self, request: &GenerateContentRequest) -> Result<Vec<u8>> {
        let response = self.generator.generate_content(&self.model, request).await?;
        let encoded = response
            .inline_data()
            .ok_or_else(|| VoxError::Synthesis("No audio returned by the speech model".to_string()))?;

        let pcm = base64::engine::general_purpose::STANDARD.decode(encoded)?;
        if pcm.is_empty() {
            return Err(VoxError::Synthesis("Speech model returned empty audio".to_string()));
        }
        debug!("Received {} bytes of PCM", pcm.len());
        Ok(pcm)
    }
}

fn single_voice(voice: VoiceId) -> SpeechConfig {
    SpeechConfig {
        voice_config: Some(VoiceConfig::prebuilt(voice.name())),
        multi_speaker_voice_config: None,
    }
}

fn audio_request(text: String, speech_config: SpeechConfig) -> GenerateContentRequest {
    GenerateContentRequest::from_text(text).with_generation_config(GenerationConfig {
        response_modalities: Some(vec!["AUDIO".to_string()]),
        speech_config: Some(speech_config),
        ..Default::default()
    })
}

/// Join lines as `speaker: text`, one per line.
pub fn full_text(lines: &[ScriptLine]) -> String {
    lines
        .iter()
        .map(|l| format!("{}: {}", l.speaker, l.text))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Text of the first `lines` script lines.
pub fn preview_text(script: &[ScriptLine], lines: usize) -> String {
    full_text(&script[..lines.min(script.len())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::fake::ScriptedGenerator;
    use serde_json::json;

    fn mapping(entries: &[(&str, VoiceId, f32)]) -> (IndexMap<String, VoiceId>, IndexMap<String, f32>) {
        let voices = entries.iter().map(|(s, v, _)| (s.to_string(), *v)).collect();
        let pitches = entries.iter().map(|(s, _, p)| (s.to_string(), *p)).collect();
        (voices, pitches)
    }

    fn synthesizer(fake: Arc<ScriptedGenerator>) -> SpeechSynthesizer {
        SpeechSynthesizer::new(fake, "tts-model")
    }

    #[test]
    fn test_multi_speaker_request() {
        let fake = Arc::new(ScriptedGenerator::new());
        let (voices, pitches) = mapping(&[("Alex", VoiceId::Charon, -0.8), ("Jordan", VoiceId::Zephyr, 0.0)]);

        let request = synthesizer(fake).build_request("Alex: Hi\nJordan: Hey", &voices, &pitches);
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(
            body["contents"][0]["parts"][0]["text"],
            "TTS the following conversation. Alex: Use a deep, resonant, and bassy vocal quality. Jordan: \n\nAlex: Hi\nJordan: Hey"
        );
        assert_eq!(body["generationConfig"]["responseModalities"], json!(["AUDIO"]));
        assert_eq!(
            body["generationConfig"]["speechConfig"],
            json!({"multiSpeakerVoiceConfig": {"speakerVoiceConfigs": [
                {"speaker": "Alex", "voiceConfig": {"prebuiltVoiceConfig": {"voiceName": "Charon"}}},
                {"speaker": "Jordan", "voiceConfig": {"prebuiltVoiceConfig": {"voiceName": "Zephyr"}}}
            ]}})
        );
    }

    #[test]
    fn test_third_speaker_not_bound() {
        let fake = Arc::new(ScriptedGenerator::new());
        let (voices, pitches) = mapping(&[
            ("A", VoiceId::Kore, 0.0),
            ("B", VoiceId::Puck, 0.0),
            ("C", VoiceId::Leda, 0.9),
        ]);

        let request = synthesizer(fake).build_request("text", &voices, &pitches);
        let body = serde_json::to_value(&request).unwrap();
        let bound = body["generationConfig"]["speechConfig"]["multiSpeakerVoiceConfig"]["speakerVoiceConfigs"]
            .as_array()
            .unwrap()
            .len();

        assert_eq!(bound, 2);
        assert!(body["contents"][0]["parts"][0]["text"]
            .as_str()
            .unwrap()
            .contains("C: Use a sharp, bright, and high-pitched vocal quality."));
    }

    #[test]
    fn test_single_speaker_request() {
        let fake = Arc::new(ScriptedGenerator::new());
        let (voices, pitches) = mapping(&[("Solo", VoiceId::Orus, 0.6)]);

        let request = synthesizer(fake).build_request("Hello there", &voices, &pitches);
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(
            body["contents"][0]["parts"][0]["text"],
            "Use a sharp, bright, and high-pitched vocal quality. Say this as a solo podcast host: Hello there"
        );
        assert_eq!(
            body["generationConfig"]["speechConfig"],
            json!({"voiceConfig": {"prebuiltVoiceConfig": {"voiceName": "Orus"}}})
        );
    }

    #[test]
    fn test_placeholders_in_spoken_text_are_literal() {
        let fake = Arc::new(ScriptedGenerator::new());
        let (voices, pitches) = mapping(&[("Solo", VoiceId::Orus, 0.9)]);
        let synthesizer = synthesizer(fake);

        for _ in 0..16 {
            let request = synthesizer.build_request("Say {{instruction}} aloud", &voices, &pitches);
            assert_eq!(
                request.prompt_text(),
                "Use a sharp, bright, and high-pitched vocal quality. Say this as a solo podcast host: Say {{instruction}} aloud"
            );
        }
    }

    #[test]
    fn test_missing_pitch_is_neutral() {
        let fake = Arc::new(ScriptedGenerator::new());
        let voices: IndexMap<String, VoiceId> = [("Solo".to_string(), VoiceId::Kore)].into_iter().collect();

        let request = synthesizer(fake).build_request("Hi", &voices, &IndexMap::new());
        assert_eq!(request.prompt_text(), " Say this as a solo podcast host: Hi");
    }

    #[tokio::test]
    async fn test_synthesize_decodes_payload() {
        let fake = Arc::new(ScriptedGenerator::new());
        fake.push_audio(&[1, 2, 3, 4]);
        let (voices, pitches) = mapping(&[("Solo", VoiceId::Kore, 0.0)]);

        let pcm = synthesizer(fake.clone()).synthesize("Hi", &voices, &pitches).await.unwrap();
        assert_eq!(pcm, vec![1, 2, 3, 4]);
        assert_eq!(fake.last_request().0, "tts-model");
    }

    #[tokio::test]
    async fn test_missing_audio_is_synthesis_error() {
        let fake = Arc::new(ScriptedGenerator::new());
        fake.push_text("I cannot speak");
        fake.push_json(json!({"candidates": [{"content": {"parts": [{"inlineData": {"mimeType": "audio/L16", "data": ""}}]}}]}));
        let (voices, pitches) = mapping(&[("Solo", VoiceId::Kore, 0.0)]);
        let synth = synthesizer(fake);

        assert!(matches!(
            synth.synthesize("Hi", &voices, &pitches).await,
            Err(VoxError::Synthesis(_))
        ));
        assert!(matches!(
            synth.synthesize("Hi", &voices, &pitches).await,
            Err(VoxError::Synthesis(_))
        ));
    }

    #[tokio::test]
    async fn test_voice_preview() {
        let fake = Arc::new(ScriptedGenerator::new());
        fake.push_audio(&[0, 0]);

        let pcm = synthesizer(fake.clone()).voice_preview(VoiceId::Charon).await.unwrap();
        assert_eq!(pcm.len(), 2);

        let (_, body) = fake.last_request();
        assert_eq!(
            body["contents"][0]["parts"][0]["text"],
            "Hi there! I'm Deep, your The Late Night voice. I'm excited to help you host your next viral podcast episode. How do I sound?"
        );
        assert_eq!(
            body["generationConfig"]["speechConfig"]["voiceConfig"]["prebuiltVoiceConfig"]["voiceName"],
            "Charon"
        );
    }

    #[test]
    fn test_preview_text() {
        let script = vec![
            ScriptLine::new("Alex", "One"),
            ScriptLine::new("Jordan", "Two"),
            ScriptLine::new("Alex", "Three"),
        ];
        assert_eq!(preview_text(&script, 2), "Alex: One\nJordan: Two");
        assert_eq!(preview_text(&script, 10), "Alex: One\nJordan: Two\nAlex: Three");
        assert_eq!(full_text(&[]), "");
    }
}
