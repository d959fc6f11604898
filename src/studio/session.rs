//! A single editing and listening session over one generated result.

use super::editor::ScriptEditor;
use super::operation::{CancellationSource, CancellationToken, OperationState};
use super::transport::Transport;
use crate::audio::{default_output, AudioArtifact, AudioHandle, AudioOutput, DEFAULT_SAMPLE_RATE};
use crate::error::{Result, VoxError};
use crate::podcast::{PodcastResult, ScriptLine, VoiceId};
use crate::speech::{full_text, preview_text, SpeechSynthesizer};
use indexmap::IndexMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

pub const PREVIEW_ERROR: &str = "Failed to generate preview audio";
pub const RENDER_ERROR: &str = "Failed to produce full audio";

/// Lines spoken by a preview unless configured otherwise.
pub const DEFAULT_PREVIEW_LINES: usize = 5;

/// A synthesis call detached from the session so it can run while the
/// session stays usable.
pub struct SynthesisJob {
    synthesizer: Arc<SpeechSynthesizer>,
    token: CancellationToken,
    text: String,
    voices: IndexMap<String, VoiceId>,
    pitches: IndexMap<String, f32>,
}

impl SynthesisJob {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub async fn run(&self) -> Result<Vec<u8>> {
        self.synthesizer
            .synthesize(&self.text, &self.voices, &self.pitches)
            .await
    }
}

/// Owns the editable script, both audio slots and their transports.
pub struct Studio {
    synthesizer: Arc<SpeechSynthesizer>,
    output: Arc<dyn AudioOutput>,
    sample_rate: u32,
    preview_lines: usize,
    editor: ScriptEditor,

    preview: Option<AudioHandle>,
    preview_transport: Transport,
    preview_state: OperationState,
    preview_tokens: CancellationSource,

    full_audio: Option<AudioHandle>,
    transport: Transport,
    render_state: OperationState,
    render_tokens: CancellationSource,
}

impl Studio {
    pub fn new(result: PodcastResult, synthesizer: Arc<SpeechSynthesizer>) -> Self {
        Self {
            synthesizer,
            output: default_output(),
            sample_rate: DEFAULT_SAMPLE_RATE,
            preview_lines: DEFAULT_PREVIEW_LINES,
            editor: ScriptEditor::new(result),
            preview: None,
            preview_transport: Transport::default(),
            preview_state: OperationState::default(),
            preview_tokens: CancellationSource::new(),
            full_audio: None,
            transport: Transport::default(),
            render_state: OperationState::default(),
            render_tokens: CancellationSource::new(),
        }
    }

    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Send playback to `output` instead of the default device.
    pub fn with_output(mut self, output: Arc<dyn AudioOutput>) -> Self {
        self.output = output;
        self
    }

    pub fn with_preview_lines(mut self, lines: usize) -> Self {
        self.preview_lines = lines.max(1);
        self
    }

    pub fn result(&self) -> &PodcastResult {
        self.editor.result()
    }

    pub fn editor(&self) -> &ScriptEditor {
        &self.editor
    }

    pub fn script(&self) -> &[ScriptLine] {
        self.editor.script()
    }

    /// Replace the session's result. All audio and in-flight work is dropped.
    pub fn load_result(&mut self, result: PodcastResult) {
        self.preview_tokens.cancel_all();
        self.render_tokens.cancel_all();
        self.preview = None;
        self.preview_transport = Transport::default();
        self.preview_state.reset();
        self.full_audio = None;
        self.transport = Transport::default();
        self.render_state.reset();
        self.editor = ScriptEditor::new(result);
        info!("Loaded \"{}\" into the studio", self.editor.result().title);
    }

    // Editing. Every successful edit invalidates the full render.

    pub fn update_speaker(&mut self, index: usize, speaker: &str) -> Result<()> {
        self.editor.update_speaker(index, speaker)?;
        self.invalidate_full_audio();
        Ok(())
    }

    pub fn update_text(&mut self, index: usize, text: &str) -> Result<()> {
        self.editor.update_text(index, text)?;
        self.invalidate_full_audio();
        Ok(())
    }

    pub fn remove_line(&mut self, index: usize) -> Result<ScriptLine> {
        let line = self.editor.remove_line(index)?;
        self.invalidate_full_audio();
        Ok(line)
    }

    pub fn append_line(&mut self) -> Result<usize> {
        let index = self.editor.append_line()?;
        self.invalidate_full_audio();
        Ok(index)
    }

    fn invalidate_full_audio(&mut self) {
        self.render_tokens.cancel_all();
        self.render_state.reset();
        self.transport = Transport::default();
        if self.full_audio.take().is_some() {
            debug!("Script edited, released full audio");
        }
    }

    // Preview

    /// Stop the audible preview and start a new one over the first lines.
    pub fn begin_preview(&mut self) -> Result<SynthesisJob> {
        self.preview_state.begin("preview")?;
        self.stop_preview();

        let text = preview_text(self.editor.script(), self.preview_lines);
        Ok(self.job(self.preview_tokens.issue(), text))
    }

    /// Apply a preview outcome. Returns `false` when the job was superseded.
    pub fn finish_preview(&mut self, job: SynthesisJob, outcome: Result<Vec<u8>>) -> Result<bool> {
        if job.is_cancelled() {
            debug!("Discarding superseded preview");
            return Ok(false);
        }

        match outcome.and_then(|pcm| self.materialize(pcm)) {
            Ok((artifact, handle)) => {
                self.preview_transport = Transport::with_audio(&artifact, Arc::clone(&self.output));
                self.preview_transport.play();
                self.preview = Some(handle);
                self.preview_state.succeed();
                Ok(true)
            }
            Err(e) => {
                warn!("Preview failed: {}", e);
                self.preview_state.fail(PREVIEW_ERROR);
                Err(VoxError::Synthesis(PREVIEW_ERROR.to_string()))
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn preview(&mut self) -> Result<bool> {
        let job = self.begin_preview()?;
        let outcome = job.run().await;
        self.finish_preview(job, outcome)
    }

    /// Silence the preview. Its audio stays loaded.
    pub fn stop_preview(&mut self) {
        self.preview_transport.stop();
    }

    pub fn preview_audio(&self) -> Option<&AudioHandle> {
        self.preview.as_ref()
    }

    pub fn preview_transport(&mut self) -> &mut Transport {
        &mut self.preview_transport
    }

    pub fn preview_state(&self) -> &OperationState {
        &self.preview_state
    }

    // Full render

    pub fn begin_render(&mut self) -> Result<SynthesisJob> {
        self.render_state.begin("full render")?;
        let text = full_text(self.editor.script());
        Ok(self.job(self.render_tokens.issue(), text))
    }

    /// Apply a render outcome. Returns `false` when the job was superseded.
    pub fn finish_render(&mut self, job: SynthesisJob, outcome: Result<Vec<u8>>) -> Result<bool> {
        if job.is_cancelled() {
            debug!("Discarding render of an outdated script");
            return Ok(false);
        }

        match outcome.and_then(|pcm| self.materialize(pcm)) {
            Ok((artifact, handle)) => {
                info!(
                    "Full audio ready: {:.1}s at {}",
                    handle.duration_seconds(),
                    handle.path().display()
                );
                self.transport = Transport::with_audio(&artifact, Arc::clone(&self.output));
                self.full_audio = Some(handle);
                self.render_state.succeed();
                Ok(true)
            }
            Err(e) => {
                warn!("Full render failed: {}", e);
                self.render_state.fail(RENDER_ERROR);
                Err(VoxError::Synthesis(RENDER_ERROR.to_string()))
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn render(&mut self) -> Result<bool> {
        let job = self.begin_render()?;
        let outcome = job.run().await;
        self.finish_render(job, outcome)
    }

    pub fn full_audio(&self) -> Option<&AudioHandle> {
        self.full_audio.as_ref()
    }

    pub fn transport(&mut self) -> &mut Transport {
        &mut self.transport
    }

    pub fn render_state(&self) -> &OperationState {
        &self.render_state
    }

    /// Copy the rendered WAV to `dest`.
    pub fn save_full_audio(&self, dest: &Path) -> Result<()> {
        let handle = self.full_audio.as_ref().ok_or_else(|| {
            VoxError::InvalidInput("No full audio rendered for the current script".to_string())
        })?;
        handle.save_to(dest)
    }

    fn job(&self, token: CancellationToken, text: String) -> SynthesisJob {
        let result = self.editor.result();
        SynthesisJob {
            synthesizer: Arc::clone(&self.synthesizer),
            token,
            text,
            voices: result.voice_mapping.clone(),
            pitches: result.voice_pitch_mapping.clone(),
        }
    }

    fn materialize(&self, pcm: Vec<u8>) -> Result<(AudioArtifact, AudioHandle)> {
        let artifact = AudioArtifact::new(pcm, self.sample_rate);
        let handle = AudioHandle::create(&artifact)?;
        Ok((artifact, handle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{encode_pcm16, RecordingOutput};
    use crate::llm::fake::ScriptedGenerator;
    use crate::studio::PlaybackState;

    fn result_with_lines(n: usize) -> PodcastResult {
        let mut voice_mapping = IndexMap::new();
        voice_mapping.insert("Alex".to_string(), VoiceId::Kore);
        voice_mapping.insert("Jordan".to_string(), VoiceId::Puck);
        let script = (0..n)
            .map(|i| {
                let speaker = if i % 2 == 0 { "Alex" } else { "Jordan" };
                ScriptLine::new(speaker, format!("Line {}", i))
            })
            .collect();

        PodcastResult {
            title: "Test Episode".to_string(),
            description: String::new(),
            youtube_description: String::new(),
            script,
            viral_clips: vec![],
            voice_mapping,
            voice_pitch_mapping: IndexMap::new(),
            grounding_links: None,
        }
    }

    fn studio(fake: &Arc<ScriptedGenerator>, lines: usize) -> Studio {
        let synthesizer = Arc::new(SpeechSynthesizer::new(fake.clone(), "tts"));
        Studio::new(result_with_lines(lines), synthesizer)
            .with_output(Arc::new(RecordingOutput::default()))
    }

    fn studio_with_output(fake: &Arc<ScriptedGenerator>, lines: usize) -> (Studio, Arc<RecordingOutput>) {
        let output = Arc::new(RecordingOutput::default());
        let synthesizer = Arc::new(SpeechSynthesizer::new(fake.clone(), "tts"));
        let studio = Studio::new(result_with_lines(lines), synthesizer).with_output(output.clone());
        (studio, output)
    }

    fn one_second() -> Vec<u8> {
        encode_pcm16(&vec![0.25; DEFAULT_SAMPLE_RATE as usize])
    }

    #[tokio::test]
    async fn test_preview_speaks_first_lines() {
        let fake = Arc::new(ScriptedGenerator::new());
        fake.push_audio(&one_second());
        let mut studio = studio(&fake, 8);

        assert!(studio.preview().await.unwrap());

        let (_, body) = fake.last_request();
        let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(prompt.ends_with("Alex: Line 0\nJordan: Line 1\nAlex: Line 2\nJordan: Line 3\nAlex: Line 4"));

        assert!(studio.preview_audio().is_some());
        assert_eq!(studio.preview_transport().state(), PlaybackState::Playing);
        assert!(!studio.preview_state().is_loading());
    }

    #[tokio::test]
    async fn test_new_preview_silences_playing_preview() {
        let fake = Arc::new(ScriptedGenerator::new());
        fake.push_audio(&one_second());
        let (mut studio, output) = studio_with_output(&fake, 3);

        studio.preview().await.unwrap();
        assert_eq!(studio.preview_transport().state(), PlaybackState::Playing);
        assert_eq!(output.live(), 1);

        let _job = studio.begin_preview().unwrap();
        assert_eq!(studio.preview_transport().state(), PlaybackState::Stopped);
        assert_eq!(output.live(), 0);
    }

    #[tokio::test]
    async fn test_full_audio_plays_through_output() {
        let fake = Arc::new(ScriptedGenerator::new());
        fake.push_audio(&one_second());
        let (mut studio, output) = studio_with_output(&fake, 2);

        studio.render().await.unwrap();
        assert_eq!(output.live(), 0);

        studio.transport().play();
        assert_eq!(output.live(), 1);
        assert_eq!(output.starts(), vec![DEFAULT_SAMPLE_RATE as usize]);

        studio.update_text(0, "Changed").unwrap();
        assert_eq!(output.live(), 0);
    }

    #[tokio::test]
    async fn test_render_then_edit_invalidates_full_audio() {
        let fake = Arc::new(ScriptedGenerator::new());
        fake.push_audio(&one_second());
        fake.push_audio(&one_second());
        let mut studio = studio(&fake, 3);

        studio.preview().await.unwrap();
        studio.render().await.unwrap();
        let path = studio.full_audio().unwrap().path().to_path_buf();
        assert!(path.exists());
        assert!((studio.transport().duration() - 1.0).abs() < 1e-9);

        studio.update_text(0, "Changed").unwrap();

        assert!(studio.full_audio().is_none());
        assert!(!path.exists());
        assert_eq!(studio.transport().duration(), 0.0);
        assert!(studio.preview_audio().is_some());
    }

    #[tokio::test]
    async fn test_every_edit_kind_invalidates() {
        let fake = Arc::new(ScriptedGenerator::new());
        for _ in 0..4 {
            fake.push_audio(&one_second());
        }
        let mut studio = studio(&fake, 3);

        studio.render().await.unwrap();
        studio.update_speaker(0, "Jordan").unwrap();
        assert!(studio.full_audio().is_none());

        studio.render().await.unwrap();
        studio.remove_line(2).unwrap();
        assert!(studio.full_audio().is_none());

        studio.render().await.unwrap();
        studio.append_line().unwrap();
        assert!(studio.full_audio().is_none());

        studio.render().await.unwrap();
        assert!(studio.update_speaker(0, "Nobody").is_err());
        assert!(studio.full_audio().is_some());
    }

    #[tokio::test]
    async fn test_render_of_outdated_script_discarded() {
        let fake = Arc::new(ScriptedGenerator::new());
        fake.push_audio(&one_second());
        let mut studio = studio(&fake, 2);

        let job = studio.begin_render().unwrap();
        studio.update_text(1, "Edited mid-render").unwrap();
        let outcome = job.run().await;

        assert!(!studio.finish_render(job, outcome).unwrap());
        assert!(studio.full_audio().is_none());
        assert!(!studio.render_state().is_loading());
    }

    #[tokio::test]
    async fn test_failures_are_scoped_per_operation() {
        let fake = Arc::new(ScriptedGenerator::new());
        fake.push_error("quota exhausted");
        fake.push_audio(&one_second());
        let mut studio = studio(&fake, 2);

        let err = studio.preview().await.unwrap_err();
        assert_eq!(err.to_string(), format!("Audio synthesis failed: {}", PREVIEW_ERROR));
        assert_eq!(studio.preview_state().error(), Some(PREVIEW_ERROR));

        assert!(studio.render().await.unwrap());
        assert_eq!(studio.render_state().error(), None);
        assert_eq!(studio.preview_state().error(), Some(PREVIEW_ERROR));
    }

    #[tokio::test]
    async fn test_render_failure_message() {
        let fake = Arc::new(ScriptedGenerator::new());
        fake.push_text("no audio here");
        let mut studio = studio(&fake, 2);

        tokio_test::assert_err!(studio.render().await);
        assert_eq!(studio.render_state().error(), Some(RENDER_ERROR));
        assert!(studio.full_audio().is_none());
    }

    #[test]
    fn test_second_begin_is_busy() {
        let fake = Arc::new(ScriptedGenerator::new());
        let mut studio = studio(&fake, 2);

        let _job = studio.begin_preview().unwrap();
        assert!(matches!(studio.begin_preview(), Err(VoxError::Busy(_))));
        let _render = studio.begin_render().unwrap();
    }

    #[tokio::test]
    async fn test_load_result_supersedes_in_flight_preview() {
        let fake = Arc::new(ScriptedGenerator::new());
        fake.push_audio(&one_second());
        let mut studio = studio(&fake, 2);

        let job = studio.begin_preview().unwrap();
        studio.load_result(result_with_lines(4));
        let outcome = job.run().await;

        assert!(!studio.finish_preview(job, outcome).unwrap());
        assert!(studio.preview_audio().is_none());
        assert_eq!(studio.script().len(), 4);
    }

    #[tokio::test]
    async fn test_save_full_audio() {
        let fake = Arc::new(ScriptedGenerator::new());
        fake.push_audio(&one_second());
        let mut studio = studio(&fake, 2);
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("episode.wav");

        tokio_test::assert_err!(studio.save_full_audio(&dest));
        tokio_test::assert_ok!(studio.render().await);
        tokio_test::assert_ok!(studio.save_full_audio(&dest));

        let reader = hound::WavReader::open(&dest).unwrap();
        assert_eq!(reader.spec().sample_rate, DEFAULT_SAMPLE_RATE);
        assert_eq!(reader.len(), DEFAULT_SAMPLE_RATE);
    }
}
