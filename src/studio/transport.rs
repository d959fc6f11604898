//! Playback transport.
//!
//! The transport tracks the play position against a monotonic clock and,
//! when given decoded audio, keeps an output stream running while playing.
//! Reaching the end stops playback and rewinds to zero.

use crate::audio::{AudioArtifact, AudioOutput, Playback};
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Playing,
    Paused,
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PlaybackState::Stopped => "stopped",
            PlaybackState::Playing => "playing",
            PlaybackState::Paused => "paused",
        };
        write!(f, "{}", s)
    }
}

/// Decoded audio and where to send it.
struct Source {
    output: Arc<dyn AudioOutput>,
    samples: Vec<f32>,
    sample_rate: u32,
}

pub struct Transport {
    duration: f64,
    position: f64,
    state: PlaybackState,
    /// Clock reading when playback last (re)started.
    started_at: Option<Instant>,
    source: Option<Source>,
    stream: Option<Box<dyn Playback>>,
}

impl fmt::Debug for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transport")
            .field("duration", &self.duration)
            .field("position", &self.position)
            .field("state", &self.state)
            .field("audible", &self.stream.is_some())
            .finish()
    }
}

impl Default for Transport {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl Transport {
    /// A transport that keeps time only.
    pub fn new(duration_seconds: f64) -> Self {
        Self {
            duration: duration_seconds.max(0.0),
            position: 0.0,
            state: PlaybackState::Stopped,
            started_at: None,
            source: None,
            stream: None,
        }
    }

    /// A transport that plays `artifact` through `output`.
    pub fn with_audio(artifact: &AudioArtifact, output: Arc<dyn AudioOutput>) -> Self {
        let mut transport = Self::new(artifact.duration_seconds());
        transport.source = Some(Source {
            output,
            samples: artifact.samples(),
            sample_rate: artifact.sample_rate(),
        });
        transport
    }

    /// Whether an output stream is currently running.
    pub fn is_audible(&self) -> bool {
        self.stream.is_some()
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn play(&mut self) {
        self.play_at(Instant::now());
    }

    pub fn pause(&mut self) {
        self.pause_at(Instant::now());
    }

    pub fn toggle(&mut self) {
        self.toggle_at(Instant::now());
    }

    pub fn seek(&mut self, seconds: f64) {
        self.seek_at(seconds, Instant::now());
    }

    pub fn position(&mut self) -> f64 {
        self.position_at(Instant::now())
    }

    pub fn state(&mut self) -> PlaybackState {
        self.state_at(Instant::now())
    }

    /// Stop playback and rewind.
    pub fn stop(&mut self) {
        self.state = PlaybackState::Stopped;
        self.position = 0.0;
        self.started_at = None;
        self.stream = None;
    }

    pub fn play_at(&mut self, now: Instant) {
        self.advance(now);
        if self.state == PlaybackState::Playing {
            return;
        }
        if self.duration <= 0.0 {
            self.stop();
            return;
        }
        self.state = PlaybackState::Playing;
        self.started_at = Some(now);
        self.start_stream();
    }

    pub fn pause_at(&mut self, now: Instant) {
        self.advance(now);
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
            self.started_at = None;
            self.stream = None;
        }
    }

    pub fn toggle_at(&mut self, now: Instant) {
        if self.state_at(now) == PlaybackState::Playing {
            self.pause_at(now);
        } else {
            self.play_at(now);
        }
    }

    /// Move to `seconds`, clamped to the track. Playback state is kept.
    pub fn seek_at(&mut self, seconds: f64, now: Instant) {
        self.advance(now);
        let target = if seconds.is_finite() { seconds } else { 0.0 };
        self.position = target.clamp(0.0, self.duration);
        if self.state == PlaybackState::Playing {
            self.started_at = Some(now);
            self.start_stream();
        }
    }

    pub fn position_at(&mut self, now: Instant) -> f64 {
        self.advance(now);
        self.position
    }

    pub fn state_at(&mut self, now: Instant) -> PlaybackState {
        self.advance(now);
        self.state
    }

    fn advance(&mut self, now: Instant) {
        if self.state != PlaybackState::Playing {
            return;
        }
        let Some(started) = self.started_at else {
            return;
        };
        if self.stream.as_ref().is_some_and(|s| s.is_finished()) {
            self.stop();
            return;
        }

        let position = self.position + now.saturating_duration_since(started).as_secs_f64();
        if position >= self.duration {
            self.stop();
        } else {
            self.position = position;
            self.started_at = Some(now);
        }
    }

    /// (Re)start the output stream at the current position.
    fn start_stream(&mut self) {
        self.stream = None;
        let Some(source) = &self.source else {
            return;
        };

        let offset = ((self.position * source.sample_rate as f64) as usize).min(source.samples.len());
        match source.output.start(&source.samples[offset..], source.sample_rate) {
            Ok(stream) => self.stream = Some(stream),
            Err(e) => warn!("Playing without sound: {}", e),
        }
    }
}

/// Format seconds as `m:ss`.
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{encode_pcm16, RecordingOutput, DEFAULT_SAMPLE_RATE};
    use std::time::Duration;

    fn audible(seconds: usize) -> (Transport, Arc<RecordingOutput>) {
        let output = Arc::new(RecordingOutput::default());
        let pcm = encode_pcm16(&vec![0.1; seconds * DEFAULT_SAMPLE_RATE as usize]);
        let artifact = AudioArtifact::new(pcm, DEFAULT_SAMPLE_RATE);
        (Transport::with_audio(&artifact, output.clone()), output)
    }

    #[test]
    fn test_play_drives_output_stream() {
        let t0 = Instant::now();
        let (mut transport, output) = audible(4);
        assert!((transport.duration() - 4.0).abs() < 1e-9);

        transport.play_at(t0);
        assert_eq!(output.live(), 1);
        assert!(transport.is_audible());

        transport.pause_at(t0 + Duration::from_secs(1));
        assert_eq!(output.live(), 0);

        transport.seek_at(3.0, t0 + Duration::from_secs(1));
        assert_eq!(output.live(), 0);
        transport.play_at(t0 + Duration::from_secs(1));
        assert_eq!(output.live(), 1);

        transport.stop();
        assert_eq!(output.live(), 0);
        assert_eq!(output.starts(), vec![96_000, 24_000]);
    }

    #[test]
    fn test_seek_while_playing_restarts_stream() {
        let t0 = Instant::now();
        let (mut transport, output) = audible(4);

        transport.play_at(t0);
        transport.seek_at(2.0, t0);
        assert_eq!(output.live(), 1);
        assert_eq!(output.starts(), vec![96_000, 48_000]);
    }

    #[test]
    fn test_end_of_track_releases_stream() {
        let t0 = Instant::now();
        let (mut transport, output) = audible(1);

        transport.play_at(t0);
        assert_eq!(transport.state_at(t0 + Duration::from_secs(2)), PlaybackState::Stopped);
        assert_eq!(output.live(), 0);
        assert!(!transport.is_audible());
    }

    #[test]
    fn test_play_pause_resume() {
        let t0 = Instant::now();
        let mut transport = Transport::new(10.0);

        transport.play_at(t0);
        assert_eq!(transport.state_at(t0), PlaybackState::Playing);

        transport.pause_at(t0 + Duration::from_secs(3));
        assert_eq!(transport.state_at(t0 + Duration::from_secs(5)), PlaybackState::Paused);
        assert!((transport.position_at(t0 + Duration::from_secs(5)) - 3.0).abs() < 1e-9);

        transport.toggle_at(t0 + Duration::from_secs(5));
        assert!((transport.position_at(t0 + Duration::from_secs(6)) - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_seek_clamps() {
        let now = Instant::now();
        let mut transport = Transport::new(8.0);

        transport.seek_at(20.0, now);
        assert_eq!(transport.position_at(now), 8.0);
        transport.seek_at(-1.0, now);
        assert_eq!(transport.position_at(now), 0.0);
        transport.seek_at(2.5, now);
        assert_eq!(transport.position_at(now), 2.5);
        assert_eq!(transport.state_at(now), PlaybackState::Stopped);
    }

    #[test]
    fn test_stop_rewinds() {
        let t0 = Instant::now();
        let mut transport = Transport::new(10.0);
        transport.play_at(t0);
        transport.position_at(t0 + Duration::from_secs(4));

        transport.stop();
        assert_eq!(transport.state_at(t0 + Duration::from_secs(5)), PlaybackState::Stopped);
        assert_eq!(transport.position_at(t0 + Duration::from_secs(5)), 0.0);
    }

    #[test]
    fn test_reaching_end_finishes() {
        let t0 = Instant::now();
        let mut transport = Transport::new(2.0);
        transport.seek_at(1.5, t0);
        transport.play_at(t0);

        let later = t0 + Duration::from_secs(1);
        assert_eq!(transport.state_at(later), PlaybackState::Stopped);
        assert_eq!(transport.position_at(later), 0.0);
    }

    #[test]
    fn test_empty_track_does_not_play() {
        let mut transport = Transport::default();
        transport.play();
        assert_eq!(transport.state(), PlaybackState::Stopped);
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(9.99), "0:09");
        assert_eq!(format_time(65.0), "1:05");
        assert_eq!(format_time(3600.0), "60:00");
        assert_eq!(format_time(f64::NAN), "0:00");
        assert_eq!(format_time(-4.0), "0:00");
    }
}
