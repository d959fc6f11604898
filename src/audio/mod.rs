//! Audio handling for synthesized speech.
//!
//! The speech model returns raw 16-bit little-endian mono PCM at 24 kHz. This
//! module decodes it for the speaker and packages it into a WAV container
//! for export.

#[cfg(feature = "playback")]
mod device;
mod pcm;
mod playback;
mod wav;

#[cfg(feature = "playback")]
pub use device::CpalOutput;
pub use pcm::{decode_pcm16, encode_pcm16};
#[cfg(test)]
pub(crate) use playback::recording::RecordingOutput;
pub use playback::{default_output, AudioOutput, Playback, SilentOutput, PLAYBACK_ENABLED};
pub use wav::{encode_wav, WAV_HEADER_LEN};

use crate::error::Result;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// Sample rate of PCM returned by the speech model.
pub const DEFAULT_SAMPLE_RATE: u32 = 24_000;

/// Raw PCM produced by one synthesis call.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioArtifact {
    pcm: Vec<u8>,
    sample_rate: u32,
}

impl AudioArtifact {
    /// Wrap raw PCM bytes.
    pub fn new(pcm: Vec<u8>, sample_rate: u32) -> Self {
        Self { pcm, sample_rate }
    }

    pub fn pcm(&self) -> &[u8] {
        &self.pcm
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of mono samples.
    pub fn sample_count(&self) -> usize {
        self.pcm.len() / 2
    }

    /// Playback length in seconds.
    pub fn duration_seconds(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.sample_count() as f64 / self.sample_rate as f64
    }

    /// Normalized samples.
    pub fn samples(&self) -> Vec<f32> {
        decode_pcm16(&self.pcm)
    }

    /// WAV container bytes.
    pub fn to_wav(&self) -> Vec<u8> {
        encode_wav(&self.pcm, self.sample_rate)
    }

    /// Write the artifact as a WAV file.
    pub fn write_wav(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, self.to_wav())?;
        debug!("Wrote {} bytes of audio to {}", self.pcm.len(), path.display());
        Ok(())
    }
}

/// A WAV file materialized for a player.
///
/// The file lives as long as the handle; dropping the handle releases it.
#[derive(Debug)]
pub struct AudioHandle {
    file: NamedTempFile,
    duration_seconds: f64,
}

impl AudioHandle {
    /// Encode the artifact into a temporary WAV file.
    pub fn create(artifact: &AudioArtifact) -> Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix("voxdeck-")
            .suffix(".wav")
            .tempfile()?;
        file.write_all(&artifact.to_wav())?;
        file.flush()?;

        Ok(Self {
            file,
            duration_seconds: artifact.duration_seconds(),
        })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn duration_seconds(&self) -> f64 {
        self.duration_seconds
    }

    /// Copy the WAV file to a permanent location.
    pub fn save_to(&self, dest: &Path) -> Result<()> {
        std::fs::copy(self.file.path(), dest)?;
        Ok(())
    }
}
