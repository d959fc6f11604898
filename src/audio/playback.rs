//! Sound output for the studio transports.
//!
//! An [`AudioOutput`] starts a stream over decoded samples and hands back a
//! [`Playback`]. Dropping the playback stops the sound.

use crate::error::Result;

/// Whether this build can drive a sound device.
pub const PLAYBACK_ENABLED: bool = cfg!(feature = "playback");

/// Something that can make decoded mono samples audible.
pub trait AudioOutput: Send + Sync {
    /// Start playing `samples` (mono, normalized) recorded at `sample_rate`.
    fn start(&self, samples: &[f32], sample_rate: u32) -> Result<Box<dyn Playback>>;
}

/// A live stream. Playback stops when this is dropped.
pub trait Playback {
    fn is_finished(&self) -> bool;
}

/// Output that produces no sound. Transports still keep time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentOutput;

struct SilentPlayback;

impl Playback for SilentPlayback {
    fn is_finished(&self) -> bool {
        false
    }
}

impl AudioOutput for SilentOutput {
    fn start(&self, _samples: &[f32], _sample_rate: u32) -> Result<Box<dyn Playback>> {
        Ok(Box::new(SilentPlayback))
    }
}

/// The speaker when built with the `playback` feature, otherwise silence.
pub fn default_output() -> std::sync::Arc<dyn AudioOutput> {
    #[cfg(feature = "playback")]
    {
        std::sync::Arc::new(super::device::CpalOutput)
    }
    #[cfg(not(feature = "playback"))]
    {
        std::sync::Arc::new(SilentOutput)
    }
}
