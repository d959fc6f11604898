//! Speech synthesis for scripts and voice auditions.

mod pitch;
mod synthesizer;

pub use pitch::{pitch_instruction, PitchBucket, PITCH_THRESHOLD};
pub use synthesizer::{preview_text, full_text, SpeechSynthesizer, MAX_BOUND_SPEAKERS};
