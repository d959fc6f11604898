//! Speaker output through the default cpal device.
//!
//! Speech PCM is mono at 24 kHz. It is resampled to the device rate and
//! copied to every device channel.

use super::playback::{AudioOutput, Playback};
use crate::error::{Result, VoxError};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, FromSample, SampleFormat, SizedSample, Stream, StreamConfig};
use rubato::{FftFixedIn, Resampler};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, error};

const RESAMPLE_CHUNK: usize = 1024;

/// The system's default output device.
#[derive(Debug, Default, Clone, Copy)]
pub struct CpalOutput;

struct CpalPlayback {
    _stream: Stream,
    finished: Arc<AtomicBool>,
}

impl Playback for CpalPlayback {
    fn is_finished(&self) -> bool {
        self.finished.load(Ordering::SeqCst)
    }
}

impl AudioOutput for CpalOutput {
    fn start(&self, samples: &[f32], sample_rate: u32) -> Result<Box<dyn Playback>> {
        let device = cpal::default_host()
            .default_output_device()
            .ok_or_else(|| VoxError::Playback("No output device available".to_string()))?;
        let supported = device
            .default_output_config()
            .map_err(|e| VoxError::Playback(format!("No usable output config: {}", e)))?;

        let native_rate = supported.sample_rate().0;
        let channels = supported.channels() as usize;
        let format = supported.sample_format();
        let config: StreamConfig = supported.into();
        debug!("Playing {} samples on a {} Hz, {} channel device", samples.len(), native_rate, channels);

        let mono = resample(samples, sample_rate, native_rate)?;
        let frames = Arc::new(spread_channels(&mono, channels));
        let finished = Arc::new(AtomicBool::new(false));

        let stream = match format {
            SampleFormat::F32 => build_stream::<f32>(&device, &config, frames, finished.clone())?,
            SampleFormat::I16 => build_stream::<i16>(&device, &config, frames, finished.clone())?,
            other => {
                return Err(VoxError::Playback(format!("Unsupported sample format: {:?}", other)))
            }
        };
        stream
            .play()
            .map_err(|e| VoxError::Playback(format!("Failed to start stream: {}", e)))?;

        Ok(Box::new(CpalPlayback {
            _stream: stream,
            finished,
        }))
    }
}

fn build_stream<T>(
    device: &Device,
    config: &StreamConfig,
    samples: Arc<Vec<f32>>,
    finished: Arc<AtomicBool>,
) -> Result<Stream>
where
    T: SizedSample + FromSample<f32> + Default + Send + 'static,
{
    let position = AtomicUsize::new(0);
    device
        .build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                let pos = position.load(Ordering::SeqCst);
                let remaining = samples.len().saturating_sub(pos);
                if remaining == 0 {
                    data.fill(T::default());
                    finished.store(true, Ordering::SeqCst);
                    return;
                }

                let n = remaining.min(data.len());
                for (out, &sample) in data.iter_mut().zip(&samples[pos..pos + n]) {
                    *out = T::from_sample(sample);
                }
                data[n..].fill(T::default());
                position.store(pos + n, Ordering::SeqCst);
            },
            |err| error!("Playback stream error: {}", err),
            None,
        )
        .map_err(|e| VoxError::Playback(format!("Failed to open stream: {}", e)))
}

fn resample(samples: &[f32], from: u32, to: u32) -> Result<Vec<f32>> {
    if from == to || samples.is_empty() {
        return Ok(samples.to_vec());
    }

    let mut resampler = FftFixedIn::<f32>::new(from as usize, to as usize, RESAMPLE_CHUNK, 2, 1)
        .map_err(|e| VoxError::Playback(format!("Failed to create resampler: {:?}", e)))?;

    let mut output = Vec::with_capacity(samples.len() * to as usize / from as usize + RESAMPLE_CHUNK);
    let mut pos = 0;
    while pos < samples.len() {
        let needed = resampler.input_frames_next();
        let end = (pos + needed).min(samples.len());
        let mut chunk = samples[pos..end].to_vec();
        chunk.resize(needed, 0.0);

        let input = vec![chunk];
        let resampled = resampler
            .process(&input, None)
            .map_err(|e| VoxError::Playback(format!("Resampling failed: {:?}", e)))?;
        if let Some(channel) = resampled.into_iter().next() {
            output.extend(channel);
        }
        pos = end;
    }
    Ok(output)
}

/// Interleave a mono signal across `channels`.
fn spread_channels(mono: &[f32], channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return mono.to_vec();
    }
    mono.iter()
        .flat_map(|&s| std::iter::repeat(s).take(channels))
        .collect()
}
