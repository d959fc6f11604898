//! 16-bit little-endian PCM conversion.

/// Scale between i16 samples and normalized floats.
const PCM_SCALE: f32 = 32768.0;

/// Decode mono 16-bit little-endian PCM into samples in [-1, 1].
///
/// A trailing odd byte cannot form a sample and is ignored.
pub fn decode_pcm16(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]) as f32 / PCM_SCALE)
        .collect()
}

/// Encode normalized samples as mono 16-bit little-endian PCM.
///
/// Samples are clamped to [-1, 1] and rounded to the nearest step; 1.0 saturates
/// at `i16::MAX`.
pub fn encode_pcm16(samples: &[f32]) -> Vec<u8> {
    let mut out = Vec::with_capacity(samples.len() * 2);
    for &sample in samples {
        let scaled = (sample.clamp(-1.0, 1.0) * PCM_SCALE).round();
        let value = scaled.clamp(i16::MIN as f32, i16::MAX as f32) as i16;
        out.extend_from_slice(&value.to_le_bytes());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_known_samples() {
        // 0, i16::MIN, i16::MAX, 16384
        let bytes = [0x00, 0x00, 0x00, 0x80, 0xff, 0x7f, 0x00, 0x40];
        let samples = decode_pcm16(&bytes);

        assert_eq!(samples.len(), 4);
        assert_eq!(samples[0], 0.0);
        assert_eq!(samples[1], -1.0);
        assert!((samples[2] - 32767.0 / 32768.0).abs() < f32::EPSILON);
        assert_eq!(samples[3], 0.5);
    }

    #[test]
    fn test_decode_ignores_trailing_byte() {
        let samples = decode_pcm16(&[0x00, 0x40, 0x7f]);
        assert_eq!(samples, vec![0.5]);
    }

    #[test]
    fn test_round_trip_within_one_step() {
        let original = [0.0f32, 0.25, -0.25, 0.5, -0.5, 0.999, -1.0, 1.0, 0.123_456, -0.654_321];
        let decoded = decode_pcm16(&encode_pcm16(&original));

        assert_eq!(decoded.len(), original.len());
        for (a, b) in original.iter().zip(decoded.iter()) {
            assert!((a - b).abs() <= 1.0 / 32768.0, "{} vs {}", a, b);
        }
    }

    #[test]
    fn test_encode_clamps_out_of_range() {
        let bytes = encode_pcm16(&[2.0, -3.0]);
        assert_eq!(i16::from_le_bytes([bytes[0], bytes[1]]), i16::MAX);
        assert_eq!(i16::from_le_bytes([bytes[2], bytes[3]]), i16::MIN);
    }
}
