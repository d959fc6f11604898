//! Pitch bias to vocal style instruction.
//!
//! The speech model takes no numeric pitch parameter, so a bias is expressed
//! as one of three coarse style instructions.

/// Biases strictly beyond this magnitude select a non-neutral bucket.
pub const PITCH_THRESHOLD: f32 = 0.4;

const DEEP_INSTRUCTION: &str = "Use a deep, resonant, and bassy vocal quality.";
const SHARP_INSTRUCTION: &str = "Use a sharp, bright, and high-pitched vocal quality.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PitchBucket {
    Deep,
    Neutral,
    Sharp,
}

impl PitchBucket {
    pub fn from_bias(bias: f32) -> Self {
        if bias < -PITCH_THRESHOLD {
            PitchBucket::Deep
        } else if bias > PITCH_THRESHOLD {
            PitchBucket::Sharp
        } else {
            PitchBucket::Neutral
        }
    }

    /// Style instruction for the bucket; empty for neutral.
    pub fn instruction(self) -> &'static str {
        match self {
            PitchBucket::Deep => DEEP_INSTRUCTION,
            PitchBucket::Neutral => "",
            PitchBucket::Sharp => SHARP_INSTRUCTION,
        }
    }
}

/// Style instruction for a bias value.
pub fn pitch_instruction(bias: f32) -> &'static str {
    PitchBucket::from_bias(bias).instruction()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_table() {
        let cases = [
            (-1.0, PitchBucket::Deep),
            (-0.5, PitchBucket::Deep),
            (-0.1, PitchBucket::Neutral),
            (0.0, PitchBucket::Neutral),
            (0.1, PitchBucket::Neutral),
            (0.5, PitchBucket::Sharp),
            (1.0, PitchBucket::Sharp),
        ];
        for (bias, expected) in cases {
            assert_eq!(PitchBucket::from_bias(bias), expected, "bias {}", bias);
        }
    }

    #[test]
    fn test_threshold_is_exclusive() {
        assert_eq!(PitchBucket::from_bias(-0.4), PitchBucket::Neutral);
        assert_eq!(PitchBucket::from_bias(0.4), PitchBucket::Neutral);
        assert_eq!(PitchBucket::from_bias(-0.41), PitchBucket::Deep);
        assert_eq!(PitchBucket::from_bias(0.41), PitchBucket::Sharp);
    }

    #[test]
    fn test_instruction_text() {
        assert_eq!(pitch_instruction(-0.9), "Use a deep, resonant, and bassy vocal quality.");
        assert_eq!(pitch_instruction(0.9), "Use a sharp, bright, and high-pitched vocal quality.");
        assert_eq!(pitch_instruction(0.0), "");
    }
}
