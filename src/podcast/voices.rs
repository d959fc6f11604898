//! Voice catalogue shown when picking host voices.

use super::models::VoiceId;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Gender {
    Male,
    Female,
}

/// Presentation data for a prebuilt voice.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct VoiceProfile {
    pub id: VoiceId,
    pub label: &'static str,
    pub persona: &'static str,
    pub description: &'static str,
    pub emoji: &'static str,
    pub gender: Gender,
}

pub const VOICE_PROFILES: [VoiceProfile; 10] = [
    VoiceProfile { id: VoiceId::Kore, label: "Professional", persona: "The Newsroom", description: "Crisp, neutral, and polished.", emoji: "🎙️", gender: Gender::Female },
    VoiceProfile { id: VoiceId::Zephyr, label: "Warm", persona: "The Coffee Shop", description: "Approachable and friendly.", emoji: "☕", gender: Gender::Female },
    VoiceProfile { id: VoiceId::Aoede, label: "Academic", persona: "The Professor", description: "Measured and intellectual.", emoji: "📖", gender: Gender::Female },
    VoiceProfile { id: VoiceId::Autonoe, label: "Bright", persona: "The Influencer", description: "Upbeat and youthful.", emoji: "✨", gender: Gender::Female },
    VoiceProfile { id: VoiceId::Leda, label: "Authoritative", persona: "The Executive", description: "Steady and commanding.", emoji: "🏢", gender: Gender::Female },
    VoiceProfile { id: VoiceId::Puck, label: "Energetic", persona: "The Hype Man", description: "High-energy and fast-paced.", emoji: "⚡", gender: Gender::Male },
    VoiceProfile { id: VoiceId::Charon, label: "Deep", persona: "The Late Night", description: "Resonant and steady.", emoji: "🌑", gender: Gender::Male },
    VoiceProfile { id: VoiceId::Fenrir, label: "Bold", persona: "The Outdoorsman", description: "Rugged and earthy.", emoji: "🐺", gender: Gender::Male },
    VoiceProfile { id: VoiceId::Iapetus, label: "Expressive", persona: "The Narrator", description: "Dramatic and storytelling.", emoji: "🎭", gender: Gender::Male },
    VoiceProfile { id: VoiceId::Orus, label: "Melodic", persona: "The Philosopher", description: "Thoughtful and soothing.", emoji: "🎻", gender: Gender::Male },
];

/// Profile of a voice. Every [`VoiceId`] has exactly one.
pub fn profile(id: VoiceId) -> &'static VoiceProfile {
    VOICE_PROFILES
        .iter()
        .find(|p| p.id == id)
        .unwrap_or(&VOICE_PROFILES[0])
}
