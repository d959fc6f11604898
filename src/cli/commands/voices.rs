//! Voices command - browse and audition host voices.

use super::connect;
use crate::audio::AudioArtifact;
use crate::cli::{Output, VoicesAction};
use crate::config::Settings;
use crate::podcast::{profile, Gender, VOICE_PROFILES};
use anyhow::Result;
use std::path::Path;

/// Run a voices subcommand.
pub async fn run_voices(action: &VoicesAction, settings: Settings) -> Result<()> {
    match action {
        VoicesAction::List => {
            for (heading, gender) in [("Female voices", Gender::Female), ("Male voices", Gender::Male)] {
                Output::header(heading);
                println!();
                for voice in VOICE_PROFILES.iter().filter(|p| p.gender == gender) {
                    Output::voice(voice);
                }
            }
            println!();
            Output::info("Audition one with 'voxdeck voices preview <voice>'.");
        }

        VoicesAction::Preview { voice, output } => {
            let sample_rate = settings.audio.sample_rate;
            let orchestrator = connect(settings)?;
            let p = profile(*voice);

            let spinner = Output::spinner(&format!("{} {} is warming up...", p.emoji, p.label));
            let pcm = orchestrator.synthesizer().voice_preview(*voice).await;
            spinner.finish_and_clear();

            let artifact = AudioArtifact::new(pcm?, sample_rate);
            let path = output
                .clone()
                .unwrap_or_else(|| format!("{}_preview.wav", voice.name().to_lowercase()));
            artifact.write_wav(Path::new(&path))?;

            Output::success(&format!(
                "{} ({:.1}s) saved to {}",
                p.label,
                artifact.duration_seconds(),
                path
            ));
        }
    }

    Ok(())
}
