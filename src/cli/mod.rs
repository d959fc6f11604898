//! CLI module for Voxdeck.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use crate::dashboard::{AccentColor, Icon};
use crate::podcast::{Modality, Tone, VoiceId};
use clap::{Parser, Subcommand};

/// Voxdeck - tile launcher and AI podcast studio
///
/// Keep a grid of launcher tiles, turn notes and links into two-host podcast
/// scripts, and render them to speech.
#[derive(Parser, Debug)]
#[command(name = "voxdeck")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize Voxdeck and verify the API key
    Init,

    /// Check configuration, API key and storage
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Manage launcher tiles
    Tiles {
        #[command(subcommand)]
        action: TilesAction,
    },

    /// Browse and audition host voices
    Voices {
        #[command(subcommand)]
        action: VoicesAction,
    },

    /// Generate a podcast script from notes and/or URLs
    Generate(GenerateArgs),

    /// Inspect and edit a generated script file
    Script {
        /// Path to a result JSON file
        file: String,

        #[command(subcommand)]
        action: ScriptAction,
    },

    /// Render speech for a generated script file
    Audio {
        #[command(subcommand)]
        action: AudioAction,
    },

    /// Chat with the executive producer assistant
    Assist {
        /// Result JSON to discuss (the assistant works without one)
        #[arg(short, long)]
        result: Option<String>,

        /// Send a single message and exit
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Open an interactive studio session for a generated script
    Studio {
        /// Path to a result JSON file
        file: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}

#[derive(Subcommand, Debug)]
pub enum TilesAction {
    /// Show the tile grid
    List,

    /// Add a tile
    Add {
        /// Tile title
        title: String,

        /// Short description
        description: String,

        /// Icon key (e.g. Cpu, Globe)
        #[arg(short, long)]
        icon: Option<Icon>,

        /// Accent color (e.g. cyan, amber)
        #[arg(long)]
        color: Option<AccentColor>,
    },

    /// Remove a tile by id
    Remove {
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show one tile by id or route
    Show { id: String },
}

#[derive(Subcommand, Debug)]
pub enum VoicesAction {
    /// List the voice catalogue
    List,

    /// Synthesize a short introduction in a voice
    Preview {
        voice: VoiceId,

        /// Save the audition as WAV
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[derive(clap::Args, Debug)]
pub struct GenerateArgs {
    /// Source notes as text
    #[arg(short, long)]
    pub text: Option<String>,

    /// Read source notes from a file
    #[arg(short, long)]
    pub file: Option<String>,

    /// Source URL (repeatable); enables search grounding
    #[arg(short, long = "url")]
    pub urls: Vec<String>,

    /// Number of hosts (1 or 2)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=2))]
    pub hosts: Option<u8>,

    /// Target duration in minutes (1-120)
    #[arg(short, long)]
    pub duration: Option<u32>,

    /// Conversation style (e.g. debate, friendly, banter)
    #[arg(short, long)]
    pub modality: Option<Modality>,

    /// Tone (calm, viral, thought-provoking, emotional, bold)
    #[arg(long)]
    pub tone: Option<Tone>,

    #[arg(long)]
    pub host1_name: Option<String>,

    #[arg(long)]
    pub host1_voice: Option<VoiceId>,

    /// Pitch bias from -1 (deep) to 1 (sharp)
    #[arg(long, allow_hyphen_values = true)]
    pub host1_pitch: Option<f32>,

    #[arg(long)]
    pub host2_name: Option<String>,

    #[arg(long)]
    pub host2_voice: Option<VoiceId>,

    /// Pitch bias from -1 (deep) to 1 (sharp)
    #[arg(long, allow_hyphen_values = true)]
    pub host2_pitch: Option<f32>,

    /// Where to write the result JSON (defaults to <title>_script.json)
    #[arg(short, long)]
    pub output: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum ScriptAction {
    /// Print the script and episode details
    Show,

    /// Replace the text of a line (1-based)
    SetText { line: usize, text: String },

    /// Reassign a line (1-based) to another host
    SetSpeaker { line: usize, speaker: String },

    /// Delete a line (1-based)
    Remove { line: usize },

    /// Append an empty line for the first host
    Append,

    /// Write the edited result as <title>_script.json
    Export {
        /// Output file (defaults to the generated file name)
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum AudioAction {
    /// Synthesize the first lines of a script
    Preview {
        /// Path to a result JSON file
        file: String,

        /// WAV output path
        #[arg(short, long, default_value = "preview.wav")]
        output: String,
    },

    /// Synthesize the whole script
    Render {
        /// Path to a result JSON file
        file: String,

        /// WAV output path
        #[arg(short, long, default_value = "episode.wav")]
        output: String,
    },
}
