//! Script command - inspect and edit a result file in place.

use super::{line_index, read_result, write_result};
use crate::cli::{Output, ScriptAction};
use crate::studio::ScriptEditor;
use anyhow::Result;
use console::style;
use std::path::{Path, PathBuf};

/// Run a script subcommand against `file`.
pub fn run_script(file: &str, action: &ScriptAction) -> Result<()> {
    let path = Path::new(file);
    let mut editor = ScriptEditor::new(read_result(path)?);

    match action {
        ScriptAction::Show => {
            show(&editor);
            return Ok(());
        }
        ScriptAction::SetText { line, text } => {
            editor.update_text(line_index(*line)?, text)?;
            Output::success(&format!("Line {} updated", line));
        }
        ScriptAction::SetSpeaker { line, speaker } => {
            editor.update_speaker(line_index(*line)?, speaker)?;
            Output::success(&format!("Line {} is now spoken by {}", line, speaker));
        }
        ScriptAction::Remove { line } => {
            let removed = editor.remove_line(line_index(*line)?)?;
            Output::success(&format!("Removed {}: {}", removed.speaker, removed.text));
        }
        ScriptAction::Append => {
            let index = editor.append_line()?;
            Output::success(&format!(
                "Appended line {} for {}. Fill it in with 'script set-text'.",
                index + 1,
                editor.script()[index].speaker
            ));
        }
        ScriptAction::Export { output } => {
            let dest = output
                .clone()
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(editor.export_file_name()));
            std::fs::write(&dest, editor.export_json()?)?;
            Output::success(&format!("Exported to {}", dest.display()));
            return Ok(());
        }
    }

    write_result(path, &editor.snapshot())?;
    Ok(())
}

/// Print the episode and its numbered script.
pub(super) fn show(editor: &ScriptEditor) {
    let result = editor.result();
    Output::header(&result.title);
    println!();
    println!("{}", result.description);
    println!();

    for (speaker, voice) in &result.voice_mapping {
        let pitch = result.voice_pitch_mapping.get(speaker).copied().unwrap_or(0.0);
        Output::kv(speaker, &format!("{} (pitch {:+.1})", voice, pitch));
    }
    println!();

    for (i, line) in editor.script().iter().enumerate() {
        Output::script_line(i + 1, line);
    }

    if !result.youtube_description.is_empty() {
        println!();
        println!("{}", style("Platform description").bold());
        println!("{}", style(&result.youtube_description).dim());
    }
}
