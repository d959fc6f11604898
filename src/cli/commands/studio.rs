//! Studio command - interactive editing, rendering and playback.

use super::assist::{print_message, print_suggestions, send};
use super::script::show;
use super::{connect, line_index, read_result, write_result};
use crate::assistant::ProjectContext;
use crate::audio::PLAYBACK_ENABLED;
use crate::cli::Output;
use crate::config::Settings;
use crate::error::Result as VoxResult;
use crate::studio::{format_time, OperationState, PlaybackState, Studio, SynthesisJob};
use anyhow::Result;
use console::style;
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;

const HELP: &str = "\
show                    print the script
text <n> <text>         replace the text of line n
speaker <n> <name>      reassign line n
rm <n>                  delete line n
add                     append an empty line
preview                 voice the first lines (again to stop)
render                  produce the full episode
play | pause | stop     control full-episode playback
seek <m:ss|seconds>     jump within the full episode
status                  show audio and request state
save <file.wav>         copy the full episode
export [file.json]      write the edited result
write                   save edits back to the opened file
ask <message>           talk to the producer (suggest: list ideas)
exit                    leave the studio";

#[derive(Debug, Clone, PartialEq)]
enum StudioCommand {
    Show,
    Text(usize, String),
    Speaker(usize, String),
    Remove(usize),
    Add,
    Preview,
    Render,
    Play,
    Pause,
    Stop,
    Seek(f64),
    Status,
    Save(String),
    Export(Option<String>),
    Write,
    Ask(String),
    Suggest,
    Help,
    Exit,
}

#[derive(Debug, Clone, Copy)]
enum JobKind {
    Preview,
    Render,
}

type Finished = (JobKind, SynthesisJob, VoxResult<Vec<u8>>);

/// Run the studio REPL over the result in `file`.
pub async fn run_studio(file: &str, settings: Settings) -> Result<()> {
    let path = PathBuf::from(file);
    let result = read_result(&path)?;
    let orchestrator = connect(settings)?;

    let mut studio = orchestrator.studio(result);
    let mut assistant =
        orchestrator.assistant_session(ProjectContext::Result(studio.editor().snapshot()));
    let mut pending: JoinSet<Finished> = JoinSet::new();
    let mut dirty = false;
    let mut exit_armed = false;

    println!("\n{}", style(format!("Studio: {}", studio.result().title)).bold().cyan());
    println!("{}\n", style("Type 'help' for commands.").dim());
    if !PLAYBACK_ENABLED {
        Output::warning("Built without the 'playback' feature: the transport keeps time silently. Use 'save' to listen.");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("{} ", style("studio>").green().bold());
        std::io::stdout().flush()?;

        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let command = match parse_command(line) {
                    Ok(command) => command,
                    Err(msg) => {
                        Output::warning(&msg);
                        continue;
                    }
                };

                if command == StudioCommand::Exit {
                    if dirty && !exit_armed {
                        Output::warning("Unsaved edits. Use 'write' to keep them, or 'exit' again to discard.");
                        exit_armed = true;
                        continue;
                    }
                    break;
                }
                exit_armed = false;

                match command {
                    StudioCommand::Ask(message) => {
                        assistant.set_context(ProjectContext::Result(studio.editor().snapshot()));
                        match send(&mut assistant, &message).await {
                            Ok(Some(reply)) => print_message(reply),
                            Ok(None) => {}
                            Err(e) => Output::error(&e.to_string()),
                        }
                    }
                    StudioCommand::Suggest => print_suggestions(assistant.suggestions()),
                    command => {
                        let writes = command == StudioCommand::Write;
                        match execute(&mut studio, &path, command, &mut pending) {
                            Ok(_) if writes => dirty = false,
                            Ok(edited) => dirty |= edited,
                            Err(e) => Output::error(&e.to_string()),
                        }
                    }
                }
            }

            Some(finished) = pending.join_next(), if !pending.is_empty() => {
                let (kind, job, outcome) = finished?;
                println!();
                apply(&mut studio, kind, job, outcome);
            }
        }
    }

    pending.abort_all();
    Output::info("Studio closed.");
    Ok(())
}

/// Run one command. Returns whether the script was edited.
fn execute(
    studio: &mut Studio,
    path: &Path,
    command: StudioCommand,
    pending: &mut JoinSet<Finished>,
) -> Result<bool> {
    let had_audio = studio.full_audio().is_some();
    let edited = match command {
        StudioCommand::Show => {
            show(studio.editor());
            false
        }
        StudioCommand::Text(line, text) => {
            studio.update_text(line_index(line)?, &text)?;
            true
        }
        StudioCommand::Speaker(line, speaker) => {
            studio.update_speaker(line_index(line)?, &speaker)?;
            true
        }
        StudioCommand::Remove(line) => {
            let removed = studio.remove_line(line_index(line)?)?;
            Output::info(&format!("Removed {}: {}", removed.speaker, removed.text));
            true
        }
        StudioCommand::Add => {
            let index = studio.append_line()?;
            Output::info(&format!("Added line {}", index + 1));
            true
        }
        StudioCommand::Preview => {
            if studio.preview_transport().state() == PlaybackState::Playing {
                studio.stop_preview();
                Output::info("Preview stopped.");
            } else {
                let job = studio.begin_preview()?;
                Output::info("Synthesizing preview...");
                spawn(pending, JobKind::Preview, job);
            }
            false
        }
        StudioCommand::Render => {
            let job = studio.begin_render()?;
            Output::info("Mastering full audio...");
            spawn(pending, JobKind::Render, job);
            false
        }
        StudioCommand::Play | StudioCommand::Pause | StudioCommand::Stop | StudioCommand::Seek(_) => {
            if studio.full_audio().is_none() {
                Output::warning("No full audio yet. Run 'render' first.");
                return Ok(false);
            }
            let transport = studio.transport();
            match command {
                StudioCommand::Play => transport.play(),
                StudioCommand::Pause => transport.pause(),
                StudioCommand::Stop => transport.stop(),
                StudioCommand::Seek(seconds) => transport.seek(seconds),
                _ => {}
            }
            print_transport(studio);
            false
        }
        StudioCommand::Status => {
            print_status(studio);
            false
        }
        StudioCommand::Save(dest) => {
            studio.save_full_audio(Path::new(&dest))?;
            Output::success(&format!("Saved {}", dest));
            false
        }
        StudioCommand::Export(dest) => {
            let dest = dest.unwrap_or_else(|| studio.editor().export_file_name());
            std::fs::write(&dest, studio.editor().export_json()?)?;
            Output::success(&format!("Exported to {}", dest));
            false
        }
        StudioCommand::Write => {
            write_result(path, &studio.editor().snapshot())?;
            Output::success(&format!("Saved {}", path.display()));
            return Ok(false);
        }
        StudioCommand::Help => {
            println!("{}", HELP);
            false
        }
        StudioCommand::Ask(_) | StudioCommand::Suggest | StudioCommand::Exit => false,
    };

    if edited && had_audio {
        Output::info("Script changed, full audio discarded.");
    }
    Ok(edited)
}

fn spawn(pending: &mut JoinSet<Finished>, kind: JobKind, job: SynthesisJob) {
    pending.spawn(async move {
        let outcome = job.run().await;
        (kind, job, outcome)
    });
}

/// Hand a finished job back to the studio.
fn apply(studio: &mut Studio, kind: JobKind, job: SynthesisJob, outcome: VoxResult<Vec<u8>>) {
    let applied = match kind {
        JobKind::Preview => studio.finish_preview(job, outcome),
        JobKind::Render => studio.finish_render(job, outcome),
    };

    match (kind, applied) {
        (_, Ok(false)) => {}
        (JobKind::Preview, Ok(true)) => {
            if let Some(handle) = studio.preview_audio() {
                Output::success(&format!(
                    "Preview ready ({}): {}",
                    format_time(handle.duration_seconds()),
                    handle.path().display()
                ));
            }
        }
        (JobKind::Render, Ok(true)) => {
            if let Some(handle) = studio.full_audio() {
                Output::success(&format!(
                    "Full audio ready ({}): {}",
                    format_time(handle.duration_seconds()),
                    handle.path().display()
                ));
            }
        }
        (_, Err(e)) => Output::error(&e.to_string()),
    }
}

fn print_transport(studio: &mut Studio) {
    let transport = studio.transport();
    let state = transport.state();
    let position = transport.position();
    println!(
        "  {} {} / {}",
        style(state).cyan(),
        format_time(position),
        format_time(transport.duration())
    );
}

fn print_status(studio: &mut Studio) {
    let describe = |state: &OperationState| match (state.is_loading(), state.error()) {
        (true, _) => "working".to_string(),
        (false, Some(e)) => format!("failed: {}", e),
        (false, None) => "idle".to_string(),
    };

    Output::kv("Lines", &studio.script().len().to_string());
    Output::kv("Preview", &describe(studio.preview_state()));
    Output::kv("Full render", &describe(studio.render_state()));

    match studio.full_audio().map(|h| h.path().display().to_string()) {
        Some(path) => {
            Output::kv("Full audio", &path);
            print_transport(studio);
        }
        None => Output::kv("Full audio", "none"),
    }
}

fn parse_command(line: &str) -> std::result::Result<StudioCommand, String> {
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let number = |s: &str| -> std::result::Result<usize, String> {
        s.parse::<usize>()
            .map_err(|_| format!("'{}' is not a line number", s))
    };
    let numbered = |rest: &str| -> std::result::Result<(usize, String), String> {
        let (n, value) = rest
            .split_once(char::is_whitespace)
            .ok_or_else(|| format!("Usage: {} <n> <value>", verb))?;
        Ok((number(n)?, value.trim().to_string()))
    };

    let command = match verb.to_lowercase().as_str() {
        "show" | "ls" => StudioCommand::Show,
        "text" => {
            let (n, text) = numbered(rest)?;
            StudioCommand::Text(n, text)
        }
        "speaker" => {
            let (n, speaker) = numbered(rest)?;
            StudioCommand::Speaker(n, speaker)
        }
        "rm" | "remove" => StudioCommand::Remove(number(rest)?),
        "add" | "append" => StudioCommand::Add,
        "preview" => StudioCommand::Preview,
        "render" => StudioCommand::Render,
        "play" => StudioCommand::Play,
        "pause" => StudioCommand::Pause,
        "stop" => StudioCommand::Stop,
        "seek" => StudioCommand::Seek(parse_time(rest)?),
        "status" => StudioCommand::Status,
        "save" if !rest.is_empty() => StudioCommand::Save(rest.to_string()),
        "save" => return Err("Usage: save <file.wav>".to_string()),
        "export" => StudioCommand::Export((!rest.is_empty()).then(|| rest.to_string())),
        "write" => StudioCommand::Write,
        "ask" if !rest.is_empty() => StudioCommand::Ask(rest.to_string()),
        "ask" | "suggest" => StudioCommand::Suggest,
        "help" | "?" => StudioCommand::Help,
        "exit" | "quit" => StudioCommand::Exit,
        other => return Err(format!("Unknown command '{}'. Type 'help'.", other)),
    };
    Ok(command)
}

/// Parse `m:ss` or plain seconds.
fn parse_time(s: &str) -> std::result::Result<f64, String> {
    let invalid = || format!("'{}' is not a time (use m:ss or seconds)", s);
    match s.split_once(':') {
        Some((m, sec)) => {
            let m: u64 = m.parse().map_err(|_| invalid())?;
            let sec: f64 = sec.parse().map_err(|_| invalid())?;
            if !(0.0..60.0).contains(&sec) {
                return Err(invalid());
            }
            Ok(m as f64 * 60.0 + sec)
        }
        None => s.parse::<f64>().ok().filter(|v| v.is_finite()).ok_or_else(invalid),
    }
}
