//! Generate command - turn source material into a podcast script.

use super::{connect, write_result};
use crate::cli::{GenerateArgs, Output};
use crate::config::Settings;
use crate::podcast::{format_duration_label, HostCount, PodcastConfig, PodcastResult};
use crate::studio::ScriptEditor;
use anyhow::{Context, Result};
use console::style;
use std::path::PathBuf;
use tracing::debug;

/// Run the generate command.
pub async fn run_generate(args: &GenerateArgs, settings: Settings) -> Result<()> {
    let config = build_config(args, &settings)?;
    let orchestrator = connect(settings)?;

    debug!("Podcast config: {:?}", config);
    Output::info(&format!(
        "{} host(s), {}, {} / {}",
        config.host_count,
        format_duration_label(config.duration_minutes),
        config.modality,
        config.tone
    ));
    if config.has_urls() {
        Output::info("Source URLs given, search grounding is on.");
    }

    let spinner = Output::spinner("Writing your episode...");
    let result = orchestrator.podcast_generator().generate(&config).await;
    spinner.finish_and_clear();

    let result = match result {
        Ok(result) => result,
        Err(e) => {
            Output::error(&format!("Generation failed: {}", e));
            return Err(e.into());
        }
    };

    print_summary(&result);

    let path = args
        .output
        .clone()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(ScriptEditor::new(result.clone()).export_file_name()));
    write_result(&path, &result)?;

    println!();
    Output::success(&format!("Saved to {}", path.display()));
    println!(
        "  Open it with: {}",
        style(format!("voxdeck studio {}", path.display())).cyan()
    );

    Ok(())
}

/// Apply command-line flags over the configured form defaults.
fn build_config(args: &GenerateArgs, settings: &Settings) -> Result<PodcastConfig> {
    let defaults = &settings.podcast;
    let mut form = crate::orchestrator::podcast_form(settings);

    let mut source_text = args.text.clone().unwrap_or_default();
    if let Some(file) = &args.file {
        let contents = std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read source file {}", file))?;
        if !source_text.trim().is_empty() {
            source_text.push_str("\n\n");
        }
        source_text.push_str(&contents);
    }
    form = form.source_text(source_text).source_urls(args.urls.iter());

    if let Some(hosts) = args.hosts {
        form = form.host_count(HostCount::try_from(hosts)?);
    }
    if let Some(minutes) = args.duration {
        form = form.duration_minutes(minutes);
    }
    if let Some(modality) = args.modality {
        form = form.modality(modality);
    }
    if let Some(tone) = args.tone {
        form = form.tone(tone);
    }

    form = form.host1(
        args.host1_name.as_deref().unwrap_or(&defaults.host1_name),
        args.host1_voice.unwrap_or(defaults.host1_voice),
        args.host1_pitch.unwrap_or(0.0),
    );
    form = form.host2(
        args.host2_name.as_deref().unwrap_or(&defaults.host2_name),
        args.host2_voice.unwrap_or(defaults.host2_voice),
        args.host2_pitch.unwrap_or(0.0),
    );

    Ok(form.build()?)
}

fn print_summary(result: &PodcastResult) {
    Output::header(&result.title);
    println!();
    println!("{}", result.description);
    println!();
    Output::kv("Lines", &result.script.len().to_string());
    Output::kv("Hosts", &result.speakers().join(", "));

    if !result.viral_clips.is_empty() {
        println!();
        println!("{}", style("Viral clips").bold());
        for clip in &result.viral_clips {
            Output::list_item(clip);
        }
    }

    if let Some(links) = result.grounding_links.as_ref().filter(|l| !l.is_empty()) {
        println!();
        println!("{}", style("Sources").bold());
        for link in links {
            Output::list_item(&format!("{} {}", link.title, style(&link.uri).dim()));
        }
    }
}
