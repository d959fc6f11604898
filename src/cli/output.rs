//! CLI output formatting utilities.

use crate::dashboard::TileRecord;
use crate::podcast::{ScriptLine, VoiceProfile};
use console::{style, Style};
use indicatif::{ProgressBar, ProgressStyle};

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print an info message.
    pub fn info(msg: &str) {
        println!("{} {}", style(">>").cyan().bold(), msg);
    }

    /// Print a success message.
    pub fn success(msg: &str) {
        println!("{} {}", style(">>").green().bold(), msg);
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    /// Print an error message.
    pub fn error(msg: &str) {
        eprintln!("{} {}", style(">>").red().bold(), msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a key-value pair.
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(msg: &str) {
        println!("  {} {}", style("*").cyan(), msg);
    }

    /// Print one tile as a grid card row.
    pub fn tile(tile: &TileRecord) {
        println!(
            "  {} {} {}",
            tile.color.paint(tile.icon.glyph()),
            style(&tile.title).bold(),
            style(format!("({})", tile.id)).dim()
        );
        println!("     {}", content_preview(&tile.description, 80));
    }

    /// Print a numbered script line.
    pub fn script_line(number: usize, line: &ScriptLine) {
        let timestamp = line
            .timestamp
            .as_deref()
            .filter(|t| !t.is_empty())
            .map(|t| format!(" [{}]", t))
            .unwrap_or_default();
        println!(
            "{:>4} {}{}",
            style(number).dim(),
            style(&line.speaker).cyan().bold(),
            style(timestamp).dim()
        );
        println!("     {}", line.text);
    }

    /// Print a voice catalogue entry.
    pub fn voice(profile: &VoiceProfile) {
        println!(
            "  {} {:<8} {} {}",
            profile.emoji,
            style(profile.id).bold(),
            style(format!("{} / {}", profile.label, profile.persona)).cyan(),
            style(profile.description).dim()
        );
    }

    /// Create a spinner.
    pub fn spinner(msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    /// Style for titles.
    pub fn title_style() -> Style {
        Style::new().bold()
    }

    /// Style for dim text.
    pub fn dim_style() -> Style {
        Style::new().dim()
    }
}

/// Truncate content with ellipsis.
pub fn content_preview(content: &str, max_chars: usize) -> String {
    let content = content.replace('\n', " ");
    if content.chars().count() <= max_chars {
        content
    } else {
        let cut: String = content.chars().take(max_chars).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_preview() {
        assert_eq!(content_preview("short", 10), "short");
        assert_eq!(content_preview("line\nbreak", 20), "line break");
        assert_eq!(content_preview("abcdefghij", 4), "abcd...");
        assert_eq!(content_preview("ééééé", 2), "éé...");
    }
}
