//! Doctor command - verify configuration and storage.

use crate::audio::PLAYBACK_ENABLED;
use crate::cli::Output;
use crate::config::{GeminiSettings, Settings};
use crate::dashboard::FileKeyValueStore;
use crate::dashboard::TileRecord;
use console::style;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub fn run_doctor(settings: &Settings) -> anyhow::Result<()> {
    Output::header("Voxdeck Doctor");
    println!();
    println!("Checking configuration and storage...\n");

    let mut checks = Vec::new();

    // Check API key
    println!("{}", style("Gemini").bold());
    let api_check = check_api_key(&settings.gemini);
    api_check.print();
    checks.push(api_check);
    Output::kv("Script model", &settings.gemini.script_model);
    Output::kv("Chat model", &settings.gemini.chat_model);
    Output::kv("Speech model", &settings.gemini.tts_model);

    println!();

    // Check directories
    println!("{}", style("Storage").bold());
    let storage_checks = check_storage(settings);
    for check in &storage_checks {
        check.print();
    }
    checks.extend(storage_checks);

    println!();

    // Check configuration
    println!("{}", style("Configuration").bold());
    let config_checks = vec![
        check_config_file(),
        check_prompts_dir(settings),
        check_playback(),
    ];
    for check in &config_checks {
        check.print();
    }
    checks.extend(config_checks);

    println!();

    // Summary
    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. Generation, speech and chat are unavailable until fixed.",
            errors
        ));
        std::process::exit(1);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! Voxdeck is ready to use.");
    }

    Ok(())
}

/// Report whether this build can drive a sound device.
fn check_playback() -> CheckResult {
    if PLAYBACK_ENABLED {
        CheckResult::ok("Playback", "default output device")
    } else {
        CheckResult::warning(
            "Playback",
            "silent build",
            "Rebuild with --features playback to hear previews and renders",
        )
    }
}

/// Check if the Gemini API key is configured.
fn check_api_key(gemini: &GeminiSettings) -> CheckResult {
    let name = gemini.api_key_env.as_str();
    let set_hint = format!("Set with: export {}='...'", name);

    match gemini.api_key() {
        Some(key) if key.chars().count() > 12 => {
            CheckResult::ok(name, &format!("configured ({})", mask_key(&key)))
        }
        Some(_) => CheckResult::warning(name, "set but looks too short", &set_hint),
        None => CheckResult::error(name, "not set", &set_hint),
    }
}

/// Show the first and last four characters of a key.
fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "****".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

/// Check the data directory and tile storage.
fn check_storage(settings: &Settings) -> Vec<CheckResult> {
    let mut results = Vec::new();

    let data_dir = settings.data_dir();
    if data_dir.exists() {
        results.push(CheckResult::ok(
            "Data directory",
            &format!("{}", data_dir.display()),
        ));
    } else {
        results.push(CheckResult::warning(
            "Data directory",
            &format!("{} (will be created)", data_dir.display()),
            "Directory will be created on first use",
        ));
    }

    let store = FileKeyValueStore::new(&data_dir);
    let tiles_path = match store.path_for(&settings.dashboard.storage_key) {
        Ok(path) => path,
        Err(e) => {
            results.push(CheckResult::error(
                "Tile storage",
                &e.to_string(),
                "Use a storage_key made of letters, digits, '-', '_' or '.'",
            ));
            return results;
        }
    };

    if !tiles_path.exists() {
        results.push(CheckResult::warning(
            "Tile storage",
            &format!("{} (not created yet)", tiles_path.display()),
            "Default tiles are used until the first change",
        ));
        return results;
    }

    let size = std::fs::metadata(&tiles_path)
        .map(|m| format_size(m.len()))
        .unwrap_or_else(|_| "unknown size".to_string());
    let parsed = std::fs::read_to_string(&tiles_path)
        .ok()
        .and_then(|raw| serde_json::from_str::<Vec<TileRecord>>(&raw).ok());

    match parsed {
        Some(tiles) => results.push(CheckResult::ok(
            "Tile storage",
            &format!("{} tiles ({}, {})", tiles.len(), tiles_path.display(), size),
        )),
        None => results.push(CheckResult::warning(
            "Tile storage",
            &format!("{} is unreadable", tiles_path.display()),
            "Default tiles are shown; the next change overwrites the file",
        )),
    }

    results
}

/// Check if config file exists.
fn check_config_file() -> CheckResult {
    let config_path = Settings::default_config_path();
    if config_path.exists() {
        CheckResult::ok("Config file", &format!("{}", config_path.display()))
    } else {
        CheckResult::warning(
            "Config file",
            "using defaults",
            "Create with: voxdeck init (or voxdeck config edit)",
        )
    }
}

/// Check the custom prompt directory, if one is configured.
fn check_prompts_dir(settings: &Settings) -> CheckResult {
    match &settings.prompts.custom_dir {
        None => CheckResult::ok("Prompts", "built-in"),
        Some(dir) => {
            let path = Settings::expand_path(dir);
            if path.is_dir() {
                CheckResult::ok("Prompts", &format!("custom ({})", path.display()))
            } else {
                CheckResult::warning(
                    "Prompts",
                    &format!("{} does not exist", path.display()),
                    "Built-in prompts are used instead",
                )
            }
        }
    }
}

/// Format file size in human-readable format.
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
