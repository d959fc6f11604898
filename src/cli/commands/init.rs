//! Init command - interactive first-run setup.

use super::prompt_continue;
use crate::cli::Output;
use crate::config::Settings;
use console::style;

/// Run the init command for first-time setup.
pub fn run_init(settings: &Settings) -> anyhow::Result<()> {
    Output::header("Voxdeck Setup");
    println!();
    println!("Welcome to Voxdeck! Let's make sure everything is configured correctly.\n");

    // Step 1: Check API key
    println!("{}", style("Step 1: Checking API configuration").bold().cyan());
    println!();

    let key_env = &settings.gemini.api_key_env;
    if settings.gemini.api_key().is_none() {
        Output::warning(&format!("{} environment variable is not set.", key_env));
        println!();
        println!("  Voxdeck needs a Gemini API key for scripts, speech and the assistant.");
        println!(
            "  Get your API key from: {}",
            style("https://aistudio.google.com/apikey").underlined()
        );
        println!();
        println!("  Set it in your shell configuration (~/.bashrc, ~/.zshrc, etc.):");
        println!("  {}", style(format!("export {}='...'", key_env)).green());
        println!();
        println!("  The launcher tiles work without a key.");
        println!();

        if !prompt_continue("Continue without API key?")? {
            println!();
            Output::info("Setup cancelled. Set your API key and run 'voxdeck init' again.");
            return Ok(());
        }
    } else {
        Output::success("Gemini API key is configured!");
    }

    println!();

    // Step 2: Create directories
    println!("{}", style("Step 2: Setting up directories").bold().cyan());
    println!();

    let data_dir = settings.data_dir();
    if !data_dir.exists() {
        std::fs::create_dir_all(&data_dir)?;
        Output::success(&format!("Created data directory: {}", data_dir.display()));
    } else {
        Output::info(&format!("Data directory exists: {}", data_dir.display()));
    }

    println!();

    // Step 3: Create config file
    println!("{}", style("Step 3: Configuration file").bold().cyan());
    println!();

    let config_path = Settings::default_config_path();
    if config_path.exists() {
        Output::info(&format!("Config file exists: {}", config_path.display()));
    } else if prompt_continue("Create default configuration file?")? {
        settings.save_to(&config_path)?;
        Output::success(&format!("Created config file: {}", config_path.display()));
        println!();
        println!("  Edit your config with: {}", style("voxdeck config edit").green());
    } else {
        Output::info("Skipped config file creation. Using defaults.");
    }

    println!();

    // Summary
    println!("{}", style("Setup Complete!").bold().green());
    println!();
    println!("Next steps:");
    println!("  {} Check system status", style("voxdeck doctor").cyan());
    println!("  {} See your launcher", style("voxdeck tiles list").cyan());
    println!(
        "  {} Write your first episode",
        style("voxdeck generate --text \"<notes>\"").cyan()
    );
    println!();
    println!("For more help: {}", style("voxdeck --help").cyan());

    Ok(())
}
