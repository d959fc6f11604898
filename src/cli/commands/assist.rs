//! Interactive chat with the producer assistant.

use super::{connect, read_result};
use crate::assistant::{AssistantSession, ChatMessage, ProjectContext};
use crate::cli::Output;
use crate::config::Settings;
use anyhow::Result;
use console::style;
use std::io::{self, BufRead, Write};
use std::path::Path;

/// Run the assist command.
pub async fn run_assist(
    result_path: Option<&str>,
    message: Option<&str>,
    settings: Settings,
) -> Result<()> {
    let context = match result_path {
        Some(path) => ProjectContext::Result(read_result(Path::new(path))?),
        None => ProjectContext::Empty,
    };
    let orchestrator = connect(settings)?;
    let mut session = orchestrator.assistant_session(context);

    if let Some(message) = message {
        if let Some(reply) = send(&mut session, message).await? {
            println!("{}", reply.content);
        }
        return Ok(());
    }

    println!("\n{}", style("Executive Producer").bold().cyan());
    println!(
        "{}\n",
        style("Type a message, a suggestion number, or 'exit' to quit.").dim()
    );
    if let Some(greeting) = session.transcript().first() {
        print_message(greeting);
    }
    print_suggestions(session.suggestions());

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{} ", style("You:").green().bold());
        stdout.flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            Output::info("Goodbye!");
            break;
        }

        let reply = match input.parse::<usize>() {
            Ok(n) if n >= 1 => {
                let spinner = Output::spinner("Thinking...");
                let reply = session.send_suggestion(n - 1).await;
                spinner.finish_and_clear();
                reply
            }
            _ => send(&mut session, input).await,
        };

        match reply {
            Ok(Some(reply)) => print_message(reply),
            Ok(None) => {}
            Err(e) => Output::error(&format!("{}", e)),
        }
    }

    Ok(())
}

/// Send one message with a spinner.
pub(super) async fn send<'a>(
    session: &'a mut AssistantSession,
    message: &str,
) -> crate::error::Result<Option<&'a ChatMessage>> {
    let spinner = Output::spinner("Thinking...");
    let reply = session.send(message).await;
    spinner.finish_and_clear();
    reply
}

pub(super) fn print_message(message: &ChatMessage) {
    println!(
        "\n{} {}\n",
        style(format!("{}:", message.role)).cyan().bold(),
        message.content
    );
}

pub(super) fn print_suggestions(suggestions: &[&str]) {
    for (i, suggestion) in suggestions.iter().enumerate() {
        println!("  {} {}", style(format!("[{}]", i + 1)).dim(), suggestion);
    }
    println!();
}
