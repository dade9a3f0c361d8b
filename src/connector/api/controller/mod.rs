pub mod ask_controller;
pub mod chat_controller;
pub mod serve_controller;

pub use ask_controller::AskController;
pub use chat_controller::ChatController;
pub use serve_controller::ServeController;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::domain::ChatTurn;

/// Spinner shown while a completion request is in flight.
fn thinking_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("Thinking...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Terminal rendering of one turn: the reasoning block (if any) then the answer.
fn format_turn(turn: &ChatTurn) -> String {
    let mut output = String::new();

    if let Some(err) = turn.error() {
        output.push_str(err);
        output.push_str("\n\n");
    }

    let reply = turn.reply();
    if let Some(reasoning) = reply.reasoning().filter(|_| reply.has_reasoning()) {
        output.push_str("Thinking:\n");
        let block: String = reasoning
            .lines()
            .map(|l| format!("   | {}", l))
            .collect::<Vec<_>>()
            .join("\n");
        output.push_str(&block);
        output.push_str("\n\n");
    }

    output.push_str(reply.answer());
    output
}
