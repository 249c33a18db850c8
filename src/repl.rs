// src/repl.rs

use crate::chatbot::Dispatcher;
use crate::conversation::MessageLog;
use crate::errors::{RetailChatError, RetailChatResult};
use crate::models::{Message, Sender};
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io;
use std::sync::Arc;

const PROMPT: &str = "> ";

fn readline_error(e: ReadlineError) -> RetailChatError {
    RetailChatError::Io(io::Error::new(io::ErrorKind::Other, e))
}

/// Formats a bot message for a plain terminal.
pub fn format_reply(message: &Message) -> String {
    if message.text.starts_with("Error: ") {
        format!("{} {}", "bot:".bold(), message.text.red())
    } else {
        format!("{} {}", "bot:".bold(), message.text.green())
    }
}

/// Prints the bot messages appended since `from` and returns the new
/// high-water mark. The prompt already shows what the user typed.
fn print_new(log: &MessageLog, from: usize) -> usize {
    let fresh = log.since(from);
    for message in fresh.iter().filter(|m| m.sender == Sender::Bot) {
        println!("{}", format_reply(message));
    }
    from + fresh.len()
}

/// Line-mode front-end: one prompt, one command, one reply, in order.
pub async fn run_repl(dispatcher: Dispatcher, message_log: Arc<MessageLog>) -> RetailChatResult<()> {
    let mut editor = DefaultEditor::new().map_err(readline_error)?;
    let mut printed = print_new(&message_log, 0);

    loop {
        let line = tokio::task::block_in_place(|| editor.readline(PROMPT));
        match line {
            Ok(line) => {
                if line.is_empty() {
                    continue;
                }
                if matches!(line.trim(), "exit" | "quit") {
                    break;
                }
                if let Err(e) = editor.add_history_entry(line.as_str()) {
                    log::debug!("history entry dropped: {}", e);
                }

                dispatcher.handle(&line).await;
                printed = print_new(&message_log, printed);
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(readline_error(e)),
        }
    }

    Ok(())
}
