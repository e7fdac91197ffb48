//! # EyeQA Chat Command
//!
//! File: cli/src/commands/chat.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! `eyeqa chat` runs an interactive conversation on stdin/stdout. Answers are
//! shown after a short "thinking" pause and typed out one character at a
//! time; `--fast` turns both off (and is what scripts and tests use).
//!
//! Numbered suggestions are printed after each answer. Typing the number
//! asks that suggestion. Lines starting with `/` are session commands:
//!
//! - `/reset`: start over and clear the saved history
//! - `/help`: show the commands
//! - `/quit` or `/exit`: leave (end of input works too)
//!
//! ## History
//!
//! Messages are saved after every exchange to `[chat] history_file` (or the
//! platform data directory) so a later `eyeqa chat` resumes the conversation.
//! `--history FILE` picks another file, `--no-history` keeps everything in
//! memory.
//!
//! ## Examples
//!
//! ```bash
//! eyeqa chat
//! eyeqa chat --fast --no-history
//! printf 'will it hurt\n/quit\n' | eyeqa chat --fast --no-history
//! ```
//!
use super::{load_assistant, KnowledgeArgs};
use crate::core::config::ChatConfig;
use crate::core::error::{EyeqaError, Result};
use crate::faq::assistant::EMPTY_INPUT_PROMPT;
use crate::faq::conversation::ChatSession;
use crate::faq::history::{HistoryStore, JsonFileHistory, MemoryHistory, Sender};
use crate::faq::suggestions::Suggestion;
use crate::faq::{Assistant, CategoryTag};
use anyhow::Context;
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

const HELP: &str = "Type a question, or the number of a suggestion.
Commands: /reset (start over), /help (this text), /quit (leave).";

#[derive(Parser, Debug)]
pub struct ChatArgs {
    /// Print answers immediately, without thinking pauses or typing effect.
    #[arg(long)]
    pub fast: bool,

    /// File to keep the conversation in (overrides the configured one).
    #[arg(long, value_name = "FILE", conflicts_with = "no_history")]
    pub history: Option<PathBuf>,

    /// Do not read or write any history file.
    #[arg(long)]
    pub no_history: bool,

    /// Clear the saved conversation before starting.
    #[arg(long)]
    pub reset: bool,

    #[command(flatten)]
    pub knowledge: KnowledgeArgs,
}

/// Delays used to present answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pacing {
    thinking: Duration,
    suggestion: Duration,
    typing: Duration,
}

impl Pacing {
    fn new(cfg: &ChatConfig, fast: bool) -> Self {
        if fast {
            return Self {
                thinking: Duration::ZERO,
                suggestion: Duration::ZERO,
                typing: Duration::ZERO,
            };
        }
        Self {
            thinking: Duration::from_millis(cfg.thinking_delay_ms),
            suggestion: Duration::from_millis(cfg.suggestion_delay_ms),
            typing: Duration::from_millis(cfg.typing_interval_ms),
        }
    }
}

/// One line of user input, interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    Quit,
    Reset,
    Help,
    Pick(usize),
    Question(String),
}

fn parse_input(line: &str, suggestion_count: usize) -> Input {
    let trimmed = line.trim();
    match trimmed {
        "/quit" | "/exit" => return Input::Quit,
        "/reset" => return Input::Reset,
        "/help" => return Input::Help,
        _ => {}
    }
    match trimmed.parse::<usize>() {
        Ok(n) if n >= 1 && n <= suggestion_count => Input::Pick(n - 1),
        _ => Input::Question(line.to_string()),
    }
}

pub async fn handle_chat(args: ChatArgs) -> Result<()> {
    info!("Handling chat command with args: {:?}", args);
    let (cfg, assistant) = load_assistant(&args.knowledge)?;
    let pacing = Pacing::new(&cfg.chat, args.fast);

    let history_path = if args.no_history || !cfg.chat.persist_history {
        None
    } else {
        let path = args.history.clone().or_else(|| cfg.chat.history_path());
        if path.is_none() {
            warn!("Could not determine a history file location; history will not be saved.");
        }
        path
    };

    let input = BufReader::new(tokio::io::stdin());
    match history_path {
        Some(path) => {
            let store = JsonFileHistory::new(path);
            debug!("Using chat history file {}", store.path().display());
            run_chat(assistant, store, pacing, args.reset, input).await
        }
        None => run_chat(assistant, MemoryHistory::new(), pacing, args.reset, input).await,
    }
}

async fn run_chat<H, R>(
    assistant: Arc<Assistant>,
    store: H,
    pacing: Pacing,
    reset: bool,
    input: R,
) -> Result<()>
where
    H: HistoryStore,
    R: AsyncBufRead + Unpin,
{
    let mut session = ChatSession::open(assistant, store)?;
    if reset {
        session.reset()?;
    }

    print_transcript(&session);
    let mut suggestions = session.suggestions();
    print_suggestions(&suggestions, session.last_category());

    let mut lines = input.lines();
    loop {
        prompt()?;
        let Some(line) = lines.next_line().await.context("Failed to read input")? else {
            break;
        };

        let reply = match parse_input(&line, suggestions.len()) {
            Input::Quit => break,
            Input::Help => {
                println!("{}", HELP);
                continue;
            }
            Input::Reset => {
                session.reset()?;
                print_transcript(&session);
                suggestions = session.suggestions();
                print_suggestions(&suggestions, session.last_category());
                continue;
            }
            Input::Pick(index) => {
                let suggestion = suggestions[index];
                println!("you: {}", suggestion.text);
                tokio::time::sleep(pacing.suggestion).await;
                session.ask_suggestion(&suggestion)?
            }
            Input::Question(text) => match session.send(&text) {
                Ok(reply) => {
                    tokio::time::sleep(pacing.thinking).await;
                    reply
                }
                Err(e) if matches!(e.downcast_ref::<EyeqaError>(), Some(EyeqaError::EmptyInput)) => {
                    println!("{}", EMPTY_INPUT_PROMPT);
                    continue;
                }
                Err(e) => return Err(e),
            },
        };

        type_out(&reply.text, pacing.typing).await?;
        suggestions = session.suggestions();
        print_suggestions(&suggestions, session.last_category());
    }

    println!("Goodbye!");
    Ok(())
}

fn print_transcript<H: HistoryStore>(session: &ChatSession<H>) {
    for message in session.messages() {
        match message.sender {
            Sender::User => println!("you: {}", message.text),
            Sender::Bot => println!("bot: {}", message.text),
        }
    }
}

/// Heading above the numbered suggestions; names the topic being followed.
fn suggestions_heading(topic: Option<CategoryTag>) -> String {
    match topic {
        Some(category) => format!("You might also ask about {}:", category),
        None => "You might also ask:".to_string(),
    }
}

fn print_suggestions(suggestions: &[Suggestion], topic: Option<CategoryTag>) {
    if suggestions.is_empty() {
        return;
    }
    println!("\n{}", suggestions_heading(topic));
    for (i, suggestion) in suggestions.iter().enumerate() {
        println!("  [{}] {}", i + 1, suggestion.text);
    }
}

fn prompt() -> Result<()> {
    print!("\n> ");
    std::io::stdout().flush().context("Failed to flush stdout")
}

/// Prints `text` one character at a time, `interval` apart.
async fn type_out(text: &str, interval: Duration) -> Result<()> {
    if interval.is_zero() {
        println!("bot: {}", text);
        return Ok(());
    }
    let mut stdout = std::io::stdout();
    write!(stdout, "bot: ").context("Failed to write to stdout")?;
    for ch in text.chars() {
        write!(stdout, "{}", ch).context("Failed to write to stdout")?;
        stdout.flush().context("Failed to flush stdout")?;
        tokio::time::sleep(interval).await;
    }
    writeln!(stdout).context("Failed to write to stdout")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_input() {
        assert_eq!(parse_input("/quit", 0), Input::Quit);
        assert_eq!(parse_input("  /exit ", 0), Input::Quit);
        assert_eq!(parse_input("/reset", 3), Input::Reset);
        assert_eq!(parse_input("/help", 3), Input::Help);
        assert_eq!(parse_input("2", 3), Input::Pick(1));
        // Out of range numbers are ordinary questions.
        assert_eq!(parse_input("4", 3), Input::Question("4".to_string()));
        assert_eq!(parse_input("0", 3), Input::Question("0".to_string()));
        assert_eq!(
            parse_input("will it hurt", 3),
            Input::Question("will it hurt".to_string())
        );
    }

    #[test]
    fn test_suggestions_heading_names_followed_topic() {
        assert_eq!(suggestions_heading(None), "You might also ask:");
        assert_eq!(
            suggestions_heading(Some(CategoryTag::Insurance)),
            "You might also ask about insurance:"
        );
    }

    #[test]
    fn test_fast_pacing_has_no_delays() {
        let pacing = Pacing::new(&ChatConfig::default(), true);
        assert!(pacing.thinking.is_zero());
        assert!(pacing.typing.is_zero());

        let pacing = Pacing::new(&ChatConfig::default(), false);
        assert_eq!(pacing.thinking, Duration::from_millis(700));
        assert_eq!(pacing.suggestion, Duration::from_millis(500));
        assert_eq!(pacing.typing, Duration::from_millis(15));
    }

    #[tokio::test]
    async fn test_run_chat_records_exchange() -> Result<()> {
        let assistant = Arc::new(Assistant::builtin()?);
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("history.json");
        let input: &[u8] = b"what is eye tissue transplantation\n\n1\n/quit\n";
        let pacing = Pacing::new(&ChatConfig::default(), true);

        run_chat(assistant.clone(), JsonFileHistory::new(&path), pacing, false, input).await?;

        let saved = JsonFileHistory::new(&path).load()?;
        // greeting, question, answer, picked follow-up, answer
        assert_eq!(saved.len(), 5);
        assert_eq!(saved[1].text, "what is eye tissue transplantation");
        assert_eq!(saved[3].text, "What types of eye transplants are available?");
        Ok(())
    }

    #[tokio::test]
    async fn test_run_chat_reset_flag_clears_history() -> Result<()> {
        let assistant = Arc::new(Assistant::builtin()?);
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("history.json");
        let pacing = Pacing::new(&ChatConfig::default(), true);

        let first: &[u8] = b"will it hurt my eye\n";
        run_chat(assistant.clone(), JsonFileHistory::new(&path), pacing, false, first).await?;
        assert_eq!(JsonFileHistory::new(&path).load()?.len(), 3);

        let second: &[u8] = b"/quit\n";
        run_chat(assistant, JsonFileHistory::new(&path), pacing, true, second).await?;
        assert!(!path.exists());
        Ok(())
    }
}
