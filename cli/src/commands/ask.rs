//! # EyeQA Ask Command
//!
//! File: cli/src/commands/ask.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! `eyeqa ask` answers one question and exits. The words after `ask` are
//! joined with single spaces, so quoting is optional.
//!
//! ## Examples
//!
//! ```bash
//! eyeqa ask what is eye tissue transplantation
//! eyeqa ask --json "How much does it cost?"
//! ```
//!
//! With `--json` the full match result is printed:
//!
//! ```json
//! {"answer": "...", "category": "insurance", "tier": "exact"}
//! ```
//!
use super::{load_assistant, KnowledgeArgs};
use crate::core::error::Result;
use anyhow::Context;
use clap::Parser;
use tracing::info;

#[derive(Parser, Debug)]
pub struct AskArgs {
    /// The question to answer.
    #[arg(required = true, num_args = 1.., value_name = "QUESTION")]
    pub question: Vec<String>,

    /// Print the answer, category and match tier as JSON.
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub knowledge: KnowledgeArgs,
}

pub async fn handle_ask(args: AskArgs) -> Result<()> {
    let question = args.question.join(" ");
    info!("Handling ask command for '{}'", question);

    let (_cfg, assistant) = load_assistant(&args.knowledge)?;
    let result = assistant.answer(&question)?;

    if args.json {
        let json =
            serde_json::to_string_pretty(&result).context("Failed to serialize answer")?;
        println!("{}", json);
    } else {
        println!("{}", result.answer);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_are_collected() {
        let args = AskArgs::parse_from(["ask", "will", "it", "hurt", "--json"]);
        assert_eq!(args.question.join(" "), "will it hurt");
        assert!(args.json);
        assert!(args.knowledge.knowledge.is_none());
    }

    #[test]
    fn test_question_is_required() {
        assert!(AskArgs::try_parse_from(["ask"]).is_err());
    }
}
