//! # EyeQA List Command
//!
//! File: cli/src/commands/list.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! `eyeqa list` prints the canonical questions of the knowledge base in table
//! order, optionally restricted to one category. With `--suggestions` it
//! prints the suggested questions instead: the starter list, or the
//! follow-ups of `--category`.
//!
//! ## Examples
//!
//! ```bash
//! eyeqa list
//! eyeqa list --category insurance
//! eyeqa list --suggestions --category recovery
//! ```
//!
//! Example output:
//!
//! ```
//! Category     | Question
//! -------------+--------------------------------------------------
//! insurance    | does insurance cover eye transplants
//! insurance    | how much does it cost
//!
//! Found 2 question(s).
//! ```
//!
use super::{load_assistant, KnowledgeArgs};
use crate::core::error::Result;
use crate::faq::suggestions::{follow_ups, starter_questions, Suggestion};
use crate::faq::CategoryTag;
use clap::Parser;
use tracing::{debug, info};

const CATEGORY_WIDTH: usize = 12;

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Only show entries of this category.
    #[arg(long, short)]
    pub category: Option<CategoryTag>,

    /// Show suggested questions instead of the knowledge base.
    #[arg(long, short)]
    pub suggestions: bool,

    #[command(flatten)]
    pub knowledge: KnowledgeArgs,
}

pub async fn handle_list(args: ListArgs) -> Result<()> {
    info!("Handling list command...");

    let rows: Vec<(CategoryTag, String)> = if args.suggestions {
        suggestion_rows(args.category)
    } else {
        let (_cfg, assistant) = load_assistant(&args.knowledge)?;
        assistant
            .knowledge()
            .entries()
            .iter()
            .filter(|entry| args.category.map_or(true, |c| entry.category == c))
            .map(|entry| (entry.category, entry.canonical_question.clone()))
            .collect()
    };
    debug!("Listing {} row(s)", rows.len());

    print_table(&rows, args.suggestions);
    Ok(())
}

fn suggestion_rows(category: Option<CategoryTag>) -> Vec<(CategoryTag, String)> {
    let suggestions: Vec<Suggestion> = match category {
        Some(category) => follow_ups(category),
        None => starter_questions().to_vec(),
    };
    suggestions
        .into_iter()
        .map(|s| (s.category, s.text.to_string()))
        .collect()
}

fn print_table(rows: &[(CategoryTag, String)], suggestions: bool) {
    let noun = if suggestions { "suggestion" } else { "question" };
    if rows.is_empty() {
        println!("No {}s found.", noun);
        return;
    }

    println!("{:<width$} | Question", "Category", width = CATEGORY_WIDTH);
    println!("{:-<width$}-+-{:-<50}", "", "", width = CATEGORY_WIDTH);
    for (category, text) in rows {
        println!(
            "{:<width$} | {}",
            category.as_str(),
            text,
            width = CATEGORY_WIDTH
        );
    }
    println!("\nFound {} {}(s).", rows.len(), noun);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggestion_rows() {
        assert_eq!(suggestion_rows(None).len(), 6);
        let rows = suggestion_rows(Some(CategoryTag::Recovery));
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|(c, _)| *c == CategoryTag::Recovery));
    }

    #[test]
    fn test_category_flag_parses_tags() {
        let args = ListArgs::parse_from(["list", "--category", "Insurance"]);
        assert_eq!(args.category, Some(CategoryTag::Insurance));
        assert!(ListArgs::try_parse_from(["list", "--category", "nope"]).is_err());
    }
}
