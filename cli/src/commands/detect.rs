//! # EyeQA Detect Command
//!
//! File: cli/src/commands/detect.rs
//! Author: Christi Mahu
//!
//! Prints the category the detector assigns to a message, with its score.
//! Useful when tuning keyword tables or phrase patterns.
//!
//! ```bash
//! $ eyeqa detect I am really scared about the surgery tomorrow
//! emotional (score 4.0)
//! ```
//!
use crate::core::error::Result;
use crate::faq::detector::{CategoryDetector, DetectedCategory};
use anyhow::Context;
use clap::Parser;
use tracing::info;

#[derive(Parser, Debug)]
pub struct DetectArgs {
    /// Text to classify.
    #[arg(required = true, num_args = 1.., value_name = "TEXT")]
    pub text: Vec<String>,

    /// Print the result as JSON.
    #[arg(long)]
    pub json: bool,
}

pub async fn handle_detect(args: DetectArgs) -> Result<()> {
    let text = args.text.join(" ");
    info!("Handling detect command for '{}'", text);

    let detector = CategoryDetector::with_defaults()?;
    let detected = detector.detect_category(&text);

    if args.json {
        let json = serde_json::to_string_pretty(&detected)
            .context("Failed to serialize detection result")?;
        println!("{}", json);
    } else {
        println!("{}", describe(&detected));
    }
    Ok(())
}

fn describe(detected: &DetectedCategory) -> String {
    match detected.category {
        Some(category) => format!("{} (score {:.1})", category, detected.score),
        None => format!("No category detected (score {:.1})", detected.score),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::faq::CategoryTag;

    #[test]
    fn test_describe() {
        let found = DetectedCategory {
            category: Some(CategoryTag::Emotional),
            score: 4.0,
        };
        assert_eq!(describe(&found), "emotional (score 4.0)");

        let none = DetectedCategory {
            category: None,
            score: 0.5,
        };
        assert_eq!(describe(&none), "No category detected (score 0.5)");
    }
}
