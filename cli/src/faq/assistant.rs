//! # Assistant Boundary
//!
//! File: cli/src/faq/assistant.rs
//!
//! ## Overview
//!
//! `Assistant` is the single entry point the chat session, the CLI commands
//! and the HTTP API call into. It owns one `AnswerMatcher` and one
//! `CategoryDetector` built over the same shared `KnowledgeBase`.
//!
//! - [`Assistant::get_answer`] trims the input, rejects empty input with
//!   `EyeqaError::EmptyInput` and otherwise returns the matcher's answer.
//! - [`Assistant::reply`] is the UI-facing variant that always returns text:
//!   empty input becomes a prompt to type something, any other failure
//!   becomes a generic apology.
//!
//! The assistant holds no mutable state, so one instance can be shared
//! between threads and requests behind an `Arc`.
//!
use super::detector::{CategoryDetector, DetectedCategory};
use super::knowledge::KnowledgeBase;
use super::matcher::{AnswerMatcher, MatchResult};
use crate::core::error::EyeqaError;
use std::sync::Arc;
use tracing::{debug, warn};

/// Shown when a question could not be processed.
pub const APOLOGY: &str = "I apologize, but I couldn't process your question. Please try asking again with more specific details about eye tissue transplantation.";

/// Shown when the user submits an empty question.
pub const EMPTY_INPUT_PROMPT: &str = "Please type a question about eye tissue transplantation.";

#[derive(Debug, Clone)]
pub struct Assistant {
    matcher: AnswerMatcher,
    detector: CategoryDetector,
}

impl Assistant {
    pub fn new(matcher: AnswerMatcher, detector: CategoryDetector) -> Self {
        Self { matcher, detector }
    }

    /// Assistant over `knowledge` with the built-in keyword tables and
    /// phrase patterns.
    pub fn with_knowledge(knowledge: Arc<KnowledgeBase>) -> Result<Self, EyeqaError> {
        Ok(Self::new(
            AnswerMatcher::with_defaults(knowledge),
            CategoryDetector::with_defaults()?,
        ))
    }

    /// Assistant over the built-in knowledge base.
    pub fn builtin() -> Result<Self, EyeqaError> {
        Self::with_knowledge(Arc::new(KnowledgeBase::builtin()?))
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        self.matcher.knowledge()
    }

    /// Full match result for a non-empty question.
    pub fn answer(&self, user_input: &str) -> Result<MatchResult, EyeqaError> {
        let question = user_input.trim();
        if question.is_empty() {
            return Err(EyeqaError::EmptyInput);
        }
        let result = self.matcher.match_question(question);
        debug!(
            "Answered via {:?} tier in category '{}'",
            result.tier, result.category
        );
        Ok(result)
    }

    /// Answer text for a non-empty question.
    pub fn get_answer(&self, user_input: &str) -> Result<String, EyeqaError> {
        self.answer(user_input).map(|result| result.answer)
    }

    /// Answer text for any input; never fails.
    pub fn reply(&self, user_input: &str) -> String {
        match self.get_answer(user_input) {
            Ok(answer) => answer,
            Err(EyeqaError::EmptyInput) => EMPTY_INPUT_PROMPT.to_string(),
            Err(err) => {
                warn!("Error processing question: {}", err);
                APOLOGY.to_string()
            }
        }
    }

    pub fn detect_category(&self, text: &str) -> DetectedCategory {
        self.detector.detect_category(text)
    }
}
