//! # Chat Session
//!
//! File: cli/src/faq/conversation.rs
//!
//! ## Overview
//!
//! `ChatSession` is the conversation state behind `eyeqa chat`: the message
//! list, the category of the last answered topic (used to pick follow-up
//! suggestions) and the `HistoryStore` the messages are persisted to after
//! every change.
//!
//! ## Flow for a typed message
//!
//! 1. Empty input is rejected with `EyeqaError::EmptyInput`; nothing is recorded.
//! 2. The user message is recorded.
//! 3. The detector runs; a category scoring at least 1.5 becomes the last
//!    category.
//! 4. If the message mentions the transplant topic, or the conversation held
//!    more than the greeting before it, the assistant answers. A clarification
//!    answer is reworded around the detected category when there is one.
//!    Otherwise the bot replies with an overview of what it can answer.
//! 5. The bot message is recorded and the history saved.
//!
//! Picking a suggestion skips the topic check and sets the last category to
//! the suggestion's own category.
//!
use super::assistant::Assistant;
use super::category::CategoryTag;
use super::history::{ChatMessage, HistoryStore};
use super::matcher::MatchResult;
use super::suggestions::{follow_ups, starter_questions, Suggestion};
use crate::core::error::{EyeqaError, Result};
use std::sync::Arc;
use tracing::{debug, info};

pub const GREETING: &str = "Hello! I am your Eye Transplant AI Assistant. I have been trained on comprehensive medical data about eye tissue transplantation. How can I help you today?";

pub const OVERVIEW: &str = "I'm an AI assistant specialized in eye tissue transplantation. I can answer questions about:

• The transplantation procedure and techniques
• Donor eligibility and the donation process
• Recipient requirements and selection
• Pre-surgery preparation and evaluation
• Post-surgery recovery and care
• Risks, complications, and success rates
• Vision improvement expectations
• Insurance coverage and costs
• Alternative treatments
• Lifestyle adjustments after surgery
• Emotional support for patients

How can I assist you with information about eye tissue transplantation?";

/// Words that mark a first message as being on topic.
const TOPIC_KEYWORDS: [&str; 9] = [
    "eye",
    "cornea",
    "transplant",
    "donation",
    "donor",
    "recipient",
    "surgery",
    "vision",
    "corneal",
];

/// Detector score needed before a category is remembered for follow-ups.
const FOLLOW_UP_MIN_SCORE: f64 = 1.5;

fn clarification(category: CategoryTag) -> String {
    format!(
        "I'm not sure I fully understand your question about {} aspects of eye transplantation. Could you provide more details or ask in a different way? I'm here to help with any specific information you need about eye tissue transplantation.",
        category
    )
}

fn is_on_topic(text: &str) -> bool {
    let lowered = text.to_lowercase();
    TOPIC_KEYWORDS.iter().any(|keyword| lowered.contains(keyword))
}

pub struct ChatSession<H: HistoryStore> {
    assistant: Arc<Assistant>,
    store: H,
    messages: Vec<ChatMessage>,
    last_category: Option<CategoryTag>,
}

impl<H: HistoryStore> ChatSession<H> {
    /// Opens a session, restoring saved messages or starting from the greeting.
    pub fn open(assistant: Arc<Assistant>, store: H) -> Result<Self> {
        let mut messages = store.load()?;
        if messages.is_empty() {
            messages.push(ChatMessage::bot(GREETING));
        } else {
            info!("Resuming conversation with {} messages", messages.len());
        }
        Ok(Self {
            assistant,
            store,
            messages,
            last_category: None,
        })
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn last_category(&self) -> Option<CategoryTag> {
        self.last_category
    }

    /// Handles a typed message and returns the bot's reply.
    pub fn send(&mut self, text: &str) -> Result<ChatMessage> {
        let question = text.trim();
        if question.is_empty() {
            return Err(EyeqaError::EmptyInput.into());
        }

        let had_conversation = self.messages.len() > 1;
        self.record(ChatMessage::user(text))?;

        let detected = self.assistant.detect_category(question);
        if let Some(category) = detected.category {
            if detected.score >= FOLLOW_UP_MIN_SCORE {
                self.last_category = Some(category);
            }
        }
        debug!(
            "Detected {:?} with score {}",
            detected.category, detected.score
        );

        let response = if had_conversation || is_on_topic(question) {
            let result = self
                .assistant
                .answer(question)
                .unwrap_or_else(|_| MatchResult::fallback());
            match (result.is_fallback(), detected.category) {
                (true, Some(category)) => clarification(category),
                _ => result.answer,
            }
        } else {
            debug!("First message is off topic, replying with overview");
            OVERVIEW.to_string()
        };

        let reply = ChatMessage::bot(response);
        self.record(reply.clone())?;
        Ok(reply)
    }

    /// Handles a picked suggestion and returns the bot's reply.
    pub fn ask_suggestion(&mut self, suggestion: &Suggestion) -> Result<ChatMessage> {
        self.record(ChatMessage::user(suggestion.text))?;
        let reply = ChatMessage::bot(self.assistant.reply(suggestion.text));
        self.last_category = Some(suggestion.category);
        self.record(reply.clone())?;
        Ok(reply)
    }

    /// Starts over from the greeting and clears the stored history.
    pub fn reset(&mut self) -> Result<()> {
        self.store.clear()?;
        self.messages = vec![ChatMessage::bot(GREETING)];
        self.last_category = None;
        info!("Conversation reset");
        Ok(())
    }

    /// Suggestions to show now: starters on a fresh conversation, follow-ups
    /// for the last category once something has been answered, else none.
    pub fn suggestions(&self) -> Vec<Suggestion> {
        if self.messages.len() <= 1 {
            return starter_questions().to_vec();
        }
        match self.last_category {
            Some(category) if self.messages.len() > 2 => follow_ups(category),
            _ => Vec::new(),
        }
    }

    fn record(&mut self, message: ChatMessage) -> Result<()> {
        self.messages.push(message);
        self.store.save(&self.messages)
    }
}
