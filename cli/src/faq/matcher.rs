//! # Answer Matcher
//!
//! File: cli/src/faq/matcher.rs
//!
//! ## Overview
//!
//! Selects one canned answer for arbitrary user text. The matcher is total:
//! every input, including the empty string, produces a `MatchResult`.
//! Rejecting empty input is the job of the caller (see `faq::assistant`).
//!
//! ## Algorithm
//!
//! Four ordered tiers; the first one that succeeds wins.
//!
//! 1. **Exact**: the normalized input equals a canonical question.
//! 2. **Category**: the category with the most distinct keyword hits is
//!    detected (ties go to the earlier category, zero hits skips the tier).
//!    Among that category's entries the one with the highest token overlap
//!    wins, provided it overlaps at all.
//! 3. **Partial**: token overlap over the whole table; the best entry is
//!    accepted only with an overlap of at least two tokens.
//! 4. **Default**: a fixed request to rephrase, category `general`.
//!
//! Ties inside tiers 2 and 3 keep the earliest entry in table order.
//!
//! ## Examples
//!
//! ```rust
//! let kb = Arc::new(KnowledgeBase::builtin()?);
//! let matcher = AnswerMatcher::with_defaults(kb);
//! let result = matcher.match_question("What is eye tissue transplantation?");
//! println!("[{}] {}", result.category, result.answer);
//! ```
//!
use super::category::CategoryTag;
use super::keywords::KeywordTable;
use super::knowledge::{KnowledgeBase, KnowledgeEntry};
use super::scoring::{normalize, score_categories, strict_argmax, token_overlap, DistinctCount};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Answer returned when no tier matches.
pub const DEFAULT_ANSWER: &str = "I understand you have a question about eye tissue transplantation. Could you please rephrase your question or ask about specific aspects like the procedure, recovery, risks, or eligibility?";

/// Minimum token overlap accepted by the partial tier.
const PARTIAL_MATCH_MIN_OVERLAP: usize = 2;

/// The tier that produced a `MatchResult`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchTier {
    Exact,
    Category,
    Partial,
    Default,
}

/// Outcome of matching one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub answer: String,
    pub category: CategoryTag,
    pub tier: MatchTier,
}

impl MatchResult {
    fn from_entry(entry: &KnowledgeEntry, tier: MatchTier) -> Self {
        Self {
            answer: entry.answer.clone(),
            category: entry.category,
            tier,
        }
    }

    /// The fixed clarification result.
    pub fn fallback() -> Self {
        Self {
            answer: DEFAULT_ANSWER.to_string(),
            category: CategoryTag::General,
            tier: MatchTier::Default,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.tier == MatchTier::Default
    }
}

/// Tiered lexical matcher over an injected knowledge base and keyword table.
#[derive(Debug, Clone)]
pub struct AnswerMatcher {
    knowledge: Arc<KnowledgeBase>,
    keywords: KeywordTable,
}

impl AnswerMatcher {
    pub fn new(knowledge: Arc<KnowledgeBase>, keywords: KeywordTable) -> Self {
        Self {
            knowledge,
            keywords,
        }
    }

    /// Matcher using the built-in matcher keyword table.
    pub fn with_defaults(knowledge: Arc<KnowledgeBase>) -> Self {
        Self::new(knowledge, KeywordTable::matcher_default())
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    /// Returns the best answer for `user_text`. Never fails.
    pub fn match_question(&self, user_text: &str) -> MatchResult {
        let normalized = normalize(user_text);

        // --- Tier 1: Exact canonical question ---
        if let Some(entry) = self.knowledge.lookup(&normalized) {
            debug!("Exact match for '{}'", normalized);
            return MatchResult::from_entry(entry, MatchTier::Exact);
        }

        // --- Tier 2: Best overlap within the keyword category ---
        if let Some(category) = self.detect_category(&normalized) {
            let candidates = self.knowledge.in_category(category);
            if let Some((entry, overlap)) = best_overlap(&normalized, candidates) {
                debug!(
                    "Category match in '{}' with overlap {}: '{}'",
                    category, overlap, entry.canonical_question
                );
                return MatchResult::from_entry(entry, MatchTier::Category);
            }
            debug!("No entry in category '{}' overlaps the input", category);
        }

        // --- Tier 3: Best overlap across the whole table ---
        if let Some((entry, overlap)) = best_overlap(&normalized, self.knowledge.entries().iter()) {
            if overlap >= PARTIAL_MATCH_MIN_OVERLAP {
                debug!(
                    "Partial match with overlap {}: '{}'",
                    overlap, entry.canonical_question
                );
                return MatchResult::from_entry(entry, MatchTier::Partial);
            }
        }

        debug!("No match for '{}', using default answer", normalized);
        MatchResult::fallback()
    }

    /// Category with the most distinct keyword hits in `normalized`, or
    /// `None` when no keyword occurs.
    pub fn detect_category(&self, normalized: &str) -> Option<CategoryTag> {
        let scores = score_categories(&self.keywords, normalized, &DistinctCount);
        strict_argmax(scores, 0).map(|(category, _)| category)
    }
}

/// Entry with the highest token overlap, if any overlaps at all.
fn best_overlap<'a>(
    normalized: &str,
    entries: impl Iterator<Item = &'a KnowledgeEntry>,
) -> Option<(&'a KnowledgeEntry, usize)> {
    let scored = entries.map(|entry| (entry, token_overlap(normalized, &entry.canonical_question)));
    strict_argmax(scored, 0)
}
