//! # Lexical Scoring Primitives
//!
//! File: cli/src/faq/scoring.rs
//!
//! ## Overview
//!
//! Substring-based scoring shared by the answer matcher and the category
//! detector. Everything here operates on *normalized* text (see [`normalize`]).
//!
//! Matching is plain substring containment: "life" is found inside
//! "qualify", "eligible" is not found inside "eligibility". Both effects are
//! part of the expected behaviour and must not be tightened here.
//!
//! ## Architecture
//!
//! - [`keyword_hits`]: which keywords of a set occur in the text, and whether
//!   each occurs as a space-padded whole word.
//! - [`HitWeighting`]: turns a category's hits into a score. Two strategies:
//!   - [`DistinctCount`]: one point per keyword found (answer matcher).
//!   - [`WholeWordBonus`]: fractional weights, more for whole words
//!     (category detector).
//! - [`score_categories`]: applies a strategy to every category of a table.
//! - [`token_overlap`]: distinct question tokens found in the text.
//! - [`strict_argmax`]: highest score wins, earlier candidates win ties.
//!
use super::category::CategoryTag;
use super::keywords::KeywordTable;
use std::collections::HashSet;

/// Lowercases and trims user text. All scoring assumes this form.
pub fn normalize(text: &str) -> String {
    text.to_lowercase().trim().to_string()
}

/// A keyword found in the normalized text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordHit<'k> {
    pub keyword: &'k str,
    /// The text contains the keyword with a space on both sides.
    pub whole_word: bool,
}

/// Returns one hit per keyword that occurs as a substring of `normalized`.
///
/// Each keyword counts once regardless of how often it occurs.
pub fn keyword_hits<'k>(normalized: &str, keywords: &'k [String]) -> Vec<KeywordHit<'k>> {
    keywords
        .iter()
        .filter(|keyword| !keyword.is_empty() && normalized.contains(keyword.as_str()))
        .map(|keyword| KeywordHit {
            keyword,
            whole_word: normalized.contains(&format!(" {} ", keyword)),
        })
        .collect()
}

/// Strategy for turning a category's keyword hits into a score.
pub trait HitWeighting {
    type Score: PartialOrd + Copy + Default;

    fn weigh(&self, hits: &[KeywordHit<'_>]) -> Self::Score;
}

/// One point per distinct keyword found.
#[derive(Debug, Clone, Copy, Default)]
pub struct DistinctCount;

impl HitWeighting for DistinctCount {
    type Score = usize;

    fn weigh(&self, hits: &[KeywordHit<'_>]) -> usize {
        hits.len()
    }
}

/// `substring` per keyword found, or `whole_word` instead when the keyword is
/// space-delimited in the text.
#[derive(Debug, Clone, Copy)]
pub struct WholeWordBonus {
    pub substring: f64,
    pub whole_word: f64,
}

impl Default for WholeWordBonus {
    fn default() -> Self {
        Self {
            substring: 1.0,
            whole_word: 1.5,
        }
    }
}

impl HitWeighting for WholeWordBonus {
    type Score = f64;

    fn weigh(&self, hits: &[KeywordHit<'_>]) -> f64 {
        hits.iter()
            .map(|hit| {
                if hit.whole_word {
                    self.whole_word
                } else {
                    self.substring
                }
            })
            .sum()
    }
}

/// Scores every category of `table`, in table order.
pub fn score_categories<W: HitWeighting>(
    table: &KeywordTable,
    normalized: &str,
    weighting: &W,
) -> Vec<(CategoryTag, W::Score)> {
    table
        .iter()
        .map(|(category, keywords)| {
            let hits = keyword_hits(normalized, keywords);
            (category, weighting.weigh(&hits))
        })
        .collect()
}

/// Counts the distinct space-separated tokens of `question` that occur as
/// substrings of `normalized`.
pub fn token_overlap(normalized: &str, question: &str) -> usize {
    question
        .split(' ')
        .filter(|token| !token.is_empty())
        .collect::<HashSet<_>>()
        .into_iter()
        .filter(|token| normalized.contains(token))
        .count()
}

/// Picks the candidate with the strictly highest score above `floor`.
///
/// Candidates are visited in order and only a strictly greater score replaces
/// the current best, so ties keep the first candidate. Returns `None` when no
/// candidate beats `floor`.
pub fn strict_argmax<T, S, I>(candidates: I, floor: S) -> Option<(T, S)>
where
    I: IntoIterator<Item = (T, S)>,
    S: PartialOrd + Copy,
{
    let mut best = None;
    let mut best_score = floor;
    for (candidate, score) in candidates {
        // Strictly greater: an equal score never displaces an earlier one.
        if score > best_score {
            best_score = score;
            best = Some(candidate);
        }
    }
    best.map(|candidate| (candidate, best_score))
}
