//! # Category Detector
//!
//! File: cli/src/faq/detector.rs
//!
//! ## Overview
//!
//! Guesses which topic a message is about so the conversation can offer the
//! right follow-up suggestions. It never changes the answer the matcher
//! produces.
//!
//! Scoring, per category (all start at zero):
//! - every keyword found as a substring adds 1, or 1.5 instead when it
//!   appears space-padded as a whole word;
//! - every phrase pattern that matches adds its weight to its category.
//!
//! The highest score wins, earlier categories win ties, and a best score
//! below 1 means no category was detected.
//!
use super::category::CategoryTag;
use super::keywords::KeywordTable;
use super::scoring::{normalize, score_categories, strict_argmax, WholeWordBonus};
use crate::core::error::EyeqaError;
use regex::Regex;
use serde::Serialize;
use tracing::trace;

/// Best scores below this report no category.
const MIN_DETECTION_SCORE: f64 = 1.0;

const PHRASE_PATTERNS: [(&str, f64, CategoryTag); 10] = [
    ("what is|what are|what does|what do", 2.0, CategoryTag::General),
    ("how does|how do|how is|how long|how many", 2.0, CategoryTag::Procedure),
    ("can i|will i|should i", 1.5, CategoryTag::Recipient),
    ("risk|danger|complication|problem", 2.0, CategoryTag::Risks),
    ("cost|price|insurance|cover|payment", 2.0, CategoryTag::Insurance),
    ("scared|afraid|nervous|anxious|worried|fear", 2.5, CategoryTag::Emotional),
    ("donor|donate|donation", 2.0, CategoryTag::Donor),
    ("recovery|heal|after surgery|post-op", 2.0, CategoryTag::Recovery),
    ("alternative|option|instead|other", 2.0, CategoryTag::Alternatives),
    ("prepare|preparation|before surgery|pre-op", 2.0, CategoryTag::Preparation),
];

/// A regular expression that adds `weight` to `category` when it matches.
#[derive(Debug, Clone)]
pub struct PhrasePattern {
    regex: Regex,
    pub weight: f64,
    pub category: CategoryTag,
}

impl PhrasePattern {
    pub fn new(pattern: &str, weight: f64, category: CategoryTag) -> Result<Self, EyeqaError> {
        let regex = Regex::new(pattern).map_err(|source| EyeqaError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            regex,
            weight,
            category,
        })
    }

    pub fn is_match(&self, normalized: &str) -> bool {
        self.regex.is_match(normalized)
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

/// Detection outcome. `score` is the best score even when it was too low to
/// report a category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DetectedCategory {
    pub category: Option<CategoryTag>,
    pub score: f64,
}

#[derive(Debug, Clone)]
pub struct CategoryDetector {
    keywords: KeywordTable,
    patterns: Vec<PhrasePattern>,
    weighting: WholeWordBonus,
}

impl CategoryDetector {
    pub fn new(keywords: KeywordTable, patterns: Vec<PhrasePattern>) -> Self {
        Self {
            keywords,
            patterns,
            weighting: WholeWordBonus::default(),
        }
    }

    /// Detector with the built-in keyword table and phrase patterns.
    pub fn with_defaults() -> Result<Self, EyeqaError> {
        let patterns = PHRASE_PATTERNS
            .iter()
            .map(|(pattern, weight, category)| PhrasePattern::new(pattern, *weight, *category))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(KeywordTable::detector_default(), patterns))
    }

    pub fn detect_category(&self, text: &str) -> DetectedCategory {
        let normalized = normalize(text);

        // --- Step 1: Keyword scores, in category order ---
        let mut scores = score_categories(&self.keywords, &normalized, &self.weighting);

        // --- Step 2: Add the weight of every matching phrase pattern ---
        for pattern in self.patterns.iter().filter(|p| p.is_match(&normalized)) {
            trace!("Pattern '{}' matched for {}", pattern.as_str(), pattern.category);
            match scores.iter_mut().find(|(c, _)| *c == pattern.category) {
                Some((_, score)) => *score += pattern.weight,
                None => scores.push((pattern.category, pattern.weight)),
            }
        }

        // --- Step 3: Best category, if it reaches the threshold ---
        match strict_argmax(scores, 0.0) {
            Some((category, score)) if score >= MIN_DETECTION_SCORE => DetectedCategory {
                category: Some(category),
                score,
            },
            Some((_, score)) => DetectedCategory {
                category: None,
                score,
            },
            None => DetectedCategory {
                category: None,
                score: 0.0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> CategoryDetector {
        CategoryDetector::with_defaults().expect("built-in patterns must compile")
    }

    #[test]
    fn test_scared_is_emotional() {
        let detected = detector().detect_category("I am really scared about the surgery tomorrow");
        assert_eq!(detected.category, Some(CategoryTag::Emotional));
        // whole-word "scared" 1.5 + pattern 2.5
        assert_eq!(detected.score, 4.0);
    }

    #[test]
    fn test_nothing_detected() {
        let detected = detector().detect_category("asdf");
        assert_eq!(detected, DetectedCategory { category: None, score: 0.0 });
    }

    #[test]
    fn test_keywords_and_patterns_add_up() {
        // "what", "about", "tell" keywords: "tell" and "about" are padded
        // (1.5 each), "what" is at the start (1), plus "what is" pattern (2).
        let detected = detector().detect_category("what is tell about me");
        assert_eq!(detected.category, Some(CategoryTag::General));
        assert_eq!(detected.score, 6.0);
    }

    #[test]
    fn test_ties_keep_earlier_category() {
        // general: "what" 1 + "what are" 2; alternatives: "option" 1 + pattern 2
        let detected = detector().detect_category("what are my options");
        assert_eq!(detected.category, Some(CategoryTag::General));
        assert_eq!(detected.score, 3.0);
    }

    #[test]
    fn test_substring_false_positives_are_kept() {
        // "cover" inside "recovery" counts for insurance.
        let detected = detector().detect_category("recovery after surgery");
        assert_eq!(detected.category, Some(CategoryTag::Recovery));
        assert_eq!(detected.score, 4.5);
    }

    #[test]
    fn test_custom_low_scores_report_none() {
        let keywords = KeywordTable::new([(CategoryTag::Vision, ["sight"])]);
        let patterns = vec![PhrasePattern::new("blur", 0.5, CategoryTag::Vision).unwrap()];
        let detector = CategoryDetector::new(keywords, patterns);

        let detected = detector.detect_category("blurry");
        assert_eq!(detected.category, None);
        assert_eq!(detected.score, 0.5);

        let detected = detector.detect_category("blurry sight");
        assert_eq!(detected.category, Some(CategoryTag::Vision));
        assert_eq!(detected.score, 1.5);
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let err = PhrasePattern::new("(what", 1.0, CategoryTag::General).unwrap_err();
        assert!(matches!(err, EyeqaError::InvalidPattern { .. }));
    }
}
