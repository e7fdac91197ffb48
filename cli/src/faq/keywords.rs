//! # Category Keyword Tables
//!
//! File: cli/src/faq/keywords.rs
//!
//! ## Overview
//!
//! A `KeywordTable` maps each `CategoryTag` to an ordered list of lexical
//! cues. There are two built-in tables:
//!
//! - [`KeywordTable::matcher_default`]: the compact set the answer matcher
//!   uses for its category-scoped tier.
//! - [`KeywordTable::detector_default`]: a richer superset the category
//!   detector uses to pick follow-up suggestions.
//!
//! Tables are plain values built once at startup and handed to the
//! component that uses them.
//!
use super::category::CategoryTag;

const MATCHER_KEYWORDS: [(CategoryTag, &[&str]); 12] = [
    (
        CategoryTag::General,
        &["what", "explain", "tell", "about", "overview", "basics", "understand"],
    ),
    (
        CategoryTag::Procedure,
        &["surgery", "operation", "procedure", "process", "surgical", "operating"],
    ),
    (
        CategoryTag::Donor,
        &["donate", "donor", "tissue", "donation", "screening", "matching", "preserve"],
    ),
    (
        CategoryTag::Recipient,
        &["receive", "recipient", "qualify", "eligible", "candidacy", "waiting"],
    ),
    (
        CategoryTag::Preparation,
        &["prepare", "before", "pre", "ready", "preparation", "test", "consultation"],
    ),
    (
        CategoryTag::Recovery,
        &["recover", "healing", "after", "post", "follow-up", "rehabilitation"],
    ),
    (
        CategoryTag::Risks,
        &["risk", "complication", "danger", "problem", "issue", "safety", "concern"],
    ),
    (
        CategoryTag::Vision,
        &["see", "vision", "sight", "visual", "clarity", "improvement", "quality"],
    ),
    (
        CategoryTag::Insurance,
        &[
            "cost", "cover", "insurance", "payment", "expense", "financial", "medicare",
            "medicaid",
        ],
    ),
    (
        CategoryTag::Alternatives,
        &["alternative", "option", "different", "instead", "other", "choice"],
    ),
    (
        CategoryTag::Lifestyle,
        &["life", "activity", "daily", "work", "sport", "exercise", "routine"],
    ),
    (
        CategoryTag::Emotional,
        &[
            "scared", "afraid", "nervous", "anxious", "worried", "fear", "stress", "concerned",
        ],
    ),
];

// Appended to the matcher keywords of the same category.
const DETECTOR_EXTRA_KEYWORDS: [(CategoryTag, &[&str]); 12] = [
    (CategoryTag::General, &["information", "describe", "definition"]),
    (CategoryTag::Procedure, &["transplant", "technique", "method", "perform"]),
    (CategoryTag::Donor, &["give", "contribute", "supply"]),
    (CategoryTag::Recipient, &["get", "obtain", "patient", "candidate"]),
    (CategoryTag::Preparation, &["evaluation", "assessment", "prior"]),
    (
        CategoryTag::Recovery,
        &["recuperation", "convalescence", "restoration", "mend"],
    ),
    (CategoryTag::Risks, &["hazard", "side effect", "adverse"]),
    (CategoryTag::Vision, &["acuity", "perception", "view"]),
    (CategoryTag::Insurance, &["price", "afford"]),
    (
        CategoryTag::Alternatives,
        &["substitute", "replacement", "another", "else"],
    ),
    (CategoryTag::Lifestyle, &["habit", "living", "normal"]),
    (CategoryTag::Emotional, &["frightened", "apprehensive"]),
];

/// Ordered mapping from category to lexical cues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordTable {
    sets: Vec<(CategoryTag, Vec<String>)>,
}

impl KeywordTable {
    /// Builds a table from `(category, keywords)` pairs. Keywords are
    /// lowercased; iteration keeps the given order.
    pub fn new<I, K, S>(sets: I) -> Self
    where
        I: IntoIterator<Item = (CategoryTag, K)>,
        K: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let sets = sets
            .into_iter()
            .map(|(category, keywords)| {
                let keywords = keywords
                    .into_iter()
                    .map(|k| k.as_ref().to_lowercase())
                    .collect();
                (category, keywords)
            })
            .collect();
        Self { sets }
    }

    /// Keyword table used by the answer matcher.
    pub fn matcher_default() -> Self {
        Self::new(MATCHER_KEYWORDS.iter().map(|(c, k)| (*c, k.iter())))
    }

    /// Keyword table used by the category detector: the matcher set of each
    /// category followed by its extra cues.
    pub fn detector_default() -> Self {
        Self::new(MATCHER_KEYWORDS.iter().map(|(category, base)| {
            let extra = DETECTOR_EXTRA_KEYWORDS
                .iter()
                .find(|(c, _)| c == category)
                .map(|(_, k)| *k)
                .unwrap_or(&[]);
            (*category, base.iter().chain(extra.iter()))
        }))
    }

    pub fn iter(&self) -> impl Iterator<Item = (CategoryTag, &[String])> + '_ {
        self.sets.iter().map(|(c, k)| (*c, k.as_slice()))
    }

    #[cfg(test)]
    pub fn keywords(&self, category: CategoryTag) -> &[String] {
        self.sets
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, k)| k.as_slice())
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matcher_table_follows_category_order() {
        let table = KeywordTable::matcher_default();
        let order: Vec<CategoryTag> = table.iter().map(|(c, _)| c).collect();
        assert_eq!(order, CategoryTag::ALL.to_vec());
        assert_eq!(table.keywords(CategoryTag::Insurance).len(), 8);
    }

    #[test]
    fn test_detector_table_extends_matcher_table() {
        let matcher = KeywordTable::matcher_default();
        let detector = KeywordTable::detector_default();
        for category in CategoryTag::ALL {
            let base = matcher.keywords(category);
            let rich = detector.keywords(category);
            assert_eq!(&rich[..base.len()], base, "prefix differs for {}", category);
            assert!(rich.len() > base.len());
        }
        assert!(detector
            .keywords(CategoryTag::Risks)
            .contains(&"side effect".to_string()));
    }

    #[test]
    fn test_medicaid_is_unique_to_insurance() {
        let table = KeywordTable::matcher_default();
        let owners: Vec<CategoryTag> = table
            .iter()
            .filter(|(_, k)| k.iter().any(|w| w == "medicaid"))
            .map(|(c, _)| c)
            .collect();
        assert_eq!(owners, vec![CategoryTag::Insurance]);
    }

    #[test]
    fn test_new_lowercases_keywords() {
        let table = KeywordTable::new([(CategoryTag::Vision, ["Sight", "VIEW"])]);
        assert_eq!(table.keywords(CategoryTag::Vision), ["sight", "view"]);
        assert!(table.keywords(CategoryTag::Donor).is_empty());
    }
}
