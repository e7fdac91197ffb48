//! # Knowledge Base
//!
//! File: cli/src/faq/knowledge.rs
//!
//! ## Overview
//!
//! The knowledge base is the immutable question/answer table the assistant
//! answers from. It is loaded once at startup, either from the table compiled
//! into the binary (`cli/data/knowledge_base.toml`) or from a TOML file named
//! in the configuration, and then shared read-only.
//!
//! ## File Format
//!
//! ```toml
//! [[entry]]
//! question = "will it hurt"
//! category = "emotional"
//! answer = "Let me ease your mind ..."
//! ```
//!
//! ## Validation
//!
//! Loading fails with an `EyeqaError` when:
//! - the table has no entries
//! - a question or answer is blank
//! - a category name is not a known `CategoryTag`
//! - two questions are equal after normalization (lowercase, trimmed)
//!
use super::category::CategoryTag;
use super::scoring::normalize;
use crate::core::error::{EyeqaError, Result};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::{fs, path::Path};
use tracing::{debug, info};

const BUILTIN_TABLE: &str = include_str!("../../data/knowledge_base.toml");

/// One canned question/answer pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KnowledgeEntry {
    /// Lookup key, stored normalized.
    pub canonical_question: String,
    pub answer: String,
    pub category: CategoryTag,
}

impl KnowledgeEntry {
    pub fn new(
        question: impl AsRef<str>,
        answer: impl Into<String>,
        category: CategoryTag,
    ) -> Self {
        Self {
            canonical_question: normalize(question.as_ref()),
            answer: answer.into(),
            category,
        }
    }
}

/// Shape of a knowledge base TOML document.
#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct KnowledgeFile {
    #[serde(default, rename = "entry")]
    entries: Vec<RawEntry>,
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct RawEntry {
    question: String,
    answer: String,
    // Kept as a string so an unknown name is reported as such.
    category: String,
}

/// Immutable, validated question/answer table.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    entries: Vec<KnowledgeEntry>,
    index: HashMap<String, usize>,
}

impl KnowledgeBase {
    /// Validates `entries` and builds the exact-match index. Table order is
    /// preserved; it decides ties during scoring.
    pub fn from_entries(entries: Vec<KnowledgeEntry>) -> std::result::Result<Self, EyeqaError> {
        if entries.is_empty() {
            return Err(EyeqaError::KnowledgeBase(
                "the knowledge base contains no entries".to_string(),
            ));
        }

        let mut index = HashMap::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            if entry.canonical_question.is_empty() {
                return Err(EyeqaError::KnowledgeBase(format!(
                    "entry #{} has an empty question",
                    position + 1
                )));
            }
            if entry.answer.trim().is_empty() {
                return Err(EyeqaError::KnowledgeBase(format!(
                    "question '{}' has an empty answer",
                    entry.canonical_question
                )));
            }
            if index
                .insert(entry.canonical_question.clone(), position)
                .is_some()
            {
                return Err(EyeqaError::DuplicateQuestion {
                    question: entry.canonical_question.clone(),
                });
            }
        }

        debug!("Knowledge base indexed with {} entries", entries.len());
        Ok(Self { entries, index })
    }

    /// Parses a TOML knowledge base document.
    pub fn from_toml_str(content: &str) -> std::result::Result<Self, EyeqaError> {
        let file: KnowledgeFile = toml::from_str(content)
            .map_err(|e| EyeqaError::KnowledgeBase(format!("invalid TOML: {}", e)))?;

        let entries = file
            .entries
            .into_iter()
            .map(|raw| -> std::result::Result<KnowledgeEntry, EyeqaError> {
                let category = raw.category.parse::<CategoryTag>()?;
                Ok(KnowledgeEntry::new(raw.question, raw.answer, category))
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Self::from_entries(entries)
    }

    /// The table compiled into the binary.
    pub fn builtin() -> std::result::Result<Self, EyeqaError> {
        Self::from_toml_str(BUILTIN_TABLE)
    }

    /// Reads and parses a knowledge base file.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        info!("Loading knowledge base from: {}", path.display());
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read knowledge base file: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to load knowledge base from: {}", path.display()))
    }

    /// Exact lookup by an already normalized question.
    pub fn lookup(&self, normalized: &str) -> Option<&KnowledgeEntry> {
        self.index.get(normalized).map(|&i| &self.entries[i])
    }

    /// All entries in table order.
    pub fn entries(&self) -> &[KnowledgeEntry] {
        &self.entries
    }

    /// Entries of one category, in table order.
    pub fn in_category(
        &self,
        category: CategoryTag,
    ) -> impl Iterator<Item = &KnowledgeEntry> + '_ {
        self.entries.iter().filter(move |e| e.category == category)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_builtin_table_loads() {
        let kb = KnowledgeBase::builtin().expect("built-in table must be valid");
        assert_eq!(kb.len(), 86);
        for category in CategoryTag::ALL {
            assert!(
                kb.in_category(category).next().is_some(),
                "no entries for {}",
                category
            );
        }
    }

    #[test]
    fn test_builtin_questions_are_normalized() {
        let kb = KnowledgeBase::builtin().unwrap();
        for entry in kb.entries() {
            assert_eq!(entry.canonical_question, normalize(&entry.canonical_question));
        }
        assert!(kb.lookup("when can i return to work").is_some());
    }

    #[test]
    fn test_lookup_requires_normalized_key() {
        let kb = KnowledgeBase::from_entries(vec![KnowledgeEntry::new(
            "  Will It Hurt ",
            "Not much.",
            CategoryTag::Emotional,
        )])
        .unwrap();
        assert_eq!(kb.lookup("will it hurt").unwrap().answer, "Not much.");
        assert!(kb.lookup("Will It Hurt").is_none());
    }

    #[test]
    fn test_rejects_duplicates_after_normalization() {
        let err = KnowledgeBase::from_entries(vec![
            KnowledgeEntry::new("Can I drive", "a", CategoryTag::Lifestyle),
            KnowledgeEntry::new("can i drive ", "b", CategoryTag::Lifestyle),
        ])
        .unwrap_err();
        assert!(matches!(err, EyeqaError::DuplicateQuestion { ref question } if question == "can i drive"));
    }

    #[test]
    fn test_rejects_empty_table() {
        let err = KnowledgeBase::from_toml_str("").unwrap_err();
        assert!(matches!(err, EyeqaError::KnowledgeBase(_)));
    }

    #[test]
    fn test_rejects_blank_answer() {
        let err = KnowledgeBase::from_entries(vec![KnowledgeEntry::new(
            "q",
            "   ",
            CategoryTag::General,
        )])
        .unwrap_err();
        assert!(err.to_string().contains("empty answer"));
    }

    #[test]
    fn test_rejects_unknown_category() {
        let toml = r#"
            [[entry]]
            question = "what are the success rates"
            category = "statistics"
            answer = "High."
        "#;
        let err = KnowledgeBase::from_toml_str(toml).unwrap_err();
        assert!(matches!(err, EyeqaError::UnknownCategory { ref name } if name == "statistics"));
    }

    #[test]
    fn test_load_from_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("kb.toml");
        fs::write(
            &path,
            r#"
            [[entry]]
            question = "What Is A Cornea"
            category = "general"
            answer = "The clear front window of the eye."

            [[entry]]
            question = "how long is recovery"
            category = "recovery"
            answer = "Months."
            "#,
        )
        .unwrap();

        let kb = KnowledgeBase::load_from_path(&path).unwrap();
        assert_eq!(kb.len(), 2);
        assert_eq!(kb.entries()[0].canonical_question, "what is a cornea");
        assert_eq!(kb.in_category(CategoryTag::Recovery).count(), 1);
    }

    #[test]
    fn test_load_from_missing_path_has_context() {
        let dir = tempdir().unwrap();
        let err = KnowledgeBase::load_from_path(&dir.path().join("missing.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read knowledge base file"));
    }
}
