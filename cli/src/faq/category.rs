//! # Category Tags
//!
//! File: cli/src/faq/category.rs
//!
//! ## Overview
//!
//! Defines `CategoryTag`, the coarse topic label attached to every knowledge
//! base entry. Categories scope the matcher's second tier and select follow-up
//! suggestions; they carry no other meaning.
//!
//! The declaration order of the variants is significant: keyword tables are
//! iterated in this order and ties between categories go to the earlier one.
//!
use crate::core::error::EyeqaError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Topic label for a knowledge base entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryTag {
    General,
    Procedure,
    Donor,
    Recipient,
    Preparation,
    Recovery,
    Risks,
    Vision,
    Insurance,
    Alternatives,
    Lifestyle,
    Emotional,
}

impl CategoryTag {
    /// Every category, in table iteration order.
    pub const ALL: [CategoryTag; 12] = [
        CategoryTag::General,
        CategoryTag::Procedure,
        CategoryTag::Donor,
        CategoryTag::Recipient,
        CategoryTag::Preparation,
        CategoryTag::Recovery,
        CategoryTag::Risks,
        CategoryTag::Vision,
        CategoryTag::Insurance,
        CategoryTag::Alternatives,
        CategoryTag::Lifestyle,
        CategoryTag::Emotional,
    ];

    /// Lowercase name used in TOML tables, JSON bodies and CLI arguments.
    pub fn as_str(self) -> &'static str {
        match self {
            CategoryTag::General => "general",
            CategoryTag::Procedure => "procedure",
            CategoryTag::Donor => "donor",
            CategoryTag::Recipient => "recipient",
            CategoryTag::Preparation => "preparation",
            CategoryTag::Recovery => "recovery",
            CategoryTag::Risks => "risks",
            CategoryTag::Vision => "vision",
            CategoryTag::Insurance => "insurance",
            CategoryTag::Alternatives => "alternatives",
            CategoryTag::Lifestyle => "lifestyle",
            CategoryTag::Emotional => "emotional",
        }
    }
}

impl fmt::Display for CategoryTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryTag {
    type Err = EyeqaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        CategoryTag::ALL
            .into_iter()
            .find(|tag| tag.as_str() == wanted)
            .ok_or_else(|| EyeqaError::UnknownCategory {
                name: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trips_through_str() {
        for tag in CategoryTag::ALL {
            assert_eq!(tag.as_str().parse::<CategoryTag>().unwrap(), tag);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(
            " Insurance ".parse::<CategoryTag>().unwrap(),
            CategoryTag::Insurance
        );
    }

    #[test]
    fn test_parse_unknown_category() {
        let err = "statistics".parse::<CategoryTag>().unwrap_err();
        assert!(matches!(err, EyeqaError::UnknownCategory { ref name } if name == "statistics"));
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&CategoryTag::Alternatives).unwrap();
        assert_eq!(json, "\"alternatives\"");
        let back: CategoryTag = serde_json::from_str("\"emotional\"").unwrap();
        assert_eq!(back, CategoryTag::Emotional);
    }
}
