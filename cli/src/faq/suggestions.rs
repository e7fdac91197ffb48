//! # Suggested Questions
//!
//! File: cli/src/faq/suggestions.rs
//!
//! Starter questions offered on a fresh conversation, and three follow-up
//! questions per category offered after an answer.
//!
use super::category::CategoryTag;
use serde::Serialize;

/// A clickable question and the category it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub text: &'static str,
    pub category: CategoryTag,
}

const STARTERS: [Suggestion; 6] = [
    Suggestion {
        text: "What is eye tissue transplantation?",
        category: CategoryTag::General,
    },
    Suggestion {
        text: "How is the transplant procedure performed?",
        category: CategoryTag::Procedure,
    },
    Suggestion {
        text: "Who can donate eye tissue?",
        category: CategoryTag::Donor,
    },
    Suggestion {
        text: "What are the risks of eye transplantation?",
        category: CategoryTag::Risks,
    },
    Suggestion {
        text: "How long is the recovery period?",
        category: CategoryTag::Recovery,
    },
    Suggestion {
        text: "Will my insurance cover the procedure?",
        category: CategoryTag::Insurance,
    },
];

pub fn starter_questions() -> &'static [Suggestion] {
    &STARTERS
}

/// Follow-up question texts for `category`.
pub fn follow_up_questions(category: CategoryTag) -> &'static [&'static str] {
    match category {
        CategoryTag::General => &[
            "What types of eye transplants are available?",
            "How successful are eye transplants?",
            "How common are eye transplants?",
        ],
        CategoryTag::Procedure => &[
            "How long does the surgery take?",
            "Is the procedure painful?",
            "What anesthesia is used for eye transplants?",
        ],
        CategoryTag::Donor => &[
            "How is donor tissue screened?",
            "How long after death can tissue be donated?",
            "Can I specify that I want to donate my eyes?",
        ],
        CategoryTag::Recipient => &[
            "How are recipients selected?",
            "What conditions qualify for transplantation?",
            "How long is the waiting list?",
        ],
        CategoryTag::Preparation => &[
            "What tests are done before surgery?",
            "Should I stop taking medications?",
            "What should I do the night before surgery?",
        ],
        CategoryTag::Recovery => &[
            "When can I return to work?",
            "What medications will I need after surgery?",
            "What follow-up appointments are needed?",
        ],
        CategoryTag::Risks => &[
            "What is the rejection rate?",
            "What complications are most common?",
            "How is rejection treated if it occurs?",
        ],
        CategoryTag::Vision => &[
            "How much vision improvement can I expect?",
            "When will my vision stabilize after surgery?",
            "Will I need glasses after the transplant?",
        ],
        CategoryTag::Insurance => &[
            "What is the average cost without insurance?",
            "Does Medicare cover eye transplants?",
            "Are there financial assistance programs?",
        ],
        CategoryTag::Alternatives => &[
            "What are alternatives to transplantation?",
            "Can artificial corneas be used instead?",
            "What if I decide not to get a transplant?",
        ],
        CategoryTag::Lifestyle => &[
            "Can I play sports after recovery?",
            "Are there activities I should avoid?",
            "How will this affect my daily life?",
        ],
        CategoryTag::Emotional => &[
            "How can I cope with anxiety before surgery?",
            "Are there support groups for recipients?",
            "How can I thank my donor's family?",
        ],
    }
}

/// Follow-ups for `category` as `Suggestion`s tagged with that category.
pub fn follow_ups(category: CategoryTag) -> Vec<Suggestion> {
    follow_up_questions(category)
        .iter()
        .map(|&text| Suggestion { text, category })
        .collect()
}
