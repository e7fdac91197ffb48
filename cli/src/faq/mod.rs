//! # EyeQA Question Answering Core
//!
//! File: cli/src/faq/mod.rs
//!
//! ## Overview
//!
//! Everything that turns a user's text into a canned answer about eye tissue
//! transplantation. The core is synchronous and holds no global state: the
//! knowledge base is loaded once and shared behind an `Arc`.
//!
//! ## Architecture
//!
//! - `category`: the closed set of topic tags
//! - `scoring`: normalization, keyword hits, token overlap and the two
//!   weighting strategies built on them
//! - `keywords`: per-category keyword tables for matcher and detector
//! - `knowledge`: the question/answer table and its TOML loader
//! - `matcher`: the tiered answer matcher
//! - `detector`: weighted category detection with phrase patterns
//! - `suggestions`: starter and follow-up questions
//! - `assistant`: the `get_answer` boundary used by every front end
//! - `history` and `conversation`: chat session state and persistence
//!
pub mod assistant;
pub mod category;
pub mod conversation;
pub mod detector;
pub mod history;
pub mod keywords;
pub mod knowledge;
pub mod matcher;
pub mod scoring;
pub mod suggestions;

pub use assistant::Assistant;
pub use category::CategoryTag;
pub use knowledge::KnowledgeBase;
