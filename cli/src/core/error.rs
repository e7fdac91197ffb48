//! # EyeQA Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout EyeQA. Application
//! plumbing (commands, config loading, the HTTP server) uses `anyhow::Result`
//! with added context, while the FAQ core reports the few failures it can have
//! through the typed `EyeqaError` enum so callers can match on them.
//!
//! ## Architecture
//!
//! - `EyeqaError`: A custom error enum using `thiserror`
//! - `Result<T>`: A type alias for `anyhow::Result<T>`
//!
//! The error kinds cover:
//! - Input validation at the question boundary (`EmptyInput`)
//! - Knowledge base loading and validation
//! - Detector phrase pattern compilation
//! - Configuration and chat history storage
//!
//! ## Examples
//!
//! ```rust
//! match assistant.get_answer(input) {
//!     Ok(answer) => println!("{}", answer),
//!     Err(EyeqaError::EmptyInput) => println!("Please type a question."),
//!     Err(e) => return Err(e.into()),
//! }
//! ```
//!
use thiserror::Error;

/// Custom error type for the EyeQA application.
#[derive(Error, Debug)]
pub enum EyeqaError {
    /// The user submitted an empty or whitespace-only question.
    #[error("Input is empty. Please type a question.")]
    EmptyInput,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Knowledge base error: {0}")]
    KnowledgeBase(String),

    #[error("Duplicate question in knowledge base: '{question}'")]
    DuplicateQuestion { question: String },

    #[error("Unknown category '{name}'.")]
    UnknownCategory { name: String },

    #[error("Invalid phrase pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Chat history error: {0}")]
    History(String),
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;
