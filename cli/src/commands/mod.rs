//! # EyeQA Command Modules
//!
//! File: cli/src/commands/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module aggregates all top-level commands of the EyeQA CLI and the
//! small amount of setup they share (loading the configuration and building
//! the `Assistant` over the right knowledge base).
//!
//! ## Commands
//!
//! - `ask`: Answer a single question
//! - `detect`: Show the detected category of a message
//! - `list`: List the known questions or suggestions
//! - `chat`: Interactive conversation in the terminal
//! - `srv`: HTTP API server
//!
//! Each command defines its own arguments structure and an async handler.
//!
use crate::core::config::{self, Config};
use crate::core::error::Result;
use crate::faq::{Assistant, KnowledgeBase};
use anyhow::Context;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// Answer a single question. Prints the answer text.
pub mod ask;
/// Interactive terminal conversation with suggestions and history.
pub mod chat;
/// Category detection for arbitrary text.
pub mod detect;
/// Listing of canonical questions and suggestions.
pub mod list;
/// HTTP API exposing the assistant. Includes configuration and server logic.
pub mod srv;

/// Knowledge base selection shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct KnowledgeArgs {
    /// TOML knowledge base to use instead of the configured or built-in one.
    #[arg(long, short = 'k', value_name = "FILE")]
    pub knowledge: Option<PathBuf>,
}

/// Loads configuration and builds an assistant.
///
/// The `--knowledge` flag wins over `[knowledge] path`, which wins over the
/// built-in table.
pub(crate) fn load_assistant(args: &KnowledgeArgs) -> Result<(Config, Arc<Assistant>)> {
    let cfg = config::load_config().context("Failed to load EyeQA configuration")?;
    let knowledge = match &args.knowledge {
        Some(path) => {
            debug!("Using knowledge base from --knowledge: {}", path.display());
            KnowledgeBase::load_from_path(path)?
        }
        None => cfg.knowledge.load()?,
    };
    info!("Knowledge base ready with {} entries", knowledge.len());
    let assistant = Assistant::with_knowledge(Arc::new(knowledge))?;
    Ok((cfg, Arc::new(assistant)))
}
