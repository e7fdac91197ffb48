//! # Chat History Storage
//!
//! File: cli/src/faq/history.rs
//!
//! ## Overview
//!
//! Conversation messages and the storage interface the chat session persists
//! them through. The session only sees the `HistoryStore` trait; which
//! backend is used is decided by the caller.
//!
//! ## Backends
//!
//! - `JsonFileHistory`: a pretty-printed JSON array in a file. A missing file
//!   loads as an empty history; parent directories are created on save.
//! - `MemoryHistory`: keeps messages in memory; used for `--no-history`
//!   sessions, the HTTP server and tests.
//!
use crate::core::error::{EyeqaError, Result};
use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
    pub time: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
            time: Utc::now(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Bot,
            text: text.into(),
            time: Utc::now(),
        }
    }
}

/// Where a conversation's messages are kept between runs.
pub trait HistoryStore {
    fn load(&self) -> Result<Vec<ChatMessage>>;
    fn save(&self, messages: &[ChatMessage]) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// History stored as JSON in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileHistory {
    path: PathBuf,
}

impl JsonFileHistory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistoryStore for JsonFileHistory {
    fn load(&self) -> Result<Vec<ChatMessage>> {
        if !self.path.exists() {
            debug!("No chat history at {}", self.path.display());
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read chat history: {}", self.path.display()))?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        let messages: Vec<ChatMessage> = serde_json::from_str(&content).map_err(|e| {
            EyeqaError::History(format!(
                "could not parse {}: {}",
                self.path.display(),
                e
            ))
        })?;
        info!(
            "Loaded {} chat messages from {}",
            messages.len(),
            self.path.display()
        );
        Ok(messages)
    }

    fn save(&self, messages: &[ChatMessage]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create history directory: {}", parent.display())
            })?;
        }
        let json = serde_json::to_string_pretty(messages)
            .map_err(|e| EyeqaError::History(format!("could not serialize messages: {}", e)))?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write chat history: {}", self.path.display()))?;
        debug!("Saved {} chat messages", messages.len());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path).with_context(|| {
                format!("Failed to remove chat history: {}", self.path.display())
            })?;
            info!("Cleared chat history at {}", self.path.display());
        }
        Ok(())
    }
}

/// In-memory history.
#[derive(Debug, Default)]
pub struct MemoryHistory {
    messages: Mutex<Vec<ChatMessage>>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<ChatMessage>>> {
        self.messages
            .lock()
            .map_err(|_| EyeqaError::History("history lock poisoned".to_string()).into())
    }
}

impl HistoryStore for MemoryHistory {
    fn load(&self) -> Result<Vec<ChatMessage>> {
        Ok(self.lock()?.clone())
    }

    fn save(&self, messages: &[ChatMessage]) -> Result<()> {
        *self.lock()? = messages.to_vec();
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.lock()?.clear();
        Ok(())
    }
}
