//! # EyeQA Configuration System
//!
//! File: cli/src/core/config.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Loads, merges and validates the EyeQA configuration. Every setting has a
//! built-in default, so running without any configuration file is normal.
//!
//! Configuration sources (in order of precedence):
//! 1. Project-specific `.eyeqa.toml` in the current directory or an ancestor
//!    (the search stops at the first directory containing `.git`)
//! 2. User-specific `config.toml` in the platform config directory
//!    (`~/.config/eyeqa/config.toml` on Linux)
//! 3. Default values defined in the code
//!
//! Command-line flags override the merged result in the individual commands.
//!
//! ## Examples
//!
//! ```toml
//! [knowledge]
//! path = "~/eyeqa/knowledge_base.toml"
//!
//! [chat]
//! thinking_delay_ms = 700
//! suggestion_delay_ms = 500
//! typing_interval_ms = 15
//! history_file = "~/.local/share/eyeqa/history.json"
//! persist_history = true
//!
//! [server]
//! host = "127.0.0.1"
//! port = 8080
//! enable_cors = true
//! ```
//!
//! ```rust
//! let cfg = config::load_config()?;
//! let knowledge = cfg.knowledge.load()?;
//! let history = cfg.chat.history_path();
//! ```
//!
use crate::core::error::{EyeqaError, Result};
use crate::faq::KnowledgeBase;
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::net::IpAddr;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

const PROJECT_CONFIG_FILENAME: &str = ".eyeqa.toml";
const HISTORY_FILENAME: &str = "history.json";

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub knowledge: KnowledgeConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub server: ServerSettings,
}

/// Where the question/answer table comes from.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct KnowledgeConfig {
    /// TOML file replacing the built-in table (can use ~).
    pub path: Option<String>,
}

/// Pacing and persistence for `eyeqa chat`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ChatConfig {
    #[serde(default = "default_thinking_delay")]
    pub thinking_delay_ms: u64,
    #[serde(default = "default_suggestion_delay")]
    pub suggestion_delay_ms: u64,
    #[serde(default = "default_typing_interval")]
    pub typing_interval_ms: u64,
    /// History file (can use ~). Defaults to `history.json` in the platform
    /// data directory.
    pub history_file: Option<String>,
    #[serde(default = "default_persist_history")]
    pub persist_history: bool,
}

/// Defaults for `eyeqa srv`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_enable_cors")]
    pub enable_cors: bool,
}

fn default_thinking_delay() -> u64 {
    700
}
fn default_suggestion_delay() -> u64 {
    500
}
fn default_typing_interval() -> u64 {
    15
}
fn default_persist_history() -> bool {
    true
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_enable_cors() -> bool {
    true
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            thinking_delay_ms: default_thinking_delay(),
            suggestion_delay_ms: default_suggestion_delay(),
            typing_interval_ms: default_typing_interval(),
            history_file: None,
            persist_history: default_persist_history(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            enable_cors: default_enable_cors(),
        }
    }
}

impl KnowledgeConfig {
    /// Loads the configured table, or the built-in one when no path is set.
    pub fn load(&self) -> Result<KnowledgeBase> {
        match &self.path {
            Some(path) => KnowledgeBase::load_from_path(Path::new(path)),
            None => Ok(KnowledgeBase::builtin()?),
        }
    }
}

impl ChatConfig {
    /// Resolved history file location, if one can be determined.
    pub fn history_path(&self) -> Option<PathBuf> {
        match &self.history_file {
            Some(file) => Some(PathBuf::from(file)),
            None => project_dirs().map(|dirs| dirs.data_dir().join(HISTORY_FILENAME)),
        }
    }
}

impl ServerSettings {
    pub fn host_addr(&self) -> Result<IpAddr> {
        self.host.parse::<IpAddr>().map_err(|_| {
            anyhow!(EyeqaError::Config(format!(
                "Invalid server host '{}'. Expected an IP address.",
                self.host
            )))
        })
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "EyeQA", "eyeqa")
}

pub fn load_config() -> Result<Config> {
    let user_config = load_user_config()?;
    let project_config = load_project_config()?;
    let mut merged_config = merge_configs(user_config.unwrap_or_default(), project_config);
    expand_config_paths(&mut merged_config).context("Failed to expand paths in configuration")?;
    validate_config(&merged_config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged_config);
    Ok(merged_config)
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = project_dirs() {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<Config>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    if let Some(project_config_path) = find_project_config_path(&current_dir) {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!("No project configuration file (.eyeqa.toml) found in current directory or ancestors.");
        Ok(None)
    }
}

fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Project values win wherever they differ from the defaults.
fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let project = match project {
        Some(p) => p,
        None => return user,
    };
    let chat_defaults = ChatConfig::default();
    let server_defaults = ServerSettings::default();

    fn pick<T: PartialEq>(project: T, user: T, default: &T) -> T {
        if &project != default {
            project
        } else {
            user
        }
    }

    Config {
        knowledge: KnowledgeConfig {
            path: project.knowledge.path.or(user.knowledge.path),
        },
        chat: ChatConfig {
            thinking_delay_ms: pick(
                project.chat.thinking_delay_ms,
                user.chat.thinking_delay_ms,
                &chat_defaults.thinking_delay_ms,
            ),
            suggestion_delay_ms: pick(
                project.chat.suggestion_delay_ms,
                user.chat.suggestion_delay_ms,
                &chat_defaults.suggestion_delay_ms,
            ),
            typing_interval_ms: pick(
                project.chat.typing_interval_ms,
                user.chat.typing_interval_ms,
                &chat_defaults.typing_interval_ms,
            ),
            history_file: project.chat.history_file.or(user.chat.history_file),
            persist_history: pick(
                project.chat.persist_history,
                user.chat.persist_history,
                &chat_defaults.persist_history,
            ),
        },
        server: ServerSettings {
            host: pick(project.server.host, user.server.host, &server_defaults.host),
            port: pick(project.server.port, user.server.port, &server_defaults.port),
            enable_cors: pick(
                project.server.enable_cors,
                user.server.enable_cors,
                &server_defaults.enable_cors,
            ),
        },
    }
}

fn expand_config_paths(config: &mut Config) -> Result<()> {
    debug!("Expanding paths in configuration...");
    if let Some(path) = config.knowledge.path.as_mut() {
        *path = shellexpand::tilde(path).into_owned();
        debug!("Expanded knowledge base path: {}", path);
    }
    if let Some(file) = config.chat.history_file.as_mut() {
        *file = shellexpand::tilde(file).into_owned();
        debug!("Expanded history file: {}", file);
    }
    Ok(())
}

fn validate_config(config: &Config) -> Result<()> {
    info!("Validating final configuration...");
    if let Some(path) = &config.knowledge.path {
        let kb_path = PathBuf::from(path);
        if !kb_path.is_file() {
            return Err(anyhow!(EyeqaError::Config(format!(
                "Configured knowledge base '{}' does not exist or is not a file.",
                kb_path.display()
            ))));
        }
    }
    if let Some(file) = &config.chat.history_file {
        if PathBuf::from(file).is_dir() {
            return Err(anyhow!(EyeqaError::Config(format!(
                "Configured history file '{}' is a directory.",
                file
            ))));
        }
    }
    config.server.host_addr()?;
    if config.server.port == 0 {
        return Err(anyhow!(EyeqaError::Config(
            "Server port must be between 1 and 65535.".to_string()
        )));
    }
    info!("Configuration validation successful.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use directories::BaseDirs;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_without_any_file() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.chat.thinking_delay_ms, 700);
        assert_eq!(config.chat.suggestion_delay_ms, 500);
        assert_eq!(config.chat.typing_interval_ms, 15);
        assert!(config.chat.persist_history);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert!(config.server.enable_cors);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_deserialize_sections() {
        let config: Config = toml::from_str(
            r#"
            [knowledge]
            path = "~/kb.toml"

            [chat]
            typing_interval_ms = 0
            persist_history = false

            [server]
            port = 9000
            "#,
        )
        .expect("Failed to parse TOML");

        assert_eq!(config.knowledge.path.as_deref(), Some("~/kb.toml"));
        assert_eq!(config.chat.typing_interval_ms, 0);
        assert_eq!(config.chat.thinking_delay_ms, 700);
        assert!(!config.chat.persist_history);
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        assert!(toml::from_str::<Config>("[chat]\nspeed = 3").is_err());
        assert!(toml::from_str::<Config>("[unknown]").is_err());
    }

    #[test]
    fn test_project_overrides_user() {
        let user: Config = toml::from_str(
            r#"
            [knowledge]
            path = "/user/kb.toml"
            [chat]
            thinking_delay_ms = 100
            [server]
            port = 7000
            "#,
        )
        .unwrap();
        let project: Config = toml::from_str(
            r#"
            [server]
            port = 7100
            enable_cors = false
            "#,
        )
        .unwrap();

        let merged = merge_configs(user, Some(project));
        assert_eq!(merged.knowledge.path.as_deref(), Some("/user/kb.toml"));
        assert_eq!(merged.chat.thinking_delay_ms, 100);
        assert_eq!(merged.server.port, 7100);
        assert!(!merged.server.enable_cors);
    }

    #[test]
    fn test_path_expansion() {
        let mut config = Config {
            knowledge: KnowledgeConfig {
                path: Some("~/kb.toml".to_string()),
            },
            chat: ChatConfig {
                history_file: Some("/absolute/history.json".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };

        expand_config_paths(&mut config).unwrap();

        let home_dir = BaseDirs::new().unwrap().home_dir().to_path_buf();
        let expected = home_dir.join("kb.toml").to_string_lossy().into_owned();
        assert_eq!(config.knowledge.path.as_deref(), Some(expected.as_str()));
        assert_eq!(
            config.chat.history_file.as_deref(),
            Some("/absolute/history.json")
        );
    }

    #[test]
    fn test_history_path_prefers_configured_file() {
        let chat = ChatConfig {
            history_file: Some("/tmp/eyeqa-history.json".to_string()),
            ..Default::default()
        };
        assert_eq!(
            chat.history_path(),
            Some(PathBuf::from("/tmp/eyeqa-history.json"))
        );
        if let Some(path) = ChatConfig::default().history_path() {
            assert!(path.ends_with(HISTORY_FILENAME));
        }
    }

    #[test]
    fn test_validate_missing_knowledge_file() {
        let temp_dir = tempdir().unwrap();
        let config = Config {
            knowledge: KnowledgeConfig {
                path: Some(temp_dir.path().join("missing.toml").to_string_lossy().to_string()),
            },
            ..Default::default()
        };
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_validate_invalid_host() {
        let config = Config {
            server: ServerSettings {
                host: "localhost:80".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("Invalid server host"));
    }

    #[test]
    fn test_validate_history_file_is_dir() {
        let temp_dir = tempdir().unwrap();
        let config = Config {
            chat: ChatConfig {
                history_file: Some(temp_dir.path().to_string_lossy().to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_find_project_config_stops_at_git() {
        let root = tempdir().unwrap();
        fs::write(root.path().join(PROJECT_CONFIG_FILENAME), "").unwrap();
        let repo = root.path().join("repo");
        let nested = repo.join("src").join("deep");
        fs::create_dir_all(&nested).unwrap();

        // No .git yet: the search walks up to the root's file.
        assert_eq!(
            find_project_config_path(&nested),
            Some(root.path().join(PROJECT_CONFIG_FILENAME))
        );

        fs::create_dir(repo.join(".git")).unwrap();
        assert_eq!(find_project_config_path(&nested), None);

        fs::write(repo.join(PROJECT_CONFIG_FILENAME), "[server]\nport = 9100\n").unwrap();
        let found = find_project_config_path(&nested).unwrap();
        assert_eq!(load_config_from_path(&found).unwrap().server.port, 9100);
    }

    #[test]
    fn test_knowledge_config_loads_builtin_by_default() {
        let kb = KnowledgeConfig::default().load().unwrap();
        assert!(!kb.is_empty());
    }
}
