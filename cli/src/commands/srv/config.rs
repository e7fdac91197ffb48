//! # EyeQA HTTP Server Configuration
//!
//! File: cli/src/commands/srv/config.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Resolves the effective server settings from, in order of priority:
//! 1. Command-line arguments
//! 2. The `[server]` section of the EyeQA configuration
//! 3. Default values (`127.0.0.1:8080`, CORS enabled)
//!
//! ## Examples
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 9000
//! enable_cors = false
//! ```
//!
//! ```rust
//! let server_config = ServerConfig::resolve(&args, &cfg.server)?;
//! println!("Listening on: {}:{}", server_config.host, server_config.port);
//! ```
//!
use crate::commands::KnowledgeArgs;
use crate::core::config::ServerSettings;
use crate::core::error::Result;
use clap::Parser;
use std::net::IpAddr;
use tracing::debug;

/// # Server Command Arguments (`SrvArgs`)
///
/// Arguments accepted by `eyeqa srv`. Unset options fall back to the
/// configuration file, then to the defaults.
#[derive(Parser, Debug)]
pub struct SrvArgs {
    /// Network port to listen on. Defaults to `8080`.
    #[arg(long, short)]
    pub port: Option<u16>,

    /// IP address to bind to. Use `0.0.0.0` to accept connections from other
    /// machines. Defaults to `127.0.0.1`.
    #[arg(long)]
    pub host: Option<IpAddr>,

    /// Disables Cross-Origin Resource Sharing (CORS) headers.
    #[arg(long)]
    pub no_cors: bool,

    #[command(flatten)]
    pub knowledge: KnowledgeArgs,
}

/// # Effective Server Configuration (`ServerConfig`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub host: IpAddr,
    pub enable_cors: bool,
}

impl ServerConfig {
    /// Merges command-line arguments over the configured `[server]` settings.
    pub fn resolve(args: &SrvArgs, settings: &ServerSettings) -> Result<Self> {
        let host = match args.host {
            Some(host) => host,
            None => settings.host_addr()?,
        };
        let config = Self {
            port: args.port.unwrap_or(settings.port),
            host,
            enable_cors: settings.enable_cors && !args.no_cors,
        };
        debug!("Resolved server config: {:?}", config);
        Ok(config)
    }
}
