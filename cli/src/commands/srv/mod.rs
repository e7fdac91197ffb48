//! # EyeQA HTTP API Server
//!
//! File: cli/src/commands/srv/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! `eyeqa srv` exposes the assistant over a small JSON API so web front ends
//! can use it. Options cover the port (with automatic fallback if it is in
//! use), the host interface and CORS.
//!
//! ## Architecture
//!
//! - `config.rs`: Argument parsing and merging with the `[server]` settings
//! - `handlers.rs`: Request and response types and the route handlers
//! - `server_logic.rs`: Router setup, port selection and graceful shutdown
//!
//! ## Examples
//!
//! ```bash
//! # Serve on the configured address (127.0.0.1:8080 by default)
//! eyeqa srv
//!
//! # Another port and interface, without CORS
//! eyeqa srv --port 9000 --host 0.0.0.0 --no-cors
//!
//! curl -s -X POST localhost:8080/api/ask \
//!      -H 'content-type: application/json' \
//!      -d '{"question": "will it hurt"}'
//! ```
//!
use crate::commands::load_assistant;
use crate::core::error::Result;
use tracing::info;

pub use config::SrvArgs;

pub mod config;
pub mod handlers;
pub mod server_logic;

/// # Handle Server Command (`handle_srv`)
///
/// Loads the assistant, resolves the effective server configuration and runs
/// the server until shutdown.
pub async fn handle_srv(args: SrvArgs) -> Result<()> {
    info!("Handling srv command with args: {:?}", args);

    let (cfg, assistant) = load_assistant(&args.knowledge)?;
    let config = config::ServerConfig::resolve(&args, &cfg.server)?;
    info!("Effective server config: {:?}", config);

    server_logic::run_server(config, assistant).await?;
    Ok(())
}
