//! # EyeQA Main Entry Point
//!
//! File: cli/src/main.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This file is the main entry point for the EyeQA CLI, a keyword-driven
//! question answering assistant for eye tissue transplantation. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Routing execution to appropriate command handlers
//!
//! ## Examples
//!
//! ```bash
//! # Get help
//! eyeqa --help
//!
//! # Ask one question with debug logging
//! eyeqa -vv ask how long is the recovery
//!
//! # Start a conversation
//! eyeqa chat
//! ```
//!
//! Command processing flow:
//! 1. Parse command-line args via Clap
//! 2. Configure logging based on verbosity level
//! 3. Route to appropriate command handler
//! 4. Format and display any errors that occur
//!
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Command handlers (ask, chat, srv, etc.)
mod core; // Core infrastructure (errors, config)
mod faq; // Matching, detection and conversation logic

#[derive(Parser, Debug)]
#[command(
    name = "eyeqa",
    about = "👁️ EyeQA: Eye tissue transplantation question answering",
    long_about = "Answer questions about eye tissue transplantation from a curated knowledge base.\n\
                  Ask single questions, chat interactively, or serve a JSON API.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Parser, Debug)]
enum Commands {
    #[command(alias = "a")]
    Ask(commands::ask::AskArgs),
    #[command(alias = "d")]
    Detect(commands::detect::DetectArgs),
    #[command(alias = "l")]
    List(commands::list::ListArgs),
    #[command(alias = "c")]
    Chat(commands::chat::ChatArgs),
    Srv(commands::srv::SrvArgs),
}

fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level(cli.verbose)));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = match cli.command {
        Commands::Ask(args) => commands::ask::handle_ask(args).await,
        Commands::Detect(args) => commands::detect::handle_detect(args).await,
        Commands::List(args) => commands::list::handle_list(args).await,
        Commands::Chat(args) => commands::chat::handle_chat(args).await,
        Commands::Srv(args) => commands::srv::handle_srv(args).await,
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
