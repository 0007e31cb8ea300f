//! QueueLess assistant binary.
//!
//! Loads configuration and the knowledge base, then answers either a
//! single `--message` or an interactive terminal session.

mod cli;
mod terminal;

use clap::Parser;
use queueless_chat::{KnowledgeBase, Responder};
use queueless_core::{ConversationState, QueuelessConfig};

use crate::cli::CliArgs;
use crate::terminal::TerminalHost;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    let config_file = args.resolve_config_path();
    let config_exists = config_file.exists();
    let (config, config_error) = if config_exists {
        match QueuelessConfig::load(&config_file) {
            Ok(config) => (config, None),
            Err(e) => (QueuelessConfig::default(), Some(e)),
        }
    } else {
        (QueuelessConfig::default(), None)
    };

    // Logs go to stderr so stdout carries only the conversation
    let log_level = args.resolve_log_level(&config.general.log_level);
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level)),
        )
        .init();

    tracing::info!("Starting QueueLess assistant v{}", env!("CARGO_PKG_VERSION"));
    match config_error {
        Some(e) => tracing::warn!(
            path = %config_file.display(),
            error = %e,
            "Failed to load configuration, using defaults"
        ),
        None if config_exists => {
            tracing::info!(path = %config_file.display(), "Configuration loaded")
        }
        None => tracing::debug!(path = %config_file.display(), "No configuration file"),
    }

    let kb = match args.resolve_knowledge_path(&config.knowledge) {
        Some(path) => KnowledgeBase::load(&path)?,
        None => KnowledgeBase::bundled()?,
    };
    tracing::info!(
        entries = kb.knowledge.len(),
        actions = kb.actions.len(),
        "Knowledge base ready"
    );

    let responder = Responder::new(kb, config.responder.clone())?;
    let mut host = TerminalHost::new(args.resolve_export_path(&config.export));

    if let Some(ref message) = args.message {
        if args.explain {
            for line in terminal::explain(&responder, message) {
                println!("{}", line);
            }
        }
        let mut state = ConversationState::new();
        for line in terminal::handle_line(&responder, &mut state, &mut host, message) {
            println!("{}", line);
        }
        return Ok(());
    }

    terminal::run_interactive(&responder, &mut host).await?;
    Ok(())
}
