//! CLI argument definitions for the QueueLess assistant.
//!
//! Uses `clap` with derive macros for ergonomic argument parsing.
//! Priority resolution: CLI args > env vars > config file > defaults.

use std::path::PathBuf;

use clap::Parser;
use queueless_core::config::{ExportConfig, KnowledgeConfig};

/// QueueLess support assistant: chat with the landing-page bot from a terminal.
#[derive(Parser, Debug)]
#[command(name = "queueless", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Knowledge base TOML file (defaults to the bundled one).
    #[arg(short = 'k', long = "knowledge")]
    pub knowledge: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,

    /// Answer a single message and exit.
    #[arg(short = 'm', long = "message")]
    pub message: Option<String>,

    /// Directory exported transcripts are written to.
    #[arg(short = 'e', long = "export-dir")]
    pub export_dir: Option<PathBuf>,

    /// With --message, print the knowledge scores before the reply.
    #[arg(long = "explain", requires = "message")]
    pub explain: bool,
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > QUEUELESS_CONFIG env var > ~/.queueless/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("QUEUELESS_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the knowledge file. `None` means the bundled table.
    ///
    /// Priority: --knowledge flag > config file value.
    pub fn resolve_knowledge_path(&self, config: &KnowledgeConfig) -> Option<PathBuf> {
        self.knowledge
            .clone()
            .or_else(|| config.path.as_ref().map(PathBuf::from))
    }

    /// Resolve the log level.
    ///
    /// Priority: --log-level flag > config file value.
    pub fn resolve_log_level(&self, config_level: &str) -> String {
        self.log_level
            .clone()
            .unwrap_or_else(|| config_level.to_string())
    }

    /// Resolve the full path of the exported transcript.
    ///
    /// Priority: --export-dir flag > config file value.
    pub fn resolve_export_path(&self, config: &ExportConfig) -> PathBuf {
        let dir = self
            .export_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.dir));
        dir.join(&config.file_name)
    }
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".queueless").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".queueless").join("config.toml");
    }
    PathBuf::from("config.toml")
}
