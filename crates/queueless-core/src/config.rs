use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{CoreError, Result};

/// Top-level configuration for the QueueLess assistant.
///
/// Loaded from `~/.queueless/config.toml` by default. Every section falls
/// back to its defaults when omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueuelessConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub responder: ResponderConfig,
    #[serde(default)]
    pub knowledge: KnowledgeConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

impl QueuelessConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: QueuelessConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| CoreError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Tuning for the intent responder.
///
/// The threshold and bonus have no derivation beyond having worked well
/// against the bundled knowledge base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponderConfig {
    /// Minimum knowledge-base score for a confident answer.
    pub confidence_threshold: f32,
    /// Added to an entry's score for every one of its patterns that matches.
    pub pattern_bonus: f32,
    /// Longest accepted message, in characters.
    pub max_message_chars: usize,
    /// Expand chat slang ("vc", "obg", ...) before matching.
    pub expand_slang: bool,
}

impl Default for ResponderConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.28,
            pattern_bonus: 0.2,
            max_message_chars: 2000,
            expand_slang: false,
        }
    }
}

/// Where the knowledge base comes from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KnowledgeConfig {
    /// Path to a knowledge TOML file. `None` uses the bundled table.
    pub path: Option<String>,
}

/// Transcript export settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory exported transcripts are written to.
    pub dir: String,
    /// File name of the exported transcript.
    pub file_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dir: ".".to_string(),
            file_name: "chat-queueless.json".to_string(),
        }
    }
}
