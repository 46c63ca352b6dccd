//! # Configuration Management
//!
//! This module handles loading the interview service configuration from multiple sources:
//! - TOML configuration files (config.toml)
//! - Environment variables (with APP_ prefix)
//! - Default values (built into the code)
//!
//! ## Key Rust Concepts Used:
//! - **Serde**: Converts between Rust structs and TOML/JSON/environment values
//! - **derive macros**: Generate Debug, Clone, Serialize and Deserialize for us
//! - **#[serde(default)]**: Lets a config file omit whole sections
//! - **Result<T, E>**: Loading and validation both report failures instead of panicking
//!
//! ## Configuration Priority (highest to lowest):
//! 1. `HOST` / `PORT` environment variables (deployment platforms set these)
//! 2. Environment variables (APP_SERVER__HOST, APP_STORAGE__UPLOAD_DIR, etc.)
//! 3. Configuration file (config.toml)
//! 4. Default values (defined in the Default impls)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

/// Questions asked when no catalog is configured, in interview order.
pub const DEFAULT_QUESTIONS: [&str; 5] = [
    "Tell me about yourself and your background.",
    "What are your greatest strengths and weaknesses?",
    "Where do you see yourself in five years?",
    "Why do you want to work for our company?",
    "Tell me about a challenging situation at work and how you handled it.",
];

/// Main application configuration that contains all settings.
///
/// ## Why separate config structs:
/// Each section maps to one part of the service: where it listens (`server`),
/// where uploaded answers land (`storage`), and what gets asked (`interview`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub interview: InterviewConfig,
}

/// Server-specific configuration settings.
///
/// ## Common values:
/// - `host = "127.0.0.1"`: Only accept connections from localhost (development)
/// - `host = "0.0.0.0"`: Accept connections from any IP address
/// - `port = 8080`: The port the interview frontend expects by default
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,  // u16 = unsigned 16-bit integer (0-65535), perfect for port numbers
}

/// Where recorded answers are written.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory for uploaded audio, relative to the working directory unless absolute.
    /// Created at startup if it does not exist.
    pub upload_dir: String,
}

/// Interview content and session rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InterviewConfig {
    /// Question texts in the order they are asked. Ids are assigned from position (1-based).
    pub questions: Vec<String>,

    /// When true, submit and skip are refused once a session has run past the last
    /// question. Off by default: finished sessions keep accepting answers, which is
    /// what existing clients rely on.
    pub reject_after_completion: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),  // Localhost only (safe for development)
            port: 8080,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_dir: "uploads".to_string(),
        }
    }
}

impl Default for InterviewConfig {
    fn default() -> Self {
        Self {
            questions: DEFAULT_QUESTIONS.iter().map(|q| q.to_string()).collect(),
            reject_after_completion: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from multiple sources in priority order.
    ///
    /// ## Configuration Loading Process:
    /// 1. Start with built-in defaults
    /// 2. Override with values from config.toml (if it exists)
    /// 3. Override with environment variables prefixed with APP_
    /// 4. Handle special cases for HOST and PORT environment variables
    ///
    /// ## Environment Variable Examples:
    /// - `APP_SERVER__PORT=3000`: Override server port
    /// - `APP_STORAGE__UPLOAD_DIR=/var/lib/interviews`: Move the upload directory
    /// - `APP_INTERVIEW__REJECT_AFTER_COMPLETION=true`: Refuse answers after the last question
    /// - `PORT=3000`: Special case for deployment platforms
    pub fn load() -> Result<Self> {
        let mut settings = config::Config::builder()
            // 1. Start with defaults - converts our Default impl to config format
            .add_source(config::Config::try_from(&AppConfig::default())?)
            // 2. Load from config.toml file (if it exists) - required(false) means "don't error if missing"
            .add_source(config::File::with_name("config").required(false))
            // 3. Environment variables: APP_STORAGE__UPLOAD_DIR becomes storage.upload_dir.
            // The "__" separator keeps underscores inside field names intact.
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        if let Ok(host) = env::var("HOST") {
            settings = settings.set_override("server.host", host)?;
        }

        if let Ok(port) = env::var("PORT") {
            settings = settings.set_override("server.port", port)?;
        }

        let config = settings.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Validate that the configuration values make sense.
    ///
    /// ## What this checks:
    /// - Server port is not 0
    /// - Upload directory is not blank (we would write answers into the working directory)
    /// - At least one question exists, and none of them is blank
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(anyhow::anyhow!("Server port cannot be 0"));
        }

        if self.storage.upload_dir.trim().is_empty() {
            return Err(anyhow::anyhow!("Upload directory cannot be empty"));
        }

        if self.interview.questions.is_empty() {
            return Err(anyhow::anyhow!("At least one interview question is required"));
        }

        if let Some(position) = self.interview.questions.iter().position(|q| q.trim().is_empty()) {
            return Err(anyhow::anyhow!("Interview question {} is empty", position + 1));
        }

        Ok(())
    }

    /// Address string handed to `HttpServer::bind`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
