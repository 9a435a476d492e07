//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.quill/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct QuillConfig {
    #[serde(default)]
    pub general: GeneralConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// "json" or "memory".
    pub backend: Option<String>,
    /// Where posts, focus state, and logs live. Defaults to `~/.quill`.
    pub data_dir: Option<String>,
    /// How long a toast stays on screen.
    pub toast_seconds: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BACKEND: &str = "json";
pub const DEFAULT_TOAST_SECONDS: u64 = 4;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub backend: String,
    pub data_dir: PathBuf,
    pub toast_seconds: u64,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the default data directory, `~/.quill`.
pub fn default_data_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".quill"))
}

/// Returns the path to `~/.quill/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    default_data_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.quill/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `QuillConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<QuillConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(QuillConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(QuillConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: QuillConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# quill configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# backend = "json"          # "json" (durable) or "memory" (throwaway)
# data_dir = "~/.quill"     # Where posts and focus state live
# toast_seconds = 4         # How long notifications stay visible
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars
/// → CLI. `cli_backend` and `cli_data_dir` come from CLI flags (None = not
/// specified).
pub fn resolve(
    config: &QuillConfig,
    cli_backend: Option<&str>,
    cli_data_dir: Option<&Path>,
) -> ResolvedConfig {
    // Backend: CLI → env → config → default
    let backend = cli_backend
        .map(|s| s.to_string())
        .or_else(|| std::env::var("QUILL_BACKEND").ok())
        .or_else(|| config.general.backend.clone())
        .unwrap_or_else(|| DEFAULT_BACKEND.to_string());

    // Data dir: CLI → env → config → ~/.quill → cwd fallback
    let data_dir = cli_data_dir
        .map(Path::to_path_buf)
        .or_else(|| std::env::var("QUILL_DATA_DIR").ok().map(PathBuf::from))
        .or_else(|| config.general.data_dir.as_ref().map(expand_home))
        .or_else(default_data_dir)
        .unwrap_or_else(|| PathBuf::from("."));

    ResolvedConfig {
        backend,
        data_dir,
        toast_seconds: config
            .general
            .toast_seconds
            .unwrap_or(DEFAULT_TOAST_SECONDS),
    }
}

/// Expand a leading `~/` against the home directory.
fn expand_home(raw: &String) -> PathBuf {
    if let Some(rest) = raw.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = QuillConfig::default();
        assert!(config.general.backend.is_none());
        assert!(config.general.data_dir.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = QuillConfig::default();
        let resolved = resolve(&config, None, None);
        assert_eq!(resolved.backend, DEFAULT_BACKEND);
        assert_eq!(resolved.toast_seconds, DEFAULT_TOAST_SECONDS);
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = QuillConfig {
            general: GeneralConfig {
                backend: Some("memory".to_string()),
                data_dir: Some("/tmp/quill-test".to_string()),
                toast_seconds: Some(9),
            },
        };
        let resolved = resolve(&config, None, None);
        assert_eq!(resolved.backend, "memory");
        assert_eq!(resolved.data_dir, PathBuf::from("/tmp/quill-test"));
        assert_eq!(resolved.toast_seconds, 9);
    }

    #[test]
    fn test_resolve_cli_wins() {
        let config = QuillConfig {
            general: GeneralConfig {
                backend: Some("memory".to_string()),
                data_dir: Some("/from-config".to_string()),
                toast_seconds: None,
            },
        };
        let cli_dir = PathBuf::from("/from-cli");
        let resolved = resolve(&config, Some("json"), Some(&cli_dir));
        assert_eq!(resolved.backend, "json");
        assert_eq!(resolved.data_dir, cli_dir);
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing — everything else stays default
        let toml_str = r#"
[general]
backend = "memory"
"#;
        let config: QuillConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.backend.as_deref(), Some("memory"));
        assert!(config.general.data_dir.is_none());
        assert!(config.general.toast_seconds.is_none());
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[general]
backend = "json"
data_dir = "/var/quill"
toast_seconds = 2
"#;
        let config: QuillConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.backend.as_deref(), Some("json"));
        assert_eq!(config.general.data_dir.as_deref(), Some("/var/quill"));
        assert_eq!(config.general.toast_seconds, Some(2));
    }
}
