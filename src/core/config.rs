//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.outline/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct OutlineConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub view: ViewConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub log_level: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ViewConfig {
    pub indent_width: Option<u16>,
    pub bullet: Option<String>,
    pub show_help: Option<bool>,
}

/// Values taken from CLI flags (None = not specified).
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub log_level: Option<String>,
    pub indent_width: Option<u16>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;
pub const DEFAULT_INDENT_WIDTH: u16 = 2;
pub const DEFAULT_BULLET: &str = "•";
/// Indentation beyond this makes deep outlines unreadable on narrow terminals.
pub const MAX_INDENT_WIDTH: u16 = 8;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub log_level: LevelFilter,
    pub indent_width: u16,
    pub bullet: String,
    pub show_help: bool,
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

/// Returns the path to `~/.outline/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".outline").join("config.toml"))
}

/// Load config from `~/.outline/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `OutlineConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<OutlineConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(OutlineConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(OutlineConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: OutlineConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Outline Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# log_level = "debug"                # "off", "error", "warn", "info", "debug", "trace"

# [view]
# indent_width = 2                   # Columns per nesting level (max 8)
# bullet = "•"
# show_help = true                   # Key hints in the bottom line
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

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &OutlineConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Log level: CLI → env → config → default
    let log_level = cli
        .log_level
        .clone()
        .or_else(|| std::env::var("OUTLINE_LOG_LEVEL").ok())
        .or_else(|| config.general.log_level.clone())
        .map(|raw| parse_level(&raw))
        .unwrap_or(DEFAULT_LOG_LEVEL);

    // Indent width: CLI → env → config → default, clamped
    let indent_width = cli
        .indent_width
        .or_else(|| {
            std::env::var("OUTLINE_INDENT_WIDTH")
                .ok()
                .and_then(|v| v.parse().ok())
        })
        .or(config.view.indent_width)
        .unwrap_or(DEFAULT_INDENT_WIDTH)
        .min(MAX_INDENT_WIDTH);

    // Bullet: env → config → default
    let bullet = std::env::var("OUTLINE_BULLET")
        .ok()
        .or_else(|| config.view.bullet.clone())
        .filter(|b| !b.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_BULLET.to_string());

    ResolvedConfig {
        log_level,
        indent_width,
        bullet,
        show_help: config.view.show_help.unwrap_or(true),
    }
}

fn parse_level(raw: &str) -> LevelFilter {
    raw.parse().unwrap_or_else(|_| {
        warn!("Unknown log level '{}', using {}", raw, DEFAULT_LOG_LEVEL);
        DEFAULT_LOG_LEVEL
    })
}
