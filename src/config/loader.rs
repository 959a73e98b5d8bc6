//! Configuration file loading with precedence handling.

use crate::config::keybindings::KeyBindings;
use crate::fetch::{
    AssetLocator, DEFAULT_ASSET_BASE_URL, DEFAULT_ASSET_EXTENSION, DEFAULT_ASSET_PREFIX,
};
use crate::model::{KeyAction, PageBounds, ReadingDirection, DEFAULT_TOTAL_PAGES};
use crate::state::mouse_handler::{TapZones, ZoneAction, DEFAULT_SWIPE_THRESHOLD};
use crate::state::navigation::DEFAULT_PREFETCH_RADIUS;
use crate::storage::file::default_storage_path;
use crate::storage::DEFAULT_NAMESPACE;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

/// Pages skipped by the jump keys when not configured.
pub const DEFAULT_JUMP_AMOUNT: u16 = 10;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown fields.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A value parsed but is outside what the reader accepts.
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue {
        /// Field name as written in the config file or environment.
        field: String,
        /// What is wrong with it.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/mushaf/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Number of pages in the book.
    #[serde(default)]
    pub total_pages: Option<u16>,

    /// Base URL of the page images.
    #[serde(default)]
    pub asset_base_url: Option<String>,

    /// Image file-name prefix (`QK`).
    #[serde(default)]
    pub asset_prefix: Option<String>,

    /// Image file extension (`webp`).
    #[serde(default)]
    pub asset_extension: Option<String>,

    /// Pages prefetched on each side of the current page.
    #[serde(default)]
    pub prefetch_radius: Option<u16>,

    /// Which side of the screen means "next page".
    #[serde(default)]
    pub reading_direction: Option<ReadingDirection>,

    /// Columns a drag must exceed to count as a swipe.
    #[serde(default)]
    pub swipe_threshold: Option<u16>,

    /// Pages skipped by the jump keys.
    #[serde(default)]
    pub jump_amount: Option<u16>,

    /// Prefix of every persisted key.
    #[serde(default)]
    pub storage_namespace: Option<String>,

    /// Path of the persisted key/value file.
    #[serde(default)]
    pub storage_path: Option<PathBuf>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Command holding the keep-awake lock, e.g. `["caffeinate", "-d"]`.
    #[serde(default)]
    pub wake_lock_command: Option<Vec<String>>,

    /// Tap zone geometry and meaning.
    #[serde(default)]
    pub tap_zones: Option<TapZonesSection>,

    /// Key binding overrides: action name to list of key specs.
    #[serde(default)]
    pub keybindings: Option<HashMap<String, Vec<String>>>,
}

/// `[tap_zones]` section from TOML.
///
/// ```toml
/// [tap_zones]
/// left_fraction = 0.25
/// right_fraction = 0.25
/// left = "next"
/// center = "toggle-immersive"
/// right = "previous"
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TapZonesSection {
    #[serde(default)]
    pub left_fraction: Option<f64>,
    #[serde(default)]
    pub right_fraction: Option<f64>,
    #[serde(default)]
    pub left: Option<ZoneAction>,
    #[serde(default)]
    pub center: Option<ZoneAction>,
    #[serde(default)]
    pub right: Option<ZoneAction>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub total_pages: u16,
    pub asset_base_url: String,
    pub asset_prefix: String,
    pub asset_extension: String,
    pub prefetch_radius: u16,
    pub reading_direction: ReadingDirection,
    pub swipe_threshold: u16,
    pub jump_amount: u16,
    pub storage_namespace: String,
    pub storage_path: PathBuf,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
    /// Explicit keep-awake command; `None` means detect one.
    pub wake_lock_command: Option<Vec<String>>,
    pub tap_zones: TapZones,
    /// Action name (`toggle-theme`) to key specs (`ctrl+t`).
    pub keybindings: HashMap<String, Vec<String>>,
    /// Start page requested on the command line.
    pub start_page: Option<u16>,
    /// Disable colours (`--no-color` or `NO_COLOR`).
    pub no_color: bool,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            total_pages: DEFAULT_TOTAL_PAGES,
            asset_base_url: DEFAULT_ASSET_BASE_URL.to_string(),
            asset_prefix: DEFAULT_ASSET_PREFIX.to_string(),
            asset_extension: DEFAULT_ASSET_EXTENSION.to_string(),
            prefetch_radius: DEFAULT_PREFETCH_RADIUS,
            reading_direction: ReadingDirection::default(),
            swipe_threshold: DEFAULT_SWIPE_THRESHOLD,
            jump_amount: DEFAULT_JUMP_AMOUNT,
            storage_namespace: DEFAULT_NAMESPACE.to_string(),
            storage_path: default_storage_path(),
            log_file_path: default_log_path(),
            wake_lock_command: None,
            tap_zones: TapZones::default(),
            keybindings: HashMap::new(),
            start_page: None,
            no_color: false,
        }
    }
}

impl ResolvedConfig {
    /// Page range of the configured book.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a zero page count.
    pub fn bounds(&self) -> Result<PageBounds, ConfigError> {
        PageBounds::new(self.total_pages).map_err(|e| ConfigError::InvalidValue {
            field: "total_pages".to_string(),
            reason: e.to_string(),
        })
    }

    /// Locator built from the asset fields.
    pub fn locator(&self) -> AssetLocator {
        AssetLocator::new(
            self.asset_base_url.clone(),
            self.asset_prefix.clone(),
            self.asset_extension.clone(),
        )
    }

    /// Default key map with the configured overrides applied.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the action or key spec that
    /// failed to parse.
    pub fn key_bindings(&self) -> Result<KeyBindings, ConfigError> {
        let mut overrides = HashMap::new();
        for (name, keys) in &self.keybindings {
            let action = KeyAction::from_name(name).ok_or_else(|| ConfigError::InvalidValue {
                field: "keybindings".to_string(),
                reason: format!("unknown action {name:?}"),
            })?;
            overrides.insert(action, keys.clone());
        }

        KeyBindings::default()
            .with_overrides(&overrides)
            .map_err(|spec| ConfigError::InvalidValue {
                field: "keybindings".to_string(),
                reason: format!("unrecognised key {spec:?}"),
            })
    }

    /// Check cross-field constraints that TOML types cannot express.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bounds()?;
        self.tap_zones
            .validate()
            .map_err(|reason| ConfigError::InvalidValue {
                field: "tap_zones".to_string(),
                reason,
            })?;
        if self.jump_amount == 0 {
            return Err(ConfigError::InvalidValue {
                field: "jump_amount".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.storage_namespace.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "storage_namespace".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        self.key_bindings()?;
        Ok(())
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/mushaf/mushaf.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("mushaf").join("mushaf.log")
    } else {
        PathBuf::from("mushaf.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/mushaf/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("mushaf").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `MUSHAF_CONFIG` environment variable
/// 3. Default path `~/.config/mushaf/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var("MUSHAF_CONFIG") {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    let zones = config.tap_zones.unwrap_or_default();
    let default_zones = defaults.tap_zones;

    ResolvedConfig {
        total_pages: config.total_pages.unwrap_or(defaults.total_pages),
        asset_base_url: config.asset_base_url.unwrap_or(defaults.asset_base_url),
        asset_prefix: config.asset_prefix.unwrap_or(defaults.asset_prefix),
        asset_extension: config.asset_extension.unwrap_or(defaults.asset_extension),
        prefetch_radius: config.prefetch_radius.unwrap_or(defaults.prefetch_radius),
        reading_direction: config
            .reading_direction
            .unwrap_or(defaults.reading_direction),
        swipe_threshold: config.swipe_threshold.unwrap_or(defaults.swipe_threshold),
        jump_amount: config.jump_amount.unwrap_or(defaults.jump_amount),
        storage_namespace: config
            .storage_namespace
            .unwrap_or(defaults.storage_namespace),
        storage_path: config.storage_path.unwrap_or(defaults.storage_path),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        wake_lock_command: config.wake_lock_command.or(defaults.wake_lock_command),
        tap_zones: TapZones {
            left_fraction: zones.left_fraction.unwrap_or(default_zones.left_fraction),
            right_fraction: zones.right_fraction.unwrap_or(default_zones.right_fraction),
            left: zones.left.unwrap_or(default_zones.left),
            center: zones.center.unwrap_or(default_zones.center),
            right: zones.right.unwrap_or(default_zones.right),
        },
        keybindings: config.keybindings.unwrap_or(defaults.keybindings),
        start_page: defaults.start_page,
        no_color: defaults.no_color,
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `MUSHAF_DIRECTION`: reading direction (`left-to-right`, `rtl`, ...)
/// - `MUSHAF_ASSET_BASE_URL`: image host
/// - `NO_COLOR`: any non-empty value disables colours
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` for an unrecognised direction.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> Result<ResolvedConfig, ConfigError> {
    if let Ok(direction) = std::env::var("MUSHAF_DIRECTION") {
        config.reading_direction =
            ReadingDirection::parse(&direction).ok_or_else(|| ConfigError::InvalidValue {
                field: "MUSHAF_DIRECTION".to_string(),
                reason: format!("expected left-to-right or right-to-left, got {direction:?}"),
            })?;
    }

    if let Ok(base_url) = std::env::var("MUSHAF_ASSET_BASE_URL") {
        config.asset_base_url = base_url;
    }

    if std::env::var("NO_COLOR").is_ok_and(|v| !v.is_empty()) {
        config.no_color = true;
    }

    Ok(config)
}

/// Command-line values that override every other source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    pub page: Option<u16>,
    pub direction: Option<ReadingDirection>,
    pub storage_path: Option<PathBuf>,
    pub no_color: bool,
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(mut config: ResolvedConfig, cli: CliOverrides) -> ResolvedConfig {
    if let Some(page) = cli.page {
        config.start_page = Some(page);
    }

    if let Some(direction) = cli.direction {
        config.reading_direction = direction;
    }

    if let Some(path) = cli.storage_path {
        config.storage_path = path;
    }

    if cli.no_color {
        config.no_color = true;
    }

    config
}

/// Run the whole precedence chain and validate the result.
///
/// # Errors
///
/// Returns `ConfigError` if the config file is unreadable or invalid, or if
/// the merged configuration fails validation.
pub fn resolve(
    config_path: Option<PathBuf>,
    cli: CliOverrides,
) -> Result<ResolvedConfig, ConfigError> {
    let file = load_config_with_precedence(config_path)?;
    let config = apply_env_overrides(merge_config(file))?;
    let config = apply_cli_overrides(config, cli);
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
