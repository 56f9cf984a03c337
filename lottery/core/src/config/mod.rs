//! TOML Configuration File Support
//!
//! Configuration lives at `$XDG_CONFIG_HOME/lottery/lottery.toml` (typically
//! `~/.config/lottery/lottery.toml`), or wherever `LOTTERY_CONFIG` points.
//!
//! # Configuration Priority
//!
//! 1. Environment variables
//! 2. TOML configuration file
//! 3. Default values
//!
//! # Example Configuration
//!
//! ```toml
//! [animation]
//! duration_ms = 10000
//! loops = 3
//! tick_interval_ms = 20
//!
//! [strip]
//! tile_size = 60.0
//! spacing = 10.0
//! alignment_x = 50.0
//!
//! [audio]
//! enabled = true
//! sounds_dir = "/usr/share/lottery/sounds"
//! fade_step = 5
//! fade_interval_ms = 50
//!
//! [pool]
//! range_policy = "empty"
//! # max_range_len = 1000000
//! replace_by_default = true
//!
//! [display]
//! pixels_per_column = 10.0
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::animation::StripGeometry;
use crate::audio::Volume;
use crate::pool::{ParserConfig, RangePolicy};

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "LOTTERY_CONFIG";

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Where the configuration came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// At least one environment variable applied
    Env,
    /// Loaded from a TOML file
    File,
    /// Built-in defaults only
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Env => write!(f, "environment"),
            Self::File => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

// =============================================================================
// TOML Configuration Structures
// =============================================================================

/// `[animation]` section
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationToml {
    /// Scroll duration in milliseconds
    pub duration_ms: Option<u64>,
    /// Full passes over the strip before settling
    pub loops: Option<u32>,
    /// Frame tick interval in milliseconds
    pub tick_interval_ms: Option<u64>,
}

/// `[strip]` section
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StripToml {
    /// Tile width in pixels
    pub tile_size: Option<f64>,
    /// Gap between tiles in pixels
    pub spacing: Option<f64>,
    /// Alignment marker position in pixels
    pub alignment_x: Option<f64>,
}

/// `[audio]` section
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioToml {
    /// Whether to play sound at all
    pub enabled: Option<bool>,
    /// Directory holding `wheel/` and `winner/`
    pub sounds_dir: Option<PathBuf>,
    /// Volume decrement per fade step
    pub fade_step: Option<u8>,
    /// Milliseconds between fade steps
    pub fade_interval_ms: Option<u64>,
    /// Starting volume for new sounds (0-100)
    pub initial_volume: Option<u8>,
}

/// `[pool]` section
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolToml {
    /// Handling of descending ranges
    pub range_policy: Option<RangePolicy>,
    /// Largest expansion allowed for one range (unset: no cap)
    pub max_range_len: Option<u64>,
    /// Initial value of the replace toggle
    pub replace_by_default: Option<bool>,
}

/// `[display]` section
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayToml {
    /// Strip pixels per terminal column
    pub pixels_per_column: Option<f64>,
}

/// Top-level TOML configuration structure
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LotteryToml {
    /// Animation section
    pub animation: AnimationToml,
    /// Strip geometry section
    pub strip: StripToml,
    /// Audio section
    pub audio: AudioToml,
    /// Pool section
    pub pool: PoolToml,
    /// Display section
    pub display: DisplayToml,
}

// =============================================================================
// Resolved Configuration
// =============================================================================

/// Timing of one draw
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationConfig {
    /// Scroll duration
    pub duration: Duration,
    /// Full passes over the strip before settling
    pub loops: u32,
    /// Frame tick interval for surfaces
    pub tick_interval: Duration,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(10_000),
            loops: 3,
            tick_interval: Duration::from_millis(20),
        }
    }
}

/// Sound playback settings
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AudioConfig {
    /// Whether to play sound at all
    pub enabled: bool,
    /// Directory holding `wheel/` and `winner/`
    pub sounds_dir: PathBuf,
    /// Volume decrement per fade step
    pub fade_step: u8,
    /// Time between fade steps
    pub fade_interval: Duration,
    /// Starting volume for new sounds
    pub initial_volume: Volume,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sounds_dir: PathBuf::from("sounds"),
            fade_step: 5,
            fade_interval: Duration::from_millis(50),
            initial_volume: Volume::MAX,
        }
    }
}

/// Centralized configuration
#[derive(Clone, Debug)]
pub struct LotteryConfig {
    /// Draw timing
    pub animation: AnimationConfig,
    /// Tile strip dimensions
    pub geometry: StripGeometry,
    /// Sound settings
    pub audio: AudioConfig,
    /// Pool text parsing
    pub parser: ParserConfig,
    /// Initial value of the replace toggle
    pub replace_by_default: bool,
    /// Strip pixels per terminal column
    pub pixels_per_column: f64,
    /// Path to the config file that was loaded (if any)
    pub config_file_path: Option<PathBuf>,
    source: ConfigSource,
}

impl Default for LotteryConfig {
    fn default() -> Self {
        Self {
            animation: AnimationConfig::default(),
            geometry: StripGeometry::default(),
            audio: AudioConfig::default(),
            parser: ParserConfig::default(),
            replace_by_default: true,
            pixels_per_column: 10.0,
            config_file_path: None,
            source: ConfigSource::Default,
        }
    }
}

impl LotteryConfig {
    /// Primary source of this configuration
    #[must_use]
    pub fn source(&self) -> ConfigSource {
        self.source
    }

    /// Check value ranges
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] naming the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::ValidationError(msg.to_string()));

        if self.animation.duration.is_zero() {
            return invalid("animation.duration_ms must be greater than 0");
        }
        if self.animation.tick_interval.is_zero() {
            return invalid("animation.tick_interval_ms must be greater than 0");
        }
        if self.geometry.tile_size.is_nan() || self.geometry.tile_size <= 0.0 {
            return invalid("strip.tile_size must be greater than 0");
        }
        if self.geometry.spacing.is_nan() || self.geometry.spacing < 0.0 {
            return invalid("strip.spacing must not be negative");
        }
        if self.audio.fade_step == 0 {
            return invalid("audio.fade_step must be greater than 0");
        }
        if self.pixels_per_column.is_nan() || self.pixels_per_column <= 0.0 {
            return invalid("display.pixels_per_column must be greater than 0");
        }
        Ok(())
    }
}

// =============================================================================
// Configuration Loading
// =============================================================================

/// Get the default configuration file path
///
/// `LOTTERY_CONFIG` if set, else `$XDG_CONFIG_HOME/lottery/lottery.toml`.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|p| p.join("lottery").join("lottery.toml"))
}

/// Load configuration from the default path and the process environment
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be parsed or holds
/// invalid values. A missing config file is not an error.
pub fn load_config() -> Result<LotteryConfig, ConfigError> {
    load_config_from_path(default_config_path())
}

/// Load configuration from a specific path and the process environment
///
/// # Errors
///
/// Returns an error if the specified config file cannot be read or parsed.
pub fn load_config_from_path(path: Option<PathBuf>) -> Result<LotteryConfig, ConfigError> {
    load_config_with_env(path, |key| std::env::var(key).ok())
}

/// Load configuration with an injectable environment lookup
///
/// # Errors
///
/// Same as [`load_config_from_path`].
pub fn load_config_with_env<F>(path: Option<PathBuf>, env: F) -> Result<LotteryConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = LotteryConfig::default();

    if let Some(ref config_path) = path {
        if config_path.exists() {
            let toml_content =
                std::fs::read_to_string(config_path).map_err(|e| ConfigError::ReadError {
                    path: config_path.clone(),
                    source: e,
                })?;

            let toml_config: LotteryToml = toml::from_str(&toml_content)?;
            apply_toml_config(&mut config, &toml_config);
            config.config_file_path = Some(config_path.clone());
            config.source = ConfigSource::File;

            tracing::info!(path = %config_path.display(), "Loaded configuration from file");
        } else {
            tracing::debug!(
                path = %config_path.display(),
                "Config file not found, using defaults"
            );
        }
    }

    apply_env_config(&mut config, env);
    config.validate()?;
    Ok(config)
}

/// Apply TOML configuration values to the config struct
fn apply_toml_config(config: &mut LotteryConfig, toml: &LotteryToml) {
    // Animation
    if let Some(ms) = toml.animation.duration_ms {
        config.animation.duration = Duration::from_millis(ms);
    }
    if let Some(loops) = toml.animation.loops {
        config.animation.loops = loops;
    }
    if let Some(ms) = toml.animation.tick_interval_ms {
        config.animation.tick_interval = Duration::from_millis(ms);
    }

    // Strip geometry
    if let Some(size) = toml.strip.tile_size {
        config.geometry.tile_size = size;
    }
    if let Some(spacing) = toml.strip.spacing {
        config.geometry.spacing = spacing;
    }
    if let Some(x) = toml.strip.alignment_x {
        config.geometry.alignment_x = x;
    }

    // Audio
    if let Some(enabled) = toml.audio.enabled {
        config.audio.enabled = enabled;
    }
    if let Some(ref dir) = toml.audio.sounds_dir {
        config.audio.sounds_dir.clone_from(dir);
    }
    if let Some(step) = toml.audio.fade_step {
        config.audio.fade_step = step;
    }
    if let Some(ms) = toml.audio.fade_interval_ms {
        config.audio.fade_interval = Duration::from_millis(ms);
    }
    if let Some(level) = toml.audio.initial_volume {
        config.audio.initial_volume = Volume::new(level);
    }

    // Pool
    if let Some(policy) = toml.pool.range_policy {
        config.parser.range_policy = policy;
    }
    if let Some(len) = toml.pool.max_range_len {
        config.parser.max_range_len = Some(len);
    }
    if let Some(replace) = toml.pool.replace_by_default {
        config.replace_by_default = replace;
    }

    // Display
    if let Some(ppc) = toml.display.pixels_per_column {
        config.pixels_per_column = ppc;
    }
}

/// Apply environment variable overrides to the config
fn apply_env_config<F>(config: &mut LotteryConfig, env: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(ms) = env("LOTTERY_DURATION_MS").and_then(|v| v.parse::<u64>().ok()) {
        config.animation.duration = Duration::from_millis(ms);
        config.source = ConfigSource::Env;
    }
    if let Some(loops) = env("LOTTERY_LOOPS").and_then(|v| v.parse::<u32>().ok()) {
        config.animation.loops = loops;
        config.source = ConfigSource::Env;
    }
    if let Some(dir) = env("LOTTERY_SOUNDS_DIR") {
        config.audio.sounds_dir = PathBuf::from(dir);
        config.source = ConfigSource::Env;
    }
    if let Some(enabled) = env("LOTTERY_AUDIO") {
        config.audio.enabled = parse_flag(&enabled);
        config.source = ConfigSource::Env;
    }
    if let Some(policy) = env("LOTTERY_RANGE_POLICY") {
        match RangePolicy::from_name(&policy) {
            Some(p) => {
                config.parser.range_policy = p;
                config.source = ConfigSource::Env;
            }
            None => tracing::warn!(value = %policy, "Ignoring unknown LOTTERY_RANGE_POLICY"),
        }
    }
    if let Some(replace) = env("LOTTERY_REPLACE") {
        config.replace_by_default = parse_flag(&replace);
        config.source = ConfigSource::Env;
    }
}

fn parse_flag(value: &str) -> bool {
    value != "0" && !value.eq_ignore_ascii_case("false")
}
