//! Configuration file support for the atlas.
//!
//! The configuration carries the layer catalogue, the threshold bands for
//! each metric and user preferences for the initial view. It is stored as
//! pretty-printed JSON.

use serde::{Deserialize, Serialize};

use crate::catalogue::default_catalogue;
use crate::constants::{DEFAULT_CENTER, DEFAULT_ZOOM};
use crate::model::{BaseMap, GeoPoint, LayerDefinition, Viewport};
use crate::styler::{SizeScale, StyleRules, ThresholdBands};

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Get the display name for this log level.
    pub fn name(&self) -> &'static str {
        match self {
            LogLevel::Error => "Error",
            LogLevel::Warn => "Warn",
            LogLevel::Info => "Info",
            LogLevel::Debug => "Debug",
            LogLevel::Trace => "Trace",
        }
    }

    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Atlas configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtlasConfig {
    /// Version of the configuration file format
    pub version: u32,

    /// User preferences
    #[serde(default)]
    pub preferences: Preferences,

    /// Layer catalogue
    #[serde(default = "default_catalogue")]
    pub layers: Vec<LayerDefinition>,

    /// Threshold bands per metric
    #[serde(default)]
    pub bands: BandsConfig,

    /// Optional marker sizing by total claims
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker_size: Option<SizeScale>,
}

/// User preferences section of the config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Whether the layer panel starts open
    #[serde(default = "default_panel_open")]
    pub layer_panel_open: bool,

    /// Initial map center
    #[serde(default = "default_center")]
    pub initial_center: GeoPoint,

    /// Initial zoom level
    #[serde(default = "default_zoom")]
    pub initial_zoom: u8,

    /// Initial base map
    #[serde(default)]
    pub base_map: BaseMap,
}

fn default_panel_open() -> bool {
    true
}

fn default_center() -> GeoPoint {
    GeoPoint::new(DEFAULT_CENTER.0, DEFAULT_CENTER.1)
}

fn default_zoom() -> u8 {
    DEFAULT_ZOOM
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            layer_panel_open: default_panel_open(),
            initial_center: default_center(),
            initial_zoom: default_zoom(),
            base_map: BaseMap::default(),
        }
    }
}

impl Preferences {
    /// The viewport to mount with.
    pub fn initial_viewport(&self) -> Viewport {
        Viewport::new(self.initial_center, self.initial_zoom, self.base_map)
    }
}

/// Threshold band section of the config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandsConfig {
    #[serde(default = "ThresholdBands::saturation")]
    pub saturation: ThresholdBands,
    #[serde(default = "ThresholdBands::ndvi")]
    pub ndvi: ThresholdBands,
}

impl Default for BandsConfig {
    fn default() -> Self {
        Self {
            saturation: ThresholdBands::saturation(),
            ndvi: ThresholdBands::ndvi(),
        }
    }
}

impl AtlasConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            preferences: Preferences::default(),
            layers: default_catalogue(),
            bands: BandsConfig::default(),
            marker_size: None,
        }
    }

    /// Styling rules built from the bands and marker sizing.
    pub fn style_rules(&self) -> StyleRules {
        StyleRules {
            saturation: self.bands.saturation.clone(),
            ndvi: self.bands.ndvi.clone(),
            size: self.marker_size,
        }
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        // Validate version compatibility
        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        Ok(config)
    }

    /// Get the default filename for the config file.
    pub fn default_filename() -> &'static str {
        "fra-atlas-config.json"
    }

    /// Get the default config file path for auto-load/save.
    /// Returns None on WASM (no filesystem access).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_path() -> Option<std::path::PathBuf> {
        // Try to use XDG config directory, fall back to home directory
        if let Some(config_dir) = dirs::config_dir() {
            Some(config_dir.join("fra-atlas").join(Self::default_filename()))
        } else {
            dirs::home_dir().map(|home_dir| {
                home_dir
                    .join(".config")
                    .join("fra-atlas")
                    .join(Self::default_filename())
            })
        }
    }

    /// Load configuration from an explicit path.
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Try to load configuration from the default path.
    /// Returns None if the file doesn't exist or can't be read.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_default_path() -> Option<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            log::debug!("No config file found at {:?}", path);
            return None;
        }

        match Self::load_from_path(&path) {
            Ok(config) => Some(config),
            Err(e) => {
                log::warn!("Failed to load config file {:?}: {}", path, e);
                None
            }
        }
    }

    /// Save configuration to the default path.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_default_path(&self) -> Result<(), ConfigError> {
        let path = Self::default_path().ok_or_else(|| {
            ConfigError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine config directory",
            ))
        })?;

        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = self.to_json()?;
        std::fs::write(&path, json)?;
        log::info!("Saved configuration to {:?}", path);
        Ok(())
    }
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration file version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// I/O error when reading/writing config
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
