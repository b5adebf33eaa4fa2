//! Configuration system

pub use serde::{Deserialize, Serialize};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        // Try different formats
        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, Default::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Sensor engine configuration.
///
/// Unrecognized or out-of-range values are handled permissively at the point
/// of use: a real-time loop is better served by a skipped detection than by
/// a rejected configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    /// Scheduler ticks between check cycles (minimum 1). The interval is in
    /// ticks, so the effective rate scales with the scheduler tick rate.
    pub frequency: u32,

    /// Grid cell size in world units for the broad-phase buckets
    pub cell_size: f32,

    /// Emit a per-cycle diagnostic summary through the logger
    pub use_debug: bool,

    /// Overlay color (rgb) for hosts that draw debug shapes
    pub debug_color: [f32; 3],

    /// Overlay opacity for hosts that draw debug shapes
    pub debug_opacity: f32,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            frequency: 3,
            cell_size: 80.0,
            use_debug: false,
            debug_color: [0.2, 0.9, 0.4],
            debug_opacity: 0.35,
        }
    }
}

impl Config for SensorConfig {}
