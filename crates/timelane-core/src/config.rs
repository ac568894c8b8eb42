//! TOML-based timeline configuration.
//!
//! Stores the tunables shared by geometry and the gesture session:
//! - Snap granularity for pointer-driven edits
//! - Resize handle hit margin
//! - Zoom density bounds and step factor
//! - Lane row metrics for vertical layout
//!
//! Configuration is stored at `~/.config/timelane/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use chrono::Duration;

use crate::error::ConfigError;

/// Zoom behavior of a view window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomConfig {
    #[serde(default = "default_min_px_per_day")]
    pub min_px_per_day: f64,
    #[serde(default = "default_max_px_per_day")]
    pub max_px_per_day: f64,
    /// Multiplier applied per zoom-in step; zoom-out divides by it.
    #[serde(default = "default_step_factor")]
    pub step_factor: f64,
}

/// Vertical metrics for rendering lanes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaneConfig {
    #[serde(default = "default_lane_height")]
    pub lane_height_px: f64,
    #[serde(default = "default_header_height")]
    pub header_height_px: f64,
}

/// Timeline configuration.
///
/// Serialized to/from TOML at `~/.config/timelane/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineConfig {
    /// Snap granularity for drag/resize edits, in minutes.
    /// 1440 snaps to whole days; 0 disables snapping.
    #[serde(default = "default_snap_minutes")]
    pub snap_minutes: u32,
    /// Width of the resize handle at each rendered item edge, in pixels.
    #[serde(default = "default_handle_margin")]
    pub handle_margin_px: f64,
    #[serde(default)]
    pub zoom: ZoomConfig,
    #[serde(default)]
    pub lane: LaneConfig,
}

// Default functions
fn default_snap_minutes() -> u32 {
    1440
}
fn default_handle_margin() -> f64 {
    8.0
}
fn default_min_px_per_day() -> f64 {
    60.0
}
fn default_max_px_per_day() -> f64 {
    240.0
}
fn default_step_factor() -> f64 {
    1.25
}
fn default_lane_height() -> f64 {
    60.0
}
fn default_header_height() -> f64 {
    80.0
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min_px_per_day: default_min_px_per_day(),
            max_px_per_day: default_max_px_per_day(),
            step_factor: default_step_factor(),
        }
    }
}

impl Default for LaneConfig {
    fn default() -> Self {
        Self {
            lane_height_px: default_lane_height(),
            header_height_px: default_header_height(),
        }
    }
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            snap_minutes: default_snap_minutes(),
            handle_margin_px: default_handle_margin(),
            zoom: ZoomConfig::default(),
            lane: LaneConfig::default(),
        }
    }
}

impl TimelineConfig {
    /// Snap granularity as a duration
    pub fn snap(&self) -> Duration {
        Duration::minutes(self.snap_minutes as i64)
    }

    fn path() -> Result<PathBuf, ConfigError> {
        let dir = dirs::config_dir()
            .ok_or(ConfigError::NoConfigDir)?
            .join("timelane");
        Ok(dir.join("config.toml"))
    }

    /// Load from disk or return default, writing the default back.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path,
                message: e.to_string(),
            }),
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Load from an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Persist to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::SaveFailed {
                path: path.clone(),
                message: e.to_string(),
            })?;
        }
        self.save_to(&path)
    }

    /// Persist to an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "snap_minutes" => self.snap_minutes.to_string(),
            "handle_margin_px" => self.handle_margin_px.to_string(),
            "zoom.min_px_per_day" => self.zoom.min_px_per_day.to_string(),
            "zoom.max_px_per_day" => self.zoom.max_px_per_day.to_string(),
            "zoom.step_factor" => self.zoom.step_factor.to_string(),
            "lane.lane_height_px" => self.lane.lane_height_px.to_string(),
            "lane.header_height_px" => self.lane.header_height_px.to_string(),
            _ => return None,
        };
        Some(value)
    }

    /// Set a config value by dot-separated key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "snap_minutes" => self.snap_minutes = parse_value(key, value)?,
            "handle_margin_px" => self.handle_margin_px = parse_value(key, value)?,
            "zoom.min_px_per_day" => self.zoom.min_px_per_day = parse_value(key, value)?,
            "zoom.max_px_per_day" => self.zoom.max_px_per_day = parse_value(key, value)?,
            "zoom.step_factor" => self.zoom.step_factor = parse_value(key, value)?,
            "lane.lane_height_px" => self.lane.lane_height_px = parse_value(key, value)?,
            "lane.header_height_px" => self.lane.header_height_px = parse_value(key, value)?,
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        message: format!("cannot parse '{value}'"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = TimelineConfig::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: TimelineConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn config_default_values() {
        let cfg = TimelineConfig::default();
        assert_eq!(cfg.snap_minutes, 1440);
        assert_eq!(cfg.handle_margin_px, 8.0);
        assert_eq!(cfg.zoom.min_px_per_day, 60.0);
        assert_eq!(cfg.zoom.max_px_per_day, 240.0);
        assert_eq!(cfg.zoom.step_factor, 1.25);
        assert_eq!(cfg.lane.lane_height_px, 60.0);
        assert_eq!(cfg.lane.header_height_px, 80.0);
    }

    #[test]
    fn snap_converts_minutes_to_duration() {
        let cfg = TimelineConfig::default();
        assert_eq!(cfg.snap(), Duration::days(1));

        let mut hourly = cfg.clone();
        hourly.snap_minutes = 60;
        assert_eq!(hourly.snap(), Duration::hours(1));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let cfg: TimelineConfig = toml::from_str("snap_minutes = 60").unwrap();
        assert_eq!(cfg.snap_minutes, 60);
        assert_eq!(cfg.handle_margin_px, 8.0);
        assert_eq!(cfg.zoom.step_factor, 1.25);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = TimelineConfig::default();
        assert_eq!(cfg.get("snap_minutes").as_deref(), Some("1440"));
        assert_eq!(cfg.get("zoom.step_factor").as_deref(), Some("1.25"));
        assert_eq!(cfg.get("lane.header_height_px").as_deref(), Some("80"));
        assert!(cfg.get("missing_key").is_none());
    }

    #[test]
    fn set_updates_known_keys() {
        let mut cfg = TimelineConfig::default();
        cfg.set("snap_minutes", "60").unwrap();
        cfg.set("zoom.max_px_per_day", "480").unwrap();
        assert_eq!(cfg.snap_minutes, 60);
        assert_eq!(cfg.zoom.max_px_per_day, 480.0);
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = TimelineConfig::default();
        assert!(cfg.set("nonexistent_key", "1").is_err());
    }

    #[test]
    fn set_rejects_unparsable_value() {
        let mut cfg = TimelineConfig::default();
        assert!(cfg.set("snap_minutes", "not_a_number").is_err());
    }

    #[test]
    fn save_to_and_load_from_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut cfg = TimelineConfig::default();
        cfg.snap_minutes = 30;
        cfg.lane.lane_height_px = 48.0;
        cfg.save_to(&path).unwrap();

        let loaded = TimelineConfig::load_from(&path).unwrap();
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn load_from_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = TimelineConfig::load_from(&dir.path().join("absent.toml"));
        assert!(result.is_err());
    }
}
