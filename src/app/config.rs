//! Configuration Management

use crate::analysis::rep_segmentation::{BENCH_PRESS_MOVEMENT_THRESHOLD, SQUAT_MOVEMENT_THRESHOLD};
use crate::analysis::smoothing::DEFAULT_WINDOW;
use crate::feedback::DEFAULT_INCHES_PER_UNIT;
use crate::validation::bench_press::DEFAULT_WRIST_HEIGHT_RATIO;
use crate::validation::squat::DEFAULT_KNEE_WIDTH_TOLERANCE;
use crate::workflow::{CounterConfig, Exercise};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Largest accepted moving-average window
pub const MAX_SMOOTHING_WINDOW: usize = 15;

/// Main configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Squat detection settings
    #[serde(default)]
    pub squat: SquatConfig,
    /// Bench press detection settings
    #[serde(default)]
    pub bench_press: BenchPressConfig,
    /// Trajectory smoothing settings
    #[serde(default)]
    pub smoothing: SmoothingConfig,
    /// Report presentation settings
    #[serde(default)]
    pub report: ReportConfig,
}

/// Squat configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SquatConfig {
    /// Minimum smoothed head movement that counts as a direction change
    pub movement_threshold: f64,
    /// Allowed fraction by which knee width may fall short of shoulder width
    pub knee_width_tolerance: f64,
}

/// Bench press configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchPressConfig {
    /// Minimum smoothed wrist movement that counts as a direction change
    pub movement_threshold: f64,
    /// Fraction of chest height the wrists must reach
    pub wrist_height_ratio: f64,
}

/// Smoothing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingConfig {
    /// Moving-average window (samples, odd)
    pub window: usize,
}

/// Report configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Conversion from normalized image units to inches
    pub inches_per_unit: f64,
}

impl Default for SquatConfig {
    fn default() -> Self {
        Self {
            movement_threshold: SQUAT_MOVEMENT_THRESHOLD,
            knee_width_tolerance: DEFAULT_KNEE_WIDTH_TOLERANCE,
        }
    }
}

impl Default for BenchPressConfig {
    fn default() -> Self {
        Self {
            movement_threshold: BENCH_PRESS_MOVEMENT_THRESHOLD,
            wrist_height_ratio: DEFAULT_WRIST_HEIGHT_RATIO,
        }
    }
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self { window: DEFAULT_WINDOW }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            inches_per_unit: DEFAULT_INCHES_PER_UNIT,
        }
    }
}

impl Config {
    /// Validate config values are within acceptable ranges.
    /// Returns Ok(()) if valid, or Err with a description of the first invalid field.
    pub fn validate(&self) -> Result<(), crate::Error> {
        for (name, threshold) in [
            ("squat.movement_threshold", self.squat.movement_threshold),
            ("bench_press.movement_threshold", self.bench_press.movement_threshold),
        ] {
            if !(threshold > 0.0 && threshold <= 0.5) {
                return Err(crate::Error::Config(format!(
                    "{} must be in (0, 0.5], got {}", name, threshold
                )));
            }
        }
        if !(0.0..1.0).contains(&self.squat.knee_width_tolerance) {
            return Err(crate::Error::Config(format!(
                "squat.knee_width_tolerance must be in [0, 1), got {}", self.squat.knee_width_tolerance
            )));
        }
        let ratio = self.bench_press.wrist_height_ratio;
        if !(ratio > 0.0 && ratio <= 2.0) {
            return Err(crate::Error::Config(format!(
                "bench_press.wrist_height_ratio must be in (0, 2], got {}", ratio
            )));
        }
        let window = self.smoothing.window;
        if window == 0 || window % 2 == 0 || window > MAX_SMOOTHING_WINDOW {
            return Err(crate::Error::Config(format!(
                "smoothing.window must be an odd number between 1 and {}, got {}",
                MAX_SMOOTHING_WINDOW, window
            )));
        }
        if !(self.report.inches_per_unit > 0.0) {
            return Err(crate::Error::Config(format!(
                "report.inches_per_unit must be > 0, got {}", self.report.inches_per_unit
            )));
        }
        Ok(())
    }

    /// Signal-processing parameters for one exercise
    pub fn counter_config(&self, exercise: Exercise) -> CounterConfig {
        let movement_threshold = match exercise {
            Exercise::Squat => self.squat.movement_threshold,
            Exercise::BenchPress => self.bench_press.movement_threshold,
        };
        CounterConfig {
            movement_threshold,
            smoothing_window: self.smoothing.window,
        }
    }

    /// Load config from file
    pub fn load(path: &PathBuf) -> Result<Self, crate::Error> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from `path`, falling back to defaults when the file is missing
    pub fn load_or_default(path: &PathBuf) -> Result<Self, crate::Error> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from default location
    pub fn load_default() -> Result<Self, crate::Error> {
        Self::load_or_default(&Self::default_path())
    }

    /// Save config to file
    pub fn save(&self, path: &PathBuf) -> Result<(), crate::Error> {
        let content = self.to_toml()?;

        // Create parent directories
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Save to default location
    pub fn save_default(&self) -> Result<(), crate::Error> {
        self.save(&Self::default_path())
    }

    /// Get default config path
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".rep_analyzer").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// Generate TOML representation
    pub fn to_toml(&self) -> Result<String, crate::Error> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    fn to_value(&self) -> Result<toml::Value, crate::Error> {
        toml::Value::try_from(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Read a single setting by dotted key, e.g. `squat.movement_threshold`
    pub fn get_value(&self, key: &str) -> Result<String, crate::Error> {
        let root = self.to_value()?;
        let mut current = &root;
        for segment in key.split('.') {
            current = current
                .get(segment)
                .ok_or_else(|| crate::Error::InvalidInput(format!("Unknown config key: {}", key)))?;
        }
        Ok(match current {
            toml::Value::String(s) => s.clone(),
            toml::Value::Table(_) => toml::to_string_pretty(current)
                .map_err(|e| crate::Error::Config(e.to_string()))?,
            other => other.to_string(),
        })
    }

    /// Update a single setting by dotted key. The new value must parse as the
    /// setting's existing type and the resulting config must validate.
    pub fn set_value(&mut self, key: &str, raw: &str) -> Result<(), crate::Error> {
        let unknown = || crate::Error::InvalidInput(format!("Unknown config key: {}", key));

        let mut root = self.to_value()?;
        let (parents, field) = match key.rsplit_once('.') {
            Some((parents, field)) => (Some(parents), field),
            None => (None, key),
        };

        let mut current = &mut root;
        if let Some(parents) = parents {
            for segment in parents.split('.') {
                current = current.get_mut(segment).ok_or_else(unknown)?;
            }
        }
        let table = current.as_table_mut().ok_or_else(unknown)?;
        let existing = table.get(field).ok_or_else(unknown)?;
        let parsed = parse_like(existing, raw).ok_or_else(|| {
            crate::Error::InvalidInput(format!(
                "Cannot set {} to '{}': expected {}", key, raw, existing.type_str()
            ))
        })?;
        table.insert(field.to_string(), parsed);

        let updated: Config = root.try_into().map_err(|e: toml::de::Error| crate::Error::Config(e.to_string()))?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }
}

/// Parse `raw` into a value of the same TOML type as `existing`
fn parse_like(existing: &toml::Value, raw: &str) -> Option<toml::Value> {
    let raw = raw.trim();
    match existing {
        toml::Value::Float(_) => raw.parse::<f64>().ok().map(toml::Value::Float),
        toml::Value::Integer(_) => raw.parse::<i64>().ok().map(toml::Value::Integer),
        toml::Value::Boolean(_) => raw.parse::<bool>().ok().map(toml::Value::Boolean),
        toml::Value::String(_) => Some(toml::Value::String(raw.to_string())),
        _ => None,
    }
}
