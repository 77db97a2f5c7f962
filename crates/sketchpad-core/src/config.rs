//! Canvas configuration.

use crate::shapes::ShapeStyle;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default reach, in pixels, of line and stroke hit-testing.
pub const DEFAULT_HIT_TOLERANCE: f64 = 5.0;

/// Default key the drawing is saved under.
pub const DEFAULT_STORAGE_KEY: &str = "drawing";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Tunables for a [`Canvas`](crate::Canvas).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// How far from a line or stroke a press still hits it.
    pub hit_tolerance: f64,
    /// Key under which save/load store the drawing.
    pub storage_key: String,
    /// Style given to newly drawn shapes.
    pub default_style: ShapeStyle,
    /// Upper bound on the points a single pencil stroke records.
    pub max_freehand_points: Option<usize>,
    /// Simplify pencil strokes with this tolerance when the gesture ends.
    pub freehand_simplify_tolerance: Option<f64>,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            hit_tolerance: DEFAULT_HIT_TOLERANCE,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            default_style: ShapeStyle::default(),
            max_freehand_points: None,
            freehand_simplify_tolerance: None,
        }
    }
}

impl CanvasConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_negative = |v: f64| v.is_finite() && v >= 0.0;
        if !non_negative(self.hit_tolerance) {
            return Err(ConfigError::Invalid {
                field: "hit_tolerance",
                reason: format!("{} is not a finite, non-negative distance", self.hit_tolerance),
            });
        }
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "storage_key",
                reason: "must not be empty".to_string(),
            });
        }
        if self.max_freehand_points.is_some_and(|max| max < 2) {
            return Err(ConfigError::Invalid {
                field: "max_freehand_points",
                reason: "a stroke needs room for at least 2 points".to_string(),
            });
        }
        if let Some(tolerance) = self.freehand_simplify_tolerance {
            if !non_negative(tolerance) {
                return Err(ConfigError::Invalid {
                    field: "freehand_simplify_tolerance",
                    reason: format!("{tolerance} is not a finite, non-negative distance"),
                });
            }
        }
        Ok(())
    }
}
