//! Style edits coming from the UI controls.

use crate::shapes::{DashPattern, SerializableColor, ShapeStyle, StrokeWidth};
use thiserror::Error;

/// Rejected style input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StyleError {
    #[error("invalid color: {0:?}")]
    InvalidColor(String),
    #[error("invalid stroke width: {0:?}")]
    InvalidStrokeWidth(String),
    #[error("invalid dash pattern: {0}")]
    InvalidDash(String),
    #[error("unknown style property: {0:?}")]
    UnknownProperty(String),
}

/// A single style property change for the selected shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StyleUpdate {
    StrokeColor(SerializableColor),
    FillColor(SerializableColor),
    StrokeWidth(StrokeWidth),
    Dash(DashPattern),
}

impl StyleUpdate {
    /// Parse a property/value pair as emitted by the style controls.
    ///
    /// Property names are `stroke`, `fill`, `strokeWidth` and `dash`. A
    /// non-numeric stroke width is rejected; numeric widths outside the
    /// allowed range are clamped. `dash` takes the checkbox state.
    pub fn parse(property: &str, value: &str) -> Result<Self, StyleError> {
        let value = value.trim();
        match property {
            "stroke" => Ok(Self::StrokeColor(value.parse()?)),
            "fill" => Ok(Self::FillColor(value.parse()?)),
            "strokeWidth" => {
                let width = value
                    .parse::<i64>()
                    .map_err(|_| StyleError::InvalidStrokeWidth(value.to_string()))?;
                Ok(Self::StrokeWidth(StrokeWidth::clamped(width)))
            }
            "dash" => match value {
                "true" | "on" => Ok(Self::Dash(DashPattern::TOGGLE)),
                "false" | "off" | "" => Ok(Self::Dash(DashPattern::Solid)),
                other => Err(StyleError::InvalidDash(other.to_string())),
            },
            other => Err(StyleError::UnknownProperty(other.to_string())),
        }
    }

    /// Write this property into `style`.
    pub fn apply(self, style: &mut ShapeStyle) {
        match self {
            Self::StrokeColor(color) => style.stroke_color = color,
            Self::FillColor(color) => style.fill_color = color,
            Self::StrokeWidth(width) => style.stroke_width = width,
            Self::Dash(dash) => style.dash = dash,
        }
    }
}
