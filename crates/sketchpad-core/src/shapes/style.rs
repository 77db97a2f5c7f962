//! Style attributes carried by every shape.

use crate::style::StyleError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Serializable color representation (RGBA8).
///
/// Persisted as a CSS color string: `#rrggbb` when opaque, `#rrggbbaa`
/// otherwise, and `transparent` for fully transparent black.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    pub const fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    pub const fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Whether painting with this color has no visible effect.
    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }
}

impl FromStr for SerializableColor {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || StyleError::InvalidColor(s.to_string());

        match trimmed.to_ascii_lowercase().as_str() {
            "transparent" => return Ok(Self::transparent()),
            "black" => return Ok(Self::black()),
            "white" => return Ok(Self::white()),
            "red" => return Ok(Self::rgb(255, 0, 0)),
            "green" => return Ok(Self::rgb(0, 128, 0)),
            "blue" => return Ok(Self::rgb(0, 0, 255)),
            _ => {}
        }

        let hex = trimmed.strip_prefix('#').ok_or_else(invalid)?;
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| invalid())
        };

        match hex.len() {
            3 => {
                // #rgb -> #rrggbb
                let short = |i: usize| channel(i..i + 1).map(|v| v * 17);
                Ok(Self::rgb(short(0)?, short(1)?, short(2)?))
            }
            6 => Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Ok(Self::new(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for SerializableColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            c if c == Self::transparent() => f.write_str("transparent"),
            Self { r, g, b, a: 255 } => write!(f, "#{r:02x}{g:02x}{b:02x}"),
            Self { r, g, b, a } => write!(f, "#{r:02x}{g:02x}{b:02x}{a:02x}"),
        }
    }
}

impl TryFrom<String> for SerializableColor {
    type Error = StyleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SerializableColor> for String {
    fn from(color: SerializableColor) -> Self {
        color.to_string()
    }
}

/// Stroke width in whole pixels, always within `MIN..=MAX`.
///
/// Stored as an integer. Reading is lenient: `null` (a cleared width
/// field) gives the default and numbers outside the range are clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "Option<f64>", into = "u32")]
pub struct StrokeWidth(u8);

impl StrokeWidth {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 20;
    pub const DEFAULT: Self = Self(2);

    /// Create a stroke width, rejecting values outside `MIN..=MAX`.
    pub fn new(width: u32) -> Result<Self, StyleError> {
        if (u32::from(Self::MIN)..=u32::from(Self::MAX)).contains(&width) {
            Ok(Self(width as u8))
        } else {
            Err(StyleError::InvalidStrokeWidth(width.to_string()))
        }
    }

    /// Create a stroke width, clamping out-of-range values.
    pub fn clamped(width: i64) -> Self {
        Self(width.clamp(i64::from(Self::MIN), i64::from(Self::MAX)) as u8)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.0)
    }
}

impl Default for StrokeWidth {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<Option<f64>> for StrokeWidth {
    fn from(width: Option<f64>) -> Self {
        match width {
            Some(w) if w.is_finite() => Self::clamped(w.round() as i64),
            _ => Self::DEFAULT,
        }
    }
}

impl From<StrokeWidth> for u32 {
    fn from(width: StrokeWidth) -> Self {
        u32::from(width.0)
    }
}

/// Dash pattern for strokes.
///
/// Persisted as `[]` for solid strokes or `[on, off]` for dashed ones.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub enum DashPattern {
    #[default]
    Solid,
    Dashed { on: f64, off: f64 },
}

impl DashPattern {
    /// Pattern applied by the "dashed line" toggle.
    pub const TOGGLE: Self = Self::Dashed { on: 10.0, off: 5.0 };

    pub fn dashed(on: f64, off: f64) -> Result<Self, StyleError> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if valid(on) && valid(off) {
            Ok(Self::Dashed { on, off })
        } else {
            Err(StyleError::InvalidDash(format!("[{on}, {off}]")))
        }
    }

    pub fn is_solid(&self) -> bool {
        matches!(self, Self::Solid)
    }

    /// The on/off lengths, or `None` for a solid stroke.
    pub fn lengths(&self) -> Option<[f64; 2]> {
        match *self {
            Self::Solid => None,
            Self::Dashed { on, off } => Some([on, off]),
        }
    }
}

impl TryFrom<Vec<f64>> for DashPattern {
    type Error = StyleError;

    fn try_from(value: Vec<f64>) -> Result<Self, Self::Error> {
        match value.as_slice() {
            [] => Ok(Self::Solid),
            &[on, off] => Self::dashed(on, off),
            other => Err(StyleError::InvalidDash(format!("{other:?}"))),
        }
    }
}

impl From<DashPattern> for Vec<f64> {
    fn from(dash: DashPattern) -> Self {
        dash.lengths().map(Vec::from).unwrap_or_default()
    }
}

/// Style properties for shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShapeStyle {
    /// Stroke color.
    #[serde(rename = "stroke")]
    pub stroke_color: SerializableColor,
    /// Fill color (transparent = no fill).
    #[serde(rename = "fill")]
    pub fill_color: SerializableColor,
    pub stroke_width: StrokeWidth,
    pub dash: DashPattern,
}

impl ShapeStyle {
    /// The fill color, or `None` when the shape is unfilled.
    pub fn fill(&self) -> Option<SerializableColor> {
        Some(self.fill_color).filter(|c| !c.is_transparent())
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            stroke_color: SerializableColor::black(),
            fill_color: SerializableColor::transparent(),
            stroke_width: StrokeWidth::DEFAULT,
            dash: DashPattern::Solid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_colors() {
        assert_eq!("#ff8000".parse(), Ok(SerializableColor::rgb(255, 128, 0)));
        assert_eq!("#F80".parse(), Ok(SerializableColor::rgb(255, 136, 0)));
        assert_eq!(
            "#11223344".parse(),
            Ok(SerializableColor::new(0x11, 0x22, 0x33, 0x44))
        );
    }

    #[test]
    fn test_parse_named_colors() {
        assert_eq!("black".parse(), Ok(SerializableColor::black()));
        assert_eq!(" Transparent ".parse(), Ok(SerializableColor::transparent()));
    }

    #[test]
    fn test_reject_bad_colors() {
        assert!("".parse::<SerializableColor>().is_err());
        assert!("#12".parse::<SerializableColor>().is_err());
        assert!("#gg0000".parse::<SerializableColor>().is_err());
        assert!("#ééé".parse::<SerializableColor>().is_err());
        assert!("chartreuse".parse::<SerializableColor>().is_err());
    }

    #[test]
    fn test_color_display() {
        assert_eq!(SerializableColor::rgb(255, 0, 16).to_string(), "#ff0010");
        assert_eq!(SerializableColor::transparent().to_string(), "transparent");
        assert_eq!(SerializableColor::new(1, 2, 3, 0).to_string(), "#01020300");
    }

    #[test]
    fn test_stroke_width_bounds() {
        assert!(StrokeWidth::new(0).is_err());
        assert!(StrokeWidth::new(21).is_err());
        assert_eq!(StrokeWidth::new(20).map(StrokeWidth::get), Ok(20));
        assert_eq!(StrokeWidth::clamped(-3).get(), 1);
        assert_eq!(StrokeWidth::clamped(400).get(), 20);
    }

    #[test]
    fn test_stored_stroke_width_is_lenient() {
        let read = |json: &str| serde_json::from_str::<StrokeWidth>(json).map(StrokeWidth::get);
        assert_eq!(read("null").unwrap(), 2);
        assert_eq!(read("7").unwrap(), 7);
        assert_eq!(read("0").unwrap(), 1);
        assert_eq!(read("-5").unwrap(), 1);
        assert_eq!(read("150").unwrap(), 20);
        assert_eq!(read("3.6").unwrap(), 4);
        assert!(read(r#""wide""#).is_err());
        assert!(read("[2]").is_err());
    }

    #[test]
    fn test_dash_pattern_from_lengths() {
        assert_eq!(DashPattern::try_from(vec![]), Ok(DashPattern::Solid));
        assert_eq!(DashPattern::try_from(vec![10.0, 5.0]), Ok(DashPattern::TOGGLE));
        assert!(DashPattern::try_from(vec![10.0]).is_err());
        assert!(DashPattern::try_from(vec![0.0, 5.0]).is_err());
        assert!(DashPattern::try_from(vec![1.0, 2.0, 3.0]).is_err());
    }

    #[test]
    fn test_style_json_field_names() {
        let style = ShapeStyle {
            dash: DashPattern::TOGGLE,
            ..ShapeStyle::default()
        };
        let json = serde_json::to_value(&style).unwrap();
        assert_eq!(json["stroke"], "#000000");
        assert_eq!(json["fill"], "transparent");
        assert_eq!(json["strokeWidth"], 2);
        assert_eq!(json["dash"], serde_json::json!([10.0, 5.0]));
    }

    #[test]
    fn test_unfilled_style_has_no_fill() {
        let mut style = ShapeStyle::default();
        assert_eq!(style.fill(), None);
        style.fill_color = SerializableColor::white();
        assert_eq!(style.fill(), Some(SerializableColor::white()));
    }
}
