// ABOUTME: Page configuration model for composited slides
// ABOUTME: Recognised fields, the open style map and slide size computation

use crate::errors::{Result, SlideError};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_THEME: &str = "default";
pub const DEFAULT_LAYOUT: &str = "content";
pub const DEFAULT_RESOURCE_DIR: &str = ".";
pub const DEFAULT_SLIDE_WIDTH: u32 = 720;

/// Names of the fields `PageOption` recognises. Any other key goes to the style map.
pub const RECOGNIZED_FIELDS: [&str; 9] = [
    "default_h1",
    "default_h2",
    "default_h3",
    "theme",
    "layout",
    "resource_dir",
    "slide_width",
    "slide_height",
    "aspect_ratio",
];

/// A coerced scalar configuration value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StyleValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleValue::Bool(b) => write!(f, "{}", b),
            StyleValue::Int(i) => write!(f, "{}", i),
            StyleValue::Float(x) => write!(f, "{}", x),
            StyleValue::Str(s) => f.write_str(s),
        }
    }
}

impl From<bool> for StyleValue {
    fn from(value: bool) -> Self {
        StyleValue::Bool(value)
    }
}

impl From<i64> for StyleValue {
    fn from(value: i64) -> Self {
        StyleValue::Int(value)
    }
}

impl From<f64> for StyleValue {
    fn from(value: f64) -> Self {
        StyleValue::Float(value)
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        StyleValue::Str(value.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(value: String) -> Self {
        StyleValue::Str(value)
    }
}

/// Slide aspect ratio in `width:height` form, both parts positive integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AspectRatio {
    pub width: u32,
    pub height: u32,
}

impl Default for AspectRatio {
    fn default() -> Self {
        Self {
            width: 16,
            height: 9,
        }
    }
}

impl AspectRatio {
    pub fn as_f64(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

impl FromStr for AspectRatio {
    type Err = SlideError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || {
            SlideError::FormatError(format!(
                "Invalid aspect ratio '{}': expected 'width:height' with positive integers",
                s
            ))
        };
        let (w, h) = s.trim().split_once(':').ok_or_else(invalid)?;
        let width = w.trim().parse::<u32>().map_err(|_| invalid())?;
        let height = h.trim().parse::<u32>().map_err(|_| invalid())?;
        if width == 0 || height == 0 {
            return Err(invalid());
        }
        Ok(Self { width, height })
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.width, self.height)
    }
}

impl Serialize for AspectRatio {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Resolved configuration of one page.
///
/// Values are never mutated in place once built: every override produces a
/// fresh copy through [`PageOption::with_override`] or
/// [`PageOption::with_overrides`], so a page can never alias the
/// configuration of another page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageOption {
    default_h1: bool,
    default_h2: bool,
    default_h3: bool,
    theme: String,
    layout: String,
    resource_dir: String,
    slide_width: Option<u32>,
    slide_height: Option<u32>,
    aspect_ratio: AspectRatio,
    styles: BTreeMap<String, StyleValue>,
}

impl Default for PageOption {
    fn default() -> Self {
        Self {
            default_h1: true,
            default_h2: true,
            default_h3: true,
            theme: DEFAULT_THEME.to_string(),
            layout: DEFAULT_LAYOUT.to_string(),
            resource_dir: DEFAULT_RESOURCE_DIR.to_string(),
            slide_width: None,
            slide_height: None,
            aspect_ratio: AspectRatio::default(),
            styles: BTreeMap::new(),
        }
    }
}

impl PageOption {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether h1 may be inherited from previous pages when this page omits it.
    pub fn default_h1(&self) -> bool {
        self.default_h1
    }

    pub fn default_h2(&self) -> bool {
        self.default_h2
    }

    pub fn default_h3(&self) -> bool {
        self.default_h3
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }

    pub fn layout(&self) -> &str {
        &self.layout
    }

    pub fn resource_dir(&self) -> &str {
        &self.resource_dir
    }

    pub fn slide_width(&self) -> Option<u32> {
        self.slide_width
    }

    pub fn slide_height(&self) -> Option<u32> {
        self.slide_height
    }

    pub fn aspect_ratio(&self) -> AspectRatio {
        self.aspect_ratio
    }

    /// Unrecognised keys with their coerced values.
    pub fn styles(&self) -> &BTreeMap<String, StyleValue> {
        &self.styles
    }

    pub fn is_recognized_field(key: &str) -> bool {
        RECOGNIZED_FIELDS.contains(&key)
    }

    /// Returns a copy of this configuration with a single key overridden.
    pub fn with_override(&self, key: &str, value: StyleValue) -> Result<Self> {
        let mut updated = self.clone();
        updated.apply(key, value)?;
        Ok(updated)
    }

    /// Returns a copy of this configuration with every pair applied in order.
    ///
    /// Later pairs win over earlier ones for the same key.
    pub fn with_overrides<I, K>(&self, pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, StyleValue)>,
        K: AsRef<str>,
    {
        let mut updated = self.clone();
        for (key, value) in pairs {
            updated.apply(key.as_ref(), value)?;
        }
        Ok(updated)
    }

    /// Slide size in pixels as `(width, height)`.
    ///
    /// Explicit dimensions win; a missing dimension is derived from the
    /// aspect ratio, and with neither set the width defaults to 720.
    pub fn computed_slide_size(&self) -> (u32, u32) {
        let ratio = self.aspect_ratio.as_f64();
        match (self.slide_width, self.slide_height) {
            (Some(w), Some(h)) => (w, h),
            (Some(w), None) => (w, (w as f64 / ratio).round() as u32),
            (None, Some(h)) => ((h as f64 * ratio).round() as u32, h),
            (None, None) => (
                DEFAULT_SLIDE_WIDTH,
                (DEFAULT_SLIDE_WIDTH as f64 / ratio).round() as u32,
            ),
        }
    }

    fn apply(&mut self, key: &str, value: StyleValue) -> Result<()> {
        match key {
            "default_h1" => self.default_h1 = coerce_bool(key, value)?,
            "default_h2" => self.default_h2 = coerce_bool(key, value)?,
            "default_h3" => self.default_h3 = coerce_bool(key, value)?,
            "theme" => self.theme = value.to_string(),
            "layout" => self.layout = value.to_string(),
            "resource_dir" => self.resource_dir = value.to_string(),
            "slide_width" => self.slide_width = Some(coerce_dimension(key, value)?),
            "slide_height" => self.slide_height = Some(coerce_dimension(key, value)?),
            "aspect_ratio" => self.aspect_ratio = coerce_aspect_ratio(value)?,
            _ => {
                self.styles.insert(key.to_string(), value);
            }
        }
        Ok(())
    }
}

fn coerce_bool(key: &str, value: StyleValue) -> Result<bool> {
    match value {
        StyleValue::Bool(b) => Ok(b),
        StyleValue::Str(ref s) if s.eq_ignore_ascii_case("true") => Ok(true),
        StyleValue::Str(ref s) if s.eq_ignore_ascii_case("false") => Ok(false),
        other => Err(SlideError::FormatError(format!(
            "Field '{}' expects a boolean, got '{}'",
            key, other
        ))),
    }
}

fn coerce_dimension(key: &str, value: StyleValue) -> Result<u32> {
    let parsed = match &value {
        StyleValue::Int(i) => u32::try_from(*i).ok(),
        StyleValue::Float(x) if x.fract() == 0.0 && *x >= 0.0 && *x <= u32::MAX as f64 => {
            Some(*x as u32)
        }
        StyleValue::Str(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    };
    match parsed {
        Some(n) if n > 0 => Ok(n),
        _ => Err(SlideError::FormatError(format!(
            "Field '{}' expects a positive integer, got '{}'",
            key, value
        ))),
    }
}

fn coerce_aspect_ratio(value: StyleValue) -> Result<AspectRatio> {
    match value {
        StyleValue::Str(s) => s.parse(),
        other => Err(SlideError::FormatError(format!(
            "Invalid aspect ratio '{}': expected 'width:height'",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let option = PageOption::default();
        assert!(option.default_h1());
        assert!(option.default_h2());
        assert!(option.default_h3());
        assert_eq!(option.theme(), "default");
        assert_eq!(option.layout(), "content");
        assert_eq!(option.resource_dir(), ".");
        assert!(option.styles().is_empty());
        assert_eq!(option.computed_slide_size(), (720, 405));
    }

    #[test]
    fn test_with_override_leaves_original_untouched() {
        let base = PageOption::default();
        let updated = base.with_override("layout", "split".into()).unwrap();
        assert_eq!(updated.layout(), "split");
        assert_eq!(base.layout(), "content");
    }

    #[test]
    fn test_recognized_key_never_lands_in_styles() {
        let option = PageOption::default()
            .with_overrides([("theme", StyleValue::from("beam")), ("color", "red".into())])
            .unwrap();
        assert_eq!(option.theme(), "beam");
        assert!(!option.styles().contains_key("theme"));
        assert_eq!(option.styles().get("color"), Some(&StyleValue::from("red")));
    }

    #[test]
    fn test_is_recognized_field() {
        assert!(PageOption::is_recognized_field("aspect_ratio"));
        assert!(!PageOption::is_recognized_field("styles"));
        assert!(!PageOption::is_recognized_field("background"));
    }

    #[test]
    fn test_later_override_wins() {
        let option = PageOption::default()
            .with_overrides([("color", StyleValue::from("red")), ("color", 3i64.into())])
            .unwrap();
        assert_eq!(option.styles().get("color"), Some(&StyleValue::Int(3)));
    }

    #[test]
    fn test_bool_field_rejects_garbage() {
        let err = PageOption::default()
            .with_override("default_h2", "maybe".into())
            .unwrap_err();
        assert!(err.is_format_error());
    }

    #[test]
    fn test_aspect_ratio_parsing() {
        assert_eq!(
            "4:3".parse::<AspectRatio>().unwrap(),
            AspectRatio {
                width: 4,
                height: 3
            }
        );
        assert!("16x9".parse::<AspectRatio>().is_err());
        assert!("16:0".parse::<AspectRatio>().is_err());
        assert!("a:b".parse::<AspectRatio>().is_err());
        assert!(PageOption::default()
            .with_override("aspect_ratio", 1.5f64.into())
            .is_err());
    }

    #[test]
    fn test_computed_slide_size() {
        let base = PageOption::default();

        let both = base
            .with_overrides([("slide_width", StyleValue::Int(1024)), ("slide_height", 768i64.into())])
            .unwrap();
        assert_eq!(both.computed_slide_size(), (1024, 768));

        let width_only = base.with_override("slide_width", 1280i64.into()).unwrap();
        assert_eq!(width_only.computed_slide_size(), (1280, 720));

        let height_only = base
            .with_overrides([("slide_height", StyleValue::Int(600)), ("aspect_ratio", "4:3".into())])
            .unwrap();
        assert_eq!(height_only.computed_slide_size(), (800, 600));

        let ratio_only = base.with_override("aspect_ratio", "4:3".into()).unwrap();
        assert_eq!(ratio_only.computed_slide_size(), (720, 540));
    }

    #[test]
    fn test_dimension_must_be_positive() {
        let base = PageOption::default();
        assert!(base.with_override("slide_width", 0i64.into()).is_err());
        assert!(base.with_override("slide_width", (-5i64).into()).is_err());
        assert!(base.with_override("slide_height", 1.5f64.into()).is_err());
        assert_eq!(
            base.with_override("slide_height", "300".into())
                .unwrap()
                .slide_height(),
            Some(300)
        );
    }
}
