//! Runtime configuration read from the environment.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `ASCII_FIELD_CHAR_SIZE` | 20 | Cell size in device pixels |
//! | `ASCII_FIELD_SEQUENCE` | built-in ramp | Glyph alphabet, darkest to brightest |
//! | `ASCII_FIELD_ATLAS` | procedural | Glyph atlas image path |
//! | `ASCII_FIELD_ATLAS_GRID` | `<len>x1` | Atlas grid as `COLUMNSxROWS` |
//! | `ASCII_FIELD_CONTENT` | built-in | Content JSON path |
//! | `ASCII_FIELD_ASSETS` | `.` | Root directory for asset `src` paths |
//! | `ASCII_FIELD_MOBILE` | auto | Force the mobile (`1`) or desktop (`0`) layout |
//! | `ASCII_FIELD_PIXEL_RATIO` | 1.0 | Device pixel ratio |
//! | `ASCII_FIELD_CANVAS_BLEED` | off | Size surfaces to a cell-aligned canvas overhanging the viewport |
//!
//! Values that fail to parse fall back to their default.

use std::env;
use std::path::PathBuf;

use crate::types::{DEFAULT_ASCII_SEQUENCE, DEFAULT_CHAR_SIZE};

/// Viewport width (CSS pixels) under which the layout switches to mobile.
pub const MOBILE_BREAKPOINT: f32 = 768.0;

#[derive(Debug, Clone, PartialEq)]
pub struct FieldConfig {
    pub char_size: u32,
    pub sequence: String,
    pub atlas_path: Option<PathBuf>,
    pub atlas_grid: Option<(u32, u32)>,
    pub content_path: Option<PathBuf>,
    pub asset_root: PathBuf,
    pub mobile: Option<bool>,
    pub pixel_ratio: f32,
    /// Grow the canvas past the viewport edges so partial cells are drawn.
    pub canvas_bleed: bool,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            char_size: DEFAULT_CHAR_SIZE,
            sequence: DEFAULT_ASCII_SEQUENCE.to_string(),
            atlas_path: None,
            atlas_grid: None,
            content_path: None,
            asset_root: PathBuf::from("."),
            mobile: None,
            pixel_ratio: 1.0,
            canvas_bleed: false,
        }
    }
}

impl FieldConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup, so tests never touch the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let non_empty = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .and_then(|s| if s.is_empty() { None } else { Some(s) })
        };

        let char_size = non_empty("ASCII_FIELD_CHAR_SIZE")
            .and_then(|s| s.parse::<u32>().ok())
            .filter(|&v| v > 0)
            .unwrap_or(defaults.char_size);

        // The sequence is not trimmed: a leading space is the darkest glyph.
        let sequence = lookup("ASCII_FIELD_SEQUENCE")
            .filter(|s| s.chars().count() > 1)
            .unwrap_or(defaults.sequence);

        let atlas_path = non_empty("ASCII_FIELD_ATLAS").map(PathBuf::from);
        let atlas_grid = non_empty("ASCII_FIELD_ATLAS_GRID").and_then(|s| parse_grid(&s));
        let content_path = non_empty("ASCII_FIELD_CONTENT").map(PathBuf::from);
        let asset_root = non_empty("ASCII_FIELD_ASSETS")
            .map(PathBuf::from)
            .unwrap_or(defaults.asset_root);
        let mobile = non_empty("ASCII_FIELD_MOBILE").and_then(|s| parse_bool(&s));

        let pixel_ratio = non_empty("ASCII_FIELD_PIXEL_RATIO")
            .and_then(|s| s.parse::<f32>().ok())
            .filter(|v| v.is_finite() && *v > 0.0)
            .unwrap_or(defaults.pixel_ratio);

        let canvas_bleed = non_empty("ASCII_FIELD_CANVAS_BLEED")
            .and_then(|s| parse_bool(&s))
            .unwrap_or(defaults.canvas_bleed);

        Self {
            char_size,
            sequence,
            atlas_path,
            atlas_grid,
            content_path,
            asset_root,
            mobile,
            pixel_ratio,
            canvas_bleed,
        }
    }

    /// Atlas grid, defaulting to one row holding every glyph of the sequence.
    pub fn atlas_grid(&self) -> (u32, u32) {
        self.atlas_grid
            .unwrap_or((self.sequence.chars().count().max(1) as u32, 1))
    }

    /// Forced layout, or the breakpoint test on the viewport width (CSS pixels).
    pub fn is_mobile(&self, viewport_width: f32) -> bool {
        self.mobile.unwrap_or(viewport_width < MOBILE_BREAKPOINT)
    }
}

fn parse_grid(s: &str) -> Option<(u32, u32)> {
    let (c, r) = s.split_once(['x', 'X'])?;
    let c = c.trim().parse::<u32>().ok()?;
    let r = r.trim().parse::<u32>().ok()?;
    if c == 0 || r == 0 {
        return None;
    }
    Some((c, r))
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = FieldConfig::from_lookup(lookup(&[]));
        assert_eq!(cfg, FieldConfig::default());
        assert_eq!(cfg.atlas_grid().1, 1);
    }

    #[test]
    fn reads_every_variable() {
        let cfg = FieldConfig::from_lookup(lookup(&[
            ("ASCII_FIELD_CHAR_SIZE", "12"),
            ("ASCII_FIELD_SEQUENCE", " .:#"),
            ("ASCII_FIELD_ATLAS", "atlas.png"),
            ("ASCII_FIELD_ATLAS_GRID", "8x2"),
            ("ASCII_FIELD_CONTENT", "content.json"),
            ("ASCII_FIELD_ASSETS", "public"),
            ("ASCII_FIELD_MOBILE", "yes"),
            ("ASCII_FIELD_PIXEL_RATIO", "2"),
            ("ASCII_FIELD_CANVAS_BLEED", "on"),
        ]));
        assert_eq!(cfg.char_size, 12);
        assert_eq!(cfg.sequence, " .:#");
        assert_eq!(cfg.atlas_path, Some(PathBuf::from("atlas.png")));
        assert_eq!(cfg.atlas_grid(), (8, 2));
        assert_eq!(cfg.content_path, Some(PathBuf::from("content.json")));
        assert_eq!(cfg.asset_root, PathBuf::from("public"));
        assert_eq!(cfg.mobile, Some(true));
        assert_eq!(cfg.pixel_ratio, 2.0);
        assert!(cfg.canvas_bleed);
    }

    #[test]
    fn unparsable_values_fall_back() {
        let cfg = FieldConfig::from_lookup(lookup(&[
            ("ASCII_FIELD_CHAR_SIZE", "big"),
            ("ASCII_FIELD_ATLAS_GRID", "0x3"),
            ("ASCII_FIELD_MOBILE", "maybe"),
            ("ASCII_FIELD_PIXEL_RATIO", "-1"),
        ]));
        assert_eq!(cfg.char_size, DEFAULT_CHAR_SIZE);
        assert_eq!(cfg.atlas_grid, None);
        assert_eq!(cfg.mobile, None);
        assert_eq!(cfg.pixel_ratio, 1.0);
    }

    #[test]
    fn mobile_breakpoint() {
        let cfg = FieldConfig::default();
        assert!(cfg.is_mobile(400.0));
        assert!(!cfg.is_mobile(1280.0));
        let forced = FieldConfig {
            mobile: Some(false),
            ..FieldConfig::default()
        };
        assert!(!forced.is_mobile(400.0));
    }
}
