//! Shared types module - value types and tuning constants
//!
//! This crate defines the plain data used across the workspace: cell-space vectors,
//! colors, alignment enums, host actions, and the constants that tune fades, scrolling
//! and grid layout. Everything here is a pure value type with no dependencies, so it can
//! be used by the pure core, the engine, and the terminal host alike.
//!
//! # Coordinate units
//!
//! - **Cell**: one character of the glyph surface (integer grid unit, stored as `f32`
//!   because layout math produces fractional positions such as a 1.2 cell gap)
//! - **Surface pixel**: `cell * cell_size`
//! - **Viewport pixel**: surface pixel divided by the device pixel ratio, minus the
//!   canvas centering offset
//!
//! # Tuning constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_CHAR_SIZE` | 20 | Cell size in device pixels |
//! | `DEFAULT_FADE_SPEED` | 5.0 | Page fade damping rate |
//! | `FIRST_PAGE_FADE_SPEED` | 3.0 | Slower damping for the first page after launch |
//! | `FADE_OUT_EPSILON` | 0.003 | Opacity under which a fade-out counts as complete |
//! | `IMAGE_FADE_SECONDS` | 1.0 | Duration of the glyph/picture crossfade on images |
//! | `SCROLL_SMOOTHING` | 8.0 | Damping rate of the displayed scroll offset |
//! | `EDGE_DAMPING_ZONE` | 10.0 | Cells from an edge where scroll input is attenuated |
//! | `BOTTOM_SCROLL_MARGIN` | 6.0 | Extra scroll room below the last grid row |
//! | `GRID_MAX_COLUMNS` | 5 | Largest column count tried by the grid layout |
//!
//! # Examples
//!
//! ```
//! use ascii_field_types::{HorizontalAlign, Rgb, Vec2, VerticalAlign};
//!
//! let pos = Vec2::new(4.0, 2.0) + Vec2::new(1.0, 1.0);
//! assert_eq!(pos, Vec2::new(5.0, 3.0));
//!
//! assert_eq!(HorizontalAlign::from_str("center"), Some(HorizontalAlign::Center));
//! assert_eq!(VerticalAlign::End.factor(), 1.0);
//!
//! let teal = Rgb::from_hex("#008080").unwrap();
//! assert!(teal.luma() > 0.0);
//! ```

use std::ops::{Add, AddAssign, Mul, Sub};

/// Default cell size in device pixels (square cells).
pub const DEFAULT_CHAR_SIZE: u32 = 20;

/// Default glyph sequence, ordered from darkest to brightest.
pub const DEFAULT_ASCII_SEQUENCE: &str =
    " .`,:;_-!il^Ir1v\\jft*~|LJc/?xT+()7Y<>nuz=y{}oFskVahe[]4CX23AbdpqUZwKPESHG5O0gD69mNQR8B&%MW#$@";

/// Default page fade damping rate.
pub const DEFAULT_FADE_SPEED: f32 = 5.0;

/// Damping rate of the very first page shown after launch.
pub const FIRST_PAGE_FADE_SPEED: f32 = 3.0;

/// Opacity under which an exiting page is considered gone.
pub const FADE_OUT_EPSILON: f32 = 0.003;

/// Opacity distance from 1 under which an entering page is considered steady.
pub const STEADY_EPSILON: f32 = 0.001;

/// Duration of an image glyph/picture crossfade in seconds.
pub const IMAGE_FADE_SECONDS: f32 = 1.0;

/// Damping rate of the displayed scroll offset toward its target.
pub const SCROLL_SMOOTHING: f32 = 8.0;

/// Width (in cells) of the zone near each scroll edge where input is attenuated.
pub const EDGE_DAMPING_ZONE: f32 = 10.0;

/// Extra scroll room below the last grid row (cells).
pub const BOTTOM_SCROLL_MARGIN: f32 = 6.0;

/// Largest column count tried by the works grid.
pub const GRID_MAX_COLUMNS: u32 = 5;

/// Minimum works-grid card width (cells).
pub const MIN_CARD_WIDTH: f32 = 18.0;

/// Gap between works-grid cards (cells).
pub const CARD_GAP: f32 = 1.2;

/// Aspect ratio (width / height) of card thumbnails.
pub const CARD_ASPECT_RATIO: f32 = 5.0 / 3.0;

/// Width (in cells) at which long descriptions are wrapped.
pub const DESCRIPTION_WRAP_WIDTH: usize = 50;

/// Background color of the scene, used to fill the picture surface each frame.
pub const SCENE_BACKGROUND: Rgb = Rgb::new(0.02, 0.02, 0.03);


/// A 2D vector in cell or pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2::new(0.0, 0.0);
    pub const ONE: Vec2 = Vec2::new(1.0, 1.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v }
    }

    /// Component-wise multiplication.
    pub fn scale(self, other: Vec2) -> Self {
        Self::new(self.x * other.x, self.y * other.y)
    }

    pub fn floor(self) -> Self {
        Self::new(self.x.floor(), self.y.floor())
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// Linear RGB color with components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (leading `#` optional).
    ///
    /// # Examples
    ///
    /// ```
    /// use ascii_field_types::Rgb;
    ///
    /// assert_eq!(Rgb::from_hex("#ffffff"), Some(Rgb::WHITE));
    /// assert_eq!(Rgb::from_hex("000000"), Some(Rgb::BLACK));
    /// assert_eq!(Rgb::from_hex("#fff"), None);
    /// ```
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::from_u8(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Rec. 601 luma.
    pub fn luma(&self) -> f32 {
        self.r * 0.299 + self.g * 0.587 + self.b * 0.114
    }

    pub fn with_alpha(self, a: f32) -> Rgba {
        Rgba::new(self.r, self.g, self.b, a)
    }

    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        Rgb::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
        )
    }

    pub fn powf(self, e: f32) -> Rgb {
        Rgb::new(self.r.powf(e), self.g.powf(e), self.b.powf(e))
    }

    pub fn to_u8(self) -> [u8; 3] {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b)]
    }
}

/// RGB color with straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn rgb(&self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }

    pub fn is_transparent(&self) -> bool {
        self.a <= 0.0
    }

    /// Source-over composite of `self` onto `dst`.
    pub fn over(self, dst: Rgba) -> Rgba {
        let sa = self.a.clamp(0.0, 1.0);
        let out_a = sa + dst.a * (1.0 - sa);
        if out_a <= 0.0 {
            return Rgba::TRANSPARENT;
        }
        let mix = |s: f32, d: f32| (s * sa + d * dst.a * (1.0 - sa)) / out_a;
        Rgba::new(
            mix(self.r, dst.r),
            mix(self.g, dst.g),
            mix(self.b, dst.b),
            out_a,
        )
    }
}

/// Horizontal alignment against the glyph-surface resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HorizontalAlign {
    #[default]
    Start,
    Center,
    End,
}

impl HorizontalAlign {
    /// Parse from the names used in page definitions (`left`/`center`/`right`, or
    /// `start`/`end`).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "left" | "start" => Some(HorizontalAlign::Start),
            "center" => Some(HorizontalAlign::Center),
            "right" | "end" => Some(HorizontalAlign::End),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HorizontalAlign::Start => "left",
            HorizontalAlign::Center => "center",
            HorizontalAlign::End => "right",
        }
    }

    /// Fraction of the free space placed before the element.
    pub fn factor(&self) -> f32 {
        match self {
            HorizontalAlign::Start => 0.0,
            HorizontalAlign::Center => 0.5,
            HorizontalAlign::End => 1.0,
        }
    }
}

/// Vertical alignment against the glyph-surface resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VerticalAlign {
    #[default]
    Start,
    Center,
    End,
}

impl VerticalAlign {
    /// Parse from `top`/`middle`/`bottom` (or `start`/`center`/`end`).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "top" | "start" => Some(VerticalAlign::Start),
            "middle" | "center" => Some(VerticalAlign::Center),
            "bottom" | "end" => Some(VerticalAlign::End),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VerticalAlign::Start => "top",
            VerticalAlign::Center => "middle",
            VerticalAlign::End => "bottom",
        }
    }

    pub fn factor(&self) -> f32 {
        match self {
            VerticalAlign::Start => 0.0,
            VerticalAlign::Center => 0.5,
            VerticalAlign::End => 1.0,
        }
    }
}

/// Host-level actions produced by input devices.
///
/// These are independent of the input backend so that the terminal preview and a
/// headless driver share the same vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldAction {
    /// Navigate to `/`
    GoHome,
    /// Navigate to `/work`
    GoWork,
    /// Navigate to `/contacts`
    GoContacts,
    /// Scroll content up by one wheel notch
    ScrollUp,
    /// Scroll content down by one wheel notch
    ScrollDown,
    /// Toggle between the desktop and mobile layouts
    ToggleMobile,
    /// Fade every image on screen toward its glyph rendition
    ImagesToGlyphs,
    /// Fade every image on screen toward its full picture
    ImagesToPictures,
}

impl FieldAction {
    /// Parse action from string (for scripted drivers)
    ///
    /// # Examples
    ///
    /// ```
    /// use ascii_field_types::FieldAction;
    ///
    /// assert_eq!(FieldAction::from_str("goWork"), Some(FieldAction::GoWork));
    /// assert_eq!(FieldAction::from_str("scrolldown"), Some(FieldAction::ScrollDown));
    /// assert_eq!(FieldAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "gohome" => Some(FieldAction::GoHome),
            "gowork" => Some(FieldAction::GoWork),
            "gocontacts" => Some(FieldAction::GoContacts),
            "scrollup" => Some(FieldAction::ScrollUp),
            "scrolldown" => Some(FieldAction::ScrollDown),
            "togglemobile" => Some(FieldAction::ToggleMobile),
            "imagestoglyphs" => Some(FieldAction::ImagesToGlyphs),
            "imagestopictures" => Some(FieldAction::ImagesToPictures),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldAction::GoHome => "goHome",
            FieldAction::GoWork => "goWork",
            FieldAction::GoContacts => "goContacts",
            FieldAction::ScrollUp => "scrollUp",
            FieldAction::ScrollDown => "scrollDown",
            FieldAction::ToggleMobile => "toggleMobile",
            FieldAction::ImagesToGlyphs => "imagesToGlyphs",
            FieldAction::ImagesToPictures => "imagesToPictures",
        }
    }

    /// Route path for navigation actions.
    pub fn route(&self) -> Option<&'static str> {
        match self {
            FieldAction::GoHome => Some("/"),
            FieldAction::GoWork => Some("/work"),
            FieldAction::GoContacts => Some("/contacts"),
            _ => None,
        }
    }
}
