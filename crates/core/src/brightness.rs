//! Brightness map - deterministic character <-> brightness mapping
//!
//! The glyph alphabet is an ordered sequence from darkest to brightest. Each character
//! is assigned `i / (N - 1)`, so the first maps to 0 and the last to 1. The inverse
//! lookup buckets a brightness into one of `N` classes, which is the same indexing the
//! compositor uses to pick a glyph-atlas cell.

use std::collections::HashMap;

use crate::types::DEFAULT_ASCII_SEQUENCE;

/// Immutable mapping built once from an ordered character sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct BrightnessMap {
    sequence: Vec<char>,
    values: HashMap<char, f32>,
}

impl Default for BrightnessMap {
    fn default() -> Self {
        Self::new(DEFAULT_ASCII_SEQUENCE)
    }
}

impl BrightnessMap {
    /// Build the map from `sequence`.
    ///
    /// A character that appears more than once keeps the brightness of its last
    /// occurrence.
    pub fn new(sequence: &str) -> Self {
        let sequence: Vec<char> = sequence.chars().collect();
        let n = sequence.len();
        let mut values = HashMap::with_capacity(n);

        for (i, &ch) in sequence.iter().enumerate() {
            let brightness = if n > 1 {
                i as f32 / (n - 1) as f32
            } else {
                0.0
            };
            values.insert(ch, brightness);
        }

        Self { sequence, values }
    }

    /// Brightness of `ch`, or `None` if it is not part of the alphabet.
    pub fn get(&self, ch: char) -> Option<f32> {
        self.values.get(&ch).copied()
    }

    /// Brightness of `ch`, treating unknown characters as 0.
    pub fn brightness(&self, ch: char) -> f32 {
        self.get(ch).unwrap_or(0.0)
    }

    pub fn contains(&self, ch: char) -> bool {
        self.values.contains_key(&ch)
    }

    /// Number of characters in the source sequence.
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    pub fn sequence(&self) -> &[char] {
        &self.sequence
    }

    /// Bucket `brightness` into a class index: `floor(b * N)` clamped to `[0, N-1]`.
    pub fn class_index(&self, brightness: f32) -> usize {
        class_index(brightness, self.sequence.len())
    }

    /// Character whose class contains `brightness`. Returns a space for an empty map.
    pub fn char_for(&self, brightness: f32) -> char {
        if self.sequence.is_empty() {
            return ' ';
        }
        self.sequence[self.class_index(brightness)]
    }
}

/// Bucket `brightness` into one of `count` classes.
///
/// NaN and negative inputs land in class 0, anything >= 1 in the last class.
pub fn class_index(brightness: f32, count: usize) -> usize {
    if count == 0 || !(brightness > 0.0) {
        return 0;
    }
    let idx = (brightness * count as f32).floor() as usize;
    idx.min(count - 1)
}
