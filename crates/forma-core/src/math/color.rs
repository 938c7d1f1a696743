// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Defines the `Color` type and its hex string conversions.

/// An opaque sRGB color using `f32` components in the `[0.0, 1.0]` range.
///
/// Colors cross the persistence boundary as `#rrggbb` strings, so every
/// conversion quantizes to 8 bits per channel. A color parsed from a hex
/// string always writes back the same (lower-case) string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// The red component.
    pub r: f32,
    /// The green component.
    pub g: f32,
    /// The blue component.
    pub b: f32,
}

impl Color {
    // --- Common Color Constants ---

    /// Opaque white (`#ffffff`).
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    /// Opaque black (`#000000`).
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    /// Opaque magenta (`#ff00ff`).
    pub const MAGENTA: Self = Self::rgb(1.0, 0.0, 1.0);

    /// Creates a new `Color` from its components.
    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Creates a `Color` from a packed `0xRRGGBB` integer.
    #[inline]
    pub fn from_u32(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as f32 / 255.0,
            g: ((rgb >> 8) & 0xff) as f32 / 255.0,
            b: (rgb & 0xff) as f32 / 255.0,
        }
    }

    /// Packs this color into a `0xRRGGBB` integer.
    #[inline]
    pub fn to_u32(&self) -> u32 {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    /// Parses a hex color string.
    ///
    /// Accepts `#rrggbb`, `rrggbb`, `0xrrggbb` and the short `#rgb` form.
    /// Returns `None` for anything else.
    ///
    /// # Example
    /// ```
    /// use forma_core::math::Color;
    /// let red = Color::from_hex("#ff0000").unwrap();
    /// assert_eq!(red.to_hex(), "#ff0000");
    /// assert!(Color::from_hex("tomato").is_none());
    /// ```
    pub fn from_hex(hex: &str) -> Option<Self> {
        let trimmed = hex.trim();
        let digits = trimmed
            .strip_prefix('#')
            .or_else(|| trimmed.strip_prefix("0x"))
            .unwrap_or(trimmed);

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }

        match digits.len() {
            6 => u32::from_str_radix(digits, 16).ok().map(Self::from_u32),
            3 => {
                // `#abc` expands to `#aabbcc`.
                let expanded: String = digits.chars().flat_map(|c| [c, c]).collect();
                u32::from_str_radix(&expanded, 16).ok().map(Self::from_u32)
            }
            _ => None,
        }
    }

    /// Formats this color as a lower-case `#rrggbb` string.
    pub fn to_hex(&self) -> String {
        format!("#{:06x}", self.to_u32())
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}
