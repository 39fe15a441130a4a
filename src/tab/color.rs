//! Custom tab colours and the header style derived from them.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Alpha applied to the header background of a deselected coloured tab
pub const DESELECTED_ALPHA: u8 = 64;

/// Share of the distance to black/white used for the hover accent
const ACCENT_SHIFT: f32 = 0.2;

/// Opaque RGB colour chosen for a tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TabColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Colour with alpha, as handed to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid colour '{0}': expected #rrggbb")]
pub struct ParseColorError(String);

/// Header style slots a custom colour overrides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum StyleToken {
    HeaderBackground,
    HeaderBackgroundSelected,
    HeaderBackgroundPointerOver,
    HeaderBackgroundPressed,
    HeaderForeground,
    HeaderForegroundSelected,
    HeaderForegroundPointerOver,
    HeaderForegroundPressed,
    ButtonForegroundActiveTab,
}

impl StyleToken {
    pub const ALL: [StyleToken; 9] = [
        StyleToken::HeaderBackground,
        StyleToken::HeaderBackgroundSelected,
        StyleToken::HeaderBackgroundPointerOver,
        StyleToken::HeaderBackgroundPressed,
        StyleToken::HeaderForeground,
        StyleToken::HeaderForegroundSelected,
        StyleToken::HeaderForegroundPointerOver,
        StyleToken::HeaderForegroundPressed,
        StyleToken::ButtonForegroundActiveTab,
    ];
}

impl TabColor {
    pub const BLACK: TabColor = TabColor::new(0, 0, 0);
    pub const WHITE: TabColor = TabColor::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn with_alpha(self, a: u8) -> Rgba {
        Rgba {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }

    /// WCAG 2.x relative luminance in [0, 1]
    pub fn relative_luminance(&self) -> f32 {
        fn channel(c: u8) -> f32 {
            let c = c as f32 / 255.0;
            if c <= 0.039_28 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        0.2126 * channel(self.r) + 0.7152 * channel(self.g) + 0.0722 * channel(self.b)
    }

    /// True when black text contrasts better than white on this colour
    pub fn is_bright(&self) -> bool {
        let luminance = self.relative_luminance();
        let contrast_with_black = (luminance + 0.05) / 0.05;
        let contrast_with_white = 1.05 / (luminance + 0.05);
        contrast_with_black > contrast_with_white
    }

    /// Text colour for a header painted in this colour
    pub fn foreground(&self) -> TabColor {
        if self.is_bright() {
            TabColor::BLACK
        } else {
            TabColor::WHITE
        }
    }

    /// Hover colour: darkened for bright colours, lightened for dark ones
    pub fn accent(&self) -> TabColor {
        let bright = self.is_bright();
        let shift = |c: u8| -> u8 {
            let c = c as f32;
            let shifted = if bright {
                c * (1.0 - ACCENT_SHIFT)
            } else {
                c + (255.0 - c) * ACCENT_SHIFT
            };
            shifted.round().clamp(0.0, 255.0) as u8
        };
        TabColor::new(shift(self.r), shift(self.g), shift(self.b))
    }

    /// Colour for one header style slot
    pub fn style(&self, token: StyleToken) -> Rgba {
        match token {
            StyleToken::HeaderBackground => self.with_alpha(DESELECTED_ALPHA),
            StyleToken::HeaderBackgroundSelected | StyleToken::HeaderBackgroundPressed => {
                self.with_alpha(u8::MAX)
            }
            StyleToken::HeaderBackgroundPointerOver => self.accent().with_alpha(u8::MAX),
            StyleToken::HeaderForeground
            | StyleToken::HeaderForegroundSelected
            | StyleToken::HeaderForegroundPointerOver
            | StyleToken::HeaderForegroundPressed
            | StyleToken::ButtonForegroundActiveTab => self.foreground().with_alpha(u8::MAX),
        }
    }

    /// Every style slot with its colour
    pub fn style_map(&self) -> Vec<(StyleToken, Rgba)> {
        StyleToken::ALL
            .iter()
            .map(|&token| (token, self.style(token)))
            .collect()
    }
}

impl fmt::Display for TabColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for TabColor {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ParseColorError(s.to_string()));
        }
        let component = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| ParseColorError(s.to_string()))
        };
        Ok(TabColor::new(
            component(0..2)?,
            component(2..4)?,
            component(4..6)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display_hex() {
        let color: TabColor = "#ff8040".parse().unwrap();
        assert_eq!(color, TabColor::new(255, 128, 64));
        assert_eq!(color.to_string(), "#ff8040");
        assert!("ff80".parse::<TabColor>().is_err());
        assert!("#gg0000".parse::<TabColor>().is_err());
    }

    #[test]
    fn test_brightness_picks_foreground() {
        assert!(TabColor::WHITE.is_bright());
        assert!(!TabColor::BLACK.is_bright());
        assert_eq!(TabColor::new(255, 255, 0).foreground(), TabColor::BLACK);
        assert_eq!(TabColor::new(0, 0, 128).foreground(), TabColor::WHITE);
    }

    #[test]
    fn test_accent_moves_away_from_extremes() {
        assert_eq!(TabColor::BLACK.accent(), TabColor::new(51, 51, 51));
        assert_eq!(TabColor::WHITE.accent(), TabColor::new(204, 204, 204));
    }

    #[test]
    fn test_style_map_covers_every_token() {
        let color = TabColor::new(0, 0, 128);
        let map = color.style_map();
        assert_eq!(map.len(), StyleToken::ALL.len());
        assert_eq!(color.style(StyleToken::HeaderBackground).a, DESELECTED_ALPHA);
        assert_eq!(
            color.style(StyleToken::HeaderBackgroundSelected),
            color.with_alpha(255)
        );
        assert_eq!(
            color.style(StyleToken::ButtonForegroundActiveTab),
            TabColor::WHITE.with_alpha(255)
        );
    }
}
