//! Palette tokens for the light and dark schemes

use crate::theme::ColorScheme;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An sRGB color with 8-bit channels
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::from_hex(0xFFFFFF);
    pub const BLACK: Color = Color::from_hex(0x000000);

    /// Opaque color from `0xRRGGBB`
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
            a: 0xFF,
        }
    }

    /// Same color with alpha in 0.0..=1.0
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            a: (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
            ..self
        }
    }
}

impl fmt::Display for Color {
    /// CSS hex notation, with alpha only when not opaque
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 0xFF {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

/// Semantic colors for one scheme
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub surface: Color,
    pub border: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub accent: Color,
    pub accent_muted: Color,
    /// Colors cycled through by decorative particle fields
    pub particles: [Color; 3],
}

/// Light scheme: white surfaces, deep navy text, teal accent
pub const LIGHT: Palette = Palette {
    background: Color::from_hex(0xFFFFFF),
    surface: Color::from_hex(0xF5F7FA),
    border: Color::from_hex(0xE2E8F0),
    text_primary: Color::from_hex(0x0F172A),
    text_secondary: Color::from_hex(0x475569),
    accent: Color::from_hex(0x0D9488),
    accent_muted: Color::from_hex(0xCCFBF1),
    particles: [
        Color::from_hex(0x0D9488),
        Color::from_hex(0x2563EB),
        Color::from_hex(0x64748B),
    ],
};

/// Dark scheme: near-black surfaces, light text, brighter accent
pub const DARK: Palette = Palette {
    background: Color::from_hex(0x020617),
    surface: Color::from_hex(0x0F172A),
    border: Color::from_hex(0x1E293B),
    text_primary: Color::from_hex(0xF8FAFC),
    text_secondary: Color::from_hex(0x94A3B8),
    accent: Color::from_hex(0x2DD4BF),
    accent_muted: Color::from_hex(0x134E4A),
    particles: [
        Color::from_hex(0x2DD4BF),
        Color::from_hex(0x60A5FA),
        Color::from_hex(0xE2E8F0),
    ],
};

impl Palette {
    pub fn for_scheme(scheme: ColorScheme) -> &'static Palette {
        match scheme {
            ColorScheme::Light => &LIGHT,
            ColorScheme::Dark => &DARK,
        }
    }

    /// Particle color for particle `index`, cycling through the set
    pub fn particle(&self, index: usize) -> Color {
        self.particles[index % self.particles.len()]
    }
}
