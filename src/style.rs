// Colors for the gauge icon

use tiny_skia::Color;

/// Straight (non-premultiplied) RGBA color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    pub fn to_skia(self) -> Color {
        Color::from_rgba8(self.r, self.g, self.b, self.a)
    }
}

// --- Fixed palette ---
pub const BG_DARK: Rgba = Rgba::rgb(15, 52, 96); // #0f3460
pub const BG_LIGHT: Rgba = Rgba::rgb(26, 90, 138); // #1a5a8a
pub const ACCENT: Rgba = Rgba::rgb(41, 128, 185); // #2980b9
pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);

pub const TICK_ALPHA: u8 = 200;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub bg_dark: Rgba,
    pub bg_light: Rgba,
    pub accent: Rgba,
    pub white: Rgba,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            bg_dark: BG_DARK,
            bg_light: BG_LIGHT,
            accent: ACCENT,
            white: WHITE,
        }
    }
}

impl Palette {
    /// Tick marks are white, slightly see-through.
    pub fn tick(&self) -> Rgba {
        self.white.with_alpha(TICK_ALPHA)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette() {
        let palette = Palette::default();
        assert_eq!(palette.bg_dark, Rgba::rgb(0x0f, 0x34, 0x60));
        assert_eq!(palette.bg_light, Rgba::rgb(0x1a, 0x5a, 0x8a));
        assert_eq!(palette.accent, Rgba::rgb(0x29, 0x80, 0xb9));
        assert_eq!(palette.tick(), Rgba { r: 255, g: 255, b: 255, a: 200 });
    }
}
