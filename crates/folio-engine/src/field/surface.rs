//! Drawing seam between the simulation and the host canvas.

use glam::Vec2;

use crate::theme::ThemeFlag;

/// An sRGB color with straight alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// CSS `rgba()` notation.
    pub fn css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Particle and link colors for one theme. Link alpha is computed per pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub particle: Rgba,
    pub link: Rgba,
}

impl Palette {
    pub const DARK: Palette = Palette {
        particle: Rgba::new(100, 255, 218, 0.5),
        link: Rgba::new(100, 255, 218, 1.0),
    };

    pub const LIGHT: Palette = Palette {
        particle: Rgba::new(76, 81, 191, 0.4),
        link: Rgba::new(76, 81, 191, 1.0),
    };

    pub fn for_theme(theme: ThemeFlag) -> Palette {
        match theme {
            ThemeFlag::Dark => Self::DARK,
            ThemeFlag::Light => Self::LIGHT,
        }
    }
}

/// A 2D immediate-mode drawing target (a canvas context in the browser).
pub trait Surface {
    /// Clear the whole `size` area.
    fn clear(&mut self, size: Vec2);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);
    fn line(&mut self, from: Vec2, to: Vec2, color: Rgba, width: f32);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_notation() {
        assert_eq!(Palette::DARK.particle.css(), "rgba(100, 255, 218, 0.5)");
        assert_eq!(Palette::LIGHT.link.with_alpha(0.15).css(), "rgba(76, 81, 191, 0.15)");
    }

    #[test]
    fn palette_follows_theme() {
        assert_eq!(Palette::for_theme(ThemeFlag::Dark), Palette::DARK);
        assert_eq!(Palette::for_theme(ThemeFlag::Light), Palette::LIGHT);
    }
}
