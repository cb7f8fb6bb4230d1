//! Text subsystem.
//!
//! Fonts are loaded once into a [`FontSystem`] and referenced from draw calls
//! by family name through a [`FontSpec`]. Sizes are expressed in the units of
//! the space the text is drawn in (parsecs for map labels); backends pick the
//! raster size from the current transform.

mod font_system;

pub use font_system::{FontLoadError, FontSystem, GlyphRun};

use crate::coords::Vec2;

/// Family + size, in drawing-space units.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub family: String,
    pub size: f32,
}

impl FontSpec {
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self { family: family.into(), size }
    }

    /// Same family at `size * factor`.
    pub fn scaled(&self, factor: f32) -> Self {
        Self { family: self.family.clone(), size: self.size * factor }
    }
}

/// Which point of the text box lands on the requested position.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum TextAnchor {
    #[default]
    Center,
    TopCenter,
    TopLeft,
    MiddleLeft,
}

impl TextAnchor {
    /// Offset from the anchor point to the top-left of a box of `size`.
    #[inline]
    pub fn offset(self, size: Vec2) -> Vec2 {
        match self {
            TextAnchor::Center => Vec2::new(-size.x * 0.5, -size.y * 0.5),
            TextAnchor::TopCenter => Vec2::new(-size.x * 0.5, 0.0),
            TextAnchor::TopLeft => Vec2::zero(),
            TextAnchor::MiddleLeft => Vec2::new(0.0, -size.y * 0.5),
        }
    }
}

/// Metric used when no font is available: monospace-ish advance of 0.6 em,
/// one em of line height.
#[inline]
pub fn approx_text_size(text: &str, size: f32) -> Vec2 {
    Vec2::new(text.chars().count() as f32 * size * 0.6, size)
}
