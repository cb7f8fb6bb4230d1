use std::collections::HashMap;
use std::fmt;

use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};

use crate::coords::Vec2;

use super::approx_text_size;

/// Pixel size used for measurement; results are scaled back to the requested size.
const MEASURE_PX: f32 = 64.0;

/// Error returned by [`FontSystem::load_font`].
#[derive(Debug, Clone)]
pub struct FontLoadError(pub String);

impl fmt::Display for FontLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "font load error: {}", self.0)
    }
}

impl std::error::Error for FontLoadError {}

/// Coverage bitmap for one line of text.
///
/// `coverage` is row-major, `width * height` bytes. The box spans the full
/// line height, so anchoring it reproduces the measured text box.
#[derive(Debug, Clone)]
pub struct GlyphRun {
    pub width: u32,
    pub height: u32,
    pub coverage: Vec<u8>,
}

/// Owns the loaded fonts, keyed by family name.
///
/// Fonts are immutable after loading, so a `FontSystem` is shared between
/// concurrent renders behind an `Arc`. The first loaded family doubles as the
/// fallback for unknown family names.
#[derive(Default)]
pub struct FontSystem {
    fonts: Vec<fontdue::Font>,
    families: HashMap<String, usize>,
}

impl FontSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and stores a TrueType or OpenType font under `family`.
    ///
    /// Loading the same family twice replaces the earlier face.
    pub fn load_font(&mut self, family: &str, bytes: &[u8]) -> Result<(), FontLoadError> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| FontLoadError(format!("{family}: {e}")))?;
        self.families.insert(family.to_owned(), self.fonts.len());
        self.fonts.push(font);
        log::debug!("loaded font family {family:?}");
        Ok(())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// Returns the face for `family`, falling back to the first loaded face.
    pub(crate) fn resolve(&self, family: &str) -> Option<&fontdue::Font> {
        match self.families.get(family) {
            Some(&i) => self.fonts.get(i),
            None => self.fonts.first(),
        }
    }

    /// Size of the single-line box of `text` at `size`, in the same units as `size`.
    ///
    /// Layout is done at a fixed pixel size and divided back, so the result is
    /// independent of the zoom level the text is eventually drawn at.
    #[must_use]
    pub fn measure_text(&self, text: &str, family: &str, size: f32) -> Vec2 {
        let Some(font) = self.resolve(family) else {
            return approx_text_size(text, size);
        };
        let (w, h) = self.layout_extent(font, text, MEASURE_PX);
        Vec2::new(w, h) * (size / MEASURE_PX)
    }

    /// Rasterizes `text` at `px` pixels per em into a coverage bitmap.
    ///
    /// Returns `None` when no font is loaded or the text has no visible extent.
    pub fn rasterize_line(&self, text: &str, family: &str, px: f32) -> Option<GlyphRun> {
        let font = self.resolve(family)?;
        let px = px.max(1.0);
        let (w, h) = self.layout_extent(font, text, px);
        let width = w.ceil() as u32;
        let height = h.ceil() as u32;
        if width == 0 || height == 0 {
            return None;
        }

        let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings::default());
        layout.append(&[font], &TextStyle::new(text, px, 0));

        let mut coverage = vec![0u8; (width * height) as usize];
        for g in layout.glyphs() {
            if !g.char_data.rasterize() || g.width == 0 || g.height == 0 {
                continue;
            }
            let (metrics, bitmap) = font.rasterize_config(g.key);
            let gx = g.x.round() as i64;
            let gy = g.y.round() as i64;
            for row in 0..metrics.height {
                let y = gy + row as i64;
                if y < 0 || y >= height as i64 {
                    continue;
                }
                for col in 0..metrics.width {
                    let x = gx + col as i64;
                    if x < 0 || x >= width as i64 {
                        continue;
                    }
                    let dst = &mut coverage[(y as u32 * width + x as u32) as usize];
                    *dst = (*dst).max(bitmap[row * metrics.width + col]);
                }
            }
        }

        Some(GlyphRun { width, height, coverage })
    }

    fn layout_extent(&self, font: &fontdue::Font, text: &str, px: f32) -> (f32, f32) {
        let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings::default());
        layout.append(&[font], &TextStyle::new(text, px, 0));

        let line_height = font
            .horizontal_line_metrics(px)
            .map(|m| m.new_line_size)
            .unwrap_or(px * 1.2);

        // Pen position after each glyph rather than the bitmap edge, so
        // trailing advance is included the same way the layout wraps.
        let w = layout
            .glyphs()
            .iter()
            .map(|g| {
                let m = font.metrics_indexed(g.key.glyph_index, px);
                (g.x - m.xmin as f32 + m.advance_width).max(0.0)
            })
            .fold(0.0f32, f32::max);
        (w, layout.height().max(line_height))
    }
}

impl fmt::Debug for FontSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontSystem")
            .field("families", &self.families.keys().collect::<Vec<_>>())
            .finish()
    }
}
