use std::path::Path as FsPath;
use std::sync::Arc;

use anyhow::{Context, Result, ensure};
use resvg::tiny_skia as sk;

use crate::coords::{Affine, Rect, Vec2};
use crate::paint::{Color, LineCap, Pen};
use crate::path::Path;
use crate::surface::Surface;
use crate::text::{FontSpec, FontSystem, TextAnchor};

use super::{Bitmap, to_sk_path, to_sk_transform};

/// Glyph runs smaller than this many device pixels per em are skipped.
const MIN_TEXT_PX: f32 = 1.0;

#[derive(Clone)]
struct State {
    transform: Affine,
    /// `None` means unclipped. Shared between stack entries until narrowed.
    clip: Option<Arc<sk::Mask>>,
}

/// Rasterizing surface backed by a tiny-skia pixmap.
pub struct Canvas {
    pixmap: sk::Pixmap,
    fonts: Arc<FontSystem>,
    current: State,
    stack: Vec<State>,
    warned_no_fonts: bool,
}

impl Canvas {
    /// Creates a transparent canvas of `width` x `height` device pixels.
    pub fn new(width: u32, height: u32, fonts: Arc<FontSystem>) -> Result<Self> {
        ensure!(width > 0 && height > 0, "canvas size must be nonzero, got {width}x{height}");
        let pixmap = sk::Pixmap::new(width, height)
            .with_context(|| format!("allocating {width}x{height} pixmap"))?;
        Ok(Self {
            pixmap,
            fonts,
            current: State { transform: Affine::IDENTITY, clip: None },
            stack: Vec::new(),
            warned_no_fonts: false,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Fills every pixel with `color`, ignoring transform and clip.
    pub fn clear(&mut self, color: Color) {
        self.pixmap.fill(sk::Color::from_rgba8(color.r, color.g, color.b, color.a));
    }

    /// Straight-alpha color of one pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let p = self.pixmap.pixel(x, y)?.demultiply();
        Some(Color::rgba(p.red(), p.green(), p.blue(), p.alpha()))
    }

    /// Straight-alpha RGBA bytes, row-major.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixmap.pixels().len() * 4);
        for p in self.pixmap.pixels() {
            let c = p.demultiply();
            out.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        out
    }

    /// Encodes the canvas as PNG at `path`.
    pub fn write_png(&self, path: &FsPath) -> Result<()> {
        image::save_buffer(
            path,
            &self.to_rgba8(),
            self.width(),
            self.height(),
            image::ColorType::Rgba8,
        )
        .with_context(|| format!("writing {}", path.display()))
    }

    fn paint(color: Color) -> sk::Paint<'static> {
        let mut paint = sk::Paint::default();
        paint.set_color_rgba8(color.r, color.g, color.b, color.a);
        paint.anti_alias = true;
        paint
    }
}

impl Surface for Canvas {
    fn save(&mut self) {
        self.stack.push(self.current.clone());
    }

    fn restore(&mut self) {
        match self.stack.pop() {
            Some(state) => self.current = state,
            None => log::warn!("Canvas::restore without matching save; ignoring"),
        }
    }

    #[inline]
    fn depth(&self) -> usize {
        self.stack.len()
    }

    #[inline]
    fn transform(&self) -> Affine {
        self.current.transform
    }

    #[inline]
    fn set_transform(&mut self, m: Affine) {
        self.current.transform = m;
    }

    fn clip_path(&mut self, path: &Path) {
        let ts = to_sk_transform(self.current.transform);
        let Some(mut mask) = sk::Mask::new(self.width(), self.height()) else {
            return;
        };
        // An empty path clips everything: the fresh mask is fully transparent.
        if let Some(p) = to_sk_path(path) {
            match &self.current.clip {
                Some(prev) => {
                    mask = (**prev).clone();
                    mask.intersect_path(&p, sk::FillRule::Winding, true, ts);
                }
                None => mask.fill_path(&p, sk::FillRule::Winding, true, ts),
            }
        }
        self.current.clip = Some(Arc::new(mask));
    }

    fn fill_path(&mut self, path: &Path, color: Color) {
        if color.is_empty() {
            return;
        }
        let Some(p) = to_sk_path(path) else { return };
        let ts = to_sk_transform(self.current.transform);
        let paint = Self::paint(color);
        self.pixmap
            .fill_path(&p, &paint, sk::FillRule::Winding, ts, self.current.clip.as_deref());
    }

    fn stroke_path(&mut self, path: &Path, pen: &Pen) {
        if pen.color.is_empty() {
            return;
        }
        let Some(p) = to_sk_path(path) else { return };
        let stroke = sk::Stroke {
            width: pen.width.max(0.0),
            line_cap: match pen.cap {
                LineCap::Butt => sk::LineCap::Butt,
                LineCap::Round => sk::LineCap::Round,
                LineCap::Square => sk::LineCap::Square,
            },
            dash: pen.scaled_dash().and_then(|d| sk::StrokeDash::new(d, 0.0)),
            ..sk::Stroke::default()
        };
        let ts = to_sk_transform(self.current.transform);
        let paint = Self::paint(pen.color);
        self.pixmap
            .stroke_path(&p, &paint, &stroke, ts, self.current.clip.as_deref());
    }

    fn draw_text(&mut self, text: &str, font: &FontSpec, at: Vec2, anchor: TextAnchor, color: Color) {
        if text.is_empty() || color.is_empty() {
            return;
        }
        if self.fonts.is_empty() {
            if !self.warned_no_fonts {
                log::warn!("no fonts loaded; text will not be drawn");
                self.warned_no_fonts = true;
            }
            return;
        }

        let m = self.current.transform;
        let px = font.size * m.uniform_scale();
        if px < MIN_TEXT_PX {
            return;
        }
        let Some(run) = self.fonts.rasterize_line(text, &font.family, px) else {
            return;
        };

        let mut glyphs = match sk::Pixmap::new(run.width, run.height) {
            Some(p) => p,
            None => return,
        };
        for (dst, &cov) in glyphs.pixels_mut().iter_mut().zip(&run.coverage) {
            let a = ((color.a as u16 * cov as u16) / 255) as u8;
            *dst = sk::ColorU8::from_rgba(color.r, color.g, color.b, a).premultiply();
        }

        let size = self.measure_text(text, font);
        let origin = at + anchor.offset(size);
        let k = font.size / px;
        let ts = to_sk_transform(m.pre_translate(origin.x, origin.y).pre_scale(k, k));
        let paint = sk::PixmapPaint {
            quality: sk::FilterQuality::Bilinear,
            ..sk::PixmapPaint::default()
        };
        self.pixmap
            .draw_pixmap(0, 0, glyphs.as_ref(), &paint, ts, self.current.clip.as_deref());
    }

    fn measure_text(&self, text: &str, font: &FontSpec) -> Vec2 {
        self.fonts.measure_text(text, &font.family, font.size)
    }

    fn draw_image(&mut self, image: &Bitmap, dest: Rect, opacity: f32) {
        if opacity <= 0.0 || dest.is_empty() {
            return;
        }
        let sx = dest.width() / image.width() as f32;
        let sy = dest.height() / image.height() as f32;
        let ts = to_sk_transform(
            self.current
                .transform
                .pre_translate(dest.left(), dest.top())
                .pre_scale(sx, sy),
        );
        let paint = sk::PixmapPaint {
            opacity: opacity.min(1.0),
            quality: sk::FilterQuality::Bilinear,
            ..sk::PixmapPaint::default()
        };
        self.pixmap
            .draw_pixmap(0, 0, image.pixmap().as_ref(), &paint, ts, self.current.clip.as_deref());
    }
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("depth", &self.stack.len())
            .finish()
    }
}
