//! The 2D drawing surface abstraction.
//!
//! Every pass of the tile renderer draws through `&mut dyn Surface`. Two
//! implementations exist: [`crate::scene::DrawList`] records commands (used for
//! inspection and tests) and [`crate::raster::Canvas`] rasterizes them.
//!
//! State model:
//! - a current transform, mapping drawing space to device pixels
//! - a current clip, only ever narrowed
//! - a save stack; `restore` returns both to the last `save`
//!
//! Prefer [`Saved`] over bare `save`/`restore` pairs: the guard restores on
//! every exit path, early returns included.

use core::ops::{Deref, DerefMut};

use crate::coords::{Affine, Rect, Vec2};
use crate::paint::{Color, Pen};
use crate::path::Path;
use crate::raster::Bitmap;
use crate::text::{FontSpec, TextAnchor};

pub trait Surface {
    /// Pushes the current transform and clip.
    fn save(&mut self);

    /// Pops the state pushed by the matching [`save`](Surface::save).
    fn restore(&mut self);

    /// Number of unmatched `save` calls.
    fn depth(&self) -> usize;

    fn transform(&self) -> Affine;

    fn set_transform(&mut self, m: Affine);

    /// Narrows the clip to the intersection with `path` (in drawing space).
    fn clip_path(&mut self, path: &Path);

    fn fill_path(&mut self, path: &Path, color: Color);

    fn stroke_path(&mut self, path: &Path, pen: &Pen);

    /// Draws one line of text; `at` is the `anchor` point of its box.
    fn draw_text(&mut self, text: &str, font: &FontSpec, at: Vec2, anchor: TextAnchor, color: Color);

    /// Size of the single-line box of `text`, in drawing-space units.
    fn measure_text(&self, text: &str, font: &FontSpec) -> Vec2;

    /// Draws `image` stretched into `dest`.
    fn draw_image(&mut self, image: &Bitmap, dest: Rect, opacity: f32);

    /// Labels the commands that follow. No-op for rasterizing backends.
    fn insert_debug_marker(&mut self, _label: &str) {}

    // ── provided ──────────────────────────────────────────────────────────

    /// Applies `m` before the current transform.
    fn concat(&mut self, m: Affine) {
        let t = self.transform().pre_concat(m);
        self.set_transform(t);
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.concat(Affine::translate(dx, dy));
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        self.concat(Affine::scale(sx, sy));
    }

    fn rotate(&mut self, degrees: f32) {
        if degrees != 0.0 {
            self.concat(Affine::rotate(degrees));
        }
    }

    fn clip_rect(&mut self, rect: Rect) {
        self.clip_path(&Path::rect(rect));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.fill_path(&Path::rect(rect), color);
    }

    fn fill_ellipse(&mut self, rect: Rect, color: Color) {
        self.fill_path(&Path::ellipse(rect), color);
    }

    fn stroke_ellipse(&mut self, rect: Rect, pen: &Pen) {
        self.stroke_path(&Path::ellipse(rect), pen);
    }

    fn draw_line(&mut self, a: Vec2, b: Vec2, pen: &Pen) {
        self.stroke_path(&Path::line(a, b), pen);
    }
}

/// Scoped save/restore.
///
/// Creating the guard saves the surface state; dropping it restores it. The
/// guard dereferences to the surface, so drawing goes through it directly:
///
/// ```ignore
/// let mut g = Saved::new(surface);
/// g.translate(center.x, center.y);
/// g.fill_ellipse(rect, color);
/// // restored here
/// ```
pub struct Saved<'a> {
    surface: &'a mut dyn Surface,
}

impl<'a> Saved<'a> {
    pub fn new(surface: &'a mut dyn Surface) -> Self {
        surface.save();
        Self { surface }
    }
}

impl<'a> Deref for Saved<'a> {
    type Target = dyn Surface + 'a;

    fn deref(&self) -> &Self::Target {
        self.surface
    }
}

impl<'a> DerefMut for Saved<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.surface
    }
}

impl Drop for Saved<'_> {
    fn drop(&mut self) {
        self.surface.restore();
    }
}
