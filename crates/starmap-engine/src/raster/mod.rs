//! CPU rasterization backend.
//!
//! [`Canvas`] implements [`crate::surface::Surface`] on a tiny-skia pixmap
//! (re-exported by `resvg`). Clipping is mask based, text comes from the
//! fontdue-backed [`crate::text::FontSystem`], images are [`Bitmap`]s decoded
//! with `image` (raster formats) or `resvg` (SVG).

mod bitmap;
mod canvas;

pub use bitmap::{Bitmap, BitmapError};
pub use canvas::Canvas;

use resvg::tiny_skia as sk;

use crate::coords::Affine;
use crate::path::{Path, PathEl};

#[inline]
pub(crate) fn to_sk_transform(m: Affine) -> sk::Transform {
    sk::Transform::from_row(m.a, m.b, m.c, m.d, m.e, m.f)
}

/// Converts to a tiny-skia path. `None` for paths without drawable segments.
pub(crate) fn to_sk_path(path: &Path) -> Option<sk::Path> {
    let mut pb = sk::PathBuilder::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => pb.move_to(p.x, p.y),
            PathEl::LineTo(p) => pb.line_to(p.x, p.y),
            PathEl::CubicTo(a, b, p) => pb.cubic_to(a.x, a.y, b.x, b.y, p.x, p.y),
            PathEl::Close => pb.close(),
        }
    }
    pb.finish()
}
