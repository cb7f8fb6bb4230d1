//! Vector paths.
//!
//! A [`Path`] is a backend-independent list of drawing verbs. The recording
//! surface stores it as-is; the raster canvas converts it to a tiny-skia path.

use crate::coords::{Affine, Rect, Vec2};

/// Cubic Bézier handle length for a quarter ellipse.
const KAPPA: f32 = 0.552_284_8;

/// One path verb.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PathEl {
    MoveTo(Vec2),
    LineTo(Vec2),
    CubicTo(Vec2, Vec2, Vec2),
    Close,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    els: Vec<PathEl>,
}

impl Path {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn elements(&self) -> &[PathEl] {
        &self.els
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.els.is_empty()
    }

    pub fn move_to(&mut self, p: Vec2) -> &mut Self {
        self.els.push(PathEl::MoveTo(p));
        self
    }

    pub fn line_to(&mut self, p: Vec2) -> &mut Self {
        self.els.push(PathEl::LineTo(p));
        self
    }

    pub fn cubic_to(&mut self, c1: Vec2, c2: Vec2, p: Vec2) -> &mut Self {
        self.els.push(PathEl::CubicTo(c1, c2, p));
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.els.push(PathEl::Close);
        self
    }

    /// Appends every element of `other`.
    pub fn extend(&mut self, other: &Path) -> &mut Self {
        self.els.extend_from_slice(&other.els);
        self
    }

    /// Single straight segment.
    pub fn line(a: Vec2, b: Vec2) -> Self {
        let mut p = Path::new();
        p.move_to(a).line_to(b);
        p
    }

    /// Open polyline through `points`. Fewer than two points yields an empty path.
    pub fn polyline(points: &[Vec2]) -> Self {
        let mut p = Path::new();
        if points.len() < 2 {
            return p;
        }
        p.move_to(points[0]);
        for &pt in &points[1..] {
            p.line_to(pt);
        }
        p
    }

    /// Closed polygon through `points`. Fewer than three points yields an empty path.
    pub fn polygon(points: &[Vec2]) -> Self {
        if points.len() < 3 {
            return Path::new();
        }
        let mut p = Path::polyline(points);
        p.close();
        p
    }

    pub fn rect(r: Rect) -> Self {
        Path::polygon(&[
            r.origin,
            Vec2::new(r.right(), r.top()),
            Vec2::new(r.right(), r.bottom()),
            Vec2::new(r.left(), r.bottom()),
        ])
    }

    /// Ellipse inscribed in `r`, as four cubic arcs.
    pub fn ellipse(r: Rect) -> Self {
        let c = r.center();
        let rx = r.width() * 0.5;
        let ry = r.height() * 0.5;
        let kx = rx * KAPPA;
        let ky = ry * KAPPA;

        let mut p = Path::new();
        p.move_to(Vec2::new(c.x + rx, c.y))
            .cubic_to(Vec2::new(c.x + rx, c.y + ky), Vec2::new(c.x + kx, c.y + ry), Vec2::new(c.x, c.y + ry))
            .cubic_to(Vec2::new(c.x - kx, c.y + ry), Vec2::new(c.x - rx, c.y + ky), Vec2::new(c.x - rx, c.y))
            .cubic_to(Vec2::new(c.x - rx, c.y - ky), Vec2::new(c.x - kx, c.y - ry), Vec2::new(c.x, c.y - ry))
            .cubic_to(Vec2::new(c.x + kx, c.y - ry), Vec2::new(c.x + rx, c.y - ky), Vec2::new(c.x + rx, c.y))
            .close();
        p
    }

    /// Circle of radius `r` around `center`.
    #[inline]
    pub fn circle(center: Vec2, r: f32) -> Self {
        Path::ellipse(Rect::from_center(center, r * 2.0, r * 2.0))
    }

    /// Copy with every point mapped through `m`.
    pub fn transformed(&self, m: Affine) -> Path {
        let els = self
            .els
            .iter()
            .map(|el| match *el {
                PathEl::MoveTo(p) => PathEl::MoveTo(m.apply(p)),
                PathEl::LineTo(p) => PathEl::LineTo(m.apply(p)),
                PathEl::CubicTo(a, b, p) => PathEl::CubicTo(m.apply(a), m.apply(b), m.apply(p)),
                PathEl::Close => PathEl::Close,
            })
            .collect();
        Path { els }
    }

    /// Bounds of all points including control points.
    pub fn control_bounds(&self) -> Option<Rect> {
        let mut pts = Vec::with_capacity(self.els.len() * 3);
        for el in &self.els {
            match *el {
                PathEl::MoveTo(p) | PathEl::LineTo(p) => pts.push(p),
                PathEl::CubicTo(a, b, p) => pts.extend_from_slice(&[a, b, p]),
                PathEl::Close => {}
            }
        }
        Rect::bounding(&pts)
    }
}
