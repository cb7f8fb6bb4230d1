use super::{Rect, Vec2};

/// 2D affine transform.
///
/// Maps `(x, y)` to `(a*x + c*y + e, b*x + d*y + f)`.
///
/// The `pre_*` methods follow the "prepend" convention: the new operation is
/// applied to points *before* the existing transform. `surface.translate()`
/// followed by `surface.scale()` therefore scales first, then translates.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Affine {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine {
    pub const IDENTITY: Affine = Affine { a: 1.0, b: 0.0, c: 0.0, d: 1.0, e: 0.0, f: 0.0 };

    #[inline]
    pub const fn new(a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> Self {
        Self { a, b, c, d, e, f }
    }

    #[inline]
    pub const fn translate(dx: f32, dy: f32) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, dx, dy)
    }

    #[inline]
    pub const fn scale(sx: f32, sy: f32) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Clockwise rotation (in a +Y-down space) by `degrees`.
    #[inline]
    pub fn rotate(degrees: f32) -> Self {
        let (s, c) = degrees.to_radians().sin_cos();
        Self::new(c, s, -s, c, 0.0, 0.0)
    }

    /// Returns `self * other`: `other` is applied to points first.
    #[inline]
    pub fn pre_concat(self, other: Affine) -> Affine {
        Affine {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            f: self.b * other.e + self.d * other.f + self.f,
        }
    }

    #[inline]
    pub fn pre_translate(self, dx: f32, dy: f32) -> Affine {
        self.pre_concat(Affine::translate(dx, dy))
    }

    #[inline]
    pub fn pre_scale(self, sx: f32, sy: f32) -> Affine {
        self.pre_concat(Affine::scale(sx, sy))
    }

    #[inline]
    pub fn pre_rotate(self, degrees: f32) -> Affine {
        self.pre_concat(Affine::rotate(degrees))
    }

    #[inline]
    pub fn determinant(self) -> f32 {
        self.a * self.d - self.b * self.c
    }

    /// Geometric mean of the axis scale factors.
    ///
    /// Used to pick a rasterization size for content (glyphs, images) drawn
    /// under this transform.
    #[inline]
    pub fn uniform_scale(self) -> f32 {
        self.determinant().abs().sqrt()
    }

    /// Exact inverse, or `None` for a singular transform.
    pub fn invert(self) -> Option<Affine> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        let inv = 1.0 / det;
        Some(Affine {
            a: self.d * inv,
            b: -self.b * inv,
            c: -self.c * inv,
            d: self.a * inv,
            e: (self.c * self.f - self.d * self.e) * inv,
            f: (self.b * self.e - self.a * self.f) * inv,
        })
    }

    #[inline]
    pub fn apply(self, p: Vec2) -> Vec2 {
        Vec2::new(
            self.a * p.x + self.c * p.y + self.e,
            self.b * p.x + self.d * p.y + self.f,
        )
    }

    /// Applies only the linear part (no translation).
    #[inline]
    pub fn apply_vector(self, v: Vec2) -> Vec2 {
        Vec2::new(self.a * v.x + self.c * v.y, self.b * v.x + self.d * v.y)
    }

    /// Axis-aligned bounds of `rect` after transformation.
    pub fn map_rect(self, rect: Rect) -> Rect {
        let corners = [
            self.apply(rect.origin),
            self.apply(Vec2::new(rect.right(), rect.top())),
            self.apply(Vec2::new(rect.right(), rect.bottom())),
            self.apply(Vec2::new(rect.left(), rect.bottom())),
        ];
        Rect::bounding(&corners).unwrap_or_default()
    }
}
