//! World ↔ image placement of a tile.
//!
//! World space is measured in parsecs with hex columns one unit apart. Image
//! space is device pixels. Columns are packed at `cos 30°` so hexes come out
//! regular, hence the anisotropic parsec scale.

use starmap_engine::coords::{Affine, Rect, Vec2};

/// Horizontal parsec-to-unit ratio, `cos 30°`.
pub const PARSEC_SCALE_X: f32 = 0.866_025_4;
/// Vertical parsec-to-unit ratio.
pub const PARSEC_SCALE_Y: f32 = 1.0;

/// The transform pair for one tile. Immutable once built.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TilePlacement {
    world_to_image: Affine,
    image_to_world: Affine,
}

impl TilePlacement {
    /// Places `tile_rect` (world units) at the image origin at `scale` pixels per parsec.
    ///
    /// Returns `None` for a zero or non-finite scale, which has no inverse.
    pub fn new(tile_rect: Rect, scale: f32) -> Option<Self> {
        let sx = scale * PARSEC_SCALE_X;
        let sy = scale * PARSEC_SCALE_Y;
        let world_to_image = Affine::IDENTITY
            .pre_translate(-tile_rect.left() * sx, -tile_rect.top() * sy)
            .pre_scale(sx, sy);
        let image_to_world = world_to_image.invert()?;
        Some(Self { world_to_image, image_to_world })
    }

    #[inline]
    pub fn world_to_image(&self) -> Affine {
        self.world_to_image
    }

    #[inline]
    pub fn image_to_world(&self) -> Affine {
        self.image_to_world
    }

    #[inline]
    pub fn to_image(&self, p: Vec2) -> Vec2 {
        self.world_to_image.apply(p)
    }

    #[inline]
    pub fn to_world(&self, p: Vec2) -> Vec2 {
        self.image_to_world.apply(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < 1e-3 && (a.y - b.y).abs() < 1e-3
    }

    #[test]
    fn tile_origin_maps_to_image_origin() {
        let t = TilePlacement::new(Rect::new(-10.0, 20.0, 8.0, 6.0), 64.0).unwrap();
        assert!(close(t.to_image(Vec2::new(-10.0, 20.0)), Vec2::zero()));
        let far = t.to_image(Vec2::new(-2.0, 26.0));
        assert!(close(far, Vec2::new(8.0 * 64.0 * PARSEC_SCALE_X, 6.0 * 64.0)));
    }

    #[test]
    fn inverse_round_trips() {
        let t = TilePlacement::new(Rect::new(100.5, -40.0, 4.0, 4.0), 48.0).unwrap();
        let p = Vec2::new(101.25, -38.5);
        assert!(close(t.to_world(t.to_image(p)), p));
    }

    #[test]
    fn zero_scale_is_rejected() {
        assert!(TilePlacement::new(Rect::new(0.0, 0.0, 1.0, 1.0), 0.0).is_none());
    }
}
