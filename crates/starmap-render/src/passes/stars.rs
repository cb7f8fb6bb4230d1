use starmap_engine::coords::Rect;
use starmap_engine::surface::Surface;

use crate::context::RenderContext;
use crate::error::RenderError;
use crate::random::SubtractiveRng;
use crate::transform::{PARSEC_SCALE_X, PARSEC_SCALE_Y};

/// Pixels of tile per background star at scale 1.
const PIXELS_PER_STAR: u64 = 300;

/// Seed for a tile's starfield. The casts truncate toward zero.
pub(super) fn star_seed(tile: Rect) -> i32 {
    ((tile.left() as i32) << 8) ^ (tile.top() as i32)
}

pub(super) fn pseudo_random_stars(ctx: &RenderContext<'_>, s: &mut dyn Surface) -> Result<(), RenderError> {
    let e = &ctx.style.pseudo_random_stars;
    if !e.visible {
        return Ok(());
    }
    let t = ctx.tile_rect();
    let scale = ctx.scale();
    let (w, h) = ctx.request.tile_size;
    let base = (w as u64 * h as u64 / PIXELS_PER_STAR) as f32;
    let count = (if scale >= 1.0 { base } else { base / scale }) as u64;

    let mut rng = SubtractiveRng::new(star_seed(t));
    for _ in 0..count {
        let x = rng.next_f32() * t.width() + t.left();
        let y = rng.next_f32() * t.height() + t.top();
        let d = rng.next_f32() * 2.0;
        let alpha = (rng.next_f32() * 255.0) as u8;
        let rect = Rect::new(x, y, d / (scale * PARSEC_SCALE_X), d / (scale * PARSEC_SCALE_Y));
        s.fill_ellipse(rect, e.fill_color.with_alpha(alpha));
    }
    Ok(())
}
