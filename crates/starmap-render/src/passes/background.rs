use starmap_engine::coords::Rect;
use starmap_engine::surface::{Saved, Surface};

use crate::context::RenderContext;
use crate::error::RenderError;
use crate::resources::{GALAXY_RECT, RIFT_RECT};
use crate::transform::{PARSEC_SCALE_X, PARSEC_SCALE_Y};

/// Nebula tiles are drawn at twice their pixel size.
const NEBULA_SCALE: f32 = 2.0;

pub(super) fn solid(ctx: &RenderContext<'_>, s: &mut dyn Surface) -> Result<(), RenderError> {
    let e = &ctx.style.background;
    if !e.visible {
        return Ok(());
    }
    let t = ctx.tile_rect();
    s.fill_rect(t.inflate(t.width() * 0.1, t.height() * 0.1), e.fill_color);
    Ok(())
}

/// Repeats the nebula texture in image space so it stays put while panning.
pub(super) fn nebula(ctx: &RenderContext<'_>, s: &mut dyn Surface) -> Result<(), RenderError> {
    if !ctx.style.nebula.visible {
        return Ok(());
    }
    let image = ctx.resources.get("Nebula")?;
    let w = image.width() as f32 * NEBULA_SCALE;
    let h = image.height() as f32 * NEBULA_SCALE;
    if w <= 0.0 || h <= 0.0 {
        return Ok(());
    }

    let t = ctx.tile_rect();
    let scale = ctx.scale();
    let origin_x = t.left() * scale * PARSEC_SCALE_X;
    let origin_y = t.top() * scale * PARSEC_SCALE_Y;
    let (tw, th) = ctx.request.tile_size;

    let mut g = Saved::new(s);
    g.concat(ctx.placement.image_to_world());
    let mut y = -origin_y.rem_euclid(h);
    while y < th as f32 {
        let mut x = -origin_x.rem_euclid(w);
        while x < tw as f32 {
            g.draw_image(&image, Rect::new(x, y, w, h), 1.0);
            x += w;
        }
        y += h;
    }
    Ok(())
}

pub(super) fn galaxy(ctx: &RenderContext<'_>, s: &mut dyn Surface) -> Result<(), RenderError> {
    let style = ctx.style;
    if !style.galaxy.visible || style.deep_background_opacity <= 0.0 {
        return Ok(());
    }
    if !GALAXY_RECT.intersects(ctx.tile_rect()) {
        return Ok(());
    }
    let name = if style.light_background { "Galaxy_Gray" } else { "Galaxy" };
    let image = ctx.resources.get(name)?;
    s.draw_image(&image, GALAXY_RECT, style.deep_background_opacity);
    Ok(())
}

pub(super) fn rifts(ctx: &RenderContext<'_>, s: &mut dyn Surface) -> Result<(), RenderError> {
    let style = ctx.style;
    if !style.rifts.visible || style.rift_opacity <= 0.0 {
        return Ok(());
    }
    if !RIFT_RECT.intersects(ctx.tile_rect()) {
        return Ok(());
    }
    let image = ctx.resources.get("Rifts")?;
    s.draw_image(&image, RIFT_RECT, style.rift_opacity);
    Ok(())
}
