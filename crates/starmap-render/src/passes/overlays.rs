use starmap_engine::coords::Vec2;
use starmap_engine::paint::Color;
use starmap_engine::path::Path;
use starmap_engine::surface::Surface;
use starmap_engine::text::TextAnchor;

use crate::context::RenderContext;
use crate::error::RenderError;
use crate::geometry;
use crate::model::{SectorStatus, World};

use super::worlds::glyph_frame;

/// Half height of the homeworld triangle and the ancients diamond.
const GLYPH_SIZE: f32 = 0.1;

/// Alpha of the review tint and the unofficial dimming.
const STATUS_ALPHA: u8 = 128;

const OFFICIAL_TINT: Color = Color::rgb(0x00, 0xc0, 0x00);
const IN_REVIEW_TINT: Color = Color::rgb(0xff, 0xa5, 0x00);
const APOCRYPHAL_TINT: Color = Color::rgb(0xff, 0x00, 0xff);
const UNREVIEWED_TINT: Color = Color::rgb(0xff, 0x00, 0x00);

/// Droyne or Chirper glyph letter for `world`, if any.
fn droyne_chirper_glyph(world: &World) -> Option<&'static str> {
    if world.has_remark("Dw") || world.sophonts().any(|s| s == "Droy") {
        Some("D")
    } else if world.sophonts().any(|s| s == "Chir") {
        Some("C")
    } else {
        None
    }
}

pub(super) fn droyne_chirper(ctx: &RenderContext<'_>, s: &mut dyn Surface) -> Result<(), RenderError> {
    let e = &ctx.style.droyne_worlds;
    if !e.visible {
        return Ok(());
    }
    for world in ctx.selector.worlds() {
        let Some(glyph) = droyne_chirper_glyph(world) else {
            continue;
        };
        let mut g = glyph_frame(ctx, s, world);
        g.draw_text(glyph, &e.font, e.position, TextAnchor::Center, e.text_color);
    }
    Ok(())
}

pub(super) fn minor_homeworlds(ctx: &RenderContext<'_>, s: &mut dyn Surface) -> Result<(), RenderError> {
    let e = &ctx.style.minor_homeworlds;
    if !e.visible {
        return Ok(());
    }
    let h = GLYPH_SIZE;
    let w = h * 3f32.sqrt() / 2.0;
    let triangle = Path::polygon(&[
        e.position + Vec2::new(0.0, -h),
        e.position + Vec2::new(w, h / 2.0),
        e.position + Vec2::new(-w, h / 2.0),
    ]);
    for world in ctx.selector.worlds() {
        if !world.is_minor_homeworld() {
            continue;
        }
        let mut g = glyph_frame(ctx, s, world);
        g.stroke_path(&triangle, &e.pen);
    }
    Ok(())
}

pub(super) fn ancients(ctx: &RenderContext<'_>, s: &mut dyn Surface) -> Result<(), RenderError> {
    let e = &ctx.style.ancients_worlds;
    if !e.visible {
        return Ok(());
    }
    let h = GLYPH_SIZE;
    let diamond = Path::polygon(&[
        e.position + Vec2::new(0.0, -h),
        e.position + Vec2::new(h, 0.0),
        e.position + Vec2::new(0.0, h),
        e.position + Vec2::new(-h, 0.0),
    ]);
    for world in ctx.selector.worlds() {
        if !world.has_remark("An") {
            continue;
        }
        let mut g = glyph_frame(ctx, s, world);
        g.fill_path(&diamond, e.fill_color);
    }
    Ok(())
}

pub(super) fn status_tint(status: SectorStatus) -> Color {
    match status {
        SectorStatus::Official => OFFICIAL_TINT,
        SectorStatus::InReview => IN_REVIEW_TINT,
        SectorStatus::Apocryphal => APOCRYPHAL_TINT,
        SectorStatus::Unreviewed => UNREVIEWED_TINT,
    }
    .with_alpha(STATUS_ALPHA)
}

/// Tints each sector by review status and, on request, dims the unofficial
/// ones.
pub(super) fn review_status(ctx: &RenderContext<'_>, s: &mut dyn Surface) -> Result<(), RenderError> {
    let style = ctx.style;
    let tint = style.review_status.visible;
    if !tint && !style.dim_unofficial_sectors {
        return Ok(());
    }
    for sector in ctx.selector.sectors() {
        let status = sector.status();
        let outline = geometry::sector_clip_path(sector.x, sector.y, style.micro_border_style);
        if tint {
            s.fill_path(&outline, status_tint(status));
        }
        if style.dim_unofficial_sectors && status != SectorStatus::Official {
            s.fill_path(&outline, style.background_color.with_alpha(STATUS_ALPHA));
        }
    }
    Ok(())
}
