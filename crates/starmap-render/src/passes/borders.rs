use starmap_engine::paint::{Color, Pen};
use starmap_engine::path::Path;
use starmap_engine::surface::{Saved, Surface};

use crate::context::RenderContext;
use crate::error::RenderError;
use crate::geometry;
use crate::model::{Border, Sector};
use crate::style::{LineStyle, MicroBorderStyle, StyleRule};

use super::{legible, sector_rule};

/// Alpha of border fills and shading.
const FILL_ALPHA: u8 = 64;

/// Shading is this many pen widths wide.
const SHADE_WIDTH: f32 = 4.0;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum BorderLayer {
    Fill,
    Shade,
    Stroke,
}

pub(super) fn fill(ctx: &RenderContext<'_>, s: &mut dyn Surface) -> Result<(), RenderError> {
    micro_borders(ctx, s, BorderLayer::Fill)
}

pub(super) fn shade(ctx: &RenderContext<'_>, s: &mut dyn Surface) -> Result<(), RenderError> {
    if !ctx.style.shade_micro_borders {
        return Ok(());
    }
    micro_borders(ctx, s, BorderLayer::Shade)
}

pub(super) fn stroke(ctx: &RenderContext<'_>, s: &mut dyn Surface) -> Result<(), RenderError> {
    micro_borders(ctx, s, BorderLayer::Stroke)
}

fn micro_borders(ctx: &RenderContext<'_>, s: &mut dyn Surface, layer: BorderLayer) -> Result<(), RenderError> {
    let style = ctx.style;
    if !style.micro_borders.visible {
        return Ok(());
    }
    let border_style = style.micro_border_style;
    for sector in ctx.selector.sectors() {
        let mut g = Saved::new(s);
        if ctx.request.clip_outsector_borders
            && (layer == BorderLayer::Fill || border_style != MicroBorderStyle::Curve)
        {
            g.clip_path(&geometry::sector_clip_path(sector.x, sector.y, border_style));
        }
        if layer == BorderLayer::Fill {
            for region in &sector.regions {
                draw_border(ctx, &mut *g, sector, region, layer)?;
            }
        }
        if layer != BorderLayer::Fill || style.fill_micro_borders {
            for border in &sector.borders {
                draw_border(ctx, &mut *g, sector, border, layer)?;
            }
        }
    }
    Ok(())
}

fn draw_border(
    ctx: &RenderContext<'_>,
    s: &mut dyn Surface,
    sector: &Sector,
    border: &Border,
    layer: BorderLayer,
) -> Result<(), RenderError> {
    if !border.show_border || border.hexes.is_empty() {
        return Ok(());
    }
    let style = ctx.style;
    let element = &style.micro_borders;
    let line_style = border
        .style
        .or_else(|| border_rule(sector, border).and_then(|r| r.style))
        .unwrap_or(LineStyle::Solid);
    if line_style == LineStyle::None && layer != BorderLayer::Fill {
        return Ok(());
    }
    let color = legible(
        style,
        border_color(sector, border).unwrap_or(element.pen.color),
        element.pen.color,
    );

    let ring: Vec<(i32, i32)> = border.hexes.iter().map(|h| sector.coordinates(*h)).collect();
    let border_style = style.micro_border_style;

    if border_style == MicroBorderStyle::Curve {
        // Open curves are only open when stroked; fills and shading close them.
        let closed = layer != BorderLayer::Stroke || border.closed;
        let path = geometry::border_path(&ring, border_style, closed);
        return paint(s, &path, layer, color, element.pen.width, line_style);
    }

    let path = geometry::border_path(&ring, border_style, border.closed);
    if path.is_empty() {
        return Ok(());
    }
    // Strokes stay on the inside of their own outline.
    let mut g = Saved::new(s);
    if border.closed {
        g.clip_path(&path);
    }
    paint(&mut *g, &path, layer, color, element.pen.width, line_style)
}

fn border_rule<'s>(sector: &'s Sector, border: &Border) -> Option<&'s StyleRule> {
    sector_rule(sector, "border", border.allegiance.as_deref()?)
}

/// The border's own color, else its sector's rule color for the allegiance.
pub(super) fn border_color(sector: &Sector, border: &Border) -> Option<Color> {
    border.color.or_else(|| border_rule(sector, border)?.color)
}

fn paint(
    s: &mut dyn Surface,
    path: &Path,
    layer: BorderLayer,
    color: Color,
    width: f32,
    line_style: LineStyle,
) -> Result<(), RenderError> {
    if path.is_empty() {
        return Ok(());
    }
    match layer {
        BorderLayer::Fill => s.fill_path(path, color.with_alpha(FILL_ALPHA)),
        BorderLayer::Shade => s.stroke_path(path, &Pen::new(color.with_alpha(FILL_ALPHA), width * SHADE_WIDTH)),
        BorderLayer::Stroke => {
            let pen = Pen::new(color, width).with_dash(geometry::dash_pattern(line_style)?);
            s.stroke_path(path, &pen);
        }
    }
    Ok(())
}
