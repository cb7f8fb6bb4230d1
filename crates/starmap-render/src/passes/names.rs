use starmap_engine::surface::Surface;

use crate::astrometry;
use crate::context::RenderContext;
use crate::error::RenderError;
use crate::labels::draw_styled_label;
use crate::model::{Border, LabelSize, Sector};
use crate::options::MapOptions;
use crate::style::{LabelStyle, TextBackgroundStyle};

use super::borders::border_color;
use super::legible;

pub(super) fn subsector_names(ctx: &RenderContext<'_>, s: &mut dyn Surface) -> Result<(), RenderError> {
    let e = &ctx.style.subsector_names;
    if !e.visible {
        return Ok(());
    }
    for sector in ctx.selector.sectors() {
        for (index, name) in &sector.subsector_names {
            let at = astrometry::subsector_center(sector.x, sector.y, *index);
            draw_styled_label(
                s,
                name,
                &e.font,
                at,
                e.text_color,
                &e.text_style,
                TextBackgroundStyle::None,
                &ctx.labels,
            );
        }
    }
    Ok(())
}

/// Sector names: every sector with `SECTORS_ALL`, otherwise only the selected
/// ones.
pub(super) fn sector_names(ctx: &RenderContext<'_>, s: &mut dyn Surface) -> Result<(), RenderError> {
    let e = &ctx.style.sector_names;
    if !e.visible {
        return Ok(());
    }
    let options = ctx.options();
    let all = options.contains(MapOptions::SECTORS_ALL);
    let selected = options.contains(MapOptions::SECTORS_SELECTED);
    for sector in ctx.selector.sectors() {
        if !(all || selected && sector.selected) {
            continue;
        }
        let name = sector.name();
        if name.is_empty() {
            continue;
        }
        draw_styled_label(
            s,
            name,
            &e.font,
            astrometry::sector_center(sector.x, sector.y),
            e.text_color,
            &e.text_style,
            e.text_background_style,
            &ctx.labels,
        );
    }
    Ok(())
}

/// Labels placed by the sector data: border and region names, then free
/// sector labels.
pub(super) fn explicit_labels(ctx: &RenderContext<'_>, s: &mut dyn Surface) -> Result<(), RenderError> {
    let e = &ctx.style.micro_borders;
    if !e.visible {
        return Ok(());
    }
    for sector in ctx.selector.sectors() {
        for border in sector.borders.iter().chain(&sector.regions) {
            draw_border_label(ctx, s, sector, border);
        }
        for label in &sector.labels {
            let font = match label.size {
                LabelSize::Small => &e.small_font,
                LabelSize::Normal => &e.font,
                LabelSize::Large => &e.large_font,
            };
            let style = LabelStyle { wrap: label.wrap, ..LabelStyle::default() };
            draw_styled_label(
                s,
                &label.text,
                font,
                sector.hex_center(label.hex) + label.offset,
                legible(ctx.style, label.color.unwrap_or(e.text_color), e.text_color),
                &style,
                e.text_background_style,
                &ctx.labels,
            );
        }
    }
    Ok(())
}

fn draw_border_label(ctx: &RenderContext<'_>, s: &mut dyn Surface, sector: &Sector, border: &Border) {
    let e = &ctx.style.micro_borders;
    if !border.show_label {
        return;
    }
    let Some(text) = border.label.as_deref() else {
        return;
    };
    let Some(hex) = border.label_position.or_else(|| border.hexes.first().copied()) else {
        return;
    };
    let style = LabelStyle { uppercase: true, wrap: border.wrap_label, ..LabelStyle::default() };
    let color = border_color(sector, border).unwrap_or(e.text_color);
    draw_styled_label(
        s,
        text,
        &e.font,
        sector.hex_center(hex) + border.label_offset,
        legible(ctx.style, color, e.text_color),
        &style,
        e.text_background_style,
        &ctx.labels,
    );
}
