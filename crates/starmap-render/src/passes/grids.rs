use starmap_engine::coords::{Rect, Vec2};
use starmap_engine::path::Path;
use starmap_engine::surface::{Saved, Surface};
use starmap_engine::text::TextAnchor;

use crate::astrometry::{self, SECTOR_HEIGHT, SECTOR_WIDTH, SUBSECTOR_HEIGHT, SUBSECTOR_WIDTH};
use crate::context::RenderContext;
use crate::error::RenderError;
use crate::geometry::{self, HEX_EDGE};
use crate::style::{HexCoordinateStyle, HexStyle};
use crate::transform::{PARSEC_SCALE_X, PARSEC_SCALE_Y};

/// How far grid lines run past the tile.
const LINE_SLOP: f32 = 10.0;

/// Inset of square parsec cells.
const SQUARE_INSET: f32 = 0.1;

pub(super) fn sector(ctx: &RenderContext<'_>, s: &mut dyn Surface) -> Result<(), RenderError> {
    let e = &ctx.style.sector_grid;
    if !e.visible {
        return Ok(());
    }
    let t = ctx.tile_rect();
    let (w, h) = (SECTOR_WIDTH as f32, SECTOR_HEIGHT as f32);

    let mut x = ((t.left() / w).floor() - 1.0) * w - 1.0;
    while x <= t.right() + w {
        s.draw_line(
            Vec2::new(x, t.top() - LINE_SLOP),
            Vec2::new(x, t.bottom() + LINE_SLOP),
            &e.pen,
        );
        x += w;
    }
    let mut y = ((t.top() / h).floor() - 1.0) * h - h;
    while y <= t.bottom() + h {
        s.draw_line(
            Vec2::new(t.left() - LINE_SLOP, y),
            Vec2::new(t.right() + LINE_SLOP, y),
            &e.pen,
        );
        y += h;
    }
    Ok(())
}

/// Subsector lines; every fourth line is a sector line and is left to the
/// sector grid.
pub(super) fn subsector(ctx: &RenderContext<'_>, s: &mut dyn Surface) -> Result<(), RenderError> {
    let e = &ctx.style.subsector_grid;
    if !e.visible {
        return Ok(());
    }
    let t = ctx.tile_rect();
    let (w, h) = (SUBSECTOR_WIDTH as f32, SUBSECTOR_HEIGHT as f32);

    let hmin = (t.left() / w).floor() as i32 - 1;
    let hmax = ((t.right() + w + 1.0) / w).ceil() as i32;
    for hi in hmin..=hmax {
        if hi % 4 == 0 {
            continue;
        }
        let x = (hi * SUBSECTOR_WIDTH - 1) as f32;
        s.draw_line(
            Vec2::new(x, t.top() - LINE_SLOP),
            Vec2::new(x, t.bottom() + LINE_SLOP),
            &e.pen,
        );
    }

    let vmin = (t.top() / h).floor() as i32 - 1;
    let vmax = ((t.bottom() + h + SECTOR_HEIGHT as f32) / h).ceil() as i32;
    for vi in vmin..=vmax {
        if vi % 4 == 0 {
            continue;
        }
        let y = (vi * SUBSECTOR_HEIGHT - SECTOR_HEIGHT) as f32;
        s.draw_line(
            Vec2::new(t.left() - LINE_SLOP, y),
            Vec2::new(t.right() + LINE_SLOP, y),
            &e.pen,
        );
    }
    Ok(())
}

/// Parsec cells and, when every hex is numbered, their numbers.
///
/// Cell `(px, py)` is the hex at coordinates `(px + 1, py + 1)`; columns with
/// even `px` sit half a row lower.
pub(super) fn parsec(ctx: &RenderContext<'_>, s: &mut dyn Surface) -> Result<(), RenderError> {
    let style = ctx.style;
    let e = &style.parsec_grid;
    if !e.visible {
        return Ok(());
    }
    let t = ctx.tile_rect();
    let x0 = t.left().floor() as i32 - 1;
    let x1 = t.left().floor() as i32 + t.width().ceil() as i32 + 1;
    let y0 = t.top().floor() as i32 - 1;
    let y1 = t.top().floor() as i32 + t.height().ceil() as i32 + 1;

    let corners = geometry::hex_corners(HEX_EDGE);
    let mut grid = Path::new();
    for px in x0..x1 {
        let yo = if px % 2 == 0 { 0.5 } else { 0.0 };
        for py in y0..y1 {
            let (fx, fy) = (px as f32, py as f32 + yo);
            match style.hex_style {
                HexStyle::None => {}
                HexStyle::Square => {
                    grid.extend(&Path::rect(Rect::new(
                        fx + SQUARE_INSET,
                        fy + SQUARE_INSET,
                        1.0 - SQUARE_INSET * 2.0,
                        1.0 - SQUARE_INSET * 2.0,
                    )));
                }
                HexStyle::Hex => {
                    // Lower half only; neighbors supply the rest.
                    let c = Vec2::new(fx + 0.5, fy + 0.5);
                    grid.extend(&Path::polyline(&[
                        c + corners[4],
                        c + corners[3],
                        c + corners[2],
                        c + corners[1],
                    ]));
                }
            }
        }
    }
    if !grid.is_empty() {
        s.stroke_path(&grid, &e.pen);
    }

    let numbers = &style.hex_number;
    if !(style.number_all_hexes && numbers.visible) {
        return Ok(());
    }
    let k = style.hex_content_scale;
    for px in x0..x1 {
        let yo = if px % 2 == 0 { 0.5 } else { 0.0 };
        for py in y0..y1 {
            let text = hex_label(px + 1, py + 1, style.hex_coordinate_style);
            let mut g = Saved::new(s);
            g.translate(px as f32 + 0.5, py as f32 + yo);
            g.scale(k / PARSEC_SCALE_X, k / PARSEC_SCALE_Y);
            g.draw_text(&text, &numbers.font, Vec2::zero(), TextAnchor::TopCenter, numbers.text_color);
        }
    }
    Ok(())
}

/// Hex number for world coordinates `(x, y)`, `XXYY` within the sector or
/// the subsector.
pub(super) fn hex_label(x: i32, y: i32, style: HexCoordinateStyle) -> String {
    let hex = astrometry::coordinates_to_location(x, y).hex;
    match style {
        HexCoordinateStyle::Sector => hex.to_string(),
        HexCoordinateStyle::Subsector => hex.in_subsector().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use starmap_engine::path::PathEl;
    use starmap_engine::scene::DrawCmd;

    use crate::passes::testing::Fixture;

    fn lines(cmds: &[starmap_engine::scene::DrawItem]) -> Vec<(Vec2, Vec2)> {
        cmds.iter()
            .filter_map(|i| match &i.cmd {
                DrawCmd::Stroke { path, .. } => match path.elements() {
                    [PathEl::MoveTo(a), PathEl::LineTo(b)] => Some((*a, *b)),
                    _ => None,
                },
                _ => None,
            })
            .collect()
    }

    #[test]
    fn sector_lines_fall_on_sector_edges() {
        let f = Fixture::poster(Rect::new(-20.0, -50.0, 64.0, 64.0), 1.0, |s| s.sector_grid.visible = true);
        let list = f.draw(sector);
        let ls = lines(list.items());
        let verticals: Vec<f32> = ls.iter().filter(|(a, b)| a.x == b.x).map(|(a, _)| a.x).collect();
        let horizontals: Vec<f32> = ls.iter().filter(|(a, b)| a.y == b.y).map(|(a, _)| a.y).collect();
        assert!(verticals.contains(&-1.0) && verticals.contains(&31.0));
        assert!(verticals.iter().all(|x| (x + 1.0).rem_euclid(32.0) == 0.0));
        assert!(horizontals.contains(&-40.0) && horizontals.contains(&0.0));
        assert!(horizontals.iter().all(|y| y.rem_euclid(40.0) == 0.0));
    }

    #[test]
    fn subsector_grid_skips_sector_lines() {
        let f = Fixture::poster(Rect::new(0.0, 0.0, 64.0, 80.0), 4.0, |s| s.subsector_grid.visible = true);
        let list = f.draw(subsector);
        let ls = lines(list.items());
        let verticals: Vec<i32> = ls.iter().filter(|(a, b)| a.x == b.x).map(|(a, _)| a.x as i32).collect();
        let horizontals: Vec<i32> = ls.iter().filter(|(a, b)| a.y == b.y).map(|(a, _)| a.y as i32).collect();
        assert!(verticals.contains(&7) && verticals.contains(&15) && verticals.contains(&23));
        assert!(!verticals.iter().any(|x| (x + 1).rem_euclid(32) == 0));
        assert!(horizontals.contains(&-30) && horizontals.contains(&10));
        assert!(!horizontals.iter().any(|y| y.rem_euclid(40) == 0));
    }

    #[test]
    fn hex_grid_is_one_stroke() {
        let f = Fixture::poster(Rect::new(0.0, 0.0, 4.0, 4.0), 64.0, |_| {});
        let list = f.draw(parsec);
        assert_eq!(list.paint_items().count(), 1);
    }

    #[test]
    fn no_grid_style_draws_nothing() {
        let f = Fixture::poster(Rect::new(0.0, 0.0, 4.0, 4.0), 64.0, |s| s.hex_style = HexStyle::None);
        assert!(f.draw(parsec).items().is_empty());
    }

    #[test]
    fn numbered_square_grid() {
        let f = Fixture::poster(Rect::new(0.0, 0.0, 2.0, 2.0), 64.0, |s| {
            s.hex_style = HexStyle::Square;
            s.number_all_hexes = true;
            s.hex_coordinate_style = HexCoordinateStyle::Subsector;
        });
        let list = f.draw(parsec);
        let texts: Vec<String> = list
            .items()
            .iter()
            .filter_map(|i| match &i.cmd {
                DrawCmd::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect();
        // Cells -1..3 in both directions.
        assert_eq!(texts.len(), 16);
        assert!(texts.contains(&"0101".to_owned()));
    }

    #[test]
    fn hex_labels() {
        assert_eq!(hex_label(1, 1, HexCoordinateStyle::Sector), "0201");
        assert_eq!(hex_label(10, 12, HexCoordinateStyle::Subsector), "0302");
        assert_eq!(hex_label(0, 0, HexCoordinateStyle::Sector), "0140");
    }
}
