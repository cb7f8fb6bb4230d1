use starmap_engine::coords::Vec2;
use starmap_engine::paint::Pen;
use starmap_engine::surface::Surface;

use crate::astrometry::{self, Location};
use crate::context::RenderContext;
use crate::error::RenderError;
use crate::geometry;
use crate::model::{Route, Sector};
use crate::style::LineStyle;
use crate::transform::PARSEC_SCALE_X;

use super::{legible, sector_rule};

/// Allegiance code routes fall back to when they name none.
const DEFAULT_ROUTE_CODE: &str = "Im";

pub(super) fn micro_routes(ctx: &RenderContext<'_>, s: &mut dyn Surface) -> Result<(), RenderError> {
    let style = ctx.style;
    let element = &style.micro_routes;
    if !element.visible {
        return Ok(());
    }
    for (sector, route) in ctx.selector.routes() {
        let Some((a, b)) = route_endpoints(sector, route, style.route_end_adjust) else {
            continue;
        };
        let code = route
            .allegiance
            .as_deref()
            .or(route.route_type.as_deref())
            .unwrap_or(DEFAULT_ROUTE_CODE);
        let rule = sector_rule(sector, "route", code);

        let line_style = style
            .override_line_style
            .or(route.style)
            .or_else(|| rule.and_then(|r| r.style))
            .unwrap_or(LineStyle::Solid);
        if line_style == LineStyle::None {
            continue;
        }
        let width = route
            .width
            .or_else(|| rule.and_then(|r| r.width))
            .unwrap_or(1.0)
            * element.pen.width;
        let color = route
            .color
            .or_else(|| rule.and_then(|r| r.color))
            .unwrap_or(element.pen.color);
        let color = legible(style, color, element.pen.color);

        let pen = Pen::new(color, width).with_dash(geometry::dash_pattern(line_style)?);
        s.draw_line(a, b, &pen);
    }
    Ok(())
}

/// World-space segment of `route`, shortened by `adjust` at both ends.
///
/// Endpoints are ordered so a route and its reverse draw the same line. The
/// shortening is measured with hexes regular, so it looks even on screen.
pub(super) fn route_endpoints(sector: &Sector, route: &Route, adjust: f32) -> Option<(Vec2, Vec2)> {
    let at = |offset: (i32, i32), hex| {
        astrometry::location_to_coordinates(Location::new(sector.x + offset.0, sector.y + offset.1, hex))
    };
    let mut a = at(route.start_offset, route.start);
    let mut b = at(route.end_offset, route.end);
    if (b.0, b.1) < (a.0, a.1) {
        std::mem::swap(&mut a, &mut b);
    }
    let to_scaled = |(x, y): (i32, i32)| {
        let c = astrometry::hex_to_center(x, y);
        Vec2::new(c.x * PARSEC_SCALE_X, c.y)
    };
    let (p, q) = geometry::offset_segment(to_scaled(a), to_scaled(b), adjust)?;
    Some((
        Vec2::new(p.x / PARSEC_SCALE_X, p.y),
        Vec2::new(q.x / PARSEC_SCALE_X, q.y),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use starmap_engine::coords::Rect;
    use starmap_engine::paint::Color;
    use starmap_engine::scene::DrawCmd;

    use crate::astrometry::Hex;
    use crate::passes::testing::Fixture;
    use crate::style::{SectorStylesheet, StyleRule};

    fn close(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < 1e-4 && (a.y - b.y).abs() < 1e-4
    }

    fn pens(sector: Sector, tweak: impl FnOnce(&mut crate::style::Stylesheet)) -> Vec<Pen> {
        let mut f = Fixture::poster(Rect::new(-1.0, -40.0, 32.0, 40.0), 32.0, tweak);
        f.index.push(sector);
        f.draw(micro_routes)
            .items()
            .iter()
            .filter_map(|i| match &i.cmd {
                DrawCmd::Stroke { pen, .. } => Some(pen.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn reversed_route_draws_the_same_line() {
        let s = Sector::new(0, 0, "Core");
        let fwd = route_endpoints(&s, &Route::new(Hex::new(2, 2), Hex::new(5, 4)), 0.25).unwrap();
        let rev = route_endpoints(&s, &Route::new(Hex::new(5, 4), Hex::new(2, 2)), 0.25).unwrap();
        assert!(close(fwd.0, rev.0) && close(fwd.1, rev.1));
        assert!(fwd.0.x < fwd.1.x);
    }

    #[test]
    fn ends_pulled_in_evenly() {
        let s = Sector::new(0, 0, "Core");
        let (a, b) = route_endpoints(&s, &Route::new(Hex::new(2, 2), Hex::new(2, 6)), 0.25).unwrap();
        let c0 = s.hex_center(Hex::new(2, 2));
        let c1 = s.hex_center(Hex::new(2, 6));
        assert!(close(a, Vec2::new(c0.x, c0.y + 0.25)));
        assert!(close(b, Vec2::new(c1.x, c1.y - 0.25)));
    }

    #[test]
    fn route_to_neighbor_sector() {
        let s = Sector::new(0, 0, "Core");
        let mut r = Route::new(Hex::new(32, 10), Hex::new(1, 10));
        r.end_offset = (1, 0);
        let (a, b) = route_endpoints(&s, &r, 0.0).unwrap();
        // Odd to even column steps half a row up.
        assert!(close(b - a, Vec2::new(1.0, -0.5)));
    }

    #[test]
    fn degenerate_route_is_skipped() {
        let s = Sector::new(0, 0, "Core");
        assert!(route_endpoints(&s, &Route::new(Hex::new(3, 3), Hex::new(3, 3)), 0.25).is_none());
    }

    #[test]
    fn none_style_draws_nothing() {
        let mut s = Sector::new(0, 0, "Core");
        let mut r = Route::new(Hex::new(2, 2), Hex::new(3, 3));
        r.style = Some(LineStyle::None);
        s.routes.push(r);
        assert!(pens(s, |_| {}).is_empty());
    }

    #[test]
    fn override_beats_route_style() {
        let mut s = Sector::new(0, 0, "Core");
        let mut r = Route::new(Hex::new(2, 2), Hex::new(3, 3));
        r.style = Some(LineStyle::Dashed);
        s.routes.push(r);
        let p = pens(s, |st| st.override_line_style = Some(LineStyle::Dotted));
        assert_eq!(p[0].dash, Some(vec![1.0, 1.0]));
    }

    #[test]
    fn width_and_color_from_rule() {
        let mut s = Sector::new(0, 0, "Core");
        let mut r = Route::new(Hex::new(2, 2), Hex::new(3, 3));
        r.route_type = Some("Trade".to_owned());
        s.routes.push(r);
        let rule = StyleRule { color: Some(Color::rgb(0xff, 0x80, 0x00)), style: None, width: Some(3.0) };
        s.stylesheet = Some(Arc::new(SectorStylesheet::new().with_rule("route", Some("Trade"), rule)));
        let p = pens(s, |_| {});
        let base = crate::style::Stylesheet::new(32.0, crate::options::MapOptions::DEFAULT).micro_routes.pen;
        assert_eq!(p[0].color, Color::rgb(0xff, 0x80, 0x00));
        assert!((p[0].width - base.width * 3.0).abs() < 1e-6);
        assert_eq!(p[0].dash, None);
    }

    #[test]
    fn grayscale_falls_back_to_pen_color() {
        let mut s = Sector::new(0, 0, "Core");
        let mut r = Route::new(Hex::new(2, 2), Hex::new(3, 3));
        r.color = Some(Color::rgb(0xff, 0x00, 0x00));
        s.routes.push(r);
        let p = pens(s, |st| st.grayscale = true);
        let base = crate::style::Stylesheet::new(32.0, crate::options::MapOptions::DEFAULT).micro_routes.pen;
        assert_eq!(p[0].color, base.color);
    }
}
