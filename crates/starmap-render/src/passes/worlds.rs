//! World glyphs.
//!
//! Background and foreground draw in a per-world glyph frame: origin at the
//! hex center, one unit per hex at `hex_content_scale`, hexes regular. The
//! overlays draw in an undistorted frame sized in world units.

use std::f32::consts::FRAC_1_SQRT_2;

use starmap_engine::coords::{Affine, Rect, Vec2};
use starmap_engine::paint::{Color, Pen};
use starmap_engine::path::Path;
use starmap_engine::surface::{Saved, Surface};
use starmap_engine::text::TextAnchor;

use crate::context::RenderContext;
use crate::error::RenderError;
use crate::geometry::{self, HEX_EDGE};
use crate::labels::draw_label;
use crate::model::{World, Zone, ehex_digit};
use crate::options::{MapOptions, WorldDetails};
use crate::stellar;
use crate::style::{HexCoordinateStyle, StyleElement, TextBackgroundStyle};
use crate::transform::{PARSEC_SCALE_X, PARSEC_SCALE_Y};

/// Overlays reach well past their hex.
const OVERLAY_SLOP: f32 = 0.5;

const DISC_RADIUS: f32 = 0.1;
const ZONE_RADIUS: f32 = 0.4;
const ZONE_PERIMETER_INSET: f32 = 0.95;
const GAS_GIANT_POSITION: Vec2 = Vec2::new(0.29, -0.29);
const GAS_GIANT_RADIUS: f32 = 0.05;
const STARPORT_POSITION: Vec2 = Vec2::new(0.0, -0.24);
const BASES_POSITION: Vec2 = Vec2::new(-0.35, 0.0);
const ALLEGIANCE_POSITION: Vec2 = Vec2::new(0.35, 0.0);
const PLACEHOLDER_GLYPH: &str = "?";

/// Eye-candy decorations step out this far from the image.
const CANDY_RING_STEP: f32 = 0.1;

const AG_RI_COLOR: Color = Color::rgb(0xff, 0xcc, 0x00);
const AG_COLOR: Color = Color::rgb(0x48, 0xc1, 0x4a);
const RI_COLOR: Color = Color::rgb(0x80, 0x00, 0x80);
const IN_COLOR: Color = Color::rgb(0x88, 0x88, 0x88);
const HOSTILE_ATMOSPHERE_COLOR: Color = Color::rgb(0xff, 0x80, 0x00);

/// Saves and enters the glyph frame of `world`.
pub(super) fn glyph_frame<'s>(ctx: &RenderContext<'_>, s: &'s mut dyn Surface, world: &World) -> Saved<'s> {
    let c = world.center();
    let k = ctx.style.hex_content_scale;
    let mut g = Saved::new(s);
    g.translate(c.x, c.y);
    g.scale(k / PARSEC_SCALE_X, k / PARSEC_SCALE_Y);
    g.rotate(ctx.style.hex_rotation);
    g
}

fn hex_number(ctx: &RenderContext<'_>, s: &mut dyn Surface, world: &World) {
    let e = &ctx.style.hex_number;
    let hex = world.hex();
    let text = match ctx.style.hex_coordinate_style {
        HexCoordinateStyle::Sector => hex.to_string(),
        HexCoordinateStyle::Subsector => hex.in_subsector().to_string(),
    };
    s.draw_text(&text, &e.font, e.position, TextAnchor::TopCenter, e.text_color);
}

pub(super) fn background(ctx: &RenderContext<'_>, s: &mut dyn Surface) -> Result<(), RenderError> {
    let style = ctx.style;
    if !style.worlds.visible {
        return Ok(());
    }
    let details = style.world_details;
    let numbers = style.hex_number.visible && !style.number_all_hexes;
    for world in ctx.selector.worlds() {
        let mut g = glyph_frame(ctx, s, world);
        if style.use_world_images {
            if numbers {
                hex_number(ctx, &mut *g, world);
            }
            continue;
        }
        if details.contains(WorldDetails::ZONE) {
            draw_zone(ctx, &mut *g, world.zone);
        }
        if numbers && details.contains(WorldDetails::HEX) {
            hex_number(ctx, &mut *g, world);
        }
    }
    Ok(())
}

fn zone_pen<'c>(ctx: &'c RenderContext<'_>, zone: Zone) -> Option<&'c Pen> {
    let e = match zone {
        Zone::Green => return None,
        Zone::Amber => &ctx.style.amber_zone,
        Zone::Red => &ctx.style.red_zone,
    };
    e.visible.then_some(&e.pen)
}

fn draw_zone(ctx: &RenderContext<'_>, s: &mut dyn Surface, zone: Zone) {
    let Some(pen) = zone_pen(ctx, zone) else {
        return;
    };
    if ctx.style.show_zones_as_perimeters {
        let k = ctx.style.hex_content_scale;
        let f = ZONE_PERIMETER_INSET / k;
        let path = geometry::hex_path(HEX_EDGE).transformed(Affine::scale(f * PARSEC_SCALE_X, f * PARSEC_SCALE_Y));
        s.stroke_path(&path, pen);
    } else {
        s.stroke_path(&Path::circle(Vec2::zero(), ZONE_RADIUS), pen);
    }
}

pub(super) fn foreground(ctx: &RenderContext<'_>, s: &mut dyn Surface) -> Result<(), RenderError> {
    let style = ctx.style;
    if !style.worlds.visible {
        return Ok(());
    }
    for world in ctx.selector.worlds() {
        let mut g = glyph_frame(ctx, s, world);
        if style.use_world_images {
            candy_world(ctx, &mut *g, world)?;
        } else {
            poster_world(ctx, &mut *g, world);
        }
    }
    Ok(())
}

fn poster_world(ctx: &RenderContext<'_>, s: &mut dyn Surface, world: &World) {
    let style = ctx.style;
    let e = &style.worlds;
    let details = style.world_details;

    let key = world.is_capital() || world.is_hi_pop();
    if details.contains(WorldDetails::ALL_NAMES) || details.contains(WorldDetails::KEY_NAMES) && key {
        let name = if world.is_hi_pop() { world.name.to_uppercase() } else { world.name.clone() };
        let color = if key { e.text_highlight_color } else { e.text_color };
        draw_label(s, &name, &e.font, e.position, color, e.text_background_style, &ctx.labels);
    }

    if details.contains(WorldDetails::UWP) && style.uwp.visible {
        let u = &style.uwp;
        draw_label(s, &world.uwp, &u.font, u.position, u.text_color, TextBackgroundStyle::None, &ctx.labels);
    } else if details.contains(WorldDetails::STARPORT) {
        let port = world.starport().to_string();
        s.draw_text(&port, &e.small_font, STARPORT_POSITION, TextAnchor::Center, e.text_color);
    }

    if details.contains(WorldDetails::TYPE) {
        if style.show_stellar_overlay && !world.stellar.is_empty() {
            stellar::draw_stars(s, &stellar::parse_stellar(&world.stellar), style.one_pixel());
        } else if world.is_placeholder() {
            let p = &style.placeholder;
            s.draw_text(PLACEHOLDER_GLYPH, &p.font, p.position, TextAnchor::Center, p.text_color);
        } else if world.is_asteroid_belt() && details.contains(WorldDetails::ASTEROIDS) {
            let (x, y) = world.coordinates();
            for (center, r) in geometry::asteroid_belt(x, y) {
                s.fill_ellipse(Rect::from_center(center, r * 2.0, r * 2.0), e.fill_color);
            }
        } else {
            let (fill, pen) = disc_colors(ctx, world);
            let rect = Rect::from_center(Vec2::zero(), DISC_RADIUS * 2.0, DISC_RADIUS * 2.0);
            s.fill_ellipse(rect, fill);
            if let Some(pen) = pen {
                s.stroke_ellipse(rect, &pen);
            }
        }
    }

    if details.contains(WorldDetails::GAS_GIANT) && world.gas_giants() > 0 {
        let d = GAS_GIANT_RADIUS * 2.0;
        s.fill_ellipse(Rect::from_center(GAS_GIANT_POSITION, d, d), e.fill_color);
    }

    if details.contains(WorldDetails::BASES) && !world.bases.is_empty() {
        s.draw_text(&world.bases, &e.small_font, BASES_POSITION, TextAnchor::Center, e.text_color);
    }

    if details.contains(WorldDetails::ALLEGIANCE) && !world.allegiance.is_empty() {
        let text = if style.lower_case_allegiance {
            world.allegiance.to_lowercase()
        } else {
            world.allegiance.clone()
        };
        s.draw_text(&text, &e.small_font, ALLEGIANCE_POSITION, TextAnchor::Center, e.text_color);
    }
}

/// Disc fill and optional outline. Trade classifications color the disc when
/// `WORLD_COLORS` is on.
fn disc_colors(ctx: &RenderContext<'_>, world: &World) -> (Color, Option<Pen>) {
    let style = ctx.style;
    let water = if world.hydrographics() > 0 {
        style.world_water.fill_color
    } else {
        style.world_no_water.fill_color
    };
    if !ctx.options().contains(MapOptions::WORLD_COLORS) {
        return (water, None);
    }
    let fill = if world.is_agricultural() && world.is_rich() {
        AG_RI_COLOR
    } else if world.is_agricultural() {
        AG_COLOR
    } else if world.is_rich() {
        RI_COLOR
    } else if world.is_industrial() {
        IN_COLOR
    } else if world.atmosphere() > 10 {
        HOSTILE_ATMOSPHERE_COLOR
    } else if world.is_vacuum() {
        return (Color::BLACK, Some(Pen::new(Color::WHITE, style.one_pixel())));
    } else {
        water
    };
    (fill, None)
}

/// Image radius of a world in the eye-candy style.
pub(super) fn candy_radius(size: i32) -> f32 {
    let d = if size <= 0 { 0.6 } else { 0.3 * (size as f32 / 5.0 + 0.2) };
    d / 2.0
}

/// Hydrographic image name for `world`.
pub(super) fn candy_image(world: &World) -> String {
    if world.is_asteroid_belt() {
        "Belt".to_owned()
    } else {
        format!("Hyd{}", ehex_digit(world.hydrographics().clamp(0, 10)))
    }
}

fn candy_world(ctx: &RenderContext<'_>, s: &mut dyn Surface, world: &World) -> Result<(), RenderError> {
    let style = ctx.style;
    let e = &style.worlds;

    let r = candy_radius(world.size());
    let image = ctx.resources.get(&candy_image(world))?;
    s.draw_image(&image, Rect::from_center(Vec2::zero(), r * 2.0, r * 2.0), 1.0);

    let mut ring = r;
    if let Some(pen) = zone_pen(ctx, world.zone) {
        ring += CANDY_RING_STEP;
        s.stroke_path(&Path::circle(Vec2::zero(), ring), pen);
    }
    if world.gas_giants() > 0 {
        ring += GAS_GIANT_RADIUS;
        let at = Vec2::new(ring * FRAC_1_SQRT_2, -ring * FRAC_1_SQRT_2);
        let d = GAS_GIANT_RADIUS * 2.0;
        s.fill_ellipse(Rect::from_center(at, d, d), e.fill_color);
        ring += GAS_GIANT_RADIUS;
    }

    let name = if world.is_hi_pop() { world.name.to_uppercase() } else { world.name.clone() };
    if !name.is_empty() {
        ring += CANDY_RING_STEP / 2.0;
        let width = s.measure_text(&name, &e.font).x;
        let at = Vec2::new(ring + width / 2.0, 0.0);
        let color = if world.is_capital() { e.text_highlight_color } else { e.text_color };
        draw_label(s, &name, &e.font, at, color, e.text_background_style, &ctx.labels);
    }
    Ok(())
}

/// Population, importance, capital and highlight discs.
pub(super) fn overlays(ctx: &RenderContext<'_>, s: &mut dyn Surface) -> Result<(), RenderError> {
    let style = ctx.style;
    let any = [
        &style.population_overlay,
        &style.importance_overlay,
        &style.capital_overlay,
        &style.highlight_worlds,
    ]
    .iter()
    .any(|e| e.visible);
    if !any {
        return Ok(());
    }

    let _wide = ctx.selector.widen(OVERLAY_SLOP);
    for world in ctx.selector.worlds() {
        let c = world.center();
        let mut g = Saved::new(s);
        g.translate(c.x, c.y);
        g.scale(1.0 / PARSEC_SCALE_X, 1.0 / PARSEC_SCALE_Y);

        if style.population_overlay.visible {
            let pop = world.population();
            if pop > 0.0 {
                let r = ((pop / std::f64::consts::PI).sqrt() * 0.00002) as f32;
                draw_overlay(&mut *g, &style.population_overlay, r);
            }
        }
        if style.importance_overlay.visible {
            let im = world.importance();
            if im > 0 {
                draw_overlay(&mut *g, &style.importance_overlay, (im as f32 - 0.5) * PARSEC_SCALE_X);
            }
        }
        if style.capital_overlay.visible {
            let capital = world.is_capital();
            let important = world.importance() >= 4;
            let e = match (capital, important) {
                (true, true) => Some(&style.capital_overlay),
                (false, true) => Some(&style.capital_overlay_alt_a),
                (true, false) => Some(&style.capital_overlay_alt_b),
                (false, false) => None,
            };
            if let Some(e) = e {
                draw_overlay(&mut *g, e, 2.0 * PARSEC_SCALE_X);
            }
        }
        if style.highlight_worlds.visible
            && style.highlight_pattern.as_ref().is_some_and(|p| p.matches(world))
        {
            draw_overlay(&mut *g, &style.highlight_worlds, PARSEC_SCALE_X);
        }
    }
    Ok(())
}

fn draw_overlay(s: &mut dyn Surface, e: &StyleElement, r: f32) {
    let rect = Rect::from_center(Vec2::zero(), r * 2.0, r * 2.0);
    s.fill_ellipse(rect, e.fill_color);
    if !e.pen.color.is_empty() {
        s.stroke_ellipse(rect, &e.pen);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use starmap_engine::scene::{DrawCmd, DrawItem, DrawList};

    use crate::astrometry::{Hex, Location};
    use crate::model::Sector;
    use crate::passes::testing::Fixture;
    use crate::pipeline::render_tile;
    use crate::style::{HighlightField, HighlightPattern, Stylesheet};
    use crate::transform::TilePlacement;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    fn capital() -> World {
        let mut w = World::new("Capital", Location::new(0, 1, Hex::new(2, 1)), "A788999-C");
        w.pbg = "300".to_owned();
        w.remarks = "Cp".to_owned();
        w.importance = Some(4);
        w
    }

    fn fixture(world: World, tweak: impl FnOnce(&mut Stylesheet)) -> Fixture {
        let mut f = Fixture::poster(Rect::new(0.0, 0.0, 32.0, 32.0), 32.0, tweak);
        let mut sector = Sector::new(0, 1, "Core");
        sector.worlds.push(world);
        f.index.push(sector);
        f
    }

    fn texts(items: &[DrawItem]) -> Vec<(String, Color)> {
        items
            .iter()
            .filter_map(|i| match &i.cmd {
                DrawCmd::Text { text, color, .. } => Some((text.clone(), *color)),
                _ => None,
            })
            .collect()
    }

    fn ellipse_widths(items: &[DrawItem]) -> Vec<f32> {
        items
            .iter()
            .filter_map(|i| match &i.cmd {
                DrawCmd::Fill { path, .. } => path.control_bounds().map(|b| b.width()),
                _ => None,
            })
            .collect()
    }

    // ── scenario ──────────────────────────────────────────────────────────

    #[test]
    fn population_capital_and_name_at_world_center() {
        let mut style = Stylesheet::new(1.0, MapOptions::WORLDS_MASK);
        style.worlds.visible = true;
        style.world_details = WorldDetails::KEY_NAMES | WorldDetails::TYPE;
        style.population_overlay.visible = true;
        style.capital_overlay.visible = true;
        let tile = Rect::new(0.0, 0.0, 32.0, 32.0);
        let request = crate::context::RenderRequest::new(tile, 1.0, MapOptions::WORLDS_MASK, Arc::new(style), (32, 32));

        let mut index = crate::collab::MemoryIndex::default();
        let mut sector = Sector::new(0, 1, "Core");
        sector.worlds.push(capital());
        index.push(sector);
        let assets = crate::collab::MemoryAssets::new();
        let resources = crate::resources::ResourceCache::new(std::env::temp_dir().join("starmap-worlds-none"));

        let mut list = DrawList::new();
        render_tile(&request, &index, &assets, &resources, &mut list).unwrap();
        assert_eq!(list.depth(), 0);

        let markers = list.markers();
        let fg = markers.iter().position(|m| *m == "WorldsForeground").unwrap();
        let ov = markers.iter().position(|m| *m == "WorldsOverlays").unwrap();
        assert!(fg < ov);

        let center = TilePlacement::new(tile, 1.0).unwrap().to_image(capital().center());
        let overlays = list.section("WorldsOverlays");
        let fills: Vec<&DrawItem> = overlays.iter().filter(|i| matches!(i.cmd, DrawCmd::Fill { .. })).collect();
        assert_eq!(fills.len(), 2);
        let pop_r = ((3e9f64 / std::f64::consts::PI).sqrt() * 0.00002) as f32;
        let widths = ellipse_widths(overlays);
        assert!(close(widths[0], pop_r * 2.0));
        assert!(close(widths[1], 4.0 * PARSEC_SCALE_X));
        for item in fills {
            let DrawCmd::Fill { path, color } = &item.cmd else { unreachable!() };
            let c = item.transform.apply(path.control_bounds().unwrap().center());
            assert!(close(c.x, center.x) && close(c.y, center.y));
            assert!(!color.is_empty());
        }

        let style = &request.style;
        let name = texts(list.section("WorldsForeground"))
            .into_iter()
            .filter(|(t, _)| t == "CAPITAL")
            .last()
            .unwrap();
        assert_eq!(name.1, style.worlds.text_highlight_color);
    }

    // ── background ────────────────────────────────────────────────────────

    #[test]
    fn amber_zone_circle_and_hex_number() {
        let mut w = capital();
        w.zone = Zone::Amber;
        let f = fixture(w, |_| {});
        let list = f.draw(background);
        let pen = list
            .paint_items()
            .find_map(|i| match &i.cmd {
                DrawCmd::Stroke { pen, .. } => Some(pen.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(pen.color, f.request.style.amber_zone.pen.color);
        assert_eq!(texts(list.items()).into_iter().map(|t| t.0).collect::<Vec<_>>(), vec!["0201"]);
    }

    #[test]
    fn green_zone_draws_no_ring() {
        let f = fixture(capital(), |s| s.hex_number.visible = false);
        assert_eq!(f.draw(background).paint_items().count(), 0);
    }

    #[test]
    fn perimeter_zone_is_a_hex() {
        let mut w = capital();
        w.zone = Zone::Red;
        let f = fixture(w, |s| {
            s.show_zones_as_perimeters = true;
            s.hex_number.visible = false;
        });
        let list = f.draw(background);
        let DrawCmd::Stroke { path, .. } = &list.paint_items().next().unwrap().cmd else {
            panic!("expected stroke")
        };
        // Six corners plus close.
        assert_eq!(path.elements().len(), 7);
    }

    #[test]
    fn candy_background_numbers_only() {
        let mut w = capital();
        w.zone = Zone::Red;
        let f = fixture(w, |s| s.use_world_images = true);
        let list = f.draw(background);
        assert_eq!(list.paint_items().count(), 1);
        assert_eq!(texts(list.items()).len(), 1);
    }

    // ── foreground ────────────────────────────────────────────────────────

    #[test]
    fn key_names_only_for_capitals_and_hipop() {
        let mut plain = World::new("Quiet", Location::new(0, 1, Hex::new(4, 4)), "C544300-7");
        plain.pbg = "100".to_owned();
        let f = fixture(plain, |s| s.world_details = WorldDetails::KEY_NAMES);
        assert!(texts(f.draw(foreground).items()).is_empty());

        let f = fixture(capital(), |s| {
            s.world_details = WorldDetails::KEY_NAMES;
            s.worlds.text_background_style = TextBackgroundStyle::None;
        });
        let hl = f.request.style.worlds.text_highlight_color;
        assert_eq!(texts(f.draw(foreground).items()), vec![("CAPITAL".to_owned(), hl)]);
    }

    #[test]
    fn uwp_replaces_starport() {
        let f = fixture(capital(), |s| {
            s.world_details = WorldDetails::UWP | WorldDetails::STARPORT;
            s.uwp.visible = true;
        });
        assert_eq!(texts(f.draw(foreground).items())[0].0, "A788999-C");

        let f = fixture(capital(), |s| {
            s.world_details = WorldDetails::STARPORT;
        });
        assert_eq!(texts(f.draw(foreground).items())[0].0, "A");
    }

    #[test]
    fn disc_uses_hydrographics() {
        let f = fixture(capital(), |s| s.world_details = WorldDetails::TYPE);
        let list = f.draw(foreground);
        let DrawCmd::Fill { color, .. } = &list.paint_items().next().unwrap().cmd else {
            panic!("expected fill")
        };
        assert_eq!(*color, f.request.style.world_water.fill_color);
    }

    #[test]
    fn world_colors_by_trade_code() {
        let mut w = capital();
        w.remarks = "Ag Ri".to_owned();
        let mut f = fixture(w, |s| s.world_details = WorldDetails::TYPE);
        f.request.options = MapOptions::DEFAULT | MapOptions::WORLD_COLORS;
        let list = f.draw(foreground);
        let DrawCmd::Fill { color, .. } = &list.paint_items().next().unwrap().cmd else {
            panic!("expected fill")
        };
        assert_eq!(*color, AG_RI_COLOR);
    }

    #[test]
    fn vacuum_world_is_outlined() {
        let w = World::new("Rock", Location::new(0, 1, Hex::new(4, 4)), "E400000-0");
        let mut f = fixture(w, |s| s.world_details = WorldDetails::TYPE);
        f.request.options = MapOptions::DEFAULT | MapOptions::WORLD_COLORS;
        let list = f.draw(foreground);
        let kinds: Vec<bool> = list.paint_items().map(|i| matches!(i.cmd, DrawCmd::Stroke { .. })).collect();
        assert_eq!(kinds, vec![false, true]);
    }

    #[test]
    fn belt_is_deterministic_pebbles() {
        let w = World::new("Belt", Location::new(0, 1, Hex::new(4, 4)), "B000000-9");
        let (x, y) = w.coordinates();
        let f = fixture(w, |s| s.world_details = WorldDetails::TYPE | WorldDetails::ASTEROIDS);
        let list = f.draw(foreground);
        assert_eq!(list.paint_items().count(), geometry::asteroid_belt(x, y).len());
    }

    #[test]
    fn gas_giant_bases_and_allegiance() {
        let mut w = capital();
        w.pbg = "301".to_owned();
        w.bases = "NS".to_owned();
        w.allegiance = "ImDd".to_owned();
        let f = fixture(w, |s| {
            s.world_details = WorldDetails::GAS_GIANT | WorldDetails::BASES | WorldDetails::ALLEGIANCE;
            s.lower_case_allegiance = true;
        });
        let list = f.draw(foreground);
        let t: Vec<String> = texts(list.items()).into_iter().map(|t| t.0).collect();
        assert_eq!(t, vec!["NS", "imdd"]);
        let gg = ellipse_widths(list.items());
        assert_eq!(gg.len(), 1);
        assert!(close(gg[0], GAS_GIANT_RADIUS * 2.0));
    }

    #[test]
    fn stellar_overlay_replaces_disc() {
        let mut w = capital();
        w.stellar = "G2 V M1 V".to_owned();
        let f = fixture(w, |s| {
            s.world_details = WorldDetails::TYPE;
            s.show_stellar_overlay = true;
        });
        let list = f.draw(foreground);
        // Fill and outline per star.
        assert_eq!(list.paint_items().count(), 4);
    }

    // ── eye candy ─────────────────────────────────────────────────────────

    #[test]
    fn candy_image_names_and_radii() {
        let w = World::new("A", Location::default(), "A867A00-0");
        assert_eq!(candy_image(&w), "Hyd7");
        let w = World::new("B", Location::default(), "A86A000-0");
        assert_eq!(candy_image(&w), "HydA");
        let w = World::new("C", Location::default(), "A000000-0");
        assert_eq!(candy_image(&w), "Belt");
        assert!(close(candy_radius(0), 0.3));
        assert!(close(candy_radius(5), 0.18));
    }

    #[test]
    fn candy_decorations_accumulate() {
        let dir = std::env::temp_dir().join(format!("starmap-candy-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        image::save_buffer(dir.join("Hyd8.png"), &[0u8; 4 * 4 * 4], 4, 4, image::ColorType::Rgba8).unwrap();

        let mut w = capital();
        w.zone = Zone::Red;
        w.pbg = "301".to_owned();
        let mut f = fixture(w, |s| {
            s.use_world_images = true;
            s.worlds.text_background_style = TextBackgroundStyle::None;
        });
        f.resources = crate::resources::ResourceCache::new(&dir);
        let list = f.draw(foreground);
        let kinds: Vec<&str> = list
            .paint_items()
            .map(|i| match i.cmd {
                DrawCmd::Image { .. } => "image",
                DrawCmd::Stroke { .. } => "zone",
                DrawCmd::Fill { .. } => "giant",
                DrawCmd::Text { .. } => "name",
                _ => "other",
            })
            .collect();
        assert_eq!(kinds, vec!["image", "zone", "giant", "name"]);

        let DrawCmd::Text { origin, .. } = &list.paint_items().last().unwrap().cmd else { unreachable!() };
        let r = candy_radius(7);
        let ring = r + CANDY_RING_STEP + GAS_GIANT_RADIUS * 2.0 + CANDY_RING_STEP / 2.0;
        assert!(close(origin.x, ring));
    }

    #[test]
    fn missing_candy_image_is_contained() {
        let f = fixture(capital(), |s| s.use_world_images = true);
        let ctx = crate::context::RenderContext::new(&f.request, &f.index, &f.assets, &f.resources).unwrap();
        let mut list = DrawList::new();
        let err = foreground(&ctx, &mut list).unwrap_err();
        assert!(!err.is_fatal());
        assert_eq!(list.depth(), 0);
    }

    // ── overlays ──────────────────────────────────────────────────────────

    #[test]
    fn overlay_slop_is_restored() {
        let f = fixture(capital(), |s| s.importance_overlay.visible = true);
        let ctx = crate::context::RenderContext::new(&f.request, &f.index, &f.assets, &f.resources).unwrap();
        let mut list = DrawList::new();
        overlays(&ctx, &mut list).unwrap();
        assert_eq!(ctx.selector.slop(), crate::collab::DEFAULT_SLOP);
        assert!(close(ellipse_widths(list.items())[0], 2.0 * 3.5 * PARSEC_SCALE_X));
    }

    #[test]
    fn capital_overlay_variants() {
        let pick = |remarks: &str, importance: i32| {
            let mut w = capital();
            w.remarks = remarks.to_owned();
            w.importance = Some(importance);
            let f = fixture(w, |s| s.capital_overlay.visible = true);
            let style = f.request.style.clone();
            let list = f.draw(overlays);
            let colors: Vec<Color> = list
                .paint_items()
                .filter_map(|i| match &i.cmd {
                    DrawCmd::Fill { color, .. } => Some(*color),
                    _ => None,
                })
                .collect();
            (colors, style)
        };
        let (c, s) = pick("Cp", 4);
        assert_eq!(c, vec![s.capital_overlay.fill_color]);
        let (c, s) = pick("", 5);
        assert_eq!(c, vec![s.capital_overlay_alt_a.fill_color]);
        let (c, s) = pick("Cx", 1);
        assert_eq!(c, vec![s.capital_overlay_alt_b.fill_color]);
        let (c, _) = pick("", 1);
        assert!(c.is_empty());
    }

    #[test]
    fn highlight_follows_pattern() {
        let f = fixture(capital(), |s| {
            s.highlight_worlds.visible = true;
            s.highlight_pattern = Some(HighlightPattern::one_of(HighlightField::Starport, &["A"]));
        });
        assert_eq!(f.draw(overlays).paint_items().count(), 1);

        let f = fixture(capital(), |s| {
            s.highlight_worlds.visible = true;
            s.highlight_pattern = Some(HighlightPattern::one_of(HighlightField::Starport, &["X"]));
        });
        assert_eq!(f.draw(overlays).paint_items().count(), 0);
    }

    #[test]
    fn overlays_hidden_by_default() {
        let f = fixture(capital(), |_| {});
        assert!(f.draw(overlays).items().is_empty());
    }
}
