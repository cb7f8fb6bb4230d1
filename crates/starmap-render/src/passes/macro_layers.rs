//! Galaxy-scale vector layers: polity borders, major routes, rifts, capitals
//! and the mega labels.

use starmap_engine::coords::{Rect, Vec2};
use starmap_engine::surface::Surface;
use starmap_engine::text::FontSpec;

use crate::collab::VectorObject;
use crate::context::RenderContext;
use crate::error::RenderError;
use crate::labels::draw_styled_label;
use crate::options::MapOptions;
use crate::style::{LabelStyle, TextBackgroundStyle};
use crate::transform::{PARSEC_SCALE_X, PARSEC_SCALE_Y};

pub(crate) const MACRO_BORDER_FILES: [&str; 10] = [
    "Imperium",
    "Aslan",
    "Kkree",
    "Vargr",
    "Zhodani",
    "Solomani",
    "Hive",
    "SpinwardClient",
    "RimwardClient",
    "TrailingClient",
];

pub(crate) const MACRO_ROUTE_FILES: [&str; 3] = ["J5Route", "J4Route", "CoreRoute"];

pub(crate) const RIFT_FILES: [&str; 5] = ["GreatRift", "LesserRift", "WindhornRift", "DelphiRift", "ZhdantRift"];

/// Capital markers are this many pixels across.
const CAPITAL_DOT_PIXELS: f32 = 3.0;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum MegaSize {
    Normal,
    Large,
}

const MEGA_LABELS: [(&str, f32, f32, MegaSize); 8] = [
    ("Charted Space", 0.0, -70.0, MegaSize::Large),
    ("Third Imperium", -30.0, 0.0, MegaSize::Normal),
    ("Zhodani Consulate", -180.0, -60.0, MegaSize::Normal),
    ("Vargr Extents", -50.0, -130.0, MegaSize::Normal),
    ("Aslan Hierate", -150.0, 130.0, MegaSize::Normal),
    ("Solomani Confederation", 50.0, 100.0, MegaSize::Normal),
    ("Two Thousand Worlds", 180.0, -40.0, MegaSize::Normal),
    ("Hive Federation", 200.0, 130.0, MegaSize::Normal),
];

/// Vectors in `names` whose options share a bit with `mask & options`.
fn vectors<'a>(
    ctx: &RenderContext<'a>,
    names: &'a [&'a str],
    mask: MapOptions,
) -> impl Iterator<Item = &'a VectorObject> + 'a {
    let wanted = ctx.options() & mask;
    let assets = ctx.assets;
    names
        .iter()
        .filter_map(move |name| assets.load_vector(name))
        .filter(move |v| v.map_options.intersects(wanted))
}

pub(super) fn borders(ctx: &RenderContext<'_>, s: &mut dyn Surface) -> Result<(), RenderError> {
    let e = &ctx.style.macro_borders;
    if !e.visible {
        return Ok(());
    }
    for v in vectors(ctx, &MACRO_BORDER_FILES, MapOptions::BORDERS_MASK) {
        s.stroke_path(&v.path(), &e.pen);
    }
    Ok(())
}

pub(super) fn routes(ctx: &RenderContext<'_>, s: &mut dyn Surface) -> Result<(), RenderError> {
    let e = &ctx.style.macro_routes;
    if !e.visible {
        return Ok(());
    }
    for v in vectors(ctx, &MACRO_ROUTE_FILES, MapOptions::BORDERS_MASK) {
        s.stroke_path(&v.path(), &e.pen);
    }
    Ok(())
}

/// Labels of the border, rift and route vectors.
pub(super) fn names(ctx: &RenderContext<'_>, s: &mut dyn Surface) -> Result<(), RenderError> {
    let e = &ctx.style.macro_names;
    if !e.visible {
        return Ok(());
    }
    let groups: [(&[&str], &FontSpec); 3] = [
        (&MACRO_BORDER_FILES, &e.font),
        (&RIFT_FILES, &e.medium_font),
        (&MACRO_ROUTE_FILES, &e.small_font),
    ];
    let style = LabelStyle { wrap: true, ..LabelStyle::default() };
    for (files, font) in groups {
        for v in vectors(ctx, files, MapOptions::NAMES_MASK) {
            let Some(label) = v.label.as_deref() else {
                continue;
            };
            draw_styled_label(
                s,
                label,
                font,
                v.label_position,
                e.text_color,
                &style,
                TextBackgroundStyle::None,
                &ctx.labels,
            );
        }
    }
    Ok(())
}

/// Capital and homeworld markers with their names.
pub(super) fn capitals(ctx: &RenderContext<'_>, s: &mut dyn Surface) -> Result<(), RenderError> {
    let e = &ctx.style.capitals;
    if !e.visible {
        return Ok(());
    }
    let wanted = ctx.options() & MapOptions::WORLDS_MASK;
    let d = CAPITAL_DOT_PIXELS * ctx.style.one_pixel();
    let style = LabelStyle::default();
    for label in ctx.assets.world_labels() {
        if !label.map_options.intersects(wanted) {
            continue;
        }
        s.fill_ellipse(
            Rect::from_center(label.position, d / PARSEC_SCALE_X, d / PARSEC_SCALE_Y),
            e.fill_color,
        );
        let color = if label.map_options.contains(MapOptions::WORLDS_CAPITALS) {
            e.text_color
        } else {
            e.text_highlight_color
        };
        draw_styled_label(
            s,
            &label.name,
            &e.font,
            label.position + label.label_offset + e.position,
            color,
            &style,
            TextBackgroundStyle::None,
            &ctx.labels,
        );
    }
    Ok(())
}

pub(super) fn mega_labels(ctx: &RenderContext<'_>, s: &mut dyn Surface) -> Result<(), RenderError> {
    let e = &ctx.style.mega_names;
    if !e.visible {
        return Ok(());
    }
    for (text, x, y, size) in MEGA_LABELS {
        let font = match size {
            MegaSize::Normal => &e.font,
            MegaSize::Large => &e.large_font,
        };
        draw_styled_label(
            s,
            text,
            font,
            Vec2::new(x, y),
            e.text_color,
            &e.text_style,
            TextBackgroundStyle::None,
            &ctx.labels,
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use starmap_engine::scene::{DrawCmd, DrawList};

    use crate::collab::WorldLabel;
    use crate::passes::testing::Fixture;

    fn vector(name: &str, options: MapOptions, label: Option<&str>) -> VectorObject {
        VectorObject {
            name: name.to_owned(),
            points: vec![Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0)],
            closed: true,
            map_options: options,
            label: label.map(str::to_owned),
            label_position: Vec2::new(5.0, 5.0),
        }
    }

    fn texts(list: &DrawList) -> Vec<String> {
        list.items()
            .iter()
            .filter_map(|i| match &i.cmd {
                DrawCmd::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    fn galaxy() -> Fixture {
        Fixture::poster(Rect::new(-256.0, -256.0, 512.0, 512.0), 0.125, |_| {})
    }

    #[test]
    fn borders_filtered_by_options() {
        let mut f = galaxy();
        f.assets.insert_vector(vector("Imperium", MapOptions::BORDERS_MAJOR, None));
        f.assets.insert_vector(vector("Kkree", MapOptions::BORDERS_MINOR, None));
        f.assets.insert_vector(vector("NotListed", MapOptions::BORDERS_MAJOR, None));
        assert_eq!(f.draw(borders).paint_items().count(), 2);

        f.request.options = MapOptions::BORDERS_MAJOR;
        assert_eq!(f.draw(borders).paint_items().count(), 1);
    }

    #[test]
    fn routes_are_dashed() {
        let mut f = galaxy();
        f.assets.insert_vector(vector("J5Route", MapOptions::BORDERS_MAJOR, None));
        let list = f.draw(routes);
        let DrawCmd::Stroke { pen, .. } = &list.paint_items().next().unwrap().cmd else {
            panic!("expected stroke")
        };
        assert!(pen.dash.is_some());
    }

    #[test]
    fn names_use_group_fonts() {
        let mut f = galaxy();
        f.assets.insert_vector(vector("Imperium", MapOptions::NAMES_MAJOR, Some("Third Imperium")));
        f.assets.insert_vector(vector("GreatRift", MapOptions::NAMES_MINOR, Some("Great Rift")));
        f.assets.insert_vector(vector("Zhodani", MapOptions::NAMES_MAJOR, None));
        let style = f.request.style.clone();
        let list = f.draw(names);
        let runs: Vec<(String, f32)> = list
            .paint_items()
            .filter_map(|i| match &i.cmd {
                DrawCmd::Text { text, font, .. } => Some((text.clone(), font.size)),
                _ => None,
            })
            .collect();
        let e = &style.macro_names;
        assert_eq!(
            runs,
            vec![
                ("Third".to_owned(), e.font.size),
                ("Imperium".to_owned(), e.font.size),
                ("Great".to_owned(), e.medium_font.size),
                ("Rift".to_owned(), e.medium_font.size),
            ]
        );
    }

    #[test]
    fn capitals_and_homeworlds() {
        let mut f = Fixture::poster(Rect::new(-64.0, -64.0, 128.0, 128.0), 1.0, |_| {});
        f.assets.push_label(WorldLabel {
            name: "Capital".to_owned(),
            position: Vec2::new(-110.0, -70.0),
            map_options: MapOptions::WORLDS_CAPITALS,
            label_offset: Vec2::zero(),
        });
        f.assets.push_label(WorldLabel {
            name: "Kusyu".to_owned(),
            position: Vec2::new(-30.0, 40.0),
            map_options: MapOptions::WORLDS_HOMEWORLDS,
            label_offset: Vec2::new(0.0, 1.0),
        });
        let style = f.request.style.clone();
        let list = f.draw(capitals);
        let colors: Vec<_> = list
            .paint_items()
            .filter_map(|i| match &i.cmd {
                DrawCmd::Text { color, .. } => Some(*color),
                _ => None,
            })
            .collect();
        assert_eq!(colors, vec![style.capitals.text_color, style.capitals.text_highlight_color]);
        assert_eq!(list.paint_items().filter(|i| matches!(i.cmd, DrawCmd::Fill { .. })).count(), 2);

        f.request.options = MapOptions::WORLDS_CAPITALS;
        assert_eq!(texts(&f.draw(capitals)), vec!["Capital"]);
    }

    #[test]
    fn mega_labels_only_far_out() {
        let f = galaxy();
        let t = texts(&f.draw(mega_labels));
        assert_eq!(t.len(), MEGA_LABELS.len());
        assert_eq!(t[0], "CHARTED SPACE");

        let near = Fixture::poster(Rect::new(0.0, 0.0, 32.0, 32.0), 8.0, |_| {});
        assert!(near.draw(mega_labels).items().is_empty());
    }
}
