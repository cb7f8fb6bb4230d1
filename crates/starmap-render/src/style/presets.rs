//! Built-in stylesheets.
//!
//! Visibility thresholds are in pixels per parsec. Pen widths and font sizes
//! are in world units unless noted; widths given in pixels are divided by the
//! scale so they stay constant on screen.

use starmap_engine::coords::Vec2;
use starmap_engine::paint::{Color, Pen};
use starmap_engine::text::FontSpec;

use super::{
    DEFAULT_FONT, HexCoordinateStyle, HexStyle, LabelStyle, LayerId, LayerOrder, MicroBorderStyle,
    StyleElement, Stylesheet, TextBackgroundStyle,
};
use crate::options::{MapOptions, WorldDetails};
use crate::transform::PARSEC_SCALE_X;

pub const PSEUDO_RANDOM_STARS_MIN_SCALE: f32 = 1.0 / 16.0;
pub const PSEUDO_RANDOM_STARS_MAX_SCALE: f32 = 4.0;
pub const MACRO_MIN_SCALE: f32 = 1.0 / 32.0;
pub const MICRO_BORDER_MIN_SCALE: f32 = 1.0;
pub const WORLD_LABEL_MIN_SCALE: f32 = 1.0 / 4.0;
pub const WORLD_LABEL_MAX_SCALE: f32 = 4.0;
pub const MEGA_LABEL_MAX_SCALE: f32 = 1.0 / 4.0;
pub const SECTOR_GRID_MIN_SCALE: f32 = 1.0 / 2.0;
pub const SUBSECTOR_GRID_MIN_SCALE: f32 = 2.0;
pub const PARSEC_GRID_MIN_SCALE: f32 = 16.0;
pub const HEX_NUMBER_MIN_SCALE: f32 = 32.0;
pub const SECTOR_NAME_MIN_SCALE: f32 = 1.0 / 4.0;
pub const SUBSECTOR_NAME_MIN_SCALE: f32 = 24.0;
pub const SUBSECTOR_NAME_MAX_SCALE: f32 = 96.0;
pub const ROUTE_MIN_SCALE: f32 = 4.0;
pub const WORLD_MIN_SCALE: f32 = 4.0;
pub const WORLD_NAME_MIN_SCALE: f32 = 8.0;
pub const WORLD_FULL_DETAIL_MIN_SCALE: f32 = 24.0;
pub const WORLD_UWP_MIN_SCALE: f32 = 64.0;

const RED: Color = Color::rgb(0xe3, 0x27, 0x36);
const AMBER: Color = Color::rgb(0xff, 0xcc, 0x00);
const GREEN: Color = Color::rgb(0x48, 0xc1, 0x4a);
const GRAY: Color = Color::rgb(0x80, 0x80, 0x80);
const WATER: Color = Color::rgb(0x00, 0xbf, 0xff);

fn font(size: f32) -> FontSpec {
    FontSpec::new(DEFAULT_FONT, size)
}

fn pen(color: Color, width: f32) -> Pen {
    Pen::new(color, width)
}

fn element(visible: bool) -> StyleElement {
    StyleElement { visible, ..StyleElement::default() }
}

fn overlay(fill: Color, stroke: Color, width: f32) -> StyleElement {
    StyleElement {
        fill_color: fill,
        pen: pen(stroke, width),
        ..StyleElement::default()
    }
}

/// Dark background, white text, red borders. The default.
pub fn poster(scale: f32, options: MapOptions) -> Stylesheet {
    let px = 1.0 / scale;
    let fg = Color::WHITE;
    let bg = Color::BLACK;
    let names = options.intersects(MapOptions::NAMES_MASK);
    let world_details = if scale < WORLD_NAME_MIN_SCALE {
        WorldDetails::DOTMAP
    } else if scale < WORLD_FULL_DETAIL_MIN_SCALE {
        WorldDetails::TYPE | WorldDetails::KEY_NAMES | WorldDetails::ZONE | WorldDetails::ASTEROIDS
    } else if scale < WORLD_UWP_MIN_SCALE {
        WorldDetails::POSTER
    } else {
        WorldDetails::POSTER | WorldDetails::UWP
    };
    let deep_background_opacity = if scale < 1.0 { 0.5 } else { 0.0 };
    let rift_opacity = if (MACRO_MIN_SCALE..=2.0).contains(&scale) { 0.55 } else { 0.0 };
    let macro_visible = (MACRO_MIN_SCALE..MICRO_BORDER_MIN_SCALE).contains(&scale);

    Stylesheet {
        scale,
        options,
        background_color: bg,
        grayscale: false,
        light_background: false,
        deep_background_opacity,
        rift_opacity,
        hex_content_scale: 1.0,
        hex_rotation: 0.0,
        hex_style: HexStyle::Hex,
        hex_coordinate_style: HexCoordinateStyle::Sector,
        number_all_hexes: false,
        micro_border_style: if options.contains(MapOptions::FORCE_HEXES) || scale >= 16.0 {
            MicroBorderStyle::Hex
        } else {
            MicroBorderStyle::Curve
        },
        fill_micro_borders: options.contains(MapOptions::FILLED_BORDERS),
        shade_micro_borders: false,
        world_details,
        show_zones_as_perimeters: false,
        show_stellar_overlay: false,
        use_world_images: false,
        lower_case_allegiance: false,
        dim_unofficial_sectors: false,
        route_end_adjust: 0.25,
        override_line_style: None,
        highlight_pattern: None,
        layer_order: LayerOrder::default(),

        background: StyleElement { fill_color: bg, ..element(true) },
        nebula: element(false),
        galaxy: element(deep_background_opacity > 0.0),
        pseudo_random_stars: StyleElement {
            fill_color: fg,
            ..element((PSEUDO_RANDOM_STARS_MIN_SCALE..=PSEUDO_RANDOM_STARS_MAX_SCALE).contains(&scale))
        },
        rifts: element(rift_opacity > 0.0),

        macro_borders: StyleElement {
            pen: pen(RED.with_alpha(128), 8.0 * px),
            ..element(macro_visible && options.intersects(MapOptions::BORDERS_MASK))
        },
        macro_routes: StyleElement {
            pen: pen(GRAY, 4.0 * px).with_dash(Some(vec![3.0, 1.0])),
            ..element(macro_visible && options.intersects(MapOptions::BORDERS_MASK))
        },
        macro_names: StyleElement {
            text_color: RED.with_alpha(160),
            text_highlight_color: fg,
            font: font(14.0 * px),
            medium_font: font(12.0 * px),
            small_font: font(10.0 * px),
            ..element(names && (MACRO_MIN_SCALE..2.0).contains(&scale))
        },
        capitals: StyleElement {
            fill_color: fg,
            text_color: fg,
            text_highlight_color: RED,
            font: font(10.0 * px),
            position: Vec2::new(0.0, 6.0 * px),
            ..element(
                options.intersects(MapOptions::WORLDS_MASK)
                    && (WORLD_LABEL_MIN_SCALE..WORLD_LABEL_MAX_SCALE).contains(&scale),
            )
        },
        mega_names: StyleElement {
            text_color: fg,
            large_font: font(24.0 * px),
            font: font(18.0 * px),
            small_font: font(14.0 * px),
            text_style: LabelStyle { uppercase: true, ..LabelStyle::default() },
            ..element(names && scale < MEGA_LABEL_MAX_SCALE)
        },

        sector_grid: StyleElement {
            pen: pen(GRAY, 2.0 * px),
            ..element(options.contains(MapOptions::SECTOR_GRID) && scale >= SECTOR_GRID_MIN_SCALE)
        },
        subsector_grid: StyleElement {
            pen: pen(GRAY, px),
            ..element(options.contains(MapOptions::SUBSECTOR_GRID) && scale >= SUBSECTOR_GRID_MIN_SCALE)
        },
        parsec_grid: StyleElement {
            pen: pen(GRAY, px),
            ..element(scale >= PARSEC_GRID_MIN_SCALE)
        },

        subsector_names: StyleElement {
            text_color: GRAY,
            font: font(2.5),
            text_style: LabelStyle { uppercase: true, ..LabelStyle::default() },
            ..element(names && (SUBSECTOR_NAME_MIN_SCALE..SUBSECTOR_NAME_MAX_SCALE).contains(&scale))
        },
        sector_names: StyleElement {
            text_color: fg.with_alpha(160),
            font: font((40.0 * px).clamp(5.5, 12.0)),
            text_style: LabelStyle { uppercase: true, wrap: true, ..LabelStyle::default() },
            ..element(
                names && options.intersects(MapOptions::SECTORS_MASK) && scale >= SECTOR_NAME_MIN_SCALE,
            )
        },

        micro_borders: StyleElement {
            fill_color: RED,
            text_color: RED,
            pen: pen(RED, (3.0 * px).max(0.16)),
            font: font(0.6),
            small_font: font(0.4),
            large_font: font(0.9),
            text_background_style: TextBackgroundStyle::None,
            ..element(
                scale >= MICRO_BORDER_MIN_SCALE && options.intersects(MapOptions::BORDERS_MASK),
            )
        },
        micro_routes: StyleElement {
            pen: pen(GREEN, (2.0 * px).max(0.1)),
            ..element(scale >= ROUTE_MIN_SCALE)
        },

        worlds: StyleElement {
            fill_color: fg,
            text_color: fg,
            text_highlight_color: RED,
            font: font(0.3),
            small_font: font(0.2),
            medium_font: font(0.25),
            position: Vec2::new(0.0, 0.3),
            text_background_style: TextBackgroundStyle::Outline,
            ..element(scale >= WORLD_MIN_SCALE)
        },
        hex_number: StyleElement {
            text_color: GRAY,
            font: font(0.15),
            position: Vec2::new(0.0, -0.5),
            ..element(scale >= HEX_NUMBER_MIN_SCALE)
        },
        uwp: StyleElement {
            text_color: fg,
            fill_color: bg,
            font: font(0.15),
            position: Vec2::new(0.0, 0.45),
            ..element(scale >= WORLD_UWP_MIN_SCALE)
        },
        placeholder: StyleElement {
            text_color: fg,
            font: font(0.3),
            ..element(true)
        },
        world_water: StyleElement {
            fill_color: WATER,
            ..element(true)
        },
        world_no_water: StyleElement {
            fill_color: fg,
            ..element(true)
        },
        amber_zone: StyleElement {
            pen: pen(AMBER, 0.05),
            ..element(true)
        },
        red_zone: StyleElement {
            pen: pen(RED, 0.05),
            ..element(true)
        },

        population_overlay: overlay(Color::rgba(0x00, 0xbf, 0xff, 128), Color::TRANSPARENT, 0.0),
        importance_overlay: overlay(Color::rgba(0x80, 0x80, 0x80, 128), Color::TRANSPARENT, 0.0),
        capital_overlay: overlay(Color::rgba(0x30, 0xb0, 0x30, 0x80), Color::TRANSPARENT, 0.0),
        capital_overlay_alt_a: overlay(Color::rgba(0x00, 0x00, 0xc0, 0x80), Color::TRANSPARENT, 0.0),
        capital_overlay_alt_b: overlay(Color::rgba(0x80, 0x00, 0x00, 0x80), Color::TRANSPARENT, 0.0),
        highlight_worlds: overlay(Color::rgba(0x88, 0x00, 0xff, 0x80), Color::TRANSPARENT, 0.0),

        droyne_worlds: StyleElement {
            text_color: RED,
            font: font(0.3),
            position: Vec2::new(0.0, -0.25),
            ..element(false)
        },
        minor_homeworlds: StyleElement {
            pen: pen(AMBER, 0.04),
            position: Vec2::new(0.3, -0.2),
            ..element(false)
        },
        ancients_worlds: StyleElement {
            fill_color: Color::rgb(0xcc, 0x66, 0xff),
            position: Vec2::new(-0.3, -0.2),
            ..element(false)
        },
        review_status: element(false),
    }
}

/// Eye-candy preset: nebula backdrop, hydrographic world images, curved borders.
pub fn candy(scale: f32, options: MapOptions) -> Stylesheet {
    let mut s = poster(scale, options);
    s.use_world_images = true;
    s.nebula.visible = true;
    s.pseudo_random_stars.visible = true;
    s.micro_border_style = MicroBorderStyle::Curve;
    s.shade_micro_borders = true;
    s.hex_style = HexStyle::None;
    s.hex_content_scale = 1.0 / PARSEC_SCALE_X * 0.95;
    s.worlds.text_background_style = TextBackgroundStyle::Shadow;
    s.worlds.text_color = Color::rgb(0xdd, 0xdd, 0xdd);
    s.micro_borders.text_background_style = TextBackgroundStyle::Shadow;
    s.sector_names.text_background_style = TextBackgroundStyle::Shadow;
    // Names float above the world images.
    s.layer_order
        .set(LayerId::NamesSubsector, 40)
        .set(LayerId::NamesSector, 41)
        .set(LayerId::MicroBorderExplicitLabels, 42);
    s
}

/// Light background for printing. Dark ink, no textures.
pub fn print(scale: f32, options: MapOptions) -> Stylesheet {
    let mut s = poster(scale, options);
    let fg = Color::BLACK;
    let bg = Color::WHITE;
    s.light_background = true;
    s.background_color = bg;
    s.background.fill_color = bg;
    s.deep_background_opacity = 0.0;
    s.galaxy.visible = false;
    s.rift_opacity = 0.0;
    s.rifts.visible = false;
    s.pseudo_random_stars.visible = false;
    s.fill_micro_borders = true;
    s.hex_style = if options.contains(MapOptions::FORCE_HEXES) { HexStyle::Hex } else { HexStyle::Square };
    s.micro_border_style = if s.hex_style == HexStyle::Square {
        MicroBorderStyle::Square
    } else {
        MicroBorderStyle::Hex
    };
    s.number_all_hexes = true;
    s.hex_coordinate_style = HexCoordinateStyle::Subsector;

    for e in [
        &mut s.worlds,
        &mut s.uwp,
        &mut s.placeholder,
        &mut s.capitals,
        &mut s.mega_names,
        &mut s.macro_names,
    ] {
        e.text_color = fg;
    }
    s.worlds.fill_color = fg;
    s.world_no_water.fill_color = fg;
    s.worlds.text_background_style = TextBackgroundStyle::Rectangle;
    s.uwp.fill_color = bg;
    s.sector_names.text_color = Color::rgb(0x40, 0x40, 0x40);
    s.pseudo_random_stars.fill_color = fg;
    s.micro_routes.pen.color = Color::rgb(0x40, 0x80, 0x40);
    // Grids go over the border fills so they stay legible.
    s.layer_order
        .set(LayerId::GridSector, 13)
        .set(LayerId::GridSubsector, 13)
        .set(LayerId::GridParsec, 13);
    s
}
