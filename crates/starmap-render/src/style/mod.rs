//! Style configuration.
//!
//! A [`Stylesheet`] is built per (scale, options) pair, either from one of the
//! presets in [`presets`] or by hand, and is read-only while rendering. Each
//! pass reads its own [`StyleElement`] and returns early when it is not
//! visible.

mod highlight;
mod layers;
pub mod presets;
mod sector;

pub use highlight::{HighlightField, HighlightPattern};
pub use layers::{LayerId, LayerOrder};
pub use sector::{SectorStylesheet, StyleRule};

use std::str::FromStr;

use starmap_engine::coords::Vec2;
use starmap_engine::paint::{Color, Pen};
use starmap_engine::text::FontSpec;

use crate::options::{MapOptions, WorldDetails};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    None,
}

impl FromStr for LineStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "solid" => Ok(LineStyle::Solid),
            "dashed" => Ok(LineStyle::Dashed),
            "dotted" => Ok(LineStyle::Dotted),
            "none" => Ok(LineStyle::None),
            other => Err(format!("unknown line style {other:?}")),
        }
    }
}

/// Parsec grid geometry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum HexStyle {
    None,
    Square,
    #[default]
    Hex,
}

/// How micro borders trace their hexes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum MicroBorderStyle {
    #[default]
    Hex,
    Square,
    /// Smoothed through the midpoints of the hex outline.
    Curve,
}

/// Treatment drawn behind label text.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum TextBackgroundStyle {
    #[default]
    None,
    Filled,
    Rectangle,
    Outline,
    Shadow,
}

/// Hex number format.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum HexCoordinateStyle {
    #[default]
    Sector,
    Subsector,
}

/// Placement tweaks for a label.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelStyle {
    /// Degrees, clockwise.
    pub rotation: f32,
    pub scale: Vec2,
    pub translation: Vec2,
    pub uppercase: bool,
    /// Break at spaces, one word per line.
    pub wrap: bool,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            rotation: 0.0,
            scale: Vec2::new(1.0, 1.0),
            translation: Vec2::zero(),
            uppercase: false,
            wrap: false,
        }
    }
}

/// Everything one visual element needs.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleElement {
    pub visible: bool,
    pub fill_color: Color,
    pub text_color: Color,
    pub text_highlight_color: Color,
    pub pen: Pen,
    pub font: FontSpec,
    pub small_font: FontSpec,
    pub medium_font: FontSpec,
    pub large_font: FontSpec,
    pub position: Vec2,
    pub text_style: LabelStyle,
    pub text_background_style: TextBackgroundStyle,
}

impl Default for StyleElement {
    fn default() -> Self {
        let font = FontSpec::new(DEFAULT_FONT, 1.0);
        Self {
            visible: false,
            fill_color: Color::TRANSPARENT,
            text_color: Color::TRANSPARENT,
            text_highlight_color: Color::TRANSPARENT,
            pen: Pen::new(Color::TRANSPARENT, 0.0),
            small_font: font.clone(),
            medium_font: font.clone(),
            large_font: font.clone(),
            font,
            position: Vec2::zero(),
            text_style: LabelStyle::default(),
            text_background_style: TextBackgroundStyle::None,
        }
    }
}

/// Font family every preset asks for; the font system falls back to its first face.
pub const DEFAULT_FONT: &str = "Sans";

#[derive(Debug, Clone)]
pub struct Stylesheet {
    pub scale: f32,
    pub options: MapOptions,

    pub background_color: Color,
    pub grayscale: bool,
    pub light_background: bool,
    pub deep_background_opacity: f32,
    pub rift_opacity: f32,

    /// World glyphs are drawn at this fraction of a hex.
    pub hex_content_scale: f32,
    /// Degrees applied to world glyphs.
    pub hex_rotation: f32,
    pub hex_style: HexStyle,
    pub hex_coordinate_style: HexCoordinateStyle,
    /// Number every hex from the parsec grid rather than only occupied ones.
    pub number_all_hexes: bool,

    pub micro_border_style: MicroBorderStyle,
    pub fill_micro_borders: bool,
    pub shade_micro_borders: bool,

    pub world_details: WorldDetails,
    pub show_zones_as_perimeters: bool,
    pub show_stellar_overlay: bool,
    /// Eye-candy mode: hydrographic images instead of discs.
    pub use_world_images: bool,
    pub lower_case_allegiance: bool,
    pub dim_unofficial_sectors: bool,

    /// World-space distance routes stop short of each endpoint.
    pub route_end_adjust: f32,
    /// Forces every route to one line style.
    pub override_line_style: Option<LineStyle>,
    pub highlight_pattern: Option<HighlightPattern>,

    pub layer_order: LayerOrder,

    pub background: StyleElement,
    pub nebula: StyleElement,
    pub galaxy: StyleElement,
    pub pseudo_random_stars: StyleElement,
    pub rifts: StyleElement,

    pub macro_borders: StyleElement,
    pub macro_routes: StyleElement,
    pub macro_names: StyleElement,
    pub capitals: StyleElement,
    pub mega_names: StyleElement,

    pub sector_grid: StyleElement,
    pub subsector_grid: StyleElement,
    pub parsec_grid: StyleElement,

    pub subsector_names: StyleElement,
    pub sector_names: StyleElement,

    pub micro_borders: StyleElement,
    pub micro_routes: StyleElement,

    pub worlds: StyleElement,
    pub hex_number: StyleElement,
    pub uwp: StyleElement,
    pub placeholder: StyleElement,
    pub world_water: StyleElement,
    pub world_no_water: StyleElement,
    pub amber_zone: StyleElement,
    pub red_zone: StyleElement,

    pub population_overlay: StyleElement,
    pub importance_overlay: StyleElement,
    pub capital_overlay: StyleElement,
    pub capital_overlay_alt_a: StyleElement,
    pub capital_overlay_alt_b: StyleElement,
    pub highlight_worlds: StyleElement,

    pub droyne_worlds: StyleElement,
    pub minor_homeworlds: StyleElement,
    pub ancients_worlds: StyleElement,
    pub review_status: StyleElement,
}

impl Stylesheet {
    /// The poster preset.
    pub fn new(scale: f32, options: MapOptions) -> Self {
        presets::poster(scale, options)
    }

    /// Length of one device pixel in world units.
    #[inline]
    pub fn one_pixel(&self) -> f32 {
        1.0 / self.scale
    }
}
