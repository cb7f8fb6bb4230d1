//! Stellar codes and the star cluster glyph drawn in place of a world disc.

use starmap_engine::coords::{Rect, Vec2};
use starmap_engine::paint::{Color, Pen};
use starmap_engine::surface::Surface;

/// Spectral class. White and brown dwarfs carry no subclass.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SpectralClass {
    O,
    B,
    A,
    F,
    G,
    K,
    M,
    WhiteDwarf,
    BrownDwarf,
}

impl SpectralClass {
    fn from_letter(c: char) -> Option<Self> {
        Some(match c {
            'O' => SpectralClass::O,
            'B' => SpectralClass::B,
            'A' => SpectralClass::A,
            'F' => SpectralClass::F,
            'G' => SpectralClass::G,
            'K' => SpectralClass::K,
            'M' => SpectralClass::M,
            _ => return None,
        })
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Luminosity {
    Ia,
    Ib,
    II,
    III,
    IV,
    V,
    VI,
    D,
}

impl Luminosity {
    fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "Ia" => Luminosity::Ia,
            "Ib" => Luminosity::Ib,
            "II" => Luminosity::II,
            "III" => Luminosity::III,
            "IV" => Luminosity::IV,
            "V" => Luminosity::V,
            "VI" => Luminosity::VI,
            "D" => Luminosity::D,
            _ => return None,
        })
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Star {
    pub class: SpectralClass,
    pub subclass: f32,
    pub luminosity: Luminosity,
}

impl Star {
    /// Relative glyph radius; a G V star is 1.
    pub fn radius(&self) -> f32 {
        let lum = match self.luminosity {
            Luminosity::Ia | Luminosity::Ib => 3.0,
            Luminosity::II => 2.5,
            Luminosity::III => 2.0,
            Luminosity::IV => 1.5,
            Luminosity::V => 1.0,
            Luminosity::VI => 0.8,
            Luminosity::D => 0.4,
        };
        let class = match self.class {
            SpectralClass::O => 1.6,
            SpectralClass::B => 1.4,
            SpectralClass::A => 1.2,
            SpectralClass::F => 1.1,
            SpectralClass::G => 1.0,
            SpectralClass::K => 0.9,
            SpectralClass::M => 0.7,
            SpectralClass::WhiteDwarf | SpectralClass::BrownDwarf => 1.0,
        };
        lum * class
    }

    pub fn color(&self) -> Color {
        match self.class {
            SpectralClass::O => Color::rgb(0x9d, 0xb4, 0xff),
            SpectralClass::B => Color::rgb(0xbb, 0xcc, 0xff),
            SpectralClass::A => Color::rgb(0xfb, 0xf8, 0xff),
            SpectralClass::F => Color::rgb(0xff, 0xff, 0xed),
            SpectralClass::G => Color::rgb(0xff, 0xff, 0x00),
            SpectralClass::K => Color::rgb(0xff, 0x98, 0x33),
            SpectralClass::M => Color::rgb(0xff, 0x00, 0x00),
            SpectralClass::WhiteDwarf => Color::WHITE,
            SpectralClass::BrownDwarf => Color::rgb(0x8b, 0x45, 0x13),
        }
    }

    pub fn border_color(&self) -> Color {
        match self.class {
            SpectralClass::BrownDwarf => Color::rgb(0x40, 0x20, 0x10),
            _ => Color::BLACK,
        }
    }
}

/// Parses a stellar field such as `"G2 V M3 V D"` or `"K0 III BD"`.
///
/// Unrecognized tokens are skipped. A classed star without a luminosity
/// defaults to main sequence.
pub fn parse_stellar(code: &str) -> Vec<Star> {
    let tokens: Vec<&str> = code.split_whitespace().collect();
    let mut stars = Vec::new();
    let mut i = 0;
    while i < tokens.len() {
        let tok = tokens[i];
        i += 1;
        match tok {
            "D" => {
                stars.push(Star { class: SpectralClass::WhiteDwarf, subclass: 0.0, luminosity: Luminosity::D });
                continue;
            }
            "BD" => {
                stars.push(Star { class: SpectralClass::BrownDwarf, subclass: 0.0, luminosity: Luminosity::V });
                continue;
            }
            _ => {}
        }

        let mut chars = tok.chars();
        let Some(class) = chars.next().and_then(SpectralClass::from_letter) else {
            continue;
        };
        let Ok(subclass) = chars.as_str().parse::<f32>() else {
            continue;
        };
        let luminosity = match tokens.get(i).and_then(|t| Luminosity::parse(t)) {
            Some(l) => {
                i += 1;
                l
            }
            None => Luminosity::V,
        };
        stars.push(Star { class, subclass, luminosity });
    }
    stars
}

/// Placement of the i-th largest star, in units of [`STAR_SPACING`].
const OFFSETS: [(f32, f32); 9] = [
    (0.0, 0.0),
    (-1.0, 0.0),
    (1.0, 0.0),
    (0.0, -1.0),
    (0.0, 1.0),
    (-1.0, -1.0),
    (1.0, 1.0),
    (-1.0, 1.0),
    (1.0, -1.0),
];

const STAR_SPACING: f32 = 0.3;
const STAR_RADIUS: f32 = 0.15;

/// Draws `stars` around the origin of the current frame, largest first.
pub fn draw_stars(surface: &mut dyn Surface, stars: &[Star], pen_width: f32) {
    let mut sorted = stars.to_vec();
    sorted.sort_by(|a, b| b.radius().total_cmp(&a.radius()));
    for (star, &(ox, oy)) in sorted.iter().zip(OFFSETS.iter()) {
        let r = STAR_RADIUS * star.radius();
        let center = Vec2::new(ox * STAR_SPACING, oy * STAR_SPACING);
        let rect = Rect::from_center(center, r * 2.0, r * 2.0);
        surface.fill_ellipse(rect, star.color());
        surface.stroke_ellipse(rect, &Pen::new(star.border_color(), pen_width));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use starmap_engine::scene::{DrawCmd, DrawList};

    #[test]
    fn parses_multiple_stars() {
        let stars = parse_stellar("G2 V M3 V D");
        assert_eq!(stars.len(), 3);
        assert_eq!(stars[0].class, SpectralClass::G);
        assert_eq!(stars[0].subclass, 2.0);
        assert_eq!(stars[1].luminosity, Luminosity::V);
        assert_eq!(stars[2].class, SpectralClass::WhiteDwarf);
    }

    #[test]
    fn luminosity_defaults_and_giants() {
        let stars = parse_stellar("K0 III F7 BD");
        assert_eq!(stars[0].luminosity, Luminosity::III);
        assert_eq!(stars[1].luminosity, Luminosity::V);
        assert_eq!(stars[2].class, SpectralClass::BrownDwarf);
        assert!(parse_stellar("?? Z9").is_empty());
    }

    #[test]
    fn largest_star_is_drawn_first_at_center() {
        let mut list = DrawList::new();
        draw_stars(&mut list, &parse_stellar("M3 V G2 III"), 0.02);
        let DrawCmd::Fill { color, path } = &list.items()[0].cmd else { panic!("expected fill") };
        assert_eq!(*color, Color::rgb(0xff, 0xff, 0x00));
        let b = path.control_bounds().unwrap();
        assert!(b.center().x.abs() < 1e-5);
        assert_eq!(list.paint_items().count(), 4);
    }
}
