//! Read-only map data handed to the renderer by the spatial index.

use std::sync::Arc;

use starmap_engine::coords::Vec2;
use starmap_engine::paint::Color;

use crate::astrometry::{self, Hex, Location};
use crate::style::{LineStyle, SectorStylesheet};

/// Travel zone.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Zone {
    #[default]
    Green,
    Amber,
    Red,
}

impl Zone {
    /// Parses the one-letter zone code; anything else is green.
    pub fn from_code(code: &str) -> Zone {
        match code.trim() {
            "A" | "U" => Zone::Amber,
            "R" | "F" => Zone::Red,
            _ => Zone::Green,
        }
    }
}

/// Value of an extended-hex digit (`0-9`, `A-Z` without `I` and `O`).
pub fn ehex_value(c: char) -> Option<i32> {
    match c {
        '0'..='9' => Some(c as i32 - '0' as i32),
        'A'..='H' => Some(c as i32 - 'A' as i32 + 10),
        'J'..='N' => Some(c as i32 - 'J' as i32 + 18),
        'P'..='Z' => Some(c as i32 - 'P' as i32 + 23),
        _ => None,
    }
}

/// Extended-hex digit for `v`, or `'?'` out of range.
pub fn ehex_digit(v: i32) -> char {
    const DIGITS: &[u8] = b"0123456789ABCDEFGHJKLMNPQRSTUVWXYZ";
    usize::try_from(v)
        .ok()
        .and_then(|i| DIGITS.get(i))
        .map_or('?', |&b| char::from(b))
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct World {
    pub name: String,
    pub location: Location,
    /// Universal world profile, e.g. `A788899-C`.
    pub uwp: String,
    /// Population multiplier, belts, gas giants, e.g. `703`.
    pub pbg: String,
    /// Trade codes and remarks, whitespace separated.
    pub remarks: String,
    pub bases: String,
    pub zone: Zone,
    pub allegiance: String,
    pub stellar: String,
    /// Importance extension when the data provides one.
    pub importance: Option<i32>,
}

impl World {
    pub fn new(name: impl Into<String>, location: Location, uwp: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location,
            uwp: uwp.into(),
            pbg: "000".to_owned(),
            ..Self::default()
        }
    }

    #[inline]
    pub fn coordinates(&self) -> (i32, i32) {
        astrometry::location_to_coordinates(self.location)
    }

    /// Hex center in world units.
    pub fn center(&self) -> Vec2 {
        let (x, y) = self.coordinates();
        astrometry::hex_to_center(x, y)
    }

    #[inline]
    pub fn hex(&self) -> Hex {
        self.location.hex
    }

    fn uwp_digit(&self, index: usize) -> Option<i32> {
        self.uwp.chars().nth(index).and_then(ehex_value)
    }

    pub fn starport(&self) -> char {
        self.uwp.chars().next().unwrap_or('?')
    }

    pub fn size(&self) -> i32 {
        self.uwp_digit(1).unwrap_or(-1)
    }

    pub fn atmosphere(&self) -> i32 {
        self.uwp_digit(2).unwrap_or(-1)
    }

    pub fn hydrographics(&self) -> i32 {
        self.uwp_digit(3).unwrap_or(-1)
    }

    pub fn population_exponent(&self) -> i32 {
        self.uwp_digit(4).unwrap_or(0)
    }

    pub fn tech_level(&self) -> i32 {
        self.uwp_digit(8).unwrap_or(0)
    }

    fn pbg_digit(&self, index: usize) -> i32 {
        self.pbg
            .chars()
            .nth(index)
            .and_then(ehex_value)
            .unwrap_or(0)
    }

    pub fn population_multiplier(&self) -> i32 {
        self.pbg_digit(0)
    }

    pub fn belts(&self) -> i32 {
        self.pbg_digit(1)
    }

    pub fn gas_giants(&self) -> i32 {
        self.pbg_digit(2)
    }

    /// Estimated head count. A multiplier of 0 on a populated world counts as 1.
    pub fn population(&self) -> f64 {
        let exp = self.population_exponent();
        if exp <= 0 {
            return 0.0;
        }
        let mult = self.population_multiplier().max(1);
        mult as f64 * 10f64.powi(exp)
    }

    pub fn has_remark(&self, code: &str) -> bool {
        self.remarks.split_whitespace().any(|r| r == code)
    }

    pub fn has_base(&self, code: char) -> bool {
        self.bases.contains(code)
    }

    pub fn is_capital(&self) -> bool {
        ["Cp", "Cs", "Cx", "Capital"].iter().any(|c| self.has_remark(c))
    }

    pub fn is_hi_pop(&self) -> bool {
        self.population_exponent() >= 9
    }

    pub fn is_agricultural(&self) -> bool {
        self.has_remark("Ag")
    }

    pub fn is_rich(&self) -> bool {
        self.has_remark("Ri")
    }

    pub fn is_industrial(&self) -> bool {
        self.has_remark("In")
    }

    pub fn is_vacuum(&self) -> bool {
        self.atmosphere() == 0 || self.has_remark("Va")
    }

    pub fn is_asteroid_belt(&self) -> bool {
        self.size() == 0
    }

    /// Unsurveyed world with no profile.
    pub fn is_placeholder(&self) -> bool {
        self.uwp == "XXXXXXX-X" || self.uwp == "???????-?"
    }

    /// Importance extension, computed from the profile when not supplied.
    pub fn importance(&self) -> i32 {
        if let Some(ix) = self.importance {
            return ix;
        }
        let mut ix = 0;
        match self.starport() {
            'A' | 'B' => ix += 1,
            'D' | 'E' | 'X' => ix -= 1,
            _ => {}
        }
        let tl = self.tech_level();
        if tl >= 16 {
            ix += 1;
        }
        if tl >= 10 {
            ix += 1;
        }
        if tl <= 8 {
            ix -= 1;
        }
        let pop = self.population_exponent();
        if pop >= 9 {
            ix += 1;
        }
        if pop <= 6 {
            ix -= 1;
        }
        for code in ["Ag", "Ri", "In"] {
            if self.has_remark(code) {
                ix += 1;
            }
        }
        if self.has_base('N') && self.has_base('S') {
            ix += 1;
        }
        if self.has_base('W') {
            ix += 1;
        }
        ix
    }

    /// Sophont codes in the remarks, e.g. `Droy` from `Droy(W)`.
    pub fn sophonts(&self) -> impl Iterator<Item = &str> {
        self.remarks.split_whitespace().filter_map(|r| {
            let (code, rest) = r.split_once('(')?;
            (rest.ends_with(')') && code.len() == 4).then_some(code)
        })
    }

    /// Minor race homeworld remarks, `(Name)` or `(Name)W`.
    pub fn is_minor_homeworld(&self) -> bool {
        self.remarks
            .split_whitespace()
            .any(|r| r.starts_with('(') && (r.ends_with(')') || r.ends_with(")W")))
    }
}

/// A political or regional boundary inside one sector.
#[derive(Debug, Clone, PartialEq)]
pub struct Border {
    /// Boundary hexes in ring order, sector-relative.
    pub hexes: Vec<Hex>,
    pub color: Option<Color>,
    pub style: Option<LineStyle>,
    pub allegiance: Option<String>,
    pub show_border: bool,
    /// Open borders are lines rather than rings.
    pub closed: bool,
    pub label: Option<String>,
    pub label_position: Option<Hex>,
    pub label_offset: Vec2,
    pub show_label: bool,
    pub wrap_label: bool,
}

impl Border {
    pub fn new(hexes: Vec<Hex>) -> Self {
        Self {
            hexes,
            color: None,
            style: None,
            allegiance: None,
            show_border: true,
            closed: true,
            label: None,
            label_position: None,
            label_offset: Vec2::zero(),
            show_label: true,
            wrap_label: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Route {
    pub start: Hex,
    pub end: Hex,
    /// Sector offsets of the endpoints relative to the owning sector.
    pub start_offset: (i32, i32),
    pub end_offset: (i32, i32),
    pub color: Option<Color>,
    pub style: Option<LineStyle>,
    pub width: Option<f32>,
    pub allegiance: Option<String>,
    pub route_type: Option<String>,
}

impl Route {
    pub fn new(start: Hex, end: Hex) -> Self {
        Self { start, end, ..Self::default() }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum LabelSize {
    Small,
    #[default]
    Normal,
    Large,
}

/// Free text placed in a sector, e.g. a nebula name.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SectorLabel {
    pub hex: Hex,
    pub text: String,
    pub color: Option<Color>,
    pub size: LabelSize,
    pub wrap: bool,
    pub offset: Vec2,
}

/// Review state derived from sector tags.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SectorStatus {
    Official,
    InReview,
    Unreviewed,
    Apocryphal,
}

#[derive(Debug, Clone, Default)]
pub struct Sector {
    pub x: i32,
    pub y: i32,
    /// Primary name first.
    pub names: Vec<String>,
    pub abbreviation: Option<String>,
    /// `(index 0..16, name)` pairs.
    pub subsector_names: Vec<(usize, String)>,
    pub tags: Vec<String>,
    pub selected: bool,
    pub worlds: Vec<World>,
    pub borders: Vec<Border>,
    pub regions: Vec<Border>,
    pub routes: Vec<Route>,
    pub labels: Vec<SectorLabel>,
    pub stylesheet: Option<Arc<SectorStylesheet>>,
}

impl Sector {
    pub fn new(x: i32, y: i32, name: impl Into<String>) -> Self {
        Self { x, y, names: vec![name.into()], ..Self::default() }
    }

    pub fn name(&self) -> &str {
        self.names.first().map_or("", String::as_str)
    }

    /// World coordinates of a hex in this sector.
    pub fn coordinates(&self, hex: Hex) -> (i32, i32) {
        astrometry::location_to_coordinates(Location::new(self.x, self.y, hex))
    }

    pub fn hex_center(&self, hex: Hex) -> Vec2 {
        let (x, y) = self.coordinates(hex);
        astrometry::hex_to_center(x, y)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn status(&self) -> SectorStatus {
        if self.has_tag("Official") {
            SectorStatus::Official
        } else if self.has_tag("InReview") {
            SectorStatus::InReview
        } else if self.has_tag("Apocryphal") {
            SectorStatus::Apocryphal
        } else {
            SectorStatus::Unreviewed
        }
    }
}
