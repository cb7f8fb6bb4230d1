//! Sector and hex arithmetic.
//!
//! A sector is 32 columns by 40 rows of hexes. Hexes are addressed inside a
//! sector as `XXYY` (1-based); world coordinates number columns and rows
//! continuously across sectors, with sector `(0, 0)` hex `0140` at the origin.
//! Odd columns sit half a row lower than even ones.

use std::fmt;

use starmap_engine::coords::{Rect, Vec2};

pub const SECTOR_WIDTH: i32 = 32;
pub const SECTOR_HEIGHT: i32 = 40;
pub const SUBSECTOR_WIDTH: i32 = 8;
pub const SUBSECTOR_HEIGHT: i32 = 10;

pub const REFERENCE_SECTOR_X: i32 = 0;
pub const REFERENCE_SECTOR_Y: i32 = 0;
pub const REFERENCE_HEX_X: i32 = 1;
pub const REFERENCE_HEX_Y: i32 = 40;

/// Hex within a sector, 1-based.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Hex {
    pub x: i32,
    pub y: i32,
}

impl Hex {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// True for `0101`..`3240`.
    pub fn is_valid(self) -> bool {
        (1..=SECTOR_WIDTH).contains(&self.x) && (1..=SECTOR_HEIGHT).contains(&self.y)
    }

    /// Subsector letter `A`..`P`, row-major.
    pub fn subsector(self) -> char {
        let index = subsector_index(self);
        char::from(b'A' + index as u8)
    }

    /// Position relative to the containing subsector, 1-based.
    pub fn in_subsector(self) -> Hex {
        Hex::new(
            (self.x - 1).rem_euclid(SUBSECTOR_WIDTH) + 1,
            (self.y - 1).rem_euclid(SUBSECTOR_HEIGHT) + 1,
        )
    }

    /// Parses `XXYY`.
    pub fn parse(s: &str) -> Option<Hex> {
        if s.len() != 4 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let x = s[..2].parse().ok()?;
        let y = s[2..].parse().ok()?;
        Some(Hex::new(x, y))
    }
}

impl fmt::Display for Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}{:02}", self.x, self.y)
    }
}

/// Sector plus hex.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Location {
    pub sector_x: i32,
    pub sector_y: i32,
    pub hex: Hex,
}

impl Location {
    #[inline]
    pub const fn new(sector_x: i32, sector_y: i32, hex: Hex) -> Self {
        Self { sector_x, sector_y, hex }
    }
}

/// Continuous world hex coordinates of `loc`.
pub fn location_to_coordinates(loc: Location) -> (i32, i32) {
    (
        (loc.sector_x - REFERENCE_SECTOR_X) * SECTOR_WIDTH + loc.hex.x - REFERENCE_HEX_X,
        (loc.sector_y - REFERENCE_SECTOR_Y) * SECTOR_HEIGHT + loc.hex.y - REFERENCE_HEX_Y,
    )
}

/// Inverse of [`location_to_coordinates`].
pub fn coordinates_to_location(x: i32, y: i32) -> Location {
    let x = x + REFERENCE_HEX_X - 1;
    let y = y + REFERENCE_HEX_Y - 1;
    let sector_x = x.div_euclid(SECTOR_WIDTH);
    let sector_y = y.div_euclid(SECTOR_HEIGHT);
    Location {
        sector_x: sector_x + REFERENCE_SECTOR_X,
        sector_y: sector_y + REFERENCE_SECTOR_Y,
        hex: Hex::new(x - sector_x * SECTOR_WIDTH + 1, y - sector_y * SECTOR_HEIGHT + 1),
    }
}

/// Center of the hex at world coordinates `(x, y)`, in world units.
pub fn hex_to_center(x: i32, y: i32) -> Vec2 {
    let dy = if x % 2 != 0 { 0.0 } else { 0.5 };
    Vec2::new(x as f32 - 0.5, y as f32 - dy)
}

/// World rectangle covered by sector `(sx, sy)`.
pub fn sector_bounds(sx: i32, sy: i32) -> Rect {
    Rect::new(
        ((sx - REFERENCE_SECTOR_X) * SECTOR_WIDTH - REFERENCE_HEX_X) as f32,
        ((sy - REFERENCE_SECTOR_Y) * SECTOR_HEIGHT - REFERENCE_HEX_Y) as f32,
        SECTOR_WIDTH as f32,
        SECTOR_HEIGHT as f32,
    )
}

#[inline]
pub fn sector_center(sx: i32, sy: i32) -> Vec2 {
    sector_bounds(sx, sy).center()
}

/// World rectangle of subsector `index` (0..16, row-major) of sector `(sx, sy)`.
pub fn subsector_bounds(sx: i32, sy: i32, index: usize) -> Rect {
    let s = sector_bounds(sx, sy);
    let col = (index % 4) as f32;
    let row = (index / 4) as f32;
    Rect::new(
        s.left() + col * SUBSECTOR_WIDTH as f32,
        s.top() + row * SUBSECTOR_HEIGHT as f32,
        SUBSECTOR_WIDTH as f32,
        SUBSECTOR_HEIGHT as f32,
    )
}

#[inline]
pub fn subsector_center(sx: i32, sy: i32, index: usize) -> Vec2 {
    subsector_bounds(sx, sy, index).center()
}

fn subsector_index(hex: Hex) -> i32 {
    let col = (hex.x - 1).div_euclid(SUBSECTOR_WIDTH).clamp(0, 3);
    let row = (hex.y - 1).div_euclid(SUBSECTOR_HEIGHT).clamp(0, 3);
    row * 4 + col
}
