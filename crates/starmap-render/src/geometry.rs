//! Hex geometry, border tracing, dashes and curves.
//!
//! All functions work in world units. "Scaled" space multiplies x by
//! [`PARSEC_SCALE_X`], which makes hexes regular; angles and distances that
//! must look right on screen are measured there.

use starmap_engine::coords::Vec2;
use starmap_engine::path::Path;

use crate::astrometry::{self, SECTOR_HEIGHT, SECTOR_WIDTH};
use crate::error::RenderError;
use crate::random::SubtractiveRng;
use crate::style::{LineStyle, MicroBorderStyle};
use crate::transform::PARSEC_SCALE_X;

/// Horizontal overhang of a hex's left/right corners past the half-column,
/// `tan 30° / 4 / PARSEC_SCALE_X` (one sixth).
pub const HEX_EDGE: f32 = 0.577_350_26 / 4.0 / PARSEC_SCALE_X;

/// Tension of the smoothed border curves.
pub const CURVE_TENSION: f32 = 0.6;

/// Dash pattern for `style`, in multiples of the pen width.
///
/// `None` must be filtered out by the caller before stroking.
pub fn dash_pattern(style: LineStyle) -> Result<Option<Vec<f32>>, RenderError> {
    match style {
        LineStyle::Solid => Ok(None),
        LineStyle::Dashed => Ok(Some(vec![3.0, 1.0])),
        LineStyle::Dotted => Ok(Some(vec![1.0, 1.0])),
        LineStyle::None => Err(RenderError::UnfilteredLineStyle),
    }
}

/// Moves both ends of `a`-`b` toward each other by `d`.
///
/// `None` for a zero-length segment, which has no direction.
pub fn offset_segment(a: Vec2, b: Vec2, d: f32) -> Option<(Vec2, Vec2)> {
    let delta = b - a;
    let len = delta.length();
    if len == 0.0 || !len.is_finite() {
        return None;
    }
    let step = delta * (d / len);
    Some((a + step, b - step))
}

/// Corner offsets from a hex center, clockwise from the upper right:
/// upper right, right, lower right, lower left, left, upper left.
///
/// `edge` is [`HEX_EDGE`] for hexes and `0.0` for squares.
pub fn hex_corners(edge: f32) -> [Vec2; 6] {
    [
        Vec2::new(0.5 - edge, -0.5),
        Vec2::new(0.5 + edge, 0.0),
        Vec2::new(0.5 - edge, 0.5),
        Vec2::new(-0.5 + edge, 0.5),
        Vec2::new(-0.5 - edge, 0.0),
        Vec2::new(-0.5 + edge, -0.5),
    ]
}

/// Closed outline of one hex around the origin.
pub fn hex_path(edge: f32) -> Path {
    Path::polygon(&hex_corners(edge))
}

fn corner(x: i32, y: i32, k: usize, corners: &[Vec2; 6]) -> Vec2 {
    astrometry::hex_to_center(x, y) + corners[k]
}

/// Clip outline of sector `(sx, sy)`.
///
/// Square borders clip to the sector rectangle; hex and curve borders to the
/// outer edge of the sector's hexes, which interlock with the neighbors'.
pub fn sector_clip_path(sx: i32, sy: i32, style: MicroBorderStyle) -> Path {
    if style == MicroBorderStyle::Square {
        return Path::rect(astrometry::sector_bounds(sx, sy));
    }

    let c = hex_corners(HEX_EDGE);
    let (x0, y0) = astrometry::location_to_coordinates(astrometry::Location::new(
        sx,
        sy,
        astrometry::Hex::new(1, 1),
    ));
    let x1 = x0 + SECTOR_WIDTH - 1;
    let y1 = y0 + SECTOR_HEIGHT - 1;

    let mut pts = Vec::with_capacity(((SECTOR_WIDTH + SECTOR_HEIGHT) * 4) as usize);
    for x in x0..=x1 {
        pts.push(corner(x, y0, 5, &c));
        pts.push(corner(x, y0, 0, &c));
    }
    for y in y0..=y1 {
        pts.push(corner(x1, y, 1, &c));
        pts.push(corner(x1, y, 2, &c));
    }
    for x in (x0..=x1).rev() {
        pts.push(corner(x, y1, 2, &c));
        pts.push(corner(x, y1, 3, &c));
    }
    for y in (y0..=y1).rev() {
        pts.push(corner(x0, y, 4, &c));
        pts.push(corner(x0, y, 5, &c));
    }
    Path::polygon(&pts)
}

/// Index of the hex edge facing from `from` toward `to`:
/// 0 NE, 1 SE, 2 S, 3 SW, 4 NW, 5 N.
fn edge_toward(from: Vec2, to: Vec2) -> usize {
    let v = to - from;
    let angle = (v.y).atan2(v.x * PARSEC_SCALE_X).to_degrees();
    (((angle + 30.0) / 60.0).round() as i32).rem_euclid(6) as usize
}

fn signed_area(points: &[Vec2]) -> f32 {
    let n = points.len();
    (0..n)
        .map(|i| {
            let a = points[i];
            let b = points[(i + 1) % n];
            a.x * PARSEC_SCALE_X * b.y - b.x * PARSEC_SCALE_X * a.y
        })
        .sum::<f32>()
        * 0.5
}

/// Traces the outer edge of a ring of hexes given in world coordinates.
///
/// The ring lists the boundary hexes of a region in walking order; it may be
/// either orientation and need not repeat its first hex. Consecutive
/// duplicates are ignored. Each hex contributes the corners between the edge
/// facing its predecessor and the edge facing its successor, clockwise.
pub fn border_outline(ring: &[(i32, i32)], edge: f32) -> Vec<Vec2> {
    let mut hexes: Vec<(i32, i32)> = Vec::with_capacity(ring.len());
    for &h in ring {
        if hexes.last() != Some(&h) {
            hexes.push(h);
        }
    }
    while hexes.len() > 1 && hexes.first() == hexes.last() {
        hexes.pop();
    }

    let corners = hex_corners(edge);
    match hexes.len() {
        0 => return Vec::new(),
        1 => {
            let (x, y) = hexes[0];
            return (0..6).map(|k| corner(x, y, k, &corners)).collect();
        }
        _ => {}
    }

    let centers: Vec<Vec2> = hexes
        .iter()
        .map(|&(x, y)| astrometry::hex_to_center(x, y))
        .collect();
    // Positive area is clockwise with y pointing down.
    let (hexes, centers) = if signed_area(&centers) < 0.0 {
        (
            hexes.into_iter().rev().collect::<Vec<_>>(),
            centers.into_iter().rev().collect::<Vec<_>>(),
        )
    } else {
        (hexes, centers)
    };

    let n = hexes.len();
    let mut out: Vec<Vec2> = Vec::with_capacity(n * 4);
    for i in 0..n {
        let here = centers[i];
        let prev = centers[(i + n - 1) % n];
        let next = centers[(i + 1) % n];
        let dp = edge_toward(here, prev);
        let dn = edge_toward(here, next);
        let count = match (dn + 6 - dp) % 6 {
            0 => 6,
            c => c,
        };
        for j in 0..count {
            let p = here + corners[(dp + 1 + j) % 6];
            let dup = out.last().is_some_and(|&q| close_to(q, p));
            if !dup {
                out.push(p);
            }
        }
    }
    if out.len() > 1 && close_to(out[0], out[out.len() - 1]) {
        out.pop();
    }
    out
}

fn close_to(a: Vec2, b: Vec2) -> bool {
    (a.x - b.x).abs() < 1e-4 && (a.y - b.y).abs() < 1e-4
}

/// Cardinal spline through `points`.
///
/// Segment `i` runs from `P[i]` to `P[i+1]` with control points
/// `P[i] + (P[i+1] - P[i-1]) * t/3` and `P[i+1] - (P[i+2] - P[i]) * t/3`.
/// Open curves repeat their end points as the missing neighbors.
pub fn cardinal_spline(points: &[Vec2], tension: f32, closed: bool) -> Path {
    let n = points.len();
    if n < 2 {
        return Path::new();
    }
    let k = tension / 3.0;
    let at = |i: isize| -> Vec2 {
        if closed {
            points[i.rem_euclid(n as isize) as usize]
        } else {
            points[i.clamp(0, n as isize - 1) as usize]
        }
    };

    let mut path = Path::new();
    path.move_to(points[0]);
    let segments = if closed { n } else { n - 1 };
    for i in 0..segments as isize {
        let p0 = at(i - 1);
        let p1 = at(i);
        let p2 = at(i + 1);
        let p3 = at(i + 2);
        let c1 = p1 + (p2 - p0) * k;
        let c2 = p2 - (p3 - p1) * k;
        path.cubic_to(c1, c2, p2);
    }
    if closed {
        path.close();
    }
    path
}

/// Drawable outline of a border ring in the given style.
///
/// Curves pass through the midpoints of the traced outline's edges.
pub fn border_path(ring: &[(i32, i32)], style: MicroBorderStyle, closed: bool) -> Path {
    match style {
        MicroBorderStyle::Hex => polygon_or_line(&border_outline(ring, HEX_EDGE), closed),
        MicroBorderStyle::Square => polygon_or_line(&border_outline(ring, 0.0), closed),
        MicroBorderStyle::Curve => {
            let outline = border_outline(ring, HEX_EDGE);
            let n = outline.len();
            if n < 2 {
                return Path::new();
            }
            let mids: Vec<Vec2> = (0..n)
                .map(|i| outline[i].midpoint(outline[(i + 1) % n]))
                .collect();
            let mids = if closed { &mids[..] } else { &mids[..n - 1] };
            cardinal_spline(mids, CURVE_TENSION, closed)
        }
    }
}

fn polygon_or_line(points: &[Vec2], closed: bool) -> Path {
    if closed {
        Path::polygon(points)
    } else {
        Path::polyline(points)
    }
}

const BELT_X: [f32; 10] = [-2.0, 0.0, 2.0, -3.0, -1.0, 1.0, 3.0, -2.0, 0.0, 2.0];
const BELT_Y: [f32; 10] = [-2.0, -2.0, -2.0, 0.0, 0.0, 0.0, 0.0, 2.0, 2.0, 2.0];
const BELT_P: [f64; 10] = [0.5, 0.9, 0.5, 0.6, 0.9, 0.9, 0.6, 0.5, 0.9, 0.5];

/// Asteroid belt glyph for the world at `(x, y)`: `(center, radius)` pairs in
/// the world's local glyph frame.
pub fn asteroid_belt(x: i32, y: i32) -> Vec<(Vec2, f32)> {
    let mut rng = SubtractiveRng::new(x ^ y);
    let mut out = Vec::with_capacity(BELT_X.len());
    for i in 0..BELT_X.len() {
        if rng.next_f64() >= BELT_P[i] {
            continue;
        }
        let r = 0.04 + rng.next_f32() * 0.03;
        let jx = (rng.next_f32() * 2.0 - 1.0) * 0.015;
        let jy = (rng.next_f32() * 2.0 - 1.0) * 0.015;
        out.push((Vec2::new(BELT_X[i] * 0.035 + jx, BELT_Y[i] * 0.035 + jy), r));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use starmap_engine::path::PathEl;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < 1e-4 && (a.y - b.y).abs() < 1e-4
    }

    // ── dashes and segments ───────────────────────────────────────────────

    #[test]
    fn dash_patterns() {
        assert_eq!(dash_pattern(LineStyle::Solid).unwrap(), None);
        assert_eq!(dash_pattern(LineStyle::Dashed).unwrap(), Some(vec![3.0, 1.0]));
        assert_eq!(dash_pattern(LineStyle::Dotted).unwrap(), Some(vec![1.0, 1.0]));
        assert!(matches!(dash_pattern(LineStyle::None), Err(RenderError::UnfilteredLineStyle)));
    }

    #[test]
    fn offset_segment_shortens_both_ends() {
        let (a, b) = offset_segment(Vec2::zero(), Vec2::new(4.0, 0.0), 0.25).unwrap();
        assert!(close(a, Vec2::new(0.25, 0.0)) && close(b, Vec2::new(3.75, 0.0)));
        assert!(offset_segment(Vec2::new(1.0, 1.0), Vec2::new(1.0, 1.0), 0.25).is_none());
    }

    // ── hexes ─────────────────────────────────────────────────────────────

    #[test]
    fn hex_edge_is_one_sixth() {
        assert!((HEX_EDGE - 1.0 / 6.0).abs() < 1e-5);
    }

    #[test]
    fn hex_is_regular_in_scaled_space() {
        let c = hex_corners(HEX_EDGE);
        let scaled = |v: Vec2| Vec2::new(v.x * PARSEC_SCALE_X, v.y);
        for k in 0..6 {
            let side = (scaled(c[(k + 1) % 6]) - scaled(c[k])).length();
            assert!((side - scaled(c[1]).length()).abs() < 1e-4, "side {k}");
        }
    }

    #[test]
    fn edge_directions_match_neighbors() {
        // Even column 2: NE is (3, 0), SE is (3, 1).
        let here = astrometry::hex_to_center(2, 1);
        let to = |x, y| edge_toward(here, astrometry::hex_to_center(x, y));
        assert_eq!(to(3, 0), 0);
        assert_eq!(to(3, 1), 1);
        assert_eq!(to(2, 2), 2);
        assert_eq!(to(1, 1), 3);
        assert_eq!(to(1, 0), 4);
        assert_eq!(to(2, 0), 5);
    }

    // ── outlines ──────────────────────────────────────────────────────────

    #[test]
    fn single_hex_outline_is_its_corners() {
        let o = border_outline(&[(5, 5)], HEX_EDGE);
        assert_eq!(o.len(), 6);
    }

    #[test]
    fn two_hex_outline_skips_shared_edge() {
        // (2, 2) and its SE neighbor (3, 2) share one edge: ten outer edges.
        let o = border_outline(&[(2, 2), (3, 2)], HEX_EDGE);
        assert_eq!(o.len(), 10);
        let shared_mid = astrometry::hex_to_center(2, 2)
            .midpoint(astrometry::hex_to_center(3, 2));
        for i in 0..o.len() {
            let m = o[i].midpoint(o[(i + 1) % o.len()]);
            assert!(!close(m, shared_mid), "edge {i} is the shared edge");
        }
    }

    #[test]
    fn compact_block_traces_outer_edges_only() {
        // Four mutually touching hexes expose fourteen edges.
        let o = border_outline(&[(2, 2), (3, 2), (3, 3), (2, 3)], HEX_EDGE);
        assert_eq!(o.len(), 14);
    }

    #[test]
    fn outline_ignores_ring_orientation() {
        let ring = [(2, 2), (3, 2), (3, 3), (2, 3)];
        let mut rev = ring;
        rev.reverse();
        let a = border_outline(&ring, HEX_EDGE);
        let b = border_outline(&rev, HEX_EDGE);
        assert_eq!(a.len(), b.len());
        assert!(signed_area(&a) > 0.0 && signed_area(&b) > 0.0);
    }

    #[test]
    fn square_sector_clip_is_bounds() {
        let p = sector_clip_path(0, 0, MicroBorderStyle::Square);
        assert_eq!(p.control_bounds(), Some(astrometry::sector_bounds(0, 0)));
    }

    #[test]
    fn hex_sector_clip_covers_sector() {
        let b = sector_clip_path(1, -1, MicroBorderStyle::Hex).control_bounds().unwrap();
        let s = astrometry::sector_bounds(1, -1);
        assert!(b.left() < s.left() && b.right() > s.right());
        assert!((b.top() - s.top()).abs() < 1e-4);
        assert!((b.bottom() - (s.bottom() + 0.5)).abs() < 1e-4);
    }

    // ── curves ────────────────────────────────────────────────────────────

    #[test]
    fn spline_passes_through_points() {
        let pts = [Vec2::zero(), Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0)];
        let p = cardinal_spline(&pts, CURVE_TENSION, true);
        let ends: Vec<Vec2> = p
            .elements()
            .iter()
            .filter_map(|e| match e {
                PathEl::CubicTo(_, _, q) => Some(*q),
                _ => None,
            })
            .collect();
        assert_eq!(ends.len(), 3);
        assert!(close(ends[2], pts[0]));
        assert_eq!(cardinal_spline(&pts, CURVE_TENSION, false).elements().len(), 3);
    }

    #[test]
    fn curve_border_is_closed_path() {
        let p = border_path(&[(2, 2), (3, 2)], MicroBorderStyle::Curve, true);
        assert_eq!(p.elements().last(), Some(&PathEl::Close));
    }

    // ── belts ─────────────────────────────────────────────────────────────

    #[test]
    fn belt_is_deterministic_per_coordinate() {
        assert_eq!(asteroid_belt(12, -7), asteroid_belt(12, -7));
        let pts = asteroid_belt(3, 9);
        assert!(pts.len() <= 10);
        for (c, r) in pts {
            assert!((0.04..=0.07).contains(&r));
            assert!(c.x.abs() <= 3.0 * 0.035 + 0.015 + 1e-6);
        }
    }
}
