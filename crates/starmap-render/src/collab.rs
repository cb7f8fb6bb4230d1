//! Data sources the renderer queries but does not own.
//!
//! [`SpatialIndex`] answers "what is in this rectangle"; [`VectorAssets`]
//! supplies the named outlines drawn at galaxy scale. Both have in-memory
//! implementations for tests and the demo binary.

use std::cell::Cell;
use std::collections::HashMap;

use starmap_engine::coords::{Rect, Vec2};
use starmap_engine::path::Path;

use crate::astrometry;
use crate::model::{Route, Sector, World};
use crate::options::MapOptions;

/// Spatial queries over loaded map data. Rectangles are in world units.
pub trait SpatialIndex {
    fn sectors(&self, rect: Rect) -> Vec<&Sector>;

    fn worlds(&self, rect: Rect) -> Vec<&World>;

    /// Routes whose owning sector intersects `rect`, with that sector.
    fn routes(&self, rect: Rect) -> Vec<(&Sector, &Route)>;
}

/// Fraction of the tile size added on every side of a query by default.
pub const DEFAULT_SLOP: f32 = 0.1;

/// Tile-scoped view of a [`SpatialIndex`].
///
/// Queries cover the tile rectangle widened by the current slop factor.
/// Passes whose glyphs reach far beyond their hex widen it temporarily
/// through [`Selector::widen`].
pub struct Selector<'a> {
    index: &'a dyn SpatialIndex,
    rect: Rect,
    slop: Cell<f32>,
}

impl<'a> Selector<'a> {
    pub fn new(index: &'a dyn SpatialIndex, rect: Rect) -> Self {
        Self { index, rect, slop: Cell::new(DEFAULT_SLOP) }
    }

    #[inline]
    pub fn slop(&self) -> f32 {
        self.slop.get()
    }

    /// Sets the slop factor until the returned guard is dropped.
    pub fn widen(&self, slop: f32) -> SlopGuard<'_, 'a> {
        let previous = self.slop.replace(slop);
        SlopGuard { selector: self, previous }
    }

    /// Query rectangle under the current slop.
    pub fn query_rect(&self) -> Rect {
        let s = self.slop.get();
        self.rect
            .inflate(self.rect.width() * s, self.rect.height() * s)
    }

    pub fn sectors(&self) -> Vec<&'a Sector> {
        self.index.sectors(self.query_rect())
    }

    pub fn worlds(&self) -> Vec<&'a World> {
        self.index.worlds(self.query_rect())
    }

    pub fn routes(&self) -> Vec<(&'a Sector, &'a Route)> {
        self.index.routes(self.query_rect())
    }
}

/// Restores the previous slop factor on drop.
pub struct SlopGuard<'s, 'a> {
    selector: &'s Selector<'a>,
    previous: f32,
}

impl Drop for SlopGuard<'_, '_> {
    fn drop(&mut self) {
        self.selector.slop.set(self.previous);
    }
}

/// Linear-scan index over owned sectors.
#[derive(Debug, Default)]
pub struct MemoryIndex {
    sectors: Vec<Sector>,
}

impl MemoryIndex {
    pub fn new(sectors: Vec<Sector>) -> Self {
        Self { sectors }
    }

    pub fn push(&mut self, sector: Sector) {
        self.sectors.push(sector);
    }
}

impl SpatialIndex for MemoryIndex {
    fn sectors(&self, rect: Rect) -> Vec<&Sector> {
        self.sectors
            .iter()
            .filter(|s| astrometry::sector_bounds(s.x, s.y).intersects(rect))
            .collect()
    }

    fn worlds(&self, rect: Rect) -> Vec<&World> {
        self.sectors(rect)
            .into_iter()
            .flat_map(|s| s.worlds.iter())
            .filter(|w| rect.contains(w.center()))
            .collect()
    }

    fn routes(&self, rect: Rect) -> Vec<(&Sector, &Route)> {
        self.sectors(rect)
            .into_iter()
            .flat_map(|s| s.routes.iter().map(move |r| (s, r)))
            .collect()
    }
}

/// A named outline at galaxy scale: a polity border, a rift, a trade route.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorObject {
    pub name: String,
    /// World units.
    pub points: Vec<Vec2>,
    pub closed: bool,
    /// Which display options this object belongs to.
    pub map_options: MapOptions,
    pub label: Option<String>,
    pub label_position: Vec2,
}

impl VectorObject {
    pub fn path(&self) -> Path {
        if self.closed {
            Path::polygon(&self.points)
        } else {
            Path::polyline(&self.points)
        }
    }
}

/// Capital or homeworld marker drawn at macro scale.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldLabel {
    pub name: String,
    pub position: Vec2,
    pub map_options: MapOptions,
    /// Text offset from the marker, in world units.
    pub label_offset: Vec2,
}

pub trait VectorAssets {
    fn load_vector(&self, name: &str) -> Option<&VectorObject>;

    fn world_labels(&self) -> &[WorldLabel];
}

#[derive(Debug, Default)]
pub struct MemoryAssets {
    vectors: HashMap<String, VectorObject>,
    labels: Vec<WorldLabel>,
}

impl MemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_vector(&mut self, v: VectorObject) {
        self.vectors.insert(v.name.clone(), v);
    }

    pub fn push_label(&mut self, label: WorldLabel) {
        self.labels.push(label);
    }
}

impl VectorAssets for MemoryAssets {
    fn load_vector(&self, name: &str) -> Option<&VectorObject> {
        self.vectors.get(name)
    }

    fn world_labels(&self) -> &[WorldLabel] {
        &self.labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::astrometry::{Hex, Location};
    use crate::model::World;

    fn index() -> MemoryIndex {
        let mut s = Sector::new(0, 0, "Core");
        s.worlds.push(World::new("Near", Location::new(0, 0, Hex::new(2, 2)), "A000000-0"));
        s.worlds.push(World::new("Far", Location::new(0, 0, Hex::new(30, 38)), "A000000-0"));
        s.routes.push(Route::new(Hex::new(2, 2), Hex::new(3, 3)));
        MemoryIndex::new(vec![s, Sector::new(5, 5, "Elsewhere")])
    }

    #[test]
    fn queries_filter_by_rect() {
        let idx = index();
        let rect = Rect::new(0.0, -40.0, 4.0, 4.0);
        assert_eq!(idx.sectors(rect).len(), 1);
        let names: Vec<_> = idx.worlds(rect).iter().map(|w| w.name.as_str()).collect();
        assert_eq!(names, vec!["Near"]);
        assert_eq!(idx.routes(rect).len(), 1);
    }

    #[test]
    fn slop_guard_restores() {
        let idx = index();
        let sel = Selector::new(&idx, Rect::new(0.0, -40.0, 4.0, 4.0));
        let narrow = sel.query_rect();
        {
            let _g = sel.widen(10.0);
            assert!(sel.query_rect().width() > narrow.width());
            assert_eq!(sel.worlds().len(), 2);
        }
        assert_eq!(sel.slop(), DEFAULT_SLOP);
        assert_eq!(sel.query_rect(), narrow);
    }
}
