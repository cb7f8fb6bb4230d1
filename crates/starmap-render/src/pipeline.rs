//! Layer pipeline controller.
//!
//! Passes run in rank order inside one saved scope that carries the
//! world→image transform. Between passes the controller toggles a single
//! shared clip: opened lazily for the first pass that wants it, closed before
//! the next pass that does not, and always closed at the end.

use starmap_engine::scene::SortKey;
use starmap_engine::surface::Surface;
use starmap_engine::time::Stopwatch;

use crate::collab::{SpatialIndex, VectorAssets};
use crate::context::{RenderContext, RenderRequest};
use crate::error::RenderError;
use crate::passes::PASSES;
use crate::resources::ResourceCache;
use crate::style::{LayerId, LayerOrder};

/// A pass body. Draws in world coordinates.
pub type PassFn = fn(&RenderContext<'_>, &mut dyn Surface) -> Result<(), RenderError>;

/// Registry entry: one drawing pass.
#[derive(Clone, Copy)]
pub struct LayerPass {
    pub id: LayerId,
    /// Whether the pass draws inside the tile clip.
    pub clip: bool,
    pub draw: PassFn,
}

impl LayerPass {
    pub const fn new(id: LayerId, clip: bool, draw: PassFn) -> Self {
        Self { id, clip, draw }
    }
}

impl std::fmt::Debug for LayerPass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayerPass")
            .field("id", &self.id)
            .field("clip", &self.clip)
            .finish()
    }
}

/// `passes` ordered by rank, ties in registry order.
///
/// Fails on the first pass without a rank, before anything is drawn.
pub(crate) fn sorted_passes<'p>(
    passes: &'p [LayerPass],
    order: &LayerOrder,
) -> Result<Vec<&'p LayerPass>, RenderError> {
    let mut keyed = Vec::with_capacity(passes.len());
    for (i, pass) in passes.iter().enumerate() {
        let rank = order
            .rank(pass.id)
            .ok_or(RenderError::MissingLayerRank(pass.id))?;
        keyed.push((SortKey::new(rank, i as u32), pass));
    }
    keyed.sort_by_key(|(key, _)| *key);
    Ok(keyed.into_iter().map(|(_, p)| p).collect())
}

fn restore_to(surface: &mut dyn Surface, depth: usize) {
    while surface.depth() > depth {
        surface.restore();
    }
}

/// The shared tile clip. Records the depth it was opened at so a pass that
/// leaks saves cannot unbalance the close.
#[derive(Debug, Default)]
struct ClipScope {
    opened_at: Option<usize>,
}

impl ClipScope {
    fn enter(&mut self, ctx: &RenderContext<'_>, surface: &mut dyn Surface, wants_clip: bool) {
        match (self.opened_at.is_some(), wants_clip) {
            (false, true) => {
                self.opened_at = Some(surface.depth());
                surface.save();
                surface.clip_rect(ctx.tile_rect());
                if let Some(clip) = &ctx.request.clip {
                    surface.clip_path(clip);
                }
            }
            (true, false) => self.close(surface),
            _ => {}
        }
    }

    fn close(&mut self, surface: &mut dyn Surface) {
        if let Some(depth) = self.opened_at.take() {
            restore_to(surface, depth);
        }
    }
}

/// Runs `passes` in rank order against `ctx`.
///
/// A resource failure ends only the pass that raised it. Any other error ends
/// the run; the clip is closed either way.
pub(crate) fn run_passes(
    ctx: &RenderContext<'_>,
    surface: &mut dyn Surface,
    passes: &[LayerPass],
) -> Result<(), RenderError> {
    let sorted = sorted_passes(passes, &ctx.style.layer_order)?;
    let mut stopwatch = ctx.request.timing.then(Stopwatch::new);
    let mut clip = ClipScope::default();
    let mut result = Ok(());

    for pass in sorted {
        clip.enter(ctx, surface, pass.clip);
        surface.insert_debug_marker(pass.id.name());

        let depth = surface.depth();
        let outcome = (pass.draw)(ctx, surface);
        restore_to(surface, depth);

        if let Some(sw) = stopwatch.as_mut() {
            sw.lap(pass.id.name());
        }
        match outcome {
            Ok(()) => {}
            Err(e) if !e.is_fatal() => log::warn!("{} skipped: {e}", pass.id.name()),
            Err(e) => {
                result = Err(e);
                break;
            }
        }
    }

    clip.close(surface);
    if let Some(sw) = &stopwatch {
        sw.log_summary("render_tile");
    }
    result
}

/// Renders one tile onto `surface`.
///
/// The surface's save depth is the same on return as on entry, whatever the
/// outcome.
pub fn render_tile(
    request: &RenderRequest,
    index: &dyn SpatialIndex,
    assets: &dyn VectorAssets,
    resources: &ResourceCache,
    surface: &mut dyn Surface,
) -> Result<(), RenderError> {
    render_with(request, index, assets, resources, surface, &PASSES)
}

pub(crate) fn render_with(
    request: &RenderRequest,
    index: &dyn SpatialIndex,
    assets: &dyn VectorAssets,
    resources: &ResourceCache,
    surface: &mut dyn Surface,
    passes: &[LayerPass],
) -> Result<(), RenderError> {
    let ctx = RenderContext::new(request, index, assets, resources)?;
    // Validate the whole table before the first save.
    sorted_passes(passes, &ctx.style.layer_order)?;
    log::debug!(
        "render_tile {:?} at {} px/pc, {}x{}",
        request.tile_rect,
        request.scale,
        request.tile_size.0,
        request.tile_size.1
    );

    let entry = surface.depth();
    surface.save();
    surface.concat(ctx.placement.world_to_image());
    let result = run_passes(&ctx, surface, passes);
    restore_to(surface, entry);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use starmap_engine::coords::{Rect, Vec2};
    use starmap_engine::paint::Color;
    use starmap_engine::path::Path;
    use starmap_engine::scene::{DrawCmd, DrawList};

    use crate::collab::{MemoryAssets, MemoryIndex};
    use crate::error::ResourceError;
    use crate::options::MapOptions;
    use crate::style::Stylesheet;

    fn request(style: Stylesheet) -> RenderRequest {
        RenderRequest::new(
            Rect::new(0.0, 0.0, 32.0, 32.0),
            1.0,
            MapOptions::DEFAULT,
            Arc::new(style),
            (28, 32),
        )
    }

    fn with_ctx<R>(req: &RenderRequest, f: impl FnOnce(&RenderContext<'_>) -> R) -> R {
        let index = MemoryIndex::default();
        let assets = MemoryAssets::new();
        let resources = ResourceCache::new(std::env::temp_dir().join("starmap-pipeline-none"));
        let ctx = RenderContext::new(req, &index, &assets, &resources).unwrap();
        f(&ctx)
    }

    fn mark(_: &RenderContext<'_>, s: &mut dyn Surface) -> Result<(), RenderError> {
        s.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::WHITE);
        Ok(())
    }

    fn leak(_: &RenderContext<'_>, s: &mut dyn Surface) -> Result<(), RenderError> {
        s.save();
        s.save();
        Ok(())
    }

    fn fatal(_: &RenderContext<'_>, s: &mut dyn Surface) -> Result<(), RenderError> {
        s.save();
        Err(RenderError::UnfilteredLineStyle)
    }

    fn missing_image(_: &RenderContext<'_>, _: &mut dyn Surface) -> Result<(), RenderError> {
        Err(ResourceError::Unknown("Nowhere".to_owned()).into())
    }

    fn passes(table: &[(LayerId, bool, PassFn)]) -> Vec<LayerPass> {
        table.iter().map(|&(id, clip, draw)| LayerPass::new(id, clip, draw)).collect()
    }

    fn clips(list: &DrawList) -> usize {
        list.items().iter().filter(|i| matches!(i.cmd, DrawCmd::Clip(_))).count()
    }

    // ── ordering ──────────────────────────────────────────────────────────

    #[test]
    fn registry_covers_every_layer_once() {
        assert_eq!(PASSES.len(), LayerId::ALL.len());
        for (pass, id) in PASSES.iter().zip(LayerId::ALL) {
            assert_eq!(pass.id, id);
        }
        let unclipped: Vec<LayerId> = PASSES.iter().filter(|p| !p.clip).map(|p| p.id).collect();
        assert_eq!(
            unclipped,
            vec![LayerId::BackgroundSolid, LayerId::BackgroundNebulaTexture, LayerId::BackgroundGalaxy]
        );
    }

    #[test]
    fn passes_run_in_rank_order() {
        let mut style = Stylesheet::new(1.0, MapOptions::DEFAULT);
        style.layer_order.set(LayerId::GridSector, 50).set(LayerId::BackgroundSolid, 60);
        let req = request(style);
        let table = passes(&[
            (LayerId::BackgroundSolid, false, mark),
            (LayerId::GridSector, true, mark),
            (LayerId::NamesSector, true, mark),
        ]);
        let mut list = DrawList::new();
        with_ctx(&req, |ctx| run_passes(ctx, &mut list, &table)).unwrap();
        assert_eq!(list.markers(), vec!["NamesSector", "GridSector", "BackgroundSolid"]);
    }

    #[test]
    fn equal_ranks_keep_registry_order() {
        let mut order = LayerOrder::default();
        order.set(LayerId::WorldsOverlays, 0);
        let sorted = sorted_passes(&PASSES, &order).unwrap();
        assert_eq!(sorted[0].id, LayerId::BackgroundSolid);
        assert_eq!(sorted[1].id, LayerId::WorldsOverlays);
    }

    #[test]
    fn missing_rank_fails_before_drawing() {
        let mut style = Stylesheet::new(1.0, MapOptions::DEFAULT);
        style.layer_order.remove(LayerId::MicroRoutes);
        let req = request(style);
        let index = MemoryIndex::default();
        let assets = MemoryAssets::new();
        let resources = ResourceCache::new(std::env::temp_dir());
        let mut list = DrawList::new();
        let err = render_tile(&req, &index, &assets, &resources, &mut list).unwrap_err();
        assert!(matches!(err, RenderError::MissingLayerRank(LayerId::MicroRoutes)));
        assert!(list.items().is_empty());
    }

    #[test]
    fn invalid_scale_is_rejected() {
        let mut req = request(Stylesheet::new(1.0, MapOptions::DEFAULT));
        req.scale = 0.0;
        let index = MemoryIndex::default();
        let assets = MemoryAssets::new();
        let resources = ResourceCache::new(std::env::temp_dir());
        let mut list = DrawList::new();
        let err = render_tile(&req, &index, &assets, &resources, &mut list).unwrap_err();
        assert!(matches!(err, RenderError::InvalidScale(_)));
        assert!(list.items().is_empty());
    }

    // ── clip balance ──────────────────────────────────────────────────────

    #[test]
    fn all_clip_passes_share_one_clip() {
        let req = request(Stylesheet::new(1.0, MapOptions::DEFAULT));
        let table = passes(&[
            (LayerId::GridSector, true, mark),
            (LayerId::GridSubsector, true, mark),
            (LayerId::GridParsec, true, mark),
        ]);
        let mut list = DrawList::new();
        with_ctx(&req, |ctx| run_passes(ctx, &mut list, &table)).unwrap();
        assert_eq!(clips(&list), 1);
        assert_eq!(list.depth(), 0);
        assert!(list.paint_items().all(|i| i.clip_depth == 1));
    }

    #[test]
    fn no_clip_passes_never_clip() {
        let req = request(Stylesheet::new(1.0, MapOptions::DEFAULT));
        let table = passes(&[
            (LayerId::BackgroundSolid, false, mark),
            (LayerId::BackgroundNebulaTexture, false, mark),
        ]);
        let mut list = DrawList::new();
        with_ctx(&req, |ctx| run_passes(ctx, &mut list, &table)).unwrap();
        assert_eq!(clips(&list), 0);
        assert_eq!(list.max_depth(), 0);
    }

    #[test]
    fn mixed_run_toggles_clip_and_adds_caller_clip() {
        let caller = Path::rect(Rect::new(1.0, 1.0, 4.0, 4.0));
        let req = request(Stylesheet::new(1.0, MapOptions::DEFAULT)).with_clip(caller);
        let table = passes(&[
            (LayerId::BackgroundSolid, false, mark),
            (LayerId::GridSector, true, mark),
            (LayerId::GridSubsector, false, mark),
            (LayerId::GridParsec, true, leak),
        ]);
        let mut list = DrawList::new();
        with_ctx(&req, |ctx| run_passes(ctx, &mut list, &table)).unwrap();
        // Two openings, each a tile clip plus the caller clip.
        assert_eq!(clips(&list), 4);
        assert_eq!(list.depth(), 0);
        assert_eq!(list.unbalanced_restores(), 0);
        let depths: Vec<usize> = list.paint_items().map(|i| i.clip_depth).collect();
        assert_eq!(depths, vec![0, 2, 0]);
    }

    #[test]
    fn fatal_error_closes_clip_and_stops() {
        let req = request(Stylesheet::new(1.0, MapOptions::DEFAULT));
        let table = passes(&[
            (LayerId::GridSector, true, fatal),
            (LayerId::GridSubsector, true, mark),
        ]);
        let mut list = DrawList::new();
        let err = with_ctx(&req, |ctx| run_passes(ctx, &mut list, &table)).unwrap_err();
        assert!(matches!(err, RenderError::UnfilteredLineStyle));
        assert_eq!(list.depth(), 0);
        assert_eq!(list.paint_items().count(), 0);
    }

    #[test]
    fn resource_error_skips_only_its_pass() {
        let req = request(Stylesheet::new(1.0, MapOptions::DEFAULT));
        let table = passes(&[
            (LayerId::BackgroundGalaxy, false, missing_image),
            (LayerId::GridSector, true, mark),
        ]);
        let mut list = DrawList::new();
        with_ctx(&req, |ctx| run_passes(ctx, &mut list, &table)).unwrap();
        assert_eq!(list.paint_items().count(), 1);
        assert_eq!(list.depth(), 0);
    }

    #[test]
    fn full_render_restores_entry_depth() {
        let req = request(Stylesheet::new(1.0, MapOptions::DEFAULT)).with_timing(true);
        let index = MemoryIndex::default();
        let assets = MemoryAssets::new();
        let resources = ResourceCache::new(std::env::temp_dir().join("starmap-pipeline-none"));
        let mut list = DrawList::new();
        list.save();
        render_tile(&req, &index, &assets, &resources, &mut list).unwrap();
        assert_eq!(list.depth(), 1);
        assert_eq!(list.markers().len(), LayerId::ALL.len());
        let solid = list.section("BackgroundSolid");
        let first = solid.iter().find(|i| i.cmd.is_paint()).unwrap();
        // Drawn in world units under the tile transform.
        assert_eq!(first.transform.apply(Vec2::zero()), Vec2::zero());
    }
}
