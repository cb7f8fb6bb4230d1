//! Pass renderers and their registry.
//!
//! Every pass reads its own style element and returns at once when that
//! element is hidden. Passes draw in world units; the pipeline owns the
//! transform and the tile clip.

mod background;
mod borders;
mod grids;
mod macro_layers;
mod names;
mod overlays;
mod routes;
mod stars;
mod worlds;

use starmap_engine::paint::Color;

use crate::model::Sector;
use crate::pipeline::LayerPass;
use crate::style::{LayerId, StyleRule, Stylesheet};

/// Tag → (clip, body), in declaration order.
pub(crate) static PASSES: [LayerPass; 27] = [
    LayerPass::new(LayerId::BackgroundSolid, false, background::solid),
    LayerPass::new(LayerId::BackgroundNebulaTexture, false, background::nebula),
    LayerPass::new(LayerId::BackgroundGalaxy, false, background::galaxy),
    LayerPass::new(LayerId::BackgroundPseudoRandomStars, true, stars::pseudo_random_stars),
    LayerPass::new(LayerId::BackgroundRifts, true, background::rifts),
    LayerPass::new(LayerId::MacroBorders, true, macro_layers::borders),
    LayerPass::new(LayerId::MacroRoutes, true, macro_layers::routes),
    LayerPass::new(LayerId::GridSector, true, grids::sector),
    LayerPass::new(LayerId::GridSubsector, true, grids::subsector),
    LayerPass::new(LayerId::GridParsec, true, grids::parsec),
    LayerPass::new(LayerId::NamesSubsector, true, names::subsector_names),
    LayerPass::new(LayerId::MicroBordersFill, true, borders::fill),
    LayerPass::new(LayerId::MicroBordersShade, true, borders::shade),
    LayerPass::new(LayerId::MicroBordersStroke, true, borders::stroke),
    LayerPass::new(LayerId::MicroRoutes, true, routes::micro_routes),
    LayerPass::new(LayerId::MicroBorderExplicitLabels, true, names::explicit_labels),
    LayerPass::new(LayerId::NamesSector, true, names::sector_names),
    LayerPass::new(LayerId::MacroGovernmentRiftRouteNames, true, macro_layers::names),
    LayerPass::new(LayerId::MacroCapitalsAndHomeWorlds, true, macro_layers::capitals),
    LayerPass::new(LayerId::MegaGalaxyScaleLabels, true, macro_layers::mega_labels),
    LayerPass::new(LayerId::WorldsBackground, true, worlds::background),
    LayerPass::new(LayerId::WorldsForeground, true, worlds::foreground),
    LayerPass::new(LayerId::WorldsOverlays, true, worlds::overlays),
    LayerPass::new(LayerId::OverlayDroyneChirperWorlds, true, overlays::droyne_chirper),
    LayerPass::new(LayerId::OverlayMinorHomeworlds, true, overlays::minor_homeworlds),
    LayerPass::new(LayerId::OverlayAncientsWorlds, true, overlays::ancients),
    LayerPass::new(LayerId::OverlayReviewStatus, true, overlays::review_status),
];

/// The sector's own rule for `element` and `code`, if it ships a stylesheet.
fn sector_rule<'s>(sector: &'s Sector, element: &str, code: &str) -> Option<&'s StyleRule> {
    sector.stylesheet.as_deref()?.resolve(element, code)
}

/// `color`, unless grayscale output or a clash with the background calls for
/// the element default.
fn legible(style: &Stylesheet, color: Color, default: Color) -> Color {
    if style.grayscale || !color.noticeably_different(style.background_color) {
        default
    } else {
        color
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Fixtures shared by the pass tests.

    use std::sync::Arc;

    use starmap_engine::coords::Rect;
    use starmap_engine::scene::DrawList;
    use starmap_engine::surface::Surface;

    use crate::collab::{MemoryAssets, MemoryIndex};
    use crate::context::{RenderContext, RenderRequest};
    use crate::options::MapOptions;
    use crate::pipeline::PassFn;
    use crate::resources::ResourceCache;
    use crate::style::Stylesheet;

    pub struct Fixture {
        pub request: RenderRequest,
        pub index: MemoryIndex,
        pub assets: MemoryAssets,
        pub resources: ResourceCache,
    }

    impl Fixture {
        pub fn new(tile: Rect, scale: f32, style: Stylesheet) -> Self {
            let request = RenderRequest::new(tile, scale, style.options, Arc::new(style), (256, 256));
            Self {
                request,
                index: MemoryIndex::default(),
                assets: MemoryAssets::new(),
                resources: ResourceCache::new(std::env::temp_dir().join("starmap-passes-none")),
            }
        }

        /// Poster style with default options, adjusted by `tweak`.
        pub fn poster(tile: Rect, scale: f32, tweak: impl FnOnce(&mut Stylesheet)) -> Self {
            let mut style = Stylesheet::new(scale, MapOptions::DEFAULT);
            tweak(&mut style);
            Self::new(tile, scale, style)
        }

        pub fn draw(&self, pass: PassFn) -> DrawList {
            let ctx = RenderContext::new(&self.request, &self.index, &self.assets, &self.resources)
                .expect("valid request");
            let mut list = DrawList::new();
            pass(&ctx, &mut list).expect("pass succeeds");
            assert_eq!(list.depth(), 0, "pass left saves open");
            list
        }
    }
}
