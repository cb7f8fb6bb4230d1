use std::sync::Arc;

use starmap_engine::coords::Rect;
use starmap_engine::path::Path;

use crate::collab::{Selector, SpatialIndex, VectorAssets};
use crate::error::RenderError;
use crate::labels::LabelEnv;
use crate::options::MapOptions;
use crate::resources::ResourceCache;
use crate::style::Stylesheet;
use crate::transform::TilePlacement;

/// What to render: one tile of the map.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    /// World units.
    pub tile_rect: Rect,
    /// Pixels per parsec.
    pub scale: f32,
    pub options: MapOptions,
    pub style: Arc<Stylesheet>,
    /// Output size in pixels.
    pub tile_size: (u32, u32),
    /// Extra clip in world units, intersected with the tile rectangle.
    pub clip: Option<Path>,
    /// Keep micro borders inside their own sector.
    pub clip_outsector_borders: bool,
    /// Time every pass and log the laps at debug level.
    pub timing: bool,
}

impl RenderRequest {
    pub fn new(
        tile_rect: Rect,
        scale: f32,
        options: MapOptions,
        style: Arc<Stylesheet>,
        tile_size: (u32, u32),
    ) -> Self {
        Self {
            tile_rect,
            scale,
            options,
            style,
            tile_size,
            clip: None,
            clip_outsector_borders: false,
            timing: false,
        }
    }

    pub fn with_clip(mut self, clip: Path) -> Self {
        self.clip = Some(clip);
        self
    }

    pub fn with_clip_outsector_borders(mut self, on: bool) -> Self {
        self.clip_outsector_borders = on;
        self
    }

    pub fn with_timing(mut self, on: bool) -> Self {
        self.timing = on;
        self
    }
}

/// Everything a pass reads. Built once per render; passes never mutate it
/// apart from the selector's scoped slop.
pub struct RenderContext<'a> {
    pub request: &'a RenderRequest,
    pub style: &'a Stylesheet,
    pub placement: TilePlacement,
    pub selector: Selector<'a>,
    pub assets: &'a dyn VectorAssets,
    pub resources: &'a ResourceCache,
    pub labels: LabelEnv,
}

impl<'a> RenderContext<'a> {
    pub fn new(
        request: &'a RenderRequest,
        index: &'a dyn SpatialIndex,
        assets: &'a dyn VectorAssets,
        resources: &'a ResourceCache,
    ) -> Result<Self, RenderError> {
        if !(request.scale > 0.0 && request.scale.is_finite()) {
            return Err(RenderError::InvalidScale(request.scale));
        }
        let placement = TilePlacement::new(request.tile_rect, request.scale)
            .ok_or(RenderError::InvalidScale(request.scale))?;
        let style = request.style.as_ref();
        Ok(Self {
            request,
            style,
            placement,
            selector: Selector::new(index, request.tile_rect),
            assets,
            resources,
            labels: LabelEnv::new(style),
        })
    }

    #[inline]
    pub fn tile_rect(&self) -> Rect {
        self.request.tile_rect
    }

    #[inline]
    pub fn scale(&self) -> f32 {
        self.request.scale
    }

    #[inline]
    pub fn options(&self) -> MapOptions {
        self.request.options
    }
}
