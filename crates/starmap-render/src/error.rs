use std::fmt;

use starmap_engine::raster::BitmapError;

use crate::style::LayerId;

/// Failure to produce a cached image.
#[derive(Debug)]
pub enum ResourceError {
    /// The name is not part of the fixed resource set.
    Unknown(String),
    /// The file could not be read or decoded.
    Decode { name: String, source: BitmapError },
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceError::Unknown(name) => write!(f, "unknown resource {name:?}"),
            ResourceError::Decode { name, source } => write!(f, "resource {name:?}: {source}"),
        }
    }
}

impl std::error::Error for ResourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ResourceError::Decode { source, .. } => Some(source),
            ResourceError::Unknown(_) => None,
        }
    }
}

/// Error returned by [`crate::render_tile`].
///
/// `MissingLayerRank` and `UnfilteredLineStyle` are configuration defects and
/// abort the render. `Resource` only aborts the pass that hit it; the pipeline
/// logs it and carries on.
#[derive(Debug)]
pub enum RenderError {
    MissingLayerRank(LayerId),
    /// Zero, negative or non-finite pixels-per-parsec.
    InvalidScale(f32),
    /// A `None` line style reached the dash mapper.
    UnfilteredLineStyle,
    Resource(ResourceError),
}

impl RenderError {
    /// True for errors that end the whole render.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, RenderError::Resource(_))
    }
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::MissingLayerRank(id) => write!(f, "layer order has no rank for {id:?}"),
            RenderError::InvalidScale(s) => write!(f, "invalid render scale {s}"),
            RenderError::UnfilteredLineStyle => f.write_str("line style None reached the dash mapper"),
            RenderError::Resource(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Resource(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ResourceError> for RenderError {
    fn from(e: ResourceError) -> Self {
        RenderError::Resource(e)
    }
}
