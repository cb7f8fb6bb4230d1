//! Layered star-map tile renderer.
//!
//! A tile is drawn by up to 27 passes, each a named layer that can be toggled
//! by its stylesheet element and reordered by the stylesheet's
//! [`LayerOrder`](style::LayerOrder). Passes read sector data through a
//! [`SpatialIndex`](collab::SpatialIndex), galaxy-scale vectors through
//! [`VectorAssets`](collab::VectorAssets), and background images through a
//! [`ResourceCache`](resources::ResourceCache); all of them draw through
//! `&mut dyn Surface`.
//!
//! ```ignore
//! let request = RenderRequest::new(tile, scale, options, Arc::new(style), (256, 256));
//! render_tile(&request, &index, &assets, &resources, &mut canvas)?;
//! ```

pub mod astrometry;
pub mod collab;
pub mod context;
pub mod error;
pub mod geometry;
pub mod labels;
pub mod model;
pub mod options;
pub mod pipeline;
pub mod random;
pub mod resources;
pub mod stellar;
pub mod style;
pub mod transform;

mod passes;

pub use context::{RenderContext, RenderRequest};
pub use error::{RenderError, ResourceError};
pub use pipeline::{LayerPass, PassFn, render_tile};
