//! Coordinate and geometry types shared by the surfaces and the tile renderer.
//!
//! Canonical space:
//! - Origin top-left
//! - +X right, +Y down
//!
//! Drawing happens in whatever space the current [`Affine`] maps to device
//! pixels; for tiles that is world (parsec) space.

mod affine;
mod rect;
mod vec2;

pub use affine::Affine;
pub use rect::Rect;
pub use vec2::Vec2;
