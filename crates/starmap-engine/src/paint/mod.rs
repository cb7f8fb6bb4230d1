//! Paint model shared between the surfaces and the tile renderer.
//!
//! Scope:
//! - color representation (straight-alpha sRGB bytes)
//! - pens (stroke color, width, dash pattern)
//!
//! Geometry types remain in `coords` and `path`.

pub mod color;
pub mod pen;

pub use color::Color;
pub use pen::{LineCap, Pen};
