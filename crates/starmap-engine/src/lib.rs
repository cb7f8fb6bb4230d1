//! Starmap engine crate.
//!
//! This crate owns the renderer-agnostic drawing pieces used by the tile
//! renderer: geometry, paint, the `Surface` trait and its two backends
//! (a recording draw list and a tiny-skia raster canvas), and text.

pub mod logging;
pub mod coords;
pub mod paint;
pub mod path;
pub mod raster;
pub mod scene;
pub mod surface;
pub mod text;
pub mod time;
