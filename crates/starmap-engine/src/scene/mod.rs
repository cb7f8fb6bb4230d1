//! Recorded draw streams.
//!
//! Responsibilities:
//! - record renderer-agnostic draw commands together with the transform,
//!   save depth and clip depth they were issued under
//! - group commands by debug marker so callers can check issue order
//! - provide the stable ordering key used to sequence layers

mod cmd;
mod key;
mod list;

pub use cmd::DrawCmd;
pub use key::SortKey;
pub use list::{DrawItem, DrawList};
