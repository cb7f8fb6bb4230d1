use crate::coords::{Rect, Vec2};
use crate::paint::{Color, Pen};
use crate::path::Path;
use crate::text::FontSpec;

/// Renderer-agnostic draw command.
///
/// Geometry is stored in the drawing space it was issued in; the owning
/// [`DrawItem`](super::DrawItem) carries the transform to device pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Save,
    Restore,
    Clip(Path),
    Fill { path: Path, color: Color },
    Stroke { path: Path, pen: Pen },
    Text {
        text: String,
        font: FontSpec,
        /// Top-left of the measured text box.
        origin: Vec2,
        size: Vec2,
        color: Color,
    },
    Image {
        dest: Rect,
        width: u32,
        height: u32,
        opacity: f32,
    },
    Marker(String),
}

impl DrawCmd {
    /// True for commands that put pixels on the surface.
    #[inline]
    pub fn is_paint(&self) -> bool {
        matches!(
            self,
            DrawCmd::Fill { .. } | DrawCmd::Stroke { .. } | DrawCmd::Text { .. } | DrawCmd::Image { .. }
        )
    }
}
