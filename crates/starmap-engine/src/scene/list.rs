use crate::coords::{Affine, Rect, Vec2};
use crate::paint::{Color, Pen};
use crate::path::Path;
use crate::raster::Bitmap;
use crate::surface::Surface;
use crate::text::{approx_text_size, FontSpec, FontSystem, TextAnchor};

use std::sync::Arc;

use super::DrawCmd;

/// A single recorded command plus the state it was issued under.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub cmd: DrawCmd,
    /// Drawing space → device pixels at issue time.
    pub transform: Affine,
    /// Unmatched `save` calls at issue time.
    pub depth: usize,
    /// Number of clip paths in effect at issue time.
    pub clip_depth: usize,
}

#[derive(Debug, Clone, Copy)]
struct State {
    transform: Affine,
    clip_depth: usize,
}

/// Recording surface.
///
/// Performance characteristics:
/// - every surface call is an O(1) push
/// - `clear()` keeps allocated capacity for reuse
///
/// Text is measured with the attached [`FontSystem`] when one is given,
/// otherwise with [`approx_text_size`], so layouts are deterministic in tests.
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    current: State,
    stack: Vec<State>,
    max_depth: usize,
    unbalanced_restores: usize,
    fonts: Option<Arc<FontSystem>>,
}

impl Default for State {
    fn default() -> Self {
        Self { transform: Affine::IDENTITY, clip_depth: 0 }
    }
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recording surface that measures text with real font metrics.
    pub fn with_fonts(fonts: Arc<FontSystem>) -> Self {
        Self { fonts: Some(fonts), ..Self::default() }
    }

    /// Clears recorded items and the state stack. Keeps allocated capacity for reuse.
    pub fn clear(&mut self) {
        self.items.clear();
        self.stack.clear();
        self.current = State::default();
        self.max_depth = 0;
        self.unbalanced_restores = 0;
    }

    /// Returns items in issue order.
    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    /// Items that put pixels on the surface.
    pub fn paint_items(&self) -> impl Iterator<Item = &DrawItem> {
        self.items.iter().filter(|i| i.cmd.is_paint())
    }

    /// Deepest save stack observed.
    #[inline]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// `restore` calls that had no matching `save`.
    #[inline]
    pub fn unbalanced_restores(&self) -> usize {
        self.unbalanced_restores
    }

    /// Debug markers in issue order.
    pub fn markers(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter_map(|i| match &i.cmd {
                DrawCmd::Marker(m) => Some(m.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Items issued after `marker` and before the next marker.
    ///
    /// Empty when the marker was never inserted.
    pub fn section(&self, marker: &str) -> &[DrawItem] {
        let start = self
            .items
            .iter()
            .position(|i| matches!(&i.cmd, DrawCmd::Marker(m) if m == marker));
        let Some(start) = start else {
            return &[];
        };
        let end = self.items[start + 1..]
            .iter()
            .position(|i| matches!(i.cmd, DrawCmd::Marker(_)))
            .map_or(self.items.len(), |p| start + 1 + p);
        &self.items[start + 1..end]
    }

    #[inline]
    fn push(&mut self, cmd: DrawCmd) {
        self.items.push(DrawItem {
            cmd,
            transform: self.current.transform,
            depth: self.stack.len(),
            clip_depth: self.current.clip_depth,
        });
    }
}

impl Surface for DrawList {
    fn save(&mut self) {
        self.push(DrawCmd::Save);
        self.stack.push(self.current);
        self.max_depth = self.max_depth.max(self.stack.len());
    }

    fn restore(&mut self) {
        debug_assert!(!self.stack.is_empty(), "restore called without matching save");
        match self.stack.pop() {
            Some(state) => {
                self.current = state;
                self.push(DrawCmd::Restore);
            }
            None => self.unbalanced_restores += 1,
        }
    }

    #[inline]
    fn depth(&self) -> usize {
        self.stack.len()
    }

    #[inline]
    fn transform(&self) -> Affine {
        self.current.transform
    }

    #[inline]
    fn set_transform(&mut self, m: Affine) {
        self.current.transform = m;
    }

    fn clip_path(&mut self, path: &Path) {
        self.current.clip_depth += 1;
        self.push(DrawCmd::Clip(path.clone()));
    }

    fn fill_path(&mut self, path: &Path, color: Color) {
        self.push(DrawCmd::Fill { path: path.clone(), color });
    }

    fn stroke_path(&mut self, path: &Path, pen: &Pen) {
        self.push(DrawCmd::Stroke { path: path.clone(), pen: pen.clone() });
    }

    fn draw_text(&mut self, text: &str, font: &FontSpec, at: Vec2, anchor: TextAnchor, color: Color) {
        let size = self.measure_text(text, font);
        self.push(DrawCmd::Text {
            text: text.to_owned(),
            font: font.clone(),
            origin: at + anchor.offset(size),
            size,
            color,
        });
    }

    fn measure_text(&self, text: &str, font: &FontSpec) -> Vec2 {
        match &self.fonts {
            Some(fonts) => fonts.measure_text(text, &font.family, font.size),
            None => approx_text_size(text, font.size),
        }
    }

    fn draw_image(&mut self, image: &Bitmap, dest: Rect, opacity: f32) {
        self.push(DrawCmd::Image {
            dest,
            width: image.width(),
            height: image.height(),
            opacity,
        });
    }

    fn insert_debug_marker(&mut self, label: &str) {
        self.push(DrawCmd::Marker(label.to_owned()));
    }
}
