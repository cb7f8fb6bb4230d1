use super::Color;

/// Line end style.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

/// Stroke description.
///
/// `dash` is expressed in multiples of `width`, the way stylesheet dash
/// styles are authored; backends scale it when stroking.
#[derive(Debug, Clone, PartialEq)]
pub struct Pen {
    pub color: Color,
    pub width: f32,
    pub dash: Option<Vec<f32>>,
    pub cap: LineCap,
}

impl Pen {
    #[inline]
    pub fn new(color: Color, width: f32) -> Self {
        Self { color, width, dash: None, cap: LineCap::Butt }
    }

    #[inline]
    pub fn with_dash(mut self, dash: Option<Vec<f32>>) -> Self {
        self.dash = dash;
        self
    }

    #[inline]
    pub fn with_cap(mut self, cap: LineCap) -> Self {
        self.cap = cap;
        self
    }

    /// Dash lengths in absolute units (pattern multiplied by the pen width).
    pub fn scaled_dash(&self) -> Option<Vec<f32>> {
        self.dash
            .as_ref()
            .map(|d| d.iter().map(|v| v * self.width).collect())
    }
}
