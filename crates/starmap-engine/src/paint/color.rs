/// Straight-alpha sRGB color.
///
/// Stylesheets and data files specify colors as `#rrggbb` bytes, and the
/// renderer frequently swaps only the alpha channel (translucent fills of an
/// otherwise opaque border color), so colors stay unpremultiplied until a
/// backend rasterizes them.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Euclidean RGB distance below which two colors read as the same.
const NOTICEABLE_DISTANCE: f32 = 32.0;

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with a replaced alpha channel.
    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Fully transparent colors are treated as "unset" by style elements.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.a == 0
    }

    /// HSL lightness in `[0, 1]`.
    pub fn brightness(self) -> f32 {
        let max = self.r.max(self.g).max(self.b) as f32;
        let min = self.r.min(self.g).min(self.b) as f32;
        (max + min) / (2.0 * 255.0)
    }

    /// Gray of equal brightness, same alpha.
    pub fn to_gray(self) -> Self {
        let v = (self.brightness() * 255.0).round() as u8;
        Self { r: v, g: v, b: v, a: self.a }
    }

    /// True when the two colors are far enough apart in RGB to be told apart.
    ///
    /// Alpha is ignored.
    pub fn noticeably_different(self, other: Color) -> bool {
        let dr = self.r as f32 - other.r as f32;
        let dg = self.g as f32 - other.g as f32;
        let db = self.b as f32 - other.b as f32;
        (dr * dr + dg * dg + db * db).sqrt() > NOTICEABLE_DISTANCE
    }

    /// Parses `#rgb`, `#rrggbb` or `#aarrggbb` (leading `#` optional).
    pub fn from_hex(s: &str) -> Option<Self> {
        let s = s.strip_prefix('#').unwrap_or(s);
        let nibble = |i: usize| u8::from_str_radix(s.get(i..i + 1)?, 16).ok();
        let byte = |i: usize| u8::from_str_radix(s.get(i..i + 2)?, 16).ok();
        match s.len() {
            3 => Some(Color::rgb(nibble(0)? * 17, nibble(1)? * 17, nibble(2)? * 17)),
            6 => Some(Color::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Color::rgba(byte(2)?, byte(4)?, byte(6)?, byte(0)?)),
            _ => None,
        }
    }

    /// Channels as `f32` in `[0, 1]`, straight alpha.
    #[inline]
    pub fn to_f32(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }
}
