use std::fmt;
use std::path::Path as FsPath;

use resvg::tiny_skia as sk;
use resvg::usvg;

/// Error returned by [`Bitmap::load`].
#[derive(Debug)]
pub enum BitmapError {
    Io(std::io::Error),
    Decode(String),
    /// Decoded fine but has zero width or height.
    Empty,
}

impl fmt::Display for BitmapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BitmapError::Io(e) => write!(f, "image read error: {e}"),
            BitmapError::Decode(msg) => write!(f, "image decode error: {msg}"),
            BitmapError::Empty => f.write_str("image has zero size"),
        }
    }
}

impl std::error::Error for BitmapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BitmapError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for BitmapError {
    fn from(e: std::io::Error) -> Self {
        BitmapError::Io(e)
    }
}

/// Decoded, premultiplied RGBA image ready for drawing.
#[derive(Clone)]
pub struct Bitmap {
    pixmap: sk::Pixmap,
}

impl Bitmap {
    /// Builds a bitmap from straight-alpha RGBA bytes.
    ///
    /// Returns `None` if the size is zero or `data` is not `width * height * 4` bytes.
    pub fn from_rgba8(width: u32, height: u32, data: &[u8]) -> Option<Self> {
        if data.len() != (width as usize) * (height as usize) * 4 {
            return None;
        }
        let mut pixmap = sk::Pixmap::new(width, height)?;
        for (dst, src) in pixmap.pixels_mut().iter_mut().zip(data.chunks_exact(4)) {
            *dst = sk::ColorU8::from_rgba(src[0], src[1], src[2], src[3]).premultiply();
        }
        Some(Self { pixmap })
    }

    /// Reads and decodes an image file.
    ///
    /// `.svg` files are rendered at their intrinsic size with resvg; anything
    /// else goes through the `image` decoders.
    pub fn load(path: &FsPath) -> Result<Self, BitmapError> {
        let bytes = std::fs::read(path)?;
        let is_svg = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));
        if is_svg {
            Self::decode_svg(&bytes)
        } else {
            Self::decode_raster(&bytes)
        }
    }

    fn decode_raster(bytes: &[u8]) -> Result<Self, BitmapError> {
        let rgba = image::load_from_memory(bytes)
            .map_err(|e| BitmapError::Decode(e.to_string()))?
            .to_rgba8();
        Self::from_rgba8(rgba.width(), rgba.height(), rgba.as_raw()).ok_or(BitmapError::Empty)
    }

    fn decode_svg(bytes: &[u8]) -> Result<Self, BitmapError> {
        let tree = usvg::Tree::from_data(bytes, &usvg::Options::default())
            .map_err(|e| BitmapError::Decode(e.to_string()))?;
        let size = tree.size().to_int_size();
        let mut pixmap = sk::Pixmap::new(size.width(), size.height()).ok_or(BitmapError::Empty)?;
        resvg::render(&tree, sk::Transform::default(), &mut pixmap.as_mut());
        Ok(Self { pixmap })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    #[inline]
    pub(crate) fn pixmap(&self) -> &sk::Pixmap {
        &self.pixmap
    }
}

impl fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bitmap")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}
