//! Background and world images.
//!
//! The cache knows a fixed set of names. [`ResourceCache::ensure_loaded`]
//! records where each one lives exactly once; pixels are decoded the first
//! time a pass asks for them and kept for the life of the cache. A missing or
//! corrupt file therefore only fails the pass that draws it.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use state::InitCell;

use starmap_engine::coords::Rect;
use starmap_engine::raster::Bitmap;

use crate::error::ResourceError;

pub const BACKGROUND_IMAGES: [&str; 4] = ["Nebula", "Galaxy", "Galaxy_Gray", "Rifts"];

pub const WORLD_IMAGES: [&str; 12] = [
    "Hyd0", "Hyd1", "Hyd2", "Hyd3", "Hyd4", "Hyd5", "Hyd6", "Hyd7", "Hyd8", "Hyd9", "HydA", "Belt",
];

/// World rectangle the galaxy backdrop is stretched over.
pub const GALAXY_RECT: Rect = Rect::new(-18257.0, -26234.0, 36551.0, 32462.0);

/// World rectangle of the rift overlay.
pub const RIFT_RECT: Rect = Rect::new(-1374.0, -827.0, 2769.0, 1754.0);

/// Extensions probed in order when recording a location.
const EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "svg"];

pub struct ResourceCache {
    root: PathBuf,
    locations: InitCell<HashMap<&'static str, PathBuf>>,
    decoded: Mutex<HashMap<&'static str, Arc<Bitmap>>>,
}

static SHARED: InitCell<ResourceCache> = InitCell::new();

impl ResourceCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            locations: InitCell::new(),
            decoded: Mutex::new(HashMap::new()),
        }
    }

    /// Process-wide cache. The first caller's `root` wins; later roots are ignored.
    pub fn shared(root: &Path) -> &'static ResourceCache {
        let cache = SHARED.get_or_init(|| ResourceCache::new(root));
        if cache.root != root {
            log::debug!(
                "shared resource cache already rooted at {}, ignoring {}",
                cache.root.display(),
                root.display()
            );
        }
        cache
    }

    #[inline]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Records image locations. Runs once; concurrent first callers wait for it.
    pub fn ensure_loaded(&self) {
        self.locations.get_or_init(|| {
            let map: HashMap<_, _> = BACKGROUND_IMAGES
                .iter()
                .chain(WORLD_IMAGES.iter())
                .map(|&name| (name, self.locate(name)))
                .collect();
            log::debug!("resource locations recorded under {}", self.root.display());
            map
        });
    }

    #[inline]
    pub fn is_loaded(&self) -> bool {
        self.locations.try_get().is_some()
    }

    /// Where `name` is read from, once [`ensure_loaded`](Self::ensure_loaded) ran.
    pub fn location(&self, name: &str) -> Option<&Path> {
        self.locations.try_get()?.get(name).map(PathBuf::as_path)
    }

    /// Decoded image for `name`, decoding on first use.
    pub fn get(&self, name: &str) -> Result<Arc<Bitmap>, ResourceError> {
        self.ensure_loaded();
        let Some((&key, path)) = self
            .locations
            .try_get()
            .and_then(|m| m.get_key_value(name))
        else {
            return Err(ResourceError::Unknown(name.to_owned()));
        };

        if let Some(hit) = self.lock().get(key) {
            return Ok(Arc::clone(hit));
        }

        // Decode outside the lock; a racing decode of the same image is harmless.
        let bitmap = Bitmap::load(path).map_err(|source| ResourceError::Decode {
            name: name.to_owned(),
            source,
        })?;
        log::debug!("decoded {name} ({}x{})", bitmap.width(), bitmap.height());
        let mut decoded = self.lock();
        Ok(Arc::clone(decoded.entry(key).or_insert_with(|| Arc::new(bitmap))))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<&'static str, Arc<Bitmap>>> {
        self.decoded.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn locate(&self, name: &str) -> PathBuf {
        EXTENSIONS
            .iter()
            .map(|ext| self.root.join(format!("{name}.{ext}")))
            .find(|p| p.is_file())
            .unwrap_or_else(|| self.root.join(format!("{name}.png")))
    }
}

impl std::fmt::Debug for ResourceCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceCache")
            .field("root", &self.root)
            .field("loaded", &self.is_loaded())
            .finish()
    }
}
