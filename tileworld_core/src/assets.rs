use log::{debug, warn};
use rustc_hash::FxHashMap;
use tileworld_ids::ImageId;

/// Backend that actually decodes/uploads an image and issues a handle for it.
/// The cache never sees pixels, only ids.
pub trait ImageLoader {
    fn load(&mut self, path: &str) -> anyhow::Result<ImageId>;
}

/// Idempotent path → handle cache with a fallback policy: repeated loads of
/// the same path return the cached handle, and a failed load yields the
/// fallback handle instead of an error.
pub struct ImageCache {
    loader: Box<dyn ImageLoader>,
    by_path: FxHashMap<String, ImageId>,
    fallback: ImageId,
}

impl ImageCache {
    /// Builds the cache and eagerly loads the fallback image. If even the
    /// fallback fails, the nil handle stands in (the renderer skips nil
    /// handles, so frames still draw).
    pub fn new(mut loader: Box<dyn ImageLoader>, fallback_path: &str) -> Self {
        let fallback = match loader.load(fallback_path) {
            Ok(id) => id,
            Err(err) => {
                warn!("failed to load fallback image '{fallback_path}': {err}");
                ImageId::nil()
            }
        };
        Self {
            loader,
            by_path: FxHashMap::default(),
            fallback,
        }
    }

    /// Loads an image, returning the cached handle when available and the
    /// fallback handle on loader failure. Failures are not cached, so a path
    /// that becomes loadable later will be retried.
    pub fn load_image(&mut self, path: &str) -> ImageId {
        if let Some(&id) = self.by_path.get(path) {
            return id;
        }

        match self.loader.load(path) {
            Ok(id) => {
                debug!("loaded image '{path}' -> {id}");
                self.by_path.insert(path.to_string(), id);
                id
            }
            Err(err) => {
                warn!("failed to load image '{path}', using fallback: {err}");
                self.fallback
            }
        }
    }

    pub fn fallback(&self) -> ImageId {
        self.fallback
    }

    pub fn is_cached(&self, path: &str) -> bool {
        self.by_path.contains_key(path)
    }
}
