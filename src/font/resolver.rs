use std::{collections::HashMap, sync::Arc};

use parking_lot::{Mutex, RwLock};

use super::Font;
use crate::{
    config::{FontCandidate, FontConfig, FontSpec},
    font_storage::FontStorage,
};

/// Maps logical font names to loaded fonts at a pixel size.
///
/// Resolution walks the family's candidates, then the global fallbacks, then
/// settles on the built-in bitmap font, so it never fails. Results are cached
/// for the lifetime of the resolver, keyed by canonical name and pixel size.
pub struct FontResolver {
    config: FontConfig,
    storage: Mutex<FontStorage>,
    cache: RwLock<HashMap<(Arc<str>, u32), Font, fxhash::FxBuildHasher>>,
}

impl FontResolver {
    pub fn new(config: FontConfig) -> Self {
        let storage = FontStorage::new(config.load_system_fonts);
        Self {
            config,
            storage: Mutex::new(storage),
            cache: RwLock::new(HashMap::with_hasher(fxhash::FxBuildHasher::default())),
        }
    }

    /// Resolves `logical_name` at `pixel_size`. Sizes are rounded to whole
    /// pixels and clamped to at least 1.
    pub fn resolve(&self, logical_name: &str, pixel_size: f32) -> Font {
        let size = if pixel_size.is_finite() {
            pixel_size.round().max(1.0) as u32
        } else {
            1
        };
        let spec = self.spec_for(logical_name);
        let family: Arc<str> = match spec {
            Some(spec) => Arc::from(spec.name.as_str()),
            None => Arc::from(super::builtin::FAMILY),
        };

        let key = (Arc::clone(&family), size);
        if let Some(font) = self.cache.read().get(&key) {
            return font.clone();
        }

        let font = self.load(spec, family, size as f32);
        self.cache.write().insert(key, font.clone());
        font
    }

    /// Canonical family name `logical_name` resolves to.
    pub fn canonical_name(&self, logical_name: &str) -> String {
        self.spec_for(logical_name)
            .map(|spec| spec.name.clone())
            .unwrap_or_else(|| super::builtin::FAMILY.to_string())
    }

    /// Number of cached (name, size) entries.
    pub fn cached_len(&self) -> usize {
        self.cache.read().len()
    }

    fn spec_for(&self, logical_name: &str) -> Option<&FontSpec> {
        let name = logical_name.trim().to_lowercase();
        let name = self
            .config
            .aliases
            .get(&name)
            .map(String::as_str)
            .unwrap_or(name.as_str());

        self.config
            .families
            .iter()
            .find(|spec| spec.name == name)
            .or_else(|| {
                log::debug!(
                    "unknown font '{}', using default family '{}'",
                    logical_name,
                    self.config.default_family
                );
                self.config
                    .families
                    .iter()
                    .find(|spec| spec.name == self.config.default_family)
            })
    }

    fn load(&self, spec: Option<&FontSpec>, family: Arc<str>, size: f32) -> Font {
        let mut storage = self.storage.lock();

        let own = spec.map(|spec| spec.candidates.as_slice()).unwrap_or(&[]);
        for candidate in own.iter().chain(self.config.fallbacks.iter()) {
            if let Some(font) = Self::try_candidate(&mut storage, candidate, &family, size) {
                log::debug!("resolved font '{}' at {}px from {:?}", family, size, candidate);
                return font;
            }
        }

        log::warn!(
            "no loadable candidate for font '{}', using the built-in bitmap font",
            family
        );
        Font::builtin(size)
    }

    fn try_candidate(
        storage: &mut FontStorage,
        candidate: &FontCandidate,
        family: &Arc<str>,
        size: f32,
    ) -> Option<Font> {
        let (id, font) = match candidate {
            FontCandidate::Path(path) => {
                let id = storage.load_font_path(path)?;
                (id, storage.font(id)?)
            }
            FontCandidate::Family { name, bold } => storage.query_family(name, *bold)?,
        };
        Font::outline(Arc::clone(family), id, font, size)
    }
}
