use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};

/// Manages font loading and retrieval using `fontdb` and `fontdue`.
///
/// This struct combines a database of available fonts (`fontdb`) with a cache of loaded
/// font instances (`fontdue`). Candidates named by path are registered on first use, system
/// families are only scanned when a family lookup actually needs them.
pub struct FontStorage {
    /// This is the font set that has been loaded by fontdb.
    font_db: fontdb::Database,
    /// This is the font that has been loaded by fontdue.
    /// Not all fonts in fontdb are necessarily loaded here.
    loaded_font: HashMap<fontdb::ID, Arc<fontdue::Font>, fxhash::FxBuildHasher>,
    /// Result of registering each candidate path, including failures.
    path_ids: HashMap<PathBuf, Option<fontdb::ID>, fxhash::FxBuildHasher>,
    allow_system_fonts: bool,
    system_fonts_loaded: bool,
}

impl Default for FontStorage {
    fn default() -> Self {
        Self::new(true)
    }
}

impl FontStorage {
    /// Creates a new empty font storage.
    ///
    /// With `allow_system_fonts` unset, family lookups only see fonts that were
    /// loaded explicitly.
    pub fn new(allow_system_fonts: bool) -> Self {
        Self {
            font_db: fontdb::Database::new(),
            loaded_font: HashMap::with_hasher(fxhash::FxBuildHasher::default()),
            path_ids: HashMap::with_hasher(fxhash::FxBuildHasher::default()),
            allow_system_fonts,
            system_fonts_loaded: false,
        }
    }
}

/// Loading fonts into fontdb.
impl FontStorage {
    /// Registers a font file and returns the id of its first face.
    ///
    /// The outcome is remembered per path, so a missing file is probed once.
    pub fn load_font_path(&mut self, path: &Path) -> Option<fontdb::ID> {
        if let Some(known) = self.path_ids.get(path) {
            return *known;
        }

        let id = if path.is_file() {
            self.font_db
                .load_font_source(fontdb::Source::File(path.to_path_buf()))
                .first()
                .copied()
        } else {
            None
        };

        if id.is_none() {
            log::debug!("font candidate {} is not loadable", path.display());
        }
        self.path_ids.insert(path.to_path_buf(), id);
        id
    }

    /// Loads the system fonts once, if allowed.
    pub fn ensure_system_fonts(&mut self) {
        if self.allow_system_fonts && !self.system_fonts_loaded {
            self.font_db.load_system_fonts();
            self.system_fonts_loaded = true;
            log::debug!("loaded {} system font faces", self.font_db.len());
        }
    }

    /// Checks if the storage is empty.
    pub fn is_empty(&self) -> bool {
        self.font_db.is_empty()
    }

    /// Returns the number of registered faces.
    pub fn len(&self) -> usize {
        self.font_db.len()
    }
}

/// Get `Font`
impl FontStorage {
    /// Looks up an installed family by name.
    ///
    /// Returns the ID and the loaded font if found.
    pub fn query_family(
        &mut self,
        name: &str,
        bold: bool,
    ) -> Option<(fontdb::ID, Arc<fontdue::Font>)> {
        self.ensure_system_fonts();

        let families = [fontdb::Family::Name(name)];
        let query = fontdb::Query {
            families: &families,
            weight: if bold {
                fontdb::Weight::BOLD
            } else {
                fontdb::Weight::NORMAL
            },
            stretch: fontdb::Stretch::Normal,
            style: fontdb::Style::Normal,
        };

        let id = self.font_db.query(&query)?;
        self.font(id).map(|font| (id, font))
    }

    /// Retrieves a loaded font by ID, parsing it if necessary.
    pub fn font(&mut self, id: fontdb::ID) -> Option<Arc<fontdue::Font>> {
        use std::collections::hash_map::Entry;

        match self.loaded_font.entry(id) {
            Entry::Occupied(entry) => Some(Arc::clone(entry.get())),
            Entry::Vacant(entry) => {
                let font_result = self.font_db.with_face_data(id, |data, index| {
                    fontdue::Font::from_bytes(
                        data,
                        fontdue::FontSettings {
                            collection_index: index,
                            scale: 40.0,
                            load_substitutions: true,
                        },
                    )
                })?;

                match font_result {
                    Ok(font) => {
                        let r: &mut Arc<fontdue::Font> = entry.insert(Arc::new(font));
                        Some(Arc::clone(r))
                    }
                    Err(e) => {
                        log::error!("Failed to load font (id: {:?}): {}", id, e);
                        None
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_path_is_remembered() {
        let mut storage = FontStorage::new(false);
        let path = Path::new("/definitely/not/a/font.ttf");

        assert_eq!(storage.load_font_path(path), None);
        assert_eq!(storage.load_font_path(path), None);
        assert_eq!(storage.path_ids.len(), 1);
        assert!(storage.is_empty());
    }

    #[test]
    fn test_family_query_without_system_fonts() {
        let mut storage = FontStorage::new(false);
        assert!(storage.query_family("Impact", true).is_none());
        assert_eq!(storage.len(), 0);
    }
}
