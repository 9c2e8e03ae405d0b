//! Loading collaborator for catalogs.
//!
//! Every loader degrades to an empty value on a missing or unreadable file so
//! a bad data file never stops a session; the failure is only logged.

use log::{debug, warn};
use std::fs;
use std::path::Path;

use crate::catalog::{FlatCatalog, KeyedCatalog, VideoIndex};
use crate::error::MatchError;
use crate::substitutions::SubstitutionCatalog;

fn load_or_default<T, F>(path: &Path, what: &str, parse: F) -> T
where
    T: Default,
    F: FnOnce(&str) -> Result<T, MatchError>,
{
    let loaded = fs::read_to_string(path)
        .map_err(MatchError::from)
        .and_then(|text| parse(&text));
    match loaded {
        Ok(value) => {
            debug!("Loaded {} from {}", what, path.display());
            value
        }
        Err(e) => {
            warn!("Error loading {} from {}: {}", what, path.display(), e);
            T::default()
        }
    }
}

pub fn load_flat_catalog(path: &Path) -> FlatCatalog {
    load_or_default(path, "flat recipe catalog", FlatCatalog::from_json)
}

pub fn load_video_index(path: &Path) -> VideoIndex {
    load_or_default(path, "video url index", VideoIndex::from_json)
}

/// Load the keyed catalog and attach video urls when an index path is given
pub fn load_keyed_catalog(path: &Path, video_urls: Option<&Path>) -> KeyedCatalog {
    let catalog = load_or_default(path, "keyed recipe catalog", KeyedCatalog::from_json);
    match video_urls {
        Some(index_path) => catalog.with_video_urls(&load_video_index(index_path)),
        None => catalog,
    }
}

pub fn load_substitutions(path: &Path) -> SubstitutionCatalog {
    load_or_default(path, "substitution catalog", SubstitutionCatalog::from_json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_json(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_missing_file_is_empty() {
        let catalog = load_flat_catalog(Path::new("/definitely/not/here.json"));
        assert!(catalog.is_empty());
        assert!(load_substitutions(Path::new("/definitely/not/here.json")).is_empty());
    }

    #[test]
    fn test_corrupt_file_is_empty() {
        let file = temp_json("[{\"name\": ");
        assert!(load_flat_catalog(file.path()).is_empty());
        assert!(load_keyed_catalog(file.path(), None).is_empty());
    }

    #[test]
    fn test_loads_flat_catalog() {
        let file = temp_json(r#"[{"name": "Pizza", "ingredients": ["flour"]}]"#);
        assert_eq!(load_flat_catalog(file.path()).len(), 1);
    }

    #[test]
    fn test_loads_keyed_catalog_with_videos() {
        use crate::catalog::{CatalogRecipe, RecipeCatalog};

        let recipes = temp_json(r#"{"Tacos": {"ingredient_sections": []}}"#);
        let videos = temp_json(r#"[{"name": "tacos", "video_url": "https://v.example/t"}]"#);
        let catalog = load_keyed_catalog(recipes.path(), Some(videos.path()));
        assert_eq!(
            catalog.list_recipes()[0].url(),
            Some("https://v.example/t")
        );
    }
}
