use html_escape::decode_html_entities;
use std::fmt;

use crate::error::MatchError;
use crate::model::Source;

mod flat;
mod keyed;

pub use self::flat::{FlatCatalog, FlatRecipe};
pub use self::keyed::{KeyedCatalog, KeyedRecipe, VideoIndex};

/// Uniform read-only view of one recipe, whatever shape its catalog stores it in
pub trait CatalogRecipe: fmt::Debug + Send + Sync {
    fn display_name(&self) -> &str;
    /// Ingredient strings in catalog order
    fn ingredient_names(&self) -> Vec<&str>;
    fn display_instructions(&self) -> Vec<&str>;
    fn url(&self) -> Option<&str>;
}

/// A recipe source the matching engine can enumerate.
///
/// Scoring, substitution and ranking only ever go through this trait, so they
/// never branch on how a catalog is laid out.
pub trait RecipeCatalog: Send + Sync {
    fn source(&self) -> Source;

    /// Recipes in enumeration order
    fn list_recipes(&self) -> Vec<&dyn CatalogRecipe>;

    /// Case-insensitive, trimmed, exact-name lookup
    fn search_by_name(&self, name: &str) -> Result<&dyn CatalogRecipe, MatchError> {
        let wanted = normalize_name(name);
        self.list_recipes()
            .into_iter()
            .find(|recipe| normalize_name(recipe.display_name()) == wanted)
            .ok_or_else(|| MatchError::not_found(name))
    }

    fn is_empty(&self) -> bool {
        self.list_recipes().is_empty()
    }
}

pub(crate) fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

pub(crate) fn decode_html_symbols(text: &str) -> String {
    // scraped data is sometimes escaped twice
    decode_html_entities(&decode_html_entities(text)).into_owned()
}
