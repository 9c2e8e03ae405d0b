use log::{debug, warn};
use serde::Deserialize;
use serde_json::{Map, Value};

use super::{decode_html_symbols, normalize_name, CatalogRecipe, RecipeCatalog};
use crate::error::MatchError;
use crate::model::Source;

/// Recipe from the name-keyed catalog, with its ingredient sections flattened
#[derive(Debug, Clone, PartialEq)]
pub struct KeyedRecipe {
    pub name: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub video_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawKeyedRecipe {
    #[serde(default)]
    ingredient_sections: Vec<IngredientSection>,
    #[serde(default)]
    instructions: Vec<Instruction>,
}

#[derive(Debug, Deserialize)]
struct IngredientSection {
    #[serde(default)]
    ingredients: Vec<IngredientRecord>,
}

#[derive(Debug, Deserialize)]
struct IngredientRecord {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Instruction {
    #[serde(default)]
    display_text: Option<String>,
}

impl KeyedRecipe {
    fn from_raw(name: &str, raw: RawKeyedRecipe) -> Self {
        KeyedRecipe {
            name: decode_html_symbols(name),
            ingredients: raw
                .ingredient_sections
                .into_iter()
                .flat_map(|section| section.ingredients)
                .filter_map(|record| record.name)
                .filter(|name| !name.trim().is_empty())
                .map(|name| decode_html_symbols(&name))
                .collect(),
            instructions: raw
                .instructions
                .into_iter()
                .filter_map(|instruction| instruction.display_text)
                .map(|text| decode_html_symbols(&text))
                .collect(),
            video_url: None,
        }
    }
}

impl CatalogRecipe for KeyedRecipe {
    fn display_name(&self) -> &str {
        &self.name
    }

    fn ingredient_names(&self) -> Vec<&str> {
        self.ingredients.iter().map(String::as_str).collect()
    }

    fn display_instructions(&self) -> Vec<&str> {
        self.instructions.iter().map(String::as_str).collect()
    }

    fn url(&self) -> Option<&str> {
        self.video_url.as_deref()
    }
}

/// Catalog stored as a JSON object mapping recipe name to a record with nested
/// `ingredient_sections` and `instructions`
#[derive(Debug, Clone, Default)]
pub struct KeyedCatalog {
    recipes: Vec<KeyedRecipe>,
}

impl KeyedCatalog {
    pub fn new(recipes: Vec<KeyedRecipe>) -> Self {
        Self { recipes }
    }

    /// Parse the catalog, keeping the key order of the file.
    ///
    /// A malformed entry is skipped with a warning instead of failing the
    /// whole catalog.
    pub fn from_json(json: &str) -> Result<Self, MatchError> {
        let map: Map<String, Value> = serde_json::from_str(json)?;
        let mut recipes = Vec::with_capacity(map.len());
        for (name, value) in map {
            match serde_json::from_value::<RawKeyedRecipe>(value) {
                Ok(raw) => recipes.push(KeyedRecipe::from_raw(&name, raw)),
                Err(e) => warn!("Skipping malformed recipe '{}': {}", name, e),
            }
        }
        debug!("Parsed {} keyed catalog recipes", recipes.len());
        Ok(Self { recipes })
    }

    /// Attach video urls from the index to every recipe
    pub fn with_video_urls(mut self, index: &VideoIndex) -> Self {
        for recipe in &mut self.recipes {
            recipe.video_url = index.resolve(&recipe.name).map(String::from);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

impl RecipeCatalog for KeyedCatalog {
    fn source(&self) -> Source {
        Source::Tasty
    }

    fn list_recipes(&self) -> Vec<&dyn CatalogRecipe> {
        self.recipes
            .iter()
            .map(|recipe| recipe as &dyn CatalogRecipe)
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct VideoEntry {
    name: Option<String>,
    video_url: Option<String>,
}

/// Recipe name -> video url index for the keyed catalog
#[derive(Debug, Clone, Default)]
pub struct VideoIndex {
    entries: Vec<(String, String)>,
}

impl VideoIndex {
    pub fn from_json(json: &str) -> Result<Self, MatchError> {
        let raw: Vec<VideoEntry> = serde_json::from_str(json)?;
        let entries = raw
            .into_iter()
            .filter_map(|entry| match (entry.name, entry.video_url) {
                (Some(name), Some(url)) => Some((normalize_name(&name), url)),
                _ => None,
            })
            .collect();
        Ok(Self { entries })
    }

    /// Exact normalized name first, then the first entry in a substring
    /// relation with the name
    pub fn resolve(&self, recipe_name: &str) -> Option<&str> {
        let wanted = normalize_name(recipe_name);
        self.entries
            .iter()
            .find(|(name, _)| *name == wanted)
            .or_else(|| {
                self.entries
                    .iter()
                    .find(|(name, _)| wanted.contains(name.as_str()) || name.contains(&wanted))
            })
            .map(|(_, url)| url.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
