use log::debug;
use serde::Deserialize;

use super::{decode_html_symbols, CatalogRecipe, RecipeCatalog};
use crate::error::MatchError;
use crate::model::Source;

/// Recipe as stored in the flat list catalog
#[derive(Debug, Clone, PartialEq)]
pub struct FlatRecipe {
    pub name: String,
    pub url: Option<String>,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawFlatRecipe {
    #[serde(default)]
    name: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    ingredients: Vec<String>,
    #[serde(default)]
    steps: StepsType,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StepsType {
    String(String),
    Multiple(Vec<String>),
}

impl Default for StepsType {
    fn default() -> Self {
        StepsType::Multiple(Vec::new())
    }
}

impl From<RawFlatRecipe> for FlatRecipe {
    fn from(raw: RawFlatRecipe) -> Self {
        FlatRecipe {
            name: decode_html_symbols(&raw.name),
            url: raw.url.filter(|url| !url.trim().is_empty()),
            ingredients: raw
                .ingredients
                .iter()
                .map(|ing| decode_html_symbols(ing))
                .collect(),
            steps: match raw.steps {
                StepsType::String(step) => vec![decode_html_symbols(&step)],
                StepsType::Multiple(steps) => {
                    steps.iter().map(|step| decode_html_symbols(step)).collect()
                }
            },
        }
    }
}

impl CatalogRecipe for FlatRecipe {
    fn display_name(&self) -> &str {
        &self.name
    }

    fn ingredient_names(&self) -> Vec<&str> {
        self.ingredients.iter().map(String::as_str).collect()
    }

    fn display_instructions(&self) -> Vec<&str> {
        self.steps.iter().map(String::as_str).collect()
    }

    fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }
}

/// Catalog stored as a JSON array of `{name, url, ingredients, steps}` records
#[derive(Debug, Clone, Default)]
pub struct FlatCatalog {
    recipes: Vec<FlatRecipe>,
}

impl FlatCatalog {
    pub fn new(recipes: Vec<FlatRecipe>) -> Self {
        Self { recipes }
    }

    pub fn from_json(json: &str) -> Result<Self, MatchError> {
        let raw: Vec<RawFlatRecipe> = serde_json::from_str(json)?;
        let recipes: Vec<FlatRecipe> = raw.into_iter().map(FlatRecipe::from).collect();
        debug!("Parsed {} flat catalog recipes", recipes.len());
        Ok(Self { recipes })
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

impl RecipeCatalog for FlatCatalog {
    fn source(&self) -> Source {
        Source::BbcGoodFood
    }

    fn list_recipes(&self) -> Vec<&dyn CatalogRecipe> {
        self.recipes
            .iter()
            .map(|recipe| recipe as &dyn CatalogRecipe)
            .collect()
    }
}
