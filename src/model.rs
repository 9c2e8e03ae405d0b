use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use crate::catalog::CatalogRecipe;

/// Which recipe catalog a recipe came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Source {
    /// Flat list catalog (BBC Good Food)
    #[serde(rename = "BBC Goodfood")]
    BbcGoodFood,
    /// Name-keyed catalog with nested ingredient sections (Tasty)
    #[serde(rename = "Tasty")]
    Tasty,
}

impl Source {
    pub fn label(&self) -> &'static str {
        match self {
            Source::BbcGoodFood => "BBC Goodfood",
            Source::Tasty => "Tasty",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Source {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bbc" | "bbc_goodfood" | "bbc goodfood" | "bbc good food" => Ok(Source::BbcGoodFood),
            "tasty" => Ok(Source::Tasty),
            other => Err(format!("Unknown recipe source: {}", other)),
        }
    }
}

/// Resolved display fields of a single recipe.
///
/// This is the record handed to the persistence layer; it owns its data so it
/// outlives the catalog snapshot it was read from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeDetails {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default, alias = "instructions")]
    pub steps: Vec<String>,
    pub source: Source,
}

impl RecipeDetails {
    pub fn from_recipe(recipe: &dyn CatalogRecipe, source: Source) -> Self {
        RecipeDetails {
            name: recipe.display_name().to_string(),
            url: recipe.url().map(String::from),
            ingredients: recipe
                .ingredient_names()
                .into_iter()
                .map(String::from)
                .collect(),
            steps: recipe
                .display_instructions()
                .into_iter()
                .map(String::from)
                .collect(),
            source,
        }
    }
}

/// Outcome of matching one query against one recipe.
///
/// Created fresh for every search and never written back into the catalog.
#[derive(Debug, Clone)]
pub struct MatchResult<'a> {
    pub recipe: &'a dyn CatalogRecipe,
    pub source: Source,
    /// User token spellings that matched a recipe ingredient
    pub matched_ingredients: BTreeSet<String>,
    pub total_ingredient_count: usize,
    /// Unmatched recipe ingredient -> substitute names; only non-empty hits
    pub substitutions: BTreeMap<String, Vec<String>>,
}

impl<'a> MatchResult<'a> {
    pub fn name(&self) -> &'a str {
        self.recipe.display_name()
    }

    pub fn matched_count(&self) -> usize {
        self.matched_ingredients.len()
    }

    /// Matched count over total ingredient count, 0 when the recipe has no ingredients
    pub fn match_ratio(&self) -> f64 {
        if self.total_ingredient_count == 0 {
            return 0.0;
        }
        self.matched_count() as f64 / self.total_ingredient_count as f64
    }

    pub fn details(&self) -> RecipeDetails {
        RecipeDetails::from_recipe(self.recipe, self.source)
    }
}
