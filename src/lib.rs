//! Match the ingredients a user has against recipe catalogs.
//!
//! Free-text input is split into ingredient tokens, every recipe is scored by
//! how many tokens it uses, unmatched ingredients get substitution hints, and
//! recipes are ranked best match first.

pub mod catalog;
pub mod config;
pub mod error;
pub mod finder;
pub mod loader;
pub mod matcher;
pub mod model;
pub mod ranker;
pub mod resolver;
pub mod scorer;
pub mod store;
pub mod substitutions;
pub mod tokenizer;

pub use self::catalog::{CatalogRecipe, FlatCatalog, FlatRecipe, KeyedCatalog, KeyedRecipe, RecipeCatalog, VideoIndex};
pub use self::config::{MatcherConfig, SearchOptions};
pub use self::error::MatchError;
pub use self::finder::{RecipeFinder, RecipeFinderBuilder};
pub use self::model::{MatchResult, RecipeDetails, Source};
pub use self::store::SavedRecipeStore;
pub use self::substitutions::SubstitutionCatalog;
pub use self::tokenizer::{tokenize, IngredientToken};
