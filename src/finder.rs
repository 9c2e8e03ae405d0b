use log::debug;

use crate::catalog::{CatalogRecipe, FlatCatalog, KeyedCatalog, RecipeCatalog};
use crate::config::{MatcherConfig, SearchOptions};
use crate::error::MatchError;
use crate::loader;
use crate::matcher::IngredientPattern;
use crate::model::{MatchResult, RecipeDetails, Source};
use crate::ranker;
use crate::resolver;
use crate::scorer::{self, compile_patterns};
use crate::substitutions::SubstitutionCatalog;
use crate::tokenizer::{tokenize, IngredientToken};

/// Query entry point over an immutable snapshot of catalogs.
///
/// Every query builds its own results, so a finder can be shared freely
/// between threads.
pub struct RecipeFinder {
    catalogs: Vec<Box<dyn RecipeCatalog>>,
    substitutions: SubstitutionCatalog,
    options: SearchOptions,
}

impl RecipeFinder {
    /// Creates a new builder for assembling a finder
    ///
    /// # Example
    /// ```
    /// use recipe_matcher::{FlatCatalog, RecipeFinder};
    ///
    /// let finder = RecipeFinder::builder()
    ///     .flat_catalog(FlatCatalog::default())
    ///     .build()
    ///     .unwrap();
    /// assert!(finder.find_matches("flour", "salt").unwrap().is_empty());
    /// ```
    pub fn builder() -> RecipeFinderBuilder {
        RecipeFinderBuilder::default()
    }

    /// Load every catalog named in the configuration.
    ///
    /// Missing data files produce empty catalogs rather than errors.
    pub fn from_config(config: &MatcherConfig) -> Result<Self, MatchError> {
        let data = &config.data;
        Self::builder()
            .flat_catalog(loader::load_flat_catalog(&data.flat_recipes))
            .keyed_catalog(loader::load_keyed_catalog(
                &data.keyed_recipes,
                Some(&data.video_urls),
            ))
            .substitutions(loader::load_substitutions(&data.substitutions))
            .options(config.search.clone())
            .build()
    }

    /// Tokenize the two input fields and rank every recipe of every catalog
    pub fn find_matches(
        &self,
        primary: &str,
        secondary: &str,
    ) -> Result<Vec<MatchResult<'_>>, MatchError> {
        let tokens = tokenize(primary, secondary)?;
        self.match_tokens(&tokens)
    }

    /// Same as [`find_matches`](Self::find_matches), restricted to one source
    pub fn find_matches_in(
        &self,
        source: Source,
        primary: &str,
        secondary: &str,
    ) -> Result<Vec<MatchResult<'_>>, MatchError> {
        let tokens = tokenize(primary, secondary)?;
        self.search(self.catalogs_for(Some(source)), &tokens)
    }

    /// Rank all recipes against already tokenized input
    pub fn match_tokens(
        &self,
        tokens: &[IngredientToken],
    ) -> Result<Vec<MatchResult<'_>>, MatchError> {
        self.search(self.catalogs_for(None), tokens)
    }

    /// Exact, case-insensitive name lookup across catalogs in registration order
    pub fn find_by_name(&self, name: &str) -> Result<RecipeDetails, MatchError> {
        self.lookup(None, name)
    }

    pub fn find_by_name_in(&self, source: Source, name: &str) -> Result<RecipeDetails, MatchError> {
        self.lookup(Some(source), name)
    }

    /// Substitutes for a single ingredient, if the catalog knows any
    pub fn substitutes_for(&self, ingredient: &str) -> Option<&[String]> {
        self.substitutions.lookup(ingredient)
    }

    pub fn catalog(&self, source: Source) -> Option<&dyn RecipeCatalog> {
        self.catalogs_for(Some(source)).into_iter().next()
    }

    fn catalogs_for(&self, source: Option<Source>) -> Vec<&dyn RecipeCatalog> {
        self.catalogs
            .iter()
            .map(|catalog| catalog.as_ref())
            .filter(|catalog| source.map_or(true, |s| catalog.source() == s))
            .collect()
    }

    fn lookup(&self, source: Option<Source>, name: &str) -> Result<RecipeDetails, MatchError> {
        self.catalogs_for(source)
            .into_iter()
            .find_map(|catalog| {
                catalog
                    .search_by_name(name)
                    .ok()
                    .map(|recipe| RecipeDetails::from_recipe(recipe, catalog.source()))
            })
            .ok_or_else(|| MatchError::not_found(name))
    }

    fn search<'a>(
        &'a self,
        catalogs: Vec<&'a dyn RecipeCatalog>,
        tokens: &[IngredientToken],
    ) -> Result<Vec<MatchResult<'a>>, MatchError> {
        let patterns = compile_patterns(tokens)?;
        let recipes: Vec<(Source, &'a dyn CatalogRecipe)> = catalogs
            .into_iter()
            .flat_map(|catalog| {
                let source = catalog.source();
                catalog
                    .list_recipes()
                    .into_iter()
                    .map(move |recipe| (source, recipe))
            })
            .collect();

        let scored = self.evaluate_all(&recipes, &patterns, tokens);
        let total = scored.len();

        let mut ranked: Vec<MatchResult<'a>> = ranker::rank(scored)
            .into_iter()
            .filter(|result| result.matched_count() >= self.options.min_matched)
            .collect();
        if let Some(limit) = self.options.limit {
            ranked.truncate(limit);
        }

        debug!(
            "Scored {} recipes for {} tokens, returning {}",
            total,
            tokens.len(),
            ranked.len()
        );
        Ok(ranked)
    }

    #[cfg(not(feature = "parallel"))]
    fn evaluate_all<'a>(
        &self,
        recipes: &[(Source, &'a dyn CatalogRecipe)],
        patterns: &[IngredientPattern],
        tokens: &[IngredientToken],
    ) -> Vec<MatchResult<'a>> {
        recipes
            .iter()
            .map(|(source, recipe)| self.evaluate(*source, *recipe, patterns, tokens))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn evaluate_all<'a>(
        &self,
        recipes: &[(Source, &'a dyn CatalogRecipe)],
        patterns: &[IngredientPattern],
        tokens: &[IngredientToken],
    ) -> Vec<MatchResult<'a>> {
        use rayon::prelude::*;

        // indexed collect keeps catalog order for the stable sort
        recipes
            .par_iter()
            .map(|(source, recipe)| self.evaluate(*source, *recipe, patterns, tokens))
            .collect()
    }

    fn evaluate<'a>(
        &self,
        source: Source,
        recipe: &'a dyn CatalogRecipe,
        patterns: &[IngredientPattern],
        tokens: &[IngredientToken],
    ) -> MatchResult<'a> {
        let score = scorer::score(recipe, patterns);
        let substitutions = resolver::resolve(
            &self.substitutions,
            &recipe.ingredient_names(),
            &score.matched_ingredients,
            tokens,
        );
        MatchResult {
            recipe,
            source,
            matched_ingredients: score.matched_ingredients,
            total_ingredient_count: score.total_ingredient_count,
            substitutions,
        }
    }
}

/// Builder for configuring a [`RecipeFinder`]
#[derive(Default)]
pub struct RecipeFinderBuilder {
    catalogs: Vec<Box<dyn RecipeCatalog>>,
    substitutions: SubstitutionCatalog,
    options: SearchOptions,
}

impl RecipeFinderBuilder {
    /// Register any catalog; search order follows registration order
    pub fn catalog(mut self, catalog: impl RecipeCatalog + 'static) -> Self {
        self.catalogs.push(Box::new(catalog));
        self
    }

    pub fn flat_catalog(self, catalog: FlatCatalog) -> Self {
        self.catalog(catalog)
    }

    pub fn keyed_catalog(self, catalog: KeyedCatalog) -> Self {
        self.catalog(catalog)
    }

    pub fn substitutions(mut self, substitutions: SubstitutionCatalog) -> Self {
        self.substitutions = substitutions;
        self
    }

    pub fn options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }

    /// Drop ranked recipes with fewer matched ingredients
    pub fn min_matched(mut self, min_matched: usize) -> Self {
        self.options.min_matched = min_matched;
        self
    }

    /// Keep at most `limit` ranked recipes
    pub fn limit(mut self, limit: usize) -> Self {
        self.options.limit = Some(limit);
        self
    }

    /// # Errors
    /// Returns `MatchError::Builder` when no catalog was registered. Empty
    /// catalogs are fine.
    pub fn build(self) -> Result<RecipeFinder, MatchError> {
        if self.catalogs.is_empty() {
            return Err(MatchError::Builder(
                "No recipe catalog specified. Use .flat_catalog() or .keyed_catalog()".to_string(),
            ));
        }
        Ok(RecipeFinder {
            catalogs: self.catalogs,
            substitutions: self.substitutions,
            options: self.options,
        })
    }
}
