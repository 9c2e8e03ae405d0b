use std::collections::BTreeSet;

use crate::catalog::CatalogRecipe;
use crate::error::MatchError;
use crate::matcher::IngredientPattern;
use crate::tokenizer::IngredientToken;

/// How many of the user's ingredients one recipe uses
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Score {
    pub matched_ingredients: BTreeSet<String>,
    pub total_ingredient_count: usize,
}

impl Score {
    pub fn matched_count(&self) -> usize {
        self.matched_ingredients.len()
    }
}

/// Compile one pattern per token, in token order
pub fn compile_patterns(tokens: &[IngredientToken]) -> Result<Vec<IngredientPattern>, MatchError> {
    tokens
        .iter()
        .map(|token| IngredientPattern::new(token.as_str()))
        .collect()
}

/// Score a recipe against precompiled user patterns.
///
/// Each pattern takes the first recipe ingredient, in catalog order, that it
/// matches and that no earlier pattern already took. A repeated token is
/// skipped once it has matched, so it never takes a second ingredient.
pub fn score(recipe: &dyn CatalogRecipe, patterns: &[IngredientPattern]) -> Score {
    let ingredients = recipe.ingredient_names();
    let mut taken = vec![false; ingredients.len()];
    let mut matched_ingredients = BTreeSet::new();

    for pattern in patterns {
        if matched_ingredients.contains(pattern.token()) {
            continue;
        }
        let hit = ingredients
            .iter()
            .enumerate()
            .find(|(i, ingredient)| !taken[*i] && pattern.is_match(ingredient));
        if let Some((i, _)) = hit {
            taken[i] = true;
            matched_ingredients.insert(pattern.token().to_string());
        }
    }

    Score {
        matched_ingredients,
        total_ingredient_count: ingredients.len(),
    }
}

pub fn score_tokens(
    recipe: &dyn CatalogRecipe,
    tokens: &[IngredientToken],
) -> Result<Score, MatchError> {
    Ok(score(recipe, &compile_patterns(tokens)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FlatRecipe;
    use crate::tokenizer::tokenize;

    fn recipe(ingredients: &[&str]) -> FlatRecipe {
        FlatRecipe {
            name: "test".to_string(),
            url: None,
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
            steps: Vec::new(),
        }
    }

    #[test]
    fn test_full_match() {
        let recipe = recipe(&["flour", "sugar", "tomato", "cheese"]);
        let tokens = tokenize("flour, sugar", "tomato, cheese").unwrap();
        let score = score_tokens(&recipe, &tokens).unwrap();

        assert_eq!(score.matched_count(), 4);
        assert_eq!(score.total_ingredient_count, 4);
        let expected: BTreeSet<String> = ["flour", "sugar", "tomato", "cheese"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(score.matched_ingredients, expected);
    }

    #[test]
    fn test_partial_match() {
        let recipe = recipe(&["flour", "sugar", "eggs"]);
        let tokens = tokenize("flour, sugar", "").unwrap();
        let score = score_tokens(&recipe, &tokens).unwrap();
        assert_eq!(score.matched_count(), 2);
        assert_eq!(score.total_ingredient_count, 3);
    }

    #[test]
    fn test_one_token_counts_once() {
        let recipe = recipe(&["2 eggs", "1 egg yolk"]);
        let tokens = tokenize("egg", "").unwrap();
        let score = score_tokens(&recipe, &tokens).unwrap();
        assert_eq!(score.matched_count(), 1);
    }

    #[test]
    fn test_one_ingredient_satisfies_one_token() {
        let recipe = recipe(&["2 eggs"]);
        let tokens = tokenize("egg, eggs", "").unwrap();
        let score = score_tokens(&recipe, &tokens).unwrap();
        assert_eq!(score.matched_count(), 1);
        assert!(score.matched_ingredients.contains("egg"));
        assert!(score.matched_count() <= score.total_ingredient_count);
    }

    #[test]
    fn test_duplicate_tokens() {
        let recipe = recipe(&["milk", "butter"]);
        let tokens = tokenize("milk, milk", "milk").unwrap();
        let score = score_tokens(&recipe, &tokens).unwrap();
        assert_eq!(score.matched_count(), 1);
    }

    #[test]
    fn test_repeated_token_leaves_ingredients_for_others() {
        let recipe = recipe(&["milk", "milk powder"]);

        let once = score_tokens(&recipe, &tokenize("milk, powder", "").unwrap()).unwrap();
        let twice = score_tokens(&recipe, &tokenize("milk, milk, powder", "").unwrap()).unwrap();

        assert_eq!(twice.matched_count(), 2);
        assert_eq!(twice, once);
    }

    #[test]
    fn test_no_ingredients() {
        let recipe = recipe(&[]);
        let tokens = tokenize("milk", "").unwrap();
        let score = score_tokens(&recipe, &tokens).unwrap();
        assert_eq!(score, Score::default());
    }

    #[test]
    fn test_matched_is_subset_of_tokens() {
        let recipe = recipe(&["Chicken breasts", "rice", "soy sauce", "ginger"]);
        let tokens = tokenize("chicken, rice, beef", "Ginger").unwrap();
        let score = score_tokens(&recipe, &tokens).unwrap();
        for matched in &score.matched_ingredients {
            assert!(tokens.iter().any(|t| t.as_str() == matched));
        }
        assert_eq!(score.matched_count(), 3);
    }
}
